//! Locomotion tunables.

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::physics::LayerMask;

/// Tunables for [`LocomotionController`](super::LocomotionController).
///
/// Loaded once at construction; the controller never writes them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Extra turn rate in degrees/second at full forward speed
    pub moving_turn_speed: f32,
    /// Extra turn rate in degrees/second when standing still
    pub stationary_turn_speed: f32,
    /// Vertical velocity in m/s set by a jump
    pub jump_power: f32,
    /// Seconds after leaving the ground during which a jump is still allowed
    pub ghost_jump_grace_period: f32,
    /// Total gravity while airborne as a multiple of world gravity
    pub gravity_multiplier: f32,
    /// Phase offset between the animation clock and the leg cycle
    pub run_cycle_leg_offset: f32,
    /// Scale applied to root-motion displacement
    pub move_speed_multiplier: f32,
    /// Animation playback rate while grounded and moving
    pub anim_speed_multiplier: f32,
    /// Length of the downward ground probe
    pub ground_check_distance: f32,
    /// Fraction of the desired move turned into an air-steering acceleration
    pub aerial_control_influence: f32,
    /// Layers that block standing up
    pub crouch_layer_mask: LayerMask,
    /// Layers that count as ground
    pub ground_layer_mask: LayerMask,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            moving_turn_speed: 360.0,
            stationary_turn_speed: 180.0,
            jump_power: 12.0,
            ghost_jump_grace_period: 0.2,
            gravity_multiplier: 2.0,
            run_cycle_leg_offset: 0.2,
            move_speed_multiplier: 1.0,
            anim_speed_multiplier: 1.0,
            ground_check_distance: 0.1,
            aerial_control_influence: 0.0,
            crouch_layer_mask: LayerMask::ALL,
            ground_layer_mask: LayerMask::ALL,
        }
    }
}

fn check(field: &'static str, value: f32, ok: bool, expected: &str) -> Result<(), RigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(RigError::invalid(field, format!("{expected}, got {value}")))
    }
}

impl LocomotionConfig {
    /// Reject values outside the ranges the controller is tuned for.
    pub fn validate(&self) -> Result<(), RigError> {
        check("moving_turn_speed", self.moving_turn_speed, true, "must be finite")?;
        check("stationary_turn_speed", self.stationary_turn_speed, true, "must be finite")?;
        check("jump_power", self.jump_power, self.jump_power >= 0.0, "must be non-negative")?;
        check(
            "ghost_jump_grace_period",
            self.ghost_jump_grace_period,
            (0.0..=1.0).contains(&self.ghost_jump_grace_period),
            "must be within [0, 1]",
        )?;
        check(
            "gravity_multiplier",
            self.gravity_multiplier,
            (1.0..=4.0).contains(&self.gravity_multiplier),
            "must be within [1, 4]",
        )?;
        check("run_cycle_leg_offset", self.run_cycle_leg_offset, true, "must be finite")?;
        check(
            "move_speed_multiplier",
            self.move_speed_multiplier,
            self.move_speed_multiplier > 0.0,
            "must be positive",
        )?;
        check(
            "anim_speed_multiplier",
            self.anim_speed_multiplier,
            self.anim_speed_multiplier > 0.0,
            "must be positive",
        )?;
        check(
            "ground_check_distance",
            self.ground_check_distance,
            self.ground_check_distance >= 0.0,
            "must be non-negative",
        )?;
        check(
            "aerial_control_influence",
            self.aerial_control_influence,
            self.aerial_control_influence >= 0.0,
            "must be non-negative",
        )
    }
}

//! Animation Module
//!
//! The locomotion controller drives an external animation engine through the
//! [`AnimationDriver`] trait: it writes named parameters, reads the base layer's
//! playback clock and the per-tick root motion, and toggles whether root motion
//! is applied by the engine itself.
//!
//! [`ProceduralAnimator`] is a self-contained implementation used by tests and
//! the sandbox binary.

pub mod procedural;

use glam::Vec3;

pub use procedural::{DEFAULT_CYCLE_DURATION, DEFAULT_ROOT_MOTION_SPEED, ProceduralAnimator};

/// Parameter names written by the locomotion controller.
pub mod param {
    /// Forward speed fraction (float, damped)
    pub const FORWARD: &str = "Forward";
    /// Heading delta in radians (float, damped)
    pub const TURN: &str = "Turn";
    /// Crouch flag (bool)
    pub const CROUCH: &str = "Crouch";
    /// Grounded flag (bool)
    pub const ON_GROUND: &str = "OnGround";
    /// Vertical velocity while airborne (float)
    pub const JUMP: &str = "Jump";
    /// Which leg trails during a jump, signed by forward amount (float)
    pub const JUMP_LEG: &str = "JumpLeg";
}

/// Damping time applied to the `Forward` and `Turn` parameters.
pub const PARAMETER_DAMP_TIME: f32 = 0.1;

/// Capability surface of an animation engine.
pub trait AnimationDriver {
    /// Set a float parameter immediately.
    fn set_float(&mut self, name: &str, value: f32);

    /// Move a float parameter toward `value`, smoothed over `damp_time` seconds.
    fn set_float_damped(&mut self, name: &str, value: f32, damp_time: f32, dt: f32);

    /// Set a bool parameter.
    fn set_bool(&mut self, name: &str, value: bool);

    /// Normalized playback time of the current state on `layer`.
    ///
    /// The integer part counts completed loops; the fractional part is the
    /// phase within the current loop.
    fn normalized_time(&self, layer: usize) -> f32;

    /// Root-motion translation produced during the last tick, in world space.
    fn delta_position(&self) -> Vec3;

    /// Whether the engine should apply root motion to the body on its own.
    fn set_apply_root_motion(&mut self, enabled: bool);

    /// Current root-motion toggle.
    fn apply_root_motion(&self) -> bool;

    /// Set the playback rate multiplier (1.0 = authored speed).
    fn set_speed(&mut self, speed: f32);

    /// Current playback rate multiplier.
    fn speed(&self) -> f32;
}

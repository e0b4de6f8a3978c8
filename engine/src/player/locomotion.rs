//! Third-Person Locomotion Controller
//!
//! Turns a world-space move request plus crouch/jump buttons into animation
//! parameters, body forces and capsule changes. Horizontal motion comes from
//! the animation's root motion (see [`LocomotionController::on_animator_move`]);
//! vertical motion belongs to physics.
//!
//! # Tick Order
//!
//! 1. Clamp the request to unit length and bring it into the local frame
//! 2. Probe for ground
//! 3. Project the request onto the ground plane, derive turn and forward amounts
//! 4. Extra yaw on top of the animation's own rotation
//! 5. Jump (grounded or within the grace window)
//! 6. Extra gravity while airborne
//! 7. Crouch resolution and the low-headroom guard
//! 8. Animator parameters, foot-step parity, playback rate
//! 9. Air steering
//!
//! # Usage
//!
//! ```rust,ignore
//! use chase_rig_engine::player::{LocomotionController, MoveInput};
//!
//! // Each physics tick:
//! character.move_character(MoveInput::new(direction), now, dt, &world);
//! let facing = character.body().rotation;
//! character.animator_mut().advance(dt, facing);
//! character.on_animator_move(dt);
//! let (body, capsule) = character.body_and_capsule();
//! world.step_body(body, capsule, dt);
//! ```

use glam::Vec3;
use log::{debug, trace};

use crate::animation::{AnimationDriver, PARAMETER_DAMP_TIME, param};
use crate::error::RigError;
use crate::math::{lerp, repeat};
use crate::physics::{
    CapsuleCollider, ForceMode, PhysicsQuery, Ray, RigidBody, TriggerInteraction,
};

use super::config::LocomotionConfig;
use super::events::{CharacterId, LocomotionEvent, LocomotionListener};
use super::ground::{GroundState, GroundTransition};

/// Ground probe starts this far above the base so it begins inside the character
pub const GROUND_PROBE_LIFT: f32 = 0.1;

/// Ground probe length while rising
pub const ASCENT_GROUND_CHECK_DISTANCE: f32 = 0.01;

/// Undrained events kept per character; the oldest are dropped beyond this
pub const MAX_PENDING_EVENTS: usize = 64;

const HALF: f32 = 0.5;

/// Input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveInput {
    /// Desired world-space move; longer than 1 is clamped
    pub direction: Vec3,
    /// Crouch held
    pub crouch: bool,
    /// Jump pressed
    pub jump: bool,
}

impl MoveInput {
    /// Move without crouching or jumping.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// No input at all.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_crouch(mut self) -> Self {
        self.crouch = true;
        self
    }
}

/// Capsule dimensions currently applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleStance {
    /// Authored height and center
    Standing,
    /// Half the authored height and center
    Crouched,
}

fn clamp_to_unit(v: Vec3) -> Vec3 {
    if v.length_squared() > 1.0 { v.normalize() } else { v }
}

fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    match normal.try_normalize() {
        Some(n) => v - n * v.dot(n),
        None => v,
    }
}

/// Root-motion driven character controller.
///
/// Owns the character's body, capsule and animation driver; the caller steps
/// the physics world with them after each tick.
pub struct LocomotionController<A: AnimationDriver> {
    id: CharacterId,
    config: LocomotionConfig,
    body: RigidBody,
    capsule: CapsuleCollider,
    /// Authored capsule height
    standing_height: f32,
    /// Authored capsule center
    standing_center: Vec3,
    stance: CapsuleStance,
    animator: A,
    ground: GroundState,
    /// Surface normal under the feet, +Y while airborne
    ground_normal: Vec3,
    /// Live ground probe length
    ground_check_distance: f32,
    turn_amount: f32,
    forward_amount: f32,
    is_crouching: bool,
    /// Which half-cycle crossing arms the next foot step
    on_first_step: bool,
    events: Vec<LocomotionEvent>,
}

impl<A: AnimationDriver> LocomotionController<A> {
    /// Create a controller around a body, its capsule and an animation driver.
    ///
    /// The capsule's current dimensions become the standing dimensions. The
    /// character starts airborne; the first tick's ground probe settles it.
    ///
    /// # Errors
    /// [`RigError::InvalidCapsule`] or [`RigError::InvalidConfig`].
    pub fn new(
        id: CharacterId,
        config: LocomotionConfig,
        body: RigidBody,
        capsule: CapsuleCollider,
        animator: A,
    ) -> Result<Self, RigError> {
        config.validate()?;
        capsule.validate()?;

        Ok(Self {
            id,
            config,
            body,
            standing_height: capsule.height,
            standing_center: capsule.center,
            capsule,
            stance: CapsuleStance::Standing,
            animator,
            ground: GroundState::new(),
            ground_normal: Vec3::Y,
            ground_check_distance: config.ground_check_distance,
            turn_amount: 0.0,
            forward_amount: 0.0,
            is_crouching: false,
            on_first_step: true,
            events: Vec::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Mutable body access for the physics step.
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn capsule(&self) -> &CapsuleCollider {
        &self.capsule
    }

    /// Body and capsule together, for stepping the physics world.
    pub fn body_and_capsule(&mut self) -> (&mut RigidBody, &CapsuleCollider) {
        (&mut self.body, &self.capsule)
    }

    pub fn stance(&self) -> CapsuleStance {
        self.stance
    }

    pub fn standing_height(&self) -> f32 {
        self.standing_height
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded()
    }

    pub fn ground_state(&self) -> &GroundState {
        &self.ground
    }

    pub fn ground_normal(&self) -> Vec3 {
        self.ground_normal
    }

    /// Current ground probe length.
    pub fn ground_check_distance(&self) -> f32 {
        self.ground_check_distance
    }

    /// Heading delta in radians derived this tick.
    pub fn turn_amount(&self) -> f32 {
        self.turn_amount
    }

    /// Forward speed fraction derived this tick.
    pub fn forward_amount(&self) -> f32 {
        self.forward_amount
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    /// Whether a jump would be accepted at time `now`.
    pub fn can_jump(&self, now: f32) -> bool {
        self.ground.can_jump(now, self.config.ghost_jump_grace_period)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Events queued since the last drain.
    pub fn pending_events(&self) -> &[LocomotionEvent] {
        &self.events
    }

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<LocomotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver every queued event to each listener, in order, and clear the queue.
    pub fn dispatch(&mut self, listeners: &mut [&mut dyn LocomotionListener]) {
        for event in self.drain_events() {
            for listener in listeners.iter_mut() {
                listener.on_event(&event);
            }
        }
    }

    fn emit(&mut self, event: LocomotionEvent) {
        trace!("character {:?}: {:?}", self.id, event);
        if self.events.len() >= MAX_PENDING_EVENTS {
            let dropped = self.events.remove(0);
            trace!("character {:?}: queue full, dropped {:?}", self.id, dropped);
        }
        self.events.push(event);
    }

    // ========================================================================
    // Per-tick update
    // ========================================================================

    /// Run one locomotion tick.
    ///
    /// Events raised by the tick are queued; drain them with
    /// [`drain_events`](Self::drain_events) or [`dispatch`](Self::dispatch)
    /// once per tick. At most [`MAX_PENDING_EVENTS`] are kept.
    ///
    /// # Arguments
    /// * `input` - Desired world-space move plus crouch/jump buttons
    /// * `now` - Simulation time in seconds
    /// * `dt` - Tick duration in seconds
    /// * `world` - Physics world to probe
    pub fn move_character<W: PhysicsQuery + ?Sized>(
        &mut self,
        input: MoveInput,
        now: f32,
        dt: f32,
        world: &W,
    ) {
        let world_move = clamp_to_unit(input.direction);
        let transform = self.body.transform();
        let local_move = transform.inverse_transform_direction(world_move);

        self.check_ground_status(now, world);

        let local_normal = transform.inverse_transform_direction(self.ground_normal);
        let projected = project_on_plane(local_move, local_normal);
        self.turn_amount = projected.x.atan2(projected.z);
        self.forward_amount = projected.z;

        self.apply_extra_turn_rotation(dt);

        if self.can_jump(now) {
            self.handle_jump(input.crouch, input.jump, now);
        }
        if !self.ground.is_grounded() {
            self.handle_airborne_movement(world.gravity());
        }

        self.scale_capsule_for_crouching(input.crouch, world);
        self.prevent_standing_in_low_headroom(world);

        self.update_animator(projected, dt);

        self.handle_aerial_movement(input.direction, dt);
    }

    /// Apply this tick's root motion to the body.
    ///
    /// Call after the animation driver has produced its delta. Only runs
    /// while grounded; the body's vertical velocity is left to physics.
    pub fn on_animator_move(&mut self, dt: f32) {
        if dt <= 0.0 || !self.ground.is_grounded() {
            return;
        }
        let mut velocity = self.animator.delta_position() * self.config.move_speed_multiplier / dt;
        velocity.y = self.body.velocity.y;
        self.body.velocity = velocity;
    }

    fn check_ground_status<W: PhysicsQuery + ?Sized>(&mut self, now: f32, world: &W) {
        let origin = self.body.position + Vec3::Y * GROUND_PROBE_LIFT;
        trace!(
            "ground probe from {:?} to {:?}",
            origin,
            origin + Vec3::NEG_Y * self.ground_check_distance
        );

        let hit = world.raycast(
            Ray::new(origin, Vec3::NEG_Y),
            self.ground_check_distance,
            self.config.ground_layer_mask,
            TriggerInteraction::Ignore,
        );

        match hit {
            Some(hit) => {
                self.ground_normal = hit.normal;
                if self.ground.set_grounded(true, now) == Some(GroundTransition::Landed) {
                    debug!("character {:?} landed at {:?}", self.id, self.body.position);
                    self.emit(LocomotionEvent::Land { character: self.id });
                }
                self.animator.set_apply_root_motion(true);
            }
            None => {
                if self.ground.set_grounded(false, now) == Some(GroundTransition::LeftGround) {
                    debug!("character {:?} left the ground at t={:.3}", self.id, now);
                }
                self.ground_normal = Vec3::Y;
                self.animator.set_apply_root_motion(false);
            }
        }
    }

    fn apply_extra_turn_rotation(&mut self, dt: f32) {
        let turn_speed = lerp(
            self.config.stationary_turn_speed,
            self.config.moving_turn_speed,
            self.forward_amount,
        );
        self.body.rotate_yaw_degrees(self.turn_amount * turn_speed * dt);
    }

    fn handle_jump(&mut self, crouch: bool, jump: bool, now: f32) {
        if !jump || crouch {
            return;
        }
        self.body.velocity.y = self.config.jump_power;
        self.ground.set_grounded(false, now);
        self.ground.clear_grace();
        self.animator.set_apply_root_motion(false);
        self.ground_check_distance = self.config.ground_check_distance;

        debug!("character {:?} jumped with {:.2} m/s", self.id, self.config.jump_power);
        self.emit(LocomotionEvent::Jump { character: self.id });
    }

    fn handle_airborne_movement(&mut self, gravity: Vec3) {
        let extra_gravity = gravity * self.config.gravity_multiplier - gravity;
        self.body.add_force(extra_gravity, ForceMode::Force);

        self.ground_check_distance = if self.body.velocity.y < 0.0 {
            self.config.ground_check_distance
        } else {
            ASCENT_GROUND_CHECK_DISTANCE
        };
    }

    /// Whether a standing capsule would hit something overhead.
    ///
    /// Geometry already touching the probe sphere at its start (the floor)
    /// does not count.
    pub fn headroom_blocked<W: PhysicsQuery + ?Sized>(&self, world: &W) -> bool {
        let half_radius = self.capsule.radius * HALF;
        let ray = Ray::new(self.body.position + Vec3::Y * half_radius, Vec3::Y);
        world
            .sphere_cast(
                ray,
                half_radius,
                self.standing_height - half_radius,
                self.config.crouch_layer_mask,
                TriggerInteraction::Ignore,
            )
            .is_some()
    }

    fn scale_capsule_for_crouching<W: PhysicsQuery + ?Sized>(&mut self, crouch: bool, world: &W) {
        if self.ground.is_grounded() && crouch {
            self.is_crouching = true;
            if self.stance == CapsuleStance::Crouched {
                return;
            }
            self.capsule.height = self.standing_height * HALF;
            self.capsule.center = self.standing_center * HALF;
            self.stance = CapsuleStance::Crouched;
            debug!("character {:?} crouched", self.id);
            return;
        }

        if self.headroom_blocked(world) {
            if !self.is_crouching {
                debug!("character {:?} kept crouched by low headroom", self.id);
            }
            self.is_crouching = true;
            return;
        }

        if self.stance == CapsuleStance::Crouched {
            debug!("character {:?} stood up", self.id);
        }
        self.capsule.height = self.standing_height;
        self.capsule.center = self.standing_center;
        self.stance = CapsuleStance::Standing;
        self.is_crouching = false;
    }

    fn prevent_standing_in_low_headroom<W: PhysicsQuery + ?Sized>(&mut self, world: &W) {
        if !self.is_crouching && self.headroom_blocked(world) {
            debug!("character {:?} forced to crouch under low headroom", self.id);
            self.is_crouching = true;
        }
    }

    fn update_animator(&mut self, projected: Vec3, dt: f32) {
        let grounded = self.ground.is_grounded();

        self.animator
            .set_float_damped(param::FORWARD, self.forward_amount, PARAMETER_DAMP_TIME, dt);
        self.animator
            .set_float_damped(param::TURN, self.turn_amount, PARAMETER_DAMP_TIME, dt);
        self.animator.set_bool(param::CROUCH, self.is_crouching);
        self.animator.set_bool(param::ON_GROUND, grounded);
        if !grounded {
            self.animator.set_float(param::JUMP, self.body.velocity.y);
        }

        // Legs pass each other at cycle phases 0.0 and 0.5
        let run_cycle = repeat(
            self.animator.normalized_time(0) + self.config.run_cycle_leg_offset,
            1.0,
        );
        let jump_leg = (if run_cycle < HALF { 1.0 } else { -1.0 }) * self.forward_amount;

        if grounded {
            self.animator.set_float(param::JUMP_LEG, jump_leg);
            self.update_step_parity(run_cycle);
        }

        let speed = if grounded && projected.length() > 0.0 {
            self.config.anim_speed_multiplier
        } else {
            1.0
        };
        self.animator.set_speed(speed);
    }

    /// Emit one foot step per half-cycle crossing.
    fn update_step_parity(&mut self, run_cycle: f32) {
        let stepped = if self.on_first_step {
            run_cycle < HALF
        } else {
            run_cycle > HALF
        };
        if stepped {
            self.on_first_step = !self.on_first_step;
            self.emit(LocomotionEvent::FootStep { character: self.id });
        }
    }

    fn handle_aerial_movement(&mut self, desired: Vec3, dt: f32) {
        if self.ground.is_grounded() || self.config.aerial_control_influence <= 0.0 || dt <= 0.0 {
            return;
        }
        let mut steer = desired;
        if steer.length_squared() > 0.0 {
            steer = clamp_to_unit(steer) * self.config.aerial_control_influence / dt;
        }
        steer.y = 0.0;
        self.body.add_force(steer, ForceMode::Acceleration);
    }
}

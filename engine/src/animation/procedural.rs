//! Procedural animator
//!
//! A parameter store with a looping playback clock and forward-driven root
//! motion. It stands in for a real animation engine: the clock advances at
//! `speed / cycle_duration` loops per second and the root motion moves the
//! character along its facing at `Forward * root_motion_speed * speed`.

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::math::smooth_damp;

use super::{AnimationDriver, param};

/// Seconds per run cycle at playback speed 1.
pub const DEFAULT_CYCLE_DURATION: f32 = 0.8;

/// Root-motion speed in m/s at `Forward = 1` and playback speed 1.
pub const DEFAULT_ROOT_MOTION_SPEED: f32 = 4.0;

/// Animation engine stand-in driven entirely by its parameters.
#[derive(Debug, Clone)]
pub struct ProceduralAnimator {
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
    /// Damper state per damped float parameter
    damp_velocities: HashMap<String, f32>,
    normalized_time: f32,
    delta_position: Vec3,
    apply_root_motion: bool,
    speed: f32,
    /// Seconds per loop at speed 1
    pub cycle_duration: f32,
    /// m/s of root motion at `Forward = 1`
    pub root_motion_speed: f32,
}

impl Default for ProceduralAnimator {
    fn default() -> Self {
        Self {
            floats: HashMap::new(),
            bools: HashMap::new(),
            damp_velocities: HashMap::new(),
            normalized_time: 0.0,
            delta_position: Vec3::ZERO,
            apply_root_motion: true,
            speed: 1.0,
            cycle_duration: DEFAULT_CYCLE_DURATION,
            root_motion_speed: DEFAULT_ROOT_MOTION_SPEED,
        }
    }
}

impl ProceduralAnimator {
    /// Create an animator with default cycle and root-motion settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an animator with custom cycle duration and root-motion speed.
    pub fn with_cycle(cycle_duration: f32, root_motion_speed: f32) -> Self {
        Self {
            cycle_duration,
            root_motion_speed,
            ..Default::default()
        }
    }

    /// Read a float parameter (0.0 if never written).
    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Read a bool parameter (false if never written).
    pub fn bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Whether a float parameter has ever been written.
    pub fn has_float(&self, name: &str) -> bool {
        self.floats.contains_key(name)
    }

    /// Jump the playback clock to `time`.
    pub fn set_normalized_time(&mut self, time: f32) {
        self.normalized_time = time;
    }

    /// Advance the clock and produce this tick's root motion.
    ///
    /// # Arguments
    /// * `dt` - Tick duration in seconds
    /// * `facing` - Character orientation; root motion follows its +Z axis
    pub fn advance(&mut self, dt: f32, facing: Quat) {
        if dt <= 0.0 {
            self.delta_position = Vec3::ZERO;
            return;
        }
        if self.cycle_duration > 0.0 {
            self.normalized_time += dt * self.speed / self.cycle_duration;
        }
        let forward = self.float(param::FORWARD);
        self.delta_position = facing * Vec3::Z * (forward * self.root_motion_speed * self.speed * dt);
    }
}

impl AnimationDriver for ProceduralAnimator {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_owned(), value);
    }

    fn set_float_damped(&mut self, name: &str, value: f32, damp_time: f32, dt: f32) {
        let current = self.float(name);
        let velocity = self.damp_velocities.entry(name.to_owned()).or_insert(0.0);
        let next = smooth_damp(current, value, velocity, damp_time, dt);
        self.floats.insert(name.to_owned(), next);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_owned(), value);
    }

    fn normalized_time(&self, _layer: usize) -> f32 {
        self.normalized_time
    }

    fn delta_position(&self) -> Vec3 {
        self.delta_position
    }

    fn set_apply_root_motion(&mut self, enabled: bool) {
        self.apply_root_motion = enabled;
    }

    fn apply_root_motion(&self) -> bool {
        self.apply_root_motion
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

//! Physics type re-exports from glam plus the small spatial types the
//! controllers pass to physics queries.
//!
//! # Frame Convention
//!
//! +Y is up and +Z is forward. `Quat::from_rotation_y(θ)` with positive θ turns
//! the forward axis toward +X, so a positive yaw is a turn to the right.

pub use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of a scene node in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Transform at the origin facing +Z.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a transform from position and rotation.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Local +Z axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Convert a local-space point to world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Convert a world-space point to local space.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Convert a world-space direction to local space (rotation only).
    pub fn inverse_transform_direction(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * world
    }
}

/// A half-line used by ray casts and sphere sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point in world space
    pub origin: Vec3,
    /// Direction of travel (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// A zero direction yields a zero-length direction; queries along such a
    /// ray report nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

//! Rigid body and capsule collider owned by a character.
//!
//! The body integrates its own velocity; forces are accumulated during a tick
//! and consumed by the next [`RigidBody::integrate`] call.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::RigError;

use super::types::Transform;

/// How a force passed to [`RigidBody::add_force`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force in newtons, scaled by inverse mass.
    Force,
    /// Continuous acceleration in m/s², mass is ignored.
    Acceleration,
}

/// Dynamic body of a character.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// World-space position of the body's base (the character's feet)
    pub position: Vec3,
    /// World-space orientation
    pub rotation: Quat,
    /// Linear velocity in m/s
    pub velocity: Vec3,
    /// Mass in kg
    pub mass: f32,
    /// Whether the world's gravity is applied during integration
    pub use_gravity: bool,
    /// Acceleration accumulated since the last integration
    pending_acceleration: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            mass: 1.0,
            use_gravity: true,
            pending_acceleration: Vec3::ZERO,
        }
    }
}

impl RigidBody {
    /// Create a body at `position` facing +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a body with a specific mass.
    pub fn with_mass(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            mass,
            ..Default::default()
        }
    }

    /// The body's pose as a transform.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Queue a force for the next integration step.
    pub fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => {
                if self.mass > 0.0 {
                    self.pending_acceleration += force / self.mass;
                }
            }
            ForceMode::Acceleration => self.pending_acceleration += force,
        }
    }

    /// Acceleration queued since the last integration.
    pub fn pending_acceleration(&self) -> Vec3 {
        self.pending_acceleration
    }

    /// Rotate about world +Y by `degrees`.
    pub fn rotate_yaw_degrees(&mut self, degrees: f32) {
        self.rotation = (Quat::from_rotation_y(degrees.to_radians()) * self.rotation).normalize();
    }

    /// Semi-implicit Euler step: velocity first, then position.
    ///
    /// Consumes the queued forces.
    pub fn integrate(&mut self, gravity: Vec3, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let mut acceleration = self.pending_acceleration;
        if self.use_gravity {
            acceleration += gravity;
        }
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
        self.pending_acceleration = Vec3::ZERO;
    }
}

/// Upright capsule collision volume, in the body's local frame.
///
/// `height` and `center` are mutable for crouching; the standing values are
/// captured at construction and never change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleCollider {
    /// Total height including both hemispherical caps
    pub height: f32,
    /// Cap radius
    pub radius: f32,
    /// Center relative to the body's base
    pub center: Vec3,
}

impl Default for CapsuleCollider {
    fn default() -> Self {
        Self {
            height: 1.6,
            radius: 0.3,
            center: Vec3::new(0.0, 0.8, 0.0),
        }
    }
}

impl CapsuleCollider {
    /// Create a capsule whose base sits at the body's origin.
    pub fn standing(height: f32, radius: f32) -> Self {
        Self {
            height,
            radius,
            center: Vec3::new(0.0, height * 0.5, 0.0),
        }
    }

    /// Reject degenerate dimensions.
    pub fn validate(&self) -> Result<(), RigError> {
        if self.height > 0.0 && self.radius > 0.0 && self.height.is_finite() && self.radius.is_finite() {
            Ok(())
        } else {
            Err(RigError::InvalidCapsule {
                height: self.height,
                radius: self.radius,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_mode_scales_by_mass() {
        let mut body = RigidBody::with_mass(Vec3::ZERO, 2.0);
        body.add_force(Vec3::new(0.0, -4.0, 0.0), ForceMode::Force);
        assert_eq!(body.pending_acceleration(), Vec3::new(0.0, -2.0, 0.0));

        body.add_force(Vec3::new(1.0, 0.0, 0.0), ForceMode::Acceleration);
        assert_eq!(body.pending_acceleration(), Vec3::new(1.0, -2.0, 0.0));
    }

    #[test]
    fn test_integrate_consumes_forces() {
        let mut body = RigidBody::new(Vec3::ZERO);
        body.use_gravity = false;
        body.add_force(Vec3::new(0.0, 0.0, 10.0), ForceMode::Acceleration);
        body.integrate(Vec3::new(0.0, -9.81, 0.0), 0.1);

        assert!((body.velocity.z - 1.0).abs() < 1e-5);
        assert!((body.position.z - 0.1).abs() < 1e-5);
        assert_eq!(body.pending_acceleration(), Vec3::ZERO);
    }

    #[test]
    fn test_rotate_yaw_accumulates() {
        let mut body = RigidBody::default();
        body.rotate_yaw_degrees(45.0);
        body.rotate_yaw_degrees(45.0);
        let forward = body.transform().forward();
        assert!((forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_capsule_validation() {
        assert!(CapsuleCollider::standing(1.8, 0.3).validate().is_ok());
        assert!(matches!(
            CapsuleCollider::standing(0.0, 0.3).validate(),
            Err(RigError::InvalidCapsule { .. })
        ));
    }
}

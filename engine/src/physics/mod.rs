//! Physics module
//!
//! The physics surface the character and camera controllers depend on: the
//! query capability they call into, the body they mutate, and a small
//! deterministic world that implements the queries.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam, plus `Transform` and `Ray`
//! - [`layers`] - Layer masks and trigger filtering
//! - [`query`] - The [`PhysicsQuery`] capability and hit types
//! - [`body`] - Rigid body, force modes and the capsule collider
//! - [`collision`] - Box/sphere world implementing [`PhysicsQuery`]

pub mod body;
pub mod collision;
pub mod layers;
pub mod query;
pub mod types;

pub use body::{CapsuleCollider, ForceMode, RigidBody};
pub use collision::{
    CollisionWorld, DEFAULT_GRAVITY, aabb_surface_normal, ray_aabb_intersect, ray_sphere_intersect,
};
pub use layers::{LayerMask, TriggerInteraction};
pub use query::{ColliderId, ColliderInfo, PhysicsQuery, RaycastHit, compare_hit_distance};
pub use types::{Quat, Ray, Transform, Vec3};

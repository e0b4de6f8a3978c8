//! Physics query capability.
//!
//! Both controllers talk to the physics world only through [`PhysicsQuery`].
//! The trait exposes exactly the queries they issue, so a deterministic world
//! (see [`CollisionWorld`](super::CollisionWorld)) or any engine adapter can
//! stand behind it.

use std::cmp::Ordering;

use glam::Vec3;

use super::layers::{LayerMask, TriggerInteraction};
use super::types::Ray;

/// Opaque handle of a collider inside a physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u32);

/// Collider summary returned by overlap queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderInfo {
    /// Collider handle
    pub id: ColliderId,
    /// Layer index the collider lives on
    pub layer: u32,
    /// Trigger volumes report overlaps but never block movement
    pub is_trigger: bool,
}

/// A single hit reported by a ray cast or sphere sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Distance travelled along the query ray before contact.
    ///
    /// For sphere sweeps this is the distance travelled by the sphere center.
    /// A sweep that starts overlapping a collider reports `0.0`.
    pub distance: f32,
    /// World-space contact point
    pub point: Vec3,
    /// Surface normal at the contact point
    pub normal: Vec3,
    /// Collider that was hit
    pub collider: ColliderInfo,
}

impl RaycastHit {
    /// Whether the hit collider is a trigger volume.
    pub fn is_trigger(&self) -> bool {
        self.collider.is_trigger
    }
}

/// Ascending order by hit distance.
///
/// NaN distances sort after every finite distance.
pub fn compare_hit_distance(a: &RaycastHit, b: &RaycastHit) -> Ordering {
    a.distance.total_cmp(&b.distance)
}

/// Query surface of a physics world.
///
/// `*_all` queries report every hit, triggers included; callers filter.
/// Single-result queries return the nearest hit and take a
/// [`TriggerInteraction`] to decide whether triggers count. Zero hits is a
/// normal outcome, never an error.
pub trait PhysicsQuery {
    /// World gravity acceleration applied to bodies by the physics step.
    fn gravity(&self) -> Vec3;

    /// Every collider on `mask` intersecting the sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderInfo>;

    /// Every hit along `ray` up to `max_distance`, in no particular order.
    fn raycast_all(&self, ray: Ray, max_distance: f32, mask: LayerMask) -> Vec<RaycastHit>;

    /// Every hit of a sphere swept along `ray` up to `max_distance`, in no
    /// particular order.
    fn sphere_cast_all(
        &self,
        ray: Ray,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<RaycastHit>;

    /// Nearest hit along `ray` up to `max_distance`.
    fn raycast(
        &self,
        ray: Ray,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerInteraction,
    ) -> Option<RaycastHit>;

    /// Nearest hit of a sphere swept along `ray`.
    ///
    /// Colliders the sphere already overlaps at its start position are not
    /// reported.
    fn sphere_cast(
        &self,
        ray: Ray,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerInteraction,
    ) -> Option<RaycastHit>;
}

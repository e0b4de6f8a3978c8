//! Collision detection module
//!
//! A deterministic physics world made of axis-aligned boxes and spheres. It
//! implements [`PhysicsQuery`] so the controllers can run against it in tests
//! and in the sandbox binary without a full physics engine.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//! Sphere sweeps against boxes use the same test on the box grown by the
//! sphere radius, which treats the rounded corners of the swept volume as
//! square.
//!
//! # Example
//!
//! ```ignore
//! use chase_rig_engine::physics::{CollisionWorld, LayerMask, Ray};
//! use glam::Vec3;
//!
//! let mut world = CollisionWorld::new();
//! world.add_box(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0), 0);
//!
//! let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
//! let hits = world.raycast_all(ray, 5.0, LayerMask::ALL);
//! assert_eq!(hits.len(), 1);
//! ```

use glam::Vec3;

use super::body::{CapsuleCollider, RigidBody};
use super::layers::{LayerMask, TriggerInteraction};
use super::query::{ColliderId, ColliderInfo, PhysicsQuery, RaycastHit, compare_hit_distance};
use super::types::Ray;

/// Default gravity in m/s².
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Distance under which a sphere counts as already touching a surface.
const CONTACT_EPSILON: f32 = 1e-4;

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters and exits the AABB
/// at valid times (t_enter < t_exit and t_exit > 0), there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components get huge inverse values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
///
/// # Arguments
///
/// * `point` - Point on the AABB surface
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// Normalized outward normal vector
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let local = point - center;

    let normalized = local / half_extents;
    let abs_normalized = normalized.abs();

    // Face with the highest absolute normalized coordinate wins
    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Nearest non-negative intersection of a ray with a sphere.
///
/// Returns `None` when the ray misses or the sphere lies behind the origin.
/// An origin inside the sphere yields the exit distance.
pub fn ray_sphere_intersect(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray_origin - center;
    let b = to_origin.dot(ray_dir);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Geometry of a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColliderShape {
    /// Axis-aligned box given by its corners
    Box { min: Vec3, max: Vec3 },
    /// Sphere given by center and radius
    Sphere { center: Vec3, radius: f32 },
}

impl ColliderShape {
    /// Point on (or inside) the shape closest to `point`.
    fn closest_point(&self, point: Vec3) -> Vec3 {
        match *self {
            ColliderShape::Box { min, max } => point.clamp(min, max),
            ColliderShape::Sphere { center, radius } => {
                let offset = point - center;
                if offset.length_squared() <= radius * radius {
                    point
                } else {
                    center + offset.normalize() * radius
                }
            }
        }
    }

    /// Whether `point` lies strictly inside the shape.
    fn contains(&self, point: Vec3) -> bool {
        match *self {
            ColliderShape::Box { min, max } => point.cmpgt(min).all() && point.cmplt(max).all(),
            ColliderShape::Sphere { center, radius } => {
                (point - center).length_squared() < radius * radius
            }
        }
    }

    /// Outward surface normal at a surface point.
    fn normal_at(&self, point: Vec3) -> Vec3 {
        match *self {
            ColliderShape::Box { min, max } => aabb_surface_normal(point, min, max),
            ColliderShape::Sphere { center, .. } => (point - center).normalize_or(Vec3::Y),
        }
    }

    /// Distance along `ray` at which a sphere of `radius` first touches the shape.
    fn sweep_distance(&self, ray: Ray, radius: f32) -> Option<f32> {
        match *self {
            ColliderShape::Box { min, max } => {
                let grow = Vec3::splat(radius);
                ray_aabb_intersect(ray.origin, ray.direction, min - grow, max + grow)
            }
            ColliderShape::Sphere { center, radius: own } => {
                ray_sphere_intersect(ray.origin, ray.direction, center, own + radius)
            }
        }
    }
}

/// A collider placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Collider {
    /// Handle assigned by the world
    id: ColliderId,
    /// Geometry
    shape: ColliderShape,
    /// Layer index (0..32)
    layer: u32,
    /// Trigger volumes are reported by queries but never support bodies
    is_trigger: bool,
}

impl Collider {
    fn info(&self) -> ColliderInfo {
        ColliderInfo {
            id: self.id,
            layer: self.layer,
            is_trigger: self.is_trigger,
        }
    }
}

/// Static collision world.
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    next_id: u32,
    gravity: Vec3,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl CollisionWorld {
    /// Create an empty world with standard gravity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world with custom gravity.
    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    fn insert(&mut self, shape: ColliderShape, layer: u32, is_trigger: bool) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider {
            id,
            shape,
            layer,
            is_trigger,
        });
        id
    }

    /// Add a solid box given its corners.
    ///
    /// # Arguments
    ///
    /// * `min` - Minimum corner
    /// * `max` - Maximum corner
    /// * `layer` - Layer index
    pub fn add_box(&mut self, min: Vec3, max: Vec3, layer: u32) -> ColliderId {
        self.insert(ColliderShape::Box { min: min.min(max), max: min.max(max) }, layer, false)
    }

    /// Add a solid sphere.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, layer: u32) -> ColliderId {
        self.insert(ColliderShape::Sphere { center, radius }, layer, false)
    }

    /// Add a trigger box. Triggers show up in `*_all` queries with
    /// `is_trigger` set.
    pub fn add_trigger_box(&mut self, min: Vec3, max: Vec3, layer: u32) -> ColliderId {
        self.insert(ColliderShape::Box { min: min.min(max), max: min.max(max) }, layer, true)
    }

    /// Remove a collider. Returns false if the handle is unknown.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    fn visible(&self, mask: LayerMask) -> impl Iterator<Item = &Collider> {
        self.colliders.iter().filter(move |c| mask.includes(c.layer))
    }

    fn ray_hit(collider: &Collider, ray: Ray, max_distance: f32) -> Option<RaycastHit> {
        // Colliders enclosing the origin are not reported
        if collider.shape.contains(ray.origin) {
            return None;
        }
        let t = match collider.shape {
            ColliderShape::Box { min, max } => ray_aabb_intersect(ray.origin, ray.direction, min, max),
            ColliderShape::Sphere { center, radius } => {
                ray_sphere_intersect(ray.origin, ray.direction, center, radius)
            }
        }?;
        if t > max_distance {
            return None;
        }
        let point = ray.point_at(t);
        Some(RaycastHit {
            distance: t,
            point,
            normal: collider.shape.normal_at(point),
            collider: collider.info(),
        })
    }

    fn sweep_hit(collider: &Collider, ray: Ray, radius: f32, max_distance: f32) -> Option<RaycastHit> {
        let start_contact = collider.shape.closest_point(ray.origin);
        if start_contact.distance(ray.origin) <= radius + CONTACT_EPSILON {
            return Some(RaycastHit {
                distance: 0.0,
                point: start_contact,
                normal: -ray.direction,
                collider: collider.info(),
            });
        }

        let t = collider.shape.sweep_distance(ray, radius)?;
        if t > max_distance {
            return None;
        }
        let center = ray.point_at(t);
        let point = collider.shape.closest_point(center);
        let normal = (center - point)
            .try_normalize()
            .unwrap_or_else(|| collider.shape.normal_at(point));
        Some(RaycastHit {
            distance: t,
            point,
            normal,
            collider: collider.info(),
        })
    }

    fn nearest(mut hits: Vec<RaycastHit>, triggers: TriggerInteraction) -> Option<RaycastHit> {
        if triggers == TriggerInteraction::Ignore {
            hits.retain(|h| !h.is_trigger());
        }
        hits.into_iter().min_by(compare_hit_distance)
    }

    /// Advance a character body by one physics step.
    ///
    /// Integrates gravity and queued forces, then keeps the body's base on top
    /// of the highest solid surface it reached this step, and stops upward
    /// motion when the capsule top meets a ceiling.
    ///
    /// The support ray starts above the higher of the old and new base, so a
    /// fall of any length in one step still finds the surface it crossed.
    pub fn step_body(&self, body: &mut RigidBody, capsule: &CapsuleCollider, dt: f32) {
        let previous_y = body.position.y;
        body.integrate(self.gravity, dt);

        let probe = capsule.radius.max(0.05);
        let top = previous_y.max(body.position.y) + probe;
        let support = Ray::new(Vec3::new(body.position.x, top, body.position.z), Vec3::NEG_Y);
        let reach = top - (body.position.y - probe);
        if let Some(hit) = self.raycast(support, reach, LayerMask::ALL, TriggerInteraction::Ignore) {
            if hit.point.y >= body.position.y {
                body.position.y = hit.point.y;
                if body.velocity.y < 0.0 {
                    body.velocity.y = 0.0;
                }
            }
        }

        if body.velocity.y > 0.0 {
            let top = capsule.center.y + capsule.height * 0.5;
            let head = Ray::new(body.position + Vec3::Y * probe, Vec3::Y);
            if self
                .raycast(head, (top - probe).max(0.0), LayerMask::ALL, TriggerInteraction::Ignore)
                .is_some()
            {
                body.velocity.y = 0.0;
            }
        }
    }
}

impl PhysicsQuery for CollisionWorld {
    fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderInfo> {
        self.visible(mask)
            .filter(|c| c.shape.closest_point(center).distance(center) <= radius)
            .map(Collider::info)
            .collect()
    }

    fn raycast_all(&self, ray: Ray, max_distance: f32, mask: LayerMask) -> Vec<RaycastHit> {
        if ray.direction == Vec3::ZERO || max_distance < 0.0 {
            return Vec::new();
        }
        self.visible(mask)
            .filter_map(|c| Self::ray_hit(c, ray, max_distance))
            .collect()
    }

    fn sphere_cast_all(
        &self,
        ray: Ray,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<RaycastHit> {
        if ray.direction == Vec3::ZERO || max_distance < 0.0 {
            return Vec::new();
        }
        self.visible(mask)
            .filter_map(|c| Self::sweep_hit(c, ray, radius, max_distance))
            .collect()
    }

    fn raycast(
        &self,
        ray: Ray,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerInteraction,
    ) -> Option<RaycastHit> {
        Self::nearest(self.raycast_all(ray, max_distance, mask), triggers)
    }

    fn sphere_cast(
        &self,
        ray: Ray,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerInteraction,
    ) -> Option<RaycastHit> {
        let mut hits = self.sphere_cast_all(ray, radius, max_distance, mask);
        // Geometry touching the sphere at its start is not an obstruction
        hits.retain(|h| h.distance > 0.0);
        Self::nearest(hits, triggers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0), 0);
        world
    }

    #[test]
    fn test_ray_hits_aabb_from_front() {
        let origin = Vec3::new(0.0, 0.0, -5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        let t = ray_aabb_intersect(origin, dir, aabb_min, aabb_max).expect("should hit");
        assert!((t - 4.0).abs() < 0.001, "Expected t=4.0, got t={}", t);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let origin = Vec3::new(0.0, 5.0, -5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        let result = ray_aabb_intersect(origin, dir, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        let result = ray_aabb_intersect(origin, dir, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(result.is_none());
    }

    #[test]
    fn test_surface_normal_y_face() {
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert_eq!(aabb_surface_normal(Vec3::new(0.0, 1.0, 0.0), aabb_min, aabb_max), Vec3::Y);
        assert_eq!(aabb_surface_normal(Vec3::new(0.0, -1.0, 0.0), aabb_min, aabb_max), Vec3::NEG_Y);
    }

    #[test]
    fn test_ray_sphere_front_and_inside() {
        let t = ray_sphere_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ground_raycast_reports_normal() {
        let world = floor_world();
        let ray = Ray::new(Vec3::new(0.0, 0.1, 0.0), Vec3::NEG_Y);
        let hit = world
            .raycast(ray, 0.1, LayerMask::ALL, TriggerInteraction::Ignore)
            .expect("floor should be within reach");
        assert!((hit.distance - 0.1).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_raycast_respects_mask() {
        let world = floor_world();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        assert!(world.raycast_all(ray, 5.0, LayerMask::layer(1)).is_empty());
        assert_eq!(world.raycast_all(ray, 5.0, LayerMask::layer(0)).len(), 1);
    }

    #[test]
    fn test_raycast_ignores_enclosing_collider() {
        let world = floor_world();
        let ray = Ray::new(Vec3::new(0.0, -0.5, 0.0), Vec3::NEG_Y);
        assert!(world.raycast_all(ray, 5.0, LayerMask::ALL).is_empty());
    }

    #[test]
    fn test_single_raycast_trigger_interaction() {
        let mut world = CollisionWorld::new();
        world.add_trigger_box(Vec3::new(-1.0, 1.0, -1.0), Vec3::new(1.0, 2.0, 1.0), 0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);

        assert!(world.raycast(ray, 10.0, LayerMask::ALL, TriggerInteraction::Ignore).is_none());
        let hit = world
            .raycast(ray, 10.0, LayerMask::ALL, TriggerInteraction::Collide)
            .expect("trigger should be reported");
        assert!(hit.is_trigger());
    }

    #[test]
    fn test_sphere_cast_all_reports_start_overlap_at_zero() {
        let world = floor_world();
        let ray = Ray::new(Vec3::new(0.0, 0.05, 0.0), Vec3::Y);
        let hits = world.sphere_cast_all(ray, 0.1, 2.0, LayerMask::ALL);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn test_single_sphere_cast_skips_start_contact() {
        let mut world = floor_world();
        // Ceiling 1.0m above the floor
        world.add_box(Vec3::new(-2.0, 1.0, -2.0), Vec3::new(2.0, 1.5, 2.0), 0);

        let ray = Ray::new(Vec3::new(0.0, 0.15, 0.0), Vec3::Y);
        let hit = world
            .sphere_cast(ray, 0.15, 2.0, LayerMask::ALL, TriggerInteraction::Ignore)
            .expect("ceiling should block");
        assert!((hit.distance - 0.7).abs() < 1e-4);
        assert!((hit.point.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlap_sphere() {
        let world = floor_world();
        assert_eq!(world.overlap_sphere(Vec3::new(0.0, 0.05, 0.0), 0.1, LayerMask::ALL).len(), 1);
        assert!(world.overlap_sphere(Vec3::new(0.0, 0.5, 0.0), 0.1, LayerMask::ALL).is_empty());
    }

    #[test]
    fn test_step_body_rests_on_floor() {
        let world = floor_world();
        let capsule = CapsuleCollider::standing(1.8, 0.3);
        let mut body = RigidBody::new(Vec3::new(0.0, 1.0, 0.0));

        for _ in 0..200 {
            world.step_body(&mut body, &capsule, 0.02);
        }
        assert_eq!(body.position.y, 0.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_step_body_catches_fast_fall() {
        let world = floor_world();
        let capsule = CapsuleCollider::standing(1.6, 0.3);
        // One step moves the base 0.8m, well past the capsule radius
        let mut body = RigidBody::new(Vec3::new(0.0, 0.2, 0.0));
        body.use_gravity = false;
        body.velocity.y = -50.0;

        world.step_body(&mut body, &capsule, 0.02);
        assert_eq!(body.position.y, 0.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_step_body_lands_from_any_height() {
        let world = floor_world();
        let capsule = CapsuleCollider::standing(1.6, 0.3);

        for height in [5.0, 12.0, 15.0, 20.0, 40.0] {
            let mut body = RigidBody::new(Vec3::new(0.0, height, 0.0));
            for _ in 0..400 {
                world.step_body(&mut body, &capsule, 0.02);
            }
            assert_eq!(body.position.y, 0.0, "dropped from {height}");
        }
    }

    #[test]
    fn test_step_body_lands_on_thin_platform() {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(-2.0, 2.95, -2.0), Vec3::new(2.0, 3.0, 2.0), 0);
        let capsule = CapsuleCollider::standing(1.6, 0.3);
        let mut body = RigidBody::new(Vec3::new(0.0, 3.2, 0.0));
        body.use_gravity = false;
        body.velocity.y = -40.0;

        world.step_body(&mut body, &capsule, 0.02);
        assert_eq!(body.position.y, 3.0);
    }

    #[test]
    fn test_remove_collider() {
        let mut world = CollisionWorld::new();
        let id = world.add_box(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 0.0, 1.0), 0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        assert_eq!(world.raycast_all(ray, 5.0, LayerMask::ALL).len(), 1);

        assert!(world.remove(id));
        assert!(world.raycast_all(ray, 5.0, LayerMask::ALL).is_empty());
        assert!(!world.remove(id));
    }
}

//! Camera Clip Guard
//!
//! Keeps a trailing camera at its authored distance behind a pivot while
//! pulling it in whenever world geometry sits between the pivot and the
//! camera. The user can push the camera further out or pull it in with the
//! scroll wheel within a configured range.
//!
//! # Per-Tick Algorithm
//!
//! 1. Smooth the zoom offset toward its scroll-driven target.
//! 2. Probe from just in front of the pivot along its backward axis. If the
//!    probe start already overlaps solid geometry, fall back to a plain ray
//!    cast starting further forward; otherwise sweep a sphere.
//! 3. The nearest non-trigger hit, measured as depth along the pivot's
//!    backward axis, becomes the target distance.
//! 4. Approach the target with a critically damped spring: fast when pulling
//!    in, slow when easing back out.
//! 5. Clamp to `[closest_distance, base_distance + zoom_offset]` and place
//!    every camera at that depth.
//!
//! Run it after the character has moved for the frame so the probe sees the
//! pivot's final position.

use glam::Vec3;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::math::{clamp_unordered, lerp, smooth_damp};
use crate::physics::{LayerMask, PhysicsQuery, Ray, RaycastHit, Transform, compare_hit_distance};

/// Tunables for [`CameraClipGuard`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipGuardConfig {
    /// Smoothing time in seconds when pulling in to avoid clipping
    pub clip_move_time: f32,
    /// Smoothing time in seconds when easing back out
    pub return_time: f32,
    /// Radius of the probe sphere
    pub sphere_cast_radius: f32,
    /// The closest the camera may get to the pivot
    pub closest_distance: f32,
    /// Layers that can obstruct the camera
    pub ray_cast_mask: LayerMask,
    /// Lower bound of the scroll zoom offset
    pub zoom_min: f32,
    /// Upper bound of the scroll zoom offset
    pub zoom_max: f32,
    /// Distance change per unit of scroll
    pub scroll_strength: f32,
    /// Zoom smoothing rate (fraction of the remaining gap per second)
    pub scroll_smoothing: f32,
}

impl Default for ClipGuardConfig {
    fn default() -> Self {
        Self {
            clip_move_time: 0.05,
            return_time: 0.4,
            sphere_cast_radius: 0.1,
            closest_distance: 0.5,
            ray_cast_mask: LayerMask::ALL,
            zoom_min: -1.0,
            zoom_max: 4.0,
            scroll_strength: 1.0,
            scroll_smoothing: 1.0,
        }
    }
}

impl ClipGuardConfig {
    /// Reject values the guard cannot work with.
    pub fn validate(&self) -> Result<(), RigError> {
        let non_negative = [
            ("clip_move_time", self.clip_move_time),
            ("return_time", self.return_time),
            ("sphere_cast_radius", self.sphere_cast_radius),
            ("closest_distance", self.closest_distance),
            ("scroll_smoothing", self.scroll_smoothing),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(RigError::invalid(field, format!("must be a non-negative number, got {value}")));
            }
        }
        if !(self.zoom_min <= self.zoom_max) {
            return Err(RigError::invalid(
                "zoom_min",
                format!("zoom range is inverted ({} > {})", self.zoom_min, self.zoom_max),
            ));
        }
        Ok(())
    }
}

/// A camera attached under the pivot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraNode {
    /// Offset from the pivot in the pivot's local frame
    pub local_position: Vec3,
}

impl CameraNode {
    /// Create a camera at a local offset from the pivot.
    pub fn new(local_position: Vec3) -> Self {
        Self { local_position }
    }

    /// World-space position given the pivot's transform.
    pub fn world_position(&self, pivot: &Transform) -> Vec3 {
        pivot.transform_point(self.local_position)
    }
}

/// Which query the last tick used to look for obstructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeMode {
    /// Sphere swept from the probe origin
    Sweep,
    /// Probe origin was embedded in geometry; a ray was cast instead
    EmbeddedRay,
}

/// Sort hits by ascending distance.
///
/// The sort is stable: hits at identical distances keep the order in which
/// the query reported them.
pub fn sort_hits_by_distance(hits: &mut [RaycastHit]) {
    hits.sort_by(compare_hit_distance);
}

/// Nearest non-trigger hit.
///
/// Sorts `hits` in place and returns the first solid entry. Trigger hits
/// never influence the result.
pub fn nearest_obstruction(hits: &mut [RaycastHit]) -> Option<&RaycastHit> {
    sort_hits_by_distance(hits);
    hits.iter().find(|hit| !hit.is_trigger())
}

/// Pulls cameras toward their pivot when geometry would otherwise clip them.
#[derive(Clone, Debug)]
pub struct CameraClipGuard {
    /// Tunables
    pub config: ClipGuardConfig,
    /// Cameras repositioned every tick, all along the same axis
    cameras: Vec<CameraNode>,
    /// Authored camera distance, fixed at construction
    base_distance: f32,
    /// Smoothed scroll offset
    zoom_offset: f32,
    /// Scroll offset the smoothed value is heading for
    zoom_offset_target: f32,
    /// Distance currently applied to the cameras
    current_distance: f32,
    /// Spring state for `current_distance`
    move_velocity: f32,
    /// Whether the last tick found an obstruction
    protecting: bool,
    /// Query used by the last tick
    last_probe_mode: ProbeMode,
}

impl CameraClipGuard {
    /// Create a guard for a set of cameras under one pivot.
    ///
    /// The authored distance is taken from the first camera's offset.
    ///
    /// # Errors
    /// [`RigError::NoCameras`] when `cameras` is empty, or
    /// [`RigError::InvalidConfig`] when the config is rejected.
    pub fn new(config: ClipGuardConfig, cameras: Vec<CameraNode>) -> Result<Self, RigError> {
        config.validate()?;
        let first = cameras.first().ok_or(RigError::NoCameras)?;
        let base_distance = first.local_position.length();

        debug!(
            "camera clip guard: {} camera(s), base distance {:.3}",
            cameras.len(),
            base_distance
        );

        Ok(Self {
            config,
            cameras,
            base_distance,
            zoom_offset: 0.0,
            zoom_offset_target: 0.0,
            current_distance: base_distance,
            move_velocity: 0.0,
            protecting: false,
            last_probe_mode: ProbeMode::Sweep,
        })
    }

    /// Create a guard with a single camera at `local_offset`.
    pub fn with_single_camera(config: ClipGuardConfig, local_offset: Vec3) -> Result<Self, RigError> {
        Self::new(config, vec![CameraNode::new(local_offset)])
    }

    /// Whether the last tick found geometry between pivot and camera.
    pub fn protecting(&self) -> bool {
        self.protecting
    }

    /// Distance currently applied to the cameras.
    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// The authored camera distance.
    pub fn base_distance(&self) -> f32 {
        self.base_distance
    }

    /// Smoothed scroll offset.
    pub fn zoom_offset(&self) -> f32 {
        self.zoom_offset
    }

    /// Scroll offset target.
    pub fn zoom_offset_target(&self) -> f32 {
        self.zoom_offset_target
    }

    /// Distance the camera would sit at with nothing in the way.
    pub fn desired_distance(&self) -> f32 {
        self.base_distance + self.zoom_offset
    }

    /// Query used by the last tick.
    pub fn last_probe_mode(&self) -> ProbeMode {
        self.last_probe_mode
    }

    /// The guarded cameras.
    pub fn cameras(&self) -> &[CameraNode] {
        &self.cameras
    }

    /// World-space camera positions for a pivot pose.
    pub fn camera_world_positions(&self, pivot: &Transform) -> Vec<Vec3> {
        self.cameras.iter().map(|c| c.world_position(pivot)).collect()
    }

    /// Update zoom from scroll input and smooth it.
    fn update_zoom(&mut self, scroll_delta: f32, dt: f32) {
        let cfg = &self.config;
        self.zoom_offset_target = clamp_unordered(
            self.zoom_offset_target - scroll_delta * cfg.scroll_strength,
            cfg.zoom_min,
            cfg.zoom_max,
        );
        self.zoom_offset = lerp(
            self.zoom_offset,
            self.zoom_offset_target,
            cfg.scroll_smoothing * dt,
        );
    }

    /// Cast from the pivot toward the desired camera position.
    ///
    /// Returns the hits and the ray actually used.
    fn probe<W: PhysicsQuery + ?Sized>(
        &mut self,
        pivot: &Transform,
        desired: f32,
        world: &W,
    ) -> (Vec<RaycastHit>, Ray) {
        let radius = self.config.sphere_cast_radius;
        let mask = self.config.ray_cast_mask;
        let forward = pivot.forward();
        let mut ray = Ray::new(pivot.position + forward * radius, -forward);

        let embedded = world
            .overlap_sphere(ray.origin, radius, mask)
            .iter()
            .any(|c| !c.is_trigger);

        if embedded {
            // A sweep starting inside geometry reports a useless zero-distance hit
            ray.origin += forward * radius;
            self.last_probe_mode = ProbeMode::EmbeddedRay;
            (world.raycast_all(ray, desired - radius, mask), ray)
        } else {
            self.last_probe_mode = ProbeMode::Sweep;
            (world.sphere_cast_all(ray, radius, desired + radius, mask), ray)
        }
    }

    /// Run one tick.
    ///
    /// # Arguments
    /// * `pivot` - Pivot pose after this frame's movement
    /// * `scroll_delta` - Scroll wheel input for this tick (positive pulls in)
    /// * `dt` - Tick duration in seconds
    /// * `world` - Physics world to probe
    ///
    /// # Returns
    /// The distance applied to the cameras.
    pub fn update<W: PhysicsQuery + ?Sized>(
        &mut self,
        pivot: &Transform,
        scroll_delta: f32,
        dt: f32,
        world: &W,
    ) -> f32 {
        self.update_zoom(scroll_delta, dt);

        let desired = self.desired_distance();
        let (mut hits, ray) = self.probe(pivot, desired, world);

        let obstruction = nearest_obstruction(&mut hits)
            .map(|hit| -pivot.inverse_transform_point(hit.point).z);

        let target = match obstruction {
            Some(depth) => {
                trace!(
                    "camera obstruction: origin {:?} dir {:?} extent {:.3}",
                    ray.origin,
                    ray.direction,
                    depth + self.config.sphere_cast_radius
                );
                depth
            }
            None => desired,
        };

        let hit_something = obstruction.is_some();
        if hit_something != self.protecting {
            debug!(
                "camera protect {} (target {:.3})",
                if hit_something { "on" } else { "off" },
                target
            );
        }
        self.protecting = hit_something;

        let smooth_time = if self.current_distance > target {
            self.config.clip_move_time
        } else {
            self.config.return_time
        };
        self.current_distance =
            smooth_damp(self.current_distance, target, &mut self.move_velocity, smooth_time, dt);
        self.current_distance =
            clamp_unordered(self.current_distance, self.config.closest_distance, desired);

        let offset = Vec3::NEG_Z * self.current_distance;
        for camera in &mut self.cameras {
            camera.local_position = offset;
        }

        self.current_distance
    }
}

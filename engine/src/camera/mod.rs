//! Camera Module
//!
//! Chase-camera collision avoidance. The camera hangs behind a pivot on the
//! pivot's local -Z axis; [`CameraClipGuard`] shortens that distance whenever
//! geometry would otherwise sit between the pivot and the lens.
//! This module is window-system agnostic - it only deals with camera placement
//! and physics queries.

pub mod clip_guard;

pub use clip_guard::{
    CameraClipGuard, CameraNode, ClipGuardConfig, ProbeMode, nearest_obstruction,
    sort_hits_by_distance,
};

//! Camera Clip Guard Tests - Obstruction Handling and Distance Invariant
//!
//! Drives CameraClipGuard against a CollisionWorld with fixed ticks.

use chase_rig_engine::camera::{CameraClipGuard, CameraNode, ClipGuardConfig, ProbeMode};
use chase_rig_engine::physics::{CollisionWorld, LayerMask, Transform};
use glam::{Quat, Vec3};

const DT: f32 = 0.02;

fn guard() -> CameraClipGuard {
    CameraClipGuard::with_single_camera(ClipGuardConfig::default(), Vec3::new(0.0, 0.0, -3.0)).unwrap()
}

fn run(guard: &mut CameraClipGuard, pivot: &Transform, world: &CollisionWorld, ticks: usize) {
    for _ in 0..ticks {
        guard.update(pivot, 0.0, DT, world);
    }
}

/// Wall spanning the pivot's backward axis with its near face at `near_z`.
fn wall_behind(world: &mut CollisionWorld, near_z: f32, layer: u32) {
    world.add_box(Vec3::new(-5.0, -5.0, near_z - 0.7), Vec3::new(5.0, 5.0, near_z), layer);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_unobstructed_camera_stays_at_desired_distance() {
    let world = CollisionWorld::new();
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    for _ in 0..20 {
        guard.update(&pivot, 0.0, DT, &world);
        assert!(!guard.protecting());
        assert!((guard.current_distance() - guard.desired_distance()).abs() < 1e-5);
    }
    assert_eq!(guard.cameras()[0].local_position, Vec3::new(0.0, 0.0, -3.0));
}

#[test]
fn test_obstruction_closer_than_minimum_clamps() {
    let mut world = CollisionWorld::new();
    wall_behind(&mut world, -0.3, 0);
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    guard.update(&pivot, 0.0, DT, &world);
    assert!(guard.protecting());
    assert_eq!(guard.last_probe_mode(), ProbeMode::Sweep);
    assert!(guard.current_distance() < 3.0);

    run(&mut guard, &pivot, &world, 50);
    assert!(guard.protecting());
    assert!((guard.current_distance() - 0.5).abs() < 1e-4);
    assert!((guard.cameras()[0].local_position - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-4);
}

#[test]
fn test_obstruction_depth_becomes_distance() {
    let mut world = CollisionWorld::new();
    wall_behind(&mut world, -1.8, 0);
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    run(&mut guard, &pivot, &world, 60);
    assert!(guard.protecting());
    assert!((guard.current_distance() - 1.8).abs() < 1e-3);
}

#[test]
fn test_pulls_in_faster_than_it_returns() {
    let mut world = CollisionWorld::new();
    let wall = world.add_box(Vec3::new(-5.0, -5.0, -1.7), Vec3::new(5.0, 5.0, -1.0), 0);
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    run(&mut guard, &pivot, &world, 5);
    let pulled_in = 3.0 - guard.current_distance();

    world.remove(wall);
    run(&mut guard, &pivot, &world, 1);
    let start = guard.current_distance();
    run(&mut guard, &pivot, &world, 4);
    let returned = guard.current_distance() - start;

    assert!(!guard.protecting());
    assert!(pulled_in > returned * 2.0);
}

#[test]
fn test_returns_to_desired_after_obstruction_clears() {
    let mut world = CollisionWorld::new();
    let wall = world.add_box(Vec3::new(-5.0, -5.0, -1.7), Vec3::new(5.0, 5.0, -1.0), 0);
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    run(&mut guard, &pivot, &world, 30);
    assert!((guard.current_distance() - 1.0).abs() < 1e-2);

    world.remove(wall);
    for _ in 0..250 {
        guard.update(&pivot, 0.0, DT, &world);
        assert!(guard.current_distance() <= guard.desired_distance());
    }
    assert!((guard.current_distance() - 3.0).abs() < 1e-3);
}

#[test]
fn test_embedded_probe_falls_back_to_ray() {
    let mut world = CollisionWorld::new();
    // Box around the pivot swallowing the probe origin
    world.add_box(Vec3::new(-0.5, -0.5, -0.05), Vec3::new(0.5, 0.5, 0.3), 0);
    wall_behind(&mut world, -1.5, 0);
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    run(&mut guard, &pivot, &world, 60);
    assert_eq!(guard.last_probe_mode(), ProbeMode::EmbeddedRay);
    assert!(guard.protecting());
    assert!((guard.current_distance() - 1.5).abs() < 1e-3);
}

#[test]
fn test_trigger_volumes_never_obstruct() {
    let mut world = CollisionWorld::new();
    world.add_trigger_box(Vec3::new(-5.0, -5.0, -1.0), Vec3::new(5.0, 5.0, -0.3), 0);
    // Trigger swallowing the probe origin does not switch modes either
    world.add_trigger_box(Vec3::new(-0.5, -0.5, -0.05), Vec3::new(0.5, 0.5, 0.3), 0);
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    run(&mut guard, &pivot, &world, 10);
    assert!(!guard.protecting());
    assert_eq!(guard.last_probe_mode(), ProbeMode::Sweep);
    assert!((guard.current_distance() - 3.0).abs() < 1e-5);
}

#[test]
fn test_nearest_solid_wins_over_nearer_trigger() {
    let mut world = CollisionWorld::new();
    world.add_trigger_box(Vec3::new(-5.0, -5.0, -1.0), Vec3::new(5.0, 5.0, -0.8), 0);
    wall_behind(&mut world, -2.4, 0);
    wall_behind(&mut world, -1.6, 0);
    let mut guard = guard();

    run(&mut guard, &Transform::IDENTITY, &world, 60);
    assert!((guard.current_distance() - 1.6).abs() < 1e-3);
}

#[test]
fn test_mask_excludes_layers() {
    let mut world = CollisionWorld::new();
    wall_behind(&mut world, -1.0, 3);
    let config = ClipGuardConfig {
        ray_cast_mask: LayerMask::ALL.without(3),
        ..Default::default()
    };
    let mut guard = CameraClipGuard::with_single_camera(config, Vec3::new(0.0, 0.0, -3.0)).unwrap();

    run(&mut guard, &Transform::IDENTITY, &world, 10);
    assert!(!guard.protecting());
}

#[test]
fn test_rotated_pivot_measures_local_depth() {
    let mut world = CollisionWorld::new();
    // Pivot faces +X, so the camera hangs toward -X
    world.add_box(Vec3::new(-1.5, -5.0, -5.0), Vec3::new(-1.2, 5.0, 5.0), 0);
    let pivot = Transform::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    let mut guard = guard();

    run(&mut guard, &pivot, &world, 60);
    assert!(guard.protecting());
    assert!((guard.current_distance() - 1.2).abs() < 1e-3);

    let positions = guard.camera_world_positions(&pivot);
    assert!((positions[0] - Vec3::new(-1.2, 0.0, 0.0)).length() < 1e-3);
}

#[test]
fn test_all_cameras_share_the_distance() {
    let mut world = CollisionWorld::new();
    wall_behind(&mut world, -1.8, 0);
    let mut guard = CameraClipGuard::new(
        ClipGuardConfig::default(),
        vec![
            CameraNode::new(Vec3::new(0.0, 0.0, -3.0)),
            CameraNode::new(Vec3::new(0.2, 0.1, -4.0)),
        ],
    )
    .unwrap();
    assert_eq!(guard.base_distance(), 3.0);

    run(&mut guard, &Transform::IDENTITY, &world, 60);
    let cameras = guard.cameras();
    assert_eq!(cameras[0].local_position, cameras[1].local_position);
    assert_eq!(cameras[0].local_position.x, 0.0);
}

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn test_scroll_zooms_out_within_range() {
    let world = CollisionWorld::new();
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    guard.update(&pivot, -10.0, DT, &world);
    assert_eq!(guard.zoom_offset_target(), 4.0);

    run(&mut guard, &pivot, &world, 500);
    assert!((guard.zoom_offset() - 4.0).abs() < 1e-3);
    assert!((guard.current_distance() - 7.0).abs() < 1e-2);
}

#[test]
fn test_scroll_in_limited_by_zoom_min() {
    let world = CollisionWorld::new();
    let mut guard = guard();
    let pivot = Transform::IDENTITY;

    for _ in 0..400 {
        guard.update(&pivot, 1.0, DT, &world);
    }
    assert_eq!(guard.zoom_offset_target(), -1.0);
    assert!((guard.current_distance() - 2.0).abs() < 1e-2);
}

// ============================================================================
// Invariant
// ============================================================================

#[test]
fn test_distance_stays_within_bounds() {
    let mut world = CollisionWorld::new();
    world.add_box(Vec3::new(-5.0, -5.0, -3.0), Vec3::new(5.0, 5.0, -2.5), 0);
    world.add_box(Vec3::new(1.0, -1.0, 2.0), Vec3::new(2.0, 1.0, 3.0), 0);
    world.add_sphere(Vec3::new(-1.0, 0.0, 4.0), 0.6, 0);
    world.add_trigger_box(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 6.0), 0);

    let mut guard = guard();
    let closest = guard.config.closest_distance;

    for i in 0..600 {
        let t = i as f32 * DT;
        let pivot = Transform::new(
            Vec3::new((t * 0.7).sin() * 1.5, 0.2, t * 1.2),
            Quat::from_rotation_y((t * 0.5).sin()),
        );
        let scroll = match i % 97 {
            0 => 1.5,
            40 => -2.0,
            _ => 0.0,
        };
        guard.update(&pivot, scroll, DT, &world);

        let current = guard.current_distance();
        assert!(current >= closest, "tick {i}: {current} < {closest}");
        assert!(current <= guard.desired_distance(), "tick {i}: {current} > desired");
    }
}

#[test]
fn test_zero_dt_keeps_distance() {
    let mut world = CollisionWorld::new();
    wall_behind(&mut world, -1.0, 0);
    let mut guard = guard();
    guard.update(&Transform::IDENTITY, 0.0, 0.0, &world);
    assert!(guard.protecting());
    assert_eq!(guard.current_distance(), 3.0);
}

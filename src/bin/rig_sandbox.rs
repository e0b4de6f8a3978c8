//! Rig Sandbox - headless locomotion and camera demo
//!
//! Run with: `RUST_LOG=debug cargo run --bin rig_sandbox [config.json]`
//!
//! Builds a small course (floor, a wall behind the start and a low ceiling),
//! then drives the character with a scripted input sequence at 50 Hz: walk,
//! jump, crouch under the ceiling, turn. The collision world only supports
//! bodies from below, so walls block the camera but not the character. The
//! camera guard runs after every physics step. Land/jump events and
//! per-second summaries are logged.

use std::path::Path;

use chase_rig_engine::{
    CameraClipGuard, CapsuleCollider, CharacterId, CollisionWorld, LocomotionController,
    LocomotionEvent, MoveInput, ProceduralAnimator, RigConfig, RigError, RigidBody, Transform,
};
use glam::Vec3;

const TICK_RATE: f32 = 50.0;
const DURATION: f32 = 6.0;
const PIVOT_HEIGHT: f32 = 1.5;

fn build_course() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    // Floor
    world.add_box(Vec3::new(-20.0, -1.0, -20.0), Vec3::new(20.0, 0.0, 20.0), 0);
    // Wall close behind the start position, pulls the camera in
    world.add_box(Vec3::new(-5.0, 0.0, -2.2), Vec3::new(5.0, 4.0, -1.8), 0);
    // Low ceiling over the walkway
    world.add_box(Vec3::new(-2.0, 1.1, 4.0), Vec3::new(2.0, 1.4, 6.0), 0);
    // Trigger volume the camera must ignore
    world.add_trigger_box(Vec3::new(-1.0, 0.0, -1.5), Vec3::new(1.0, 3.0, -0.5), 1);
    world
}

fn scripted_input(now: f32) -> MoveInput {
    match now {
        t if t < 1.0 => MoveInput::new(Vec3::Z),
        t if t < 1.02 => MoveInput::new(Vec3::Z).with_jump(),
        t if t < 2.5 => MoveInput::new(Vec3::Z * 0.5),
        t if t < 4.0 => MoveInput::new(Vec3::Z * 0.5).with_crouch(),
        t if t < 5.0 => MoveInput::new(Vec3::Z * 0.5),
        _ => MoveInput::new(Vec3::X),
    }
}

fn main() -> Result<(), RigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RigConfig::load(Path::new(&path))?,
        None => RigConfig::default(),
    };

    let world = build_course();
    let mut character = LocomotionController::new(
        CharacterId(0),
        config.locomotion,
        RigidBody::new(Vec3::ZERO),
        CapsuleCollider::standing(1.6, 0.3),
        ProceduralAnimator::new(),
    )?;
    let mut camera = CameraClipGuard::with_single_camera(config.camera, Vec3::new(0.0, 0.0, -3.0))?;

    let dt = 1.0 / TICK_RATE;
    let ticks = (DURATION * TICK_RATE) as u32;
    let mut steps = 0u32;

    for tick in 0..ticks {
        let now = tick as f32 * dt;

        character.move_character(scripted_input(now), now, dt, &world);
        let facing = character.body().rotation;
        character.animator_mut().advance(dt, facing);
        character.on_animator_move(dt);
        let (body, capsule) = character.body_and_capsule();
        world.step_body(body, capsule, dt);

        let pivot = Transform::new(
            character.body().position + Vec3::Y * PIVOT_HEIGHT,
            character.body().rotation,
        );
        // Zoom out a little during the second half
        let scroll = if now > DURATION * 0.5 { -0.02 } else { 0.0 };
        camera.update(&pivot, scroll, dt, &world);

        for event in character.drain_events() {
            match event {
                LocomotionEvent::FootStep { .. } => steps += 1,
                other => log::info!("t={now:.2}s {other:?}"),
            }
        }

        if tick % TICK_RATE as u32 == 0 {
            let cameras = camera.camera_world_positions(&pivot);
            log::info!(
                "t={:.1}s pos={:.2?} grounded={} crouching={} camera_distance={:.2} protecting={} camera={:.2?}",
                now,
                character.body().position,
                character.is_grounded(),
                character.is_crouching(),
                camera.current_distance(),
                camera.protecting(),
                cameras.first().copied().unwrap_or(pivot.position),
            );
        }
    }

    log::info!("done: {} foot steps over {:.1}s", steps, DURATION);
    Ok(())
}

//! Chase Rig Engine Library
//!
//! Third-person character rig: a root-motion locomotion controller and a
//! chase-camera guard that keeps the camera from clipping through walls.
//! Both controllers talk to the physics world through the [`PhysicsQuery`]
//! trait and take time explicitly, so every tick is a pure function of state,
//! input, tick duration and query results.
//!
//! # Modules
//!
//! - [`physics`] - Query trait, hit types, layer masks, rigid body and a box/sphere collision world
//! - [`math`] - Interpolation and critically damped smoothing
//! - [`animation`] - Animation driver trait and a procedural implementation
//! - [`camera`] - Camera clip guard
//! - [`player`] - Locomotion controller, ground state machine and events
//! - [`config`] - JSON configuration for both controllers
//! - [`error`] - Setup errors
//!
//! # Example
//!
//! ```ignore
//! use chase_rig_engine::{
//!     CameraClipGuard, CharacterId, ClipGuardConfig, CollisionWorld, LocomotionConfig,
//!     LocomotionController, MoveInput, ProceduralAnimator, RigidBody, CapsuleCollider,
//!     Transform,
//! };
//! use glam::Vec3;
//!
//! let mut world = CollisionWorld::new();
//! world.add_box(Vec3::new(-20.0, -1.0, -20.0), Vec3::new(20.0, 0.0, 20.0), 0);
//!
//! let mut character = LocomotionController::new(
//!     CharacterId(0),
//!     LocomotionConfig::default(),
//!     RigidBody::new(Vec3::ZERO),
//!     CapsuleCollider::standing(1.6, 0.3),
//!     ProceduralAnimator::new(),
//! )?;
//! let mut camera = CameraClipGuard::with_single_camera(
//!     ClipGuardConfig::default(),
//!     Vec3::new(0.0, 0.0, -3.0),
//! )?;
//!
//! // Each tick: locomotion, physics, then the camera
//! character.move_character(MoveInput::new(Vec3::Z), now, dt, &world);
//! let (body, capsule) = character.body_and_capsule();
//! world.step_body(body, capsule, dt);
//! let pivot = Transform::new(character.body().position + Vec3::Y * 1.5, character.body().rotation);
//! camera.update(&pivot, scroll, dt, &world);
//! ```

pub mod animation;
pub mod camera;
pub mod config;
pub mod error;
pub mod math;
pub mod physics;
pub mod player;

pub use animation::{AnimationDriver, ProceduralAnimator};
pub use camera::{CameraClipGuard, CameraNode, ClipGuardConfig};
pub use config::RigConfig;
pub use error::RigError;
pub use physics::{
    CapsuleCollider, CollisionWorld, LayerMask, PhysicsQuery, Ray, RaycastHit, RigidBody,
    Transform,
};
pub use player::{
    CharacterId, LocomotionConfig, LocomotionController, LocomotionEvent, LocomotionListener,
    MoveInput,
};

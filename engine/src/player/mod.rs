//! Player Module
//!
//! Third-person character locomotion driven by animation root motion.
//!
//! # Components
//!
//! - [`LocomotionController`] - Per-tick movement: ground check, turning, jumping,
//!   crouching and animator parameters
//!   - Jump grace period (coyote time) after walking off a ledge
//!   - Headroom check that keeps the character crouched under low ceilings
//! - [`LocomotionConfig`] - Tunables, serde-loadable
//! - [`GroundState`] - Grounded/airborne state machine with grace tracking
//! - [`LocomotionEvent`] - Foot-step, jump and land notifications

pub mod config;
pub mod events;
pub mod ground;
pub mod locomotion;

pub use config::LocomotionConfig;
pub use events::{CharacterId, LocomotionEvent, LocomotionListener};
pub use ground::{GroundState, GroundTransition};
pub use locomotion::{
    ASCENT_GROUND_CHECK_DISTANCE, CapsuleStance, GROUND_PROBE_LIFT, LocomotionController,
    MAX_PENDING_EVENTS, MoveInput,
};

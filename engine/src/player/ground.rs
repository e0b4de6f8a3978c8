//! Grounded/airborne state with coyote time.
//!
//! A jump stays available for a short grace period after the character walks
//! off a ledge. The grace window opens on the grounded -> airborne edge and is
//! closed by landing or by a jump.

/// Edge produced by [`GroundState::set_grounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    /// Airborne -> grounded
    Landed,
    /// Grounded -> airborne
    LeftGround,
}

/// Grounded flag plus the time the character last left the ground.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundState {
    is_grounded: bool,
    /// Set on the grounded -> airborne edge, `None` while grounded or after
    /// the grace window was consumed
    left_ground_at: Option<f32>,
}

impl GroundState {
    /// Airborne with no grace window, the state a character starts in.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Time of the last grounded -> airborne edge, if the grace window is open.
    pub fn left_ground_at(&self) -> Option<f32> {
        self.left_ground_at
    }

    /// Write the grounded flag.
    ///
    /// # Returns
    /// The edge taken, or `None` when the value did not change.
    pub fn set_grounded(&mut self, grounded: bool, now: f32) -> Option<GroundTransition> {
        if grounded == self.is_grounded {
            return None;
        }
        self.is_grounded = grounded;
        if grounded {
            self.left_ground_at = None;
            Some(GroundTransition::Landed)
        } else {
            self.left_ground_at = Some(now);
            Some(GroundTransition::LeftGround)
        }
    }

    /// Close the grace window.
    pub fn clear_grace(&mut self) {
        self.left_ground_at = None;
    }

    /// Grounded, or airborne for less than `grace_period` seconds.
    pub fn can_jump(&self, now: f32, grace_period: f32) -> bool {
        self.is_grounded
            || self
                .left_ground_at
                .is_some_and(|left| now - left < grace_period)
    }
}

//! Locomotion notifications.
//!
//! The controller queues one [`LocomotionEvent`] per occurrence. Sound and
//! effect systems either drain the queue or register as listeners; the
//! controller never knows who consumes them.

use serde::{Deserialize, Serialize};

/// Identifies the character that emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

/// Discrete locomotion occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionEvent {
    /// A foot planted on a half-cycle crossing of the run cycle
    FootStep { character: CharacterId },
    /// A jump was launched
    Jump { character: CharacterId },
    /// The character touched down after being airborne
    Land { character: CharacterId },
}

impl LocomotionEvent {
    /// The emitting character.
    pub fn character(&self) -> CharacterId {
        match *self {
            LocomotionEvent::FootStep { character }
            | LocomotionEvent::Jump { character }
            | LocomotionEvent::Land { character } => character,
        }
    }
}

/// Receives locomotion events.
pub trait LocomotionListener {
    fn on_event(&mut self, event: &LocomotionEvent);
}

impl<F> LocomotionListener for F
where
    F: FnMut(&LocomotionEvent),
{
    fn on_event(&mut self, event: &LocomotionEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_listener() {
        let mut jumps = 0;
        {
            let mut listener = |event: &LocomotionEvent| {
                if matches!(event, LocomotionEvent::Jump { .. }) {
                    jumps += 1;
                }
            };
            listener.on_event(&LocomotionEvent::Jump { character: CharacterId(3) });
            listener.on_event(&LocomotionEvent::Land { character: CharacterId(3) });
        }
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_event_character() {
        let event = LocomotionEvent::FootStep { character: CharacterId(9) };
        assert_eq!(event.character(), CharacterId(9));
    }
}

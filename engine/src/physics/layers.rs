//! Layer masks for collision filtering.
//!
//! Every collider lives on exactly one layer (0..32). Queries carry a mask and
//! only see colliders whose layer bit is set in it.

use serde::{Deserialize, Serialize};

/// Bit set of collision layers a query is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Sees nothing.
    pub const NONE: Self = Self(0);

    /// Sees every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing a single layer.
    ///
    /// Layers outside 0..32 produce an empty mask.
    pub fn layer(index: u32) -> Self {
        Self(1u32.checked_shl(index).unwrap_or(0))
    }

    /// Whether a collider on `layer` is visible through this mask.
    #[inline]
    pub fn includes(self, layer: u32) -> bool {
        self.0 & Self::layer(layer).0 != 0
    }

    /// This mask with `layer` removed.
    #[inline]
    pub fn without(self, layer: u32) -> Self {
        Self(self.0 & !Self::layer(layer).0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Whether a single-result query may report trigger volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerInteraction {
    /// Trigger colliders are skipped.
    #[default]
    Ignore,
    /// Trigger colliders are reported like solids.
    Collide,
}

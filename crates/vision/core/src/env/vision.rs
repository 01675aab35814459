use bitflags::bitflags;

use crate::state::Position;

bitflags! {
    /// Perception traits attached to a [`Vision`] rule.
    ///
    /// The core treats these as opaque; only the [`VisionOracle`] implementation
    /// interprets them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct VisionFlags: u8 {
        /// Foliage does not block sight.
        const SEE_THROUGH_FOLIAGE = 1 << 0;
        /// Sight is not limited by water surfaces.
        const SEE_OVER_WATER      = 1 << 1;
    }
}

/// Opaque vision rule handed to the field-of-view collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vision {
    /// Maximum sight distance in tiles (Euclidean).
    pub radius: u32,
    pub flags: VisionFlags,
}

impl Vision {
    pub const fn new(radius: u32) -> Self {
        Self {
            radius,
            flags: VisionFlags::empty(),
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: VisionFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Field-of-view computation supplied by the world.
pub trait VisionOracle {
    /// Returns every cell visible from `origin` under `vision`.
    ///
    /// The returned list may contain duplicates; the counter treats every
    /// occurrence as a separate contribution.
    fn visible_tiles(&self, origin: Position, vision: &Vision) -> Vec<Position>;
}

use crate::env::{Vision, VisionFlags};

/// Visibility configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisionConfig {
    /// The single vision rule shared by every eyeball source.
    pub eyeball_vision: Vision,
}

impl VisionConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EYEBALL_RADIUS: u32 = 5;

    pub const fn new() -> Self {
        Self::with_eyeball_radius(Self::DEFAULT_EYEBALL_RADIUS)
    }

    /// Eyeballs see over water but not through foliage.
    pub const fn with_eyeball_radius(radius: u32) -> Self {
        Self {
            eyeball_vision: Vision::new(radius).with_flags(VisionFlags::SEE_OVER_WATER),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

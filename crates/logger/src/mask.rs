//! Category masks and destination flags

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Coarse category bitmask used together with [`Level`](crate::Level) to
/// decide whether an entry is admitted.
///
/// Bit assignments are owned by the application; the logger only checks
/// that the entry's mask and the instance's mask share at least one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    /// Every category.
    pub const ALL: Self = Self(u32::MAX);
    /// No category; admits nothing.
    pub const NONE: Self = Self(0);

    /// Whether the two masks share a category.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for CategoryMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<u32> for CategoryMask {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

bitflags! {
    /// Where a rendered entry is delivered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Destinations: u8 {
        /// The rotating log file
        const FILE = 0b001;
        /// The attached-debugger channel
        const DEBUGGER = 0b010;
        /// Standard output, coloured by severity
        const CONSOLE = 0b100;
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self::CONSOLE
    }
}

use serde::{Deserialize, Serialize};

/// What caused a repaint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// A sample was appended.
    Series,
    /// The viewport changed size.
    Layout,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Series => 1 << 0,
            Self::Layout => 1 << 1,
        }
    }
}

/// Coalesced repaint request consumed by the frame tick.
///
/// Any number of requests between two frames merge into one mask, so a burst
/// of samples costs a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationMask {
    bits: u8,
}

impl InvalidationMask {
    const ALL_BITS: u8 = InvalidationTopic::Series.bit() | InvalidationTopic::Layout.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn series() -> Self {
        Self {
            bits: InvalidationTopic::Series.bit(),
        }
    }

    #[must_use]
    pub const fn layout() -> Self {
        Self {
            bits: InvalidationTopic::Layout.bit(),
        }
    }

    #[must_use]
    pub const fn full() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn contains(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn merge(&mut self, other: Self) {
        self.bits |= other.bits;
    }
}

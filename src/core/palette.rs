use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// What happens when a new series asks for a color and none is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaletteExhaustion {
    /// Refuse to create the series with `ChartError::PaletteExhausted`.
    #[default]
    Error,
    /// Deal colors again from the first entry, in the same order.
    Wrap,
}

/// Ordered set of series colors dealt first-in first-out.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: SmallVec<[Color; 6]>,
    next: usize,
    exhaustion: PaletteExhaustion,
}

impl Palette {
    /// The six stock line colors, in the order series receive them.
    #[must_use]
    pub fn realtime_default(exhaustion: PaletteExhaustion) -> Self {
        Self {
            colors: SmallVec::from_buf(default_colors()),
            next: 0,
            exhaustion,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn allocated(&self) -> usize {
        self.next
    }

    /// Colors left before the exhaustion policy kicks in.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.next)
    }

    #[must_use]
    pub fn exhaustion(&self) -> PaletteExhaustion {
        self.exhaustion
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Takes the next color for the series named `label`.
    ///
    /// On `PaletteExhaustion::Error` a failed allocation leaves the palette untouched.
    pub fn allocate(&mut self, label: &str) -> ChartResult<Color> {
        let capacity = self.capacity();
        let index = match self.exhaustion {
            PaletteExhaustion::Error if self.next >= capacity => {
                warn!(label, capacity, "palette exhausted, refusing new series");
                return Err(ChartError::PaletteExhausted {
                    capacity,
                    label: label.to_owned(),
                });
            }
            PaletteExhaustion::Error => self.next,
            PaletteExhaustion::Wrap => {
                if self.next == capacity {
                    warn!(label, capacity, "palette exhausted, wrapping around");
                }
                self.next % capacity
            }
        };

        self.next += 1;
        Ok(self.colors[index])
    }
}

fn default_colors() -> [Color; 6] {
    [
        Color::rgba8(255, 159, 64, 1.0),
        Color::rgba8(153, 102, 255, 1.0),
        Color::rgba8(75, 192, 192, 1.0),
        Color::rgba8(255, 206, 86, 1.0),
        Color::rgba8(54, 162, 235, 1.0),
        Color::rgba8(255, 99, 132, 1.0),
    ]
}

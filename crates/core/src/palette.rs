//! Palette - the ordered set of colors a grid draws from

use crate::error::EngineError;
use crate::rng::ColorSource;
use crate::types::{Color, MIN_PALETTE_SIZE};

/// Validated list of distinct colors (at least three)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

// Never empty once constructed.
#[allow(clippy::len_without_is_empty)]
impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, EngineError> {
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(EngineError::DuplicateColor(color.as_str()));
            }
        }
        if colors.len() < MIN_PALETTE_SIZE {
            return Err(EngineError::PaletteTooSmall(colors.len()));
        }
        Ok(Self { colors })
    }

    /// First `count` colors of [`Color::ALL`]
    pub fn first(count: usize) -> Result<Self, EngineError> {
        Self::new(Color::ALL.iter().copied().take(count).collect())
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Draw one color uniformly
    pub fn pick<R: ColorSource>(&self, rng: &mut R) -> Color {
        self.colors[rng.next_index(self.colors.len())]
    }
}

impl Default for Palette {
    /// The full six-color palette
    fn default() -> Self {
        Self {
            colors: Color::ALL.to_vec(),
        }
    }
}

//! Letter extrusion and the combination of the two sides.

mod combine;
mod extrude_letters;

pub use combine::{merge_join_pairs, normalized_positions, sort_by_span_start, Combine};
pub use extrude_letters::{ExtrudeLetters, HOLED_COLOR, OUTER_COLOR};

use crate::config::ExtrusionParams;
use crate::math::BoundingBox;
use crate::solid::SolidId;

/// Which of the two texts a solid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Rotation about Y that turns this side toward its viewer.
    #[must_use]
    pub fn rotation(self, params: &ExtrusionParams) -> f64 {
        match self {
            Self::A => params.side_a_rotation,
            Self::B => params.side_b_rotation,
        }
    }

    #[must_use]
    pub fn label(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

/// Horizontal extent of a letter, in model units before recentring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    #[must_use]
    pub fn from_bounds(bounds: &BoundingBox) -> Self {
        Self {
            start: bounds.left,
            end: bounds.right,
        }
    }
}

/// One extruded letter and the span it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudedPolygon {
    pub solid: SolidId,
    pub span: Span,
}

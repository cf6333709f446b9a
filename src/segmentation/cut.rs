use crate::raster::{split_components, Figure, PixelRect};

/// Result of carving the joint boxes out of a figure.
#[derive(Debug)]
pub enum CutOutcome {
    /// The cut separated the figure into exactly two pieces, each already
    /// rejoined with the carved-out stroke material.
    Split(Figure, Figure),
    /// Removing the joints removed all of the ink.
    NothingLeft,
    /// The figure is still one piece after the cut.
    StillConnected,
    /// The cut shattered the figure into more than two pieces.
    TooManyPieces(usize),
}

/// Removes the joint boxes from `figure` and rejoins the pieces.
///
/// The ink inside the boxes is set aside as a joint figure, the remainder is
/// split into connected components, and when exactly two components come
/// out each is ORed with the joint figure. The union of the two results is
/// always the input ink.
#[must_use]
pub fn cut_and_rejoin(figure: &Figure, joints: &[PixelRect]) -> CutOutcome {
    let mut without_joints = figure.mask.clone();
    for rect in joints {
        without_joints.clear_rect(rect);
    }
    let joint = Figure::new(figure.mask.restricted_to(joints), figure.offset).trimmed();

    let mut pieces = split_components(&without_joints, figure.offset);
    drop(without_joints);

    match pieces.len() {
        0 => CutOutcome::NothingLeft,
        1 => CutOutcome::StillConnected,
        2 => {
            let (Some(second), Some(first)) = (pieces.pop(), pieces.pop()) else {
                return CutOutcome::NothingLeft;
            };
            CutOutcome::Split(first.merge(&joint), second.merge(&joint))
        }
        n => CutOutcome::TooManyPieces(n),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::raster::{PixelMask, PixelPoint};

    /// Two squares joined by a one-pixel-high bar.
    fn dumbbell() -> Figure {
        let mask = PixelMask::from_fn(20, 6, |x, y| x < 6 || x >= 14 || y == 3);
        Figure::new(mask, PixelPoint::new(40, 7))
    }

    fn rect(left: usize, top: usize, right: usize, bottom: usize) -> PixelRect {
        PixelRect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn cut_through_bar_splits_and_conserves_ink() {
        let figure = dumbbell();
        let CutOutcome::Split(a, b) = cut_and_rejoin(&figure, &[rect(9, 0, 10, 5)]) else {
            panic!("expected a split");
        };
        let input: HashSet<_> = figure.canvas_ink().collect();
        let union: HashSet<_> = a.canvas_ink().chain(b.canvas_ink()).collect();
        assert_eq!(union, input);
        assert!(a.offset.x < b.offset.x);
        // Both halves carry the carved-out bar pixels.
        assert!(a.canvas_ink().any(|p| p == (49, 10)));
        assert!(b.canvas_ink().any(|p| p == (50, 10)));
    }

    #[test]
    fn cut_covering_everything_leaves_nothing() {
        let outcome = cut_and_rejoin(&dumbbell(), &[rect(0, 0, 19, 5)]);
        assert!(matches!(outcome, CutOutcome::NothingLeft));
    }

    #[test]
    fn cut_missing_the_bridge_keeps_figure_connected() {
        let outcome = cut_and_rejoin(&dumbbell(), &[rect(0, 0, 1, 1)]);
        assert!(matches!(outcome, CutOutcome::StillConnected));
    }

    #[test]
    fn two_cuts_make_too_many_pieces() {
        let outcome = cut_and_rejoin(&dumbbell(), &[rect(7, 0, 7, 5), rect(12, 0, 12, 5)]);
        assert!(matches!(outcome, CutOutcome::TooManyPieces(3)));
    }
}

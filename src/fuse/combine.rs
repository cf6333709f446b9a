use tracing::info;

use crate::config::CombineStrategy;
use crate::error::Result;
use crate::operations::boolean::{Intersect, UnionAll};
use crate::solid::{SolidId, SolidStore};

use super::{ExtrudedPolygon, Span};

/// Merges the two sides' letter solids into the final solid list.
pub struct Combine {
    strategy: CombineStrategy,
    side_a: Vec<ExtrudedPolygon>,
    side_b: Vec<ExtrudedPolygon>,
}

impl Combine {
    /// Creates a new `Combine` operation.
    #[must_use]
    pub fn new(
        strategy: CombineStrategy,
        side_a: Vec<ExtrudedPolygon>,
        side_b: Vec<ExtrudedPolygon>,
    ) -> Self {
        Self {
            strategy,
            side_a,
            side_b,
        }
    }

    /// Executes the combination, creating any result solids in the store.
    ///
    /// With a boolean strategy, an empty side gives an empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean operation fails.
    pub fn execute(self, store: &mut SolidStore) -> Result<Vec<SolidId>> {
        let strategy = self.strategy;
        let solids = match strategy {
            CombineStrategy::None => self
                .side_a
                .iter()
                .chain(&self.side_b)
                .map(|letter| letter.solid)
                .collect(),
            CombineStrategy::OverlapInterleave => overlap_interleave(store, self.side_a, self.side_b)?,
            CombineStrategy::ZigZag => zig_zag(store, &self.side_a, &self.side_b)?,
        };
        info!(?strategy, solids = solids.len(), "combined sides");
        Ok(solids)
    }
}

fn overlap_interleave(
    store: &mut SolidStore,
    mut side_a: Vec<ExtrudedPolygon>,
    mut side_b: Vec<ExtrudedPolygon>,
) -> Result<Vec<SolidId>> {
    if side_a.is_empty() || side_b.is_empty() {
        return Ok(Vec::new());
    }
    sort_by_span_start(&mut side_a);
    sort_by_span_start(&mut side_b);

    let spans = |side: &[ExtrudedPolygon]| side.iter().map(|l| l.span).collect::<Vec<_>>();
    let pos_a = normalized_positions(&spans(&side_a));
    let pos_b = normalized_positions(&spans(&side_b));

    merge_join_pairs(&pos_a, &pos_b)
        .into_iter()
        .map(|(i, j)| Intersect::new(side_a[i].solid, side_b[j].solid).execute(store))
        .collect()
}

fn zig_zag(
    store: &mut SolidStore,
    side_a: &[ExtrudedPolygon],
    side_b: &[ExtrudedPolygon],
) -> Result<Vec<SolidId>> {
    let ids = |side: &[ExtrudedPolygon]| side.iter().map(|l| l.solid).collect::<Vec<_>>();
    let union_a = UnionAll::new(ids(side_a)).execute(store)?;
    let union_b = UnionAll::new(ids(side_b)).execute(store)?;
    let (Some(a), Some(b)) = (union_a, union_b) else {
        return Ok(Vec::new());
    };
    Ok(vec![Intersect::new(a, b).execute(store)?])
}

/// Sorts letters by ascending span start. Equal starts keep their order.
pub fn sort_by_span_start(letters: &mut [ExtrudedPolygon]) {
    letters.sort_by(|a, b| a.span.start.total_cmp(&b.span.start));
}

/// Maps each span start onto `[0, 1]` relative to the side's smallest and
/// largest start. A side whose starts are all equal maps to 0.
#[must_use]
pub fn normalized_positions(spans: &[Span]) -> Vec<f64> {
    let min = spans.iter().map(|s| s.start).fold(f64::INFINITY, f64::min);
    let max = spans.iter().map(|s| s.start).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    spans
        .iter()
        .map(|s| {
            if range > 0.0 {
                ((s.start - min) / range).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Walks two sorted position lists with one cursor each, emitting the pair
/// under the cursors at every step.
///
/// After each step the cursor whose next position is smaller advances; on a
/// tie the A cursor advances. Once one list is exhausted the other runs to
/// its end. The walk yields `len_a + len_b - 1` pairs, or none if either list
/// is empty.
#[must_use]
pub fn merge_join_pairs(pos_a: &[f64], pos_b: &[f64]) -> Vec<(usize, usize)> {
    if pos_a.is_empty() || pos_b.is_empty() {
        return Vec::new();
    }
    let mut pairs = Vec::with_capacity(pos_a.len() + pos_b.len() - 1);
    let (mut i, mut j) = (0, 0);
    loop {
        pairs.push((i, j));
        match (pos_a.get(i + 1), pos_b.get(j + 1)) {
            (None, None) => break,
            (Some(_), None) => i += 1,
            (None, Some(_)) => j += 1,
            (Some(next_a), Some(next_b)) => {
                if next_b < next_a {
                    j += 1;
                } else {
                    i += 1;
                }
            }
        }
    }
    pairs
}

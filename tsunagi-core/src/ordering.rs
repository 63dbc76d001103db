//! Per-source target orderings that fix the sequence in which edges appear.
//!
//! Each source owns one row: a uniformly random permutation of every target
//! index it may connect to. Rows are stored back to back in a single arena
//! so lookups stay O(1) without per-node allocations. Because a row is a
//! bijection onto its candidate set, growing a prefix of it always reaches
//! unconnected targets and shrinking it always retracts the newest edges.

use rand::{Rng, seq::SliceRandom};

/// Candidate layout shared by every row of a [`SparseOrdering`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OrderingShape {
    pub(crate) sources: usize,
    pub(crate) targets: usize,
    pub(crate) exclude_self: bool,
}

impl OrderingShape {
    /// Number of candidate targets available to each source.
    pub(crate) const fn row_len(&self) -> usize {
        if self.exclude_self {
            self.targets.saturating_sub(1)
        } else {
            self.targets
        }
    }
}

/// Fixed random orderings of candidate targets, one row per source.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use tsunagi_core::SparseOrdering;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let ordering = SparseOrdering::generate(3, 3, true, &mut rng);
/// assert_eq!(ordering.row_len(), 2);
/// let mut row = ordering.row(1).expect("source 1 exists").to_vec();
/// row.sort_unstable();
/// assert_eq!(row, [0, 2]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SparseOrdering {
    indices: Vec<usize>,
    row_len: usize,
    sources: usize,
}

impl SparseOrdering {
    /// Generates one random permutation per source.
    ///
    /// When `exclude_self` is set, row `i` omits target `i`; this is the
    /// recurrent case where self-connections are disallowed.
    pub fn generate<R>(sources: usize, targets: usize, exclude_self: bool, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_shape(
            OrderingShape {
                sources,
                targets,
                exclude_self,
            },
            rng,
        )
    }

    pub(crate) fn from_shape<R>(shape: OrderingShape, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let row_len = shape.row_len();
        let mut indices = Vec::with_capacity(shape.sources.saturating_mul(row_len));
        for source in 0..shape.sources {
            let start = indices.len();
            indices.extend(candidates(shape, source));
            if let Some(row) = indices.get_mut(start..) {
                row.shuffle(rng);
            }
        }
        debug_assert_eq!(indices.len(), shape.sources * row_len);
        Self {
            indices,
            row_len,
            sources: shape.sources,
        }
    }

    /// Number of rows, one per source.
    #[must_use]
    pub fn sources(&self) -> usize {
        self.sources
    }

    /// Length shared by every row.
    #[must_use]
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Returns the ordering for `source`, or `None` when out of range.
    #[must_use]
    pub fn row(&self, source: usize) -> Option<&[usize]> {
        if source >= self.sources {
            return None;
        }
        let start = source * self.row_len;
        self.indices.get(start..start + self.row_len)
    }

    /// Iterates over every row in source order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        (0..self.sources).map(move |source| self.row(source).unwrap_or_default())
    }
}

fn candidates(shape: OrderingShape, source: usize) -> impl Iterator<Item = usize> {
    (0..shape.targets).filter(move |&target| !(shape.exclude_self && target == source))
}

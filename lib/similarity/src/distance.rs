//! Distance functions over hero feature vectors
//!
//! Plain Euclidean distance on the raw stat values. Nothing is rescaled, so
//! a one point gap in win rate counts exactly as much as a one point gap in
//! a rating score.

use herodex_core::{FeatureVector, FEATURE_DIM};
use ordered_float::OrderedFloat;

/// Euclidean distance: `sqrt(sum((a_i - b_i)^2))`
#[inline]
pub fn euclidean(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.l2_distance(b)
}

/// Per-dimension squared differences, in feature column order.
///
/// The entries sum to the squared Euclidean distance.
pub fn squared_contributions(a: &FeatureVector, b: &FeatureVector) -> [f64; FEATURE_DIM] {
    let diff = a - b;
    let mut out = [0.0; FEATURE_DIM];
    for (slot, d) in out.iter_mut().zip(diff.as_slice()) {
        *slot = d * d;
    }
    out
}

/// Scored catalog position, ordered by distance then position.
///
/// Ordering by position on equal distances keeps results in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Candidate {
    pub dist: OrderedFloat<f64>,
    pub idx: usize,
}

impl Candidate {
    #[inline]
    pub fn new(idx: usize, dist: f64) -> Self {
        Self {
            dist: OrderedFloat(dist),
            idx,
        }
    }
}

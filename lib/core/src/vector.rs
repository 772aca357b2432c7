use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Number of stats that make up a hero's feature vector.
pub const FEATURE_DIM: usize = 6;

/// Column names of the feature vector, in vector order.
pub const FEATURE_COLUMNS: [&str; FEATURE_DIM] = [
    "win_rate",
    "pick_rate",
    "offense_overall",
    "defense_overall",
    "skill_effect_overall",
    "difficulty_overall",
];

/// Fixed-size stat vector used for similarity search.
///
/// Values are kept on their native scales; nothing is normalized, so the
/// percentage columns weigh more in distances than the rating scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: [f64; FEATURE_DIM],
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: [f64; FEATURE_DIM]) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        FEATURE_DIM
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.data.get(i).copied()
    }

    /// Sum of squared per-dimension differences.
    #[inline]
    pub fn squared_l2_distance(&self, other: &FeatureVector) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Compute L2 (Euclidean) distance
    #[inline]
    pub fn l2_distance(&self, other: &FeatureVector) -> f64 {
        self.squared_l2_distance(other).sqrt()
    }
}

impl Sub for &FeatureVector {
    type Output = FeatureVector;

    fn sub(self, other: &FeatureVector) -> FeatureVector {
        let mut data = [0.0; FEATURE_DIM];
        for (i, out) in data.iter_mut().enumerate() {
            *out = self.data[i] - other.data[i];
        }
        FeatureVector::new(data)
    }
}

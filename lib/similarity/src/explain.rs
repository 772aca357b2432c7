//! Explainability for similarity results
//!
//! Display-ready output for nearest-neighbor queries, with an optional
//! per-stat breakdown of how much each column adds to the distance.

use crate::distance::squared_contributions;
use crate::index::Neighbor;
use herodex_core::{Hero, FEATURE_COLUMNS};
use serde::Serialize;
use std::collections::BTreeMap;

/// A similar hero with the fields shown to users
#[derive(Debug, Clone, Serialize)]
pub struct SimilarHero {
    pub hero_name: String,
    pub role: String,
    pub win_rate: f64,
    pub distance: f64,
    /// Squared per-stat differences to the query hero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<BTreeMap<&'static str, f64>>,
}

impl SimilarHero {
    pub fn from_neighbor(query: &Hero, neighbor: &Neighbor<'_>, include_explain: bool) -> Self {
        let explain = include_explain.then(|| {
            let parts = squared_contributions(&query.features(), &neighbor.hero.features());
            FEATURE_COLUMNS.into_iter().zip(parts).collect::<BTreeMap<_, _>>()
        });

        Self {
            hero_name: neighbor.hero.name.clone(),
            role: neighbor.hero.role.clone(),
            win_rate: neighbor.hero.win_rate,
            distance: neighbor.distance,
            explain,
        }
    }

    /// The stat contributing most to the distance, if explained.
    pub fn dominant_stat(&self) -> Option<&'static str> {
        self.explain.as_ref().and_then(|parts| {
            parts
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(stat, _)| *stat)
        })
    }
}

/// Response body for a similar-heroes query
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResponse {
    pub query: String,
    pub result: Vec<SimilarHero>,
}

impl SimilarResponse {
    pub fn from_neighbors(query: &Hero, neighbors: &[Neighbor<'_>], include_explain: bool) -> Self {
        Self {
            query: query.name.clone(),
            result: neighbors
                .iter()
                .map(|n| SimilarHero::from_neighbor(query, n, include_explain))
                .collect(),
        }
    }
}

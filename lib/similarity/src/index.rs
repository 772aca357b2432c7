use crate::distance::{euclidean, Candidate};
use herodex_core::{normalize_token, Error, FeatureVector, Hero, HeroCatalog, Result};
use std::collections::BinaryHeap;
use std::sync::Arc;
use tracing::debug;

/// Neighborhood size, counting the query hero itself.
pub const DEFAULT_K: usize = 6;

/// Configuration for a similarity index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Neighborhood size including the query row; queries return `k - 1`
    /// other heroes.
    pub k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

/// A hero returned by a similarity query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub hero: &'a Hero,
    /// Load-order position of `hero` in the catalog.
    pub position: usize,
    pub distance: f64,
}

/// Exact nearest-neighbor index over hero feature vectors.
///
/// Derived from one catalog instance and immutable afterwards. The index
/// keeps that catalog alive; use [`SimilarityIndex::is_built_from`] to check
/// whether a cached index still belongs to a given catalog.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    catalog: Arc<HeroCatalog>,
    vectors: Vec<FeatureVector>,
    config: IndexConfig,
}

impl SimilarityIndex {
    pub fn build(catalog: Arc<HeroCatalog>) -> Self {
        Self::build_with_config(catalog, IndexConfig::default())
    }

    pub fn build_with_config(catalog: Arc<HeroCatalog>, config: IndexConfig) -> Self {
        let vectors: Vec<FeatureVector> = catalog.iter().map(Hero::features).collect();
        debug!(heroes = vectors.len(), k = config.k, "similarity index built");
        Self {
            catalog,
            vectors,
            config,
        }
    }

    pub fn catalog(&self) -> &Arc<HeroCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> IndexConfig {
        self.config
    }

    pub fn is_built_from(&self, catalog: &Arc<HeroCatalog>) -> bool {
        Arc::ptr_eq(&self.catalog, catalog)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The `k - 1` heroes closest to `name`, nearest first.
    ///
    /// Only the query row itself is skipped. Other rows with the same name
    /// or an identical stat line stay in the result at distance zero.
    pub fn nearest(&self, name: &str) -> Result<Vec<Neighbor<'_>>> {
        let position = self
            .catalog
            .position(name)
            .ok_or_else(|| Error::HeroNotFound(normalize_token(name)))?;

        let limit = self.config.k.saturating_sub(1);
        Ok(self.search(&self.vectors[position], limit, Some(position)))
    }

    /// Distance between two catalog heroes, by name.
    pub fn distance_between(&self, a: &str, b: &str) -> Result<f64> {
        let va = self.vector_of(a)?;
        let vb = self.vector_of(b)?;
        Ok(euclidean(va, vb))
    }

    /// Brute-force search for the `limit` rows closest to `query`.
    ///
    /// Results are sorted by ascending distance, equal distances in catalog
    /// order. `exclude` skips one catalog position.
    pub fn search(
        &self,
        query: &FeatureVector,
        limit: usize,
        exclude: Option<usize>,
    ) -> Vec<Neighbor<'_>> {
        if limit == 0 {
            return Vec::new();
        }

        // Max-heap holding the best `limit` candidates; the root is the worst.
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(limit + 1);
        for (idx, vector) in self.vectors.iter().enumerate() {
            if exclude == Some(idx) {
                continue;
            }
            let candidate = Candidate::new(idx, euclidean(query, vector));
            if heap.len() < limit {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                heap.pop();
                heap.push(candidate);
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .filter_map(|c| {
                self.catalog.get(c.idx).map(|hero| Neighbor {
                    hero,
                    position: c.idx,
                    distance: c.dist.into_inner(),
                })
            })
            .collect()
    }

    fn vector_of(&self, name: &str) -> Result<&FeatureVector> {
        self.catalog
            .position(name)
            .and_then(|idx| self.vectors.get(idx))
            .ok_or_else(|| Error::HeroNotFound(normalize_token(name)))
    }
}

use herodex_core::{recommend, Hero, HeroCatalog, Result};
use herodex_similarity::{IndexConfig, Neighbor, SimilarResponse, SimilarityIndex};
use std::sync::{Arc, OnceLock};

/// A loaded catalog plus its lazily built similarity index.
///
/// The index is built on first use and tied to this context's catalog; a
/// new catalog means a new context.
#[derive(Debug)]
pub struct HeroContext {
    catalog: Arc<HeroCatalog>,
    index_config: IndexConfig,
    index: OnceLock<SimilarityIndex>,
}

impl HeroContext {
    pub fn new(catalog: HeroCatalog) -> Self {
        Self::with_config(Arc::new(catalog), IndexConfig::default())
    }

    pub fn with_config(catalog: Arc<HeroCatalog>, index_config: IndexConfig) -> Self {
        Self {
            catalog,
            index_config,
            index: OnceLock::new(),
        }
    }

    #[inline]
    pub fn catalog(&self) -> &HeroCatalog {
        &self.catalog
    }

    #[inline]
    pub fn shared_catalog(&self) -> &Arc<HeroCatalog> {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        self.index.get_or_init(|| {
            SimilarityIndex::build_with_config(self.catalog.clone(), self.index_config)
        })
    }

    pub fn is_index_built(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn lookup(&self, name: &str) -> Result<&Hero> {
        self.catalog.lookup(name)
    }

    pub fn recommend(&self, lane: &str) -> Result<Vec<&Hero>> {
        recommend(&self.catalog, lane)
    }

    pub fn nearest(&self, name: &str) -> Result<Vec<Neighbor<'_>>> {
        self.index().nearest(name)
    }

    /// Similar heroes packaged for display.
    pub fn similar(&self, name: &str, include_explain: bool) -> Result<SimilarResponse> {
        let query = self.catalog.lookup(name)?;
        let neighbors = self.nearest(name)?;
        Ok(SimilarResponse::from_neighbors(query, &neighbors, include_explain))
    }
}

impl From<HeroCatalog> for HeroContext {
    fn from(catalog: HeroCatalog) -> Self {
        Self::new(catalog)
    }
}

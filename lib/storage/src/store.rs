use crate::context::HeroContext;
use crate::loader::{load_catalog, FileSource, RowSource, SourceFormat};
use herodex_core::Result;
use herodex_similarity::IndexConfig;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Where a store reads its heroes from
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Explicit format; inferred from the file extension when `None`.
    pub format: Option<SourceFormat>,
    pub index: IndexConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/heroes.csv"),
            format: None,
            index: IndexConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn source(&self) -> Result<FileSource> {
        match self.format {
            Some(format) => Ok(FileSource::new(&self.path, format)),
            None => FileSource::from_path(&self.path),
        }
    }
}

/// Memoizes the context loaded from a row source.
///
/// The first call to [`HeroStore::context`] reads the source; later calls
/// share the same [`HeroContext`]. [`HeroStore::reload`] replaces it, and
/// with it the cached similarity index.
pub struct HeroStore {
    source: Box<dyn RowSource>,
    index_config: IndexConfig,
    context: RwLock<Option<Arc<HeroContext>>>,
}

impl HeroStore {
    pub fn new(source: impl RowSource + 'static) -> Self {
        Self::with_index_config(source, IndexConfig::default())
    }

    pub fn with_index_config(source: impl RowSource + 'static, index_config: IndexConfig) -> Self {
        Self {
            source: Box::new(source),
            index_config,
            context: RwLock::new(None),
        }
    }

    /// Build a store from configuration and load it right away.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let store = Self::with_index_config(config.source()?, config.index);
        store.context()?;
        Ok(store)
    }

    pub fn context(&self) -> Result<Arc<HeroContext>> {
        if let Some(ctx) = self.context.read().as_ref() {
            return Ok(ctx.clone());
        }

        let mut slot = self.context.write();
        if let Some(ctx) = slot.as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = Arc::new(self.load()?);
        *slot = Some(ctx.clone());
        Ok(ctx)
    }

    /// Re-read the source. On failure the previous context stays in place.
    pub fn reload(&self) -> Result<Arc<HeroContext>> {
        let ctx = Arc::new(self.load()?);
        *self.context.write() = Some(ctx.clone());
        Ok(ctx)
    }

    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.context.read().is_some()
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    fn load(&self) -> Result<HeroContext> {
        let catalog = load_catalog(self.source.as_ref())?;
        info!(source = %self.source.describe(), heroes = catalog.len(), "hero data loaded");
        Ok(HeroContext::with_config(Arc::new(catalog), self.index_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemorySource;
    use herodex_core::{Error, RawRow};
    use serde_json::json;
    use std::fs;

    fn row(name: &str, win_rate: f64) -> RawRow {
        json!({
            "hero_name": name,
            "role": "mage",
            "win_rate": win_rate,
            "pick_rate": 1.0,
            "offense_overall": 70,
            "defense_overall": 20,
            "skill_effect_overall": 60,
            "difficulty_overall": 30,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_context_is_memoized() {
        let store = HeroStore::new(MemorySource::new(vec![row("eudora", 51.0)]));
        assert!(!store.is_loaded());

        let first = store.context().unwrap();
        let second = store.context().unwrap();
        assert!(store.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_reload_replaces_context_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.json");
        fs::write(&path, serde_json::to_string(&vec![row("eudora", 51.0)]).unwrap()).unwrap();

        let config = StoreConfig {
            path: path.clone(),
            ..StoreConfig::default()
        };
        let store = HeroStore::open(&config).unwrap();
        let before = store.context().unwrap();
        before.nearest("eudora").unwrap();

        fs::write(
            &path,
            serde_json::to_string(&vec![row("eudora", 51.0), row("aurora", 49.0)]).unwrap(),
        )
        .unwrap();
        let after = store.reload().unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.catalog().len(), 2);
        assert!(!after.is_index_built());
        assert!(!after.index().is_built_from(before.shared_catalog()));
        assert_eq!(after.nearest("eudora").unwrap().len(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_previous_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.json");
        fs::write(&path, serde_json::to_string(&vec![row("eudora", 51.0)]).unwrap()).unwrap();

        let store = HeroStore::open(&StoreConfig {
            path: path.clone(),
            format: Some(SourceFormat::Json),
            index: IndexConfig::default(),
        })
        .unwrap();

        fs::write(&path, "[{\"hero_name\": \"eudora\"}]").unwrap();
        assert!(matches!(store.reload(), Err(Error::Schema(_))));
        assert_eq!(store.context().unwrap().catalog().len(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let config = StoreConfig {
            path: PathBuf::from("/nonexistent/heroes.csv"),
            ..StoreConfig::default()
        };
        assert!(matches!(HeroStore::open(&config), Err(Error::Io(_))));
    }
}

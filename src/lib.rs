//! # HeroDex
//!
//! Hero recommendations for a five-lane MOBA, by lane role and by stat
//! similarity.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! herodex --data data/heroes.csv lane gold
//! herodex --data data/heroes.csv similar martis
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use herodex::prelude::*;
//!
//! let store = HeroStore::open(&StoreConfig::default()).unwrap();
//! let ctx = store.context().unwrap();
//!
//! // Best marksmen for the gold lane
//! for hero in ctx.recommend("gold").unwrap() {
//!     println!("{} {:.2}", hero.display_name(), hero.win_rate);
//! }
//!
//! // Heroes with the closest stat lines to Martis
//! for n in ctx.nearest("martis").unwrap() {
//!     println!("{} {:.3}", n.hero.display_name(), n.distance);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `herodex-core` - Hero rows, the catalog, lane filters and catalog statistics
//! - `herodex-similarity` - Euclidean k-nearest-neighbor index and result explanations
//! - `herodex-storage` - CSV/JSON loading and the memoized catalog/index context
//!
//! ## Lanes
//!
//! | Lane   | Roles               |
//! |--------|---------------------|
//! | gold   | marksman            |
//! | mid    | mage, support       |
//! | roam   | tank, support       |
//! | jungle | assassin, fighter   |
//! | exp    | fighter, tank       |

// Re-export core types
pub use herodex_core::{
    check_columns, normalize_token, recommend, title_case, Error, FeatureVector, Hero, HeroCatalog, HeroFilter,
    Lane, LaneFilter, RawRow, Result, Role, RoleFilter, SchemaError, FEATURE_COLUMNS,
};

// Re-export similarity
pub use herodex_similarity::{IndexConfig, Neighbor, SimilarHero, SimilarResponse, SimilarityIndex};

// Re-export storage
pub use herodex_storage::{FileSource, HeroContext, HeroStore, MemorySource, RawTable, RowSource, SourceFormat, StoreConfig};

/// Catalog analytics
pub mod stats {
    pub use herodex_core::stats::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        recommend, Error, Hero, HeroCatalog, HeroContext, HeroStore, IndexConfig, Lane,
        Neighbor, Result, Role, SimilarityIndex, StoreConfig,
    };
}

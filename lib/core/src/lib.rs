//! # HeroDex Core
//!
//! Core library for HeroDex hero recommendations.
//!
//! This crate provides the catalog and the role-based recommendation path:
//!
//! - [`Hero`] - One hero row with its role and six numeric stats
//! - [`HeroCatalog`] - Immutable, normalized table of heroes
//! - [`FeatureVector`] - The stat vector used for similarity search
//! - [`LaneFilter`] - Lane → role mapping with win-rate ranking
//! - [`stats`] - Preview, pick-rate leaders, comparisons, role shares, correlations
//!
//! ## Example
//!
//! ```rust
//! use herodex_core::{recommend, HeroCatalog, RawRow};
//! use serde_json::json;
//!
//! let rows: Vec<RawRow> = vec![
//!     json!({"hero_name": "Layla", "role": "Marksman", "win_rate": 52.1, "pick_rate": 0.9,
//!            "offense_overall": 80, "defense_overall": 30, "skill_effect_overall": 40,
//!            "difficulty_overall": 20}),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//!
//! let catalog = HeroCatalog::load(rows).unwrap();
//! let gold = recommend(&catalog, "gold").unwrap();
//! assert_eq!(gold[0].name, "layla");
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod hero;
pub mod stats;
pub mod vector;

pub use catalog::{check_columns, HeroCatalog, RawRow, NAME_COLUMN, ROLE_COLUMN};
pub use error::{Error, Result, SchemaError};
pub use filter::{recommend, HeroFilter, Lane, LaneFilter, RoleFilter};
pub use hero::{normalize_token, title_case, Hero, Role};
pub use stats::{
    compare, correlation_matrix, preview, role_distribution, top_by_pick_rate,
    Comparison, CorrelationMatrix, RoleShare, StatRow,
};
pub use vector::{FeatureVector, FEATURE_COLUMNS, FEATURE_DIM};

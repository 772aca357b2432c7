//! # HeroDex Similarity
//!
//! K-nearest-neighbor search over hero stat vectors.
//!
//! Every hero is reduced to six raw stats (`win_rate`, `pick_rate`,
//! `offense_overall`, `defense_overall`, `skill_effect_overall`,
//! `difficulty_overall`) and compared by Euclidean distance. The index is
//! exact: it scans the whole catalog, which is a few hundred rows at most.
//!
//! ## Example
//!
//! ```rust
//! use herodex_core::{Hero, HeroCatalog};
//! use herodex_similarity::SimilarityIndex;
//! use std::sync::Arc;
//!
//! let hero = |name: &str, win_rate: f64| Hero {
//!     name: name.to_string(),
//!     role: "tank".to_string(),
//!     win_rate,
//!     pick_rate: 1.0,
//!     offense_overall: 30.0,
//!     defense_overall: 90.0,
//!     skill_effect_overall: 70.0,
//!     difficulty_overall: 30.0,
//! };
//! let catalog = Arc::new(HeroCatalog::from_heroes(vec![
//!     hero("tigreal", 50.0),
//!     hero("franco", 48.0),
//!     hero("johnson", 51.0),
//! ]).unwrap());
//!
//! let index = SimilarityIndex::build(catalog);
//! let similar = index.nearest("Tigreal").unwrap();
//! assert_eq!(similar[0].hero.name, "johnson");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ HeroCatalog │────>│  Features   │────>│ Similarity  │
//! │   (rows)    │     │ (6 × f64)   │     │   Index     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │   Explain   │
//!                                         │  (results)  │
//!                                         └─────────────┘
//! ```

pub mod distance;
pub mod explain;
pub mod index;

pub use distance::{euclidean, squared_contributions};
pub use explain::{SimilarHero, SimilarResponse};
pub use index::{IndexConfig, Neighbor, SimilarityIndex, DEFAULT_K};

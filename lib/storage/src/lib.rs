pub mod context;
pub mod loader;
pub mod store;

pub use context::HeroContext;
pub use loader::{load_catalog, read_csv, read_json, FileSource, MemorySource, RawTable, RowSource, SourceFormat};
pub use store::{HeroStore, StoreConfig};

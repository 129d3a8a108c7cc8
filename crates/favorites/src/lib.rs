pub mod registry;
pub mod store;

pub use registry::{FAVORITES_KEY, FavoritesRegistry, ToggleAction};
pub use store::{DurableStore, JsonFileStore, MemoryStore, SqliteStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

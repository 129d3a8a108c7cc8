//! Durable key/value storage port.
//!
//! A store holds whole values under string keys: `read` returns everything
//! stored for a key, `write` replaces it. No partial updates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::StoreError;

#[async_trait::async_trait]
pub trait DurableStore: Send + Sync {
    /// `Ok(None)` when nothing was ever written under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store backed by the `kv_store` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// `pool` must already be migrated.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DurableStore for SqliteStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(marquee_db::repo::kv::get(&self.pool, key).await?)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(marquee_db::repo::kv::set(&self.pool, key, value).await?)
    }
}

/// One JSON file per key inside a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait::async_trait]
impl DurableStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        // Write-then-rename so readers never see a truncated file.
        let tmp = tmp_path(&path);
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Process-local store, lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate data left by an earlier session.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self {
            values: Mutex::new(values),
        }
    }
}

#[async_trait::async_trait]
impl DurableStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sqlite_store_round_trips() {
        let pool = marquee_db::open(":memory:").await.unwrap();
        let store = SqliteStore::new(pool);

        assert_eq!(store.read("omdb-favorites").await.unwrap(), None);
        store.write("omdb-favorites", "[]").await.unwrap();
        store.write("omdb-favorites", "[{}]").await.unwrap();
        assert_eq!(
            store.read("omdb-favorites").await.unwrap().as_deref(),
            Some("[{}]")
        );
    }

    #[tokio::test]
    async fn file_store_round_trips_and_overwrites() {
        let dir = std::env::temp_dir().join(format!("marquee_store_{}", std::process::id()));
        let store = JsonFileStore::new(&dir);

        assert_eq!(store.read("omdb-favorites").await.unwrap(), None);
        store.write("omdb-favorites", "[1,2,3]").await.unwrap();
        store.write("omdb-favorites", "[4]").await.unwrap();
        assert_eq!(
            store.read("omdb-favorites").await.unwrap().as_deref(),
            Some("[4]")
        );
        assert!(!tmp_path(&store.path_for("omdb-favorites")).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn file_store_sanitizes_key() {
        let store = JsonFileStore::new("/data");
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/data/___etc_passwd.json")
        );
    }

    #[tokio::test]
    async fn memory_store_seeded_value_is_readable() {
        let store = MemoryStore::with_value("k", "v");
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.read("other").await.unwrap(), None);
    }
}

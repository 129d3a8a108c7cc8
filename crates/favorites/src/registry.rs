//! Favorites registry.
//!
//! Ordered, identifier-unique list of favorited titles mirrored to a
//! [`DurableStore`]. Every mutation writes the whole list under
//! [`FAVORITES_KEY`] before the in-memory list changes, so a failed write
//! leaves the registry as it was.

use std::collections::HashSet;
use std::sync::Arc;

use marquee_core::MovieDetail;
use tracing::{debug, info, warn};

use crate::store::DurableStore;
use crate::StoreError;

pub const FAVORITES_KEY: &str = "omdb-favorites";

/// What a toggle will do, decided without touching state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Record has no identifier.
    Reject,
    Remove(String),
    Add,
}

pub struct FavoritesRegistry {
    store: Arc<dyn DurableStore>,
    favorites: Vec<MovieDetail>,
}

impl FavoritesRegistry {
    /// Load the persisted list. Never fails: unreadable or malformed data
    /// yields an empty registry.
    pub async fn hydrate(store: Arc<dyn DurableStore>) -> Self {
        let favorites = match store.read(FAVORITES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<MovieDetail>>(&raw) {
                Ok(records) => sanitize(records),
                Err(e) => {
                    warn!(error = %e, "stored favorites are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("no stored favorites, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to read stored favorites, starting empty");
                Vec::new()
            }
        };

        debug!(count = favorites.len(), "favorites hydrated");
        Self { store, favorites }
    }

    pub fn favorites(&self) -> &[MovieDetail] {
        &self.favorites
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        let id = id.trim();
        self.favorites.iter().any(|f| f.identifier() == Some(id))
    }

    /// Append `record` unless it lacks an identifier or is already held.
    /// Returns whether it was added.
    pub async fn add(&mut self, record: impl Into<MovieDetail>) -> Result<bool, StoreError> {
        let record = record.into();
        let Some(id) = record.identifier() else {
            warn!(title = %record.title(), "cannot favorite a record without imdbID");
            return Ok(false);
        };
        if self.is_favorite(id) {
            return Ok(false);
        }

        let mut next = self.favorites.clone();
        next.push(record);
        self.commit(next).await?;
        Ok(true)
    }

    /// Drop the record with `id`, if any. Persists either way.
    pub async fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let id = id.trim();
        let next = self
            .favorites
            .iter()
            .filter(|f| f.identifier() != Some(id))
            .cloned()
            .collect();
        self.commit(next).await
    }

    pub fn decide_toggle(&self, record: &MovieDetail) -> ToggleAction {
        match record.identifier() {
            None => ToggleAction::Reject,
            Some(id) if self.is_favorite(id) => ToggleAction::Remove(id.to_string()),
            Some(_) => ToggleAction::Add,
        }
    }

    /// Flip membership of `record`. Returns the resulting state: true when
    /// the record is now a favorite.
    pub async fn toggle(&mut self, record: impl Into<MovieDetail>) -> Result<bool, StoreError> {
        let record = record.into();
        match self.decide_toggle(&record) {
            ToggleAction::Reject => {
                warn!(title = %record.title(), "cannot toggle a record without imdbID");
                Ok(false)
            }
            ToggleAction::Remove(id) => {
                self.remove(&id).await?;
                Ok(false)
            }
            ToggleAction::Add => self.add(record).await,
        }
    }

    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(Vec::new()).await
    }

    async fn commit(&mut self, next: Vec<MovieDetail>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next)?;
        self.store.write(FAVORITES_KEY, &raw).await?;
        self.favorites = next;
        debug!(count = self.favorites.len(), "favorites persisted");
        Ok(())
    }
}

/// Drop records without an identifier and later duplicates of an identifier.
fn sanitize(records: Vec<MovieDetail>) -> Vec<MovieDetail> {
    let total = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<MovieDetail> = records
        .into_iter()
        .filter(|r| match r.identifier() {
            Some(id) => seen.insert(id.to_string()),
            None => false,
        })
        .collect();

    if kept.len() != total {
        warn!(
            dropped = total - kept.len(),
            "ignored stored favorites without imdbID or duplicated"
        );
    }
    kept
}

use std::sync::Arc;

use marquee_catalog::flow::SearchFlow;
use marquee_catalog::provider::CatalogProvider;
use marquee_favorites::{DurableStore, FavoritesRegistry};
use tokio::sync::Mutex;

/// Shared application state passed to all handlers.
///
/// One registry and one search session per process. Locks are never held
/// across a catalog request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub store: Arc<dyn DurableStore>,
    pub favorites: Arc<Mutex<FavoritesRegistry>>,
    pub search: Arc<Mutex<SearchFlow>>,
}

impl AppState {
    /// Hydrates the favorites registry from `store`.
    pub async fn new(catalog: Arc<dyn CatalogProvider>, store: Arc<dyn DurableStore>) -> Self {
        let registry = FavoritesRegistry::hydrate(store.clone()).await;
        Self {
            catalog,
            store,
            favorites: Arc::new(Mutex::new(registry)),
            search: Arc::new(Mutex::new(SearchFlow::new())),
        }
    }
}

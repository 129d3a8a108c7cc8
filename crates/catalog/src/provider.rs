use marquee_core::{MovieDetail, SearchPage};

use crate::CatalogError;

/// A remote movie catalog that can search and look up titles.
///
/// Calls are independent: implementations do not retry, cache or coalesce.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search by free-text term. `page` is 1-based.
    async fn search(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError>;

    /// Look up a single title by its exact text.
    async fn lookup(&self, title: &str) -> Result<MovieDetail, CatalogError>;

    /// Look up a single title by its stable identifier.
    async fn lookup_by_id(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError>;
}

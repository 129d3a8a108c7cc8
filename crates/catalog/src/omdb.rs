//! OMDb (Open Movie Database) client.
//!
//! Uses the single-endpoint API at https://www.omdbapi.com/: `s` + `page` for
//! search, `t` for title lookup, `i` for identifier lookup.

use std::time::Duration;

use marquee_core::{MovieDetail, MovieSummary, SearchPage};
use serde::Deserialize;
use tracing::debug;

use crate::provider::CatalogProvider;
use crate::CatalogError;

pub const BASE_URL: &str = "https://www.omdbapi.com/";
const DEFAULT_NOT_FOUND: &str = "Movie not found!";

#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    pub fn new(config: OmdbConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Network(format!("build http client: {e}")))?;

        Ok(Self {
            api_key: config.api_key,
            base_url: config.base_url,
            client,
        })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<serde_json::Value, CatalogError> {
        let mut all_params = vec![("apikey", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        debug!(url = %self.base_url, ?params, "OMDb request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Provider(format!(
                "OMDb returned {}",
                resp.status()
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| CatalogError::Provider(format!("parse JSON: {e}")))?;

        check_response(data)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError> {
        let page = page.max(1).to_string();
        let data = self.get_json(&[("s", term), ("page", page.as_str())]).await?;
        parse_search_page(data)
    }

    async fn lookup(&self, title: &str) -> Result<MovieDetail, CatalogError> {
        let data = self.get_json(&[("t", title)]).await?;
        parse_detail(data)
    }

    async fn lookup_by_id(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        let data = self.get_json(&[("i", imdb_id)]).await?;
        parse_detail(data)
    }
}

/// Translate the `Response: "False"` convention into `NotFound`.
fn check_response(data: serde_json::Value) -> Result<serde_json::Value, CatalogError> {
    if data["Response"].as_str() == Some("False") {
        let message = data["Error"]
            .as_str()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_NOT_FOUND);
        return Err(CatalogError::NotFound(message.to_string()));
    }
    Ok(data)
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

fn parse_search_page(data: serde_json::Value) -> Result<SearchPage, CatalogError> {
    let envelope: SearchEnvelope = serde_json::from_value(data)
        .map_err(|e| CatalogError::Provider(format!("parse search page: {e}")))?;

    Ok(SearchPage {
        results: envelope.search,
        total_results: envelope
            .total_results
            .and_then(|t| t.trim().parse().ok()),
    })
}

fn parse_detail(data: serde_json::Value) -> Result<MovieDetail, CatalogError> {
    let detail: MovieDetail = serde_json::from_value(data)
        .map_err(|e| CatalogError::Provider(format!("parse detail: {e}")))?;

    if detail.identifier().is_none() || detail.title().trim().is_empty() {
        return Err(CatalogError::Provider(
            "detail response missing imdbID or Title".into(),
        ));
    }
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_page_from_json() {
        let json = serde_json::json!({
            "Search": [
                { "Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://example.com/1.jpg" },
                { "Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A" }
            ],
            "totalResults": "2",
            "Response": "True"
        });

        let page = parse_search_page(check_response(json).unwrap()).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_results, Some(2));
        assert_eq!(page.results[1].identifier(), Some("tt0234215"));
        assert_eq!(page.results[1].poster_url(), None);
    }

    #[test]
    fn response_false_becomes_not_found_with_message() {
        let json = serde_json::json!({ "Response": "False", "Error": "Movie not found!" });
        let err = check_response(json).unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Movie not found!".into()));
        assert!(!err.is_transport());
        assert_eq!(err.user_message(), "Movie not found!");
    }

    #[test]
    fn response_false_without_message_uses_default() {
        let json = serde_json::json!({ "Response": "False" });
        let err = check_response(json).unwrap_err();
        assert_eq!(err, CatalogError::NotFound(DEFAULT_NOT_FOUND.into()));
    }

    #[test]
    fn search_without_results_field_is_empty_page() {
        let json = serde_json::json!({ "Response": "True" });
        let page = parse_search_page(json).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_results, None);
    }

    #[test]
    fn parse_detail_from_json() {
        let json = serde_json::json!({
            "Title": "Inception",
            "Year": "2010",
            "Rated": "PG-13",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Plot": "A thief who steals corporate secrets...",
            "imdbRating": "8.8",
            "imdbVotes": "2,500,000",
            "imdbID": "tt1375666",
            "Poster": "https://example.com/inception.jpg",
            "Response": "True"
        });

        let detail = parse_detail(json).unwrap();
        assert_eq!(detail.title(), "Inception");
        assert_eq!(detail.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(detail.imdb_rating.as_deref(), Some("8.8"));
        assert_eq!(detail.metascore, None);
    }

    #[test]
    fn detail_without_identifier_is_rejected() {
        let json = serde_json::json!({ "Title": "Ghost", "Response": "True" });
        let err = parse_detail(json).unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.user_message(), crate::REQUEST_FAILED);
    }
}

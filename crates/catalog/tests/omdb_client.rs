use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use marquee_catalog::omdb::{OmdbClient, OmdbConfig};
use marquee_catalog::provider::CatalogProvider;
use marquee_catalog::CatalogError;
use serde_json::json;

/// Fake OMDb endpoint: answers based on the query string the way the real API does.
async fn fake_omdb(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("apikey").map(String::as_str) != Some("test-key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "Response": "False", "Error": "Invalid API key!" })),
        );
    }

    if let Some(term) = params.get("s") {
        let page = params.get("page").cloned().unwrap_or_default();
        if term == "matrix" && page == "1" {
            return (
                StatusCode::OK,
                Json(json!({
                    "Search": [
                        { "Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "N/A" },
                        { "Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A" }
                    ],
                    "totalResults": "2",
                    "Response": "True"
                })),
            );
        }
        return (
            StatusCode::OK,
            Json(json!({ "Response": "False", "Error": "Movie not found!" })),
        );
    }

    let matrix = json!({
        "Title": "The Matrix",
        "Year": "1999",
        "Plot": "A computer hacker learns the true nature of reality.",
        "imdbID": "tt0133093",
        "Poster": "N/A",
        "Response": "True"
    });
    if params.get("t").map(String::as_str) == Some("The Matrix")
        || params.get("i").map(String::as_str) == Some("tt0133093")
    {
        return (StatusCode::OK, Json(matrix));
    }

    (
        StatusCode::OK,
        Json(json!({ "Response": "False", "Error": "Movie not found!" })),
    )
}

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/")
}

async fn client_for(router: Router, api_key: &str) -> OmdbClient {
    let base_url = spawn_stub(router).await;
    OmdbClient::new(OmdbConfig {
        api_key: api_key.to_string(),
        base_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn search_returns_page_of_summaries() {
    let client = client_for(Router::new().route("/", get(fake_omdb)), "test-key").await;

    let page = client.search("matrix", 1).await.unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total_results, Some(2));
    assert_eq!(page.results[0].title, "The Matrix");
}

#[tokio::test]
async fn search_miss_is_not_found_with_api_message() {
    let client = client_for(Router::new().route("/", get(fake_omdb)), "test-key").await;

    let err = client.search("zzzqqq123", 1).await.unwrap_err();
    assert_eq!(err, CatalogError::NotFound("Movie not found!".into()));
}

#[tokio::test]
async fn out_of_range_page_is_not_found() {
    let client = client_for(Router::new().route("/", get(fake_omdb)), "test-key").await;

    let err = client.search("matrix", 99).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn non_success_status_is_transport_error() {
    let client = client_for(Router::new().route("/", get(fake_omdb)), "wrong-key").await;

    let err = client.search("matrix", 1).await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, CatalogError::Provider(_)));
}

#[tokio::test]
async fn malformed_body_is_transport_error() {
    let router = Router::new().route("/", get(|| async { "<html>maintenance</html>" }));
    let client = client_for(router, "test-key").await;

    let err = client.lookup("The Matrix").await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OmdbClient::new(OmdbConfig {
        api_key: "test-key".into(),
        base_url: format!("http://{addr}/"),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    let err = client.search("matrix", 1).await.unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}

#[tokio::test]
async fn lookup_by_title_and_by_id_resolve_same_record() {
    let client = client_for(Router::new().route("/", get(fake_omdb)), "test-key").await;

    let by_title = client.lookup("The Matrix").await.unwrap();
    let by_id = client.lookup_by_id("tt0133093").await.unwrap();
    assert_eq!(by_title, by_id);
    assert_eq!(by_title.identifier(), Some("tt0133093"));
}

#[tokio::test]
async fn lookup_miss_is_not_found() {
    let client = client_for(Router::new().route("/", get(fake_omdb)), "test-key").await;

    let err = client.lookup("No Such Film").await.unwrap_err();
    assert_eq!(err.user_message(), "Movie not found!");
}

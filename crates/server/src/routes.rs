use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use marquee_catalog::flow::{SearchPhase, SearchRequest};
use marquee_core::error::ApiError;
use marquee_core::{MovieDetail, MovieSummary};
use marquee_favorites::FAVORITES_KEY;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        // Search flow
        .route("/search", get(get_search).post(submit_search))
        .route("/search/term", put(set_term))
        .route("/search/next", post(next_page))
        .route("/search/prev", post(prev_page))
        .route("/search/dismiss", post(dismiss_error))
        // Details
        .route("/details/{title}", get(details_by_title))
        .route("/titles/{imdb_id}", get(details_by_id))
        // Favorites
        .route(
            "/favorites",
            get(list_favorites)
                .post(add_favorite)
                .delete(clear_favorites),
        )
        .route("/favorites/toggle", post(toggle_favorite))
        .route(
            "/favorites/{id}",
            get(favorite_status).delete(remove_favorite),
        )
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    catalog: String,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state
        .store
        .read(FAVORITES_KEY)
        .await
        .map_err(|e| ApiError::Internal(format!("store check failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        catalog: state.catalog.name().to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SearchResultCard {
    #[serde(flatten)]
    movie: MovieSummary,
    favorite: bool,
}

#[derive(Serialize)]
struct SearchView {
    term: String,
    page: u32,
    results: Vec<SearchResultCard>,
    total_results: Option<u32>,
    phase: SearchPhase,
    loading: bool,
    error: Option<String>,
}

async fn search_view(state: &AppState) -> SearchView {
    let snapshot = state.search.lock().await.state().clone();
    let favorites = state.favorites.lock().await;

    SearchView {
        loading: snapshot.loading(),
        results: snapshot
            .results
            .into_iter()
            .map(|movie| SearchResultCard {
                favorite: movie
                    .identifier()
                    .is_some_and(|id| favorites.is_favorite(id)),
                movie: movie.without_sentinels(),
            })
            .collect(),
        term: snapshot.term,
        page: snapshot.page,
        total_results: snapshot.total_results,
        phase: snapshot.phase,
        error: snapshot.error,
    }
}

/// Issue a query the flow asked for, with the flow unlocked while it runs.
async fn run_search(state: &AppState, request: Option<SearchRequest>) {
    let Some(request) = request else {
        return;
    };
    let outcome = state.catalog.search(&request.term, request.page).await;
    state.search.lock().await.complete(&request, outcome);
}

async fn get_search(State(state): State<AppState>) -> Json<SearchView> {
    Json(search_view(&state).await)
}

#[derive(Deserialize)]
struct TermRequest {
    term: String,
}

async fn set_term(
    State(state): State<AppState>,
    Json(body): Json<TermRequest>,
) -> Json<SearchView> {
    state.search.lock().await.set_term(body.term);
    Json(search_view(&state).await)
}

async fn submit_search(State(state): State<AppState>) -> Json<SearchView> {
    let request = state.search.lock().await.search();
    run_search(&state, request).await;
    Json(search_view(&state).await)
}

async fn next_page(State(state): State<AppState>) -> Json<SearchView> {
    let request = state.search.lock().await.next_page();
    run_search(&state, request).await;
    Json(search_view(&state).await)
}

async fn prev_page(State(state): State<AppState>) -> Json<SearchView> {
    let request = state.search.lock().await.prev_page();
    run_search(&state, request).await;
    Json(search_view(&state).await)
}

async fn dismiss_error(State(state): State<AppState>) -> Json<SearchView> {
    state.search.lock().await.dismiss_error();
    Json(search_view(&state).await)
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DetailView {
    #[serde(flatten)]
    movie: MovieDetail,
    favorite: bool,
}

async fn detail_view(state: &AppState, movie: MovieDetail) -> DetailView {
    let favorite = {
        let favorites = state.favorites.lock().await;
        movie
            .identifier()
            .is_some_and(|id| favorites.is_favorite(id))
    };
    DetailView {
        movie: movie.without_sentinels(),
        favorite,
    }
}

/// Title text is the lookup key, so textually equal titles resolve to
/// whichever record the catalog matches first.
async fn details_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<DetailView>, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".into()).into());
    }
    let movie = state.catalog.lookup(title).await?;
    Ok(Json(detail_view(&state, movie).await))
}

async fn details_by_id(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Result<Json<DetailView>, AppError> {
    let imdb_id = imdb_id.trim();
    if imdb_id.is_empty() {
        return Err(ApiError::BadRequest("imdb id must not be empty".into()).into());
    }
    let movie = state.catalog.lookup_by_id(imdb_id).await?;
    Ok(Json(detail_view(&state, movie).await))
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<MovieDetail>,
    count: usize,
}

async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let favorites = state.favorites.lock().await;
    Json(FavoritesResponse {
        favorites: favorites.favorites().to_vec(),
        count: favorites.count(),
    })
}

#[derive(Serialize)]
struct AddResponse {
    added: bool,
    count: usize,
}

async fn add_favorite(
    State(state): State<AppState>,
    Json(record): Json<Option<MovieDetail>>,
) -> Result<Json<AddResponse>, AppError> {
    let mut favorites = state.favorites.lock().await;
    let added = match record {
        Some(record) => favorites.add(record).await?,
        None => {
            warn!("cannot favorite an absent record");
            false
        }
    };
    Ok(Json(AddResponse {
        added,
        count: favorites.count(),
    }))
}

#[derive(Serialize)]
struct FavoriteStatus {
    favorite: bool,
    count: usize,
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Json(record): Json<Option<MovieDetail>>,
) -> Result<Json<FavoriteStatus>, AppError> {
    let mut favorites = state.favorites.lock().await;
    let favorite = match record {
        Some(record) => favorites.toggle(record).await?,
        None => {
            warn!("cannot toggle an absent record");
            false
        }
    };
    Ok(Json(FavoriteStatus {
        favorite,
        count: favorites.count(),
    }))
}

async fn favorite_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<FavoriteStatus> {
    let favorites = state.favorites.lock().await;
    Json(FavoriteStatus {
        favorite: favorites.is_favorite(&id),
        count: favorites.count(),
    })
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteStatus>, AppError> {
    let mut favorites = state.favorites.lock().await;
    favorites.remove(&id).await?;
    Ok(Json(FavoriteStatus {
        favorite: false,
        count: favorites.count(),
    }))
}

async fn clear_favorites(
    State(state): State<AppState>,
) -> Result<Json<FavoritesResponse>, AppError> {
    let mut favorites = state.favorites.lock().await;
    favorites.clear().await?;
    Ok(Json(FavoritesResponse {
        favorites: Vec::new(),
        count: favorites.count(),
    }))
}

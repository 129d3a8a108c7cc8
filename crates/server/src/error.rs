use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_catalog::CatalogError;
use marquee_core::error::{ApiError, ErrorEnvelope};
use marquee_favorites::StoreError;
use tracing::{error, warn};

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        if !e.is_transport() {
            return Self(ApiError::NotFound(e.user_message().to_string()));
        }
        warn!(error = %e, "catalog request failed");
        Self(ApiError::BadGateway(e.user_message().to_string()))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        error!(error = %e, "favorites store write failed");
        Self(ApiError::Internal(format!("favorites store: {e}")))
    }
}

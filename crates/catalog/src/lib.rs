pub mod flow;
pub mod omdb;
pub mod provider;

use thiserror::Error;

/// Message shown for failures that carry no catalog-provided text.
pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
    /// The catalog answered but reported no match; carries its message.
    #[error("not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    /// True for failures of the request itself rather than "no match".
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }

    /// Text suitable for an end-user error state.
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotFound(message) => message,
            Self::Network(_) | Self::Provider(_) => REQUEST_FAILED,
        }
    }
}

pub mod error;
pub mod types;

pub use types::{MovieDetail, MovieSummary, NOT_AVAILABLE, SearchPage};

//! Search flow controller.
//!
//! Owns the term, page and result list of one search session and decides when
//! a remote query is due. Deciding and fetching are split: every transition
//! that needs the catalog returns a [`SearchRequest`], and the caller feeds
//! the outcome back through [`SearchFlow::complete`]. Overlapping requests
//! are not guarded; whichever completion arrives last wins.

use marquee_core::{MovieSummary, SearchPage};
use serde::Serialize;
use tracing::{debug, warn};

use crate::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// A query the controller wants issued against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub page: u32,
}

/// Transient search state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_results: Option<u32>,
    pub phase: SearchPhase,
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
            results: Vec::new(),
            total_results: None,
            phase: SearchPhase::Idle,
            error: None,
        }
    }
}

impl SearchState {
    pub fn loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    fn has_term(&self) -> bool {
        !self.term.trim().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SearchFlow {
    state: SearchState,
}

impl SearchFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Replace the search term. A different term resets to page 1 and drops
    /// the current results without querying; the same term changes nothing.
    /// Ignored while a request is in flight.
    pub fn set_term(&mut self, term: impl Into<String>) -> bool {
        if self.state.loading() {
            debug!("term change ignored while loading");
            return false;
        }

        let term = term.into();
        if term == self.state.term {
            return false;
        }

        self.state.term = term;
        self.state.page = 1;
        self.state.results.clear();
        self.state.total_results = None;
        self.state.error = None;
        self.state.phase = SearchPhase::Idle;
        true
    }

    /// Explicit user search for the current term and page.
    pub fn search(&mut self) -> Option<SearchRequest> {
        if !self.state.has_term() {
            debug!("search without a term ignored");
            return None;
        }
        Some(self.begin())
    }

    /// Advance one page. Only possible while results are shown.
    pub fn next_page(&mut self) -> Option<SearchRequest> {
        if self.state.results.is_empty() {
            return None;
        }
        self.state.page += 1;
        self.refetch()
    }

    /// Go back one page; page 1 is the floor.
    pub fn prev_page(&mut self) -> Option<SearchRequest> {
        if self.state.page <= 1 {
            return None;
        }
        self.state.page -= 1;
        self.refetch()
    }

    /// Clear a shown error so the user can try again. Term and page are kept.
    pub fn dismiss_error(&mut self) -> bool {
        if self.state.phase != SearchPhase::Error {
            return false;
        }
        self.state.error = None;
        self.state.phase = SearchPhase::Idle;
        true
    }

    /// Apply the outcome of a catalog query.
    pub fn complete(&mut self, request: &SearchRequest, outcome: Result<SearchPage, CatalogError>) {
        if request.page != self.state.page || request.term != self.state.term.trim() {
            debug!(
                term = %request.term,
                page = request.page,
                "applying response for a superseded request"
            );
        }

        match outcome {
            Ok(page) => {
                self.state.phase = if page.results.is_empty() {
                    SearchPhase::Idle
                } else {
                    SearchPhase::Success
                };
                self.state.results = page.results;
                self.state.total_results = page.total_results;
                self.state.error = None;
            }
            Err(e) => {
                warn!(term = %request.term, page = request.page, error = %e, "search failed");
                self.state.results.clear();
                self.state.total_results = None;
                self.state.error = Some(e.user_message().to_string());
                self.state.phase = SearchPhase::Error;
            }
        }
    }

    /// A page change re-queries only when a term is set.
    fn refetch(&mut self) -> Option<SearchRequest> {
        if self.state.has_term() {
            Some(self.begin())
        } else {
            None
        }
    }

    fn begin(&mut self) -> SearchRequest {
        self.state.phase = SearchPhase::Loading;
        self.state.error = None;
        SearchRequest {
            term: self.state.term.trim().to_string(),
            page: self.state.page,
        }
    }
}

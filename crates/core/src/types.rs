use serde::{Deserialize, Serialize};

/// Sentinel the catalog uses for "field intentionally absent".
pub const NOT_AVAILABLE: &str = "N/A";

/// Treat the sentinel and blank strings as absent.
pub fn available(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

/// A title as returned by a catalog search, or as held in the favorites list.
///
/// Field names follow the catalog's wire format so persisted favorites and
/// API payloads share one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Free-form, e.g. "1999" or "2008–2013".
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, skip_serializing_if = "String::is_empty")]
    pub poster: String,
    /// "movie", "series" or "episode".
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MovieSummary {
    /// The stable identifier, if the record carries a usable one.
    pub fn identifier(&self) -> Option<&str> {
        self.imdb_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn poster_url(&self) -> Option<&str> {
        available(Some(self.poster.as_str()))
    }

    /// Copy for display: a sentinel poster is dropped from the payload.
    pub fn without_sentinels(mut self) -> Self {
        if self.poster_url().is_none() {
            self.poster.clear();
        }
        self
    }
}

/// Full record for a single title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Rated", default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(rename = "Director", default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "Writer", default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Awards", default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(rename = "Production", default, skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default, skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "Metascore", default, skip_serializing_if = "Option::is_none")]
    pub metascore: Option<String>,
}

impl MovieDetail {
    pub fn identifier(&self) -> Option<&str> {
        self.summary.identifier()
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// Copy for display with every `"N/A"` or blank field removed.
    pub fn without_sentinels(mut self) -> Self {
        self.summary = self.summary.without_sentinels();
        for field in [
            &mut self.plot,
            &mut self.genre,
            &mut self.runtime,
            &mut self.rated,
            &mut self.director,
            &mut self.writer,
            &mut self.actors,
            &mut self.awards,
            &mut self.production,
            &mut self.imdb_rating,
            &mut self.imdb_votes,
            &mut self.metascore,
        ] {
            if available(field.as_deref()).is_none() {
                *field = None;
            }
        }
        self
    }
}

impl From<MovieSummary> for MovieDetail {
    fn from(summary: MovieSummary) -> Self {
        Self {
            summary,
            ..Default::default()
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<MovieSummary>,
    pub total_results: Option<u32>,
}

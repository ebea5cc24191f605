//! Request parameters for TMDB endpoints.

use std::fmt;

/// Time window for `trending/movie/{window}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingWindow {
    /// Trending over the last day.
    Day,
    /// Trending over the last week.
    #[default]
    Week,
}

impl TrendingWindow {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters shared by paged list endpoints
/// (`now_playing`, `popular`, `top_rated`, `upcoming`, `similar`, `reviews`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Region filter (ISO 3166-1). Only honoured by `now_playing` and `upcoming`.
    pub region: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            page: 1,
            region: None,
        }
    }
}

impl ListParams {
    /// Creates list params for the given language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the query pairs for this request.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
        ];
        if let Some(ref region) = self.region {
            query.push(("region", region.clone()));
        }
        query
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            primary_release_year: None,
            region: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the query pairs for this request.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("query", self.query.clone()),
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }
        if let Some(ref region) = self.region {
            query.push(("region", region.clone()));
        }
        query
    }
}

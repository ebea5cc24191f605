//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::error::ApiError;
use super::params::{ListParams, SearchMovieParams, TrendingWindow};
use super::rate_limiter::TmdbRateLimiter;
use super::types::{
    TmdbCredits, TmdbErrorResponse, TmdbMovieDetails, TmdbMovieListResponse, TmdbReviewsResponse,
    TmdbVideosResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB `status_code` for "The resource you requested could not be found."
const TMDB_CODE_NOT_FOUND: u32 = 34;

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Rate limiter.
    rate_limiter: Arc<Mutex<TmdbRateLimiter>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            min_interval: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets the per-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self
            .api_token
            .filter(|t| !t.trim().is_empty())
            .context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let rate_limiter = self
            .min_interval
            .map_or_else(TmdbRateLimiter::default_interval, TmdbRateLimiter::new);

        let mut http_builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http_client = http_builder
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth, query params, and rate limiting.
    ///
    /// A single attempt is made; HTTP 404 maps to [`ApiError::NotFound`] and
    /// other non-success statuses to [`ApiError::Status`].
    #[instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let wait = self.rate_limiter.lock().await.reserve(Instant::now());
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let parsed = serde_json::from_str::<TmdbErrorResponse>(&body).ok();
            tracing::warn!(status = status.as_u16(), path, "TMDB API request failed");

            let is_not_found = status == StatusCode::NOT_FOUND
                || parsed
                    .as_ref()
                    .is_some_and(|e| e.status_code == TMDB_CODE_NOT_FOUND);
            if is_not_found {
                return Err(ApiError::NotFound {
                    path: String::from(path),
                }
                .into());
            }

            let (code, message) =
                parsed.map_or((0, body), |e| (e.status_code, e.status_message));
            return Err(ApiError::Status {
                status: status.as_u16(),
                code,
                message,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed = raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn trending(
        &self,
        window: TrendingWindow,
        language: &str,
    ) -> Result<TmdbMovieListResponse> {
        let path = format!("trending/movie/{window}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn now_playing(&self, params: &ListParams) -> Result<TmdbMovieListResponse> {
        self.get_json("movie/now_playing", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn popular(&self, params: &ListParams) -> Result<TmdbMovieListResponse> {
        self.get_json("movie/popular", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn top_rated(&self, params: &ListParams) -> Result<TmdbMovieListResponse> {
        self.get_json("movie/top_rated", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn upcoming(&self, params: &ListParams) -> Result<TmdbMovieListResponse> {
        self.get_json("movie/upcoming", &params.to_query()).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
        self.get_json("search/movie", &params.to_query()).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_credits(&self, movie_id: u64, language: &str) -> Result<TmdbCredits> {
        let path = format!("movie/{movie_id}/credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_reviews(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> Result<TmdbReviewsResponse> {
        let path = format!("movie/{movie_id}/reviews");
        self.get_json(&path, &params.to_query()).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn similar_movies(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> Result<TmdbMovieListResponse> {
        let path = format!("movie/{movie_id}/similar");
        self.get_json(&path, &params.to_query()).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_videos(&self, movie_id: u64, language: &str) -> Result<TmdbVideosResponse> {
        let path = format!("movie/{movie_id}/videos");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}

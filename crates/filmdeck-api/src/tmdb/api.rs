//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{ListParams, SearchMovieParams, TrendingWindow};
use super::types::{
    TmdbCredits, TmdbMovieDetails, TmdbMovieListResponse, TmdbReviewsResponse, TmdbVideosResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait so
/// requests can run on spawned tasks.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches trending movies for the given time window.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending(&self, window: TrendingWindow, language: &str)
    -> Result<TmdbMovieListResponse>;

    /// Fetches movies currently in theatres.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn now_playing(&self, params: &ListParams) -> Result<TmdbMovieListResponse>;

    /// Fetches popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular(&self, params: &ListParams) -> Result<TmdbMovieListResponse>;

    /// Fetches top rated movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated(&self, params: &ListParams) -> Result<TmdbMovieListResponse>;

    /// Fetches upcoming movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn upcoming(&self, params: &ListParams) -> Result<TmdbMovieListResponse>;

    /// Fetches full movie details.
    ///
    /// # Errors
    ///
    /// Returns [`super::ApiError::NotFound`] (wrapped in `anyhow`) for unknown ids,
    /// or an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails>;

    /// Searches for movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse>;

    /// Fetches cast and crew for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64, language: &str) -> Result<TmdbCredits>;

    /// Fetches user reviews for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_reviews(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> Result<TmdbReviewsResponse>;

    /// Fetches movies similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn similar_movies(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> Result<TmdbMovieListResponse>;

    /// Fetches trailers, teasers and clips for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_videos(&self, movie_id: u64, language: &str) -> Result<TmdbVideosResponse>;
}

//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (lists, details, search, credits, reviews, similar titles, videos)
//! and builds image and trailer URLs.

mod api;
mod client;
mod error;
mod params;
mod rate_limiter;
mod types;
mod urls;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::ApiError;
pub use params::{ListParams, SearchMovieParams, TrendingWindow};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbGenre, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbMovieSummary, TmdbProductionCompany, TmdbReview,
    TmdbReviewAuthor, TmdbReviewsResponse, TmdbVideo, TmdbVideosResponse,
};
pub use urls::{IMAGE_BASE_URL, ImageSize, image_url, youtube_url};

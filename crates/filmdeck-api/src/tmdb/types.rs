//! TMDB API response types.
//!
//! Shapes follow the TMDB v3 responses; fields the client never reads are
//! left out and ignored by `serde`. TMDB is inconsistent about `null` versus
//! missing fields, so most optional data carries `#[serde(default)]`.

use serde::Deserialize;

// --- Movie lists (trending, now playing, popular, top rated, upcoming, search, similar) ---

/// Paged response shared by every movie list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A movie as returned by list and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
}

// --- Movie details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Release status (e.g. "Released", "Post Production").
    #[serde(default)]
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TmdbProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    #[serde(default)]
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Option<String>,
}

// --- Credits ---

/// Response from `movie/{movie_id}/credits` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    /// TMDB movie ID.
    pub id: u64,
    /// Cast members, ordered by billing.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A single cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: u32,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A single crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g. "Director").
    #[serde(default)]
    pub job: Option<String>,
    /// Department (e.g. "Directing").
    #[serde(default)]
    pub department: Option<String>,
}

impl TmdbCredits {
    /// Returns the names of crew members credited as director.
    #[must_use]
    pub fn directors(&self) -> Vec<&str> {
        self.crew
            .iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name.as_str())
            .collect()
    }
}

// --- Reviews ---

/// Response from `movie/{movie_id}/reviews` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReviewsResponse {
    /// TMDB movie ID.
    pub id: u64,
    /// Current page number.
    pub page: u32,
    /// Reviews on this page.
    pub results: Vec<TmdbReview>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of reviews.
    #[serde(default)]
    pub total_results: u32,
}

/// A single user review.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReview {
    /// Review ID (hex string).
    pub id: String,
    /// Author display name.
    pub author: String,
    /// Review body.
    pub content: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Review URL on TMDB.
    #[serde(default)]
    pub url: Option<String>,
    /// Author details, including the rating given.
    #[serde(default)]
    pub author_details: Option<TmdbReviewAuthor>,
}

/// Author details of a review.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReviewAuthor {
    /// Author username.
    #[serde(default)]
    pub username: Option<String>,
    /// Rating the author gave (0-10).
    #[serde(default)]
    pub rating: Option<f64>,
}

impl TmdbReview {
    /// Rating given by the author, if any.
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.author_details.as_ref().and_then(|a| a.rating)
    }
}

// --- Videos ---

/// Response from `movie/{movie_id}/videos` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideosResponse {
    /// TMDB movie ID.
    pub id: u64,
    /// Videos attached to the movie.
    pub results: Vec<TmdbVideo>,
}

/// A single video entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video ID (hex string).
    pub id: String,
    /// Site-specific key (e.g. `YouTube` video id).
    pub key: String,
    /// Video title.
    pub name: String,
    /// Hosting site (e.g. "YouTube", "Vimeo").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser", "Clip").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether the video is official.
    #[serde(default)]
    pub official: bool,
}

impl TmdbVideosResponse {
    /// Picks the trailer to show: the first official `YouTube` trailer,
    /// falling back to any `YouTube` trailer.
    #[must_use]
    pub fn trailer(&self) -> Option<&TmdbVideo> {
        let mut trailers = self
            .results
            .iter()
            .filter(|v| v.site == "YouTube" && v.video_type == "Trailer");
        let first = trailers.clone().next();
        trailers.find(|v| v.official).or(first)
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn video(key: &str, site: &str, video_type: &str, official: bool) -> TmdbVideo {
        TmdbVideo {
            id: format!("id-{key}"),
            key: String::from(key),
            name: format!("video {key}"),
            site: String::from(site),
            video_type: String::from(video_type),
            official,
        }
    }

    #[test]
    fn test_trailer_prefers_official() {
        // Arrange
        let videos = TmdbVideosResponse {
            id: 1,
            results: vec![
                video("teaser", "YouTube", "Teaser", true),
                video("fan", "YouTube", "Trailer", false),
                video("official", "YouTube", "Trailer", true),
            ],
        };

        // Act
        let trailer = videos.trailer().unwrap();

        // Assert
        assert_eq!(trailer.key, "official");
    }

    #[test]
    fn test_trailer_falls_back_to_unofficial() {
        // Arrange
        let videos = TmdbVideosResponse {
            id: 1,
            results: vec![
                video("vimeo", "Vimeo", "Trailer", true),
                video("fan", "YouTube", "Trailer", false),
            ],
        };

        // Act & Assert
        assert_eq!(videos.trailer().unwrap().key, "fan");
    }

    #[test]
    fn test_trailer_none_without_youtube_trailer() {
        // Arrange
        let videos = TmdbVideosResponse {
            id: 1,
            results: vec![video("clip", "YouTube", "Clip", true)],
        };

        // Act & Assert
        assert!(videos.trailer().is_none());
    }

    #[test]
    fn test_summary_tolerates_nulls() {
        // Arrange
        let json = r#"{"id":1,"title":"X","poster_path":null,"release_date":""}"#;

        // Act
        let movie: TmdbMovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.release_date.as_deref(), Some(""));
        assert!(movie.genre_ids.is_empty());
    }
}

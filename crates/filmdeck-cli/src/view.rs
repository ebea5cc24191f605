//! Presentation helpers shared by CLI output and the TUI.

use chrono::{Datelike, NaiveDate};
use filmdeck_api::tmdb::{ImageSize, TmdbMovieDetails, TmdbMovieSummary, image_url};
use filmdeck_store::FavoriteEntry;

use crate::messages::Messages;

/// Maximum number of production companies shown.
const MAX_COMPANIES: usize = 3;

/// Formats a runtime in minutes as hours and minutes (`139` -> `2h 19m`).
///
/// Missing or zero runtimes render as the "not available" placeholder.
#[must_use]
pub fn format_runtime(minutes: Option<u32>, m: &Messages) -> String {
    match minutes {
        Some(total) if total > 0 => {
            let hours = total / 60;
            let mins = total % 60;
            format!("{hours}{} {mins}{}", m.hour_suffix, m.minute_suffix)
        }
        _ => String::from(m.not_available),
    }
}

/// Formats a vote average with one decimal. Zero means "no votes".
#[must_use]
pub fn format_rating(vote_average: f64, m: &Messages) -> String {
    if vote_average > 0.0 {
        format!("{vote_average:.1}")
    } else {
        String::from(m.not_available)
    }
}

/// Extracts the year from a `YYYY-MM-DD` release date.
#[must_use]
pub fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Truncates to at most `max` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return String::from(text);
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

/// One-line card text for a movie list entry: `Title (1999) ★ 8.4`.
#[must_use]
pub fn card_label(title: &str, vote_average: f64, release_date: Option<&str>, m: &Messages) -> String {
    let rating = format_rating(vote_average, m);
    release_year(release_date).map_or_else(
        || format!("{title} \u{2605} {rating}"),
        |year| format!("{title} ({year}) \u{2605} {rating}"),
    )
}

/// Builds a favorites entry from a list result.
#[must_use]
pub fn entry_from_summary(movie: &TmdbMovieSummary) -> FavoriteEntry {
    FavoriteEntry {
        id: movie.id,
        title: movie.title.clone(),
        poster_path: movie.poster_path.clone(),
        vote_average: movie.vote_average,
        release_date: movie.release_date.clone(),
    }
}

/// Builds a favorites entry from full movie details.
#[must_use]
pub fn entry_from_details(movie: &TmdbMovieDetails) -> FavoriteEntry {
    FavoriteEntry {
        id: movie.id,
        title: movie.title.clone(),
        poster_path: movie.poster_path.clone(),
        vote_average: movie.vote_average,
        release_date: movie.release_date.clone(),
    }
}

/// Display-ready projection of [`TmdbMovieDetails`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailView {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Tagline, if any.
    pub tagline: Option<String>,
    /// Rating with one decimal, or the placeholder.
    pub rating: String,
    /// Release year.
    pub year: Option<i32>,
    /// Runtime as hours/minutes, or the placeholder.
    pub runtime: String,
    /// Overview, or the localized fallback.
    pub overview: String,
    /// Genre names.
    pub genres: Vec<String>,
    /// Original title, only when it differs from the localized one.
    pub original_title: Option<String>,
    /// Release status.
    pub status: Option<String>,
    /// Original language, uppercased.
    pub original_language: Option<String>,
    /// Up to three production company names.
    pub companies: Vec<String>,
    /// Poster URL.
    pub poster_url: Option<String>,
    /// Backdrop URL.
    pub backdrop_url: Option<String>,
}

impl MovieDetailView {
    /// Builds the view from an API response.
    #[must_use]
    pub fn new(movie: &TmdbMovieDetails, m: &Messages) -> Self {
        let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.trim().is_empty());

        Self {
            id: movie.id,
            title: movie.title.clone(),
            tagline: non_empty(&movie.tagline),
            rating: format_rating(movie.vote_average, m),
            year: release_year(movie.release_date.as_deref()),
            runtime: format_runtime(movie.runtime, m),
            overview: non_empty(&movie.overview).unwrap_or_else(|| String::from(m.no_overview)),
            genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
            original_title: non_empty(&movie.original_title).filter(|t| *t != movie.title),
            status: non_empty(&movie.status),
            original_language: non_empty(&movie.original_language).map(|l| l.to_uppercase()),
            companies: movie
                .production_companies
                .iter()
                .take(MAX_COMPANIES)
                .map(|c| c.name.clone())
                .collect(),
            poster_url: image_url(movie.poster_path.as_deref(), ImageSize::Poster),
            backdrop_url: image_url(movie.backdrop_path.as_deref(), ImageSize::Backdrop),
        }
    }

    /// Quick-info line: rating, year and runtime.
    #[must_use]
    pub fn quick_info(&self) -> String {
        let mut parts = vec![format!("\u{2605} {}", self.rating)];
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        parts.push(self.runtime.clone());
        parts.join("  ")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::messages::Locale;

    fn en() -> &'static Messages {
        Locale::En.messages()
    }

    #[test]
    fn test_format_runtime_hours_minutes() {
        assert_eq!(format_runtime(Some(150), en()), "2h 30m");
        assert_eq!(format_runtime(Some(139), en()), "2h 19m");
        assert_eq!(format_runtime(Some(45), en()), "0h 45m");
    }

    #[test]
    fn test_format_runtime_turkish_suffixes() {
        assert_eq!(format_runtime(Some(150), Locale::Tr.messages()), "2s 30d");
    }

    #[test]
    fn test_format_runtime_missing() {
        assert_eq!(format_runtime(None, en()), "N/A");
        assert_eq!(format_runtime(Some(0), en()), "N/A");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(8.433, en()), "8.4");
        assert_eq!(format_rating(7.25, en()), "7.2");
        assert_eq!(format_rating(0.0, en()), "N/A");
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(Some("1999-10-15")), Some(1999));
        assert_eq!(release_year(Some("")), None);
        assert_eq!(release_year(None), None);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdefghij", 5), "abcd\u{2026}");
        assert_eq!(truncate_chars("şğüöçı", 3), "şğ\u{2026}");
    }

    #[test]
    fn test_card_label() {
        assert_eq!(
            card_label("Fight Club", 8.433, Some("1999-10-15"), en()),
            "Fight Club (1999) \u{2605} 8.4"
        );
        assert_eq!(
            card_label("Untitled", 0.0, Some(""), en()),
            "Untitled \u{2605} N/A"
        );
    }

    #[test]
    fn test_detail_view_from_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/tmdb/movie_details_550.json");
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();

        // Act
        let view = MovieDetailView::new(&details, en());

        // Assert
        assert_eq!(view.title, "Fight Club");
        assert_eq!(view.rating, "8.4");
        assert_eq!(view.year, Some(1999));
        assert_eq!(view.runtime, "2h 19m");
        assert_eq!(view.original_title, None);
        assert_eq!(view.original_language.as_deref(), Some("EN"));
        assert_eq!(view.companies.len(), 3);
        assert_eq!(view.genres, vec![String::from("Drama")]);
        assert_eq!(view.quick_info(), "\u{2605} 8.4  1999  2h 19m");
        assert!(
            view.poster_url
                .unwrap()
                .ends_with("/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
    }

    #[test]
    fn test_entry_from_details_projection() {
        // Arrange
        let json = include_str!("../../../fixtures/tmdb/movie_details_550.json");
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();

        // Act
        let entry = entry_from_details(&details);

        // Assert
        assert_eq!(entry.id, 550);
        assert_eq!(entry.title, "Fight Club");
        assert_eq!(entry.release_date.as_deref(), Some("1999-10-15"));
    }
}

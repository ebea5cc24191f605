//! Image and trailer URL helpers.

use std::fmt;

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Base URL for `YouTube` watch pages.
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Image size variants used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Poster size (`w500`).
    Poster,
    /// Backdrop size (`original`).
    Backdrop,
    /// Cast profile size (`w185`).
    Profile,
}

impl ImageSize {
    /// Size segment used in the CDN path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poster => "w500",
            Self::Backdrop => "original",
            Self::Profile => "w185",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a full image URL from a TMDB image path (e.g. `/abc.jpg`).
///
/// Returns `None` when the path is missing or empty.
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{IMAGE_BASE_URL}{size}{path}"))
}

/// Builds a `YouTube` watch URL for a video key.
#[must_use]
pub fn youtube_url(key: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_poster() {
        assert_eq!(
            image_url(Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"), ImageSize::Poster).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
    }

    #[test]
    fn test_image_url_backdrop_original() {
        assert_eq!(
            image_url(Some("/b.jpg"), ImageSize::Backdrop).as_deref(),
            Some("https://image.tmdb.org/t/p/original/b.jpg")
        );
    }

    #[test]
    fn test_image_url_missing_path() {
        assert!(image_url(None, ImageSize::Poster).is_none());
        assert!(image_url(Some(""), ImageSize::Profile).is_none());
    }

    #[test]
    fn test_youtube_url() {
        assert_eq!(
            youtube_url("qtRKdVHc-cE"),
            "https://www.youtube.com/watch?v=qtRKdVHc-cE"
        );
    }
}

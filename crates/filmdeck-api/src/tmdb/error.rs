//! Typed TMDB failures that callers need to tell apart.

/// Distinguished TMDB API failures.
///
/// Transport and decode failures stay plain `anyhow` context chains; only the
/// cases a view reacts to differently get a variant here.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404 / TMDB code 34).
    #[error("TMDB resource not found: {path}")]
    NotFound {
        /// Request path relative to the API base URL.
        path: String,
    },
    /// Any other non-success HTTP response.
    #[error("TMDB API error (HTTP {status}): code={code}, message={message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_code` (0 when the body was not a TMDB error).
        code: u32,
        /// TMDB `status_message` or the raw body.
        message: String,
    },
}

impl ApiError {
    /// Returns `true` if any error in the chain is [`ApiError::NotFound`].
    #[must_use]
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        err.chain()
            .any(|cause| matches!(cause.downcast_ref::<Self>(), Some(Self::NotFound { .. })))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn test_is_not_found_through_context() {
        // Arrange
        let result: anyhow::Result<()> = Err(ApiError::NotFound {
            path: String::from("movie/0"),
        }
        .into());

        // Act
        let err = result.context("failed to load movie").unwrap_err();

        // Assert
        assert!(ApiError::is_not_found(&err));
    }

    #[test]
    fn test_status_is_not_not_found() {
        // Arrange
        let err = anyhow::Error::from(ApiError::Status {
            status: 401,
            code: 7,
            message: String::from("Invalid API key"),
        });

        // Act & Assert
        assert!(!ApiError::is_not_found(&err));
        assert!(err.to_string().contains("HTTP 401"));
    }
}

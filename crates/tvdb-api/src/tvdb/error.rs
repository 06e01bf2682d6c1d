//! Errors reported by the server inside a decoded response.

use super::types::Language;

/// An error the API reported in the body of an otherwise decoded response.
///
/// Transport and decode failures are not represented here; they reach the
/// caller as the underlying `reqwest::Error` / `serde_json::Error` inside the
/// `anyhow` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// Login was rejected.
    Login(String),
    /// `GET /languages` reported an error.
    Languages {
        /// Server message.
        message: String,
        /// Languages decoded alongside the error; may be partial or empty.
        data: Vec<Language>,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login(message) => write!(f, "TVDB login rejected: {message}"),
            Self::Languages { message, .. } => {
                write!(f, "TVDB API error (languages): {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn test_display_login() {
        // Arrange
        let error = ApiError::Login(String::from("Not Authorized"));

        // Act & Assert
        assert_eq!(error.to_string(), "TVDB login rejected: Not Authorized");
    }

    #[test]
    fn test_display_languages() {
        // Arrange
        let error = ApiError::Languages {
            message: String::from("x"),
            data: Vec::new(),
        };

        // Act & Assert
        assert_eq!(error.to_string(), "TVDB API error (languages): x");
    }
}

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Terminal error: {message}")]
    TerminalError { message: String },
}

impl ReviewerError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ReviewerError::IoError(e) => format!("Could not read or write a file: {}", e),
            ReviewerError::HttpClientError(e) => format!("Could not set up the HTTP client: {}", e),
            ReviewerError::ConfigError { message } => format!("Configuration problem: {}", message),
            ReviewerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ReviewerError::TerminalError { message } => format!("Terminal problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReviewerError::IoError(_) => "Check that the path exists and is readable",
            ReviewerError::HttpClientError(_) => "Check the TLS setup of this machine",
            ReviewerError::ConfigError { .. } | ReviewerError::InvalidConfigValueError { .. } => {
                "Fix the flag, environment variable or config file and run again"
            }
            ReviewerError::TerminalError { .. } => "Run inside an interactive terminal or use --file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewerError>;

/// Coarse classification of a failed review call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    NotFound,
    Server,
    Offline,
    Other,
}

/// Why a review call did not produce a review. Never escapes the controller:
/// it always ends up rendered into the review pane.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewFailure {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    #[error("service unreachable: {0}")]
    Offline(String),

    #[error("{0}")]
    Other(String),
}

pub const REVIEW_ERROR_HEADING: &str = "## ⚠️ Review Error";

impl ReviewFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ReviewFailure::Timeout(_) => FailureKind::Timeout,
            ReviewFailure::NotFound { .. } => FailureKind::NotFound,
            ReviewFailure::Server { .. } => FailureKind::Server,
            ReviewFailure::Offline(_) => FailureKind::Offline,
            ReviewFailure::Other(_) => FailureKind::Other,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReviewFailure::Timeout(_) => "Request timed out. Please try again with shorter code or check your connection.".to_string(),
            ReviewFailure::NotFound { url } => format!(
                "API endpoint not found (`{}`). Please check if the backend server is running.",
                url
            ),
            ReviewFailure::Server { status } => format!(
                "Server error occurred (HTTP {}). Please try again later.",
                status
            ),
            ReviewFailure::Offline(_) => {
                "No internet connection. Please check your network and try again.".to_string()
            }
            ReviewFailure::Other(message) => format!("Could not get review: {}", message),
        }
    }

    /// Markdown shown in the review pane in place of a review.
    pub fn to_markdown(&self) -> String {
        format!("{}\n\n{}", REVIEW_ERROR_HEADING, self.user_friendly_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_markdown_has_heading() {
        let failure = ReviewFailure::Other("boom".to_string());
        let markdown = failure.to_markdown();
        assert!(markdown.starts_with(REVIEW_ERROR_HEADING));
        assert!(markdown.ends_with("Could not get review: boom"));
    }

    #[test]
    fn test_not_found_mentions_endpoint() {
        let failure = ReviewFailure::NotFound {
            url: "http://localhost:3000/ai/get-review".to_string(),
        };
        assert_eq!(failure.kind(), FailureKind::NotFound);
        let message = failure.user_friendly_message();
        assert!(message.contains("endpoint not found"));
        assert!(message.contains("http://localhost:3000/ai/get-review"));
    }

    #[test]
    fn test_server_message() {
        let failure = ReviewFailure::Server { status: 503 };
        assert_eq!(failure.kind(), FailureKind::Server);
        assert!(failure.user_friendly_message().contains("Server error"));
        assert!(failure.user_friendly_message().contains("503"));
    }

    #[test]
    fn test_timeout_message() {
        let failure = ReviewFailure::Timeout(Duration::from_secs(30));
        assert_eq!(failure.kind(), FailureKind::Timeout);
        assert!(failure.to_markdown().contains("timed out"));
    }

    #[test]
    fn test_config_error_suggestion() {
        let err = ReviewerError::ConfigError {
            message: "missing".to_string(),
        };
        assert!(err.user_friendly_message().contains("missing"));
        assert!(err.recovery_suggestion().contains("config"));
    }
}

//! Result and error types for qa-probe.

use thiserror::Error;

/// Result type for qa-probe operations
pub type QaResult<T> = Result<T, QaError>;

/// Errors raised while driving the page or asserting against it
#[derive(Debug, Error)]
pub enum QaError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched the selector
    #[error("No element matches selector '{selector}'")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waited_for: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// A before/after hook failed
    #[error("{hook} hook failed: {message}")]
    HookFailed {
        /// Hook name
        hook: String,
        /// Error message
        message: String,
    },

    /// Script evaluation in the page failed
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl QaError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is an expected-value mismatch rather than a fault
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_error_display() {
        let err = QaError::assertion("expected 0, got 2");
        assert!(err.is_assertion());
        assert_eq!(err.to_string(), "Assertion failed: expected 0, got 2");
    }

    #[test]
    fn test_timeout_display_names_condition() {
        let err = QaError::Timeout {
            ms: 5000,
            waited_for: "body text".to_string(),
        };
        assert!(err.to_string().contains("5000ms"));
        assert!(err.to_string().contains("body text"));
        assert!(!err.is_assertion());
    }

    #[test]
    fn test_hook_failed_display() {
        let err = QaError::HookFailed {
            hook: "after".to_string(),
            message: "list not empty".to_string(),
        };
        assert_eq!(err.to_string(), "after hook failed: list not empty");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: QaError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}

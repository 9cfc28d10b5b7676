//! Result and error types for Pagewright.
//!
//! Two kinds of failure reach a scenario step:
//!
//! - **Assertion failures** (`AssertionFailed`): an expected condition on the
//!   page was not met within the allotted wait.
//! - **Driver failures** (`Driver`, `NoSuchElement`): the browser round trip
//!   itself failed. These are never handled locally.

use thiserror::Error;

/// Result type for Pagewright operations
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while driving page components
#[derive(Debug, Error)]
pub enum PageError {
    /// An expected condition was not met
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Driver round trip failed
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// The driver could not locate any node for a locator
    #[error("No element found for {locator}")]
    NoSuchElement {
        /// Rendered locator
        locator: String,
    },

    /// A date string did not have the mm/dd/yyyy shape
    #[error("Invalid date '{value}': expected mm/dd/yyyy")]
    InvalidDate {
        /// Offending input
        value: String,
    },

    /// Configuration could not be loaded
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

impl PageError {
    /// Build an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Build a driver communication error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this error is an assertion failure rather than a driver fault
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_display() {
        let err = PageError::assertion("the dropdown does not contain the option: A");
        assert_eq!(
            err.to_string(),
            "Assertion failed: the dropdown does not contain the option: A"
        );
        assert!(err.is_assertion());
    }

    #[test]
    fn test_driver_errors_are_not_assertions() {
        assert!(!PageError::driver("socket closed").is_assertion());
        let missing = PageError::NoSuchElement {
            locator: "css selector `#x`".to_string(),
        };
        assert!(!missing.is_assertion());
        assert!(missing.to_string().contains("#x"));
    }

    #[test]
    fn test_from_json_error() {
        let err: PageError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PageError::Json(_)));
    }
}

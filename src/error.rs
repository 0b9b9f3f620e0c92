//! Error types for markup highlighting

use thiserror::Error;

/// Result type alias for markup operations
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Markup engine error types
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern for rule '{rule}': {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid range {start}..{end} (buffer length {len})")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Host buffer is not available")]
    HostUnavailable,

    #[error("Unknown markup mode: {0}")]
    UnknownMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let err = MarkupError::InvalidRange { start: 5, end: 2, len: 10 };
        assert_eq!(err.to_string(), "Invalid range 5..2 (buffer length 10)");
    }

    #[test]
    fn test_pattern_error_names_rule() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = MarkupError::Pattern { rule: "bold".to_string(), source };
        assert!(err.to_string().starts_with("Invalid pattern for rule 'bold'"));
    }
}

//! Unified error type for prayer-time lookups.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Source text did not parse, or parsed into something other than an object.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A strict lookup found nothing for the requested key.
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the `InvalidData` kind.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Error::InvalidData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_display_keeps_detail() {
        let err = Error::InvalidData("Failed to parse JSON: key must be a string".into());
        assert!(err.is_invalid_data());
        assert_eq!(
            err.to_string(),
            "Invalid data: Failed to parse JSON: key must be a string"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(!err.is_invalid_data());
    }
}

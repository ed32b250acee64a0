use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read dataset at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data structure: missing required section `{0}`")]
    MissingSection(&'static str),

    #[error("Invalid section `{section}`: {reason}")]
    InvalidSection {
        section: &'static str,
        reason: String,
    },

    #[error("Dataset contains no heroes")]
    EmptyRoster,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a finite number, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidCapacity { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_section_message_names_section() {
        let err = DataError::MissingSection("matchup_data");
        assert!(err.to_string().contains("matchup_data"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DataError = json_err.into();
        assert!(matches!(err, DataError::Json(_)));
    }
}

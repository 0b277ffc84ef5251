use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Query rejected with status {status}")]
    QueryRejected {
        status: u16,
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Jira credentials not found in the environment: {0}")]
    CredentialsMissing(String),

    #[error("Invalid field path `{path}`: {reason}")]
    InvalidFieldPath { path: String, reason: String },

    #[error("Invalid value format `{template}`: {reason}")]
    InvalidFormat { template: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejected_display_contains_status() {
        let err = Error::QueryRejected {
            status: 400,
            errors: vec!["The value 'NOPE' does not exist for the field 'project'.".to_string()],
            warnings: Vec::new(),
        };

        assert_eq!(err.to_string(), "Query rejected with status 400");
    }

    #[test]
    fn test_invalid_field_path_display() {
        let err = Error::InvalidFieldPath {
            path: "fields..status".to_string(),
            reason: "empty key".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Invalid field path `fields..status`: empty key"
        );
    }
}

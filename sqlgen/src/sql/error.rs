//! Error type for SQL generation
//!
//! Every failure here is deterministic: either the caller asked a dialect for a
//! capability it lacks, or an input failed validation. Nothing is transient and
//! nothing is retried.

use thiserror::Error;

/// Error type for SQL builder operations
#[derive(Error, Debug)]
pub enum SqlError {
    /// The dialect does not support the requested statement family
    #[error("Operation '{operation}' is not supported by {dialect}")]
    Unsupported {
        dialect: &'static str,
        operation: &'static str,
    },

    /// Connection URL missing, blank, or with the wrong scheme
    #[error("Invalid connection URL: {0}")]
    InvalidConnectionUrl(String),

    /// Timestamp could not be parsed as an ISO local date-time
    #[error("Invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Table descriptor violates an invariant
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Index descriptor violates an invariant
    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    /// Blank or otherwise unusable builder argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SqlError {
    /// Create an unsupported-operation error
    pub fn unsupported(dialect: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { dialect, operation }
    }

    /// Create a connection URL error
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidConnectionUrl(reason.into())
    }

    /// Check if this is a capability-absence error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_error_display() {
        let err = SqlError::unsupported("clickhouse", "vacuum_table");
        assert_eq!(
            err.to_string(),
            "Operation 'vacuum_table' is not supported by clickhouse"
        );
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_invalid_url_error_display() {
        let err = SqlError::invalid_url("connection URL must not be blank");
        assert_eq!(
            err.to_string(),
            "Invalid connection URL: connection URL must not be blank"
        );
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_invalid_timestamp_keeps_source() {
        use std::error::Error as _;

        let source = chrono::NaiveDateTime::parse_from_str("nope", "%Y-%m-%dT%H:%M:%S%.f")
            .unwrap_err();
        let err = SqlError::InvalidTimestamp {
            value: "nope".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid timestamp 'nope'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let err = SqlError::InvalidTable("bad".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidTable"));
    }
}

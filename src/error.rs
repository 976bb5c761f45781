//! Error type shared by the catalog, query builder, assembler and pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Unknown vintage: {0}")]
    UnknownVintage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Schema conflict: table {0} already exists (use --drop to replace it)")]
    SchemaConflict(String),

    #[error("Identifier rejected before SQL interpolation: {0:?}")]
    IdentifierInjectionRisk(String),

    #[error("Missing source data: {0}")]
    MissingSource(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unexpected value in result set: {0}")]
    UnexpectedValue(String),

    #[error("Column mismatch: schema declares {expected} columns, row carries {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AggregateError {
    /// Whether the pipeline may log this error and move on to the next
    /// combination instead of aborting the run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            AggregateError::UnknownVintage(_) | AggregateError::MissingSource(_)
        )
    }
}

impl From<rusqlite::Error> for AggregateError {
    fn from(err: rusqlite::Error) -> Self {
        let message = err.to_string();
        if message.contains("no such table") || message.contains("no such column") {
            AggregateError::MissingSource(message)
        } else {
            AggregateError::Database(message)
        }
    }
}

pub type AggregateResult<T> = Result<T, AggregateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skippable_kinds() {
        assert!(AggregateError::UnknownVintage("2011".into()).is_skippable());
        assert!(AggregateError::MissingSource("no such table: x".into()).is_skippable());
        assert!(!AggregateError::Database("disk I/O error".into()).is_skippable());
        assert!(!AggregateError::SchemaConflict("out".into()).is_skippable());
        assert!(!AggregateError::InvalidConfiguration("flags".into()).is_skippable());
    }

    #[test]
    fn test_missing_table_maps_to_missing_source() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err: AggregateError = conn
            .prepare("SELECT walk_t FROM hcr_journeys_t_d_2099")
            .unwrap_err()
            .into();
        assert!(matches!(err, AggregateError::MissingSource(_)));
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: AggregateError = serde_json::from_str::<u16>("walk_t").unwrap_err().into();
        assert!(matches!(err, AggregateError::Serialization(_)));
        assert!(!err.is_skippable());
    }
}

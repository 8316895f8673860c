//! Error types for the quality assessment engine.
//!
//! Every failure the engine can report is a [`QualityError`]. Errors are
//! serializable so the boundary layer can hand them to clients as
//! `{ "code": ..., "message": ... }` without further mapping.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the quality assessment engine.
#[derive(Error, Debug)]
pub enum QualityError {
    /// Malformed or out-of-range input (bad CSV, wrong file type, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A quality threshold outside `[0, 1]` was supplied.
    #[error("Invalid quality threshold {0} (must be between 0.0 and 1.0)")]
    InvalidThreshold(f64),

    /// The uploaded content was empty.
    #[error("Uploaded file '{0}' is empty")]
    EmptyUpload(String),

    /// Unexpected failure while profiling or scoring a dataset.
    #[error("Failed to assess dataset: {0}")]
    Computation(String),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<QualityError>,
    },
}

impl QualityError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        QualityError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for the boundary layer.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidThreshold(_) => "INVALID_THRESHOLD",
            Self::EmptyUpload(_) => "EMPTY_UPLOAD",
            Self::Computation(_) => "COMPUTATION_FAILED",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the caller sent bad input (as opposed to an internal failure).
    ///
    /// Validation errors are reported back as rejected requests; everything
    /// else is a generic failure that gets logged.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) | Self::InvalidThreshold(_) | Self::EmptyUpload(_) => true,
            Self::WithContext { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for QualityError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("QualityError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for quality assessment operations.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| QualityError::Computation(e.to_string()).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            QualityError::Validation("bad".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(QualityError::InvalidThreshold(1.5).error_code(), "INVALID_THRESHOLD");
    }

    #[test]
    fn test_is_validation() {
        assert!(QualityError::InvalidThreshold(-0.1).is_validation());
        assert!(QualityError::EmptyUpload("a.csv".to_string()).is_validation());
        assert!(!QualityError::Computation("boom".to_string()).is_validation());
    }

    #[test]
    fn test_error_serialization() {
        let error = QualityError::InvalidThreshold(2.0);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("INVALID_THRESHOLD"));
        assert!(json.contains("must be between 0.0 and 1.0"));
    }

    #[test]
    fn test_with_context_preserves_code_and_kind() {
        let error = QualityError::Validation("no header".to_string()).with_context("Reading data.csv");
        assert!(error.to_string().contains("Reading data.csv"));
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert!(error.is_validation());
    }

    #[test]
    fn test_polars_context_maps_to_computation() {
        let result: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ComputeError("overflow".into()),
        );
        let error = result.context("Profiling column 'x'").unwrap_err();
        assert_eq!(error.error_code(), "COMPUTATION_FAILED");
        assert!(!error.is_validation());
    }
}

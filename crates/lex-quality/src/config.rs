//! Configuration for the quality assessment service.
//!
//! Only request-facing defaults live here. The heuristics that decide flags
//! and scores are fixed in [`crate::policy`].

use crate::policy::{DEFAULT_BENCHMARK_CAPACITY, DEFAULT_QUALITY_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Configuration for [`QualityService`](crate::service::QualityService).
///
/// Use [`AssessmentConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::config::AssessmentConfig;
///
/// let config = AssessmentConfig::builder()
///     .default_quality_threshold(0.8)
///     .benchmark_capacity(500)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Quality threshold used when a caller does not pass one (0.0 - 1.0).
    /// Default: 0.7
    pub default_quality_threshold: f64,

    /// Maximum number of records the benchmark store retains.
    /// Oldest records are evicted first once the store is full.
    /// Default: 10 000
    pub benchmark_capacity: usize,

    /// Whether full reports include the correlation matrix by default.
    /// Default: false
    pub include_correlation: bool,

    /// Whether full reports include top categories by default.
    /// Default: false
    pub include_categories: bool,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            default_quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            benchmark_capacity: DEFAULT_BENCHMARK_CAPACITY,
            include_correlation: false,
            include_categories: false,
        }
    }
}

impl AssessmentConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AssessmentConfigBuilder {
        AssessmentConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.default_quality_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "default_quality_threshold".to_string(),
                value: self.default_quality_threshold,
            });
        }

        if self.benchmark_capacity == 0 {
            return Err(ConfigValidationError::InvalidBenchmarkCapacity(
                self.benchmark_capacity,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid benchmark capacity: {0} (must be at least 1)")]
    InvalidBenchmarkCapacity(usize),
}

/// Builder for [`AssessmentConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AssessmentConfigBuilder {
    default_quality_threshold: Option<f64>,
    benchmark_capacity: Option<usize>,
    include_correlation: Option<bool>,
    include_categories: Option<bool>,
}

impl AssessmentConfigBuilder {
    /// Set the quality threshold applied when a request omits one.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0
    pub fn default_quality_threshold(mut self, threshold: f64) -> Self {
        self.default_quality_threshold = Some(threshold);
        self
    }

    /// Set how many processed-file records the benchmark store keeps.
    pub fn benchmark_capacity(mut self, capacity: usize) -> Self {
        self.benchmark_capacity = Some(capacity);
        self
    }

    /// Include the correlation matrix in full reports by default.
    pub fn include_correlation(mut self, include: bool) -> Self {
        self.include_correlation = Some(include);
        self
    }

    /// Include top categories in full reports by default.
    pub fn include_categories(mut self, include: bool) -> Self {
        self.include_categories = Some(include);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AssessmentConfig` or an error if validation fails.
    pub fn build(self) -> Result<AssessmentConfig, ConfigValidationError> {
        let config = AssessmentConfig {
            default_quality_threshold: self
                .default_quality_threshold
                .unwrap_or(DEFAULT_QUALITY_THRESHOLD),
            benchmark_capacity: self.benchmark_capacity.unwrap_or(DEFAULT_BENCHMARK_CAPACITY),
            include_correlation: self.include_correlation.unwrap_or(false),
            include_categories: self.include_categories.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssessmentConfig::default();
        assert_eq!(config.default_quality_threshold, 0.7);
        assert_eq!(config.benchmark_capacity, 10_000);
        assert!(!config.include_correlation);
        assert!(!config.include_categories);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AssessmentConfig::builder()
            .default_quality_threshold(0.9)
            .benchmark_capacity(3)
            .include_correlation(true)
            .build()
            .unwrap();

        assert_eq!(config.default_quality_threshold, 0.9);
        assert_eq!(config.benchmark_capacity, 3);
        assert!(config.include_correlation);
        assert!(!config.include_categories);
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = AssessmentConfig::builder()
            .default_quality_threshold(1.5)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_zero_capacity() {
        let result = AssessmentConfig::builder().benchmark_capacity(0).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBenchmarkCapacity(0)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "default_quality_threshold": 0.5,
            "benchmark_capacity": 50,
            "include_correlation": true,
            "include_categories": true
        }"#;

        let config: AssessmentConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.default_quality_threshold, 0.5);
        assert_eq!(config.benchmark_capacity, 50);
        assert!(config.include_correlation);
        assert!(config.include_categories);
        assert!(config.validate().is_ok());
    }
}

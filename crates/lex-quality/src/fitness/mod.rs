//! Model fitness evaluation.
//!
//! Maps quality flags onto per-family verdicts:
//!
//! | Family           | Unfit when                                              |
//! |------------------|---------------------------------------------------------|
//! | `regression`     | constant columns, or a column above the missing cutoff  |
//! | `classification` | suspicious identifier duplicates, or the missing cutoff |
//! | `clustering`     | constant columns, or any missing value                  |
//! | `neural_network` | quality score below the caller's threshold              |
//!
//! An empty dataset is unfit for every family.

use crate::error::{QualityError, Result};
use crate::policy::HIGH_MISSING_SHARE;
use crate::types::{ModelFitness, QualityFlags};

/// Evaluates model-family fitness from quality flags.
pub struct ModelFitnessEvaluator;

impl ModelFitnessEvaluator {
    /// Reject thresholds outside `[0, 1]` (including NaN).
    pub fn validate_threshold(quality_threshold: f64) -> Result<()> {
        if (0.0..=1.0).contains(&quality_threshold) {
            Ok(())
        } else {
            Err(QualityError::InvalidThreshold(quality_threshold))
        }
    }

    pub fn evaluate(flags: &QualityFlags, quality_threshold: f64) -> Result<ModelFitness> {
        Self::validate_threshold(quality_threshold)?;

        if flags.empty_dataset {
            return Ok(ModelFitness::unfit());
        }

        let missing_too_high = flags.max_missing_share > HIGH_MISSING_SHARE;

        Ok(ModelFitness {
            regression: !flags.has_constant_columns && !missing_too_high,
            classification: !flags.has_suspicious_id_duplicates && !missing_too_high,
            clustering: !flags.has_constant_columns && !flags.has_missing_values,
            neural_network: flags.quality_score >= quality_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelFamily;

    fn clean_flags() -> QualityFlags {
        QualityFlags {
            has_missing_values: false,
            has_constant_columns: false,
            has_suspicious_id_duplicates: false,
            too_few_rows: true,
            too_many_columns: false,
            too_many_missing: false,
            empty_dataset: false,
            max_missing_share: 0.0,
            constant_columns: Vec::new(),
            suspicious_id_columns: Vec::new(),
            quality_score: 1.0,
        }
    }

    #[test]
    fn test_clean_data_fits_everything() {
        let fitness = ModelFitnessEvaluator::evaluate(&clean_flags(), 0.7).unwrap();
        assert_eq!(fitness.fit_families(), ModelFamily::ALL.to_vec());
    }

    #[test]
    fn test_constant_columns_block_regression_and_clustering() {
        let flags = QualityFlags {
            has_constant_columns: true,
            quality_score: 0.85,
            ..clean_flags()
        };
        let fitness = ModelFitnessEvaluator::evaluate(&flags, 0.7).unwrap();

        assert!(!fitness.regression);
        assert!(fitness.classification);
        assert!(!fitness.clustering);
        assert!(fitness.neural_network);
    }

    #[test]
    fn test_id_duplicates_block_classification() {
        let flags = QualityFlags {
            has_suspicious_id_duplicates: true,
            quality_score: 0.8,
            ..clean_flags()
        };
        let fitness = ModelFitnessEvaluator::evaluate(&flags, 0.7).unwrap();

        assert!(fitness.regression);
        assert!(!fitness.classification);
        assert!(fitness.clustering);
    }

    #[test]
    fn test_high_missing_share() {
        let flags = QualityFlags {
            has_missing_values: true,
            too_many_missing: true,
            max_missing_share: 0.6,
            quality_score: 0.7,
            ..clean_flags()
        };
        let fitness = ModelFitnessEvaluator::evaluate(&flags, 0.7).unwrap();

        assert!(!fitness.regression);
        assert!(!fitness.classification);
        assert!(!fitness.clustering);
        assert!(fitness.neural_network);
    }

    #[test]
    fn test_any_missing_blocks_clustering_only() {
        let flags = QualityFlags {
            has_missing_values: true,
            max_missing_share: 0.1,
            quality_score: 0.95,
            ..clean_flags()
        };
        let fitness = ModelFitnessEvaluator::evaluate(&flags, 0.7).unwrap();

        assert!(fitness.regression);
        assert!(fitness.classification);
        assert!(!fitness.clustering);
    }

    #[test]
    fn test_neural_network_is_monotonic_in_threshold() {
        let flags = QualityFlags {
            quality_score: 0.62,
            ..clean_flags()
        };

        let mut previous = true;
        for step in 0..=100 {
            let threshold = step as f64 / 100.0;
            let verdict = ModelFitnessEvaluator::evaluate(&flags, threshold)
                .unwrap()
                .neural_network;
            assert!(previous || !verdict, "verdict flipped back to true at {}", threshold);
            previous = verdict;
        }
    }

    #[test]
    fn test_empty_dataset_is_unfit_even_at_zero_threshold() {
        let flags = QualityFlags {
            empty_dataset: true,
            quality_score: 0.0,
            ..clean_flags()
        };
        let fitness = ModelFitnessEvaluator::evaluate(&flags, 0.0).unwrap();
        assert_eq!(fitness, ModelFitness::unfit());
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        for threshold in [-0.01, 1.01, f64::NAN] {
            let err = ModelFitnessEvaluator::evaluate(&clean_flags(), threshold).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_THRESHOLD");
        }
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        assert!(ModelFitnessEvaluator::validate_threshold(0.0).is_ok());
        assert!(ModelFitnessEvaluator::validate_threshold(1.0).is_ok());
    }
}

//! Quality flags and the composite quality score.

use crate::policy::{
    CONSTANT_COLUMNS_PENALTY, HIGH_MISSING_SHARE, MAX_COLUMNS, MIN_ROWS, MISSING_PENALTY_WEIGHT,
    SUSPICIOUS_ID_PENALTY,
};
use crate::profiler::is_suspicious_identifier;
use crate::types::{DatasetSummary, MissingReport, QualityFlags};

/// Derives boolean quality flags and a scalar score.
pub struct QualityFlagEngine;

impl QualityFlagEngine {
    pub fn compute(summary: &DatasetSummary, missing: &MissingReport) -> QualityFlags {
        let empty_dataset = summary.is_empty();

        // A single row cannot show variation, so it never counts as constant.
        let constant_columns: Vec<String> = if summary.n_rows > 1 {
            summary
                .columns
                .iter()
                .filter(|col| col.unique <= 1)
                .map(|col| col.name.clone())
                .collect()
        } else {
            Vec::new()
        };

        let suspicious_id_columns: Vec<String> = summary
            .columns
            .iter()
            .filter(|col| is_suspicious_identifier(col))
            .map(|col| col.name.clone())
            .collect();

        let has_constant_columns = !constant_columns.is_empty();
        let has_suspicious_id_duplicates = !suspicious_id_columns.is_empty();

        let quality_score = if empty_dataset {
            0.0
        } else {
            Self::score(
                missing.overall_missing_share,
                has_constant_columns,
                has_suspicious_id_duplicates,
            )
        };

        QualityFlags {
            has_missing_values: missing.has_any_missing,
            has_constant_columns,
            has_suspicious_id_duplicates,
            too_few_rows: summary.n_rows < MIN_ROWS,
            too_many_columns: summary.n_cols > MAX_COLUMNS,
            too_many_missing: missing.max_missing_share > HIGH_MISSING_SHARE,
            empty_dataset,
            max_missing_share: missing.max_missing_share,
            constant_columns,
            suspicious_id_columns,
            quality_score,
        }
    }

    /// Start at 1.0 and subtract the fixed penalties; clamp to `[0, 1]`.
    fn score(overall_missing_share: f64, constant: bool, suspicious_ids: bool) -> f64 {
        let mut score = 1.0 - MISSING_PENALTY_WEIGHT * overall_missing_share;
        if constant {
            score -= CONSTANT_COLUMNS_PENALTY;
        }
        if suspicious_ids {
            score -= SUSPICIOUS_ID_PENALTY;
        }
        score.clamp(0.0, 1.0)
    }
}

//! Missing-value analysis.

use crate::policy::HIGH_MISSING_SHARE;
use crate::types::{ColumnMissing, DatasetSummary, MissingReport};
use std::collections::BTreeMap;

/// Quantifies missing-value patterns from column profiles.
pub struct MissingAnalyzer;

impl MissingAnalyzer {
    pub fn analyze(summary: &DatasetSummary) -> MissingReport {
        let missing_by_column: BTreeMap<String, ColumnMissing> = summary
            .columns
            .iter()
            .map(|col| {
                (
                    col.name.clone(),
                    ColumnMissing {
                        missing_count: col.missing,
                        missing_share: col.missing_share,
                    },
                )
            })
            .collect();

        let total_missing_cells: usize = summary.columns.iter().map(|col| col.missing).sum();

        let high_missing_columns = summary
            .columns
            .iter()
            .filter(|col| col.missing_share > HIGH_MISSING_SHARE)
            .map(|col| col.name.clone())
            .collect();

        let total_cells = summary.n_rows.saturating_mul(summary.n_cols);
        let overall_missing_share = if total_cells > 0 {
            total_missing_cells as f64 / total_cells as f64
        } else {
            0.0
        };

        let max_missing_share = summary
            .columns
            .iter()
            .map(|col| col.missing_share)
            .fold(0.0, f64::max);

        MissingReport {
            missing_by_column,
            total_missing_cells,
            high_missing_columns,
            has_any_missing: total_missing_cells > 0,
            overall_missing_share,
            max_missing_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::DatasetProfiler;
    use polars::prelude::*;

    #[test]
    fn test_missing_report_counts() {
        let df = df![
            "age" => [Some(10i64), Some(20), Some(30), None],
            "height" => [140i64, 150, 160, 170],
            "city" => [Some("A"), None, None, None],
        ]
        .unwrap();
        let summary = DatasetProfiler::profile_dataset(&df).unwrap();
        let report = MissingAnalyzer::analyze(&summary);

        assert_eq!(report.missing_by_column["age"].missing_count, 1);
        assert_eq!(report.missing_by_column["age"].missing_share, 0.25);
        assert_eq!(report.missing_by_column["height"].missing_count, 0);
        assert_eq!(report.total_missing_cells, 4);
        assert_eq!(report.high_missing_columns, vec!["city".to_string()]);
        assert!(report.has_any_missing);
        assert_eq!(report.max_missing_share, 0.75);
        assert!((report.overall_missing_share - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_equals_sum_of_columns() {
        let df = df![
            "a" => [None::<i64>, Some(1), None],
            "b" => [Some("x"), None, Some("y")],
        ]
        .unwrap();
        let summary = DatasetProfiler::profile_dataset(&df).unwrap();
        let report = MissingAnalyzer::analyze(&summary);

        let sum: usize = report.missing_by_column.values().map(|m| m.missing_count).sum();
        assert_eq!(report.total_missing_cells, sum);
    }

    #[test]
    fn test_exactly_half_missing_is_not_high() {
        let df = df!["a" => [None::<i64>, Some(1)]].unwrap();
        let summary = DatasetProfiler::profile_dataset(&df).unwrap();
        let report = MissingAnalyzer::analyze(&summary);

        assert!(report.high_missing_columns.is_empty());
    }

    #[test]
    fn test_no_missing_values() {
        let df = df!["a" => [1i64, 2, 3]].unwrap();
        let summary = DatasetProfiler::profile_dataset(&df).unwrap();
        let report = MissingAnalyzer::analyze(&summary);

        assert!(!report.has_any_missing);
        assert_eq!(report.total_missing_cells, 0);
        assert_eq!(report.overall_missing_share, 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        let summary = DatasetSummary {
            n_rows: 0,
            n_cols: 0,
            columns: Vec::new(),
        };
        let report = MissingAnalyzer::analyze(&summary);

        assert!(report.missing_by_column.is_empty());
        assert!(!report.has_any_missing);
        assert_eq!(report.max_missing_share, 0.0);
    }
}

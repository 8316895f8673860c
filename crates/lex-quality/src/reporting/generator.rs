use crate::analysis::{CategoryAnalyzer, CorrelationEngine};
use crate::error::Result;
use crate::policy::{MAX_CATEGORY_COLUMNS, POLICY_VERSION, TOP_K_CATEGORIES};
use crate::types::{
    CategoryCount, CorrelationMatrix, DatasetSummary, MissingReport, QualityFlags,
};
use crate::utils::round_to;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// Report Types
// ============================================================================

/// Full quality report for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReport {
    pub filename: String,
    pub policy_version: String,
    pub dataset: DatasetShape,
    pub quality: QualitySection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<String, Vec<CategoryCount>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySection {
    /// Quality score rounded to 2 decimals.
    pub score: f64,
    pub flags: QualityFlags,
    pub problems: Vec<Problem>,
}

/// Kind of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    ConstantColumns,
    IdDuplicates,
    HighMissing,
    EmptyDataset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

/// Human-readable problem derived from the quality flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    pub columns: Vec<String>,
    pub severity: Severity,
    pub description: String,
}

/// Which optional analyses a report should carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_correlation: bool,
    pub include_categories: bool,
}

// ============================================================================
// Report Assembler
// ============================================================================

/// Composes the full report from already-computed profiles and flags.
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(
        filename: &str,
        df: &DataFrame,
        summary: &DatasetSummary,
        missing: &MissingReport,
        flags: &QualityFlags,
        options: ReportOptions,
    ) -> Result<FullReport> {
        let correlation = if options.include_correlation {
            CorrelationEngine::compute(df, summary)?
        } else {
            None
        };

        let categories = if options.include_categories {
            Some(CategoryAnalyzer::top_categories(
                df,
                summary,
                MAX_CATEGORY_COLUMNS,
                TOP_K_CATEGORIES,
            )?)
        } else {
            None
        };

        let problems = Self::problems(flags, missing);
        debug!("Report for '{}' lists {} problems", filename, problems.len());

        Ok(FullReport {
            filename: filename.to_string(),
            policy_version: POLICY_VERSION.to_string(),
            dataset: DatasetShape {
                rows: summary.n_rows,
                columns: summary.n_cols,
            },
            quality: QualitySection {
                score: round_to(flags.quality_score, 2),
                flags: flags.clone(),
                problems,
            },
            correlation,
            categories,
        })
    }

    /// Problems implied by the flags, most fundamental first.
    pub fn problems(flags: &QualityFlags, missing: &MissingReport) -> Vec<Problem> {
        let mut problems = Vec::new();

        if flags.empty_dataset {
            problems.push(Problem {
                kind: ProblemKind::EmptyDataset,
                columns: Vec::new(),
                severity: Severity::High,
                description: "Dataset has no rows or no columns".to_string(),
            });
        }

        if flags.has_constant_columns {
            problems.push(Problem {
                kind: ProblemKind::ConstantColumns,
                columns: flags.constant_columns.clone(),
                severity: Severity::Medium,
                description: format!(
                    "Constant columns carry no information: {}",
                    flags.constant_columns.join(", ")
                ),
            });
        }

        if flags.has_suspicious_id_duplicates {
            problems.push(Problem {
                kind: ProblemKind::IdDuplicates,
                columns: flags.suspicious_id_columns.clone(),
                severity: Severity::High,
                description: format!(
                    "Identifier columns contain duplicate values: {}",
                    flags.suspicious_id_columns.join(", ")
                ),
            });
        }

        if !missing.high_missing_columns.is_empty() {
            problems.push(Problem {
                kind: ProblemKind::HighMissing,
                columns: missing.high_missing_columns.clone(),
                severity: Severity::High,
                description: format!(
                    "More than half of the values are missing in: {}",
                    missing.high_missing_columns.join(", ")
                ),
            });
        }

        problems
    }
}

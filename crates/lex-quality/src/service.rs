//! Operation contracts of the quality engine.
//!
//! [`QualityService`] is what a boundary layer (HTTP handlers, the CLI)
//! talks to. Each operation parses its input, runs the assessment stages
//! and returns a serializable response. The benchmark store is injected so
//! several services, or tests, can share or isolate history explicitly.
//!
//! ```text
//! Dataset → DatasetProfiler → MissingAnalyzer → QualityFlagEngine
//!                                                   │
//!                       ModelFitnessEvaluator ◄─────┤
//!                       ReportAssembler ◄───────────┘ → BenchmarkStore
//! ```

use crate::benchmark::{BenchmarkQueryResult, BenchmarkStore};
use crate::config::AssessmentConfig;
use crate::dataset::{RecordValue, dataset_from_record, load_csv_bytes};
use crate::error::{QualityError, Result};
use crate::fitness::ModelFitnessEvaluator;
use crate::policy::POLICY_VERSION;
use crate::profiler::DatasetProfiler;
use crate::quality::{MissingAnalyzer, QualityFlagEngine};
use crate::reporting::{FullReport, ReportAssembler, ReportOptions};
use crate::types::{
    ColumnMissing, ColumnProfile, DatasetSummary, MissingReport, ModelFitness,
    ProcessedFileRecord, QualityFlags,
};
use crate::utils::round_to;
use chrono::Utc;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Decimals kept for missing shares in responses.
const SHARE_DECIMALS: i32 = 4;

// ============================================================================
// Responses
// ============================================================================

/// Fitness verdicts for a record or a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub ok_for_model: ModelFitness,
    pub quality_score: f64,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagsResponse {
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    pub flags: QualityFlags,
    pub processing_time_sec: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub filename: String,
    pub dataset_info: DatasetInfo,
    pub columns: Vec<ColumnProfile>,
    pub processing_time_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingAnalysisResponse {
    pub filename: String,
    pub missing_by_column: BTreeMap<String, ColumnMissing>,
    pub total_missing_cells: usize,
    pub high_missing_columns: Vec<String>,
    pub has_any_missing: bool,
    pub processing_time_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReportResponse {
    pub report: FullReport,
    pub processing_time_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub policy_version: String,
}

// ============================================================================
// Service
// ============================================================================

/// Intermediate results shared by every operation.
struct Assessment {
    summary: DatasetSummary,
    missing: MissingReport,
    flags: QualityFlags,
}

/// Entry point for every quality operation.
pub struct QualityService {
    config: AssessmentConfig,
    benchmarks: Arc<BenchmarkStore>,
}

impl QualityService {
    /// Service with its own benchmark store sized from `config`.
    pub fn new(config: AssessmentConfig) -> Result<Self> {
        let benchmarks = Arc::new(BenchmarkStore::with_capacity(config.benchmark_capacity));
        Self::with_store(config, benchmarks)
    }

    /// Service writing to an existing benchmark store.
    pub fn with_store(config: AssessmentConfig, benchmarks: Arc<BenchmarkStore>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| QualityError::Validation(e.to_string()))?;
        debug!("Benchmark history capacity: {}", benchmarks.capacity());
        Ok(Self { config, benchmarks })
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn benchmark_store(&self) -> &Arc<BenchmarkStore> {
        &self.benchmarks
    }

    /// Report options taken from the configuration defaults.
    pub fn default_report_options(&self) -> ReportOptions {
        ReportOptions {
            include_correlation: self.config.include_correlation,
            include_categories: self.config.include_categories,
        }
    }

    /// Fitness verdicts for a single inline record.
    ///
    /// `quality_threshold` falls back to the configured default.
    pub fn evaluate_record(
        &self,
        data: &BTreeMap<String, RecordValue>,
        quality_threshold: Option<f64>,
    ) -> Result<EvaluationResponse> {
        let start = Instant::now();
        let threshold = quality_threshold.unwrap_or(self.config.default_quality_threshold);

        let result = ModelFitnessEvaluator::validate_threshold(threshold)
            .and_then(|_| dataset_from_record(data))
            .and_then(|df| self.evaluate_dataset(&df, threshold, start));
        observe("evaluate_record", "<record>", result)
    }

    /// Fitness verdicts for an uploaded CSV file.
    pub fn evaluate_file(
        &self,
        filename: &str,
        bytes: &[u8],
        quality_threshold: Option<f64>,
    ) -> Result<EvaluationResponse> {
        let start = Instant::now();
        let threshold = quality_threshold.unwrap_or(self.config.default_quality_threshold);

        let result = ModelFitnessEvaluator::validate_threshold(threshold)
            .and_then(|_| load_csv_bytes(filename, bytes))
            .and_then(|df| self.evaluate_dataset(&df, threshold, start));
        observe("evaluate_file", filename, result)
    }

    /// Quality flags for an uploaded CSV file. Appends to the benchmark history.
    pub fn flags_from_file(&self, filename: &str, bytes: &[u8]) -> Result<FlagsResponse> {
        let start = Instant::now();

        let result = load_csv_bytes(filename, bytes).and_then(|df| {
            let assessment = assess(&df)?;
            let processing_time_sec = elapsed_secs(start);

            let response = FlagsResponse {
                filename: filename.to_string(),
                rows: assessment.summary.n_rows,
                columns: assessment.summary.n_cols,
                flags: assessment.flags,
                processing_time_sec,
            };
            self.record(
                filename,
                response.rows,
                response.columns,
                response.flags.quality_score,
                processing_time_sec,
            );
            Ok(response)
        });
        observe("flags_from_file", filename, result)
    }

    /// Per-column profile of an uploaded CSV file.
    pub fn summary_from_file(&self, filename: &str, bytes: &[u8]) -> Result<SummaryResponse> {
        let start = Instant::now();

        let result = load_csv_bytes(filename, bytes).and_then(|df| {
            let summary = DatasetProfiler::profile_dataset(&df)?;
            Ok(SummaryResponse {
                filename: filename.to_string(),
                dataset_info: DatasetInfo {
                    rows: summary.n_rows,
                    columns: summary.n_cols,
                },
                columns: summary
                    .columns
                    .into_iter()
                    .map(|column| ColumnProfile {
                        missing_share: round_to(column.missing_share, SHARE_DECIMALS),
                        ..column
                    })
                    .collect(),
                processing_time_sec: elapsed_secs(start),
            })
        });
        observe("summary_from_file", filename, result)
    }

    /// Missing-value analysis of an uploaded CSV file.
    pub fn missing_analysis_from_file(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<MissingAnalysisResponse> {
        let start = Instant::now();

        let result = load_csv_bytes(filename, bytes).and_then(|df| {
            let summary = DatasetProfiler::profile_dataset(&df)?;
            let missing = MissingAnalyzer::analyze(&summary);
            Ok(MissingAnalysisResponse {
                filename: filename.to_string(),
                missing_by_column: missing
                    .missing_by_column
                    .into_iter()
                    .map(|(name, column)| {
                        let missing_share = round_to(column.missing_share, SHARE_DECIMALS);
                        (
                            name,
                            ColumnMissing {
                                missing_share,
                                ..column
                            },
                        )
                    })
                    .collect(),
                total_missing_cells: missing.total_missing_cells,
                high_missing_columns: missing.high_missing_columns,
                has_any_missing: missing.has_any_missing,
                processing_time_sec: elapsed_secs(start),
            })
        });
        observe("missing_analysis_from_file", filename, result)
    }

    /// Full report for an uploaded CSV file. Appends to the benchmark history.
    ///
    /// The history is only written once the report is complete, so a failed
    /// request never leaves a record behind.
    pub fn full_report_from_file(
        &self,
        filename: &str,
        bytes: &[u8],
        options: ReportOptions,
    ) -> Result<FullReportResponse> {
        let start = Instant::now();

        let result = load_csv_bytes(filename, bytes).and_then(|df| {
            let assessment = assess(&df)?;
            let report = ReportAssembler::assemble(
                filename,
                &df,
                &assessment.summary,
                &assessment.missing,
                &assessment.flags,
                options,
            )?;
            let processing_time_sec = elapsed_secs(start);

            self.record(
                filename,
                report.dataset.rows,
                report.dataset.columns,
                assessment.flags.quality_score,
                processing_time_sec,
            );
            Ok(FullReportResponse {
                report,
                processing_time_sec,
            })
        });
        observe("full_report_from_file", filename, result)
    }

    /// Recent benchmark records and aggregates. `limit` is clamped to `[1, 100]`.
    pub fn benchmark(&self, limit: i64) -> BenchmarkQueryResult {
        self.benchmarks.query(limit)
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            policy_version: POLICY_VERSION.to_string(),
        }
    }

    fn evaluate_dataset(
        &self,
        df: &DataFrame,
        threshold: f64,
        start: Instant,
    ) -> Result<EvaluationResponse> {
        let assessment = assess(df)?;
        let ok_for_model = ModelFitnessEvaluator::evaluate(&assessment.flags, threshold)?;
        debug!(
            "Fit for {:?} at threshold {}",
            ok_for_model
                .fit_families()
                .iter()
                .map(|family| family.as_str())
                .collect::<Vec<_>>(),
            threshold
        );

        Ok(EvaluationResponse {
            ok_for_model,
            quality_score: assessment.flags.quality_score,
            latency_ms: round_to(start.elapsed().as_secs_f64() * 1000.0, 3),
        })
    }

    fn record(
        &self,
        filename: &str,
        rows: usize,
        columns: usize,
        quality_score: f64,
        processing_time: f64,
    ) {
        self.benchmarks.record(ProcessedFileRecord {
            filename: filename.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            rows,
            columns,
            quality_score,
            processing_time,
        });
    }
}

static_assertions::assert_impl_all!(QualityService: Send, Sync);

/// Profile, analyze missing values and derive flags.
fn assess(df: &DataFrame) -> Result<Assessment> {
    let summary = DatasetProfiler::profile_dataset(df)?;
    debug!("Profiled {} columns", summary.n_cols);

    let missing = MissingAnalyzer::analyze(&summary);
    debug!(
        "Missing analysis: {} cells, {} high-missing columns",
        missing.total_missing_cells,
        missing.high_missing_columns.len()
    );

    let flags = QualityFlagEngine::compute(&summary, &missing);
    debug!("Quality score: {:.4}", flags.quality_score);

    Ok(Assessment {
        summary,
        missing,
        flags,
    })
}

fn elapsed_secs(start: Instant) -> f64 {
    round_to(start.elapsed().as_secs_f64(), 4)
}

/// Log the outcome of an operation and pass the result through.
fn observe<T>(operation: &str, filename: &str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => info!("{} completed for '{}'", operation, filename),
        Err(e) if e.is_validation() => warn!("{} rejected '{}': {}", operation, filename, e),
        Err(e) => error!("{} failed for '{}': {}", operation, filename, e),
    }
    result
}

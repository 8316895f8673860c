//! Dataset Quality Assessment Library
//!
//! Decides whether a tabular dataset is fit for different classes of
//! machine-learning models, built on Polars.
//!
//! # Overview
//!
//! - **Column Profiling**: counts, missing shares, distinct values and numeric statistics
//! - **Missing Analysis**: per-column and dataset-wide missing-value patterns
//! - **Quality Flags**: constant columns, duplicated identifiers and a composite score
//! - **Model Fitness**: per-family verdicts for regression, classification, clustering and neural networks
//! - **Optional Analyses**: correlation matrix and top categories
//! - **Benchmark History**: bounded, thread-safe record of processed files
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_quality::{AssessmentConfig, QualityService, ReportOptions};
//!
//! let service = QualityService::new(AssessmentConfig::default())?;
//! let bytes = std::fs::read("data.csv")?;
//!
//! // Model fitness verdicts
//! let verdict = service.evaluate_file("data.csv", &bytes, Some(0.8))?;
//! println!("{:?}", verdict.ok_for_model);
//!
//! // Full report with optional analyses
//! let report = service.full_report_from_file(
//!     "data.csv",
//!     &bytes,
//!     ReportOptions { include_correlation: true, include_categories: true },
//! )?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Benchmark history
//! let history = service.benchmark(10);
//! ```
//!
//! # Working with DataFrames directly
//!
//! Each stage is usable on its own:
//!
//! ```rust,ignore
//! use lex_quality::{DatasetProfiler, MissingAnalyzer, ModelFitnessEvaluator, QualityFlagEngine};
//!
//! let summary = DatasetProfiler::profile_dataset(&df)?;
//! let missing = MissingAnalyzer::analyze(&summary);
//! let flags = QualityFlagEngine::compute(&summary, &missing);
//! let fitness = ModelFitnessEvaluator::evaluate(&flags, 0.7)?;
//! ```
//!
//! The heuristics behind flags and scores are fixed constants in [`policy`],
//! versioned by [`policy::POLICY_VERSION`].

pub mod analysis;
pub mod benchmark;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fitness;
pub mod policy;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod service;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{CategoryAnalyzer, CorrelationEngine};
pub use benchmark::{BenchmarkQueryResult, BenchmarkStore};
pub use config::{AssessmentConfig, AssessmentConfigBuilder, ConfigValidationError};
pub use dataset::{RecordValue, dataset_from_record, load_csv_bytes};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use fitness::ModelFitnessEvaluator;
pub use profiler::DatasetProfiler;
pub use quality::{MissingAnalyzer, QualityFlagEngine};
pub use reporting::{FullReport, Problem, ReportAssembler, ReportOptions};
pub use service::QualityService;
pub use types::{
    BenchmarkSummary, ColumnKind, ColumnProfile, DatasetSummary, MissingReport, ModelFamily,
    ModelFitness, ProcessedFileRecord, QualityFlags,
};

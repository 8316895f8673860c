//! Heuristic constants behind quality flags, scores and verdicts.
//!
//! These values form a versioned policy surface. They are deliberately not
//! part of [`AssessmentConfig`](crate::config::AssessmentConfig): two runs over
//! the same data must always produce the same score. Any change to a value
//! here must bump [`POLICY_VERSION`].

/// Version of the heuristics below. Reported by the health check.
pub const POLICY_VERSION: &str = "2024.1";

/// A column whose missing share exceeds this is a high-missing column.
///
/// The same cutoff gates regression and classification fitness.
pub const HIGH_MISSING_SHARE: f64 = 0.5;

/// Uniqueness ratio (unique / non-null) above which a column is treated as
/// an identifier regardless of its name.
pub const NEAR_UNIQUE_RATIO: f64 = 0.95;

/// Identifier-named columns below this uniqueness ratio are foreign keys or
/// codes, not broken identifiers.
pub const ID_NAME_MIN_UNIQUE_RATIO: f64 = 0.5;

/// Score penalty per unit of overall missing share (missing cells / all cells).
pub const MISSING_PENALTY_WEIGHT: f64 = 1.0;

/// Score penalty when at least one constant column exists.
pub const CONSTANT_COLUMNS_PENALTY: f64 = 0.15;

/// Score penalty when at least one identifier column holds duplicates.
pub const SUSPICIOUS_ID_PENALTY: f64 = 0.2;

/// Datasets with fewer rows raise the informational `too_few_rows` flag.
pub const MIN_ROWS: usize = 100;

/// Datasets with more columns raise the informational `too_many_columns` flag.
pub const MAX_COLUMNS: usize = 100;

/// Number of example values kept per column profile.
pub const EXAMPLE_VALUES_LIMIT: usize = 3;

/// Number of most frequent values reported per categorical column.
pub const TOP_K_CATEGORIES: usize = 5;

/// Number of categorical columns reported in a full report.
pub const MAX_CATEGORY_COLUMNS: usize = 5;

/// Default neural-network quality gate.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.7;

/// Default number of benchmark records returned by a query.
pub const DEFAULT_BENCHMARK_LIMIT: usize = 10;

/// Upper bound for the benchmark query limit.
pub const MAX_BENCHMARK_LIMIT: usize = 100;

/// Default number of records the benchmark store retains.
pub const DEFAULT_BENCHMARK_CAPACITY: usize = 10_000;

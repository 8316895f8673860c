use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Column & Dataset Profiles
// ============================================================================

/// Kind of a column as seen by the quality heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point column.
    Numeric,
    /// Anything else (text, booleans, dates, all-missing columns).
    Categorical,
}

/// Descriptive statistics for a single column.
///
/// `non_null + missing` always equals the dataset row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Polars dtype name (e.g. `Int64`, `String`).
    pub dtype: String,
    pub kind: ColumnKind,
    pub is_numeric: bool,
    pub non_null: usize,
    pub missing: usize,
    pub missing_share: f64,
    /// Distinct non-null values.
    pub unique: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Sample standard deviation; `None` below two non-null values.
    pub std: Option<f64>,
    pub example_values: Vec<String>,
}

impl ColumnProfile {
    /// Distinct non-null values divided by non-null values (0 when empty).
    pub fn uniqueness_ratio(&self) -> f64 {
        if self.non_null == 0 {
            0.0
        } else {
            self.unique as f64 / self.non_null as f64
        }
    }

    /// Whether at least one non-null value repeats.
    pub fn has_duplicates(&self) -> bool {
        self.unique < self.non_null
    }
}

/// Profile of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnProfile>,
}

impl DatasetSummary {
    /// True for zero rows or zero columns.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.n_cols == 0
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter().filter(|col| col.is_numeric)
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter().filter(|col| !col.is_numeric)
    }
}

// ============================================================================
// Missing Values
// ============================================================================

/// Missing-value counts for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub missing_count: usize,
    pub missing_share: f64,
}

/// Missing-value patterns across a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    pub missing_by_column: BTreeMap<String, ColumnMissing>,
    pub total_missing_cells: usize,
    /// Columns above the high-missing cutoff, in dataset order.
    pub high_missing_columns: Vec<String>,
    pub has_any_missing: bool,
    /// Missing cells divided by all cells (0 for an empty dataset).
    pub overall_missing_share: f64,
    /// Largest per-column missing share.
    pub max_missing_share: f64,
}

// ============================================================================
// Quality Flags & Fitness
// ============================================================================

/// Boolean diagnostics and the composite quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub has_missing_values: bool,
    pub has_constant_columns: bool,
    pub has_suspicious_id_duplicates: bool,
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub empty_dataset: bool,
    pub max_missing_share: f64,
    pub constant_columns: Vec<String>,
    pub suspicious_id_columns: Vec<String>,
    /// Composite score in `[0, 1]`.
    pub quality_score: f64,
}

/// Model families the fitness evaluator reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Regression,
    Classification,
    Clustering,
    NeuralNetwork,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::Regression,
        ModelFamily::Classification,
        ModelFamily::Clustering,
        ModelFamily::NeuralNetwork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regression => "regression",
            Self::Classification => "classification",
            Self::Clustering => "clustering",
            Self::NeuralNetwork => "neural_network",
        }
    }
}

/// Per-family fitness verdicts. All four keys are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFitness {
    pub regression: bool,
    pub classification: bool,
    pub clustering: bool,
    pub neural_network: bool,
}

impl ModelFitness {
    /// All verdicts false.
    pub fn unfit() -> Self {
        Self {
            regression: false,
            classification: false,
            clustering: false,
            neural_network: false,
        }
    }

    pub fn verdict(&self, family: ModelFamily) -> bool {
        match family {
            ModelFamily::Regression => self.regression,
            ModelFamily::Classification => self.classification,
            ModelFamily::Clustering => self.clustering,
            ModelFamily::NeuralNetwork => self.neural_network,
        }
    }

    /// Families with a positive verdict.
    pub fn fit_families(&self) -> Vec<ModelFamily> {
        ModelFamily::ALL
            .into_iter()
            .filter(|family| self.verdict(*family))
            .collect()
    }
}

// ============================================================================
// Optional Analyses
// ============================================================================

/// Pairwise linear correlation over numeric columns.
///
/// `values[i][j]` is the correlation between `columns[i]` and `columns[j]`;
/// `None` where it is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    #[cfg(test)]
    pub(crate) fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// A frequent value of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    /// Share of non-null values.
    pub share: f64,
}

// ============================================================================
// Benchmark History
// ============================================================================

/// Summary of one processed CSV upload. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFileRecord {
    pub filename: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
    pub rows: usize,
    pub columns: usize,
    pub quality_score: f64,
    /// Seconds.
    pub processing_time: f64,
}

/// Aggregates over the benchmark history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub total_processed: usize,
    pub avg_quality_score: f64,
    pub min_quality_score: f64,
    pub max_quality_score: f64,
    pub avg_rows: f64,
    pub avg_columns: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(non_null: usize, unique: usize) -> ColumnProfile {
        ColumnProfile {
            name: "col".to_string(),
            dtype: "Int64".to_string(),
            kind: ColumnKind::Numeric,
            is_numeric: true,
            non_null,
            missing: 0,
            missing_share: 0.0,
            unique,
            min: None,
            max: None,
            mean: None,
            std: None,
            example_values: Vec::new(),
        }
    }

    #[test]
    fn test_uniqueness_ratio() {
        assert_eq!(profile(4, 3).uniqueness_ratio(), 0.75);
        assert_eq!(profile(0, 0).uniqueness_ratio(), 0.0);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(profile(4, 3).has_duplicates());
        assert!(!profile(4, 4).has_duplicates());
        assert!(!profile(0, 0).has_duplicates());
    }

    #[test]
    fn test_model_fitness_serializes_all_keys() {
        let json = serde_json::to_value(ModelFitness::unfit()).unwrap();
        for family in ModelFamily::ALL {
            assert_eq!(json[family.as_str()], serde_json::json!(false));
        }
    }

    #[test]
    fn test_fit_families() {
        let fitness = ModelFitness {
            regression: true,
            classification: false,
            clustering: true,
            neural_network: false,
        };
        assert_eq!(
            fitness.fit_families(),
            vec![ModelFamily::Regression, ModelFamily::Clustering]
        );
    }

    #[test]
    fn test_column_kind_serialization() {
        assert_eq!(serde_json::to_string(&ColumnKind::Numeric).unwrap(), "\"numeric\"");
        assert_eq!(
            serde_json::to_string(&ColumnKind::Categorical).unwrap(),
            "\"categorical\""
        );
    }

    #[test]
    fn test_correlation_matrix_lookup() {
        let matrix = CorrelationMatrix {
            columns: vec!["a".to_string(), "b".to_string()],
            values: vec![vec![Some(1.0), Some(0.5)], vec![Some(0.5), None]],
        };
        assert_eq!(matrix.get("a", "b"), Some(0.5));
        assert_eq!(matrix.get("b", "b"), None);
        assert_eq!(matrix.get("a", "missing"), None);
    }
}

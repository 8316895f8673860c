//! Column profiling.
//!
//! Computes per-column descriptive statistics from a dataset:
//! - counts (non-null, missing, distinct)
//! - numeric aggregates (min, max, mean, sample std)
//! - a few example values
//!
//! Profiling is a pure function of the input `DataFrame`.

mod identifier;
mod statistics;

pub use identifier::{is_identifier_like, is_identifier_name, is_suspicious_identifier};

use crate::error::{Result, ResultExt};
use crate::policy::EXAMPLE_VALUES_LIMIT;
use crate::types::{ColumnKind, ColumnProfile, DatasetSummary};
use crate::utils::{column_kind, non_null_floats, string_values};
use polars::prelude::*;
use statistics::NumericStats;
use std::collections::HashSet;
use tracing::debug;

/// Profiler for analyzing dataset structure.
pub struct DatasetProfiler;

impl DatasetProfiler {
    /// Profile every column of a dataset, in column order.
    pub fn profile_dataset(df: &DataFrame) -> Result<DatasetSummary> {
        let n_rows = df.height();
        let columns = df
            .get_columns()
            .iter()
            .map(|column| Self::profile_column(column.as_materialized_series(), n_rows))
            .collect::<Result<Vec<_>>>()?;

        debug!("Profiled {} columns over {} rows", columns.len(), n_rows);

        Ok(DatasetSummary {
            n_rows,
            n_cols: df.width(),
            columns,
        })
    }

    fn profile_column(series: &Series, n_rows: usize) -> Result<ColumnProfile> {
        let name = series.name().to_string();
        let context = format!("Profiling column '{}'", name);

        let kind = column_kind(series.dtype());
        let missing = series.null_count();
        let non_null = n_rows.saturating_sub(missing);
        let missing_share = if n_rows > 0 {
            missing as f64 / n_rows as f64
        } else {
            0.0
        };

        let non_null_series = series.drop_nulls();
        let unique = if non_null_series.is_empty() {
            0
        } else {
            non_null_series.n_unique().context(context.as_str())?
        };

        let stats = match kind {
            ColumnKind::Numeric => {
                NumericStats::from_values(&non_null_floats(series).context(context.as_str())?)
            }
            ColumnKind::Categorical => NumericStats::default(),
        };

        let example_values = Self::example_values(series).context(context.as_str())?;

        Ok(ColumnProfile {
            name,
            dtype: format!("{:?}", series.dtype()),
            kind,
            is_numeric: kind == ColumnKind::Numeric,
            non_null,
            missing,
            missing_share,
            unique,
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std: stats.std,
            example_values,
        })
    }

    /// First distinct non-null values in row order.
    fn example_values(series: &Series) -> PolarsResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut examples = Vec::with_capacity(EXAMPLE_VALUES_LIMIT);

        for value in string_values(series)?.into_iter().flatten() {
            if examples.len() == EXAMPLE_VALUES_LIMIT {
                break;
            }
            if seen.insert(value.clone()) {
                examples.push(value);
            }
        }

        Ok(examples)
    }
}

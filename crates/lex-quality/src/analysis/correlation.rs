//! Pairwise linear correlation over numeric columns.

use crate::error::{Result, ResultExt};
use crate::types::{CorrelationMatrix, DatasetSummary};
use crate::utils::float_values;
use polars::prelude::*;
use tracing::debug;

/// Computes a Pearson correlation matrix on demand.
///
/// Cost is O(numeric_columns² · rows), so it only runs when a caller asks.
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Correlation matrix over the numeric columns of `summary`.
    ///
    /// Returns `None` when the dataset has no numeric column.
    pub fn compute(df: &DataFrame, summary: &DatasetSummary) -> Result<Option<CorrelationMatrix>> {
        let columns: Vec<String> = summary.numeric_columns().map(|col| col.name.clone()).collect();
        if columns.is_empty() {
            return Ok(None);
        }

        let mut series_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
        for name in &columns {
            let column = df
                .column(name)
                .context(format!("Reading column '{}' for correlation", name))?;
            series_values.push(
                float_values(column.as_materialized_series())
                    .context(format!("Reading column '{}' for correlation", name))?,
            );
        }

        let size = columns.len();
        let mut values = vec![vec![None; size]; size];

        for i in 0..size {
            for j in i..size {
                let r = pearson(&series_values[i], &series_values[j]);
                let r = if i == j { r.map(|_| 1.0) } else { r };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        debug!("Correlation matrix computed over {} numeric columns", size);
        Ok(Some(CorrelationMatrix { columns, values }))
    }
}

/// Pearson correlation over rows where both sides are present.
///
/// `None` below two complete pairs or when either side has zero variance.
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

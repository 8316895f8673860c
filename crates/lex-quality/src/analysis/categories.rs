//! Top-value frequencies for categorical columns.

use crate::error::{Result, ResultExt};
use crate::types::{CategoryCount, DatasetSummary};
use crate::utils::string_values;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Summarises the most frequent values of categorical columns.
pub struct CategoryAnalyzer;

impl CategoryAnalyzer {
    /// Top `top_k` values for up to `max_columns` categorical columns.
    ///
    /// Columns are taken in dataset order. Values are sorted by descending
    /// count; ties keep the order of first appearance. Shares are relative
    /// to the column's non-null values.
    pub fn top_categories(
        df: &DataFrame,
        summary: &DatasetSummary,
        max_columns: usize,
        top_k: usize,
    ) -> Result<BTreeMap<String, Vec<CategoryCount>>> {
        let mut result = BTreeMap::new();

        for profile in summary.categorical_columns().take(max_columns) {
            let column = df
                .column(&profile.name)
                .context(format!("Reading column '{}' for categories", profile.name))?;
            let values = string_values(column.as_materialized_series())
                .context(format!("Reading column '{}' for categories", profile.name))?;

            result.insert(profile.name.clone(), Self::count_values(&values, top_k));
        }

        Ok(result)
    }

    pub(crate) fn count_values(values: &[Option<String>], top_k: usize) -> Vec<CategoryCount> {
        // value -> (count, first position)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut non_null = 0usize;

        for (idx, value) in values.iter().enumerate() {
            if let Some(value) = value {
                non_null += 1;
                counts.entry(value.as_str()).or_insert((0, idx)).0 += 1;
            }
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(value, (count, first))| (value, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(top_k)
            .map(|(value, count, _)| CategoryCount {
                value: value.to_string(),
                count,
                share: count as f64 / non_null as f64,
            })
            .collect()
    }
}

//! Numeric aggregates for column profiling.

/// min/max/mean/std of the non-null values of a numeric column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct NumericStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

impl NumericStats {
    /// Aggregate non-null values. Every field is `None` for an empty slice.
    pub(crate) fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = calculate_mean(values);

        Self {
            min: Some(min),
            max: Some(max),
            mean: Some(mean),
            std: calculate_std(values),
        }
    }
}

pub(crate) fn calculate_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// Undefined below two values.
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = calculate_mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);

    Some(variance.sqrt())
}

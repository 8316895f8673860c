//! Rolling history of processed files.
//!
//! The store is an explicit, injectable component. One `RwLock` guards the
//! whole history: appends take the write guard, queries take a single read
//! guard for both the recent slice and the aggregate, so the two always
//! describe the same snapshot.
//!
//! History is a ring buffer; once `capacity` records are held the oldest
//! one is evicted on every append.

use crate::policy::{DEFAULT_BENCHMARK_CAPACITY, MAX_BENCHMARK_LIMIT};
use crate::types::{BenchmarkSummary, ProcessedFileRecord};
use crate::utils::round_to;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Result of a benchmark query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkQueryResult {
    /// Most recent first, at most the clamped limit.
    pub recent_files: Vec<ProcessedFileRecord>,
    /// Aggregates over every retained record; `None` when the store is empty.
    pub summary: Option<BenchmarkSummary>,
}

/// Process-wide history of processed-file summaries.
pub struct BenchmarkStore {
    records: RwLock<VecDeque<ProcessedFileRecord>>,
    capacity: usize,
}

impl BenchmarkStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BENCHMARK_CAPACITY)
    }

    /// A store retaining at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&self, record: ProcessedFileRecord) {
        let mut records = self.records.write();
        if records.len() >= self.capacity {
            if let Some(evicted) = records.pop_front() {
                debug!(
                    "Benchmark history full ({}), evicted record for '{}'",
                    self.capacity, evicted.filename
                );
            }
        }
        records.push_back(record);
    }

    /// Most recent records plus aggregates over the retained history.
    ///
    /// `limit` is clamped into `[1, MAX_BENCHMARK_LIMIT]`.
    pub fn query(&self, limit: i64) -> BenchmarkQueryResult {
        let limit = clamp_limit(limit);
        let records = self.records.read();

        let recent_files = records.iter().rev().take(limit).cloned().collect();
        let summary = summarize(records.iter());

        BenchmarkQueryResult {
            recent_files,
            summary,
        }
    }
}

impl Default for BenchmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(BenchmarkStore: Send, Sync);

/// Clamp a requested limit into `[1, MAX_BENCHMARK_LIMIT]`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_BENCHMARK_LIMIT as i64) as usize
}

fn summarize<'a>(
    records: impl ExactSizeIterator<Item = &'a ProcessedFileRecord>,
) -> Option<BenchmarkSummary> {
    let total = records.len();
    if total == 0 {
        return None;
    }

    let mut score_sum = 0.0;
    let mut min_score = f64::INFINITY;
    let mut max_score = f64::NEG_INFINITY;
    let mut rows_sum = 0.0;
    let mut columns_sum = 0.0;

    for record in records {
        score_sum += record.quality_score;
        min_score = min_score.min(record.quality_score);
        max_score = max_score.max(record.quality_score);
        rows_sum += record.rows as f64;
        columns_sum += record.columns as f64;
    }

    let n = total as f64;
    Some(BenchmarkSummary {
        total_processed: total,
        avg_quality_score: round_to(score_sum / n, 3),
        min_quality_score: round_to(min_score, 3),
        max_quality_score: round_to(max_score, 3),
        avg_rows: round_to(rows_sum / n, 0),
        avg_columns: round_to(columns_sum / n, 0),
    })
}

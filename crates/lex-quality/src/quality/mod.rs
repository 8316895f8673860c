//! Data quality analysis module.
//!
//! Missing-value analysis and the quality flags/score derived from it.

mod flags;
mod missing;

pub use flags::QualityFlagEngine;
pub use missing::MissingAnalyzer;

//! Optional dataset analyses attached to full reports.

mod categories;
mod correlation;

pub use categories::CategoryAnalyzer;
pub use correlation::CorrelationEngine;

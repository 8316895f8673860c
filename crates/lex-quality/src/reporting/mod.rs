//! Report assembly.
//!
//! [`ReportAssembler`] composes a [`FullReport`] out of the dataset profile,
//! the quality flags and, on request, correlation and category analyses.
//! Problems listed in the report are derived purely from the flags.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_quality::reporting::{ReportAssembler, ReportOptions};
//!
//! let report = ReportAssembler::assemble(
//!     "train.csv",
//!     &df,
//!     &summary,
//!     &missing,
//!     &flags,
//!     ReportOptions { include_correlation: true, include_categories: false },
//! )?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod generator;

pub use generator::{
    DatasetShape, FullReport, Problem, ProblemKind, QualitySection, ReportAssembler,
    ReportOptions, Severity,
};

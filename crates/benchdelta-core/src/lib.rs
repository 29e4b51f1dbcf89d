//! Flattening and baseline comparison of benchmark run reports.
//!
//! A report is a JSON document with `metadata` and `modules`. The endpoint
//! metrics of the `apiCore`, `apiWrite` and `uiPages` modules are flattened
//! into [`MetricRecord`]s, which can be summarised by status code or joined
//! against a baseline run and classified as improved, regressed or neutral.

pub mod compare;
pub mod config;
pub mod delta;
pub mod errors;
pub mod flatten;
pub mod model;
pub mod report;
pub mod source;
pub mod status;

pub use compare::{classify, compare_records, compare_records_with_policy, DuplicateKeyPolicy};
pub use config::CompareConfig;
pub use delta::pct_delta;
pub use errors::{ConfigError, LoadError, ReportError};
pub use flatten::flatten_metrics;
pub use model::{
    Classification, ComparisonRow, EdgeCheck, IdentityKey, MetricRecord, Report, Section, Side,
    SECTIONS,
};
pub use report::{BenchmarkDelta, ComparisonSummary, Overview};
pub use status::{rate_limited, summarize_statuses, StatusSummary, RATE_LIMIT_STATUS};

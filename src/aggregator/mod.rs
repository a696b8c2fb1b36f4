//! Measurement aggregation across runs.
//!
//! Two phases, run once per build: bucket construction walks each run's
//! tree and groups raw weight samples by call path and run ordinal;
//! projection locates each call path in the merged tree and attaches the
//! per-run records under the caller's identifier.

pub mod buckets;
pub mod project;

// Re-export main types and functions
pub use buckets::{collect_run_measurements, MeasurementBuckets};
pub use project::attach_measurements;

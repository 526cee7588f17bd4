//! Batch benchmarking of registered search strategies.
//!
//! - [`sample_pairs`] draws endpoint pairs the way a user clicking on a map
//!   would: uniform points in the bounding box snapped to the nearest node
//! - [`BatchRunner`] runs (algorithm, start, end) jobs on a bounded worker
//!   pool and returns one [`BatchRecord`] per job in submission order
//! - [`summarize`] reduces records to per-algorithm means, deviations,
//!   success rates and ratios against a baseline strategy

mod error;
mod runner;
mod sample;
mod stats;

pub use error::BenchError;
pub use runner::{BatchConfig, BatchJob, BatchRecord, BatchRunner, Outcome, plan};
pub use sample::sample_pairs;
pub use stats::{AlgorithmSummary, DEFAULT_BASELINE, summarize};

use std::collections::HashMap;

use crate::{BatchRecord, BenchError};

/// Strategy the other strategies are compared against by default.
pub const DEFAULT_BASELINE: &str = "Dijkstra";

/// Aggregated measurements of one strategy over a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmSummary {
    pub algorithm: String,
    pub runs: usize,
    pub successes: usize,
    /// `successes / runs`.
    pub success_rate: f64,
    /// Seconds, over every run.
    pub mean_runtime: f64,
    /// Sample standard deviation in seconds; `None` below two runs.
    pub std_runtime: Option<f64>,
    /// Over successful runs only; `None` without any.
    pub mean_cost: Option<f64>,
    pub std_cost: Option<f64>,
    /// `mean_runtime` over the baseline's.
    pub runtime_ratio: Option<f64>,
    /// `mean_cost` over the baseline's.
    pub cost_ratio: Option<f64>,
}

/// Per-strategy statistics, in order of first appearance in `records`.
///
/// Fails with [`BenchError::MissingBaseline`] if no record belongs to
/// `baseline`. Ratios are `None` when either side has nothing to divide.
pub fn summarize(records: &[BatchRecord], baseline: &str) -> Result<Vec<AlgorithmSummary>, BenchError> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&BatchRecord>> = HashMap::new();
    for record in records {
        let group = groups.entry(record.algorithm.as_str()).or_default();
        if group.is_empty() {
            order.push(record.algorithm.as_str());
        }
        group.push(record);
    }

    let mut summaries: Vec<AlgorithmSummary> = order
        .iter()
        .map(|name| summarize_one(name, &groups[name]))
        .collect();

    let Some(base) = summaries.iter().find(|s| s.algorithm == baseline).cloned() else {
        return Err(BenchError::MissingBaseline(baseline.to_string()));
    };
    for summary in &mut summaries {
        summary.runtime_ratio = ratio(Some(summary.mean_runtime), Some(base.mean_runtime));
        summary.cost_ratio = ratio(summary.mean_cost, base.mean_cost);
    }
    Ok(summaries)
}

fn summarize_one(name: &str, records: &[&BatchRecord]) -> AlgorithmSummary {
    let runtimes: Vec<f64> = records.iter().map(|r| r.runtime.as_secs_f64()).collect();
    let costs: Vec<f64> = records
        .iter()
        .filter(|r| r.outcome.is_found())
        .filter_map(|r| r.cost)
        .collect();
    let successes = records.iter().filter(|r| r.outcome.is_found()).count();

    AlgorithmSummary {
        algorithm: name.to_string(),
        runs: records.len(),
        successes,
        success_rate: successes as f64 / records.len() as f64,
        mean_runtime: mean(&runtimes).unwrap_or(0.0),
        std_runtime: std_dev(&runtimes),
        mean_cost: mean(&costs),
        std_cost: std_dev(&costs),
        runtime_ratio: None,
        cost_ratio: None,
    }
}

fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

fn std_dev(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (xs.len() - 1) as f64;
    Some(var.sqrt())
}

fn ratio(value: Option<f64>, base: Option<f64>) -> Option<f64> {
    match (value, base) {
        (Some(v), Some(b)) if b != 0.0 => Some(v / b),
        _ => None,
    }
}

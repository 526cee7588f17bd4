//! Typed per-strategy options.
//!
//! Each strategy family owns one options struct carrying only the fields it
//! reads. [`SearchOptions`] is the tagged union the registry passes around;
//! [`SearchOptions::Default`] selects the documented defaults of whichever
//! strategy runs.

use crate::{Heuristic, SearchError};

/// Options of one search invocation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum SearchOptions {
    /// Use the defaults of the strategy being run.
    #[default]
    Default,
    IterativeDeepening(IterativeDeepeningOptions),
    RandomBfs(RandomBfsOptions),
    RandomDfs(RandomDfsOptions),
    Hybrid(HybridOptions),
    DeltaStepping(DeltaSteppingOptions),
    /// A* and greedy best-first.
    Informed(InformedOptions),
    MultiHeuristic(MultiHeuristicOptions),
    RandomizedAstar(RandomizedAstarOptions),
    Beam(BeamOptions),
}

impl SearchOptions {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::IterativeDeepening(_) => "iterative_deepening",
            Self::RandomBfs(_) => "random_bfs",
            Self::RandomDfs(_) => "random_dfs",
            Self::Hybrid(_) => "hybrid",
            Self::DeltaStepping(_) => "delta_stepping",
            Self::Informed(_) => "informed",
            Self::MultiHeuristic(_) => "multi_heuristic",
            Self::RandomizedAstar(_) => "randomized_astar",
            Self::Beam(_) => "beam",
        }
    }

    /// Options for a strategy that takes `T`, validated.
    pub(crate) fn resolve<T: AlgorithmOptions>(&self) -> Result<T, SearchError> {
        let opts = match self {
            Self::Default => T::default(),
            other => T::select(other).cloned().ok_or_else(|| rejected(other))?,
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Check that a strategy without options was given none.
    pub(crate) fn expect_none(&self) -> Result<(), SearchError> {
        match self {
            Self::Default => Ok(()),
            other => Err(rejected(other)),
        }
    }
}

fn rejected(options: &SearchOptions) -> SearchError {
    SearchError::invalid_option(options.kind(), "not accepted by this algorithm")
}

/// Options struct belonging to one strategy family.
pub trait AlgorithmOptions: Default + Clone {
    /// Pick this family's options out of the tagged union.
    fn select(options: &SearchOptions) -> Option<&Self>;

    /// Reject out-of-range values.
    fn validate(&self) -> Result<(), SearchError> {
        Ok(())
    }
}

fn positive_count(option: &'static str, value: usize) -> Result<(), SearchError> {
    if value == 0 {
        return Err(SearchError::invalid_option(option, "must be at least 1"));
    }
    Ok(())
}

fn unit_interval(option: &'static str, value: f64) -> Result<(), SearchError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SearchError::invalid_option(
            option,
            format!("must lie in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Uninformed
// ---------------------------------------------------------------------------

/// Iterative deepening: deepest limit tried, in edges. Default 100.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct IterativeDeepeningOptions {
    pub max_depth: usize,
}

impl Default for IterativeDeepeningOptions {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl AlgorithmOptions for IterativeDeepeningOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::IterativeDeepening(o) => Some(o),
            _ => None,
        }
    }
}

/// Random breadth-first: at most `max_steps` discoveries. Default 1000.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RandomBfsOptions {
    pub max_steps: usize,
}

impl Default for RandomBfsOptions {
    fn default() -> Self {
        Self { max_steps: 1000 }
    }
}

impl AlgorithmOptions for RandomBfsOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::RandomBfs(o) => Some(o),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        positive_count("max_steps", self.max_steps)
    }
}

/// Random depth-first: branches deeper than `max_depth` edges are cut.
/// Default 1000.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RandomDfsOptions {
    pub max_depth: usize,
}

impl Default for RandomDfsOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

impl AlgorithmOptions for RandomDfsOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::RandomDfs(o) => Some(o),
            _ => None,
        }
    }
}

/// Hybrid breadth/depth search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct HybridOptions {
    /// Probability that a child branch flips its parent's mode. Default 0.5.
    pub toggle_prob: f64,
    /// Maximum number of discoveries. Default 1000.
    pub max_steps: usize,
}

impl Default for HybridOptions {
    fn default() -> Self {
        Self {
            toggle_prob: 0.5,
            max_steps: 1000,
        }
    }
}

impl AlgorithmOptions for HybridOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::Hybrid(o) => Some(o),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        unit_interval("toggle_prob", self.toggle_prob)?;
        positive_count("max_steps", self.max_steps)
    }
}

// ---------------------------------------------------------------------------
// Weighted
// ---------------------------------------------------------------------------

/// Delta-stepping: width of each distance bucket. Default 1.0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct DeltaSteppingOptions {
    pub delta: f64,
}

impl Default for DeltaSteppingOptions {
    fn default() -> Self {
        Self { delta: 1.0 }
    }
}

impl AlgorithmOptions for DeltaSteppingOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::DeltaStepping(o) => Some(o),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        if !(self.delta.is_finite() && self.delta > 0.0) {
            return Err(SearchError::invalid_option(
                "delta",
                format!("must be a positive finite number, got {}", self.delta),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Informed
// ---------------------------------------------------------------------------

/// A* and greedy best-first: the heuristic to follow. Default Euclidean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct InformedOptions {
    pub heuristic: Heuristic,
}

impl AlgorithmOptions for InformedOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::Informed(o) => Some(o),
            _ => None,
        }
    }
}

/// Multi-heuristic A*: every heuristic is evaluated and the minimum used.
/// Default Euclidean and Manhattan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct MultiHeuristicOptions {
    pub heuristics: Vec<Heuristic>,
}

impl Default for MultiHeuristicOptions {
    fn default() -> Self {
        Self {
            heuristics: vec![Heuristic::Euclidean, Heuristic::Manhattan],
        }
    }
}

impl AlgorithmOptions for MultiHeuristicOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::MultiHeuristic(o) => Some(o),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        if self.heuristics.is_empty() {
            return Err(SearchError::invalid_option(
                "heuristics",
                "at least one heuristic is required",
            ));
        }
        Ok(())
    }
}

/// Randomized A*.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RandomizedAstarOptions {
    /// Default Euclidean.
    pub heuristic: Heuristic,
    /// Share of each estimate replaced by noise, in `[0, 1]`. Default 0.1.
    pub randomness: f64,
}

impl Default for RandomizedAstarOptions {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Euclidean,
            randomness: 0.1,
        }
    }
}

impl AlgorithmOptions for RandomizedAstarOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::RandomizedAstar(o) => Some(o),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        unit_interval("randomness", self.randomness)
    }
}

/// Beam search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct BeamOptions {
    /// Default Euclidean.
    pub heuristic: Heuristic,
    /// Partial paths kept per level. Default 100.
    pub beam_width: usize,
}

impl Default for BeamOptions {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Euclidean,
            beam_width: 100,
        }
    }
}

impl AlgorithmOptions for BeamOptions {
    fn select(options: &SearchOptions) -> Option<&Self> {
        match options {
            SearchOptions::Beam(o) => Some(o),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        positive_count("beam_width", self.beam_width)
    }
}

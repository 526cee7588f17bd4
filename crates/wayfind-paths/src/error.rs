use thiserror::Error;
use wayfind_core::{GraphError, NodeId};

/// Why a search produced no route, or could not run at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("endpoint {0} is not in the graph")]
    InvalidEndpoint(NodeId),

    #[error("no path exists between the endpoints")]
    NoPathFound,

    #[error("graph contains a negative-weight cycle reachable from the start")]
    NegativeCycleDetected,

    #[error("search budget of {limit} exhausted before reaching the goal")]
    BudgetExceeded { limit: usize },

    #[error("search was cancelled")]
    Cancelled,

    #[error("node {0} has no coordinates but the heuristic needs them")]
    MissingCoordinates(NodeId),

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl SearchError {
    /// Whether this outcome means "no route" rather than a fault.
    ///
    /// Unroutable outcomes are reported to path consumers as an empty path;
    /// everything else is a configuration or data fault that must reach the
    /// caller.
    pub fn is_unroutable(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint(_)
                | Self::NoPathFound
                | Self::NegativeCycleDetected
                | Self::BudgetExceeded { .. }
                | Self::Cancelled
        )
    }

    pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}

/// Errors raised while registering or looking up algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("algorithm \"{0}\" is already registered")]
    DuplicateAlgorithm(String),

    #[error("no algorithm named \"{0}\"")]
    NotFound(String),
}

//! Node-to-goal cost estimators for informed searches.

use wayfind_core::{Coord, GraphView, NodeId, euclidean, manhattan};

use crate::SearchError;

/// A planar distance used as a remaining-cost estimate.
///
/// Both are admissible and consistent when edge weights are true planar
/// distances. Nothing checks that; with other weights informed searches
/// may return suboptimal routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic {
    /// Distance between two coordinates under this heuristic.
    #[inline]
    pub fn distance(self, a: Coord, b: Coord) -> f64 {
        match self {
            Self::Euclidean => euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
        }
    }

    /// Estimated cost from `node` to `goal` in `graph`.
    pub fn estimate<G: GraphView + ?Sized>(
        self,
        graph: &G,
        node: NodeId,
        goal: NodeId,
    ) -> Result<f64, SearchError> {
        Ok(self.distance(coordinates(graph, node)?, coordinates(graph, goal)?))
    }
}

fn coordinates<G: GraphView + ?Sized>(graph: &G, node: NodeId) -> Result<Coord, SearchError> {
    graph
        .coordinates(node)
        .ok_or(SearchError::MissingCoordinates(node))
}

/// Estimates distance to one fixed goal as the minimum over a set of
/// heuristics. The minimum of admissible heuristics is admissible.
pub struct Estimator<'g, G: ?Sized> {
    graph: &'g G,
    goal: Coord,
    heuristics: Vec<Heuristic>,
}

impl<'g, G: GraphView + ?Sized> Estimator<'g, G> {
    /// Bind `heuristics` to `goal`. Fails if the goal has no coordinates or
    /// no heuristic is given.
    pub fn new(graph: &'g G, goal: NodeId, heuristics: &[Heuristic]) -> Result<Self, SearchError> {
        if heuristics.is_empty() {
            return Err(SearchError::invalid_option(
                "heuristics",
                "at least one heuristic is required",
            ));
        }
        Ok(Self {
            graph,
            goal: coordinates(graph, goal)?,
            heuristics: heuristics.to_vec(),
        })
    }

    /// Estimated remaining cost from `node`.
    pub fn estimate(&self, node: NodeId) -> Result<f64, SearchError> {
        let at = coordinates(self.graph, node)?;
        Ok(self
            .heuristics
            .iter()
            .map(|h| h.distance(at, self.goal))
            .fold(f64::INFINITY, f64::min))
    }
}

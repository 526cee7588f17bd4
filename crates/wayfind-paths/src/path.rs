use std::collections::HashSet;
use std::ops::Deref;

use wayfind_core::{DEFAULT_WEIGHT_KEY, GraphError, GraphView, NodeId, route_cost};

/// What a search is asked to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub start: NodeId,
    pub end: NodeId,
    /// Edge attribute used as the weight by weighted strategies.
    pub weight_key: String,
}

impl Query {
    /// Query from `start` to `end` weighted by [`DEFAULT_WEIGHT_KEY`].
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self {
            start,
            end,
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
        }
    }

    /// Use `key` as the weight attribute.
    pub fn with_weight_key(mut self, key: impl Into<String>) -> Self {
        self.weight_key = key.into();
        self
    }
}

/// An ordered node sequence from start to end, both inclusive.
///
/// An empty path means "no route". A non-empty path returned by a search
/// starts at the query's start, ends at its end, and every consecutive pair
/// is joined by an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Path(Vec<NodeId>);

impl Path {
    /// The empty "no route" path.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// The nodes of the path.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Number of edges along the path.
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Whether no node repeats.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().all(|n| seen.insert(*n))
    }

    /// Total effective weight of the path under attribute `key`.
    pub fn cost<G: GraphView + ?Sized>(&self, graph: &G, key: &str) -> Result<f64, GraphError> {
        route_cost(graph, &self.0, key)
    }

    pub fn into_inner(self) -> Vec<NodeId> {
        self.0
    }
}

impl Deref for Path {
    type Target = [NodeId];

    fn deref(&self) -> &[NodeId] {
        &self.0
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hops_and_simplicity() {
        assert_eq!(Path::empty().hops(), 0);
        assert_eq!(Path::from(vec![4]).hops(), 0);

        let p = Path::from(vec![1, 2, 3]);
        assert_eq!(p.hops(), 2);
        assert!(p.is_simple());
        assert_eq!(p.first(), Some(&1));
        assert!(!Path::from(vec![1, 2, 1]).is_simple());
    }

    #[test]
    fn query_defaults_to_length() {
        let q = Query::new(1, 2);
        assert_eq!(q.weight_key, "length");
        assert_eq!(q.with_weight_key("time").weight_key, "time");
    }
}

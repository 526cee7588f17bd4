use crate::{Coord, GraphError, NodeId};

/// Weight attribute read when the caller does not name one.
pub const DEFAULT_WEIGHT_KEY: &str = "length";

/// Weight of an edge that does not carry the requested attribute.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Read-only view of a node/edge graph.
///
/// Every search strategy is written against this trait only, so any storage
/// or loading layer can back a search by implementing it. Implementations
/// must not mutate the graph through `&self`.
pub trait GraphView {
    /// Whether `node` is part of the graph.
    fn contains(&self, node: NodeId) -> bool;

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Append every node of the graph into `buf`.
    fn nodes(&self, buf: &mut Vec<NodeId>);

    /// Append the successors of `node` into `buf`, each one once even when
    /// parallel edges exist. The caller clears `buf` before calling.
    fn neighbors(&self, node: NodeId, buf: &mut Vec<NodeId>);

    /// Effective weight of the edge `from -> to` under attribute `key`.
    ///
    /// This is the minimum over all parallel edges between the pair. An edge
    /// without the attribute weighs [`DEFAULT_WEIGHT`].
    fn edge_weight(&self, from: NodeId, to: NodeId, key: &str) -> Result<f64, GraphError>;

    /// Planar coordinates of `node`, if it has any.
    fn coordinates(&self, node: NodeId) -> Option<Coord>;

    /// Append every adjacent pair `(from, to)` into `buf`, one entry per pair
    /// regardless of how many parallel edges join it.
    fn edges(&self, buf: &mut Vec<(NodeId, NodeId)>) {
        let mut nodes = Vec::with_capacity(self.node_count());
        self.nodes(&mut nodes);
        let mut nbuf = Vec::new();
        for from in nodes {
            nbuf.clear();
            self.neighbors(from, &mut nbuf);
            buf.extend(nbuf.iter().map(|&to| (from, to)));
        }
    }
}

/// Total effective weight of `path` under attribute `key`.
///
/// An empty or single-node path costs nothing. Fails with
/// [`GraphError::MissingEdge`] if two consecutive nodes are not adjacent.
pub fn route_cost<G: GraphView + ?Sized>(
    graph: &G,
    path: &[NodeId],
    key: &str,
) -> Result<f64, GraphError> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        total += graph.edge_weight(pair[0], pair[1], key)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    fn triangle() -> Graph {
        let mut g = Graph::directed();
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 2.5);
        g.add_weighted_edge(2, 3, DEFAULT_WEIGHT_KEY, 1.0);
        g.add_weighted_edge(2, 3, DEFAULT_WEIGHT_KEY, 0.5);
        g.add_weighted_edge(3, 1, DEFAULT_WEIGHT_KEY, 4.0);
        g
    }

    #[test]
    fn route_cost_uses_cheapest_parallel_edge() {
        let g = triangle();
        assert_eq!(route_cost(&g, &[1, 2, 3], DEFAULT_WEIGHT_KEY), Ok(3.0));
        assert_eq!(route_cost(&g, &[3, 1, 2, 3, 1], DEFAULT_WEIGHT_KEY), Ok(11.0));
    }

    #[test]
    fn route_cost_of_trivial_paths_is_zero() {
        let g = triangle();
        assert_eq!(route_cost(&g, &[], DEFAULT_WEIGHT_KEY), Ok(0.0));
        assert_eq!(route_cost(&g, &[2], DEFAULT_WEIGHT_KEY), Ok(0.0));
    }

    #[test]
    fn route_cost_rejects_non_adjacent_steps() {
        let g = triangle();
        assert_eq!(
            route_cost(&g, &[1, 3], DEFAULT_WEIGHT_KEY),
            Err(GraphError::MissingEdge { from: 1, to: 3 })
        );
    }

    #[test]
    fn default_edges_lists_each_pair_once() {
        let g = triangle();
        let mut pairs = Vec::new();
        g.edges(&mut pairs);
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 1)]);
    }
}

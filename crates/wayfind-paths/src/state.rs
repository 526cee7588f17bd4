use std::cmp::Ordering;
use std::collections::HashMap;

use wayfind_core::{GraphError, GraphView, NodeId};

use crate::{Path, Query, SearchError};

// ---------------------------------------------------------------------------
// Priority-queue entry
// ---------------------------------------------------------------------------

/// Heap entry ordered by `f`, then `tie`, then node id, all ascending.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) node: NodeId,
    pub(crate) f: f64,
    pub(crate) tie: f64,
}

impl NodeRef {
    #[inline]
    pub(crate) fn new(node: NodeId, f: f64, tie: f64) -> Self {
        Self { node, f, tie }
    }
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.total_cmp(&self.tie))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// Per-invocation search state
// ---------------------------------------------------------------------------

/// Best-known costs and predecessors of one search. Created fresh per
/// invocation and dropped on return.
#[derive(Debug, Default)]
pub(crate) struct SearchState {
    pub(crate) cost: HashMap<NodeId, f64>,
    pub(crate) parent: HashMap<NodeId, NodeId>,
}

impl SearchState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// State with `start` at cost 0.
    pub(crate) fn rooted(start: NodeId) -> Self {
        let mut state = Self::new();
        state.cost.insert(start, 0.0);
        state
    }

    /// Best-known cost of `node`, infinite if never reached.
    #[inline]
    pub(crate) fn cost(&self, node: NodeId) -> f64 {
        self.cost.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    /// Record `cost` for `node`, reached from `parent`.
    #[inline]
    pub(crate) fn relax(&mut self, node: NodeId, parent: NodeId, cost: f64) {
        self.cost.insert(node, cost);
        self.parent.insert(node, parent);
    }

    /// Walk the predecessor chain back from `end` and reverse it.
    ///
    /// Fails with [`SearchError::NoPathFound`] if the chain does not reach
    /// `start`.
    pub(crate) fn path_to(&self, start: NodeId, end: NodeId) -> Result<Path, SearchError> {
        let mut nodes = vec![end];
        let mut current = end;
        while current != start {
            let Some(&prev) = self.parent.get(&current) else {
                return Err(SearchError::NoPathFound);
            };
            // a chain longer than the map can only be a cycle
            if nodes.len() > self.parent.len() {
                return Err(SearchError::NoPathFound);
            }
            nodes.push(prev);
            current = prev;
        }
        nodes.reverse();
        Ok(Path::from(nodes))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fail with [`SearchError::InvalidEndpoint`] unless both endpoints exist.
pub(crate) fn check_endpoints<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
) -> Result<(), SearchError> {
    for node in [query.start, query.end] {
        if !graph.contains(node) {
            return Err(SearchError::InvalidEndpoint(node));
        }
    }
    Ok(())
}

/// Effective weight of `from -> to`, rejecting negative weights for
/// strategies that assume them away.
pub(crate) fn non_negative_weight<G: GraphView + ?Sized>(
    graph: &G,
    from: NodeId,
    to: NodeId,
    key: &str,
) -> Result<f64, SearchError> {
    let weight = graph.edge_weight(from, to, key)?;
    if weight < 0.0 {
        return Err(GraphError::NegativeWeight { from, to, weight }.into());
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_lowest_f_then_tie_then_node() {
        let mut open = BinaryHeap::new();
        open.push(NodeRef::new(7, 2.0, 0.0));
        open.push(NodeRef::new(3, 1.0, 5.0));
        open.push(NodeRef::new(9, 1.0, 1.0));
        open.push(NodeRef::new(4, 1.0, 1.0));

        let order: Vec<NodeId> = std::iter::from_fn(|| open.pop().map(|r| r.node)).collect();
        assert_eq!(order, vec![4, 9, 3, 7]);
    }

    #[test]
    fn path_to_reverses_the_chain() {
        let mut state = SearchState::rooted(1);
        state.relax(2, 1, 1.0);
        state.relax(3, 2, 2.0);
        assert_eq!(state.path_to(1, 3), Ok(Path::from(vec![1, 2, 3])));
        assert_eq!(state.path_to(1, 1), Ok(Path::from(vec![1])));
    }

    #[test]
    fn path_to_unreached_end_is_no_path() {
        let mut state = SearchState::rooted(1);
        state.relax(2, 1, 1.0);
        assert_eq!(state.path_to(1, 5), Err(SearchError::NoPathFound));
    }

    #[test]
    fn path_to_detects_cycles() {
        let mut state = SearchState::new();
        state.parent.insert(2, 3);
        state.parent.insert(3, 2);
        assert_eq!(state.path_to(1, 2), Err(SearchError::NoPathFound));
    }
}

use std::collections::BinaryHeap;

use wayfind_core::{DEFAULT_WEIGHT_KEY, GraphView, NodeId};

use crate::state::{NodeRef, SearchState, check_endpoints, non_negative_weight};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// Dijkstra's algorithm: the minimum-cost route under `query.weight_key`.
///
/// Requires non-negative weights and fails with a graph error on the first
/// negative edge it relaxes. Stops as soon as the end is settled.
pub fn dijkstra<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);
    let key = query.weight_key.as_str();

    let mut state = SearchState::rooted(start);
    let mut open = BinaryHeap::from([NodeRef::new(start, 0.0, 0.0)]);
    let mut nbuf = Vec::new();

    while let Some(NodeRef { node, f: dist, .. }) = open.pop() {
        ctx.checkpoint()?;
        if dist > state.cost(node) {
            continue;
        }
        if node == end {
            return state.path_to(start, end);
        }

        nbuf.clear();
        graph.neighbors(node, &mut nbuf);
        for &next in nbuf.iter() {
            let tentative = dist + non_negative_weight(graph, node, next, key)?;
            if tentative < state.cost(next) {
                state.relax(next, node, tentative);
                open.push(NodeRef::new(next, tentative, 0.0));
            }
        }
    }

    Err(SearchError::NoPathFound)
}

/// Minimum-cost route from `start` to `end` under the default `"length"`
/// weight, with its cost.
///
/// `Ok(None)` when there is no route, including unknown endpoints. Bad
/// weights are still returned as [`SearchError::Graph`].
pub fn shortest_path<G: GraphView + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
) -> Result<Option<(Path, f64)>, SearchError> {
    let query = Query::new(start, end);
    let path = match dijkstra(graph, &query, &mut SearchContext::default()) {
        Ok(path) => path,
        Err(err) if err.is_unroutable() => return Ok(None),
        Err(err) => return Err(err),
    };
    let cost = path.cost(graph, DEFAULT_WEIGHT_KEY)?;
    Ok(Some((path, cost)))
}

pub(crate) fn run(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    options.expect_none()?;
    dijkstra(graph, query, ctx)
}

use wayfind_core::GraphView;

use crate::state::{SearchState, check_endpoints};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// Bellman-Ford: the minimum-cost route, negative weights allowed.
///
/// Relaxes every edge up to `|V| - 1` times, stopping early once a pass
/// changes nothing. If one more pass could still improve a cost, a
/// negative cycle is reachable from the start and the search fails with
/// [`SearchError::NegativeCycleDetected`], even when the end itself lies
/// off the cycle.
pub fn bellman_ford<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);
    let key = query.weight_key.as_str();

    let mut edges = Vec::new();
    graph.edges(&mut edges);
    let mut weighted = Vec::with_capacity(edges.len());
    for (from, to) in edges {
        weighted.push((from, to, graph.edge_weight(from, to, key)?));
    }

    let mut state = SearchState::rooted(start);
    let passes = graph.node_count().saturating_sub(1);
    for _ in 0..passes {
        let mut changed = false;
        for &(from, to, weight) in &weighted {
            ctx.checkpoint()?;
            let base = state.cost(from);
            if base.is_finite() && base + weight < state.cost(to) {
                state.relax(to, from, base + weight);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let mut cycle = false;
    for &(from, to, weight) in &weighted {
        ctx.checkpoint()?;
        let base = state.cost(from);
        if base.is_finite() && base + weight < state.cost(to) {
            cycle = true;
            break;
        }
    }
    if cycle {
        log::warn!("negative-weight cycle reachable from node {start}");
        return Err(SearchError::NegativeCycleDetected);
    }

    if !state.cost(end).is_finite() {
        return Err(SearchError::NoPathFound);
    }
    state.path_to(start, end)
}

pub(crate) fn run(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    options.expect_none()?;
    bellman_ford(graph, query, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wayfind_core::{DEFAULT_WEIGHT_KEY, Graph};

    fn graph(edges: &[(u64, u64, f64)]) -> Graph {
        let mut g = Graph::directed();
        for &(a, b, w) in edges {
            g.add_weighted_edge(a, b, DEFAULT_WEIGHT_KEY, w);
        }
        g
    }

    #[test]
    fn negative_edge_without_cycle() {
        let g = graph(&[(1, 2, 4.0), (1, 3, 5.0), (3, 2, -3.0), (2, 4, 1.0)]);
        let path = bellman_ford(&g, &Query::new(1, 4), &mut SearchContext::default()).unwrap();
        assert_eq!(path.nodes(), &[1, 3, 2, 4]);
        assert_eq!(path.cost(&g, DEFAULT_WEIGHT_KEY), Ok(3.0));
    }

    #[test]
    fn reachable_negative_cycle() {
        let g = graph(&[(1, 2, 1.0), (2, 3, -2.0), (3, 2, 1.0), (1, 4, 1.0)]);
        assert_eq!(
            bellman_ford(&g, &Query::new(1, 4), &mut SearchContext::default()),
            Err(SearchError::NegativeCycleDetected)
        );
    }

    #[test]
    fn unreachable_negative_cycle_is_ignored() {
        let g = graph(&[(1, 2, 1.0), (5, 6, -2.0), (6, 5, 1.0)]);
        let path = bellman_ford(&g, &Query::new(1, 2), &mut SearchContext::default()).unwrap();
        assert_eq!(path.nodes(), &[1, 2]);
    }

    #[test]
    fn unreachable_end() {
        let g = graph(&[(1, 2, 1.0), (3, 4, 1.0)]);
        assert_eq!(
            bellman_ford(&g, &Query::new(1, 4), &mut SearchContext::default()),
            Err(SearchError::NoPathFound)
        );
    }

    #[test]
    fn deadline_is_checked_within_a_pass() {
        let edges: Vec<_> = (0..200u64).map(|i| (i, i + 1, 1.0)).collect();
        let g = graph(&edges);
        let mut ctx = SearchContext::default();
        // move off the first deadline check, then let the deadline lapse
        ctx.checkpoint().unwrap();
        let mut ctx = ctx.with_deadline(Instant::now());
        assert_eq!(
            bellman_ford(&g, &Query::new(0, 200), &mut ctx),
            Err(SearchError::Cancelled)
        );
    }

    #[test]
    fn start_equals_end() {
        let g = graph(&[(1, 2, 1.0)]);
        let path = bellman_ford(&g, &Query::new(2, 2), &mut SearchContext::default()).unwrap();
        assert_eq!(path.nodes(), &[2]);
    }
}

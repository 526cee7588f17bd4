use std::collections::{BinaryHeap, HashSet};

use wayfind_core::GraphView;

use crate::heuristic::Estimator;
use crate::options::InformedOptions;
use crate::state::{NodeRef, SearchState, check_endpoints};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// Greedy best-first search: always expand the node that looks closest to
/// the end, ignoring the cost already paid.
///
/// Fast on open maps but with no optimality guarantee. Weights are never
/// read. Every node the search touches needs coordinates.
pub fn greedy_best_first<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &InformedOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);
    let estimator = Estimator::new(graph, end, &[opts.heuristic])?;

    let mut state = SearchState::new();
    let mut visited = HashSet::from([start]);
    let mut open = BinaryHeap::from([NodeRef::new(start, estimator.estimate(start)?, 0.0)]);
    let mut nbuf = Vec::new();

    while let Some(NodeRef { node, .. }) = open.pop() {
        ctx.checkpoint()?;
        if node == end {
            return state.path_to(start, end);
        }
        nbuf.clear();
        graph.neighbors(node, &mut nbuf);
        for &next in nbuf.iter() {
            if !visited.insert(next) {
                continue;
            }
            state.parent.insert(next, node);
            open.push(NodeRef::new(next, estimator.estimate(next)?, 0.0));
        }
    }

    Err(SearchError::NoPathFound)
}

pub(crate) fn run(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: InformedOptions = options.resolve()?;
    greedy_best_first(graph, query, &opts, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::{Coord, DEFAULT_WEIGHT_KEY, Graph};

    /// A straight expensive road and a cheap detour that starts by moving
    /// away from the goal.
    fn detour() -> Graph {
        let mut g = Graph::undirected();
        for (id, x, y) in [(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0), (4, 0.0, 5.0), (5, 2.0, 5.0)] {
            g.add_node(id, Some(Coord::new(x, y)));
        }
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 50.0);
        g.add_weighted_edge(2, 3, DEFAULT_WEIGHT_KEY, 50.0);
        g.add_weighted_edge(1, 4, DEFAULT_WEIGHT_KEY, 1.0);
        g.add_weighted_edge(4, 5, DEFAULT_WEIGHT_KEY, 1.0);
        g.add_weighted_edge(5, 3, DEFAULT_WEIGHT_KEY, 1.0);
        g
    }

    #[test]
    fn follows_the_heuristic_not_the_cost() {
        let g = detour();
        let path = greedy_best_first(
            &g,
            &Query::new(1, 3),
            &InformedOptions::default(),
            &mut SearchContext::default(),
        )
        .unwrap();
        assert_eq!(path.nodes(), &[1, 2, 3]);
    }

    #[test]
    fn unreachable_end() {
        let mut g = detour();
        g.add_node(6, Some(Coord::new(9.0, 9.0)));
        assert_eq!(
            greedy_best_first(
                &g,
                &Query::new(1, 6),
                &InformedOptions::default(),
                &mut SearchContext::default()
            ),
            Err(SearchError::NoPathFound)
        );
    }
}

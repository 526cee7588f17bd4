use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use wayfind_core::GraphView;

use crate::options::{AlgorithmOptions, RandomBfsOptions};
use crate::state::{SearchState, check_endpoints};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// Breadth-first search: the route with the fewest edges, ignoring weights.
///
/// Nodes are marked visited when enqueued, so each node gets its first
/// discovered parent.
pub fn bfs<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    breadth_first(graph, query, ctx, None)
}

/// Breadth-first search with neighbors shuffled at every expansion.
///
/// At most `max_steps` nodes are discovered; past that the search gives up
/// with [`SearchError::BudgetExceeded`]. The route has no cycles but no
/// shortest-path guarantee either.
pub fn random_bfs<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &RandomBfsOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    opts.validate()?;
    breadth_first(graph, query, ctx, Some(opts.max_steps))
}

/// `Some(max_steps)` turns on shuffling and the step budget.
fn breadth_first<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
    max_steps: Option<usize>,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);

    let mut state = SearchState::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut nbuf = Vec::new();
    let mut steps = 0;

    while let Some(current) = queue.pop_front() {
        ctx.checkpoint()?;
        if current == end {
            return state.path_to(start, end);
        }
        if let Some(limit) = max_steps {
            if steps >= limit {
                return Err(SearchError::BudgetExceeded { limit });
            }
        }

        nbuf.clear();
        graph.neighbors(current, &mut nbuf);
        if max_steps.is_some() {
            nbuf.shuffle(ctx.rng());
        }

        for &next in nbuf.iter() {
            if !visited.insert(next) {
                continue;
            }
            state.parent.insert(next, current);
            queue.push_back(next);
            steps += 1;
            if max_steps.is_some_and(|limit| steps >= limit) {
                break;
            }
        }
    }

    Err(SearchError::NoPathFound)
}

pub(crate) fn run_bfs(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    options.expect_none()?;
    bfs(graph, query, ctx)
}

pub(crate) fn run_random_bfs(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: RandomBfsOptions = options.resolve()?;
    random_bfs(graph, query, &opts, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::{DEFAULT_WEIGHT_KEY, Graph};

    /// 1 -> 2 -> 3 -> 4 with a shortcut 1 -> 4 that costs more.
    fn shortcut() -> Graph {
        let mut g = Graph::directed();
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 1.0);
        g.add_weighted_edge(2, 3, DEFAULT_WEIGHT_KEY, 1.0);
        g.add_weighted_edge(3, 4, DEFAULT_WEIGHT_KEY, 1.0);
        g.add_weighted_edge(1, 4, DEFAULT_WEIGHT_KEY, 50.0);
        g
    }

    #[test]
    fn bfs_prefers_fewest_edges_over_weight() {
        let g = shortcut();
        let path = bfs(&g, &Query::new(1, 4), &mut SearchContext::default()).unwrap();
        assert_eq!(path.nodes(), &[1, 4]);
    }

    #[test]
    fn bfs_unreachable_end() {
        let g = shortcut();
        assert_eq!(
            bfs(&g, &Query::new(4, 1), &mut SearchContext::default()),
            Err(SearchError::NoPathFound)
        );
    }

    #[test]
    fn random_bfs_budget() {
        let g = shortcut();
        let opts = RandomBfsOptions { max_steps: 1 };
        let mut ctx = SearchContext::seeded(3);
        assert_eq!(
            random_bfs(&g, &Query::new(2, 4), &opts, &mut ctx),
            Err(SearchError::BudgetExceeded { limit: 1 })
        );
    }

    #[test]
    fn random_bfs_is_reproducible_per_seed() {
        let mut g = Graph::undirected();
        for i in 0..30 {
            g.add_weighted_edge(i, i + 1, DEFAULT_WEIGHT_KEY, 1.0);
            g.add_weighted_edge(i, (i * 7 + 3) % 31, DEFAULT_WEIGHT_KEY, 1.0);
        }
        let opts = RandomBfsOptions::default();
        let q = Query::new(0, 17);
        let a = random_bfs(&g, &q, &opts, &mut SearchContext::seeded(11)).unwrap();
        let b = random_bfs(&g, &q, &opts, &mut SearchContext::seeded(11)).unwrap();
        assert_eq!(a, b);
        assert!(a.is_simple());
        assert_eq!(a.first(), Some(&0));
        assert_eq!(a.last(), Some(&17));
    }
}

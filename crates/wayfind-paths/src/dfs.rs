use std::collections::HashSet;

use rand::seq::SliceRandom;
use wayfind_core::{GraphView, NodeId};

use crate::options::RandomDfsOptions;
use crate::state::{SearchState, check_endpoints};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// Depth-first search: the first route found in exploration order.
///
/// Neighbors are explored in the order the graph lists them. No
/// shortest-path guarantee.
pub fn dfs<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    depth_first(graph, query, ctx, None)
}

/// Depth-first search with neighbors shuffled at every expansion.
///
/// Branches longer than `max_depth` edges are cut. If the goal was not
/// found and some branch was cut, the search reports
/// [`SearchError::BudgetExceeded`]. The route is always simple.
pub fn random_dfs<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &RandomDfsOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    depth_first(graph, query, ctx, Some(opts.max_depth))
}

/// `Some(max_depth)` turns on shuffling and the depth cut.
fn depth_first<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
    max_depth: Option<usize>,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);

    let mut state = SearchState::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    // (node, parent, depth)
    let mut stack = vec![(start, start, 0usize)];
    let mut nbuf = Vec::new();
    let mut cut = false;

    while let Some((current, parent, depth)) = stack.pop() {
        ctx.checkpoint()?;
        if !visited.insert(current) {
            continue;
        }
        if current != start {
            state.parent.insert(current, parent);
        }
        if current == end {
            return state.path_to(start, end);
        }

        nbuf.clear();
        graph.neighbors(current, &mut nbuf);
        if max_depth.is_some() {
            nbuf.shuffle(ctx.rng());
        }

        // Reverse so the first listed neighbor is explored first.
        for &next in nbuf.iter().rev() {
            if visited.contains(&next) {
                continue;
            }
            if max_depth.is_some_and(|limit| depth >= limit) {
                cut = true;
                continue;
            }
            stack.push((next, current, depth + 1));
        }
    }

    match max_depth {
        Some(limit) if cut => Err(SearchError::BudgetExceeded { limit }),
        _ => Err(SearchError::NoPathFound),
    }
}

pub(crate) fn run_dfs(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    options.expect_none()?;
    dfs(graph, query, ctx)
}

pub(crate) fn run_random_dfs(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: RandomDfsOptions = options.resolve()?;
    random_dfs(graph, query, &opts, ctx)
}

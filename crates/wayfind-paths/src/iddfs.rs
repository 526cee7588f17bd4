//! Iterative deepening depth-first search.
//!
//! Depth-limited searches run with limits 0, 1, 2, … and the first success
//! wins, so the route has the fewest edges, like breadth-first search, at
//! the price of re-exploring shallow levels on every round. Each round uses
//! an explicit stack of frames instead of recursion, so deep limits cannot
//! overflow the call stack.

use std::collections::HashSet;

use wayfind_core::{GraphView, NodeId};

use crate::options::IterativeDeepeningOptions;
use crate::state::check_endpoints;
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// One node on the current branch and how far through its neighbors we are.
struct Frame {
    neighbors: Vec<NodeId>,
    next: usize,
}

enum Round {
    Found(Path),
    /// Some branch hit the depth limit; a deeper round may succeed.
    CutOff,
    /// Every simple path from the start was explored.
    Exhausted,
}

/// Iterative deepening up to `opts.max_depth` edges.
///
/// Reports [`SearchError::NoPathFound`] as soon as a round explores every
/// simple path without touching its limit, and
/// [`SearchError::BudgetExceeded`] if `max_depth` is reached first.
pub fn iterative_deepening<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &IterativeDeepeningOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    for limit in 0..=opts.max_depth {
        match depth_limited(graph, query.start, query.end, limit, ctx)? {
            Round::Found(path) => return Ok(path),
            Round::Exhausted => return Err(SearchError::NoPathFound),
            Round::CutOff => {}
        }
    }
    Err(SearchError::BudgetExceeded {
        limit: opts.max_depth,
    })
}

fn depth_limited<G: GraphView + ?Sized>(
    graph: &G,
    start: NodeId,
    end: NodeId,
    limit: usize,
    ctx: &mut SearchContext,
) -> Result<Round, SearchError> {
    let mut branch = vec![start];
    if start == end {
        return Ok(Round::Found(Path::from(branch)));
    }
    let mut on_branch = HashSet::from([start]);
    let mut cut_off = false;
    let mut stack: Vec<Frame> = Vec::new();

    let mut nbuf = Vec::new();
    graph.neighbors(start, &mut nbuf);
    if limit == 0 {
        return Ok(if nbuf.is_empty() {
            Round::Exhausted
        } else {
            Round::CutOff
        });
    }
    stack.push(Frame {
        neighbors: nbuf,
        next: 0,
    });

    while let Some(frame) = stack.last_mut() {
        ctx.checkpoint()?;
        let Some(&next) = frame.neighbors.get(frame.next) else {
            stack.pop();
            if let Some(done) = branch.pop() {
                on_branch.remove(&done);
            }
            continue;
        };
        frame.next += 1;
        if on_branch.contains(&next) {
            continue;
        }

        branch.push(next);
        if next == end {
            return Ok(Round::Found(Path::from(branch)));
        }

        let mut neighbors = Vec::new();
        graph.neighbors(next, &mut neighbors);
        let depth = branch.len() - 1;
        if depth < limit {
            on_branch.insert(next);
            stack.push(Frame { neighbors, next: 0 });
        } else {
            if neighbors.iter().any(|n| !on_branch.contains(n)) {
                cut_off = true;
            }
            branch.pop();
        }
    }

    Ok(if cut_off { Round::CutOff } else { Round::Exhausted })
}

pub(crate) fn run(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: IterativeDeepeningOptions = options.resolve()?;
    iterative_deepening(graph, query, &opts, ctx)
}

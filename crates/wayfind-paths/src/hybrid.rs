use std::collections::{HashSet, VecDeque};

use rand::RngExt;
use rand::seq::SliceRandom;
use wayfind_core::{GraphView, NodeId};

use crate::options::{AlgorithmOptions, HybridOptions};
use crate::state::{SearchState, check_endpoints};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// How a branch schedules the children it discovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Children queue behind everything already waiting.
    Breadth,
    /// Children jump to the head of the queue.
    Depth,
}

impl Mode {
    fn flipped(self) -> Self {
        match self {
            Self::Breadth => Self::Depth,
            Self::Depth => Self::Breadth,
        }
    }
}

/// Hybrid breadth/depth search.
///
/// A single queue carries every branch with a mode tag. Each discovered
/// child inherits its parent's mode, flipped with probability
/// `toggle_prob`; breadth-mode children join the back of the queue and
/// depth-mode children the front. Neighbor order is shuffled and at most
/// `max_steps` nodes are discovered. This trades every optimality
/// guarantee for a tunable exploration order; the route is still simple.
pub fn hybrid<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &HybridOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    opts.validate()?;
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);
    let limit = opts.max_steps;

    let mut state = SearchState::new();
    let mut visited = HashSet::from([start]);
    let mut queue: VecDeque<(NodeId, Mode)> = VecDeque::from([(start, Mode::Breadth)]);
    let mut nbuf = Vec::new();
    let mut deep: Vec<(NodeId, Mode)> = Vec::new();
    let mut steps = 0;

    while let Some((current, mode)) = queue.pop_front() {
        ctx.checkpoint()?;
        if current == end {
            return state.path_to(start, end);
        }
        if steps >= limit {
            return Err(SearchError::BudgetExceeded { limit });
        }

        nbuf.clear();
        graph.neighbors(current, &mut nbuf);
        nbuf.shuffle(ctx.rng());

        deep.clear();
        for &next in nbuf.iter() {
            if !visited.insert(next) {
                continue;
            }
            state.parent.insert(next, current);
            let child = if ctx.rng().random::<f64>() < opts.toggle_prob {
                mode.flipped()
            } else {
                mode
            };
            match child {
                Mode::Breadth => queue.push_back((next, child)),
                Mode::Depth => deep.push((next, child)),
            }
            steps += 1;
            if steps >= limit {
                break;
            }
        }
        // keep the shuffled order among the children sent to the front
        for &entry in deep.iter().rev() {
            queue.push_front(entry);
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
    let opts: HybridOptions = options.resolve()?;
    hybrid(graph, query, &opts, ctx)
}

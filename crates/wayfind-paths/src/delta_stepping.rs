//! Delta-stepping shortest paths.
//!
//! Tentative distances are grouped into buckets of width `delta`; buckets
//! are settled in increasing order and each one is re-scanned until no
//! relaxation lands back in it. This runs sequentially. The same bucket
//! discipline is what lets the parallel formulation settle a whole bucket
//! at once.

use std::collections::BTreeMap;

use wayfind_core::{GraphView, NodeId};

use crate::options::{AlgorithmOptions, DeltaSteppingOptions};
use crate::state::{SearchState, check_endpoints, non_negative_weight};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

#[inline]
fn bucket_of(dist: f64, delta: f64) -> u64 {
    // saturating float-to-int cast; far distances share the last bucket
    (dist / delta).floor() as u64
}

/// Minimum-cost route with bucketed relaxation.
///
/// Agrees on cost with [`dijkstra`](fn@crate::dijkstra) for every positive
/// `delta`; `delta` only changes the amount of re-scanning. Requires
/// non-negative weights.
pub fn delta_stepping<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &DeltaSteppingOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    opts.validate()?;
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);
    let key = query.weight_key.as_str();
    let delta = opts.delta;

    let mut state = SearchState::rooted(start);
    let mut buckets: BTreeMap<u64, Vec<(NodeId, f64)>> = BTreeMap::from([(0, vec![(start, 0.0)])]);
    let mut nbuf = Vec::new();

    while let Some((index, mut bucket)) = buckets.pop_first() {
        // every remaining entry is at least index * delta away
        let best = state.cost(end);
        if best.is_finite() && bucket_of(best, delta) < index {
            break;
        }

        while let Some((node, dist)) = bucket.pop() {
            ctx.checkpoint()?;
            if dist > state.cost(node) {
                continue;
            }
            nbuf.clear();
            graph.neighbors(node, &mut nbuf);
            for &next in nbuf.iter() {
                let tentative = dist + non_negative_weight(graph, node, next, key)?;
                if tentative >= state.cost(next) {
                    continue;
                }
                state.relax(next, node, tentative);
                let target = bucket_of(tentative, delta);
                if target == index {
                    bucket.push((next, tentative));
                } else {
                    buckets.entry(target).or_default().push((next, tentative));
                }
            }
        }
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
    let opts: DeltaSteppingOptions = options.resolve()?;
    delta_stepping(graph, query, &opts, ctx)
}

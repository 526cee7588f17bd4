use wayfind_core::{GraphView, NodeId};

use crate::heuristic::Estimator;
use crate::options::{AlgorithmOptions, BeamOptions};
use crate::state::check_endpoints;
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// Beam search over whole partial routes.
///
/// Each level extends every kept route by one edge without revisiting its
/// own nodes, ranks the extensions by the heuristic at their last node and
/// keeps the best `beam_width`. The first kept route that reaches the end
/// wins. Narrow beams are fast but incomplete: once every route is pruned
/// or stuck the search reports [`SearchError::NoPathFound`].
pub fn beam_search<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &BeamOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    opts.validate()?;
    check_endpoints(graph, query)?;
    let (start, end) = (query.start, query.end);
    if start == end {
        return Ok(Path::from(vec![start]));
    }
    let estimator = Estimator::new(graph, end, &[opts.heuristic])?;

    let mut beam: Vec<Vec<NodeId>> = vec![vec![start]];
    let mut nbuf = Vec::new();

    while !beam.is_empty() {
        let mut candidates: Vec<(f64, Vec<NodeId>)> = Vec::new();
        for route in &beam {
            ctx.checkpoint()?;
            let Some(&last) = route.last() else {
                continue;
            };
            nbuf.clear();
            graph.neighbors(last, &mut nbuf);
            for &next in nbuf.iter() {
                if route.contains(&next) {
                    continue;
                }
                let mut extended = Vec::with_capacity(route.len() + 1);
                extended.extend_from_slice(route);
                extended.push(next);
                candidates.push((estimator.estimate(next)?, extended));
            }
        }

        // stable, so equally ranked routes keep discovery order
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        candidates.truncate(opts.beam_width);

        if let Some((_, route)) = candidates.iter().find(|(_, r)| r.last() == Some(&end)) {
            return Ok(Path::from(route.clone()));
        }
        beam = candidates.into_iter().map(|(_, route)| route).collect();
    }

    Err(SearchError::NoPathFound)
}

pub(crate) fn run(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: BeamOptions = options.resolve()?;
    beam_search(graph, query, &opts, ctx)
}

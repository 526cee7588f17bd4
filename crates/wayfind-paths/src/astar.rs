//! The A* family: plain, multi-heuristic and randomized.
//!
//! All three share one best-first loop ordered by `f = g + h`. There is no
//! closed set: a node whose cost improves after expansion is pushed again,
//! and heap entries whose `g` is no longer the best known are skipped on
//! pop. With an admissible and consistent estimate the first time the end
//! is popped its route is optimal.

use std::collections::BinaryHeap;

use rand::RngExt;
use rand::seq::SliceRandom;
use wayfind_core::{GraphView, NodeId};

use crate::heuristic::Estimator;
use crate::options::{AlgorithmOptions, InformedOptions, MultiHeuristicOptions, RandomizedAstarOptions};
use crate::state::{NodeRef, SearchState, check_endpoints, non_negative_weight};
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};

/// A* under a single heuristic.
///
/// Optimal when the heuristic never overestimates, which holds for both
/// built-in heuristics when weights are planar distances. Every node the
/// search touches needs coordinates.
pub fn astar<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &InformedOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    check_endpoints(graph, query)?;
    let estimator = Estimator::new(graph, query.end, &[opts.heuristic])?;
    best_first(graph, query, ctx, false, |node, _| estimator.estimate(node))
}

/// A* using the minimum of several heuristics at each node.
pub fn multi_heuristic_astar<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &MultiHeuristicOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    opts.validate()?;
    check_endpoints(graph, query)?;
    let estimator = Estimator::new(graph, query.end, &opts.heuristics)?;
    best_first(graph, query, ctx, false, |node, _| estimator.estimate(node))
}

/// A* with a noisy estimate and shuffled expansion order.
///
/// Each estimate becomes `h * (1 - r) + u * h * r` with `u` uniform in
/// `[0, 1)` and `r` the configured randomness, so it never exceeds `h` and
/// stays admissible. `r = 0` behaves like plain A*.
pub fn randomized_astar<G: GraphView + ?Sized>(
    graph: &G,
    query: &Query,
    opts: &RandomizedAstarOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    opts.validate()?;
    check_endpoints(graph, query)?;
    let estimator = Estimator::new(graph, query.end, &[opts.heuristic])?;
    let r = opts.randomness;
    best_first(graph, query, ctx, true, |node, ctx| {
        let h = estimator.estimate(node)?;
        Ok(h * (1.0 - r) + ctx.rng().random::<f64>() * h * r)
    })
}

fn best_first<G, H>(
    graph: &G,
    query: &Query,
    ctx: &mut SearchContext,
    shuffle: bool,
    mut estimate: H,
) -> Result<Path, SearchError>
where
    G: GraphView + ?Sized,
    H: FnMut(NodeId, &mut SearchContext) -> Result<f64, SearchError>,
{
    let (start, end) = (query.start, query.end);
    let key = query.weight_key.as_str();

    let mut state = SearchState::rooted(start);
    let h = estimate(start, ctx)?;
    // tie carries g so stale entries can be recognised
    let mut open = BinaryHeap::from([NodeRef::new(start, h, 0.0)]);
    let mut nbuf = Vec::new();

    while let Some(NodeRef { node, tie: g, .. }) = open.pop() {
        ctx.checkpoint()?;
        if g > state.cost(node) {
            continue;
        }
        if node == end {
            return state.path_to(start, end);
        }

        nbuf.clear();
        graph.neighbors(node, &mut nbuf);
        if shuffle {
            nbuf.shuffle(ctx.rng());
        }
        for &next in nbuf.iter() {
            let tentative = g + non_negative_weight(graph, node, next, key)?;
            if tentative < state.cost(next) {
                state.relax(next, node, tentative);
                let h = estimate(next, ctx)?;
                open.push(NodeRef::new(next, tentative + h, tentative));
            }
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
    astar(graph, query, &opts, ctx)
}

pub(crate) fn run_multi_heuristic(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: MultiHeuristicOptions = options.resolve()?;
    multi_heuristic_astar(graph, query, &opts, ctx)
}

pub(crate) fn run_randomized(
    graph: &dyn GraphView,
    query: &Query,
    options: &SearchOptions,
    ctx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let opts: RandomizedAstarOptions = options.resolve()?;
    randomized_astar(graph, query, &opts, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Heuristic;
    use wayfind_core::{Coord, DEFAULT_WEIGHT_KEY, Graph, euclidean};

    /// Grid with Euclidean edge lengths and a wall of missing edges.
    fn walled_grid() -> Graph {
        let n = 8;
        let mut g = Graph::undirected();
        for y in 0..n {
            for x in 0..n {
                g.add_node(y * n + x, Some(Coord::new(x as f64, y as f64)));
            }
        }
        let link = |g: &mut Graph, a: u64, b: u64| {
            let (ca, cb) = (g.coordinates(a).unwrap(), g.coordinates(b).unwrap());
            g.add_weighted_edge(a, b, DEFAULT_WEIGHT_KEY, euclidean(ca, cb));
        };
        for y in 0..n {
            for x in 0..n {
                let id = y * n + x;
                // wall between columns 3 and 4 except on the top row
                if x + 1 < n && !(x == 3 && y > 0) {
                    link(&mut g, id, id + 1);
                }
                if y + 1 < n {
                    link(&mut g, id, id + n);
                }
                if x + 1 < n && y + 1 < n && x != 3 {
                    link(&mut g, id, id + n + 1);
                }
            }
        }
        g
    }

    fn optimum(g: &Graph, q: &Query) -> f64 {
        crate::dijkstra(g, q, &mut SearchContext::default())
            .unwrap()
            .cost(g, DEFAULT_WEIGHT_KEY)
            .unwrap()
    }

    #[test]
    fn astar_is_optimal_with_admissible_heuristics() {
        let g = walled_grid();
        let q = Query::new(56, 63);
        let best = optimum(&g, &q);
        for heuristic in [Heuristic::Euclidean, Heuristic::Manhattan] {
            let path = astar(&g, &q, &InformedOptions { heuristic }, &mut SearchContext::default())
                .unwrap();
            let cost = path.cost(&g, DEFAULT_WEIGHT_KEY).unwrap();
            if heuristic == Heuristic::Euclidean {
                assert!((cost - best).abs() < 1e-9);
            } else {
                // Manhattan overestimates diagonals, so only validity is guaranteed
                assert!(cost >= best - 1e-9);
            }
        }
    }

    #[test]
    fn multi_heuristic_matches_the_optimum() {
        let g = walled_grid();
        let q = Query::new(0, 63);
        let path = multi_heuristic_astar(
            &g,
            &q,
            &MultiHeuristicOptions::default(),
            &mut SearchContext::default(),
        )
        .unwrap();
        let cost = path.cost(&g, DEFAULT_WEIGHT_KEY).unwrap();
        assert!((cost - optimum(&g, &q)).abs() < 1e-9);
    }

    #[test]
    fn randomized_astar_stays_optimal_and_reproducible() {
        let g = walled_grid();
        let q = Query::new(7, 56);
        let best = optimum(&g, &q);
        let opts = RandomizedAstarOptions {
            randomness: 0.5,
            ..Default::default()
        };
        let a = randomized_astar(&g, &q, &opts, &mut SearchContext::seeded(3)).unwrap();
        let b = randomized_astar(&g, &q, &opts, &mut SearchContext::seeded(3)).unwrap();
        assert_eq!(a, b);
        assert!((a.cost(&g, DEFAULT_WEIGHT_KEY).unwrap() - best).abs() < 1e-9);
    }

    #[test]
    fn missing_coordinates() {
        let mut g = walled_grid();
        g.add_weighted_edge(0, 100, DEFAULT_WEIGHT_KEY, 1.0);
        assert_eq!(
            astar(
                &g,
                &Query::new(0, 100),
                &InformedOptions::default(),
                &mut SearchContext::default()
            ),
            Err(SearchError::MissingCoordinates(100))
        );
        assert_eq!(
            astar(
                &g,
                &Query::new(100, 0),
                &InformedOptions::default(),
                &mut SearchContext::default()
            ),
            Err(SearchError::MissingCoordinates(100))
        );
    }

    #[test]
    fn unknown_endpoint_wins_over_missing_coordinates() {
        let g = walled_grid();
        assert_eq!(
            multi_heuristic_astar(
                &g,
                &Query::new(0, 999),
                &MultiHeuristicOptions::default(),
                &mut SearchContext::default()
            ),
            Err(SearchError::InvalidEndpoint(999))
        );
    }
}

use std::collections::HashSet;

use rand::{Rng, RngExt};
use wayfind_core::{Coord, Graph, NodeId};

/// Draws per wanted pair before giving up on a graph too small or too
/// clustered to yield more distinct pairs.
const ATTEMPTS_PER_PAIR: usize = 100;

/// Up to `n` distinct endpoint pairs with `start != end`.
///
/// Each endpoint is a uniform point in the graph's bounding box snapped to
/// the nearest node, which favors nodes in sparse areas the way picking
/// spots on a map does. Returns fewer pairs when the graph cannot provide
/// enough, and none when fewer than two nodes have coordinates.
pub fn sample_pairs(graph: &Graph, n: usize, rng: &mut impl Rng) -> Vec<(NodeId, NodeId)> {
    let Some((lo, hi)) = graph.bounds() else {
        return Vec::new();
    };
    let mut pairs = Vec::with_capacity(n);
    let mut seen = HashSet::new();
    let mut attempts = n.saturating_mul(ATTEMPTS_PER_PAIR);

    while pairs.len() < n && attempts > 0 {
        attempts -= 1;
        let mut draw = || {
            let p = Coord::new(rng.random_range(lo.x..=hi.x), rng.random_range(lo.y..=hi.y));
            graph.nearest_node(p)
        };
        let (Some(start), Some(end)) = (draw(), draw()) else {
            break;
        };
        if start != end && seen.insert((start, end)) {
            pairs.push((start, end));
        }
    }
    if pairs.len() < n {
        log::warn!("sampled only {} of {n} endpoint pairs", pairs.len());
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scatter() -> Graph {
        let mut g = Graph::undirected();
        for i in 0..30u64 {
            g.add_node(i, Some(Coord::new((i % 6) as f64 * 10.0, (i / 6) as f64 * 10.0)));
        }
        g
    }

    #[test]
    fn pairs_are_distinct_and_never_loop() {
        let g = scatter();
        let pairs = sample_pairs(&g, 40, &mut StdRng::seed_from_u64(4));
        assert_eq!(pairs.len(), 40);
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), 40);
        assert!(pairs.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let g = scatter();
        let a = sample_pairs(&g, 10, &mut StdRng::seed_from_u64(8));
        let b = sample_pairs(&g, 10, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_graphs_give_what_they_can() {
        let mut g = Graph::undirected();
        g.add_node(1, Some(Coord::new(0.0, 0.0)));
        assert!(sample_pairs(&g, 5, &mut StdRng::seed_from_u64(1)).is_empty());

        g.add_node(2, Some(Coord::new(1.0, 0.0)));
        let pairs = sample_pairs(&g, 5, &mut StdRng::seed_from_u64(1));
        assert!(pairs.len() <= 2);
        assert!(pairs.iter().all(|(a, b)| a != b));

        assert!(sample_pairs(&Graph::directed(), 5, &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn infinite_coordinates_do_not_break_sampling() {
        let mut g = scatter();
        g.add_node(99, Some(Coord::new(f64::INFINITY, 0.0)));
        let pairs = sample_pairs(&g, 10, &mut StdRng::seed_from_u64(2));
        assert_eq!(pairs.len(), 10);
        assert!(pairs.iter().all(|(a, b)| a != b));
    }
}

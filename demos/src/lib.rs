//! Shared pieces of the wayfind demo: a synthetic street map, JSON map
//! loading, and the comparison table.

use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use wayfind_bench::AlgorithmSummary;
use wayfind_core::{Coord, DEFAULT_WEIGHT_KEY, Graph, GraphData, GraphView, euclidean};

/// Distance between neighboring intersections, in meters.
pub const BLOCK: f64 = 100.0;

/// A `width` x `height` street grid with jittered intersections.
///
/// Street lengths are the straight-line distance stretched by up to 20%, so
/// planar heuristics stay admissible. About one street in ten is missing,
/// which leaves dead ends for the uninformed searches to wander into.
pub fn street_grid(width: u64, height: u64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::undirected();
    for y in 0..height {
        for x in 0..width {
            let jitter = (rng.random_range(-0.2..0.2), rng.random_range(-0.2..0.2));
            let c = Coord::new((x as f64 + jitter.0) * BLOCK, (y as f64 + jitter.1) * BLOCK);
            g.add_node(y * width + x, Some(c));
        }
    }

    let street = |g: &mut Graph, a: u64, b: u64, rng: &mut StdRng| {
        if rng.random_range(0..10) == 0 {
            return;
        }
        let (Some(ca), Some(cb)) = (g.coordinates(a), g.coordinates(b)) else {
            return;
        };
        let length = euclidean(ca, cb) * rng.random_range(1.0..1.2);
        g.add_weighted_edge(a, b, DEFAULT_WEIGHT_KEY, length);
    };
    for y in 0..height {
        for x in 0..width {
            let id = y * width + x;
            if x + 1 < width {
                street(&mut g, id, id + 1, &mut rng);
            }
            if y + 1 < height {
                street(&mut g, id, id + width, &mut rng);
            }
        }
    }
    g
}

/// Load a graph saved as [`GraphData`] JSON.
pub fn load_graph(path: &Path) -> Result<Graph, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let data: GraphData = serde_json::from_str(&text)?;
    Ok(Graph::from_data(data)?)
}

/// Plain-text comparison table, one row per strategy.
pub fn format_summary(summaries: &[AlgorithmSummary], baseline: &str) -> String {
    let opt = |v: Option<f64>, digits: usize| match v {
        Some(v) => format!("{v:.digits$}"),
        None => "-".to_string(),
    };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<34} {:>6} {:>11} {:>11} {:>10} {:>10} {:>8} {:>8}",
        "algorithm", "found", "runtime ms", "std ms", "cost", "std", "rt/base", "cost/base"
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "{:<34} {:>5.0}% {:>11.3} {:>11} {:>10} {:>10} {:>8} {:>8}",
            s.algorithm,
            s.success_rate * 100.0,
            s.mean_runtime * 1e3,
            opt(s.std_runtime.map(|x| x * 1e3), 3),
            opt(s.mean_cost, 1),
            opt(s.std_cost, 1),
            opt(s.runtime_ratio, 2),
            opt(s.cost_ratio, 3),
        );
    }
    let _ = writeln!(out, "ratios are relative to {baseline}");
    out
}

//! Runs every registered search strategy over random endpoint pairs on one
//! map and prints how they compare.
//!
//! Run: cargo run --bin wayfind-demo -- --grid 30 --pairs 50

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wayfind_bench::{BatchConfig, BatchRunner, plan, sample_pairs, summarize};
use wayfind_core::{DEFAULT_WEIGHT_KEY, GraphView};
use wayfind_demos::{format_summary, load_graph, street_grid};
use wayfind_paths::AlgorithmRegistry;

#[derive(Parser, Debug)]
#[command(version, about = "Compare wayfind search strategies on one map")]
struct Args {
    /// Map saved as graph JSON; a synthetic street grid is used otherwise.
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Side length of the synthetic street grid.
    #[arg(long, default_value_t = 20)]
    grid: u64,

    /// Endpoint pairs to route.
    #[arg(short, long, default_value_t = 25)]
    pairs: usize,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Worker threads; 0 uses one per core.
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Per-search time limit in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Edge attribute used as the weight.
    #[arg(long, default_value = DEFAULT_WEIGHT_KEY)]
    weight_key: String,

    /// Strategy the ratios are relative to.
    #[arg(long, default_value = wayfind_bench::DEFAULT_BASELINE)]
    baseline: String,

    /// Write every record and the summary as JSON.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    let args = Args::parse();

    let graph = match &args.graph {
        Some(path) => load_graph(path)?,
        None => street_grid(args.grid, args.grid, args.seed),
    };
    log::info!("map has {} nodes and {} edges", graph.node_count(), graph.edge_count());

    let registry = AlgorithmRegistry::with_builtins();
    for (name, color) in registry.list_algorithms() {
        log::debug!("{color} {name}");
    }
    registry.lookup(&args.baseline)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let pairs = sample_pairs(&graph, args.pairs, &mut rng);
    let names: Vec<&str> = registry.list().iter().map(|d| d.name()).collect();
    let jobs = plan(&names, &pairs, args.seed);

    let config = BatchConfig {
        threads: args.threads,
        timeout: args.timeout_ms.map(Duration::from_millis),
        weight_key: args.weight_key.clone(),
    };
    let runner = BatchRunner::new(&registry, config)?;
    let records = runner.run(&graph, &jobs)?;
    let summaries = summarize(&records, &args.baseline)?;

    print!("{}", format_summary(&summaries, &args.baseline));

    if let Some(path) = &args.output {
        let report = serde_json::json!({
            "pairs": pairs,
            "records": records,
            "summary": summaries,
        });
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &report)?;
        log::info!("report written to {}", path.display());
    }
    Ok(())
}

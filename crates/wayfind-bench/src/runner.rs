use std::time::{Duration, Instant};

use rayon::prelude::*;
use wayfind_core::{DEFAULT_WEIGHT_KEY, GraphView, NodeId};
use wayfind_paths::{
    AlgorithmRegistry, CancelToken, Path, Query, SearchContext, SearchError, SearchOptions,
};

use crate::BenchError;

/// One search to run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchJob {
    /// Registry name of the strategy.
    pub algorithm: String,
    pub start: NodeId,
    pub end: NodeId,
    pub options: SearchOptions,
    /// Seed of the job's random source.
    pub seed: u64,
}

/// How a job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "snake_case")
)]
pub enum Outcome {
    Found,
    /// The strategy ran and reported that it has no route.
    NoRoute { reason: String },
    /// The job hit its timeout or the batch was cancelled.
    Cancelled,
    /// Bad options or bad graph data.
    Failed { reason: String },
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Measurements of one finished job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchRecord {
    /// Position of the job in the submitted batch.
    pub index: usize,
    pub algorithm: String,
    pub start: NodeId,
    pub end: NodeId,
    pub runtime: Duration,
    /// Route cost under the batch weight key, when a route was found.
    pub cost: Option<f64>,
    pub hops: usize,
    pub outcome: Outcome,
}

/// Batch runner settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Worker threads; 0 lets rayon decide.
    pub threads: usize,
    /// Per-job time limit.
    pub timeout: Option<Duration>,
    /// Weight attribute every job searches and is priced under.
    pub weight_key: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            timeout: None,
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
        }
    }
}

/// Every algorithm against every pair, with per-pair seeds derived from
/// `seed` so a whole plan is reproducible.
pub fn plan(algorithms: &[&str], pairs: &[(NodeId, NodeId)], seed: u64) -> Vec<BatchJob> {
    let mut jobs = Vec::with_capacity(algorithms.len() * pairs.len());
    for (i, &(start, end)) in pairs.iter().enumerate() {
        for &algorithm in algorithms {
            jobs.push(BatchJob {
                algorithm: algorithm.to_string(),
                start,
                end,
                options: SearchOptions::Default,
                seed: seed.wrapping_add(i as u64),
            });
        }
    }
    jobs
}

/// Runs batches of independent searches on a bounded thread pool.
///
/// The graph is only read, and every search allocates its own state, so
/// jobs share nothing but the graph and the registry.
pub struct BatchRunner<'r> {
    registry: &'r AlgorithmRegistry,
    pool: rayon::ThreadPool,
    config: BatchConfig,
    cancel: CancelToken,
}

impl<'r> BatchRunner<'r> {
    pub fn new(registry: &'r AlgorithmRegistry, config: BatchConfig) -> Result<Self, BenchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("wayfind-bench-{i}"))
            .build()?;
        log::info!("batch pool ready with {} workers", pool.current_num_threads());
        Ok(Self {
            registry,
            pool,
            config,
            cancel: CancelToken::new(),
        })
    }

    /// Token that cancels every job of the running and later batches.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run `jobs` against `graph`. Records come back in job order
    /// whatever order the workers finish in.
    ///
    /// Fails before running anything if a job names an unknown algorithm.
    pub fn run(
        &self,
        graph: &(dyn GraphView + Sync),
        jobs: &[BatchJob],
    ) -> Result<Vec<BatchRecord>, BenchError> {
        for job in jobs {
            self.registry.lookup(&job.algorithm)?;
        }
        let started = Instant::now();
        let records: Vec<BatchRecord> = self.pool.install(|| {
            jobs.par_iter()
                .enumerate()
                .map(|(index, job)| self.run_one(graph, index, job))
                .collect()
        });
        let found = records.iter().filter(|r| r.outcome.is_found()).count();
        log::info!(
            "batch of {} jobs done in {:.3?}, {found} routes found",
            records.len(),
            started.elapsed()
        );
        Ok(records)
    }

    fn run_one(&self, graph: &(dyn GraphView + Sync), index: usize, job: &BatchJob) -> BatchRecord {
        let mut ctx = SearchContext::seeded(job.seed).with_cancel_token(self.cancel.clone());
        if let Some(timeout) = self.config.timeout {
            ctx = ctx.with_timeout(timeout);
        }
        let query = Query::new(job.start, job.end).with_weight_key(self.config.weight_key.as_str());

        let clock = Instant::now();
        let result = self
            .registry
            .run(&job.algorithm, graph, &query, &job.options, &mut ctx);
        let runtime = clock.elapsed();

        let (cost, hops, outcome) = self.assess(graph, job, result);
        BatchRecord {
            index,
            algorithm: job.algorithm.clone(),
            start: job.start,
            end: job.end,
            runtime,
            cost,
            hops,
            outcome,
        }
    }

    fn assess(
        &self,
        graph: &(dyn GraphView + Sync),
        job: &BatchJob,
        result: Result<Path, SearchError>,
    ) -> (Option<f64>, usize, Outcome) {
        match result {
            Ok(path) => match path.cost(graph, &self.config.weight_key) {
                Ok(cost) => (Some(cost), path.hops(), Outcome::Found),
                Err(err) => (None, path.hops(), Outcome::Failed { reason: err.to_string() }),
            },
            Err(SearchError::Cancelled) => {
                log::warn!(
                    "{} {} -> {} cancelled or timed out",
                    job.algorithm,
                    job.start,
                    job.end
                );
                (None, 0, Outcome::Cancelled)
            }
            Err(err) if err.is_unroutable() => (None, 0, Outcome::NoRoute { reason: err.to_string() }),
            Err(err) => (None, 0, Outcome::Failed { reason: err.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::{Coord, Graph};

    fn line(n: u64) -> Graph {
        let mut g = Graph::undirected();
        for i in 0..n {
            g.add_node(i, Some(Coord::new(i as f64, 0.0)));
        }
        for i in 1..n {
            g.add_weighted_edge(i - 1, i, DEFAULT_WEIGHT_KEY, 1.0);
        }
        g
    }

    #[test]
    fn plan_crosses_algorithms_and_pairs() {
        let jobs = plan(&["A*", "Dijkstra"], &[(0, 3), (2, 1)], 10);
        assert_eq!(jobs.len(), 4);
        assert_eq!(jobs[1].algorithm, "Dijkstra");
        assert_eq!((jobs[1].start, jobs[1].end, jobs[1].seed), (0, 3, 10));
        assert_eq!((jobs[2].start, jobs[2].end, jobs[2].seed), (2, 1, 11));
    }

    #[test]
    fn records_follow_submission_order() {
        let registry = AlgorithmRegistry::with_builtins();
        let g = line(50);
        let config = BatchConfig {
            threads: 4,
            ..Default::default()
        };
        let runner = BatchRunner::new(&registry, config).unwrap();
        let pairs: Vec<(NodeId, NodeId)> = (0..20).map(|i| (i, 49 - i)).collect();
        let names: Vec<&str> = registry.list().iter().map(|d| d.name()).collect();
        let jobs = plan(&names, &pairs, 1);

        let records = runner.run(&g, &jobs).unwrap();
        assert_eq!(records.len(), jobs.len());
        for (i, (record, job)) in records.iter().zip(&jobs).enumerate() {
            assert_eq!(record.index, i);
            assert_eq!(record.algorithm, job.algorithm);
            assert_eq!((record.start, record.end), (job.start, job.end));
        }
        let dijkstra = records.iter().find(|r| r.algorithm == "Dijkstra").unwrap();
        assert_eq!(dijkstra.outcome, Outcome::Found);
        assert_eq!(dijkstra.cost, Some(49.0));
        assert_eq!(dijkstra.hops, 49);
    }

    #[test]
    fn outcomes_are_classified() {
        let registry = AlgorithmRegistry::with_builtins();
        let mut g = line(5);
        g.add_node(9, None);
        let runner = BatchRunner::new(&registry, BatchConfig::default()).unwrap();
        let mut jobs = plan(&["Dijkstra", "A*"], &[(0, 9)], 0);
        jobs.push(BatchJob {
            options: SearchOptions::Beam(Default::default()),
            ..plan(&["Dijkstra"], &[(0, 4)], 0).remove(0)
        });

        let records = runner.run(&g, &jobs).unwrap();
        assert!(matches!(records[0].outcome, Outcome::NoRoute { .. }));
        // node 9 has no coordinates for the heuristic
        assert!(matches!(records[1].outcome, Outcome::Failed { .. }));
        assert!(matches!(records[2].outcome, Outcome::Failed { .. }));
    }

    #[test]
    fn cancelled_batch_is_recorded_not_raised() {
        let registry = AlgorithmRegistry::with_builtins();
        let g = line(10);
        let runner = BatchRunner::new(&registry, BatchConfig::default()).unwrap();
        runner.cancel_token().cancel();
        let records = runner.run(&g, &plan(&["Breadth-First Search"], &[(0, 9)], 0)).unwrap();
        assert_eq!(records[0].outcome, Outcome::Cancelled);
        assert_eq!(records[0].cost, None);
    }

    #[test]
    fn unknown_algorithm_fails_the_batch_up_front() {
        let registry = AlgorithmRegistry::with_builtins();
        let runner = BatchRunner::new(&registry, BatchConfig::default()).unwrap();
        let err = runner.run(&line(3), &plan(&["Teleport"], &[(0, 2)], 0)).unwrap_err();
        assert!(matches!(err, BenchError::Registry(_)));
    }
}

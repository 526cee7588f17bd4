//! Interchangeable route search strategies over a [`GraphView`].
//!
//! Every strategy takes a graph, a [`Query`] (endpoints plus the weight
//! attribute to read), its typed options and a [`SearchContext`], and
//! returns `Result<Path, SearchError>`. Strategies can be called directly
//! or by name through an [`AlgorithmRegistry`].
//!
//! | Registry name | Function | Guarantee |
//! |---|---|---|
//! | Breadth-First Search | [`bfs()`] | fewest edges |
//! | Depth-First Search | [`dfs()`] | none |
//! | Iterative Deepening Search | [`iterative_deepening`] | fewest edges |
//! | Random Breadth-First Search | [`random_bfs`] | simple route |
//! | Random Depth-First Search | [`random_dfs`] | simple route |
//! | Hybrid Breadth-Depth First Search | [`hybrid()`] | simple route |
//! | Dijkstra | [`dijkstra()`] | minimum cost, weights ≥ 0 |
//! | Bellman-Ford Algorithm | [`bellman_ford()`] | minimum cost, any weights |
//! | Delta-Stepping | [`delta_stepping()`] | minimum cost, weights ≥ 0 |
//! | A* | [`astar()`] | minimum cost with an admissible heuristic |
//! | Greedy Best-First Search | [`greedy_best_first`] | none |
//! | Multi-Heuristic A* Algorithm | [`multi_heuristic_astar`] | minimum cost with admissible heuristics |
//! | Randomized A* Algorithm | [`randomized_astar`] | valid route |
//! | Beam Search | [`beam_search`] | simple route, may miss one |
//!
//! # Failure
//!
//! Outcomes where [`SearchError::is_unroutable`] holds mean "no route";
//! [`AlgorithmRegistry::route`] turns them into an empty [`Path`]. Anything
//! else is a fault in the graph data or the options and is always returned.
//!
//! # Randomness
//!
//! Randomized strategies draw only from [`SearchContext::rng`]. Two runs
//! with contexts seeded alike return the same route.

mod astar;
mod beam;
mod bellman_ford;
mod bfs;
mod context;
mod delta_stepping;
mod dfs;
mod dijkstra;
mod error;
mod greedy;
mod heuristic;
mod hybrid;
mod iddfs;
mod options;
mod path;
mod registry;
mod state;


pub use astar::{astar, multi_heuristic_astar, randomized_astar};
pub use beam::beam_search;
pub use bellman_ford::bellman_ford;
pub use bfs::{bfs, random_bfs};
pub use context::{CancelToken, SearchContext};
pub use delta_stepping::delta_stepping;
pub use dfs::{dfs, random_dfs};
pub use dijkstra::{dijkstra, shortest_path};
pub use error::{RegistryError, SearchError};
pub use greedy::greedy_best_first;
pub use heuristic::{Estimator, Heuristic};
pub use hybrid::hybrid;
pub use iddfs::iterative_deepening;
pub use options::{
    AlgorithmOptions, BeamOptions, DeltaSteppingOptions, HybridOptions, InformedOptions,
    IterativeDeepeningOptions, MultiHeuristicOptions, RandomBfsOptions, RandomDfsOptions,
    RandomizedAstarOptions, SearchOptions,
};
pub use path::{Path, Query};
pub use registry::{AlgorithmDescriptor, AlgorithmRegistry, Color, ColorSequence, SearchFn};

pub use wayfind_core::{GraphView, NodeId};

//! Named search strategies and their display colors.
//!
//! An [`AlgorithmRegistry`] is built once at startup, usually with
//! [`AlgorithmRegistry::with_builtins`], and then shared by reference with
//! every consumer. Nothing registers itself behind the caller's back.

use std::collections::HashMap;
use std::fmt;

use wayfind_core::GraphView;

use crate::error::RegistryError;
use crate::{Path, Query, SearchContext, SearchError, SearchOptions};
use crate::{astar, beam, bellman_ford, bfs, delta_stepping, dfs, dijkstra, greedy, hybrid, iddfs};

/// Signature every registered strategy is called through.
pub type SearchFn =
    fn(&dyn GraphView, &Query, &SearchOptions, &mut SearchContext) -> Result<Path, SearchError>;

/// Golden-ratio conjugate; stepping hues by it spreads them evenly.
const HUE_STEP: f64 = 0.618033988749895;
const SATURATION: f64 = 0.5;
const VALUE: f64 = 0.95;

/// 24-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from hue, saturation and value, each in `[0, 1]`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        let channel = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Endless sequence of well-separated colors. Deterministic: the n-th color
/// is always the same.
#[derive(Debug, Clone, Default)]
pub struct ColorSequence {
    index: u32,
}

impl ColorSequence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for ColorSequence {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let hue = (f64::from(self.index) * HUE_STEP).fract();
        self.index = self.index.wrapping_add(1);
        Some(Color::from_hsv(hue, SATURATION, VALUE))
    }
}

/// A registered strategy.
#[derive(Clone)]
pub struct AlgorithmDescriptor {
    name: String,
    func: SearchFn,
    color: Color,
}

impl AlgorithmDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Run the strategy and log how it ended.
    pub fn run(
        &self,
        graph: &dyn GraphView,
        query: &Query,
        options: &SearchOptions,
        ctx: &mut SearchContext,
    ) -> Result<Path, SearchError> {
        let result = (self.func)(graph, query, options, ctx);
        match &result {
            Ok(path) => log::debug!(
                "{}: {} -> {} found, {} hops",
                self.name,
                query.start,
                query.end,
                path.hops()
            ),
            Err(err) => log::debug!("{}: {} -> {}: {err}", self.name, query.start, query.end),
        }
        result
    }
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("name", &self.name)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

const BUILTINS: [(&str, SearchFn); 14] = [
    ("Breadth-First Search", bfs::run_bfs),
    ("Depth-First Search", dfs::run_dfs),
    ("Iterative Deepening Search", iddfs::run),
    ("Random Breadth-First Search", bfs::run_random_bfs),
    ("Random Depth-First Search", dfs::run_random_dfs),
    ("Hybrid Breadth-Depth First Search", hybrid::run),
    ("Dijkstra", dijkstra::run),
    ("Bellman-Ford Algorithm", bellman_ford::run),
    ("Delta-Stepping", delta_stepping::run),
    ("A*", astar::run),
    ("Greedy Best-First Search", greedy::run),
    ("Multi-Heuristic A* Algorithm", astar::run_multi_heuristic),
    ("Randomized A* Algorithm", astar::run_randomized),
    ("Beam Search", beam::run),
];

/// Name-to-strategy mapping with unique names and distinct colors.
#[derive(Debug, Default)]
pub struct AlgorithmRegistry {
    entries: Vec<AlgorithmDescriptor>,
    index: HashMap<String, usize>,
    colors: ColorSequence,
}

impl AlgorithmRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in strategy, in a fixed order.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, func) in BUILTINS {
            if let Err(err) = registry.register(name, func) {
                log::error!("built-in table is inconsistent: {err}");
            }
        }
        registry
    }

    /// Register `func` under `name` with the next automatic color.
    ///
    /// Fails with [`RegistryError::DuplicateAlgorithm`] if the name is
    /// taken; the existing entry is left untouched and no color is used up.
    pub fn register(&mut self, name: &str, func: SearchFn) -> Result<Color, RegistryError> {
        self.ensure_free(name)?;
        let color = self.colors.next().unwrap_or(Color::new(0, 0, 0));
        self.insert(name, func, color);
        Ok(color)
    }

    /// Register `func` under `name` with an explicit color.
    pub fn register_with_color(
        &mut self,
        name: &str,
        func: SearchFn,
        color: Color,
    ) -> Result<(), RegistryError> {
        self.ensure_free(name)?;
        self.insert(name, func, color);
        Ok(())
    }

    fn ensure_free(&self, name: &str) -> Result<(), RegistryError> {
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateAlgorithm(name.to_string()));
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, func: SearchFn, color: Color) {
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(AlgorithmDescriptor {
            name: name.to_string(),
            func,
            color,
        });
    }

    pub fn lookup(&self, name: &str) -> Result<&AlgorithmDescriptor, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Every descriptor, in registration order.
    pub fn list(&self) -> &[AlgorithmDescriptor] {
        &self.entries
    }

    /// `(name, color)` of every strategy, for selection menus.
    pub fn list_algorithms(&self) -> Vec<(&str, Color)> {
        self.entries.iter().map(|d| (d.name(), d.color)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the strategy called `name`, returning its typed outcome.
    pub fn run(
        &self,
        name: &str,
        graph: &dyn GraphView,
        query: &Query,
        options: &SearchOptions,
        ctx: &mut SearchContext,
    ) -> Result<Path, SearchError> {
        self.lookup(name)?.run(graph, query, options, ctx)
    }

    /// Like [`run`](Self::run), but every "no route" outcome becomes an
    /// empty path. Configuration and graph faults are still returned.
    pub fn route(
        &self,
        name: &str,
        graph: &dyn GraphView,
        query: &Query,
        options: &SearchOptions,
        ctx: &mut SearchContext,
    ) -> Result<Path, SearchError> {
        match self.run(name, graph, query, options, ctx) {
            Err(err) if err.is_unroutable() => Ok(Path::empty()),
            other => other,
        }
    }
}

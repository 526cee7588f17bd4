//! Graph model for wayfind route searches.
//!
//! This crate provides the data every search strategy consumes:
//!
//! - [`GraphView`], the read-only interface searches are written against
//! - [`Graph`], an in-memory directed or undirected multigraph implementing it
//! - [`Coord`] and the planar [`euclidean`] / [`manhattan`] distances
//! - [`route_cost`] for pricing a node sequence against a weight attribute
//!
//! Parallel edges between the same pair of nodes are permitted. Consumers
//! never see them individually: [`GraphView::edge_weight`] always resolves a
//! pair to its cheapest edge.

mod distance;
mod error;
mod graph;
mod view;

pub use distance::{euclidean, manhattan};
pub use error::GraphError;
pub use graph::{Attributes, EdgeData, Graph, GraphData, NodeData};
pub use view::{DEFAULT_WEIGHT, DEFAULT_WEIGHT_KEY, GraphView, route_cost};

/// Identifier of a graph node.
pub type NodeId = u64;

/// A planar coordinate attached to a node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

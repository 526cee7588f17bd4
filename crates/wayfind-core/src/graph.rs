use std::collections::{BTreeMap, HashMap};

use crate::view::{DEFAULT_WEIGHT, GraphView};
use crate::{Coord, GraphError, NodeId, euclidean};

/// Named real-valued attributes carried by one edge.
pub type Attributes = BTreeMap<String, f64>;

#[derive(Debug, Clone)]
struct NodeEntry {
    id: NodeId,
    coord: Option<Coord>,
    // successors in first-insertion order, without duplicates
    out: Vec<NodeId>,
}

/// In-memory multigraph.
///
/// Nodes keep their insertion order, which makes neighbor enumeration (and
/// therefore every search's exploration order) deterministic. An undirected
/// graph stores each edge in both directions.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    nodes: Vec<NodeEntry>,
    index: HashMap<NodeId, usize>,
    edges: HashMap<(NodeId, NodeId), Vec<Attributes>>,
    edge_count: usize,
}

impl Graph {
    fn with_direction(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self::with_direction(true)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::with_direction(false)
    }

    /// Build a graph from its serializable description.
    ///
    /// Edges may reference nodes not listed in `data.nodes`; those nodes are
    /// created without coordinates.
    pub fn from_data(data: GraphData) -> Result<Self, GraphError> {
        let mut g = Self::with_direction(data.directed);
        for node in data.nodes {
            if g.contains(node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            g.add_node(node.id, node.coord());
        }
        for edge in data.edges {
            g.add_edge(edge.from, edge.to, edge.attributes);
        }
        Ok(g)
    }

    /// Export the graph in its serializable form.
    pub fn to_data(&self) -> GraphData {
        let nodes = self
            .nodes
            .iter()
            .map(|n| NodeData {
                id: n.id,
                x: n.coord.map(|c| c.x),
                y: n.coord.map(|c| c.y),
            })
            .collect();
        let mut edges = Vec::with_capacity(self.edge_count);
        for n in &self.nodes {
            for &to in &n.out {
                // undirected edges are stored twice; emit them once
                if !self.directed && to < n.id {
                    continue;
                }
                if let Some(parallel) = self.edges.get(&(n.id, to)) {
                    edges.extend(parallel.iter().map(|attributes| EdgeData {
                        from: n.id,
                        to,
                        attributes: attributes.clone(),
                    }));
                }
            }
        }
        GraphData {
            directed: self.directed,
            nodes,
            edges,
        }
    }

    /// Whether edges are one-way.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of edges, counting every parallel edge.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Insert `id`, or update its coordinates if it already exists and
    /// `coord` is given.
    pub fn add_node(&mut self, id: NodeId, coord: Option<Coord>) {
        match self.index.get(&id) {
            Some(&i) => {
                if coord.is_some() {
                    self.nodes[i].coord = coord;
                }
            }
            None => {
                self.index.insert(id, self.nodes.len());
                self.nodes.push(NodeEntry {
                    id,
                    coord,
                    out: Vec::new(),
                });
            }
        }
    }

    /// Insert an edge. Missing endpoints are created without coordinates.
    /// Adding a second edge between the same pair creates a parallel edge.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, attributes: Attributes) {
        self.add_node(from, None);
        self.add_node(to, None);
        if !self.directed && from != to {
            self.link(to, from, attributes.clone());
        }
        self.link(from, to, attributes);
        self.edge_count += 1;
    }

    /// Insert an edge carrying a single weight attribute.
    pub fn add_weighted_edge(&mut self, from: NodeId, to: NodeId, key: &str, weight: f64) {
        self.add_edge(from, to, Attributes::from([(key.to_string(), weight)]));
    }

    fn link(&mut self, from: NodeId, to: NodeId, attributes: Attributes) {
        let parallel = self.edges.entry((from, to)).or_default();
        if parallel.is_empty() {
            if let Some(&i) = self.index.get(&from) {
                self.nodes[i].out.push(to);
            }
        }
        parallel.push(attributes);
    }

    /// Axis-aligned bounding box `(min, max)` of all node coordinates, or
    /// `None` if no node has coordinates.
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut coords = self
            .nodes
            .iter()
            .filter_map(|n| n.coord)
            .filter(|c| c.x.is_finite() && c.y.is_finite());
        let first = coords.next()?;
        Some(coords.fold((first, first), |(lo, hi), c| {
            (
                Coord::new(lo.x.min(c.x), lo.y.min(c.y)),
                Coord::new(hi.x.max(c.x), hi.y.max(c.y)),
            )
        }))
    }

    /// The node closest to `p` by planar distance. Nodes without
    /// coordinates are ignored; ties go to the earliest inserted node.
    pub fn nearest_node(&self, p: Coord) -> Option<NodeId> {
        let mut best: Option<(f64, NodeId)> = None;
        for n in &self.nodes {
            let Some(c) = n.coord else {
                continue;
            };
            let d = euclidean(c, p);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, n.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

impl GraphView for Graph {
    #[inline]
    fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn nodes(&self, buf: &mut Vec<NodeId>) {
        buf.extend(self.nodes.iter().map(|n| n.id));
    }

    fn neighbors(&self, node: NodeId, buf: &mut Vec<NodeId>) {
        if let Some(&i) = self.index.get(&node) {
            buf.extend_from_slice(&self.nodes[i].out);
        }
    }

    fn edge_weight(&self, from: NodeId, to: NodeId, key: &str) -> Result<f64, GraphError> {
        let Some(parallel) = self.edges.get(&(from, to)) else {
            return Err(match [from, to].into_iter().find(|n| !self.contains(*n)) {
                Some(unknown) => GraphError::UnknownNode(unknown),
                None => GraphError::MissingEdge { from, to },
            });
        };
        let mut best = f64::INFINITY;
        for attributes in parallel {
            let w = attributes.get(key).copied().unwrap_or(DEFAULT_WEIGHT);
            if !w.is_finite() {
                return Err(GraphError::NonFiniteWeight {
                    from,
                    to,
                    key: key.to_string(),
                });
            }
            best = best.min(w);
        }
        Ok(best)
    }

    fn coordinates(&self, node: NodeId) -> Option<Coord> {
        self.index.get(&node).and_then(|&i| self.nodes[i].coord)
    }
}

// ---------------------------------------------------------------------------
// Serializable description
// ---------------------------------------------------------------------------

/// Serializable description of a [`Graph`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphData {
    #[cfg_attr(feature = "serde", serde(default))]
    pub directed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<NodeData>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<EdgeData>,
}

/// One node of a [`GraphData`]. Coordinates count only when both are set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeData {
    pub id: NodeId,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub y: Option<f64>,
}

impl NodeData {
    fn coord(&self) -> Option<Coord> {
        Some(Coord::new(self.x?, self.y?))
    }
}

/// One edge of a [`GraphData`]; every other field is a weight attribute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeData {
    pub from: NodeId,
    pub to: NodeId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attributes: Attributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_WEIGHT_KEY;

    #[test]
    fn parallel_edges_resolve_to_minimum() {
        let mut g = Graph::directed();
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 7.0);
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 3.0);
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 5.0);
        assert_eq!(g.edge_weight(1, 2, DEFAULT_WEIGHT_KEY), Ok(3.0));
        assert_eq!(g.edge_count(), 3);

        let mut nbuf = Vec::new();
        g.neighbors(1, &mut nbuf);
        assert_eq!(nbuf, vec![2]);
    }

    #[test]
    fn missing_attribute_defaults_to_one() {
        let mut g = Graph::directed();
        g.add_weighted_edge(1, 2, "time", 9.0);
        assert_eq!(g.edge_weight(1, 2, DEFAULT_WEIGHT_KEY), Ok(1.0));
        assert_eq!(g.edge_weight(1, 2, "time"), Ok(9.0));

        // a parallel edge without the attribute competes at weight 1
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 4.0);
        g.add_edge(1, 2, Attributes::new());
        assert_eq!(g.edge_weight(1, 2, "time"), Ok(1.0));
    }

    #[test]
    fn non_finite_weight_is_a_graph_error() {
        let mut g = Graph::directed();
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, f64::NAN);
        assert!(matches!(
            g.edge_weight(1, 2, DEFAULT_WEIGHT_KEY),
            Err(GraphError::NonFiniteWeight { from: 1, to: 2, .. })
        ));
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut g = Graph::directed();
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 1.0);
        assert_eq!(
            g.edge_weight(2, 1, DEFAULT_WEIGHT_KEY),
            Err(GraphError::MissingEdge { from: 2, to: 1 })
        );
        let mut nbuf = Vec::new();
        g.neighbors(2, &mut nbuf);
        assert!(nbuf.is_empty());
        assert_eq!(
            g.edge_weight(1, 7, DEFAULT_WEIGHT_KEY),
            Err(GraphError::UnknownNode(7))
        );
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g = Graph::undirected();
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 2.0);
        g.add_weighted_edge(3, 3, DEFAULT_WEIGHT_KEY, 1.0);
        assert_eq!(g.edge_weight(2, 1, DEFAULT_WEIGHT_KEY), Ok(2.0));
        assert_eq!(g.edge_count(), 2);

        let mut nbuf = Vec::new();
        g.neighbors(3, &mut nbuf);
        assert_eq!(nbuf, vec![3]);
    }

    #[test]
    fn add_node_updates_coordinates_only_when_given() {
        let mut g = Graph::directed();
        g.add_node(1, Some(Coord::new(1.0, 2.0)));
        g.add_node(1, None);
        assert_eq!(g.coordinates(1), Some(Coord::new(1.0, 2.0)));
        g.add_node(1, Some(Coord::new(5.0, 5.0)));
        assert_eq!(g.coordinates(1), Some(Coord::new(5.0, 5.0)));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn nearest_node_and_bounds() {
        let mut g = Graph::undirected();
        g.add_node(10, Some(Coord::new(0.0, 0.0)));
        g.add_node(11, Some(Coord::new(10.0, 0.0)));
        g.add_node(12, Some(Coord::new(4.0, -3.0)));
        g.add_node(13, None);

        assert_eq!(g.nearest_node(Coord::new(8.0, 1.0)), Some(11));
        assert_eq!(g.nearest_node(Coord::new(3.0, -2.0)), Some(12));
        assert_eq!(
            g.bounds(),
            Some((Coord::new(0.0, -3.0), Coord::new(10.0, 0.0)))
        );
        assert_eq!(Graph::directed().nearest_node(Coord::new(0.0, 0.0)), None);
    }

    #[test]
    fn bounds_skip_non_finite_coordinates() {
        let mut g = Graph::undirected();
        g.add_node(1, Some(Coord::new(f64::INFINITY, 2.0)));
        assert_eq!(g.bounds(), None);
        g.add_node(2, Some(Coord::new(1.0, 1.0)));
        g.add_node(3, Some(Coord::new(3.0, f64::NEG_INFINITY)));
        g.add_node(4, Some(Coord::new(f64::NAN, 0.0)));
        g.add_node(5, Some(Coord::new(-1.0, 4.0)));
        assert_eq!(
            g.bounds(),
            Some((Coord::new(-1.0, 1.0), Coord::new(1.0, 4.0)))
        );
    }

    #[test]
    fn from_data_rejects_duplicate_nodes() {
        let data = GraphData {
            directed: true,
            nodes: vec![
                NodeData { id: 1, x: None, y: None },
                NodeData { id: 1, x: Some(0.0), y: Some(0.0) },
            ],
            edges: Vec::new(),
        };
        assert_eq!(Graph::from_data(data).unwrap_err(), GraphError::DuplicateNode(1));
    }

    #[test]
    fn data_conversion_keeps_parallel_edges() {
        let mut g = Graph::undirected();
        g.add_node(1, Some(Coord::new(0.0, 1.0)));
        g.add_weighted_edge(1, 2, DEFAULT_WEIGHT_KEY, 3.0);
        g.add_weighted_edge(2, 1, DEFAULT_WEIGHT_KEY, 2.0);

        let data = g.to_data();
        assert_eq!(data.edges.len(), 2);
        let back = Graph::from_data(data).unwrap();
        assert_eq!(back.edge_count(), 2);
        assert_eq!(back.edge_weight(2, 1, DEFAULT_WEIGHT_KEY), Ok(2.0));
        assert_eq!(back.coordinates(1), Some(Coord::new(0.0, 1.0)));
        assert_eq!(back.coordinates(2), None);
    }
}

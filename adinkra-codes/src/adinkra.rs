//! Adinkra graphs and their mapping onto generator matrices.
//!
//! An Adinkra is a bipartite graph between primary (bosonic) and conjugate
//! (fermionic) fields. Every edge carries a color naming one supersymmetry
//! generator and a dash flag naming its sign. The mapping here is one-way:
//! a [`Graph`] flattens into plain bit rows and the resulting
//! [`LinearCode`] keeps no reference to it.

use crate::{CodeError, LinearCode, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// The two node classes of an Adinkra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKind {
    /// Bosonic field
    Primary,
    /// Fermionic field
    Conjugate,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primary => f.write_str("primary"),
            FieldKind::Conjugate => f.write_str("conjugate"),
        }
    }
}

/// Edge colors, one per supersymmetry generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

/// Full color palette in order. A graph of dimension `d` uses the first `d`.
pub const PALETTE: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

impl Color {
    /// Position in [`PALETTE`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// A field in the graph.
///
/// Identity is structural over kind, name and position, and nodes order by
/// those fields in that sequence. Adjacency rows and columns follow it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphNode {
    pub kind: FieldKind,
    pub name: String,
    pub position: Vec<i32>,
}

impl GraphNode {
    pub fn new(kind: FieldKind, position: impl Into<Vec<i32>>, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            position: position.into(),
        }
    }

    pub fn primary(position: impl Into<Vec<i32>>, name: impl Into<String>) -> Self {
        Self::new(FieldKind::Primary, position, name)
    }

    pub fn conjugate(position: impl Into<Vec<i32>>, name: impl Into<String>) -> Self {
        Self::new(FieldKind::Conjugate, position, name)
    }
}

/// Colored, optionally dashed edge between nodes of different kinds.
///
/// Direction is part of identity: `a -> b` and `b -> a` are distinct edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GraphEdge {
    source: GraphNode,
    target: GraphNode,
    color: Color,
    dashed: bool,
}

impl GraphEdge {
    pub fn new(source: GraphNode, target: GraphNode, color: Color, dashed: bool) -> Result<Self> {
        if source.kind == target.kind {
            return Err(CodeError::InvalidEdgeEndpoints(source.kind));
        }

        Ok(Self {
            source,
            target,
            color,
            dashed,
        })
    }

    pub fn source(&self) -> &GraphNode {
        &self.source
    }
    pub fn target(&self) -> &GraphNode {
        &self.target
    }
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    /// `-1` for dashed, `+1` for solid
    pub fn sign(&self) -> i8 {
        if self.dashed {
            -1
        } else {
            1
        }
    }

    /// (color index, dash bit)
    pub fn binary_representation(&self) -> (usize, u8) {
        (self.color.index(), u8::from(self.dashed))
    }

    pub fn primary_endpoint(&self) -> &GraphNode {
        if self.source.kind == FieldKind::Primary {
            &self.source
        } else {
            &self.target
        }
    }

    pub fn conjugate_endpoint(&self) -> &GraphNode {
        if self.source.kind == FieldKind::Conjugate {
            &self.source
        } else {
            &self.target
        }
    }

    pub fn touches(&self, node: &GraphNode) -> bool {
        &self.source == node || &self.target == node
    }
}

/// Outcome of the Adinkra rule checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    /// Every edge joins a primary and a conjugate node
    pub bipartite: bool,
    /// Every node touches an edge of every available color
    pub color_completeness: bool,
    /// Always true; no sign constraint is enforced yet
    pub dashing_consistent: bool,
}

impl RuleReport {
    pub fn all_satisfied(&self) -> bool {
        self.bipartite && self.color_completeness && self.dashing_consistent
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, bool> {
        BTreeMap::from([
            ("bipartite", self.bipartite),
            ("color_completeness", self.color_completeness),
            ("dashing_consistent", self.dashing_consistent),
        ])
    }
}

/// Adinkra graph
#[derive(Debug, Clone)]
pub struct Graph {
    dimension: usize,
    available_colors: Vec<Color>,
    primary: BTreeSet<GraphNode>,
    conjugate: BTreeSet<GraphNode>,
    /// Edges in insertion order, deduplicated through `edge_set`
    edges: Vec<GraphEdge>,
    edge_set: HashSet<GraphEdge>,
}

impl Graph {
    /// Empty graph using the first `dimension` palette colors
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension > PALETTE.len() {
            return Err(CodeError::InvalidDimension(format!(
                "graph dimension {} exceeds the {} available colors",
                dimension,
                PALETTE.len()
            )));
        }

        Ok(Self {
            dimension,
            available_colors: PALETTE[..dimension].to_vec(),
            primary: BTreeSet::new(),
            conjugate: BTreeSet::new(),
            edges: Vec::new(),
            edge_set: HashSet::new(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
    pub fn available_colors(&self) -> &[Color] {
        &self.available_colors
    }
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
    pub fn node_count(&self) -> usize {
        self.primary.len() + self.conjugate.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Primary nodes in identity order
    pub fn primary_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.primary.iter()
    }

    /// Conjugate nodes in identity order
    pub fn conjugate_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.conjugate.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.primary.iter().chain(self.conjugate.iter())
    }

    pub fn contains_node(&self, node: &GraphNode) -> bool {
        match node.kind {
            FieldKind::Primary => self.primary.contains(node),
            FieldKind::Conjugate => self.conjugate.contains(node),
        }
    }

    /// Insert a node, returning false if it was already present
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        match node.kind {
            FieldKind::Primary => self.primary.insert(node),
            FieldKind::Conjugate => self.conjugate.insert(node),
        }
    }

    /// Insert an edge and both of its endpoints
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<()> {
        if !self.available_colors.contains(&edge.color) {
            return Err(CodeError::InvalidColor {
                color: edge.color,
                dimension: self.dimension,
            });
        }

        self.add_node(edge.source.clone());
        self.add_node(edge.target.clone());
        if self.edge_set.insert(edge.clone()) {
            self.edges.push(edge);
        }

        Ok(())
    }

    /// |primary| x |conjugate| matrix of edge signs for one color.
    ///
    /// Cells hold `+1` for a solid edge, `-1` for a dashed one and `0`
    /// otherwise. When several edges land on one cell the last inserted wins.
    pub fn adjacency_matrix(&self, color: Color) -> Vec<Vec<i8>> {
        let rows: HashMap<&GraphNode, usize> =
            self.primary.iter().enumerate().map(|(i, n)| (n, i)).collect();
        let cols: HashMap<&GraphNode, usize> =
            self.conjugate.iter().enumerate().map(|(j, n)| (n, j)).collect();

        let mut matrix = vec![vec![0i8; self.conjugate.len()]; self.primary.len()];

        for edge in self.edges.iter().filter(|e| e.color == color) {
            let (Some(&i), Some(&j)) = (
                rows.get(edge.primary_endpoint()),
                cols.get(edge.conjugate_endpoint()),
            ) else {
                continue;
            };
            matrix[i][j] = edge.sign();
        }

        matrix
    }

    /// One bit row per available color: `[structure | dashing]`.
    ///
    /// Structure bits mark the nonzero cells of the color's adjacency
    /// matrix in row-major order. Dashing bits list the color's edges sorted
    /// by source, target and dash flag, cut or zero-padded to the structure
    /// length. The two halves are not aligned cell for cell.
    pub fn to_codeword_representation(&self) -> BTreeMap<Color, Vec<u8>> {
        let mut codewords = BTreeMap::new();

        for &color in &self.available_colors {
            let structure: Vec<u8> = self
                .adjacency_matrix(color)
                .iter()
                .flatten()
                .map(|&cell| u8::from(cell != 0))
                .collect();

            let mut colored: Vec<&GraphEdge> =
                self.edges.iter().filter(|e| e.color == color).collect();
            colored.sort();

            let mut dashing: Vec<u8> = colored.iter().map(|e| u8::from(e.dashed)).collect();
            dashing.resize(structure.len(), 0);

            let mut combined = structure;
            combined.extend(dashing);
            codewords.insert(color, combined);
        }

        codewords
    }

    pub fn check_rules(&self) -> RuleReport {
        let bipartite = self.edges.iter().all(|e| e.source.kind != e.target.kind);

        let color_completeness = self.nodes().all(|node| {
            let colors: HashSet<Color> = self
                .edges
                .iter()
                .filter(|e| e.touches(node))
                .map(|e| e.color)
                .collect();
            colors.len() == self.available_colors.len()
        });

        RuleReport {
            bipartite,
            color_completeness,
            dashing_consistent: true,
        }
    }

    /// Nominal (n, k): structure plus dashing bits, one row per color.
    ///
    /// Descriptive only, independent of the rank of the generated matrix.
    pub fn code_parameters(&self) -> (usize, usize) {
        let n = 2 * self.primary.len() * self.conjugate.len();
        (n, self.available_colors.len())
    }

    /// Stack the per-color rows in palette order into a generator matrix
    pub fn to_linear_code(&self) -> Result<LinearCode> {
        if self.edges.is_empty() || self.available_colors.is_empty() {
            return Err(CodeError::EmptyGraph);
        }

        let mut rows: Vec<Vec<u8>> = self.to_codeword_representation().into_values().collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, 0);
        }

        debug!(
            colors = rows.len(),
            width,
            nodes = self.node_count(),
            edges = self.edges.len(),
            "mapped adinkra to generator matrix"
        );

        LinearCode::from_rows(&rows)
    }
}

/// Complete bipartite Adinkra with every available color on every pair.
///
/// Primary nodes are `phi_i` at position `(i)`, conjugate nodes `psi_j` at
/// `(j)`. The edge of color index `c` between them is dashed iff `i + j + c`
/// is odd.
pub fn simple_bipartite(n_primary: usize, n_conjugate: usize, dimension: usize) -> Result<Graph> {
    let mut graph = Graph::new(dimension)?;

    let primary: Vec<GraphNode> = (0..n_primary)
        .map(|i| GraphNode::primary([i as i32], format!("phi_{}", i)))
        .collect();
    let conjugate: Vec<GraphNode> = (0..n_conjugate)
        .map(|j| GraphNode::conjugate([j as i32], format!("psi_{}", j)))
        .collect();

    for node in primary.iter().chain(&conjugate) {
        graph.add_node(node.clone());
    }

    let colors = graph.available_colors().to_vec();
    for (i, p) in primary.iter().enumerate() {
        for (j, q) in conjugate.iter().enumerate() {
            for (c, &color) in colors.iter().enumerate() {
                let dashed = (i + j + c) % 2 == 1;
                graph.add_edge(GraphEdge::new(p.clone(), q.clone(), color, dashed)?)?;
            }
        }
    }

    Ok(graph)
}

/// Adinkra on the vertices of the `dimension`-cube.
///
/// Vertices run over {0,1}^dimension in lexicographic order; even-weight
/// vertices are primary. Each vertex gets one edge per axis toward the
/// neighbour across that axis, colored by the axis and dashed iff the
/// vertex's own bit on that axis is 1. Both directions of every cube edge
/// are therefore stored.
pub fn hypercube(dimension: usize) -> Result<Graph> {
    let mut graph = Graph::new(dimension)?;
    let count = 1usize << dimension;

    let bits_of = |v: usize| -> Vec<i32> {
        (0..dimension)
            .map(|axis| ((v >> (dimension - 1 - axis)) & 1) as i32)
            .collect()
    };

    let nodes: Vec<GraphNode> = (0..count)
        .map(|v| {
            let bits = bits_of(v);
            let kind = if v.count_ones() % 2 == 0 {
                FieldKind::Primary
            } else {
                FieldKind::Conjugate
            };
            let name: String = bits.iter().map(|b| b.to_string()).collect();
            GraphNode::new(kind, bits, name)
        })
        .collect();

    for node in &nodes {
        graph.add_node(node.clone());
    }

    let colors = graph.available_colors().to_vec();
    for (v, node) in nodes.iter().enumerate() {
        for (axis, &color) in colors.iter().enumerate() {
            let neighbour = v ^ (1 << (dimension - 1 - axis));
            let dashed = node.position[axis] == 1;
            graph.add_edge(GraphEdge::new(
                node.clone(),
                nodes[neighbour].clone(),
                color,
                dashed,
            )?)?;
        }
    }

    debug!(
        dimension,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built hypercube adinkra"
    );
    Ok(graph)
}

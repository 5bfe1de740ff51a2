//!
//! Directed weighted graph over a fixed set of labelled vertices
//!
//! `Graph<V>` is a thin validated wrapper of `petgraph::DiGraph<V, f64>`.
//! The node weight is the vertex label, and the node index of a vertex is its
//! position in the declared vertex sequence.
//!
use super::common::FloatWeight;
use super::error::{label, Error, Result};
use super::iterators::{EdgeTriples, Neighbors};
use fnv::FnvHashMap as HashMap;
use petgraph::prelude::*;
use std::fmt::Debug;
use std::hash::Hash;

///
/// Vertex label.
///
/// Any cloneable, hashable type can be a label (`String`, `&str`, `usize`, ...).
///
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Vertex for T {}

///
/// Immutable directed graph with at most one edge per ordered vertex pair.
///
#[derive(Clone, Debug)]
pub struct Graph<V> {
    graph: DiGraph<V, f64>,
    index: HashMap<V, NodeIndex>,
}

impl<V: Vertex> Graph<V> {
    ///
    /// Build a graph from a vertex sequence and `(source, target, weight)` edges.
    ///
    /// * a vertex declared twice is `DuplicateVertex`
    /// * an edge whose endpoint is not declared is `MalformedEdge`
    /// * a NaN or infinite weight is `InvalidWeight`
    /// * if the same `(source, target)` is declared again, the later weight wins
    ///
    pub fn build<I, J, E>(vertices: I, edges: J) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        J: IntoIterator<Item = (V, V, E)>,
        E: FloatWeight,
    {
        let mut graph = DiGraph::new();
        let mut index = HashMap::default();

        for v in vertices {
            if index.contains_key(&v) {
                return Err(Error::DuplicateVertex(label(&v)));
            }
            let node = graph.add_node(v.clone());
            index.insert(v, node);
        }

        for (s, t, w) in edges {
            let (a, b) = match (index.get(&s), index.get(&t)) {
                (Some(&a), Some(&b)) => (a, b),
                _ => {
                    return Err(Error::MalformedEdge {
                        from: label(&s),
                        to: label(&t),
                    })
                }
            };
            let weight = w.float_weight();
            if !weight.is_finite() {
                return Err(Error::InvalidWeight {
                    from: label(&s),
                    to: label(&t),
                    weight,
                });
            }
            // last write wins
            graph.update_edge(a, b, weight);
        }

        Ok(Graph { graph, index })
    }

    ///
    /// Build a graph from an adjacency mapping `vertex -> [(target, weight)]`.
    ///
    /// The same validation as `build` is applied. Adjacency entries are read in
    /// the iteration order of `edges_by_vertex`.
    ///
    pub fn from_adjacency<I, A, L, E>(vertices: I, edges_by_vertex: A) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        A: IntoIterator<Item = (V, L)>,
        L: IntoIterator<Item = (V, E)>,
        E: FloatWeight,
    {
        let edges = edges_by_vertex.into_iter().flat_map(|(s, targets)| {
            targets
                .into_iter()
                .map(move |(t, w)| (s.clone(), t, w))
        });
        Graph::build(vertices, edges)
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (after last-write-wins deduplication)
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    ///
    /// Vertices in declaration order
    ///
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.graph.node_weights()
    }

    pub fn contains(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    ///
    /// Node index of the vertex, or None if it is not in the graph.
    ///
    pub fn index_of(&self, v: &V) -> Option<NodeIndex> {
        self.index.get(v).copied()
    }

    ///
    /// Node index of the vertex, or `UnknownVertex`.
    ///
    pub fn require(&self, v: &V) -> Result<NodeIndex> {
        self.index_of(v)
            .ok_or_else(|| Error::UnknownVertex(label(v)))
    }

    ///
    /// Label of a node index of this graph.
    ///
    /// # Panics
    ///
    /// if `node` is not a node of this graph.
    ///
    pub fn label(&self, node: NodeIndex) -> &V {
        &self.graph[node]
    }

    ///
    /// Outgoing edges `(target, weight)` of `v`, in the order the targets
    /// were first declared in the edge sequence.
    ///
    pub fn neighbors(&self, v: &V) -> Result<Neighbors<'_, V>> {
        let node = self.require(v)?;
        Ok(Neighbors::new(&self.graph, node))
    }

    ///
    /// All edges as `(source, target, weight)`
    ///
    pub fn edges(&self) -> EdgeTriples<'_, V> {
        EdgeTriples::new(&self.graph)
    }

    ///
    /// Weight of the edge `source -> target` if exists.
    ///
    pub fn weight(&self, source: &V, target: &V) -> Option<f64> {
        let a = self.index_of(source)?;
        let b = self.index_of(target)?;
        self.graph
            .find_edge(a, b)
            .map(|e| self.graph[e])
    }

    ///
    /// The underlying petgraph graph. Node weights are the labels.
    ///
    pub fn digraph(&self) -> &DiGraph<V, f64> {
        &self.graph
    }

    ///
    /// Unlabelled copy of the graph plus one virtual vertex `q`,
    /// with zero-weight edges `q -> v` for every vertex `v` and no edge into `q`.
    ///
    /// Node indices of the real vertices are kept, `q` gets the last index.
    /// This is the only way to add a vertex outside the declared set, and it
    /// never escapes the all-pairs computation.
    ///
    pub(crate) fn augmented_with_virtual_source(&self) -> (DiGraph<(), f64>, NodeIndex) {
        let mut g = self.graph.map(|_, _| (), |_, &w| w);
        let q = g.add_node(());
        for v in self.graph.node_indices() {
            g.add_edge(q, v, 0.0);
        }
        (g, q)
    }
}

//
// tests
//

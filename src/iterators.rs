//!
//! Label-level iterators over the petgraph::DiGraph backing a `Graph`
//!
//! * neighbors()
//! * edges()
//!
use petgraph::graph::{DiGraph, EdgeReference, EdgeReferences, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

///
/// Iterator for `neighbors()`
///
/// implements Iterator whose item is
/// `(target: &V, weight: f64)`
///
/// wrapper of DiGraph::edges_directed(_, Outgoing).
/// petgraph yields the most recently inserted edge first, so edges are
/// reordered by edge index, i.e. the order in which each target was first
/// declared.
///
pub struct Neighbors<'a, V: 'a> {
    graph: &'a DiGraph<V, f64>,
    edges: std::vec::IntoIter<EdgeReference<'a, f64>>,
}

impl<'a, V> Neighbors<'a, V> {
    ///
    /// Create Neighbors of `node` from the reference of DiGraph
    ///
    pub fn new(graph: &'a DiGraph<V, f64>, node: NodeIndex) -> Self {
        let mut edges: Vec<_> = graph.edges_directed(node, Direction::Outgoing).collect();
        edges.sort_by_key(|er| er.id());
        Neighbors {
            graph,
            edges: edges.into_iter(),
        }
    }
}

impl<'a, V> Iterator for Neighbors<'a, V> {
    type Item = (&'a V, f64);
    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        // er.source() = the given node
        // er.target() = child
        self.edges
            .next()
            .map(|er| (&graph[er.target()], *er.weight()))
    }
}

///
/// Iterator for `edges()`
///
/// implements Iterator whose item is
/// `(source: &V, target: &V, weight: f64)`
///
/// wrapper of DiGraph::edge_references()
///
pub struct EdgeTriples<'a, V: 'a> {
    graph: &'a DiGraph<V, f64>,
    edges: EdgeReferences<'a, f64>,
}

impl<'a, V> EdgeTriples<'a, V> {
    ///
    /// Create EdgeTriples from the reference of DiGraph
    ///
    pub fn new(graph: &'a DiGraph<V, f64>) -> Self {
        EdgeTriples {
            graph,
            edges: graph.edge_references(),
        }
    }
}

impl<'a, V> Iterator for EdgeTriples<'a, V> {
    type Item = (&'a V, &'a V, f64);
    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.edges
            .next()
            .map(|er| (&graph[er.source()], &graph[er.target()], *er.weight()))
    }
}

//!
//! Common definition and utility functions for graphs
//!

use petgraph::prelude::*;

///
/// FloatWeight is generalized type of f64.
///
/// It represents a type for which
/// * f64 convertable
/// * epsilon is defined
///
/// Integer weights (as given by "u v w" edge lists) and float weights are
/// both accepted by the graph builder, and are stored as f64 internally.
/// Integers are exact only up to `MAX_EXACT_INTEGER` in magnitude.
///
/// `epsilon` is the relative rounding error of the type. It is zero for
/// integers, whose sums are exact.
///
pub trait FloatWeight {
    fn float_weight(&self) -> f64;
    fn epsilon() -> f64;
}

impl FloatWeight for f64 {
    fn float_weight(&self) -> f64 {
        *self
    }
    fn epsilon() -> f64 {
        f64::EPSILON
    }
}

impl FloatWeight for f32 {
    fn float_weight(&self) -> f64 {
        *self as f64
    }
    fn epsilon() -> f64 {
        f32::EPSILON as f64
    }
}

impl FloatWeight for i64 {
    fn float_weight(&self) -> f64 {
        *self as f64
    }
    fn epsilon() -> f64 {
        0.0
    }
}

impl FloatWeight for i32 {
    fn float_weight(&self) -> f64 {
        *self as f64
    }
    fn epsilon() -> f64 {
        0.0
    }
}

///
/// Largest integer magnitude that f64 represents exactly, 2^53.
///
pub const MAX_EXACT_INTEGER: i64 = 1 << 53;

///
/// Calculate total weight of path (a list of nodes)
///
/// Weight of `nodes[i] -> nodes[i+1]` is summed up. If `is_cycle` is true,
/// the closing edge `nodes[n-1] -> nodes[0]` is also added.
/// Returns None if some consecutive pair is not connected by an edge.
///
pub(crate) fn total_weight<N, E: FloatWeight>(
    graph: &DiGraph<N, E>,
    nodes: &[NodeIndex],
    is_cycle: bool,
) -> Option<f64> {
    let n = nodes.len();
    let n_edges = if is_cycle { n } else { n.saturating_sub(1) };
    (0..n_edges)
        .map(|i| {
            let v = nodes[i];
            let w = nodes[(i + 1) % n];
            graph
                .find_edge(v, w)
                .and_then(|e| graph.edge_weight(e))
                .map(|ew| ew.float_weight())
        })
        .sum()
}

///
/// Determine if a cycle given by nodes is a negative cycle or not.
///
pub(crate) fn is_negative_cycle<N, E: FloatWeight>(graph: &DiGraph<N, E>, nodes: &[NodeIndex]) -> bool {
    match total_weight(graph, nodes, true) {
        Some(w) => w < 0.0,
        None => false,
    }
}

///
/// short-hand of `NodeIndex::new`
///
pub fn ni(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

//
// tests
//

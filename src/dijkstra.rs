//!
//! Dijkstra algorithm for non-negative edge weights
//!
//! Binary heap based, O((|V| + |E|) log |V|).
//!
//! # Tie-break
//!
//! Among unvisited nodes with the same tentative distance, the node with the
//! lowest node index is settled first. For a `Graph` the node index is the
//! declaration order of vertices, so the earliest declared vertex wins.
//!
use super::common::FloatWeight;
use super::distance::DistanceRow;
use super::error::Result;
use super::graph::{Graph, Vertex};
use petgraph::prelude::*;
use petgraph::visit::{VisitMap, Visitable};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

///
/// Heap entry: tentative distance of a node.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the smallest distance first,
/// and the smallest node index among equal distances.
///
#[derive(Clone, Copy, Debug, PartialEq)]
struct State {
    distance: f64,
    node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for min-heap
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///
/// Compute shortest path distances `dist[node]` from `source`.
///
/// Every edge weight must be non-negative. This is not checked, and the
/// result is unspecified if violated. Unreachable nodes get `f64::INFINITY`.
///
pub fn dijkstra<N, E: FloatWeight>(g: &DiGraph<N, E>, source: NodeIndex) -> Vec<f64> {
    dijkstra_visit(g, source, |_, _| {})
}

///
/// `dijkstra` calling `on_settle(node, distance)` each time a node is
/// settled (its distance becomes final), in settling order.
///
pub fn dijkstra_visit<N, E, F>(
    g: &DiGraph<N, E>,
    source: NodeIndex,
    mut on_settle: F,
) -> Vec<f64>
where
    E: FloatWeight,
    F: FnMut(NodeIndex, f64),
{
    let ix = |node: NodeIndex| node.index();
    let mut dist = vec![f64::INFINITY; g.node_count()];
    let mut visited = g.visit_map();
    let mut heap = BinaryHeap::new();

    dist[ix(source)] = 0.0;
    heap.push(State {
        distance: 0.0,
        node: source,
    });

    while let Some(State { distance, node: u }) = heap.pop() {
        // stale entry of an already settled node
        if visited.is_visited(&u) {
            continue;
        }
        visited.visit(u);
        on_settle(u, distance);

        for edge in g.edges(u) {
            //    w
            // u ---> v
            let v = edge.target();
            let w = edge.weight().float_weight();
            if visited.is_visited(&v) {
                continue;
            }
            let d = distance + w;
            if d < dist[ix(v)] {
                trace!("updated\tu={}\tv={}\td[v]={}", ix(u), ix(v), d);
                dist[ix(v)] = d;
                heap.push(State { distance: d, node: v });
            }
        }
    }

    dist
}

//
// label level
//

///
/// Shortest distances from `source` to every vertex of `graph`.
///
/// Every edge weight of `graph` must be non-negative (not checked).
/// Fails only with `UnknownVertex` if `source` is not in the graph.
///
pub fn non_negative_shortest_paths<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
) -> Result<DistanceRow<V>> {
    let s = graph.require(source)?;
    let dist = dijkstra(graph.digraph(), s);
    Ok(DistanceRow::from_indexed(graph, source.clone(), &dist))
}

//
// tests
//

//! Bellman-Ford algorithms for general EdgeWeight
//!
//! Single source shortest paths that permit negative edge weights,
//! and detect negative cycles reachable from the source.
//! It works on any petgraph graph whose EdgeWeight satisfies FloatWeight.

use super::common::{is_negative_cycle, FloatWeight};
use super::distance::DistanceRow;
use super::error::Result;
use super::graph::{Graph, Vertex};
use petgraph::algo::NegativeCycle;
use petgraph::prelude::*;
use petgraph::visit::{IntoEdgeReferences, IntoEdges, IntoNodeIdentifiers, NodeCount, NodeIndexable};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Paths<NodeId> {
    pub distances: Vec<f64>,
    pub predecessors: Vec<Option<NodeId>>,
}

/// \[Generic\] Compute shortest paths from node `source` to all other.
///
/// Using the [Bellman–Ford algorithm][bf]; negative edge costs are
/// permitted, but the graph must not have a cycle of negative weights
/// reachable from `source` (in that case it will return an error).
///
/// On success, return one vec with path costs, and another one which points
/// out the predecessor of a node along a shortest path. The vectors
/// are indexed by the graph's node indices. Unreachable nodes have
/// `f64::INFINITY` cost and no predecessor.
///
/// Time complexity is O(|V|·|E|).
///
/// [bf]: https://en.wikipedia.org/wiki/Bellman%E2%80%93Ford_algorithm
pub fn bellman_ford<G>(
    g: G,
    source: G::NodeId,
) -> std::result::Result<Paths<G::NodeId>, NegativeCycle>
where
    G: NodeCount + IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::EdgeWeight: FloatWeight,
{
    let ix = |i| g.to_index(i);
    let tolerance = relaxation_tolerance(g);

    // Step 1 and Step 2: initialize and relax
    let (distances, predecessors) = bellman_ford_initialize_relax(g, source, tolerance);

    // Step 3: check for negative weight cycle
    for i in g.node_identifiers() {
        if !distances[ix(i)].is_finite() {
            continue;
        }
        for edge in g.edges(i) {
            let j = edge.target();
            let w = edge.weight().float_weight();
            if distances[ix(i)] + w + tolerance < distances[ix(j)] {
                debug!(
                    "negative cycle detected at edge {}->{} (w={})",
                    ix(i),
                    ix(j),
                    w
                );
                return Err(NegativeCycle(()));
            }
        }
    }

    Ok(Paths {
        distances,
        predecessors,
    })
}

// Absolute slack of a relaxation `d[i] + w + tolerance < d[j]`.
//
// Every distance is a sum of edge weights, so its rounding error is bounded
// by epsilon times the total absolute weight. A cycle whose float weights sum
// to zero up to rounding then never relaxes. Zero for integer weights.
fn relaxation_tolerance<G>(g: G) -> f64
where
    G: IntoEdgeReferences,
    G::EdgeWeight: FloatWeight,
{
    let scale: f64 = g
        .edge_references()
        .map(|edge| edge.weight().float_weight().abs())
        .filter(|w| w.is_finite())
        .sum();
    G::EdgeWeight::epsilon() * scale.max(1.0)
}

// Perform Step 1 and Step 2 of the Bellman-Ford algorithm.
//
// After k passes, distance[v] is at most the weight of the shortest path
// from source to v with at most k edges. A pass without any update means
// the distances are already fixed, so the remaining passes are skipped.
#[inline(always)]
fn bellman_ford_initialize_relax<G>(
    g: G,
    source: G::NodeId,
    tolerance: f64,
) -> (Vec<f64>, Vec<Option<G::NodeId>>)
where
    G: NodeCount + IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::EdgeWeight: FloatWeight,
{
    // Step 1: initialize graph
    let mut predecessor = vec![None; g.node_bound()];
    let mut distance = vec![f64::INFINITY; g.node_bound()];
    let ix = |i| g.to_index(i);
    distance[ix(source)] = 0.0;

    // Step 2: relax edges repeatedly
    for _ in 1..g.node_count() {
        let did_update = relax_all(g, &mut distance, &mut predecessor, tolerance).is_some();
        if !did_update {
            break;
        }
    }
    (distance, predecessor)
}

// One pass over every edge. Returns the last node whose distance decreased.
fn relax_all<G>(
    g: G,
    distance: &mut [f64],
    predecessor: &mut [Option<G::NodeId>],
    tolerance: f64,
) -> Option<G::NodeId>
where
    G: IntoNodeIdentifiers + IntoEdges + NodeIndexable,
    G::EdgeWeight: FloatWeight,
{
    let ix = |i| g.to_index(i);
    let mut last_updated = None;
    for i in g.node_identifiers() {
        if !distance[ix(i)].is_finite() {
            continue;
        }
        for edge in g.edges(i) {
            let j = edge.target();
            let w = edge.weight().float_weight();
            if distance[ix(i)] + w + tolerance < distance[ix(j)] {
                trace!(
                    "updated\ti={}\tj={}\tw={}\td[i]={}\td[j]={}",
                    ix(i),
                    ix(j),
                    w,
                    distance[ix(i)],
                    distance[ix(j)]
                );
                distance[ix(j)] = distance[ix(i)] + w;
                predecessor[ix(j)] = Some(i);
                last_updated = Some(j);
            }
        }
    }
    last_updated
}

///
/// Find a negative cycle reachable from node `source`.
///
/// Returns the nodes of the cycle, ordered along the edge direction,
/// or None if no negative cycle is reachable.
///
/// After the |V|-1 relaxing passes, one more pass is done. If some node `x`
/// is still updated, going back |V| times along the predecessors from `x`
/// lands on a node `y` of a negative cycle, and the cycle is traced back
/// from `y`.
///
pub fn find_negative_cycle<N, E: FloatWeight>(
    g: &DiGraph<N, E>,
    source: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let tolerance = relaxation_tolerance(g);
    let (mut dist, mut pred) = bellman_ford_initialize_relax(g, source, tolerance);
    let x = relax_all(g, &mut dist, &mut pred, tolerance)?;

    let mut y = x;
    for _ in 0..g.node_count() {
        y = pred[y.index()]?;
    }

    let mut cycle = vec![y];
    let mut node = pred[y.index()]?;
    while node != y {
        cycle.push(node);
        node = pred[node.index()]?;
    }
    cycle.reverse();
    Some(cycle)
}

//
// label level
//

///
/// Shortest distances from `source` to every vertex of `graph`, permitting
/// negative edge weights.
///
/// * `UnknownVertex` if `source` is not in the graph
/// * `NegativeCycle` if a negative cycle is reachable from `source`
///
pub fn negative_tolerant_shortest_paths<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
) -> Result<DistanceRow<V>> {
    let s = graph.require(source)?;
    let paths = bellman_ford(graph.digraph(), s)?;
    Ok(DistanceRow::from_indexed(
        graph,
        source.clone(),
        &paths.distances,
    ))
}

///
/// Vertices of a negative cycle reachable from `source`, if any.
///
/// The returned vertices are ordered along the edges, and the weights of the
/// closed walk sum to a negative value.
///
pub fn negative_cycle<V: Vertex>(graph: &Graph<V>, source: &V) -> Result<Option<Vec<V>>> {
    let s = graph.require(source)?;
    let g = graph.digraph();
    Ok(find_negative_cycle(g, s)
        .filter(|nodes| is_negative_cycle(g, nodes))
        .map(|nodes| {
            nodes
                .into_iter()
                .map(|node| graph.label(node).clone())
                .collect()
        }))
}

//
// test
//

//!
//! Johnson's all-pairs shortest paths
//!
//! 1. add a virtual node `q` with zero-weight edges `q -> v` to every node
//! 2. Bellman-Ford from `q` gives potentials `h(v)`, or a negative cycle
//! 3. reweight every edge `w'(u, v) = w(u, v) + h(u) - h(v)`, which is non-negative
//! 4. Dijkstra from every node on the reweighted graph
//! 5. recover `d(u, v) = d'(u, v) + h(v) - h(u)`
//!
//! Running Dijkstra |V| times costs O(|V| (|V| + |E|) log |V|), instead of
//! O(|V|^2 |E|) for Bellman-Ford from every node.
//!
use super::bellman_ford::bellman_ford;
use super::common::FloatWeight;
use super::dijkstra::dijkstra;
use super::distance::{DistanceRow, DistanceTable};
use super::error::Result;
use super::graph::{Graph, Vertex};
use petgraph::prelude::*;
use rayon::prelude::*;
use tracing::debug;

///
/// Options of the all-pairs computation.
///
#[derive(Clone, Debug)]
pub struct JohnsonConfig {
    ///
    /// Run the per-source Dijkstra searches on the rayon thread pool.
    /// Each search writes only its own row, so the result does not depend on
    /// this flag.
    ///
    pub parallel: bool,
}

impl Default for JohnsonConfig {
    fn default() -> Self {
        JohnsonConfig { parallel: true }
    }
}

impl JohnsonConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

///
/// Potentials `h[node]` of the real nodes of `graph`,
/// i.e. Bellman-Ford distances from the virtual source.
///
/// All potentials are finite and non-positive.
/// Fails with `NegativeCycle` if the graph has any negative cycle.
///
pub fn potentials<V: Vertex>(graph: &Graph<V>) -> Result<Vec<f64>> {
    let (augmented, q) = graph.augmented_with_virtual_source();
    let paths = bellman_ford(&augmented, q)?;
    let mut h = paths.distances;
    // drop the virtual source (the last node)
    h.truncate(graph.vertex_count());
    Ok(h)
}

///
/// Reweighted copy of `graph`, `w'(u, v) = w(u, v) + h[u] - h[v]`.
///
/// Node and edge indices are the same as in `graph.digraph()`.
/// If `h` are the potentials of `graph`, every `w'` is non-negative: a value
/// below zero can only come from float rounding, and is raised to zero.
///
pub fn reweight<V: Vertex>(graph: &Graph<V>, h: &[f64]) -> DiGraph<(), f64> {
    let g = graph.digraph();
    let mut reweighted = DiGraph::with_capacity(g.node_count(), g.edge_count());
    for _ in g.node_indices() {
        reweighted.add_node(());
    }
    for edge in g.edge_references() {
        let u = edge.source();
        let v = edge.target();
        let w = edge.weight().float_weight();
        reweighted.add_edge(u, v, (w + h[u.index()] - h[v.index()]).max(0.0));
    }
    reweighted
}

///
/// Shortest distances between all ordered pairs of vertices, with the default
/// `JohnsonConfig`.
///
/// Fails with `NegativeCycle` if the graph contains a negative cycle; no
/// partial table is returned in that case.
///
pub fn all_pairs_shortest_paths<V: Vertex>(graph: &Graph<V>) -> Result<DistanceTable<V>> {
    all_pairs_shortest_paths_with(graph, &JohnsonConfig::default())
}

///
/// `all_pairs_shortest_paths` with explicit options.
///
pub fn all_pairs_shortest_paths_with<V: Vertex>(
    graph: &Graph<V>,
    config: &JohnsonConfig,
) -> Result<DistanceTable<V>> {
    let n = graph.vertex_count();
    debug!(
        "johnson: n_nodes={} n_edges={} parallel={}",
        n,
        graph.edge_count(),
        config.parallel
    );

    // (1) potentials from the virtual source
    let h = potentials(graph)?;
    debug!("johnson: potentials={:?}", h);

    // (2) reweight
    let reweighted = reweight(graph, &h);

    // (3) Dijkstra from each node; each search owns its row
    let search = |u: usize| dijkstra(&reweighted, NodeIndex::new(u));
    let reweighted_rows: Vec<Vec<f64>> = if config.parallel {
        (0..n).into_par_iter().map(search).collect()
    } else {
        (0..n).map(search).collect()
    };
    debug!("johnson: {} searches done", reweighted_rows.len());

    // (4) recover true distances
    let rows = graph
        .vertices()
        .zip(reweighted_rows)
        .enumerate()
        .map(|(u, (label, row))| {
            let dist = unreweight_row(u, &row, &h);
            DistanceRow::from_indexed(graph, label.clone(), &dist)
        })
        .collect();

    Ok(DistanceTable::from_rows(graph.vertices().cloned().collect(), rows))
}

///
/// `d(u, v) = d'(u, v) + h[v] - h[u]` for reachable `v`.
///
/// Unreachable stays `f64::INFINITY` (the adjustment is never added to it),
/// and `d(u, u)` is 0.
///
fn unreweight_row(u: usize, row: &[f64], h: &[f64]) -> Vec<f64> {
    row.iter()
        .enumerate()
        .map(|(v, &d)| {
            if v == u {
                0.0
            } else if d.is_finite() {
                d + h[v] - h[u]
            } else {
                f64::INFINITY
            }
        })
        .collect()
}

///
/// All-pairs shortest paths from a vertex list and an adjacency mapping
/// `vertex -> [(target, weight)]`.
///
/// Graph construction errors (`DuplicateVertex`, `MalformedEdge`,
/// `InvalidWeight`) are returned before any computation.
///
pub fn johnson<V, I, A, L, E>(vertices: I, edges_by_vertex: A) -> Result<DistanceTable<V>>
where
    V: Vertex,
    I: IntoIterator<Item = V>,
    A: IntoIterator<Item = (V, L)>,
    L: IntoIterator<Item = (V, E)>,
    E: FloatWeight,
{
    let graph = Graph::from_adjacency(vertices, edges_by_vertex)?;
    all_pairs_shortest_paths(&graph)
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bellman_ford::negative_tolerant_shortest_paths;
    use crate::error::Error;
    use fnv::FnvHashMap as HashMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const INF: f64 = f64::INFINITY;

    fn table_to_matrix<V: Vertex>(table: &DistanceTable<V>) -> Vec<Vec<f64>> {
        let vs = table.vertices();
        vs.iter()
            .map(|u| vs.iter().map(|v| table.get(u, v).unwrap()).collect())
            .collect()
    }

    ///
    /// plain O(n^3) Floyd-Warshall on a graph without negative cycles
    ///
    fn floyd_warshall<V: Vertex>(graph: &Graph<V>) -> Vec<Vec<f64>> {
        let n = graph.vertex_count();
        let g = graph.digraph();
        let mut dist = vec![vec![INF; n]; n];
        for i in 0..n {
            dist[i][i] = 0.0;
        }
        for edge in g.edge_references() {
            let (s, t) = (edge.source().index(), edge.target().index());
            dist[s][t] = dist[s][t].min(*edge.weight());
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }
        dist
    }

    ///
    /// random graph with integer weights.
    /// if `potential_shift` is true, weights are `c + p(u) - p(v)` with `c >= 0`
    /// so negative edges appear but no negative cycle does.
    ///
    fn random_graph(n: usize, p_edge: f64, potential_shift: bool, seed: u64) -> Graph<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let p: Vec<i64> = (0..n).map(|_| rng.random_range(-10..=10)).collect();
        let mut edges = vec![];
        for u in 0..n {
            for v in 0..n {
                if u != v && rng.random_bool(p_edge) {
                    let w = if potential_shift {
                        rng.random_range(0..=20) + p[u] - p[v]
                    } else {
                        rng.random_range(-3..=15)
                    };
                    edges.push((u, v, w));
                }
            }
        }
        Graph::build(0..n, edges).unwrap()
    }

    #[test]
    fn johnson_abc() {
        let g = Graph::build(
            ["A", "B", "C"],
            [("A", "B", 1), ("B", "C", 2), ("A", "C", 5)],
        )
        .unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(d.get(&"A", &"B"), Some(1.0));
        assert_eq!(d.get(&"A", &"C"), Some(3.0));
        assert_eq!(d.get(&"B", &"C"), Some(2.0));
        assert_eq!(d.get(&"C", &"A"), Some(INF));
        assert_eq!(d.get(&"C", &"B"), Some(INF));
        assert_eq!(d.get(&"B", &"A"), Some(INF));
        for v in ["A", "B", "C"] {
            assert_eq!(d.get(&v, &v), Some(0.0));
        }
    }

    #[test]
    fn johnson_clrs_figure_25_6() {
        // Introduction to algorithms Figure 25.6 (vertices 1..5)
        let g = Graph::build(
            1..=5,
            [
                (1, 2, 3),
                (1, 3, 8),
                (1, 5, -4),
                (2, 4, 1),
                (2, 5, 7),
                (3, 2, 4),
                (4, 1, 2),
                (4, 3, -5),
                (5, 4, 6),
            ],
        )
        .unwrap();

        let h = potentials(&g).unwrap();
        assert_eq!(h, vec![0.0, -1.0, -5.0, 0.0, -4.0]);

        let reweighted = reweight(&g, &h);
        let weights: Vec<f64> = reweighted.edge_references().map(|e| *e.weight()).collect();
        assert_eq!(weights, vec![4.0, 13.0, 0.0, 0.0, 10.0, 0.0, 2.0, 0.0, 2.0]);

        let d = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(
            table_to_matrix(&d),
            vec![
                vec![0.0, 1.0, -3.0, 2.0, -4.0],
                vec![3.0, 0.0, -4.0, 1.0, -1.0],
                vec![7.0, 4.0, 0.0, 5.0, 3.0],
                vec![2.0, -1.0, -5.0, 0.0, -2.0],
                vec![8.0, 5.0, 1.0, 6.0, 0.0],
            ]
        );
    }

    #[test]
    fn johnson_negative_cycle() {
        let g = Graph::build(
            ["A", "B", "C"],
            [("A", "B", 1), ("B", "C", 1), ("C", "A", -3)],
        )
        .unwrap();
        assert_eq!(
            negative_tolerant_shortest_paths(&g, &"A").err(),
            Some(Error::NegativeCycle)
        );
        assert_eq!(all_pairs_shortest_paths(&g).err(), Some(Error::NegativeCycle));
        assert_eq!(potentials(&g).err(), Some(Error::NegativeCycle));
    }

    #[test]
    fn johnson_negative_cycle_invalidates_whole_table() {
        // D and E are not connected to the cycle, but no table is returned
        let g = Graph::build(
            ["A", "B", "C", "D", "E"],
            [("A", "B", 1), ("B", "C", 1), ("C", "A", -3), ("D", "E", 2)],
        )
        .unwrap();
        assert_eq!(all_pairs_shortest_paths(&g).err(), Some(Error::NegativeCycle));
        // but single source from D is fine
        let row = negative_tolerant_shortest_paths(&g, &"D").unwrap();
        assert_eq!(row.get(&"E"), Some(2.0));
    }

    #[test]
    fn johnson_disconnected() {
        let g = Graph::build(["x", "y"], Vec::<(&str, &str, i64)>::new()).unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(d.get(&"x", &"y"), Some(INF));
        assert_eq!(d.get(&"y", &"x"), Some(INF));
        assert_eq!(d.get(&"x", &"x"), Some(0.0));
        assert_eq!(d.get(&"y", &"y"), Some(0.0));
    }

    #[test]
    fn johnson_unreachable_with_negative_potentials() {
        // h(B) = -5; d'(B, A) is infinite and must stay infinite
        let g = Graph::build(["A", "B", "C"], [("A", "B", -5), ("C", "A", 1)]).unwrap();
        let h = potentials(&g).unwrap();
        assert_eq!(h, vec![0.0, -5.0, 0.0]);
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(d.get(&"A", &"B"), Some(-5.0));
        assert_eq!(d.get(&"C", &"B"), Some(-4.0));
        assert_eq!(d.get(&"B", &"A"), Some(INF));
        assert_eq!(d.get(&"B", &"C"), Some(INF));
        assert_eq!(d.get(&"A", &"C"), Some(INF));
    }

    #[test]
    fn johnson_empty_graph() {
        let g = Graph::<&str>::build(vec![], Vec::<(&str, &str, i64)>::new()).unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert!(d.vertices().is_empty());
        assert!(d.is_symmetric());
    }

    #[test]
    fn johnson_self_loop() {
        // non-negative self loop is harmless, d(u, u) stays 0
        let g = Graph::build(["A", "B"], [("A", "A", 3), ("A", "B", -1)]).unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(d.get(&"A", &"A"), Some(0.0));
        assert_eq!(d.get(&"A", &"B"), Some(-1.0));

        // negative self loop is a negative cycle
        let g = Graph::build(["A", "B"], [("A", "A", -1), ("A", "B", 1)]).unwrap();
        assert_eq!(all_pairs_shortest_paths(&g).err(), Some(Error::NegativeCycle));
    }

    #[test]
    fn johnson_float_weights() {
        let g = Graph::build(
            ["p", "q", "r"],
            [("p", "q", 0.5), ("q", "r", -0.25), ("p", "r", 0.5)],
        )
        .unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(d.get(&"p", &"r"), Some(0.25));
        assert_eq!(d.get(&"q", &"r"), Some(-0.25));
    }

    #[test]
    fn johnson_zero_cycle_with_float_rounding() {
        for (a, b, c) in [(0.1, 0.7, -0.8), (2.9, 0.3, -3.2)] {
            let g = Graph::build(["A", "B", "C"], [("A", "B", a), ("B", "C", b), ("C", "A", c)])
                .unwrap();
            let h = potentials(&g).unwrap();
            assert!(reweight(&g, &h).edge_references().all(|e| *e.weight() >= 0.0));
            let d = all_pairs_shortest_paths(&g).unwrap();
            let close = |x: Option<f64>, y: f64| (x.unwrap() - y).abs() < 1e-12;
            assert!(close(d.get(&"A", &"C"), a + b));
            assert!(close(d.get(&"C", &"B"), c + a));
            assert!(close(d.get(&"B", &"A"), b + c));
            assert_eq!(d.get(&"A", &"A"), Some(0.0));
        }
    }

    #[test]
    fn johnson_symmetry() {
        // every edge is mirrored with the same weight
        let g = Graph::build(
            ["A", "B", "C", "D"],
            [
                ("A", "B", 2),
                ("B", "A", 2),
                ("B", "C", 3),
                ("C", "B", 3),
                ("A", "C", 7),
                ("C", "A", 7),
            ],
        )
        .unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        assert!(d.is_symmetric());
        assert_eq!(d.get(&"A", &"C"), Some(5.0));
        assert_eq!(d.get(&"C", &"A"), Some(5.0));

        // one direction has a different weight
        let g = Graph::build(["A", "B"], [("A", "B", 2), ("B", "A", 3)]).unwrap();
        assert!(!all_pairs_shortest_paths(&g).unwrap().is_symmetric());

        // one direction is missing
        let g = Graph::build(["A", "B"], [("A", "B", 2)]).unwrap();
        assert!(!all_pairs_shortest_paths(&g).unwrap().is_symmetric());
    }

    #[test]
    fn johnson_is_pure() {
        let g = random_graph(12, 0.3, true, 7);
        let d1 = all_pairs_shortest_paths(&g).unwrap();
        let d2 = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(d1, d2);
        let seq = JohnsonConfig::new().with_parallel(false);
        let d3 = all_pairs_shortest_paths_with(&g, &seq).unwrap();
        assert_eq!(d1, d3);
    }

    #[test]
    fn johnson_reweighted_edges_are_non_negative() {
        for seed in 0..20 {
            let g = random_graph(10, 0.4, true, seed);
            let h = potentials(&g).unwrap();
            assert!(h.iter().all(|&x| x.is_finite() && x <= 0.0));
            let reweighted = reweight(&g, &h);
            assert_eq!(reweighted.edge_count(), g.edge_count());
            for edge in reweighted.edge_references() {
                assert!(*edge.weight() >= 0.0, "seed={} w'={}", seed, edge.weight());
            }
        }
    }

    #[test]
    fn johnson_matches_bellman_ford_and_floyd_warshall() {
        for seed in 0..20 {
            let g = random_graph(9, 0.35, true, seed);
            let d = all_pairs_shortest_paths(&g).unwrap();
            assert_eq!(table_to_matrix(&d), floyd_warshall(&g), "seed={}", seed);
            for u in g.vertices() {
                let row = negative_tolerant_shortest_paths(&g, u).unwrap();
                for v in g.vertices() {
                    assert_eq!(d.get(u, v), row.get(v), "seed={} u={} v={}", seed, u, v);
                }
            }
        }
    }

    #[test]
    fn johnson_detects_cycle_iff_some_source_does() {
        for seed in 0..30 {
            let g = random_graph(8, 0.3, false, seed);
            let has_cycle = g
                .vertices()
                .any(|u| negative_tolerant_shortest_paths(&g, u).is_err());
            match all_pairs_shortest_paths(&g) {
                Ok(d) => {
                    assert!(!has_cycle, "seed={}", seed);
                    assert_eq!(table_to_matrix(&d), floyd_warshall(&g), "seed={}", seed);
                }
                Err(e) => {
                    assert!(has_cycle, "seed={}", seed);
                    assert_eq!(e, Error::NegativeCycle);
                }
            }
        }
    }

    #[test]
    fn johnson_from_adjacency() {
        let mut adj: HashMap<&str, Vec<(&str, i64)>> = HashMap::default();
        adj.insert("A", vec![("B", 1), ("C", 5)]);
        adj.insert("B", vec![("C", 2)]);
        let d = johnson(vec!["A", "B", "C"], adj).unwrap();
        assert_eq!(d.get(&"A", &"C"), Some(3.0));

        let mut adj: HashMap<&str, Vec<(&str, i64)>> = HashMap::default();
        adj.insert("A", vec![("Q", 1)]);
        assert!(matches!(
            johnson(vec!["A"], adj),
            Err(Error::MalformedEdge { .. })
        ));
    }
}

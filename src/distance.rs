//!
//! Distance rows (single source) and distance tables (all pairs)
//!
//! Unreachable pairs hold `f64::INFINITY`.
//!
use super::graph::{Graph, Vertex};
use fnv::FnvHashMap as HashMap;
use itertools::Itertools;

///
/// Shortest distances from one source vertex to every vertex of the graph.
///
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceRow<V: Vertex> {
    source: V,
    distances: HashMap<V, f64>,
}

impl<V: Vertex> DistanceRow<V> {
    ///
    /// Label a node-indexed distance vector `dist[node]` by the graph vertices.
    ///
    /// `dist` may be longer than the vertex count (e.g. it was computed on an
    /// augmented graph); extra entries are ignored.
    ///
    pub fn from_indexed(graph: &Graph<V>, source: V, dist: &[f64]) -> Self {
        let distances = graph
            .vertices()
            .zip(dist.iter())
            .map(|(v, &d)| (v.clone(), d))
            .collect();
        DistanceRow { source, distances }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    ///
    /// Distance from the source to `target`.
    /// `None` if `target` is not a vertex; `Some(f64::INFINITY)` if unreachable.
    ///
    pub fn get(&self, target: &V) -> Option<f64> {
        self.distances.get(target).copied()
    }

    pub fn is_reachable(&self, target: &V) -> bool {
        self.get(target).map_or(false, f64::is_finite)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// `(target, distance)` in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> {
        self.distances.iter().map(|(v, &d)| (v, d))
    }
}

///
/// All-pairs distance table.
///
/// `table.get(u, v)` is the shortest distance from `u` to `v`.
/// Rows and columns are kept in vertex declaration order.
///
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceTable<V: Vertex> {
    vertices: Vec<V>,
    rows: HashMap<V, DistanceRow<V>>,
}

impl<V: Vertex> DistanceTable<V> {
    ///
    /// Assemble a table from one row per vertex, given in declaration order.
    ///
    pub(crate) fn from_rows(vertices: Vec<V>, rows: Vec<DistanceRow<V>>) -> Self {
        debug_assert_eq!(vertices.len(), rows.len());
        let rows = rows
            .into_iter()
            .map(|row| (row.source.clone(), row))
            .collect();
        DistanceTable { vertices, rows }
    }

    /// Vertices in declaration order
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn row(&self, source: &V) -> Option<&DistanceRow<V>> {
        self.rows.get(source)
    }

    ///
    /// Distance from `source` to `target`.
    /// `None` if either is not a vertex; `Some(f64::INFINITY)` if unreachable.
    ///
    pub fn get(&self, source: &V, target: &V) -> Option<f64> {
        self.row(source).and_then(|row| row.get(target))
    }

    ///
    /// Rows in declaration order
    ///
    pub fn rows(&self) -> impl Iterator<Item = &DistanceRow<V>> {
        self.vertices.iter().filter_map(move |v| self.rows.get(v))
    }

    ///
    /// `d(u, v) == d(v, u)` for all pairs.
    ///
    pub fn is_symmetric(&self) -> bool {
        self.vertices
            .iter()
            .tuple_combinations()
            .all(|(u, v)| self.get(u, v) == self.get(v, u))
    }
}

impl<V: Vertex + std::fmt::Display> std::fmt::Display for DistanceTable<V> {
    ///
    /// Tab separated matrix with a header row, `inf` for unreachable pairs.
    ///
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "\t{}", self.vertices.iter().join("\t"))?;
        for u in self.vertices.iter() {
            let mut cells = self.vertices.iter().map(|v| match self.get(u, v) {
                Some(d) if d.is_finite() => d.to_string(),
                _ => "inf".to_string(),
            });
            writeln!(f, "{}\t{}", u, cells.join("\t"))?;
        }
        Ok(())
    }
}

//
// tests
//

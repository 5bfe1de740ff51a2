//!
//! All-pairs shortest paths on directed graphs with negative edge weights
//!
//! # Algorithms
//!
//! * bellman_ford: single source, negative weights allowed, negative cycle detection
//! * dijkstra: single source, non-negative weights
//! * johnson: all pairs, by reweighting with Bellman-Ford potentials and
//!   running Dijkstra from every vertex
//!
//! # Example
//!
//! ```rust
//! use johnson_apsp::graph::Graph;
//! use johnson_apsp::johnson::all_pairs_shortest_paths;
//!
//! let g = Graph::build(["A", "B", "C"], [("A", "B", 1), ("B", "C", 2), ("A", "C", 5)]).unwrap();
//! let d = all_pairs_shortest_paths(&g).unwrap();
//! assert_eq!(d.get(&"A", &"C"), Some(3.0));
//! assert_eq!(d.get(&"C", &"A"), Some(f64::INFINITY));
//! ```
//!
//! # Wrappers
//!
//! * graph: labelled graph with validated construction
//! * iterators
//! * parse: "u v w" text input
//!
pub mod bellman_ford;
pub mod common;
pub mod dijkstra;
pub mod distance;
pub mod error;
pub mod graph;
pub mod iterators;
pub mod johnson;
pub mod parse;

pub use bellman_ford::negative_tolerant_shortest_paths;
pub use dijkstra::non_negative_shortest_paths;
pub use distance::{DistanceRow, DistanceTable};
pub use error::{Error, Result};
pub use graph::Graph;
pub use johnson::{all_pairs_shortest_paths, johnson, JohnsonConfig};

//!
//! Error type of the shortest path computations
//!

/// Errors raised while building a graph or computing shortest paths.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An edge references a vertex outside the declared vertex set.
    #[error("edge {from} -> {to} references a vertex outside the vertex set")]
    MalformedEdge { from: String, to: String },

    /// The same vertex label was declared twice.
    #[error("vertex {0} is declared more than once")]
    DuplicateVertex(String),

    /// An edge weight is NaN or infinite.
    #[error("edge {from} -> {to} has a non-finite weight {weight}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// A query referenced a vertex that is not in the graph.
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(String),

    /// A negative-weight cycle is reachable from the source.
    #[error("graph contains a negative weight cycle")]
    NegativeCycle,

    /// Free text did not match the expected vertex or edge shape.
    #[error("line {line}: {reason}")]
    InputFormat { line: usize, reason: String },
}

impl From<petgraph::algo::NegativeCycle> for Error {
    fn from(_: petgraph::algo::NegativeCycle) -> Self {
        Error::NegativeCycle
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Render a vertex label for an error message.
pub(crate) fn label<V: std::fmt::Debug>(v: &V) -> String {
    format!("{:?}", v)
}

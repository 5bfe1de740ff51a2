//!
//! Text input of graphs
//!
//! * vertices: whitespace separated labels, e.g. `A B C`
//! * edges: one `u v w` per line with an integer weight `w`, e.g.
//!
//! ```text
//! A B 1
//! B C -2
//! ```
//!
//! Any line that does not have this shape is an `InputFormat` error.
//! Weights are stored as f64, so a weight beyond 2^53 in magnitude is
//! rejected as well.
//!
use super::common::MAX_EXACT_INTEGER;
use super::error::{Error, Result};
use super::graph::Graph;

///
/// Parse whitespace separated vertex labels.
///
/// Blank text has no vertex, which is an `InputFormat` error.
///
pub fn parse_vertices(text: &str) -> Result<Vec<String>> {
    let vertices: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    if vertices.is_empty() {
        return Err(Error::InputFormat {
            line: 1,
            reason: "no vertices are given".to_string(),
        });
    }
    Ok(vertices)
}

///
/// Parse one `u v w` edge per line.
///
/// Blank lines are skipped. Line numbers in errors start from 1.
///
pub fn parse_edges(text: &str) -> Result<Vec<(String, String, i64)>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_edge(line).map_err(|reason| Error::InputFormat { line: i + 1, reason })
        })
        .collect()
}

fn parse_edge(line: &str) -> std::result::Result<(String, String, i64), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [u, v, w] => {
            let w: i64 = w
                .parse()
                .map_err(|_| format!("weight {:?} is not an integer", w))?;
            if w.unsigned_abs() > MAX_EXACT_INTEGER as u64 {
                return Err(format!("weight {} is out of range +-2^53", w));
            }
            Ok((u.to_string(), v.to_string(), w))
        }
        _ => Err(format!(
            "expected \"u v w\" but found {} fields in {:?}",
            tokens.len(),
            line.trim()
        )),
    }
}

///
/// Parse vertices and edges, and build the graph.
///
/// An edge endpoint that is not in the vertex list is `MalformedEdge`.
///
pub fn parse_graph(vertices_text: &str, edges_text: &str) -> Result<Graph<String>> {
    let vertices = parse_vertices(vertices_text)?;
    let edges = parse_edges(edges_text)?;
    Graph::build(vertices, edges)
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::johnson::all_pairs_shortest_paths;

    #[test]
    fn parse_vertices_01() {
        assert_eq!(
            parse_vertices("  A B\tC \n D").unwrap(),
            vec!["A", "B", "C", "D"]
        );
        assert!(matches!(
            parse_vertices(" \n "),
            Err(Error::InputFormat { line: 1, .. })
        ));
    }

    #[test]
    fn parse_edges_01() {
        let edges = parse_edges("A B 1\n\nB C -2\n  C A 10  \n").unwrap();
        assert_eq!(
            edges,
            vec![
                ("A".to_string(), "B".to_string(), 1),
                ("B".to_string(), "C".to_string(), -2),
                ("C".to_string(), "A".to_string(), 10),
            ]
        );
        assert!(parse_edges("").unwrap().is_empty());
    }

    #[test]
    fn parse_edges_rejects_malformed_lines() {
        // too few fields
        assert!(matches!(
            parse_edges("A B 1\nB C"),
            Err(Error::InputFormat { line: 2, .. })
        ));
        // too many fields
        assert!(matches!(
            parse_edges("A B 1 2"),
            Err(Error::InputFormat { line: 1, .. })
        ));
        // non integer weight
        assert!(matches!(
            parse_edges("A B 1\n\nB C 1.5"),
            Err(Error::InputFormat { line: 3, .. })
        ));
        // not exact as f64
        assert!(matches!(
            parse_edges("A B 9007199254740993"),
            Err(Error::InputFormat { line: 1, .. })
        ));
        assert!(matches!(
            parse_edges("A B 1\nB A -9007199254740993"),
            Err(Error::InputFormat { line: 2, .. })
        ));
        assert_eq!(
            parse_edges("A B 9007199254740992").unwrap()[0].2,
            9007199254740992
        );
        // dash separated pairs are not edges
        assert!(matches!(
            parse_edges("A-B"),
            Err(Error::InputFormat { line: 1, .. })
        ));
    }

    #[test]
    fn parse_graph_01() {
        let g = parse_graph("A B C", "A B 1\nB C 2\nA C 5").unwrap();
        let d = all_pairs_shortest_paths(&g).unwrap();
        let (a, c) = ("A".to_string(), "C".to_string());
        assert_eq!(d.get(&a, &c), Some(3.0));
        assert_eq!(
            d.to_string(),
            "\tA\tB\tC\nA\t0\t1\t3\nB\tinf\t0\t2\nC\tinf\tinf\t0\n"
        );
    }

    #[test]
    fn parse_graph_unknown_endpoint() {
        let r = parse_graph("A B", "A B 1\nB X 2");
        assert_eq!(
            r.err(),
            Some(Error::MalformedEdge {
                from: "\"B\"".to_string(),
                to: "\"X\"".to_string(),
            })
        );
    }
}

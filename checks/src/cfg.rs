//! # Control-Flow-Graph Answers
//!
//! CFG construction exercises submit their answer as a JSON graph: a list
//! of node labels and a list of directed edges, where a dashed edge marks a
//! conditional jump. Comparison against the reference graph is
//! order-insensitive (the editor serialises nodes and edges in creation
//! order, which carries no meaning); strict mode additionally requires the
//! dashed/solid style of each edge to match.

use crate::error::ChecksError;
use serde::{Deserialize, Serialize};

/// A directed edge between two node labels.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct CfgEdge {
    pub from: String,
    pub to: String,
    /// Rendered dashed in the editor; marks a conditional jump.
    #[serde(default)]
    pub dashes: bool,
}

/// One submitted or reference control-flow graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CfgAnswer {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<CfgEdge>,
}

impl CfgAnswer {
    pub fn from_json(text: &str) -> Result<CfgAnswer, ChecksError> {
        serde_json::from_str(text).map_err(|error| ChecksError::InvalidAnswer(error.to_string()))
    }

    /// Order-insensitive graph equality. Nodes compare as multisets; edges
    /// compare by (from, to) pair, and by dash style too when `strict` is
    /// set.
    pub fn matches(&self, other: &CfgAnswer, strict: bool) -> bool {
        let mut our_nodes = self.nodes.clone();
        let mut their_nodes = other.nodes.clone();
        our_nodes.sort();
        their_nodes.sort();
        if our_nodes != their_nodes {
            return false;
        }

        let key = |edge: &CfgEdge| {
            (
                edge.from.clone(),
                edge.to.clone(),
                if strict { edge.dashes } else { false },
            )
        };
        let mut our_edges: Vec<_> = self.edges.iter().map(key).collect();
        let mut their_edges: Vec<_> = other.edges.iter().map(key).collect();
        our_edges.sort();
        their_edges.sort();
        our_edges == their_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, dashes: bool) -> CfgEdge {
        CfgEdge {
            from: from.into(),
            to: to.into(),
            dashes,
        }
    }

    fn graph(nodes: &[&str], edges: Vec<CfgEdge>) -> CfgAnswer {
        CfgAnswer {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            edges,
        }
    }

    #[test]
    fn test_from_json() {
        let answer = CfgAnswer::from_json(
            r#"{"nodes": ["start", "end"],
                "edges": [{"from": "start", "to": "end"}]}"#,
        )
        .unwrap();
        assert_eq!(answer.nodes.len(), 2);
        assert_eq!(answer.edges, vec![edge("start", "end", false)]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            CfgAnswer::from_json("{\"nodes\": 3}"),
            Err(ChecksError::InvalidAnswer(_))
        ));
    }

    #[test]
    fn test_permuted_order_compares_equal() {
        let reference = graph(
            &["a", "b", "c"],
            vec![edge("a", "b", false), edge("b", "c", true)],
        );
        let permuted = graph(
            &["c", "a", "b"],
            vec![edge("b", "c", true), edge("a", "b", false)],
        );
        assert!(reference.matches(&permuted, true));
    }

    #[test]
    fn test_missing_edge_fails() {
        let reference = graph(&["a", "b"], vec![edge("a", "b", false)]);
        let submitted = graph(&["a", "b"], vec![]);
        assert!(!reference.matches(&submitted, false));
    }

    #[test]
    fn test_different_nodes_fail() {
        let reference = graph(&["a", "b"], vec![]);
        let submitted = graph(&["a", "x"], vec![]);
        assert!(!reference.matches(&submitted, false));
    }

    #[test]
    fn test_dash_style_only_matters_in_strict_mode() {
        let reference = graph(&["a", "b"], vec![edge("a", "b", true)]);
        let submitted = graph(&["a", "b"], vec![edge("a", "b", false)]);
        assert!(reference.matches(&submitted, false));
        assert!(!reference.matches(&submitted, true));
    }

    #[test]
    fn test_duplicate_nodes_compare_as_multisets() {
        let reference = graph(&["a", "a", "b"], vec![]);
        let submitted = graph(&["a", "b"], vec![]);
        assert!(!reference.matches(&submitted, false));
    }
}

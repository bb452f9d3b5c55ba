//! Path scoring and relation display
//!
//! Scoring uses the degree-weighted path count (DWPC) heuristic from the
//! Rephetio line of work: every intermediate node contributes
//! `degree^-0.4`, discounting paths through promiscuous hubs. A direct
//! edge has no intermediates and scores exactly 1.0.
//!
//! Relation display has to recover a human-readable verb and arrow from
//! the stored edge. Two independent signals can flip the arrow: the edge
//! may only exist in the reverse direction in the directed layer, and the
//! relation label itself may carry the `REV_` prefix the graph build uses
//! for inverted duplicates. The two flips compound, so a `REV_` label
//! found in the reverse direction points forward again.

use remedi_kg::{GraphIndex, NodeId};

/// Damping exponent for DWPC (Rephetio standard).
pub const DAMPING_EXPONENT: f64 = 0.4;

/// Score multiplier for mechanisms through a curated regulator.
pub const VIP_BOOST: f64 = 10.0;

/// Prefix marking a relation stored in inverted form.
pub const REVERSE_PREFIX: &str = "REV_";

/// Degree-weighted path count for `path`.
///
/// Endpoints are excluded; nodes missing from the graph count as degree 1
/// so an unknown intermediate neither boosts nor sinks the path.
pub fn dwpc(graph: &GraphIndex, path: &[NodeId]) -> f64 {
    let mut score = 1.0;
    if path.len() <= 2 {
        return score;
    }
    for node in &path[1..path.len() - 1] {
        let degree = graph.degree(node).max(1);
        score *= (degree as f64).powf(-DAMPING_EXPONENT);
    }
    score
}

/// Display direction of an edge within a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// Points from the first node to the second.
    Forward,
    /// Points from the second node back to the first.
    Reverse,
    /// No stored direction (neutral association).
    Undirected,
}

impl Arrow {
    pub fn symbol(self) -> &'static str {
        match self {
            Arrow::Forward => "-->",
            Arrow::Reverse => "<--",
            Arrow::Undirected => "---",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Arrow::Forward => Arrow::Reverse,
            Arrow::Reverse => Arrow::Forward,
            Arrow::Undirected => Arrow::Undirected,
        }
    }
}

/// Resolve the displayed relation and arrow for the consecutive path pair
/// `(u, v)`.
///
/// Lookup order: stored forward edge, then stored reverse edge (flipping
/// the arrow), then a neutral "connected to". A `REV_`-prefixed relation
/// name flips the arrow a second time.
pub fn edge_display(graph: &GraphIndex, u: &NodeId, v: &NodeId) -> (String, Arrow) {
    let (relation, mut arrow) = if let Some(rel) = graph.relation(u, v) {
        (rel, Arrow::Forward)
    } else if let Some(rel) = graph.relation(v, u) {
        (rel, Arrow::Reverse)
    } else {
        return ("connected to".to_string(), Arrow::Undirected);
    };

    let verb = relation.strip_prefix(REVERSE_PREFIX).unwrap_or(relation);
    if relation.starts_with(REVERSE_PREFIX) {
        arrow = arrow.flipped();
    }
    (readable_relation(verb), arrow)
}

/// The stored orientation of the pair `(u, v)`: `(source, target, raw
/// relation)`. Used by the visualization exporter, which keeps raw labels.
pub fn oriented_edge<'a>(
    graph: &'a GraphIndex,
    u: &NodeId,
    v: &NodeId,
) -> (NodeId, NodeId, &'a str) {
    if let Some(rel) = graph.relation(u, v) {
        (u.clone(), v.clone(), rel)
    } else if let Some(rel) = graph.relation(v, u) {
        (v.clone(), u.clone(), rel)
    } else {
        (u.clone(), v.clone(), "connected")
    }
}

/// Map a relation verb to its readable phrase.
fn readable_relation(verb: &str) -> String {
    match verb.to_lowercase().as_str() {
        "binds" => "binds to",
        "targets" => "targets",
        "treats" => "treats",
        "inhibits" => "inhibits",
        "activates" => "activates",
        "upregulates" => "upregulates",
        "downregulates" => "downregulates",
        "associates" => "is associated with",
        "participates" => "participates in",
        "expresses" => "is expressed in",
        "interacts" => "interacts with",
        "regulates" => "regulates",
        "causes" => "causes",
        _ => verb,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn star_graph() -> GraphIndex {
        // B is a degree-4 hub between A and C.
        GraphIndex::from_edges(vec![
            ("A", "B", "targets"),
            ("B", "C", "associates"),
            ("B", "X", "interacts"),
            ("B", "Y", "interacts"),
            ("D", "E", "REV_regulates"),
        ])
    }

    fn path(ids: &[&str]) -> Vec<NodeId> {
        ids.iter().map(|s| NodeId::new(*s)).collect()
    }

    #[test]
    fn direct_edge_scores_one() {
        let g = star_graph();
        assert_eq!(dwpc(&g, &path(&["A", "B"])), 1.0);
    }

    #[test]
    fn hub_intermediates_are_damped() {
        let g = star_graph();
        let score = dwpc(&g, &path(&["A", "B", "C"]));
        assert_relative_eq!(score, 4f64.powf(-0.4), epsilon = 1e-12);
    }

    #[test]
    fn unknown_intermediate_counts_as_degree_one() {
        let g = star_graph();
        assert_eq!(dwpc(&g, &path(&["A", "ghost", "C"])), 1.0);
    }

    #[test]
    fn forward_edge_keeps_forward_arrow() {
        let g = star_graph();
        let (rel, arrow) = edge_display(&g, &NodeId::new("A"), &NodeId::new("B"));
        assert_eq!(rel, "targets");
        assert_eq!(arrow, Arrow::Forward);
    }

    #[test]
    fn reverse_lookup_flips_arrow() {
        let g = star_graph();
        let (rel, arrow) = edge_display(&g, &NodeId::new("B"), &NodeId::new("A"));
        assert_eq!(rel, "targets");
        assert_eq!(arrow, Arrow::Reverse);
    }

    #[test]
    fn rev_prefix_flips_arrow_again() {
        let g = star_graph();
        // Stored forward as REV_regulates: one flip, arrow ends reversed.
        let (rel, arrow) = edge_display(&g, &NodeId::new("D"), &NodeId::new("E"));
        assert_eq!(rel, "regulates");
        assert_eq!(arrow, Arrow::Reverse);
        // Looked up in reverse AND REV_-prefixed: both flips compound back
        // to forward.
        let (_, arrow) = edge_display(&g, &NodeId::new("E"), &NodeId::new("D"));
        assert_eq!(arrow, Arrow::Forward);
    }

    #[test]
    fn unstored_pair_is_neutral() {
        let g = star_graph();
        let (rel, arrow) = edge_display(&g, &NodeId::new("A"), &NodeId::new("C"));
        assert_eq!(rel, "connected to");
        assert_eq!(arrow, Arrow::Undirected);
    }

    #[test]
    fn oriented_edge_recovers_stored_direction() {
        let g = star_graph();
        let (s, t, rel) = oriented_edge(&g, &NodeId::new("B"), &NodeId::new("A"));
        assert_eq!((s.as_str(), t.as_str(), rel), ("A", "B", "targets"));
        let (s, t, rel) = oriented_edge(&g, &NodeId::new("A"), &NodeId::new("C"));
        assert_eq!((s.as_str(), t.as_str(), rel), ("A", "C", "connected"));
    }

    proptest! {
        /// DWPC over real intermediates always lands in (0, 1] and only
        /// decreases as the path grows through connected nodes.
        #[test]
        fn dwpc_is_monotone_in_path_length(extra in 0usize..3) {
            let g = star_graph();
            let mut p = path(&["A", "B", "C"]);
            let tail = ["X", "Y"];
            for t in tail.iter().take(extra) {
                p.insert(p.len() - 1, NodeId::new(*t));
            }
            let score = dwpc(&g, &p);
            prop_assert!(score > 0.0 && score <= 1.0);
            if extra > 0 {
                prop_assert!(score <= dwpc(&g, &path(&["A", "B", "C"])));
            }
        }
    }
}

//! Visualization export: mechanisms → deduplicated node/edge sets
//!
//! Front-end renderers want one flat graph, not twenty overlapping paths.
//! Nodes are added once (first occurrence wins) with catalog-resolved
//! labels; edges are keyed by `source-target-relation` so mechanisms that
//! share a sub-path contribute each edge once. Edge orientation follows
//! the stored direction in the directed layer.

use crate::mechanism::Mechanism;
use crate::score::oriented_edge;
use ahash::AHashSet;
use remedi_kg::{EntityCatalog, GraphIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizEdge {
    /// Composite identity: `source-target-relation`.
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationGraph {
    pub nodes: Vec<VizNode>,
    pub edges: Vec<VizEdge>,
}

/// Convert a mechanism list into a renderable graph. Read-only on the
/// index and idempotent: the same input always yields the same sets.
pub fn export(
    catalog: &EntityCatalog,
    index: &GraphIndex,
    mechanisms: &[Mechanism],
) -> VisualizationGraph {
    let mut graph = VisualizationGraph::default();
    let mut seen_nodes: AHashSet<String> = AHashSet::new();
    let mut seen_edges: AHashSet<String> = AHashSet::new();

    for mechanism in mechanisms {
        for node in &mechanism.path {
            if seen_nodes.insert(node.as_str().to_string()) {
                let info = catalog.display_info(node);
                graph.nodes.push(VizNode {
                    id: node.as_str().to_string(),
                    label: info.name,
                    node_type: info.node_type,
                });
            }
        }
        for pair in mechanism.path.windows(2) {
            let (source, target, relation) = oriented_edge(index, &pair[0], &pair[1]);
            let id = format!("{source}-{target}-{relation}");
            if seen_edges.insert(id.clone()) {
                graph.edges.push(VizEdge {
                    id,
                    source: source.as_str().to_string(),
                    target: target.as_str().to_string(),
                    label: relation.to_string(),
                });
            }
        }
    }
    graph
}

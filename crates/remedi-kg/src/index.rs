//! Dual graph index: directed relations plus undirected adjacency
//!
//! The adjacency export is a JSON object mapping each node id to its
//! outgoing neighbors and relation labels:
//!
//! ```text
//! { "6809": { "5562": "targets", "3077": "treats" }, ... }
//! ```
//!
//! Every directed edge also contributes an undirected edge to the
//! companion adjacency, which drives mechanism discovery. Undirected
//! neighbor lists are sorted after construction so traversal order (and
//! therefore every search result) is deterministic for a fixed graph
//! snapshot. Per-node degree is the undirected neighbor count and feeds
//! the degree-damped path scorer.

use crate::NodeId;
use ahash::AHashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct GraphIndex {
    /// Directed layer: source -> (target -> relation label).
    directed: AHashMap<NodeId, AHashMap<NodeId, String>>,
    /// Undirected layer: node -> sorted, deduplicated neighbor list.
    undirected: AHashMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
}

impl GraphIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(source, target, relation)` triples.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (u, v, rel) in edges {
            index.insert_edge(NodeId::new(u.into()), NodeId::new(v.into()), rel.into());
        }
        index.finalize();
        index
    }

    /// Load the adjacency export from JSON.
    ///
    /// A missing or unparseable file yields an empty index (logged, not
    /// fatal); individual records that are not string-keyed objects are
    /// skipped so one corrupt entry cannot poison the build.
    pub fn load_json(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "adjacency source unavailable, graph index stays empty"
                );
                return Self::new();
            }
        };
        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "adjacency source unparseable, graph index stays empty"
                );
                return Self::new();
            }
        };

        let mut index = Self::new();
        let Some(adjacency) = parsed.as_object() else {
            tracing::warn!(path = %path.display(), "adjacency root is not an object");
            return index;
        };
        for (source, neighbors) in adjacency {
            let Some(neighbors) = neighbors.as_object() else {
                tracing::debug!(node = %source, "skipping non-object adjacency record");
                continue;
            };
            for (target, relation) in neighbors {
                let Some(relation) = relation.as_str() else {
                    tracing::debug!(node = %source, neighbor = %target, "skipping non-string relation");
                    continue;
                };
                index.insert_edge(
                    NodeId::new(source.as_str()),
                    NodeId::new(target.as_str()),
                    relation.to_string(),
                );
            }
        }
        index.finalize();
        tracing::info!(
            path = %path.display(),
            nodes = index.node_count(),
            edges = index.edge_count(),
            "graph index built"
        );
        index
    }

    fn insert_edge(&mut self, u: NodeId, v: NodeId, relation: String) {
        if u.as_str().is_empty() || v.as_str().is_empty() {
            return;
        }
        let outgoing = self.directed.entry(u.clone()).or_default();
        if outgoing.insert(v.clone(), relation).is_none() {
            self.edge_count += 1;
        }
        self.undirected.entry(u.clone()).or_default().push(v.clone());
        self.undirected.entry(v).or_default().push(u);
    }

    /// Sort and deduplicate neighbor lists. Must run once after the last
    /// `insert_edge`; `from_edges`/`load_json` take care of it.
    fn finalize(&mut self) {
        for neighbors in self.undirected.values_mut() {
            neighbors.sort();
            neighbors.dedup();
        }
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.undirected.contains_key(node)
    }

    /// The stored relation for the directed edge `u -> v`, if any.
    pub fn relation(&self, u: &NodeId, v: &NodeId) -> Option<&str> {
        self.directed.get(u)?.get(v).map(String::as_str)
    }

    /// Undirected neighbors of `node`, in sorted order.
    pub fn neighbors(&self, node: &NodeId) -> &[NodeId] {
        self.undirected.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Undirected degree. Nodes absent from the graph have degree 0.
    pub fn degree(&self, node: &NodeId) -> usize {
        self.neighbors(node).len()
    }

    pub fn node_count(&self) -> usize {
        self.undirected.len()
    }

    /// Number of stored directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.undirected.is_empty()
    }
}

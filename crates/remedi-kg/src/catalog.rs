//! Entity catalog: node records and case-insensitive name resolution
//!
//! The node table is a CSV export with one row per graph node. The layout
//! mirrors the graph build pipeline's output: column 1 is the node type,
//! column 2 the display name, column 3 the node id (column 0 is a build
//! artifact we ignore). Rows missing the id column are skipped
//! individually; a missing file leaves the catalog empty.

use crate::NodeId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display information for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

/// Node catalog with a lowercased name index.
///
/// Built once at startup and treated as read-only afterwards; concurrent
/// readers need no locking.
#[derive(Debug, Default)]
pub struct EntityCatalog {
    nodes: AHashMap<String, NodeInfo>,
    /// Lowercased display name -> node id.
    name_index: AHashMap<String, NodeId>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the catalog.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a single node record. Later duplicates win, matching the
    /// CSV load order semantics.
    pub fn insert(&mut self, id: NodeId, name: impl Into<String>, node_type: impl Into<String>) {
        let name = name.into();
        self.name_index.insert(name.to_lowercase(), id.clone());
        self.nodes.insert(
            id.as_str().to_string(),
            NodeInfo {
                name,
                node_type: node_type.into(),
            },
        );
    }

    /// Load the node table from CSV.
    ///
    /// Idempotent: a second call on a populated catalog is a no-op. A
    /// missing or unreadable file logs a warning and leaves the catalog
    /// empty; malformed rows are skipped one by one.
    pub fn load_csv(&mut self, path: &Path) {
        if !self.is_empty() {
            tracing::debug!(path = %path.display(), "catalog already populated, skipping load");
            return;
        }
        match self.read_rows(path) {
            Ok(loaded) => {
                tracing::info!(path = %path.display(), nodes = loaded, "entity catalog loaded");
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "node table unavailable, catalog stays empty"
                );
            }
        }
    }

    fn read_rows(&mut self, path: &Path) -> anyhow::Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let mut loaded = 0usize;
        for record in reader.records() {
            let record = match record {
                Ok(r) => r,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping malformed node row");
                    continue;
                }
            };
            let (Some(node_type), Some(name), Some(id)) =
                (record.get(1), record.get(2), record.get(3))
            else {
                continue;
            };
            let id = id.trim();
            if id.is_empty() {
                continue;
            }
            self.insert(NodeId::new(id), name.trim(), node_type.trim());
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Resolve a display name to a node id, case-insensitively.
    pub fn resolve(&self, text: &str) -> Option<NodeId> {
        self.name_index.get(&text.trim().to_lowercase()).cloned()
    }

    /// Whether the given id names a cataloged node.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id.local())
    }

    /// Look up a node's display info.
    ///
    /// The synonym `Compound` is normalized to `Drug` for display.
    pub fn get(&self, id: &NodeId) -> Option<NodeInfo> {
        self.nodes.get(id.local()).map(normalize_type)
    }

    /// Infallible lookup for display paths: unknown ids fall back to the
    /// raw id as the name and an `Unknown` type rather than failing the
    /// surrounding export.
    pub fn display_info(&self, id: &NodeId) -> NodeInfo {
        self.get(id).unwrap_or_else(|| NodeInfo {
            name: id.local().to_string(),
            node_type: "Unknown".to_string(),
        })
    }
}

fn normalize_type(info: &NodeInfo) -> NodeInfo {
    let node_type = if info.node_type == "Compound" {
        "Drug".to_string()
    } else {
        info.node_type.clone()
    };
    NodeInfo {
        name: info.name.clone(),
        node_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_catalog() -> EntityCatalog {
        let mut catalog = EntityCatalog::new();
        catalog.insert(NodeId::new("6809"), "Metformin", "Compound");
        catalog.insert(NodeId::new("7157"), "TP53", "Gene");
        catalog.insert(NodeId::new("3077"), "type 2 diabetes mellitus", "Disease");
        catalog
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("metformin"), Some(NodeId::new("6809")));
        assert_eq!(catalog.resolve("  METFORMIN "), Some(NodeId::new("6809")));
        assert_eq!(catalog.resolve("aspirin"), None);
    }

    #[test]
    fn resolve_then_get_round_trips_name() {
        let catalog = sample_catalog();
        let id = catalog.resolve("Type 2 Diabetes Mellitus").unwrap();
        let info = catalog.get(&id).unwrap();
        assert_eq!(info.name.to_lowercase(), "type 2 diabetes mellitus");
    }

    #[test]
    fn compound_displays_as_drug() {
        let catalog = sample_catalog();
        let info = catalog.get(&NodeId::new("6809")).unwrap();
        assert_eq!(info.node_type, "Drug");
        // The Gene type is untouched.
        assert_eq!(catalog.get(&NodeId::new("7157")).unwrap().node_type, "Gene");
    }

    #[test]
    fn namespaced_id_resolves_to_bare_record() {
        let catalog = sample_catalog();
        let info = catalog.get(&NodeId::new("Compound::6809")).unwrap();
        assert_eq!(info.name, "Metformin");
    }

    #[test]
    fn display_info_falls_back_to_raw_id() {
        let catalog = sample_catalog();
        let info = catalog.display_info(&NodeId::new("99999"));
        assert_eq!(info.name, "99999");
        assert_eq!(info.node_type, "Unknown");
    }

    #[test]
    fn missing_file_leaves_catalog_empty() {
        let mut catalog = EntityCatalog::new();
        catalog.load_csv(Path::new("/nonexistent/nodes.csv"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn csv_load_skips_short_and_blank_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "idx,type,name,id").unwrap();
        writeln!(file, "0,Compound,Metformin,6809").unwrap();
        writeln!(file, "1,Gene,TP53").unwrap(); // short row
        writeln!(file, "2,Gene,EGFR,  ").unwrap(); // blank id
        writeln!(file, "3,Disease,breast cancer,1612").unwrap();
        drop(file);

        let mut catalog = EntityCatalog::new();
        catalog.load_csv(&path);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve("breast cancer").is_some());
        assert!(catalog.resolve("TP53").is_none());
    }

    #[test]
    fn load_csv_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.csv");
        std::fs::write(&path, "idx,type,name,id\n0,Compound,Metformin,6809\n").unwrap();

        let mut catalog = EntityCatalog::new();
        catalog.load_csv(&path);
        assert_eq!(catalog.len(), 1);

        // Second load is a no-op even against a different file.
        let other = dir.path().join("other.csv");
        std::fs::write(&other, "idx,type,name,id\n0,Gene,TP53,7157\n").unwrap();
        catalog.load_csv(&other);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.resolve("TP53").is_none());
    }
}

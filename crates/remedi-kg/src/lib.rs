//! Remedi Knowledge Graph: entity catalog and dual graph index
//!
//! The explanation engine needs two read-only structures built once at
//! startup from the exported knowledge graph:
//!
//! 1. **Entity Catalog**: node records `(id, name, type)` plus a
//!    case-insensitive name index, so callers can pass either a raw node
//!    id or a display name ("Metformin").
//! 2. **Dual Graph Index**: the directed, relation-labeled graph alongside
//!    a companion undirected adjacency over the same node set. Mechanism
//!    discovery runs on the undirected layer; relation display and the
//!    direct-edge fallback consult the directed layer.
//!
//! Both structures degrade to empty on missing or corrupt input rather
//! than failing process startup: a service running against an empty index
//! simply answers "no mechanisms found" until the data is restored.
//!
//! ## Module Organization
//!
//! - `catalog`: node table loading and name resolution
//! - `index`: dual-layer graph construction and degree lookup
//! - `paths`: unweighted BFS and bounded simple-path enumeration

pub mod catalog;
pub mod index;
pub mod paths;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use catalog::{EntityCatalog, NodeInfo};
pub use index::GraphIndex;
pub use paths::{shortest_path, SimplePaths};

/// Strongly-typed node identifier.
///
/// Node ids in the exported graph are opaque strings (often numeric, e.g.
/// `"6809"`, sometimes namespaced like `"Compound::6809"`). Keeping them
/// behind a newtype prevents display names and raw ids from being mixed
/// up at call sites; name resolution is an explicit catalog step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id without any `Namespace::` prefix.
    ///
    /// Exported ids occasionally arrive as `"Compound::6809"`; the node
    /// table keys on the bare `"6809"` form.
    pub fn local(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_strips_namespace_prefix() {
        assert_eq!(NodeId::new("Compound::6809").local(), "6809");
        assert_eq!(NodeId::new("6809").local(), "6809");
        assert_eq!(NodeId::new("Gene::X::7157").local(), "7157");
    }

    #[test]
    fn node_id_serde_is_transparent() {
        let id = NodeId::new("42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

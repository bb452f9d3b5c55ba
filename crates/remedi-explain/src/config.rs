//! Engine configuration: curated regulators, search limits, weights
//!
//! The regulator table used to live as a mutable module-level map that
//! callers patched at runtime; here it is a typed, validated, immutable
//! value built once at startup. Config files use a JSON array so the
//! regulator iteration order (and with it the result order) is explicit.

use anyhow::{bail, Context};
use remedi_kg::NodeId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One curated regulator: a display name and its node id in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulator {
    pub name: String,
    pub id: NodeId,
}

/// The ordered curated regulator set (small; typically ≤10 entries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegulatorSet {
    regulators: Vec<Regulator>,
}

impl RegulatorSet {
    /// An empty set disables the targeted phase entirely.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(name, node id)` pairs, validating each entry.
    pub fn from_pairs<I, S>(pairs: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut regulators = Vec::new();
        for (name, id) in pairs {
            let name = name.into();
            let id = id.into();
            if name.trim().is_empty() || id.trim().is_empty() {
                bail!("regulator entries need a non-empty name and node id");
            }
            regulators.push(Regulator {
                name,
                id: NodeId::new(id),
            });
        }
        Ok(Self { regulators })
    }

    /// Load from a JSON array of `{"name": ..., "id": ...}` entries.
    ///
    /// Unlike the graph data, a broken regulator config is a startup
    /// error: a silently empty set would disable the targeted phase
    /// without anyone noticing.
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading regulator config {}", path.display()))?;
        let set: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing regulator config {}", path.display()))?;
        for regulator in &set.regulators {
            if regulator.name.trim().is_empty() || regulator.id.as_str().trim().is_empty() {
                bail!(
                    "regulator config {} has an entry with a blank name or id",
                    path.display()
                );
            }
        }
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regulator> {
        self.regulators.iter()
    }

    pub fn len(&self) -> usize {
        self.regulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regulators.is_empty()
    }
}

/// Fixed budgets bounding the search phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Node cap for regulator-stitched paths.
    pub max_targeted_nodes: usize,
    /// Node cap for the general phase.
    pub max_general_nodes: usize,
    /// Maximum candidate paths drawn from the enumerator per query.
    pub exploration_budget: usize,
    /// General mechanisms accepted before the phase stops.
    pub max_general_mechanisms: usize,
    /// Top mechanisms rendered when a result is exported as a graph.
    pub export_cap: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_targeted_nodes: 6,
            max_general_nodes: 4,
            exploration_budget: 3000,
            max_general_mechanisms: 20,
            export_cap: 20,
        }
    }
}

/// Per-signal weights for the final confidence score.
///
/// These are deliberately a tunable policy value, not a structural
/// constant; the defaults favor the gene and embedding signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub gene_influence: f64,
    pub embedding_similarity: f64,
    pub pathway: f64,
    pub rule_mining: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            gene_influence: 0.35,
            embedding_similarity: 0.35,
            pathway: 0.15,
            rule_mining: 0.15,
        }
    }
}

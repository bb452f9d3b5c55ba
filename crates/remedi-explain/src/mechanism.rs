use remedi_kg::NodeId;
use serde::{Deserialize, Serialize};

/// How a mechanism was discovered, which also sets its display label and
/// its rule-mining weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "regulator")]
pub enum MechanismTag {
    /// Reconstructed through a curated regulator; carries its display name.
    Via(String),
    /// Found by the unbiased bounded search.
    General,
    /// Fallback: a bare directed edge between the endpoints.
    DirectLink,
    /// Fallback: undirected reachability only.
    Association,
}

impl MechanismTag {
    pub fn label(&self) -> String {
        match self {
            MechanismTag::Via(name) => format!("VIA {name}"),
            MechanismTag::General => "General".to_string(),
            MechanismTag::DirectLink => "Direct Link".to_string(),
            MechanismTag::Association => "Association (Undirected)".to_string(),
        }
    }

    /// Whether this mechanism went through the curated regulator phase.
    pub fn is_targeted(&self) -> bool {
        matches!(self, MechanismTag::Via(_))
    }
}

/// A scored, tagged explanatory path between the queried endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    pub path: Vec<NodeId>,
    pub score: f64,
    pub tag: MechanismTag,
}

impl Mechanism {
    /// The path's interior nodes (everything but the endpoints).
    pub fn intermediates(&self) -> &[NodeId] {
        if self.path.len() <= 2 {
            &[]
        } else {
            &self.path[1..self.path.len() - 1]
        }
    }
}

/// The full ranked answer for one query.
///
/// An empty mechanism list is a legitimate outcome ("no discoverable
/// relationship"), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub source: NodeId,
    pub target: NodeId,
    /// Sorted by score, descending; ties keep discovery order.
    pub mechanisms: Vec<Mechanism>,
}

impl Explanation {
    /// The top `n` mechanisms, for export and confidence aggregation.
    pub fn top(&self, n: usize) -> &[Mechanism] {
        &self.mechanisms[..self.mechanisms.len().min(n)]
    }

    pub fn is_empty(&self) -> bool {
        self.mechanisms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_labels_match_display_contract() {
        assert_eq!(MechanismTag::Via("MTOR".into()).label(), "VIA MTOR");
        assert_eq!(MechanismTag::General.label(), "General");
        assert_eq!(MechanismTag::DirectLink.label(), "Direct Link");
        assert_eq!(MechanismTag::Association.label(), "Association (Undirected)");
    }

    #[test]
    fn intermediates_exclude_endpoints() {
        let m = Mechanism {
            path: vec![NodeId::new("A"), NodeId::new("B"), NodeId::new("C")],
            score: 1.0,
            tag: MechanismTag::General,
        };
        assert_eq!(m.intermediates(), &[NodeId::new("B")]);

        let direct = Mechanism {
            path: vec![NodeId::new("A"), NodeId::new("C")],
            score: 0.5,
            tag: MechanismTag::DirectLink,
        };
        assert!(direct.intermediates().is_empty());
    }
}

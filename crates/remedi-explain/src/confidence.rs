//! Multi-signal confidence aggregation
//!
//! Consumes the ranked mechanism list plus two optional signals supplied
//! by neural collaborators (an embedding-similarity scalar and a
//! gene-importance map) and folds them into one explainable breakdown:
//! raw per-signal values, normalized [0,1] values, and a weighted final
//! percentage, each backed by a detail list for display.
//!
//! Only the top-5 mechanisms feed the aggregation; beyond that the
//! signal saturates without adding interpretive value.

use crate::config::ConfidenceWeights;
use crate::mechanism::Mechanism;
use crate::render::rule_sentence;
use ahash::{AHashMap, AHashSet};
use remedi_kg::{EntityCatalog, GraphIndex, NodeId};
use serde::{Deserialize, Serialize};

/// Highest mechanism score observed in practice: a boosted regulator path
/// with degree-1 intermediates. Normalizes the pathway component.
pub const PATHWAY_SCORE_CEILING: f64 = 10.0;

/// How many ranked mechanisms feed the aggregation.
const TOP_MECHANISMS: usize = 5;

/// Optional inputs from external neural components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorSignals {
    /// Embedding cosine similarity for the pair, already in [0, 1].
    pub embedding_similarity: Option<f64>,
    /// Gene display name -> saliency importance in [0, 1].
    pub gene_importance: Option<AHashMap<String, f64>>,
}

/// One value per confidence signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalValues {
    pub pathway: f64,
    pub gene_influence: f64,
    pub embedding_similarity: f64,
    pub rule_mining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayDetail {
    /// Display names along the path.
    pub path: Vec<String>,
    pub score: f64,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDetail {
    pub gene: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceDetails {
    pub pathways: Vec<PathwayDetail>,
    pub genes: Vec<GeneDetail>,
    pub rules: Vec<String>,
}

/// The full aggregation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub averages: SignalValues,
    pub normalized: SignalValues,
    /// Weighted percentage in [0, 100].
    pub final_confidence: f64,
    pub details: ConfidenceDetails,
}

/// Aggregate the confidence breakdown for a ranked mechanism list.
///
/// Entity ids in the detail lists are resolved through the catalog;
/// unresolved ids degrade to their raw id text instead of failing the
/// aggregation.
pub fn aggregate(
    catalog: &EntityCatalog,
    index: &GraphIndex,
    mechanisms: &[Mechanism],
    signals: &CollaboratorSignals,
    weights: &ConfidenceWeights,
) -> ConfidenceBreakdown {
    let top = &mechanisms[..mechanisms.len().min(TOP_MECHANISMS)];

    // Pathway component: mean of the top scores against the fixed ceiling.
    let pathway_raw = if top.is_empty() {
        0.0
    } else {
        top.iter().map(|m| m.score).sum::<f64>() / top.len() as f64
    };
    let pathway_norm = (pathway_raw / PATHWAY_SCORE_CEILING).clamp(0.0, 1.0);

    // Gene-influence component: distinct intermediates across the top
    // mechanisms, in discovery order.
    let mut influenced: Vec<NodeId> = Vec::new();
    let mut seen: AHashSet<&NodeId> = AHashSet::new();
    for mechanism in top {
        for node in mechanism.intermediates() {
            if seen.insert(node) {
                influenced.push(node.clone());
            }
        }
    }
    let gene_raw = ((influenced.len() * 10).min(100)) as f64;
    let gene_norm = gene_raw / 100.0;

    let mut genes: Vec<GeneDetail> = influenced
        .iter()
        .map(|id| {
            let name = catalog.display_info(id).name;
            let importance = signals
                .gene_importance
                .as_ref()
                .and_then(|map| map.get(&name).copied())
                .unwrap_or(0.0);
            GeneDetail { gene: name, importance }
        })
        .collect();
    if signals.gene_importance.is_some() {
        // Preferentially report by importance rank when the saliency
        // signal is available.
        genes.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    // Rule-mining component: targeted mechanisms weigh double.
    let rule_raw: f64 = top
        .iter()
        .map(|m| if m.tag.is_targeted() { 1.0 } else { 0.5 })
        .sum();
    let rule_norm = (rule_raw * 0.2).clamp(0.0, 1.0);

    // Embedding component: pass-through from the collaborator.
    let embedding_raw = signals.embedding_similarity.unwrap_or(0.0);
    let embedding_norm = embedding_raw.clamp(0.0, 1.0);

    let weighted = weights.gene_influence * gene_norm
        + weights.embedding_similarity * embedding_norm
        + weights.pathway * pathway_norm
        + weights.rule_mining * rule_norm;
    let final_confidence = (weighted.clamp(0.0, 1.0) * 100.0).min(100.0);

    let details = ConfidenceDetails {
        pathways: top
            .iter()
            .map(|m| PathwayDetail {
                path: m
                    .path
                    .iter()
                    .map(|id| catalog.display_info(id).name)
                    .collect(),
                score: m.score,
                tag: m.tag.label(),
            })
            .collect(),
        genes,
        rules: top
            .iter()
            .map(|m| rule_sentence(catalog, index, m))
            .collect(),
    };

    ConfidenceBreakdown {
        averages: SignalValues {
            pathway: pathway_raw,
            gene_influence: gene_raw,
            embedding_similarity: embedding_raw,
            rule_mining: rule_raw,
        },
        normalized: SignalValues {
            pathway: pathway_norm,
            gene_influence: gene_norm,
            embedding_similarity: embedding_norm,
            rule_mining: rule_norm,
        },
        final_confidence,
        details,
    }
}

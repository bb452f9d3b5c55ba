//! Pathway influence ranking
//!
//! Given a curated pathway → member-genes map and the gene-importance
//! signal, score each pathway by the **max** importance over its members.
//! Saliency is sparse, so a mean dilutes real hits; max highlights a
//! pathway as soon as any member gene lights up. Scores are then
//! normalized so the strongest pathway reads 1.0.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayInfluence {
    pub pathway: String,
    pub influence: f64,
}

/// Load the pathway → genes map from JSON. Missing or unparseable file
/// yields an empty map (logged); the influence list is then empty too.
pub fn load_pathways(path: &Path) -> BTreeMap<String, Vec<String>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "pathway map unavailable");
            return BTreeMap::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(map) => map,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "pathway map unparseable");
            BTreeMap::new()
        }
    }
}

/// Rank pathways by member-gene importance, normalized to a top score of
/// 1.0, descending. Genes absent from the signal contribute 0.
pub fn pathway_influence(
    pathways: &BTreeMap<String, Vec<String>>,
    gene_importance: &AHashMap<String, f64>,
) -> Vec<PathwayInfluence> {
    let mut results: Vec<PathwayInfluence> = pathways
        .iter()
        .map(|(pathway, genes)| {
            let influence = genes
                .iter()
                .map(|gene| gene_importance.get(gene).copied().unwrap_or(0.0))
                .fold(0.0, f64::max);
            PathwayInfluence {
                pathway: pathway.clone(),
                influence,
            }
        })
        .collect();

    let max = results.iter().map(|p| p.influence).fold(0.0, f64::max);
    if max > 0.0 {
        for p in &mut results {
            p.influence /= max;
        }
    }
    // Stable sort keeps the alphabetical map order among ties.
    results.sort_by(|a, b| {
        b.influence
            .partial_cmp(&a.influence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pathway_map() -> BTreeMap<String, Vec<String>> {
        let mut map = BTreeMap::new();
        map.insert(
            "AMPK signaling".to_string(),
            vec!["PRKAA1".to_string(), "PRKAA2".to_string()],
        );
        map.insert(
            "p53 signaling".to_string(),
            vec!["TP53".to_string(), "MDM2".to_string()],
        );
        map.insert("orphan pathway".to_string(), vec!["NONE1".to_string()]);
        map
    }

    #[test]
    fn max_member_importance_wins() {
        let mut importance = AHashMap::new();
        importance.insert("PRKAA1".to_string(), 0.4);
        importance.insert("PRKAA2".to_string(), 0.1);
        importance.insert("TP53".to_string(), 0.8);

        let ranked = pathway_influence(&pathway_map(), &importance);
        assert_eq!(ranked[0].pathway, "p53 signaling");
        assert_relative_eq!(ranked[0].influence, 1.0);
        // 0.4 / 0.8 after normalization.
        assert_eq!(ranked[1].pathway, "AMPK signaling");
        assert_relative_eq!(ranked[1].influence, 0.5);
        assert_relative_eq!(ranked[2].influence, 0.0);
    }

    #[test]
    fn all_zero_importance_stays_zero() {
        let ranked = pathway_influence(&pathway_map(), &AHashMap::new());
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|p| p.influence == 0.0));
        // Ties keep the map's alphabetical order.
        assert_eq!(ranked[0].pathway, "AMPK signaling");
    }

    #[test]
    fn missing_pathway_file_yields_empty_map() {
        let map = load_pathways(Path::new("/nonexistent/pathways.json"));
        assert!(map.is_empty());
    }

    #[test]
    fn pathway_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathways.json");
        std::fs::write(&path, r#"{"AMPK signaling": ["PRKAA1"]}"#).unwrap();
        let map = load_pathways(&path);
        assert_eq!(map.len(), 1);
        assert_eq!(map["AMPK signaling"], vec!["PRKAA1".to_string()]);
    }
}

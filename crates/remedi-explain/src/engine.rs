//! Phased mechanism search
//!
//! One query runs through a fixed pipeline:
//!
//! 1. resolve both inputs (raw id or display name) against the catalog;
//! 2. targeted phase: stitch shortest paths through each curated
//!    regulator present in the graph, boost and tag them;
//! 3. general phase: draw short simple paths from the bounded enumerator,
//!    keep the semantically mechanistic ones;
//! 4. fallback: direct edge, then undirected reachability, at nominal
//!    scores;
//! 5. rank by score (stable, so ties keep discovery order).
//!
//! For a fixed graph snapshot the result list is fully reproducible: the
//! regulator table is ordered, and the enumerator walks sorted neighbor
//! lists.

use crate::config::{RegulatorSet, SearchLimits};
use crate::error::{EntityRole, ExplainError};
use crate::mechanism::{Explanation, Mechanism, MechanismTag};
use crate::score::{dwpc, VIP_BOOST};
use crate::viz::{self, VisualizationGraph};
use lru::LruCache;
use parking_lot::Mutex;
use remedi_kg::{paths, EntityCatalog, GraphIndex, NodeId, SimplePaths};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Node types whose presence as an intermediate disqualifies a candidate
/// (non-mechanistic noise), and types that certify mechanistic relevance.
const NOISE_TYPES: [&str; 3] = ["anatomy", "symptom", "side"];
const MECHANISTIC_TYPES: [&str; 2] = ["gene", "pathway"];

/// The mechanism search engine. Borrows the process-wide read-only
/// catalog and index; cheap to construct per request or held long-term.
pub struct Explainer<'a> {
    catalog: &'a EntityCatalog,
    index: &'a GraphIndex,
    regulators: RegulatorSet,
    limits: SearchLimits,
}

impl<'a> Explainer<'a> {
    pub fn new(catalog: &'a EntityCatalog, index: &'a GraphIndex, regulators: RegulatorSet) -> Self {
        Self {
            catalog,
            index,
            regulators,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve a caller-supplied identifier: a known raw id passes
    /// through, otherwise it is treated as a display name.
    fn resolve_entity(&self, input: &str, role: EntityRole) -> Result<NodeId, ExplainError> {
        let as_id = NodeId::new(input.trim());
        if self.catalog.contains(&as_id) {
            return Ok(as_id);
        }
        self.catalog
            .resolve(input)
            .ok_or_else(|| ExplainError::EntityNotFound {
                role,
                input: input.to_string(),
            })
    }

    /// Search for ranked causal mechanisms between `source` and `target`.
    ///
    /// An `Ok` with an empty mechanism list means both entities exist but
    /// no relationship was discoverable.
    pub fn explain(&self, source: &str, target: &str) -> Result<Explanation, ExplainError> {
        let source_id = self.resolve_entity(source, EntityRole::Source)?;
        let target_id = self.resolve_entity(target, EntityRole::Target)?;
        Ok(self.explain_resolved(source_id, target_id))
    }

    /// Render a search result as a graph, truncated to the configured
    /// export cap so a broad query stays drawable.
    pub fn visualize(&self, explanation: &Explanation) -> VisualizationGraph {
        viz::export(
            self.catalog,
            self.index,
            explanation.top(self.limits.export_cap),
        )
    }

    fn explain_resolved(&self, source: NodeId, target: NodeId) -> Explanation {
        let mut mechanisms = Vec::new();

        self.targeted_phase(&source, &target, &mut mechanisms);
        self.general_phase(&source, &target, &mut mechanisms);
        if mechanisms.is_empty() {
            self.fallback_phase(&source, &target, &mut mechanisms);
        }

        // Stable sort keeps discovery order among equal scores.
        mechanisms.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        tracing::debug!(
            source = %source,
            target = %target,
            mechanisms = mechanisms.len(),
            "mechanism search finished"
        );
        Explanation {
            source,
            target,
            mechanisms,
        }
    }

    /// Phase 1: reconstruct cascades through each curated regulator.
    fn targeted_phase(&self, source: &NodeId, target: &NodeId, out: &mut Vec<Mechanism>) {
        for regulator in self.regulators.iter() {
            if !self.index.contains(&regulator.id) {
                continue;
            }
            let Some(stitched) = self.stitch(source, target, &regulator.id) else {
                continue;
            };
            if stitched.len() > self.limits.max_targeted_nodes || !is_simple(&stitched) {
                continue;
            }
            let score = dwpc(self.index, &stitched) * VIP_BOOST;
            out.push(Mechanism {
                path: stitched,
                score,
                tag: MechanismTag::Via(regulator.name.clone()),
            });
        }
    }

    /// Concatenate shortest paths source→via and via→target, dropping the
    /// duplicated pivot node. An unreachable pivot yields no candidate.
    fn stitch(&self, source: &NodeId, target: &NodeId, via: &NodeId) -> Option<Vec<NodeId>> {
        let mut first = paths::shortest_path(self.index, source, via)?;
        let second = paths::shortest_path(self.index, via, target)?;
        first.extend(second.into_iter().skip(1));
        Some(first)
    }

    /// Phase 2: bounded enumeration of short simple paths with semantic
    /// filtering.
    fn general_phase(&self, source: &NodeId, target: &NodeId, out: &mut Vec<Mechanism>) {
        let enumerator = SimplePaths::new(self.index, source, target, self.limits.max_general_nodes);
        let mut accepted = 0usize;
        for path in enumerator.take(self.limits.exploration_budget) {
            if !self.is_mechanistic(&path) {
                continue;
            }
            if out.iter().any(|m| m.path == path) {
                continue;
            }
            let score = dwpc(self.index, &path);
            out.push(Mechanism {
                path,
                score,
                tag: MechanismTag::General,
            });
            accepted += 1;
            if accepted >= self.limits.max_general_mechanisms {
                break;
            }
        }
    }

    /// A candidate is mechanistic when no intermediate is anatomy/symptom/
    /// side-effect noise and at least one is a gene or pathway.
    fn is_mechanistic(&self, path: &[NodeId]) -> bool {
        if path.len() <= 2 {
            return false;
        }
        let mut has_mechanism = false;
        for node in &path[1..path.len() - 1] {
            let node_type = self.catalog.display_info(node).node_type.to_lowercase();
            if NOISE_TYPES.iter().any(|t| node_type.contains(t)) {
                return false;
            }
            if MECHANISTIC_TYPES.iter().any(|t| node_type.contains(t)) {
                has_mechanism = true;
            }
        }
        has_mechanism
    }

    /// Phase 3: last-resort reachability when no mechanism survived. A
    /// stored directed edge outranks bare undirected reachability.
    fn fallback_phase(&self, source: &NodeId, target: &NodeId, out: &mut Vec<Mechanism>) {
        if self.index.relation(source, target).is_some() {
            out.push(Mechanism {
                path: vec![source.clone(), target.clone()],
                score: 0.5,
                tag: MechanismTag::DirectLink,
            });
            return;
        }
        if let Some(path) = paths::shortest_path(self.index, source, target) {
            if path.len() >= 2 {
                out.push(Mechanism {
                    path,
                    score: 0.3,
                    tag: MechanismTag::Association,
                });
            }
        }
    }

    /// Memoized variant: identical resolved queries short-circuit through
    /// the cache. Resolution always runs, so NotFound stays accurate even
    /// for cached pairs.
    pub fn explain_cached(
        &self,
        cache: &MemoCache,
        source: &str,
        target: &str,
    ) -> Result<Arc<Explanation>, ExplainError> {
        let source_id = self.resolve_entity(source, EntityRole::Source)?;
        let target_id = self.resolve_entity(target, EntityRole::Target)?;
        let key = (source_id.clone(), target_id.clone());

        if let Some(hit) = cache.inner.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }
        let explanation = Arc::new(self.explain_resolved(source_id, target_id));
        cache.inner.lock().put(key, Arc::clone(&explanation));
        Ok(explanation)
    }
}

fn is_simple(path: &[NodeId]) -> bool {
    let mut seen = ahash::AHashSet::with_capacity(path.len());
    path.iter().all(|n| seen.insert(n))
}

/// Bounded LRU memo for resolved query pairs.
///
/// Explicitly sized: callers choose the capacity, and eviction keeps the
/// cache from growing with the query history.
pub struct MemoCache {
    inner: Mutex<LruCache<(NodeId, NodeId), Arc<Explanation>>>,
}

impl MemoCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

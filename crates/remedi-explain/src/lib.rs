//! Remedi Explain: causal mechanism discovery for drug repurposing
//!
//! Given a candidate compound and a disease, this crate searches the
//! knowledge graph for plausible causal chains (compound → gene →
//! … → disease), scores them by biological plausibility, and derives a
//! multi-signal confidence breakdown for the pair.
//!
//! The search runs in phases:
//!
//! 1. **Targeted reconstruction**: stitch shortest paths through a small
//!    curated set of well-characterized regulators (mTOR, AMPK, TP53, …),
//!    boosting their scores over statistically common intermediates.
//! 2. **General search**: bounded enumeration of short simple paths,
//!    semantically filtered to mechanistic intermediates (genes and
//!    pathways, never anatomy or symptom hops).
//! 3. **Fallback reachability**: when no mechanism survives, report a bare
//!    direct edge or undirected association at nominal confidence.
//!
//! Scoring follows the degree-weighted path count heuristic: each
//! intermediate contributes `degree^-0.4`, so specific, low-degree
//! connections outrank hub traversals.
//!
//! ## Module Organization
//!
//! - `config`: curated regulator table, search limits, confidence weights
//! - `engine`: the phased mechanism search plus the query memo cache
//! - `score`: DWPC scoring and relation/arrow display resolution
//! - `viz`: deduplicated node/edge export for front-end rendering
//! - `render`: human-readable mechanism chains and rule sentences
//! - `confidence`: weighted multi-signal confidence aggregation
//! - `influence`: pathway influence ranking from the gene-importance signal

pub mod config;
pub mod confidence;
pub mod engine;
pub mod influence;
pub mod render;
pub mod score;
pub mod viz;

mod error;
mod mechanism;

pub use config::{ConfidenceWeights, Regulator, RegulatorSet, SearchLimits};
pub use confidence::{
    aggregate, CollaboratorSignals, ConfidenceBreakdown, ConfidenceDetails, GeneDetail,
    PathwayDetail, SignalValues,
};
pub use engine::{Explainer, MemoCache};
pub use error::{EntityRole, ExplainError};
pub use influence::{pathway_influence, PathwayInfluence};
pub use mechanism::{Explanation, Mechanism, MechanismTag};
pub use score::{dwpc, edge_display, Arrow, DAMPING_EXPONENT, VIP_BOOST};
pub use viz::{export, VisualizationGraph, VizEdge, VizNode};

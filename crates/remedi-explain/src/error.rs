use std::fmt;

/// Which side of the query failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRole {
    Source,
    Target,
}

impl fmt::Display for EntityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRole::Source => f.write_str("source entity"),
            EntityRole::Target => f.write_str("target entity"),
        }
    }
}

/// The only error that crosses the engine's public boundary.
///
/// Everything else (missing data files, unreachable regulators, filtered
/// candidates) degrades to empty results internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    #[error("{role} '{input}' not found in the knowledge graph")]
    EntityNotFound { role: EntityRole, input: String },
}

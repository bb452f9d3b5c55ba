//! Textual rendering of mechanisms
//!
//! Produces the human-readable chain lines shown in explanation output,
//! e.g. `Metformin --[targets]--> PRKAA1 (Gene)`, and the one-sentence
//! "rule" form consumed by the confidence detail lists.

use crate::mechanism::Mechanism;
use crate::score::{edge_display, Arrow};
use remedi_kg::{EntityCatalog, GraphIndex};

/// One line per edge of the mechanism's path, with arrows following the
/// resolved display direction.
pub fn chain_lines(
    catalog: &EntityCatalog,
    index: &GraphIndex,
    mechanism: &Mechanism,
) -> Vec<String> {
    mechanism
        .path
        .windows(2)
        .map(|pair| {
            let u = catalog.display_info(&pair[0]);
            let v = catalog.display_info(&pair[1]);
            let (relation, arrow) = edge_display(index, &pair[0], &pair[1]);
            match arrow {
                Arrow::Forward => {
                    format!("{} --[{}]--> {} ({})", u.name, relation, v.name, v.node_type)
                }
                Arrow::Reverse => {
                    format!("{} <--[{}]-- {} ({})", u.name, relation, v.name, v.node_type)
                }
                Arrow::Undirected => {
                    format!("{} --[{}]-- {} ({})", u.name, relation, v.name, v.node_type)
                }
            }
        })
        .collect()
}

/// The mechanism as a single rule sentence:
/// `Rule (VIA MTOR): Metformin targets MTOR, which regulates ...`.
pub fn rule_sentence(
    catalog: &EntityCatalog,
    index: &GraphIndex,
    mechanism: &Mechanism,
) -> String {
    let clauses: Vec<String> = mechanism
        .path
        .windows(2)
        .map(|pair| {
            let u = catalog.display_info(&pair[0]);
            let v = catalog.display_info(&pair[1]);
            let (relation, _) = edge_display(index, &pair[0], &pair[1]);
            format!("{} {} {}", u.name, relation, v.name)
        })
        .collect();
    format!(
        "Rule ({}): {}",
        mechanism.tag.label(),
        clauses.join(", which ")
    )
}

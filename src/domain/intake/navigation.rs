//! Step navigation over the flow table.

use super::{Category, IntakeRules, Step};

/// Returns the step that follows `current`.
///
/// Before a category is known there is no flow, so the entry step is
/// returned. A step that does not belong to the category's flow restarts the
/// flow at its first step. The last step of a flow, and anything after it,
/// maps to `Completed`.
pub fn next_step(rules: &IntakeRules, category: Option<Category>, current: Step) -> Step {
    let Some(category) = category else {
        return rules.entry_step();
    };

    let flow = rules.flow_for(category);
    match flow.position(current) {
        Some(index) => flow.get(index + 1).unwrap_or(Step::Completed),
        None => flow.first(),
    }
}

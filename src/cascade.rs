//! Change propagation to dependent modifiers.

use crate::store::VariableStore;

/// Pushes a changed variable's resolved value to every modifier declared
/// as inheriting from it.
///
/// The walk covers every group in the store, not just the one being
/// edited, and re-applies each dependent's unit rule while keeping its
/// parent link so further upstream changes keep cascading. One call is
/// one full-store pass; chains (A -> B -> C) update across the successive
/// edits that produce them.
///
/// Returns the names of the modifiers that were updated, so the caller
/// can notify their subscribers.
pub fn propagate(store: &mut VariableStore, changed: &str, resolved: Option<&str>) -> Vec<String> {
    let mut updated = Vec::new();
    for group in store.groups_mut() {
        for modifier in group.iter_mut() {
            if modifier.parent_variable() == Some(changed) {
                modifier.cascade_assign(resolved);
                updated.push(modifier.variable_name().to_string());
            }
        }
    }
    if !updated.is_empty() {
        tracing::debug!(variable = changed, dependents = updated.len(), "cascade");
    }
    updated
}

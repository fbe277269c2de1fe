//! Canonical variable ownership: modifiers, groups, and the store.
//!
//! This module holds the engine's source of truth:
//!
//! - [`Modifier`]: one themeable variable and its value/raw-value/unit state
//! - [`ModifierGroup`]: the modifiers of one themeable component
//! - [`VariableStore`]: every group plus the free-form extras bag

mod group;
mod modifier;

pub use group::ModifierGroup;
pub use modifier::{Modifier, DEFAULT_UNIT, REFERENCE_MARKER};

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::theme::Extras;

/// The full set of modifier groups for a loaded theme, plus the extras
/// bag (custom style fragments and theme metadata).
///
/// The store is a plain container: it validates and records values but
/// does not cascade or schedule anything itself. The orchestration lives
/// in [`Engine`](crate::Engine), which drives the explicit sequence
/// set, cascade, schedule, commit.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    groups: Vec<ModifierGroup>,
    extras: Extras,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over the given groups.
    pub fn with_groups(groups: Vec<ModifierGroup>) -> Self {
        Self {
            groups,
            extras: Extras::default(),
        }
    }

    /// Adds a group to the store.
    pub fn add_group(&mut self, group: ModifierGroup) {
        self.groups.push(group);
    }

    /// Looks up a group by component name.
    pub fn group(&self, component: &str) -> Option<&ModifierGroup> {
        self.groups.iter().find(|g| g.component() == component)
    }

    /// Mutable variant of [`group`](Self::group).
    pub fn group_mut(&mut self, component: &str) -> Option<&mut ModifierGroup> {
        self.groups.iter_mut().find(|g| g.component() == component)
    }

    /// Iterates all groups.
    pub fn groups(&self) -> impl Iterator<Item = &ModifierGroup> {
        self.groups.iter()
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut ModifierGroup> {
        self.groups.iter_mut()
    }

    /// Finds a modifier anywhere in the store by its variable name.
    pub fn find(&self, variable_name: &str) -> Option<&Modifier> {
        self.groups.iter().find_map(|g| g.get(variable_name))
    }

    /// Sets a modifier's value, returning the previous exported value.
    ///
    /// `unit`, when given, replaces the modifier's declared unit before the
    /// assignment. Fails when the group or key is unknown; all value rules
    /// (unit suffixing, hex normalization, parent-reference links) are
    /// those of [`Modifier::assign`].
    pub fn set(
        &mut self,
        component: &str,
        key: &str,
        value: &str,
        unit: Option<&str>,
    ) -> Result<Option<String>, EngineError> {
        let group = self
            .group_mut(component)
            .ok_or_else(|| EngineError::UnknownGroup(component.to_string()))?;
        let modifier = group
            .get_mut(key)
            .ok_or_else(|| EngineError::UnknownModifier {
                group: component.to_string(),
                key: key.to_string(),
            })?;
        if unit.is_some() {
            modifier.set_unit(unit);
        }
        Ok(modifier.assign(value))
    }

    /// The effective modifications of one group.
    pub fn modifications(
        &self,
        component: &str,
    ) -> Result<impl Iterator<Item = &Modifier>, EngineError> {
        self.group(component)
            .map(|g| g.modifications())
            .ok_or_else(|| EngineError::UnknownGroup(component.to_string()))
    }

    /// Bulk-loads every group from an imported mapping. Modifiers not
    /// named in the mapping are left untouched.
    pub fn load_modifiers(&mut self, import: &BTreeMap<String, String>) {
        for group in &mut self.groups {
            group.load_from(import);
        }
    }

    /// Clears every modifier's value in a single pass, cascade-free,
    /// leaving the extras bag alone. Used by history replay, where the
    /// snapshot covers variables only.
    pub fn reset_values(&mut self) {
        for group in &mut self.groups {
            group.reset();
        }
    }

    /// Resets the whole store to its default state: every modifier's
    /// value cleared exactly once, cascade-free, and the extras emptied.
    pub fn reset_all(&mut self) {
        self.reset_values();
        self.extras = Extras::default();
    }

    /// Flat view of every effective modification, `variable_name -> value`.
    /// This is the exported mapping used for compilation, history
    /// snapshots, and the theme document.
    pub fn flat_map(&self) -> BTreeMap<String, String> {
        let mut mapping = BTreeMap::new();
        for group in &self.groups {
            for modifier in group.modifications() {
                if let Some(value) = modifier.value() {
                    mapping.insert(modifier.variable_name().to_string(), value.to_string());
                }
            }
        }
        mapping
    }

    /// The free-form extras bag.
    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Mutable access to the extras bag.
    pub fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> VariableStore {
        VariableStore::with_groups(vec![
            ModifierGroup::new("colors")
                .add(Modifier::new("@brand-primary"))
                .add(Modifier::new("@link-color")),
            ModifierGroup::new("navbar").add(Modifier::suffixed("@navbar-height", None)),
        ])
    }

    #[test]
    fn test_set_unknown_group() {
        let mut store = sample_store();
        let err = store.set("nope", "@brand-primary", "#fff", None);
        assert!(matches!(err, Err(EngineError::UnknownGroup(_))));
    }

    #[test]
    fn test_set_unknown_modifier() {
        let mut store = sample_store();
        let err = store.set("colors", "@nope", "#fff", None);
        assert!(matches!(err, Err(EngineError::UnknownModifier { .. })));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut store = sample_store();
        store.set("colors", "@brand-primary", "#111111", None).unwrap();
        let previous = store.set("colors", "@brand-primary", "#222222", None).unwrap();
        assert_eq!(previous.as_deref(), Some("#111111"));
    }

    #[test]
    fn test_set_with_unit_override() {
        let mut store = sample_store();
        store
            .set("navbar", "navbar-height", "3", Some("em"))
            .unwrap();
        let m = store.find("@navbar-height").unwrap();
        assert_eq!(m.value(), Some("3em"));
    }

    #[test]
    fn test_flat_map_spans_groups() {
        let mut store = sample_store();
        store.set("colors", "@brand-primary", "#337ab7", None).unwrap();
        store.set("navbar", "navbar-height", "50", None).unwrap();

        let flat = store.flat_map();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat["@brand-primary"], "#337ab7");
        assert_eq!(flat["@navbar-height"], "50px");
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut store = sample_store();
        store.set("colors", "@brand-primary", "#337ab7", None).unwrap();
        store.extras_mut().css.push(".custom {}".to_string());
        store.reset_all();
        assert!(store.flat_map().is_empty());
        assert!(store.extras().is_empty());
    }

    #[test]
    fn test_find_across_groups() {
        let store = sample_store();
        assert!(store.find("@navbar-height").is_some());
        assert!(store.find("@missing").is_none());
    }
}

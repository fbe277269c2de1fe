//! Named modifier collections, one per themeable component.

use std::collections::BTreeMap;

use super::modifier::Modifier;
use crate::resolve;

/// The modifiers belonging to one themeable component (a widget family
/// such as "navbar" or "buttons").
///
/// Groups are built fluently:
///
/// ```rust
/// use retheme::store::{Modifier, ModifierGroup};
///
/// let navbar = ModifierGroup::new("navbar")
///     .add(Modifier::suffixed("@navbar-height", None))
///     .add(Modifier::new("@navbar-default-bg"));
/// assert_eq!(navbar.component(), "navbar");
/// ```
///
/// The component discriminator is required; constructing a group without
/// one is a configuration error and fails fast.
#[derive(Debug, Clone)]
pub struct ModifierGroup {
    component: String,
    modifiers: Vec<Modifier>,
}

impl ModifierGroup {
    /// Creates an empty group for the given component.
    ///
    /// # Panics
    ///
    /// Panics if `component` is empty. A group without its discriminator
    /// cannot be addressed and indicates a wiring mistake, not a runtime
    /// condition.
    pub fn new(component: impl Into<String>) -> Self {
        let component = component.into();
        assert!(
            !component.is_empty(),
            "modifier group requires a component name"
        );
        Self {
            component,
            modifiers: Vec::new(),
        }
    }

    /// Adds a modifier, returning the group for chaining.
    pub fn add(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// The component this group themes.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Looks up a modifier by key. Keys match with or without the leading
    /// reference marker, so both `"navbar-height"` and `"@navbar-height"`
    /// address the same modifier.
    pub fn get(&self, key: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| key_matches(m, key))
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Modifier> {
        self.modifiers.iter_mut().find(|m| key_matches(m, key))
    }

    /// Iterates all modifiers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Modifier> {
        self.modifiers.iter_mut()
    }

    /// The effective modifications: only modifiers holding a value.
    pub fn modifications(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter().filter(|m| m.is_set())
    }

    /// Bulk-loads values from an imported mapping.
    ///
    /// Each modifier whose `variable_name` appears in `import` receives the
    /// import value resolved against the *same* mapping; when the import
    /// entry is itself a parent reference the link is recorded as well.
    /// Modifiers absent from the mapping are left untouched.
    pub fn load_from(&mut self, import: &BTreeMap<String, String>) {
        for modifier in &mut self.modifiers {
            let Some(entry) = import.get(modifier.variable_name()) else {
                continue;
            };
            if entry.starts_with(super::modifier::REFERENCE_MARKER) {
                // Record the link first, then push the resolved literal
                // through the cascade path so the link survives.
                modifier.assign(entry);
                let resolved = resolve::resolve(entry, import);
                modifier.cascade_assign(resolved.as_deref());
            } else {
                modifier.assign(entry);
            }
        }
    }

    /// Clears every modifier in the group.
    pub fn reset(&mut self) {
        for modifier in &mut self.modifiers {
            modifier.clear();
        }
    }

    /// Number of modifiers declared in the group.
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Whether the group declares no modifiers.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

fn key_matches(modifier: &Modifier, key: &str) -> bool {
    let name = modifier.variable_name();
    name == key || name.strip_prefix(super::modifier::REFERENCE_MARKER) == Some(key)
}

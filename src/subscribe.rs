//! Subscriber bindings: the engine-to-UI notification surface.
//!
//! UI elements that mirror a modifier register a callback keyed by the
//! modifier's variable name. The set is built by the engine's caller and
//! handed over at construction, replacing any process-wide lookup of
//! widgets. The reverse direction (a widget pushing a value in) is just
//! [`Engine::set`](crate::Engine::set).

use std::collections::HashMap;

/// Callback invoked with a modifier's newly resolved value, or `None`
/// when the modifier was cleared.
pub type SubscriberCallback = Box<dyn FnMut(Option<&str>)>;

/// Registered subscriber callbacks, keyed by variable name.
#[derive(Default)]
pub struct SubscriberSet {
    bindings: HashMap<String, Vec<SubscriberCallback>>,
}

impl SubscriberSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a callback to a variable name. Multiple callbacks per
    /// variable are allowed.
    pub fn bind(
        &mut self,
        variable_name: impl Into<String>,
        callback: impl FnMut(Option<&str>) + 'static,
    ) {
        self.bindings
            .entry(variable_name.into())
            .or_default()
            .push(Box::new(callback));
    }

    /// Pushes a resolved value to every callback bound to `variable_name`.
    pub(crate) fn notify(&mut self, variable_name: &str, value: Option<&str>) {
        if let Some(callbacks) = self.bindings.get_mut(variable_name) {
            for callback in callbacks {
                callback(value);
            }
        }
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberSet")
            .field("bound_variables", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! Engine orchestration: the explicit edit sequence.
//!
//! Every edit runs the same sequence: store the value, cascade to
//! dependents, notify subscribers, ask the scheduler whether to compile,
//! and commit a history snapshot. There is no property interception or
//! hidden trigger anywhere; this module *is* the data flow.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::cascade;
use crate::error::EngineError;
use crate::history::HistoryManager;
use crate::resolve;
use crate::schedule::{ChangeScheduler, Decision};
use crate::store::{VariableStore, REFERENCE_MARKER};
use crate::subscribe::SubscriberSet;
use crate::theme::ThemeDocument;

/// The single call into the external CSS preprocessor.
///
/// The engine always hands over a fully resolved mapping: no parent
/// references, no unevaluated arithmetic. `force_full` requests a full
/// recompile (set after imports and history replay).
///
/// Any `FnMut(&BTreeMap<String, String>, bool)` closure is a bridge,
/// which keeps tests and small integrations free of wrapper types.
pub trait CompilerBridge {
    fn apply(&mut self, variables: &BTreeMap<String, String>, force_full: bool);
}

impl<F> CompilerBridge for F
where
    F: FnMut(&BTreeMap<String, String>, bool),
{
    fn apply(&mut self, variables: &BTreeMap<String, String>, force_full: bool) {
        self(variables, force_full)
    }
}

/// The modifier resolution and change-propagation engine.
///
/// Owns the [`VariableStore`], the debouncing scheduler, the undo/redo
/// history, and the subscriber bindings; talks to the external compiler
/// through a [`CompilerBridge`].
///
/// # Example
///
/// ```rust
/// use retheme::groups::bootstrap;
/// use retheme::store::VariableStore;
/// use retheme::subscribe::SubscriberSet;
/// use retheme::Engine;
///
/// let store = VariableStore::with_groups(bootstrap::standard_groups());
/// let compiler = |_vars: &std::collections::BTreeMap<String, String>, _force: bool| {
///     // hand the mapping to the preprocessor
/// };
/// let mut engine = Engine::new(store, SubscriberSet::new(), compiler);
///
/// engine.set("colors", "@brand-primary", "#d9534f").unwrap();
/// assert_eq!(engine.export().vars["@brand-primary"], "#d9534f");
/// ```
pub struct Engine<C: CompilerBridge> {
    store: VariableStore,
    scheduler: ChangeScheduler,
    history: HistoryManager,
    subscribers: SubscriberSet,
    compiler: C,
}

impl<C: CompilerBridge> Engine<C> {
    /// Creates an engine over a store, the caller's subscriber bindings,
    /// and a compiler bridge.
    pub fn new(store: VariableStore, subscribers: SubscriberSet, compiler: C) -> Self {
        Self {
            store,
            scheduler: ChangeScheduler::new(),
            history: HistoryManager::new(),
            subscribers,
            compiler,
        }
    }

    /// Read access to the store.
    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Changes the debounce quiet period.
    pub fn set_refresh_delay(&mut self, delay: Duration) {
        self.scheduler.set_delay(delay);
    }

    /// Binds a subscriber callback after construction.
    pub fn bind_subscriber(
        &mut self,
        variable_name: impl Into<String>,
        callback: impl FnMut(Option<&str>) + 'static,
    ) {
        self.subscribers.bind(variable_name, callback);
    }

    /// Sets a modifier's value and runs the full edit sequence.
    ///
    /// A value push coming from a subscriber widget goes through this
    /// same entry point; the engine makes no distinction.
    pub fn set(&mut self, component: &str, key: &str, value: &str) -> Result<(), EngineError> {
        self.set_with_unit(component, key, value, None)
    }

    /// Like [`set`](Self::set), additionally replacing the modifier's
    /// declared unit for this and subsequent assignments.
    pub fn set_with_unit(
        &mut self,
        component: &str,
        key: &str,
        value: &str,
        unit: Option<&str>,
    ) -> Result<(), EngineError> {
        self.store.set(component, key, value, unit)?;

        if let Some(modifier) = self.store.group(component).and_then(|g| g.get(key)) {
            let name = modifier.variable_name().to_string();
            let stored = modifier.value().map(str::to_string);

            let mapping = self.store.flat_map();
            let resolved = stored
                .as_deref()
                .and_then(|v| resolve::resolve(v, &mapping));

            // A reference edit keeps the reference as its exported value;
            // sync the modifier's raw value with the parent's resolved
            // literal before fanning out.
            let is_reference = stored
                .as_deref()
                .is_some_and(|v| v.starts_with(REFERENCE_MARKER));
            if is_reference {
                if let Some(modifier) = self.store.group_mut(component).and_then(|g| g.get_mut(key))
                {
                    modifier.cascade_assign(resolved.as_deref());
                }
            }

            let dependents = cascade::propagate(&mut self.store, &name, resolved.as_deref());
            self.subscribers.notify(&name, resolved.as_deref());
            for dependent in &dependents {
                self.subscribers.notify(dependent, resolved.as_deref());
            }
        }

        self.request_compile(false);
        self.history.commit(self.store.flat_map());
        Ok(())
    }

    /// Drives the scheduler's trailing edge. Call this from the host's
    /// idle loop (or after sleeping past the quiet period); a due window
    /// with recorded requests triggers the trailing compile.
    pub fn tick(&mut self) {
        if self.scheduler.poll(Instant::now()) == Decision::Fire {
            self.compile(false);
        }
    }

    /// Steps back one committed state. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(state) => {
                self.reload(&state);
                true
            }
            None => false,
        }
    }

    /// Steps forward one undone state. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(state) => {
                self.reload(&state);
                true
            }
            None => false,
        }
    }

    /// Exports the current state as a theme document.
    pub fn export(&self) -> ThemeDocument {
        ThemeDocument::export(&self.store)
    }

    /// Imports a theme document from JSON text.
    ///
    /// The store is reset to defaults before the parse is attempted, so a
    /// malformed document leaves defaults behind, never a half-applied
    /// mixture. The whole load runs with refresh and tracking suppressed;
    /// a successful import performs exactly one full recompute.
    pub fn import_json(&mut self, text: &str) -> Result<(), EngineError> {
        let parsed: Result<(), EngineError> = self.with_suppressed(|engine| {
            engine.store.reset_all();
            let document = ThemeDocument::parse(text)?;
            engine.store.load_modifiers(&document.vars);
            *engine.store.extras_mut() = document.extra;
            Ok(())
        });
        parsed?;
        self.compile(true);
        self.history.commit(self.store.flat_map());
        Ok(())
    }

    /// Imports an already-parsed theme document.
    pub fn import_document(&mut self, document: ThemeDocument) {
        self.with_suppressed(|engine| {
            engine.store.reset_all();
            engine.store.load_modifiers(&document.vars);
            *engine.store.extras_mut() = document.extra;
        });
        self.compile(true);
        self.history.commit(self.store.flat_map());
    }

    /// Resets every modifier to its unset default state and recompiles.
    pub fn reset_to_default(&mut self) {
        self.with_suppressed(|engine| engine.store.reset_all());
        self.compile(true);
        self.history.commit(self.store.flat_map());
    }

    /// Depth of the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Depth of the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // History replay: values only, extras untouched, no commit, one
    // direct full recompile.
    fn reload(&mut self, state: &BTreeMap<String, String>) {
        self.with_suppressed(|engine| {
            engine.store.reset_values();
            engine.store.load_modifiers(state);
        });
        self.compile(true);
    }

    fn request_compile(&mut self, force_full: bool) {
        let decision = self.scheduler.request(Instant::now());
        if decision == Decision::Fire {
            self.compile(force_full);
        }
    }

    fn compile(&mut self, force_full: bool) {
        let ready = resolve::calculate_all(&self.store.flat_map());
        tracing::debug!(variables = ready.len(), force_full, "compile");
        self.compiler.apply(&ready, force_full);
    }

    // Scoped suppression: refresh and history tracking are disabled for
    // the closure and re-enabled on every exit path - early returns via
    // `?` and unwinding panics alike, through the guard's Drop.
    fn with_suppressed<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.scheduler.disable();
        self.history.set_tracking(false);
        let mut guard = SuppressionGuard { engine: self };
        body(&mut *guard.engine)
    }
}

struct SuppressionGuard<'a, C: CompilerBridge> {
    engine: &'a mut Engine<C>,
}

impl<C: CompilerBridge> Drop for SuppressionGuard<'_, C> {
    fn drop(&mut self) {
        self.engine.history.set_tracking(true);
        self.engine.scheduler.enable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Modifier, ModifierGroup};
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<(BTreeMap<String, String>, bool)>>>;

    fn test_engine() -> (Engine<impl CompilerBridge>, CallLog) {
        let calls: CallLog = Rc::default();
        let log = Rc::clone(&calls);
        let store = VariableStore::with_groups(vec![
            ModifierGroup::new("colors")
                .add(Modifier::new("@brand-primary"))
                .add(Modifier::new("@link-color")),
            ModifierGroup::new("navbar")
                .add(Modifier::suffixed("@navbar-height", None))
                .add(Modifier::new("@navbar-default-link-color")),
        ]);
        let engine = Engine::new(
            store,
            SubscriberSet::new(),
            move |vars: &BTreeMap<String, String>, force: bool| {
                log.borrow_mut().push((vars.clone(), force));
            },
        );
        (engine, calls)
    }

    #[test]
    fn test_set_compiles_resolved_mapping() {
        let (mut engine, calls) = test_engine();
        engine.set_refresh_delay(Duration::ZERO);
        engine.set("colors", "@brand-primary", "#337ab7").unwrap();
        engine.set("colors", "@link-color", "@brand-primary").unwrap();
        engine.tick();

        let calls = calls.borrow();
        let (last, _) = calls.last().unwrap();
        // The bridge only ever sees fully resolved values.
        assert_eq!(last["@link-color"], "#337ab7");
    }

    #[test]
    fn test_set_cascades_before_commit() {
        let (mut engine, _) = test_engine();
        engine
            .set("navbar", "navbar-default-link-color", "@brand-primary")
            .unwrap();
        engine.set("colors", "@brand-primary", "#d9534f").unwrap();

        let dependent = engine.store().find("@navbar-default-link-color").unwrap();
        assert_eq!(dependent.raw_value(), Some("#d9534f"));
    }

    #[test]
    fn test_subscribers_receive_resolved_values() {
        let (mut engine, _) = test_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.bind_subscriber("@brand-primary", move |value| {
            sink.borrow_mut().push(value.map(str::to_string));
        });

        engine.set("colors", "@brand-primary", "#abc").unwrap();
        assert_eq!(*seen.borrow(), vec![Some("#aabbcc".to_string())]);
    }

    #[test]
    fn test_cascade_notifies_dependent_subscribers() {
        let (mut engine, _) = test_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.bind_subscriber("@link-color", move |value| {
            sink.borrow_mut().push(value.map(str::to_string));
        });

        engine.set("colors", "@link-color", "@brand-primary").unwrap();
        engine.set("colors", "@brand-primary", "#222222").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.last().unwrap().as_deref(), Some("#222222"));
    }

    #[test]
    fn test_import_failure_leaves_defaults() {
        let (mut engine, _) = test_engine();
        engine.set("colors", "@brand-primary", "#337ab7").unwrap();

        let err = engine.import_json("{broken").unwrap_err();
        assert!(matches!(err, EngineError::ImportParse(_)));
        assert!(engine.store().flat_map().is_empty());
    }

    #[test]
    fn test_suppression_lifts_even_on_panic() {
        let (mut engine, _) = test_engine();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.with_suppressed(|_| panic!("load blew up"));
        }));
        assert!(outcome.is_err());
        assert!(engine.history.is_tracking());
        assert!(!engine.scheduler.is_disabled());

        // The engine is fully operational afterwards.
        engine.set("colors", "@brand-primary", "#337ab7").unwrap();
        assert_eq!(engine.undo_depth(), 1);
    }

    #[test]
    fn test_reset_to_default_clears_and_recompiles() {
        let (mut engine, calls) = test_engine();
        engine.set("colors", "@brand-primary", "#337ab7").unwrap();
        engine.reset_to_default();

        assert!(engine.store().flat_map().is_empty());
        let calls = calls.borrow();
        let (last, force) = calls.last().unwrap();
        assert!(last.is_empty());
        assert!(*force);
    }
}

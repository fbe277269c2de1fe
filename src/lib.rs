//! Live retheming engine for variable-driven CSS frameworks.
//!
//! `retheme` owns the moving parts behind an interactive theme editor:
//! the canonical variable values, resolution of inter-variable references
//! and embedded arithmetic, cascading of changes to dependent variables,
//! debounced recompile scheduling, undo/redo history, and the portable
//! theme document. The CSS preprocessor itself and the UI stay outside,
//! reached through the [`CompilerBridge`] trait and
//! [`SubscriberSet`](subscribe::SubscriberSet) bindings.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use retheme::groups::bootstrap;
//! use retheme::store::VariableStore;
//! use retheme::subscribe::SubscriberSet;
//! use retheme::Engine;
//!
//! let store = VariableStore::with_groups(bootstrap::standard_groups());
//! let mut engine = Engine::new(
//!     store,
//!     SubscriberSet::new(),
//!     |vars: &BTreeMap<String, String>, _force: bool| {
//!         // hand `vars` to the preprocessor; every entry is fully resolved
//!         let _ = vars;
//!     },
//! );
//!
//! engine.set("layout", "@grid-gutter-width", "30").unwrap();
//! engine
//!     .set("panels", "@panel-body-padding", "(@grid-gutter-width / 2)")
//!     .unwrap();
//!
//! let doc = engine.export();
//! assert_eq!(doc.vars["@grid-gutter-width"], "30px");
//! ```

pub mod cascade;
pub mod engine;
pub mod error;
pub mod groups;
pub mod history;
pub mod resolve;
pub mod schedule;
pub mod store;
pub mod subscribe;
pub mod theme;

pub use engine::{CompilerBridge, Engine};
pub use error::EngineError;
pub use history::HistoryManager;
pub use schedule::ChangeScheduler;
pub use store::VariableStore;
pub use theme::ThemeDocument;

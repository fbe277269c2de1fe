//! The portable theme document: export, import, and the extras bag.
//!
//! A theme travels as a JSON object:
//!
//! ```json
//! { "vars": { "@brand-primary": "#337ab7" },
//!   "_extra": { "meta": { "author": "..." },
//!               "css": ["..."], "less": ["..."] } }
//! ```
//!
//! Documents written by older editors are a bare flat mapping with no
//! `vars` wrapper; those still import (the whole object is treated as
//! `vars`) but export always emits the wrapped format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::EngineError;
use crate::store::VariableStore;

/// Free-form theme metadata carried in `_extra.meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "themeName", default, skip_serializing_if = "Option::is_none")]
    pub theme_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence: Option<String>,
}

/// Custom style fragments and metadata carried alongside the variables.
/// Fragments are preserved verbatim across an import/export round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ThemeMeta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub less: Vec<String>,
}

impl Extras {
    /// Whether the bag carries nothing worth serializing.
    pub fn is_empty(&self) -> bool {
        self.meta.is_none() && self.css.is_empty() && self.less.is_empty()
    }
}

/// The serialized form of a full variable store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDocument {
    pub vars: BTreeMap<String, String>,
    #[serde(rename = "_extra", default, skip_serializing_if = "Extras::is_empty")]
    pub extra: Extras,
}

impl ThemeDocument {
    /// Captures a store's effective modifications and extras.
    pub fn export(store: &VariableStore) -> Self {
        Self {
            vars: store.flat_map(),
            extra: store.extras().clone(),
        }
    }

    /// Parses a document from JSON text, accepting both the current
    /// wrapped format and the legacy flat mapping.
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.get("vars").is_some() {
            return Ok(serde_json::from_value(value)?);
        }
        let vars: BTreeMap<String, String> = serde_json::from_value(value)?;
        Ok(Self {
            vars,
            extra: Extras::default(),
        })
    }

    /// Serializes to pretty-printed JSON in the current format.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to a file. A failed write surfaces as
    /// [`EngineError::Io`] and leaves no partial engine state behind.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads and parses a document from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

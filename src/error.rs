//! Engine-wide error types.

use thiserror::Error;

/// Errors produced by the retheming engine.
///
/// Unresolvable or cyclic parent references are *not* errors: they resolve
/// to `None` and behave like unset values. Only structural problems (an
/// unknown group/modifier pair, a malformed theme document, a failed file
/// transfer) surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The named modifier group is not part of the store.
    #[error("unknown modifier group '{0}'")]
    UnknownGroup(String),

    /// The group exists but has no modifier under the given key.
    #[error("group '{group}' has no modifier '{key}'")]
    UnknownModifier { group: String, key: String },

    /// A theme document could not be parsed as either the wrapped or the
    /// legacy flat format.
    #[error("theme document could not be parsed: {0}")]
    ImportParse(#[from] serde_json::Error),

    /// File transfer for save/load failed. Store state is untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_group_display() {
        let err = EngineError::UnknownGroup("navbar".to_string());
        assert!(err.to_string().contains("navbar"));
    }

    #[test]
    fn test_unknown_modifier_display() {
        let err = EngineError::UnknownModifier {
            group: "buttons".to_string(),
            key: "@btn-default-bg".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("buttons"));
        assert!(msg.contains("@btn-default-bg"));
    }

    #[test]
    fn test_import_parse_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope")
            .expect_err("invalid json should not parse");
        let err = EngineError::from(parse_err);
        assert!(matches!(err, EngineError::ImportParse(_)));
    }
}

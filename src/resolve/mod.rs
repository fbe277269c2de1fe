//! Dependency resolution: parent references, declaration parsing, and
//! embedded arithmetic.
//!
//! Three layers, used at different points of the edit cycle:
//!
//! - [`resolve`]: chases a single parent-reference chain to its literal
//! - [`calculate_all`]: prepares a full mapping for compilation by
//!   substituting references and evaluating arithmetic sub-expressions
//! - [`parse_declaration_block`]: reads `name: value;` declaration text

mod arith;
mod calculate;

pub use calculate::calculate_all;

use std::collections::{BTreeMap, HashSet};

use crate::store::REFERENCE_MARKER;

/// Resolves a value that may be a parent reference to its literal form.
///
/// A non-reference input is returned unchanged. A reference is looked up
/// in `mapping` and chased through further references; a missing target or
/// a cycle resolves to `None`, which is a legitimate "unset" state rather
/// than an error.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// let mut vars = BTreeMap::new();
/// vars.insert("@link-color".to_string(), "@brand-primary".to_string());
/// vars.insert("@brand-primary".to_string(), "#337ab7".to_string());
///
/// assert_eq!(
///     retheme::resolve::resolve("@link-color", &vars),
///     Some("#337ab7".to_string())
/// );
/// assert_eq!(retheme::resolve::resolve("#fff", &vars), Some("#fff".to_string()));
/// assert_eq!(retheme::resolve::resolve("@missing", &vars), None);
/// ```
pub fn resolve(value: &str, mapping: &BTreeMap<String, String>) -> Option<String> {
    if !value.starts_with(REFERENCE_MARKER) {
        return Some(value.to_string());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = value;
    loop {
        if !visited.insert(current) {
            tracing::debug!(reference = current, "reference cycle, resolving to none");
            return None;
        }
        match mapping.get(current) {
            None => return None,
            Some(next) if next.starts_with(REFERENCE_MARKER) => current = next,
            Some(literal) => return Some(literal.clone()),
        }
    }
}

/// Parses a newline-separated list of `name: value;` declarations.
///
/// Whitespace around names and values is trimmed and a trailing semicolon
/// is dropped; lines that do not match the pattern are ignored.
pub fn parse_declaration_block(text: &str) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    for line in text.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let value = rest.trim().trim_end_matches(';').trim_end();
        if value.is_empty() {
            continue;
        }
        mapping.insert(name.to_string(), value.to_string());
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_non_reference_unchanged() {
        assert_eq!(
            resolve("#aabbcc", &BTreeMap::new()),
            Some("#aabbcc".to_string())
        );
    }

    #[test]
    fn test_single_hop() {
        let vars = mapping(&[("@brand-primary", "#337ab7")]);
        assert_eq!(
            resolve("@brand-primary", &vars),
            Some("#337ab7".to_string())
        );
    }

    #[test]
    fn test_chained_references() {
        let vars = mapping(&[
            ("@btn-primary-bg", "@link-color"),
            ("@link-color", "@brand-primary"),
            ("@brand-primary", "#337ab7"),
        ]);
        assert_eq!(
            resolve("@btn-primary-bg", &vars),
            Some("#337ab7".to_string())
        );
    }

    #[test]
    fn test_missing_target_is_none() {
        assert_eq!(resolve("@missing", &BTreeMap::new()), None);
    }

    #[test]
    fn test_cycle_is_none() {
        let vars = mapping(&[("@a", "@b"), ("@b", "@a")]);
        assert_eq!(resolve("@a", &vars), None);
    }

    #[test]
    fn test_self_cycle_is_none() {
        let vars = mapping(&[("@a", "@a")]);
        assert_eq!(resolve("@a", &vars), None);
    }

    #[test]
    fn test_parse_declaration_block() {
        let parsed = parse_declaration_block(
            "@brand-primary: #337ab7;\n  @navbar-height : 50px ;\nnot a declaration\n",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["@brand-primary"], "#337ab7");
        assert_eq!(parsed["@navbar-height"], "50px");
    }

    #[test]
    fn test_parse_skips_empty_values() {
        let parsed = parse_declaration_block("@empty: ;\n@real: 1;");
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("@real"));
    }
}

//! Full-mapping preparation pass, run just before compilation.

use std::collections::BTreeMap;

use super::arith;
use crate::store::REFERENCE_MARKER;

/// Produces a compile-ready mapping: every embedded variable token is
/// replaced by its resolved literal, then every parenthesized arithmetic
/// sub-expression is evaluated and spliced back with its unit.
///
/// Unresolvable tokens and invalid expressions are left in place; this
/// pass is best-effort and never fails.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// let mut vars = BTreeMap::new();
/// vars.insert("@grid-gutter-width".to_string(), "30px".to_string());
/// vars.insert("@padding".to_string(), "(@grid-gutter-width / 2)".to_string());
///
/// let ready = retheme::resolve::calculate_all(&vars);
/// assert_eq!(ready["@padding"], "15px");
/// ```
pub fn calculate_all(mapping: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    mapping
        .iter()
        .map(|(name, value)| {
            let substituted = substitute_references(value, mapping);
            let computed = evaluate_subexpressions(&substituted);
            (name.clone(), computed)
        })
        .collect()
}

// Substitution can surface new references (a literal pulled in from the
// mapping may itself embed tokens), so passes repeat until a fixpoint,
// bounded by the mapping size to survive cycles.
fn substitute_references(value: &str, mapping: &BTreeMap<String, String>) -> String {
    let mut current = value.to_string();
    for _ in 0..=mapping.len() {
        let (next, changed) = substitute_once(&current, mapping);
        current = next;
        if !changed {
            break;
        }
    }
    current
}

fn substitute_once(value: &str, mapping: &BTreeMap<String, String>) -> (String, bool) {
    let mut out = String::with_capacity(value.len());
    let mut changed = false;
    let mut rest = value;

    while let Some(at) = rest.find(REFERENCE_MARKER) {
        let (before, token_start) = rest.split_at(at);
        out.push_str(before);

        let token_len = token_start
            .char_indices()
            .skip(1)
            .find(|(_, c)| !is_ident_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(token_start.len());
        let token = &token_start[..token_len];

        match super::resolve(token, mapping) {
            Some(literal) if literal != token => {
                out.push_str(&literal);
                changed = true;
            }
            _ => out.push_str(token),
        }
        rest = &token_start[token_len..];
    }
    out.push_str(rest);
    (out, changed)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

// Replaces each balanced top-level parenthesized group that evaluates as
// restricted arithmetic. Groups preceded by an identifier character are
// function calls (rgba, calc, url) and are never touched.
fn evaluate_subexpressions(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find('(') {
        let is_call = rest[..open]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let Some(close) = matching_paren(rest, open) else {
            break;
        };
        let group = &rest[open..=close];

        out.push_str(&rest[..open]);
        match arith::evaluate(group) {
            Some(result) if !is_call => out.push_str(&result),
            _ => out.push_str(group),
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
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
    fn test_plain_arithmetic() {
        let vars = mapping(&[("@half", "(30px / 2)")]);
        assert_eq!(calculate_all(&vars)["@half"], "15px");
    }

    #[test]
    fn test_reference_inside_arithmetic() {
        let vars = mapping(&[
            ("@grid-gutter-width", "30px"),
            ("@half", "(@grid-gutter-width / 2)"),
        ]);
        assert_eq!(calculate_all(&vars)["@half"], "15px");
    }

    #[test]
    fn test_whole_value_reference() {
        let vars = mapping(&[("@link-color", "@brand-primary"), ("@brand-primary", "#337ab7")]);
        assert_eq!(calculate_all(&vars)["@link-color"], "#337ab7");
    }

    #[test]
    fn test_embedded_reference_in_shorthand() {
        let vars = mapping(&[
            ("@border-color", "#ddd"),
            ("@panel-border", "1px solid @border-color"),
        ]);
        assert_eq!(calculate_all(&vars)["@panel-border"], "1px solid #ddd");
    }

    #[test]
    fn test_unresolved_token_left_in_place() {
        let vars = mapping(&[("@panel-border", "1px solid @missing")]);
        assert_eq!(calculate_all(&vars)["@panel-border"], "1px solid @missing");
    }

    #[test]
    fn test_cycle_left_in_place() {
        let vars = mapping(&[("@a", "@b"), ("@b", "@a")]);
        let ready = calculate_all(&vars);
        assert_eq!(ready["@a"], "@b");
        assert_eq!(ready["@b"], "@a");
    }

    #[test]
    fn test_function_call_untouched() {
        let vars = mapping(&[("@shadow", "rgba(0, 0, 0, 0.5)")]);
        assert_eq!(calculate_all(&vars)["@shadow"], "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_invalid_expression_untouched() {
        let vars = mapping(&[("@weird", "(1px solid red)")]);
        assert_eq!(calculate_all(&vars)["@weird"], "(1px solid red)");
    }

    #[test]
    fn test_multiple_groups_in_one_value() {
        let vars = mapping(&[("@pad", "(4px * 2) (6px + 2)")]);
        assert_eq!(calculate_all(&vars)["@pad"], "8px 8px");
    }
}

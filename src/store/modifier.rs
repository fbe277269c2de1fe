//! The atomic unit of a theme: one named, modifiable style variable.

use cssparser::{Parser, ParserInput, Token};

/// Marker character that prefixes every variable name and every
/// parent-variable reference (`@brand-primary`).
pub const REFERENCE_MARKER: char = '@';

/// Default unit appended to suffixed modifiers when none is declared.
pub const DEFAULT_UNIT: &str = "px";

/// One themeable style variable and its current state.
///
/// A modifier tracks two textual forms of its value: `value` is the
/// exported form (with the unit suffix, when the modifier is unit-suffixed)
/// and `raw_value` is the same value with the unit stripped. When
/// `parent_variable` is set, the modifier is declared as "whatever that
/// variable currently resolves to" and the cascade keeps `raw_value` in
/// sync with the parent.
///
/// # Example
///
/// ```rust
/// use retheme::store::Modifier;
///
/// let mut height = Modifier::suffixed("@navbar-height", None);
/// height.assign("50px");
/// assert_eq!(height.raw_value(), Some("50"));
/// assert_eq!(height.value(), Some("50px"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    variable_name: String,
    value: Option<String>,
    raw_value: Option<String>,
    unit: Option<String>,
    suffix_unit: bool,
    parent_variable: Option<String>,
}

impl Modifier {
    /// Creates a plain (non-suffixed) modifier, e.g. a color or font name.
    pub fn new(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            value: None,
            raw_value: None,
            unit: None,
            suffix_unit: false,
            parent_variable: None,
        }
    }

    /// Creates a unit-suffixed modifier. The unit defaults to `px` when
    /// `unit` is `None`.
    pub fn suffixed(variable_name: impl Into<String>, unit: Option<&str>) -> Self {
        Self {
            variable_name: variable_name.into(),
            value: None,
            raw_value: None,
            unit: unit.map(str::to_string),
            suffix_unit: true,
            parent_variable: None,
        }
    }

    /// The globally unique variable name, including the leading marker.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// Exported textual form, with unit suffix when applicable.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value with any unit suffix stripped.
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// Name of the variable this modifier inherits from, if any.
    pub fn parent_variable(&self) -> Option<&str> {
        self.parent_variable.as_deref()
    }

    /// Whether the modifier carries a unit suffix on export.
    pub fn is_suffixed(&self) -> bool {
        self.suffix_unit
    }

    /// The declared unit, falling back to [`DEFAULT_UNIT`].
    pub fn unit(&self) -> &str {
        self.unit.as_deref().unwrap_or(DEFAULT_UNIT)
    }

    /// Replaces the declared unit for subsequent assignments.
    pub fn set_unit(&mut self, unit: Option<&str>) {
        self.unit = unit.map(str::to_string);
    }

    /// Directly assigns a value, returning the previous exported value.
    ///
    /// An empty or whitespace-only input clears the modifier. A value that
    /// begins with the reference marker is stored verbatim and records the
    /// parent link; any other value clears the link. Short hex color
    /// literals (`#abc`) are normalized to their 6-digit form.
    pub fn assign(&mut self, input: &str) -> Option<String> {
        let previous = self.value.take();
        let input = input.trim();

        if input.is_empty() {
            self.raw_value = None;
            self.value = None;
            self.parent_variable = None;
            return previous;
        }

        if input.starts_with(REFERENCE_MARKER) {
            self.parent_variable = Some(input.to_string());
            self.raw_value = Some(input.to_string());
            self.value = Some(input.to_string());
            return previous;
        }

        self.parent_variable = None;
        self.store(input);
        previous
    }

    /// Clears value, raw value, and parent link.
    pub fn clear(&mut self) {
        self.value = None;
        self.raw_value = None;
        self.parent_variable = None;
    }

    /// Assigns a resolved value pushed down by the cascade.
    ///
    /// Only `raw_value` is updated (unit-stripped per the unit rule); the
    /// exported `value` keeps the reference text and the parent link stays
    /// intact, so the declaration survives export/import and further
    /// upstream changes keep propagating.
    pub fn cascade_assign(&mut self, resolved: Option<&str>) {
        match resolved {
            Some(v) if !v.trim().is_empty() => {
                let v = v.trim();
                let raw = if self.suffix_unit {
                    let unit = self.unit().to_string();
                    v.strip_suffix(unit.as_str()).unwrap_or(v).to_string()
                } else {
                    v.to_string()
                };
                self.raw_value = Some(raw);
            }
            _ => self.raw_value = None,
        }
    }

    /// Whether this modifier currently holds a value.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    // Unit-suffix rule: raw gets the unit stripped, value gets it appended
    // exactly once. Non-suffixed modifiers store the input as-is, and so
    // do expressions (embedded references, parenthesized arithmetic) -
    // those resolve at compile time and must not grow a unit.
    fn store(&mut self, input: &str) {
        let input = normalize_short_hex(input).unwrap_or_else(|| input.to_string());

        if !self.suffix_unit || is_expression(&input) {
            self.raw_value = Some(input.clone());
            self.value = Some(input);
            return;
        }

        let unit = self.unit().to_string();
        let raw = input
            .strip_suffix(unit.as_str())
            .unwrap_or(input.as_str())
            .to_string();
        self.value = Some(format!("{raw}{unit}"));
        self.raw_value = Some(raw);
    }
}

fn is_expression(input: &str) -> bool {
    input.contains(REFERENCE_MARKER) || input.starts_with('(')
}

/// Expands 3-digit hex color literals to 6-digit form (`#abc` -> `#aabbcc`).
/// Returns `None` when the input is not a short hex color.
fn normalize_short_hex(input: &str) -> Option<String> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);
    let token = parser.next().ok()?.clone();
    if !parser.is_exhausted() {
        return None;
    }
    let hash = match token {
        Token::Hash(h) | Token::IDHash(h) => h,
        _ => return None,
    };
    if hash.len() != 3 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let mut expanded = String::with_capacity(7);
    expanded.push('#');
    for c in hash.chars() {
        expanded.push(c);
        expanded.push(c);
    }
    Some(expanded)
}

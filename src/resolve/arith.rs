//! Restricted arithmetic evaluator for embedded sub-expressions.
//!
//! Theme values may embed parenthesized arithmetic such as `(30px / 2)`.
//! The evaluator accepts numbers (with an optional unit suffix), the four
//! basic operators, parentheses, and whitespace - nothing else. Anything
//! outside that token set makes the whole expression invalid, in which
//! case the caller leaves the original text in place.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Unit suffixes recognized on numeric tokens. An unknown suffix rejects
/// the expression rather than silently dropping it.
static KNOWN_UNITS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "pt", "pc", "cm", "mm", "in",
        "%", "s", "ms", "deg",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

/// Evaluates an arithmetic expression, returning the literal result with
/// the unit suffix (if any number carried one) re-appended.
///
/// Returns `None` for anything that is not a pure arithmetic expression
/// over the restricted token set, including division by zero.
pub(crate) fn evaluate(expr: &str) -> Option<String> {
    let (tokens, unit) = tokenize(expr)?;
    let mut cursor = Cursor::new(&tokens);
    let value = cursor.expression()?;
    if !cursor.at_end() {
        return None;
    }
    let mut rendered = format_number(value);
    if let Some(unit) = unit {
        rendered.push_str(&unit);
    }
    Some(rendered)
}

fn tokenize(expr: &str) -> Option<(Vec<Token>, Option<String>)> {
    let mut tokens = Vec::new();
    let mut unit: Option<String> = None;
    let mut chars = expr.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let number: f64 = expr[start..end].parse().ok()?;
                tokens.push(Token::Number(number));

                // Optional unit suffix directly after the digits.
                let mut suffix_end = end;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphabetic() || c == '%' {
                        suffix_end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                if suffix_end > end {
                    let suffix = &expr[end..suffix_end];
                    if !KNOWN_UNITS.contains(suffix) {
                        return None;
                    }
                    // First unit seen wins; mixed units still evaluate
                    // numerically.
                    if unit.is_none() {
                        unit = Some(suffix.to_string());
                    }
                }
            }
            _ => return None,
        }
    }

    if tokens.is_empty() {
        return None;
    }
    Some((tokens, unit))
}

struct Cursor<'a> {
    tokens: &'a [Token],
    position: usize,
}

// Precedence climbing: expression handles +/-, term handles */, factor
// handles numbers, parens, and unary minus.
impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn bump(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn at_end(&self) -> bool {
        self.position == self.tokens.len()
    }

    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.bump();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.bump();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.bump();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.bump();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn factor(&mut self) -> Option<f64> {
        match self.bump()? {
            Token::Number(n) => Some(*n),
            Token::Minus => Some(-self.factor()?),
            Token::Open => {
                let value = self.expression()?;
                match self.bump()? {
                    Token::Close => Some(value),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value}")
    }
}

//! Dialect-independent algorithms shared by every SQL builder
//!
//! The `SqlBuilder` default methods route through these functions, passing in
//! the dialect-specific pieces (quote character, numeric cast syntax).

use std::sync::OnceLock;

use regex::Regex;

use crate::utils::string::{non_blank, normalize_whitespace};

/// Symbols kept as-is by [`to_valid_column_name`]
const COLUMN_NAME_SYMBOLS: &[char] = &[
    '_', '-', '.', ',', ':', '/', '?', '@', '#', '$', '%', '^', '&', '*', '+',
];

/// Join items with `", "` after mapping each one
pub fn to_comma_separated<T>(items: &[T], mut f: impl FnMut(&T) -> String) -> String {
    items.iter().map(|item| f(item)).collect::<Vec<_>>().join(", ")
}

/// Wrap `identifier` in `quote`, doubling every embedded quote character
pub fn quote_with(quote: char, identifier: &str) -> String {
    let mut quoted = String::with_capacity(identifier.len() + 2);
    quoted.push(quote);
    for c in identifier.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

/// Inverse of [`quote_with`]
///
/// Text not wrapped in `quote` is returned unchanged.
pub fn unquote_with(quote: char, text: &str) -> String {
    let inner = text
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote));

    match inner {
        Some(inner) => {
            let doubled: String = [quote, quote].iter().collect();
            inner.replace(&doubled, &quote.to_string())
        }
        None => text.to_string(),
    }
}

/// Double single quotes for use inside a string literal
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "''")
}

/// Double backslashes and single quotes, for engines with backslash escapes
pub fn escape_with_backslashes(value: &str) -> String {
    escape_single_quotes(&value.replace('\\', "\\\\"))
}

/// Trimmed, non-blank timestamp passed through without reformatting
pub fn render_timestamp_verbatim(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

/// Map an arbitrary label onto a legal column name
///
/// Letters, digits, whitespace and [`COLUMN_NAME_SYMBOLS`] are kept, every other
/// character becomes `_`. Total and idempotent.
pub fn to_valid_column_name(name: Option<&str>) -> Option<String> {
    name.map(|name| {
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() || COLUMN_NAME_SYMBOLS.contains(&c) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    })
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"))
}

fn distinct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^DISTINCT(?:\s+(.*)|\s*(\(.*))$").expect("Invalid regex")
    })
}

/// Position of the parenthesis closing the one at `open`
///
/// Parentheses inside single- or double-quoted text are ignored.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote: Option<char> = None;

    for (i, c) in text[open..].char_indices() {
        match (in_quote, c) {
            (Some(q), c) if c == q => in_quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => in_quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrite an aggregate call so its operand is cast to a fixed-precision numeric
///
/// `numeric_cast` renders the dialect's cast of the operand. `COUNT` calls are
/// returned with whitespace collapsed and never cast. Input which is not a
/// single `NAME(...)` call is returned trimmed and otherwise unchanged.
///
/// ```text
/// AVG(value)           -> AVG((value)::numeric(10,2))
/// sum(DISTINCT amount) -> SUM(DISTINCT (amount)::numeric(15,4))
/// count(DISTINCT x)    -> count(DISTINCT x)
/// ```
pub fn aggr_decimal(
    expression: &str,
    precision: u32,
    scale: u32,
    numeric_cast: impl Fn(&str, u32, u32) -> String,
) -> String {
    let expression = expression.trim();

    let Some((name, inner)) = split_call(expression) else {
        tracing::debug!(expression, "Not a single aggregate call, left unchanged");
        return expression.to_string();
    };

    if name.eq_ignore_ascii_case("count") {
        return normalize_whitespace(expression);
    }

    let inner = inner.trim();
    let (distinct, operand) = match distinct_regex().captures(inner) {
        Some(caps) => {
            let operand = caps.get(1).or(caps.get(2)).map_or("", |m| m.as_str()).trim();
            ("DISTINCT ", strip_enclosing_parens(operand))
        }
        None => ("", inner),
    };

    if operand.is_empty() {
        tracing::debug!(expression, "Aggregate call without operand, left unchanged");
        return expression.to_string();
    }

    format!(
        "{}({}{})",
        name.to_uppercase(),
        distinct,
        numeric_cast(operand, precision, scale)
    )
}

/// `(x)` -> `x` when the outer pair encloses the whole operand
fn strip_enclosing_parens(operand: &str) -> &str {
    if operand.starts_with('(') && matching_paren(operand, 0) == Some(operand.len() - 1) {
        operand[1..operand.len() - 1].trim()
    } else {
        operand
    }
}

/// Split `NAME(inner)` on the first `(` and the final `)`
///
/// Returns `None` unless the whole expression is exactly one call.
fn split_call(expression: &str) -> Option<(&str, &str)> {
    let open = expression.find('(')?;
    if !expression.ends_with(')') {
        return None;
    }
    let close = expression.len() - 1;

    let name = expression[..open].trim();
    if !identifier_regex().is_match(name) {
        return None;
    }
    if matching_paren(expression, open)? != close {
        return None;
    }

    Some((name, &expression[open + 1..close]))
}

//! Filter operands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The operand of a search clause.
///
/// Deserializes from plain JSON: `"text"`, `true`, `3`, `["a", "b"]` or `null`.
///
/// # Example
///
/// ```
/// use reminders_query_rs::SearchValue;
///
/// let value = SearchValue::from("work, home");
/// assert_eq!(value.as_string_array(), vec!["work", "home"]);
/// assert_eq!(SearchValue::Number(3.0).as_string(), "3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchValue {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A list of values.
    Array(Vec<SearchValue>),
    /// No value.
    #[default]
    Null,
}

impl SearchValue {
    /// Renders the value as a string.
    ///
    /// Integral numbers drop their fractional part, booleans become
    /// `"true"`/`"false"`, arrays are joined with commas and `Null` is empty.
    pub fn as_string(&self) -> String {
        match self {
            SearchValue::String(s) => s.clone(),
            SearchValue::Bool(b) => b.to_string(),
            SearchValue::Number(n) => format_number(*n),
            SearchValue::Array(items) => items
                .iter()
                .map(SearchValue::as_string)
                .collect::<Vec<_>>()
                .join(","),
            SearchValue::Null => String::new(),
        }
    }

    /// Coerces the value to a boolean.
    ///
    /// Strings are true when they read `true`, `yes` or `1` (any case);
    /// numbers are true when nonzero. Arrays and `Null` are false.
    pub fn as_bool(&self) -> bool {
        match self {
            SearchValue::Bool(b) => *b,
            SearchValue::Number(n) => *n != 0.0,
            SearchValue::String(s) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1")
            }
            SearchValue::Array(_) | SearchValue::Null => false,
        }
    }

    /// Coerces the value to a list of strings.
    ///
    /// Arrays are flattened; a string is split on commas into trimmed,
    /// non-empty tokens. Any other scalar yields a single element.
    pub fn as_string_array(&self) -> Vec<String> {
        match self {
            SearchValue::Array(items) => items.iter().flat_map(|v| v.as_string_array()).collect(),
            SearchValue::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
            SearchValue::Null => Vec::new(),
            other => vec![other.as_string()],
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for SearchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for SearchValue {
    fn from(value: &str) -> Self {
        SearchValue::String(value.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(value: String) -> Self {
        SearchValue::String(value)
    }
}

impl From<bool> for SearchValue {
    fn from(value: bool) -> Self {
        SearchValue::Bool(value)
    }
}

impl From<f64> for SearchValue {
    fn from(value: f64) -> Self {
        SearchValue::Number(value)
    }
}

impl From<i64> for SearchValue {
    fn from(value: i64) -> Self {
        SearchValue::Number(value as f64)
    }
}

impl<T: Into<SearchValue>> From<Vec<T>> for SearchValue {
    fn from(values: Vec<T>) -> Self {
        SearchValue::Array(values.into_iter().map(Into::into).collect())
    }
}

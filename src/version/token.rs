//! Numeric token classification shared by the version types
//!
//! Classification and validation are separate steps: [`classify`] never fails,
//! it only sorts a raw token into unset, wildcard, integer or leftover text.
//! The owning type then applies its field-specific rules.

use std::fmt;

/// Text used when rendering a wildcard component.
pub const WILDCARD: &str = "x";

/// Raw input for one numeric component, as handed to a constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Int(i64),
    Text(String),
    Absent,
}

impl From<i64> for RawToken {
    fn from(value: i64) -> Self {
        RawToken::Int(value)
    }
}

impl From<&str> for RawToken {
    fn from(value: &str) -> Self {
        RawToken::Text(value.to_string())
    }
}

impl From<String> for RawToken {
    fn from(value: String) -> Self {
        RawToken::Text(value)
    }
}

impl From<Option<i64>> for RawToken {
    fn from(value: Option<i64>) -> Self {
        value.map_or(RawToken::Absent, RawToken::Int)
    }
}

impl From<Component> for RawToken {
    fn from(value: Component) -> Self {
        match value {
            Component::Concrete(n) => match i64::try_from(n) {
                Ok(n) => RawToken::Int(n),
                Err(_) => RawToken::Text(n.to_string()),
            },
            Component::Wildcard => RawToken::Text(WILDCARD.to_string()),
            Component::Unset => RawToken::Absent,
        }
    }
}

/// Result of classifying a [`RawToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Unset,
    Wildcard,
    Int(i64),
    /// Text that is not an integer; rejected later by the owner.
    Verbatim(String),
}

/// A validated minor or micro component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Concrete(u64),
    Wildcard,
    Unset,
}

impl Component {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Component::Wildcard)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Component::Unset)
    }

    /// Returns the concrete value, if any.
    pub fn value(&self) -> Option<u64> {
        match self {
            Component::Concrete(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Concrete(n) => write!(f, "{}", n),
            Component::Wildcard => f.write_str(WILDCARD),
            Component::Unset => Ok(()),
        }
    }
}

/// Classify a raw token without rejecting anything.
///
/// - absent or empty text -> [`Classified::Unset`]
/// - `x`, `X` or `*` -> [`Classified::Wildcard`]
/// - base-10 integer text (sign allowed, surrounding whitespace ignored) -> [`Classified::Int`]
/// - anything else -> [`Classified::Verbatim`]
pub fn classify(raw: impl Into<RawToken>) -> Classified {
    match raw.into() {
        RawToken::Absent => Classified::Unset,
        RawToken::Int(n) => Classified::Int(n),
        RawToken::Text(text) => {
            if text.is_empty() {
                return Classified::Unset;
            }
            if matches!(text.as_str(), "x" | "X" | "*") {
                return Classified::Wildcard;
            }
            match text.trim().parse::<i64>() {
                Ok(n) => Classified::Int(n),
                Err(_) => Classified::Verbatim(text),
            }
        }
    }
}

impl fmt::Display for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classified::Unset => write!(f, "<unset>"),
            Classified::Wildcard => f.write_str(WILDCARD),
            Classified::Int(n) => write!(f, "{}", n),
            Classified::Verbatim(text) => write!(f, "{}", text),
        }
    }
}

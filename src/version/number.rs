//! Numeric Juju version with wildcard support
//!
//! A [`VersionNumber`] is a `major.minor[.micro]` triplet such as `2.0`,
//! `1.25.6` or `2.x`. Minor and micro may be wildcards, micro may be left
//! unset. Both an unset and a wildcard micro match any candidate micro.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::version::error::VersionError;
use crate::version::token::{Classified, Component, RawToken, classify};

/// A Juju version number or wildcard (e.g. 2.0, 1.25.6, 2.x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionNumber {
    major: u64,
    minor: Component,
    micro: Component,
}

impl VersionNumber {
    /// Build a version number from raw tokens, validating every field.
    ///
    /// Tokens may be integers, text (`"3"`, `"x"`, `"*"`) or absent
    /// (`None`, `RawToken::Absent`, `""`).
    pub fn new(
        major: impl Into<RawToken>,
        minor: impl Into<RawToken>,
        micro: impl Into<RawToken>,
    ) -> Result<Self, VersionError> {
        let major = match classify(major) {
            Classified::Wildcard => return Err(VersionError::WildcardMajor),
            Classified::Unset => return Err(VersionError::MissingComponent("major")),
            other => non_negative("major", other)?,
        };

        let minor = match classify(minor) {
            Classified::Wildcard => Component::Wildcard,
            Classified::Unset => return Err(VersionError::MissingComponent("minor")),
            other => Component::Concrete(non_negative("minor", other)?),
        };

        let micro = match classify(micro) {
            Classified::Unset => Component::Unset,
            Classified::Wildcard => Component::Wildcard,
            other => Component::Concrete(non_negative("micro", other)?),
        };

        Self::from_components(major, minor, micro)
    }

    /// Build a version number from already typed components.
    pub fn from_components(
        major: u64,
        minor: Component,
        micro: Component,
    ) -> Result<Self, VersionError> {
        match minor {
            Component::Unset => return Err(VersionError::MissingComponent("minor")),
            Component::Wildcard if !micro.is_unset() => {
                return Err(VersionError::MicroWithWildcardMinor(micro.to_string()));
            }
            _ => {}
        }

        let all_zero = major == 0
            && minor == Component::Concrete(0)
            && matches!(micro, Component::Concrete(0) | Component::Unset);
        if all_zero {
            return Err(VersionError::AllZero);
        }

        Ok(Self {
            major,
            minor,
            micro,
        })
    }

    /// Parse a version number such as `1.2`, `1.2.3` or `1.x`.
    ///
    /// This round-trips with `to_string()`.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(VersionError::Empty);
        }

        let (major, rest) = raw.split_once('.').unwrap_or((raw, ""));
        let (minor, micro) = match rest.split_once('.') {
            Some((_, "")) => return Err(VersionError::MissingComponent("micro")),
            Some((minor, micro)) => (minor, micro),
            None => (rest, ""),
        };

        Self::new(major, minor, micro)
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Component {
        self.minor
    }

    pub fn micro(&self) -> Component {
        self.micro
    }

    /// Whether the version leaves minor or micro open.
    ///
    /// An unset micro counts as a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.minor.is_wildcard() || self.micro.is_unset() || self.micro.is_wildcard()
    }

    /// Return a copy with `micro` replaced, validated like a fresh value.
    pub fn with_micro(&self, micro: Component) -> Result<Self, VersionError> {
        Self::from_components(self.major, self.minor, micro)
    }

    /// Check whether `candidate` satisfies this version used as a pattern.
    ///
    /// Concrete fields must be equal; wildcard and unset fields match anything.
    /// The relation is not symmetric: `1.x` matches `1.2.3` but not vice versa.
    pub fn matches(&self, candidate: &VersionNumber) -> bool {
        self.apply(candidate) == *candidate
    }

    /// Same as [`matches`](Self::matches), parsing the candidate first.
    pub fn matches_str(&self, candidate: &str) -> Result<bool, VersionError> {
        let candidate = Self::parse(candidate)?;
        Ok(self.matches(&candidate))
    }

    // Fill in the open fields of `self` from `candidate`.
    fn apply(&self, candidate: &VersionNumber) -> VersionNumber {
        let mut applied = *self;
        if applied.minor.is_wildcard() {
            applied.minor = candidate.minor;
        }
        if applied.micro.is_unset() || applied.micro.is_wildcard() {
            applied.micro = candidate.micro;
        }
        applied
    }
}

fn non_negative(field: &'static str, token: Classified) -> Result<u64, VersionError> {
    match token {
        Classified::Int(n) if n >= 0 => Ok(n as u64),
        other => Err(VersionError::InvalidComponent {
            field,
            value: other.to_string(),
        }),
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.micro {
            Component::Unset => write!(f, "{}.{}", self.major, self.minor),
            micro => write!(f, "{}.{}.{}", self.major, self.minor, micro),
        }
    }
}

impl FromStr for VersionNumber {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VersionNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

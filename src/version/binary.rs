//! Full Juju version: number, release level, series and arch
//!
//! ```text
//! 1.2.3-beta2-xenial-amd64
//! ───── ───── ────── ─────
//! number level series arch
//! ```
//!
//! The release level is omitted when final, and a `.0` micro is dropped
//! before a dev tag (`1.2-beta2`). Series and arch always come as a pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::version::error::VersionError;
use crate::version::number::VersionNumber;
use crate::version::release::{ReleaseLevel, is_dev_tag};
use crate::version::token::Component;

/// Anything that can be turned into a [`VersionNumber`] for [`Version::new`].
pub trait IntoVersionNumber {
    fn into_version_number(self) -> Result<VersionNumber, VersionError>;
}

impl IntoVersionNumber for VersionNumber {
    fn into_version_number(self) -> Result<VersionNumber, VersionError> {
        Ok(self)
    }
}

impl IntoVersionNumber for &VersionNumber {
    fn into_version_number(self) -> Result<VersionNumber, VersionError> {
        Ok(*self)
    }
}

impl IntoVersionNumber for &str {
    fn into_version_number(self) -> Result<VersionNumber, VersionError> {
        VersionNumber::parse(self)
    }
}

impl IntoVersionNumber for String {
    fn into_version_number(self) -> Result<VersionNumber, VersionError> {
        VersionNumber::parse(&self)
    }
}

/// Target platform of a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub series: String,
    pub arch: String,
}

/// A Juju version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    number: VersionNumber,
    releaselevel: ReleaseLevel,
    platform: Option<Platform>,
}

impl Version {
    /// Build a version, normalizing labels to lower case.
    ///
    /// Empty labels count as absent, and a missing release level means `final`.
    pub fn new(
        number: impl IntoVersionNumber,
        releaselevel: Option<&str>,
        series: Option<&str>,
        arch: Option<&str>,
    ) -> Result<Self, VersionError> {
        let number = number.into_version_number()?;
        if number.is_wildcard() {
            return Err(VersionError::Wildcard(number.to_string()));
        }

        let releaselevel = ReleaseLevel::parse(releaselevel.unwrap_or_default())?;

        let series = normalize_label(series);
        let arch = normalize_label(arch);
        let platform = match (series, arch) {
            (None, None) => None,
            (Some(series), None) => return Err(VersionError::MissingArch(series)),
            (None, Some(arch)) => return Err(VersionError::MissingSeries(arch)),
            (Some(series), Some(arch)) => {
                if !is_valid_series(&series) {
                    return Err(VersionError::InvalidSeries(series));
                }
                if !is_valid_arch(&arch) {
                    return Err(VersionError::InvalidArch(arch));
                }
                Some(Platform { series, arch })
            }
        };

        Ok(Self {
            number,
            releaselevel,
            platform,
        })
    }

    /// Parse a version string such as `1.2.3`, `1.2-beta2` or
    /// `1.2.3-xenial-amd64`.
    ///
    /// This round-trips with `to_string()`, except for verbose strings like
    /// `2.1.0-beta2` and `2.0.1-final-xenial-amd64`.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let Some((number, rest)) = raw.split_once('-') else {
            return Self::new(VersionNumber::parse(raw)?, None, None, None);
        };
        let mut number = VersionNumber::parse(number)?;

        let (mut level, mut series, mut arch) = (rest, None, None);
        if let Some((head, rest)) = rest.split_once('-') {
            level = head;
            match rest.split_once('-') {
                Some((s, a)) => {
                    series = Some(s);
                    arch = Some(a);
                }
                // Two trailing tokens without a dev tag are series and arch.
                None => {
                    series = Some(head);
                    arch = Some(rest);
                    level = "";
                }
            }
        }

        // Dev releases always have a full major.minor.micro baseline. The tag
        // is checked as written, before lower-casing.
        if number.micro().is_unset() && is_dev_tag(level) {
            number = number.with_micro(Component::Concrete(0))?;
        }

        Self::new(number, Some(level), series, arch)
    }

    pub fn number(&self) -> &VersionNumber {
        &self.number
    }

    pub fn releaselevel(&self) -> &ReleaseLevel {
        &self.releaselevel
    }

    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    pub fn series(&self) -> Option<&str> {
        self.platform.as_ref().map(|p| p.series.as_str())
    }

    pub fn arch(&self) -> Option<&str> {
        self.platform.as_ref().map(|p| p.arch.as_str())
    }
}

fn normalize_label(label: Option<&str>) -> Option<String> {
    label.filter(|l| !l.is_empty()).map(str::to_lowercase)
}

// TODO: check series against the list of supported distribution series.
fn is_valid_series(_series: &str) -> bool {
    true
}

// TODO: check arch against the architectures Juju publishes agents for.
fn is_valid_arch(_arch: &str) -> bool {
    true
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = &self.number;
        match &self.releaselevel {
            ReleaseLevel::Final => write!(f, "{}", number)?,
            level if number.micro() == Component::Concrete(0) => {
                write!(f, "{}.{}-{}", number.major(), number.minor(), level)?
            }
            level => write!(f, "{}-{}", number, level)?,
        }
        if let Some(platform) = &self.platform {
            write!(f, "-{}-{}", platform.series, platform.arch)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

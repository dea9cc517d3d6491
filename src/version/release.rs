//! Release levels: `final` or a dev tag such as `beta2`

use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;

/// Release level used when none is given.
pub const RELEASE_FINAL: &str = "final";

/// Pre-release stage of a dev tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DevStage {
    Alpha,
    Beta,
    Candidate,
}

impl DevStage {
    const ALL: [DevStage; 3] = [DevStage::Alpha, DevStage::Beta, DevStage::Candidate];

    pub fn as_str(&self) -> &'static str {
        match self {
            DevStage::Alpha => "alpha",
            DevStage::Beta => "beta",
            DevStage::Candidate => "rc",
        }
    }
}

/// A validated dev tag, kept in the exact text it was given in.
///
/// `beta02` and `beta2` share stage and serial but are different tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DevTag {
    stage: DevStage,
    serial: u64,
    tag: String,
}

impl DevTag {
    pub fn stage(&self) -> DevStage {
        self.stage
    }

    /// 1-indexed release number within the stage.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

/// Release level of a [`Version`](crate::version::Version).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ReleaseLevel {
    #[default]
    Final,
    Dev(DevTag),
}

impl ReleaseLevel {
    /// Parse a release level, lower-casing it first. Empty input means `final`.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let level = raw.to_lowercase();
        if level.is_empty() || level == RELEASE_FINAL {
            return Ok(ReleaseLevel::Final);
        }
        match parse_dev_tag(&level) {
            Some(tag) => Ok(ReleaseLevel::Dev(tag)),
            None => Err(VersionError::InvalidReleaseLevel(level)),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ReleaseLevel::Final)
    }

    pub fn is_dev(&self) -> bool {
        !self.is_final()
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseLevel::Final => RELEASE_FINAL,
            ReleaseLevel::Dev(tag) => tag.as_str(),
        }
    }
}

/// Whether `level` is an `alpha`, `beta` or `rc` tag with a serial >= 1.
///
/// Case-sensitive: `BETA2` is only accepted once lower-cased.
pub fn is_dev_tag(level: &str) -> bool {
    parse_dev_tag(level).is_some()
}

fn parse_dev_tag(level: &str) -> Option<DevTag> {
    // Stage prefixes do not overlap, so the first match decides.
    let stage = DevStage::ALL
        .into_iter()
        .find(|stage| level.starts_with(stage.as_str()))?;
    let serial: u64 = level[stage.as_str().len()..].trim().parse().ok()?;
    // Dev releases are always 1-indexed.
    if serial < 1 {
        return None;
    }
    Some(DevTag {
        stage,
        serial,
        tag: level.to_string(),
    })
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseLevel {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ReleaseLevel::Final)]
    #[case("final", ReleaseLevel::Final)]
    #[case("FINAL", ReleaseLevel::Final)]
    fn parse_accepts_final(#[case] raw: &str, #[case] expected: ReleaseLevel) {
        assert_eq!(ReleaseLevel::parse(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("alpha1", DevStage::Alpha, 1, "alpha1")]
    #[case("beta2", DevStage::Beta, 2, "beta2")]
    #[case("BETA3", DevStage::Beta, 3, "beta3")]
    #[case("rc10", DevStage::Candidate, 10, "rc10")]
    #[case("beta02", DevStage::Beta, 2, "beta02")]
    #[case("beta+2", DevStage::Beta, 2, "beta+2")]
    fn parse_accepts_dev_tags(
        #[case] raw: &str,
        #[case] stage: DevStage,
        #[case] serial: u64,
        #[case] rendered: &str,
    ) {
        let ReleaseLevel::Dev(tag) = ReleaseLevel::parse(raw).unwrap() else {
            panic!("{raw:?} should be a dev tag");
        };

        assert_eq!(tag.stage(), stage);
        assert_eq!(tag.serial(), serial);
        assert_eq!(tag.as_str(), rendered);
    }

    #[rstest]
    #[case("???")]
    #[case("canary1")]
    #[case("beta")]
    #[case("beta0")]
    #[case("beta-1")]
    #[case("betax")]
    #[case("rc1.5")]
    #[case("xenial")]
    fn parse_rejects_unknown_levels(#[case] raw: &str) {
        assert_eq!(
            ReleaseLevel::parse(raw).unwrap_err(),
            VersionError::InvalidReleaseLevel(raw.to_lowercase())
        );
    }

    #[rstest]
    #[case("beta2", true)]
    #[case("rc1", true)]
    #[case("BETA2", false)]
    #[case("final", false)]
    #[case("xenial", false)]
    #[case("alpha0", false)]
    fn is_dev_tag_detects_dev_tags(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_dev_tag(raw), expected);
    }

    #[test]
    fn dev_tags_keep_their_text() {
        let padded = ReleaseLevel::parse("beta02").unwrap();
        let plain = ReleaseLevel::parse("beta2").unwrap();

        assert_ne!(padded, plain);
        assert_eq!(padded.to_string(), "beta02");
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(ReleaseLevel::parse("RC4").unwrap().to_string(), "rc4");
        assert_eq!(ReleaseLevel::Final.to_string(), "final");
        assert_eq!(ReleaseLevel::default(), ReleaseLevel::Final);
    }
}

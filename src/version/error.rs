use thiserror::Error;

/// Error returned when a version string or its components are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("missing {0}")]
    MissingComponent(&'static str),

    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidComponent { field: &'static str, value: String },

    #[error("wildcard not supported for the major version")]
    WildcardMajor,

    #[error("got unexpected micro ({0}) with wildcard minor")]
    MicroWithWildcardMinor(String),

    #[error("at least one of major, minor, and micro must be set")]
    AllZero,

    #[error("wildcard versions not supported ({0})")]
    Wildcard(String),

    #[error("invalid releaselevel {0:?}")]
    InvalidReleaseLevel(String),

    #[error("invalid series {0:?}")]
    InvalidSeries(String),

    #[error("invalid arch {0:?}")]
    InvalidArch(String),

    #[error("missing arch (have series {0:?})")]
    MissingArch(String),

    #[error("missing series (have arch {0:?})")]
    MissingSeries(String),
}

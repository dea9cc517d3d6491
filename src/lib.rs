//! Parsing, formatting and wildcard matching of Juju versions
//!
//! - [`version`]: `VersionNumber` and `Version` value types
//! - [`executable`]: locating and running the `juju` binary
//! - [`config`]: configuration documents and default paths

pub mod config;
pub mod executable;
pub mod version;

pub use version::{Version, VersionError, VersionNumber};

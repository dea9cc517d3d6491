//! Juju version parsing, formatting and wildcard matching
//!
//! Two immutable value types make up this module:
//!
//! ```text
//! ┌──────────────────────────┐   wraps   ┌────────────────────┐
//! │ Version                  │──────────▶│   VersionNumber    │
//! │ 1.2.3-beta2-xenial-amd64 │           │ 1.2.3 / 1.2 / 1.x  │
//! └──────────────────────────┘           └────────────────────┘
//!                                                  │
//!                                                  ▼
//!                                        ┌────────────────────┐
//!                                        │       token        │
//!                                        │  (classification)  │
//!                                        └────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`token`]: Numeric token classification shared by both types
//! - [`number`]: `VersionNumber`, wildcard-aware `major.minor[.micro]`
//! - [`release`]: `final` and dev tag release levels
//! - [`binary`]: `Version`, a concrete number plus release level and platform
//! - [`error`]: Error type for malformed versions

pub mod binary;
pub mod error;
pub mod number;
pub mod release;
pub mod token;

pub use binary::{IntoVersionNumber, Platform, Version};
pub use error::VersionError;
pub use number::VersionNumber;
pub use release::{DevStage, DevTag, ReleaseLevel};
pub use token::{Component, RawToken};

//! NuGet and strict SemVer version parsing, formatting and ordering
//!
//! This crate parses `MAJOR.MINOR.PATCH[.REVISION][-LABEL(.LABEL)*][+METADATA]`
//! version strings, keeps the text they were parsed from for display, and
//! orders strict and four-component versions against each other the way the
//! NuGet client does.
//!
//! ```
//! use nuget_versions::{NuGetVersion, SemanticVersion};
//!
//! let a = NuGetVersion::parse("1.2.3.0-beta.2").unwrap();
//! let b = SemanticVersion::parse("1.2.3-beta.10").unwrap();
//!
//! assert!(a < b);
//! assert_eq!(a.to_string(), "1.2.3.0-beta.2");
//! assert_eq!(NuGetVersion::parse("1.2.3.1").unwrap().to_string(), "1.2.3.1");
//! assert!(SemanticVersion::try_parse("1.2").is_none());
//! ```

mod comparator;
mod nuget_version;
mod semantic_version;
#[cfg(feature = "serde")]
mod serde_impl;
mod version_parser;

pub use comparator::{VersionComparer, VersionRef};
pub use nuget_version::NuGetVersion;
pub use semantic_version::SemanticVersion;
pub use version_parser::{Grammar, VersionParser, VersionParserError};

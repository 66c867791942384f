//! Strict `major.minor.patch` semantic version

use std::fmt;
use std::str::FromStr;

use crate::comparator::VersionRef;
use crate::version_parser::{Grammar, ParsedVersion, VersionParser, VersionParserError};

/// A strict SemVer version: `X.Y.Z`, `X.Y.Z-alpha`, `X.Y.Z-alpha+metadata`.
///
/// Values parsed from a string remember the exact input and print it back
/// verbatim until a field is changed. Equality and ordering go through
/// [`VersionComparer`](crate::VersionComparer), so they also hold against
/// [`NuGetVersion`](crate::NuGetVersion).
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    release_labels: Option<Vec<String>>,
    metadata: Option<String>,
    original_version: Option<String>,
}

impl SemanticVersion {
    /// Create a release version `major.minor.patch`
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            release_labels: None,
            metadata: None,
            original_version: None,
        }
    }

    /// Attach prerelease labels given as an already split sequence
    pub fn with_release_labels<I, S>(mut self, labels: I) -> Result<Self, VersionParserError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_release_labels(labels)?;
        Ok(self)
    }

    /// Attach prerelease labels given as a dot-delimited string (`"alpha.1"`)
    pub fn with_release(mut self, release: &str) -> Result<Self, VersionParserError> {
        self.set_release(release)?;
        Ok(self)
    }

    /// Attach build metadata
    pub fn with_metadata(mut self, metadata: &str) -> Result<Self, VersionParserError> {
        self.set_metadata(metadata)?;
        Ok(self)
    }

    /// Create an independent copy of any version, dropping a revision if present.
    ///
    /// The copy never remembers the text the source was parsed from.
    pub fn copy_of<'a>(version: impl Into<VersionRef<'a>>) -> Self {
        let source = version.into().fields();
        SemanticVersion {
            major: source.major,
            minor: source.minor,
            patch: source.patch,
            release_labels: source.release_labels.clone(),
            metadata: source.metadata.clone(),
            original_version: None,
        }
    }

    /// Parse a strict three-component version
    pub fn parse(input: &str) -> Result<Self, VersionParserError> {
        let parsed = VersionParser::parse(input, Grammar::Strict)?;
        Ok(Self::from_parsed(parsed, input))
    }

    /// Parse a strict three-component version, returning `None` for malformed input
    pub fn try_parse(input: &str) -> Option<Self> {
        match Self::parse(input) {
            Ok(version) => Some(version),
            Err(err) => {
                log::debug!("Rejected semantic version {:?}: {}", input, err);
                None
            }
        }
    }

    pub(crate) fn from_parsed(parsed: ParsedVersion, input: &str) -> Self {
        SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            release_labels: parsed.release_labels,
            metadata: parsed.metadata,
            original_version: Some(input.to_string()),
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Prerelease labels, `None` when the version carried no `-` section
    pub fn release_labels(&self) -> Option<&[String]> {
        self.release_labels.as_deref()
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// Prerelease labels joined with `.`
    pub fn release(&self) -> Option<String> {
        self.release_labels.as_ref().map(|labels| labels.join("."))
    }

    /// The exact text this version was parsed from, until the first mutation
    pub fn original_version(&self) -> Option<&str> {
        self.original_version.as_deref()
    }

    pub fn set_major(&mut self, major: u64) {
        self.major = major;
        self.original_version = None;
    }

    pub fn set_minor(&mut self, minor: u64) {
        self.minor = minor;
        self.original_version = None;
    }

    pub fn set_patch(&mut self, patch: u64) {
        self.patch = patch;
        self.original_version = None;
    }

    /// Replace the prerelease labels. On error the version is left untouched.
    pub fn set_release_labels<I, S>(&mut self, labels: I) -> Result<(), VersionParserError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        VersionParser::validate_identifiers(&labels)?;
        self.release_labels = Some(labels);
        self.original_version = None;
        Ok(())
    }

    /// Replace the prerelease labels from a dot-delimited string
    pub fn set_release(&mut self, release: &str) -> Result<(), VersionParserError> {
        self.set_release_labels(VersionParser::split_labels(release))
    }

    /// Remove the prerelease section entirely
    pub fn clear_release_labels(&mut self) {
        self.release_labels = None;
        self.original_version = None;
    }

    pub fn set_metadata(&mut self, metadata: &str) -> Result<(), VersionParserError> {
        VersionParser::validate_metadata(metadata)?;
        self.metadata = Some(metadata.to_string());
        self.original_version = None;
        Ok(())
    }

    pub fn clear_metadata(&mut self) {
        self.metadata = None;
        self.original_version = None;
    }

    /// True when release labels are present and at least one is non-empty
    pub fn is_prerelease(&self) -> bool {
        self.release_labels
            .as_ref()
            .is_some_and(|labels| !labels.iter().all(String::is_empty))
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.as_ref().is_some_and(|metadata| !metadata.is_empty())
    }

    pub(crate) fn forget_original(&mut self) {
        self.original_version = None;
    }

    /// Write the version, echoing the original text when there is one.
    ///
    /// `revision` is only printed when non-zero.
    pub(crate) fn write_to(&self, f: &mut fmt::Formatter<'_>, revision: u64) -> fmt::Result {
        if let Some(original) = self.original_version.as_deref().filter(|s| !s.is_empty()) {
            return f.write_str(original);
        }

        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if revision != 0 {
            write!(f, ".{}", revision)?;
        }
        if self.is_prerelease() {
            if let Some(release) = self.release() {
                write!(f, "-{}", release)?;
            }
        }
        if let Some(metadata) = self.metadata.as_deref().filter(|m| !m.is_empty()) {
            write!(f, "+{}", metadata)?;
        }
        Ok(())
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, 0)
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

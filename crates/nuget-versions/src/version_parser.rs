//! Version string grammar and identifier validation

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Numeric core accepted by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Exactly `major.minor.patch`
    Strict,
    /// `major.minor[.patch[.revision]]`, missing parts default to 0
    Extended,
}

impl Grammar {
    fn component_range(&self) -> (usize, usize) {
        match self {
            Grammar::Strict => (3, 3),
            Grammar::Extended => (2, 4),
        }
    }

    fn expected_components(&self) -> &'static str {
        match self {
            Grammar::Strict => "3",
            Grammar::Extended => "2 to 4",
        }
    }
}

/// Error type for version parsing and validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParserError {
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("Invalid version string \"{version}\": expected {expected} numeric components, found {found}")]
    ComponentCount {
        version: String,
        expected: &'static str,
        found: usize,
    },
    #[error("Invalid version string \"{version}\": \"{component}\" is not a non-negative integer")]
    InvalidNumber { version: String, component: String },
    #[error("Invalid semantic version identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Invalid build metadata \"{0}\"")]
    InvalidMetadata(String),
}

lazy_static! {
    // Empty identifiers pass; only the character set is enforced
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z0-9-]*$").unwrap();

    static ref NUMERIC_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Components split out of a version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub revision: u64,
    pub release_labels: Option<Vec<String>>,
    pub metadata: Option<String>,
}

/// Grammar and validator for strict and extended version strings
pub struct VersionParser;

impl VersionParser {
    /// Check if a version string conforms to the given grammar
    pub fn is_valid(input: &str, grammar: Grammar) -> bool {
        Self::parse(input, grammar).is_ok()
    }

    /// Check if a prerelease identifier or metadata string uses only `[A-Za-z0-9-]`
    pub fn is_valid_identifier(identifier: &str) -> bool {
        IDENTIFIER_RE.is_match(identifier)
    }

    pub(crate) fn parse(input: &str, grammar: Grammar) -> Result<ParsedVersion, VersionParserError> {
        if input.is_empty() {
            return Err(VersionParserError::InvalidVersion(input.to_string()));
        }

        let (core, metadata) = match input.split_once('+') {
            Some((core, metadata)) => (core, Some(metadata)),
            None => (input, None),
        };

        let (numeric, release) = match core.split_once('-') {
            Some((numeric, release)) => (numeric, Some(release)),
            None => (core, None),
        };

        let parts: Vec<&str> = numeric.split('.').collect();
        let (min, max) = grammar.component_range();
        if parts.len() < min || parts.len() > max {
            return Err(VersionParserError::ComponentCount {
                version: input.to_string(),
                expected: grammar.expected_components(),
                found: parts.len(),
            });
        }

        let release_labels = match release {
            Some(release) => {
                let labels = Self::split_labels(release);
                Self::validate_identifiers(&labels)?;
                Some(labels)
            }
            None => None,
        };

        if let Some(metadata) = metadata {
            Self::validate_metadata(metadata)?;
        }

        let mut numbers = [0u64; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = Self::parse_number(input, part)?;
        }

        Ok(ParsedVersion {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            revision: numbers[3],
            release_labels,
            metadata: metadata.map(str::to_string),
        })
    }

    fn parse_number(input: &str, part: &str) -> Result<u64, VersionParserError> {
        let invalid = || VersionParserError::InvalidNumber {
            version: input.to_string(),
            component: part.to_string(),
        };

        if !NUMERIC_RE.is_match(part) {
            return Err(invalid());
        }

        // Digits only at this point, so the only failure left is overflow
        part.parse::<u64>().map_err(|_| invalid())
    }

    /// Split on `.`, keeping interior empty labels but dropping trailing ones
    pub(crate) fn split_labels(release: &str) -> Vec<String> {
        let mut labels: Vec<String> = release.split('.').map(str::to_string).collect();
        while labels.last().is_some_and(String::is_empty) {
            labels.pop();
        }
        labels
    }

    pub(crate) fn validate_identifier(identifier: &str) -> Result<(), VersionParserError> {
        if Self::is_valid_identifier(identifier) {
            Ok(())
        } else {
            Err(VersionParserError::InvalidIdentifier(identifier.to_string()))
        }
    }

    pub(crate) fn validate_identifiers(identifiers: &[String]) -> Result<(), VersionParserError> {
        identifiers
            .iter()
            .try_for_each(|identifier| Self::validate_identifier(identifier))
    }

    /// Metadata is a single identifier and, unlike a label, may not be empty
    pub(crate) fn validate_metadata(metadata: &str) -> Result<(), VersionParserError> {
        if metadata.is_empty() || !Self::is_valid_identifier(metadata) {
            return Err(VersionParserError::InvalidMetadata(metadata.to_string()));
        }
        Ok(())
    }
}

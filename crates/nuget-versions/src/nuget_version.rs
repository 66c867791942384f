//! Four-component NuGet version

use std::fmt;
use std::str::FromStr;

use crate::comparator::VersionRef;
use crate::semantic_version::SemanticVersion;
use crate::version_parser::{Grammar, VersionParser, VersionParserError};

/// A NuGet version: `X.Y.Z`, `X.Y.Z-alpha+metadata`, `W.X.Y.Z`, `W.X.Y.Z-alpha+metadata`.
///
/// Extends [`SemanticVersion`] with a `revision` between the patch number and
/// the prerelease section. A revision of 0 is not printed when the version is
/// formatted from its fields.
#[derive(Debug, Clone)]
pub struct NuGetVersion {
    version: SemanticVersion,
    revision: u64,
}

impl NuGetVersion {
    pub fn new(major: u64, minor: u64, patch: u64, revision: u64) -> Self {
        NuGetVersion {
            version: SemanticVersion::new(major, minor, patch),
            revision,
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

    pub fn with_metadata(mut self, metadata: &str) -> Result<Self, VersionParserError> {
        self.set_metadata(metadata)?;
        Ok(self)
    }

    /// Create an independent copy of any version.
    ///
    /// A [`SemanticVersion`] source gets revision 0. The copy never remembers
    /// the text the source was parsed from.
    pub fn copy_of<'a>(version: impl Into<VersionRef<'a>>) -> Self {
        let source = version.into();
        NuGetVersion {
            version: SemanticVersion::copy_of(source),
            revision: source.revision().unwrap_or(0),
        }
    }

    /// Parse a version with two to four numeric components
    pub fn parse(input: &str) -> Result<Self, VersionParserError> {
        let parsed = VersionParser::parse(input, Grammar::Extended)?;
        let revision = parsed.revision;
        Ok(NuGetVersion {
            version: SemanticVersion::from_parsed(parsed, input),
            revision,
        })
    }

    /// Parse a version with two to four numeric components, returning `None` for malformed input
    pub fn try_parse(input: &str) -> Option<Self> {
        match Self::parse(input) {
            Ok(version) => Some(version),
            Err(err) => {
                log::debug!("Rejected NuGet version {:?}: {}", input, err);
                None
            }
        }
    }

    pub fn major(&self) -> u64 {
        self.version.major()
    }

    pub fn minor(&self) -> u64 {
        self.version.minor()
    }

    pub fn patch(&self) -> u64 {
        self.version.patch()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn release_labels(&self) -> Option<&[String]> {
        self.version.release_labels()
    }

    pub fn metadata(&self) -> Option<&str> {
        self.version.metadata()
    }

    pub fn release(&self) -> Option<String> {
        self.version.release()
    }

    pub fn original_version(&self) -> Option<&str> {
        self.version.original_version()
    }

    pub fn is_prerelease(&self) -> bool {
        self.version.is_prerelease()
    }

    pub fn has_metadata(&self) -> bool {
        self.version.has_metadata()
    }

    pub fn set_major(&mut self, major: u64) {
        self.version.set_major(major);
    }

    pub fn set_minor(&mut self, minor: u64) {
        self.version.set_minor(minor);
    }

    pub fn set_patch(&mut self, patch: u64) {
        self.version.set_patch(patch);
    }

    pub fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
        self.version.forget_original();
    }

    pub fn set_release_labels<I, S>(&mut self, labels: I) -> Result<(), VersionParserError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version.set_release_labels(labels)
    }

    pub fn set_release(&mut self, release: &str) -> Result<(), VersionParserError> {
        self.version.set_release(release)
    }

    pub fn clear_release_labels(&mut self) {
        self.version.clear_release_labels();
    }

    pub fn set_metadata(&mut self, metadata: &str) -> Result<(), VersionParserError> {
        self.version.set_metadata(metadata)
    }

    pub fn clear_metadata(&mut self) {
        self.version.clear_metadata();
    }

    pub(crate) fn fields(&self) -> &SemanticVersion {
        &self.version
    }
}

impl From<&SemanticVersion> for NuGetVersion {
    fn from(version: &SemanticVersion) -> Self {
        NuGetVersion::copy_of(version)
    }
}

impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.version.write_to(f, self.revision)
    }
}

impl FromStr for NuGetVersion {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND_TRIP: [&str; 7] = [
        "1.2.3",
        "1.2.3.4",
        "5.6.7-label.9",
        "5.6.7.0-label.9",
        "5.6.7.8-label.9",
        "10.11.12+build13",
        "14.15.16.17-label18+build19",
    ];

    // 99 marks the component to be mutated
    const MUTATION_TESTS: [&str; 26] = [
        "99.2.3",
        "1.99.3",
        "1.2.99",
        "99.2.3.4",
        "1.99.3.4",
        "1.2.99.4",
        "1.2.3.99",
        "99.6.7-label.9",
        "5.99.7-label.9",
        "5.6.99-label.9",
        "5.6.7-label.99",
        "99.6.7.0-label.9",
        "5.99.7.0-label.9",
        "5.6.99.0-label.9",
        "5.6.7.99-label.9",
        "5.6.7.0-label.99",
        "99.11.12+build13",
        "10.99.12+build13",
        "10.11.99+build13",
        "10.11.12+build99",
        "99.15.16.17-label.18+build19",
        "14.99.16.17-label.18+build19",
        "14.15.99.17-label.18+build19",
        "14.15.16.99-label.18+build19",
        "14.15.16.17-label.99+build19",
        "14.15.16.17-label.18+build99",
    ];

    fn mutate(version: &mut NuGetVersion) {
        if version.major() == 99 {
            version.set_major(100);
        }
        if version.minor() == 99 {
            version.set_minor(100);
        }
        if version.patch() == 99 {
            version.set_patch(100);
        }
        if version.revision() == 99 {
            version.set_revision(100);
        }
        if let Some(labels) = version.release_labels() {
            if labels.len() >= 2 && labels[1] == "99" {
                let mut labels = labels.to_vec();
                labels[1] = "100".to_string();
                version.set_release_labels(labels).unwrap();
            }
        }
        if version.metadata() == Some("build99") {
            version.set_metadata("build100").unwrap();
        }
    }

    #[test]
    fn test_new() {
        let x = NuGetVersion::new(1, 2, 3, 0);
        let y = NuGetVersion::new(4, 5, 6, 7);
        let z = NuGetVersion::new(8, 9, 10, 11).with_release("label.12").unwrap();
        let w = NuGetVersion::new(13, 14, 15, 16).with_metadata("metadata17").unwrap();
        let v = NuGetVersion::new(18, 19, 20, 21)
            .with_release("label.22")
            .unwrap()
            .with_metadata("metadata23")
            .unwrap();

        assert_eq!((x.major(), x.minor(), x.patch(), x.revision()), (1, 2, 3, 0));
        assert_eq!(x.release_labels(), None);
        assert_eq!(x.metadata(), None);

        assert_eq!((y.major(), y.minor(), y.patch(), y.revision()), (4, 5, 6, 7));
        assert_eq!(y.release(), None);

        assert_eq!(z.revision(), 11);
        assert_eq!(z.release().as_deref(), Some("label.12"));
        assert_eq!(z.metadata(), None);

        assert_eq!(w.revision(), 16);
        assert_eq!(w.release(), None);
        assert_eq!(w.metadata(), Some("metadata17"));

        assert_eq!(v.revision(), 21);
        assert_eq!(v.release().as_deref(), Some("label.22"));
        assert_eq!(v.metadata(), Some("metadata23"));
        assert_eq!(v.to_string(), "18.19.20.21-label.22+metadata23");
    }

    #[test]
    fn test_assignments() {
        let mut x = NuGetVersion::new(1, 2, 3, 4)
            .with_release("test.5")
            .unwrap()
            .with_metadata("metadata6")
            .unwrap();

        x.set_major(7);
        x.set_minor(8);
        x.set_patch(9);
        x.set_revision(10);
        assert_eq!((x.major(), x.minor(), x.patch(), x.revision()), (7, 8, 9, 10));

        x.clear_release_labels();
        assert_eq!(x.release(), None);
        x.set_release_labels(["label", "11"]).unwrap();
        assert_eq!(x.release().as_deref(), Some("label.11"));

        x.clear_metadata();
        assert_eq!(x.metadata(), None);
        x.set_metadata("metadata12").unwrap();

        assert_eq!(x.to_string(), "7.8.9.10-label.11+metadata12");
    }

    #[test]
    fn test_parse() {
        let cases: [(&str, (u64, u64, u64, u64), Option<&str>, Option<&str>); 8] = [
            ("1.2", (1, 2, 0, 0), None, None),
            ("1.2.3", (1, 2, 3, 0), None, None),
            ("1.2.3.4", (1, 2, 3, 4), None, None),
            ("5.6.7-label.9", (5, 6, 7, 0), Some("label.9"), None),
            ("5.6.7.0-label.9", (5, 6, 7, 0), Some("label.9"), None),
            ("5.6.7.8-label.9", (5, 6, 7, 8), Some("label.9"), None),
            ("10.11.12+build13", (10, 11, 12, 0), None, Some("build13")),
            ("14.15.16.17-label18+build19", (14, 15, 16, 17), Some("label18"), Some("build19")),
        ];

        for (s, numbers, release, metadata) in cases {
            let parsed = NuGetVersion::parse(s).unwrap();
            assert_eq!(
                (parsed.major(), parsed.minor(), parsed.patch(), parsed.revision()),
                numbers,
                "{}",
                s
            );
            assert_eq!(parsed.release().as_deref(), release, "{}", s);
            let expected_labels: Option<Vec<String>> =
                release.map(|r| r.split('.').map(str::to_string).collect());
            assert_eq!(parsed.release_labels().map(<[String]>::to_vec), expected_labels, "{}", s);
            assert_eq!(parsed.metadata(), metadata, "{}", s);
            assert_eq!(parsed.original_version(), Some(s));

            let tolerant = NuGetVersion::try_parse(s).unwrap();
            assert_eq!(tolerant.original_version(), Some(s));
        }
    }

    #[test]
    fn test_parse_fail() {
        let bad = [
            "",
            "*",
            "x",
            "1",
            "1.2.3.4.5",
            "1.2.3-test*5",
            "1.2.3+build*32",
            "1.2.3+build.4",
            "-test.1",
            "+build.2",
        ];

        for s in bad {
            assert!(NuGetVersion::parse(s).is_err(), "{:?} should not parse", s);
            assert!(NuGetVersion::try_parse(s).is_none(), "{:?} should not parse", s);
        }
    }

    #[test]
    fn test_original_version() {
        for s in ROUND_TRIP {
            assert_eq!(NuGetVersion::parse(s).unwrap().original_version(), Some(s));
            assert_eq!(NuGetVersion::parse(s).unwrap().to_string(), s);
        }

        // "5.6.7.0-label.9" loses its zero revision when rebuilt from fields
        assert!(ROUND_TRIP
            .iter()
            .any(|s| NuGetVersion::copy_of(&NuGetVersion::parse(s).unwrap()).to_string() != *s));
    }

    #[test]
    fn test_original_version_after_mutation() {
        for s in MUTATION_TESTS {
            let mut version = NuGetVersion::parse(s).unwrap();
            assert!(version.original_version().is_some());
            mutate(&mut version);
            assert_eq!(version.original_version(), None, "{}", s);
        }
    }

    #[test]
    fn test_to_string_after_mutation() {
        for s in MUTATION_TESTS {
            let mut version = NuGetVersion::parse(s).unwrap();
            let mut copy = NuGetVersion::copy_of(&version);
            assert_eq!(copy.original_version(), None);

            mutate(&mut version);
            mutate(&mut copy);

            assert_eq!(copy.to_string(), version.to_string());
            assert!(!version.to_string().contains("99"), "{}", version);
        }
    }

    #[test]
    fn test_copy_of_semantic_version() {
        let x = SemanticVersion::parse("1.2.3-pre.4+build-5").unwrap();
        let y = NuGetVersion::copy_of(&x);

        assert_eq!((y.major(), y.minor(), y.patch()), (x.major(), x.minor(), x.patch()));
        assert_eq!(y.release_labels(), x.release_labels());
        assert_eq!(y.release(), x.release());
        assert_eq!(y.metadata(), x.metadata());
        assert_eq!(y.revision(), 0);

        let z: NuGetVersion = (&x).into();
        assert_eq!(z.to_string(), "1.2.3-pre.4+build-5");
    }

    #[test]
    fn test_copy_of_nuget_version() {
        let x = NuGetVersion::parse("1.2.3.6-pre.4+build-5").unwrap();
        let y = NuGetVersion::copy_of(&x);

        assert_eq!((y.major(), y.minor(), y.patch(), y.revision()), (1, 2, 3, 6));
        assert_eq!(y.release_labels(), x.release_labels());
        assert_eq!(y.metadata(), x.metadata());
        assert_eq!(y.original_version(), None);
        assert_eq!(y.to_string(), "1.2.3.6-pre.4+build-5");
    }

    #[test]
    fn test_zero_revision_is_not_printed() {
        let mut x = NuGetVersion::parse("5.6.7.0-label.9").unwrap();
        x.set_metadata("meta").unwrap();
        assert_eq!(x.to_string(), "5.6.7-label.9+meta");
    }
}

//! Version comparison

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

use crate::nuget_version::NuGetVersion;
use crate::semantic_version::SemanticVersion;

lazy_static! {
    static ref NUMERIC_LABEL_RE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
}

/// Borrowed view over either kind of version
#[derive(Debug, Clone, Copy)]
pub enum VersionRef<'a> {
    /// Strict version, no revision concept
    Strict(&'a SemanticVersion),
    /// NuGet version, revision may be 0
    Extended(&'a NuGetVersion),
}

impl<'a> VersionRef<'a> {
    pub(crate) fn fields(&self) -> &'a SemanticVersion {
        match *self {
            VersionRef::Strict(version) => version,
            VersionRef::Extended(version) => version.fields(),
        }
    }

    /// `None` for strict versions
    pub fn revision(&self) -> Option<u64> {
        match self {
            VersionRef::Strict(_) => None,
            VersionRef::Extended(version) => Some(version.revision()),
        }
    }

    fn is_same(&self, other: &VersionRef<'_>) -> bool {
        match (self, other) {
            (VersionRef::Strict(a), VersionRef::Strict(b)) => std::ptr::eq(*a, *b),
            (VersionRef::Extended(a), VersionRef::Extended(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl<'a> From<&'a SemanticVersion> for VersionRef<'a> {
    fn from(version: &'a SemanticVersion) -> Self {
        VersionRef::Strict(version)
    }
}

impl<'a> From<&'a NuGetVersion> for VersionRef<'a> {
    fn from(version: &'a NuGetVersion) -> Self {
        VersionRef::Extended(version)
    }
}

/// Total ordering across [`SemanticVersion`] and [`NuGetVersion`]
pub struct VersionComparer;

impl VersionComparer {
    /// Compare two versions of either kind
    pub fn compare<'a, 'b>(a: impl Into<VersionRef<'a>>, b: impl Into<VersionRef<'b>>) -> Ordering {
        Self::compare_opt(Some(a.into()), Some(b.into()))
    }

    /// Compare two possibly absent versions. An absent version sorts first.
    pub fn compare_opt(a: Option<VersionRef<'_>>, b: Option<VersionRef<'_>>) -> Ordering {
        let (a, b) = match (a, b) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(a), Some(b)) => (a, b),
        };

        if a.is_same(&b) {
            return Ordering::Equal;
        }

        let (x, y) = (a.fields(), b.fields());

        x.major()
            .cmp(&y.major())
            .then_with(|| x.minor().cmp(&y.minor()))
            .then_with(|| x.patch().cmp(&y.patch()))
            .then_with(|| compare_revisions(a.revision(), b.revision()))
            .then_with(|| {
                compare_release_labels(
                    x.release_labels().unwrap_or_default(),
                    y.release_labels().unwrap_or_default(),
                )
            })
            // Metadata breaks ties, so versions differing only in metadata are not equal
            .then_with(|| {
                compare_ignore_case(x.metadata().unwrap_or_default(), y.metadata().unwrap_or_default())
            })
    }

    /// Check if a > b
    pub fn greater_than<'a, 'b>(a: impl Into<VersionRef<'a>>, b: impl Into<VersionRef<'b>>) -> bool {
        Self::compare(a, b) == Ordering::Greater
    }

    /// Check if a < b
    pub fn less_than<'a, 'b>(a: impl Into<VersionRef<'a>>, b: impl Into<VersionRef<'b>>) -> bool {
        Self::compare(a, b) == Ordering::Less
    }

    /// Check if a == b
    pub fn equal_to<'a, 'b>(a: impl Into<VersionRef<'a>>, b: impl Into<VersionRef<'b>>) -> bool {
        Self::compare(a, b) == Ordering::Equal
    }
}

/// A strict version counts as revision 0 against a NuGet version
fn compare_revisions(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(a), None) if a > 0 => Ordering::Greater,
        (None, Some(b)) if b > 0 => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// The side that runs out of labels first has the higher precedence
fn compare_release_labels(a: &[String], b: &[String]) -> Ordering {
    let count = a.len().max(b.len());

    for i in 0..count {
        let (a_label, b_label) = match (a.get(i), b.get(i)) {
            (None, _) => return Ordering::Greater,
            (_, None) => return Ordering::Less,
            (Some(a_label), Some(b_label)) => (a_label, b_label),
        };

        let result = compare_label(a_label, b_label);
        if result != Ordering::Equal {
            return result;
        }
    }

    Ordering::Equal
}

fn compare_label(a: &str, b: &str) -> Ordering {
    let a_numeric = NUMERIC_LABEL_RE.is_match(a);
    let b_numeric = NUMERIC_LABEL_RE.is_match(b);

    match (a_numeric, b_numeric) {
        // "01" and "1" are numerically equal and fall back to text
        (true, true) => compare_numeric(a, b).then_with(|| compare_ignore_case(a, b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => compare_ignore_case(a, b),
    }
}

/// Compare base-10 integers of any length
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let (a_negative, a_digits) = split_sign(a);
    let (b_negative, b_digits) = split_sign(b);

    match (a_negative, b_negative) {
        (false, false) => compare_magnitude(a_digits, b_digits),
        (true, true) => compare_magnitude(b_digits, a_digits),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    }
}

fn split_sign(label: &str) -> (bool, &str) {
    let (negative, digits) = match label.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, label),
    };
    let digits = digits.trim_start_matches('0');

    // -0 is 0
    (negative && !digits.is_empty(), digits)
}

fn compare_magnitude(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        VersionComparer::equal_to(self, other)
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionComparer::compare(self, other)
    }
}

impl PartialEq for NuGetVersion {
    fn eq(&self, other: &Self) -> bool {
        VersionComparer::equal_to(self, other)
    }
}

impl Eq for NuGetVersion {}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionComparer::compare(self, other)
    }
}

impl PartialEq<NuGetVersion> for SemanticVersion {
    fn eq(&self, other: &NuGetVersion) -> bool {
        VersionComparer::equal_to(self, other)
    }
}

impl PartialEq<SemanticVersion> for NuGetVersion {
    fn eq(&self, other: &SemanticVersion) -> bool {
        VersionComparer::equal_to(self, other)
    }
}

impl PartialOrd<NuGetVersion> for SemanticVersion {
    fn partial_cmp(&self, other: &NuGetVersion) -> Option<Ordering> {
        Some(VersionComparer::compare(self, other))
    }
}

impl PartialOrd<SemanticVersion> for NuGetVersion {
    fn partial_cmp(&self, other: &SemanticVersion) -> Option<Ordering> {
        Some(VersionComparer::compare(self, other))
    }
}

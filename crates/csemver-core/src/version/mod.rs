//! Generic SemVer version value
//!
//! [`SVersion`] is the loose, immutable `major.minor.patch[-prerelease][+build]`
//! value every other component builds on. It carries a legacy fourth
//! component when one was present in the input (noted, then ignored by
//! ordering and by everything downstream), and orders by SemVer precedence:
//! build metadata and the fourth part never participate in comparisons.

mod parse;
mod quality;

pub use quality::PackageQuality;

pub(crate) use parse::{is_ident_char, scan_number};

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An immutable, validated Semantic Versioning value.
///
/// Equality and ordering follow SemVer precedence rules: `(major, minor,
/// patch)` numerically, then "no prerelease" above any prerelease, then
/// prerelease identifiers compared segment by segment (numeric segments
/// numerically and below alphanumeric ones). Build metadata and the legacy
/// fourth part are carried but ignored by comparisons.
#[derive(Debug, Clone)]
pub struct SVersion {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: String,
    build: String,
    fourth_part: Option<u64>,
}

impl SVersion {
    /// Creates a release version (no prerelease, no build metadata).
    pub fn new(major: u64, minor: u64, patch: u64) -> SVersion {
        SVersion {
            major,
            minor,
            patch,
            prerelease: String::new(),
            build: String::new(),
            fourth_part: None,
        }
    }

    pub(crate) fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: String,
        build: String,
        fourth_part: Option<u64>,
    ) -> SVersion {
        SVersion {
            major,
            minor,
            patch,
            prerelease,
            build,
            fourth_part,
        }
    }

    /// The synthetic lowest version, `0.0.0-0`.
    ///
    /// No valid version compares below it; it anchors
    /// [`SVersionBound::all`](crate::bound::SVersionBound::all) and the
    /// upper-bound-only range approximations.
    pub fn zero() -> SVersion {
        SVersion {
            major: 0,
            minor: 0,
            patch: 0,
            prerelease: "0".to_string(),
            build: String::new(),
            fourth_part: None,
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

    /// The prerelease label without the leading `-`, empty for a release.
    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    /// The build metadata without the leading `+`, empty when absent.
    pub fn build(&self) -> &str {
        &self.build
    }

    /// The legacy fourth component, when the parsed input had one.
    pub fn fourth_part(&self) -> Option<u64> {
        self.fourth_part
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Quality tier of this version; see [`PackageQuality::of`].
    pub fn quality(&self) -> PackageQuality {
        PackageQuality::of(self)
    }

    /// Returns this version with the legacy fourth component discarded.
    pub fn without_fourth_part(mut self) -> SVersion {
        self.fourth_part = None;
        self
    }

    /// Returns this version with the given build metadata, or stripped
    /// when `metadata` is `None`. Never affects ordering.
    pub fn with_build_metadata(mut self, metadata: Option<&str>) -> Result<SVersion> {
        match metadata {
            None => self.build.clear(),
            Some(m) => {
                if !is_valid_build_metadata(m) {
                    return Err(Error::InvalidBuildMetadata {
                        metadata: m.to_string(),
                    });
                }
                self.build = m.to_string();
            }
        }
        Ok(self)
    }
}

pub(crate) fn is_valid_build_metadata(m: &str) -> bool {
    !m.is_empty()
        && m.split('.')
            .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'))
}

/// SemVer precedence comparison of two prerelease labels.
///
/// An empty label (a release) compares above any non-empty one.
pub(crate) fn prerelease_cmp(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let mut left = a.split('.');
            let mut right = b.split('.');
            loop {
                match (left.next(), right.next()) {
                    (None, None) => return Ordering::Equal,
                    (None, Some(_)) => return Ordering::Less,
                    (Some(_), None) => return Ordering::Greater,
                    (Some(l), Some(r)) => {
                        let ord = identifier_cmp(l, r);
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                }
            }
        }
    }
}

fn identifier_cmp(l: &str, r: &str) -> Ordering {
    let l_num = l.bytes().all(|b| b.is_ascii_digit());
    let r_num = r.bytes().all(|b| b.is_ascii_digit());
    match (l_num, r_num) {
        // Numeric identifiers sort below alphanumeric ones.
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => {
            let ln: u64 = l.parse().unwrap_or(u64::MAX);
            let rn: u64 = r.parse().unwrap_or(u64::MAX);
            ln.cmp(&rn)
        }
        (false, false) => l.cmp(r),
    }
}

impl Ord for SVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| prerelease_cmp(&self.prerelease, &other.prerelease))
    }
}

impl PartialOrd for SVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SVersion {}

impl fmt::Display for SVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(fourth) = self.fourth_part {
            write!(f, ".{}", fourth)?;
        }
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl FromStr for SVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<SVersion> {
        SVersion::parse(s)
    }
}

impl Serialize for SVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SVersion::parse(&s).map_err(serde::de::Error::custom)
    }
}

//! Quality tier classification
//!
//! Maps a version to its release maturity. The order is total and
//! ascending: a bound with `min_quality = Preview` accepts `Preview`,
//! `ReleaseCandidate` and `Stable` versions.

use super::SVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered release-maturity tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PackageQuality {
    /// Anything whose prerelease label is not a recognized CSemVer stage.
    CI,
    /// Early stages: alpha through kappa.
    Exploratory,
    /// The `preview` stage.
    Preview,
    /// The `rc` stage.
    ReleaseCandidate,
    /// A release, no prerelease label at all.
    Stable,
}

impl PackageQuality {
    /// Classifies a version.
    ///
    /// A release is `Stable`; a prerelease whose label parses under the
    /// CSemVer stage grammar maps to its stage's tier; any other prerelease
    /// label (free-text SemVer) is `CI`.
    pub fn of(version: &SVersion) -> PackageQuality {
        if !version.is_prerelease() {
            return PackageQuality::Stable;
        }
        match crate::csver::CSPrerelease::parse(version.prerelease()) {
            Some(prerelease) => prerelease.stage().quality(),
            None => PackageQuality::CI,
        }
    }

    /// True when a version of quality `candidate` meets this minimum.
    pub fn accepts(self, candidate: PackageQuality) -> bool {
        candidate >= self
    }

    /// Case-insensitive keyword parsing, with the `Release`/`RC` synonyms
    /// the native bound syntax accepts.
    pub fn from_keyword(keyword: &str) -> Option<PackageQuality> {
        match keyword.to_ascii_lowercase().as_str() {
            "ci" => Some(PackageQuality::CI),
            "exploratory" => Some(PackageQuality::Exploratory),
            "preview" => Some(PackageQuality::Preview),
            "releasecandidate" | "rc" => Some(PackageQuality::ReleaseCandidate),
            "stable" | "release" => Some(PackageQuality::Stable),
            _ => None,
        }
    }
}

impl fmt::Display for PackageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageQuality::CI => "CI",
            PackageQuality::Exploratory => "Exploratory",
            PackageQuality::Preview => "Preview",
            PackageQuality::ReleaseCandidate => "ReleaseCandidate",
            PackageQuality::Stable => "Stable",
        };
        f.write_str(name)
    }
}

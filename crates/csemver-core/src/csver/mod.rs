//! CSemVer versions: the constrained grammar and its ordinal codec
//!
//! A [`CSVersion`] is a refinement of [`SVersion`] whose prerelease, when
//! present, is one of eight named stages with two bounded numeric
//! sub-levels. That constraint is what makes the version space dense: every
//! `CSVersion` encodes to a unique `u64` ordinal, consecutive ordinals are
//! consecutive meaningful versions, and the successor engine is plain
//! arithmetic over that space.

mod format;
mod ordinal;
mod successors;

pub use ordinal::{
    FileVersion, MAX_MAJOR, MAX_MINOR, MAX_PATCH, MAX_PRERELEASE_FIX, MAX_PRERELEASE_NUMBER,
    VERY_FIRST_ORDINAL, VERY_LAST_ORDINAL,
};

use crate::error::{Error, Result};
use crate::version::{is_valid_build_metadata, PackageQuality, SVersion};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The ordered list of standard prerelease stage names.
///
/// The names are fixed so that their ASCII order equals their stage order;
/// ordinal monotonicity of rendered strings depends on this. All slot-count
/// constants derive from `Stage::ALL.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Alpha,
    Beta,
    Delta,
    Epsilon,
    Gamma,
    Kappa,
    Preview,
    Rc,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Alpha,
        Stage::Beta,
        Stage::Delta,
        Stage::Epsilon,
        Stage::Gamma,
        Stage::Kappa,
        Stage::Preview,
        Stage::Rc,
    ];

    /// Position in the stage order, 0-based.
    pub fn index(self) -> u64 {
        self as u64
    }

    /// The lexicographically first stage, `alpha`.
    pub fn first() -> Stage {
        Stage::ALL[0]
    }

    /// The stage after this one, `None` for `rc`.
    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(self.index() as usize + 1).copied()
    }

    /// Every stage strictly after this one, in order.
    pub fn later(self) -> &'static [Stage] {
        &Stage::ALL[self.index() as usize + 1..]
    }

    /// Full long-form name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Alpha => "alpha",
            Stage::Beta => "beta",
            Stage::Delta => "delta",
            Stage::Epsilon => "epsilon",
            Stage::Gamma => "gamma",
            Stage::Kappa => "kappa",
            Stage::Preview => "preview",
            Stage::Rc => "rc",
        }
    }

    /// Single-letter short-form code.
    pub fn letter(self) -> char {
        match self {
            Stage::Alpha => 'a',
            Stage::Beta => 'b',
            Stage::Delta => 'd',
            Stage::Epsilon => 'e',
            Stage::Gamma => 'g',
            Stage::Kappa => 'k',
            Stage::Preview => 'p',
            Stage::Rc => 'r',
        }
    }

    pub fn from_name(name: &str) -> Option<Stage> {
        Stage::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn from_letter(letter: char) -> Option<Stage> {
        let lower = letter.to_ascii_lowercase();
        Stage::ALL.iter().copied().find(|s| s.letter() == lower)
    }

    /// The quality tier versions in this stage classify as.
    pub fn quality(self) -> PackageQuality {
        match self {
            Stage::Rc => PackageQuality::ReleaseCandidate,
            Stage::Preview => PackageQuality::Preview,
            _ => PackageQuality::Exploratory,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A CSemVer prerelease: a stage plus two numeric sub-levels in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CSPrerelease {
    stage: Stage,
    number: u8,
    fix: u8,
}

impl CSPrerelease {
    pub fn new(stage: Stage, number: u8, fix: u8) -> Result<CSPrerelease> {
        if number > MAX_PRERELEASE_NUMBER || fix > MAX_PRERELEASE_FIX {
            return Err(Error::not_csemver(format!(
                "prerelease number/fix out of range: {}.{}",
                number, fix
            )));
        }
        Ok(CSPrerelease { stage, number, fix })
    }

    pub(crate) fn unchecked(stage: Stage, number: u8, fix: u8) -> CSPrerelease {
        debug_assert!(number <= MAX_PRERELEASE_NUMBER && fix <= MAX_PRERELEASE_FIX);
        CSPrerelease { stage, number, fix }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn fix(&self) -> u8 {
        self.fix
    }
}

/// A CSemVer version: fixed-width `major.minor.patch` plus an optional
/// [`CSPrerelease`], totally ordered by its ordinal.
///
/// Two textual projections exist for the same value: the long form
/// (`1.2.3-alpha.1.23`) and the normalized short form (`1.2.3-a01-23`).
/// The projection in use is carried as a display preference and never
/// affects the ordinal, equality or ordering. Build metadata is carried
/// through both forms and is equally order-neutral.
#[derive(Debug, Clone)]
pub struct CSVersion {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<CSPrerelease>,
    build: String,
    long_form: bool,
}

impl CSVersion {
    /// Creates a release version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Result<CSVersion> {
        CSVersion::with_prerelease(major, minor, patch, None)
    }

    /// Creates a version with an optional prerelease.
    pub fn with_prerelease(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Option<CSPrerelease>,
    ) -> Result<CSVersion> {
        if major > MAX_MAJOR || minor > MAX_MINOR || patch > MAX_PATCH {
            return Err(Error::not_csemver(format!(
                "{}.{}.{} exceeds the fixed digit widths ({}.{}.{})",
                major, minor, patch, MAX_MAJOR, MAX_MINOR, MAX_PATCH
            )));
        }
        Ok(CSVersion {
            major,
            minor,
            patch,
            prerelease,
            build: String::new(),
            long_form: true,
        })
    }

    pub(crate) fn unchecked(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Option<CSPrerelease>,
    ) -> CSVersion {
        CSVersion {
            major,
            minor,
            patch,
            prerelease,
            build: String::new(),
            long_form: true,
        }
    }

    /// `0.0.0-alpha`, the version ordinal 1 decodes to.
    pub fn very_first() -> CSVersion {
        CSVersion::unchecked(0, 0, 0, Some(CSPrerelease::unchecked(Stage::first(), 0, 0)))
    }

    /// The maximum representable release, `99999.49999.9999`.
    pub fn very_last() -> CSVersion {
        CSVersion::unchecked(MAX_MAJOR, MAX_MINOR, MAX_PATCH, None)
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

    pub fn prerelease(&self) -> Option<&CSPrerelease> {
        self.prerelease.as_ref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    /// True when this value displays in long form (`alpha.1.23` rather
    /// than `a01-23`).
    pub fn is_long_form(&self) -> bool {
        self.long_form
    }

    pub fn quality(&self) -> PackageQuality {
        match &self.prerelease {
            None => PackageQuality::Stable,
            Some(p) => p.stage().quality(),
        }
    }

    /// Projects back into the loose version type, keeping the current
    /// textual form of the prerelease and the build metadata.
    pub fn to_sversion(&self) -> SVersion {
        SVersion::from_parts(
            self.major,
            self.minor,
            self.patch,
            self.prerelease_label(),
            self.build.clone(),
            None,
        )
    }

    /// Returns this version with the given build metadata, or stripped when
    /// `None`. The ordinal is unchanged either way.
    pub fn with_build_metadata(mut self, metadata: Option<&str>) -> Result<CSVersion> {
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

    pub(crate) fn set_long_form(mut self, long_form: bool) -> CSVersion {
        self.long_form = long_form;
        self
    }
}

impl TryFrom<&SVersion> for CSVersion {
    type Error = Error;

    /// Refines a generic version into the CSemVer grammar.
    ///
    /// Fails for 4-component inputs (valid only for the loose type), for
    /// numbers above the fixed digit widths, and for prerelease labels
    /// outside the stage grammar.
    fn try_from(version: &SVersion) -> Result<CSVersion> {
        if version.fourth_part().is_some() {
            return Err(Error::not_csemver(
                "4-component versions are not CSemVer versions",
            ));
        }
        let (prerelease, long_form) = match version.prerelease() {
            "" => (None, true),
            label => {
                let (prerelease, long_form) = format::parse_prerelease(label)
                    .ok_or_else(|| {
                        Error::not_csemver(format!("prerelease {:?} is not a CSemVer stage", label))
                    })?;
                (Some(prerelease), long_form)
            }
        };
        let parsed = CSVersion::with_prerelease(
            version.major(),
            version.minor(),
            version.patch(),
            prerelease,
        )?;
        parsed
            .set_long_form(long_form)
            .with_build_metadata(match version.build() {
                "" => None,
                build => Some(build),
            })
    }
}

impl Ord for CSVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for CSVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CSVersion {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal() == other.ordinal()
    }
}

impl Eq for CSVersion {}

impl std::hash::Hash for CSVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ordinal().hash(state);
    }
}

impl FromStr for CSVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<CSVersion> {
        CSVersion::parse(s)
    }
}

impl Serialize for CSVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CSVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CSVersion::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_matches_ascii_order() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0].name() < pair[1].name());
            assert!(pair[0].letter() < pair[1].letter());
        }
    }

    #[test]
    fn test_stage_round_trips() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_name(stage.name()), Some(stage));
            assert_eq!(Stage::from_letter(stage.letter()), Some(stage));
        }
        assert_eq!(Stage::from_name("ALPHA"), Some(Stage::Alpha));
        assert_eq!(Stage::from_name("nightly"), None);
    }

    #[test]
    fn test_refinement_rejects_fourth_part() {
        let sv = SVersion::parse("1.2.3.4").unwrap();
        assert!(CSVersion::try_from(&sv).is_err());
    }

    #[test]
    fn test_refinement_rejects_free_text_prerelease() {
        let sv = SVersion::parse("1.2.3-nightly.1").unwrap();
        assert!(CSVersion::try_from(&sv).is_err());
        // Still a perfectly good SVersion.
        assert!(sv.is_prerelease());
    }

    #[test]
    fn test_refinement_rejects_wide_numbers() {
        assert!(CSVersion::new(100_000, 0, 0).is_err());
        assert!(CSVersion::new(0, 50_000, 0).is_err());
        assert!(CSVersion::new(0, 0, 10_000).is_err());
        assert!(CSVersion::new(MAX_MAJOR, MAX_MINOR, MAX_PATCH).is_ok());
    }

    #[test]
    fn test_equality_ignores_form_and_build() {
        let long = CSVersion::parse("1.2.3-beta.2").unwrap();
        let short = CSVersion::parse("1.2.3-b02").unwrap();
        assert_eq!(long, short);
        assert!(long.is_long_form());
        assert!(!short.is_long_form());
        let built = long.clone().with_build_metadata(Some("ci.7")).unwrap();
        assert_eq!(long, built);
    }
}

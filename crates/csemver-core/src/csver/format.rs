//! Long and short textual projections
//!
//! The long form spells the stage name with dot-separated sub-levels
//! (`1.2.3-alpha.1.23`); the normalized short form packs the same value
//! into a single compact identifier (`1.2.3-a01-23`) that stays under
//! foreign package-manager label limits and keeps ASCII ordering aligned
//! with ordinal ordering (hence the fixed two-digit zero padding).
//! Switching forms is a pure string projection: the ordinal never moves.

use super::{CSPrerelease, CSVersion, Stage, MAX_PRERELEASE_FIX, MAX_PRERELEASE_NUMBER};
use crate::error::Result;
use crate::version::SVersion;
use std::fmt;

impl CSPrerelease {
    /// Parses a prerelease label in either form, `None` when the label is
    /// valid SemVer but outside the CSemVer stage grammar.
    pub fn parse(label: &str) -> Option<CSPrerelease> {
        parse_prerelease(label).map(|(prerelease, _)| prerelease)
    }
}

/// Parses a prerelease label, also reporting whether it was long form.
pub(super) fn parse_prerelease(label: &str) -> Option<(CSPrerelease, bool)> {
    parse_long(label)
        .map(|p| (p, true))
        .or_else(|| parse_short(label).map(|p| (p, false)))
}

fn parse_long(label: &str) -> Option<CSPrerelease> {
    let mut parts = label.split('.');
    let stage = Stage::from_name(parts.next()?)?;
    let number = match parts.next() {
        None => return Some(CSPrerelease::unchecked(stage, 0, 0)),
        Some(part) => parse_level(part, MAX_PRERELEASE_NUMBER)?,
    };
    let fix = match parts.next() {
        None => 0,
        Some(part) => parse_level(part, MAX_PRERELEASE_FIX)?,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(CSPrerelease::unchecked(stage, number, fix))
}

fn parse_short(label: &str) -> Option<CSPrerelease> {
    let mut chars = label.chars();
    let stage = Stage::from_letter(chars.next()?)?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some(CSPrerelease::unchecked(stage, 0, 0));
    }
    let (number_part, fix_part) = match rest.split_once('-') {
        None => (rest, None),
        Some((number, fix)) => (number, Some(fix)),
    };
    let number = parse_level(number_part, MAX_PRERELEASE_NUMBER)?;
    let fix = match fix_part {
        None => 0,
        Some(part) => parse_level(part, MAX_PRERELEASE_FIX)?,
    };
    Some(CSPrerelease::unchecked(stage, number, fix))
}

fn parse_level(part: &str, max: u8) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u16 = part.parse().ok()?;
    if value > u16::from(max) {
        None
    } else {
        Some(value as u8)
    }
}

fn long_label(p: &CSPrerelease) -> String {
    match (p.number(), p.fix()) {
        (0, 0) => p.stage().name().to_string(),
        (n, 0) => format!("{}.{}", p.stage().name(), n),
        (n, f) => format!("{}.{}.{}", p.stage().name(), n, f),
    }
}

fn short_label(p: &CSPrerelease) -> String {
    match (p.number(), p.fix()) {
        (0, 0) => p.stage().letter().to_string(),
        (n, 0) => format!("{}{:02}", p.stage().letter(), n),
        (n, f) => format!("{}{:02}-{:02}", p.stage().letter(), n, f),
    }
}

impl CSVersion {
    /// Parses a version string in either prerelease form.
    pub fn parse(text: &str) -> Result<CSVersion> {
        let version = SVersion::parse(text)?;
        CSVersion::try_from(&version)
    }

    /// Parses a version string, `None` on any failure.
    pub fn try_parse(text: &str) -> Option<CSVersion> {
        CSVersion::parse(text).ok()
    }

    /// The prerelease label in the currently selected form, empty for a
    /// release.
    pub(crate) fn prerelease_label(&self) -> String {
        match self.prerelease() {
            None => String::new(),
            Some(p) => {
                if self.is_long_form() {
                    long_label(p)
                } else {
                    short_label(p)
                }
            }
        }
    }

    /// This version displaying its prerelease in long form.
    pub fn to_long_form(self) -> CSVersion {
        self.set_long_form(true)
    }

    /// This version displaying its prerelease in the normalized short form.
    pub fn to_normalized_form(self) -> CSVersion {
        self.set_long_form(false)
    }

    /// Renders the long form regardless of the current display preference.
    pub fn to_long_string(&self) -> String {
        self.clone().to_long_form().to_string()
    }

    /// Renders the normalized short form regardless of the current display
    /// preference.
    pub fn to_normalized_string(&self) -> String {
        self.clone().to_normalized_form().to_string()
    }
}

impl fmt::Display for CSVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())?;
        let label = self.prerelease_label();
        if !label.is_empty() {
            write!(f, "-{}", label)?;
        }
        if !self.build().is_empty() {
            write!(f, "+{}", self.build())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form_parsing() {
        let v = CSVersion::parse("1.2.3-alpha.1.23").unwrap();
        let p = v.prerelease().unwrap();
        assert_eq!((p.stage(), p.number(), p.fix()), (Stage::Alpha, 1, 23));
        assert!(v.is_long_form());
    }

    #[test]
    fn test_short_form_parsing() {
        for (text, stage, number, fix) in [
            ("1.2.3-a", Stage::Alpha, 0, 0),
            ("1.2.3-b03", Stage::Beta, 3, 0),
            ("1.2.3-r04-12", Stage::Rc, 4, 12),
            ("1.2.3-p1", Stage::Preview, 1, 0),
        ] {
            let v = CSVersion::parse(text).unwrap();
            let p = v.prerelease().unwrap();
            assert_eq!((p.stage(), p.number(), p.fix()), (stage, number, fix), "{}", text);
            assert!(!v.is_long_form(), "{}", text);
        }
    }

    #[test]
    fn test_zero_number_with_fix() {
        let v = CSVersion::parse("1.2.3-alpha.0.5").unwrap();
        let p = v.prerelease().unwrap();
        assert_eq!((p.number(), p.fix()), (0, 5));
        assert_eq!(v.to_string(), "1.2.3-alpha.0.5");
        assert_eq!(v.to_normalized_string(), "1.2.3-a00-05");
    }

    #[test]
    fn test_rejects_out_of_grammar_labels() {
        for text in [
            "1.2.3-alpha.100",
            "1.2.3-alpha.1.2.3",
            "1.2.3-a1-2-3",
            "1.2.3-z01",
            "1.2.3-alpha.x",
            "1.2.3-r-1",
        ] {
            assert!(CSVersion::parse(text).is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_form_projection_preserves_ordinal() {
        let v = CSVersion::parse("1.2.3-beta.2.1").unwrap();
        let short = v.clone().to_normalized_form();
        assert_eq!(short.to_string(), "1.2.3-b02-01");
        assert_eq!(short.ordinal(), v.ordinal());
        let back = short.to_long_form();
        assert_eq!(back.to_string(), "1.2.3-beta.2.1");
        assert_eq!(back.ordinal(), v.ordinal());
    }

    #[test]
    fn test_form_conversion_idempotent() {
        let v = CSVersion::parse("1.2.3-gamma.7").unwrap();
        let once = v.clone().to_normalized_form();
        let twice = once.clone().to_normalized_form();
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn test_build_metadata_carried_through_forms() {
        let v = CSVersion::parse("1.2.3-beta.2+ci.42").unwrap();
        assert_eq!(v.to_normalized_string(), "1.2.3-b02+ci.42");
        let stripped = v.clone().with_build_metadata(None).unwrap();
        assert_eq!(stripped.ordinal(), v.ordinal());
        assert_eq!(stripped.to_string(), "1.2.3-beta.2");
    }

    #[test]
    fn test_short_label_fits_foreign_label_limits() {
        // Worst case short label: letter + 2 digits + '-' + 2 digits.
        let v = CSVersion::parse("99999.49999.9999-rc.99.99").unwrap();
        let label = v.to_normalized_form().prerelease_label();
        assert_eq!(label, "r99-99");
        assert!(label.len() <= 20);
    }
}

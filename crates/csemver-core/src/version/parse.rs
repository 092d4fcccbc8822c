//! Version string parsing
//!
//! Besides the strict full-string parser, this module exposes a
//! prefix parser that reports how many bytes it consumed, so the
//! range-syntax bridges can pull a version out of a longer expression
//! (`">=1.2.3 <2.0.0"`, `"[1.2.3,)"`, ...) and keep going.

use super::SVersion;
use crate::error::{Error, Result};

/// True for characters allowed inside prerelease and build labels.
pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'.'
}

/// Scans a decimal number at the start of `text`.
///
/// Returns the value and the number of bytes consumed, or `None` when
/// `text` does not start with a digit or the number overflows `u64`.
pub(crate) fn scan_number(text: &str) -> Option<(u64, usize)> {
    let bytes = text.as_bytes();
    let mut value: u64 = 0;
    let mut len = 0;
    while len < bytes.len() && bytes[len].is_ascii_digit() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(bytes[len] - b'0'))?;
        len += 1;
    }
    if len == 0 {
        None
    } else {
        Some((value, len))
    }
}

fn scan_label(text: &str) -> usize {
    text.bytes().take_while(|&b| is_ident_char(b)).count()
}

fn validate_label(label: &str, what: &str) -> Result<()> {
    if label.split('.').any(|seg| seg.is_empty()) {
        return Err(Error::invalid_version(format!(
            "empty identifier in {} {:?}",
            what, label
        )));
    }
    Ok(())
}

impl SVersion {
    /// Parses a full version string, failing on any trailing input.
    ///
    /// A leading `v` or `V` is tolerated; a legacy fourth numeric component
    /// is accepted and recorded in [`SVersion::fourth_part`].
    pub fn parse(text: &str) -> Result<SVersion> {
        let trimmed = text.trim();
        let (version, consumed) = SVersion::parse_prefix(trimmed)?;
        if consumed != trimmed.len() {
            return Err(Error::invalid_version(format!(
                "unexpected trailing input {:?}",
                &trimmed[consumed..]
            )));
        }
        Ok(version)
    }

    /// Parses a full version string, `None` on any failure.
    pub fn try_parse(text: &str) -> Option<SVersion> {
        SVersion::parse(text).ok()
    }

    /// Parses the longest version at the start of `text`.
    ///
    /// Returns the version and the matched prefix length in bytes.
    pub fn parse_prefix(text: &str) -> Result<(SVersion, usize)> {
        let bytes = text.as_bytes();
        let mut pos = 0;

        if (bytes.first() == Some(&b'v') || bytes.first() == Some(&b'V'))
            && bytes.get(1).is_some_and(|b| b.is_ascii_digit())
        {
            pos += 1;
        }

        let (major, len) = scan_number(&text[pos..])
            .ok_or_else(|| Error::invalid_version("expected major number"))?;
        pos += len;
        let minor = Self::expect_component(text, &mut pos, "minor")?;
        let patch = Self::expect_component(text, &mut pos, "patch")?;

        // Legacy 4-part input: consume the extra component, note it, and
        // let the caller decide whether that matters.
        let mut fourth_part = None;
        if bytes.get(pos) == Some(&b'.') {
            if let Some((fourth, len)) = scan_number(&text[pos + 1..]) {
                fourth_part = Some(fourth);
                pos += 1 + len;
            }
        }

        let mut prerelease = String::new();
        if bytes.get(pos) == Some(&b'-') {
            let label_len = scan_label(&text[pos + 1..]);
            if label_len == 0 {
                return Err(Error::invalid_version("empty prerelease label"));
            }
            let label = &text[pos + 1..pos + 1 + label_len];
            validate_label(label, "prerelease")?;
            prerelease = label.to_string();
            pos += 1 + label_len;
        }

        let mut build = String::new();
        if bytes.get(pos) == Some(&b'+') {
            let label_len = scan_label(&text[pos + 1..]);
            if label_len == 0 {
                return Err(Error::invalid_version("empty build metadata"));
            }
            let label = &text[pos + 1..pos + 1 + label_len];
            validate_label(label, "build metadata")?;
            build = label.to_string();
            pos += 1 + label_len;
        }

        Ok((
            SVersion::from_parts(major, minor, patch, prerelease, build, fourth_part),
            pos,
        ))
    }

    fn expect_component(text: &str, pos: &mut usize, what: &str) -> Result<u64> {
        if text.as_bytes().get(*pos) != Some(&b'.') {
            return Err(Error::invalid_version(format!("expected '.' before {}", what)));
        }
        let (value, len) = scan_number(&text[*pos + 1..])
            .ok_or_else(|| Error::invalid_version(format!("expected {} number", what)))?;
        *pos += 1 + len;
        Ok(value)
    }
}

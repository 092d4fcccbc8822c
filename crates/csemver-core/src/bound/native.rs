//! Native bound syntax
//!
//! `v<version>[<Lock>,<Quality>]` with case-insensitive keywords, tolerant
//! of spaces and of either `,` or whitespace between the two keywords.
//! This syntax expresses the triple exactly in both directions: parsing it
//! never sets `is_approximated`, and a bound re-parses from its own
//! rendering unchanged.

use super::{ParseResult, SVersionBound, SVersionLock};
use crate::version::{PackageQuality, SVersion};

impl SVersionBound {
    /// Parses the native bound syntax.
    pub fn native_try_parse(text: &str) -> ParseResult<SVersionBound> {
        let trimmed = text.trim();
        let (base, consumed) = match SVersion::parse_prefix(trimmed) {
            Ok(parsed) => parsed,
            Err(e) => return ParseResult::err(e.to_string()),
        };
        let fourth_part_lost = base.fourth_part().is_some();
        if fourth_part_lost {
            log::debug!("native bound {:?}: discarding legacy 4th component", trimmed);
        }
        let base = base.without_fourth_part();

        let mut lock = SVersionLock::None;
        let mut quality = PackageQuality::CI;
        let rest = trimmed[consumed..].trim();
        if !rest.is_empty() {
            let inner = match rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
                Some(inner) => inner,
                None => {
                    return ParseResult::err(format!(
                        "expected [Lock,Quality] after version, found {:?}",
                        rest
                    ))
                }
            };
            let mut saw_lock = false;
            let mut saw_quality = false;
            for token in inner.split([',', ' ', '\t']).filter(|t| !t.is_empty()) {
                if let Some(parsed) = SVersionLock::from_keyword(token) {
                    if saw_lock {
                        return ParseResult::err("duplicate lock keyword");
                    }
                    lock = parsed;
                    saw_lock = true;
                } else if let Some(parsed) = PackageQuality::from_keyword(token) {
                    if saw_quality {
                        return ParseResult::err("duplicate quality keyword");
                    }
                    quality = parsed;
                    saw_quality = true;
                } else {
                    return ParseResult::err(format!("unknown keyword {:?}", token));
                }
            }
        }
        ParseResult::ok(SVersionBound::new(base, lock, quality))
            .with_fourth_part_lost(fourth_part_lost)
    }

    /// Renders the native syntax, omitting default lock and quality.
    pub fn to_native_string(&self) -> String {
        let mut out = format!("v{}", self.base());
        let lock = self.lock() != SVersionLock::None;
        let quality = self.min_quality() != PackageQuality::CI;
        match (lock, quality) {
            (true, true) => out.push_str(&format!("[{},{}]", self.lock(), self.min_quality())),
            (true, false) => out.push_str(&format!("[{}]", self.lock())),
            (false, true) => out.push_str(&format!("[{}]", self.min_quality())),
            (false, false) => {}
        }
        out
    }
}

//! NuGet-style range bridge
//!
//! Projects NuGet version range syntax (bare minimum versions, bracket
//! intervals, floating versions with `*` and `-*`) onto the bound triple.
//! Interval shapes the triple encodes exactly, an exact pin `[v]` and the
//! half-open bump intervals `[v, bump(v))`, translate without loss; any
//! other upper bound collapses to the lower-bound approximation and is
//! flagged. An exclusive lower bound is taken as inclusive and not
//! flagged, the same stance the npm bridge takes on `>`.

use super::partial::{bump_lock, PartialVersion};
use super::{ParseResult, SVersionBound, SVersionLock};
use crate::version::{PackageQuality, SVersion};

impl SVersionBound {
    /// Parses a NuGet version range.
    pub fn nuget_try_parse(text: &str) -> ParseResult<SVersionBound> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ParseResult::err("empty version range");
        }
        if trimmed.starts_with('[') || trimmed.starts_with('(') {
            parse_interval(trimmed)
        } else {
            parse_floating(trimmed)
        }
    }

    /// Renders the NuGet spelling of this bound.
    ///
    /// A CI minimum quality is spelled with the floating `-*` forms where
    /// the base shape allows; other non-default qualities have no NuGet
    /// spelling and rely on the parse side's prerelease-floor rule.
    pub fn to_nuget_string(&self) -> String {
        let base = self.base();
        let ci = self.min_quality() == PackageQuality::CI;
        match self.lock() {
            SVersionLock::Lock => format!("[{}]", base),
            SVersionLock::LockPatch => {
                if ci && !base.is_prerelease() {
                    format!("{}.{}.{}-*", base.major(), base.minor(), base.patch())
                } else {
                    format!("[{},{}.{}.{})", base, base.major(), base.minor(), base.patch() + 1)
                }
            }
            SVersionLock::LockMinor => {
                if ci && !base.is_prerelease() && base.patch() == 0 {
                    format!("{}.{}.*-*", base.major(), base.minor())
                } else {
                    format!("[{},{}.{}.0)", base, base.major(), base.minor() + 1)
                }
            }
            SVersionLock::LockMajor => {
                if ci && !base.is_prerelease() && base.minor() == 0 && base.patch() == 0 {
                    format!("{}.*-*", base.major())
                } else {
                    format!("[{},{}.0.0)", base, base.major() + 1)
                }
            }
            SVersionLock::None => {
                if ci && base == &SVersion::zero() {
                    "*-*".to_string()
                } else {
                    base.to_string()
                }
            }
        }
    }
}

/// Bare version, partial version or floating wildcard form.
fn parse_floating(text: &str) -> ParseResult<SVersionBound> {
    let partial = match PartialVersion::parse_prefix(text) {
        Some(p) if p.consumed == text.len() => p,
        _ => return ParseResult::err(format!("invalid version range {:?}", text)),
    };
    let fourth = partial.fourth_part.is_some();

    let (base, lock) = if partial.saw_wildcard || partial.floating_prerelease {
        let base = if partial.major.is_none() {
            SVersion::zero()
        } else {
            partial.floor()
        };
        // A floating full version (`1.2.3-*`) pins down to the patch.
        (base, partial.wildcard_lock(SVersionLock::LockPatch))
    } else {
        // A plain version is a minimum bound, never a pin.
        (partial.floor(), SVersionLock::None)
    };
    let quality = default_quality(&base, partial.floating_prerelease);
    ParseResult::ok(SVersionBound::new(base, lock, quality)).with_fourth_part_lost(fourth)
}

fn parse_interval(text: &str) -> ParseResult<SVersionBound> {
    let inclusive_low = text.starts_with('[');
    let (inner, inclusive_high) = match text[1..].strip_suffix(']') {
        Some(inner) => (inner, true),
        None => match text[1..].strip_suffix(')') {
            Some(inner) => (inner, false),
            None => return ParseResult::err(format!("unterminated interval {:?}", text)),
        },
    };

    let Some((low_text, high_text)) = inner.split_once(',') else {
        // `[1.2.3]` is the exact pin; a single exclusive version is empty.
        if !inclusive_low || !inclusive_high {
            return ParseResult::err(format!("exclusive single-version interval {:?}", text));
        }
        return parse_exact(inner.trim());
    };

    let low = match parse_endpoint(low_text.trim()) {
        Ok(endpoint) => endpoint,
        Err(parsed) => return parsed,
    };
    let high = match parse_endpoint(high_text.trim()) {
        Ok(endpoint) => endpoint,
        Err(parsed) => return parsed,
    };
    let fourth = [&low, &high]
        .iter()
        .any(|e| e.as_ref().is_some_and(|p| p.fourth_part.is_some()));

    let bound = match (&low, &high) {
        (None, None) => return ParseResult::err(format!("empty interval {:?}", text)),
        // Lower bound only. Exclusive is taken as inclusive, unflagged.
        (Some(low), None) => {
            let base = low.floor();
            let quality = default_quality(&base, low.floating_prerelease);
            ParseResult::ok(SVersionBound::new(base, SVersionLock::None, quality))
        }
        // Upper bound only: nothing of it survives but the quality hint.
        (None, Some(high)) => {
            log::debug!("nuget interval {:?} collapsed to the synthetic floor", text);
            let quality = default_quality(&high.floor(), high.floating_prerelease);
            ParseResult::ok(SVersionBound::new(SVersion::zero(), SVersionLock::None, quality))
                .approximated()
        }
        (Some(low), Some(high)) => {
            let base = low.floor();
            let quality = default_quality(&base, low.floating_prerelease);
            // Partial endpoints zero-fill, so `[1.2,1.3)` is the minor
            // bump of `1.2.0` and pins exactly.
            let lock = if !inclusive_high {
                bump_lock(&base, &high.floor())
            } else {
                None
            };
            match lock {
                Some(lock) => ParseResult::ok(SVersionBound::new(base, lock, quality)),
                None => {
                    log::debug!("nuget interval {:?} collapsed to its floor", text);
                    ParseResult::ok(SVersionBound::new(base, SVersionLock::None, quality))
                        .approximated()
                }
            }
        }
    };
    bound.with_fourth_part_lost(fourth)
}

/// An interval endpoint: absent, or a partial version.
#[allow(clippy::type_complexity)]
fn parse_endpoint(text: &str) -> Result<Option<PartialVersion>, ParseResult<SVersionBound>> {
    if text.is_empty() {
        return Ok(None);
    }
    match PartialVersion::parse_prefix(text) {
        // Floating forms never appear inside brackets.
        Some(p) if p.consumed == text.len() && !p.saw_wildcard && !p.floating_prerelease => {
            Ok(Some(p))
        }
        _ => Err(ParseResult::err(format!("invalid interval endpoint {:?}", text))),
    }
}

fn parse_exact(text: &str) -> ParseResult<SVersionBound> {
    let partial = match PartialVersion::parse_prefix(text) {
        Some(p) if p.consumed == text.len() && !p.saw_wildcard && !p.floating_prerelease => p,
        _ => return ParseResult::err(format!("invalid pinned version {:?}", text)),
    };
    let fourth = partial.fourth_part.is_some();
    let base = partial.floor();
    let quality = default_quality(&base, false);
    ParseResult::ok(SVersionBound::new(base, SVersionLock::Lock, quality))
        .with_fourth_part_lost(fourth)
}

/// Stable unless the floor itself is an explicit prerelease or the
/// expression floats over prereleases. The synthetic `0.0.0-0` floor does
/// not count as an explicit prerelease.
fn default_quality(base: &SVersion, floating_prerelease: bool) -> PackageQuality {
    if floating_prerelease || (base.is_prerelease() && base != &SVersion::zero()) {
        PackageQuality::CI
    } else {
        PackageQuality::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SVersionBound {
        SVersionBound::nuget_try_parse(text).into_value().unwrap()
    }

    fn v(text: &str) -> SVersion {
        SVersion::parse(text).unwrap()
    }

    #[test]
    fn test_bare_version_is_a_floor() {
        let b = parse("1.2.3");
        assert_eq!(b, SVersionBound::new(v("1.2.3"), SVersionLock::None, PackageQuality::Stable));
        assert_eq!(parse("1.2"), SVersionBound::new(v("1.2.0"), SVersionLock::None, PackageQuality::Stable));
    }

    #[test]
    fn test_exact_pin() {
        let b = parse("[1.2.3]");
        assert_eq!(b.lock(), SVersionLock::Lock);
        assert_eq!(b.base(), &v("1.2.3"));
        assert!(!SVersionBound::nuget_try_parse("(1.2.3)").is_valid());
    }

    #[test]
    fn test_lower_bound_intervals() {
        let b = parse("[1.2.3,)");
        assert_eq!(b.lock(), SVersionLock::None);
        assert_eq!(b.base(), &v("1.2.3"));
        // Exclusive lower bound is inclusive here, and unflagged.
        let r = SVersionBound::nuget_try_parse("(1.2.3,)");
        assert!(!r.is_approximated);
        assert_eq!(r.result().unwrap(), &b);
    }

    #[test]
    fn test_bump_interval_is_exact_lock() {
        let r = SVersionBound::nuget_try_parse("[1.2,1.3)");
        assert!(!r.is_approximated);
        let b = r.result().unwrap();
        assert_eq!(b.base(), &v("1.2.0"));
        assert_eq!(b.lock(), SVersionLock::LockMinor);

        let r = SVersionBound::nuget_try_parse("[1.2.3,1.2.4)");
        assert!(!r.is_approximated);
        assert_eq!(r.result().unwrap().lock(), SVersionLock::LockPatch);

        let r = SVersionBound::nuget_try_parse("[2,3)");
        assert!(!r.is_approximated);
        assert_eq!(r.result().unwrap().lock(), SVersionLock::LockMajor);
    }

    #[test]
    fn test_other_intervals_are_approximated() {
        for text in ["[1.2,1.4)", "[1.2,1.3]", "[1.2.3,2.0.1)", "(,2.0)", "(,2.0]"] {
            let r = SVersionBound::nuget_try_parse(text);
            assert!(r.is_approximated, "{} not flagged", text);
            assert_eq!(r.result().unwrap().lock(), SVersionLock::None);
        }
        assert_eq!(parse("(,2.0)").base(), &SVersion::zero());
        assert_eq!(parse("[1.2,1.4)").base(), &v("1.2.0"));
    }

    #[test]
    fn test_floating_versions() {
        assert_eq!(
            parse("1.*"),
            SVersionBound::new(v("1.0.0"), SVersionLock::LockMajor, PackageQuality::Stable)
        );
        assert_eq!(
            parse("1.2.*"),
            SVersionBound::new(v("1.2.0"), SVersionLock::LockMinor, PackageQuality::Stable)
        );
        let star = parse("*");
        assert_eq!(star.lock(), SVersionLock::None);
        assert_eq!(star.base(), &SVersion::zero());
        assert_eq!(star.min_quality(), PackageQuality::Stable);
    }

    #[test]
    fn test_floating_prerelease_forces_ci() {
        assert_eq!(
            parse("1.2.3-*"),
            SVersionBound::new(v("1.2.3"), SVersionLock::LockPatch, PackageQuality::CI)
        );
        assert_eq!(
            parse("1.2.*-*"),
            SVersionBound::new(v("1.2.0"), SVersionLock::LockMinor, PackageQuality::CI)
        );
        assert_eq!(parse("*-*"), SVersionBound::all());
    }

    #[test]
    fn test_prerelease_floor_forces_ci() {
        assert_eq!(parse("1.2.3-beta.1").min_quality(), PackageQuality::CI);
        assert_eq!(parse("[1.2.3-beta.1,)").min_quality(), PackageQuality::CI);
    }

    #[test]
    fn test_fourth_part_lost() {
        let r = SVersionBound::nuget_try_parse("[1.2.3.4,)");
        assert!(r.fourth_part_lost);
        assert_eq!(r.result().unwrap().base(), &v("1.2.3"));
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "[1.2.3", "[,)", "[a,b)", "nope", "[1.2.*]"] {
            assert!(!SVersionBound::nuget_try_parse(text).is_valid(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "[1.2.3]",
            "1.2.3",
            "1.2.3-beta.1",
            "[1.2.3,1.3.0)",
            "[1.2.3,1.2.4)",
            "[2.0.0,3.0.0)",
            "1.2.3-*",
            "1.2.*-*",
            "*-*",
        ] {
            let b = parse(text);
            let rendered = b.to_nuget_string();
            assert_eq!(parse(&rendered), b, "{} -> {}", text, rendered);
        }
    }
}

//! npm-style range bridge
//!
//! Projects npm range expressions onto the bound triple. Everything the
//! triple can express exactly (a lower-bound floor with a derivable lock
//! and quality) translates without loss; explicit upper bounds, `<`/`<=`
//! comparators, hyphen ranges and `||` alternatives are collapsed to a
//! lower-bound-anchored approximation and flagged. The adjacent pair
//! `>=v <bump(v)` is recognized as an exact lock so that locked bounds
//! round-trip through `to_npm_string`.

use super::partial::{bump_lock, PartialVersion};
use super::{ParseResult, SVersionBound, SVersionLock};
use crate::version::{PackageQuality, SVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Bare,
    Eq,
    Ge,
    Gt,
    Le,
    Lt,
    Tilde,
    Caret,
}

fn is_npm_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || " \t.+-*xX^~<>=|".contains(c)
}

impl SVersionBound {
    /// Parses a full npm range expression.
    ///
    /// `include_prerelease` mirrors npm's resolution switch: it lowers the
    /// default minimum quality from `Stable` to `CI` and loosens the
    /// zero-version caret lock by one level.
    pub fn npm_try_parse(text: &str, include_prerelease: bool) -> ParseResult<SVersionBound> {
        let mut cursor = text;
        let result = SVersionBound::npm_try_parse_from(&mut cursor, include_prerelease);
        if result.is_valid() && !cursor.trim().is_empty() {
            return ParseResult::err(format!("unexpected trailing input {:?}", cursor));
        }
        result
    }

    /// Cursor variant: consumes the longest range expression at the start
    /// of `*cursor` and advances past it. The `fourth_part_lost` flag
    /// reports any legacy 4-component version encountered along the way.
    pub fn npm_try_parse_from(
        cursor: &mut &str,
        include_prerelease: bool,
    ) -> ParseResult<SVersionBound> {
        let text = *cursor;
        let end = text.find(|c| !is_npm_char(c)).unwrap_or(text.len());
        let (expr, rest) = text.split_at(end);
        *cursor = rest;
        parse_expression(expr.trim(), include_prerelease)
    }

    /// Renders the npm spelling of this bound.
    ///
    /// The minimum quality has no npm spelling: it travels out-of-band as
    /// the `include_prerelease` switch of the parse side.
    pub fn to_npm_string(&self) -> String {
        let base = plain(self.base());
        match self.lock() {
            SVersionLock::Lock => base,
            SVersionLock::LockPatch => format!(
                ">={} <{}.{}.{}",
                base,
                self.base().major(),
                self.base().minor(),
                self.base().patch() + 1
            ),
            SVersionLock::LockMinor => format!("~{}", base),
            SVersionLock::LockMajor => {
                if self.base().major() > 0 {
                    format!("^{}", base)
                } else {
                    format!(">={} <1.0.0", base)
                }
            }
            SVersionLock::None => format!(">={}", base),
        }
    }
}

/// Version rendering without build metadata or fourth part.
fn plain(version: &SVersion) -> String {
    version
        .clone()
        .without_fourth_part()
        .with_build_metadata(None)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| version.to_string())
}

fn parse_expression(expr: &str, include_prerelease: bool) -> ParseResult<SVersionBound> {
    let alternatives: Vec<&str> = expr.split("||").map(str::trim).collect();
    // A lone empty expression is the wildcard; an empty || alternative is
    // a syntax error, not a widening to everything.
    if alternatives.len() > 1 && alternatives.iter().any(|a| a.is_empty()) {
        return ParseResult::err(format!("empty alternative in {:?}", expr));
    }
    let mut merged: Option<SVersionBound> = None;
    let mut approximated = false;
    let mut fourth_part_lost = false;
    for alternative in &alternatives {
        let parsed = parse_alternative(alternative, include_prerelease);
        let bound = match parsed.result() {
            Some(bound) => bound.clone(),
            None => return parsed,
        };
        approximated |= parsed.is_approximated;
        fourth_part_lost |= parsed.fourth_part_lost;
        merged = Some(match merged {
            None => bound,
            Some(acc) => acc.union(&bound),
        });
    }
    let merged = match merged {
        Some(m) => m,
        None => return ParseResult::err("empty range expression"),
    };
    if alternatives.len() > 1 {
        log::debug!("npm range {:?}: || alternatives collapsed to their union", expr);
        approximated = true;
    }
    let mut out = ParseResult::ok(merged).with_fourth_part_lost(fourth_part_lost);
    if approximated {
        out = out.approximated();
    }
    out
}

fn parse_alternative(alternative: &str, include_prerelease: bool) -> ParseResult<SVersionBound> {
    // The whole-expression wildcard: every version the quality admits.
    if alternative.is_empty() || alternative == "*" || alternative.eq_ignore_ascii_case("x") {
        let bound = SVersionBound::new(SVersion::zero(), SVersionLock::None, PackageQuality::CI);
        return finish(ParseResult::ok(bound), include_prerelease);
    }

    if let Some((low, high)) = alternative.split_once(" - ") {
        return parse_hyphen_range(low.trim(), high.trim(), include_prerelease);
    }

    let constraints = match scan_constraints(alternative) {
        Ok(constraints) => constraints,
        Err(message) => return ParseResult::err(message),
    };
    let fourth_part_lost = constraints.iter().any(|(_, p)| p.fourth_part.is_some());

    // `>=v <bump(v)` is an exact lock, not an approximation.
    if let [(Op::Ge, low), (Op::Lt, high)] = constraints.as_slice() {
        if low.is_full() && high.is_full() {
            if let Some(lock) = bump_lock(&low.floor(), &high.floor()) {
                let bound = SVersionBound::new(low.floor(), lock, PackageQuality::CI);
                return finish(
                    ParseResult::ok(bound).with_fourth_part_lost(fourth_part_lost),
                    include_prerelease,
                );
            }
        }
    }

    let Some((first, rest)) = constraints.split_first() else {
        return ParseResult::err(format!("empty range alternative in {:?}", alternative));
    };
    let (mut bound, mut approximated) = translate_constraint(first.0, &first.1, include_prerelease);
    for (op, partial) in rest {
        let (next, approx) = translate_constraint(*op, partial, include_prerelease);
        approximated |= approx;
        bound = bound.intersect(&next);
    }
    let mut parsed = ParseResult::ok(bound).with_fourth_part_lost(fourth_part_lost);
    if approximated {
        parsed = parsed.approximated();
    }
    finish(parsed, include_prerelease)
}

/// Applies the default minimum quality once the floor is known. An
/// explicit prerelease floor lowers it to CI; the synthetic `0.0.0-0`
/// floor does not count as one.
fn finish(parsed: ParseResult<SVersionBound>, include_prerelease: bool) -> ParseResult<SVersionBound> {
    parsed.map(|bound| {
        let explicit_prerelease =
            bound.base().is_prerelease() && bound.base() != &SVersion::zero();
        let quality = if include_prerelease || explicit_prerelease {
            PackageQuality::CI
        } else {
            PackageQuality::Stable
        };
        bound.set_min_quality(quality)
    })
}

fn scan_constraints(alternative: &str) -> Result<Vec<(Op, PartialVersion)>, String> {
    let mut rest = alternative;
    let mut constraints = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let op = if let Some(r) = rest.strip_prefix(">=") {
            rest = r;
            Op::Ge
        } else if let Some(r) = rest.strip_prefix("<=") {
            rest = r;
            Op::Le
        } else if let Some(r) = rest.strip_prefix('>') {
            rest = r;
            Op::Gt
        } else if let Some(r) = rest.strip_prefix('<') {
            rest = r;
            Op::Lt
        } else if let Some(r) = rest.strip_prefix('=') {
            rest = r;
            Op::Eq
        } else if let Some(r) = rest.strip_prefix('~') {
            rest = r;
            Op::Tilde
        } else if let Some(r) = rest.strip_prefix('^') {
            rest = r;
            Op::Caret
        } else {
            Op::Bare
        };
        rest = rest.trim_start();
        let partial = PartialVersion::parse_prefix(rest)
            .ok_or_else(|| format!("expected a version after operator in {:?}", alternative))?;
        rest = &rest[partial.consumed..];
        constraints.push((op, partial));
    }
    if constraints.is_empty() {
        return Err(format!("empty range alternative in {:?}", alternative));
    }
    Ok(constraints)
}

fn translate_constraint(
    op: Op,
    partial: &PartialVersion,
    include_prerelease: bool,
) -> (SVersionBound, bool) {
    let quality = PackageQuality::CI;
    match op {
        Op::Bare | Op::Eq => {
            if partial.major.is_none() {
                return (
                    SVersionBound::new(SVersion::zero(), SVersionLock::None, quality),
                    false,
                );
            }
            let lock = partial.wildcard_lock(SVersionLock::Lock);
            (SVersionBound::new(partial.floor(), lock, quality), false)
        }
        Op::Ge | Op::Gt => {
            // An exclusive floor is taken as inclusive: excluding the
            // exact dependency version is not a meaningful request.
            (
                SVersionBound::new(partial.floor(), SVersionLock::None, quality),
                false,
            )
        }
        Op::Le | Op::Lt => {
            log::debug!("npm comparator collapsed to the synthetic floor");
            (
                SVersionBound::new(SVersion::zero(), SVersionLock::None, quality),
                true,
            )
        }
        Op::Tilde => {
            let lock = if partial.major.is_none() {
                SVersionLock::None
            } else if partial.minor.is_none() {
                SVersionLock::LockMajor
            } else {
                SVersionLock::LockMinor
            };
            let base = if partial.major.is_none() {
                SVersion::zero()
            } else {
                partial.floor()
            };
            (SVersionBound::new(base, lock, quality), false)
        }
        Op::Caret => {
            let lock = match (partial.major, partial.minor, partial.patch) {
                (None, _, _) => SVersionLock::None,
                (Some(0), Some(0), Some(_)) => {
                    if include_prerelease {
                        SVersionLock::LockPatch
                    } else {
                        SVersionLock::Lock
                    }
                }
                (Some(0), Some(_), _) => SVersionLock::LockMinor,
                (Some(_), _, _) => SVersionLock::LockMajor,
            };
            let base = if partial.major.is_none() {
                SVersion::zero()
            } else {
                partial.floor()
            };
            (SVersionBound::new(base, lock, quality), false)
        }
    }
}

fn parse_hyphen_range(low: &str, high: &str, include_prerelease: bool) -> ParseResult<SVersionBound> {
    let low_partial = match PartialVersion::parse_prefix(low) {
        Some(p) if p.consumed == low.len() => p,
        _ => return ParseResult::err(format!("invalid hyphen range floor {:?}", low)),
    };
    let high_partial = match PartialVersion::parse_prefix(high) {
        Some(p) if p.consumed == high.len() => p,
        _ => return ParseResult::err(format!("invalid hyphen range ceiling {:?}", high)),
    };
    let fourth = low_partial.fourth_part.is_some() || high_partial.fourth_part.is_some();
    log::debug!("npm hyphen range collapsed to its floor");
    let bound = SVersionBound::new(low_partial.floor(), SVersionLock::None, PackageQuality::CI);
    finish(
        ParseResult::ok(bound).with_fourth_part_lost(fourth).approximated(),
        include_prerelease,
    )
}

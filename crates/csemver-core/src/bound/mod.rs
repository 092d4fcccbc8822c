//! Version bounds and their algebra
//!
//! An [`SVersionBound`] denotes an acceptable-version set by a triple:
//! a floor version, a lock level ceiling on drift above that floor, and a
//! minimum quality tier. The triple trades exactness for O(1) combination:
//! `union` and `intersect` are deliberately approximate combinators over
//! this 3-dimensional lattice, never exact set operations, and `contains`
//! is a genuine partial order.

mod lock;
mod native;
mod npm;
mod nuget;
mod parse_result;
mod partial;

pub use lock::SVersionLock;
pub use parse_result::ParseResult;

use crate::csver::{MAX_MAJOR, MAX_MINOR, MAX_PATCH};
use crate::version::{PackageQuality, SVersion};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An immutable acceptable-version set: `{ v : v >= base, v within lock
/// of base, quality(v) >= min_quality }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SVersionBound {
    base: SVersion,
    lock: SVersionLock,
    min_quality: PackageQuality,
}

impl SVersionBound {
    pub fn new(base: SVersion, lock: SVersionLock, min_quality: PackageQuality) -> SVersionBound {
        SVersionBound {
            base,
            lock,
            min_quality,
        }
    }

    /// The bound satisfied by every syntactically valid version.
    pub fn all() -> SVersionBound {
        SVersionBound::new(SVersion::zero(), SVersionLock::None, PackageQuality::CI)
    }

    /// The most restrictive representable bound, used as the empty set.
    ///
    /// A truly empty set is not representable by the triple; this constant
    /// is the conventional stand-in and is absorbing under `intersect`.
    pub fn none() -> SVersionBound {
        SVersionBound::new(
            SVersion::new(MAX_MAJOR, MAX_MINOR, MAX_PATCH),
            SVersionLock::Lock,
            PackageQuality::Stable,
        )
    }

    pub fn base(&self) -> &SVersion {
        &self.base
    }

    pub fn lock(&self) -> SVersionLock {
        self.lock
    }

    pub fn min_quality(&self) -> PackageQuality {
        self.min_quality
    }

    /// Pure field replacement of the lock level.
    pub fn set_lock(&self, lock: SVersionLock) -> SVersionBound {
        SVersionBound::new(self.base.clone(), lock, self.min_quality)
    }

    /// Pure field replacement of the minimum quality.
    pub fn set_min_quality(&self, min_quality: PackageQuality) -> SVersionBound {
        SVersionBound::new(self.base.clone(), self.lock, min_quality)
    }

    /// True when `version` is in this bound's set.
    pub fn satisfies(&self, version: &SVersion) -> bool {
        version >= &self.base
            && self.lock.allows(&self.base, version)
            && self.min_quality.accepts(version.quality())
    }

    /// True when every version satisfying `other` also satisfies `self`.
    ///
    /// This is a partial order: bounds with incomparable bases or opposing
    /// lock/quality trade-offs are mutually non-containing.
    pub fn contains(&self, other: &SVersionBound) -> bool {
        self.base <= other.base
            && self.lock <= other.lock
            && self.lock.allows(&self.base, &other.base)
            && self.min_quality <= other.min_quality
    }

    /// The smallest known bound whose set is a superset of both.
    ///
    /// The lower base wins; the lock starts from the looser of the two and
    /// is loosened further until the unchosen base fits under it (possibly
    /// all the way to `None`); the quality is the lower of the two, which
    /// also keeps the other bound's floor satisfied. Commutative and
    /// idempotent.
    pub fn union(&self, other: &SVersionBound) -> SVersionBound {
        let (base, unchosen) = if self.base <= other.base {
            (self.base.clone(), &other.base)
        } else {
            (other.base.clone(), &self.base)
        };
        let mut lock = self.lock.min(other.lock);
        while lock != SVersionLock::None && !lock.allows(&base, unchosen) {
            lock = lock.loosen();
        }
        let min_quality = self.min_quality.min(other.min_quality);
        SVersionBound::new(base, lock, min_quality)
    }

    /// The largest known bound whose set is a subset of both.
    ///
    /// Computed dually to [`union`](Self::union): higher base, tighter
    /// lock, higher quality. When the two sets only partially overlap (or
    /// are disjoint) the triple cannot express the exact result; the
    /// component-wise combination is the documented conservative
    /// approximation, and reduces to the nested bound whenever one
    /// contains the other.
    pub fn intersect(&self, other: &SVersionBound) -> SVersionBound {
        let base = self.base.clone().max(other.base.clone());
        let lock = self.lock.max(other.lock);
        let min_quality = self.min_quality.max(other.min_quality);
        SVersionBound::new(base, lock, min_quality)
    }
}

impl fmt::Display for SVersionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_native_string())
    }
}

impl FromStr for SVersionBound {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<SVersionBound> {
        SVersionBound::native_try_parse(s).into_value()
    }
}

impl Serialize for SVersionBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SVersionBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

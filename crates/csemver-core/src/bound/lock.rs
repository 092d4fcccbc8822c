//! Lock levels
//!
//! A lock is a ceiling on how far above a bound's floor a candidate may
//! drift. The variants are declared in ascending restrictiveness, so the
//! derived order gives `union` (loosest wins) and `intersect` (tightest
//! wins) directly.

use crate::version::SVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered drift ceilings, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SVersionLock {
    /// No ceiling: any version at or above the floor qualifies.
    None,
    /// The candidate must share the floor's major.
    LockMajor,
    /// The candidate must share the floor's major and minor.
    LockMinor,
    /// The candidate must share the floor's major, minor and patch.
    LockPatch,
    /// Only the floor version itself qualifies.
    Lock,
}

impl SVersionLock {
    /// One step looser; `None` stays `None`.
    pub fn loosen(self) -> SVersionLock {
        match self {
            SVersionLock::None | SVersionLock::LockMajor => SVersionLock::None,
            SVersionLock::LockMinor => SVersionLock::LockMajor,
            SVersionLock::LockPatch => SVersionLock::LockMinor,
            SVersionLock::Lock => SVersionLock::LockPatch,
        }
    }

    /// True when `candidate` stays within this lock's prefix of `base`.
    pub fn allows(self, base: &SVersion, candidate: &SVersion) -> bool {
        match self {
            SVersionLock::None => true,
            SVersionLock::LockMajor => candidate.major() == base.major(),
            SVersionLock::LockMinor => {
                candidate.major() == base.major() && candidate.minor() == base.minor()
            }
            SVersionLock::LockPatch => {
                candidate.major() == base.major()
                    && candidate.minor() == base.minor()
                    && candidate.patch() == base.patch()
            }
            SVersionLock::Lock => candidate == base,
        }
    }

    /// Case-insensitive keyword parsing with the documented synonyms.
    pub fn from_keyword(keyword: &str) -> Option<SVersionLock> {
        match keyword.to_ascii_lowercase().as_str() {
            "none" | "nolock" => Some(SVersionLock::None),
            "lockmajor" => Some(SVersionLock::LockMajor),
            "lockminor" => Some(SVersionLock::LockMinor),
            "lockpatch" => Some(SVersionLock::LockPatch),
            "lock" | "locked" => Some(SVersionLock::Lock),
            _ => None,
        }
    }
}

impl fmt::Display for SVersionLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SVersionLock::None => "None",
            SVersionLock::LockMajor => "LockMajor",
            SVersionLock::LockMinor => "LockMinor",
            SVersionLock::LockPatch => "LockPatch",
            SVersionLock::Lock => "Lock",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SVersion {
        SVersion::parse(text).unwrap()
    }

    #[test]
    fn test_restrictiveness_order() {
        assert!(SVersionLock::None < SVersionLock::LockMajor);
        assert!(SVersionLock::LockMajor < SVersionLock::LockMinor);
        assert!(SVersionLock::LockMinor < SVersionLock::LockPatch);
        assert!(SVersionLock::LockPatch < SVersionLock::Lock);
    }

    #[test]
    fn test_loosen_walks_to_none() {
        let mut lock = SVersionLock::Lock;
        let mut steps = 0;
        while lock != SVersionLock::None {
            lock = lock.loosen();
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(SVersionLock::None.loosen(), SVersionLock::None);
    }

    #[test]
    fn test_allows() {
        let base = v("1.2.3");
        assert!(SVersionLock::LockMinor.allows(&base, &v("1.2.9")));
        assert!(!SVersionLock::LockMinor.allows(&base, &v("1.3.0")));
        assert!(SVersionLock::LockMajor.allows(&base, &v("1.9.0")));
        assert!(!SVersionLock::LockMajor.allows(&base, &v("2.0.0")));
        assert!(SVersionLock::Lock.allows(&base, &v("1.2.3")));
        assert!(!SVersionLock::Lock.allows(&base, &v("1.2.4")));
        assert!(SVersionLock::LockPatch.allows(&v("1.2.3-alpha"), &v("1.2.3-rc")));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(SVersionLock::from_keyword("NoLock"), Some(SVersionLock::None));
        assert_eq!(SVersionLock::from_keyword("Locked"), Some(SVersionLock::Lock));
        assert_eq!(SVersionLock::from_keyword("lockminor"), Some(SVersionLock::LockMinor));
        assert_eq!(SVersionLock::from_keyword("stable"), None);
    }
}

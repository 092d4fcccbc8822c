//! Partial and wildcard version parsing shared by the range bridges
//!
//! Foreign range grammars routinely write incomplete versions (`1`,
//! `1.2`), wildcard components (`1.x`, `1.2.*`) and floating prereleases
//! (`1.2.*-*`). This parser turns any of those into a uniform shape the
//! bridges then project onto a bound; legacy 4-component inputs are
//! consumed here and reported so the bridges can raise their
//! `fourth_part_lost` flag.

use crate::bound::SVersionLock;
use crate::version::{is_ident_char, scan_number, SVersion};

#[derive(Debug, Clone)]
pub(super) struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: String,
    pub build: String,
    pub fourth_part: Option<u64>,
    /// Trailing `-*`: match any prerelease of the floor.
    pub floating_prerelease: bool,
    /// At least one component was written as `x`/`X`/`*`, as opposed to
    /// merely omitted. Grammars that distinguish `1.2` from `1.2.*` need
    /// this.
    pub saw_wildcard: bool,
    pub consumed: usize,
}

enum Component {
    Number(u64, usize),
    Wildcard(usize),
}

fn scan_component(text: &str) -> Option<Component> {
    match text.as_bytes().first() {
        Some(b'x') | Some(b'X') | Some(b'*') => Some(Component::Wildcard(1)),
        _ => scan_number(text).map(|(value, len)| Component::Number(value, len)),
    }
}

impl PartialVersion {
    /// Parses the longest partial version at the start of `text`.
    pub fn parse_prefix(text: &str) -> Option<PartialVersion> {
        let bytes = text.as_bytes();
        let mut pos = 0;
        if (bytes.first() == Some(&b'v') || bytes.first() == Some(&b'V'))
            && bytes.get(1).is_some_and(|b| b.is_ascii_digit() || *b == b'*' || *b == b'x')
        {
            pos = 1;
        }

        let mut parts: Vec<Option<u64>> = Vec::with_capacity(4);
        loop {
            if parts.len() == 4 {
                break;
            }
            match scan_component(&text[pos..]) {
                Some(Component::Number(value, len)) => {
                    parts.push(Some(value));
                    pos += len;
                }
                Some(Component::Wildcard(len)) => {
                    parts.push(None);
                    pos += len;
                }
                None => break,
            }
            if text.as_bytes().get(pos) == Some(&b'.')
                && scan_component(&text[pos + 1..]).is_some()
            {
                pos += 1;
                continue;
            }
            break;
        }
        if parts.is_empty() {
            return None;
        }

        // A wildcard truncates everything after it.
        let mut saw_wildcard = false;
        if let Some(first_wildcard) = parts.iter().position(|p| p.is_none()) {
            parts.truncate(first_wildcard + 1);
            saw_wildcard = true;
        }

        let mut prerelease = String::new();
        let mut floating_prerelease = false;
        if text.as_bytes().get(pos) == Some(&b'-') {
            let rest = &text[pos + 1..];
            if rest.as_bytes().first() == Some(&b'*') {
                floating_prerelease = true;
                pos += 2;
            } else {
                let len = rest.bytes().take_while(|&b| is_ident_char(b)).count();
                if len > 0 {
                    prerelease = rest[..len].to_string();
                    pos += 1 + len;
                }
            }
        }

        let mut build = String::new();
        if text.as_bytes().get(pos) == Some(&b'+') {
            let rest = &text[pos + 1..];
            let len = rest.bytes().take_while(|&b| is_ident_char(b)).count();
            if len > 0 {
                build = rest[..len].to_string();
                pos += 1 + len;
            }
        }

        let mut parts = parts.into_iter();
        Some(PartialVersion {
            major: parts.next().flatten(),
            minor: parts.next().flatten(),
            patch: parts.next().flatten(),
            fourth_part: parts.next().flatten(),
            prerelease,
            build,
            floating_prerelease,
            saw_wildcard,
            consumed: pos,
        })
    }

    /// True when all three components are explicit numbers.
    pub fn is_full(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// The floor version: missing or wildcard components become zero.
    pub fn floor(&self) -> SVersion {
        SVersion::from_parts(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
            self.prerelease.clone(),
            self.build.clone(),
            None,
        )
    }

    /// The lock a wildcard/partial shape implies: `1` / `1.x` locks the
    /// major, `1.2` / `1.2.x` locks the minor, a full version yields the
    /// lock the calling grammar assigns to exact versions.
    pub fn wildcard_lock(&self, full_version_lock: SVersionLock) -> SVersionLock {
        if self.major.is_none() {
            SVersionLock::None
        } else if self.minor.is_none() {
            SVersionLock::LockMajor
        } else if self.patch.is_none() {
            SVersionLock::LockMinor
        } else {
            full_version_lock
        }
    }
}

/// Recognizes `high` as the single-component bump of `low` and names the
/// lock that half-open interval encodes. `[1.2.3, 1.3.0)` is exactly
/// `LockMinor` on `1.2.3`; anything else is not a lock shape.
pub(super) fn bump_lock(low: &SVersion, high: &SVersion) -> Option<SVersionLock> {
    if high.is_prerelease() {
        return None;
    }
    let (major, minor, patch) = (low.major(), low.minor(), low.patch());
    if (high.major(), high.minor(), high.patch()) == (major + 1, 0, 0) {
        Some(SVersionLock::LockMajor)
    } else if (high.major(), high.minor(), high.patch()) == (major, minor + 1, 0) {
        Some(SVersionLock::LockMinor)
    } else if (high.major(), high.minor(), high.patch()) == (major, minor, patch + 1) {
        Some(SVersionLock::LockPatch)
    } else {
        None
    }
}

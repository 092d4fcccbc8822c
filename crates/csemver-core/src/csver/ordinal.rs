//! The ordinal codec
//!
//! A total bijection between the constrained version grammar and the dense
//! integer range `[1, VERY_LAST_ORDINAL]`. Within one `(major, minor,
//! patch)` block the 80,000 prerelease slots come first (stage, then
//! number, then fix) and the release takes the final slot; blocks are laid
//! out contiguously by patch, then minor, then major. Encode and decode are
//! allocation-free arithmetic over the derived multipliers below.

use super::{CSPrerelease, CSVersion, Stage};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_MAJOR: u64 = 99_999;
pub const MAX_MINOR: u64 = 49_999;
pub const MAX_PATCH: u64 = 9_999;
pub const MAX_PRERELEASE_NUMBER: u8 = 99;
pub const MAX_PRERELEASE_FIX: u8 = 99;

const STAGE_COUNT: u64 = Stage::ALL.len() as u64;
const NUMBER_SLOTS: u64 = MAX_PRERELEASE_NUMBER as u64 + 1;
const FIX_SLOTS: u64 = MAX_PRERELEASE_FIX as u64 + 1;

/// Prerelease slots per `(major, minor, patch)` block.
pub(crate) const PRERELEASE_SLOTS: u64 = STAGE_COUNT * NUMBER_SLOTS * FIX_SLOTS;

const MUL_PATCH: u64 = PRERELEASE_SLOTS + 1;
const MUL_MINOR: u64 = MUL_PATCH * (MAX_PATCH + 1);
const MUL_MAJOR: u64 = MUL_MINOR * (MAX_MINOR + 1);

/// Ordinal of `0.0.0-alpha`.
pub const VERY_FIRST_ORDINAL: u64 = 1;

/// Ordinal of `99999.49999.9999`, the maximum representable release.
pub const VERY_LAST_ORDINAL: u64 = MUL_MAJOR * (MAX_MAJOR + 1);

impl CSVersion {
    /// Encodes this version into its ordinal in `[1, VERY_LAST_ORDINAL]`.
    pub fn ordinal(&self) -> u64 {
        let slot = match self.prerelease() {
            Some(p) => {
                p.stage().index() * NUMBER_SLOTS * FIX_SLOTS
                    + u64::from(p.number()) * FIX_SLOTS
                    + u64::from(p.fix())
            }
            None => PRERELEASE_SLOTS,
        };
        1 + self.major() * MUL_MAJOR + self.minor() * MUL_MINOR + self.patch() * MUL_PATCH + slot
    }

    /// Decodes an ordinal back into the version it denotes.
    ///
    /// Ordinal 0 means "not a version" and yields [`Error::ZeroOrdinal`];
    /// anything above [`VERY_LAST_ORDINAL`] is a caller bug and yields
    /// [`Error::OrdinalOutOfRange`].
    pub fn from_ordinal(ordinal: u64) -> Result<CSVersion> {
        if ordinal == 0 {
            return Err(Error::ZeroOrdinal);
        }
        if ordinal > VERY_LAST_ORDINAL {
            return Err(Error::OrdinalOutOfRange {
                ordinal,
                max: VERY_LAST_ORDINAL,
            });
        }
        let mut rest = ordinal - 1;
        let major = rest / MUL_MAJOR;
        rest %= MUL_MAJOR;
        let minor = rest / MUL_MINOR;
        rest %= MUL_MINOR;
        let patch = rest / MUL_PATCH;
        rest %= MUL_PATCH;

        let prerelease = if rest == PRERELEASE_SLOTS {
            None
        } else {
            let stage = Stage::ALL[(rest / (NUMBER_SLOTS * FIX_SLOTS)) as usize];
            let number = (rest / FIX_SLOTS % NUMBER_SLOTS) as u8;
            let fix = (rest % FIX_SLOTS) as u8;
            Some(CSPrerelease::unchecked(stage, number, fix))
        };
        Ok(CSVersion::unchecked(major, minor, patch, prerelease))
    }

    /// The legacy four-group file version: `(ordinal << 1) | ci_flag`
    /// split into four unsigned 16-bit groups, most significant first.
    pub fn file_version(&self, ci_build: bool) -> FileVersion {
        let packed = (self.ordinal() << 1) | u64::from(ci_build);
        FileVersion {
            major: (packed >> 48) as u16,
            minor: (packed >> 32) as u16,
            build: (packed >> 16) as u16,
            revision: packed as u16,
        }
    }
}

/// A Windows-style 4-part file version derived from an ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl FileVersion {
    /// The packed `(ordinal << 1) | ci_flag` value the groups encode.
    pub fn packed(&self) -> u64 {
        (u64::from(self.major) << 48)
            | (u64::from(self.minor) << 32)
            | (u64::from(self.build) << 16)
            | u64::from(self.revision)
    }

    /// True when the low bit marks a CI build.
    pub fn is_ci_build(&self) -> bool {
        self.packed() & 1 == 1
    }
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}

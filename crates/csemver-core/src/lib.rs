//! CSemVer Core - Constrained Semantic Versioning engine
//!
//! This crate implements the CSemVer profile of Semantic Versioning: a
//! restricted version shape whose every value maps to a unique ordinal
//! number, plus the range machinery packaging tools need on top of it.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror`
//! - **Versions**: [`SVersion`], the loose SemVer value, with its
//!   [`PackageQuality`] tier
//! - **CSemVer**: [`CSVersion`], the constrained profile with the
//!   bijective ordinal codec, both textual forms and the successor engine
//! - **Bounds**: [`SVersionBound`], a floor/lock/quality triple with an
//!   approximate algebra, parsed from and rendered to the native, npm and
//!   NuGet range syntaxes
//!
//! # Example
//!
//! ```
//! use csemver_core::{CSVersion, Result};
//!
//! fn example() -> Result<()> {
//!     let version: CSVersion = "1.2.3-beta.2".parse()?;
//!     let round_tripped = CSVersion::from_ordinal(version.ordinal())?;
//!     assert_eq!(round_tripped, version);
//!     Ok(())
//! }
//! ```

pub mod bound;
pub mod csver;
pub mod error;
pub mod version;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use bound::{ParseResult, SVersionBound, SVersionLock};
pub use csver::{
    CSPrerelease, CSVersion, FileVersion, Stage, MAX_MAJOR, MAX_MINOR, MAX_PATCH,
    VERY_FIRST_ORDINAL, VERY_LAST_ORDINAL,
};
pub use error::{Error, Result};
pub use version::{PackageQuality, SVersion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

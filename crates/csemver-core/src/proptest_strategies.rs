//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! but valid instances of core CSemVer types for property testing.

#![cfg(test)]

use crate::bound::{SVersionBound, SVersionLock};
use crate::csver::{CSPrerelease, CSVersion, Stage, VERY_LAST_ORDINAL};
use crate::version::{PackageQuality, SVersion};
use proptest::option;
use proptest::prelude::*;

/// Strategy for generating valid ordinals over the whole version space.
pub fn ordinal_strategy() -> impl Strategy<Value = u64> {
    1u64..=VERY_LAST_ORDINAL
}

/// Strategy for generating prerelease stages
pub fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::ALL.to_vec())
}

/// Strategy for generating CSemVer versions, release and prerelease alike.
///
/// Small component ranges keep the generated versions dense enough that
/// shrinking stays readable; the full-width extremes get dedicated unit
/// tests instead.
pub fn csversion_strategy() -> impl Strategy<Value = CSVersion> {
    (
        0u64..=30,
        0u64..=30,
        0u64..=30,
        option::of((stage_strategy(), 0u8..=99, 0u8..=99)),
    )
        .prop_map(|(major, minor, patch, prerelease)| {
            let prerelease = prerelease
                .map(|(stage, number, fix)| CSPrerelease::new(stage, number, fix).unwrap());
            CSVersion::with_prerelease(major, minor, patch, prerelease).unwrap()
        })
}

/// Strategy for generating loose SemVer versions.
pub fn sversion_strategy() -> impl Strategy<Value = SVersion> {
    (
        0u64..=30,
        0u64..=30,
        0u64..=30,
        option::of("[a-z]{1,6}(\\.[0-9]{1,2}){0,2}"),
    )
        .prop_map(|(major, minor, patch, prerelease)| match prerelease {
            None => SVersion::new(major, minor, patch),
            Some(label) => format!("{}.{}.{}-{}", major, minor, patch, label)
                .parse()
                .unwrap(),
        })
}

/// Strategy for generating lock levels
pub fn lock_strategy() -> impl Strategy<Value = SVersionLock> {
    prop_oneof![
        Just(SVersionLock::None),
        Just(SVersionLock::LockMajor),
        Just(SVersionLock::LockMinor),
        Just(SVersionLock::LockPatch),
        Just(SVersionLock::Lock),
    ]
}

/// Strategy for generating quality tiers
pub fn quality_strategy() -> impl Strategy<Value = PackageQuality> {
    prop_oneof![
        Just(PackageQuality::CI),
        Just(PackageQuality::Exploratory),
        Just(PackageQuality::Preview),
        Just(PackageQuality::ReleaseCandidate),
        Just(PackageQuality::Stable),
    ]
}

/// Strategy for generating version bounds
pub fn bound_strategy() -> impl Strategy<Value = SVersionBound> {
    (sversion_strategy(), lock_strategy(), quality_strategy())
        .prop_map(|(base, lock, quality)| SVersionBound::new(base, lock, quality))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_ordinal_codec_is_bijective(ordinal in ordinal_strategy()) {
            let version = CSVersion::from_ordinal(ordinal).unwrap();
            prop_assert_eq!(version.ordinal(), ordinal);
        }

        #[test]
        fn test_ordinal_order_is_version_order(a in csversion_strategy(), b in csversion_strategy()) {
            prop_assert_eq!(a.cmp(&b), a.ordinal().cmp(&b.ordinal()));
        }

        #[test]
        fn test_both_forms_reparse_to_same_ordinal(version in csversion_strategy()) {
            let long: CSVersion = version.to_long_string().parse().unwrap();
            let short: CSVersion = version.to_normalized_string().parse().unwrap();
            prop_assert_eq!(long.ordinal(), version.ordinal());
            prop_assert_eq!(short.ordinal(), version.ordinal());
        }

        #[test]
        fn test_union_contains_both(a in bound_strategy(), b in bound_strategy()) {
            let union = a.union(&b);
            prop_assert!(union.contains(&a));
            prop_assert!(union.contains(&b));
        }

        #[test]
        fn test_algebra_laws(a in bound_strategy(), b in bound_strategy()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
            prop_assert_eq!(a.intersect(&b), b.intersect(&a));
            if a.contains(&b) {
                prop_assert_eq!(a.union(&b), a.clone());
                prop_assert_eq!(a.intersect(&b), b.clone());
            }
        }

        #[test]
        fn test_native_syntax_round_trip(bound in bound_strategy()) {
            let reparsed: SVersionBound = bound.to_native_string().parse().unwrap();
            prop_assert_eq!(reparsed, bound);
        }
    }
}

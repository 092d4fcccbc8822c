//! Integration tests for the ordinal codec and the two textual forms


use csemver_core::{CSVersion, Error, VERY_FIRST_ORDINAL, VERY_LAST_ORDINAL};
use test_support::{ascending_ladder, cs};

#[test]
fn test_ladder_is_strictly_ascending_in_both_orders() {
    let ladder = ascending_ladder();
    for pair in ladder.windows(2) {
        assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        assert!(
            pair[0].ordinal() < pair[1].ordinal(),
            "ordinal order broken between {} and {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_codec_round_trips_the_ladder() {
    for version in ascending_ladder() {
        let decoded = CSVersion::from_ordinal(version.ordinal()).unwrap();
        assert_eq!(decoded, version);
        assert_eq!(decoded.to_normalized_string(), version.to_normalized_string());
    }
}

#[test]
fn test_space_endpoints() {
    assert_eq!(CSVersion::very_first().ordinal(), VERY_FIRST_ORDINAL);
    assert_eq!(CSVersion::very_first(), cs("0.0.0-alpha"));
    assert_eq!(CSVersion::very_last().ordinal(), VERY_LAST_ORDINAL);
    assert_eq!(CSVersion::very_last(), cs("99999.49999.9999"));
}

#[test]
fn test_invalid_ordinals_are_rejected() {
    assert!(matches!(CSVersion::from_ordinal(0), Err(Error::ZeroOrdinal)));
    assert!(matches!(
        CSVersion::from_ordinal(VERY_LAST_ORDINAL + 1),
        Err(Error::OrdinalOutOfRange { .. })
    ));
}

#[test]
fn test_consecutive_ordinals_are_consecutive_versions() {
    // Walking one ordinal at a time from a stage boundary crosses the
    // fix, number, stage and release boundaries in that order.
    let start = cs("3.2.1-rc.99.98").ordinal();
    let walked: Vec<String> = (start..start + 3)
        .map(|o| CSVersion::from_ordinal(o).unwrap().to_string())
        .collect();
    assert_eq!(walked, ["3.2.1-rc.99.98", "3.2.1-rc.99.99", "3.2.1"]);
}

#[test]
fn test_forms_share_the_ordinal() {
    let long = cs("1.2.3-beta.2.7");
    let short = cs("1.2.3-b02-07");
    assert_eq!(long, short);
    assert_eq!(long.ordinal(), short.ordinal());
    assert_eq!(long.to_normalized_string(), "1.2.3-b02-07");
    assert_eq!(short.to_long_string(), "1.2.3-beta.2.7");
}

#[test]
fn test_short_form_strings_sort_like_versions() {
    // Zero padding keeps the short form's ASCII sort aligned with the
    // version order within a patch level.
    let ladder = ascending_ladder();
    let mut prerelease_of_zero: Vec<String> = ladder
        .iter()
        .filter(|v| v.major() == 0 && v.minor() == 0 && v.patch() == 0 && v.is_prerelease())
        .map(|v| v.to_normalized_string())
        .collect();
    let sorted = {
        let mut s = prerelease_of_zero.clone();
        s.sort();
        s
    };
    assert_eq!(prerelease_of_zero, sorted);
    prerelease_of_zero.reverse();
    assert_ne!(prerelease_of_zero, sorted, "ladder has at least two entries");
}

#[test]
fn test_file_version_carries_the_ci_flag() {
    let version = cs("1.2.3");
    let release = version.file_version(false);
    let ci = version.file_version(true);
    assert_eq!(ci.packed(), release.packed() + 1);
    assert!(ci.is_ci_build());
    assert!(!release.is_ci_build());
    assert_eq!(release.packed(), version.ordinal() << 1);
}

#[test]
fn test_build_metadata_never_affects_the_ordinal() {
    let plain = cs("1.2.3-rc.1");
    let built = plain.clone().with_build_metadata(Some("sha.abc123")).unwrap();
    assert_eq!(built.ordinal(), plain.ordinal());
    assert_eq!(built, plain);
    assert_eq!(built.to_string(), "1.2.3-rc.1+sha.abc123");
}

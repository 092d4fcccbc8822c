//! The release-policy successor engine
//!
//! What may legally follow a version is a small rule table over the stage
//! list and the two numeric sub-levels, not ordinal adjacency: the direct
//! successors of `1.2.3` include `1.3.0`, which is nowhere near it in the
//! ordinal space. The returned sequence is finite, eagerly materialized
//! and strictly ascending by ordinal.

use super::{CSPrerelease, CSVersion, Stage, MAX_MAJOR, MAX_MINOR, MAX_PATCH};
use super::{MAX_PRERELEASE_FIX, MAX_PRERELEASE_NUMBER};

impl CSVersion {
    /// Enumerates every version that may legally follow this one.
    ///
    /// With `closest_only`, stage jumps beyond the immediately next stage
    /// are excluded, and each of the patch/minor/major bumps offers only
    /// its first prerelease stage; without it, the complete
    /// theoretically-valid set is returned. Empty only for
    /// [`CSVersion::very_last`].
    pub fn direct_successors(&self, closest_only: bool) -> Vec<CSVersion> {
        let mut successors = Vec::new();
        match self.prerelease() {
            Some(p) => self.prerelease_successors(*p, closest_only, &mut successors),
            None => self.release_successors(closest_only, &mut successors),
        }
        debug_assert!(successors.windows(2).all(|w| w[0].ordinal() < w[1].ordinal()));
        successors
    }

    /// True when `previous` may be directly followed by this version.
    ///
    /// This is membership in `previous.direct_successors(false)`, the
    /// release-policy relation, not ordinal adjacency.
    pub fn is_direct_predecessor(&self, previous: &CSVersion) -> bool {
        previous.direct_successors(false).contains(self)
    }

    fn prerelease_successors(
        &self,
        p: CSPrerelease,
        closest_only: bool,
        out: &mut Vec<CSVersion>,
    ) {
        let (major, minor, patch) = (self.major(), self.minor(), self.patch());
        if p.fix() < MAX_PRERELEASE_FIX {
            out.push(CSVersion::unchecked(
                major,
                minor,
                patch,
                Some(CSPrerelease::unchecked(p.stage(), p.number(), p.fix() + 1)),
            ));
        }
        if p.number() < MAX_PRERELEASE_NUMBER {
            out.push(CSVersion::unchecked(
                major,
                minor,
                patch,
                Some(CSPrerelease::unchecked(p.stage(), p.number() + 1, 0)),
            ));
        }
        if closest_only {
            if let Some(next_stage) = p.stage().next() {
                out.push(CSVersion::unchecked(
                    major,
                    minor,
                    patch,
                    Some(CSPrerelease::unchecked(next_stage, 0, 0)),
                ));
            }
        } else {
            for stage in p.stage().later() {
                out.push(CSVersion::unchecked(
                    major,
                    minor,
                    patch,
                    Some(CSPrerelease::unchecked(*stage, 0, 0)),
                ));
            }
        }
        out.push(CSVersion::unchecked(major, minor, patch, None));
    }

    fn release_successors(&self, closest_only: bool, out: &mut Vec<CSVersion>) {
        let (major, minor, patch) = (self.major(), self.minor(), self.patch());
        let mut bumps = Vec::with_capacity(3);
        if patch < MAX_PATCH {
            bumps.push((major, minor, patch + 1));
        }
        if minor < MAX_MINOR {
            bumps.push((major, minor + 1, 0));
        }
        if major < MAX_MAJOR {
            bumps.push((major + 1, 0, 0));
        }
        for (bump_major, bump_minor, bump_patch) in bumps {
            let stages: &[Stage] = if closest_only {
                &Stage::ALL[..1]
            } else {
                &Stage::ALL
            };
            for stage in stages {
                out.push(CSVersion::unchecked(
                    bump_major,
                    bump_minor,
                    bump_patch,
                    Some(CSPrerelease::unchecked(*stage, 0, 0)),
                ));
            }
            out.push(CSVersion::unchecked(bump_major, bump_minor, bump_patch, None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> CSVersion {
        CSVersion::parse(text).unwrap()
    }

    fn strings(versions: &[CSVersion]) -> Vec<String> {
        versions.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_closest_successors_of_prerelease() {
        let succ = v("1.2.3-beta.2").direct_successors(true);
        assert_eq!(
            strings(&succ),
            ["1.2.3-beta.2.1", "1.2.3-beta.3", "1.2.3-delta", "1.2.3"]
        );
    }

    #[test]
    fn test_full_successors_of_prerelease_reach_all_later_stages() {
        let succ = v("1.2.3-beta.2").direct_successors(false);
        assert_eq!(
            strings(&succ),
            [
                "1.2.3-beta.2.1",
                "1.2.3-beta.3",
                "1.2.3-delta",
                "1.2.3-epsilon",
                "1.2.3-gamma",
                "1.2.3-kappa",
                "1.2.3-preview",
                "1.2.3-rc",
                "1.2.3",
            ]
        );
    }

    #[test]
    fn test_closest_successors_of_release() {
        let succ = v("1.2.3").direct_successors(true);
        assert_eq!(
            strings(&succ),
            [
                "1.2.4-alpha",
                "1.2.4",
                "1.3.0-alpha",
                "1.3.0",
                "2.0.0-alpha",
                "2.0.0",
            ]
        );
    }

    #[test]
    fn test_full_successors_of_release() {
        let succ = v("1.2.3").direct_successors(false);
        // Three bumps, each with all eight stage starts plus the release.
        assert_eq!(succ.len(), 3 * (Stage::ALL.len() + 1));
        assert!(succ.contains(&v("1.2.4-rc")));
        assert!(succ.contains(&v("2.0.0-kappa")));
        assert!(!succ.contains(&v("1.2.5-alpha")));
    }

    #[test]
    fn test_rc_prerelease_has_no_next_stage() {
        let succ = v("1.2.3-rc.99.99").direct_successors(true);
        assert_eq!(strings(&succ), ["1.2.3"]);
    }

    #[test]
    fn test_very_last_has_no_successor() {
        assert!(CSVersion::very_last().direct_successors(false).is_empty());
        assert!(CSVersion::very_last().direct_successors(true).is_empty());
    }

    #[test]
    fn test_successors_strictly_ascending() {
        for text in ["0.0.0-alpha", "1.2.3-beta.2.9", "1.2.3", "0.0.0"] {
            for closest in [true, false] {
                let succ = v(text).direct_successors(closest);
                assert!(succ.windows(2).all(|w| w[0].ordinal() < w[1].ordinal()), "{}", text);
            }
        }
    }

    #[test]
    fn test_predecessor_relation() {
        let beta2 = v("1.2.3-beta.2");
        assert!(v("1.2.3").is_direct_predecessor(&beta2));
        assert!(v("1.2.3-rc").is_direct_predecessor(&beta2));
        assert!(!v("1.2.4").is_direct_predecessor(&beta2));
        assert!(!v("1.2.3-alpha").is_direct_predecessor(&beta2));
    }

    #[test]
    fn test_edge_bumps_respect_digit_widths() {
        let succ = v("99999.49999.9998").direct_successors(true);
        assert_eq!(strings(&succ), ["99999.49999.9999-alpha", "99999.49999.9999"]);
    }
}

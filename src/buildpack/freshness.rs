//! Buildpack version freshness
//!
//! Orders the versions observed for one buildpack name within each
//! major-version line and scores an installed version by how many releases
//! it trails the newest in its line. Freshness 0 means newest; the
//! deprecation rule allows a buildpack to trail by at most
//! [`BUILDPACK_FRESHNESS_CAP`] versions.

use std::collections::{BTreeMap, BTreeSet};

use semver::Version;

use crate::config::BUILDPACK_FRESHNESS_CAP;

/// Parse a buildpack version string into a semver::Version, normalizing
/// partial versions by padding with zeros.
///
/// Examples:
/// - "3" -> Version(3, 0, 0)
/// - "3.19" -> Version(3, 19, 0)
/// - "1.6.39" -> Version(1, 6, 39)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Versions observed for one buildpack name, grouped by major version and
/// sorted ascending within each group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionLadder {
    groups: BTreeMap<u64, Vec<Version>>,
}

impl VersionLadder {
    /// Build a ladder from the raw version strings observed for one name.
    ///
    /// Duplicate strings collapse before grouping. Strings that do not
    /// parse as dotted-numeric versions are skipped; raw-distinct strings
    /// that normalize to the same version (such as `3.19` and `3.19.0`)
    /// each keep their own rung.
    pub fn new<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = versions
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();

        let mut groups: BTreeMap<u64, Vec<Version>> = BTreeMap::new();
        for version in unique.iter().filter_map(|v| parse_version(v)) {
            groups.entry(version.major).or_default().push(version);
        }
        for group in groups.values_mut() {
            group.sort();
        }

        Self { groups }
    }

    /// Number of releases `version` trails the newest release in its
    /// major-version group. Returns 0 when the version cannot be parsed or
    /// is not present in the ladder.
    pub fn freshness(&self, version: &str) -> u32 {
        let Some(target) = parse_version(version) else {
            return 0;
        };
        let Some(group) = self.groups.get(&target.major) else {
            return 0;
        };
        match group.iter().position(|v| *v == target) {
            Some(rank) => (group.len() - rank - 1) as u32,
            None => 0,
        }
    }
}

/// Deprecation rule: a buildpack is current only when its version is known
/// and trails its major line by at most [`BUILDPACK_FRESHNESS_CAP`].
pub fn is_deprecated(version: &str, freshness: u32) -> bool {
    !(!version.is_empty() && freshness <= BUILDPACK_FRESHNESS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", Some((3, 0, 0)))]
    #[case("3.19", Some((3, 19, 0)))]
    #[case("1.6.39", Some((1, 6, 39)))]
    #[case("", None)]
    #[case("not-a-version", None)]
    fn parse_version_pads_partial_versions(
        #[case] input: &str,
        #[case] expected: Option<(u64, u64, u64)>,
    ) {
        let expected = expected.map(|(major, minor, patch)| Version::new(major, minor, patch));
        assert_eq!(parse_version(input), expected);
    }

    #[rstest]
    #[case("1.5.23", 0)]
    #[case("1.5.22", 1)]
    #[case("1.5.21", 2)]
    fn freshness_counts_releases_behind_newest(#[case] version: &str, #[case] expected: u32) {
        let ladder = VersionLadder::new(["1.5.23", "1.5.22", "1.5.21"]);
        assert_eq!(ladder.freshness(version), expected);
    }

    #[test]
    fn freshness_compares_numerically_not_lexically() {
        let ladder = VersionLadder::new(["1.9.0", "1.10.0"]);
        assert_eq!(ladder.freshness("1.10.0"), 0);
        assert_eq!(ladder.freshness("1.9.0"), 1);
    }

    #[test]
    fn freshness_is_scoped_to_the_major_line() {
        let ladder = VersionLadder::new(["3.18", "3.19", "3.20", "4.6.0", "4.6.1"]);
        assert_eq!(ladder.freshness("3.20"), 0);
        assert_eq!(ladder.freshness("3.18"), 2);
        assert_eq!(ladder.freshness("4.6.1"), 0);
        assert_eq!(ladder.freshness("4.6.0"), 1);
    }

    #[test]
    fn freshness_treats_padded_forms_as_equal() {
        let ladder = VersionLadder::new(["3.19", "3.20"]);
        assert_eq!(ladder.freshness("3.19.0"), 1);
        assert_eq!(ladder.freshness("3.20.0"), 0);
    }

    #[test]
    fn new_collapses_duplicate_strings() {
        let ladder = VersionLadder::new(["1.6.39", "1.6.39", "1.6.40"]);
        assert_eq!(ladder.freshness("1.6.39"), 1);
    }

    #[test]
    fn new_keeps_raw_distinct_equivalent_strings() {
        // "3.19" and "3.19.0" are distinct raw strings, so both occupy a rung.
        let ladder = VersionLadder::new(["3.19", "3.19.0", "3.20"]);
        assert_eq!(ladder.freshness("3.19"), 2);
        assert_eq!(ladder.freshness("3.20"), 0);
    }

    #[test]
    fn new_skips_unparsable_versions() {
        let ladder = VersionLadder::new(["1.0.0", "", "garbage", "1.0.1"]);
        assert_eq!(ladder.freshness("1.0.1"), 0);
        assert_eq!(ladder.freshness("1.0.0"), 1);
    }

    #[test]
    fn freshness_defaults_to_zero_for_unknown_versions() {
        let ladder = VersionLadder::new(["1.0.0"]);
        assert_eq!(ladder.freshness("9.9.9"), 0);
        assert_eq!(ladder.freshness(""), 0);
    }

    #[rstest]
    #[case("1.5.23", 0, false)]
    #[case("1.5.22", 1, false)]
    #[case("1.5.21", 2, true)]
    #[case("", 0, true)] // unknown version is never current
    fn is_deprecated_applies_the_freshness_cap(
        #[case] version: &str,
        #[case] freshness: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(is_deprecated(version, freshness), expected);
    }
}

//! Platform version value object.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap());

/// Platform version in `8.XX.XX` form. The build number (fourth
/// component of a directory name) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformVersion {
    pub major: u32,
    pub minor: u32,
    pub release: u32,
}

impl PlatformVersion {
    pub fn new(major: u32, minor: u32, release: u32) -> Self {
        Self {
            major,
            minor,
            release,
        }
    }

    /// Parse from `8.3.25`, `8.3.25.1257`, or a directory name containing
    /// such a version. Returns `None` without a 3-component match.
    pub fn parse(s: &str) -> Option<PlatformVersion> {
        let caps = VERSION_RE.captures(s)?;
        Some(PlatformVersion {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            release: caps[3].parse().ok()?,
        })
    }

    /// Weighted numeric distance for closest-match resolution.
    ///
    /// Major differences weigh 10000x, minor 100x, release 1x.
    pub fn distance_to(&self, other: &PlatformVersion) -> u32 {
        self.major.abs_diff(other.major) * 10_000
            + self.minor.abs_diff(other.minor) * 100
            + self.release.abs_diff(other.release)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

/// Find the version closest to `target` by weighted distance.
///
/// On a tie, prefers the higher version (more complete docs).
pub fn find_closest_version(
    target: PlatformVersion,
    available: &[PlatformVersion],
) -> Option<PlatformVersion> {
    available
        .iter()
        .copied()
        .min_by_key(|v| (target.distance_to(v), std::cmp::Reverse(*v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_version() {
        let v = PlatformVersion::parse("8.3.25").unwrap();
        assert_eq!(v, PlatformVersion::new(8, 3, 25));
    }

    #[test]
    fn test_parse_ignores_build_number() {
        let v = PlatformVersion::parse("8.3.25.1257").unwrap();
        assert_eq!(v, PlatformVersion::new(8, 3, 25));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(PlatformVersion::parse("common").is_none());
        assert!(PlatformVersion::parse("8.3").is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(PlatformVersion::new(8, 3, 27) > PlatformVersion::new(8, 3, 18));
        assert!(PlatformVersion::new(9, 0, 0) > PlatformVersion::new(8, 3, 27));
    }

    #[test]
    fn test_distance_weighting() {
        let a = PlatformVersion::new(8, 3, 25);
        assert_eq!(a.distance_to(&PlatformVersion::new(8, 3, 27)), 2);
        assert_eq!(a.distance_to(&PlatformVersion::new(8, 2, 25)), 100);
        assert_eq!(a.distance_to(&PlatformVersion::new(9, 3, 25)), 10_000);
    }

    #[test]
    fn test_closest_prefers_higher_on_tie() {
        let target = PlatformVersion::new(8, 3, 20);
        let available = vec![PlatformVersion::new(8, 3, 18), PlatformVersion::new(8, 3, 22)];
        let closest = find_closest_version(target, &available).unwrap();
        assert_eq!(closest, PlatformVersion::new(8, 3, 22));
    }

    #[test]
    fn test_closest_empty() {
        assert!(find_closest_version(PlatformVersion::new(8, 3, 20), &[]).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(PlatformVersion::new(8, 3, 27).to_string(), "8.3.27");
    }
}

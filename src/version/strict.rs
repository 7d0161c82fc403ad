//! Strict dotted-numeric versions
//!
//! Accepts `MAJOR.MINOR[.PATCH]` with an optional alpha/beta tag such as
//! `1.2b3` or `0.4.1a1`. A missing patch component means 0. Tagged
//! versions order before the same release without a tag.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::{Prerelease, Version};

use crate::version::error::StrictParseError;

static STRICT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)(?:\.([0-9]+))?(?:([ab])([0-9]+))?$").expect("strict version pattern")
});

/// A version conforming to the strict grammar.
///
/// Comparison ignores whether the patch component was written, so `1.0`
/// equals `1.0.0`; the written shape is only kept for display.
#[derive(Debug, Clone)]
pub struct StrictVersion {
    version: Version,
    explicit_patch: bool,
}

impl StrictVersion {
    pub fn parse(input: &str) -> Result<Self, StrictParseError> {
        let caps = STRICT_VERSION
            .captures(input)
            .ok_or_else(|| StrictParseError::Invalid(input.to_string()))?;

        let number = |index: usize| -> Result<Option<u64>, StrictParseError> {
            caps.get(index)
                .map(|m| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|_| StrictParseError::Overflow(input.to_string()))
                })
                .transpose()
        };

        let major = number(1)?.unwrap_or_default();
        let minor = number(2)?.unwrap_or_default();
        let patch = number(3)?;

        let mut version = Version::new(major, minor, patch.unwrap_or_default());
        if let (Some(tag), Some(serial)) = (caps.get(4), number(5)?) {
            // Dotted so the serial is compared numerically (a2 < a10)
            version.pre = Prerelease::new(&format!("{}.{}", tag.as_str(), serial))
                .map_err(|_| StrictParseError::Invalid(input.to_string()))?;
        }

        Ok(Self {
            version,
            explicit_patch: patch.is_some(),
        })
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// Pre-release tag and serial, e.g. `('b', 3)` for `1.2b3`
    pub fn prerelease(&self) -> Option<(char, u64)> {
        let (tag, serial) = self.version.pre.as_str().split_once('.')?;
        Some((tag.chars().next()?, serial.parse().ok()?))
    }

    pub fn as_semver(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for StrictVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.version.major, self.version.minor)?;
        if self.explicit_patch {
            write!(f, ".{}", self.version.patch)?;
        }
        if let Some((tag, serial)) = self.prerelease() {
            write!(f, "{tag}{serial}")?;
        }
        Ok(())
    }
}

impl FromStr for StrictVersion {
    type Err = StrictParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for StrictVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for StrictVersion {}

impl Hash for StrictVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
    }
}

impl PartialOrd for StrictVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StrictVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

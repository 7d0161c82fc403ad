//! The resolved version of a component

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::version::error::IncomparableError;
use crate::version::loose::LooseVersion;
use crate::version::strict::StrictVersion;
use crate::version::unknown::UnknownVersion;

/// Version of a component as stored in the registry.
///
/// No `PartialEq`/`PartialOrd`: comparing against [`VersionValue::Unknown`]
/// is an error, so callers go through
/// [`VersionValue::try_eq`] and [`VersionValue::try_cmp`].
#[derive(Debug, Clone)]
pub enum VersionValue {
    Strict(StrictVersion),
    Loose(LooseVersion),
    Unknown(UnknownVersion),
}

impl VersionValue {
    pub const UNKNOWN: VersionValue = VersionValue::Unknown(UnknownVersion);

    /// Parse with the strict grammar, falling back to the loose one
    pub fn parse(input: &str) -> Self {
        match StrictVersion::parse(input) {
            Ok(strict) => VersionValue::Strict(strict),
            Err(_) => VersionValue::Loose(LooseVersion::parse(input)),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, VersionValue::Unknown(_))
    }

    /// Equality that refuses to answer for UNKNOWN against a real version
    pub fn try_eq(&self, other: &VersionValue) -> Result<bool, IncomparableError> {
        match (self, other) {
            (VersionValue::Unknown(unknown), _) => unknown.try_eq(other),
            (_, VersionValue::Unknown(unknown)) => unknown.try_eq(self),
            (VersionValue::Strict(a), VersionValue::Strict(b)) => Ok(a == b),
            _ => self.try_cmp(other).map(Ordering::is_eq),
        }
    }

    /// Ordering; fails whenever either side is UNKNOWN.
    ///
    /// A strict version compared with a loose one is compared with loose
    /// rules on its display form.
    pub fn try_cmp(&self, other: &VersionValue) -> Result<Ordering, IncomparableError> {
        match (self, other) {
            (VersionValue::Unknown(_), _) | (_, VersionValue::Unknown(_)) => {
                Err(IncomparableError)
            }
            (VersionValue::Strict(a), VersionValue::Strict(b)) => Ok(a.cmp(b)),
            (VersionValue::Loose(a), VersionValue::Loose(b)) => Ok(a.cmp(b)),
            (VersionValue::Strict(a), VersionValue::Loose(b)) => {
                Ok(LooseVersion::parse(&a.to_string()).cmp(b))
            }
            (VersionValue::Loose(a), VersionValue::Strict(b)) => {
                Ok(a.cmp(&LooseVersion::parse(&b.to_string())))
            }
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionValue::Strict(v) => fmt::Display::fmt(v, f),
            VersionValue::Loose(v) => fmt::Display::fmt(v, f),
            VersionValue::Unknown(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<StrictVersion> for VersionValue {
    fn from(version: StrictVersion) -> Self {
        VersionValue::Strict(version)
    }
}

impl From<LooseVersion> for VersionValue {
    fn from(version: LooseVersion) -> Self {
        VersionValue::Loose(version)
    }
}

impl Serialize for VersionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

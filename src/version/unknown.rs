//! Sentinel for a component whose version could not be determined

use std::fmt;

use crate::version::error::IncomparableError;
use crate::version::value::VersionValue;

/// The UNKNOWN version.
///
/// Equal only to itself. Any other comparison, and any ordering, is an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnknownVersion;

impl UnknownVersion {
    /// Equality against another version value.
    ///
    /// Returns `Ok(true)` for UNKNOWN and fails for any real version.
    pub fn try_eq(&self, other: &VersionValue) -> Result<bool, IncomparableError> {
        match other {
            VersionValue::Unknown(_) => Ok(true),
            VersionValue::Strict(_) | VersionValue::Loose(_) => Err(IncomparableError),
        }
    }
}

impl fmt::Display for UnknownVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UNKNOWN")
    }
}

//! Components whose versions are tracked, and the capabilities used to
//! find them
//!
//! - [`Component`]: a handle to a loaded component that can be probed for
//!   named attributes
//! - [`ComponentLoader`]: obtains handles by name
//! - [`MetadataSource`]: maps a distribution name to its installed version
//!
//! [`table`] holds in-memory implementations, [`site_packages`] reads an
//! on-disk Python package directory.

pub mod site_packages;
pub mod table;
pub mod types;

use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

#[cfg(test)]
use mockall::automock;
use regex::Regex;
use thiserror::Error;

pub use types::{AttributeValue, StaticComponent};

/// A live handle to a loaded component
pub trait Component: Send + Sync {
    /// Name the component was loaded under
    fn name(&self) -> &str;

    /// Value of the named attribute, or `None` if the component has no
    /// such attribute
    fn attribute(&self, name: &str) -> Option<AttributeValue>;
}

/// Capability to obtain component handles by name
#[cfg_attr(test, automock)]
pub trait ComponentLoader: Send + Sync {
    /// Handle of an already loaded component, without loading anything
    fn loaded(&self, name: &str) -> Option<Arc<dyn Component>>;

    /// Load the component, with whatever side effects loading has
    fn load(&self, name: &str) -> Result<Arc<dyn Component>, LoadError>;
}

/// Capability to look up the installed version of a distribution
#[cfg_attr(test, automock)]
pub trait MetadataSource: Send + Sync {
    fn distribution_version(&self, distribution: &str) -> Result<String, MetadataError>;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Component not found: {0}")]
    NotFound(String),

    #[error("Invalid component name: {0:?}")]
    InvalidName(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Distribution not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid metadata for {distribution}: {reason}")]
    Invalid {
        distribution: String,
        reason: String,
    },
}

static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("name separator pattern"));

/// Normalize a distribution name so that `Foo_Bar`, `foo-bar` and
/// `foo.bar` compare equal
pub fn normalize_distribution_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(name.trim(), "-")
        .to_ascii_lowercase()
}

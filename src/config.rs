use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::version::report::Indent;

/// Preamble of a rendered version report
pub const DEFAULT_PREAMBLE: &str = "Versions:";

/// Attributes probed for a version, in order of preference
pub const DEFAULT_VERSION_ATTRIBUTES: &[&str] = &["__version__", "version"];

/// Component names whose distribution is published under another name
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[("citeproc", "citeproc-py")];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub resolver: ResolverConfig,
    pub report: ReportConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// How component versions are looked up
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    pub version_attributes: Vec<String>,
    /// Extra component → distribution aliases, applied over
    /// [`DEFAULT_ALIASES`]
    pub aliases: BTreeMap<String, String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            version_attributes: DEFAULT_VERSION_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            aliases: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub preamble: String,
    pub indent: Indent,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            indent: Indent::Off,
        }
    }
}

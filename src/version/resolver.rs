//! Deduce the version of a loaded component
//!
//! 1. Probe the configured attributes (`__version__`, then `version`) and
//!    take the first one present. Sequences are joined with `.`.
//! 2. If that yields nothing, ask the metadata source for the component's
//!    distribution, translating names through the alias table.
//! 3. Parse the text as a strict version, falling back to a loose one.
//!    Without any text the version is UNKNOWN.

use std::collections::HashMap;

use tracing::debug;

use crate::component::{Component, MetadataSource};
use crate::config::{DEFAULT_ALIASES, ResolverConfig};
use crate::version::value::VersionValue;

pub struct VersionResolver {
    attributes: Vec<String>,
    aliases: HashMap<String, String>,
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl VersionResolver {
    pub fn new(config: &ResolverConfig) -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(name, distribution)| (name.to_string(), distribution.to_string()))
            .chain(config.aliases.clone())
            .collect();

        Self {
            attributes: config.version_attributes.clone(),
            aliases,
        }
    }

    /// Distribution name to query metadata with for a component name
    pub fn distribution_name<'a>(&'a self, component: &'a str) -> &'a str {
        self.aliases
            .get(component)
            .map_or(component, String::as_str)
    }

    /// Raw version text of a component, if any can be found
    pub fn version_text(
        &self,
        component: &dyn Component,
        metadata: &dyn MetadataSource,
    ) -> Option<String> {
        // Only the first attribute present counts, even when it is empty
        let attribute = self
            .attributes
            .iter()
            .find_map(|name| component.attribute(name).map(|value| (name, value)));

        if let Some((name, value)) = &attribute {
            if let Some(text) = value.version_text() {
                debug!("{} has {} = {}", component.name(), name, text);
                return Some(text);
            }
        }

        let distribution = self.distribution_name(component.name());
        match metadata.distribution_version(distribution) {
            Ok(version) if !version.is_empty() => {
                debug!(
                    "{} has distribution {} version {}",
                    component.name(),
                    distribution,
                    version
                );
                Some(version)
            }
            Ok(_) => None,
            Err(e) => {
                debug!(
                    "No metadata version for {} ({}): {}",
                    component.name(),
                    distribution,
                    e
                );
                None
            }
        }
    }

    pub fn resolve(&self, component: &dyn Component, metadata: &dyn MetadataSource) -> VersionValue {
        match self.version_text(component, metadata) {
            Some(text) => VersionValue::parse(&text),
            None => VersionValue::UNKNOWN,
        }
    }
}

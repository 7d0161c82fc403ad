//! Memoizing registry of component versions
//!
//! A component's version is resolved the first time it is looked up and
//! cached for the lifetime of the registry, UNKNOWN included. Components
//! that fail to load are not cached, so they are retried on the next
//! lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::component::{Component, ComponentLoader, MetadataSource};
use crate::config::ReportConfig;
use crate::version::report::{Indent, render};
use crate::version::resolver::VersionResolver;
use crate::version::value::VersionValue;

pub struct VersionRegistry {
    versions: Mutex<HashMap<String, VersionValue>>,
    loader: Arc<dyn ComponentLoader>,
    metadata: Arc<dyn MetadataSource>,
    resolver: VersionResolver,
}

impl VersionRegistry {
    pub fn new(loader: Arc<dyn ComponentLoader>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self {
            versions: Mutex::new(HashMap::new()),
            loader,
            metadata,
            resolver: VersionResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: VersionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The map only ever holds finished values, so a poisoned lock is safe
    /// to reuse
    fn lock_versions(&self) -> MutexGuard<'_, HashMap<String, VersionValue>> {
        self.versions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Version of the named component, loading it if necessary.
    ///
    /// Returns `None` if the component cannot be loaded; that outcome is
    /// not cached.
    pub fn lookup(&self, name: &str) -> Option<VersionValue> {
        if let Some(version) = self.lock_versions().get(name) {
            return Some(version.clone());
        }

        let component = match self.loader.loaded(name) {
            Some(component) => component,
            None => match self.loader.load(name) {
                Ok(component) => component,
                Err(e) => {
                    debug!("Cannot load {}: {}", name, e);
                    return None;
                }
            },
        };

        let version = self.resolver.resolve(component.as_ref(), self.metadata.as_ref());
        Some(self.store(name, version))
    }

    /// Version of an already loaded component, keyed by its name
    pub fn lookup_component(&self, component: &dyn Component) -> VersionValue {
        let name = component.name();
        if let Some(version) = self.lock_versions().get(name) {
            return version.clone();
        }

        let version = self.resolver.resolve(component, self.metadata.as_ref());
        self.store(name, version)
    }

    /// Cache a resolved version; if another caller got there first, theirs
    /// is kept and returned
    fn store(&self, name: &str, version: VersionValue) -> VersionValue {
        let mut versions = self.lock_versions();
        let stored = versions.entry(name.to_string()).or_insert_with(|| {
            info!("Resolved {} version {}", name, version);
            version
        });
        stored.clone()
    }

    /// Whether a version is cached for the name; never resolves anything
    pub fn contains(&self, name: &str) -> bool {
        self.lock_versions().contains_key(name)
    }

    /// Names with a cached version, in arbitrary order
    pub fn keys(&self) -> Vec<String> {
        self.lock_versions().keys().cloned().collect()
    }

    /// Copy of all cached versions
    pub fn versions(&self) -> HashMap<String, VersionValue> {
        self.lock_versions().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_versions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_versions().is_empty()
    }

    /// Render the cached versions, see [`render`]
    pub fn dumps(&self, indent: impl Into<Indent>, preamble: &str) -> String {
        let versions = self.lock_versions();
        render(
            versions.iter().map(|(name, version)| (name.as_str(), version)),
            &indent.into(),
            preamble,
        )
    }

    pub fn dumps_with(&self, config: &ReportConfig) -> String {
        self.dumps(config.indent.clone(), &config.preamble)
    }
}

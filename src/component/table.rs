//! In-memory loader and metadata source

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::component::{
    Component, ComponentLoader, LoadError, MetadataError, MetadataSource,
    normalize_distribution_name,
};

type Handles = HashMap<String, Arc<dyn Component>>;

/// Loader over a fixed set of installed components.
///
/// A component is only "loaded" once [`ComponentLoader::load`] has been
/// called for it; [`ComponentLoader::loaded`] never loads.
#[derive(Default)]
pub struct ComponentTable {
    installed: Mutex<Handles>,
    loaded: Mutex<Handles>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(self, component: impl Component + 'static) -> Self {
        self.install(component);
        self
    }

    /// Make a component available for loading
    pub fn install(&self, component: impl Component + 'static) {
        let name = component.name().to_string();
        debug!("Installing component {}", name);
        lock(&self.installed).insert(name, Arc::new(component));
    }

    /// Names of the components loaded so far
    pub fn loaded_names(&self) -> Vec<String> {
        lock(&self.loaded).keys().cloned().collect()
    }
}

fn lock(handles: &Mutex<Handles>) -> MutexGuard<'_, Handles> {
    handles.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ComponentLoader for ComponentTable {
    fn loaded(&self, name: &str) -> Option<Arc<dyn Component>> {
        lock(&self.loaded).get(name).cloned()
    }

    fn load(&self, name: &str) -> Result<Arc<dyn Component>, LoadError> {
        let component = lock(&self.installed)
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(name.to_string()))?;

        debug!("Loaded component {}", name);
        Ok(lock(&self.loaded)
            .entry(name.to_string())
            .or_insert(component)
            .clone())
    }
}

/// Metadata source over a fixed map of distribution versions
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    versions: HashMap<String, String>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distribution(mut self, name: &str, version: impl Into<String>) -> Self {
        self.versions
            .insert(normalize_distribution_name(name), version.into());
        self
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for StaticMetadata {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |metadata, (name, version)| {
                metadata.with_distribution(name.as_ref(), version)
            })
    }
}

impl MetadataSource for StaticMetadata {
    fn distribution_version(&self, distribution: &str) -> Result<String, MetadataError> {
        self.versions
            .get(&normalize_distribution_name(distribution))
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(distribution.to_string()))
    }
}

//! Capabilities that count how often they are used

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use external_versions::component::table::{ComponentTable, StaticMetadata};
use external_versions::component::{
    Component, ComponentLoader, LoadError, MetadataError, MetadataSource,
};

/// Loader wrapping a [`ComponentTable`]
pub struct CountingLoader {
    table: ComponentTable,
    loads: AtomicUsize,
}

impl CountingLoader {
    pub fn new(table: ComponentTable) -> Self {
        Self {
            table,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn table(&self) -> &ComponentTable {
        &self.table
    }
}

impl ComponentLoader for CountingLoader {
    fn loaded(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.table.loaded(name)
    }

    fn load(&self, name: &str) -> Result<Arc<dyn Component>, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.table.load(name)
    }
}

/// Metadata source wrapping a [`StaticMetadata`]
pub struct CountingMetadata {
    metadata: StaticMetadata,
    queries: AtomicUsize,
}

impl CountingMetadata {
    pub fn new(metadata: StaticMetadata) -> Self {
        Self {
            metadata,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl MetadataSource for CountingMetadata {
    fn distribution_version(&self, distribution: &str) -> Result<String, MetadataError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.metadata.distribution_version(distribution)
    }
}

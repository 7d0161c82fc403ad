//! On-disk package directory fixtures

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary `site-packages` directory
pub struct SitePackagesFixture {
    dir: TempDir,
}

impl SitePackagesFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// `<name>/__init__.py`
    pub fn with_package(self, name: &str, source: &str) -> Self {
        self.write(Path::new(name).join("__init__.py"), source);
        self
    }

    /// `<name>.py`
    pub fn with_module(self, name: &str, source: &str) -> Self {
        self.write(format!("{name}.py"), source);
        self
    }

    /// `<name>-<version>.dist-info/METADATA`, name escaped like wheels do
    pub fn with_dist_info(self, name: &str, version: &str) -> Self {
        let dir = format!("{}-{}.dist-info", name.replace('-', "_"), version);
        self.write(
            Path::new(&dir).join("METADATA"),
            &format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n\nLong description\n"),
        );
        self
    }

    /// `<name>.egg-info/PKG-INFO`
    pub fn with_egg_info(self, name: &str, version: &str) -> Self {
        let dir = format!("{}.egg-info", name.replace('-', "_"));
        self.write(
            Path::new(&dir).join("PKG-INFO"),
            &format!("Metadata-Version: 1.0\nName: {name}\nVersion: {version}\n"),
        );
        self
    }

    /// A dist-info directory whose METADATA lacks a Version header
    pub fn with_headerless_dist_info(self, name: &str, version: &str) -> Self {
        let dir = format!("{}-{}.dist-info", name.replace('-', "_"), version);
        self.write(Path::new(&dir).join("METADATA"), &format!("Name: {name}\n"));
        self
    }

    /// `<name>.dist-info` with neither a version in its name nor a Version header
    pub fn with_unversioned_dist_info(self, name: &str) -> Self {
        let dir = format!("{}.dist-info", name.replace('-', "_"));
        self.write(Path::new(&dir).join("METADATA"), &format!("Name: {name}\n"));
        self
    }
}

//! Python package directory (`site-packages`) as loader and metadata
//! source
//!
//! Modules are "loaded" by reading their source and picking up simple
//! top-level literal assignments such as `__version__ = "1.2.3"` or
//! `version = (1, 2, 3)`; nothing is executed. Distribution versions come
//! from `*.dist-info/METADATA` and `*.egg-info/PKG-INFO`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use regex::Regex;
use tracing::{debug, warn};

use crate::component::{
    AttributeValue, Component, ComponentLoader, LoadError, MetadataError, MetadataSource,
    normalize_distribution_name,
};

static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("module name pattern")
});

/// `name = value` or `name: annotation = value` at column 0
static TOP_LEVEL_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Za-z_][A-Za-z0-9_]*)[ \t]*(?::[^=\n]*)?=[ \t]*([^=\n].*?)[ \t]*\r?$")
        .expect("assignment pattern")
});

static SCALAR_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:'([^'\\]*)'|"([^"\\]*)"|(-?[0-9]+)|(None))[ \t]*(?:#.*)?$"#)
        .expect("scalar literal pattern")
});

static SEQUENCE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[(\[]([^()\[\]]*)[)\]][ \t]*(?:#.*)?$").expect("sequence literal pattern")
});

/// A module read from source
#[derive(Debug, Clone)]
pub struct ModuleSource {
    name: String,
    path: PathBuf,
    attributes: HashMap<String, AttributeValue>,
}

impl ModuleSource {
    pub fn parse(name: &str, path: PathBuf, source: &str) -> Self {
        // Later assignments win, as they would at import time. A value that
        // is not a literal still defines the name, but carries nothing.
        let code = strip_triple_quoted(source);
        let attributes = TOP_LEVEL_ASSIGNMENT
            .captures_iter(&code)
            .map(|caps| {
                let value = parse_literal(&caps[2]).unwrap_or(AttributeValue::None);
                (caps[1].to_string(), value)
            })
            .collect();

        Self {
            name: name.to_string(),
            path,
            attributes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Component for ModuleSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.get(name).cloned()
    }
}

/// Source lines outside `"""`/`'''` strings.
///
/// A line opening a string is kept; the lines up to and including the
/// closing one are dropped.
fn strip_triple_quoted(source: &str) -> String {
    let mut open: Option<&str> = None;
    let mut code = String::with_capacity(source.len());
    for line in source.lines() {
        let inside = open.is_some();
        let mut rest = line;
        loop {
            let next = match open {
                Some(delim) => rest.find(delim).map(|i| (i, None)),
                None => ["\"\"\"", "'''"]
                    .into_iter()
                    .filter_map(|delim| rest.find(delim).map(|i| (i, Some(delim))))
                    .min_by_key(|(i, _)| *i),
            };
            let Some((i, delim)) = next else { break };
            open = delim;
            rest = &rest[i + 3..];
        }
        if !inside {
            code.push_str(line);
            code.push('\n');
        }
    }
    code
}

fn parse_literal(text: &str) -> Option<AttributeValue> {
    if let Some(caps) = SEQUENCE_LITERAL.captures(text) {
        return caps[1]
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(parse_scalar)
            .collect::<Option<Vec<_>>>()
            .map(AttributeValue::Parts);
    }
    parse_scalar(text)
}

fn parse_scalar(text: &str) -> Option<AttributeValue> {
    let caps = SCALAR_LITERAL.captures(text)?;
    if let Some(s) = caps.get(1).or_else(|| caps.get(2)) {
        Some(AttributeValue::Text(s.as_str().to_string()))
    } else if let Some(n) = caps.get(3) {
        n.as_str().parse().ok().map(AttributeValue::Integer)
    } else {
        Some(AttributeValue::None)
    }
}

/// Loader and metadata source rooted at a package directory
pub struct SitePackages {
    root: PathBuf,
    modules: Mutex<HashMap<String, Arc<ModuleSource>>>,
}

impl SitePackages {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock_modules(&self) -> MutexGuard<'_, HashMap<String, Arc<ModuleSource>>> {
        self.modules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `pkg/__init__.py` for packages, `pkg.py` for plain modules
    fn module_path(&self, name: &str) -> Option<PathBuf> {
        let relative: PathBuf = name.split('.').collect();
        let package = self.root.join(&relative).join("__init__.py");
        if package.is_file() {
            return Some(package);
        }
        let module = self.root.join(relative).with_extension("py");
        module.is_file().then_some(module)
    }

    fn metadata_entries(&self) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut entries = fs::read_dir(&self.root)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.retain(|path| {
            path.extension()
                .is_some_and(|ext| ext == "dist-info" || ext == "egg-info")
        });
        entries.sort();
        Ok(entries)
    }
}

impl ComponentLoader for SitePackages {
    fn loaded(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.lock_modules()
            .get(name)
            .map(|module| Arc::clone(module) as Arc<dyn Component>)
    }

    fn load(&self, name: &str) -> Result<Arc<dyn Component>, LoadError> {
        if !MODULE_NAME.is_match(name) {
            return Err(LoadError::InvalidName(name.to_string()));
        }

        let path = self
            .module_path(name)
            .ok_or_else(|| LoadError::NotFound(name.to_string()))?;
        let source = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Loaded module {} from {:?}", name, path);
        let module = Arc::new(ModuleSource::parse(name, path, &source));
        let module = self
            .lock_modules()
            .entry(name.to_string())
            .or_insert(module)
            .clone();
        Ok(module as Arc<dyn Component>)
    }
}

impl MetadataSource for SitePackages {
    fn distribution_version(&self, distribution: &str) -> Result<String, MetadataError> {
        let wanted = normalize_distribution_name(distribution);

        let entries = match self.metadata_entries() {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MetadataError::NotFound(distribution.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut unversioned = Vec::new();
        for entry in entries {
            let Some(stem) = entry.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // <name>-<version>.dist-info, names escaped with underscores
            let (dir_name, dir_version) = match stem.split_once('-') {
                Some((name, version)) => (name, Some(version)),
                None => (stem, None),
            };
            if normalize_distribution_name(dir_name) != wanted {
                continue;
            }

            let metadata_file = if entry.is_file() {
                entry.clone()
            } else if entry.extension().is_some_and(|ext| ext == "dist-info") {
                entry.join("METADATA")
            } else {
                entry.join("PKG-INFO")
            };

            let headers = match fs::read_to_string(&metadata_file) {
                Ok(content) => parse_headers(&content),
                Err(e) => {
                    warn!("Failed to read {:?}: {}", metadata_file, e);
                    HashMap::new()
                }
            };

            if let Some(version) = headers
                .get("version")
                .map(String::as_str)
                .or(dir_version)
                .filter(|v| !v.is_empty())
            {
                debug!("Found {} {} in {:?}", distribution, version, entry);
                return Ok(version.to_string());
            }

            debug!("No version for {} in {:?}", distribution, entry);
            unversioned.push(entry.display().to_string());
        }

        if unversioned.is_empty() {
            Err(MetadataError::NotFound(distribution.to_string()))
        } else {
            Err(MetadataError::Invalid {
                distribution: distribution.to_string(),
                reason: format!("no version in {}", unversioned.join(", ")),
            })
        }
    }
}

/// Header block of a core metadata file, keys lowercased
fn parse_headers(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect()
}

//! Resolving versions from an on-disk package directory

mod helper;

use std::sync::Arc;

use helper::site_packages::SitePackagesFixture;

use external_versions::component::site_packages::SitePackages;
use external_versions::component::{ComponentLoader, LoadError, MetadataError, MetadataSource};
use external_versions::version::{VersionRegistry, VersionValue};

fn registry_for(fixture: &SitePackagesFixture) -> VersionRegistry {
    let packages = Arc::new(SitePackages::new(fixture.path()));
    VersionRegistry::new(packages.clone(), packages)
}

#[test]
fn version_attribute_in_package_source() {
    let fixture = SitePackagesFixture::new()
        .with_package("requests", "__title__ = 'requests'\n__version__ = '2.32.3'\n");
    let registry = registry_for(&fixture);

    let version = registry.lookup("requests").unwrap();

    assert!(matches!(version, VersionValue::Strict(_)));
    assert_eq!(version.to_string(), "2.32.3");
}

#[test]
fn tuple_version_in_module_source() {
    let fixture = SitePackagesFixture::new().with_module("six", "version = (1, 16, 0)\n");
    let registry = registry_for(&fixture);

    assert_eq!(registry.lookup("six").unwrap().to_string(), "1.16.0");
}

#[test]
fn dist_info_metadata_is_used_without_version_attribute() {
    let fixture = SitePackagesFixture::new()
        .with_package("yaml", "from .loader import *\n")
        .with_package("numpy", "from ._version import get_versions\n__version__ = get_versions()\n")
        .with_dist_info("numpy", "1.26.4");
    let registry = registry_for(&fixture);

    assert_eq!(registry.lookup("numpy").unwrap().to_string(), "1.26.4");
    assert!(registry.lookup("yaml").unwrap().is_unknown());
}

#[test]
fn citeproc_is_found_through_citeproc_py_distribution() {
    let fixture = SitePackagesFixture::new()
        .with_package("citeproc", "from .frontend import *\n")
        .with_dist_info("citeproc-py", "0.6.0");
    let registry = registry_for(&fixture);

    let version = registry.lookup("citeproc").unwrap();

    assert_eq!(version.try_eq(&VersionValue::parse("0.6.0")), Ok(true));
}

#[test]
fn egg_info_metadata_is_read() {
    let fixture = SitePackagesFixture::new()
        .with_package("legacy", "")
        .with_egg_info("legacy", "0.9.dev3");
    let registry = registry_for(&fixture);

    let version = registry.lookup("legacy").unwrap();

    assert!(matches!(version, VersionValue::Loose(_)));
    assert_eq!(version.to_string(), "0.9.dev3");
}

#[test]
fn directory_name_supplies_version_when_headers_lack_it() {
    let fixture = SitePackagesFixture::new().with_headerless_dist_info("bare-pkg", "3.0");
    let packages = SitePackages::new(fixture.path());

    assert_eq!(packages.distribution_version("Bare_Pkg").unwrap(), "3.0");
}

#[test]
fn computed_version_attribute_falls_back_to_metadata() {
    let fixture = SitePackagesFixture::new()
        .with_package("pkg", "__version__ = _compute()\nversion = '0.0.1-wrong'\n")
        .with_dist_info("pkg", "2.0");
    let registry = registry_for(&fixture);

    assert_eq!(registry.lookup("pkg").unwrap().to_string(), "2.0");
}

#[test]
fn docstring_assignments_do_not_define_the_version() {
    let fixture = SitePackagesFixture::new()
        .with_package(
            "doc",
            "\"\"\"\nExample:\n__version__ = 'from-docstring'\n\"\"\"\n",
        )
        .with_dist_info("doc", "3.1");
    let registry = registry_for(&fixture);

    assert_eq!(registry.lookup("doc").unwrap().to_string(), "3.1");
}

#[test]
fn later_metadata_entry_supplies_version() {
    let fixture = SitePackagesFixture::new()
        .with_unversioned_dist_info("pkg")
        .with_egg_info("pkg", "1.5");
    let packages = SitePackages::new(fixture.path());

    assert_eq!(packages.distribution_version("pkg").unwrap(), "1.5");
}

#[test]
fn metadata_without_any_version_is_invalid() {
    let fixture = SitePackagesFixture::new().with_unversioned_dist_info("pkg");
    let packages = SitePackages::new(fixture.path());

    assert!(matches!(
        packages.distribution_version("pkg"),
        Err(MetadataError::Invalid { distribution, .. }) if distribution == "pkg"
    ));
}

#[test]
fn missing_distribution_is_not_found() {
    let fixture = SitePackagesFixture::new().with_dist_info("numpy", "1.26.4");
    let packages = SitePackages::new(fixture.path());

    assert!(matches!(
        packages.distribution_version("scipy"),
        Err(MetadataError::NotFound(name)) if name == "scipy"
    ));
}

#[test]
fn module_added_after_failed_lookup_is_picked_up() {
    let fixture = SitePackagesFixture::new();
    let registry = registry_for(&fixture);
    assert!(registry.lookup("late").is_none());
    assert!(!registry.contains("late"));

    let _fixture = fixture.with_module("late", "__version__ = '0.1'\n");

    assert_eq!(registry.lookup("late").unwrap().to_string(), "0.1");
}

#[test]
fn loader_memoizes_loaded_modules() {
    let fixture = SitePackagesFixture::new().with_package("pkg", "__version__ = '1.0'\n");
    let packages = SitePackages::new(fixture.path());

    assert!(packages.loaded("pkg").is_none());
    let first = packages.load("pkg").unwrap();

    let again = packages.loaded("pkg").unwrap();
    assert!(Arc::ptr_eq(&first, &again));
}

#[test]
fn dotted_names_resolve_to_subpackages() {
    let fixture =
        SitePackagesFixture::new().with_package("pkg/sub", "__version__ = '2.1'\n");
    let registry = registry_for(&fixture);

    assert_eq!(registry.lookup("pkg.sub").unwrap().to_string(), "2.1");
}

#[test]
fn invalid_module_names_are_rejected() {
    let fixture = SitePackagesFixture::new();
    let packages = SitePackages::new(fixture.path());

    assert!(matches!(
        packages.load("../etc"),
        Err(LoadError::InvalidName(_))
    ));
}

#[test]
fn missing_root_degrades_gracefully() {
    let packages = Arc::new(SitePackages::new("/nonexistent/site-packages"));
    let registry = VersionRegistry::new(packages.clone(), packages.clone());

    assert!(registry.lookup("numpy").is_none());
    assert!(matches!(
        packages.distribution_version("numpy"),
        Err(MetadataError::NotFound(_))
    ));
}

#[test]
fn report_for_site_packages() {
    let fixture = SitePackagesFixture::new()
        .with_package("duecredit", "__version__ = '0.10.2'\n")
        .with_package("citeproc", "")
        .with_package("nipy", "");
    let registry = registry_for(&fixture);

    for name in ["nipy", "duecredit", "citeproc", "missing"] {
        registry.lookup(name);
    }

    assert_eq!(
        registry.dumps(false, "Versions:"),
        "Versions: citeproc=UNKNOWN duecredit=0.10.2 nipy=UNKNOWN"
    );
}

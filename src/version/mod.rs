//! Version resolution, comparison and reporting
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Loader    │────▶│  Registry   │────▶│   Report    │
//! │  (handles)  │     │   (cache)   │     │  (dumps)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//! ┌─────────────┐     ┌─────────────┐
//! │  Metadata   │◀────│  Resolver   │
//! │ (dist info) │     │ (attr/meta) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: memoizing name → version cache
//! - [`resolver`]: deduces a version from a component handle
//! - [`value`]: the `Strict | Loose | Unknown` version value
//! - [`strict`], [`loose`], [`unknown`]: the three representations
//! - [`report`]: text rendering of the cache
//! - [`error`]: comparison and parse errors

pub mod error;
pub mod loose;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod strict;
pub mod unknown;
pub mod value;

pub use error::IncomparableError;
pub use registry::VersionRegistry;
pub use value::VersionValue;

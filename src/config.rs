//! Scan configuration
//!
//! Configuration is a plain value assembled from command-line flags. There is no
//! config file and no environment lookup.

use std::ffi::OsStr;
use std::path::{Component, Path};

use serde::Serialize;

use crate::decode::DecodePolicy;

/// Stylesheet suffixes scanned when none are given
pub const DEFAULT_EXTENSIONS: &[&str] = &[".css", ".scss", ".sass", ".less"];

/// Dependency and build directories skipped unless asked otherwise
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "build", "dist", ".next"];

/// Settings for a single scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanConfig {
    /// File name suffixes to scan (case-sensitive, e.g. `.css`)
    pub extensions: Vec<String>,
    /// Directory names whose contents are skipped
    pub excluded_dirs: Vec<String>,
    /// Whether `excluded_dirs` is applied at all
    pub skip_excluded: bool,
    /// How undecodable bytes are handled
    pub decode_policy: DecodePolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(ToString::to_string).collect(),
            skip_excluded: true,
            decode_policy: DecodePolicy::default(),
        }
    }
}

impl ScanConfig {
    /// Replace the scanned extensions
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Scan inside `node_modules`, `.git`, `build`, `dist` and `.next` too
    #[must_use]
    pub fn include_excluded_dirs(mut self) -> Self {
        self.skip_excluded = false;
        self
    }

    /// Set the decoding policy
    #[must_use]
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Check whether a file name ends with one of the configured extensions
    #[must_use]
    pub fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    /// Check whether any component of `path` is an excluded directory name
    ///
    /// Pass the root-joined path: a root that itself sits inside `node_modules`
    /// excludes everything below it. Always `false` when exclusion is switched off.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.skip_excluded
            && path.components().any(|c| match c {
                Component::Normal(name) => self.excluded_dirs.iter().any(|d| name == OsStr::new(d)),
                _ => false,
            })
    }
}

//! Scanner - walks a directory tree and classifies every stylesheet in it
//!
//! The scanner validates the root, discovers candidate files in a deterministic
//! order, runs the classifier over each one and streams the results to a
//! [`ScanReporter`].
//!
//! # Examples
//!
//! ```no_run
//! use slashfind::config::ScanConfig;
//! use slashfind::output::HumanReporter;
//! use slashfind::scanner::Scanner;
//!
//! let scanner = Scanner::new("web/styles", ScanConfig::default()).unwrap();
//! let mut reporter = HumanReporter::new(std::io::stdout());
//! let summary = scanner.run(&mut reporter).unwrap();
//! println!("{} issue(s)", summary.total_issues);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::classifier::{Issue, classify_text};
use crate::config::ScanConfig;
use crate::decode::{DecodePolicy, decode};
use crate::output::ScanReporter;

/// Errors that abort a scan
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path does not exist
    #[error("directory '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    /// Root path is not a directory
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Writing the report failed
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// A candidate file found during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Path as reachable from the working directory (root joined)
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative: PathBuf,
}

/// Announced before any file is read
#[derive(Debug, Clone, Serialize)]
pub struct ScanStart {
    /// The scanned root, as given
    pub root: PathBuf,
    /// Number of candidate files
    pub file_count: usize,
    /// Directory names being skipped (empty when exclusion is off)
    pub excluded_dirs: Vec<String>,
}

/// Issues found in one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// Issues in line order
    pub issues: Vec<Issue>,
}

/// A file that could not be read
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// Path of the unreadable file, root joined
    pub path: PathBuf,
    /// Path relative to the scan root, as in [`FileReport::path`]
    pub relative: PathBuf,
    /// Why reading failed
    pub error: String,
}

/// Aggregate counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Candidate files processed, including ones that failed to read
    pub files_scanned: usize,
    /// Files with at least one issue
    pub files_with_issues: usize,
    /// Issues across all files
    pub total_issues: usize,
}

impl ScanSummary {
    /// Whether anything was flagged
    #[must_use]
    pub const fn has_issues(&self) -> bool {
        self.total_issues > 0
    }
}

/// Directory scanner bound to a validated root
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner, checking that `root` exists and is a directory
    pub fn new(root: impl AsRef<Path>, config: ScanConfig) -> Result<Self, ScanError> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            return Err(ScanError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        Ok(Self { root, config })
    }

    /// Get the root path
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Find all candidate files, sorted by relative path
    ///
    /// Unreadable directories are logged and skipped.
    #[must_use]
    pub fn discover(&self) -> Vec<ScanTarget> {
        let mut targets = Vec::new();
        let root = &self.root;

        for entry in WalkDir::new(root).into_iter().filter_entry(|e| {
            // Don't filter the root directory itself
            if e.depth() == 0 {
                return true;
            }
            !(e.file_type().is_dir() && self.config.is_excluded(Path::new(e.file_name())))
        }) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry: {err}");
                    continue;
                },
            };

            let path = entry.path();
            let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file());
            if !is_file || !self.config.matches_extension(&entry.file_name().to_string_lossy()) {
                continue;
            }

            if self.config.is_excluded(path) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

            targets.push(ScanTarget {
                path: path.to_path_buf(),
                relative,
            });
        }

        // Sort for deterministic output
        targets.sort_by(|a, b| a.relative.cmp(&b.relative));
        log::debug!("discovered {} candidate file(s) under {}", targets.len(), root.display());
        targets
    }

    /// Scan every candidate file, streaming results to `reporter`
    ///
    /// Files that cannot be read are reported as failures and count as scanned
    /// with zero issues. Only a failing reporter aborts the scan.
    pub fn run<R: ScanReporter + ?Sized>(&self, reporter: &mut R) -> Result<ScanSummary, ScanError> {
        let targets = self.discover();
        self.scan_targets(&targets, reporter)
    }

    /// Scan an explicit list of targets, streaming results to `reporter`
    ///
    /// Every target counts towards `files_scanned`, readable or not.
    pub fn scan_targets<R: ScanReporter + ?Sized>(
        &self,
        targets: &[ScanTarget],
        reporter: &mut R,
    ) -> Result<ScanSummary, ScanError> {
        reporter.start(&ScanStart {
            root: self.root.clone(),
            file_count: targets.len(),
            excluded_dirs: if self.config.skip_excluded {
                self.config.excluded_dirs.clone()
            } else {
                Vec::new()
            },
        })?;

        let mut summary = ScanSummary::default();

        for target in targets {
            summary.files_scanned += 1;

            match scan_file(&target.path, self.config.decode_policy) {
                Ok(issues) => {
                    log::debug!("{}: {} issue(s)", target.relative.display(), issues.len());
                    if issues.is_empty() {
                        continue;
                    }

                    summary.files_with_issues += 1;
                    summary.total_issues += issues.len();
                    reporter.file_flagged(&FileReport {
                        path: target.relative.clone(),
                        issues,
                    })?;
                },
                Err(err) => {
                    log::debug!("{}: read failed: {err}", target.path.display());
                    reporter.file_failed(&FileFailure {
                        path: target.path.clone(),
                        relative: target.relative.clone(),
                        error: err.to_string(),
                    })?;
                },
            }
        }

        reporter.finish(&summary)?;
        Ok(summary)
    }
}

/// Read one file and classify its lines
///
/// Undecodable bytes never cause an error; they are handled per `policy`.
pub fn scan_file(path: &Path, policy: DecodePolicy) -> io::Result<Vec<Issue>> {
    let bytes = fs::read(path)?;
    Ok(classify_text(&decode(&bytes, policy)))
}

//! slashfind - find forward slashes in stylesheets that may break CSS minifiers
//!
//! This library provides a line-oriented heuristic classifier for stylesheet text,
//! a directory scanner that drives it over a tree of `.css`/`.scss`/`.sass`/`.less`
//! files, and reporters that render the findings for humans or machines.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

pub mod classifier;
pub mod config;
pub mod decode;
pub mod output;
pub mod scanner;

pub use classifier::{Exemption, Issue, IssueCategory, classify_line, classify_text};
pub use config::ScanConfig;
pub use decode::DecodePolicy;
pub use output::{HumanReporter, JsonReporter, OutputMode, ScanReporter};
pub use scanner::{ScanError, ScanSummary, ScanTarget, Scanner, scan_file};

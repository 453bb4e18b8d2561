//! Output formatting for human and JSON modes
//!
//! Scan results are streamed to a [`ScanReporter`]. The human reporter writes
//! each section as soon as it is known; the JSON reporter collects everything
//! and emits one document when the scan finishes.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::scanner::{FileFailure, FileReport, ScanStart, ScanSummary};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

impl OutputMode {
    /// Build the reporter for this mode writing to `out`
    pub fn reporter<'a, W: Write + 'a>(self, out: W) -> Box<dyn ScanReporter + 'a> {
        match self {
            Self::Human => Box::new(HumanReporter::new(out)),
            Self::Json => Box::new(JsonReporter::new(out)),
        }
    }
}

/// Receives scan events in order: `start`, any number of file events, `finish`
pub trait ScanReporter {
    /// Called once, after discovery and before any file is read
    fn start(&mut self, start: &ScanStart) -> io::Result<()>;

    /// Called for each file with at least one issue
    fn file_flagged(&mut self, report: &FileReport) -> io::Result<()>;

    /// Called for each file that could not be read
    fn file_failed(&mut self, failure: &FileFailure) -> io::Result<()>;

    /// Called once with the final counters
    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()>;
}

/// Streams an emoji-decorated text report
#[derive(Debug)]
pub struct HumanReporter<W> {
    out: W,
}

impl<W: Write> HumanReporter<W> {
    /// Create a reporter writing to `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScanReporter for HumanReporter<W> {
    fn start(&mut self, start: &ScanStart) -> io::Result<()> {
        writeln!(
            self.out,
            "🔍 Starting aggressive scan on {} files in '{}'...",
            start.file_count,
            start.root.display()
        )?;
        if !start.excluded_dirs.is_empty() {
            writeln!(self.out, "📁 Skipping {} directories...", join_names(&start.excluded_dirs))?;
        }
        writeln!(self.out, "{}", "-".repeat(60))
    }

    fn file_flagged(&mut self, report: &FileReport) -> io::Result<()> {
        writeln!(self.out, "\n📄 {}", report.path.display().to_string().bold())?;
        writeln!(self.out, "{}", "=".repeat(40))?;

        for issue in &report.issues {
            writeln!(self.out, "  Line {:<4}: {}", issue.line_number, issue.category.as_str().yellow())?;
            writeln!(self.out, "    - Content: {}", issue.content)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn file_failed(&mut self, failure: &FileFailure) -> io::Result<()> {
        let line = format!("Error processing file {}: {}", failure.path.display(), failure.error);
        writeln!(self.out, "{}", line.red())
    }

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(60))?;
        writeln!(self.out, "📊 AGGRESSIVE SCAN SUMMARY")?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        writeln!(self.out, "Files scanned: {}", summary.files_scanned)?;
        writeln!(self.out, "Files with issues: {}", summary.files_with_issues)?;
        writeln!(self.out, "Total issues found: {}", summary.total_issues)?;

        if summary.has_issues() {
            let found = format!(
                "⚠️  Found {} potential issues in {} files.",
                summary.total_issues, summary.files_with_issues
            );
            writeln!(self.out, "\n{}", found.yellow())?;
            writeln!(self.out, "\nReview the lines listed above. The error is likely in one of them.")?;
            writeln!(
                self.out,
                "Common fixes include quoting URLs, ensuring comments are valid (`/* comment */`),"
            )?;
            writeln!(self.out, "or using `calc()` for mathematical division.")?;
        } else {
            let clean = "✅ No suspicious forward slashes found, even with aggressive scanning.";
            writeln!(self.out, "\n{}", clean.green())?;
        }
        self.out.flush()
    }
}

/// Join names as `a, b, and c`
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}

/// Full scan result as emitted by [`JsonReporter`]
#[derive(Debug, Default, Serialize)]
pub struct ScanDocument {
    /// The scanned root
    pub root: PathBuf,
    /// Directory names that were skipped
    pub excluded_dirs: Vec<String>,
    /// Files with issues, in scan order
    pub files: Vec<FileReport>,
    /// Files that could not be read
    pub failures: Vec<FileFailure>,
    /// Final counters
    pub summary: ScanSummary,
}

/// Collects the scan and writes a single pretty-printed JSON document
#[derive(Debug)]
pub struct JsonReporter<W> {
    out: W,
    document: ScanDocument,
}

impl<W: Write> JsonReporter<W> {
    /// Create a reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            document: ScanDocument::default(),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScanReporter for JsonReporter<W> {
    fn start(&mut self, start: &ScanStart) -> io::Result<()> {
        self.document.root.clone_from(&start.root);
        self.document.excluded_dirs.clone_from(&start.excluded_dirs);
        Ok(())
    }

    fn file_flagged(&mut self, report: &FileReport) -> io::Result<()> {
        self.document.files.push(report.clone());
        Ok(())
    }

    fn file_failed(&mut self, failure: &FileFailure) -> io::Result<()> {
        self.document.failures.push(failure.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()> {
        self.document.summary = *summary;
        serde_json::to_writer_pretty(&mut self.out, &self.document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

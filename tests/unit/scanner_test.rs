//! Tests for the Scanner module
//!
//! The scanner validates the root, discovers stylesheets and drives the
//! classifier over them, streaming events to a reporter.

use std::io;
use std::path::PathBuf;

use slashfind::config::ScanConfig;
use slashfind::decode::DecodePolicy;
use slashfind::output::ScanReporter;
use slashfind::scanner::{
    FileFailure, FileReport, ScanError, ScanStart, ScanSummary, ScanTarget, Scanner, scan_file,
};

use crate::common::TestTree;

/// Records every reporter event for inspection
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    start: Option<ScanStart>,
    files: Vec<FileReport>,
    failures: Vec<FileFailure>,
}

impl ScanReporter for Recorder {
    fn start(&mut self, start: &ScanStart) -> io::Result<()> {
        self.events.push("start".to_string());
        self.start = Some(start.clone());
        Ok(())
    }

    fn file_flagged(&mut self, report: &FileReport) -> io::Result<()> {
        self.events.push(format!("file:{}", report.path.display()));
        self.files.push(report.clone());
        Ok(())
    }

    fn file_failed(&mut self, failure: &FileFailure) -> io::Result<()> {
        self.events.push("failed".to_string());
        self.failures.push(failure.clone());
        Ok(())
    }

    fn finish(&mut self, _summary: &ScanSummary) -> io::Result<()> {
        self.events.push("finish".to_string());
        Ok(())
    }
}

fn relative_paths(scanner: &Scanner) -> Vec<PathBuf> {
    scanner.discover().into_iter().map(|t| t.relative).collect()
}

// =============================================================================
// Root Validation Tests
// =============================================================================

#[test]
fn missing_root_is_rejected() {
    let tree = TestTree::empty();
    let missing = tree.path().join("nope");
    let err = Scanner::new(&missing, ScanConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(ref p) if *p == missing));
}

#[test]
fn file_root_is_rejected() {
    let tree = TestTree::empty();
    tree.add_file("a.css", "a {}\n");
    let err = Scanner::new(tree.path().join("a.css"), ScanConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));
    assert!(err.to_string().contains("is not a directory"));
}

// =============================================================================
// Discovery Tests
// =============================================================================

#[test]
fn discover_skips_excluded_and_foreign_files() {
    let tree = TestTree::new();
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    assert_eq!(
        relative_paths(&scanner),
        vec![PathBuf::from("src/app.css"), PathBuf::from("src/theme/vars.scss")]
    );
}

#[test]
fn discover_includes_node_modules_when_asked() {
    let tree = TestTree::new();
    let config = ScanConfig::default().include_excluded_dirs();
    let scanner = Scanner::new(tree.path(), config).unwrap();
    let paths = relative_paths(&scanner);
    assert_eq!(paths.len(), 3);
    assert!(paths.contains(&PathBuf::from("node_modules/lib/lib.css")));
}

#[test]
fn discover_is_sorted() {
    let tree = TestTree::empty();
    tree.add_file("z.css", "");
    tree.add_file("a/b.less", "");
    tree.add_file("m.sass", "");
    tree.add_file("a.scss", "");
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    assert_eq!(
        relative_paths(&scanner),
        vec![
            PathBuf::from("a/b.less"),
            PathBuf::from("a.scss"),
            PathBuf::from("m.sass"),
            PathBuf::from("z.css"),
        ]
    );
}

#[test]
fn discover_ignores_directories_with_matching_suffix() {
    let tree = TestTree::empty();
    tree.add_dir("weird.css");
    tree.add_file("weird.css/inner.css", "a {}\n");
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    assert_eq!(relative_paths(&scanner), vec![PathBuf::from("weird.css/inner.css")]);
}

#[test]
fn discover_uses_custom_extensions() {
    let tree = TestTree::new();
    let config = ScanConfig::default().with_extensions([".md"]);
    let scanner = Scanner::new(tree.path(), config).unwrap();
    assert_eq!(relative_paths(&scanner), vec![PathBuf::from("README.md")]);
}

#[test]
fn root_inside_excluded_dir_is_skipped() {
    let tree = TestTree::empty();
    tree.add_file("node_modules/pkg/a.css", "x: 1/2;\n");
    let root = tree.path().join("node_modules/pkg");
    let scanner = Scanner::new(&root, ScanConfig::default()).unwrap();

    let summary = scanner.run(&mut Recorder::default()).unwrap();

    assert_eq!(summary.files_scanned, 0);
    assert_eq!(summary.total_issues, 0);
}

#[test]
fn root_inside_excluded_dir_is_scanned_when_included() {
    let tree = TestTree::empty();
    tree.add_file("build/site/a.css", "x: 1/2;\n");
    let config = ScanConfig::default().include_excluded_dirs();
    let scanner = Scanner::new(tree.path().join("build"), config).unwrap();
    assert_eq!(relative_paths(&scanner), vec![PathBuf::from("site/a.css")]);
}

#[test]
fn scanner_exposes_root_and_config() {
    let tree = TestTree::empty();
    let scanner = Scanner::new(tree.path(), ScanConfig::default().include_excluded_dirs()).unwrap();
    assert_eq!(scanner.root(), tree.path());
    assert!(!scanner.config().skip_excluded);
}

// =============================================================================
// Run Tests
// =============================================================================

#[test]
fn run_counts_and_reports() {
    let tree = TestTree::new();
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    let mut recorder = Recorder::default();

    let summary = scanner.run(&mut recorder).unwrap();

    assert_eq!(
        summary,
        ScanSummary {
            files_scanned: 2,
            files_with_issues: 1,
            total_issues: 1,
        }
    );
    assert_eq!(recorder.events, vec!["start", "file:src/app.css", "finish"]);

    let start = recorder.start.unwrap();
    assert_eq!(start.file_count, 2);
    assert_eq!(start.excluded_dirs.len(), 5);

    let issue = &recorder.files[0].issues[0];
    assert_eq!(issue.line_number, 3);
    assert_eq!(issue.content, "font: 12px/1.5 serif;");
}

#[test]
fn run_without_exclusion_reports_no_skipped_dirs() {
    let tree = TestTree::new();
    let config = ScanConfig::default().include_excluded_dirs();
    let scanner = Scanner::new(tree.path(), config).unwrap();
    let mut recorder = Recorder::default();

    let summary = scanner.run(&mut recorder).unwrap();

    assert_eq!(summary.files_scanned, 3);
    assert_eq!(summary.files_with_issues, 2);
    assert!(recorder.start.unwrap().excluded_dirs.is_empty());
}

#[test]
fn run_on_empty_directory() {
    let tree = TestTree::empty();
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    let mut recorder = Recorder::default();

    let summary = scanner.run(&mut recorder).unwrap();

    assert_eq!(summary, ScanSummary::default());
    assert!(!summary.has_issues());
    assert_eq!(recorder.events, vec!["start", "finish"]);
}

#[test]
fn files_scanned_counts_clean_files() {
    let tree = TestTree::empty();
    for i in 0..4 {
        tree.add_file(&format!("clean{i}.css"), "a { color: red; }\n");
    }
    tree.add_file("dirty.css", "a: 1/2;\nb: 3/4;\n");
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();

    let summary = scanner.run(&mut Recorder::default()).unwrap();

    assert_eq!(summary.files_scanned, 5);
    assert_eq!(summary.files_with_issues, 1);
    assert_eq!(summary.total_issues, 2);
}

#[test]
fn invalid_utf8_does_not_abort() {
    let tree = TestTree::empty();
    tree.add_bytes("binary.css", b"\xff\xfe a { b: 1/2; }\n\x80\x81\n");
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    let mut recorder = Recorder::default();

    let summary = scanner.run(&mut recorder).unwrap();

    assert_eq!(summary.total_issues, 1);
    assert!(recorder.failures.is_empty());
    assert_eq!(recorder.files[0].issues[0].content, "a { b: 1/2; }");
}

#[test]
fn unreadable_target_is_counted_and_scan_continues() {
    let tree = TestTree::empty();
    tree.add_file("real.css", "a: 1/2;\n");
    let scanner = Scanner::new(tree.path(), ScanConfig::default()).unwrap();
    let targets = vec![
        ScanTarget {
            path: tree.path().join("gone.css"),
            relative: PathBuf::from("gone.css"),
        },
        ScanTarget {
            path: tree.path().join("real.css"),
            relative: PathBuf::from("real.css"),
        },
    ];
    let mut recorder = Recorder::default();

    let summary = scanner.scan_targets(&targets, &mut recorder).unwrap();

    assert_eq!(
        summary,
        ScanSummary {
            files_scanned: 2,
            files_with_issues: 1,
            total_issues: 1,
        }
    );
    assert_eq!(recorder.events, vec!["start", "failed", "file:real.css", "finish"]);
    assert_eq!(recorder.failures.len(), 1);
    assert_eq!(recorder.failures[0].relative, PathBuf::from("gone.css"));
    assert_eq!(recorder.start.unwrap().file_count, 2);
}

// =============================================================================
// scan_file Tests
// =============================================================================

#[test]
fn scan_file_missing_is_error() {
    let tree = TestTree::empty();
    assert!(scan_file(&tree.path().join("gone.css"), DecodePolicy::Ignore).is_err());
}

#[test]
fn scan_file_replace_policy_keeps_marker() {
    let tree = TestTree::empty();
    tree.add_bytes("a.css", b"x: 1/\xff2;\n");
    let issues = scan_file(&tree.path().join("a.css"), DecodePolicy::Replace).unwrap();
    assert_eq!(issues[0].content, "x: 1/\u{FFFD}2;");
}

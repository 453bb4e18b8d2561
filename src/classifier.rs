//! Slash classifier - decides whether a stylesheet line has a suspicious `/`
//!
//! This module contains pure classification logic with no I/O dependencies.
//!
//! The scan is deliberately aggressive: every line containing a forward slash is
//! reported unless it matches one of a fixed set of exemptions that cover the
//! usual safe contexts (URLs, comments, data URIs, `calc()` and SVG path data).
//!
//! # Examples
//!
//! ```
//! use slashfind::classifier::classify_line;
//!
//! assert!(classify_line(1, "background: url(foo/bar.png);").is_none());
//!
//! let issue = classify_line(7, "  .grid { grid-template-columns: 1fr / 2fr; }").unwrap();
//! assert_eq!(issue.line_number, 7);
//! assert_eq!(issue.content, ".grid { grid-template-columns: 1fr / 2fr; }");
//! ```

use serde::Serialize;

use crate::decode;

/// Label attached to every issue describing how it was found
pub const AGGRESSIVE_RULE: &str = "Aggressive Scan: Flagged line with '/'";

/// Kind of finding produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IssueCategory {
    /// A forward slash outside any recognised safe context
    #[default]
    #[serde(rename = "Potential Problematic Slash")]
    ProblematicSlash,
}

impl IssueCategory {
    /// Human-readable label for this category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProblematicSlash => "Potential Problematic Slash",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single flagged line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// 1-based line number within the file
    pub line_number: usize,
    /// Line text with surrounding whitespace removed
    pub content: String,
    /// What kind of finding this is
    pub category: IssueCategory,
    /// Which detection mode flagged the line
    pub rule: &'static str,
}

/// A named rule that keeps a line containing `/` from being reported
#[derive(Debug, Clone, Copy)]
pub struct Exemption {
    /// Short stable identifier, used in logs
    pub name: &'static str,
    /// Predicate over the raw line and its trimmed form
    matches: fn(raw: &str, trimmed: &str) -> bool,
}

impl Exemption {
    /// Check whether this exemption applies to a line
    #[must_use]
    pub fn applies(&self, raw: &str) -> bool {
        (self.matches)(raw, trim_line(raw))
    }
}

/// Known-safe contexts for a forward slash, checked in this order
pub const EXEMPTIONS: &[Exemption] = &[
    Exemption {
        name: "url",
        matches: |raw, _| raw.contains("url("),
    },
    Exemption {
        name: "http",
        matches: |raw, _| raw.contains("http:"),
    },
    Exemption {
        name: "https",
        matches: |raw, _| raw.contains("https:"),
    },
    Exemption {
        name: "data-image",
        matches: |raw, _| raw.contains("data:image/"),
    },
    Exemption {
        name: "data-font",
        matches: |raw, _| raw.contains("data:font/"),
    },
    Exemption {
        name: "block-comment",
        matches: |raw, _| raw.contains("/*"),
    },
    Exemption {
        name: "line-comment",
        matches: |_, trimmed| trimmed.starts_with("//"),
    },
    // Whole-line: any slash on a line with calc( is exempt, not just the one inside it
    Exemption {
        name: "calc",
        matches: |raw, _| raw.contains("calc("),
    },
    Exemption {
        name: "svg-path",
        matches: |raw, _| raw.contains(" d=") && raw.contains("/>"),
    },
];

/// Strip surrounding whitespace, counting the ASCII separators `\x1c`..`\x1f`
#[must_use]
pub fn trim_line(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Find the first exemption that applies to a line, if any
#[must_use]
pub fn exemption_for(raw: &str) -> Option<&'static Exemption> {
    let trimmed = trim_line(raw);
    EXEMPTIONS.iter().find(|e| (e.matches)(raw, trimmed))
}

/// Classify a single line of stylesheet text
///
/// Returns `None` when the line has no `/` or matches an exemption.
///
/// # Arguments
///
/// * `line_number` - 1-based position of the line in its file
/// * `raw` - The untrimmed line text, without its line terminator
#[must_use]
pub fn classify_line(line_number: usize, raw: &str) -> Option<Issue> {
    if !raw.contains('/') {
        return None;
    }

    if let Some(exemption) = exemption_for(raw) {
        log::trace!("line {line_number}: exempt ({})", exemption.name);
        return None;
    }

    Some(Issue {
        line_number,
        content: trim_line(raw).to_string(),
        category: IssueCategory::ProblematicSlash,
        rule: AGGRESSIVE_RULE,
    })
}

/// Classify every line of a text, returning issues in line order
#[must_use]
pub fn classify_text(text: &str) -> Vec<Issue> {
    decode::lines(text)
        .enumerate()
        .filter_map(|(idx, line)| classify_line(idx + 1, line))
        .collect()
}

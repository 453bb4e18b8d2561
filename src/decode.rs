//! Lossy text decoding and line splitting
//!
//! Stylesheets in the wild are not always valid UTF-8. Decoding never fails:
//! invalid byte sequences are either dropped or replaced, depending on the
//! [`DecodePolicy`] in effect.

use std::borrow::Cow;

use serde::Serialize;

/// What to do with bytes that are not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Silently drop invalid sequences
    #[default]
    Ignore,
    /// Substitute U+FFFD for each invalid sequence
    Replace,
}

impl std::fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

impl std::str::FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "replace" => Ok(Self::Replace),
            _ => Err(format!("Invalid decode policy: {s}. Use: ignore, replace")),
        }
    }
}

/// Decode bytes as UTF-8 under the given policy
///
/// Valid input is borrowed without copying.
#[must_use]
pub fn decode(bytes: &[u8], policy: DecodePolicy) -> Cow<'_, str> {
    match policy {
        DecodePolicy::Replace => String::from_utf8_lossy(bytes),
        DecodePolicy::Ignore => match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => {
                let mut text = String::with_capacity(bytes.len());
                for chunk in bytes.utf8_chunks() {
                    text.push_str(chunk.valid());
                }
                Cow::Owned(text)
            },
        },
    }
}

/// Split text into lines at `\n`, `\r\n` or a lone `\r`
///
/// Terminators are not included. A trailing terminator does not start an
/// extra line.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    Lines { rest: Some(text) }
}

struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.take()?;
        if rest.is_empty() {
            return None;
        }

        match rest.find(['\n', '\r']) {
            Some(pos) => {
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&rest[pos + skip..]);
                Some(&rest[..pos])
            },
            None => Some(rest),
        }
    }
}

//! Version declaration rewrite.
//!
//! The manifest is treated as an opaque sequence of lines. Only the first line
//! beginning with `version =` is touched; every other byte passes through.

use crate::error::Result;
use regex::Regex;

/// Matches a declaration line and captures its quoted value, if any.
const VERSION_LINE_PATTERN: &str = r#"^version\s*=\s*(?:"([^"]*)")?"#;

/// Outcome of rewriting a manifest's version declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRewrite {
    /// Full manifest content after the rewrite.
    pub content: String,
    /// 1-based line number of the replaced declaration.
    pub line_number: Option<usize>,
    /// Quoted value of the replaced declaration.
    pub previous: Option<String>,
    /// Replaced line, without its line ending.
    pub original_line: Option<String>,
}

impl VersionRewrite {
    /// Returns `true` if a declaration line was found and replaced.
    pub fn matched(&self) -> bool {
        self.line_number.is_some()
    }
}

pub(crate) fn version_line_regex() -> Result<Regex> {
    Ok(Regex::new(VERSION_LINE_PATTERN)?)
}

/// Renders the declaration line for `version`.
pub fn declaration_line(version: &str) -> String {
    format!(r#"version = "{}""#, version)
}

/// Replaces the first `version = ...` line with a declaration of `new_version`.
///
/// Later lines that also match are left untouched, as are line endings
/// (`\n`, `\r\n`, or none on the last line).
///
/// A manifest without a declaration line is returned unchanged; detecting
/// that case is left to verification.
///
/// # Examples
///
/// ```
/// # use cargo_bump::cargo::version::rewrite_version_line;
/// let input = "name = \"x\"\nversion = \"1.2.3\"\nedition = \"2021\"\n";
/// let out = rewrite_version_line(input, "1.3.0").unwrap();
/// assert_eq!(out.content, "name = \"x\"\nversion = \"1.3.0\"\nedition = \"2021\"\n");
/// assert_eq!(out.previous.as_deref(), Some("1.2.3"));
/// ```
pub fn rewrite_version_line(content: &str, new_version: &str) -> Result<VersionRewrite> {
    let pattern = version_line_regex()?;

    let mut output = String::with_capacity(content.len() + new_version.len());
    let mut line_number = None;
    let mut previous = None;
    let mut original_line = None;

    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        let (body, ending) = split_line_ending(raw);

        if line_number.is_none() {
            if let Some(caps) = pattern.captures(body) {
                log::debug!("Version declaration at line {}: {}", idx + 1, body);
                line_number = Some(idx + 1);
                previous = caps.get(1).map(|m| m.as_str().to_string());
                original_line = Some(body.to_string());

                output.push_str(&declaration_line(new_version));
                output.push_str(ending);
                continue;
            }
        }

        output.push_str(raw);
    }

    if line_number.is_none() {
        log::debug!("No version declaration found");
    }

    Ok(VersionRewrite {
        content: output,
        line_number,
        previous,
        original_line,
    })
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, &raw[body.len()..])
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, &raw[body.len()..])
    } else {
        (raw, "")
    }
}

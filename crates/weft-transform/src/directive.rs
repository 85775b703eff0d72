//! Directive-comment grammar and line parser.
//!
//! Recognizes single-line comment directives of the form
//! `<!-- name:scope arg -->`. The amount of space padding inside the comment
//! varies; `name` is any run of characters excluding space, colon, and `>`;
//! `scope` excludes space and `>`; the optional `arg` excludes space and
//! hyphen. Only the `start` and `end` scopes drive span transitions, but any
//! grammar match is reported so the caller can decide.

use std::sync::LazyLock;

use regex::Regex;

/// First-match grammar for a directive comment.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- *([^: >]+):([^ >]+) *( ([^ -]+))? *-->").unwrap());

/// A directive comment recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirectiveLine<'a> {
    /// Instruction name the directive addresses.
    pub name: &'a str,
    /// Raw scope token; only `start` and `end` cause transitions.
    pub scope: &'a str,
    /// Optional argument, meaningful on `start`.
    pub arg: Option<&'a str>,
    /// Byte offset of the comment opener within the line.
    pub column: usize,
}

/// Parse a line for a directive comment.
///
/// Only the first match per line is recognized. Returns `None` when the line
/// carries no directive.
pub(crate) fn parse_line(line: &str) -> Option<DirectiveLine<'_>> {
    let caps = DIRECTIVE_RE.captures(line)?;
    let whole = caps.get(0)?;
    Some(DirectiveLine {
        name: caps.get(1).map_or("", |m| m.as_str()),
        scope: caps.get(2).map_or("", |m| m.as_str()),
        arg: caps.get(4).map(|m| m.as_str()),
        column: whole.start(),
    })
}

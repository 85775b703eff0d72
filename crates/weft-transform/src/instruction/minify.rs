//! Minified-reference rewriting instruction.

use std::sync::LazyLock;

use regex::Regex;

use super::{DropInstruction, Instruction};

/// First `<script ... src="*.js">` reference on a line, split before the
/// extension.
static SCRIPT_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(<script[^>]+src="[^"]+)(\.js")"#).unwrap());

/// First `<link ... href="*.css">` reference on a line, split before the
/// extension.
static LINK_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(<link[^>]+href="[^"]+)(\.css")"#).unwrap());

/// Instruction that rewrites asset references to their minified variants.
///
/// `process` rewrites the first `.js` extension following a
/// `<script ... src="...">` path to `.min.js`, and the first `.css`
/// extension following a `<link ... href="...">` path to `.min.css`. Tag
/// matching is case-insensitive; everything else on the line is left
/// byte-identical, and both patterns apply independently, so a line carrying
/// a script and a link reference is rewritten in both places. Lines without
/// a matching tag pass through unchanged.
///
/// `start` and `end` suppress the directive lines, like
/// [`DropInstruction`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MinifyInstruction {
    drop: DropInstruction,
}

impl MinifyInstruction {
    /// Create a new minified-reference rewriting instruction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Instruction for MinifyInstruction {
    fn start(
        &mut self,
        line: &str,
        name: &str,
        arg: Option<&str>,
        column: usize,
    ) -> Option<String> {
        self.drop.start(line, name, arg, column)
    }

    fn process(&mut self, line: &str) -> Option<String> {
        let rewritten = SCRIPT_SRC_RE.replace(line, "${1}.min${2}");
        let rewritten = LINK_HREF_RE.replace(&rewritten, "${1}.min${2}");
        Some(rewritten.into_owned())
    }

    fn end(&mut self, line: &str) -> Option<String> {
        self.drop.end(line)
    }
}

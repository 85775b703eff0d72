//! Script-reference aggregating instruction.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{DropInstruction, Instruction};

/// Callback invoked at span end with the ordered source paths and the
/// target name.
pub type AggregateCallback = dyn Fn(&[String], &str) + Send + Sync;

/// First `<script ... src="...">` path on a line.
static SCRIPT_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<script[^>]+src="([^"]+)""#).unwrap());

/// Instruction that collapses the script references of a span into one.
///
/// `start` records the directive argument as the target name and the
/// directive's column offset, `process` collects the source path of every
/// script reference it sees, and `end` replaces the whole span with a single
/// script tag for the target. All lines up to the closing directive are
/// suppressed, like [`DropInstruction`].
///
/// When a callback was supplied, `end` invokes it once with the ordered
/// collected paths and the target name before emitting the synthesized
/// line. The synthesized line is indented by one space more than the
/// opening directive's column offset; downstream consumers rely on that
/// exact width, so it is pinned by test rather than corrected.
#[derive(Default)]
pub struct AggregateInstruction {
    drop: DropInstruction,
    callback: Option<Arc<AggregateCallback>>,
    sources: Vec<String>,
    target: String,
    indent: usize,
}

impl AggregateInstruction {
    /// Create an aggregating instruction without a callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregating instruction that reports the collected paths
    /// at span end.
    ///
    /// The callback is shared, so one callback can serve every instance a
    /// factory produces.
    #[must_use]
    pub fn with_callback(callback: Arc<AggregateCallback>) -> Self {
        Self {
            callback: Some(callback),
            ..Self::default()
        }
    }
}

impl Instruction for AggregateInstruction {
    fn start(
        &mut self,
        line: &str,
        name: &str,
        arg: Option<&str>,
        column: usize,
    ) -> Option<String> {
        self.sources.clear();
        self.target = arg.unwrap_or_default().to_owned();
        self.indent = column + 1;
        self.drop.start(line, name, arg, column)
    }

    fn process(&mut self, line: &str) -> Option<String> {
        if let Some(caps) = SCRIPT_SRC_RE.captures(line) {
            if let Some(src) = caps.get(1) {
                self.sources.push(src.as_str().to_owned());
            }
        }
        self.drop.process(line)
    }

    fn end(&mut self, _line: &str) -> Option<String> {
        if let Some(callback) = &self.callback {
            callback(&self.sources, &self.target);
        }
        Some(format!(
            "{}<script src=\"{}\"></script>",
            " ".repeat(self.indent),
            self.target
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_suppresses_start() {
        let mut aggregate = AggregateInstruction::new();
        assert_eq!(aggregate.start("Start line", "build", None, 0), None);
    }

    #[test]
    fn test_suppresses_process() {
        let mut aggregate = AggregateInstruction::new();
        aggregate.start("", "build", Some("all.js"), 0);
        assert_eq!(aggregate.process("<script src=\"foo/bar.js\"></script>"), None);
    }

    #[test]
    fn test_end_emits_indented_target_reference() {
        let mut aggregate = AggregateInstruction::new();
        aggregate.start("", "build", Some("foobar.js"), 2);
        assert_eq!(
            aggregate.end("end line"),
            Some("   <script src=\"foobar.js\"></script>".to_owned())
        );
    }

    #[test]
    fn test_collects_ordered_sources_and_reports_them() {
        let seen: Arc<Mutex<Vec<(Vec<String>, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: Arc<AggregateCallback> = Arc::new(move |sources, target| {
            sink.lock()
                .unwrap()
                .push((sources.to_vec(), target.to_owned()));
        });

        let mut aggregate = AggregateInstruction::with_callback(callback);
        aggregate.start("", "build", Some("foobar.js"), 2);
        aggregate.process("  <script src=\"foo/bar.js\"></script>");
        aggregate.process("yada");
        aggregate.process("<script src=\"bar/foo.js\"></script>");
        aggregate.end("end line");

        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (
                vec!["foo/bar.js".to_owned(), "bar/foo.js".to_owned()],
                "foobar.js".to_owned()
            )
        );
    }

    #[test]
    fn test_missing_callback_is_not_an_error() {
        let mut aggregate = AggregateInstruction::new();
        aggregate.start("", "build", Some("all.js"), 0);
        aggregate.process("<script src=\"a.js\"></script>");
        assert_eq!(
            aggregate.end(""),
            Some(" <script src=\"all.js\"></script>".to_owned())
        );
    }

    #[test]
    fn test_start_resets_collected_state() {
        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: Arc<AggregateCallback> =
            Arc::new(move |sources, _target| sink.lock().unwrap().push(sources.to_vec()));

        let mut aggregate = AggregateInstruction::with_callback(callback);
        aggregate.start("", "build", Some("first.js"), 0);
        aggregate.process("<script src=\"stale.js\"></script>");
        aggregate.end("");

        aggregate.start("", "build", Some("second.js"), 4);
        aggregate.process("<script src=\"fresh.js\"></script>");
        assert_eq!(
            aggregate.end(""),
            Some("     <script src=\"second.js\"></script>".to_owned())
        );

        let calls = seen.lock().unwrap();
        assert_eq!(calls[1], vec!["fresh.js".to_owned()]);
    }

    #[test]
    fn test_missing_argument_yields_empty_target() {
        let mut aggregate = AggregateInstruction::new();
        aggregate.start("", "build", None, 0);
        assert_eq!(aggregate.end(""), Some(" <script src=\"\"></script>".to_owned()));
    }
}

//! Pluggable line-handling instructions.
//!
//! An instruction governs the lines of one directive span. The transform
//! calls [`start`](Instruction::start) on the line that opened the span,
//! [`process`](Instruction::process) on every content line inside it, and
//! [`end`](Instruction::end) on the line that closed it. Lines outside any
//! span go through the default instruction's `process`.
//!
//! Every operation returns `Option<String>`: `Some(line)` is emitted into
//! the output stream, `None` suppresses the line entirely (no text, no line
//! feed). `None` is distinct from `Some(String::new())`, which emits an
//! empty line.
//!
//! A fresh instance is created per span through an
//! [`InstructionFactory`](crate::InstructionFactory), so state built up in
//! `start`/`process` never leaks between spans.
//!
//! # Example
//!
//! ```
//! use weft_transform::instruction::Instruction;
//!
//! /// Upper-cases span content and swallows the directive lines.
//! struct Shout;
//!
//! impl Instruction for Shout {
//!     fn start(&mut self, _line: &str, _name: &str, _arg: Option<&str>, _column: usize) -> Option<String> {
//!         None
//!     }
//!
//!     fn process(&mut self, line: &str) -> Option<String> {
//!         Some(line.to_uppercase())
//!     }
//!
//!     fn end(&mut self, _line: &str) -> Option<String> {
//!         None
//!     }
//! }
//! ```

mod aggregate;
mod drop;
mod identity;
mod minify;

pub use aggregate::{AggregateCallback, AggregateInstruction};
pub use drop::DropInstruction;
pub use identity::IdentityInstruction;
pub use minify::MinifyInstruction;

/// Handler for the lines of one directive span.
///
/// # Thread Safety
///
/// Instructions implement `Send` only (not `Sync`) since each transform owns
/// its instances exclusively. For parallel stream processing, create a
/// separate transform per thread.
pub trait Instruction: Send {
    /// Handle the directive line that opened the span.
    ///
    /// `name` and `arg` are the directive's parsed name and optional
    /// argument; `column` is the byte offset of the comment opener within
    /// the line. Returns the replacement line, or `None` to suppress the
    /// directive line.
    fn start(
        &mut self,
        line: &str,
        name: &str,
        arg: Option<&str>,
        column: usize,
    ) -> Option<String>;

    /// Handle one content line inside the span.
    ///
    /// Also serves every line outside spans when the instruction is the
    /// transform's default.
    fn process(&mut self, line: &str) -> Option<String>;

    /// Handle the directive line that closed the span.
    fn end(&mut self, line: &str) -> Option<String>;
}

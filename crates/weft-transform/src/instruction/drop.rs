//! Suppressing instruction.

use super::Instruction;

/// Instruction that suppresses every line of its span.
///
/// The directive lines themselves are swallowed too, so a dropped span
/// leaves no trace in the output. [`MinifyInstruction`](super::MinifyInstruction)
/// and [`AggregateInstruction`](super::AggregateInstruction) hold one of
/// these internally and delegate the operations they do not specialize.
#[derive(Clone, Copy, Debug, Default)]
pub struct DropInstruction;

impl DropInstruction {
    /// Create a new suppressing instruction.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Instruction for DropInstruction {
    fn start(
        &mut self,
        _line: &str,
        _name: &str,
        _arg: Option<&str>,
        _column: usize,
    ) -> Option<String> {
        None
    }

    fn process(&mut self, _line: &str) -> Option<String> {
        None
    }

    fn end(&mut self, _line: &str) -> Option<String> {
        None
    }
}

//! Pass-through instruction.

use super::Instruction;

/// Instruction that returns every line unchanged.
///
/// The usual default instruction: with it, content outside directive spans
/// round-trips byte-identically.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityInstruction;

impl IdentityInstruction {
    /// Create a new pass-through instruction.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Instruction for IdentityInstruction {
    fn start(
        &mut self,
        line: &str,
        _name: &str,
        _arg: Option<&str>,
        _column: usize,
    ) -> Option<String> {
        Some(line.to_owned())
    }

    fn process(&mut self, line: &str) -> Option<String> {
        Some(line.to_owned())
    }

    fn end(&mut self, line: &str) -> Option<String> {
        Some(line.to_owned())
    }
}

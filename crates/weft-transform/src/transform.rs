//! Directive-driven stream transform.
//!
//! [`DirectiveTransform`] consumes markup text in arbitrarily-sized chunks,
//! splits it into lines, and dispatches every line to the single active
//! [`Instruction`]. Directive comments move the machine between its idle
//! state, where the default instruction serves, and an open span governed by
//! an instruction freshly created from the registry.
//!
//! Per line, the first applicable rule wins:
//!
//! 1. `start` directive with a bound name: a new instance opens the span
//!    (replacing any open span without closing it) and handles the line.
//! 2. `start` directive with an unbound name: the line is dropped.
//! 3. `end` directive naming the open span: the span's instruction handles
//!    the line and the machine returns to idle.
//! 4. Any other directive match, and every ordinary line: the active
//!    instruction's `process` handles it.
//!
//! Output lines keep their original line feed; the final line of the
//! document is emitted without one, and suppressed lines contribute no
//! bytes at all.

use std::mem;

use crate::directive::{self, DirectiveLine};
use crate::error::TransformError;
use crate::instruction::Instruction;
use crate::registry::{InstructionFactory, InstructionRegistry};

/// Configuration for [`DirectiveTransform`].
///
/// A default-instruction factory is required; the instruction registry may
/// start empty.
///
/// # Example
///
/// ```
/// use weft_transform::instruction::{IdentityInstruction, MinifyInstruction};
/// use weft_transform::{DirectiveTransform, TransformConfig};
///
/// let config = TransformConfig::new()
///     .with_default_instruction(|| Box::new(IdentityInstruction::new()))
///     .with_instruction("min", || Box::new(MinifyInstruction::new()));
/// let transform = DirectiveTransform::new(config)?;
/// # let _ = transform;
/// # Ok::<(), weft_transform::TransformError>(())
/// ```
#[derive(Default)]
pub struct TransformConfig {
    default_instruction: Option<Box<InstructionFactory>>,
    instructions: InstructionRegistry,
}

impl TransformConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the factory for the instruction that serves lines outside any
    /// span.
    #[must_use]
    pub fn with_default_instruction<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Instruction> + Send + 'static,
    {
        self.default_instruction = Some(Box::new(factory));
        self
    }

    /// Bind a directive name to an instruction factory.
    #[must_use]
    pub fn with_instruction<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Instruction> + Send + 'static,
    {
        self.instructions.bind(name, factory);
        self
    }

    /// Use a prebuilt registry.
    #[must_use]
    pub fn with_instructions(mut self, instructions: InstructionRegistry) -> Self {
        self.instructions = instructions;
        self
    }
}

/// An open directive span and the instruction governing it.
struct ActiveSpan {
    name: String,
    instruction: Box<dyn Instruction>,
}

/// State machine that rewrites a markup stream line by line.
///
/// Feed input with [`push`](Self::push) and flush with
/// [`finish`](Self::finish), or use [`process`](Self::process) for whole
/// documents. An open span persists across `push` boundaries; only `finish`
/// returns the machine to idle, so one instance can serve a sequence of
/// documents.
pub struct DirectiveTransform {
    default_instruction: Box<dyn Instruction>,
    instructions: InstructionRegistry,
    active: Option<ActiveSpan>,
    /// Trailing partial line carried between chunks.
    pending: String,
}

impl DirectiveTransform {
    /// Create a transform from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingDefaultInstruction`] when the
    /// configuration carries no default-instruction factory.
    pub fn new(config: TransformConfig) -> Result<Self, TransformError> {
        let default_factory = config
            .default_instruction
            .ok_or(TransformError::MissingDefaultInstruction)?;
        Ok(Self {
            default_instruction: default_factory(),
            instructions: config.instructions,
            active: None,
            pending: String::new(),
        })
    }

    /// Feed a chunk of input, returning the output for its complete lines.
    ///
    /// A trailing line without a line feed is buffered until the next chunk
    /// or [`finish`](Self::finish); an open directive span carries across
    /// chunk boundaries.
    #[must_use]
    pub fn push(&mut self, chunk: &str) -> String {
        self.pending.push_str(chunk);
        let buffered = mem::take(&mut self.pending);

        let mut output = String::with_capacity(buffered.len());
        let mut rest = buffered.as_str();
        while let Some(pos) = rest.find('\n') {
            if let Some(line) = self.handle_line(&rest[..pos]) {
                output.push_str(&line);
                output.push('\n');
            }
            rest = &rest[pos + 1..];
        }

        self.pending = rest.to_owned();
        output
    }

    /// Flush the buffered final line and reset for the next document.
    ///
    /// The final line is emitted without a trailing line feed, so the output
    /// ends the way the input did. Any span still open is discarded without
    /// invoking its `end`.
    #[must_use]
    pub fn finish(&mut self) -> String {
        let last = mem::take(&mut self.pending);
        let output = self.handle_line(&last).unwrap_or_default();
        self.active = None;
        output
    }

    /// Transform a whole document in one call.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = self.push(input);
        output.push_str(&self.finish());
        output
    }

    /// Bind a directive name to an instruction factory, overwriting any
    /// existing binding.
    ///
    /// Like every registry mutation, the change is visible to the next line
    /// processed, even mid-stream; an already-open span keeps its
    /// instruction.
    pub fn bind_instruction<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Instruction> + Send + 'static,
    {
        self.instructions.bind(name, factory);
    }

    /// Merge every binding of `instructions` into the registry.
    pub fn bind_instructions(&mut self, instructions: InstructionRegistry) {
        self.instructions.bind_all(instructions);
    }

    /// Replace the registry wholesale.
    pub fn set_instructions(&mut self, instructions: InstructionRegistry) {
        self.instructions = instructions;
    }

    /// Remove every binding from the registry.
    pub fn clear_instructions(&mut self) {
        self.instructions.clear();
    }

    /// Remove one binding, returning its factory, or `None` when the name
    /// was not bound.
    pub fn remove_instruction(&mut self, name: &str) -> Option<Box<InstructionFactory>> {
        self.instructions.remove(name)
    }

    /// Read access to the instruction registry.
    #[must_use]
    pub fn instructions(&self) -> &InstructionRegistry {
        &self.instructions
    }

    /// Dispatch one line: directive transitions first, content otherwise.
    fn handle_line(&mut self, line: &str) -> Option<String> {
        match directive::parse_line(line) {
            Some(d) if d.scope == "start" => self.open_span(line, &d),
            Some(d) if d.scope == "end" => {
                match self.active.take_if(|span| span.name == d.name) {
                    Some(mut span) => {
                        tracing::debug!(name = %span.name, "closing directive span");
                        span.instruction.end(line)
                    }
                    // A mismatched end is ordinary content.
                    None => self.current_instruction().process(line),
                }
            }
            Some(_) | None => self.current_instruction().process(line),
        }
    }

    /// Open a span for a `start` directive, replacing any open span.
    fn open_span(&mut self, line: &str, d: &DirectiveLine<'_>) -> Option<String> {
        let Some(factory) = self.instructions.get(d.name) else {
            tracing::debug!(name = d.name, "no instruction bound for start directive");
            return None;
        };
        let mut instruction = factory();
        tracing::debug!(name = d.name, column = d.column, "opening directive span");
        let emitted = instruction.start(line, d.name, d.arg, d.column);
        self.active = Some(ActiveSpan {
            name: d.name.to_owned(),
            instruction,
        });
        emitted
    }

    /// The instruction currently governing line dispatch.
    fn current_instruction(&mut self) -> &mut dyn Instruction {
        match &mut self.active {
            Some(span) => span.instruction.as_mut(),
            None => self.default_instruction.as_mut(),
        }
    }
}

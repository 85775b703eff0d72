//! Name-to-factory registry for instructions.

use std::collections::HashMap;

use crate::instruction::Instruction;

/// Zero-argument factory producing a fresh [`Instruction`] per span.
pub type InstructionFactory = dyn Fn() -> Box<dyn Instruction> + Send;

/// Registry mapping directive names to instruction factories.
///
/// Consulted only when a `start` directive is recognized; insertion order is
/// irrelevant. Each lookup that opens a span invokes the factory, so every
/// span gets a fresh instruction instance.
#[derive(Default)]
pub struct InstructionRegistry {
    factories: HashMap<String, Box<InstructionFactory>>,
}

impl InstructionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a directive name to a factory, overwriting any existing binding.
    pub fn bind<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Instruction> + Send + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Merge every binding of `other` into this registry, overwriting on
    /// collision.
    pub fn bind_all(&mut self, other: InstructionRegistry) {
        self.factories.extend(other.factories);
    }

    /// Remove one binding, returning its factory, or `None` when the name
    /// was not bound.
    pub fn remove(&mut self, name: &str) -> Option<Box<InstructionFactory>> {
        self.factories.remove(name)
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.factories.clear();
    }

    /// Look up the factory bound to `name`.
    pub(crate) fn get(&self, name: &str) -> Option<&InstructionFactory> {
        self.factories.get(name).map(Box::as_ref)
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Whether the registry has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }
}

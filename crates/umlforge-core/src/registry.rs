//! Generator Registry (spec.md §4.D).
//!
//! A name-keyed registry of generator constructors, not generator
//! instances: each lookup builds a fresh `Box<dyn DiagramGenerator>`, since
//! the generators here hold no state worth sharing. A linear `Vec` rather
//! than a `HashMap` backs the table — at steady state there are three
//! entries, and a `Vec` gives us registration-order iteration in
//! `create_all`/`available` for free, which spec.md §4.D requires and a
//! hash map would not provide.

use crate::generators::{ClassDiagramGenerator, FlowDiagramGenerator, UseCaseDiagramGenerator};
use crate::types::{Result, UmlError};
use crate::DiagramGenerator;

type Constructor = fn() -> Box<dyn DiagramGenerator>;

pub struct GeneratorRegistry {
    entries: Vec<(&'static str, Constructor)>,
}

impl GeneratorRegistry {
    /// An empty registry with no generators registered.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// The registry populated with the three built-in generators, in the
    /// order `class`, `usecase`, `flow`.
    pub fn with_default_generators() -> Self {
        let mut registry = Self::new();
        registry.register("class", || Box::new(ClassDiagramGenerator));
        registry.register("usecase", || Box::new(UseCaseDiagramGenerator));
        registry.register("flow", || Box::new(FlowDiagramGenerator));
        registry
    }

    /// Register a generator constructor under `name`. A second registration
    /// under the same name replaces the first in place, preserving its
    /// original position.
    pub fn register(&mut self, name: &'static str, ctor: Constructor) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = ctor;
        } else {
            self.entries.push((name, ctor));
        }
    }

    /// Construct the generator registered under `name`.
    ///
    /// # Errors
    /// Returns `UmlError::UnknownGenerator` if `name` was never registered.
    pub fn create(&self, name: &str) -> Result<Box<dyn DiagramGenerator>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ctor)| ctor())
            .ok_or_else(|| UmlError::UnknownGenerator(name.to_string()))
    }

    /// Construct every registered generator, in registration order.
    pub fn create_all(&self) -> Vec<(&'static str, Box<dyn DiagramGenerator>)> {
        self.entries.iter().map(|(name, ctor)| (*name, ctor())).collect()
    }

    /// The registered names, in registration order.
    pub fn available(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_default_generators()
    }
}

//! Core type definitions for UML Forge
//!
//! ARCHITECTURE: Value objects only. The facade in `facade.rs` is the only
//! place that holds any (cached) state; everything in this module is plain
//! data, cheap to clone, and safe to share across threads.

use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Structural model (spec.md §3)
// ============================================================================

/// A single method parameter.
///
/// `type_name` is the textual rendering produced by the Extractor (see
/// `extract::render_type`), never a reified/resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub type_name: String,
}

/// A field declaration within a class, interface or enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub type_name: String,
    /// Raw source modifier keywords (`public`, `static`, `final`, ...),
    /// kept in first-seen order rather than a set — the visibility and
    /// `{static}`/`{abstract}` rendering rules only ever need "does this
    /// set contain X", and preserving source order costs nothing for the
    /// handful of modifiers a declaration can carry.
    pub modifiers: Vec<String>,
}

/// A method (or interface method signature) declaration.
///
/// `return_type` uses `"void"` as the sentinel for "no return type",
/// matching the Extractor's total type-rendering contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterInfo>,
    pub modifiers: Vec<String>,
    /// Tagged linearisation of the method body (empty for abstract/interface
    /// methods with no body). See `extract::body` for the grammar.
    pub body_statements: Vec<String>,
}

/// The declaration kind a `ClassInfo` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

/// A flat structural summary of one top-level (or nested) Java type
/// declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub kind: ClassKind,
    pub modifiers: Vec<String>,
    /// Single superclass (classes) or first super-interface (interfaces,
    /// a deliberate lossy simplification — see spec.md §9). `None` for
    /// enums and for classes/interfaces with no explicit supertype.
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    /// Non-empty only when `kind == ClassKind::Enum`.
    pub enum_constants: Vec<String>,
}

impl ClassInfo {
    pub(crate) fn new(name: String, kind: ClassKind) -> Self {
        Self {
            name,
            kind,
            modifiers: Vec::new(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            enum_constants: Vec::new(),
        }
    }

    /// A method is treated as public when `"public"` is among its
    /// modifiers, or when its modifier set is empty (package-private is
    /// classed as public). This is the Open Question preserved verbatim
    /// from spec.md §9 — a conscious heuristic, not a bug.
    pub(crate) fn is_public_or_unmodified(modifiers: &[String]) -> bool {
        modifiers.is_empty() || modifiers.iter().any(|m| m == "public")
    }
}

// ============================================================================
// Facade input/output (spec.md §3, §6)
// ============================================================================

/// One `(filename, source)` pair as handed to the facade.
pub type SourceFile = (String, String);

/// A source file mirrored verbatim into `ConversionResult.sources`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceEcho {
    pub filename: String,
    pub code: String,
}

/// The value object returned by `Facade::convert`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConversionResult {
    /// Keyed by registered generator name ("class", "usecase", "flow", ...).
    pub diagrams: BTreeMap<String, String>,
    /// One line per unit that failed to parse, `"filename: message"`.
    pub errors: Vec<String>,
    pub sources: Vec<SourceEcho>,
}

// ============================================================================
// Errors
// ============================================================================

/// Error types for UML Forge operations.
///
/// ARCHITECTURE: thiserror-derived, no panics in library code (enforced by
/// the `unwrap_used`/`expect_used`/`panic` clippy lints in Cargo.toml).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UmlError {
    /// A single compilation unit failed to parse. Recovered locally by the
    /// facade (spec.md §7) — never propagated out of `convert`.
    #[error("{filename}: {message}")]
    ParseError { filename: String, message: String },

    /// `Registry::create` was asked for a name that was never registered.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),
}

pub type Result<T> = std::result::Result<T, UmlError>;

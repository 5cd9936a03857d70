//! Diagram generator abstraction (spec.md §4.D) and the three built-in
//! renderers.
//!
//! ARCHITECTURE: Strategy + Template Method. `DiagramGenerator::generate`
//! is the template: it is the same for every generator and is not meant to
//! be overridden. Each concrete generator only supplies `directives` (extra
//! lines between `@startuml` and the body — empty by default) and `body`
//! (the diagram-specific content).

mod class_diagram;
mod flow_diagram;
mod usecase_diagram;

pub(crate) use class_diagram::ClassDiagramGenerator;
pub(crate) use flow_diagram::FlowDiagramGenerator;
pub(crate) use usecase_diagram::UseCaseDiagramGenerator;

use crate::types::ClassInfo;

/// A pluggable PlantUML diagram renderer.
pub trait DiagramGenerator {
    /// The name this generator is registered under ("class", "usecase",
    /// "flow", ...). Also the key under which its output lands in
    /// `ConversionResult.diagrams`.
    fn diagram_type(&self) -> &'static str;

    /// Extra lines emitted right after `@startuml`, before a blank line and
    /// the body. Most generators need none.
    fn directives(&self) -> Vec<String> {
        Vec::new()
    }

    /// The diagram-specific body lines, given the full structural model of
    /// every input source file (already aggregated by the facade).
    fn body(&self, classes: &[ClassInfo]) -> Vec<String>;

    /// Assemble `@startuml` / directives / blank line / body / `@enduml`.
    /// Not meant to be overridden.
    fn generate(&self, classes: &[ClassInfo]) -> String {
        let mut lines = vec!["@startuml".to_string()];
        lines.extend(self.directives());
        lines.push(String::new());
        lines.extend(self.body(classes));
        lines.push("@enduml".to_string());
        lines.join("\n")
    }
}

//! Class diagram generator (spec.md §4.C.1).

use super::DiagramGenerator;
use crate::types::{ClassInfo, ClassKind, FieldInfo, MethodInfo};
use std::collections::BTreeSet;

pub(crate) struct ClassDiagramGenerator;

impl DiagramGenerator for ClassDiagramGenerator {
    fn diagram_type(&self) -> &'static str {
        "class"
    }

    fn directives(&self) -> Vec<String> {
        vec!["skinparam classAttributeIconSize 0".to_string()]
    }

    fn body(&self, classes: &[ClassInfo]) -> Vec<String> {
        let mut lines = Vec::new();
        for class in classes {
            lines.extend(class_block(class));
        }
        lines.extend(relationships(classes));
        lines
    }
}

fn class_block(class: &ClassInfo) -> Vec<String> {
    let mut lines = vec![header(class)];

    if class.kind == ClassKind::Enum {
        for constant in &class.enum_constants {
            lines.push(format!("  {constant}"));
        }
        if !class.enum_constants.is_empty() && (!class.fields.is_empty() || !class.methods.is_empty()) {
            lines.push("  --".to_string());
        }
    }

    for field in &class.fields {
        lines.push(field_line(field));
    }

    if !class.fields.is_empty() && !class.methods.is_empty() {
        lines.push("  --".to_string());
    }

    for method in &class.methods {
        lines.push(method_line(method));
    }

    lines.push("}".to_string());
    lines
}

fn header(class: &ClassInfo) -> String {
    match class.kind {
        ClassKind::Interface => format!("interface {} {{", class.name),
        ClassKind::Enum => format!("enum {} {{", class.name),
        ClassKind::Class if class.modifiers.iter().any(|m| m == "abstract") => {
            format!("abstract class {} {{", class.name)
        }
        ClassKind::Class => format!("class {} {{", class.name),
    }
}

fn visibility_glyph(modifiers: &[String]) -> char {
    for modifier in modifiers {
        match modifier.as_str() {
            "public" => return '+',
            "private" => return '-',
            "protected" => return '#',
            _ => continue,
        }
    }
    '~'
}

fn field_line(field: &FieldInfo) -> String {
    let vis = visibility_glyph(&field.modifiers);
    let suffix = if field.modifiers.iter().any(|m| m == "static") {
        " {static}"
    } else {
        ""
    };
    format!("  {vis}{} : {}{suffix}", field.name, field.type_name)
}

fn method_line(method: &MethodInfo) -> String {
    let vis = visibility_glyph(&method.modifiers);
    let params = method
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.type_name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut suffix = String::new();
    if method.modifiers.iter().any(|m| m == "static") {
        suffix.push_str(" {static}");
    }
    if method.modifiers.iter().any(|m| m == "abstract") {
        suffix.push_str(" {abstract}");
    }

    format!(
        "  {vis}{}({params}) : {}{suffix}",
        method.name, method.return_type
    )
}

fn relationships(classes: &[ClassInfo]) -> Vec<String> {
    let known: BTreeSet<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    let mut lines = Vec::new();

    for class in classes {
        if let Some(parent) = &class.extends {
            if known.contains(parent.as_str()) {
                lines.push(format!("{parent} <|-- {}", class.name));
            }
        }
        for iface in &class.implements {
            if known.contains(iface.as_str()) {
                lines.push(format!("{iface} <|.. {}", class.name));
            }
        }
        for field in &class.fields {
            let base = base_type(&field.type_name);
            if base != class.name && known.contains(base) {
                lines.push(format!("{} --> {base} : {}", class.name, field.name));
            }
        }
    }

    lines
}

/// Invariant (ii): for a generic field type, the base type precedes `<`.
fn base_type(type_name: &str) -> &str {
    type_name.split('<').next().unwrap_or(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, type_name: &str, modifiers: &[&str]) -> FieldInfo {
        FieldInfo {
            name: name.to_string(),
            type_name: type_name.to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn method(name: &str, return_type: &str, modifiers: &[&str]) -> MethodInfo {
        MethodInfo {
            name: name.to_string(),
            return_type: return_type.to_string(),
            parameters: Vec::new(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            body_statements: Vec::new(),
        }
    }

    #[test]
    fn single_class_rendering() {
        let mut a = ClassInfo::new("A".to_string(), ClassKind::Class);
        a.fields.push(field("x", "int", &["private"]));
        a.methods.push(method("f", "void", &["public"]));

        let gen = ClassDiagramGenerator;
        let out = gen.generate(&[a]);
        assert!(out.contains("class A {"));
        assert!(out.contains("-x : int"));
        assert!(out.contains("  --"));
        assert!(out.contains("+f() : void"));
        assert!(out.contains("}"));
        assert!(!out.contains("-->"));
    }

    #[test]
    fn visibility_mapping() {
        assert_eq!(
            field_line(&field("x", "T", &["public", "static"])),
            "  +x : T {static}"
        );
        assert_eq!(field_line(&field("y", "T", &[])), "  ~y : T");
    }

    #[test]
    fn inheritance_and_interface_edges() {
        let base = ClassInfo::new("Base".to_string(), ClassKind::Class);
        let iface = ClassInfo::new("Iface".to_string(), ClassKind::Interface);
        let mut sub = ClassInfo::new("Sub".to_string(), ClassKind::Class);
        sub.extends = Some("Base".to_string());
        sub.implements = vec!["Iface".to_string()];

        let gen = ClassDiagramGenerator;
        let out = gen.generate(&[base, iface, sub]);
        assert!(out.contains("Base <|-- Sub"));
        assert!(out.contains("Iface <|.. Sub"));
    }

    #[test]
    fn relationship_gating_on_unknown_field_type() {
        let mut a = ClassInfo::new("A".to_string(), ClassKind::Class);
        a.fields.push(field("s", "String", &["private"]));
        let gen = ClassDiagramGenerator;
        let out = gen.generate(&[a]);
        assert!(!out.contains("-->"));
    }

    #[test]
    fn enum_constants_then_members() {
        let mut e = ClassInfo::new("Status".to_string(), ClassKind::Enum);
        e.enum_constants = vec!["ACTIVE".to_string(), "INACTIVE".to_string()];
        e.fields.push(field("code", "int", &["private"]));
        let gen = ClassDiagramGenerator;
        let out = gen.generate(&[e]);
        assert!(out.contains("enum Status {"));
        assert!(out.contains("  ACTIVE"));
        assert!(out.contains("  --"));
        assert!(out.contains("-code : int"));
    }
}

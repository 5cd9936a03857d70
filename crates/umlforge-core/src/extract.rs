//! Structural Extractor (spec.md §4.B)
//!
//! ARCHITECTURE: The only module, besides `ast.rs`, that touches
//! `tree_sitter::Node` directly. Walks a parsed compilation unit and
//! produces a flat `Vec<ClassInfo>` plus, for each method body, a tagged
//! linearisation of its control-flow skeleton.
//!
//! Every helper here is total: missing/unexpected grammar shapes degrade to
//! an empty string, an empty list, or a dropped statement rather than a
//! panic. The extractor is read-only and discards the tree as soon as
//! `extract` returns (spec.md §9 — AST ownership).

use crate::types::{ClassInfo, ClassKind, FieldInfo, MethodInfo, ParameterInfo};
use tree_sitter::{Node, Tree};

const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
];

/// Extract every class/interface/enum declaration in the compilation unit,
/// in source order (nested declarations fall out of the same traversal;
/// their position relative to top-level siblings is unspecified, per
/// spec.md §4.B).
pub(crate) fn extract(tree: &Tree, source: &str) -> Vec<ClassInfo> {
    let mut out = Vec::new();
    collect_declarations(tree.root_node(), source, &mut out);
    out
}

fn collect_declarations(node: Node, source: &str, out: &mut Vec<ClassInfo>) {
    match node.kind() {
        "class_declaration" => out.push(extract_class(node, source)),
        "interface_declaration" => out.push(extract_interface(node, source)),
        "enum_declaration" => out.push(extract_enum(node, source)),
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_declarations(child, source, out);
    }
}

// ============================================================================
// Declaration extraction
// ============================================================================

fn extract_class(node: Node, source: &str) -> ClassInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source))
        .unwrap_or_default();
    let mut info = ClassInfo::new(name, ClassKind::Class);
    info.modifiers = collect_modifiers(node, source);

    if let Some(superclass) = find_child_of_kind(node, "superclass") {
        if let Some(t) = superclass.child_by_field_name("type") {
            info.extends = Some(render_type(t, source));
        }
    }

    info.implements = implements_list(node, source);

    if let Some(body) = node.child_by_field_name("body") {
        extract_fields(body, source, &mut info.fields);
        extract_methods(body, source, &mut info.methods);
    }

    info
}

fn extract_interface(node: Node, source: &str) -> ClassInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source))
        .unwrap_or_default();
    let mut info = ClassInfo::new(name, ClassKind::Interface);
    info.modifiers = collect_modifiers(node, source);

    // Lossy by design (spec.md §3, §9): only the first super-interface of a
    // possibly-multiple `extends` clause is retained.
    if let Some(ext) = find_child_of_kind(node, "extends_interfaces") {
        if let Some(type_list) = ext
            .child_by_field_name("type_list")
            .or_else(|| find_child_of_kind(ext, "type_list"))
        {
            let mut cursor = type_list.walk();
            if let Some(first) = type_list.named_children(&mut cursor).next() {
                info.extends = Some(render_type(first, source));
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        extract_fields(body, source, &mut info.fields);
        extract_methods(body, source, &mut info.methods);
    }

    info
}

fn extract_enum(node: Node, source: &str) -> ClassInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source))
        .unwrap_or_default();
    let mut info = ClassInfo::new(name, ClassKind::Enum);
    info.modifiers = collect_modifiers(node, source);
    info.implements = implements_list(node, source);

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if child.kind() == "enum_constant" {
                if let Some(n) = child.child_by_field_name("name") {
                    info.enum_constants.push(text(n, source));
                }
            }
        }

        if let Some(decls) = find_child_of_kind(body, "enum_body_declarations") {
            extract_fields(decls, source, &mut info.fields);
            extract_methods(decls, source, &mut info.methods);
        }
    }

    info
}

fn implements_list(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(ifaces) = find_child_of_kind(node, "super_interfaces") {
        if let Some(type_list) = ifaces
            .child_by_field_name("type_list")
            .or_else(|| find_child_of_kind(ifaces, "type_list"))
        {
            let mut cursor = type_list.walk();
            for t in type_list.named_children(&mut cursor) {
                out.push(render_type(t, source));
            }
        }
    }
    out
}

fn extract_fields(body: Node, source: &str, out: &mut Vec<FieldInfo>) {
    let mut cursor = body.walk();
    for decl in body.children(&mut cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }
        let type_name = decl
            .child_by_field_name("type")
            .map(|t| render_type(t, source))
            .unwrap_or_else(|| "void".to_string());
        let modifiers = collect_modifiers(decl, source);

        let mut dcursor = decl.walk();
        for declarator in decl.children(&mut dcursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            if let Some(name) = declarator.child_by_field_name("name") {
                out.push(FieldInfo {
                    name: text(name, source),
                    type_name: type_name.clone(),
                    modifiers: modifiers.clone(),
                });
            }
        }
    }
}

fn extract_methods(body: Node, source: &str, out: &mut Vec<MethodInfo>) {
    let mut cursor = body.walk();
    for decl in body.children(&mut cursor) {
        // Constructors are intentionally excluded: the structural model only
        // covers `method_declaration`, mirroring the original Java parser's
        // `ClassDeclaration.methods`, which never includes constructors.
        if decl.kind() != "method_declaration" {
            continue;
        }

        let name = decl
            .child_by_field_name("name")
            .map(|n| text(n, source))
            .unwrap_or_default();
        let return_type = decl
            .child_by_field_name("type")
            .map(|t| render_type(t, source))
            .unwrap_or_else(|| "void".to_string());
        let modifiers = collect_modifiers(decl, source);
        let parameters = decl
            .child_by_field_name("parameters")
            .map(|p| extract_parameters(p, source))
            .unwrap_or_default();

        let body_statements = decl
            .child_by_field_name("body")
            .filter(|b| b.kind() == "block")
            .map(|b| statements_of(b, source))
            .unwrap_or_default();

        out.push(MethodInfo {
            name,
            return_type,
            parameters,
            modifiers,
            body_statements,
        });
    }
}

fn extract_parameters(params: Node, source: &str) -> Vec<ParameterInfo> {
    let mut out = Vec::new();
    let mut cursor = params.walk();
    for param in params.children(&mut cursor) {
        match param.kind() {
            "formal_parameter" => {
                let type_node = param.child_by_field_name("type");
                let type_name = type_node
                    .map(|t| render_type(t, source))
                    .unwrap_or_else(|| "void".to_string());
                if let Some(name) = parameter_name(param, type_node) {
                    out.push(ParameterInfo {
                        name: text(name, source),
                        type_name,
                    });
                }
            }
            "spread_parameter" => {
                let type_node = param.child_by_field_name("type");
                let type_name = type_node
                    .map(|t| format!("{}...", render_type(t, source)))
                    .unwrap_or_else(|| "void...".to_string());
                if let Some(name) = parameter_name(param, type_node) {
                    out.push(ParameterInfo {
                        name: text(name, source),
                        type_name,
                    });
                }
            }
            _ => {}
        }
    }
    out
}

fn parameter_name<'a>(param: Node<'a>, type_node: Option<Node<'a>>) -> Option<Node<'a>> {
    param.child_by_field_name("name").or_else(|| {
        let type_id = type_node.map(|t| t.id());
        let mut cursor = param.walk();
        param
            .named_children(&mut cursor)
            .filter(|c| Some(c.id()) != type_id)
            .last()
    })
}

fn collect_modifiers(node: Node, source: &str) -> Vec<String> {
    let Some(modifiers_node) = find_child_of_kind(node, "modifiers") else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut cursor = modifiers_node.walk();
    for child in modifiers_node.children(&mut cursor) {
        if MODIFIER_KEYWORDS.contains(&child.kind()) {
            out.push(text(child, source));
        }
    }
    out
}

fn find_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

// ============================================================================
// Type rendering (spec.md §4.B "Type rendering")
// ============================================================================

pub(crate) fn render_type(node: Node, source: &str) -> String {
    match node.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
            text(node, source)
        }
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .or_else(|| node.named_child(0));
            let base = element.map(|e| render_type(e, source)).unwrap_or_default();
            format!("{base}[]")
        }
        "generic_type" => {
            let base_node = node.child_by_field_name("type").or_else(|| {
                let mut cursor = node.walk();
                node.named_children(&mut cursor)
                    .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
            });
            let base = base_node.map(|b| render_type(b, source)).unwrap_or_default();

            let args_node = node
                .child_by_field_name("arguments")
                .or_else(|| find_child_of_kind(node, "type_arguments"));
            let args: Vec<String> = args_node
                .map(|a| {
                    let mut cursor = a.walk();
                    a.named_children(&mut cursor)
                        .filter_map(|arg| render_type_argument(arg, source))
                        .collect()
                })
                .unwrap_or_default();

            if args.is_empty() {
                base
            } else {
                format!("{base}<{}>", args.join(", "))
            }
        }
        "scoped_type_identifier" => {
            let full = text(node, source);
            full.rsplit('.').next().unwrap_or(&full).to_string()
        }
        _ => text(node, source),
    }
}

/// Renders one generic type argument, dropping unbounded wildcards (`?`)
/// per spec.md §4.B: "arguments that are pure wildcards without a bound are
/// dropped".
fn render_type_argument(node: Node, source: &str) -> Option<String> {
    if node.kind() == "wildcard" {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .next()
            .map(|bound| render_type(bound, source))
    } else {
        Some(render_type(node, source))
    }
}

// ============================================================================
// Body linearisation (spec.md §4.B "Body linearisation")
// ============================================================================

/// Render the statements of a block, or of a single (brace-less) statement,
/// as a flattened tagged sequence.
fn statements_of(node: Node, source: &str) -> Vec<String> {
    if node.kind() == "block" {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .flat_map(|s| classify_statement(s, source))
            .collect()
    } else {
        classify_statement(node, source)
    }
}

fn classify_statement(node: Node, source: &str) -> Vec<String> {
    match node.kind() {
        "if_statement" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| condition_text(c, source))
                .unwrap_or_default();
            let mut out = vec![format!("IF:{cond}")];
            if let Some(consequence) = node.child_by_field_name("consequence") {
                out.extend(statements_of(consequence, source));
            }
            out.push("ENDIF".to_string());
            if let Some(alternative) = node.child_by_field_name("alternative") {
                out.push("ELSE".to_string());
                out.extend(statements_of(alternative, source));
                out.push("ENDELSE".to_string());
            }
            out
        }
        "for_statement" | "enhanced_for_statement" => {
            let mut out = vec!["FOR:loop".to_string()];
            if let Some(body) = node.child_by_field_name("body") {
                out.extend(statements_of(body, source));
            }
            out.push("ENDFOR".to_string());
            out
        }
        "while_statement" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| condition_text(c, source))
                .unwrap_or_default();
            let mut out = vec![format!("WHILE:{cond}")];
            if let Some(body) = node.child_by_field_name("body") {
                out.extend(statements_of(body, source));
            }
            out.push("ENDWHILE".to_string());
            out
        }
        "try_statement" => {
            let mut out = vec!["TRY".to_string()];
            if let Some(body) = node.child_by_field_name("body") {
                out.extend(statements_of(body, source));
            }
            out.push("ENDTRY".to_string());

            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "catch_clause" {
                    out.push(format!("CATCH:{}", catch_param_name(child, source)));
                    if let Some(body) = child.child_by_field_name("body") {
                        out.extend(statements_of(body, source));
                    }
                    out.push("ENDCATCH".to_string());
                }
            }
            out
        }
        "switch_statement" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| condition_text(c, source))
                .unwrap_or_default();
            let mut out = vec![format!("SWITCH:{cond}")];
            if let Some(body) = node.child_by_field_name("body") {
                let mut cursor = body.walk();
                for group in body.children(&mut cursor) {
                    if group.kind() != "switch_block_statement_group" {
                        continue;
                    }
                    out.extend(render_switch_group(group, source));
                }
            }
            out.push("ENDSWITCH".to_string());
            out
        }
        "return_statement" => {
            let expr = node
                .named_child(0)
                .map(|e| render_expr(e, source))
                .unwrap_or_default();
            vec![format!("RETURN:{expr}")]
        }
        "throw_statement" => {
            let expr = node
                .named_child(0)
                .map(|e| render_expr(e, source))
                .unwrap_or_default();
            vec![format!("THROW:{expr}")]
        }
        "expression_statement" => {
            let expr = node
                .named_child(0)
                .map(|e| render_expr(e, source))
                .unwrap_or_default();
            vec![format!("CALL:{expr}")]
        }
        "local_variable_declaration" => {
            let type_name = node
                .child_by_field_name("type")
                .map(|t| render_type(t, source))
                .unwrap_or_else(|| "void".to_string());

            let mut out = Vec::new();
            let mut cursor = node.walk();
            for declarator in node.children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator.child_by_field_name("name") {
                    out.push(format!("VAR:{type_name} {}", text(name, source)));
                }
            }
            out
        }
        // A bare `{ ... }` block that is itself a statement (not attached to
        // an if/for/while/try) is transparently flattened: it carries no tag
        // of its own in the alphabet of spec.md §4.B.
        "block" => statements_of(node, source),
        // Unknown or unclassified statements are dropped, per spec.md §4.B.
        _ => Vec::new(),
    }
}

fn render_switch_group(group: Node, source: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut saw_default = false;

    let mut cursor = group.walk();
    for child in group.children(&mut cursor) {
        if child.kind() != "switch_label" {
            continue;
        }
        let mut lcursor = child.walk();
        let named: Vec<_> = child.named_children(&mut lcursor).collect();
        if named.is_empty() {
            saw_default = true;
        } else {
            for n in named {
                labels.push(render_expr(n, source));
            }
        }
    }

    let label_text = if labels.is_empty() && saw_default {
        "default".to_string()
    } else {
        labels.join(", ")
    };

    let mut out = vec![format!("CASE:{label_text}")];
    let mut scursor = group.walk();
    for child in group.children(&mut scursor) {
        if child.kind() == "switch_label" {
            continue;
        }
        out.extend(classify_statement(child, source));
    }
    out
}

fn catch_param_name(clause: Node, source: &str) -> String {
    clause
        .child_by_field_name("parameter")
        .and_then(|p| p.child_by_field_name("name"))
        .map(|n| text(n, source))
        .unwrap_or_else(|| "e".to_string())
}

fn condition_text(node: Node, source: &str) -> String {
    if node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .next()
            .map(|inner| render_expr(inner, source))
            .unwrap_or_default()
    } else {
        render_expr(node, source)
    }
}

/// The fixed, total expression renderer of spec.md §4.B. Never fails: an
/// unrecognised node kind falls back to the grammar node's own kind name.
fn render_expr(node: Node, source: &str) -> String {
    match node.kind() {
        "identifier" | "this" => text(node, source),
        "field_access" => {
            let object = node.child_by_field_name("object").map(|o| render_expr(o, source));
            let field = node
                .child_by_field_name("field")
                .map(|f| text(f, source))
                .unwrap_or_default();
            match object {
                Some(obj) => format!("{obj}.{field}"),
                None => field,
            }
        }
        "method_invocation" => {
            let object = node.child_by_field_name("object").map(|o| render_expr(o, source));
            let name = node
                .child_by_field_name("name")
                .map(|n| text(n, source))
                .unwrap_or_default();
            match object {
                Some(obj) => format!("{obj}.{name}()"),
                None => format!("{name}()"),
            }
        }
        "binary_expression" | "assignment_expression" => {
            let left = node.child_by_field_name("left");
            let right = node.child_by_field_name("right");
            match (left, right) {
                (Some(l), Some(r)) => {
                    let op = node
                        .child_by_field_name("operator")
                        .map(|o| text(o, source))
                        .unwrap_or_else(|| {
                            source
                                .get(l.end_byte()..r.start_byte())
                                .unwrap_or("")
                                .trim()
                                .to_string()
                        });
                    format!("{} {op} {}", render_expr(l, source), render_expr(r, source))
                }
                _ => node.kind().to_string(),
            }
        }
        "object_creation_expression" => {
            // spec.md §4.B: "constructor call → `new TypeName()`" — a bare
            // name, not `render_type`'s generics-including rendering.
            let type_name = node
                .child_by_field_name("type")
                .map(|t| render_type(t, source))
                .unwrap_or_default();
            let base = type_name.split('<').next().unwrap_or(&type_name);
            format!("new {base}()")
        }
        kind if kind.ends_with("literal") || kind == "true" || kind == "false" => {
            text(node, source)
        }
        _ => node.kind().to_string(),
    }
}

fn text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ast::tests_support::parse;

    #[test]
    fn extracts_fields_and_methods_in_order() {
        let source = "public class A { private int x; public void f() {} }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes.len(), 1);
        let a = &classes[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.fields.len(), 1);
        assert_eq!(a.fields[0].name, "x");
        assert_eq!(a.fields[0].type_name, "int");
        assert_eq!(a.methods.len(), 1);
        assert_eq!(a.methods[0].name, "f");
        assert_eq!(a.methods[0].return_type, "void");
    }

    #[test]
    fn renders_generic_field_type_dropping_unbounded_wildcard() {
        let source = "class A { Map<String, ?> m; }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes[0].fields[0].type_name, "Map<String>");
    }

    #[test]
    fn renders_bounded_wildcard() {
        let source = "class A { List<? extends Number> xs; }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes[0].fields[0].type_name, "List<Number>");
    }

    #[test]
    fn captures_extends_and_implements() {
        let source = "class Sub extends Base implements Iface {}";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes[0].extends.as_deref(), Some("Base"));
        assert_eq!(classes[0].implements, vec!["Iface".to_string()]);
    }

    #[test]
    fn interface_extends_keeps_only_first() {
        let source = "interface I extends A, B {}";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes[0].extends.as_deref(), Some("A"));
    }

    #[test]
    fn enum_constants_precede_members_in_struct() {
        let source = "enum Status { ACTIVE, INACTIVE; private int code; }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes[0].enum_constants, vec!["ACTIVE", "INACTIVE"]);
        assert_eq!(classes[0].fields[0].name, "code");
    }

    #[test]
    fn constructors_are_not_collected_as_methods() {
        let source = "class A { A() {} void f() {} }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        assert_eq!(classes[0].methods.len(), 1);
        assert_eq!(classes[0].methods[0].name, "f");
    }

    #[test]
    fn constructor_call_drops_generic_arguments() {
        let source = "class A { void f() { new ArrayList<String>(); } }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        let stmts = &classes[0].methods[0].body_statements;
        assert_eq!(stmts.as_slice(), ["CALL:new ArrayList()"]);
    }

    #[test]
    fn body_linearisation_if_else() {
        let source = "class A { void f(int x) { if (x > 0) { return; } else { x = 0; } } }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        let stmts = &classes[0].methods[0].body_statements;
        assert_eq!(
            stmts.as_slice(),
            [
                "IF:x > 0",
                "RETURN:",
                "ENDIF",
                "ELSE",
                "CALL:x = 0",
                "ENDELSE",
            ]
        );
    }

    #[test]
    fn body_linearisation_try_catch() {
        let source = "class A { void f() { try { risky(); } catch (Exception e) { log(e); } } }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        let stmts = &classes[0].methods[0].body_statements;
        assert_eq!(
            stmts.as_slice(),
            ["TRY", "CALL:risky()", "ENDTRY", "CATCH:e", "CALL:log(e)", "ENDCATCH"]
        );
    }

    #[test]
    fn body_linearisation_switch() {
        let source = "class A { void f(int x) { switch (x) { case 1: foo(); break; default: bar(); } } }";
        let tree = parse(source);
        let classes = extract(&tree, source);
        let stmts = &classes[0].methods[0].body_statements;
        assert!(stmts.contains(&"SWITCH:x".to_string()));
        assert!(stmts.contains(&"CASE:1".to_string()));
        assert!(stmts.contains(&"CASE:default".to_string()));
        assert!(stmts.contains(&"CALL:foo()".to_string()));
    }
}

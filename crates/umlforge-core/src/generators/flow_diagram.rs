//! Flow (activity) diagram generator (spec.md §4.C.3).
//!
//! The statement renderer here is a proper recursive-descent walk over the
//! tagged sequence, not a single forwarding cursor: each composite
//! (`IF`/`ELSE`, `FOR`/`WHILE`, `TRY`/`CATCH`, `SWITCH`/`CASE`) consumes its
//! own matching end-marker and returns control to its caller with the
//! *remaining* slice, so a composite nested two levels deep still renders
//! in full. Stray end-markers or orphan `ELSE`/`CATCH:`/`CASE:` tags outside
//! their composite context are simply skipped.

use super::DiagramGenerator;
use crate::types::{ClassInfo, MethodInfo};

pub(crate) struct FlowDiagramGenerator;

impl DiagramGenerator for FlowDiagramGenerator {
    fn diagram_type(&self) -> &'static str {
        "flow"
    }

    fn body(&self, classes: &[ClassInfo]) -> Vec<String> {
        let mut lines = Vec::new();
        for class in classes {
            for method in interesting_methods(class) {
                lines.extend(partition(class, method));
            }
        }
        lines
    }
}

/// Methods with more than one body statement; if none qualify, the first
/// three methods of the class (or fewer, if the class has fewer).
fn interesting_methods(class: &ClassInfo) -> Vec<&MethodInfo> {
    let interesting: Vec<&MethodInfo> = class
        .methods
        .iter()
        .filter(|m| m.body_statements.len() > 1)
        .collect();

    if !interesting.is_empty() {
        return interesting;
    }
    class.methods.iter().take(3).collect()
}

fn partition(class: &ClassInfo, method: &MethodInfo) -> Vec<String> {
    let params = method
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.type_name, p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![format!(
        "partition \"{}.{}({params})\" {{",
        class.name, method.name
    )];
    lines.push("start".to_string());

    if method.body_statements.is_empty() {
        lines.push(":No body;".to_string());
    } else {
        let (rendered, _) = render_sequence(&method.body_statements);
        lines.extend(rendered);
    }

    lines.push("stop".to_string());
    lines.push("}".to_string());
    lines
}

/// Render as many statements as belong to the *current* level, stopping
/// (without consuming) at a terminator that belongs to an enclosing
/// composite. Returns the rendered lines plus the unconsumed remainder.
fn render_sequence<'a>(tags: &'a [String]) -> (Vec<String>, &'a [String]) {
    let mut lines = Vec::new();
    let mut rest = tags;

    loop {
        let Some(tag) = rest.first() else {
            break;
        };

        if is_level_terminator(tag) {
            break;
        }

        let (rendered, remainder) = render_one(rest);
        lines.extend(rendered);
        rest = remainder;
    }

    (lines, rest)
}

fn is_level_terminator(tag: &str) -> bool {
    matches!(
        tag,
        "ENDIF" | "ENDELSE" | "ENDFOR" | "ENDWHILE" | "ENDTRY" | "ENDCATCH" | "ENDSWITCH"
    ) || tag == "ELSE"
        || tag.starts_with("CATCH:")
        || tag.starts_with("CASE:")
}

/// Render exactly one statement (which may be a whole composite) starting
/// at `tags[0]`, returning the rendered lines and everything after it.
fn render_one(tags: &[String]) -> (Vec<String>, &[String]) {
    let head = &tags[0];
    let rest = &tags[1..];

    if let Some(cond) = head.strip_prefix("IF:") {
        let (body, after_body) = render_sequence(rest);
        let mut lines = vec![format!("if ({cond}) then (yes)")];
        lines.extend(indent(body));

        let after_endif = skip_tag(after_body, "ENDIF");
        if let Some("ELSE") = after_endif.first().map(|s| s.as_str()) {
            let (else_body, after_else_body) = render_sequence(&after_endif[1..]);
            lines.push("else (no)".to_string());
            lines.extend(indent(else_body));
            lines.push("endif".to_string());
            return (lines, skip_tag(after_else_body, "ENDELSE"));
        }

        lines.push("endif".to_string());
        return (lines, after_endif);
    }

    if head.starts_with("FOR:") || head.starts_with("WHILE:") {
        let cond = head
            .strip_prefix("FOR:")
            .or_else(|| head.strip_prefix("WHILE:"))
            .unwrap_or("");
        let end_tag = if head.starts_with("FOR:") {
            "ENDFOR"
        } else {
            "ENDWHILE"
        };
        let (body, after_body) = render_sequence(rest);
        let mut lines = vec![format!("while ({cond}) is (true)")];
        lines.extend(indent(body));
        lines.push("endwhile (false)".to_string());
        return (lines, skip_tag(after_body, end_tag));
    }

    if head == "TRY" {
        let (body, after_body) = render_sequence(rest);
        let mut lines = vec!["group Try".to_string()];
        lines.extend(indent(body));
        lines.push("end group".to_string());
        let mut remainder = skip_tag(after_body, "ENDTRY");

        while let Some(ident) = remainder.first().and_then(|t| t.strip_prefix("CATCH:")) {
            let (catch_body, after_catch_body) = render_sequence(&remainder[1..]);
            lines.push(format!("group Catch ({ident})"));
            lines.extend(indent(catch_body));
            lines.push("end group".to_string());
            remainder = skip_tag(after_catch_body, "ENDCATCH");
        }

        return (lines, remainder);
    }

    if let Some(expr) = head.strip_prefix("SWITCH:") {
        let mut lines = vec![format!("switch ({expr})")];
        let mut remainder = rest;

        while let Some(label) = remainder.first().and_then(|t| t.strip_prefix("CASE:")) {
            let (case_body, after_case_body) = render_sequence(&remainder[1..]);
            lines.push(format!("case ( {label} )"));
            lines.extend(indent(case_body));
            remainder = after_case_body;
        }

        lines.push("endswitch".to_string());
        return (lines, skip_tag(remainder, "ENDSWITCH"));
    }

    (vec![render_leaf(head)], rest)
}

/// Skip over a terminator tag if present; otherwise leave the slice
/// untouched (a malformed/truncated stream is tolerated, never panics).
fn skip_tag<'a>(tags: &'a [String], tag: &str) -> &'a [String] {
    match tags.first() {
        Some(t) if t == tag => &tags[1..],
        _ => tags,
    }
}

fn indent(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().map(|l| format!("  {l}")).collect()
}

fn render_leaf(tag: &str) -> String {
    if let Some(expr) = tag.strip_prefix("CALL:") {
        return format!(":{expr};");
    }
    if let Some(decl) = tag.strip_prefix("VAR:") {
        return format!(":Declare {decl};");
    }
    if let Some(rest) = tag.strip_prefix("RETURN:") {
        return if rest.is_empty() {
            ":Return;".to_string()
        } else {
            format!(":Return {rest};")
        };
    }
    if let Some(expr) = tag.strip_prefix("THROW:") {
        return format!("#pink:Throw {expr};");
    }
    format!(":{tag};")
}

//! Use-case diagram generator (spec.md §4.C.2).

use super::DiagramGenerator;
use crate::types::{ClassInfo, MethodInfo};

const SYSTEM_SUFFIXES: &[&str] = &["Service", "Controller", "Handler", "Manager", "Facade"];

pub(crate) struct UseCaseDiagramGenerator;

impl DiagramGenerator for UseCaseDiagramGenerator {
    fn diagram_type(&self) -> &'static str {
        "usecase"
    }

    fn directives(&self) -> Vec<String> {
        vec!["left to right direction".to_string()]
    }

    fn body(&self, classes: &[ClassInfo]) -> Vec<String> {
        let (systems, actors) = classify(classes);
        let mut lines = Vec::new();

        for actor in &actors {
            lines.push(format!("actor \"{}\" as {}", actor.name, actor.name));
            lines.push(String::new());
        }

        let actor_names: Vec<&str> = actors.iter().map(|c| c.name.as_str()).collect();

        for system in &systems {
            lines.push(format!("rectangle \"{}\" {{", system.name));
            for method in &system.methods {
                if !ClassInfo::is_public_or_unmodified(&method.modifiers) {
                    continue;
                }
                lines.push(format!(
                    "  usecase \"{}\" as {}_{}",
                    humanize(&method.name),
                    system.name,
                    method.name
                ));
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }

        lines.extend(associations(&systems, &actor_names));
        lines
    }
}

/// Any class whose name ends in one of `SYSTEM_SUFFIXES` is a system; all
/// others are actors. If nothing matched, fall back to the single class
/// with the most public-or-unmodified methods as the sole system (ties
/// broken by input order — spec.md §9's second Open Question, resolved
/// here in favor of a deterministic, reproducible choice).
fn classify(classes: &[ClassInfo]) -> (Vec<&ClassInfo>, Vec<&ClassInfo>) {
    let mut systems: Vec<&ClassInfo> = classes
        .iter()
        .filter(|c| SYSTEM_SUFFIXES.iter().any(|suffix| c.name.ends_with(suffix)))
        .collect();

    if !systems.is_empty() {
        let system_names: Vec<&str> = systems.iter().map(|c| c.name.as_str()).collect();
        let actors = classes
            .iter()
            .filter(|c| !system_names.contains(&c.name.as_str()))
            .collect();
        return (systems, actors);
    }

    // `Iterator::max_by_key` returns the *last* element on ties; the fallback
    // must break ties by input order instead (spec.md §9), so fold manually
    // and only replace the champion on a strictly greater count.
    let mut fallback: Option<(&ClassInfo, usize)> = None;
    for class in classes {
        let count = class
            .methods
            .iter()
            .filter(|m| ClassInfo::is_public_or_unmodified(&m.modifiers))
            .count();
        match fallback {
            Some((_, best)) if count <= best => {}
            _ => fallback = Some((class, count)),
        }
    }
    let fallback = fallback.map(|(class, _)| class);

    match fallback {
        Some(chosen) => {
            systems.push(chosen);
            let actors = classes.iter().filter(|c| c.name != chosen.name).collect();
            (systems, actors)
        }
        None => (Vec::new(), Vec::new()),
    }
}

/// Insert a space before every uppercase letter after position 0, then
/// capitalise the whole result's first character.
fn humanize(name: &str) -> String {
    let mut out = String::new();
    for (i, ch) in name.chars().enumerate() {
        if i > 0 && ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => out,
    }
}

fn associations(systems: &[&ClassInfo], actor_names: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();

    for system in systems {
        for method in &system.methods {
            if !ClassInfo::is_public_or_unmodified(&method.modifiers) {
                continue;
            }
            let usecase_id = format!("{}_{}", system.name, method.name);
            let linked_actor = method
                .parameters
                .iter()
                .find_map(|p| actor_names.iter().find(|a| **a == base_type(&p.type_name)));

            match linked_actor {
                Some(actor) => lines.push(format!("{actor} --> {usecase_id}")),
                None => {
                    if let Some(first) = actor_names.first() {
                        lines.push(format!("{first} --> {usecase_id}"));
                    }
                }
            }
        }
    }

    lines
}

fn base_type(type_name: &str) -> &str {
    type_name.split('<').next().unwrap_or(type_name)
}

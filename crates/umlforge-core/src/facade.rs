//! Conversion Facade (spec.md §4.E) — the library's single public entry
//! point, tying the front-end, extractor, generator registry and result
//! cache together.

use crate::cache::ResultCache;
use crate::registry::GeneratorRegistry;
use crate::types::{ConversionResult, SourceEcho, SourceFile};
use crate::{ast, extract, DiagramGenerator};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Parses and diagrams Java source, with an LRU cache in front so repeated
/// submissions of an identical input set are free.
///
/// Owns its `GeneratorRegistry` rather than reaching for process-wide
/// mutable state (spec.md §9): construct one `Facade` per logical caller
/// and share it behind an `Arc` if multiple threads need it concurrently.
pub struct Facade {
    registry: GeneratorRegistry,
    cache: ResultCache,
}

impl Facade {
    /// A facade wired with the three built-in generators.
    pub fn new() -> Self {
        Self::with_registry(GeneratorRegistry::with_default_generators())
    }

    /// A facade over a caller-supplied registry (spec.md §6's registry
    /// extension point: register additional strategies before handing the
    /// registry here).
    pub fn with_registry(registry: GeneratorRegistry) -> Self {
        Self {
            registry,
            cache: ResultCache::new(),
        }
    }

    /// Run the full pipeline: fingerprint, cache lookup, parse + extract +
    /// generate on miss, cache insert + evict.
    pub fn convert(&self, sources: Vec<SourceFile>) -> ConversionResult {
        let fingerprint = fingerprint(&sources);

        if let Some(cached) = self.cache.get(&fingerprint) {
            tracing::debug!(%fingerprint, "cache hit");
            return cached;
        }

        tracing::debug!(%fingerprint, count = sources.len(), "cache miss, converting");
        let result = self.convert_uncached(&sources);
        self.cache.insert(fingerprint, result.clone());
        result
    }

    fn convert_uncached(&self, sources: &[SourceFile]) -> ConversionResult {
        let mut all_classes = Vec::new();
        let mut errors = Vec::new();

        for (filename, code) in sources {
            match ast::parse_compilation_unit(filename, code) {
                Ok(tree) => all_classes.extend(extract::extract(&tree, code)),
                Err(err) => {
                    tracing::warn!(filename = %filename, error = %err, "unit failed to parse");
                    errors.push(format!("{filename}: {}", parse_error_message(&err)));
                }
            }
        }

        let mut diagrams = BTreeMap::new();
        for (name, generator) in self.registry.create_all() {
            let diagram = if all_classes.is_empty() {
                String::new()
            } else {
                generator.generate(&all_classes)
            };
            diagrams.insert(name.to_string(), diagram);
        }

        let echoed_sources = sources
            .iter()
            .map(|(filename, code)| SourceEcho {
                filename: filename.clone(),
                code: code.clone(),
            })
            .collect();

        ConversionResult {
            diagrams,
            errors,
            sources: echoed_sources,
        }
    }
}

impl Default for Facade {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_error_message(err: &crate::types::UmlError) -> String {
    match err {
        crate::types::UmlError::ParseError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// SHA-256 over `"filename:code"` for each pair, concatenated after sorting
/// pairs lexicographically by filename (spec.md §4.E step 1). Sorting
/// before hashing is what makes the fingerprint order-independent
/// (spec.md §8, law 3).
fn fingerprint(sources: &[SourceFile]) -> String {
    let mut sorted: Vec<&SourceFile> = sources.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut hasher = Sha256::new();
    for (filename, code) in sorted {
        hasher.update(filename.as_bytes());
        hasher.update(b":");
        hasher.update(code.as_bytes());
    }

    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

//! Java AST Front-End (spec.md §4.A)
//!
//! ARCHITECTURE: This is the only module that imports `tree_sitter` outside
//! of the Extractor's tree-walking code. Parses one compilation unit into a
//! tree-sitter `Tree`, or fails with `UmlError::ParseError`.
//!
//! Non-goal: error recovery. tree-sitter itself is error-tolerant and will
//! happily hand back a tree full of `ERROR`/`MISSING` nodes for broken
//! input; we treat any such tree as a hard parse failure instead of feeding
//! a partially-recovered structure to the Extractor, per spec.md §1's
//! Non-goal of "recovery from syntactically invalid Java".

use crate::{Result, UmlError};
use tree_sitter::Tree;

/// Parse one Java compilation unit.
///
/// # Errors
/// Returns `UmlError::ParseError` if the grammar fails to load, or if the
/// resulting tree contains any error/missing node.
pub(crate) fn parse_compilation_unit(filename: &str, source: &str) -> Result<Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|err| UmlError::ParseError {
            filename: filename.to_string(),
            message: format!("failed to load Java grammar: {err}"),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| UmlError::ParseError {
        filename: filename.to_string(),
        message: "tree-sitter produced no parse tree".to_string(),
    })?;

    if tree.root_node().has_error() {
        return Err(UmlError::ParseError {
            filename: filename.to_string(),
            message: "syntax error in Java source".to_string(),
        });
    }

    Ok(tree)
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_class() {
        let tree = parse_compilation_unit("A.java", "public class A {}").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn rejects_garbage_input() {
        let err = parse_compilation_unit("bad.java", "this is not java").unwrap_err();
        match err {
            UmlError::ParseError { filename, .. } => assert_eq!(filename, "bad.java"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn accepts_interfaces_and_enums() {
        parse_compilation_unit("I.java", "public interface I {}").unwrap();
        parse_compilation_unit("E.java", "public enum E { A, B }").unwrap();
    }
}

//! Python 3 syntax validation via tree-sitter.

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser};

/// Location and context of the first syntax error found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxIssue {
    pub line: usize,
    pub message: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxCheck {
    pub valid: bool,
    pub error: Option<SyntaxIssue>,
}

/// Parse `source` with the Python 3 grammar and report validity.
///
/// # Panics
///
/// Panics if the bundled grammar cannot be loaded; the grammar version is
/// pinned in Cargo.toml and exercised by tests, so a panic implies a build
/// misconfiguration rather than a runtime condition.
pub fn check_syntax(source: &str) -> SyntaxCheck {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .expect("failed to load the bundled Python grammar");

    let tree = match parser.parse(source, None) {
        Some(tree) => tree,
        None => {
            return SyntaxCheck {
                valid: false,
                error: Some(SyntaxIssue {
                    line: 0,
                    message: "parser returned no tree".to_string(),
                    text: String::new(),
                }),
            }
        }
    };

    let root = tree.root_node();
    if !root.has_error() {
        return SyntaxCheck {
            valid: true,
            error: None,
        };
    }

    let node = first_error_node(root).unwrap_or(root);
    let line = node.start_position().row + 1;
    let text = source
        .lines()
        .nth(node.start_position().row)
        .unwrap_or("")
        .trim()
        .to_string();
    let message = if node.is_missing() {
        format!("missing {}", node.kind())
    } else {
        "invalid syntax".to_string()
    };

    SyntaxCheck {
        valid: false,
        error: Some(SyntaxIssue {
            line,
            message,
            text,
        }),
    }
}

fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn valid_python3_passes() {
        let check = check_syntax(indoc! {r#"
            def greet(name):
                print(f"hello {name}")
        "#});
        assert!(check.valid);
        assert!(check.error.is_none());
    }

    #[test]
    fn python2_print_statement_fails() {
        let check = check_syntax("print \"hello\"\n");
        assert!(!check.valid);
        let error = check.error.unwrap();
        assert_eq!(error.line, 1);
    }

    #[test]
    fn error_reports_offending_line() {
        let check = check_syntax(indoc! {r#"
            x = 1
            def broken(:
                pass
        "#});
        assert!(!check.valid);
        assert!(check.error.unwrap().line >= 2);
    }

    #[test]
    fn empty_source_is_valid() {
        assert!(check_syntax("").valid);
    }
}

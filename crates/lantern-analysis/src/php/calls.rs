//! Call-site extraction: every function, static and method call in a file.

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

use super::evaluator::call_arguments;
use super::literal::{
    decode_double_quoted, decode_single_quoted, node_column, node_line, node_text, normalize_name,
};

/// Shape of a call expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// `env('X')`
    Function,
    /// `Cache::lock('x')`
    Static,
    /// `$cache->lock('x')`
    Method,
}

/// A single call expression found in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub kind: CallKind,
    /// Class name for static calls, object expression text for method calls.
    pub receiver: Option<String>,
    pub name: String,
    pub arg_count: usize,
    /// First argument, when it is a plain string literal.
    pub first_arg: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    /// Receiver with leading namespace separator removed.
    pub fn receiver_name(&self) -> Option<&str> {
        self.receiver.as_deref().map(normalize_name)
    }

    /// Case-insensitive name comparison, as PHP function names are.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Depth-first pre-order traversal without recursion.
pub(crate) fn visit_nodes<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Extract every call in `tree`, in source order.
pub fn extract_calls(tree: &Tree, source: &[u8]) -> Vec<CallSite> {
    let mut calls = Vec::new();
    visit_nodes(tree.root_node(), |node| {
        if let Some(call) = call_site(&node, source) {
            calls.push(call);
        }
    });
    calls
}

fn call_site(node: &Node, source: &[u8]) -> Option<CallSite> {
    let (kind, receiver, name_node) = match node.kind() {
        "function_call_expression" => {
            let function = node.child_by_field_name("function")?;
            if !matches!(function.kind(), "name" | "qualified_name") {
                return None;
            }
            (CallKind::Function, None, function)
        }
        "scoped_call_expression" => {
            let scope = node.child_by_field_name("scope")?;
            let name = node.child_by_field_name("name")?;
            (
                CallKind::Static,
                Some(normalize_name(node_text(&scope, source)).to_string()),
                name,
            )
        }
        "member_call_expression" | "nullsafe_member_call_expression" => {
            let object = node.child_by_field_name("object")?;
            let name = node.child_by_field_name("name")?;
            (
                CallKind::Method,
                Some(node_text(&object, source).to_string()),
                name,
            )
        }
        _ => return None,
    };

    if name_node.kind() != "name" && name_node.kind() != "qualified_name" {
        return None;
    }

    let args = call_arguments(node);
    let first_arg = args.first().and_then(|arg| string_literal(arg, source));

    Some(CallSite {
        kind,
        receiver,
        name: normalize_name(node_text(&name_node, source)).to_string(),
        arg_count: args.len(),
        first_arg,
        line: node_line(&name_node),
        column: node_column(&name_node),
    })
}

fn string_literal(node: &Node, source: &[u8]) -> Option<String> {
    let raw = node_text(node, source);
    match node.kind() {
        "string" => decode_single_quoted(raw),
        "encapsed_string" => {
            let mut cursor = node.walk();
            let plain = node
                .named_children(&mut cursor)
                .all(|c| matches!(c.kind(), "string_content" | "string_value" | "escape_sequence"));
            if plain {
                decode_double_quoted(raw)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php::PhpParser;
    use std::path::Path;

    fn calls(source: &str) -> Vec<CallSite> {
        let mut parser = PhpParser::new().unwrap();
        let tree = parser.parse(source.as_bytes(), Path::new("t.php")).unwrap();
        extract_calls(&tree, source.as_bytes())
    }

    #[test]
    fn extracts_function_static_and_method_calls() {
        let found = calls(
            r#"<?php
$key = env('APP_KEY');
$lock = Cache::lock('reports', 10);
$value = $repository->get("name");
"#,
        );
        assert_eq!(found.len(), 3);

        assert_eq!(found[0].kind, CallKind::Function);
        assert_eq!(found[0].name, "env");
        assert_eq!(found[0].first_arg.as_deref(), Some("APP_KEY"));
        assert_eq!(found[0].line, 2);

        assert_eq!(found[1].kind, CallKind::Static);
        assert_eq!(found[1].receiver.as_deref(), Some("Cache"));
        assert_eq!(found[1].name, "lock");
        assert_eq!(found[1].arg_count, 2);

        assert_eq!(found[2].kind, CallKind::Method);
        assert_eq!(found[2].receiver.as_deref(), Some("$repository"));
        assert_eq!(found[2].first_arg.as_deref(), Some("name"));
        assert_eq!(found[2].line, 4);
    }

    #[test]
    fn normalizes_fully_qualified_names() {
        let found = calls(r#"<?php \env('A'); \Illuminate\Support\Env::get('B');"#);
        assert_eq!(found[0].name, "env");
        assert_eq!(found[1].receiver_name(), Some("Illuminate\\Support\\Env"));
        assert_eq!(found[1].first_arg.as_deref(), Some("B"));
    }

    #[test]
    fn nested_calls_are_all_reported() {
        let found = calls(r#"<?php Cache::store('redis')->lock('x');"#);
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"lock"));
        assert!(names.contains(&"store"));
        let lock = found.iter().find(|c| c.name == "lock").unwrap();
        assert_eq!(lock.receiver.as_deref(), Some("Cache::store('redis')"));
    }

    #[test]
    fn dynamic_calls_are_ignored() {
        let found = calls(r#"<?php $fn('x'); $obj->$method();"#);
        assert!(found.is_empty());
    }
}

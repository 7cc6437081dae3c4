//! Method-chain extraction: `User::where(...)->get()->count()` becomes a
//! root (`User::where`) followed by ordered segments (`get`, `count`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tree_sitter::{Node, Tree};

use super::calls::visit_nodes;
use super::evaluator::call_arguments;
use super::literal::{node_column, node_line, node_text, normalize_name};

/// The expression a method chain starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainRoot {
    Static {
        class: String,
        method: String,
        arg_count: usize,
    },
    Function {
        name: String,
    },
    Variable {
        name: String,
    },
    Other,
}

impl ChainRoot {
    /// Unqualified class name for static roots.
    pub fn static_class(&self) -> Option<&str> {
        match self {
            Self::Static { class, .. } => Some(class.rsplit('\\').next().unwrap_or(class)),
            _ => None,
        }
    }
}

/// One `->method(...)` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSegment {
    pub name: String,
    pub arg_count: usize,
    pub line: u32,
    pub column: u32,
}

/// A full method chain, outermost call only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallChain {
    pub root: ChainRoot,
    pub segments: SmallVec<[ChainSegment; 4]>,
}

impl CallChain {
    /// Source-like rendering, e.g. `User::all()->count()`.
    pub fn display(&self) -> String {
        let mut out = match &self.root {
            ChainRoot::Static { class, method, .. } => format!("{class}::{method}()"),
            ChainRoot::Function { name } => format!("{name}()"),
            ChainRoot::Variable { name } => name.clone(),
            ChainRoot::Other => "(...)".to_string(),
        };
        for segment in &self.segments {
            out.push_str("->");
            out.push_str(&segment.name);
            out.push_str("()");
        }
        out
    }
}

/// Extract every outermost method chain in `tree`.
pub fn extract_chains(tree: &Tree, source: &[u8]) -> Vec<CallChain> {
    let mut chains = Vec::new();
    visit_nodes(tree.root_node(), |node| {
        if is_method_call(&node) && !is_chain_link(&node) {
            chains.push(flatten(node, source));
        }
    });
    chains
}

fn is_method_call(node: &Node) -> bool {
    matches!(
        node.kind(),
        "member_call_expression" | "nullsafe_member_call_expression"
    )
}

/// True when `node` is the `object` of an enclosing method call.
fn is_chain_link(node: &Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    is_method_call(&parent) && parent.child_by_field_name("object").as_ref() == Some(node)
}

fn flatten(outermost: Node, source: &[u8]) -> CallChain {
    let mut segments: SmallVec<[ChainSegment; 4]> = SmallVec::new();
    let mut current = outermost;

    while is_method_call(&current) {
        let name_node = current.child_by_field_name("name");
        let (name, line, column) = match name_node {
            Some(n) => (node_text(&n, source).to_string(), node_line(&n), node_column(&n)),
            None => (String::new(), node_line(&current), node_column(&current)),
        };
        segments.push(ChainSegment {
            name,
            arg_count: call_arguments(&current).len(),
            line,
            column,
        });
        match current.child_by_field_name("object") {
            Some(object) => current = object,
            None => break,
        }
    }
    segments.reverse();

    CallChain {
        root: classify_root(&current, source),
        segments,
    }
}

fn classify_root(node: &Node, source: &[u8]) -> ChainRoot {
    match node.kind() {
        "scoped_call_expression" => {
            let class = node
                .child_by_field_name("scope")
                .map(|s| normalize_name(node_text(&s, source)).to_string())
                .unwrap_or_default();
            let method = node
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_default();
            ChainRoot::Static {
                class,
                method,
                arg_count: call_arguments(node).len(),
            }
        }
        "function_call_expression" => ChainRoot::Function {
            name: node
                .child_by_field_name("function")
                .map(|f| normalize_name(node_text(&f, source)).to_string())
                .unwrap_or_default(),
        },
        "variable_name" => ChainRoot::Variable {
            name: node_text(node, source).to_string(),
        },
        _ => ChainRoot::Other,
    }
}

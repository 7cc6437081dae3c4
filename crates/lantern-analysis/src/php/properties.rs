//! Class property lookup, used to read declarative framework classes such
//! as the HTTP kernel.

use tree_sitter::{Node, Tree};

use super::calls::visit_nodes;
use super::literal::node_text;

/// A declared class property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDecl<'t> {
    pub name: Node<'t>,
    /// Default value expression, if the declaration has one.
    pub default: Option<Node<'t>>,
}

/// Find the first property declared as `name` (with or without the `$`).
pub fn find_property<'t>(tree: &'t Tree, source: &[u8], name: &str) -> Option<PropertyDecl<'t>> {
    let wanted = name.trim_start_matches('$');
    let mut found = None;
    visit_nodes(tree.root_node(), |node| {
        if found.is_some() || node.kind() != "property_element" {
            return;
        }
        if let Some(decl) = property_decl(node) {
            if node_text(&decl.name, source).trim_start_matches('$') == wanted {
                found = Some(decl);
            }
        }
    });
    found
}

fn property_decl(element: Node) -> Option<PropertyDecl> {
    let mut cursor = element.walk();
    let named: Vec<Node> = element.named_children(&mut cursor).collect();
    let name = *named.iter().find(|n| n.kind() == "variable_name")?;
    let default = named
        .iter()
        .rev()
        .find(|n| n.kind() != "variable_name")
        .map(|n| {
            // Older grammars wrap the value in `property_initializer`.
            if n.kind() == "property_initializer" {
                let mut inner = n.walk();
                let value = n.named_children(&mut inner).last();
                value.unwrap_or(*n)
            } else {
                *n
            }
        });
    Some(PropertyDecl { name, default })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::php::PhpParser;

    const KERNEL: &str = r#"<?php
namespace App\Http;

class Kernel extends HttpKernel
{
    protected $middleware = [
        \App\Http\Middleware\TrustProxies::class,
    ];

    protected $proxies;
}
"#;

    #[test]
    fn finds_properties_with_and_without_defaults() {
        let mut parser = PhpParser::new().unwrap();
        let tree = parser.parse(KERNEL.as_bytes(), Path::new("Kernel.php")).unwrap();

        let middleware = find_property(&tree, KERNEL.as_bytes(), "$middleware").unwrap();
        let value = middleware.default.unwrap();
        assert_eq!(value.kind(), "array_creation_expression");

        let proxies = find_property(&tree, KERNEL.as_bytes(), "proxies").unwrap();
        assert!(proxies.default.is_none());

        assert!(find_property(&tree, KERNEL.as_bytes(), "routeMiddleware").is_none());
    }
}

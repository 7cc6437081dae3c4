//! Static evaluation of Laravel config files.
//!
//! Config files are plain `return [...]` arrays whose leaves are literals,
//! `env()` lookups, path helpers and string concatenations. Those are
//! evaluated here; anything that needs the PHP runtime becomes
//! [`PhpValue::Unknown`].

use std::path::Path;

use lantern_core::errors::ParseError;
use tree_sitter::Node;

use super::literal::{
    decode_double_quoted, decode_single_quoted, node_text, normalize_name, parse_float, parse_int,
    short_name,
};
use super::parser::PhpParser;
use super::value::{PhpArray, PhpKey, PhpValue};
use crate::project::dotenv::EnvFile;

/// Evaluates config expressions against one project's dotenv and base path.
pub struct ConfigEvaluator<'a> {
    env: &'a EnvFile,
    base_path: &'a Path,
}

impl<'a> ConfigEvaluator<'a> {
    pub fn new(env: &'a EnvFile, base_path: &'a Path) -> Self {
        Self { env, base_path }
    }

    /// Evaluate the value returned by a config file.
    pub fn evaluate_file(
        &self,
        parser: &mut PhpParser,
        source: &[u8],
        path: &Path,
    ) -> Result<PhpValue, ParseError> {
        let tree = parser.parse(source, path)?;
        let root = tree.root_node();

        let mut cursor = root.walk();
        let returned = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "return_statement")
            .and_then(|ret| first_named(&ret))
            .ok_or_else(|| ParseError::NoReturnValue {
                path: path.to_path_buf(),
            })?;

        Ok(self.eval(&returned, source))
    }

    /// Evaluate a single expression node.
    pub fn eval(&self, node: &Node, source: &[u8]) -> PhpValue {
        match node.kind() {
            "parenthesized_expression" => first_named(node)
                .map(|inner| self.eval(&inner, source))
                .unwrap_or(PhpValue::Unknown),
            "string" => eval_string_token(node_text(node, source)),
            "encapsed_string" => {
                if has_interpolation(node) {
                    PhpValue::Unknown
                } else {
                    eval_string_token(node_text(node, source))
                }
            }
            "integer" => parse_int(node_text(node, source))
                .map(PhpValue::Int)
                .unwrap_or(PhpValue::Unknown),
            "float" => parse_float(node_text(node, source))
                .map(PhpValue::Float)
                .unwrap_or(PhpValue::Unknown),
            "boolean" => PhpValue::Bool(node_text(node, source).eq_ignore_ascii_case("true")),
            "null" => PhpValue::Null,
            "array_creation_expression" => self.eval_array(node, source),
            "function_call_expression" => self.eval_function_call(node, source),
            "scoped_call_expression" => self.eval_static_call(node, source),
            "binary_expression" => self.eval_binary(node, source),
            "conditional_expression" => self.eval_conditional(node, source),
            "unary_op_expression" => self.eval_unary(node, source),
            "cast_expression" => self.eval_cast(node, source),
            "class_constant_access_expression" => {
                let text = node_text(node, source);
                match text.strip_suffix("::class") {
                    Some(class) => PhpValue::String(normalize_name(class).to_string()),
                    None => PhpValue::Unknown,
                }
            }
            _ => PhpValue::Unknown,
        }
    }

    fn eval_array(&self, node: &Node, source: &[u8]) -> PhpValue {
        let mut array = PhpArray::new();
        let mut cursor = node.walk();
        for element in node.named_children(&mut cursor) {
            if element.kind() != "array_element_initializer" {
                continue;
            }

            let mut element_cursor = element.walk();
            let children: Vec<Node> = element.children(&mut element_cursor).collect();
            let has_arrow = children.iter().any(|c| c.kind() == "=>");
            let named: Vec<Node> = children
                .into_iter()
                .filter(|c| c.is_named() && c.kind() != "comment")
                .collect();

            if named.iter().any(|c| c.kind() == "variadic_unpacking") {
                // Spread of a runtime value; the resulting keys are unknowable.
                continue;
            }

            match (has_arrow, named.first(), named.last()) {
                (true, Some(key_node), Some(value_node)) if named.len() >= 2 => {
                    let Some(key) = to_key(self.eval(key_node, source)) else {
                        tracing::trace!(
                            line = key_node.start_position().row + 1,
                            "skipping array entry with dynamic key"
                        );
                        continue;
                    };
                    array.insert(key, self.eval(value_node, source));
                }
                (false, _, Some(value_node)) => array.push(self.eval(value_node, source)),
                _ => {}
            }
        }
        PhpValue::Array(array)
    }

    fn eval_function_call(&self, node: &Node, source: &[u8]) -> PhpValue {
        let Some(function) = node.child_by_field_name("function") else {
            return PhpValue::Unknown;
        };
        let name = normalize_name(node_text(&function, source)).to_ascii_lowercase();
        let args = call_arguments(node);

        match name.as_str() {
            "env" => self.eval_env(&args, source),
            "base_path" => self.path_helper("", &args, source),
            "app_path" => self.path_helper("app", &args, source),
            "config_path" => self.path_helper("config", &args, source),
            "database_path" => self.path_helper("database", &args, source),
            "lang_path" => self.path_helper("lang", &args, source),
            "public_path" => self.path_helper("public", &args, source),
            "resource_path" => self.path_helper("resources", &args, source),
            "storage_path" => self.path_helper("storage", &args, source),
            "realpath" => match args.first().map(|a| self.eval(a, source)) {
                Some(PhpValue::String(path)) => PhpValue::String(path),
                _ => PhpValue::Unknown,
            },
            _ => PhpValue::Unknown,
        }
    }

    fn eval_static_call(&self, node: &Node, source: &[u8]) -> PhpValue {
        let scope = node
            .child_by_field_name("scope")
            .map(|n| node_text(&n, source))
            .unwrap_or("");
        let method = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source))
            .unwrap_or("");

        if short_name(scope) == "Env" && method.eq_ignore_ascii_case("get") {
            return self.eval_env(&call_arguments(node), source);
        }
        PhpValue::Unknown
    }

    fn eval_env(&self, args: &[Node], source: &[u8]) -> PhpValue {
        let key = match args.first().map(|a| self.eval(a, source)) {
            Some(PhpValue::String(key)) => key,
            _ => return PhpValue::Unknown,
        };
        if let Some(value) = self.env.resolve(&key) {
            return value;
        }
        match args.get(1) {
            Some(default) => self.eval(default, source),
            None => PhpValue::Null,
        }
    }

    fn path_helper(&self, dir: &str, args: &[Node], source: &[u8]) -> PhpValue {
        let base = if dir.is_empty() {
            self.base_path.to_path_buf()
        } else {
            self.base_path.join(dir)
        };
        let path = match args.first().map(|a| self.eval(a, source)) {
            None => base,
            Some(PhpValue::String(rel)) if rel.is_empty() => base,
            Some(PhpValue::String(rel)) => base.join(rel.trim_start_matches('/')),
            Some(_) => return PhpValue::Unknown,
        };
        PhpValue::String(path.to_string_lossy().into_owned())
    }

    fn eval_binary(&self, node: &Node, source: &[u8]) -> PhpValue {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return PhpValue::Unknown;
        };
        let operator = binary_operator(node, source);
        let lhs = self.eval(&left, source);

        // Short-circuiting operators only evaluate the right side when needed.
        match operator.as_str() {
            "??" => {
                return match lhs {
                    PhpValue::Null => self.eval(&right, source),
                    other => other,
                }
            }
            "||" | "or" => {
                return match lhs.truthy() {
                    Some(true) => PhpValue::Bool(true),
                    Some(false) => truthy_value(&self.eval(&right, source)),
                    None => PhpValue::Unknown,
                }
            }
            "&&" | "and" => {
                return match lhs.truthy() {
                    Some(false) => PhpValue::Bool(false),
                    Some(true) => truthy_value(&self.eval(&right, source)),
                    None => PhpValue::Unknown,
                }
            }
            _ => {}
        }

        let rhs = self.eval(&right, source);
        if lhs.is_unknown() || rhs.is_unknown() {
            return PhpValue::Unknown;
        }

        match operator.as_str() {
            "." => match (lhs.to_php_string(), rhs.to_php_string()) {
                (Some(a), Some(b)) => PhpValue::String(a + &b),
                _ => PhpValue::Unknown,
            },
            "===" => PhpValue::Bool(lhs == rhs),
            "!==" => PhpValue::Bool(lhs != rhs),
            "==" => loose_eq(&lhs, &rhs).map(PhpValue::Bool).unwrap_or(PhpValue::Unknown),
            "!=" | "<>" => loose_eq(&lhs, &rhs)
                .map(|eq| PhpValue::Bool(!eq))
                .unwrap_or(PhpValue::Unknown),
            "+" | "-" | "*" => arithmetic(&operator, &lhs, &rhs),
            _ => PhpValue::Unknown,
        }
    }

    fn eval_conditional(&self, node: &Node, source: &[u8]) -> PhpValue {
        let Some(condition) = node.child_by_field_name("condition") else {
            return PhpValue::Unknown;
        };
        let cond = self.eval(&condition, source);
        match cond.truthy() {
            Some(true) => match node.child_by_field_name("body") {
                Some(body) => self.eval(&body, source),
                // `a ?: b`
                None => cond,
            },
            Some(false) => node
                .child_by_field_name("alternative")
                .map(|alt| self.eval(&alt, source))
                .unwrap_or(PhpValue::Unknown),
            None => PhpValue::Unknown,
        }
    }

    fn eval_unary(&self, node: &Node, source: &[u8]) -> PhpValue {
        let operator = node
            .child(0)
            .map(|op| node_text(&op, source).to_string())
            .unwrap_or_default();
        let Some(operand) = last_named(node) else {
            return PhpValue::Unknown;
        };
        let value = self.eval(&operand, source);
        match (operator.as_str(), value) {
            ("-", PhpValue::Int(n)) => PhpValue::Int(-n),
            ("-", PhpValue::Float(f)) => PhpValue::Float(-f),
            ("+", v @ (PhpValue::Int(_) | PhpValue::Float(_))) => v,
            ("!", v) => v
                .truthy()
                .map(|b| PhpValue::Bool(!b))
                .unwrap_or(PhpValue::Unknown),
            _ => PhpValue::Unknown,
        }
    }

    fn eval_cast(&self, node: &Node, source: &[u8]) -> PhpValue {
        let cast_type = node
            .child_by_field_name("type")
            .map(|t| node_text(&t, source).trim().to_ascii_lowercase())
            .unwrap_or_default();
        let Some(value_node) = node.child_by_field_name("value").or_else(|| last_named(node))
        else {
            return PhpValue::Unknown;
        };
        let value = self.eval(&value_node, source);

        let cast = match cast_type.as_str() {
            "int" | "integer" => value.to_int().map(PhpValue::Int),
            "bool" | "boolean" => value.truthy().map(PhpValue::Bool),
            "string" => value.to_php_string().map(PhpValue::String),
            "float" | "double" | "real" => match value {
                PhpValue::Float(f) => Some(PhpValue::Float(f)),
                other => other.to_int().map(|n| PhpValue::Float(n as f64)),
            },
            _ => None,
        };
        cast.unwrap_or(PhpValue::Unknown)
    }
}

/// Value expressions of a call's arguments, in order.
pub(crate) fn call_arguments<'t>(call: &Node<'t>) -> Vec<Node<'t>> {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|arg| arg.kind() == "argument")
        .filter_map(|arg| last_named(&arg))
        .collect()
}

fn first_named<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}

fn last_named<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .last();
    last
}

fn binary_operator(node: &Node, source: &[u8]) -> String {
    if let Some(op) = node.child_by_field_name("operator") {
        return node_text(&op, source).to_ascii_lowercase();
    }
    let mut cursor = node.walk();
    let op = node
        .children(&mut cursor)
        .find(|c| !c.is_named())
        .map(|c| node_text(&c, source).to_ascii_lowercase())
        .unwrap_or_default();
    op
}

fn has_interpolation(node: &Node) -> bool {
    let mut cursor = node.walk();
    let interpolated = node
        .named_children(&mut cursor)
        .any(|c| !matches!(c.kind(), "string_content" | "string_value" | "escape_sequence"));
    interpolated
}

fn eval_string_token(raw: &str) -> PhpValue {
    let trimmed = raw.trim_start_matches(['b', 'B']);
    let decoded = if trimmed.starts_with('"') {
        decode_double_quoted(raw)
    } else {
        decode_single_quoted(raw)
    };
    decoded.map(PhpValue::String).unwrap_or(PhpValue::Unknown)
}

fn to_key(value: PhpValue) -> Option<PhpKey> {
    match value {
        PhpValue::String(s) => Some(PhpKey::from_string(s)),
        PhpValue::Int(n) => Some(PhpKey::Int(n)),
        PhpValue::Bool(b) => Some(PhpKey::Int(i64::from(b))),
        PhpValue::Float(f) => Some(PhpKey::Int(f as i64)),
        PhpValue::Null => Some(PhpKey::Str(String::new())),
        PhpValue::Array(_) | PhpValue::Unknown => None,
    }
}

fn truthy_value(value: &PhpValue) -> PhpValue {
    value
        .truthy()
        .map(PhpValue::Bool)
        .unwrap_or(PhpValue::Unknown)
}

fn loose_eq(lhs: &PhpValue, rhs: &PhpValue) -> Option<bool> {
    match (lhs, rhs) {
        (PhpValue::Bool(_), _) | (_, PhpValue::Bool(_)) | (PhpValue::Null, _) | (_, PhpValue::Null) => {
            Some(lhs.truthy()? == rhs.truthy()?)
        }
        _ => Some(lhs.to_php_string()? == rhs.to_php_string()?),
    }
}

fn arithmetic(operator: &str, lhs: &PhpValue, rhs: &PhpValue) -> PhpValue {
    match (lhs, rhs) {
        (PhpValue::Int(a), PhpValue::Int(b)) => {
            let result = match operator {
                "+" => a.checked_add(*b),
                "-" => a.checked_sub(*b),
                _ => a.checked_mul(*b),
            };
            result.map(PhpValue::Int).unwrap_or(PhpValue::Unknown)
        }
        (PhpValue::Int(_) | PhpValue::Float(_), PhpValue::Int(_) | PhpValue::Float(_)) => {
            let a = as_f64(lhs);
            let b = as_f64(rhs);
            PhpValue::Float(match operator {
                "+" => a + b,
                "-" => a - b,
                _ => a * b,
            })
        }
        _ => PhpValue::Unknown,
    }
}

fn as_f64(value: &PhpValue) -> f64 {
    match value {
        PhpValue::Int(n) => *n as f64,
        PhpValue::Float(f) => *f,
        _ => 0.0,
    }
}

//! Helpers for turning PHP literal tokens and names into Rust values.

use tree_sitter::Node;

/// UTF-8 text of a node, or an empty string for invalid UTF-8.
pub fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based line of a node's start.
pub fn node_line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// 1-based column of a node's start.
pub fn node_column(node: &Node) -> u32 {
    node.start_position().column as u32 + 1
}

/// Strip the leading namespace separator from a (qualified) name.
pub fn normalize_name(name: &str) -> &str {
    name.trim().trim_start_matches('\\')
}

/// Last segment of a qualified name: `Illuminate\Support\Env` → `Env`.
pub fn short_name(name: &str) -> &str {
    let name = normalize_name(name);
    name.rsplit('\\').next().unwrap_or(name)
}

/// Decode a single-quoted PHP string token including its quotes.
///
/// Only `\\` and `\'` are escapes; everything else is literal.
pub fn decode_single_quoted(raw: &str) -> Option<String> {
    let inner = strip_quotes(raw, '\'')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('\\') | Some('\'') => {
                    out.push(chars.next().unwrap_or('\\'));
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    Some(out)
}

/// Decode a double-quoted PHP string token that contains no interpolation.
pub fn decode_double_quoted(raw: &str) -> Option<String> {
    let inner = strip_quotes(raw, '"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('v') => out.push('\u{0b}'),
            Some('e') => out.push('\u{1b}'),
            Some('f') => out.push('\u{0c}'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('$') => out.push('$'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}

fn strip_quotes(raw: &str, quote: char) -> Option<&str> {
    let raw = raw.strip_prefix(['b', 'B']).unwrap_or(raw);
    raw.strip_prefix(quote)?.strip_suffix(quote)
}

/// Parse a PHP integer literal (decimal, hex, octal, binary, `_` separators).
pub fn parse_int(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return i64::from_str_radix(bin, 2).ok();
    }
    if let Some(oct) = lower.strip_prefix("0o") {
        return i64::from_str_radix(oct, 8).ok();
    }
    if lower.len() > 1 && lower.starts_with('0') {
        return i64::from_str_radix(&lower[1..], 8).ok();
    }
    lower.parse().ok()
}

/// Parse a PHP float literal.
pub fn parse_float(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    cleaned.parse().ok()
}

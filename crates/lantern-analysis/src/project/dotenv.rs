//! The project's `.env` file, read without touching the process environment.

use std::collections::BTreeMap;
use std::path::Path;

use lantern_core::errors::ProjectError;

use crate::php::PhpValue;

/// Parsed `.env` key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    values: BTreeMap<String, String>,
}

impl EnvFile {
    /// Load `path`. A missing file yields an empty set; malformed lines are
    /// logged and skipped.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no dotenv file");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
        Ok(Self::parse(&contents, path))
    }

    /// Parse dotenv text. `${VAR}` references resolve against keys defined
    /// earlier in the same file; unknown references expand to nothing.
    pub fn parse(contents: &str, path: &Path) -> Self {
        let mut values = BTreeMap::new();
        for (index, line) in contents.lines().enumerate() {
            match parse_line(line, &values) {
                Ok(Some((key, value))) => {
                    values.insert(key, value);
                }
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = index + 1,
                        reason,
                        "skipping malformed dotenv line"
                    );
                }
            }
        }
        Self { values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw string value.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value as Laravel's `env()` helper returns it.
    pub fn resolve(&self, key: &str) -> Option<PhpValue> {
        self.raw(key).map(coerce)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

type Pair = (String, String);

fn parse_line(line: &str, known: &BTreeMap<String, String>) -> Result<Option<Pair>, &'static str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);
    let (key, rest) = line.split_once('=').ok_or("missing '='")?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return Err("invalid key");
    }
    let rest = rest.trim_start();

    let value = if let Some(body) = rest.strip_prefix('\'') {
        let end = body.find('\'').ok_or("unterminated single quote")?;
        body[..end].to_string()
    } else if let Some(body) = rest.strip_prefix('"') {
        let raw = double_quoted(body)?;
        expand(&raw, known)
    } else if rest.starts_with('#') {
        String::new()
    } else {
        let raw = match rest.find(" #") {
            Some(pos) => &rest[..pos],
            None => rest,
        };
        expand(raw.trim_end(), known)
    };
    Ok(Some((key.to_string(), value)))
}

/// Body of a double-quoted value up to the closing quote, with escapes applied.
/// `\$` is kept escaped so expansion leaves it literal.
fn double_quoted(body: &str) -> Result<String, &'static str> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(out),
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('$') => out.push_str("\\$"),
                Some(other) => out.push(other),
                None => break,
            },
            _ => out.push(c),
        }
    }
    Err("unterminated double quote")
}

/// Replace `${NAME}` with an earlier value from the same file.
fn expand(raw: &str, known: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find(['$', '\\']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("\\$") {
            out.push('$');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("${") {
            match after.find('}') {
                Some(end) => {
                    if let Some(value) = known.get(&after[..end]) {
                        out.push_str(value);
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        } else {
            let mut chars = tail.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out.push_str(rest);
    out
}

/// Apply Laravel's special-value coercion.
pub fn coerce(raw: &str) -> PhpValue {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "(true)" => PhpValue::Bool(true),
        "false" | "(false)" => PhpValue::Bool(false),
        "empty" | "(empty)" => PhpValue::String(String::new()),
        "null" | "(null)" => PhpValue::Null,
        _ => PhpValue::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_values_are_coerced() {
        assert_eq!(coerce("true"), PhpValue::Bool(true));
        assert_eq!(coerce("(false)"), PhpValue::Bool(false));
        assert_eq!(coerce("(empty)"), PhpValue::String(String::new()));
        assert_eq!(coerce("NULL"), PhpValue::Null);
        assert_eq!(coerce("redis"), PhpValue::String("redis".into()));
    }

    #[test]
    fn loads_file_and_skips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# comment\nAPP_ENV=production\nAPP_NAME=\"My App\"\nAPP_DEBUG=false\n",
        )
        .unwrap();

        let env = EnvFile::load(&path).unwrap();
        assert_eq!(env.raw("APP_ENV"), Some("production"));
        assert_eq!(env.raw("APP_NAME"), Some("My App"));
        assert_eq!(env.resolve("APP_DEBUG"), Some(PhpValue::Bool(false)));
        assert_eq!(env.resolve("MISSING"), None);
    }

    fn parsed(contents: &str) -> EnvFile {
        EnvFile::parse(contents, Path::new(".env"))
    }

    #[test]
    fn references_resolve_against_earlier_keys() {
        let env = parsed(
            "APP_NAME=Shop\nAPP_URL=\"https://${APP_NAME}.test\"\nMAIL_FROM=${APP_NAME}@mail\nLATER=${DEFINED_AFTER}\nDEFINED_AFTER=x\n",
        );
        assert_eq!(env.raw("APP_URL"), Some("https://Shop.test"));
        assert_eq!(env.raw("MAIL_FROM"), Some("Shop@mail"));
        assert_eq!(env.raw("LATER"), Some(""));
    }

    #[test]
    fn single_quotes_and_escapes_stay_literal() {
        let env = parsed("A=1\nB='${A} # kept'\nC=\"\\${A}\"\nD=plain # trailing\nexport E=\"x\\\"y\"\n");
        assert_eq!(env.raw("B"), Some("${A} # kept"));
        assert_eq!(env.raw("C"), Some("${A}"));
        assert_eq!(env.raw("D"), Some("plain"));
        assert_eq!(env.raw("E"), Some("x\"y"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let env = parsed("NOT A PAIR\nBROKEN=\"open\nOK=yes\n");
        assert_eq!(env.len(), 1);
        assert_eq!(env.raw("OK"), Some("yes"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::load(&dir.path().join(".env")).unwrap();
        assert!(env.is_empty());
    }
}

//! `Cache-Control` response header evaluation.

/// Minimum `max-age` for a compiled asset to count as long-lived.
pub const ONE_DAY_SECS: u64 = 86_400;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    pub no_store: bool,
    pub no_cache: bool,
    pub max_age: Option<u64>,
    pub s_maxage: Option<u64>,
}

impl CacheControl {
    /// Parse a header value. Unknown directives and unparsable numbers are
    /// ignored.
    pub fn parse(header: &str) -> Self {
        let mut parsed = Self::default();
        for directive in split_directives(header) {
            let (name, value) = match directive.split_once('=') {
                Some((n, v)) => (n.trim(), Some(unquote(v.trim()))),
                None => (directive.trim(), None),
            };
            let seconds = value.and_then(|v| v.parse::<u64>().ok());
            match name.to_ascii_lowercase().as_str() {
                "no-store" => parsed.no_store = true,
                "no-cache" => parsed.no_cache = true,
                "max-age" => parsed.max_age = seconds.or(parsed.max_age),
                "s-maxage" => parsed.s_maxage = seconds.or(parsed.s_maxage),
                _ => {}
            }
        }
        parsed
    }

    pub fn is_long_lived(&self) -> bool {
        if self.no_store || self.no_cache {
            return false;
        }
        self.max_age
            .into_iter()
            .chain(self.s_maxage)
            .any(|secs| secs >= ONE_DAY_SECS)
    }
}

/// Whether an optional header value allows caching for at least a day.
/// A missing header is never long-lived.
pub fn is_long_lived(header: Option<&str>) -> bool {
    header.is_some_and(|h| CacheControl::parse(h).is_long_lived())
}

/// Split on commas outside double quotes.
fn split_directives(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in header.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

//! Statically evaluated PHP values.

/// A PHP array key. Numeric strings are normalised to integers, as PHP does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhpKey {
    Int(i64),
    Str(String),
}

impl PhpKey {
    pub fn from_string(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Self::Int(n),
            _ => Self::Str(s),
        }
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Str(s) => s == segment,
            Self::Int(n) => segment.parse::<i64>().is_ok_and(|m| m == *n),
        }
    }
}

impl std::fmt::Display for PhpKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Ordered PHP array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhpArray {
    entries: Vec<(PhpKey, PhpValue)>,
    next_index: i64,
}

impl PhpArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with an explicit key. An existing key keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, key: PhpKey, value: PhpValue) {
        if let PhpKey::Int(n) = key {
            if n >= self.next_index {
                self.next_index = n + 1;
            }
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append with the next integer key.
    pub fn push(&mut self, value: PhpValue) {
        let key = PhpKey::Int(self.next_index);
        self.insert(key, value);
    }

    pub fn get(&self, segment: &str) -> Option<&PhpValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.matches(segment))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PhpKey, &PhpValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &PhpValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of statically evaluating a PHP expression.
///
/// `Unknown` marks anything that needs the PHP runtime (closures, method
/// calls, variables).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PhpValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(PhpArray),
    Unknown,
}

impl PhpValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&PhpArray> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// PHP truthiness, or `None` when the value is unknown.
    pub fn truthy(&self) -> Option<bool> {
        Some(match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !(s.is_empty() || s == "0"),
            Self::Array(a) => !a.is_empty(),
            Self::Unknown => return None,
        })
    }

    /// PHP string conversion, or `None` for arrays and unknowns.
    pub fn to_php_string(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(true) => Some("1".to_string()),
            Self::Bool(false) => Some(String::new()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(format_float(*f)),
            Self::String(s) => Some(s.clone()),
            Self::Array(_) | Self::Unknown => None,
        }
    }

    /// PHP `(int)` cast.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Null => Some(0),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(n) => Some(*n),
            Self::Float(f) => Some(*f as i64),
            Self::String(s) => {
                let digits: String = s
                    .trim_start()
                    .chars()
                    .enumerate()
                    .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
                    .map(|(_, c)| c)
                    .collect();
                Some(digits.parse().unwrap_or(0))
            }
            Self::Array(a) => Some(i64::from(!a.is_empty())),
            Self::Unknown => None,
        }
    }

    /// Navigate a dot-separated path through nested arrays.
    pub fn get_path(&self, path: &str) -> Option<&PhpValue> {
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for segment in path.split('.') {
            current = current.as_array()?.get(segment)?;
        }
        Some(current)
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> PhpValue {
        PhpValue::String(v.to_string())
    }

    #[test]
    fn numeric_string_keys_collapse_to_ints() {
        assert_eq!(PhpKey::from_string("3".into()), PhpKey::Int(3));
        assert_eq!(PhpKey::from_string("03".into()), PhpKey::Str("03".into()));
        assert_eq!(PhpKey::from_string("redis".into()), PhpKey::Str("redis".into()));
    }

    #[test]
    fn push_continues_after_highest_int_key() {
        let mut array = PhpArray::new();
        array.push(s("a"));
        array.insert(PhpKey::Int(5), s("b"));
        array.push(s("c"));
        let keys: Vec<_> = array.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![PhpKey::Int(0), PhpKey::Int(5), PhpKey::Int(6)]);
    }

    #[test]
    fn duplicate_keys_override_in_place() {
        let mut array = PhpArray::new();
        array.insert(PhpKey::Str("driver".into()), s("file"));
        array.insert(PhpKey::Str("path".into()), s("/tmp"));
        array.insert(PhpKey::Str("driver".into()), s("redis"));
        assert_eq!(array.len(), 2);
        assert_eq!(array.get("driver"), Some(&s("redis")));
    }

    #[test]
    fn get_path_walks_nested_arrays() {
        let mut redis = PhpArray::new();
        redis.insert(PhpKey::Str("driver".into()), s("redis"));
        let mut stores = PhpArray::new();
        stores.insert(PhpKey::Str("redis".into()), PhpValue::Array(redis));
        let mut root = PhpArray::new();
        root.insert(PhpKey::Str("stores".into()), PhpValue::Array(stores));
        let root = PhpValue::Array(root);

        assert_eq!(root.get_path("stores.redis.driver"), Some(&s("redis")));
        assert_eq!(root.get_path("stores.file.driver"), None);
        assert_eq!(root.get_path("stores.redis.driver.x"), None);
    }

    #[test]
    fn truthiness_follows_php() {
        assert_eq!(s("0").truthy(), Some(false));
        assert_eq!(s("").truthy(), Some(false));
        assert_eq!(s("false").truthy(), Some(true));
        assert_eq!(PhpValue::Unknown.truthy(), None);
        assert_eq!(PhpValue::Array(PhpArray::new()).truthy(), Some(false));
    }

    #[test]
    fn int_cast_reads_leading_digits() {
        assert_eq!(s("86400abc").to_int(), Some(86400));
        assert_eq!(s("abc").to_int(), Some(0));
        assert_eq!(PhpValue::Bool(true).to_int(), Some(1));
    }
}

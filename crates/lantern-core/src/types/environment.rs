//! Application environment as reported by `app.env`.

use serde::{Deserialize, Serialize};

/// The environment the inspected application runs in.
///
/// Laravel treats `app.env` as a free-form string; the analyzers only care
/// about a handful of well-known values, everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppEnvironment {
    Local,
    Testing,
    Staging,
    #[default]
    Production,
    Other(String),
}

impl AppEnvironment {
    /// Parse an `app.env` value. Matching is case-insensitive.
    pub fn parse_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "testing" => Self::Testing,
            "staging" => Self::Staging,
            "production" => Self::Production,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Testing => "testing",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Other(name) => name,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Local and testing environments are allowed in-memory drivers.
    pub fn is_local_or_testing(&self) -> bool {
        matches!(self, Self::Local | Self::Testing)
    }
}

impl From<String> for AppEnvironment {
    fn from(value: String) -> Self {
        Self::parse_str(&value)
    }
}

impl From<AppEnvironment> for String {
    fn from(env: AppEnvironment) -> Self {
        env.name().to_string()
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environments() {
        assert_eq!(AppEnvironment::parse_str("local"), AppEnvironment::Local);
        assert_eq!(AppEnvironment::parse_str(" Production "), AppEnvironment::Production);
        assert_eq!(AppEnvironment::parse_str("testing"), AppEnvironment::Testing);
        assert_eq!(
            AppEnvironment::parse_str("qa"),
            AppEnvironment::Other("qa".to_string())
        );
    }

    #[test]
    fn abbreviations_are_not_production() {
        let env = AppEnvironment::parse_str("prod");
        assert_eq!(env, AppEnvironment::Other("prod".to_string()));
        assert!(!env.is_production());
        assert_eq!(env.to_string(), "prod");
    }

    #[test]
    fn only_local_and_testing_allow_in_memory_drivers() {
        assert!(AppEnvironment::Local.is_local_or_testing());
        assert!(AppEnvironment::Testing.is_local_or_testing());
        assert!(!AppEnvironment::Staging.is_local_or_testing());
        assert!(!AppEnvironment::Other("qa".into()).is_local());
    }
}

//! Path pattern matching.
//!
//! # Responsibilities
//! - Match the remaining request path against an anchored literal
//! - Parse the textual pattern form used in config files
//! - Produce the reverse (path) form of a pattern
//!
//! # Design Decisions
//! - Anchors are explicit: `^lit` (prefix), `lit$` (suffix), `^lit$` (exact)
//! - Path matching is case-sensitive
//! - No regex, matching is a single `starts_with`/`ends_with`/`==`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::routing::error::ConfigurationError;

/// Characters that cannot appear inside a pattern literal.
const RESERVED: &[char] = &['^', '$', '?', '#'];

/// An anchored path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Path starts with the literal.
    Prefix(String),
    /// Path ends with the literal.
    Suffix(String),
    /// Path equals the literal.
    Exact(String),
}

impl Pattern {
    pub fn prefix(literal: impl Into<String>) -> Self {
        Self::Prefix(literal.into())
    }

    pub fn suffix(literal: impl Into<String>) -> Self {
        Self::Suffix(literal.into())
    }

    pub fn exact(literal: impl Into<String>) -> Self {
        Self::Exact(literal.into())
    }

    /// Returns true if the path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Prefix(lit) => path.starts_with(lit.as_str()),
            Pattern::Suffix(lit) => path.ends_with(lit.as_str()),
            Pattern::Exact(lit) => path == lit,
        }
    }

    /// The literal text of the pattern, without anchors.
    pub fn literal(&self) -> &str {
        match self {
            Pattern::Prefix(lit) | Pattern::Suffix(lit) | Pattern::Exact(lit) => lit,
        }
    }

    /// Shortest path this pattern accepts. Used for reverse lookup.
    pub fn reverse(&self) -> &str {
        self.literal()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Prefix(lit) => write!(f, "^{}", lit),
            Pattern::Suffix(lit) => write!(f, "{}$", lit),
            Pattern::Exact(lit) => write!(f, "^{}$", lit),
        }
    }
}

impl FromStr for Pattern {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigurationError::InvalidPattern {
            pattern: s.to_string(),
            reason: reason.to_string(),
        };

        let (start, rest) = match s.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (end, literal) = match rest.strip_suffix('$') {
            Some(literal) => (true, literal),
            None => (false, rest),
        };

        if literal.contains(RESERVED) {
            return Err(invalid("literal contains a reserved character"));
        }

        match (start, end) {
            (true, true) => Ok(Pattern::Exact(literal.to_string())),
            (true, false) => Ok(Pattern::Prefix(literal.to_string())),
            (false, true) => Ok(Pattern::Suffix(literal.to_string())),
            (false, false) => Err(invalid("pattern must be anchored with '^' or '$'")),
        }
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matcher() {
        let pattern = Pattern::prefix("subscribe/");
        assert!(pattern.matches("subscribe/"));
        assert!(pattern.matches("subscribe/extra"));
        assert!(!pattern.matches("resubscribe/"));
        assert!(!pattern.matches("Subscribe/")); // Case sensitive
    }

    #[test]
    fn test_suffix_matcher() {
        let pattern = Pattern::suffix("test/");
        assert!(pattern.matches("test/"));
        assert!(pattern.matches("pretest/"));
        assert!(pattern.matches("a/b/test/"));
        assert!(!pattern.matches("test/more"));
    }

    #[test]
    fn test_exact_matcher() {
        let pattern = Pattern::exact("");
        assert!(pattern.matches(""));
        assert!(!pattern.matches("/"));
        assert!(!pattern.matches("anything"));
    }

    #[test]
    fn test_parse_anchors() {
        assert_eq!("^subscribe/".parse::<Pattern>().unwrap(), Pattern::prefix("subscribe/"));
        assert_eq!("test/$".parse::<Pattern>().unwrap(), Pattern::suffix("test/"));
        assert_eq!("^$".parse::<Pattern>().unwrap(), Pattern::exact(""));
        assert_eq!("^a/b/$".parse::<Pattern>().unwrap(), Pattern::exact("a/b/"));
    }

    #[test]
    fn test_parse_rejects_unanchored_and_reserved() {
        assert!(matches!(
            "subscribe/".parse::<Pattern>(),
            Err(ConfigurationError::InvalidPattern { .. })
        ));
        assert!("^a$b$".parse::<Pattern>().is_err());
        assert!("^a?b".parse::<Pattern>().is_err());
        assert!("^^a".parse::<Pattern>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["^subscribe/", "test/$", "^$"] {
            let pattern: Pattern = raw.parse().unwrap();
            assert_eq!(pattern.to_string(), raw);
        }
    }
}

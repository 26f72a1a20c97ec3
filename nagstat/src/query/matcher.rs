//! String and regex matchers and the predicates built from them.

use regex::Regex;

use crate::model::ServiceEntry;
use crate::Result;

/// How one attribute value is tested.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact string equality.
    Exact(String),
    /// Regex search anywhere in the value.
    Pattern(Regex),
}

impl Matcher {
    /// Build a matcher from raw selector input.
    ///
    /// Input wrapped in slashes (`/pattern/`) compiles to a regex with the
    /// delimiters stripped; everything else is an exact string.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.strip_prefix('/') {
            Some(inner) => {
                let pattern = inner.strip_suffix('/').unwrap_or(inner);
                Ok(Matcher::Pattern(Regex::new(pattern)?))
            }
            None => Ok(Matcher::Exact(raw.to_string())),
        }
    }

    pub fn exact(value: impl Into<String>) -> Self {
        Matcher::Exact(value.into())
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Matcher::Exact(s) => s == value,
            Matcher::Pattern(re) => re.is_match(value),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Exact(a), Matcher::Exact(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Exact(s) => write!(f, "{}", s),
            Matcher::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// One attribute test: `attribute` must satisfy `matcher`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub attribute: String,
    pub matcher: Matcher,
}

impl Predicate {
    pub fn new(attribute: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            attribute: attribute.into(),
            matcher,
        }
    }

    /// Predicate from raw selector input (see [`Matcher::parse`]).
    pub fn parse(attribute: impl Into<String>, raw: &str) -> Result<Self> {
        Ok(Self::new(attribute, Matcher::parse(raw)?))
    }

    pub fn exact(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(attribute, Matcher::exact(value))
    }

    /// A record without the attribute never matches.
    pub fn matches(&self, service: &ServiceEntry) -> bool {
        service
            .get(&self.attribute)
            .is_some_and(|v| self.matcher.is_match(v))
    }
}

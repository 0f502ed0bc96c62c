//! Scope set carried by an access token.
//!
//! Stored as a single space-separated string column; handled in memory as a
//! set so that ordering and duplicates never influence a subset check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

/// Set of capability names granted to (or required of) a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Scopes(BTreeSet<String>);

impl Scopes {
    /// An empty scope set; as a requirement it is always satisfied
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parse a whitespace-separated scope string
    pub fn parse(raw: &str) -> Self {
        raw.split_whitespace().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if every scope in `required` is also in `self`
    pub fn is_superset_of(&self, required: &Scopes) -> bool {
        required.0.is_subset(&self.0)
    }
}

impl<S: Into<String>> FromIterator<S> for Scopes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl FromStr for Scopes {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Scopes {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Scopes {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Scopes> for String {
    fn from(scopes: Scopes) -> Self {
        scopes.to_string()
    }
}

impl std::fmt::Display for Scopes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for scope in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(scope)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tolerates_irregular_whitespace() {
        let scopes = Scopes::parse("  read\twrite   read\n");
        assert_eq!(scopes.len(), 2);
        assert!(scopes.contains("read"));
        assert!(scopes.contains("write"));
    }

    #[test]
    fn test_empty_string_is_empty_set() {
        assert!(Scopes::parse("").is_empty());
        assert!(Scopes::parse("   ").is_empty());
    }

    #[test]
    fn test_display_is_sorted_and_space_joined() {
        assert_eq!(Scopes::parse("write admin read").to_string(), "admin read write");
        assert_eq!(Scopes::new().to_string(), "");
    }

    #[test]
    fn test_superset() {
        let granted = Scopes::parse("read write");

        assert!(granted.is_superset_of(&Scopes::new()));
        assert!(granted.is_superset_of(&Scopes::parse("write")));
        assert!(granted.is_superset_of(&Scopes::parse("read write")));
        assert!(!granted.is_superset_of(&Scopes::parse("read write admin")));
        assert!(!Scopes::new().is_superset_of(&Scopes::parse("read")));
    }

    #[test]
    fn test_scope_names_are_case_sensitive() {
        let granted = Scopes::parse("Read");
        assert!(!granted.is_superset_of(&Scopes::parse("read")));
    }

    #[test]
    fn test_from_iterator() {
        let scopes: Scopes = ["a", "b", "a"].into_iter().collect();
        assert_eq!(scopes.len(), 2);
    }
}

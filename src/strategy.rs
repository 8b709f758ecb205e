//! Source column to destination field mapping

use indexmap::IndexMap;
use std::collections::HashMap;

/// Which column feeds which record field for one bind call
///
/// Pairs are applied in insertion order. Fields not named here are never
/// touched. Mapping two columns onto the same field is allowed but the last
/// present value wins.
///
/// # Examples
///
/// ```
/// use csvbind::Strategy;
///
/// let strategy = Strategy::new()
///     .with("n", "Name")
///     .with("c", "Counter");
///
/// assert_eq!(strategy.destination("n"), Some("Name"));
/// assert_eq!(strategy.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Strategy {
    pairs: IndexMap<String, String>,
}

impl Strategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `source` column onto `destination` field (builder pattern)
    pub fn with(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.insert(source, destination);
        self
    }

    /// Map `source` column onto `destination` field, replacing any previous mapping for `source`
    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.pairs.insert(source.into(), destination.into());
    }

    /// Destination field for `source`
    pub fn destination(&self, source: &str) -> Option<&str> {
        self.pairs.get(source).map(String::as_str)
    }

    /// (source, destination) pairs in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S, D> FromIterator<(S, D)> for Strategy
where
    S: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut strategy = Strategy::new();
        for (source, destination) in iter {
            strategy.insert(source, destination);
        }
        strategy
    }
}

impl<S, D, const N: usize> From<[(S, D); N]> for Strategy
where
    S: Into<String>,
    D: Into<String>,
{
    fn from(pairs: [(S, D); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for Strategy {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let strategy = Strategy::from([("d", "Date"), ("n", "Name"), ("c", "Counter")]);
        let sources: Vec<_> = strategy.iter().map(|(s, _)| s).collect();
        assert_eq!(sources, vec!["d", "n", "c"]);
    }

    #[test]
    fn test_reinsert_replaces_destination() {
        let mut strategy = Strategy::new().with("n", "Name");
        strategy.insert("n", "Alias");
        assert_eq!(strategy.len(), 1);
        assert_eq!(strategy.destination("n"), Some("Alias"));
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("n".to_string(), "Name".to_string());
        let strategy = Strategy::from(map);
        assert_eq!(strategy.destination("n"), Some("Name"));
        assert_eq!(strategy.destination("x"), None);
    }
}

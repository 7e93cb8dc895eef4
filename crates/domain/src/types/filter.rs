//! Filter values and the predicates they resolve to

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schema::FilterOp;

/// User-entered filter values keyed by a domain's filter keys
///
/// A blank value is the same as an absent one: it produces no predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, String>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Trimmed value for `key`, `None` when absent or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// Keys that carry a non-blank value, in key order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(k, v)| {
            let v = v.trim();
            (!v.is_empty()).then_some((k.as_str(), v))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A resolved `column op value` condition sent to the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

impl Predicate {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self { column: column.into(), op, value: value.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_inactive() {
        let filter = Filter::new().with("ciclo", " 40 ").with("gestor", "   ");
        assert_eq!(filter.get("ciclo"), Some("40"));
        assert_eq!(filter.get("gestor"), None);
        assert_eq!(filter.active().count(), 1);
        assert!(!filter.is_empty());
        assert!(Filter::new().with("gestor", "").is_empty());
    }

    #[test]
    fn collects_from_pairs() {
        let filter: Filter = [("fecha_desde", "2026-01-01"), ("fecha_hasta", "2026-01-31")]
            .into_iter()
            .collect();
        let keys: Vec<_> = filter.active().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["fecha_desde", "fecha_hasta"]);
    }
}

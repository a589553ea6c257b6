// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Captured route parameters.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from parameter name to the raw path segment it captured.
///
/// Keys keep declaration order. Values are verbatim: no decoding, no
/// coercion. A repeated name keeps its first position and its last value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteParams {
    entries: Vec<(String, String)>,
}

impl RouteParams {
    /// Empty mapping (a literal-only pattern matched).
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip declared names with captured values positionally.
    pub fn zip<N, V>(names: &[N], values: &[V]) -> Self
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (name, value) in names.iter().zip(values) {
            params.insert(name.as_ref(), value.as_ref());
        }
        params
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((name.to_string(), value.to_string()));
        }
    }

    /// Value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the matched pattern declared no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Serializes as a map so JS hosts receive a plain `{name: value}` object.
impl Serialize for RouteParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn zip_pairs_positionally() {
        let params = RouteParams::zip(&["org", "repo"], &["echo", "core"]);
        assert_eq!(params.get("org"), Some("echo"));
        assert_eq!(params.get("repo"), Some("core"));
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["org", "repo"]);
    }

    #[test]
    fn duplicate_name_keeps_position_last_value_wins() {
        let params = RouteParams::zip(&["a", "b", "a"], &["1", "2", "3"]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let params: RouteParams = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn values_are_verbatim() {
        let params = RouteParams::zip(&["q"], &["a%20b"]);
        assert_eq!(params.get("q"), Some("a%20b"));
    }
}

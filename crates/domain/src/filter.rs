use std::collections::BTreeMap;

/// Loosely typed query parameters for list endpoints, e.g. taken from page controls or the
/// current location.
///
/// Each endpoint forwards only the keys it recognizes. Unknown keys and empty values are
/// dropped silently.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Filter(BTreeMap<String, String>);

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parameters whose key is in `keys`, in the order of `keys`.
    #[must_use]
    pub fn allowed<'a>(&'a self, keys: &[&'a str]) -> Vec<(&'a str, &'a str)> {
        keys.iter()
            .filter_map(|key| {
                self.0
                    .get(*key)
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(|value| (*key, value))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

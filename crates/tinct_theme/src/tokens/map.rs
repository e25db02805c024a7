//! Ordered token maps

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ColorToken, TokenName};

/// Flat `token → value` map with stable insertion order
///
/// Overwriting a key keeps its original position, so merging the same
/// inputs always yields the same iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenMap(IndexMap<TokenName, String>);

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: impl Into<TokenName>) -> Option<&str> {
        self.0.get(&name.into()).map(String::as_str)
    }

    pub fn contains(&self, name: impl Into<TokenName>) -> bool {
        self.0.contains_key(&name.into())
    }

    pub fn insert(&mut self, name: impl Into<TokenName>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: impl Into<TokenName>) -> Option<String> {
        self.0.shift_remove(&name.into())
    }

    /// Overwrite entries with those of `other`; later values win.
    pub fn merge(&mut self, other: &TokenMap) {
        for (name, value) in other.iter() {
            self.0.insert(name.clone(), value.to_string());
        }
    }

    /// Add entries of `other` whose names are not present yet.
    pub fn merge_missing(&mut self, other: &TokenMap) {
        for (name, value) in other.iter() {
            if !self.0.contains_key(name) {
                self.0.insert(name.clone(), value.to_string());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenName, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Color token entries only
    pub fn colors(&self) -> impl Iterator<Item = (ColorToken, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| k.color().map(|token| (token, v.as_str())))
    }

    /// Apply `f` to the value of every color token in place.
    pub fn map_colors(&mut self, mut f: impl FnMut(ColorToken, &str) -> String) {
        for (name, value) in self.0.iter_mut() {
            if let Some(token) = name.color() {
                let next = f(token, value.as_str());
                *value = next;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<TokenName>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<TokenName>, V: Into<String>> Extend<(K, V)> for TokenMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

use std::collections::HashMap;
use url::form_urlencoded;

/// An ordered set of request fields.
///
/// Values are optional: a `None` field is kept in the set (so it can still
/// override an earlier value on merge) but is never written to the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Option<String>)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position if it was already present.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn with_opt(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Combines two partial field sets. Keys in `other` win.
    pub fn merge(mut self, other: Fields) -> Self {
        for (key, value) in other.0 {
            self.set(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Fields::new(), |fields, (k, v)| fields.with(k, v))
    }
}

/// Encodes fields as `application/x-www-form-urlencoded`, in order,
/// skipping `None` values.
pub fn encode(fields: &Fields) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields.iter() {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Decodes a processor response body.
///
/// Never fails: a pair without `=` decodes to an empty value, invalid
/// escapes and bytes are decoded lossily, and a repeated key keeps its last
/// value.
pub fn decode(raw: &str) -> HashMap<String, String> {
    form_urlencoded::parse(raw.trim_end_matches(['\r', '\n']).as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

//! The key/multi-value mappings a [`Binder`](crate::Binder) can read from.
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

/// A decoded mapping from keys to one or more textual values.
///
/// The binder only ever looks at the first value associated with a key.
/// A missing key and a key whose first value is empty are treated the same way.
pub trait Input {
    /// The first value associated with `key`, if any.
    fn first(&self, key: &str) -> Option<&str>;
}

impl<T: Input + ?Sized> Input for &T {
    fn first(&self, key: &str) -> Option<&str> {
        (**self).first(key)
    }
}

impl<V: Borrow<str>, S: BuildHasher> Input for HashMap<String, Vec<V>, S> {
    fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(Borrow::borrow)
    }
}

impl<V: Borrow<str>> Input for BTreeMap<String, Vec<V>> {
    fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(Borrow::borrow)
    }
}

impl<V: Borrow<str>, S: BuildHasher> Input for IndexMap<String, Vec<V>, S> {
    fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(Borrow::borrow)
    }
}

/// An insertion-ordered multi-map of decoded form values.
///
/// It can be built from a query string or from an `application/x-www-form-urlencoded`
/// body: percent-escapes are decoded and `+` is turned into a space.
///
/// # Example
///
/// ```rust
/// use parambind::{FormValues, Input};
///
/// let values = FormValues::parse("name=John%20Doe&tag=a&tag=b");
/// assert_eq!(values.first("name"), Some("John Doe"));
/// assert_eq!(values.get_all("tag"), ["a", "b"]);
/// assert_eq!(values.first("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    inner: IndexMap<String, Vec<String>>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        Self::from_bytes(query.as_bytes())
    }

    /// Decode a URL-encoded body.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        form_urlencoded::parse(bytes).collect()
    }

    /// Append `value` to the values associated with `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// All the values associated with `key`, in the order they were found.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Input for FormValues {
    fn first(&self, key: &str) -> Option<&str> {
        Input::first(&self.inner, key)
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

impl From<FormValues> for IndexMap<String, Vec<String>> {
    fn from(values: FormValues) -> Self {
        values.inner
    }
}

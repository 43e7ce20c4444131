//! Structured data attached to a tagged error.
//!
//! [`ExtraData`] is an immutable JSON object. Cloning it is cheap (the map is shared
//! behind an [`Arc`]) and no API hands out mutable access, so data attached when an
//! error is constructed is exactly the data every later reader observes.
//!
//! # Examples
//!
//! ```
//! use enwrap::{extra, ExtraData};
//!
//! let data = extra!({ "field": "x", "attempt": 2 });
//! assert_eq!(data.get("field").and_then(|v| v.as_str()), Some("x"));
//!
//! let same: ExtraData = [("field", "x"), ("attempt", "2")].into_iter().collect();
//! assert_eq!(same.len(), 2);
//! ```

use std::fmt::{self, Display};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

/// Immutable, cheaply clonable key/value data attached to an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtraData(Arc<Map<String, Value>>);

/// Key used when a non-object JSON value is turned into extra data.
pub const SCALAR_KEY: &str = "value";

impl ExtraData {
    /// Creates empty extra data.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a JSON value into extra data.
    ///
    /// Objects are taken as they are, `null` becomes empty data, and any other value
    /// is stored under [`SCALAR_KEY`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(Arc::new(map)),
            Value::Null => Self::new(),
            other => {
                let mut map = Map::with_capacity(1);
                map.insert(SCALAR_KEY.to_owned(), other);
                Self(Arc::new(map))
            },
        }
    }

    /// Serializes any value into extra data (see [`ExtraData::from_json`]).
    pub fn from_serialize<T>(value: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value).map(Self::from_json)
    }

    /// Builds extra data from named fields, returning `None` when there are none.
    pub fn from_fields<I>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let data: Self = fields.into_iter().collect();
        (!data.is_empty()).then_some(data)
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in key order.
    #[inline]
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Borrows the underlying JSON object.
    #[inline]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the data as a JSON object value.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.as_ref().clone())
    }

    /// Returns a copy of `self` with the entries of `other` layered on top.
    pub(crate) fn merged(self, other: &ExtraData) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut map = self.0.as_ref().clone();
        map.extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(Arc::new(map))
    }
}

impl<K, V> FromIterator<(K, V)> for ExtraData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect()))
    }
}

impl From<Map<String, Value>> for ExtraData {
    #[inline]
    fn from(map: Map<String, Value>) -> Self {
        Self(Arc::new(map))
    }
}

impl From<Value> for ExtraData {
    #[inline]
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl<'a> IntoIterator for &'a ExtraData {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for ExtraData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Map` is ordered by key, so this rendering is stable.
        match serde_json::to_string(self.0.as_ref()) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Serialize for ExtraData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

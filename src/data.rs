//! Raw nested input: ordered association lists of keys to scalars or sub-lists.
//!
//! `Data` is the caller-facing container. It carries no axis information;
//! [`crate::build_table`] wraps it into axis-tagged [`crate::tree::TableNode`]s.
//!
//! Insertion order is the only order: iteration, header extraction and
//! rendering all follow it exactly.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, TableError};

/// A label at one level of the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Text(String),
    Int(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n as i64)
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Key::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// A terminal value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    /// Explicit "no value"; renders like a missing cell.
    #[default]
    Absent,
}

impl Scalar {
    pub fn is_absent(&self) -> bool {
        matches!(self, Scalar::Absent)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Absent => Ok(()),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Absent, Into::into)
    }
}

/// Either a terminal scalar or a nested mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Nested(Data),
}

impl Value {
    pub fn as_nested(&self) -> Option<&Data> {
        match self {
            Value::Nested(d) => Some(d),
            Value::Scalar(_) => None,
        }
    }
}

impl From<Data> for Value {
    fn from(d: Data) -> Self {
        Value::Nested(d)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

macro_rules! value_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

value_from_scalar!(i64, i32, u32, f64, &str, String);

/// Ordered mapping from keys to values, unique keys per level.
///
/// Entries keep insertion order; `index` maps each key to its position.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Data {
    entries: Vec<(Key, Value)>,
    index: HashMap<Key, usize>,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered pairs, rejecting duplicate keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let mut data = Self::new();
        for (k, v) in pairs {
            data.push(k, v)?;
        }
        Ok(data)
    }

    /// Used by the `nested!` macro, which checks uniqueness at expansion time.
    #[doc(hidden)]
    pub fn from_entries_unchecked(entries: Vec<(Key, Value)>) -> Self {
        let index = key_index(&entries);
        Self { entries, index }
    }

    /// Append a pair at the end.
    pub fn push(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(TableError::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value.into()));
        Ok(())
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn index(&self) -> &HashMap<Key, usize> {
        &self.index
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(pair_refs)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nesting depth: this mapping counts as one level, even when empty.
    pub fn depth(&self) -> usize {
        1 + self
            .entries
            .iter()
            .filter_map(|(_, v)| v.as_nested())
            .map(Data::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Position of each key in `entries`; later duplicates win.
pub(crate) fn key_index<T>(entries: &[(Key, T)]) -> HashMap<Key, usize> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (k, _))| (k.clone(), i))
        .collect()
}

type PairFn<'a> = fn(&'a (Key, Value)) -> (&'a Key, &'a Value);
type PairRefs<'a> = std::iter::Map<std::slice::Iter<'a, (Key, Value)>, PairFn<'a>>;

fn pair_refs((k, v): &(Key, Value)) -> (&Key, &Value) {
    (k, v)
}

impl<'a> IntoIterator for &'a Data {
    type Item = (&'a Key, &'a Value);
    type IntoIter = PairRefs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(pair_refs as PairFn<'a>)
    }
}

// =============================================================================
// serde
// =============================================================================

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Key::Text(s) => serializer.serialize_str(s),
            Key::Int(n) => serializer.serialize_i64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Key, E> {
                Ok(Key::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Key, E> {
                Ok(Key::Text(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Key, E> {
                Ok(Key::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Key, E> {
                i64::try_from(v)
                    .map(Key::Int)
                    .map_err(|_| E::custom(format!("key {} is out of range", v)))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(Scalar::Int(n)) => serializer.serialize_i64(*n),
            Value::Scalar(Scalar::Float(x)) => serializer.serialize_f64(*x),
            Value::Scalar(Scalar::Text(s)) => serializer.serialize_str(s),
            Value::Scalar(Scalar::Absent) => serializer.serialize_none(),
            Value::Nested(d) => d.serialize(serializer),
        }
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

fn collect_map<'de, A: MapAccess<'de>>(mut access: A) -> std::result::Result<Data, A::Error> {
    let mut data = Data::new();
    while let Some((key, value)) = access.next_entry::<Key, Value>()? {
        data.push(key, value).map_err(de::Error::custom)?;
    }
    Ok(data)
}

fn collect_pairs<'de, A: SeqAccess<'de>>(mut access: A) -> std::result::Result<Data, A::Error> {
    let mut data = Data::new();
    while let Some((key, value)) = access.next_element::<(Key, Value)>()? {
        data.push(key, value).map_err(de::Error::custom)?;
    }
    Ok(data)
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DataVisitor;

        impl<'de> Visitor<'de> for DataVisitor {
            type Value = Data;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map or a list of [key, value] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                access: A,
            ) -> std::result::Result<Data, A::Error> {
                collect_map(access)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                access: A,
            ) -> std::result::Result<Data, A::Error> {
                collect_pairs(access)
            }
        }

        deserializer.deserialize_any(DataVisitor)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number, a string, null, or nested data")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
                Ok(Scalar::Int(v).into())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
                Ok(i64::try_from(v)
                    .map(Scalar::Int)
                    .unwrap_or(Scalar::Float(v as f64))
                    .into())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
                Ok(Scalar::Float(v).into())
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
                Ok(Scalar::Text(v.to_string()).into())
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
                Ok(Scalar::from(v).into())
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
                Ok(Scalar::Text(v).into())
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
                Ok(Scalar::Absent.into())
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
                Ok(Scalar::Absent.into())
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> std::result::Result<Value, D::Error> {
                Value::deserialize(deserializer)
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                access: A,
            ) -> std::result::Result<Value, A::Error> {
                collect_map(access).map(Value::Nested)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                access: A,
            ) -> std::result::Result<Value, A::Error> {
                collect_pairs(access).map(Value::Nested)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

//! Bindable scalar values and the ordered parameter map.

use serde::{Deserialize, Serialize};

/// A scalar value destined for parameter binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// Key of a bound parameter: a name (`:key` token) or a position (`?` token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKey {
    Named(String),
    Position(usize),
}

/// Ordered parameter map. Insertion order is the bind order, which must
/// match the left-to-right order of placeholder tokens in the generated SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(ParamKey, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named parameter. When the base key is already taken, the key
    /// is suffixed with `2`, `3`, ... until free. Returns the actual key.
    pub(crate) fn push_named(&mut self, base: &str, value: Value) -> String {
        let mut n = 1usize;
        let key = loop {
            let candidate = if n == 1 {
                base.to_string()
            } else {
                format!("{base}{n}")
            };
            if self.get(&candidate).is_none() {
                break candidate;
            }
            n += 1;
        };
        self.entries.push((ParamKey::Named(key.clone()), value));
        key
    }

    /// Append a positional parameter at the next integer index.
    pub(crate) fn push_positional(&mut self, value: Value) -> usize {
        let index = self.entries.len();
        self.entries.push((ParamKey::Position(index), value));
        index
    }

    /// Look up a named parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find_map(|(k, v)| match k {
            ParamKey::Named(name) if name == key => Some(v),
            _ => None,
        })
    }

    /// Look up a positional parameter.
    pub fn get_position(&self, index: usize) -> Option<&Value> {
        self.entries.iter().find_map(|(k, v)| match k {
            ParamKey::Position(i) if *i == index => Some(v),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameters in bind order.
    pub fn iter(&self) -> impl Iterator<Item = &(ParamKey, Value)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a (ParamKey, Value);
    type IntoIter = std::slice::Iter<'a, (ParamKey, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

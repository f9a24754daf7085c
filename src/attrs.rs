use crate::element::format_float;
use std::fmt;

/// A metadata value attached to an array or a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Text, e.g. `units: degrees_east`.
    Text(String),
    /// A single integer.
    Int(i64),
    /// A single float, e.g. `_FillValue: nan`.
    Float(f64),
    /// An integer vector.
    Ints(Vec<i64>),
    /// A float vector, e.g. `valid_range: [0.0, 1.0]`.
    Floats(Vec<f64>),
}

impl AttrValue {
    /// Returns the text if this is [`AttrValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number if this is a single integer or float.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Ints(vs) => {
                let items: Vec<_> = vs.iter().map(i64::to_string).collect();
                write!(f, "[{}]", items.join(" "))
            }
            Self::Floats(vs) => {
                let items: Vec<_> = vs.iter().copied().map(format_float).collect();
                write!(f, "[{}]", items.join(" "))
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(vs: Vec<i64>) -> Self {
        Self::Ints(vs)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(vs: Vec<f64>) -> Self {
        Self::Floats(vs)
    }
}

/// An attribute map that keeps keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning the previous value.
    ///
    /// Replacing a value keeps the key at its original position.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<AttrValue>
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Looks up `key`.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_kept() {
        let mut attrs = Attributes::new();
        attrs.insert("description", "C-grid parameters");
        attrs.insert("date", "21-Apr-2017");
        attrs.insert("Conventions", "CF-1.6");
        assert_eq!(
            attrs.keys().collect::<Vec<_>>(),
            ["description", "date", "Conventions"]
        );

        let old = attrs.insert("description", "replaced");
        assert_eq!(old, Some(AttrValue::from("C-grid parameters")));
        assert_eq!(attrs.keys().next(), Some("description"));
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn display_values() {
        assert_eq!(AttrValue::from("CF-1.6").to_string(), "CF-1.6");
        assert_eq!(AttrValue::from(f64::NAN).to_string(), "nan");
        assert_eq!(AttrValue::from(vec![0., 1.5]).to_string(), "[0.0 1.5]");
        assert_eq!(AttrValue::from(vec![1i64, 2]).to_string(), "[1 2]");
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(AttrValue::from("x").as_str(), Some("x"));
        assert_eq!(AttrValue::from(3).as_f64(), Some(3.));
        assert_eq!(AttrValue::from(vec![1.]).as_f64(), None);
    }
}

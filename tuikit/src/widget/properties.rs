//! Optional per-widget attributes that have no typed field.
//!
//! Geometry-relevant state lives in typed fields. This map only carries
//! loosely-defined extras such as the fill glyph of a scrolled viewport.

use std::collections::HashMap;

use crate::error::PropertyError;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Char(char),
    Text(String),
}

impl PropertyValue {
    pub const fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::Char(_) => "char",
            PropertyValue::Text(_) => "text",
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<char> for PropertyValue {
    fn from(value: char) -> Self {
        PropertyValue::Char(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: HashMap<String, PropertyValue>,
}

macro_rules! typed_getter {
    ($name:ident, $or_name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        pub fn $name(&self, name: &str) -> Result<$ty, PropertyError> {
            match self.values.get(name) {
                Some(PropertyValue::$variant(value)) => Ok(value.clone()),
                Some(other) => Err(PropertyError::TypeMismatch {
                    name: name.to_string(),
                    expected: $expected,
                    found: other.type_name(),
                }),
                None => Err(PropertyError::Missing {
                    name: name.to_string(),
                }),
            }
        }

        /// Like the strict getter, but falls back to `default`. A stored
        /// value of the wrong type is logged.
        pub fn $or_name(&self, name: &str, default: $ty) -> $ty {
            match self.$name(name) {
                Ok(value) => value,
                Err(PropertyError::Missing { .. }) => default,
                Err(err) => {
                    log::error!("[property] {}", err);
                    default
                }
            }
        }
    };
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    typed_getter!(bool, bool_or, Bool, bool, "bool");
    typed_getter!(int, int_or, Int, i32, "int");
    typed_getter!(float, float_or, Float, f32, "float");
    typed_getter!(char, char_or, Char, char, "char");
    typed_getter!(text, text_or, Text, String, "text");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let mut props = Properties::new();
        props.set("glyph", '#');
        props.set("width", 4);

        assert_eq!(props.char("glyph"), Ok('#'));
        assert_eq!(props.int("width"), Ok(4));
        assert_eq!(
            props.int("glyph"),
            Err(PropertyError::TypeMismatch {
                name: "glyph".to_string(),
                expected: "int",
                found: "char",
            })
        );
    }

    #[test]
    fn test_fallback_on_mismatch_and_missing() {
        let mut props = Properties::new();
        props.set("glyph", "not a char");

        assert_eq!(props.char_or("glyph", '.'), '.');
        assert_eq!(props.char_or("missing", '.'), '.');
        assert!(props.bool_or("missing", true));
    }
}

//! Attribute values and a plain in-memory component

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Value of a component attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Attribute present but unset (`None`/`null`)
    None,
    Integer(i64),
    Text(String),
    /// A sequence such as `(1, 4, 2)`
    Parts(Vec<AttributeValue>),
}

impl AttributeValue {
    /// False for values that carry nothing: unset, `0`, empty text and
    /// empty sequences
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::None => false,
            AttributeValue::Integer(n) => *n != 0,
            AttributeValue::Text(s) => !s.is_empty(),
            AttributeValue::Parts(parts) => !parts.is_empty(),
        }
    }

    /// Version text carried by this value; sequences are joined with `.`
    pub fn version_text(&self) -> Option<String> {
        self.is_truthy().then(|| self.to_string())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::None => f.write_str("None"),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Parts(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl<T: Into<AttributeValue>> FromIterator<T> for AttributeValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        AttributeValue::Parts(iter.into_iter().map(Into::into).collect())
    }
}

/// Component described entirely by its name and attribute table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticComponent {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl StaticComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Component for StaticComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.get(name).cloned()
    }
}

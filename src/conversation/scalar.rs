use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
enum ScalarKind {
    #[default]
    Missing,
    Null,
    Text,
    Number,
}

/// A text field that exports write either as a JSON string or a number
/// (ids, timestamps, related part references).
///
/// The engine reads it as text. The original JSON kind is kept so that
/// export writes back a number where a number was read and leaves absent
/// fields absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scalar {
    text: String,
    kind: ScalarKind,
}

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text, or `None` when the field was absent, null or blank.
    pub fn non_empty(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|text| !text.trim().is_empty())
    }

    pub fn is_number(&self) -> bool {
        self.kind == ScalarKind::Number
    }

    pub fn is_missing(&self) -> bool {
        self.kind == ScalarKind::Missing
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Self {
            text,
            kind: ScalarKind::Text,
        }
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self {
            text: value.to_string(),
            kind: ScalarKind::Number,
        }
    }
}

impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.kind {
            ScalarKind::Missing | ScalarKind::Null => serializer.serialize_unit(),
            ScalarKind::Text => serializer.serialize_str(&self.text),
            ScalarKind::Number => match self.text.parse::<Number>() {
                Ok(number) => number.serialize(serializer),
                Err(_) => serializer.serialize_str(&self.text),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self::from(text)),
            Value::Number(number) => Ok(Self {
                text: number.to_string(),
                kind: ScalarKind::Number,
            }),
            Value::Null => Ok(Self {
                text: String::new(),
                kind: ScalarKind::Null,
            }),
            other => Err(serde::de::Error::custom(format!(
                "expected a string or number, found {other}"
            ))),
        }
    }
}

//! Scalar literals
//!
//! A `Literal` is the payload of a `constant` expression: a number, text,
//! boolean, or datetime. Datetimes are persisted as a single-key object so
//! they never collide with text that happens to look like a date.

use crate::{DateTime, DateTimeError, Number, NumberError};
use serde_json::{Map, Value};
use thiserror::Error;

/// Object key marking an encoded datetime literal
pub const DATE_TAG: &str = "@date";

/// Error type for literal decoding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralError {
    #[error("Expected number, string, boolean or datetime, got {0}")]
    NotScalar(&'static str),

    #[error(transparent)]
    DateTime(#[from] DateTimeError),

    #[error(transparent)]
    Number(#[from] NumberError),
}

/// Constant value in an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Number(Number),
    Text(String),
    Bool(bool),
    DateTime(DateTime),
}

impl Literal {
    // ========== Safe Accessors ==========

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Literal::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Literal::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Number(_) => "number",
            Literal::Text(_) => "string",
            Literal::Bool(_) => "boolean",
            Literal::DateTime(_) => "datetime",
        }
    }

    // ========== Encoding ==========

    pub fn to_json(&self) -> Value {
        match self {
            Literal::Number(n) => n.to_json(),
            Literal::Text(s) => Value::String(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::DateTime(dt) => {
                let mut map = Map::new();
                map.insert(DATE_TAG.to_string(), Value::String(dt.to_iso_string()));
                Value::Object(map)
            }
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, LiteralError> {
        match value {
            Value::Number(n) => Ok(Literal::Number(Number::from_json(n))),
            Value::String(s) => Ok(Literal::Text(s.clone())),
            Value::Bool(b) => Ok(Literal::Bool(*b)),
            Value::Object(map) if map.len() == 1 => match map.get(DATE_TAG) {
                Some(Value::String(text)) => Ok(Literal::DateTime(DateTime::parse_iso(text)?)),
                Some(other) => Err(DateTimeError::ParseError(other.to_string()).into()),
                None => Err(LiteralError::NotScalar("object")),
            },
            other => Err(LiteralError::NotScalar(json_type_name(other))),
        }
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n.into())
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n.into())
    }
}

impl TryFrom<f64> for Literal {
    type Error = NumberError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        Ok(Literal::Number(Number::from_f64(n)?))
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<DateTime> for Literal {
    fn from(dt: DateTime) -> Self {
        Literal::DateTime(dt)
    }
}

/// JSON type name for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

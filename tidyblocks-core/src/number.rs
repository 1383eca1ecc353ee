//! JSON-faithful numbers
//!
//! A `Number` remembers whether it was written as an integer or as a float,
//! so `123` and `123.0` survive a decode/encode cycle unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for number construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Number must be finite, got {0}")]
    NotFinite(f64),
}

/// Finite JSON number (integer or float)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(serde_json::Number);

impl Number {
    /// Create from a float. Fails for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self, NumberError> {
        serde_json::Number::from_f64(value)
            .map(Self)
            .ok_or(NumberError::NotFinite(value))
    }

    pub fn from_json(number: &serde_json::Number) -> Self {
        Self(number.clone())
    }

    pub fn as_json(&self) -> &serde_json::Number {
        &self.0
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Number(self.0.clone())
    }

    pub fn as_f64(&self) -> f64 {
        // Without arbitrary_precision every serde_json number has an f64 view.
        self.0.as_f64().unwrap_or(f64::NAN)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.0.as_u64()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_i64() || self.0.is_u64()
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(value.into())
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self(value.into())
    }
}

impl TryFrom<f64> for Number {
    type Error = NumberError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<Number> for serde_json::Value {
    fn from(number: Number) -> Self {
        serde_json::Value::Number(number.0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

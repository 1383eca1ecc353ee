//! Structured decode errors
//!
//! Every decode failure, whatever the family, is a `MalformedEncoding`. It
//! names the family being decoded, the offending discriminator and variant
//! name when known, and the JSON Pointer of the array where validation
//! failed, so problems deep inside a program can be located.

use crate::Family;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const NOT_AN_ARRAY: &str = "NOT_AN_ARRAY";
    pub const MISSING_KIND: &str = "MISSING_KIND";
    pub const UNKNOWN_KIND: &str = "UNKNOWN_KIND";
    pub const MISSING_NAME: &str = "MISSING_NAME";
    pub const UNKNOWN_VARIANT: &str = "UNKNOWN_VARIANT";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const BAD_LITERAL: &str = "BAD_LITERAL";
    pub const DEPTH_LIMIT: &str = "DEPTH_LIMIT";
    pub const INVALID_JSON: &str = "INVALID_JSON";
}

/// Rejected encoded form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedEncoding {
    /// Machine-readable error code
    pub code: String,

    /// Family whose decoder rejected the input
    pub family: Family,

    /// Discriminator found at the failing position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Variant name found at the failing position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// JSON Pointer to the failing array ("" is the root)
    pub path: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl MalformedEncoding {
    pub fn new(code: impl Into<String>, family: Family, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            family,
            kind: None,
            name: None,
            path: String::new(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: set discriminator
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builder: set variant name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set location
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn not_an_array(family: Family, got: &str) -> Self {
        Self::new(
            codes::NOT_AN_ARRAY,
            family,
            format!("Expected an encoded {} array, got {}", family, got),
        )
    }

    pub fn missing_kind(family: Family) -> Self {
        Self::new(
            codes::MISSING_KIND,
            family,
            format!("Encoded {} has no discriminator", family),
        )
    }

    pub fn unknown_kind(family: Family, kind: &str, known: &[&str]) -> Self {
        Self::new(
            codes::UNKNOWN_KIND,
            family,
            format!("Unknown kind of {}: '{}'", family, kind),
        )
        .with_kind(kind)
        .with_suggestion(format!("Expected one of: {}", known.join(", ")))
    }

    pub fn missing_name(family: Family, kind: &str) -> Self {
        Self::new(
            codes::MISSING_NAME,
            family,
            format!("Encoded {} of kind '{}' has no variant name", family, kind),
        )
        .with_kind(kind)
    }

    pub fn unknown_variant(family: Family, kind: &str, name: &str) -> Self {
        Self::new(
            codes::UNKNOWN_VARIANT,
            family,
            format!("No {} variant '{}' registered under '{}'", family, name, kind),
        )
        .with_kind(kind)
        .with_name(name)
    }

    pub fn arg_count(family: Family, expected: &str, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            family,
            format!("Expected {} arguments, got {}", expected, got),
        )
    }

    pub fn arg_type(family: Family, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            family,
            format!("Argument '{}': expected {}, got {}", arg, expected, got),
        )
    }

    pub fn bad_literal(family: Family, details: impl Into<String>) -> Self {
        Self::new(
            codes::BAD_LITERAL,
            family,
            format!("Bad literal: {}", details.into()),
        )
    }

    pub fn depth_limit(family: Family, max_depth: usize) -> Self {
        Self::new(
            codes::DEPTH_LIMIT,
            family,
            format!("Nesting deeper than {} levels", max_depth),
        )
        .with_suggestion("Raise the limit with DecodeContext::with_max_depth")
    }

    pub fn invalid_json(family: Family, details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_JSON,
            family,
            format!("Invalid JSON text: {}", details.into()),
        )
    }
}

impl fmt::Display for MalformedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.family, self.message)?;
        if self.path.is_empty() {
            write!(f, " (at root)")?;
        } else {
            write!(f, " (at {})", self.path)?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MalformedEncoding {}

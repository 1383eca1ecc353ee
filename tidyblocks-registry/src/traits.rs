//! Persistence traits and variant metadata

use crate::DecodeContext;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use tidyblocks_core::{Family, MalformedEncoding};

/// Shape of one positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Nested node decoded by that family's dispatcher
    Node(Family),
    /// Scalar literal (number, string, boolean, datetime)
    Literal,
    Text,
    TextList,
    Number,
    /// Non-negative integer
    Count,
    Bool,
}

impl ArgKind {
    /// Name used in error messages and the catalog
    pub fn describe(&self) -> &'static str {
        match self {
            ArgKind::Node(family) => family.as_str(),
            ArgKind::Literal => "literal",
            ArgKind::Text => "string",
            ArgKind::TextList => "string[]",
            ArgKind::Number => "number",
            ArgKind::Count => "integer",
            ArgKind::Bool => "boolean",
        }
    }
}

/// Metadata about a positional argument
#[derive(Debug, Clone, Copy)]
pub struct ArgMeta {
    pub name: &'static str,
    pub kind: ArgKind,
    pub optional: bool,
}

impl ArgMeta {
    pub const fn required(name: &'static str, kind: ArgKind) -> Self {
        Self { name, kind, optional: false }
    }

    pub const fn optional(name: &'static str, kind: ArgKind) -> Self {
        Self { name, kind, optional: true }
    }
}

/// Metadata for a registered variant
#[derive(Debug, Clone, Copy)]
pub struct VariantMeta {
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Positional arguments; optional ones are trailing
    pub args: &'static [ArgMeta],
}

impl VariantMeta {
    /// Number of arguments that must be present
    pub fn required_args(&self) -> usize {
        self.args.iter().filter(|a| !a.optional).count()
    }

    pub fn max_args(&self) -> usize {
        self.args.len()
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.required_args() && count <= self.max_args()
    }

    /// "2" or "1 to 2"
    pub fn arity_label(&self) -> String {
        let (min, max) = (self.required_args(), self.max_args());
        if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        }
    }
}

/// Persistable node: produces an encoded array and is rebuilt from one
pub trait Node: Sized {
    const FAMILY: Family;

    /// Encoded form: `[discriminator, ...payload]`
    fn encode(&self) -> Value;

    /// Decode inside an ongoing traversal
    fn decode_with(encoded: &Value, ctx: &mut DecodeContext) -> Result<Self, MalformedEncoding>;

    /// Decode a standalone encoded form with default limits
    fn decode(encoded: &Value) -> Result<Self, MalformedEncoding> {
        Self::decode_with(encoded, &mut DecodeContext::new())
    }

    fn to_json_string(&self) -> String {
        self.encode().to_string()
    }

    fn from_json_str(text: &str) -> Result<Self, MalformedEncoding> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| MalformedEncoding::invalid_json(Self::FAMILY, e.to_string()))?;
        Self::decode(&value)
    }
}

/// Node dispatched through a registry by discriminator and variant name
pub trait Tagged {
    fn kind(&self) -> &'static str;
    fn name(&self) -> &'static str;
}

/// `Serialize` through the encoded form
pub fn serialize_node<N: Node, S: Serializer>(node: &N, serializer: S) -> Result<S::Ok, S::Error> {
    serde::Serialize::serialize(&node.encode(), serializer)
}

/// `Deserialize` through the encoded form
pub fn deserialize_node<'de, N: Node, D: Deserializer<'de>>(deserializer: D) -> Result<N, D::Error> {
    let value = Value::deserialize(deserializer)?;
    N::decode(&value).map_err(serde::de::Error::custom)
}

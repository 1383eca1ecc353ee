//! Typed access to variant arguments

use crate::{DecodeContext, Node, VariantMeta};
use serde_json::Value;
use tidyblocks_core::{json_type_name, Family, Literal, MalformedEncoding, Number};

/// Positional arguments of one encoded variant
///
/// Every accessor reports failures against the exact argument position, so a
/// builder can read its arguments with `?` and nothing else.
pub struct Payload<'a> {
    family: Family,
    meta: &'a VariantMeta,
    args: &'a [Value],
    /// Index of the first argument inside the encoded array
    offset: usize,
    /// JSON Pointer of the encoded array
    pointer: String,
}

impl<'a> Payload<'a> {
    pub fn new(
        family: Family,
        meta: &'a VariantMeta,
        args: &'a [Value],
        offset: usize,
        pointer: String,
    ) -> Self {
        Self { family, meta, args, offset, pointer }
    }

    pub fn meta(&self) -> &VariantMeta {
        self.meta
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_present(&self, index: usize) -> bool {
        index < self.args.len()
    }

    // ========== Scalars ==========

    pub fn text(&self, index: usize) -> Result<String, MalformedEncoding> {
        match self.get(index)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.type_error(index, "string", other)),
        }
    }

    pub fn text_list(&self, index: usize) -> Result<Vec<String>, MalformedEncoding> {
        let items = match self.get(index)? {
            Value::Array(items) => items,
            other => return Err(self.type_error(index, "string[]", other)),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self
                    .type_error(index, "string[]", other)
                    .with_path(format!("{}/{}", self.pointer_at(index), i))),
            })
            .collect()
    }

    pub fn number(&self, index: usize) -> Result<Number, MalformedEncoding> {
        match self.get(index)? {
            Value::Number(n) => Ok(Number::from_json(n)),
            other => Err(self.type_error(index, "number", other)),
        }
    }

    /// Non-negative integer argument
    pub fn count(&self, index: usize) -> Result<u64, MalformedEncoding> {
        match self.get(index)? {
            Value::Number(n) if n.is_u64() => n
                .as_u64()
                .ok_or_else(|| self.type_error(index, "integer", &Value::Number(n.clone()))),
            other => Err(self.type_error(index, "non-negative integer", other)),
        }
    }

    pub fn bool(&self, index: usize) -> Result<bool, MalformedEncoding> {
        match self.get(index)? {
            Value::Bool(b) => Ok(*b),
            other => Err(self.type_error(index, "boolean", other)),
        }
    }

    pub fn literal(&self, index: usize) -> Result<Literal, MalformedEncoding> {
        Literal::from_json(self.get(index)?).map_err(|e| {
            self.locate(index, MalformedEncoding::bad_literal(self.family, e.to_string()))
        })
    }

    // ========== Optional trailing scalars ==========

    pub fn optional_text(&self, index: usize) -> Result<Option<String>, MalformedEncoding> {
        if self.is_present(index) {
            self.text(index).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn optional_bool(&self, index: usize) -> Result<Option<bool>, MalformedEncoding> {
        if self.is_present(index) {
            self.bool(index).map(Some)
        } else {
            Ok(None)
        }
    }

    // ========== Nested nodes ==========

    /// Decode a nested node through its own family's dispatcher
    pub fn node<N: Node>(&self, index: usize, ctx: &mut DecodeContext) -> Result<N, MalformedEncoding> {
        let value = self.get(index)?;
        ctx.descend(self.offset + index, |ctx| N::decode_with(value, ctx))
    }

    /// Error for an argument of the right JSON type but an unacceptable value
    pub fn invalid_value(&self, index: usize, expected: &str) -> MalformedEncoding {
        let got = self.args.get(index).map_or_else(|| "nothing".to_string(), Value::to_string);
        self.locate(
            index,
            MalformedEncoding::arg_type(self.family, self.arg_name(index), expected, &got),
        )
    }

    // ========== Helpers ==========

    fn get(&self, index: usize) -> Result<&'a Value, MalformedEncoding> {
        self.args.get(index).ok_or_else(|| {
            MalformedEncoding::arg_count(self.family, &self.meta.arity_label(), self.args.len())
                .with_kind(self.meta.kind)
                .with_name(self.meta.name)
                .with_path(self.pointer.clone())
        })
    }

    fn arg_name(&self, index: usize) -> &'static str {
        self.meta.args.get(index).map_or("?", |a| a.name)
    }

    fn pointer_at(&self, index: usize) -> String {
        format!("{}/{}", self.pointer, self.offset + index)
    }

    fn locate(&self, index: usize, err: MalformedEncoding) -> MalformedEncoding {
        err.with_kind(self.meta.kind)
            .with_name(self.meta.name)
            .with_path(self.pointer_at(index))
    }

    fn type_error(&self, index: usize, expected: &str, got: &Value) -> MalformedEncoding {
        self.locate(
            index,
            MalformedEncoding::arg_type(self.family, self.arg_name(index), expected, json_type_name(got)),
        )
    }
}

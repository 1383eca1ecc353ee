//! Shared header checks for the container families

use serde_json::Value;
use tidyblocks_core::{json_type_name, Family, MalformedEncoding};
use tidyblocks_registry::DecodeContext;

/// Items following the `kind` tag of a container encoding
///
/// Containers have a single discriminator, so anything else in the leading
/// position is an unknown kind.
pub(crate) fn open<'a>(
    encoded: &'a Value,
    ctx: &DecodeContext,
    family: Family,
    kind: &'static str,
) -> Result<&'a [Value], MalformedEncoding> {
    ctx.check_depth(family)?;
    let here = ctx.pointer();

    let items = match encoded {
        Value::Array(items) => items,
        other => return Err(reject(MalformedEncoding::not_an_array(family, json_type_name(other)).with_path(here))),
    };
    match items.first() {
        Some(Value::String(tag)) if tag == kind => Ok(&items[1..]),
        Some(Value::String(tag)) => Err(reject(MalformedEncoding::unknown_kind(family, tag, &[kind]).with_path(here))),
        Some(other) => Err(reject(
            MalformedEncoding::unknown_kind(family, &other.to_string(), &[kind]).with_path(here),
        )),
        None => Err(reject(MalformedEncoding::missing_kind(family).with_path(here))),
    }
}

fn reject(err: MalformedEncoding) -> MalformedEncoding {
    tracing::debug!(family = %err.family, code = %err.code, path = %err.path, "rejected encoding");
    err
}

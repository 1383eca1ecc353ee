//! TidyBlocks Variant Registry
//!
//! Shared decode machinery for the node families:
//! - `Node`: the persistence capability every family implements
//! - `VariantRegistry`: (discriminator, variant name) to constructor
//! - `DecodeContext`: position tracking and nesting limits
//! - `Payload`: typed, position-aware access to variant arguments

mod context;
mod payload;
mod registry;
mod traits;

pub use context::{DecodeContext, DEFAULT_MAX_DEPTH};
pub use payload::Payload;
pub use registry::{Builder, RegistryError, VariantDef, VariantRegistry};
pub use traits::{deserialize_node, serialize_node, ArgKind, ArgMeta, Node, Tagged, VariantMeta};

/// Re-export core types for family implementors
pub mod prelude {
    pub use crate::{
        ArgKind, ArgMeta, DecodeContext, Node, Payload, RegistryError, Tagged, VariantDef,
        VariantMeta, VariantRegistry,
    };
    pub use tidyblocks_core::prelude::*;
}

//! Program: every pipeline of a workspace

use crate::envelope;
use crate::Pipeline;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tidyblocks_core::{Family, MalformedEncoding};
use tidyblocks_registry::{deserialize_node, serialize_node, DecodeContext, Node};

/// Ordered collection of pipelines
///
/// Pipeline names are not required to be unique; the order they were
/// persisted in is kept exactly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pipelines: Vec<Pipeline>,
}

impl Program {
    /// Program discriminator
    pub const KIND: &'static str = "@program";

    pub fn new(pipelines: impl IntoIterator<Item = Pipeline>) -> Self {
        Self {
            pipelines: pipelines.into_iter().collect(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipelines.push(pipeline);
        self
    }

    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// First pipeline called `name`
    pub fn pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

impl Node for Program {
    const FAMILY: Family = Family::Program;

    fn encode(&self) -> Value {
        let mut items = Vec::with_capacity(self.pipelines.len() + 1);
        items.push(Value::from(Self::KIND));
        items.extend(self.pipelines.iter().map(Node::encode));
        Value::Array(items)
    }

    fn decode_with(encoded: &Value, ctx: &mut DecodeContext) -> Result<Self, MalformedEncoding> {
        let items = envelope::open(encoded, ctx, Family::Program, Self::KIND)?;
        let pipelines = items
            .iter()
            .enumerate()
            .map(|(i, pipeline)| ctx.descend(i + 1, |ctx| Pipeline::decode_with(pipeline, ctx)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(pipelines = pipelines.len(), "decoded program");
        Ok(Self { pipelines })
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_node(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Program {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_node(deserializer)
    }
}

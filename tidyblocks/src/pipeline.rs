//! Pipeline: a named, ordered list of stages

use crate::envelope;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tidyblocks_core::{json_type_name, Family, MalformedEncoding};
use tidyblocks_registry::{deserialize_node, serialize_node, DecodeContext, Node};
use tidyblocks_stage::Stage;

/// Named sequence of stages; order is execution order
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Pipeline discriminator
    pub const KIND: &'static str = "@pipeline";

    pub fn new(name: impl Into<String>, stages: impl IntoIterator<Item = Stage>) -> Self {
        Self {
            name: name.into(),
            stages: stages.into_iter().collect(),
        }
    }

    /// Append a stage (builder style)
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Other pipelines this one reads from, in first-use order
    pub fn dependencies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.stages.iter().flat_map(Stage::dependencies) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl Node for Pipeline {
    const FAMILY: Family = Family::Pipeline;

    fn encode(&self) -> Value {
        let mut items = Vec::with_capacity(self.stages.len() + 2);
        items.push(Value::from(Self::KIND));
        items.push(Value::String(self.name.clone()));
        items.extend(self.stages.iter().map(Node::encode));
        Value::Array(items)
    }

    fn decode_with(encoded: &Value, ctx: &mut DecodeContext) -> Result<Self, MalformedEncoding> {
        let items = envelope::open(encoded, ctx, Family::Pipeline, Self::KIND)?;
        let name = match items.first() {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(MalformedEncoding::arg_type(Family::Pipeline, "name", "string", json_type_name(other))
                    .with_kind(Self::KIND)
                    .with_path(ctx.pointer_to(1)))
            }
            None => return Err(MalformedEncoding::missing_name(Family::Pipeline, Self::KIND).with_path(ctx.pointer())),
        };

        let stages = items[1..]
            .iter()
            .enumerate()
            .map(|(i, stage)| ctx.descend(i + 2, |ctx| Stage::decode_with(stage, ctx)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(pipeline = %name, stages = stages.len(), "decoded pipeline");
        Ok(Self { name, stages })
    }
}

impl Serialize for Pipeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_node(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Pipeline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_node(deserializer)
    }
}

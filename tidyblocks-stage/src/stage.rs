//! Stage: one step of a pipeline

use crate::kinds;
use crate::plot::Plot;
use crate::stats::StatTest;
use crate::transform::{Aggregation, Transform};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tidyblocks_core::{Family, MalformedEncoding};
use tidyblocks_expr::Expression;
use tidyblocks_registry::{deserialize_node, serialize_node, DecodeContext, Node, Tagged};

/// Pipeline step, grouped by discriminator
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Transform(Transform),
    Plot(Plot),
    Stats(StatTest),
}

fn names<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}

impl Stage {
    // ========== Transforms ==========

    pub fn drop<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stage::Transform(Transform::Drop { columns: names(columns) })
    }

    pub fn filter(condition: Expression) -> Self {
        Stage::Transform(Transform::Filter { condition })
    }

    pub fn group_by<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stage::Transform(Transform::GroupBy { columns: names(columns) })
    }

    pub fn join(
        left_table: impl Into<String>,
        left_column: impl Into<String>,
        right_table: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Stage::Transform(Transform::Join {
            left_table: left_table.into(),
            left_column: left_column.into(),
            right_table: right_table.into(),
            right_column: right_column.into(),
        })
    }

    pub fn mutate(new_column: impl Into<String>, value: Expression) -> Self {
        Stage::Transform(Transform::Mutate { new_column: new_column.into(), value })
    }

    pub fn notify(label: impl Into<String>) -> Self {
        Stage::Transform(Transform::Notify { label: label.into() })
    }

    pub fn read(path: impl Into<String>) -> Self {
        Stage::Transform(Transform::Read { path: path.into() })
    }

    pub fn select<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stage::Transform(Transform::Select { columns: names(columns) })
    }

    /// `ascending: None` leaves the flag out of the encoding
    pub fn sort<I, S>(columns: I, ascending: Option<bool>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stage::Transform(Transform::Sort { columns: names(columns), ascending })
    }

    pub fn summarize(function: Aggregation, column: impl Into<String>) -> Self {
        Stage::Transform(Transform::Summarize { function, column: column.into() })
    }

    pub fn ungroup() -> Self {
        Stage::Transform(Transform::Ungroup)
    }

    pub fn unique<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stage::Transform(Transform::Unique { columns: names(columns) })
    }

    // ========== Plots ==========

    pub fn bar(x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Stage::Plot(Plot::Bar { x_axis: x_axis.into(), y_axis: y_axis.into() })
    }

    pub fn box_plot(x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Stage::Plot(Plot::Box { x_axis: x_axis.into(), y_axis: y_axis.into() })
    }

    pub fn dot(x_axis: impl Into<String>) -> Self {
        Stage::Plot(Plot::Dot { x_axis: x_axis.into() })
    }

    pub fn histogram(column: impl Into<String>, bins: u64) -> Self {
        Stage::Plot(Plot::Histogram { column: column.into(), bins })
    }

    pub fn scatter(x_axis: impl Into<String>, y_axis: impl Into<String>, color: Option<String>) -> Self {
        Stage::Plot(Plot::Scatter { x_axis: x_axis.into(), y_axis: y_axis.into(), color })
    }

    // ========== Accessors ==========

    pub fn as_transform(&self) -> Option<&Transform> {
        match self {
            Stage::Transform(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_plot(&self) -> Option<&Plot> {
        match self {
            Stage::Plot(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&StatTest> {
        match self {
            Stage::Stats(s) => Some(s),
            _ => None,
        }
    }

    /// Pipelines this stage reads besides its own input
    pub fn dependencies(&self) -> Vec<&str> {
        self.as_transform().map(Transform::dependencies).unwrap_or_default()
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Stage::Transform(t) => t.args(),
            Stage::Plot(p) => p.args(),
            Stage::Stats(s) => s.args(),
        }
    }
}

impl From<Transform> for Stage {
    fn from(transform: Transform) -> Self {
        Stage::Transform(transform)
    }
}

impl From<Plot> for Stage {
    fn from(plot: Plot) -> Self {
        Stage::Plot(plot)
    }
}

impl From<StatTest> for Stage {
    fn from(test: StatTest) -> Self {
        Stage::Stats(test)
    }
}

impl Tagged for Stage {
    fn kind(&self) -> &'static str {
        match self {
            Stage::Transform(_) => kinds::TRANSFORM,
            Stage::Plot(_) => kinds::PLOT,
            Stage::Stats(_) => kinds::STATS,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Stage::Transform(t) => t.name(),
            Stage::Plot(p) => p.name(),
            Stage::Stats(s) => s.name(),
        }
    }
}

impl Node for Stage {
    const FAMILY: Family = Family::Stage;

    fn encode(&self) -> Value {
        let mut items = vec![Value::from(self.kind()), Value::from(self.name())];
        items.extend(self.args());
        Value::Array(items)
    }

    fn decode_with(encoded: &Value, ctx: &mut DecodeContext) -> Result<Self, MalformedEncoding> {
        crate::registry().decode(encoded, ctx)
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_node(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_node(deserializer)
    }
}

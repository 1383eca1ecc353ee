//! Table transforms: drop, filter, groupBy, join, mutate, notify, read,
//! select, sort, summarize, ungroup, unique

use crate::kinds::TRANSFORM;
use crate::Stage;
use serde_json::{json, Value};
use tidyblocks_core::Family;
use tidyblocks_expr::Expression;
use tidyblocks_registry::{ArgKind, ArgMeta, Node, RegistryError, VariantDef, VariantMeta, VariantRegistry};

/// Single table-transformation step
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Drop { columns: Vec<String> },
    Filter { condition: Expression },
    GroupBy { columns: Vec<String> },
    Join {
        left_table: String,
        left_column: String,
        right_table: String,
        right_column: String,
    },
    Mutate { new_column: String, value: Expression },
    Notify { label: String },
    Read { path: String },
    Select { columns: Vec<String> },
    /// `ascending` is kept exactly as persisted; absent means ascending
    Sort { columns: Vec<String>, ascending: Option<bool> },
    Summarize { function: Aggregation, column: String },
    Ungroup,
    Unique { columns: Vec<String> },
}

impl Transform {
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Drop { .. } => "drop",
            Transform::Filter { .. } => "filter",
            Transform::GroupBy { .. } => "groupBy",
            Transform::Join { .. } => "join",
            Transform::Mutate { .. } => "mutate",
            Transform::Notify { .. } => "notify",
            Transform::Read { .. } => "read",
            Transform::Select { .. } => "select",
            Transform::Sort { .. } => "sort",
            Transform::Summarize { .. } => "summarize",
            Transform::Ungroup => "ungroup",
            Transform::Unique { .. } => "unique",
        }
    }

    /// Encoded arguments, in positional order
    pub fn args(&self) -> Vec<Value> {
        match self {
            Transform::Drop { columns }
            | Transform::GroupBy { columns }
            | Transform::Select { columns }
            | Transform::Unique { columns } => vec![json!(columns)],
            Transform::Filter { condition } => vec![condition.encode()],
            Transform::Join {
                left_table,
                left_column,
                right_table,
                right_column,
            } => vec![
                json!(left_table),
                json!(left_column),
                json!(right_table),
                json!(right_column),
            ],
            Transform::Mutate { new_column, value } => vec![json!(new_column), value.encode()],
            Transform::Notify { label } => vec![json!(label)],
            Transform::Read { path } => vec![json!(path)],
            Transform::Sort { columns, ascending } => {
                let mut args = vec![json!(columns)];
                args.extend(ascending.map(Value::Bool));
                args
            }
            Transform::Summarize { function, column } => vec![json!(function.name()), json!(column)],
            Transform::Ungroup => Vec::new(),
        }
    }

    /// Expressions embedded in this transform
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Transform::Filter { condition } => Some(condition),
            Transform::Mutate { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Sort direction with the default applied
    pub fn is_ascending(&self) -> Option<bool> {
        match self {
            Transform::Sort { ascending, .. } => Some(ascending.unwrap_or(true)),
            _ => None,
        }
    }

    /// Names of other pipelines this transform reads from
    pub fn dependencies(&self) -> Vec<&str> {
        match self {
            Transform::Join {
                left_table,
                right_table,
                ..
            } => vec![left_table.as_str(), right_table.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Summary functions accepted by `summarize`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    All,
    Any,
    Count,
    Maximum,
    Mean,
    Median,
    Minimum,
    StdDev,
    Sum,
    Variance,
}

impl Aggregation {
    pub const ALL: [Aggregation; 10] = [
        Aggregation::All,
        Aggregation::Any,
        Aggregation::Count,
        Aggregation::Maximum,
        Aggregation::Mean,
        Aggregation::Median,
        Aggregation::Minimum,
        Aggregation::StdDev,
        Aggregation::Sum,
        Aggregation::Variance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::All => "all",
            Aggregation::Any => "any",
            Aggregation::Count => "count",
            Aggregation::Maximum => "maximum",
            Aggregation::Mean => "mean",
            Aggregation::Median => "median",
            Aggregation::Minimum => "minimum",
            Aggregation::StdDev => "stdDev",
            Aggregation::Sum => "sum",
            Aggregation::Variance => "variance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

// ============ Registration ============

const EXPR: ArgKind = ArgKind::Node(Family::Expression);

static COLUMNS_ARGS: [ArgMeta; 1] = [ArgMeta::required("columns", ArgKind::TextList)];
static FILTER_ARGS: [ArgMeta; 1] = [ArgMeta::required("condition", EXPR)];
static JOIN_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("leftName", ArgKind::Text),
    ArgMeta::required("leftCol", ArgKind::Text),
    ArgMeta::required("rightName", ArgKind::Text),
    ArgMeta::required("rightCol", ArgKind::Text),
];
static MUTATE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("newName", ArgKind::Text),
    ArgMeta::required("expr", EXPR),
];
static NOTIFY_ARGS: [ArgMeta; 1] = [ArgMeta::required("label", ArgKind::Text)];
static READ_ARGS: [ArgMeta; 1] = [ArgMeta::required("path", ArgKind::Text)];
static SORT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("columns", ArgKind::TextList),
    ArgMeta::optional("ascending", ArgKind::Bool),
];
static SUMMARIZE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("func", ArgKind::Text),
    ArgMeta::required("column", ArgKind::Text),
];

fn meta(name: &'static str, description: &'static str, args: &'static [ArgMeta]) -> VariantMeta {
    VariantMeta { kind: TRANSFORM, name, description, args }
}

/// Add every transform variant to `registry`
pub(crate) fn register(registry: &mut VariantRegistry<Stage>) -> Result<(), RegistryError> {
    registry.register(VariantDef::new(meta("drop", "Remove columns", &COLUMNS_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Drop { columns: p.text_list(0)? }))
    }))?;
    registry.register(VariantDef::new(meta("filter", "Keep rows matching a condition", &FILTER_ARGS), |p, ctx| {
        Ok(Stage::Transform(Transform::Filter { condition: p.node(0, ctx)? }))
    }))?;
    registry.register(VariantDef::new(meta("groupBy", "Group rows by column values", &COLUMNS_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::GroupBy { columns: p.text_list(0)? }))
    }))?;
    registry.register(VariantDef::new(meta("join", "Join two named tables on columns", &JOIN_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Join {
            left_table: p.text(0)?,
            left_column: p.text(1)?,
            right_table: p.text(2)?,
            right_column: p.text(3)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("mutate", "Create or replace a column", &MUTATE_ARGS), |p, ctx| {
        Ok(Stage::Transform(Transform::Mutate {
            new_column: p.text(0)?,
            value: p.node(1, ctx)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("notify", "Publish the table under a label", &NOTIFY_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Notify { label: p.text(0)? }))
    }))?;
    registry.register(VariantDef::new(meta("read", "Read a table from a file", &READ_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Read { path: p.text(0)? }))
    }))?;
    registry.register(VariantDef::new(meta("select", "Keep only some columns", &COLUMNS_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Select { columns: p.text_list(0)? }))
    }))?;
    registry.register(VariantDef::new(meta("sort", "Sort rows by columns", &SORT_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Sort {
            columns: p.text_list(0)?,
            ascending: p.optional_bool(1)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("summarize", "Summarize a column", &SUMMARIZE_ARGS), |p, _| {
        let function = Aggregation::from_name(&p.text(0)?)
            .ok_or_else(|| p.invalid_value(0, "summary function name"))?;
        Ok(Stage::Transform(Transform::Summarize {
            function,
            column: p.text(1)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("ungroup", "Remove grouping", &[]), |_, _| {
        Ok(Stage::Transform(Transform::Ungroup))
    }))?;
    registry.register(VariantDef::new(meta("unique", "Keep rows with unique column values", &COLUMNS_ARGS), |p, _| {
        Ok(Stage::Transform(Transform::Unique { columns: p.text_list(0)? }))
    }))?;
    Ok(())
}

//! Plots: bar, box, dot, histogram, scatter
//!
//! Purely descriptive; rendering happens elsewhere.

use crate::kinds::PLOT;
use crate::Stage;
use serde_json::{json, Value};
use tidyblocks_registry::{ArgKind, ArgMeta, RegistryError, VariantDef, VariantMeta, VariantRegistry};

/// Plot of the current table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plot {
    Bar { x_axis: String, y_axis: String },
    Box { x_axis: String, y_axis: String },
    Dot { x_axis: String },
    Histogram { column: String, bins: u64 },
    /// `color` is an optional column driving point color
    Scatter {
        x_axis: String,
        y_axis: String,
        color: Option<String>,
    },
}

impl Plot {
    pub fn name(&self) -> &'static str {
        match self {
            Plot::Bar { .. } => "bar",
            Plot::Box { .. } => "box",
            Plot::Dot { .. } => "dot",
            Plot::Histogram { .. } => "histogram",
            Plot::Scatter { .. } => "scatter",
        }
    }

    pub fn args(&self) -> Vec<Value> {
        match self {
            Plot::Bar { x_axis, y_axis } | Plot::Box { x_axis, y_axis } => {
                vec![json!(x_axis), json!(y_axis)]
            }
            Plot::Dot { x_axis } => vec![json!(x_axis)],
            Plot::Histogram { column, bins } => vec![json!(column), json!(bins)],
            Plot::Scatter { x_axis, y_axis, color } => {
                let mut args = vec![json!(x_axis), json!(y_axis)];
                args.extend(color.as_ref().map(|c| json!(c)));
                args
            }
        }
    }

    /// Columns the plot reads
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Plot::Bar { x_axis, y_axis } | Plot::Box { x_axis, y_axis } => vec![x_axis.as_str(), y_axis.as_str()],
            Plot::Dot { x_axis } => vec![x_axis.as_str()],
            Plot::Histogram { column, .. } => vec![column.as_str()],
            Plot::Scatter { x_axis, y_axis, color } => {
                let mut columns = vec![x_axis.as_str(), y_axis.as_str()];
                columns.extend(color.as_deref());
                columns
            }
        }
    }
}

// ============ Registration ============

static XY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("xAxis", ArgKind::Text),
    ArgMeta::required("yAxis", ArgKind::Text),
];
static DOT_ARGS: [ArgMeta; 1] = [ArgMeta::required("xAxis", ArgKind::Text)];
static HISTOGRAM_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("column", ArgKind::Text),
    ArgMeta::required("bins", ArgKind::Count),
];
static SCATTER_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("xAxis", ArgKind::Text),
    ArgMeta::required("yAxis", ArgKind::Text),
    ArgMeta::optional("color", ArgKind::Text),
];

fn meta(name: &'static str, description: &'static str, args: &'static [ArgMeta]) -> VariantMeta {
    VariantMeta { kind: PLOT, name, description, args }
}

/// Add every plot variant to `registry`
pub(crate) fn register(registry: &mut VariantRegistry<Stage>) -> Result<(), RegistryError> {
    registry.register(VariantDef::new(meta("bar", "Bar chart", &XY_ARGS), |p, _| {
        Ok(Stage::Plot(Plot::Bar { x_axis: p.text(0)?, y_axis: p.text(1)? }))
    }))?;
    registry.register(VariantDef::new(meta("box", "Box-and-whisker plot", &XY_ARGS), |p, _| {
        Ok(Stage::Plot(Plot::Box { x_axis: p.text(0)?, y_axis: p.text(1)? }))
    }))?;
    registry.register(VariantDef::new(meta("dot", "Dot plot of one column", &DOT_ARGS), |p, _| {
        Ok(Stage::Plot(Plot::Dot { x_axis: p.text(0)? }))
    }))?;
    registry.register(VariantDef::new(meta("histogram", "Histogram with a fixed bin count", &HISTOGRAM_ARGS), |p, _| {
        Ok(Stage::Plot(Plot::Histogram { column: p.text(0)?, bins: p.count(1)? }))
    }))?;
    registry.register(VariantDef::new(meta("scatter", "Scatter plot with optional color", &SCATTER_ARGS), |p, _| {
        Ok(Stage::Plot(Plot::Scatter {
            x_axis: p.text(0)?,
            y_axis: p.text(1)?,
            color: p.optional_text(2)?,
        }))
    }))?;
    Ok(())
}

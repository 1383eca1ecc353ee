//! Statistical tests: ANOVA, Kolmogorov-Smirnov, Kruskal-Wallis, t and z tests
//!
//! Only the persisted shape lives here: numeric parameters first, then the
//! column names the test reads.

use crate::kinds::STATS;
use crate::Stage;
use serde_json::{json, Value};
use tidyblocks_core::{Number, NumberError};
use tidyblocks_registry::{ArgKind, ArgMeta, RegistryError, VariantDef, VariantMeta, VariantRegistry};

/// Hypothesis test over the current table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatTest {
    Anova {
        significance: Number,
        group_column: String,
        value_column: String,
    },
    KolmogorovSmirnov {
        mean: Number,
        std_dev: Number,
        significance: Number,
        column: String,
    },
    KruskalWallis {
        significance: Number,
        group_column: String,
        value_column: String,
    },
    TTestOneSample {
        mean: Number,
        significance: Number,
        column: String,
    },
    TTestPaired {
        significance: Number,
        left_column: String,
        right_column: String,
    },
    ZTestOneSample {
        mean: Number,
        std_dev: Number,
        significance: Number,
        column: String,
    },
}

impl StatTest {
    // ========== Construction ==========

    pub fn anova(significance: f64, group_column: impl Into<String>, value_column: impl Into<String>) -> Result<Self, NumberError> {
        Ok(StatTest::Anova {
            significance: Number::from_f64(significance)?,
            group_column: group_column.into(),
            value_column: value_column.into(),
        })
    }

    pub fn kolmogorov_smirnov(mean: f64, std_dev: f64, significance: f64, column: impl Into<String>) -> Result<Self, NumberError> {
        Ok(StatTest::KolmogorovSmirnov {
            mean: Number::from_f64(mean)?,
            std_dev: Number::from_f64(std_dev)?,
            significance: Number::from_f64(significance)?,
            column: column.into(),
        })
    }

    pub fn kruskal_wallis(significance: f64, group_column: impl Into<String>, value_column: impl Into<String>) -> Result<Self, NumberError> {
        Ok(StatTest::KruskalWallis {
            significance: Number::from_f64(significance)?,
            group_column: group_column.into(),
            value_column: value_column.into(),
        })
    }

    pub fn t_test_one_sample(mean: f64, significance: f64, column: impl Into<String>) -> Result<Self, NumberError> {
        Ok(StatTest::TTestOneSample {
            mean: Number::from_f64(mean)?,
            significance: Number::from_f64(significance)?,
            column: column.into(),
        })
    }

    pub fn t_test_paired(significance: f64, left_column: impl Into<String>, right_column: impl Into<String>) -> Result<Self, NumberError> {
        Ok(StatTest::TTestPaired {
            significance: Number::from_f64(significance)?,
            left_column: left_column.into(),
            right_column: right_column.into(),
        })
    }

    pub fn z_test_one_sample(mean: f64, std_dev: f64, significance: f64, column: impl Into<String>) -> Result<Self, NumberError> {
        Ok(StatTest::ZTestOneSample {
            mean: Number::from_f64(mean)?,
            std_dev: Number::from_f64(std_dev)?,
            significance: Number::from_f64(significance)?,
            column: column.into(),
        })
    }

    // ========== Accessors ==========

    pub fn name(&self) -> &'static str {
        match self {
            StatTest::Anova { .. } => "ANOVA",
            StatTest::KolmogorovSmirnov { .. } => "KolmogorovSmirnov",
            StatTest::KruskalWallis { .. } => "KruskalWallis",
            StatTest::TTestOneSample { .. } => "TTestOneSample",
            StatTest::TTestPaired { .. } => "TTestPaired",
            StatTest::ZTestOneSample { .. } => "ZTestOneSample",
        }
    }

    /// Significance level shared by every test
    pub fn significance(&self) -> &Number {
        match self {
            StatTest::Anova { significance, .. }
            | StatTest::KolmogorovSmirnov { significance, .. }
            | StatTest::KruskalWallis { significance, .. }
            | StatTest::TTestOneSample { significance, .. }
            | StatTest::TTestPaired { significance, .. }
            | StatTest::ZTestOneSample { significance, .. } => significance,
        }
    }

    pub fn args(&self) -> Vec<Value> {
        match self {
            StatTest::Anova { significance, group_column, value_column }
            | StatTest::KruskalWallis { significance, group_column, value_column } => {
                vec![significance.to_json(), json!(group_column), json!(value_column)]
            }
            StatTest::KolmogorovSmirnov { mean, std_dev, significance, column }
            | StatTest::ZTestOneSample { mean, std_dev, significance, column } => {
                vec![mean.to_json(), std_dev.to_json(), significance.to_json(), json!(column)]
            }
            StatTest::TTestOneSample { mean, significance, column } => {
                vec![mean.to_json(), significance.to_json(), json!(column)]
            }
            StatTest::TTestPaired { significance, left_column, right_column } => {
                vec![significance.to_json(), json!(left_column), json!(right_column)]
            }
        }
    }
}

// ============ Registration ============

static GROUPED_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("significance", ArgKind::Number),
    ArgMeta::required("groupName", ArgKind::Text),
    ArgMeta::required("valueName", ArgKind::Text),
];
static DISTRIBUTION_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("mean", ArgKind::Number),
    ArgMeta::required("stdDev", ArgKind::Number),
    ArgMeta::required("significance", ArgKind::Number),
    ArgMeta::required("colName", ArgKind::Text),
];
static ONE_SAMPLE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("mean", ArgKind::Number),
    ArgMeta::required("significance", ArgKind::Number),
    ArgMeta::required("colName", ArgKind::Text),
];
static PAIRED_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("significance", ArgKind::Number),
    ArgMeta::required("leftCol", ArgKind::Text),
    ArgMeta::required("rightCol", ArgKind::Text),
];

fn meta(name: &'static str, description: &'static str, args: &'static [ArgMeta]) -> VariantMeta {
    VariantMeta { kind: STATS, name, description, args }
}

/// Add every statistical test variant to `registry`
pub(crate) fn register(registry: &mut VariantRegistry<Stage>) -> Result<(), RegistryError> {
    registry.register(VariantDef::new(meta("ANOVA", "One-way analysis of variance", &GROUPED_ARGS), |p, _| {
        Ok(Stage::Stats(StatTest::Anova {
            significance: p.number(0)?,
            group_column: p.text(1)?,
            value_column: p.text(2)?,
        }))
    }))?;
    registry.register(VariantDef::new(
        meta("KolmogorovSmirnov", "Kolmogorov-Smirnov test for normality", &DISTRIBUTION_ARGS),
        |p, _| {
            Ok(Stage::Stats(StatTest::KolmogorovSmirnov {
                mean: p.number(0)?,
                std_dev: p.number(1)?,
                significance: p.number(2)?,
                column: p.text(3)?,
            }))
        },
    ))?;
    registry.register(VariantDef::new(meta("KruskalWallis", "Kruskal-Wallis H test", &GROUPED_ARGS), |p, _| {
        Ok(Stage::Stats(StatTest::KruskalWallis {
            significance: p.number(0)?,
            group_column: p.text(1)?,
            value_column: p.text(2)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("TTestOneSample", "One-sample t test", &ONE_SAMPLE_ARGS), |p, _| {
        Ok(Stage::Stats(StatTest::TTestOneSample {
            mean: p.number(0)?,
            significance: p.number(1)?,
            column: p.text(2)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("TTestPaired", "Paired two-sided t test", &PAIRED_ARGS), |p, _| {
        Ok(Stage::Stats(StatTest::TTestPaired {
            significance: p.number(0)?,
            left_column: p.text(1)?,
            right_column: p.text(2)?,
        }))
    }))?;
    registry.register(VariantDef::new(meta("ZTestOneSample", "One-sample z test", &DISTRIBUTION_ARGS), |p, _| {
        Ok(Stage::Stats(StatTest::ZTestOneSample {
            mean: p.number(0)?,
            std_dev: p.number(1)?,
            significance: p.number(2)?,
            column: p.text(3)?,
        }))
    }))?;
    Ok(())
}

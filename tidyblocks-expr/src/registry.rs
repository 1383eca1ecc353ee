//! Built-in expression variants

use crate::kinds::{self, ARITHMETIC, CONVERT, DATETIME, NEGATE, NULLARY, TERNARY, TYPECHECK};
use crate::operator::{BinaryOp, Conversion, DateField, TernaryOp, TypeCheck, UnaryOp};
use crate::Expression;
use std::sync::OnceLock;
use tidyblocks_core::Family;
use tidyblocks_registry::{ArgKind, ArgMeta, RegistryError, VariantDef, VariantMeta, VariantRegistry};

const EXPR: ArgKind = ArgKind::Node(Family::Expression);

static CONSTANT_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", ArgKind::Literal)];
static COLUMN_ARGS: [ArgMeta; 1] = [ArgMeta::required("name", ArgKind::Text)];
static UNARY_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", EXPR)];
static BINARY_ARGS: [ArgMeta; 2] = [ArgMeta::required("left", EXPR), ArgMeta::required("right", EXPR)];
static TERNARY_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("condition", EXPR),
    ArgMeta::required("ifTrue", EXPR),
    ArgMeta::required("ifFalse", EXPR),
];

static REGISTRY: OnceLock<VariantRegistry<Expression>> = OnceLock::new();

/// Process-wide expression registry, built on first use
pub fn registry() -> &'static VariantRegistry<Expression> {
    REGISTRY.get_or_init(|| {
        let registry = standard_registry().expect("built-in expression variants are unique");
        tracing::debug!(variants = registry.len(), "expression registry initialised");
        registry
    })
}

/// Registry holding every built-in expression variant
pub fn standard_registry() -> Result<VariantRegistry<Expression>, RegistryError> {
    let mut registry = VariantRegistry::new(Family::Expression, &kinds::ALL);

    registry.register(VariantDef::new(
        VariantMeta { kind: NULLARY, name: "constant", description: "Constant value", args: &CONSTANT_ARGS },
        |p, _| Ok(Expression::Constant(p.literal(0)?)),
    ))?;
    registry.register(VariantDef::new(
        VariantMeta { kind: NULLARY, name: "column", description: "Value of a column", args: &COLUMN_ARGS },
        |p, _| Ok(Expression::Column(p.text(0)?)),
    ))?;

    for op in UnaryOp::ALL {
        registry.register(VariantDef::new(
            VariantMeta { kind: NEGATE, name: op.name(), description: op.description(), args: &UNARY_ARGS },
            move |p, ctx| Ok(Expression::unary(op, p.node(0, ctx)?)),
        ))?;
    }

    for op in BinaryOp::ALL {
        registry.register(VariantDef::new(
            VariantMeta { kind: ARITHMETIC, name: op.name(), description: op.description(), args: &BINARY_ARGS },
            move |p, ctx| Ok(Expression::binary(op, p.node(0, ctx)?, p.node(1, ctx)?)),
        ))?;
    }

    for op in TernaryOp::ALL {
        registry.register(VariantDef::new(
            VariantMeta { kind: TERNARY, name: op.name(), description: op.description(), args: &TERNARY_ARGS },
            move |p, ctx| Ok(Expression::ternary(op, p.node(0, ctx)?, p.node(1, ctx)?, p.node(2, ctx)?)),
        ))?;
    }

    for check in TypeCheck::ALL {
        registry.register(VariantDef::new(
            VariantMeta { kind: TYPECHECK, name: check.name(), description: check.description(), args: &UNARY_ARGS },
            move |p, ctx| Ok(Expression::type_check(check, p.node(0, ctx)?)),
        ))?;
    }

    for to in Conversion::ALL {
        registry.register(VariantDef::new(
            VariantMeta { kind: CONVERT, name: to.name(), description: to.description(), args: &UNARY_ARGS },
            move |p, ctx| Ok(Expression::convert(to, p.node(0, ctx)?)),
        ))?;
    }

    for field in DateField::ALL {
        registry.register(VariantDef::new(
            VariantMeta { kind: DATETIME, name: field.name(), description: field.description(), args: &UNARY_ARGS },
            move |p, ctx| Ok(Expression::extract(field, p.node(0, ctx)?)),
        ))?;
    }

    Ok(registry)
}

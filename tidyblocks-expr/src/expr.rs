//! Expression AST definitions.

use crate::kinds;
use crate::operator::{BinaryOp, Conversion, DateField, TernaryOp, TypeCheck, UnaryOp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tidyblocks_core::{Family, Literal, MalformedEncoding, NumberError};
use tidyblocks_registry::{deserialize_node, serialize_node, DecodeContext, Node, Tagged};

/// Expression tree node
///
/// Operand types are not checked; only shape is. Building an expression
/// through the constructors below and decoding its encoded form produce
/// equal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Constant(Literal),

    /// Column reference by name
    Column(String),

    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Ternary {
        op: TernaryOp,
        condition: Box<Expression>,
        if_true: Box<Expression>,
        if_false: Box<Expression>,
    },

    /// Boolean-valued type test
    TypeCheck {
        check: TypeCheck,
        operand: Box<Expression>,
    },

    /// Type-changing conversion
    Convert {
        to: Conversion,
        operand: Box<Expression>,
    },

    /// Datetime field extraction
    Extract {
        field: DateField,
        operand: Box<Expression>,
    },
}

impl Expression {
    // ========== Leaves ==========

    pub fn constant(value: impl Into<Literal>) -> Self {
        Expression::Constant(value.into())
    }

    /// Float constant; NaN and infinities are rejected
    pub fn number(value: f64) -> Result<Self, NumberError> {
        Ok(Expression::Constant(Literal::try_from(value)?))
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(name.into())
    }

    // ========== Operators ==========

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ternary(op: TernaryOp, condition: Expression, if_true: Expression, if_false: Expression) -> Self {
        Expression::Ternary {
            op,
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        }
    }

    pub fn type_check(check: TypeCheck, operand: Expression) -> Self {
        Expression::TypeCheck {
            check,
            operand: Box::new(operand),
        }
    }

    pub fn convert(to: Conversion, operand: Expression) -> Self {
        Expression::Convert {
            to,
            operand: Box::new(operand),
        }
    }

    pub fn extract(field: DateField, operand: Expression) -> Self {
        Expression::Extract {
            field,
            operand: Box::new(operand),
        }
    }

    pub fn negate(operand: Expression) -> Self {
        Self::unary(UnaryOp::Negate, operand)
    }

    pub fn not(operand: Expression) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn subtract(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Subtract, left, right)
    }

    pub fn multiply(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Multiply, left, right)
    }

    pub fn divide(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Divide, left, right)
    }

    pub fn remainder(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Remainder, left, right)
    }

    pub fn power(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Power, left, right)
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::And, left, right)
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Or, left, right)
    }

    pub fn equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Equal, left, right)
    }

    pub fn not_equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::NotEqual, left, right)
    }

    pub fn less(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Less, left, right)
    }

    pub fn less_equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::LessEqual, left, right)
    }

    pub fn greater(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Greater, left, right)
    }

    pub fn greater_equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::GreaterEqual, left, right)
    }

    pub fn if_else(condition: Expression, if_true: Expression, if_false: Expression) -> Self {
        Self::ternary(TernaryOp::IfElse, condition, if_true, if_false)
    }

    // ========== Accessors ==========

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expression::Constant(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&str> {
        match self {
            Expression::Column(name) => Some(name),
            _ => None,
        }
    }

    /// Operands in encoded order (empty for leaves)
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Constant(_) | Expression::Column(_) => Vec::new(),
            Expression::Binary { left, right, .. } => vec![&**left, &**right],
            Expression::Ternary {
                condition,
                if_true,
                if_false,
                ..
            } => vec![&**condition, &**if_true, &**if_false],
            Expression::Unary { operand, .. }
            | Expression::TypeCheck { operand, .. }
            | Expression::Convert { operand, .. }
            | Expression::Extract { operand, .. } => vec![&**operand],
        }
    }

    /// Column names referenced anywhere in the tree, in encounter order
    pub fn columns(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_columns(&mut names);
        names
    }

    fn collect_columns<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expression::Column(name) => names.push(name),
            other => other.children().into_iter().for_each(|c| c.collect_columns(names)),
        }
    }

    /// Longest path from this node to a leaf, counting this node
    pub fn depth(&self) -> usize {
        1 + self.children().into_iter().map(Expression::depth).max().unwrap_or(0)
    }
}

impl Tagged for Expression {
    fn kind(&self) -> &'static str {
        match self {
            Expression::Constant(_) | Expression::Column(_) => kinds::NULLARY,
            Expression::Unary { .. } => kinds::NEGATE,
            Expression::Binary { .. } => kinds::ARITHMETIC,
            Expression::Ternary { .. } => kinds::TERNARY,
            Expression::TypeCheck { .. } => kinds::TYPECHECK,
            Expression::Convert { .. } => kinds::CONVERT,
            Expression::Extract { .. } => kinds::DATETIME,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Expression::Constant(_) => "constant",
            Expression::Column(_) => "column",
            Expression::Unary { op, .. } => op.name(),
            Expression::Binary { op, .. } => op.name(),
            Expression::Ternary { op, .. } => op.name(),
            Expression::TypeCheck { check, .. } => check.name(),
            Expression::Convert { to, .. } => to.name(),
            Expression::Extract { field, .. } => field.name(),
        }
    }
}

impl Node for Expression {
    const FAMILY: Family = Family::Expression;

    fn encode(&self) -> Value {
        let mut items = vec![Value::from(self.kind()), Value::from(self.name())];
        match self {
            Expression::Constant(literal) => items.push(literal.to_json()),
            Expression::Column(name) => items.push(Value::String(name.clone())),
            other => items.extend(other.children().into_iter().map(Node::encode)),
        }
        Value::Array(items)
    }

    fn decode_with(encoded: &Value, ctx: &mut DecodeContext) -> Result<Self, MalformedEncoding> {
        crate::registry().decode(encoded, ctx)
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_node(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_node(deserializer)
    }
}

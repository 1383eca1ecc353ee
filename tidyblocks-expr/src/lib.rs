//! TidyBlocks Expressions
//!
//! Scalar-valued nodes: constants, column references, unary, binary and
//! ternary operators, type tests, conversions and datetime field
//! extraction. Encoded as `[discriminator, name, ...payload]`.

mod expr;
mod operator;
mod registry;

pub use expr::Expression;
pub use operator::{BinaryOp, Conversion, DateField, TernaryOp, TypeCheck, UnaryOp};
pub use registry::{registry, standard_registry};

/// Expression discriminators
pub mod kinds {
    /// Leaves: `constant`, `column`
    pub const NULLARY: &str = "@nullary";
    /// One operand: `negate`, `not`
    pub const NEGATE: &str = "@negate";
    /// Two operands: arithmetic, comparison and logic
    pub const ARITHMETIC: &str = "@arithmetic";
    pub const TERNARY: &str = "@ternary";
    pub const TYPECHECK: &str = "@typecheck";
    pub const CONVERT: &str = "@convert";
    pub const DATETIME: &str = "@datetime";

    pub const ALL: [&str; 7] = [NULLARY, NEGATE, ARITHMETIC, TERNARY, TYPECHECK, CONVERT, DATETIME];
}

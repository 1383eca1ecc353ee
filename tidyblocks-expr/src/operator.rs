//! Operator definitions for expressions.
//!
//! Each enum lists the variant names persisted under one discriminator.

/// Operators under `@negate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 2] = [UnaryOp::Negate, UnaryOp::Not];

    pub fn name(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "negate",
            UnaryOp::Not => "not",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "Arithmetic negation",
            UnaryOp::Not => "Logical negation",
        }
    }
}

/// Operators under `@arithmetic` (comparisons and logic included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    And,
    Divide,
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Multiply,
    NotEqual,
    Or,
    Power,
    Remainder,
    Subtract,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 14] = [
        BinaryOp::Add,
        BinaryOp::And,
        BinaryOp::Divide,
        BinaryOp::Equal,
        BinaryOp::Greater,
        BinaryOp::GreaterEqual,
        BinaryOp::Less,
        BinaryOp::LessEqual,
        BinaryOp::Multiply,
        BinaryOp::NotEqual,
        BinaryOp::Or,
        BinaryOp::Power,
        BinaryOp::Remainder,
        BinaryOp::Subtract,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::And => "and",
            BinaryOp::Divide => "divide",
            BinaryOp::Equal => "equal",
            BinaryOp::Greater => "greater",
            BinaryOp::GreaterEqual => "greaterEqual",
            BinaryOp::Less => "less",
            BinaryOp::LessEqual => "lessEqual",
            BinaryOp::Multiply => "multiply",
            BinaryOp::NotEqual => "notEqual",
            BinaryOp::Or => "or",
            BinaryOp::Power => "power",
            BinaryOp::Remainder => "remainder",
            BinaryOp::Subtract => "subtract",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BinaryOp::Add => "Sum of two values",
            BinaryOp::And => "Logical conjunction",
            BinaryOp::Divide => "Quotient of two values",
            BinaryOp::Equal => "Equality test",
            BinaryOp::Greater => "Strictly greater than",
            BinaryOp::GreaterEqual => "Greater than or equal",
            BinaryOp::Less => "Strictly less than",
            BinaryOp::LessEqual => "Less than or equal",
            BinaryOp::Multiply => "Product of two values",
            BinaryOp::NotEqual => "Inequality test",
            BinaryOp::Or => "Logical disjunction",
            BinaryOp::Power => "Left raised to the power of right",
            BinaryOp::Remainder => "Remainder after division",
            BinaryOp::Subtract => "Difference of two values",
        }
    }
}

/// Operators under `@ternary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    IfElse,
}

impl TernaryOp {
    pub const ALL: [TernaryOp; 1] = [TernaryOp::IfElse];

    pub fn name(&self) -> &'static str {
        match self {
            TernaryOp::IfElse => "ifElse",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TernaryOp::IfElse => "Choose between two values on a condition",
        }
    }
}

/// Type tests under `@typecheck`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCheck {
    IsBool,
    IsDatetime,
    IsMissing,
    IsNumber,
    IsString,
}

impl TypeCheck {
    pub const ALL: [TypeCheck; 5] = [
        TypeCheck::IsBool,
        TypeCheck::IsDatetime,
        TypeCheck::IsMissing,
        TypeCheck::IsNumber,
        TypeCheck::IsString,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TypeCheck::IsBool => "isBool",
            TypeCheck::IsDatetime => "isDatetime",
            TypeCheck::IsMissing => "isMissing",
            TypeCheck::IsNumber => "isNumber",
            TypeCheck::IsString => "isString",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TypeCheck::IsBool => "Is the value a boolean?",
            TypeCheck::IsDatetime => "Is the value a datetime?",
            TypeCheck::IsMissing => "Is the value missing?",
            TypeCheck::IsNumber => "Is the value a number?",
            TypeCheck::IsString => "Is the value a string?",
        }
    }
}

/// Conversions under `@convert`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    ToBool,
    ToDatetime,
    ToNumber,
    ToString,
}

impl Conversion {
    pub const ALL: [Conversion; 4] = [
        Conversion::ToBool,
        Conversion::ToDatetime,
        Conversion::ToNumber,
        Conversion::ToString,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Conversion::ToBool => "toBool",
            Conversion::ToDatetime => "toDatetime",
            Conversion::ToNumber => "toNumber",
            Conversion::ToString => "toString",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Conversion::ToBool => "Convert to boolean",
            Conversion::ToDatetime => "Convert to datetime",
            Conversion::ToNumber => "Convert to number",
            Conversion::ToString => "Convert to string",
        }
    }
}

/// Field extractions under `@datetime`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Year,
    Month,
    Day,
    Weekday,
    Hours,
    Minutes,
    Seconds,
}

impl DateField {
    pub const ALL: [DateField; 7] = [
        DateField::Year,
        DateField::Month,
        DateField::Day,
        DateField::Weekday,
        DateField::Hours,
        DateField::Minutes,
        DateField::Seconds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DateField::Year => "toYear",
            DateField::Month => "toMonth",
            DateField::Day => "toDay",
            DateField::Weekday => "toWeekday",
            DateField::Hours => "toHours",
            DateField::Minutes => "toMinutes",
            DateField::Seconds => "toSeconds",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DateField::Year => "Year of a datetime",
            DateField::Month => "Month of a datetime (1-12)",
            DateField::Day => "Day of month of a datetime",
            DateField::Weekday => "Day of week of a datetime",
            DateField::Hours => "Hours of a datetime",
            DateField::Minutes => "Minutes of a datetime",
            DateField::Seconds => "Seconds of a datetime",
        }
    }
}

//! Expression tree produced by the formula grammar.

/// One node of a parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Vec<Expr>),
    /// Access to a feature field, `feature["height"]` or `feature.height`.
    Field(String),
    /// A helper invocation with arity checked at parse time.
    Call(Helper, Vec<Expr>),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Cmp(CmpOp, Box<Expr>, Box<Expr>),
}

/// Comparison operators. Only the strict equality forms exist; the loose
/// `==` and `!=` are not part of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    StrictEq,
    StrictNeq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// The built-in helper functions callable from formulas. Nothing else is
/// callable; `Helper::from_name` is the whole function namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Helper {
    Lower,
    Upper,
    Trim,
    ToNumber,
    Includes,
    In,
    IsEmpty,
}

impl Helper {
    /// Look up a helper by its case-sensitive source name.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "lower" => Self::Lower,
            "upper" => Self::Upper,
            "trim" => Self::Trim,
            "toNumber" => Self::ToNumber,
            "includes" => Self::Includes,
            "in" => Self::In,
            "isEmpty" => Self::IsEmpty,
            _ => return None,
        })
    }

    /// Number of arguments the helper takes.
    pub(crate) fn arity(self) -> usize {
        match self {
            Self::Lower | Self::Upper | Self::Trim | Self::ToNumber | Self::IsEmpty => 1,
            Self::Includes | Self::In => 2,
        }
    }
}

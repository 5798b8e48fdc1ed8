use std::fmt;

use super::Value;

/// The closed set of condition operators.
///
/// `Contains` with a list comparison value means exact membership of any
/// element, not substring containment; see [`Condition`] for the full
/// operator semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    IsEmpty,
    IsNotEmpty,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::IsEmpty => "isEmpty",
            Operator::IsNotEmpty => "isNotEmpty",
        };
        write!(f, "{name}")
    }
}

/// One field/operator/value test within a structured rule.
///
/// Evaluation semantics live in [`Condition::matches`](crate::evaluate);
/// this type is plain data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    /// Feature field to test. An absent field reads as null.
    pub field: String,
    pub operator: Operator,
    /// Comparison value. Ignored by `IsEmpty`/`IsNotEmpty`.
    #[cfg_attr(feature = "serde", serde(default = "null_value"))]
    pub value: Value,
}

#[cfg(feature = "serde")]
fn null_value() -> Value {
    Value::Null
}

/// Intermediate builder for conditions. Created by [`field()`]; each operator
/// method produces a finished [`Condition`].
#[derive(Debug, Clone)]
pub struct FieldCond {
    name: String,
}

impl FieldCond {
    fn build(self, operator: Operator, value: Value) -> Condition {
        Condition {
            field: self.name,
            operator,
            value,
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::Equals, value.into())
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::NotEquals, value.into())
    }

    #[must_use]
    pub fn contains(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::Contains, value.into())
    }

    #[must_use]
    pub fn not_contains(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::NotContains, value.into())
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::Gt, value.into())
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::Gte, value.into())
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::Lt, value.into())
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::Lte, value.into())
    }

    #[must_use]
    pub fn is_in(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::In, value.into())
    }

    #[must_use]
    pub fn not_in(self, value: impl Into<Value>) -> Condition {
        self.build(Operator::NotIn, value.into())
    }

    #[must_use]
    pub fn is_empty(self) -> Condition {
        self.build(Operator::IsEmpty, Value::Null)
    }

    #[must_use]
    pub fn is_not_empty(self) -> Condition {
        self.build(Operator::IsNotEmpty, Value::Null)
    }
}

#[must_use]
pub fn field(name: &str) -> FieldCond {
    FieldCond {
        name: name.to_owned(),
    }
}

//! Tree-walk evaluation of compiled formulas.
//!
//! Evaluation is total: every node yields a value, spent budget yields
//! `false`, and nothing here can touch anything beyond the feature it was
//! handed.

use std::cmp::Ordering;

use tracing::warn;

use crate::coerce::{coerce, parse_float_prefix};
use crate::types::{Feature, Value};

use super::ast::{CmpOp, Expr, Helper};

/// Upper bound on evaluated nodes per run. An expression tree compiled from
/// source within the length cap cannot reach it; the budget is a backstop
/// for trees built by other means.
const STEP_BUDGET: u32 = 65_536;

/// Evaluate a formula tree against one feature, reducing the result to a
/// match decision through host truthiness.
pub(super) fn evaluate(ast: &Expr, feature: &Feature) -> bool {
    let mut steps = STEP_BUDGET;
    match eval(ast, feature, &mut steps) {
        Some(value) => value.truthy(),
        None => {
            warn!("formula evaluation ran out of budget; treating as no match");
            false
        }
    }
}

fn eval(expr: &Expr, feature: &Feature, steps: &mut u32) -> Option<Value> {
    *steps = steps.checked_sub(1)?;
    Some(match expr {
        Expr::Null => Value::Null,
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Num(n) => Value::Num(*n),
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::List(items) => Value::List(
            items
                .iter()
                .map(|item| eval(item, feature, steps))
                .collect::<Option<Vec<_>>>()?,
        ),
        Expr::Field(name) => feature.get(name).cloned().unwrap_or(Value::Null),
        Expr::Call(helper, args) => call(*helper, args, feature, steps)?,
        Expr::Not(inner) => {
            // Negation chains are walked in place so stacked `!` cannot
            // deepen the call stack.
            let mut flips = 1_usize;
            let mut node = inner.as_ref();
            while let Expr::Not(next) = node {
                *steps = steps.checked_sub(1)?;
                flips += 1;
                node = next.as_ref();
            }
            let value = eval(node, feature, steps)?;
            if flips % 2 == 0 {
                Value::Bool(value.truthy())
            } else {
                Value::Bool(!value.truthy())
            }
        }
        // `&&` and `||` yield an operand, not a boolean, matching the
        // short-circuit forms formulas are written against.
        Expr::And(lhs, rhs) => {
            let left = eval(lhs, feature, steps)?;
            if left.truthy() {
                eval(rhs, feature, steps)?
            } else {
                left
            }
        }
        Expr::Or(lhs, rhs) => {
            let left = eval(lhs, feature, steps)?;
            if left.truthy() {
                left
            } else {
                eval(rhs, feature, steps)?
            }
        }
        Expr::Cmp(op, lhs, rhs) => {
            let left = eval(lhs, feature, steps)?;
            let right = eval(rhs, feature, steps)?;
            Value::Bool(compare(*op, &left, &right))
        }
    })
}

fn compare(op: CmpOp, lhs: &Value, rhs: &Value) -> bool {
    match op {
        CmpOp::StrictEq => strict_eq(lhs, rhs),
        CmpOp::StrictNeq => !strict_eq(lhs, rhs),
        CmpOp::Gt => ordering(lhs, rhs) == Some(Ordering::Greater),
        CmpOp::Gte => matches!(
            ordering(lhs, rhs),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        CmpOp::Lt => ordering(lhs, rhs) == Some(Ordering::Less),
        CmpOp::Lte => matches!(ordering(lhs, rhs), Some(Ordering::Less | Ordering::Equal)),
    }
}

/// Strict equality: values of different kinds are never equal, NaN is not
/// equal to itself, and lists never compare equal.
fn strict_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Num(a), Value::Num(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => false,
    }
}

/// Ordering is defined only when both operands coerce to numbers, the same
/// rule the condition operators follow.
fn ordering(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    let a = coerce(lhs).as_num()?;
    let b = coerce(rhs).as_num()?;
    a.partial_cmp(&b)
}

fn call(helper: Helper, args: &[Expr], feature: &Feature, steps: &mut u32) -> Option<Value> {
    Some(match helper {
        Helper::Lower => {
            let arg = eval(&args[0], feature, steps)?;
            Value::Str(arg.text_or_empty().to_lowercase())
        }
        Helper::Upper => {
            let arg = eval(&args[0], feature, steps)?;
            Value::Str(arg.text_or_empty().to_uppercase())
        }
        Helper::Trim => {
            let arg = eval(&args[0], feature, steps)?;
            Value::Str(arg.text_or_empty().trim().to_owned())
        }
        Helper::ToNumber => {
            // Plain stringification feeds the prefix parser, so `null`
            // reads as the text "null" and comes out 0.
            let arg = eval(&args[0], feature, steps)?;
            Value::Num(parse_float_prefix(&arg.to_text()).unwrap_or(0.0))
        }
        Helper::Includes => {
            let haystack = eval(&args[0], feature, steps)?;
            let needle = eval(&args[1], feature, steps)?;
            Value::Bool(haystack.text_or_empty().contains(&needle.text_or_empty()))
        }
        Helper::In => {
            let value = eval(&args[0], feature, steps)?;
            let list = eval(&args[1], feature, steps)?;
            let Value::List(items) = list else {
                return Some(Value::Bool(false));
            };
            let needle = coerce(&value);
            Value::Bool(items.iter().any(|item| coerce(item) == needle))
        }
        Helper::IsEmpty => {
            let arg = eval(&args[0], feature, steps)?;
            Value::Bool(arg.is_empty())
        }
    })
}

mod coerce;
mod evaluate;
mod fields;
mod formula;
mod resolve;
mod types;

pub use coerce::{Coerced, coerce};
pub use fields::{FieldKind, feature_fields, field_kind};
pub use formula::{
    Formula, FormulaError, MAX_NESTING_DEPTH, MAX_SOURCE_LEN, evaluate_formula, validate_formula,
};
#[cfg(feature = "parallel")]
pub use resolve::par_assign_all;
pub use resolve::{assign_all, resolve};
pub use types::{
    ColorMap, Condition, DisplaySettings, Feature, FieldCond, Logic, Operator, Rule, RuleKind,
    Ruleset, Value, field,
};

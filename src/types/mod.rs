mod condition;
mod feature;
mod rule;
mod ruleset;
mod value;

pub use condition::{Condition, FieldCond, Operator, field};
pub use feature::Feature;
pub use rule::{Logic, Rule, RuleKind};
pub use ruleset::{ColorMap, DisplaySettings, Ruleset};
pub use value::Value;

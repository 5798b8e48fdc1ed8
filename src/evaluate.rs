use std::cmp::Ordering;

use crate::coerce::coerce;
use crate::types::{Condition, Feature, Logic, Operator, Rule, Value};

impl Condition {
    /// Test this condition against one feature.
    ///
    /// The feature value is read (absent fields count as null), coerced
    /// once, and dispatched on the operator. Never panics; any shape
    /// mismatch (non-numeric ordering operand, non-list membership value)
    /// simply makes the condition false.
    #[must_use]
    pub fn matches(&self, feature: &Feature) -> bool {
        let raw = feature.get(&self.field).unwrap_or(&Value::Null);
        match self.operator {
            Operator::Equals => coerce(raw) == coerce(&self.value),
            Operator::NotEquals => coerce(raw) != coerce(&self.value),
            Operator::Contains => contains(raw, &self.value),
            Operator::NotContains => !contains(raw, &self.value),
            Operator::Gt => ordering(raw, &self.value) == Some(Ordering::Greater),
            Operator::Gte => {
                matches!(ordering(raw, &self.value), Some(Ordering::Greater | Ordering::Equal))
            }
            Operator::Lt => ordering(raw, &self.value) == Some(Ordering::Less),
            Operator::Lte => {
                matches!(ordering(raw, &self.value), Some(Ordering::Less | Ordering::Equal))
            }
            Operator::In => member_of(raw, &self.value),
            Operator::NotIn => !member_of(raw, &self.value),
            Operator::IsEmpty => raw.is_empty(),
            Operator::IsNotEmpty => !raw.is_empty(),
        }
    }
}

// Ordering operators compare only when both sides coerce to numbers; a NaN
// on either side yields no ordering and therefore false.
fn ordering(raw: &Value, against: &Value) -> Option<Ordering> {
    let a = coerce(raw).as_num()?;
    let b = coerce(against).as_num()?;
    a.partial_cmp(&b)
}

// Substring containment over the falsy-guarded texts, except that a list
// comparison value means exact membership of any element. The feature side
// coerces before stringifying: "3.14abc" searches as "3.14", and a falsy
// coercion ("0", "false") searches as "". The comparison side stays raw.
fn contains(raw: &Value, against: &Value) -> bool {
    let feature_text = coerce(raw).text_or_empty();
    if let Value::List(items) = against {
        return items.iter().any(|item| item.to_text() == feature_text);
    }
    feature_text.contains(&against.text_or_empty())
}

fn member_of(raw: &Value, against: &Value) -> bool {
    let Value::List(items) = against else {
        return false;
    };
    let feature = coerce(raw);
    items.iter().any(|item| coerce(item) == feature)
}

impl Rule {
    /// Combine the rule's structured conditions under its logic combinator.
    ///
    /// An empty condition list matches every feature, whatever the logic
    /// says. Formula evaluation for custom rules lives in
    /// [`crate::resolve`]; this method only covers the structured side.
    #[must_use]
    pub fn conditions_match(&self, feature: &Feature) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        match self.logic {
            Logic::All => self.conditions.iter().all(|c| c.matches(feature)),
            Logic::Any => self.conditions.iter().any(|c| c.matches(feature)),
            Logic::None => !self.conditions.iter().any(|c| c.matches(feature)),
        }
    }
}

//! Field discovery and kind inference over feature collections.
//!
//! Authoring surfaces use these to offer field pickers and operator hints;
//! nothing in resolution depends on them.

use std::collections::BTreeSet;

use crate::coerce::{coerce, Coerced};
use crate::types::{Feature, Value};

/// How many non-null values are sampled before a field's kind is settled.
const KIND_SAMPLE: usize = 10;

/// The inferred kind of a field, judged from coerced sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Every sampled value coerces to a string. Also the default when a
    /// field has no non-null values at all.
    Text,
    /// Every sampled value coerces to a number, dates included.
    Number,
    /// Every sampled value coerces to a boolean.
    Boolean,
    /// The samples disagree.
    Mixed,
}

/// Distinct field names across a collection, sorted, with the identifier
/// key left out.
#[must_use]
pub fn feature_fields(features: &[Feature]) -> Vec<String> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for feature in features {
        for (name, _) in feature.fields() {
            if name != "id" {
                names.insert(name);
            }
        }
    }
    names.into_iter().map(str::to_owned).collect()
}

/// Infer a field's kind from up to [`KIND_SAMPLE`] non-null values, taken
/// in collection order.
#[must_use]
pub fn field_kind(features: &[Feature], field: &str) -> FieldKind {
    let mut kind: Option<FieldKind> = None;
    let mut sampled = 0_usize;
    for feature in features {
        if sampled == KIND_SAMPLE {
            break;
        }
        let Some(value) = feature.get(field) else {
            continue;
        };
        if matches!(value, Value::Null) {
            continue;
        }
        sampled += 1;
        let observed = match coerce(value) {
            Coerced::Num(_) => FieldKind::Number,
            Coerced::Bool(_) => FieldKind::Boolean,
            Coerced::Null | Coerced::Str(_) => FieldKind::Text,
        };
        match kind {
            None => kind = Some(observed),
            Some(seen) if seen == observed => {}
            Some(_) => return FieldKind::Mixed,
        }
    }
    kind.unwrap_or(FieldKind::Text)
}

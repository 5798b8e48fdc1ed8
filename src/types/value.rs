/// A raw feature or condition value, as supplied by the caller.
///
/// Features carry scalars; condition comparison values may additionally be
/// lists (for the membership operators). Coercion into the comparison form
/// happens in [`crate::coerce`], never here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    /// Absent / unknown.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit floating-point number. All numeric input maps here.
    Num(f64),
    /// A UTF-8 string.
    Str(String),
    /// A list of values (condition comparison values, formula array literals).
    List(Vec<Value>),
}

impl Value {
    /// Plain string conversion: `Null` renders as `"null"`, booleans as
    /// `true`/`false`, numbers in shortest decimal form, lists comma-joined
    /// with null elements rendered empty.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Num(n) => fmt_number(*n),
            Value::Str(s) => s.clone(),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::join_text).collect();
                parts.join(",")
            }
        }
    }

    // List joining renders null elements as empty, unlike top-level `to_text`.
    fn join_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_text(),
        }
    }

    /// Falsy-guarded string conversion: null, false, `0`, NaN and the empty
    /// string all render as `""`; everything else as [`Value::to_text`].
    #[must_use]
    pub fn text_or_empty(&self) -> String {
        if self.truthy() {
            self.to_text()
        } else {
            String::new()
        }
    }

    /// Host truthiness: false for null, `false`, `0`, NaN and `""`.
    /// Lists are always truthy, even when empty.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) => true,
        }
    }

    /// True for null, an empty or whitespace-only string, or an empty list.
    /// Numbers and booleans are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Bool(_) | Value::Num(_) => false,
        }
    }
}

/// Shortest-form decimal rendering: `20` not `20.0`, negative zero as `0`,
/// infinities spelled out.
fn fmt_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    n.to_string()
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Value::Num(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

use super::Condition;

/// Which evaluation strategy a rule uses.
///
/// `Builder` rules are driven by their structured conditions; `Custom` rules
/// by their formula text. A custom rule whose formula is absent or empty
/// falls back to its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RuleKind {
    #[default]
    Builder,
    Custom,
}

/// Boolean combinator over a rule's condition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Logic {
    /// Every condition must hold.
    #[default]
    All,
    /// At least one condition must hold.
    Any,
    /// No condition may hold.
    None,
}

/// A prioritized predicate plus the archetype it assigns.
///
/// Construct with [`Rule::new`] and the chainable setters, or fill the
/// fields directly:
///
/// ```
/// use archon::{field, Rule};
///
/// let rule = Rule::new("tall_res", "RES_TOWER")
///     .all([field("zone").eq("R1"), field("height").gt(30_i64)])
///     .priority(100);
/// assert!(rule.enabled);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub id: String,
    /// Optional human-readable label; never consulted during resolution.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: RuleKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logic: Logic,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub formula: Option<String>,
    /// Archetype identifier assigned when this rule wins.
    #[cfg_attr(feature = "serde", serde(rename = "assignArchetype"))]
    pub archetype: String,
    /// Higher wins. Any integer is accepted; the authoring UI keeps to
    /// [0, 999].
    #[cfg_attr(feature = "serde", serde(default = "default_priority"))]
    pub priority: i64,
    /// Disabled rules are removed from resolution entirely.
    #[cfg_attr(feature = "serde", serde(default = "default_enabled"))]
    pub enabled: bool,
}

#[cfg(feature = "serde")]
fn default_priority() -> i64 {
    99
}

#[cfg(feature = "serde")]
fn default_enabled() -> bool {
    true
}

impl Rule {
    /// Create a builder-kind rule with no conditions (which matches every
    /// feature), priority 99, enabled.
    #[must_use]
    pub fn new(id: impl Into<String>, archetype: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind: RuleKind::Builder,
            logic: Logic::All,
            conditions: Vec::new(),
            formula: None,
            archetype: archetype.into(),
            priority: 99,
            enabled: true,
        }
    }

    /// Set a human-readable label.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Require every given condition (`all` logic).
    #[must_use]
    pub fn all(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.logic = Logic::All;
        self.conditions = conditions.into_iter().collect();
        self
    }

    /// Require at least one of the given conditions (`any` logic).
    #[must_use]
    pub fn any(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.logic = Logic::Any;
        self.conditions = conditions.into_iter().collect();
        self
    }

    /// Require that none of the given conditions hold (`none` logic).
    #[must_use]
    pub fn none(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.logic = Logic::None;
        self.conditions = conditions.into_iter().collect();
        self
    }

    /// Switch the rule to formula evaluation with the given expression text.
    #[must_use]
    pub fn formula(mut self, text: impl Into<String>) -> Self {
        self.kind = RuleKind::Custom;
        self.formula = Some(text.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Remove the rule from resolution without deleting it.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

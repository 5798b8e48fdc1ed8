use std::collections::HashMap;

use super::{Feature, Rule};

/// Color palette selection for the downstream visualization layer.
/// Carried as opaque data; the engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorMap {
    #[default]
    Accent,
    Set1,
}

/// Presentation settings attached to a ruleset. None of these affect
/// resolution; they travel with the rules so one document round-trips.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct DisplaySettings {
    pub features_group_level1: Option<String>,
    pub features_group_level2: Option<String>,
    pub color_map: ColorMap,
    pub template_grouped: bool,
}

/// An ordered rule list plus the archetype vocabulary and display settings.
///
/// Rule order matters only as the tie-breaker between equal priorities;
/// it never overrides priority.
///
/// ```
/// use archon::{field, Feature, Rule, Ruleset};
///
/// let ruleset = Ruleset::new(vec![
///     Rule::new("res", "RES").all([field("zone").is_in(["R1", "R2"])]),
///     Rule::new("com", "COM").all([field("zone").eq("C1")]),
/// ]);
/// let feature = Feature::new("f1").set("zone", "R1");
/// assert_eq!(ruleset.resolve(&feature).map(|r| r.archetype.as_str()), Some("RES"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Ruleset {
    pub rules: Vec<Rule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub archetype_options: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: DisplaySettings,
}

impl Ruleset {
    /// Create a ruleset with default settings and an empty archetype
    /// vocabulary.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            archetype_options: Vec::new(),
            settings: DisplaySettings::default(),
        }
    }

    /// Attach the archetype vocabulary offered by the authoring UI.
    #[must_use]
    pub fn with_archetypes(mut self, options: impl IntoIterator<Item = String>) -> Self {
        self.archetype_options = options.into_iter().collect();
        self
    }

    /// Resolve the winning rule for one feature. See [`crate::resolve`].
    #[must_use]
    pub fn resolve(&self, feature: &Feature) -> Option<&Rule> {
        crate::resolve(&self.rules, feature)
    }

    /// Assign archetypes to every feature. See [`crate::assign_all`].
    #[must_use]
    pub fn assign_all(&self, features: &[Feature]) -> HashMap<String, String> {
        crate::assign_all(&self.rules, features)
    }

    /// Parallel [`Ruleset::assign_all`]; identical output.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn par_assign_all(&self, features: &[Feature]) -> HashMap<String, String> {
        crate::par_assign_all(&self.rules, features)
    }
}

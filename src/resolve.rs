//! Rule resolution and batch assignment.

use std::collections::HashMap;

use tracing::warn;

use crate::formula::Formula;
use crate::types::{Feature, Rule, RuleKind};

/// Compiled formulas for one resolution pass, keyed by source text.
///
/// Every distinct formula among the enabled custom rules is compiled exactly
/// once per pass. A formula that fails to compile is warned about here and
/// its rule never matches; resolution carries on with the others.
#[derive(Debug, Default)]
struct FormulaCache {
    compiled: HashMap<String, Option<Formula>>,
}

impl FormulaCache {
    fn prepare(rules: &[Rule]) -> Self {
        let mut compiled: HashMap<String, Option<Formula>> = HashMap::new();
        for rule in rules {
            if !rule.enabled || rule.kind != RuleKind::Custom {
                continue;
            }
            let Some(source) = &rule.formula else { continue };
            // Empty formula text means the rule runs on its conditions; there
            // is nothing to compile or warn about.
            if source.is_empty() || compiled.contains_key(source) {
                continue;
            }
            let formula = match Formula::compile(source) {
                Ok(formula) => Some(formula),
                Err(error) => {
                    warn!(rule = %rule.id, %error, "formula failed to compile; rule will never match");
                    None
                }
            };
            compiled.insert(source.clone(), formula);
        }
        Self { compiled }
    }

    fn matches(&self, rule: &Rule, feature: &Feature) -> bool {
        match (rule.kind, &rule.formula) {
            (RuleKind::Custom, Some(source)) if !source.is_empty() => self
                .compiled
                .get(source)
                .and_then(Option::as_ref)
                .is_some_and(|formula| formula.evaluate(feature)),
            // A custom rule without formula text falls back to its conditions.
            _ => rule.conditions_match(feature),
        }
    }
}

/// Enabled rules in evaluation order: priority descending, equal priorities
/// by their position in the full input list. Positions are taken before
/// filtering, so ties always follow the order rules were authored in.
fn evaluation_order(rules: &[Rule]) -> Vec<(usize, &Rule)> {
    let mut ordered: Vec<(usize, &Rule)> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.enabled)
        .collect();
    ordered.sort_by(|(ia, a), (ib, b)| b.priority.cmp(&a.priority).then(ia.cmp(ib)));
    ordered
}

fn resolve_with<'r>(
    ordered: &[(usize, &'r Rule)],
    cache: &FormulaCache,
    feature: &Feature,
) -> Option<&'r Rule> {
    ordered
        .iter()
        .map(|(_, rule)| *rule)
        .find(|rule| cache.matches(rule, feature))
}

/// Resolve the winning rule for one feature.
///
/// Disabled rules never participate. The rest are tried by priority
/// descending (ties by authored order) and the first whose predicate holds
/// wins. `None` when no rule matches.
#[must_use]
pub fn resolve<'r>(rules: &'r [Rule], feature: &Feature) -> Option<&'r Rule> {
    let cache = FormulaCache::prepare(rules);
    resolve_with(&evaluation_order(rules), &cache, feature)
}

/// Assign archetypes to a batch of features.
///
/// The result maps feature id to archetype. Features no rule matched are
/// absent rather than mapped to a sentinel.
#[must_use]
pub fn assign_all(rules: &[Rule], features: &[Feature]) -> HashMap<String, String> {
    let cache = FormulaCache::prepare(rules);
    let ordered = evaluation_order(rules);
    features
        .iter()
        .filter_map(|feature| {
            resolve_with(&ordered, &cache, feature)
                .map(|rule| (feature.id().to_owned(), rule.archetype.clone()))
        })
        .collect()
}

/// Parallel [`assign_all`] over the feature slice; identical output.
#[cfg(feature = "parallel")]
#[must_use]
pub fn par_assign_all(rules: &[Rule], features: &[Feature]) -> HashMap<String, String> {
    use rayon::prelude::*;

    let cache = FormulaCache::prepare(rules);
    let ordered = evaluation_order(rules);
    features
        .par_iter()
        .filter_map(|feature| {
            resolve_with(&ordered, &cache, feature)
                .map(|rule| (feature.id().to_owned(), rule.archetype.clone()))
        })
        .collect()
}

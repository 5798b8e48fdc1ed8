//! The sandboxed formula language for custom rules.
//!
//! A formula is a single boolean expression over one feature's fields,
//! compiled through three gates before it can run: source caps (length and
//! bracket nesting), the dangerous-construct screen, and an explicit grammar
//! that only admits literals, feature access, seven helpers and the
//! comparison and logic operators. What comes out is a closed expression
//! tree; evaluation walks it with no access to anything but the feature.

mod ast;
mod deny;
mod error;
mod eval;
mod grammar;

pub use error::FormulaError;

use winnow::Parser;

use crate::types::Feature;

use ast::Expr;

/// Longest accepted formula source, in bytes.
pub const MAX_SOURCE_LEN: usize = 8 * 1024;

/// Deepest accepted `(` / `[` nesting.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A compiled, screened formula ready to evaluate against features.
///
/// ```
/// use archon::{Feature, Formula};
///
/// let formula = Formula::compile(r#"toNumber(feature["height"]) > 20"#)?;
/// let tall = Feature::new("b-1").set("height", 25_i64);
/// assert!(formula.evaluate(&tall));
/// # Ok::<(), archon::FormulaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Formula {
    ast: Expr,
}

impl Formula {
    /// Compile formula source: caps, then the dangerous-construct screen,
    /// then the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] when the source is oversized, nests too
    /// deeply, mentions a forbidden construct, or fails to parse.
    pub fn compile(source: &str) -> Result<Self, FormulaError> {
        if source.len() > MAX_SOURCE_LEN {
            return Err(FormulaError::TooLong {
                limit: MAX_SOURCE_LEN,
            });
        }
        deny::screen(source)?;
        if nesting_depth(source) > MAX_NESTING_DEPTH {
            return Err(FormulaError::TooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        let ast = grammar::formula
            .parse(source)
            .map_err(|e| FormulaError::Syntax {
                message: e.to_string(),
            })?;
        Ok(Self { ast })
    }

    /// Evaluate against one feature. Never fails: a spent evaluation budget
    /// reads as no match.
    #[must_use]
    pub fn evaluate(&self, feature: &Feature) -> bool {
        eval::evaluate(&self.ast, feature)
    }
}

/// Authoring-time check of formula source. Compiles without evaluating.
///
/// # Errors
///
/// Returns the same [`FormulaError`] values as [`Formula::compile`].
pub fn validate_formula(source: &str) -> Result<(), FormulaError> {
    Formula::compile(source).map(|_| ())
}

/// Compile-and-run convenience for one-off evaluation. Any compile failure
/// reads as no match.
#[must_use]
pub fn evaluate_formula(source: &str, feature: &Feature) -> bool {
    match Formula::compile(source) {
        Ok(formula) => formula.evaluate(feature),
        Err(error) => {
            tracing::warn!(%error, "formula rejected at evaluation time");
            false
        }
    }
}

/// Deepest simultaneous `(` / `[` nesting, ignoring brackets inside string
/// literals.
fn nesting_depth(source: &str) -> usize {
    let mut depth = 0_usize;
    let mut deepest = 0_usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in source.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

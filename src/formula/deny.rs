//! Dangerous-construct screen.
//!
//! The grammar alone already makes these constructs unreachable; the screen
//! runs first anyway so hostile source is refused by name before any parsing,
//! and so the rejection survives future grammar changes.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::error::FormulaError;

/// Forbidden constructs, matched case-insensitively on the raw source.
/// String literals are not exempt: a formula mentioning `this` anywhere is
/// refused outright.
const PATTERNS: [(&str, &str); 20] = [
    (r"(?i)\beval\b", "eval"),
    (r"(?i)\bfunction\b", "Function"),
    (r"(?i)\bnew\s+function", "new Function"),
    (r"(?i)\bwindow\b", "window"),
    (r"(?i)\bdocument\b", "document"),
    (r"(?i)\blocalstorage\b", "localStorage"),
    (r"(?i)\bsessionstorage\b", "sessionStorage"),
    (r"(?i)\bxmlhttprequest\b", "XMLHttpRequest"),
    (r"(?i)\bfetch\b", "fetch"),
    (r"(?i)\bimport\b", "import"),
    (r"(?i)\brequire\b", "require"),
    (r"(?i)\b__proto__\b", "__proto__"),
    (r"(?i)\bconstructor\b", "constructor"),
    (r"(?i)\bprototype\b", "prototype"),
    (r"(?i)\.\s*apply\s*\(", ".apply("),
    (r"(?i)\.\s*call\s*\(", ".call("),
    (r"(?i)\.\s*bind\s*\(", ".bind("),
    (r"(?i)\bthis\b", "this"),
    (r"(?i)\bglobal\b", "global"),
    (r"(?i)\bprocess\b", "process"),
];

static DENYLIST: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .map(|&(pattern, construct)| {
            let regex = Regex::new(pattern).expect("denylist pattern compiles");
            (regex, construct)
        })
        .collect()
});

/// Scan raw source for forbidden constructs. Runs before the grammar.
pub(super) fn screen(source: &str) -> Result<(), FormulaError> {
    for (regex, construct) in DENYLIST.iter() {
        if regex.is_match(source) {
            return Err(FormulaError::Dangerous {
                construct: (*construct).to_owned(),
            });
        }
    }
    Ok(())
}

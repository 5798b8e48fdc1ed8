use thiserror::Error;

/// Why a formula was rejected before evaluation.
///
/// Rejection is an authoring-time outcome; at resolution time a rejected
/// formula simply never matches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// The source referenced a forbidden construct. Reported before any
    /// parsing happens.
    #[error("formula contains dangerous construct `{construct}`")]
    Dangerous { construct: String },

    /// The source is not a valid expression in the formula grammar.
    #[error("syntax error: {message}")]
    Syntax { message: String },

    /// The source exceeds the accepted length.
    #[error("formula longer than {limit} bytes")]
    TooLong { limit: usize },

    /// Brackets nest deeper than the accepted limit.
    #[error("formula nesting deeper than {limit} levels")]
    TooDeep { limit: usize },
}

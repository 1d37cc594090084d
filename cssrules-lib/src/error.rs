use thiserror::Error;

/// Failures raised by a stylesheet host while inserting or rewriting a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule text was rejected by the CSS parser.
    #[error("invalid CSS `{css}`: {reason}")]
    Syntax { css: String, reason: String },

    #[error("rule index {index} out of bounds (sheet has {len} rules)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Exception thrown by the browser's CSSOM.
    #[error("stylesheet host error: {0}")]
    Host(String),
}

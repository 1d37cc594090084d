use crate::error::RuleError;
use crate::style::declarations::DeclarationMap;

/// An ordered list of style rules owned by some host, modelled on the CSSOM
/// `CSSStyleSheet` primitives.
///
/// Indices are positions in the current rule list; inserting or deleting a
/// rule shifts every rule after it.
pub trait StyleSheet {
    /// Number of rules currently in the sheet.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selector text of the rule at `index`, as the host serializes it.
    fn selector_text(&self, index: usize) -> Option<String>;

    /// Declarations of the rule at `index`.
    fn declarations(&self, index: usize) -> Option<DeclarationMap>;

    /// Insert one complete rule (`selector { body }`) at `index` and return the
    /// index it landed at.
    fn insert_rule(&mut self, css_text: &str, index: usize) -> Result<usize, RuleError>;

    /// Replace the body of the rule at `index`, keeping its position.
    fn set_declarations(&mut self, index: usize, body: &str) -> Result<(), RuleError>;

    fn delete_rule(&mut self, index: usize) -> Result<(), RuleError>;
}

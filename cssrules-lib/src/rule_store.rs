use crate::error::RuleError;
use crate::style::declarations::{parse_declarations, DeclarationMap};
use crate::style::owned_css::OwnedStyleSheet;
use crate::style::sheet::StyleSheet;
use log::{debug, warn};
use std::collections::HashMap;

/// What was last written for a selector through [`RuleStore::set_rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub selector: String,
    pub rule_text: String,
    /// Position the host assigned to the rule.
    pub index: usize,
    /// Selector text the host reported for the rule at write time.
    pub sheet_selector: String,
    /// Declarations the host reported for the rule at write time.
    pub sheet_declarations: DeclarationMap,
}

/// Owns one stylesheet and reads/writes its rules by selector.
#[derive(Debug)]
pub struct RuleStore<S: StyleSheet> {
    sheet: S,
    defined_rules: HashMap<String, RuleRecord>,
}

impl RuleStore<OwnedStyleSheet> {
    /// A store over a fresh, empty in-memory stylesheet.
    pub fn in_memory() -> Self {
        RuleStore::new(OwnedStyleSheet::new())
    }
}

impl Default for RuleStore<OwnedStyleSheet> {
    fn default() -> Self {
        RuleStore::in_memory()
    }
}

#[cfg(feature = "web")]
impl RuleStore<crate::style::web_sheet::DocumentStyleSheet> {
    /// A store over a new `<style>` element appended to the current document.
    pub fn attach() -> Result<Self, RuleError> {
        Ok(RuleStore::new(
            crate::style::web_sheet::DocumentStyleSheet::attach()?,
        ))
    }
}

impl<S: StyleSheet> RuleStore<S> {
    pub fn new(sheet: S) -> Self {
        RuleStore {
            sheet,
            defined_rules: HashMap::new(),
        }
    }

    /// Split a declaration block into a property => value map.
    pub fn get_rule_as_object(&self, css_text: &str) -> DeclarationMap {
        parse_declarations(css_text)
    }

    /// Declarations of the last rule in the sheet whose selector text equals
    /// `selector`, or an empty map.
    ///
    /// Later rules shadow earlier ones with the same selector, as in the cascade.
    pub fn get_rule(&self, selector: &str) -> DeclarationMap {
        self.find_last(selector)
            .and_then(|index| self.sheet.declarations(index))
            .unwrap_or_default()
    }

    /// Write `rule_text` as the body of the rule for `selector`.
    ///
    /// A selector set before is rewritten in place; otherwise a new rule is
    /// appended. The record is only updated once the sheet accepted the write.
    pub fn set_rule(&mut self, selector: &str, rule_text: &str) -> Result<(), RuleError> {
        let live_index = match self.defined_rules.get(selector) {
            Some(record) if self.is_live(record) => Some(record.index),
            Some(record) => {
                warn!(
                    "rule for `{}` is no longer at index {}; appending a new rule",
                    selector, record.index
                );
                None
            }
            None => None,
        };

        let index = match live_index {
            Some(index) => {
                self.sheet.set_declarations(index, rule_text)?;
                index
            }
            None => self.add_rule(selector, rule_text)?,
        };

        let sheet_selector = self.sheet.selector_text(index).unwrap_or_default();
        let sheet_declarations = self.sheet.declarations(index).unwrap_or_default();
        self.defined_rules.insert(
            selector.to_string(),
            RuleRecord {
                selector: selector.to_string(),
                rule_text: rule_text.to_string(),
                index,
                sheet_selector,
                sheet_declarations,
            },
        );
        Ok(())
    }

    /// Append `selector { rule_text }` to the sheet and return its index.
    ///
    /// Does not record the rule; repeated calls with one selector add
    /// duplicates.
    pub fn add_rule(&mut self, selector: &str, rule_text: &str) -> Result<usize, RuleError> {
        let new_index = self.sheet.len();
        let css_text = format!("{}{{{}}}", selector, rule_text);
        let index = self.sheet.insert_rule(&css_text, new_index)?;
        debug!("added `{}` at index {}", selector, index);
        Ok(index)
    }

    pub fn record(&self, selector: &str) -> Option<&RuleRecord> {
        self.defined_rules.get(selector)
    }

    pub fn records(&self) -> impl Iterator<Item = &RuleRecord> {
        self.defined_rules.values()
    }

    /// Number of rules in the underlying sheet, including ones not set
    /// through this store.
    pub fn len(&self) -> usize {
        self.sheet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.is_empty()
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Direct access to the sheet. Rules inserted, deleted or rewritten here
    /// can move the rules the store recorded; `set_rule` re-adds a selector
    /// whose recorded index no longer holds the same selector and body. A
    /// foreign rule identical to the recorded one is indistinguishable from it.
    pub fn sheet_mut(&mut self) -> &mut S {
        &mut self.sheet
    }

    pub fn into_sheet(self) -> S {
        self.sheet
    }

    fn find_last(&self, selector: &str) -> Option<usize> {
        (0..self.sheet.len())
            .rev()
            .find(|&i| self.sheet.selector_text(i).as_deref() == Some(selector))
    }

    /// The rule at the recorded index still looks the way this store left it.
    fn is_live(&self, record: &RuleRecord) -> bool {
        self.sheet.selector_text(record.index).as_deref() == Some(record.sheet_selector.as_str())
            && self.sheet.declarations(record.index).as_ref() == Some(&record.sheet_declarations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decls(pairs: &[(&str, &str)]) -> DeclarationMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_set_then_get() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();
        assert_eq!(store.get_rule(".a"), decls(&[("color", "blue")]));
    }

    #[test]
    fn test_set_twice_overwrites_in_place() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();
        store.set_rule(".a", "color:green").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_rule(".a"), decls(&[("color", "green")]));
        let record = store.record(".a").unwrap();
        assert_eq!(record.index, 0);
        assert_eq!(record.rule_text, "color:green");
    }

    #[test]
    fn test_unknown_selector_is_empty() {
        let store = RuleStore::in_memory();
        assert!(store.get_rule("nonexistent").is_empty());
    }

    #[test]
    fn test_later_duplicate_shadows_earlier() {
        let mut store = RuleStore::in_memory();
        assert_eq!(store.add_rule(".a", "color:red").unwrap(), 0);
        assert_eq!(store.add_rule(".a", "color:blue").unwrap(), 1);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_rule(".a"), decls(&[("color", "blue")]));
        assert!(store.record(".a").is_none());
    }

    #[test]
    fn test_get_rule_as_object() {
        let store = RuleStore::in_memory();
        assert_eq!(
            store.get_rule_as_object("color:red;font-size:12px"),
            decls(&[("color", "red"), ("font-size", "12px")])
        );
    }
}

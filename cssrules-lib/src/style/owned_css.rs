// src/style/owned_css.rs (the in-memory stylesheet host)
use crate::error::RuleError;
use crate::style::declarations::DeclarationMap;
use crate::style::rule_parser::parse_rule;
use crate::style::sheet::StyleSheet;
use log::debug;
use std::fmt;

/// A fully-owned CSS stylesheet: an ordered list of style rules.
#[derive(Debug, Default, Clone)]
pub struct OwnedStyleSheet {
    pub rules: Vec<OwnedRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRule {
    /// e.g. "div", ".red", "#header", ".a, .b"
    pub selector_text: String,
    /// Declarations in source order.
    pub declarations: Vec<OwnedDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDeclaration {
    pub property: String,
    pub value: String,
}

impl OwnedStyleSheet {
    pub fn new() -> Self {
        OwnedStyleSheet { rules: Vec::new() }
    }

    pub fn rule(&self, index: usize) -> Option<&OwnedRule> {
        self.rules.get(index)
    }

    /// Valid indices are `0..bound`.
    fn check_index(&self, index: usize, bound: usize) -> Result<(), RuleError> {
        if index >= bound {
            return Err(RuleError::IndexOutOfBounds {
                index,
                len: self.rules.len(),
            });
        }
        Ok(())
    }
}

impl OwnedRule {
    /// Property => value view; a property repeated in the body keeps its last value.
    pub fn declaration_map(&self) -> DeclarationMap {
        self.declarations
            .iter()
            .map(|decl| (decl.property.clone(), decl.value.clone()))
            .collect()
    }
}

impl StyleSheet for OwnedStyleSheet {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn selector_text(&self, index: usize) -> Option<String> {
        self.rules.get(index).map(|rule| rule.selector_text.clone())
    }

    fn declarations(&self, index: usize) -> Option<DeclarationMap> {
        self.rules.get(index).map(OwnedRule::declaration_map)
    }

    fn insert_rule(&mut self, css_text: &str, index: usize) -> Result<usize, RuleError> {
        // Inserting at `len()` appends.
        self.check_index(index, self.rules.len() + 1)?;
        let rule = parse_rule(css_text)?;
        debug!("inserting rule `{}` at {}", rule.selector_text, index);
        self.rules.insert(index, rule);
        Ok(index)
    }

    fn set_declarations(&mut self, index: usize, body: &str) -> Result<(), RuleError> {
        self.check_index(index, self.rules.len())?;
        let selector = &self.rules[index].selector_text;
        let parsed = parse_rule(&format!("{}{{{}}}", selector, body))?;
        debug!("rewriting rule `{}` at {}", selector, index);
        self.rules[index].declarations = parsed.declarations;
        Ok(())
    }

    fn delete_rule(&mut self, index: usize) -> Result<(), RuleError> {
        self.check_index(index, self.rules.len())?;
        let removed = self.rules.remove(index);
        debug!("deleted rule `{}` at {}", removed.selector_text, index);
        Ok(())
    }
}

impl fmt::Display for OwnedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector_text)?;
        for decl in &self.declarations {
            write!(f, " {}: {};", decl.property, decl.value)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for OwnedStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

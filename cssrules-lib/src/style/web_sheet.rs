use crate::error::RuleError;
use crate::style::declarations::DeclarationMap;
use crate::style::sheet::StyleSheet;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleRule, CssStyleSheet, HtmlStyleElement};

/// The `CSSStyleSheet` of a `<style>` element this crate appended to `<head>`.
#[derive(Debug)]
pub struct DocumentStyleSheet {
    element: HtmlStyleElement,
    sheet: CssStyleSheet,
}

impl DocumentStyleSheet {
    /// Create an empty `<style>` element in the current document's head.
    pub fn attach() -> Result<Self, RuleError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| RuleError::Host("no document available".to_string()))?;
        let head = document
            .head()
            .ok_or_else(|| RuleError::Host("no <head> element found in document".to_string()))?;

        let element: HtmlStyleElement = document
            .create_element("style")
            .map_err(host_error)?
            .dyn_into()
            .map_err(|_| RuleError::Host("created element is not <style>".to_string()))?;
        // WebKit leaves `.sheet` unset for a style element without a text child.
        element
            .append_child(&document.create_text_node(""))
            .map_err(host_error)?;
        head.append_child(&element).map_err(host_error)?;

        let sheet: CssStyleSheet = element
            .sheet()
            .ok_or_else(|| RuleError::Host("<style> element has no sheet".to_string()))?
            .dyn_into()
            .map_err(|_| RuleError::Host("sheet is not a CSSStyleSheet".to_string()))?;

        debug!("attached dedicated <style> element");
        Ok(DocumentStyleSheet { element, sheet })
    }

    pub fn element(&self) -> &HtmlStyleElement {
        &self.element
    }

    fn style_rule(&self, index: usize) -> Option<CssStyleRule> {
        self.sheet
            .css_rules()
            .ok()?
            .item(u32::try_from(index).ok()?)?
            .dyn_into::<CssStyleRule>()
            .ok()
    }
}

impl StyleSheet for DocumentStyleSheet {
    fn len(&self) -> usize {
        self.sheet
            .css_rules()
            .map(|rules| rules.length() as usize)
            .unwrap_or(0)
    }

    fn selector_text(&self, index: usize) -> Option<String> {
        self.style_rule(index).map(|rule| rule.selector_text())
    }

    fn declarations(&self, index: usize) -> Option<DeclarationMap> {
        let style = self.style_rule(index)?.style();
        let mut declarations = DeclarationMap::new();
        for n in 0..style.length() {
            let property = style.item(n);
            if let Ok(value) = style.get_property_value(&property) {
                declarations.insert(property, value);
            }
        }
        Some(declarations)
    }

    fn insert_rule(&mut self, css_text: &str, index: usize) -> Result<usize, RuleError> {
        let index = u32::try_from(index).map_err(|_| RuleError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        let inserted = self
            .sheet
            .insert_rule_with_index(css_text, index)
            .map_err(|e| RuleError::Syntax {
                css: css_text.to_string(),
                reason: describe(&e),
            })?;
        Ok(inserted as usize)
    }

    fn set_declarations(&mut self, index: usize, body: &str) -> Result<(), RuleError> {
        let rule = self.style_rule(index).ok_or(RuleError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        rule.style().set_css_text(body);
        Ok(())
    }

    fn delete_rule(&mut self, index: usize) -> Result<(), RuleError> {
        let index = u32::try_from(index).map_err(|_| RuleError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        self.sheet.delete_rule(index).map_err(host_error)
    }
}

fn host_error(e: JsValue) -> RuleError {
    RuleError::Host(describe(&e))
}

fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

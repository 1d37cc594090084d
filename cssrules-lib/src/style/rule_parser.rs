use crate::error::RuleError;
use crate::style::owned_css::{OwnedDeclaration, OwnedRule};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::rules::{style::StyleRule, CssRule};
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};
use lightningcss::traits::ToCss;

/// Parse exactly one style rule (`selector { body }`) and convert it to an
/// owned rule.
///
/// LightningCSS runs without error recovery, so an invalid selector or a
/// malformed declaration rejects the whole text. The selector and property
/// names come back in LightningCSS's serialization; the declaration values are
/// kept as written, minus comments and any `!important` flag.
pub fn parse_rule(css_text: &str) -> Result<OwnedRule, RuleError> {
    let sheet = LightningStyleSheet::parse(css_text, ParserOptions::default())
        .map_err(|e| syntax_error(css_text, e.to_string()))?;

    let style_rule = match sheet.rules.0.as_slice() {
        [CssRule::Style(style_rule)] => style_rule,
        [_] => return Err(syntax_error(css_text, "expected a style rule")),
        rules => {
            return Err(syntax_error(
                css_text,
                format!("expected exactly one rule, found {}", rules.len()),
            ))
        }
    };

    if !style_rule.rules.0.is_empty() {
        return Err(syntax_error(css_text, "nested rules are not supported"));
    }

    let selector_text = selector_text(style_rule)
        .ok_or_else(|| syntax_error(css_text, "selector could not be serialized"))?;

    let body = split_rules(css_text).first().map_or("", |source| source.body);
    let declarations = convert_declarations(&style_rule.declarations, scan_declarations(body));

    Ok(OwnedRule {
        selector_text,
        declarations,
    })
}

/// Serialize every selector of the list and join them the way the CSSOM
/// reports `selectorText`.
fn selector_text(style_rule: &StyleRule<'_>) -> Option<String> {
    let mut selectors_vec = Vec::new();
    for selector in &style_rule.selectors.0 {
        selectors_vec.push(selector.to_css_string(Default::default()).ok()?);
    }
    Some(selectors_vec.join(", "))
}

/// A declaration as scanned from the rule body, before LightningCSS names it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawDeclaration {
    property: String,
    value: String,
    important: bool,
}

/// Pair each scanned declaration with its parsed counterpart.
///
/// LightningCSS keeps normal and `!important` declarations in separate lists,
/// each in source order, so the scanned entries are matched against the list
/// their flag selects. The property name comes from the parsed declaration.
fn convert_declarations(
    block: &DeclarationBlock<'_>,
    raw: Vec<RawDeclaration>,
) -> Vec<OwnedDeclaration> {
    let mut normal = block.declarations.iter();
    let mut important = block.important_declarations.iter();

    raw.into_iter()
        .map(|decl| {
            let parsed = if decl.important {
                important.next()
            } else {
                normal.next()
            };
            let property = match parsed {
                Some(property) => property_name(property.property_id().name(), &decl.property),
                None => decl.property,
            };
            OwnedDeclaration {
                property,
                value: decl.value,
            }
        })
        .collect()
}

/// LightningCSS drops the vendor prefix from `name()`; put back the one the
/// author wrote.
fn property_name(name: &str, raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    match lower.strip_suffix(&name.to_ascii_lowercase()) {
        Some(prefix) if prefix.starts_with('-') && !lower.starts_with("--") => {
            format!("{}{}", prefix, name)
        }
        _ => name.to_string(),
    }
}

/// Split a rule body into declarations.
///
/// `;` inside quoted strings, parentheses or brackets does not end a
/// declaration, and comments are dropped. Property and value are trimmed, and
/// a trailing `!important` is removed from the value and kept as a flag.
fn scan_declarations(body: &str) -> Vec<RawDeclaration> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            current.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            ';' if depth == 0 => fragments.push(std::mem::take(&mut current)),
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    fragments.push(current);

    fragments
        .iter()
        .filter_map(|fragment| {
            let (property, value) = fragment.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            let (value, important) = strip_important(value.trim());
            Some(RawDeclaration {
                property: property.to_string(),
                value: value.to_string(),
                important,
            })
        })
        .collect()
}

fn strip_important(value: &str) -> (&str, bool) {
    const IMPORTANT: &str = "important";
    let Some(split) = value.len().checked_sub(IMPORTANT.len()) else {
        return (value, false);
    };
    match (value.get(..split), value.get(split..)) {
        (Some(rest), Some(flag)) if flag.eq_ignore_ascii_case(IMPORTANT) => {
            match rest.trim_end().strip_suffix('!') {
                Some(rest) => (rest.trim_end(), true),
                None => (value, false),
            }
        }
        _ => (value, false),
    }
}

/// One top-level `selector { body }` block as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSource<'a> {
    pub selector: &'a str,
    pub body: &'a str,
}

/// Split a stylesheet into its top-level blocks, in source order, without
/// validating them.
///
/// Braces inside quoted strings, parentheses or attribute selectors do not
/// open or close a block, and comments before a selector are dropped. An
/// unclosed last block runs to the end of the input, as CSS allows.
pub fn split_rules(css_text: &str) -> Vec<RuleSource<'_>> {
    let mut rules = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut braces = 0usize;
    let mut selector_start = 0;
    let mut body_start = 0;
    let mut chars = css_text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if let Some(q) = quote {
            if ch == '\\' {
                chars.next();
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '/' if matches!(chars.peek(), Some(&(_, '*'))) => {
                chars.next();
                let mut end = css_text.len();
                let mut prev = ' ';
                for (j, c) in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        end = j + 1;
                        break;
                    }
                    prev = c;
                }
                if braces == 0 && css_text[selector_start..i].trim().is_empty() {
                    selector_start = end;
                }
            }
            '"' | '\'' => quote = Some(ch),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '{' if depth == 0 => {
                if braces == 0 {
                    body_start = i + 1;
                }
                braces += 1;
            }
            '}' if depth == 0 && braces > 0 => {
                braces -= 1;
                if braces == 0 {
                    rules.push(RuleSource {
                        selector: css_text[selector_start..body_start - 1].trim(),
                        body: &css_text[body_start..i],
                    });
                    selector_start = i + 1;
                }
            }
            _ => {}
        }
    }

    if braces > 0 {
        rules.push(RuleSource {
            selector: css_text[selector_start..body_start - 1].trim(),
            body: &css_text[body_start..],
        });
    }
    rules
}

fn syntax_error(css: &str, reason: impl Into<String>) -> RuleError {
    RuleError::Syntax {
        css: css.to_string(),
        reason: reason.into(),
    }
}

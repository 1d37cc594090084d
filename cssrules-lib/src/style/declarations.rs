use std::collections::HashMap;

/// Property => value, e.g. "color" => "red".
pub type DeclarationMap = HashMap<String, String>;

/// Split a declaration block such as `"color:red;font-size:12px"` into a
/// property => value map.
///
/// Each `;`-separated fragment is split on its first `:`, and both sides are
/// kept exactly as written, whitespace included. Fragments without a `:` are
/// skipped, so malformed input gives a partial or empty map instead of an
/// error. Nothing is validated; a later property overwrites an earlier one.
pub fn parse_declarations(css_text: &str) -> DeclarationMap {
    css_text
        .split(';')
        .filter_map(|fragment| fragment.split_once(':'))
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}

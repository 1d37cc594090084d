use cssrules_lib::{parse_declarations, DeclarationMap, RuleError, RuleStore, StyleSheet};

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decls(pairs: &[(&str, &str)]) -> DeclarationMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn count_rules(store: &RuleStore<cssrules_lib::OwnedStyleSheet>, selector: &str) -> usize {
        (0..store.len())
            .filter(|&i| store.sheet().selector_text(i).as_deref() == Some(selector))
            .count()
    }

    #[test]
    fn test_parse_declarations() {
        assert_eq!(
            parse_declarations("color:red;font-size:12px"),
            decls(&[("color", "red"), ("font-size", "12px")])
        );
        assert_eq!(parse_declarations("color:red;;bogus"), decls(&[("color", "red")]));
    }

    #[test]
    fn test_set_rule_never_duplicates() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();
        store.set_rule(".b", "color:red").unwrap();
        store.set_rule(".a", "color:green").unwrap();

        assert_eq!(count_rules(&store, ".a"), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_rule(".a"), decls(&[("color", "green")]));
        assert_eq!(store.get_rule(".b"), decls(&[("color", "red")]));
    }

    #[test]
    fn test_set_rule_after_add_rule_shadows() {
        let mut store = RuleStore::in_memory();
        store.add_rule(".a", "color:red").unwrap();
        // Not recorded by add_rule, so set_rule appends its own rule.
        store.set_rule(".a", "color:blue").unwrap();

        assert_eq!(count_rules(&store, ".a"), 2);
        assert_eq!(store.get_rule(".a"), decls(&[("color", "blue")]));
        assert_eq!(store.record(".a").unwrap().index, 1);
    }

    #[test]
    fn test_add_rule_rejects_empty_selector() {
        let mut store = RuleStore::in_memory();
        assert!(matches!(
            store.add_rule("", "color:red"),
            Err(RuleError::Syntax { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_set_rule_keeps_previous_state() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();

        let result = store.set_rule(".a", "color:red} .b{color:red");
        assert!(result.is_err());
        assert_eq!(store.get_rule(".a"), decls(&[("color", "blue")]));
        assert_eq!(store.record(".a").unwrap().rule_text, "color:blue");
        assert_eq!(store.len(), 1);

        // A failed first write leaves no record behind.
        assert!(store.set_rule("", "color:red").is_err());
        assert!(store.record("").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stale_index_does_not_clobber_other_rule() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();
        store.set_rule(".b", "color:red").unwrap();

        // Rule `.a` disappears behind the store's back; `.b` slides to index 0.
        store.sheet_mut().delete_rule(0).unwrap();

        store.set_rule(".a", "color:green").unwrap();

        assert_eq!(store.get_rule(".b"), decls(&[("color", "red")]));
        assert_eq!(store.get_rule(".a"), decls(&[("color", "green")]));
        assert_eq!(store.record(".a").unwrap().index, 1);
    }

    #[test]
    fn test_foreign_rule_with_same_selector_is_not_overwritten() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();

        // Another `.a` lands at the recorded index; the store's rule moves to 1.
        store.sheet_mut().insert_rule(".a{color:red}", 0).unwrap();

        store.set_rule(".a", "color:green").unwrap();

        assert_eq!(store.sheet().declarations(0), Some(decls(&[("color", "red")])));
        assert_eq!(store.get_rule(".a"), decls(&[("color", "green")]));
        assert_eq!(store.record(".a").unwrap().index, 2);
    }

    #[test]
    fn test_rule_bodies_read_back_like_a_cssom() {
        let mut store = RuleStore::in_memory();
        store
            .set_rule(
                ".a",
                r#"content: "a;b"; /* note */ margin: 0; color: red !important"#,
            )
            .unwrap();

        assert_eq!(
            store.get_rule(".a"),
            decls(&[("content", r#""a;b""#), ("margin", "0"), ("color", "red")])
        );
    }

    #[test]
    fn test_records_track_every_set_selector() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();
        store.set_rule("#main > p", "margin:0").unwrap();

        let mut selectors: Vec<_> = store.records().map(|r| r.selector.as_str()).collect();
        selectors.sort();
        assert_eq!(selectors, vec!["#main > p", ".a"]);
        assert_eq!(store.record("#main > p").unwrap().sheet_selector, "#main > p");
        assert_eq!(store.get_rule("#main > p"), decls(&[("margin", "0")]));
    }

    #[test]
    fn test_into_sheet_prints_rules() {
        let mut store = RuleStore::in_memory();
        store.set_rule(".a", "color:blue").unwrap();
        store.add_rule("p", "font-size:12px").unwrap();

        assert_eq!(
            store.into_sheet().to_string(),
            ".a { color: blue; }\np { font-size: 12px; }\n"
        );
    }
}

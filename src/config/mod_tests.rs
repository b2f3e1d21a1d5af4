use super::*;

fn sample() -> Config {
    from_toml_str(
        r#"
        [style]
        [style.MaxLineLength]
        active = true
        maxLineLength = 100
        warnRatio = 0.8
        values = ["TODO:", "FIXME:"]
        label = "line length"
        "#,
    )
    .unwrap()
}

#[test]
fn sub_config_returns_nested_scope() {
    let config = sample();
    let rule = config.sub_config("style").sub_config("MaxLineLength");

    assert!(rule.value_or_default("active", false));
    assert_eq!(rule.value_or_default("maxLineLength", 120_usize), 100);
}

#[test]
fn sub_config_missing_key_yields_empty_scope() {
    let config = sample();
    let absent = config.sub_config("complexity").sub_config("LongMethod");

    assert!(!absent.value_or_default("active", false));
    assert_eq!(absent.value_or_default("maxLines", 60_usize), 60);
}

#[test]
fn sub_config_on_non_table_value_yields_empty_scope() {
    let config = sample();
    let scoped = config.sub_config("style").sub_config("MaxLineLength");

    // "active" exists but is a bool, not a table
    let nested = scoped.sub_config("active");
    assert_eq!(
        nested.value_or_default("anything", "fallback".to_string()),
        "fallback"
    );
}

#[test]
fn value_or_default_missing_key_falls_back() {
    let config = Config::empty();
    assert_eq!(config.value_or_default("threshold", 10_usize), 10);
    assert!(config.value_or_default("active", true));
}

#[test]
fn value_or_default_type_mismatch_falls_back() {
    let rule = sample().sub_config("style").sub_config("MaxLineLength");

    // maxLineLength is an integer, not a string
    assert_eq!(
        rule.value_or_default("maxLineLength", "unset".to_string()),
        "unset"
    );
    // label is a string, not a bool
    assert!(!rule.value_or_default("label", false));
}

#[test]
fn value_or_default_reads_typed_values() {
    let rule = sample().sub_config("style").sub_config("MaxLineLength");

    assert_eq!(rule.value_or_default("maxLineLength", 0_i64), 100);
    assert!((rule.value_or_default("warnRatio", 0.0_f64) - 0.8).abs() < f64::EPSILON);
    assert_eq!(
        rule.value_or_default("values", Vec::new()),
        vec!["TODO:".to_string(), "FIXME:".to_string()]
    );
    assert_eq!(
        rule.value_or_default("label", String::new()),
        "line length"
    );
}

#[test]
fn f64_accepts_integer_values() {
    let config = from_toml_str("ratio = 2").unwrap();
    assert!((config.value_or_default("ratio", 0.0_f64) - 2.0).abs() < f64::EPSILON);
}

#[test]
fn usize_rejects_negative_values() {
    let config = from_toml_str("threshold = -5").unwrap();
    assert_eq!(config.value_or_default("threshold", 10_usize), 10);
}

#[test]
fn empty_config_sub_config_is_empty() {
    let config = Config::empty();
    let nested = config.sub_config("a").sub_config("b").sub_config("c");
    assert_eq!(nested.value_or_default("depth", 0_i64), 0);
}

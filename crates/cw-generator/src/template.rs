//! `{key}` placeholder substitution.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Text substituted for a placeholder whose key has no value.
pub const MISSING_VALUE: &str = "undefined";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern compiles"));

/// Replace every `{key}` in `template` with `values[key]`.
///
/// Keys without a value render as `undefined`. Substitution is a single
/// left-to-right pass: braces inside substituted values are left alone.
pub fn format(template: &str, values: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            values
                .get(&caps[1])
                .map_or(MISSING_VALUE, String::as_str)
                .to_string()
        })
        .into_owned()
}

/// The placeholder keys of a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_each_placeholder() {
        let out = format("{a} {b}", &values(&[("a", "Foo"), ("b", "Bar")]));
        assert_eq!(out, "Foo Bar");
    }

    // Missing keys render as the literal word "undefined". This mirrors the
    // permissive substitution the tables were authored against; changing it
    // changes generated text.
    #[test]
    fn missing_key_renders_undefined() {
        assert_eq!(format("{a}", &BTreeMap::new()), "undefined");
        assert_eq!(
            format("{name} of {home}", &values(&[("name", "Ardan")])),
            "Ardan of undefined"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = format("{a}", &values(&[("a", "{b}"), ("b", "nested")]));
        assert_eq!(out, "{b}");
    }

    #[test]
    fn repeated_keys_and_surrounding_text() {
        let out = format(
            "A {age}-year-old with {hair} hair; {hair}!",
            &values(&[("age", "34"), ("hair", "silver")]),
        );
        assert_eq!(out, "A 34-year-old with silver hair; silver!");
    }

    #[test]
    fn empty_braces_are_left_alone() {
        assert_eq!(format("{} {x", &BTreeMap::new()), "{} {x");
    }

    #[test]
    fn placeholders_in_order() {
        assert_eq!(placeholders("{name} {surname} {name}"), vec!["name", "surname", "name"]);
        assert!(placeholders("no braces").is_empty());
    }
}

//! Singularization of English nouns.
//!
//! Rules are tried in declaration order and the **last** matching rule wins,
//! so more specific rules are listed after the general ones they refine.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
];

/// (singular, plural) pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("goose", "geese"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
];

/// (pattern, replacement) pairs, general first.
const RULES: &[(&str, &str)] = &[
    ("s$", ""),
    ("(s|si|u)s$", "${1}s"),
    ("(n)ews$", "${1}ews"),
    ("([ti])a$", "${1}um"),
    (
        "((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)ses$",
        "${1}${2}sis",
    ),
    ("(^analy)ses$", "${1}sis"),
    ("(^analy)sis$", "${1}sis"),
    ("([^f])ves$", "${1}fe"),
    ("(hive)s$", "${1}"),
    ("(tive)s$", "${1}"),
    ("([lr])ves$", "${1}f"),
    ("([^aeiouy]|qu)ies$", "${1}y"),
    ("(s)eries$", "${1}eries"),
    ("(m)ovies$", "${1}ovie"),
    ("(x|ch|ss|sh)es$", "${1}"),
    ("([m|l])ice$", "${1}ouse"),
    ("(bus)es$", "${1}"),
    ("(o)es$", "${1}"),
    ("(shoe)s$", "${1}"),
    ("(cris|ax|test)is$", "${1}is"),
    ("(cris|ax|test)es$", "${1}is"),
    ("(octop|vir)i$", "${1}us"),
    ("(octop|vir)us$", "${1}us"),
    ("(alias|status)es$", "${1}"),
    ("(alias|status)$", "${1}"),
    ("^(ox)en", "${1}"),
    ("(vert|ind)ices$", "${1}ex"),
    ("(matr)ices$", "${1}ix"),
    ("(quiz)zes$", "${1}"),
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    RULES
        .iter()
        .filter_map(|(pattern, replacement)| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .ok()
                .map(|re| (re, *replacement))
        })
        .collect()
});

/// Convert a plural noun to its singular form.
///
/// Uncountable words and words without a matching rule are returned unchanged.
///
/// # Examples
///
/// ```
/// use shapegen_core::singularize;
///
/// assert_eq!(singularize("posts"), "post");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("series"), "series");
/// ```
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return singular.to_string();
    }

    let mut last_match = None;
    for rule in COMPILED_RULES.iter() {
        if rule.0.is_match(word) {
            last_match = Some(rule);
        }
    }

    match last_match {
        Some((re, replacement)) => re.replace_all(word, *replacement).into_owned(),
        None => word.to_string(),
    }
}

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{[^}]+\}").unwrap();
}

pub fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// Substitutes `${key}` tokens level by level: a single pass over the first
/// property map, then each ancestor's map walked outward, stopping as soon
/// as no token remains. Text exhausting the chain with a token left is
/// returned partially substituted; callers decide whether that is fatal.
pub fn fill(text: &str, chain: &[&HashMap<String, String>]) -> String {
    if !contains_placeholder(text) {
        return text.to_string();
    }

    let mut text = text.to_string();
    for properties in chain {
        for (key, value) in properties.iter() {
            text = text.replace(&format!("${{{}}}", key), value);
        }
        if !contains_placeholder(&text) {
            break;
        }
    }
    text
}

pub fn fill_opt(text: Option<String>, chain: &[&HashMap<String, String>]) -> Option<String> {
    text.map(|t| fill(&t, chain))
}

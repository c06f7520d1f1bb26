use std::sync::LazyLock;

use regex::Regex;

/// Unicode word runs. Punctuation and whitespace separate tokens.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

pub(crate) fn word_tokens(text: &str) -> Vec<&str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

pub(crate) fn join_tokens(group: &[&str]) -> String {
    group.join(" ")
}

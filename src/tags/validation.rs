use once_cell::sync::Lazy;
use regex::Regex;

/// tag names double as path segments when tags are exported, so separators and quotes are out
static FORBIDDEN_TAG_CHARACTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[/\\"']"#).unwrap());

pub const MAX_TAG_NAME_LENGTH: usize = 255;

/// checks that `name` is usable as a tag name. Sibling uniqueness is checked against the tree by the caller
pub fn is_valid_tag_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed.len() == name.len()
        && name.chars().count() <= MAX_TAG_NAME_LENGTH
        && !name.chars().any(char::is_control)
        && !FORBIDDEN_TAG_CHARACTERS.is_match(name)
}

/// case-insensitive name comparison used for sibling uniqueness
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

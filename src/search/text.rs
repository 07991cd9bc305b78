//! String helpers shared by the compiler and sort parser

use std::sync::LazyLock;

use regex::Regex;

/// Punctuation stripped from sort tokens
static SPECIAL_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"~!@#$%^&*()_+\-={}\[\]:;,.<>/|?\\]"#).unwrap());

/// True when the value is empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Removes ASCII punctuation (including `_`, `+` and `-`).
///
/// Whitespace and non-ASCII characters are left alone.
pub fn remove_special_characters(value: &str) -> String {
    SPECIAL_CHARACTERS.replace_all(value, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_remove_special_characters() {
        assert_eq!(remove_special_characters("-dueDate"), "dueDate");
        assert_eq!(remove_special_characters("+created_at"), "createdat");
        assert_eq!(remove_special_characters("%pizza%"), "pizza");
        assert_eq!(remove_special_characters("a[b]\\c|d"), "abcd");
    }

    #[test]
    fn test_remove_special_characters_keeps_letters() {
        assert_eq!(remove_special_characters("빵팟"), "빵팟");
        assert_eq!(remove_special_characters("title 2"), "title 2");
    }
}

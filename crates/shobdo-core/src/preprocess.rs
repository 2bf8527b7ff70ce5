use unicode_normalization::UnicodeNormalization;

/// Case-insensitive comparison key. NFC first so composed and decomposed
/// Bangla vowel signs fold to the same string.
pub fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Clean up text typed or pasted by the user before it is sent
pub fn normalize_input(text: &str) -> String {
    let text = text.trim();

    if text.is_empty() {
        return String::new();
    }

    let text: String = text.nfkc().collect();

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert_eq!(fold("Cat"), fold("cAT"));
        assert_eq!(fold("Über"), "über");
    }

    #[test]
    fn test_fold_bangla_normalization() {
        // "ো" precomposed vs "ে" + "া"
        let composed = "ভালো";
        let decomposed = "ভাল\u{09C7}\u{09BE}";
        assert_eq!(fold(composed), fold(decomposed));
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  She go\n to   school \r\n"), "She go to school");
        assert_eq!(normalize_input(" \n "), "");
    }
}

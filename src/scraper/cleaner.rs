// ── Text cleaners ─────────────────────────────────────────────────────────────

/// Collapse runs of whitespace (rendered cells are full of newlines and
/// indentation) and trim the ends.
/// "  Natus\n  Vincere " → "Natus Vincere"
pub fn tidy_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip everything that is not a word character from a score cell.
/// "2 (ADV)" → "2ADV" | "16" → "16"
pub fn clean_score(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Last whitespace-separated token of a pagination summary, as a count.
/// "1 - 50 of 1554" → Some(1554)
pub fn trailing_count(s: &str) -> Option<usize> {
    s.split_whitespace().last()?.parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_text() {
        assert_eq!(tidy_text("  Natus\n   Vincere  "), "Natus Vincere");
        assert_eq!(tidy_text("FaZe"), "FaZe");
        assert_eq!(tidy_text(""), "");
    }

    #[test]
    fn test_clean_score() {
        assert_eq!(clean_score("2 (ADV)"), "2ADV");
        assert_eq!(clean_score("16"), "16");
        assert_eq!(clean_score("(13)"), "13");
        assert_eq!(clean_score("de_nuke"), "de_nuke");
    }

    #[test]
    fn test_trailing_count() {
        assert_eq!(trailing_count("1 - 50 of 1554"), Some(1554));
        assert_eq!(trailing_count("0 of 0"), Some(0));
        assert_eq!(trailing_count("no numbers here"), None);
        assert_eq!(trailing_count(""), None);
    }
}

/// Canonical form for free-text comparison: surrounding whitespace removed, lower case.
pub fn normalize_text(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Equality under [`normalize_text`].
pub fn text_matches(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_text("  Amsterdam "), "amsterdam");
        assert_eq!(normalize_text("ÉÉN"), "één");
        assert!(text_matches("Paris", " paris\n"));
        assert!(!text_matches("Paris", "Pariss"));
    }
}

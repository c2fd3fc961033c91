//! Text canonicalization for pattern matching.

use super::patterns::WHITESPACE;

/// Collapse whitespace runs to one space, trim, and lowercase.
///
/// Idempotent; empty input gives an empty string.
pub fn normalize(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Notebook\t I5-10400 \n 8GB  "), "notebook i5-10400 8gb");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize("MONITOR LED 24\u{00a0}POLEGADAS"), "monitor led 24 polegadas");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "10   Notebook i5-10400 8gb ssd 256gb   R$ 2.500,00",
            "Impressora  LASER\nMonocromática",
            "ÁREA   TÉCNICA",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }
}

//! Fixed regex grammars for Brazilian tender text.
//!
//! Category recognition patterns live in [`super::registry`]; these are the
//! numeric and keyword grammars shared by every registry.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Amount patterns (Brazilian format: 1.234,56 or 1234,56)
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"\b(\d{1,3}(?:\.\d{3})+,\d{2}|\d+,\d{2})\b"
    ).unwrap();

    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        r"(?i)r\$\s*(\d{1,3}(?:\.\d{3})+,\d{2}|\d+,\d{2})\b"
    ).unwrap();

    // Words that mark a bare amount as a price field
    pub static ref PRICE_KEYWORD: Regex = Regex::new(
        r"(?i)valor|unit|estimado|pre[çc]o"
    ).unwrap();

    // Quantity patterns
    pub static ref QUANTITY_MARKER: Regex = Regex::new(
        r"(?i)\b(?:qtde|qtd|quantidade|quant|unidades|unidade|unid)[\s.:]*(\d+)\b"
    ).unwrap();

    pub static ref LEADING_NUMBER: Regex = Regex::new(
        r"^(\d+)\s"
    ).unwrap();

    // First integer of a description, e.g. a screen size
    pub static ref FIRST_NUMBER: Regex = Regex::new(
        r"\d+"
    ).unwrap();
}

/// Calendar years a tender is likely to be dated with.
pub const DOCUMENT_YEARS: std::ops::RangeInclusive<u32> = 2020..=2029;

/// Whether a numeric token reads as a document year rather than a count.
pub fn is_document_year(token: &str) -> bool {
    token.len() == 4
        && token
            .parse::<u32>()
            .map(|n| DOCUMENT_YEARS.contains(&n))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_pattern() {
        assert!(AMOUNT_PATTERN.is_match("1.234,56"));
        assert!(AMOUNT_PATTERN.is_match("2500,00"));
        assert!(!AMOUNT_PATTERN.is_match("2500"));
        assert!(!AMOUNT_PATTERN.is_match("1.234,567"));
    }

    #[test]
    fn test_currency_pattern() {
        let caps = AMOUNT_WITH_CURRENCY.captures("total R$2.500,00").unwrap();
        assert_eq!(&caps[1], "2.500,00");
        assert!(AMOUNT_WITH_CURRENCY.is_match("r$ 10,00"));
    }

    #[test]
    fn test_is_document_year() {
        assert!(is_document_year("2024"));
        assert!(!is_document_year("2019"));
        assert!(!is_document_year("2030"));
        assert!(!is_document_year("02024"));
    }
}

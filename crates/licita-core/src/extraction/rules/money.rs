//! Price extraction for Brazilian tender text.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_PATTERN, AMOUNT_WITH_CURRENCY, PRICE_KEYWORD};

/// Largest amount accepted as a price (one trillion reais). Anything
/// larger is a misread run of digits.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Price of a text block, zero when none is found.
///
/// An amount right after `R$` wins. A bare amount counts only when the block
/// mentions a price field, or when the block is nothing but the amount.
pub fn parse_price(block: &str) -> Decimal {
    if let Some(caps) = AMOUNT_WITH_CURRENCY.captures(block) {
        return parse_or_zero(&caps[1]);
    }

    if PRICE_KEYWORD.is_match(block) {
        if let Some(m) = AMOUNT_PATTERN.find(block) {
            return parse_or_zero(m.as_str());
        }
    }

    let trimmed = block.trim();
    AMOUNT_PATTERN
        .find(trimmed)
        .filter(|m| m.start() == 0 && m.end() == trimmed.len())
        .map(|m| parse_or_zero(m.as_str()))
        .unwrap_or(Decimal::ZERO)
}

/// Parse a Brazilian-formatted amount (e.g., "R$ 1.234,56" or "1234,56").
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // Periods group thousands, the comma separates decimals
    let normalized = cleaned.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized)
        .ok()
        .filter(|amount| *amount <= MAX_AMOUNT)
}

fn parse_or_zero(s: &str) -> Decimal {
    parse_brl_amount(s).unwrap_or(Decimal::ZERO)
}

/// Format amount in Brazilian style (1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return format!("{}{}", sign, s);
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{}{},{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_brl_amount() {
        assert_eq!(parse_brl_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_brl_amount("R$ 1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_brl_amount("1234,56"), Some(dec("1234.56")));
        assert_eq!(parse_brl_amount("12.345.678,90"), Some(dec("12345678.90")));
        assert_eq!(parse_brl_amount("R$"), None);
        assert_eq!(parse_brl_amount("1,2,3"), None);
    }

    #[test]
    fn test_oversized_amount_rejected() {
        assert_eq!(MAX_AMOUNT, dec("1000000000000"));
        assert_eq!(parse_brl_amount("1.000.000.000.000,00"), Some(MAX_AMOUNT));
        assert_eq!(parse_brl_amount("1.000.000.000.000,01"), None);
        assert_eq!(parse_price("r$ 70.000.000.000.000.000.000.000.000,00"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_forms() {
        assert_eq!(parse_price("R$ 1.234,56"), dec("1234.56"));
        assert_eq!(parse_price("1.234,56"), dec("1234.56"));
        assert_eq!(parse_price("r$1.234,56"), dec("1234.56"));
    }

    #[test]
    fn test_currency_marker_wins() {
        let block = "lote 3 - 1.000,00 kg notebook valor unitário r$ 2.500,00";
        assert_eq!(parse_price(block), dec("2500.00"));
    }

    #[test]
    fn test_bare_amount_needs_keyword() {
        assert_eq!(parse_price("notebook i5 2.500,00 conforme anexo"), Decimal::ZERO);
        assert_eq!(parse_price("notebook i5 valor estimado 2.500,00"), dec("2500.00"));
        assert_eq!(parse_price("preço unitário 899,90"), dec("899.90"));
    }

    #[test]
    fn test_no_price_is_zero() {
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("monitor led 24 polegadas"), Decimal::ZERO);
        assert_eq!(parse_price("valor: a definir"), Decimal::ZERO);
    }

    #[test]
    fn test_format_brl_amount() {
        assert_eq!(format_brl_amount(dec("1234.56")), "1.234,56");
        assert_eq!(format_brl_amount(dec("12345678.9")), "12.345.678,90");
        assert_eq!(format_brl_amount(dec("0")), "0,00");
        assert_eq!(format_brl_amount(dec("-500")), "-500,00");
    }
}

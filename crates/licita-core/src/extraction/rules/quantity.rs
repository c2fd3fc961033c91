//! Quantity extraction from tender item rows.

use super::patterns::{is_document_year, LEADING_NUMBER, QUANTITY_MARKER};

/// Upper bound (exclusive) for a quantity read from the start of a row.
/// Larger leading numbers are item codes or catalog references.
pub const MAX_LEADING_QUANTITY: u32 = 10_000;

/// Quantity of a normalized item row, 1 when none can be read.
///
/// An explicit marker (`qtd`, `quantidade`, `unid`) wins over a number at
/// the start of the row.
pub fn parse_quantity(line: &str) -> u32 {
    labeled(line).or_else(|| leading(line)).unwrap_or(1)
}

fn labeled(line: &str) -> Option<u32> {
    QUANTITY_MARKER.captures_iter(line).find_map(|caps| {
        let token = caps.get(1)?.as_str();
        if is_document_year(token) {
            return None;
        }
        token.parse::<u32>().ok().filter(|&n| n > 0)
    })
}

fn leading(line: &str) -> Option<u32> {
    let caps = LEADING_NUMBER.captures(line)?;
    let token = caps.get(1)?.as_str();
    if is_document_year(token) {
        return None;
    }
    token
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0 && n < MAX_LEADING_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_marker() {
        assert_eq!(parse_quantity("notebook i5 qtde: 25"), 25);
        assert_eq!(parse_quantity("notebook i5 qtd. 3"), 3);
        assert_eq!(parse_quantity("monitor 24 polegadas quantidade 40"), 40);
        assert_eq!(parse_quantity("toner hp 12 unid 8"), 8);
    }

    #[test]
    fn test_marker_beats_leading_number() {
        assert_eq!(parse_quantity("7 notebook i5 quant: 12"), 12);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(parse_quantity("10 notebook i5-10400 8gb ssd 256gb r$ 2.500,00"), 10);
        assert_eq!(parse_quantity("1 nobreak 1.5 kva"), 1);
        assert_eq!(parse_quantity("9999 mouse optico"), 9999);
    }

    #[test]
    fn test_leading_number_out_of_range() {
        assert_eq!(parse_quantity("10000 mouse optico"), 1);
        assert_eq!(parse_quantity("123456 teclado abnt2"), 1);
        assert_eq!(parse_quantity("0 teclado abnt2"), 1);
    }

    #[test]
    fn test_years_rejected() {
        assert_eq!(parse_quantity("2024 office 2021"), 1);
        assert_eq!(parse_quantity("windows 11 pro qtd 2025"), 1);
        assert_eq!(parse_quantity("2019 teclado abnt2"), 2019);
    }

    #[test]
    fn test_year_marker_falls_back_to_leading() {
        assert_eq!(parse_quantity("15 licença office qtd 2024"), 15);
    }

    #[test]
    fn test_default_quantity() {
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("notebook i5-10400"), 1);
        assert_eq!(parse_quantity("item 1.1 notebook"), 1);
    }

    #[test]
    fn test_zero_marker_rejected() {
        assert_eq!(parse_quantity("qtde 0"), 1);
    }
}

//! Parsing of the pipe-delimited daily rate table.
//!
//! ```text
//! 17.10.2026 #201
//! země|měna|množství|kód|kurz
//! Austrálie|dolar|1|AUD|14,823
//! ```
//!
//! The first line is a date stamp and the second is the column header; neither is ever
//! a data row, whatever they contain.

use crate::core::error::{SyncError, SyncResult};
use rust_decimal::Decimal;
use std::str::FromStr;

const HEADER_LINES: usize = 2;
const FIELD_COUNT: usize = 5;

/// One published rate. `rate` is the price of `amount` units in the base currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRow {
    pub country: String,
    pub title: String,
    pub amount: Decimal,
    pub code: String,
    pub rate: Decimal,
}

impl RateRow {
    /// Rate for a single unit. Only rows with a positive lot size can be divided.
    pub fn unit_rate(&self) -> SyncResult<Decimal> {
        if self.amount <= Decimal::ZERO {
            return Err(SyncError::NonPositiveLotSize {
                code: self.code.clone(),
                amount: self.amount,
            });
        }
        self.rate
            .checked_div(self.amount)
            .ok_or_else(|| SyncError::RateOverflow {
                code: self.code.clone(),
                rate: self.rate,
                amount: self.amount,
            })
    }
}

/// Lazily yields data rows in feed order. A malformed line yields an error in its
/// position; iteration may continue past it.
pub fn rows(raw: &str) -> impl Iterator<Item = SyncResult<RateRow>> + '_ {
    raw.split('\n')
        .skip(HEADER_LINES)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(parse_row)
}

/// Parses every data row, failing on the first malformed one.
pub fn parse(raw: &str) -> SyncResult<Vec<RateRow>> {
    rows(raw).collect()
}

pub fn parse_row(line: &str) -> SyncResult<RateRow> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < FIELD_COUNT {
        return Err(malformed(
            line,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    }

    let amount = parse_decimal(fields[2])
        .map_err(|e| malformed(line, format!("invalid amount '{}': {e}", fields[2].trim())))?;
    // Rates are published with a decimal comma
    let rate = parse_decimal(&fields[4].replace(',', "."))
        .map_err(|e| malformed(line, format!("invalid rate '{}': {e}", fields[4].trim())))?;
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(malformed(line, format!("negative rate '{}'", fields[4].trim())));
    }

    Ok(RateRow {
        country: fields[0].trim().to_string(),
        title: fields[1].trim().to_string(),
        amount,
        code: fields[3].trim().to_string(),
        rate,
    })
}

/// Plain `[-]digits[.digits]`. `Decimal::from_str` on its own would also take `+1`,
/// `1_000` or `.5`, none of which the feed publishes.
fn parse_decimal(field: &str) -> Result<Decimal, String> {
    let field = field.trim();
    let unsigned = field.strip_prefix('-').unwrap_or(field);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || !frac_part.is_none_or(is_digits) {
        return Err("not a plain decimal number".to_string());
    }
    Decimal::from_str(field).map_err(|e| e.to_string())
}

fn malformed(line: &str, reason: String) -> SyncError {
    SyncError::MalformedRow {
        line: line.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FEED: &str = "17.10.2026 #201\n\
země|měna|množství|kód|kurz\n\
Austrálie|dolar|1|AUD|14,823\n\
Maďarsko|forint|100|HUF|6,200\n\
USA|dolar|1|USD|22,500\n";

    #[test]
    fn test_fewer_than_two_lines_is_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("17.10.2026 #201").unwrap().is_empty());
        assert!(parse("17.10.2026 #201\nzemě|měna|množství|kód|kurz").unwrap().is_empty());
    }

    #[test]
    fn test_parse_trims_and_normalizes_comma() {
        let rows = parse("date\nheader\nAustralia | dollar | 1 | AUD | 14,823").unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.country, "Australia");
        assert_eq!(row.title, "dollar");
        assert_eq!(row.amount, dec!(1));
        assert_eq!(row.code, "AUD");
        assert_eq!(row.rate, dec!(14.823));
    }

    #[test]
    fn test_parse_preserves_order_and_skips_trailing_newline() {
        let rows = parse(FEED).unwrap();
        let codes: Vec<_> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["AUD", "HUF", "USD"]);
        assert_eq!(rows[1].amount, dec!(100));
        assert_eq!(rows[1].rate, dec!(6.2));
    }

    #[test]
    fn test_header_lines_are_discarded_even_if_they_look_like_rows() {
        let raw = "USA|dolar|1|USD|22,500\nEMU|euro|1|EUR|24,300\nJaponsko|jen|100|JPY|15,512";
        let rows = parse(raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "JPY");
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse("date\r\nheader\r\nUSA|dolar|1|USD|22.500\r\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rate, dec!(22.5));
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        let err = parse("date\nheader\nUSA|dolar|1|USD").unwrap_err();
        match err {
            SyncError::MalformedRow { line, reason } => {
                assert_eq!(line, "USA|dolar|1|USD");
                assert!(reason.contains("found 4"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_values_are_malformed() {
        let err = parse_row("USA|dolar|one|USD|22,500").unwrap_err();
        assert!(err.to_string().contains("invalid amount 'one'"), "{err}");

        let err = parse_row("USA|dolar|1|USD|n/a").unwrap_err();
        assert!(err.to_string().contains("invalid rate 'n/a'"), "{err}");
    }

    #[test]
    fn test_rows_is_lazy_past_a_bad_line() {
        let raw = "date\nheader\nUSA|dolar|1|USD|22,500\nbroken line\n";
        let mut iter = rows(raw);
        assert_eq!(iter.next().unwrap().unwrap().code, "USD");
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
        assert!(parse(raw).is_err());
    }

    #[test]
    fn test_unit_rate() {
        let row = parse_row("Maďarsko|forint|100|HUF|6,200").unwrap();
        assert_eq!(row.unit_rate().unwrap(), dec!(0.062));
        assert_eq!(row.unit_rate().unwrap(), row.rate / row.amount);

        let zero = parse_row("Nikde|nic|0|XXX|1,000").unwrap();
        assert!(matches!(
            zero.unit_rate(),
            Err(SyncError::NonPositiveLotSize { amount, .. }) if amount.is_zero()
        ));

        let negative = parse_row("Nikde|nic|-100|XXX|6,200").unwrap();
        assert!(matches!(
            negative.unit_rate(),
            Err(SyncError::NonPositiveLotSize { amount, .. }) if amount == dec!(-100)
        ));
    }

    #[test]
    fn test_unit_rate_overflow_is_not_a_zero_amount() {
        let row = RateRow {
            country: "Nikde".to_string(),
            title: "nic".to_string(),
            amount: dec!(0.0000000000000000000000000001),
            code: "XXX".to_string(),
            rate: Decimal::MAX,
        };
        let err = row.unit_rate().unwrap_err();
        assert!(matches!(err, SyncError::RateOverflow { .. }), "{err:?}");
        assert!(err.to_string().contains("overflows"), "{err}");
    }

    #[test]
    fn test_negative_rate_is_malformed() {
        let err = parse_row("Nikde|nic|1|XXX|-6,200").unwrap_err();
        assert!(err.to_string().contains("negative rate '-6,200'"), "{err}");
        assert_eq!(parse_row("Nikde|nic|1|XXX|0,000").unwrap().rate, Decimal::ZERO);
    }

    #[test]
    fn test_numbers_use_plain_decimal_notation() {
        for line in [
            "USA|dolar|+1|USD|22,500",
            "USA|dolar|1_000|USD|22,500",
            "USA|dolar|1|USD|2_2,500",
            "USA|dolar|.5|USD|22,500",
            "USA|dolar|1.|USD|22,500",
            "USA|dolar|1|USD|+22,500",
            "USA|dolar|1|USD|22,5,00",
            "USA|dolar|1e2|USD|22,500",
        ] {
            let err = parse_row(line).unwrap_err();
            assert!(
                matches!(err, SyncError::MalformedRow { .. }),
                "{line} should be malformed"
            );
        }
        let row = parse_row("USA|dolar| 1000 |USD| 22.500 ").unwrap();
        assert_eq!(row.amount, dec!(1000));
        assert_eq!(row.rate, dec!(22.5));
    }
}

use crate::model::CellValue;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Clean a raw cell: drop every thousands-separator comma, then trim.
///
/// - "1,200" -> "1200"
/// - "  N/A " -> "N/A"
/// - "1,234,567.89" -> "1234567.89"
pub fn clean_cell(s: &str) -> String {
    s.replace(',', "").trim().to_string()
}

/// Parse a cleaned cell as a number.
///
/// Accepts plain and signed decimal literals ("42", "-3.5", "+7") and
/// exponent notation ("1.5e3"). Empty strings and words such as "nan" or
/// "inf" are not numbers. Digit separators such as "1_000" are rejected.
/// Values outside `Decimal`'s 28-digit range stay unparsed.
pub fn parse_number(s: &str) -> Option<Decimal> {
    let literal = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E');
    if s.is_empty() || !s.chars().all(literal) {
        return None;
    }
    if s.contains(['e', 'E']) {
        return Decimal::from_scientific(s).ok();
    }
    Decimal::from_str(s).ok()
}

/// Normalize one column of raw cells.
///
/// Every cell is cleaned first. If every cleaned cell parses as a number the
/// whole column becomes numeric; otherwise the whole column keeps the cleaned
/// strings, including cells that would have parsed on their own.
pub fn normalize_column<S: AsRef<str>>(values: &[S]) -> Vec<CellValue> {
    let cleaned: Vec<String> = values.iter().map(|v| clean_cell(v.as_ref())).collect();

    let numbers: Option<Vec<Decimal>> = cleaned.iter().map(|c| parse_number(c)).collect();

    match numbers {
        Some(numbers) => numbers.into_iter().map(CellValue::Number).collect(),
        None => cleaned.into_iter().map(CellValue::Text).collect(),
    }
}

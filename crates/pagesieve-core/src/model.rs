use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows of string cells for one detected table region. Rows may differ in length.
pub type Grid = Vec<Vec<String>>;

/// A typed spreadsheet cell produced by column normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Number(Decimal),
    Text(String),
}

impl CellValue {
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A raw grid as returned by a table detector, tagged with its source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTable {
    pub page_number: usize,
    pub grid: Grid,
}

/// A validated table after per-column cleaning and numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// Sheet name, `Table_1`, `Table_2`, ... in validation order.
    pub name: String,
    pub page_number: usize,
    pub rows: Vec<Vec<CellValue>>,
    /// One flag per column: true when the whole column was coerced to numbers.
    pub numeric_columns: Vec<bool>,
    /// Number of empty cells added to square up ragged rows.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub padded_cells: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl NormalizedTable {
    pub fn column_count(&self) -> usize {
        self.numeric_columns.len()
    }
}

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// At least one valid table was produced.
    Tables,
    /// No page contained every keyword; detection was not run.
    NoMatchingPages,
    /// Pages matched but every detected grid was rejected by the validator.
    NoValidTables,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Tables => write!(f, "tables"),
            Outcome::NoMatchingPages => write!(f, "no matching pages"),
            Outcome::NoValidTables => write!(f, "no valid tables"),
        }
    }
}

/// Result of one extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub outcome: Outcome,
    pub matched_pages: Vec<usize>,
    /// Grids returned by the detector before validation.
    pub detected_tables: usize,
    pub tables: Vec<NormalizedTable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cell_value_display() {
        assert_eq!(CellValue::Number(dec!(1200)).to_string(), "1200");
        assert_eq!(CellValue::Number(dec!(-3.5)).to_string(), "-3.5");
        assert_eq!(CellValue::Text("N/A".into()).to_string(), "N/A");
    }

    #[test]
    fn padded_cells_omitted_when_zero() {
        let table = NormalizedTable {
            name: "Table_1".into(),
            page_number: 2,
            rows: vec![],
            numeric_columns: vec![],
            padded_cells: 0,
        };
        let json = serde_json::to_string(&table).unwrap();
        assert!(!json.contains("padded_cells"));
    }
}

pub mod validate;
pub mod values;

use crate::model::{CellValue, DetectedTable, NormalizedTable};
use tracing::debug;
use validate::is_data_table;
use values::normalize_column;

/// Sheet name for the `index`-th (1-based) validated table.
pub fn sheet_name(index: usize) -> String {
    format!("Table_{index}")
}

/// Normalize every column of a grid independently.
///
/// Ragged grids are squared up first: short rows are padded with empty
/// cells to the widest row. A padded cell is an empty string and so keeps
/// its column text-typed.
pub fn normalize_table(name: String, table: &DetectedTable) -> NormalizedTable {
    let width = table.grid.iter().map(|r| r.len()).max().unwrap_or(0);
    let height = table.grid.len();
    let mut padded_cells = 0;

    let mut columns: Vec<Vec<CellValue>> = Vec::with_capacity(width);
    for col in 0..width {
        let raw: Vec<&str> = table
            .grid
            .iter()
            .map(|row| match row.get(col) {
                Some(cell) => cell.as_str(),
                None => {
                    padded_cells += 1;
                    ""
                }
            })
            .collect();
        columns.push(normalize_column(&raw));
    }

    let numeric_columns: Vec<bool> = columns
        .iter()
        .map(|c| !c.is_empty() && c.iter().all(CellValue::is_number))
        .collect();

    // Transpose back into rows
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::with_capacity(width); height];
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }

    if padded_cells > 0 {
        debug!(table = %name, padded_cells, "padded ragged rows");
    }

    NormalizedTable {
        name,
        page_number: table.page_number,
        rows,
        numeric_columns,
        padded_cells,
    }
}

/// Drop non-data grids and normalize the rest, naming them `Table_1..N`
/// in the order they survive validation.
pub fn validate_and_normalize(tables: &[DetectedTable]) -> Vec<NormalizedTable> {
    tables
        .iter()
        .filter(|t| {
            let keep = is_data_table(&t.grid);
            if !keep {
                debug!(page = t.page_number, rows = t.grid.len(), "rejected non-data grid");
            }
            keep
        })
        .enumerate()
        .map(|(i, t)| normalize_table(sheet_name(i + 1), t))
        .collect()
}

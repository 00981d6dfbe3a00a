use pagesieve_core::model::{ExtractionResult, NormalizedTable};

pub fn format_matched_pages(pages: &[usize]) -> String {
    let list: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
    format!("Keywords found on pages: {}", list.join(", "))
}

pub fn print(result: &ExtractionResult) {
    for (i, table) in result.tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("--- Table {} (page {}) ---", i + 1, table.page_number);
        print!("{}", format_table(table));
    }
}

/// Render a table as `|`-separated, column-aligned text.
/// Numeric columns are right-aligned.
pub fn format_table(table: &NormalizedTable) -> String {
    let col_count = table.column_count();
    if col_count == 0 || table.rows.is_empty() {
        return String::new();
    }

    let text_rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    let mut col_widths = vec![1usize; col_count];
    for row in &text_rows {
        for (ci, text) in row.iter().enumerate().take(col_count) {
            col_widths[ci] = col_widths[ci].max(text.chars().count());
        }
    }

    let mut out = String::new();
    for row in &text_rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(ci, text)| {
                let width = col_widths.get(ci).copied().unwrap_or(1);
                if table.numeric_columns.get(ci).copied().unwrap_or(false) {
                    format!("{:>width$}", text, width = width)
                } else {
                    format!("{:<width$}", text, width = width)
                }
            })
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

use crate::error::SieveError;
use crate::extraction::{PageContent, TableDetector};
use crate::model::{DetectedTable, Grid};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reconstruct tables from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces, so a table
/// shows up as a run of lines that each break into several fields on wide
/// gaps. Column boundaries are the whitespace gutters shared by every line
/// of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    /// Minimum run of spaces that separates two columns.
    pub column_gap: usize,
    /// Minimum number of fields for a line to count as a table row.
    pub min_columns: usize,
    /// Minimum number of consecutive table rows to form a table.
    pub min_rows: usize,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        DetectorSettings {
            column_gap: 2,
            min_columns: 2,
            min_rows: 2,
        }
    }
}

/// Layout-text table detector, the stream-style fallback when no ruling
/// lines are available.
#[derive(Debug, Clone, Default)]
pub struct LayoutTableDetector {
    pub settings: DetectorSettings,
}

impl LayoutTableDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        LayoutTableDetector { settings }
    }
}

impl TableDetector for LayoutTableDetector {
    fn detect_tables(
        &self,
        pages: &[PageContent],
        page_numbers: &[usize],
    ) -> Result<Vec<DetectedTable>, SieveError> {
        let mut tables = Vec::new();

        for &number in page_numbers {
            let Some(page) = pages.iter().find(|p| p.page_number == number) else {
                return Err(SieveError::Extraction(format!(
                    "page {number} not present in document ({} pages)",
                    pages.len()
                )));
            };

            for region in find_table_regions(page, &self.settings) {
                let lines = &page.lines[region.start_line..region.end_line];
                let grid = split_columns(lines, self.settings.column_gap);
                let columns = grid.first().map(|r| r.len()).unwrap_or(0);
                if columns < self.settings.min_columns {
                    debug!(
                        page = number,
                        start = region.start_line,
                        columns,
                        "dropping region without shared column gutters"
                    );
                    continue;
                }
                tables.push(DetectedTable {
                    page_number: number,
                    grid,
                });
            }
        }

        Ok(tables)
    }

    fn backend_name(&self) -> &str {
        "layout"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegion {
    pub page_number: usize,
    pub start_line: usize,
    pub end_line: usize,
}

/// Count the fields of a line when split on runs of at least `gap` spaces.
pub fn field_count(line: &str, gap: usize) -> usize {
    let mut count = 0;
    let mut in_field = false;
    let mut spaces = 0;

    for c in line.trim().chars() {
        if c.is_whitespace() {
            spaces += 1;
            if spaces >= gap {
                in_field = false;
            }
        } else {
            if !in_field {
                count += 1;
                in_field = true;
            }
            spaces = 0;
        }
    }

    count
}

/// Find runs of consecutive multi-field lines on a page.
/// Returns half-open line index ranges.
pub fn find_table_regions(page: &PageContent, settings: &DetectorSettings) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut start: Option<usize> = None;

    let close = |start: usize, end: usize, regions: &mut Vec<TableRegion>| {
        if end - start >= settings.min_rows {
            regions.push(TableRegion {
                page_number: page.page_number,
                start_line: start,
                end_line: end,
            });
        }
    };

    for (i, line) in page.lines.iter().enumerate() {
        let is_row = field_count(line, settings.column_gap) >= settings.min_columns;
        match (is_row, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                close(s, i, &mut regions);
                start = None;
            }
            _ => {}
        }
    }

    // Table running to the end of the page
    if let Some(s) = start {
        close(s, page.lines.len(), &mut regions);
    }

    regions
}

/// Slice region lines into a rectangular grid at the shared gutters.
pub fn split_columns(lines: &[String], gap: usize) -> Grid {
    let rows: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let occupied: Vec<bool> = (0..width)
        .map(|i| rows.iter().any(|r| r.get(i).is_some_and(|c| !c.is_whitespace())))
        .collect();

    let spans = column_spans(&occupied, gap.max(1));

    rows.iter()
        .map(|row| {
            spans
                .iter()
                .map(|&(start, end)| {
                    let end = end.min(row.len());
                    if start >= end {
                        String::new()
                    } else {
                        row[start..end].iter().collect::<String>().trim().to_string()
                    }
                })
                .collect()
        })
        .collect()
}

/// Occupied segments separated by unoccupied runs of at least `gap` positions.
fn column_spans(occupied: &[bool], gap: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut last_occupied = 0;
    let mut blank_run = 0;

    for (i, &occ) in occupied.iter().enumerate() {
        if occ {
            if let Some(s) = start {
                if blank_run >= gap {
                    spans.push((s, last_occupied + 1));
                    start = Some(i);
                }
            } else {
                start = Some(i);
            }
            last_occupied = i;
            blank_run = 0;
        } else {
            blank_run += 1;
        }
    }

    if let Some(s) = start {
        spans.push((s, last_occupied + 1));
    }

    spans
}

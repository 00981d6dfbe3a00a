//! Integration tests for the run_pipeline() end-to-end flow.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use std::io::Cursor;
use std::sync::Mutex;

use calamine::{Data, Reader, Xlsx};
use pagesieve_core::error::SieveError;
use pagesieve_core::export::xlsx::write_workbook;
use pagesieve_core::extraction::table::LayoutTableDetector;
use pagesieve_core::extraction::{PageContent, PdfExtractor, TableDetector};
use pagesieve_core::model::{CellValue, DetectedTable, Outcome};
use pagesieve_core::{run_pipeline, ExtractionRequest};
use rust_decimal_macros::dec;

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, SieveError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Returns canned grids and records which pages it was asked about.
struct MockDetector {
    grids: Vec<DetectedTable>,
    requested: Mutex<Vec<Vec<usize>>>,
}

impl MockDetector {
    fn new(grids: Vec<DetectedTable>) -> Self {
        MockDetector {
            grids,
            requested: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<usize>> {
        self.requested.lock().unwrap().clone()
    }
}

impl TableDetector for MockDetector {
    fn detect_tables(
        &self,
        _pages: &[PageContent],
        page_numbers: &[usize],
    ) -> Result<Vec<DetectedTable>, SieveError> {
        self.requested.lock().unwrap().push(page_numbers.to_vec());
        Ok(self
            .grids
            .iter()
            .filter(|g| page_numbers.contains(&g.page_number))
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

fn grid(page_number: usize, rows: &[&[&str]]) -> DetectedTable {
    DetectedTable {
        page_number,
        grid: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

fn request(keywords: &[&str]) -> ExtractionRequest {
    ExtractionRequest::new(vec![], keywords.iter().map(|k| k.to_string()).collect())
}

fn three_page_report() -> MockExtractor {
    MockExtractor {
        pages: vec![
            page(1, &["Annual Report", "Contents"]),
            page(
                2,
                &[
                    "Revenue by region, fiscal 2023",
                    "  Java        1,500",
                    "  Sumatra     2,250",
                ],
            ),
            page(3, &["Outlook", "Revenue will grow"]),
        ],
    }
}

// ---------------------------------------------------------------------------
// Test 1: 3-page document, keywords on page 2 only, one mixed grid
// ---------------------------------------------------------------------------
#[test]
fn end_to_end_single_table() {
    let extractor = three_page_report();
    let detector = MockDetector::new(vec![grid(
        2,
        &[&["Java", "1,500"], &["Sumatra", "2,250"]],
    )]);

    let result = run_pipeline(request(&["revenue", "2023"]), &extractor, &detector).unwrap();

    assert_eq!(result.outcome, Outcome::Tables);
    assert_eq!(result.matched_pages, vec![2]);
    assert_eq!(detector.calls(), vec![vec![2]]);
    assert_eq!(result.tables.len(), 1);

    let table = &result.tables[0];
    assert_eq!(table.name, "Table_1");
    assert_eq!(table.page_number, 2);
    assert_eq!(table.numeric_columns, vec![false, true]);
    assert_eq!(table.rows[1][1], CellValue::Number(dec!(2250)));

    // Exported workbook carries the sheet name and numeric cells
    let bytes = write_workbook(&result.tables).unwrap();
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Table_1"]);
    let sheet = workbook.worksheet_range("Table_1").unwrap();
    assert_eq!(sheet.get_value((0, 1)), Some(&Data::Float(1500.0)));
    assert_eq!(sheet.get_value((1, 0)), Some(&Data::String("Sumatra".into())));
}

// ---------------------------------------------------------------------------
// Test 2: No page has every keyword -> detector never runs
// ---------------------------------------------------------------------------
#[test]
fn no_matching_pages_skips_detection() {
    let extractor = three_page_report();
    let detector = MockDetector::new(vec![]);

    let result =
        run_pipeline(request(&["revenue", "liabilities"]), &extractor, &detector).unwrap();

    assert_eq!(result.outcome, Outcome::NoMatchingPages);
    assert!(result.matched_pages.is_empty());
    assert!(result.tables.is_empty());
    assert!(detector.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Test 3: Pages match but every grid is decorative
// ---------------------------------------------------------------------------
#[test]
fn all_grids_rejected() {
    let extractor = three_page_report();
    let detector = MockDetector::new(vec![
        grid(2, &[&["100", "200"], &["300", "400"]]),
        grid(2, &[&["Region", "Amount"]]),
    ]);

    let result = run_pipeline(request(&["revenue"]), &extractor, &detector).unwrap();

    assert_eq!(result.outcome, Outcome::NoValidTables);
    assert_eq!(result.matched_pages, vec![2, 3]);
    assert_eq!(result.detected_tables, 2);
    assert!(result.tables.is_empty());
}

// ---------------------------------------------------------------------------
// Test 4: Empty keyword list is rejected at the pipeline boundary
// ---------------------------------------------------------------------------
#[test]
fn empty_keywords_rejected() {
    let extractor = three_page_report();
    let detector = MockDetector::new(vec![]);

    let err = run_pipeline(request(&[]), &extractor, &detector).unwrap_err();
    assert!(matches!(err, SieveError::NoKeywords));
}

// ---------------------------------------------------------------------------
// Test 5: Sheets are numbered in validation order across pages
// ---------------------------------------------------------------------------
#[test]
fn sheets_numbered_in_validation_order() {
    let extractor = MockExtractor {
        pages: vec![
            page(1, &["Kredit yang diberikan menurut sektor ekonomi"]),
            page(2, &["no match here"]),
            page(3, &["KREDIT YANG DIBERIKAN", "Sektor   Ekonomi"]),
        ],
    };
    let detector = MockDetector::new(vec![
        grid(1, &[&["Pertanian", "12,000"], &["Industri", "N/A"]]),
        grid(1, &[&["-----", "-----"]]),
        grid(3, &[&["Perdagangan", "3,400"], &["Jasa", "500"]]),
    ]);

    let result = run_pipeline(
        request(&["kredit yang diberikan", "sektor ekonomi"]),
        &extractor,
        &detector,
    )
    .unwrap();

    assert_eq!(result.matched_pages, vec![1, 3]);
    let names: Vec<&str> = result.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Table_1", "Table_2"]);

    // "N/A" keeps the whole first-table value column as cleaned text
    assert_eq!(result.tables[0].rows[0][1], CellValue::Text("12000".into()));
    assert_eq!(result.tables[1].rows[0][1], CellValue::Number(dec!(3400)));
}

// ---------------------------------------------------------------------------
// Test 6: Layout detector on real pdftotext-style lines
// ---------------------------------------------------------------------------
#[test]
fn layout_detector_pipeline() {
    let extractor = MockExtractor {
        pages: vec![
            page(1, &["Cover page"]),
            page(
                2,
                &[
                    "Revenue 2023",
                    "",
                    "  Region          Q1          Q2",
                    "  Java         1,500       1,620",
                    "  Sumatra      2,250       2,400",
                    "",
                    "Page 2",
                ],
            ),
        ],
    };
    let detector = LayoutTableDetector::default();

    let result = run_pipeline(request(&["revenue", "2023"]), &extractor, &detector).unwrap();

    assert_eq!(result.outcome, Outcome::Tables);
    assert_eq!(result.tables.len(), 1);
    let table = &result.tables[0];
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.rows[0][0], CellValue::Text("Region".into()));
    // Header row keeps value columns text-typed
    assert_eq!(table.rows[1][1], CellValue::Text("1500".into()));
}

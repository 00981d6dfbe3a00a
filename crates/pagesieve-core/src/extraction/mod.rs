pub mod pdftotext;
pub mod table;

use crate::error::SieveError;
use crate::model::DetectedTable;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based, in document order.
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    pub fn new(page_number: usize, text: &str) -> Self {
        PageContent {
            page_number,
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// The page's plain text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, SieveError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for table detection backends.
///
/// Implementations only see the pages listed in `page_numbers` and return
/// zero or more grids per page, in page order.
pub trait TableDetector: Send + Sync {
    fn detect_tables(
        &self,
        pages: &[PageContent],
        page_numbers: &[usize],
    ) -> Result<Vec<DetectedTable>, SieveError>;

    fn backend_name(&self) -> &str;
}

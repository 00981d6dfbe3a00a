pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod matching;
pub mod model;
pub mod parsing;

use error::SieveError;
use extraction::{PageContent, PdfExtractor, TableDetector};
use model::{ExtractionResult, Outcome};
use tracing::{info, warn};

/// Input for one extraction run: the document and the keywords that must
/// all appear on a page.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub pdf_bytes: Vec<u8>,
    pub keywords: Vec<String>,
}

impl ExtractionRequest {
    pub fn new(pdf_bytes: Vec<u8>, keywords: Vec<String>) -> Self {
        ExtractionRequest {
            pdf_bytes,
            keywords,
        }
    }
}

/// Main API entry point: find keyword pages in a PDF and pull their data tables.
///
/// An empty keyword list is rejected here, even though the page matcher on
/// its own would treat it as match-all.
pub fn run_pipeline(
    request: ExtractionRequest,
    extractor: &dyn PdfExtractor,
    detector: &dyn TableDetector,
) -> Result<ExtractionResult, SieveError> {
    if request.keywords.is_empty() {
        return Err(SieveError::NoKeywords);
    }

    let pages = extractor.extract_pages(&request.pdf_bytes)?;
    info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted page text"
    );

    process_pages(&pages, &request.keywords, detector)
}

/// Run matching, detection, validation and normalization over pages that
/// were already extracted.
pub fn process_pages(
    pages: &[PageContent],
    keywords: &[String],
    detector: &dyn TableDetector,
) -> Result<ExtractionResult, SieveError> {
    let matched_pages = matching::find_matching_pages(pages, keywords);

    if matched_pages.is_empty() {
        warn!(keywords = ?keywords, "no page contains all keywords");
        return Ok(ExtractionResult {
            outcome: Outcome::NoMatchingPages,
            matched_pages,
            detected_tables: 0,
            tables: vec![],
        });
    }
    info!(pages = ?matched_pages, "keywords found");

    let detected = detector.detect_tables(pages, &matched_pages)?;
    let tables = parsing::validate_and_normalize(&detected);
    info!(
        backend = detector.backend_name(),
        detected = detected.len(),
        valid = tables.len(),
        "validated tables"
    );

    let outcome = if tables.is_empty() {
        warn!("matching pages had no valid tables");
        Outcome::NoValidTables
    } else {
        Outcome::Tables
    };

    Ok(ExtractionResult {
        outcome,
        matched_pages,
        detected_tables: detected.len(),
        tables,
    })
}

/// Page numbers of a PDF that contain every keyword.
pub fn matching_pages(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    keywords: &[String],
) -> Result<Vec<usize>, SieveError> {
    if keywords.is_empty() {
        return Err(SieveError::NoKeywords);
    }
    let pages = extractor.extract_pages(pdf_bytes)?;
    Ok(matching::find_matching_pages(&pages, keywords))
}

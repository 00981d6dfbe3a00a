pub mod xlsx;

use crate::error::SieveError;
use crate::model::NormalizedTable;
use std::path::Path;
use tracing::info;

/// Default file name for the exported workbook.
pub const DEFAULT_WORKBOOK_NAME: &str = "extracted_tables.xlsx";

/// Write tables to an xlsx file at `path`, replacing any existing file.
pub fn write_workbook_file(path: &Path, tables: &[NormalizedTable]) -> Result<(), SieveError> {
    let bytes = xlsx::write_workbook(tables)?;
    std::fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        sheets = tables.len(),
        bytes = bytes.len(),
        "wrote workbook"
    );
    Ok(())
}

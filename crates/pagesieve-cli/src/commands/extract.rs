use pagesieve_core::export::{write_workbook_file, DEFAULT_WORKBOOK_NAME};
use pagesieve_core::extraction::pdftotext::PdftotextExtractor;
use pagesieve_core::extraction::table::{DetectorSettings, LayoutTableDetector};
use pagesieve_core::model::Outcome;
use pagesieve_core::ExtractionRequest;
use std::path::PathBuf;
use tracing::info;

use crate::commands::resolve_inputs;
use crate::output;
use crate::KeywordArgs;

/// Detector settings given on the command line; they win over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectorOverrides {
    pub column_gap: Option<usize>,
    pub min_rows: Option<usize>,
    pub min_columns: Option<usize>,
}

impl DetectorOverrides {
    fn apply(self, mut settings: DetectorSettings) -> DetectorSettings {
        if let Some(gap) = self.column_gap {
            settings.column_gap = gap;
        }
        if let Some(rows) = self.min_rows {
            settings.min_rows = rows;
        }
        if let Some(cols) = self.min_columns {
            settings.min_columns = cols;
        }
        settings
    }
}

pub fn run(
    input_file: PathBuf,
    keyword_args: &KeywordArgs,
    out: Option<PathBuf>,
    output_format: &str,
    preview: bool,
    overrides: DetectorOverrides,
) -> Result<(), pagesieve_core::error::SieveError> {
    let (keywords, mut config) = resolve_inputs(keyword_args)?;

    // Run command-line values through the same checks as the config file
    config.detector = overrides.apply(config.detector);
    if out.is_some() {
        config.output = out;
    }
    pagesieve_core::config::validate_config(&config)?;

    let out_path = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK_NAME));

    let pdf_bytes = std::fs::read(&input_file)?;
    info!(path = %input_file.display(), bytes = pdf_bytes.len(), "read input");

    let extractor = PdftotextExtractor::new();
    let detector = LayoutTableDetector::new(config.detector.clone());
    let result = pagesieve_core::run_pipeline(
        ExtractionRequest::new(pdf_bytes, keywords),
        &extractor,
        &detector,
    )?;

    match result.outcome {
        Outcome::NoMatchingPages => {
            eprintln!("No pages found containing all the specified keywords.");
        }
        Outcome::NoValidTables => {
            eprintln!("{}", output::table::format_matched_pages(&result.matched_pages));
            eprintln!("Found matching pages, but could not extract valid tables from them.");
        }
        Outcome::Tables => {
            eprintln!("{}", output::table::format_matched_pages(&result.matched_pages));
            write_workbook_file(&out_path, &result.tables)?;
            eprintln!(
                "Successfully extracted {} valid table(s)! Written to {}",
                result.tables.len(),
                out_path.display()
            );
        }
    }

    match preview_format(output_format, preview) {
        Some(PreviewFormat::Json) => output::json::print(&result)?,
        Some(PreviewFormat::Table) => output::table::print(&result),
        None => {}
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviewFormat {
    Table,
    Json,
}

/// `--no-preview` silences stdout whatever the output format.
fn preview_format(output_format: &str, preview: bool) -> Option<PreviewFormat> {
    if !preview {
        return None;
    }
    match output_format {
        "json" => Some(PreviewFormat::Json),
        _ => Some(PreviewFormat::Table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let overrides = DetectorOverrides {
            column_gap: Some(4),
            min_rows: None,
            min_columns: Some(3),
        };
        let settings = overrides.apply(DetectorSettings::default());
        assert_eq!(settings.column_gap, 4);
        assert_eq!(settings.min_rows, 2);
        assert_eq!(settings.min_columns, 3);
    }

    #[test]
    fn no_preview_suppresses_every_format() {
        assert_eq!(preview_format("json", false), None);
        assert_eq!(preview_format("table", false), None);
    }

    #[test]
    fn preview_follows_output_format() {
        assert_eq!(preview_format("json", true), Some(PreviewFormat::Json));
        assert_eq!(preview_format("table", true), Some(PreviewFormat::Table));
    }
}

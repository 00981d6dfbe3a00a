use pagesieve_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::commands::resolve_inputs;
use crate::KeywordArgs;

pub fn run(
    pdf_file: PathBuf,
    keyword_args: &KeywordArgs,
    output_format: &str,
) -> Result<(), pagesieve_core::error::SieveError> {
    let (keywords, _config) = resolve_inputs(keyword_args)?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let pages = pagesieve_core::matching_pages(&pdf_bytes, &extractor, &keywords)?;

    match output_format {
        "json" => println!("{}", serde_json::to_string_pretty(&pages)?),
        _ => {
            if pages.is_empty() {
                eprintln!("No pages found containing all the specified keywords.");
            } else {
                println!("{}", crate::output::table::format_matched_pages(&pages));
            }
        }
    }

    Ok(())
}

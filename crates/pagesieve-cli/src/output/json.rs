use pagesieve_core::error::SieveError;
use pagesieve_core::model::ExtractionResult;

pub fn print(result: &ExtractionResult) -> Result<(), SieveError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

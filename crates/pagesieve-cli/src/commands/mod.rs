pub mod extract;
pub mod pages;

use pagesieve_core::config::schema::ExtractConfig;
use pagesieve_core::error::SieveError;
use pagesieve_core::matching::parse_keywords;

use crate::KeywordArgs;

/// Load the config (if any) and settle on the keyword list.
///
/// Keywords from `--keyword` and `--keywords-file` are combined; when either
/// is given they replace the config's keywords.
pub fn resolve_inputs(args: &KeywordArgs) -> Result<(Vec<String>, ExtractConfig), SieveError> {
    let config = match &args.config {
        Some(path) => pagesieve_core::config::load_config(path)?,
        None => ExtractConfig::default(),
    };

    let mut keywords: Vec<String> = args
        .keyword
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    if let Some(path) = &args.keywords_file {
        let content = std::fs::read_to_string(path)?;
        keywords.extend(parse_keywords(&content));
    }

    if keywords.is_empty() {
        keywords = config.keywords.clone();
    }

    if keywords.is_empty() {
        return Err(SieveError::NoKeywords);
    }

    Ok((keywords, config))
}

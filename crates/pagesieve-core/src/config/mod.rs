pub mod schema;

use crate::error::SieveError;
use schema::ExtractConfig;
use std::path::Path;

/// Load an extraction config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractConfig, SieveError> {
    let content = std::fs::read_to_string(path).map_err(|e| SieveError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse an extraction config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractConfig, SieveError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(|e| SieveError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    finish(config)
}

/// Parse an extraction config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractConfig, SieveError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(SieveError::Json)?;
    finish(config)
}

fn finish(mut config: ExtractConfig) -> Result<ExtractConfig, SieveError> {
    for k in &mut config.keywords {
        *k = k.trim().to_string();
    }
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is well-formed.
///
/// An empty keyword list is allowed here; keywords may come from the
/// command line instead.
pub fn validate_config(config: &ExtractConfig) -> Result<(), SieveError> {
    if config.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(SieveError::ConfigInvalid(
            "keywords must not be empty strings".into(),
        ));
    }

    let d = &config.detector;
    if d.column_gap == 0 {
        return Err(SieveError::ConfigInvalid(
            "detector.column_gap must be at least 1".into(),
        ));
    }
    if d.min_columns == 0 {
        return Err(SieveError::ConfigInvalid(
            "detector.min_columns must be at least 1".into(),
        ));
    }
    if d.min_rows == 0 {
        return Err(SieveError::ConfigInvalid(
            "detector.min_rows must be at least 1".into(),
        ));
    }

    if let Some(ref output) = config.output {
        let is_xlsx = output
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
            .unwrap_or(false);
        if !is_xlsx {
            return Err(SieveError::ConfigInvalid(format!(
                "output '{}' must have an .xlsx extension",
                output.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "keywords": [" sektor ekonomi ", "kredit yang diberikan"],
            "detector": { "column_gap": 3, "min_rows": 4 },
            "output": "out/report.xlsx"
        }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.keywords, vec!["sektor ekonomi", "kredit yang diberikan"]);
        assert_eq!(config.detector.column_gap, 3);
        assert_eq!(config.detector.min_columns, 2);
        assert_eq!(config.detector.min_rows, 4);
        assert_eq!(config.output.unwrap().to_str(), Some("out/report.xlsx"));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = parse_config_str("{}").unwrap();
        assert!(config.keywords.is_empty());
        assert_eq!(config.detector.column_gap, 2);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(parse_config_str(r#"{ "keywords": ["revenue", "  "] }"#).is_err());
    }

    #[test]
    fn test_zero_gap_rejected() {
        assert!(parse_config_str(r#"{ "detector": { "column_gap": 0 } }"#).is_err());
    }

    #[test]
    fn test_non_xlsx_output_rejected() {
        assert!(parse_config_str(r#"{ "output": "tables.csv" }"#).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_config(r#"{ "keyword": ["x"] }"#, Path::new("cfg.json")).unwrap_err();
        assert!(matches!(err, SieveError::ConfigLoad { .. }));
    }
}

use crate::extraction::table::DetectorSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Saved extraction settings, loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Keywords that must all appear on a page.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub detector: DetectorSettings,
    /// Where to write the workbook.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

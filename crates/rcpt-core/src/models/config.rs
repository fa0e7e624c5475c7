//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RcptError, Result};
use crate::receipt::rules::{DateWindow, RuleEntry, RuleTable};

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch input configuration.
    pub input: InputConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Accepted transaction years (inclusive).
    pub date_window: DateWindow,

    /// Use the first receipt line as the business name when no rule matches.
    pub first_line_fallback: bool,

    /// Ordered business rules; the built-in table is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleEntry>>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_window: DateWindow::default(),
            first_line_fallback: false,
            rules: None,
        }
    }
}

impl ExtractionConfig {
    /// The rule table this configuration selects.
    pub fn rule_table(&self) -> RuleTable {
        match &self.rules {
            Some(entries) => RuleTable::new(entries.clone()),
            None => RuleTable::builtin(),
        }
    }
}

/// Batch input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File extension processed in batch mode (without the dot).
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: "pdf".to_string(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files. OCR is disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_dir: Option<PathBuf>,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of replacing them with spaces.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Full paths to (detection, recognition, dictionary), if a model directory is set.
    pub fn model_paths(&self) -> Option<(PathBuf, PathBuf, PathBuf)> {
        let dir = self.model_dir.as_ref()?;
        Some((
            dir.join(&self.detection_model),
            dir.join(&self.recognition_model),
            dir.join(&self.dictionary),
        ))
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RcptError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RcptError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RcptConfig::default();
        assert_eq!(config.extraction.date_window, DateWindow::new(2019, 2020));
        assert!(!config.extraction.first_line_fallback);
        assert_eq!(config.input.extension, "pdf");
        assert!(config.ocr.model_paths().is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RcptConfig =
            serde_json::from_str(r#"{"extraction": {"date_window": {"min_year": 2018, "max_year": 2024}}}"#)
                .unwrap();
        assert_eq!(config.extraction.date_window, DateWindow::new(2018, 2024));
        assert_eq!(config.input.extension, "pdf");
        assert_eq!(config.extraction.rule_table().len(), RuleTable::builtin().len());
    }

    #[test]
    fn test_configured_rules_replace_builtin() {
        let config: RcptConfig = serde_json::from_str(
            r#"{"extraction": {"rules": [{"location_pattern": "1 main st", "canonical_name": "corner shop"}]}}"#,
        )
        .unwrap();
        let table = config.extraction.rule_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().next().unwrap().canonical_name, "corner shop");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RcptConfig::default();
        config.input.extension = "txt".to_string();
        config.save(&path).unwrap();

        let loaded = RcptConfig::from_file(&path).unwrap();
        assert_eq!(loaded.input.extension, "txt");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(RcptConfig::from_file(&path), Err(RcptError::Config(_))));
    }
}

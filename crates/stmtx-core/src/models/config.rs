//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::statement::rules::patterns::NOISE_MARKERS;

/// Main configuration for the stmtx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtxConfig {
    /// Document reading configuration.
    pub pdf: PdfConfig,

    /// Statement parsing configuration.
    pub parser: ParserConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Document reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Minimum extracted text length before the document counts as empty.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 50,
        }
    }
}

/// How noise markers are matched against a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMatch {
    /// Any occurrence of a marker inside the line, e.g. `UPDATE` contains `DATE`.
    #[default]
    Substring,
    /// Marker must appear as whole words.
    WholeWord,
}

/// Statement parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Header/footer vocabulary; a line containing any of these is skipped.
    pub noise_markers: Vec<String>,

    /// Marker matching mode.
    pub noise_match: NoiseMatch,

    /// Cross-check running balances and report mismatches as warnings.
    pub reconcile_balances: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            noise_markers: NOISE_MARKERS.iter().map(|m| m.to_string()).collect(),
            noise_match: NoiseMatch::default(),
            reconcile_balances: true,
        }
    }
}

/// Strategy for deciding which freshly parsed records are new.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Skip as many fresh records as are already persisted.
    #[default]
    Positional,
    /// Skip fresh records whose fields exactly match a persisted record.
    Fingerprint,
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the persisted CSV file.
    pub csv_path: PathBuf,

    /// Merge strategy used when the file already exists.
    pub merge: MergeStrategy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("transactions.csv"),
            merge: MergeStrategy::default(),
        }
    }
}

impl StmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StmtxConfig =
            serde_json::from_str(r#"{"store": {"merge": "fingerprint"}}"#).unwrap();

        assert_eq!(config.store.merge, MergeStrategy::Fingerprint);
        assert_eq!(config.store.csv_path, PathBuf::from("transactions.csv"));
        assert_eq!(config.parser.noise_match, NoiseMatch::Substring);
        assert_eq!(config.parser.noise_markers.len(), NOISE_MARKERS.len());
        assert!(config.parser.reconcile_balances);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = StmtxConfig::default();
        config.pdf.max_pages = 3;
        config.parser.noise_match = NoiseMatch::WholeWord;
        config.save(&path).unwrap();

        let loaded = StmtxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.pdf.max_pages, 3);
        assert_eq!(loaded.parser.noise_match, NoiseMatch::WholeWord);
    }
}

//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::DEFAULT_MATCH_PAIRS;
use crate::model::WEAK_ACCURACY_THRESHOLD;
use crate::quiz::QuizDirection;
use crate::statistics::{StatusThresholds, STRONG_ACCURACY_THRESHOLD};

/// Environment variable that replaces `data_file`.
pub const DATA_FILE_ENV: &str = "WORDPLAY_DATA_FILE";

/// Top-level wordplay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordplayConfig {
    /// Where the word books are stored.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Exposed words below this accuracy (percent) are weak.
    #[serde(default = "default_weak_threshold")]
    pub weak_threshold: f64,
    /// Words at or above this accuracy (percent) are strong.
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold: f64,
    /// Maximum pairs laid out in a matching game.
    #[serde(default = "default_match_pairs")]
    pub match_pairs: usize,
    #[serde(default)]
    pub default_direction: QuizDirection,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("wordbooks.json")
}
fn default_weak_threshold() -> f64 {
    WEAK_ACCURACY_THRESHOLD
}
fn default_strong_threshold() -> f64 {
    STRONG_ACCURACY_THRESHOLD
}
fn default_match_pairs() -> usize {
    DEFAULT_MATCH_PAIRS
}

impl Default for WordplayConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            weak_threshold: default_weak_threshold(),
            strong_threshold: default_strong_threshold(),
            match_pairs: default_match_pairs(),
            default_direction: QuizDirection::default(),
        }
    }
}

impl WordplayConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        anyhow::ensure!(
            in_range(self.weak_threshold),
            "weak_threshold must be between 0 and 100, got {}",
            self.weak_threshold
        );
        anyhow::ensure!(
            in_range(self.strong_threshold),
            "strong_threshold must be between 0 and 100, got {}",
            self.strong_threshold
        );
        anyhow::ensure!(
            self.weak_threshold <= self.strong_threshold,
            "weak_threshold ({}) must not exceed strong_threshold ({})",
            self.weak_threshold,
            self.strong_threshold
        );
        anyhow::ensure!(self.match_pairs >= 1, "match_pairs must be at least 1");
        Ok(())
    }

    pub fn thresholds(&self) -> StatusThresholds {
        StatusThresholds {
            weak: self.weak_threshold,
            strong: self.strong_threshold,
        }
    }

    fn apply_data_file_override(&mut self, value: Option<String>) {
        if let Some(path) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(path = %path, "data file overridden from {DATA_FILE_ENV}");
            self.data_file = PathBuf::from(path);
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `wordplay.toml` in the current directory
/// 2. `~/.config/wordplay/config.toml`
///
/// `WORDPLAY_DATA_FILE` overrides `data_file`.
pub fn load_config() -> Result<WordplayConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<WordplayConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => find_config_file(),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            WordplayConfig::from_toml(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => WordplayConfig::default(),
    };

    config.apply_data_file_override(std::env::var(DATA_FILE_ENV).ok());
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("wordplay.toml");
    if local.exists() {
        return Some(local);
    }
    let global = dirs_path()?.join("config.toml");
    global.exists().then_some(global)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("wordplay"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WordplayConfig::default();
        assert_eq!(config.data_file, PathBuf::from("wordbooks.json"));
        assert_eq!(config.weak_threshold, 50.0);
        assert_eq!(config.strong_threshold, 80.0);
        assert_eq!(config.match_pairs, 8);
        assert_eq!(config.default_direction, QuizDirection::MeaningToWord);
        assert_eq!(config.thresholds(), StatusThresholds::default());
    }

    #[test]
    fn parse_partial_config() {
        let config = WordplayConfig::from_toml(
            r#"
data_file = "books/mine.json"
weak_threshold = 60.0
default_direction = "word-to-meaning"
"#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("books/mine.json"));
        assert_eq!(config.weak_threshold, 60.0);
        assert_eq!(config.strong_threshold, 80.0);
        assert_eq!(config.default_direction, QuizDirection::WordToMeaning);
    }

    #[test]
    fn rejects_bad_thresholds() {
        assert!(WordplayConfig::from_toml("weak_threshold = 120.0").is_err());
        assert!(WordplayConfig::from_toml("weak_threshold = 90.0\nstrong_threshold = 70.0").is_err());
        assert!(WordplayConfig::from_toml("match_pairs = 0").is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config_from(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordplay.toml");
        std::fs::write(&path, "match_pairs = 5\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.match_pairs, 5);
    }

    #[test]
    fn data_file_override() {
        let mut config = WordplayConfig::default();
        config.apply_data_file_override(Some("  ".into()));
        assert_eq!(config.data_file, PathBuf::from("wordbooks.json"));
        config.apply_data_file_override(Some("/tmp/other.json".into()));
        assert_eq!(config.data_file, PathBuf::from("/tmp/other.json"));
    }
}

//! Configuration management for the resume analyzer

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub scoring: ScoringConfig,
    pub content: ContentConfig,
    pub extraction: ExtractionConfig,
    pub suggestions: SuggestionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Extra TOML taxonomy file merged with (or replacing) the built-in catalog
    pub custom_path: Option<PathBuf>,
    pub include_builtin: bool,
}

/// Sub-score weights. Must sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skills_weight: u32,
    pub experience_weight: u32,
    pub contact_weight: u32,
    pub content_weight: u32,
    pub education_weight: u32,
    pub impact_weight: u32,
    /// Skill count after which each extra skill earns less
    pub skill_breadth_threshold: usize,
    /// Share of the experience weight granted when no experience is found
    pub missing_experience_ratio: f64,
}

/// Word-count band used by the content sub-score and the length suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
    pub max_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub max_keywords: usize,
    pub max_experience_years: f64,
    pub max_input_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub max_suggestions: usize,
    /// Job match below this percentage triggers the missing-keywords suggestion
    pub match_threshold: u32,
    pub min_skills: usize,
    pub min_action_verbs: usize,
    pub min_quantified_results: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy: TaxonomyConfig::default(),
            scoring: ScoringConfig::default(),
            content: ContentConfig::default(),
            extraction: ExtractionConfig::default(),
            suggestions: SuggestionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            custom_path: None,
            include_builtin: true,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skills_weight: 25,
            experience_weight: 20,
            contact_weight: 15,
            content_weight: 15,
            education_weight: 10,
            impact_weight: 15,
            skill_breadth_threshold: 10,
            missing_experience_ratio: 0.25,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            ideal_min_words: 400,
            ideal_max_words: 800,
            max_words: 1600,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_keywords: 20,
            max_experience_years: 50.0,
            max_input_chars: 200_000,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            match_threshold: 70,
            min_skills: 5,
            min_action_verbs: 5,
            min_quantified_results: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl ScoringConfig {
    pub fn total_weight(&self) -> u32 {
        self.skills_weight
            + self.experience_weight
            + self.contact_weight
            + self.content_weight
            + self.education_weight
            + self.impact_weight
    }
}

impl Config {
    /// Load the user configuration, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load and validate a configuration file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Configuration(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    /// Reject settings that would break the score bounds or the content band
    pub fn validate(&self) -> Result<()> {
        let total = self.scoring.total_weight();
        if total != 100 {
            return Err(AnalyzerError::Configuration(format!(
                "Scoring weights must sum to 100, got {}",
                total
            )));
        }

        if !(0.0..=1.0).contains(&self.scoring.missing_experience_ratio) {
            return Err(AnalyzerError::Configuration(
                "scoring.missing_experience_ratio must be within 0.0..=1.0".to_string(),
            ));
        }

        if self.scoring.skill_breadth_threshold == 0 {
            return Err(AnalyzerError::Configuration(
                "scoring.skill_breadth_threshold must be positive".to_string(),
            ));
        }

        let content = &self.content;
        if content.ideal_min_words == 0
            || content.ideal_min_words > content.ideal_max_words
            || content.ideal_max_words >= content.max_words
        {
            return Err(AnalyzerError::Configuration(format!(
                "Content band must satisfy 0 < ideal_min_words <= ideal_max_words < max_words (got {}/{}/{})",
                content.ideal_min_words, content.ideal_max_words, content.max_words
            )));
        }

        if self.extraction.max_keywords == 0 {
            return Err(AnalyzerError::Configuration(
                "extraction.max_keywords must be positive".to_string(),
            ));
        }

        if !(self.extraction.max_experience_years > 0.0) {
            return Err(AnalyzerError::Configuration(
                "extraction.max_experience_years must be positive".to_string(),
            ));
        }

        if self.suggestions.match_threshold > 100 {
            return Err(AnalyzerError::Configuration(
                "suggestions.match_threshold must be a percentage".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.scoring.total_weight(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        let mut config = Config::default();
        config.scoring.skills_weight = 40;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnalyzerError::Configuration(_)));
    }

    #[test]
    fn test_content_band_ordering() {
        let mut config = Config::default();
        config.content.ideal_min_words = 900;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.extraction.max_keywords = 12;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[extraction]\nmax_keywords = 5\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.extraction.max_keywords, 5);
        assert_eq!(loaded.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\nskills_weight = 90\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.is_fatal());
    }
}

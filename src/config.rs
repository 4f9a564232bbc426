use crate::error::{CatalogError, Result};
use crate::matcher::{DEFAULT_MIN_OVERLAP_SCORE, ServiceMatcher};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GeneralConfig {
    /// Catalog file to use instead of the bundled one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    #[serde(default = "default_min_overlap_score")]
    pub min_overlap_score: f64,
}

fn default_min_overlap_score() -> f64 { DEFAULT_MIN_OVERLAP_SCORE }

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_overlap_score: default_min_overlap_score(),
        }
    }
}

impl MatchingConfig {
    pub fn matcher(&self) -> ServiceMatcher {
        ServiceMatcher::with_min_overlap_score(self.min_overlap_score)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SuggestConfig {
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,
}

fn default_suggest_limit() -> usize { 5 }

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            limit: default_suggest_limit(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let score = self.matching.min_overlap_score;
        if !(score > 0.0 && score <= 1.0) {
            return Err(CatalogError::Config(format!(
                "matching.min_overlap_score must be in (0, 1], got {}",
                score
            )));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    match ProjectDirs::from("org", "spa-catalog", "spa-catalog") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    Config::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matching.min_overlap_score, 0.5);
        assert_eq!(config.suggest.limit, 5);
        assert!(config.general.catalog.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_toml_str(
            r#"
[general]
catalog = "/srv/spa/catalog.json"

[matching]
min_overlap_score = 0.75
"#,
        )
        .unwrap();
        assert_eq!(config.general.catalog, Some(PathBuf::from("/srv/spa/catalog.json")));
        assert_eq!(config.matching.matcher().min_overlap_score(), 0.75);
        assert_eq!(config.suggest.limit, 5);
    }

    #[test]
    fn test_invalid_threshold() {
        for bad in ["0.0", "1.5", "-0.2", "nan"] {
            let content = format!("[matching]\nmin_overlap_score = {}", bad);
            assert!(matches!(Config::from_toml_str(&content), Err(CatalogError::Config(_))));
        }
    }
}

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chips::{default_chips, Chip};
use crate::language::Language;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const SERVER_URL_ENV: &str = "MEDXPERT_SERVER_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub server_url: Option<String>,
    pub default_lang: Option<String>,
    pub timeout_secs: Option<u64>,
    pub chips: Option<Vec<Chip>>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            server_url: Some(DEFAULT_SERVER_URL.to_string()),
            default_lang: Some(Language::default().as_str().to_string()),
            timeout_secs: None,
            chips: None,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("Invalid config file {}", config_path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn save_default_lang(lang: Language) -> Result<()> {
        Self::save_default_lang_to(&Self::get_config_path()?, lang)
    }

    /// Update `default_lang` in the file at `config_path`, keeping every other
    /// field. A file that does not parse is left alone and reported.
    pub fn save_default_lang_to(config_path: &Path, lang: Language) -> Result<()> {
        let mut config = Self::load_from(config_path)?;
        config.default_lang = Some(lang.as_str().to_string());
        config.save_to(config_path)
    }

    /// Server URL: environment first, then config, then the built-in default
    pub fn resolved_server_url(&self) -> String {
        std::env::var(SERVER_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// Unknown codes fall back to English
    pub fn language(&self) -> Language {
        self.default_lang
            .as_deref()
            .and_then(Language::from_str)
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn chips(&self) -> Vec<Chip> {
        match &self.chips {
            Some(chips) if !chips.is_empty() => chips.clone(),
            _ => default_chips(),
        }
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("medxpert"))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

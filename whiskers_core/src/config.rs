use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use whiskers_sources::Endpoints;

use crate::links::{DistractionLinks, DEFAULT_LINKS};

// Plain values stay ahead of the tables so the TOML serializer can emit them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_links")]
    pub links: Vec<String>,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_theme() -> String {
    "auto".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_links() -> Vec<String> {
    DEFAULT_LINKS.iter().map(|l| l.to_string()).collect()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    #[serde(default = "default_min_turns")]
    pub min_turns: u32,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    #[serde(default = "default_bank_size")]
    pub bank_size: usize,
    #[serde(default = "default_source_delay_ms")]
    pub source_delay_ms: u64,
}

fn default_min_turns() -> u32 {
    3
}

fn default_max_turns() -> u32 {
    10
}

fn default_bank_size() -> usize {
    10
}

fn default_source_delay_ms() -> u64 {
    600
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            min_turns: default_min_turns(),
            max_turns: default_max_turns(),
            bank_size: default_bank_size(),
            source_delay_ms: default_source_delay_ms(),
        }
    }
}

impl ChatSettings {
    pub fn normalized(mut self) -> Self {
        self.min_turns = self.min_turns.max(1);
        self.max_turns = self.max_turns.max(self.min_turns);
        self.bank_size = self.bank_size.max(1);
        self
    }

    pub fn source_delay(&self) -> Duration {
        Duration::from_millis(self.source_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            log_level: default_log_level(),
            links: default_links(),
            chat: ChatSettings::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("whiskers")
            .join("config.toml"))
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config.normalized())
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.chat = self.chat.normalized();
        self.endpoints = self.endpoints.normalized();
        self.links = DistractionLinks::new(self.links).as_slice().to_vec();
        self.theme = self.theme.trim().to_lowercase();
        if self.theme.is_empty() {
            self.theme = default_theme();
        }
        self.log_level = self.log_level.trim().to_lowercase();
        if self.log_level.is_empty() {
            self.log_level = default_log_level();
        }
        self
    }

    pub fn distraction_links(&self) -> DistractionLinks {
        DistractionLinks::new(self.links.clone())
    }
}

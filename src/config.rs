//! Vault configuration
//! 
//! JSON file with defaults, then `IB_VAULT_*` environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, warn};

use crate::export::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const MIN_DIMENSION: u32 = 64;
pub const MAX_DIMENSION: u32 = 4096;

pub const ENV_OUTPUT_DIR: &str = "IB_VAULT_OUTPUT_DIR";
pub const ENV_IMAGE_WIDTH: &str = "IB_VAULT_IMAGE_WIDTH";
pub const ENV_IMAGE_HEIGHT: &str = "IB_VAULT_IMAGE_HEIGHT";
pub const ENV_LOG: &str = "IB_VAULT_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VaultConfig {
    /// Where `export` writes images
    pub output_dir: PathBuf,
    pub image_width: u32,
    pub image_height: u32,
    /// Fallback tracing directive when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("vault"),
            image_width: DEFAULT_WIDTH,
            image_height: DEFAULT_HEIGHT,
            log_filter: "ib_vault=info".to_string(),
        }
    }
}

fn parse_dimension(name: &str, raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

impl VaultConfig {
    /// Apply overrides from a variable lookup. Unparseable numbers are skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|d| !d.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(width) = lookup(ENV_IMAGE_WIDTH).and_then(|raw| parse_dimension(ENV_IMAGE_WIDTH, &raw)) {
            self.image_width = width;
        }
        if let Some(height) = lookup(ENV_IMAGE_HEIGHT).and_then(|raw| parse_dimension(ENV_IMAGE_HEIGHT, &raw)) {
            self.image_height = height;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Clamp image dimensions into `MIN_DIMENSION..=MAX_DIMENSION`
    pub fn normalized(mut self) -> Self {
        self.image_width = self.image_width.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self.image_height = self.image_height.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file, writing defaults first if it does not exist. Environment
    /// overrides are not applied here.
    pub async fn load(&self) -> Result<VaultConfig> {
        if !self.path.exists() {
            let default = VaultConfig::default();
            self.save(&default).await?;
            info!("Wrote default config to {}", self.path.display());
            return Ok(default);
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read config {}", self.path.display()))?;
        let config: VaultConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", self.path.display()))?;
        Ok(config.normalized())
    }

    /// `load` followed by environment overrides
    pub async fn resolve(&self) -> Result<VaultConfig> {
        let mut config = self.load().await?;
        config.apply_env();
        Ok(config.normalized())
    }

    pub async fn save(&self, config: &VaultConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

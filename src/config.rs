//! Engine configuration.
//!
//! Loaded from ~/.config/pairwheel/pairwheel.yml or .pairwheel.yml

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Company, Developer};
use crate::error::{PairwheelError, Result};

/// Roster and track configuration for a generation run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidate work tracks, in priority order.
    pub tracks: Vec<String>,

    /// Force rotation for every track on every cycle.
    #[serde(rename = "rotate-everyday")]
    pub rotate_everyday: bool,

    /// Companies on the roster.
    pub companies: Vec<Company>,

    /// Developers available today.
    pub developers: Vec<Developer>,
}

impl EngineConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .pairwheel.yml in current directory
    /// 3. ~/.config/pairwheel/pairwheel.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try project config
        let project_config = PathBuf::from(".pairwheel.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    tracing::info!("loaded config from .pairwheel.yml");
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!("failed to load .pairwheel.yml: {}", e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pairwheel").join("pairwheel.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        tracing::info!(path = %user_config.display(), "loaded user config");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %user_config.display(), "failed to load user config: {}", e);
                    }
                }
            }
        }

        tracing::info!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for dev in &self.developers {
            if dev.id.as_str().is_empty() {
                return Err(PairwheelError::Config("developer with empty id".to_string()));
            }
            if !seen.insert(&dev.id) {
                return Err(PairwheelError::Config(format!("duplicate developer id: {}", dev.id)));
            }
        }

        if !self.companies.is_empty() {
            for dev in &self.developers {
                let known = self
                    .companies
                    .iter()
                    .any(|company| company.name() == dev.company.to_lowercase());
                if !known {
                    return Err(PairwheelError::Config(format!(
                        "developer {} belongs to unknown company: {}",
                        dev.id, dev.company
                    )));
                }
            }
        }
        Ok(())
    }
}

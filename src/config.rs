//! straintree.toml discovery and configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::tree::TraversalParams;

pub const CONFIG_FILE: &str = "straintree.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read straintree.toml: {0}")]
    ConfigReadError(#[from] std::io::Error),

    #[error("Failed to parse straintree.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Hierarchical layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom
    #[default]
    #[serde(rename = "UD")]
    UpDown,
    #[serde(rename = "DU")]
    DownUp,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub level_separation: u32,
    pub node_spacing: u32,
    pub tree_spacing: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::UpDown,
            level_separation: 100,
            node_spacing: 100,
            tree_spacing: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub node_distance: u32,
    pub spring_length: u32,
    pub stabilization_iterations: u32,
    pub update_interval: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            node_distance: 150,
            spring_length: 150,
            stabilization_iterations: 200,
            update_interval: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Delay before the initial fit, giving the layout time to settle
    pub fit_delay_ms: u64,
    pub tooltip_delay_ms: u64,
    pub title: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fit_delay_ms: 100,
            tooltip_delay_ms: 200,
            title: "Phylogenetic Tree".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree: TraversalParams,
    pub layout: LayoutConfig,
    pub physics: PhysicsConfig,
    pub view: ViewConfig,
}

impl Config {
    /// Look for straintree.toml in the current directory or any parent.
    /// Falls back to the defaults when there is none.
    pub fn discover() -> Result<Self, ConfigError> {
        let current_dir = std::env::current_dir()?;
        match Self::find_config_file(&current_dir) {
            Some(path) => {
                log::info!("Using configuration {:?}", path);
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn find_config_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_distance = self.tree.max_distance;
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "tree.max_distance must be a positive number, got {}",
                max_distance
            )));
        }
        if self.tree.fanout == 0 {
            return Err(ConfigError::InvalidValue(
                "tree.fanout must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// File: src/config.rs
// Purpose: Configuration parsing from rmvc.toml

use anyhow::{Context, Result};
use rmvc_router::ReverseMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_name")]
    pub name: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error (default: "info")
    #[serde(default = "default_level")]
    pub level: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Whether reversing with a missing parameter is an error (default: true)
    #[serde(default = "default_true")]
    pub strict_reverse: bool,

    /// Routes in priority order
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One `[[routing.routes]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteConfig {
    #[serde(default)]
    pub name: Option<String>,

    pub template: String,

    /// Name the controller was registered under
    pub controller: String,

    #[serde(default)]
    pub action: Option<String>,
}

// Default values
fn default_name() -> String {
    "rmvc-app".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strict_reverse: true,
            routes: Vec::new(),
        }
    }
}

impl RoutingConfig {
    pub fn reverse_mode(&self) -> ReverseMode {
        if self.strict_reverse {
            ReverseMode::Strict
        } else {
            ReverseMode::Lenient
        }
    }
}

impl Config {
    /// Load configuration from rmvc.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from TOML text; blank text yields defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default path (./rmvc.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rmvc.toml")
    }
}

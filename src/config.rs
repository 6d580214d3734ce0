//! Runtime configuration: built-in defaults, an optional TOML file, then
//! command-line / environment overrides.

use crate::cli::Cli;
use crate::docset::{CACHE_TTL, DocsetRegistry};
use crate::error::Result;
use crate::launcher::{DEFAULT_LAUNCHER_KEYWORD, DocsetLauncher, MAX_DOCSETS_VISIBLE};
use crate::viewer::{DEFAULT_VIEWER, ZealViewer};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Where Zeal installs docsets on Linux.
pub const DEFAULT_DOCSETS_PATH: &str = "~/.local/share/Zeal/Zeal/docsets";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub docsets_path: String,
    pub viewer: String,
    pub launcher_keyword: String,
    pub max_visible: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docsets_path: DEFAULT_DOCSETS_PATH.to_string(),
            viewer: DEFAULT_VIEWER.to_string(),
            launcher_keyword: DEFAULT_LAUNCHER_KEYWORD.to_string(),
            max_visible: MAX_DOCSETS_VISIBLE,
        }
    }
}

impl Config {
    /// Parses a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolves the effective config for a command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(path) = &cli.docsets_path {
            self.docsets_path.clone_from(path);
        }
        if let Some(viewer) = &cli.viewer {
            self.viewer.clone_from(viewer);
        }
    }

    /// Builds a launcher wired to the real filesystem and viewer.
    pub fn launcher(&self) -> DocsetLauncher {
        let registry = DocsetRegistry::new(&self.docsets_path, CACHE_TTL);
        DocsetLauncher::new(registry, Arc::new(ZealViewer::new(&self.viewer)))
            .with_launcher_keyword(&self.launcher_keyword)
            .with_max_visible(self.max_visible)
    }
}

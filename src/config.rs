//! Server configuration.
//!
//! Values are layered, later sources overriding earlier ones:
//! defaults, an optional YAML file, environment variables, command-line flags.
//! The result is resolved once at startup and never changes afterwards.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::routes::FileStore;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Files root for the `/files/` routes; `None` disables them.
    pub directory: Option<PathBuf>,
    pub max_request_bytes: usize,
}

/// Command-line flags.
#[derive(Debug, Default, Parser)]
#[command(name = "wicket", version, about = "Minimal HTTP/1.1 file and echo server")]
pub struct Cli {
    /// Directory served under /files/
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:4221
    #[arg(long)]
    pub listen: Option<String>,

    /// YAML configuration file
    #[arg(long, env = "WICKET_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl Config {
    /// Resolves the configuration from every source.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.apply_cli(cli);
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Applies `LISTEN`, `WICKET_DIRECTORY` and `WICKET_MAX_REQUEST_BYTES`.
    pub fn apply_env<F>(&mut self, var: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = var("LISTEN") {
            self.listen_addr = addr;
        }

        if let Some(dir) = var("WICKET_DIRECTORY") {
            self.directory = Some(PathBuf::from(dir));
        }

        if let Some(max) = var("WICKET_MAX_REQUEST_BYTES") {
            self.max_request_bytes = max
                .trim()
                .parse()
                .with_context(|| format!("WICKET_MAX_REQUEST_BYTES is not a number: {max:?}"))?;
        }

        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(addr) = &cli.listen {
            self.listen_addr = addr.clone();
        }

        if let Some(dir) = &cli.directory {
            self.directory = Some(dir.clone());
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_request_bytes == 0 {
            anyhow::bail!("max_request_bytes must be greater than 0");
        }

        if self.listen_addr.trim().is_empty() {
            anyhow::bail!("listen_addr must not be empty");
        }

        Ok(())
    }

    /// The file capability handed to each connection, if a files root is set.
    pub fn file_store(&self) -> Option<FileStore> {
        self.directory.clone().map(FileStore::new)
    }
}

//! Process-level settings for the console.
//!
//! Read from a TOML file; every key is optional:
//!
//! ```toml
//! bind = "127.0.0.1:8888"
//! program = "/usr/bin/snapper"
//! configs_dir = "/etc/snapper/configs"
//! assets_dir = "/usr/share/snapcon/ui"
//! command_timeout_secs = 120
//! ```

use crate::assets::{AssetProvider, DirAssets, EmbeddedAssets};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use snapcon_core::configs::DEFAULT_CONFIGS_DIR;
use snapcon_core::snapper::DEFAULT_PROGRAM;
use snapcon_core::{ConfigSource, Snapper, SystemRunner};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8888;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub bind: SocketAddr,
    pub program: String,
    pub configs_dir: PathBuf,
    /// Serve the UI from this directory instead of the built-in page.
    pub assets_dir: Option<PathBuf>,
    /// Kill snapper after this many seconds. Unset means wait forever.
    pub command_timeout_secs: Option<u64>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            program: DEFAULT_PROGRAM.to_string(),
            configs_dir: PathBuf::from(DEFAULT_CONFIGS_DIR),
            assets_dir: None,
            command_timeout_secs: None,
        }
    }
}

impl ConsoleConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    pub fn runner(&self) -> SystemRunner {
        match self.command_timeout() {
            Some(timeout) => SystemRunner::new().with_timeout(timeout),
            None => SystemRunner::new(),
        }
    }

    pub fn snapper(&self) -> Snapper {
        Snapper::new(Arc::new(self.runner()))
            .with_program(self.program.clone())
            .with_config_sources(vec![
                ConfigSource::Directory(self.configs_dir.clone()),
                ConfigSource::ListConfigs,
            ])
    }

    pub fn assets(&self) -> Arc<dyn AssetProvider> {
        match &self.assets_dir {
            Some(dir) => Arc::new(DirAssets::new(dir.clone())),
            None => Arc::new(EmbeddedAssets),
        }
    }
}

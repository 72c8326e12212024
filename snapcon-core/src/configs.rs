use crate::error::Result;
use crate::validate::ConfigName;
use std::path::{Path, PathBuf};

/// Directory snapper keeps one file per configuration in.
pub const DEFAULT_CONFIGS_DIR: &str = "/etc/snapper/configs";

/// A place configuration names can be discovered from, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File names under snapper's configuration directory.
    Directory(PathBuf),
    /// Output of `snapper list-configs`.
    ListConfigs,
}

impl ConfigSource {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigSource::Directory(_) => "directory",
            ConfigSource::ListConfigs => "list-configs",
        }
    }

    /// The default configuration directory, then `snapper list-configs`.
    pub fn default_order() -> Vec<ConfigSource> {
        vec![
            ConfigSource::Directory(PathBuf::from(DEFAULT_CONFIGS_DIR)),
            ConfigSource::ListConfigs,
        ]
    }
}

/// Lists the configuration files in `dir`, sorted by name.
///
/// Hidden files and names snapper could not have created are skipped.
pub fn read_config_dir(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if ConfigName::parse(&name).is_ok() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

use crate::args;
use crate::configs::{read_config_dir, ConfigSource};
use crate::error::{Error, Result};
use crate::invoke::{CommandOutput, CommandRunner};
use crate::models::{Change, Settings, Snapshot};
use crate::parse::{parse_changes, parse_config_names, parse_settings, parse_snapshots};
use crate::validate::{check_paths, check_text, check_userdata, ConfigName, SnapshotRange};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_PROGRAM: &str = "snapper";

pub fn default_rollback_description(id: u32) -> String {
    format!("Rollback to snapshot {} via web console", id)
}

/// Every snapper operation the console exposes, one process per call.
#[derive(Clone)]
pub struct Snapper {
    program: String,
    config_sources: Vec<ConfigSource>,
    runner: Arc<dyn CommandRunner>,
}

impl Snapper {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            config_sources: ConfigSource::default_order(),
            runner,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_config_sources(mut self, sources: Vec<ConfigSource>) -> Self {
        self.config_sources = sources;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn invoke(&self, args: Vec<String>) -> Result<CommandOutput> {
        self.runner.run(&self.program, &args)
    }

    fn run(&self, args: Vec<String>) -> Result<CommandOutput> {
        self.invoke(args)?.into_success(&self.program)
    }

    /// Names of all snapper configurations, from the first source that has any.
    pub fn list_configs(&self) -> Result<Vec<String>> {
        let mut last_error = None;
        let mut any_succeeded = false;

        for source in &self.config_sources {
            match self.configs_from(source) {
                Ok(names) if !names.is_empty() => {
                    debug!(source = source.name(), count = names.len(), "found configs");
                    return Ok(names);
                }
                Ok(_) => {
                    debug!(source = source.name(), "no configs in source");
                    any_succeeded = true;
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "config source failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !any_succeeded => Err(e),
            _ => Ok(Vec::new()),
        }
    }

    fn configs_from(&self, source: &ConfigSource) -> Result<Vec<String>> {
        match source {
            ConfigSource::Directory(dir) => read_config_dir(dir),
            ConfigSource::ListConfigs => {
                let output = self.invoke(args::list_configs())?;
                let names = parse_config_names(&output.stdout_text());
                if output.success() {
                    return Ok(names);
                }
                if names.is_empty() {
                    return output.into_success(&self.program).map(|_| names);
                }
                warn!(
                    code = ?output.code,
                    "list-configs exited non-zero, using its partial output"
                );
                Ok(names)
            }
        }
    }

    pub fn get_config(&self, config: &ConfigName) -> Result<Settings> {
        let output = self.run(args::get_config(config))?;
        Ok(parse_settings(&output.stdout_text()))
    }

    pub fn list_snapshots(&self, config: &ConfigName) -> Result<Vec<Snapshot>> {
        let output = self.run(args::list(config))?;
        Ok(parse_snapshots(&output.stdout_text()))
    }

    pub fn status(&self, config: &ConfigName, range: SnapshotRange) -> Result<Vec<Change>> {
        let output = self.run(args::status(config, range))?;
        Ok(parse_changes(&output.stdout_text()))
    }

    pub fn undo_change(&self, config: &ConfigName, range: SnapshotRange, paths: &[String]) -> Result<()> {
        check_paths(paths)?;
        info!(%config, %range, files = paths.len(), "undoing changes");
        self.run(args::undo_change(config, range, paths))?;
        Ok(())
    }

    pub fn rollback(&self, config: &ConfigName, id: u32, description: &str) -> Result<()> {
        check_id(id)?;
        check_text("description", description)?;
        info!(%config, id, "rolling back");
        self.run(args::rollback(config, id, description))?;
        Ok(())
    }

    pub fn create(&self, config: &ConfigName, description: &str, userdata: Option<&str>) -> Result<()> {
        check_text("description", description)?;
        if let Some(userdata) = userdata {
            check_userdata(userdata)?;
        }
        info!(%config, description, "creating snapshot");
        self.run(args::create(config, description, userdata))?;
        Ok(())
    }

    pub fn delete(&self, config: &ConfigName, id: u32) -> Result<()> {
        check_id(id)?;
        info!(%config, id, "deleting snapshot");
        self.run(args::delete(config, id))?;
        Ok(())
    }
}

fn check_id(id: u32) -> Result<()> {
    if id == 0 {
        return Err(Error::InvalidSnapshotId(id.to_string()));
    }
    Ok(())
}

pub mod configs;
pub mod create;
pub mod delete;
pub mod list;
pub mod rollback;
pub mod serve;
pub mod settings;
pub mod status;
pub mod undo;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use snapcon_core::{ConfigName, Snapper};
use snapcon_server::ConsoleConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Settings shared by every subcommand.
pub struct Context {
    pub config: ConsoleConfig,
    pub json: bool,
}

impl Context {
    pub fn load(config_file: Option<PathBuf>, program: Option<String>, json: bool) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => ConsoleConfig::load(&path)?,
            None => ConsoleConfig::default(),
        };
        if let Some(program) = program {
            config.program = program;
        }
        debug!(?config, "loaded console config");
        Ok(Self { config, json })
    }

    pub fn snapper(&self) -> Snapper {
        self.config.snapper()
    }
}

pub fn config_name(name: &str) -> Result<ConfigName> {
    Ok(ConfigName::parse(name)?)
}

pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Asks before a destructive command unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !answer {
        println!("{}", "Aborted".yellow());
    }
    Ok(answer)
}

pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// A JSON acknowledgement for mutations in `--json` mode.
pub fn ok_json(extra: Value) -> Value {
    let mut body = serde_json::json!({"status": "ok"});
    if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), extra) {
        body.extend(extra);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_defaults() {
        let ctx = Context::load(None, None, false).unwrap();
        assert_eq!(ctx.snapper().program(), "snapper");
    }

    #[test]
    fn test_context_program_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapcon.toml");
        std::fs::write(&path, "program = \"/from/file\"\n").unwrap();

        let from_file = Context::load(Some(path.clone()), None, false).unwrap();
        assert_eq!(from_file.snapper().program(), "/from/file");

        let overridden = Context::load(Some(path), Some("/from/flag".to_string()), true).unwrap();
        assert_eq!(overridden.snapper().program(), "/from/flag");
        assert!(overridden.json);
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm("really?", true).unwrap());
    }

    #[test]
    fn test_ok_json() {
        assert_eq!(
            ok_json(serde_json::json!({"id": 3})),
            serde_json::json!({"status": "ok", "id": 3})
        );
    }
}

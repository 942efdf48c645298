//! Final formatting pass over the generated sources.

use crate::config::FormatterConfig;
use crate::error::{IconsyncError, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Normalizes every generated file below `root` in place.
#[cfg_attr(test, mockall::automock)]
pub trait Formatter {
    fn format(&self, root: &Path) -> Result<()>;
}

/// Runs `<command> <args…> <root>` and waits for it, e.g. `npx prettier --write src`.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    command: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    fn display_command(&self, root: &Path) -> String {
        let mut parts = vec![self.command.clone()];
        parts.extend(self.args.iter().cloned());
        parts.push(root.display().to_string());
        parts.join(" ")
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, root: &Path) -> Result<()> {
        let command_line = self.display_command(root);
        debug!("Running formatter: {}", command_line);

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(root)
            .output()
            .map_err(|source| IconsyncError::FormatterSpawn {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(IconsyncError::FormatterFailed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Formatted code with `{}`", command_line);
        Ok(())
    }
}

/// Stands in when `formatter.enabled = false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, root: &Path) -> Result<()> {
        debug!("Formatting disabled, leaving {:?} as generated", root);
        Ok(())
    }
}

/// Builds the formatter described by `[formatter]`.
pub fn from_config(config: &FormatterConfig) -> Box<dyn Formatter> {
    if config.enabled {
        Box::new(CommandFormatter::new(config.command.clone(), config.args.clone()))
    } else {
        Box::new(NoopFormatter)
    }
}

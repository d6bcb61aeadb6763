use super::TimerUpdater;
use crate::{Error, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs the external timer update helper with no arguments.
#[derive(Debug, Clone)]
pub struct ScriptTimerUpdater {
    program: PathBuf,
}

impl ScriptTimerUpdater {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }
}

impl TimerUpdater for ScriptTimerUpdater {
    fn update_timer(&self) -> Result<()> {
        info!("Updating collection timer via {}", self.program.display());

        let output = match Command::new(&self.program).output() {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to launch timer helper {}: {}", self.program.display(), e);
                return Err(Error::Io(e));
            }
        };

        if output.status.success() {
            debug!("Timer helper finished: {}", String::from_utf8_lossy(&output.stdout).trim());
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match stderr.trim() {
            "" => output.status.to_string(),
            msg => format!("{}: {}", output.status, msg),
        };
        Err(Error::TimerError(format!("{} ({})", self.program.display(), detail)))
    }
}

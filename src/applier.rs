use crate::config::document::{merge_preset, read_document, write_document};
use crate::presets::{self, PresetConfig, PresetName};
use crate::timer::TimerUpdater;
use crate::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Outcome of a successful preset application
#[derive(Debug, Clone)]
pub struct AppliedPreset {
    pub preset: &'static PresetConfig,
    pub config_path: PathBuf,
    /// False when the timer helper failed; the config write still stands
    pub timer_updated: bool,
}

/// Writes preset values into a config file and then refreshes the timer.
pub struct PresetApplier<U: TimerUpdater> {
    config_path: PathBuf,
    updater: U,
}

impl<U: TimerUpdater> PresetApplier<U> {
    pub fn new(config_path: impl AsRef<Path>, updater: U) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            updater,
        }
    }

    /// Applies the named preset.
    ///
    /// An unknown name fails before the file is opened. A failing timer
    /// update is logged and reported through `timer_updated`, never as an
    /// error.
    pub fn apply(&self, preset_name: &str) -> Result<AppliedPreset> {
        let name: PresetName = preset_name.parse()?;
        let preset = presets::preset(name);
        info!("Applying preset '{}' to {}", name, self.config_path.display());

        let mut document = read_document(&self.config_path)?;
        merge_preset(&mut document, preset)?;
        write_document(&self.config_path, &document)?;

        let timer_updated = match self.updater.update_timer() {
            Ok(()) => {
                debug!("Collection timer updated");
                true
            }
            Err(e) => {
                warn!("Config was updated but the timer update failed: {}", e);
                false
            }
        };

        Ok(AppliedPreset {
            preset,
            config_path: self.config_path.clone(),
            timer_updated,
        })
    }

    /// Reports which preset the config file currently matches, if any.
    pub fn current(&self) -> Result<Option<PresetName>> {
        let document = read_document(&self.config_path)?;
        Ok(presets::detect_applied_preset(&document))
    }
}

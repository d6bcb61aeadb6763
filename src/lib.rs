use std::io;
use std::path::Path;
use thiserror::Error;

pub mod applier;
pub mod config;
pub mod presets;
pub mod timer;

/// Error type for the proxbalance-presets library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown preset '{name}'. Valid presets: {}", .valid.join(", "))]
    UnknownPreset { name: String, valid: Vec<String> },

    #[error("Timer update failed: {0}")]
    TimerError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Initializes logging for the library.
pub fn setup_logging() {
    env_logger::init();
}

/// Returns the version of the library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use applier::{AppliedPreset, PresetApplier};
pub use config::ApplierConfig;
pub use presets::{
    detect_applied_preset,
    get_preset_details,
    list_available_presets,
    render_presets,
    ClusterSize,
    CollectionOptimization,
    PresetConfig,
    PresetName,
    RrdTimeframe,
};
pub use timer::{NoopTimerUpdater, ScriptTimerUpdater, TimerUpdater};

/// Applies a preset to the config file at `config_path`, then runs the timer
/// helper at `timer_script`. A failing timer helper does not fail the call.
pub fn apply_preset(preset_name: &str, config_path: &Path, timer_script: &Path) -> Result<AppliedPreset> {
    let updater = ScriptTimerUpdater::new(timer_script);
    PresetApplier::new(config_path, updater).apply(preset_name)
}

/// Human-readable listing of every preset. Never touches the file system.
pub fn list_presets() -> String {
    presets::render_presets()
}

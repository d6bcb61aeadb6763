use log::debug;
use std::env;
use std::path::PathBuf;

pub mod document;

/// Default location of the ProxBalance configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/opt/proxmox-balance-manager/config.json";

/// Default location of the collection timer update helper.
///
/// The helper is executed directly with no interpreter, so it needs a
/// shebang line and the execute bit. Point `PROXBALANCE_TIMER_SCRIPT` at a
/// wrapper when the installed script has neither.
pub const DEFAULT_TIMER_SCRIPT: &str = "/opt/proxmox-balance-manager/update_timer.py";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "PROXBALANCE_CONFIG";

/// Environment variable overriding the timer helper path
pub const TIMER_SCRIPT_ENV: &str = "PROXBALANCE_TIMER_SCRIPT";

/// Locations the preset applier works against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplierConfig {
    /// JSON config file that receives the preset values
    pub config_path: PathBuf,

    /// Executable run after the config file is rewritten
    pub timer_script: PathBuf,
}

impl Default for ApplierConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            timer_script: PathBuf::from(DEFAULT_TIMER_SCRIPT),
        }
    }
}

impl ApplierConfig {
    /// Creates a configuration from the defaults, overridden by
    /// `PROXBALANCE_CONFIG` and `PROXBALANCE_TIMER_SCRIPT` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("Using config path from {}: {}", CONFIG_PATH_ENV, path);
            config.config_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(TIMER_SCRIPT_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("Using timer script from {}: {}", TIMER_SCRIPT_ENV, path);
            config.timer_script = PathBuf::from(path);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_install_dir() {
        let config = ApplierConfig::default();
        assert_eq!(config.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(config.timer_script, PathBuf::from(DEFAULT_TIMER_SCRIPT));
    }

    #[test]
    fn environment_overrides_paths() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (CONFIG_PATH_ENV, "/tmp/pb/config.json"),
            (TIMER_SCRIPT_ENV, "  "),
        ]);
        let config = ApplierConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.config_path, PathBuf::from("/tmp/pb/config.json"));
        // Blank values fall back to the default
        assert_eq!(config.timer_script, PathBuf::from(DEFAULT_TIMER_SCRIPT));
    }
}

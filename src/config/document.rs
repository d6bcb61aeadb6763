use crate::presets::PresetConfig;
use crate::{Error, Result};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level key holding the collection interval
pub const INTERVAL_KEY: &str = "collection_interval_minutes";

/// Top-level key holding the collection optimization settings
pub const OPTIMIZATION_KEY: &str = "collection_optimization";

/// Reads the config file. The document must be a JSON object.
pub fn read_document(path: &Path) -> Result<Value> {
    debug!("Reading config file: {}", path.display());
    let contents = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;

    if !document.is_object() {
        return Err(Error::ConfigError(format!(
            "Config file {} does not contain a JSON object",
            path.display()
        )));
    }

    Ok(document)
}

/// Replaces the two preset-managed keys, leaving every other key as it was.
pub fn merge_preset(document: &mut Value, preset: &PresetConfig) -> Result<()> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| Error::ConfigError("Config document is not a JSON object".to_string()))?;

    object.insert(INTERVAL_KEY.to_string(), Value::from(preset.collection_interval_minutes));
    object.insert(
        OPTIMIZATION_KEY.to_string(),
        serde_json::to_value(&preset.collection_optimization)?,
    );

    Ok(())
}

/// Writes the document back in place as 2-space indented JSON.
///
/// The write is a plain overwrite, not a rename; a crash mid-write can leave
/// a truncated file.
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(document)?;
    contents.push('\n');
    fs::write(path, contents)?;
    info!("Wrote config file: {}", path.display());
    Ok(())
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use crate::Error;

/// Default collection interval in minutes when a preset does not override it
pub const DEFAULT_COLLECTION_INTERVAL_MINUTES: u32 = 15;

/// Default number of parallel collection workers
pub const DEFAULT_MAX_PARALLEL_WORKERS: u32 = 5;

// Define the preset name enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetName {
    Small,
    Medium,
    Large,
    Custom,
}

impl PresetName {
    /// Every preset, in listing order
    pub const ALL: [PresetName; 4] = [
        PresetName::Small,
        PresetName::Medium,
        PresetName::Large,
        PresetName::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Small => "small",
            PresetName::Medium => "medium",
            PresetName::Large => "large",
            PresetName::Custom => "custom",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PresetName::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| Error::UnknownPreset {
                name: s.to_string(),
                valid: list_available_presets(),
            })
    }
}

// Define the RRD timeframe enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RrdTimeframe {
    Hour,
    Day,
}

impl fmt::Display for RrdTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RrdTimeframe::Hour => f.write_str("hour"),
            RrdTimeframe::Day => f.write_str("day"),
        }
    }
}

// Define the cluster size enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterSize {
    Small,
    Medium,
    Large,
    Custom,
}

impl fmt::Display for ClusterSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClusterSize::Small => "small",
            ClusterSize::Medium => "medium",
            ClusterSize::Large => "large",
            ClusterSize::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// Tuning values written under `collection_optimization`.
///
/// Field order here is the key order in the written config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOptimization {
    pub cluster_size: ClusterSize,
    pub node_rrd_timeframe: RrdTimeframe,
    pub guest_rrd_timeframe: RrdTimeframe,
    pub parallel_collection_enabled: bool,
    pub max_parallel_workers: u32,
    pub skip_stopped_guest_rrd: bool,
}

impl Default for CollectionOptimization {
    fn default() -> Self {
        Self {
            cluster_size: ClusterSize::Medium,
            node_rrd_timeframe: RrdTimeframe::Day,
            guest_rrd_timeframe: RrdTimeframe::Hour,
            parallel_collection_enabled: true,
            max_parallel_workers: DEFAULT_MAX_PARALLEL_WORKERS,
            skip_stopped_guest_rrd: true,
        }
    }
}

impl CollectionOptimization {
    pub fn with_cluster_size(mut self, cluster_size: ClusterSize) -> Self {
        self.cluster_size = cluster_size;
        self
    }

    pub fn with_node_rrd_timeframe(mut self, timeframe: RrdTimeframe) -> Self {
        self.node_rrd_timeframe = timeframe;
        self
    }

    pub fn with_max_parallel_workers(mut self, workers: u32) -> Self {
        self.max_parallel_workers = workers;
        self
    }
}

// Define the preset configuration struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetConfig {
    pub name: PresetName,
    pub description: String,
    pub collection_interval_minutes: u32,
    pub collection_optimization: CollectionOptimization,
}

// Global preset registry (initialized on first access)
static PRESET_REGISTRY: OnceLock<Vec<PresetConfig>> = OnceLock::new();

fn get_preset_registry() -> &'static [PresetConfig] {
    PRESET_REGISTRY.get_or_init(|| {
        PresetName::ALL.into_iter().map(create_preset).collect()
    })
}

// Public API functions

/// Get a list of all available presets
pub fn list_available_presets() -> Vec<String> {
    get_preset_registry()
        .iter()
        .map(|preset| preset.name.to_string())
        .collect()
}

/// Get details about a specific preset. Names are matched case-insensitively.
pub fn get_preset_details(preset_name: &str) -> Option<&'static PresetConfig> {
    let name = preset_name.parse::<PresetName>().ok()?;
    Some(preset(name))
}

/// Look up a preset by its typed name
pub fn preset(name: PresetName) -> &'static PresetConfig {
    let registry = get_preset_registry();
    // The registry is built from PresetName::ALL in declaration order
    &registry[name as usize]
}

/// Render every preset and its values for human inspection
pub fn render_presets() -> String {
    let mut out = String::from("Available presets:\n");

    for preset in get_preset_registry() {
        let opt = &preset.collection_optimization;
        out.push('\n');
        out.push_str(&format!("  {}\n", preset.name));
        out.push_str(&format!("    {}\n", preset.description));
        out.push_str(&format!("    collection_interval_minutes: {}\n", preset.collection_interval_minutes));
        out.push_str(&format!("    cluster_size: {}\n", opt.cluster_size));
        out.push_str(&format!("    node_rrd_timeframe: {}\n", opt.node_rrd_timeframe));
        out.push_str(&format!("    guest_rrd_timeframe: {}\n", opt.guest_rrd_timeframe));
        out.push_str(&format!("    parallel_collection_enabled: {}\n", opt.parallel_collection_enabled));
        out.push_str(&format!("    max_parallel_workers: {}\n", opt.max_parallel_workers));
        out.push_str(&format!("    skip_stopped_guest_rrd: {}\n", opt.skip_stopped_guest_rrd));
    }

    out
}

/// Find the preset whose values exactly match the two managed fields of a
/// config document, if any.
pub fn detect_applied_preset(document: &serde_json::Value) -> Option<PresetName> {
    let interval = document.get("collection_interval_minutes")?.as_u64()?;
    let optimization: CollectionOptimization =
        serde_json::from_value(document.get("collection_optimization")?.clone()).ok()?;

    get_preset_registry()
        .iter()
        .find(|preset| {
            u64::from(preset.collection_interval_minutes) == interval
                && preset.collection_optimization == optimization
        })
        .map(|preset| preset.name)
}

// Preset creation functions

fn create_preset(name: PresetName) -> PresetConfig {
    match name {
        PresetName::Small => create_small_preset(),
        PresetName::Medium => create_medium_preset(),
        PresetName::Large => create_large_preset(),
        PresetName::Custom => create_custom_preset(),
    }
}

fn create_small_preset() -> PresetConfig {
    let collection_optimization = CollectionOptimization::default()
        .with_cluster_size(ClusterSize::Small)
        .with_max_parallel_workers(3);

    PresetConfig {
        name: PresetName::Small,
        description: "Small cluster (< 30 VMs/CTs)".to_string(),
        collection_interval_minutes: 5,
        collection_optimization,
    }
}

fn create_medium_preset() -> PresetConfig {
    let collection_optimization = CollectionOptimization::default()
        .with_cluster_size(ClusterSize::Medium)
        .with_max_parallel_workers(5);

    PresetConfig {
        name: PresetName::Medium,
        description: "Medium cluster (30-100 VMs/CTs)".to_string(),
        collection_interval_minutes: 15,
        collection_optimization,
    }
}

fn create_large_preset() -> PresetConfig {
    // Large clusters trade node history resolution for faster collection
    let collection_optimization = CollectionOptimization::default()
        .with_cluster_size(ClusterSize::Large)
        .with_node_rrd_timeframe(RrdTimeframe::Hour)
        .with_max_parallel_workers(8);

    PresetConfig {
        name: PresetName::Large,
        description: "Large cluster (100+ VMs/CTs)".to_string(),
        collection_interval_minutes: 30,
        collection_optimization,
    }
}

fn create_custom_preset() -> PresetConfig {
    let collection_optimization = CollectionOptimization::default()
        .with_cluster_size(ClusterSize::Custom);

    PresetConfig {
        name: PresetName::Custom,
        description: "Custom configuration (manually tuned)".to_string(),
        collection_interval_minutes: DEFAULT_COLLECTION_INTERVAL_MINUTES,
        collection_optimization,
    }
}

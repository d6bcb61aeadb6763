mod config;

pub use config::{
    ClusterSize,
    CollectionOptimization,
    PresetConfig,
    PresetName,
    RrdTimeframe,
    DEFAULT_COLLECTION_INTERVAL_MINUTES,
    DEFAULT_MAX_PARALLEL_WORKERS,
};

// Re-export the public API functions
pub use config::{
    list_available_presets,
    get_preset_details,
    preset,
    render_presets,
    detect_applied_preset,
};

use log::{debug, info};
use proxbalance_presets::{
    list_presets, setup_logging, ApplierConfig, AppliedPreset, NoopTimerUpdater, PresetApplier,
    ScriptTimerUpdater, TimerUpdater,
};
use std::env;
use std::error::Error as _;
use std::process::ExitCode;

fn print_usage() {
    eprintln!("Usage: proxbalance-presets <preset_name>");
    eprintln!("       proxbalance-presets --no-timer <preset_name>");
    eprintln!("       proxbalance-presets --list | -l");
    eprintln!("       proxbalance-presets --current | -c");
    eprintln!();
    eprintln!("Config file: ${} (default {})", proxbalance_presets::config::CONFIG_PATH_ENV,
        proxbalance_presets::config::DEFAULT_CONFIG_PATH);
    eprintln!("Timer helper: ${} (default {})", proxbalance_presets::config::TIMER_SCRIPT_ENV,
        proxbalance_presets::config::DEFAULT_TIMER_SCRIPT);
}

fn report_error(err: &proxbalance_presets::Error) {
    eprintln!("Error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    debug!("{:?}", err);
}

fn print_summary(applied: &AppliedPreset) {
    let preset = applied.preset;
    let opt = &preset.collection_optimization;
    println!("Applied '{}' preset: {}", preset.name, preset.description);
    println!("  config file: {}", applied.config_path.display());
    println!("  collection_interval_minutes: {}", preset.collection_interval_minutes);
    println!("  cluster_size: {}", opt.cluster_size);
    println!("  node_rrd_timeframe: {}", opt.node_rrd_timeframe);
    println!("  guest_rrd_timeframe: {}", opt.guest_rrd_timeframe);
    println!("  parallel_collection_enabled: {}", opt.parallel_collection_enabled);
    println!("  max_parallel_workers: {}", opt.max_parallel_workers);
    println!("  skip_stopped_guest_rrd: {}", opt.skip_stopped_guest_rrd);
    // The failure itself is already logged by the applier
    println!("  timer updated: {}", if applied.timer_updated { "yes" } else { "no" });
}

fn run_apply<U: TimerUpdater>(applier: &PresetApplier<U>, preset_name: &str) -> ExitCode {
    match applier.apply(preset_name) {
        Ok(applied) => {
            print_summary(&applied);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            if matches!(e, proxbalance_presets::Error::UnknownPreset { .. }) {
                eprintln!("Run with --list to see the available presets.");
            }
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    // Set RUST_LOG environment variable if not already set
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    setup_logging();
    debug!("proxbalance-presets v{}", proxbalance_presets::version());

    let config = ApplierConfig::from_env();
    let args: Vec<String> = env::args().skip(1).collect();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => {
            print_usage();
            eprintln!();
            eprint!("{}", list_presets());
            ExitCode::FAILURE
        }
        ["--help" | "-h"] => {
            print_usage();
            ExitCode::SUCCESS
        }
        ["--list" | "-l"] => {
            print!("{}", list_presets());
            ExitCode::SUCCESS
        }
        ["--current" | "-c"] => {
            let applier = PresetApplier::new(&config.config_path, NoopTimerUpdater);
            match applier.current() {
                Ok(Some(name)) => {
                    println!("{}", name);
                    ExitCode::SUCCESS
                }
                Ok(None) => {
                    println!("none (values in {} match no preset)", config.config_path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    report_error(&e);
                    ExitCode::FAILURE
                }
            }
        }
        ["--no-timer", preset_name] => {
            info!("Timer update disabled");
            let applier = PresetApplier::new(&config.config_path, NoopTimerUpdater);
            run_apply(&applier, preset_name)
        }
        [preset_name] if !preset_name.starts_with('-') => {
            let updater = ScriptTimerUpdater::new(&config.timer_script);
            let applier = PresetApplier::new(&config.config_path, updater);
            run_apply(&applier, preset_name)
        }
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

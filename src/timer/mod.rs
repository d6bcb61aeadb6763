use crate::Result;
use log::debug;

pub mod process;

pub use process::ScriptTimerUpdater;

/// Refreshes the collection timer after the config file changes.
///
/// The applier only logs a failure from this call; it never undoes the
/// config write.
pub trait TimerUpdater {
    fn update_timer(&self) -> Result<()>;
}

/// Updater that does nothing, used for `--no-timer`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTimerUpdater;

impl TimerUpdater for NoopTimerUpdater {
    fn update_timer(&self) -> Result<()> {
        debug!("Skipping timer update");
        Ok(())
    }
}

impl<T: TimerUpdater + ?Sized> TimerUpdater for &T {
    fn update_timer(&self) -> Result<()> {
        (**self).update_timer()
    }
}

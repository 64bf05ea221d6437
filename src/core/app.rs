// Application State
// Scheduler that runs a sync pass on every interval until interrupted

use std::path::PathBuf;
use std::pin::pin;
use std::time::Duration;
use tracing::info;

use super::{AppConfig, SyncError};
use crate::operations::{Hasher, SyncEngine, SyncOutcome};
use crate::render::log_outcome;

/// Why the loop ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// An interrupt signal arrived
    Interrupted,
    /// Single-pass mode finished its pass
    Completed,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct App {
    /// Tree treated as ground truth
    pub source: PathBuf,

    /// Tree kept convergent with the source
    pub replica: PathBuf,

    /// Wait between the end of one pass and the start of the next
    pub interval: Duration,

    /// Stop after the first pass
    pub once: bool,

    engine: SyncEngine<Hasher>,
}

impl App {
    /// Create a new application instance
    pub fn new(source: PathBuf, replica: PathBuf, interval: Duration, config: &AppConfig) -> Self {
        Self {
            source,
            replica,
            interval,
            once: false,
            engine: SyncEngine::new(config.hasher()),
        }
    }

    /// Run a single pass and stop
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Run one pass on the current thread
    pub fn run_pass(&self) -> Result<SyncOutcome, SyncError> {
        self.engine.sync(&self.source, &self.replica)
    }

    /// Loop: sync, log, wait; until interrupted or a pass fails outright
    ///
    /// Each pass runs on a blocking worker. An interrupt is honoured both while
    /// waiting and mid-pass; in the latter case the pass is abandoned, not
    /// finished.
    pub async fn run(&self) -> Result<Shutdown, SyncError> {
        let mut interrupt = pin!(tokio::signal::ctrl_c());

        loop {
            let engine = self.engine.clone();
            let source = self.source.clone();
            let replica = self.replica.clone();
            let pass = tokio::task::spawn_blocking(move || engine.sync(&source, &replica));

            let joined = tokio::select! {
                joined = pass => joined,
                signal = &mut interrupt => return interrupted(signal),
            };
            let outcome = joined.map_err(|e| SyncError::Unexpected(format!("sync pass aborted: {e}")))??;

            log_outcome(&outcome);

            if self.once {
                info!("Synchronization complete");
                return Ok(Shutdown::Completed);
            }

            info!("Synchronization complete - Waiting {} seconds...", self.interval.as_secs());

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                signal = &mut interrupt => return interrupted(signal),
            }
        }
    }
}

fn interrupted(signal: std::io::Result<()>) -> Result<Shutdown, SyncError> {
    signal
        .map(|_| Shutdown::Interrupted)
        .map_err(|e| SyncError::Unexpected(format!("failed to listen for interrupt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let source = dir.path().join("source");
        let replica = dir.path().join("replica");
        fs::create_dir(&source).unwrap();
        fs::create_dir(&replica).unwrap();
        App::new(source, replica, Duration::from_secs(1), &AppConfig::default())
    }

    #[test]
    fn test_run_pass_syncs() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        fs::write(app.source.join("a.txt"), "hello").unwrap();

        let outcome = app.run_pass().unwrap();

        assert_eq!(outcome.summary().copied_files, 1);
        assert_eq!(fs::read_to_string(app.replica.join("a.txt")).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_single_pass_mode_completes() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir).once(true);
        fs::create_dir(app.source.join("sub")).unwrap();
        fs::write(app.source.join("sub/b.txt"), "world").unwrap();

        let shutdown = app.run().await.unwrap();

        assert_eq!(shutdown, Shutdown::Completed);
        assert_eq!(fs::read_to_string(app.replica.join("sub/b.txt")).unwrap(), "world");
    }

    #[tokio::test]
    async fn test_failed_pass_stops_the_loop() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        fs::remove_dir(&app.source).unwrap();

        let err = app.run().await.unwrap_err();

        assert!(matches!(err, SyncError::Io { .. }));
    }
}

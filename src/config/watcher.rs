//! Hot reload of the configuration file.
//!
//! Editors and deploy tools rarely replace a file in one step: a plain save
//! truncates first and writes afterwards, so a burst of filesystem events
//! can briefly expose an empty file. Events are coalesced until the file has
//! been quiet for the debounce window, then the file is read once. An empty
//! file is never treated as "all defaults".

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::GatewayConfig;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Sends a validated [`GatewayConfig`] every time the watched file settles.
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
    update_tx: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            debounce: DEFAULT_DEBOUNCE,
            update_tx,
        };
        (watcher, update_rx)
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching. Must be called inside a Tokio runtime.
    ///
    /// Reloading stops once the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<()>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = event_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, debounce = ?self.debounce, "Config watcher started");
        tokio::spawn(reload_loop(self.path, self.debounce, event_rx, self.update_tx));
        Ok(watcher)
    }
}

async fn reload_loop(
    path: PathBuf,
    debounce: Duration,
    mut events: mpsc::UnboundedReceiver<()>,
    updates: mpsc::UnboundedSender<GatewayConfig>,
) {
    while events.recv().await.is_some() {
        // Wait for the burst of events from a single save to go quiet.
        loop {
            match tokio::time::timeout(debounce, events.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        match read_update(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = ?path, "Config file reloaded");
                if updates.send(config).is_err() {
                    return;
                }
            }
            Ok(None) => {
                tracing::warn!(path = ?path, "Config file is empty, keeping current configuration");
            }
            Err(e) => {
                tracing::error!(path = ?path, error = %e, "Failed to reload config, keeping current configuration");
            }
        }
    }
}

/// Read the file for a reload. `Ok(None)` means it holds no settings yet.
pub fn read_update(path: &Path) -> Result<Option<GatewayConfig>, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    parse_config(&content).map(Some)
}

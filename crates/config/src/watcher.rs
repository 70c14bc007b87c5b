use crate::schema::Config;
use arc_swap::ArcSwap;
use discotui_types::DiscoError;
use std::{path::PathBuf, sync::Arc};

/// Holds the live configuration and reloads it when the backing file changes.
///
/// Without a file (defaults only) the watcher is a plain snapshot holder.
pub struct ConfigWatcher {
    current: Arc<ArcSwap<Config>>,
    path: Option<PathBuf>,
}

impl ConfigWatcher {
    /// Wraps an already-loaded configuration and the file it came from.
    #[must_use]
    pub fn new(config: Config, path: Option<PathBuf>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(config)),
            path,
        }
    }

    /// Returns a snapshot of the current configuration.
    #[must_use]
    pub fn load(&self) -> arc_swap::Guard<Arc<Config>> {
        self.current.load()
    }

    /// Returns a shareable `ArcSwap` handle for the TUI.
    #[must_use]
    pub fn arc(&self) -> Arc<ArcSwap<Config>> {
        Arc::clone(&self.current)
    }

    /// Manually reloads the configuration from disk. A no-op without a file.
    ///
    /// On error the previous configuration stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Config`] if the file cannot be read or parsed.
    pub fn reload(&self) -> Result<(), DiscoError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let new_config = Config::from_file(path)?;
        self.current.store(Arc::new(new_config));
        tracing::info!(path = %path.display(), "configuration reloaded");
        Ok(())
    }

    /// Starts background file watching on a detached thread that reloads the
    /// configuration when the file changes. The thread never blocks process
    /// exit.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Config`] if the OS watcher cannot be created or
    /// the file cannot be registered.
    pub fn watch(self: Arc<Self>) -> Result<(), DiscoError> {
        use notify::{RecursiveMode, Watcher as _};
        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            if res.is_ok_and(|ev| ev.kind.is_modify() || ev.kind.is_create()) {
                let _ = tx.send(());
            }
        })
        .map_err(|e| DiscoError::Config(format!("failed to create watcher: {e}")))?;
        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|e| DiscoError::Config(format!("failed to watch {}: {e}", path.display())))?;

        std::thread::spawn(move || {
            let _watcher = watcher;
            for () in rx {
                if let Err(e) = self.reload() {
                    tracing::warn!(error = %e, "config reload failed, keeping previous");
                }
            }
        });
        Ok(())
    }
}

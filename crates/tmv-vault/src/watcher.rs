//! File system watcher feeding vault changes to the mover.
//!
//! Uses the `notify` crate for cross-platform file system events
//! (FSEvents on macOS, inotify on Linux, ReadDirectoryChanges on Windows).

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use tmv_core::error::TmvError;

use crate::storage::{is_hidden, is_markdown};

/// Pause between a note appearing and its first metadata read, so the
/// writer has finished the frontmatter.
pub const CREATE_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Events emitted by the vault watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    /// A markdown file appeared.
    Created(PathBuf),
    /// A markdown file was modified or renamed.
    Changed(PathBuf),
}

impl VaultEvent {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Changed(path) => path.as_path(),
        }
    }
}

/// Watches a vault directory for file changes and emits events.
pub struct VaultWatcher {
    _watcher: RecommendedWatcher,
    receiver: mpsc::Receiver<VaultEvent>,
}

impl VaultWatcher {
    /// Start watching a vault directory for changes.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::Watch`] if the watcher cannot be created.
    pub fn start(vault_root: &Path) -> Result<Self, TmvError> {
        let (tx, rx) = mpsc::channel();
        let vault_root_owned = vault_root.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else {
                return;
            };
            for path in &event.paths {
                if !is_markdown(path) {
                    continue;
                }
                // Skip hidden directories (.tmv, .obsidian, .git)
                if path
                    .strip_prefix(&vault_root_owned)
                    .ok()
                    .and_then(|rel| rel.components().next())
                    .is_some_and(|c| is_hidden(c.as_os_str()))
                {
                    continue;
                }

                let vault_event = match event.kind {
                    EventKind::Create(_) => VaultEvent::Created(path.clone()),
                    EventKind::Modify(_) => VaultEvent::Changed(path.clone()),
                    _ => continue,
                };
                let _ = tx.send(vault_event);
            }
        })
        .map_err(|e| TmvError::Watch(e.to_string()))?;

        watcher
            .watch(vault_root, RecursiveMode::Recursive)
            .map_err(|e| TmvError::Watch(e.to_string()))?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Try to receive the next event with a timeout.
    ///
    /// Returns `None` if no event is available within the timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<VaultEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&self) -> Option<VaultEvent> {
        self.receiver.try_recv().ok()
    }
}

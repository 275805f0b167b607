//! Chart watching for `watch` mode
//!
//! Each watched chart is registered with notify once and remembers the key it
//! is transposed to. Paths are canonicalized so events reported by notify
//! match the path the user typed.

use chordshift_core::Key;
use crossbeam_channel::Sender;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical form of a path, or the path itself if it cannot be resolved
fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Watches chord charts and sends their change events to a channel
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    charts: HashMap<PathBuf, Key>,
}

impl FileWatcher {
    /// Create a watcher that forwards notify events to `tx`
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // Receiver dropped means the REPL is shutting down
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            charts: HashMap::new(),
        })
    }

    /// Watch `path`, transposing to `key`.
    ///
    /// A chart that is already watched only has its key replaced. Returns the
    /// key it had before, if any.
    pub fn watch(&mut self, path: &Path, key: Key) -> notify::Result<Option<Key>> {
        let path = canonical(path);
        if let Some(previous) = self.charts.insert(path.clone(), key) {
            debug!(path = %path.display(), from = %previous, to = %key, "watch key changed");
            return Ok(Some(previous));
        }

        if let Err(e) = self.watcher.watch(&path, RecursiveMode::NonRecursive) {
            self.charts.remove(&path);
            return Err(e);
        }
        Ok(None)
    }

    /// Stop watching `path`. Returns the key it was watched with, or `None`
    /// if it was not being watched.
    pub fn unwatch(&mut self, path: &Path) -> notify::Result<Option<Key>> {
        let path = canonical(path);
        match self.charts.remove(&path) {
            Some(key) => {
                self.watcher.unwatch(&path)?;
                Ok(Some(key))
            }
            None => Ok(None),
        }
    }

    /// Target key of a watched chart
    pub fn key_for(&self, path: &Path) -> Option<Key> {
        self.charts.get(&canonical(path)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use tempfile::tempdir;

    fn watcher() -> FileWatcher {
        let (tx, _rx) = unbounded();
        FileWatcher::new(tx).unwrap()
    }

    #[test]
    fn test_rewatch_replaces_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.txt");
        std::fs::write(&path, "Key: C\n").unwrap();

        let mut watcher = watcher();
        assert_eq!(watcher.watch(&path, Key::D).unwrap(), None);
        assert_eq!(watcher.watch(&path, Key::A).unwrap(), Some(Key::D));
        assert_eq!(watcher.key_for(&path), Some(Key::A));
    }

    #[test]
    fn test_unwatch_forgets_chart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.txt");
        std::fs::write(&path, "Key: C\n").unwrap();

        let mut watcher = watcher();
        watcher.watch(&path, Key::G).unwrap();
        assert_eq!(watcher.unwatch(&path).unwrap(), Some(Key::G));
        assert_eq!(watcher.key_for(&path), None);
        assert_eq!(watcher.unwatch(&path).unwrap(), None);
    }

    #[test]
    fn test_relative_and_absolute_paths_match() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.txt");
        std::fs::write(&path, "Key: C\n").unwrap();

        let mut watcher = watcher();
        watcher.watch(&dir.path().join(".").join("chart.txt"), Key::E).unwrap();
        assert_eq!(watcher.key_for(&path), Some(Key::E));
    }

    #[test]
    fn test_watch_missing_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let mut watcher = watcher();
        assert!(watcher.watch(&missing, Key::C).is_err());
        assert_eq!(watcher.key_for(&missing), None);
    }
}

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// A file system watcher for the backing todo.txt file.
///
/// Watches the file's parent directory rather than the file itself, so the
/// watch survives editors and scripts that replace the file by rename. The
/// notify thread only forwards matching events over a channel; the session
/// drains the channel once per tick, which coalesces a burst of raw events
/// (truncate-then-append writers) into a single reload.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl FileWatcher {
    /// Start watching the given todo.txt path.
    pub fn start(file: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watched: PathBuf = file
            .canonicalize()
            .unwrap_or_else(|_| file.to_path_buf());
        let file_name = watched.file_name().map(|n| n.to_os_string());
        let dir = watched
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if relevant {
                    let _ = tx.send(());
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(FileWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll. Drains every queued event and reports whether any
    /// arrived, so callers reload at most once per drain.
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn wait_for_change(watcher: &FileWatcher) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if watcher.poll_changed() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(25));
        }
        false
    }

    #[test]
    fn test_detects_write_to_watched_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "one\n").unwrap();

        let watcher = FileWatcher::start(&path).unwrap();
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(wait_for_change(&watcher));
    }

    #[test]
    fn test_burst_drains_to_single_poll() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "one\n").unwrap();

        let watcher = FileWatcher::start(&path).unwrap();
        for i in 0..5 {
            fs::write(&path, format!("line {i}\n")).unwrap();
        }

        assert!(wait_for_change(&watcher));
        // Let any stragglers arrive, drain them, then the queue is quiet.
        std::thread::sleep(Duration::from_millis(300));
        watcher.poll_changed();
        assert!(!watcher.poll_changed());
    }

    #[test]
    fn test_ignores_sibling_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "one\n").unwrap();

        let watcher = FileWatcher::start(&path).unwrap();
        fs::write(dir.path().join("other.txt"), "noise\n").unwrap();

        std::thread::sleep(Duration::from_millis(300));
        assert!(!watcher.poll_changed());
    }
}

//! File watcher for the listings seed file.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

/// Events from the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatcherEvent {
    /// The listings file was created or modified
    ListingsChanged,
    /// Watcher error
    Error(String),
}

/// Watches the directory holding the listings file.
///
/// Editors often replace files instead of writing in place, so the parent
/// directory is watched and events are matched by file name.
pub struct ListingsWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<WatcherEvent>,
    path: Utf8PathBuf,
}

impl ListingsWatcher {
    pub fn new(path: &Utf8Path) -> Result<Self> {
        let (tx, rx) = channel();
        let watcher = create_watcher(tx, path)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path: path.to_owned(),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Try to receive an event without blocking.
    pub fn try_recv_nonblocking(&self) -> Option<WatcherEvent> {
        self.receiver.try_recv().ok()
    }
}

fn watch_dir(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Create and configure the file watcher.
fn create_watcher(tx: Sender<WatcherEvent>, path: &Utf8Path) -> Result<RecommendedWatcher> {
    let file_name = path.file_name().map(str::to_string);

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => handle_event(event, &tx, file_name.as_deref()),
            Err(e) => {
                let _ = tx.send(WatcherEvent::Error(e.to_string()));
            }
        },
        Config::default().with_poll_interval(Duration::from_millis(500)),
    )
    .into_diagnostic()?;

    watcher
        .watch(watch_dir(path).as_std_path(), RecursiveMode::NonRecursive)
        .into_diagnostic()?;

    Ok(watcher)
}

/// Forward create/modify events that touch the listings file.
fn handle_event(event: Event, tx: &Sender<WatcherEvent>, file_name: Option<&str>) {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }

    let touches_listings = file_name.is_some()
        && event
            .paths
            .iter()
            .any(|p| p.file_name().and_then(|n| n.to_str()) == file_name);

    if touches_listings {
        let _ = tx.send(WatcherEvent::ListingsChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Utf8Path::new("data/listings.json")).as_str(), "data");
        assert_eq!(watch_dir(Utf8Path::new("listings.json")).as_str(), ".");
    }

    #[test]
    fn test_matches_by_file_name() {
        let (tx, rx) = channel();

        handle_event(
            event(EventKind::Modify(ModifyKind::Any), "/srv/data/listings.json"),
            &tx,
            Some("listings.json"),
        );
        handle_event(
            event(EventKind::Create(CreateKind::File), "/srv/data/processes.json"),
            &tx,
            Some("listings.json"),
        );
        handle_event(
            event(EventKind::Remove(RemoveKind::File), "/srv/data/listings.json"),
            &tx,
            Some("listings.json"),
        );

        assert_eq!(rx.try_recv().ok(), Some(WatcherEvent::ListingsChanged));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_watcher_reports_writes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("listings.json")).unwrap();
        std::fs::write(&path, "[]").unwrap();

        let watcher = ListingsWatcher::new(&path).unwrap();
        assert_eq!(watcher.path(), path.as_path());
        std::fs::write(&path, "[ ]").unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        let mut seen = false;
        while std::time::Instant::now() < deadline && !seen {
            seen = matches!(watcher.try_recv_nonblocking(), Some(WatcherEvent::ListingsChanged));
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(seen);
    }
}

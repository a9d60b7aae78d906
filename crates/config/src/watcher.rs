use fuel_core::Message;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Bursts of filesystem events closer together than this collapse into one reload.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the config file and posts [`Message::ConfigReloaded`] after every change.
///
/// The parent directory is watched rather than the file itself so that
/// editors which save by rename, and files created after startup, are seen.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (tx, mut rx) = tokio::sync::mpsc::channel(8);
/// let _watcher = fuel_config::ConfigWatcher::spawn("/home/user/.config/fuelstats/fuelstats.toml", tx);
/// while let Some(msg) = rx.recv().await {
///     println!("{msg:?}");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
    task: tokio::task::JoinHandle<()>,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path` that feeds `tx`.
    pub fn spawn(path: impl AsRef<Path>, tx: mpsc::Sender<Message>) -> Self {
        let path = path.as_ref().to_path_buf();
        let task = tokio::spawn(watch_loop(path.clone(), tx));
        Self { path, task }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<Message>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };
    let file_name = path.file_name().map(|n| n.to_os_string());

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) => {
                if !touches_config(&e, file_name.as_deref()) {
                    continue;
                }

                // Swallow the rest of the burst.
                tokio::time::sleep(DEBOUNCE).await;
                while sync_rx.try_recv().is_ok() {}

                debug!("Config file changed");
                if tx.send(Message::ConfigReloaded).await.is_err() {
                    break; // receiver dropped
                }
            }
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

fn touches_config(event: &notify::Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    use notify::EventKind::*;

    if !matches!(event.kind, Modify(_) | Create(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name() == file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind};
    use std::ffi::OsStr;

    fn event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn only_writes_to_the_config_file_count() {
        let name = Some(OsStr::new("fuelstats.toml"));
        assert!(touches_config(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/fuelstats.toml"),
            name
        ));
        assert!(touches_config(
            &event(EventKind::Create(CreateKind::File), "/cfg/fuelstats.toml"),
            name
        ));
        assert!(!touches_config(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/other.toml"),
            name
        ));
        assert!(!touches_config(
            &event(EventKind::Remove(RemoveKind::File), "/cfg/fuelstats.toml"),
            name
        ));
    }
}

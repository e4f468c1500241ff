//! # Config Hot-Reloading
//!
//! Watches the config file with [`notify`] and sends every successfully parsed
//! version down a channel. The main loop drains the channel between frames,
//! so reloads never race with a step.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use anyhow::Result;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tracing::{error, info, warn};

use crate::config::ConfigFile;

/// Keeps the watcher alive; dropping it stops the notifications.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    updates: Receiver<ConfigFile>,
}

impl ConfigWatcher {
    /// Latest reloaded config, if the file changed since the last call.
    pub fn latest(&self) -> Option<ConfigFile> {
        self.updates.try_iter().last()
    }
}

fn is_config_event(event: &Event, target: &Path) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event.paths.iter().any(|p| p.file_name() == target.file_name())
}

/// Start watching `path`.
///
/// The parent directory is watched rather than the file, since editors often
/// replace the file instead of writing to it.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created or registered.
pub fn start(path: &Path) -> Result<ConfigWatcher> {
    let target: PathBuf = path.to_path_buf();
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let (tx, updates) = mpsc::channel();
    let watched = target.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_config_event(&event, &watched) => match ConfigFile::load(&watched) {
            Ok(config) => {
                info!(path = %watched.display(), "config reloaded");
                // receiver gone means the run is over
                let _ = tx.send(config);
            }
            Err(e) => warn!("ignoring config change: {e:#}"),
        },
        Ok(_) => {}
        Err(e) => error!("error watching config: {e:?}"),
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!(path = %target.display(), "config watcher started");
    Ok(ConfigWatcher {
        _watcher: watcher,
        updates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, EventKind, ModifyKind};
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};

    fn modify(path: &str) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from(path))
    }

    #[test]
    fn test_config_event_matches_target_file_only() {
        let target = Path::new("/tmp/scene/jelly.json");
        assert!(is_config_event(&modify("/tmp/scene/jelly.json"), target));
        assert!(is_config_event(
            &Event::new(EventKind::Create(CreateKind::File)).add_path(target.to_path_buf()),
            target
        ));
        assert!(!is_config_event(&modify("/tmp/scene/other.json"), target));
        assert!(!is_config_event(
            &Event::new(EventKind::Remove(notify::event::RemoveKind::File))
                .add_path(target.to_path_buf()),
            target
        ));
    }

    #[test]
    fn test_rewritten_config_is_delivered() {
        let dir = std::env::temp_dir().join(format!("jelly-watch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("jelly.json");
        fs::write(&path, r#"{ "params": { "damping": 0.03 } }"#).unwrap();

        let watcher = start(&path).unwrap();
        thread::sleep(Duration::from_millis(100));
        fs::write(&path, r#"{ "params": { "damping": 0.25 } }"#).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut damping = None;
        while Instant::now() < deadline {
            if let Some(config) = watcher.latest() {
                damping = Some(config.params.damping);
                if (config.params.damping - 0.25).abs() < 1e-6 {
                    break;
                }
            }
            thread::sleep(Duration::from_millis(20));
        }
        fs::remove_dir_all(&dir).ok();

        let damping = damping.expect("no reload within 5 s");
        assert!((damping - 0.25).abs() < 1e-6, "damping={damping}");
    }
}

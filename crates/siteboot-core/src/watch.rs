//! Recursive mirror watcher.
//!
//! Observes file writes under the bootstrap directory and replays them
//! into the site's tracked `content/` subtree. The exclusion policy keeps
//! the site checkout, the runtime tree, and VCS metadata out of the
//! mirror, which also breaks the feedback loop of mirroring the mirror's
//! own output.
//!
//! Events flow from the notify backend through one bounded channel into
//! one consumer loop, so mirror writes are strictly serialized.

use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Watch backend error: {0}")]
    Notify(#[from] notify::Error),
}

/// Which paths are eligible for mirroring: everything under `root` that
/// is under none of the excluded subtrees. Fixed for the lifetime of the
/// watcher.
#[derive(Debug, Clone)]
pub struct WatchPolicy {
    root: PathBuf,
    excluded: Vec<PathBuf>,
}

impl WatchPolicy {
    pub fn new(root: PathBuf, excluded: Vec<PathBuf>) -> Self {
        Self { root, excluded }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn allows(&self, path: &Path) -> bool {
        path.starts_with(&self.root) && !self.excluded.iter().any(|sub| path.starts_with(sub))
    }
}

/// Translates a changed path under the watch root to its counterpart
/// under the destination tree.
#[derive(Debug, Clone)]
pub struct MirrorMapping {
    source_root: PathBuf,
    destination_root: PathBuf,
}

impl MirrorMapping {
    pub fn new(source_root: PathBuf, destination_root: PathBuf) -> Self {
        Self {
            source_root,
            destination_root,
        }
    }

    pub fn destination_for(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(&self.source_root)
            .ok()
            .map(|relative| self.destination_root.join(relative))
    }
}

/// Long-lived watch loop: runs from startup until the shutdown channel
/// fires.
#[derive(Debug)]
pub struct MirrorWatcher {
    policy: WatchPolicy,
    mapping: MirrorMapping,
}

impl MirrorWatcher {
    pub fn new(policy: WatchPolicy, mapping: MirrorMapping) -> Self {
        Self { policy, mapping }
    }

    /// Watch recursively and mirror until shutdown. Per-event copy
    /// failures are logged and never end the loop; only a failure to
    /// register the watch itself is an error.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), WatchError> {
        let (tx, mut rx) = mpsc::channel::<notify::Event>(EVENT_CHANNEL_CAPACITY);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<notify::Event, notify::Error>| match result {
                // blocking_send: backpressure lands on the notify thread,
                // this loop stays the only consumer.
                Ok(event) => {
                    let _ = tx.blocking_send(event);
                }
                Err(error) => warn!(%error, "watch backend error"),
            },
            notify::Config::default(),
        )?;
        watcher.watch(self.policy.root(), RecursiveMode::Recursive)?;
        info!(root = %self.policy.root().display(), "mirroring file writes");

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                event = rx.recv() => {
                    let Some(event) = event else { break };
                    self.handle_event(&event);
                }
            }
        }

        Ok(())
    }

    fn handle_event(&self, event: &notify::Event) {
        if !is_write(&event.kind) {
            return;
        }
        for path in &event.paths {
            if path.is_dir() || !self.policy.allows(path) {
                continue;
            }
            let Some(destination) = self.mapping.destination_for(path) else {
                continue;
            };
            match mirror_file(path, &destination) {
                Ok(()) => {
                    debug!(source = %path.display(), destination = %destination.display(), "mirrored");
                }
                Err(error) => {
                    warn!(
                        source = %path.display(),
                        destination = %destination.display(),
                        %error,
                        "mirror copy failed"
                    );
                }
            }
        }
    }
}

fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any))
}

/// Whole-file copy; destination parents are created as needed.
fn mirror_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = std::fs::read(source)?;
    std::fs::write(destination, bytes)
}

use std::ffi::OsStr;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::build::build;
use crate::log;
use crate::manifest::Manifest;
use crate::report::{ErrorExt, Report};
use crate::Build;

/// Quiet period after the last file event before rebuilding.
const SETTLE: Duration = Duration::from_millis(150);

pub fn watch(b: &Build, m: &Manifest) -> Report<()> {
    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(tx).message("failed to create file watcher")?;

    // The crate root is watched rather than `index.html` itself, so the
    // page shell is picked up when it is created or replaced by a rename.
    watch_path(&mut watcher, &m.root.join("src"), RecursiveMode::Recursive)?;
    watch_path(&mut watcher, &m.root, RecursiveMode::NonRecursive)?;

    log::watching!("{} for changes", m.root.display());

    while let Ok(event) = rx.recv() {
        let mut changed = is_change(event, &m.root);

        // A single save usually arrives as a burst of events.
        while let Ok(event) = rx.recv_timeout(SETTLE) {
            changed |= is_change(event, &m.root);
        }

        if !changed {
            continue;
        }

        if let Err(err) = build(b, m) {
            log::error!("{err}");
        }
    }

    Ok(())
}

fn watch_path(watcher: &mut impl Watcher, path: &Path, mode: RecursiveMode) -> Report<()> {
    watcher
        .watch(path, mode)
        .with_message(|| format!("failed to watch {}", path.display()))?;

    log::info!("watching {}", path.display());

    Ok(())
}

fn is_change(event: notify::Result<Event>, root: &Path) -> bool {
    match event {
        Ok(event) => {
            log::info!("{:?} {:?}", event.kind, event.paths);

            is_relevant(&event, root)
        }
        Err(err) => {
            log::error!("watching files: {err}");

            false
        }
    }
}

/// Whether an event touches the sources or the page shell of the crate.
fn is_relevant(event: &Event, root: &Path) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }

    let src = root.join("src");

    event.paths.iter().any(|path| {
        let index = path.parent() == Some(root) && path.file_name() == Some(OsStr::new("index.html"));

        index || path.starts_with(&src)
    })
}

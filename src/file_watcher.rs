// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Filesystem watcher for detecting external edits to the open document.
//!
//! Watches the document's parent directory with `notify` (editors often
//! save by writing a temp file and renaming it over the original, which a
//! watch on the file itself would miss) and keeps only events touching the
//! document. A 1-second debounce batches bursts of writes, and the shared
//! save flag suppresses reloads caused by our own Cmd+S.

use notify::{Event, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use xilem::core::MessageProxy;
use xilem::tokio;

/// Message sent when the document changed on disk.
#[derive(Debug)]
pub struct DocumentChanged;

/// Does `event` touch `document`?
fn is_relevant(event: &Event, document: &Path) -> bool {
    use notify::EventKind::*;
    matches!(event.kind, Create(_) | Modify(_) | Remove(_))
        && event.paths.iter().any(|path| path == document)
}

/// Watch `document` and send `DocumentChanged` via the Xilem proxy.
pub async fn watch_document(
    proxy: MessageProxy<DocumentChanged>,
    document: PathBuf,
    save_flag: Arc<AtomicBool>,
) {
    // Events report absolute paths
    let document = std::fs::canonicalize(&document)
        .or_else(|_| std::env::current_dir().map(|dir| dir.join(&document)))
        .unwrap_or(document);
    let Some(directory) = document.parent().map(Path::to_path_buf) else {
        tracing::error!("Cannot watch {}: no parent directory", document.display());
        return;
    };

    let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(64);

    let target = document.clone();
    // The watcher lives on this stack frame for as long as the task runs
    let mut watcher = match notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
        if let Ok(event) = result
            && is_relevant(&event, &target)
        {
            let _ = tx.blocking_send(event);
        }
    }) {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("Failed to create file watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&directory, RecursiveMode::NonRecursive) {
        tracing::error!("Failed to watch {}: {}", directory.display(), e);
        return;
    }
    tracing::info!("Watching for external changes: {}", document.display());

    loop {
        let Some(_first) = rx.recv().await else {
            break;
        };

        if save_flag.load(Ordering::SeqCst) {
            drain_events(&mut rx).await;
            save_flag.store(false, Ordering::SeqCst);
            continue;
        }

        // Debounce: wait until 1 second of quiet
        loop {
            match tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
                Ok(Some(_)) => continue,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        if save_flag.load(Ordering::SeqCst) {
            save_flag.store(false, Ordering::SeqCst);
            continue;
        }

        tracing::info!("External changes detected, reloading");

        if proxy.message(DocumentChanged).is_err() {
            break;
        }
    }
}

/// Drain all pending events from the channel without blocking.
async fn drain_events(rx: &mut tokio::sync::mpsc::Receiver<Event>) {
    tokio::time::sleep(Duration::from_millis(500)).await;
    while rx.try_recv().is_ok() {}
}

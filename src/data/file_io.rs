// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! File I/O operations for AppState (open, save, reload)

use super::AppState;
use crate::document;
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;

impl AppState {
    /// Load `path` into the editor and remember it as the document.
    pub fn load_document(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = document::load(path)
            .with_context(|| format!("Could not open {}", document::display_name(path)))?;
        tracing::info!(
            "Loaded {} ({} chars)",
            path.display(),
            text.chars().count()
        );
        Arc::make_mut(&mut self.editor).set_text(&text);
        self.document_path = Some(path.to_path_buf());
        self.error_message = None;
        Ok(())
    }

    /// Open `path`, reporting failures in the status line.
    pub fn open_document(&mut self, path: PathBuf) {
        if let Err(e) = self.load_document(&path) {
            let error = format!("{e:#}");
            tracing::error!("{}", error);
            self.error_message = Some(error);
        }
    }

    /// Save the current text to the document path.
    pub fn save_document(&mut self) {
        let Some(path) = self.document_path.clone() else {
            self.error_message = Some("No file to save to (start with a path)".to_string());
            tracing::warn!("Save requested without a document path");
            return;
        };

        self.save_in_progress.store(true, Ordering::SeqCst);
        match document::save(&path, &self.editor.text()) {
            Ok(()) => {
                tracing::info!("Saved: {}", path.display());
                self.error_message = None;
                self.last_saved = Some(Local::now().format("%I:%M %p").to_string());
            }
            Err(e) => {
                self.save_in_progress.store(false, Ordering::SeqCst);
                let error = format!("Failed to save: {}", e);
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }

    /// Re-read the document after an external change.
    pub fn reload_from_disk(&mut self) {
        let Some(path) = self.document_path.clone() else {
            return;
        };
        match document::load(&path) {
            Ok(text) if text == self.editor.text() => {
                tracing::debug!("Reload skipped, text unchanged");
            }
            Ok(text) => {
                tracing::info!("Reloaded {}", path.display());
                Arc::make_mut(&mut self.editor).set_text(&text);
                self.error_message = None;
            }
            Err(e) => {
                let error = format!("Failed to reload: {}", e);
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }

    /// Path the file watcher should follow, if any.
    pub fn watched_document(&self) -> Option<PathBuf> {
        self.document_path.clone()
    }
}

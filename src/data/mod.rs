// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Central application state (`AppState`) that drives the Xilem reactive UI.
//!
//! `AppState` owns the current editor, the open document and window
//! metadata. Every UI rebuild reads from `AppState`; mutations happen in
//! event callbacks and propagate through the Xilem view tree. Sub-modules
//! split the methods by domain: file I/O and editor lifecycle.

mod editor;
mod file_io;

use crate::config::SaggerConfig;
use crate::editor::{EditorOptions, SagEditor, create_editor};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use xilem::WindowId;

/// Text shown when no document is given on the command line
pub const DEFAULT_TEXT: &str = "def my_function():\n    print('Hello World')\n";

/// Main application state
pub struct AppState {
    /// The current editor. Replaced wholesale on style switches; the
    /// editor widget notices the new Arc and swaps its copy.
    pub editor: Arc<SagEditor>,

    /// Loaded configuration (font size, options for new editors)
    pub config: SaggerConfig,

    /// File backing the text, if any
    pub document_path: Option<PathBuf>,

    /// Error message to display, if any
    pub error_message: Option<String>,

    /// When the file was last saved (formatted time string for UI)
    pub last_saved: Option<String>,

    /// Set while we write the document, so the watcher ignores our own save
    pub save_in_progress: Arc<AtomicBool>,

    /// Whether the app should keep running
    pub running: bool,

    /// Main window ID (stable across rebuilds to prevent window
    /// recreation)
    pub main_window_id: WindowId,
}

impl AppState {
    /// Create the initial state from `config`, holding the default text.
    pub fn new(config: SaggerConfig) -> Self {
        let mut editor = create_editor(config.style, EditorOptions::from(&config));
        editor.set_text(DEFAULT_TEXT);
        editor.set_weight(config.weight);

        Self {
            editor: Arc::new(editor),
            config,
            document_path: None,
            error_message: None,
            last_saved: None,
            save_in_progress: Arc::new(AtomicBool::new(false)),
            running: true,
            main_window_id: WindowId::next(),
        }
    }
}

/// Implement the Xilem AppState trait
impl xilem::AppState for AppState {
    fn keep_running(&self) -> bool {
        self.running
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SaggerConfig::default())
    }
}

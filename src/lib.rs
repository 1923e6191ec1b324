// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Sagger: a plain text editor whose lines sag under their own weight
//!
//! Each line of text bends along a curve chosen from a small set of styles
//! (no sag, a hanging end, a drooping center), scaled by a user-controlled
//! weight. Glyphs are offset vertically and rotated to follow the curve.

use std::path::PathBuf;

use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use xilem::core::fork;
use xilem::{EventLoopBuilder, WidgetView, WindowView, Xilem, window};

pub mod canvas;
pub mod components;
pub mod config;
pub mod curve;
pub mod data;
pub mod document;
pub mod editor;
pub mod file_watcher;
pub mod layout;
pub mod metrics;
pub mod settings;
pub mod text;
pub mod theme;
pub mod views;
pub mod widget;

use config::SaggerConfig;
use data::AppState;
use views::editor_screen;

/// Entry point for the Sagger application
pub fn run(event_loop: EventLoopBuilder) -> Result<(), EventLoopError> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    // Filter out noisy wgpu/naga shader compilation logs
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sagger=info".parse().unwrap())
                .add_directive("wgpu=warn".parse().unwrap())
                .add_directive("naga=warn".parse().unwrap())
                .add_directive("wgpu_core=warn".parse().unwrap())
                .add_directive("wgpu_hal=warn".parse().unwrap()),
        )
        .init();

    let config = SaggerConfig::load();
    let mut initial_state = AppState::new(config);

    // Check for command-line argument (document path)
    handle_command_line_args(&mut initial_state);

    let app = Xilem::new(initial_state, app_logic);
    app.run_in(event_loop)?;
    Ok(())
}

/// Handle command-line arguments to load a text document
fn handle_command_line_args(initial_state: &mut AppState) {
    let Some(arg) = std::env::args().nth(1) else {
        return;
    };
    let path = PathBuf::from(arg);

    if path.is_file() {
        initial_state.open_document(path);
    } else {
        // A new file: start from an empty document and create it on save
        tracing::info!("New document: {}", path.display());
        std::sync::Arc::make_mut(&mut initial_state.editor).set_text("");
        initial_state.document_path = Some(path);
    }
}

/// Build the single editor window.
fn app_logic(state: &mut AppState) -> impl Iterator<Item = WindowView<AppState>> + use<> {
    let title = match &state.document_path {
        Some(path) => format!("Sagger - {}", document::display_name(path)),
        None => "Sagger".to_string(),
    };

    let window_size = LogicalSize::new(960.0, 640.0);
    let window_view = window(state.main_window_id, title, editor_with_watcher(state));
    let window_with_options = window_view.with_options(|options| {
        options
            .with_initial_inner_size(window_size)
            .on_close(|state: &mut AppState| state.running = false)
    });

    std::iter::once(window_with_options)
}

/// Editor screen with a file watcher for reloading external changes.
///
/// Wraps `editor_screen` with a `fork` + `task_raw` that watches the open
/// document. When external changes are detected (after a 1-second
/// debounce), the text is reloaded from disk.
fn editor_with_watcher(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let document = state.watched_document();
    let save_flag = state.save_in_progress.clone();
    let screen = editor_screen(state);

    fork(
        screen,
        xilem::view::task_raw(
            move |proxy| {
                let document = document.clone();
                let flag = save_flag.clone();
                async move {
                    if let Some(path) = document {
                        file_watcher::watch_document(proxy, path, flag).await;
                    }
                }
            },
            |state: &mut AppState, _msg: file_watcher::DocumentChanged| {
                state.reload_from_disk();
            },
        ),
    )
}

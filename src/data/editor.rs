// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor lifecycle for AppState: weight, style and widget updates

use super::AppState;
use crate::curve::CurveStyle;
use crate::document;
use crate::widget::EditorUpdate;
use std::sync::Arc;

impl AppState {
    /// Set the weight from a UI control. Out-of-range values are clamped.
    pub fn set_weight(&mut self, weight: f64) {
        let editor = Arc::make_mut(&mut self.editor);
        if editor.set_weight(weight) {
            tracing::info!("Weight: {:.1}", editor.weight());
        }
    }

    /// Step the weight up or down by whole increments.
    pub fn step_weight(&mut self, steps: i32) {
        let editor = Arc::make_mut(&mut self.editor);
        if editor.step_weight(steps) {
            tracing::info!("Weight: {:.1}", editor.weight());
        }
    }

    /// Replace the editor with a fresh one for `style`, keeping the text
    /// and the weight.
    pub fn select_style(&mut self, style: CurveStyle) {
        if self.editor.style() == style {
            return;
        }
        let current = Arc::unwrap_or_clone(Arc::clone(&self.editor));
        self.editor = Arc::new(current.switch_style(style));
    }

    /// Take the editor reported by the widget, saving if it asked to.
    pub fn apply_editor_update(&mut self, update: EditorUpdate) {
        self.editor = Arc::new(update.editor);
        if update.save_requested {
            self.save_document();
        }
    }

    pub fn weight_label(&self) -> String {
        format!("Weight: {:.1}", self.editor.weight())
    }

    /// One-line summary for the status bar.
    pub fn status_text(&self) -> String {
        if let Some(error) = &self.error_message {
            return error.clone();
        }
        let (line, column) = self.editor.caret_line_position();
        let name = self
            .document_path
            .as_deref()
            .map(document::display_name)
            .unwrap_or_else(|| "untitled".to_string());
        let mut status = format!(
            "{name} | {} | weight {:.1} | Ln {}, Col {}",
            self.editor.style().label(),
            self.editor.weight(),
            line + 1,
            column + 1
        );
        if let Some(saved) = &self.last_saved {
            status.push_str(&format!(" | saved {saved}"));
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SaggerConfig;
    use crate::data::DEFAULT_TEXT;

    #[test]
    fn test_select_style_keeps_text_and_weight() {
        let mut state = AppState::default();
        state.set_weight(1.5);
        let before = Arc::clone(&state.editor);

        state.select_style(CurveStyle::HangingEnd);
        assert!(!Arc::ptr_eq(&before, &state.editor));
        assert_eq!(state.editor.style(), CurveStyle::HangingEnd);
        assert_eq!(state.editor.text(), DEFAULT_TEXT);
        assert_eq!(state.editor.weight(), 1.5);
        assert!(state.editor.cache().is_empty());
    }

    #[test]
    fn test_selecting_current_style_is_a_no_op() {
        let mut state = AppState::default();
        let before = Arc::clone(&state.editor);
        state.select_style(CurveStyle::Flat);
        assert!(Arc::ptr_eq(&before, &state.editor));
    }

    #[test]
    fn test_weight_controls_clamp() {
        let mut state = AppState::default();
        state.set_weight(9.0);
        assert_eq!(state.editor.weight(), 2.0);
        state.step_weight(1);
        assert_eq!(state.editor.weight(), 2.0);
        state.step_weight(-3);
        assert_eq!(state.weight_label(), "Weight: 1.7");
    }

    #[test]
    fn test_status_text() {
        let state = AppState::new(SaggerConfig {
            weight: 0.5,
            ..SaggerConfig::default()
        });
        assert_eq!(
            state.status_text(),
            "untitled | No Sag | weight 0.5 | Ln 1, Col 1"
        );
    }

    #[test]
    fn test_status_text_prefers_errors() {
        let mut state = AppState::default();
        state.error_message = Some("Failed to save".to_string());
        assert_eq!(state.status_text(), "Failed to save");
    }

    #[test]
    fn test_widget_update_replaces_editor() {
        let mut state = AppState::default();
        let mut edited = (*state.editor).clone();
        edited.set_text("typed");
        state.apply_editor_update(EditorUpdate {
            editor: edited,
            save_requested: false,
        });
        assert_eq!(state.editor.text(), "typed");
    }
}

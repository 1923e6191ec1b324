// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard handling for SagEditorWidget

use super::SagEditorWidget;
use crate::curve::CurveStyle;
use crate::editor::CaretMotion;
use masonry::core::EventCtx;
use masonry::core::keyboard::{Key, NamedKey};

/// What a shortcut key asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Shortcut {
    /// Change the weight by this many steps
    Weight(i32),
    Style(CurveStyle),
    Save,
}

/// Map a Cmd/Ctrl chord to a shortcut.
pub(super) fn shortcut_for(key: &Key, cmd: bool) -> Option<Shortcut> {
    if !cmd {
        return None;
    }
    let Key::Character(c) = key else {
        return None;
    };
    match c.as_str() {
        "=" | "+" => Some(Shortcut::Weight(1)),
        "-" | "_" => Some(Shortcut::Weight(-1)),
        "1" => Some(Shortcut::Style(CurveStyle::Flat)),
        "2" => Some(Shortcut::Style(CurveStyle::HangingEnd)),
        "3" => Some(Shortcut::Style(CurveStyle::DroopingCenter)),
        s if s.eq_ignore_ascii_case("s") => Some(Shortcut::Save),
        _ => None,
    }
}

/// Map a navigation key to a caret motion.
pub(super) fn motion_for(key: &Key) -> Option<CaretMotion> {
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some(CaretMotion::Left),
        Key::Named(NamedKey::ArrowRight) => Some(CaretMotion::Right),
        Key::Named(NamedKey::ArrowUp) => Some(CaretMotion::Up),
        Key::Named(NamedKey::ArrowDown) => Some(CaretMotion::Down),
        Key::Named(NamedKey::Home) => Some(CaretMotion::Home),
        Key::Named(NamedKey::End) => Some(CaretMotion::End),
        _ => None,
    }
}

impl SagEditorWidget {
    /// Handle Cmd/Ctrl shortcuts. Returns true if the key was consumed.
    pub(super) fn handle_shortcuts(&mut self, ctx: &mut EventCtx<'_>, key: &Key, cmd: bool) -> bool {
        let Some(shortcut) = shortcut_for(key, cmd) else {
            return false;
        };

        match shortcut {
            Shortcut::Weight(steps) => {
                if self.editor.step_weight(steps) {
                    tracing::info!("Weight: {:.1}", self.editor.weight());
                    self.refresh();
                    ctx.request_layout();
                }
            }
            Shortcut::Style(style) => {
                self.switch_style(style);
                ctx.request_layout();
            }
            Shortcut::Save => {
                self.emit_update(ctx, true);
                ctx.set_handled();
                return true;
            }
        }

        self.emit_update(ctx, false);
        ctx.request_render();
        ctx.set_handled();
        true
    }

    /// Handle typing, deletion and caret movement.
    ///
    /// Returns true if the key was handled, false otherwise
    pub(super) fn handle_text_input(&mut self, ctx: &mut EventCtx<'_>, key: &Key, cmd: bool) -> bool {
        if let Some(motion) = motion_for(key) {
            self.editor.move_caret(motion);
            self.after_change(ctx, false);
            return true;
        }

        let changed = match key {
            Key::Named(NamedKey::Backspace) => self.editor.backspace(),
            Key::Named(NamedKey::Delete) => self.editor.delete_forward(),
            Key::Named(NamedKey::Enter) => self.editor.newline(),
            Key::Named(NamedKey::Tab) => self.editor.insert_str("    "),
            // Don't insert characters when Cmd/Ctrl is held
            Key::Character(s) if !cmd => self.editor.insert_str(s),
            _ => return false,
        };

        if changed {
            tracing::debug!("Edit at {:?}", self.editor.caret_line_position());
        }
        self.after_change(ctx, changed);
        true
    }
}

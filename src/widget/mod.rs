// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Sagging text editor widget

mod keyboard;
mod view;

pub use view::sag_editor_view;

use kurbo::{Affine, Point, Rect};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerEvent,
    PointerScrollEvent, PropertiesMut, PropertiesRef, RegisterCtx, ScrollDelta, TextEvent, Update,
    UpdateCtx, Widget,
};
use masonry::kurbo::Size;
use masonry::util::fill_color;
use masonry::vello::Scene;

use crate::canvas::SceneCanvas;
use crate::curve::CurveStyle;
use crate::editor::{SagEditor, create_editor};
use crate::metrics::{FontMetrics, ParleyMetrics};
use crate::settings;
use crate::theme;

/// Widget hosting one [`SagEditor`]
pub struct SagEditorWidget {
    /// Working copy of the editor; changes are reported via [`EditorUpdate`]
    pub editor: SagEditor,
    metrics: ParleyMetrics,
    size: Size,
    /// Vertical scroll offset in pixels
    scroll_y: f64,
}

/// Action emitted whenever the widget changed its editor
#[derive(Debug, Clone)]
pub struct EditorUpdate {
    pub editor: SagEditor,
    /// If true, write the document to disk
    pub save_requested: bool,
}

impl SagEditorWidget {
    pub fn new(editor: SagEditor, font_size: f64) -> Self {
        let mut widget = Self {
            editor,
            metrics: ParleyMetrics::new(font_size),
            size: Size::new(800.0, 600.0),
            scroll_y: 0.0,
        };
        widget.refresh();
        widget
    }

    /// Replace the editor, keeping widget-level state (focus, scroll).
    pub fn replace_editor(&mut self, editor: SagEditor) {
        let focused = self.editor.is_focused();
        self.editor = editor;
        if self.editor.is_focused() != focused {
            self.editor.set_focused(focused);
        }
        self.refresh();
        self.clamp_scroll();
    }

    /// Swap in a fresh editor for `style`.
    fn switch_style(&mut self, style: CurveStyle) {
        if style == self.editor.style() {
            return;
        }
        let placeholder = create_editor(style, self.editor.options().clone());
        let old = std::mem::replace(&mut self.editor, placeholder);
        self.replace_editor(old.switch_style(style));
        self.scroll_y = 0.0;
    }

    /// Eagerly recompute offsets after a change.
    fn refresh(&mut self) {
        let visited = self.editor.refresh_all(&self.metrics);
        tracing::debug!("Refreshed offsets for {visited} lines");
    }

    /// Top-left of the first line box in document space
    fn text_origin() -> Point {
        Point::new(settings::layout::LEFT_INSET, settings::layout::TOP_INSET)
    }

    /// Full scrollable height: every line box plus the sag margin.
    fn document_height(&self) -> f64 {
        settings::layout::TOP_INSET
            + self.editor.content_height(&self.metrics)
            + self.editor.required_bottom_margin()
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.size.height).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Scroll so the caret line box (and its sag) is visible.
    fn scroll_to_caret(&mut self) {
        let (line, _) = self.editor.caret_line_position();
        let line_height = self.metrics.line_height();
        let top = settings::layout::TOP_INSET + line as f64 * line_height;
        let sag = self
            .editor
            .cache()
            .get(line)
            .map_or(0.0, |offsets| offsets.max_offset());
        let bottom = top + line_height + sag;
        if top < self.scroll_y {
            self.scroll_y = top;
        } else if bottom > self.scroll_y + self.size.height {
            // Never push the caret line's own box off the top
            self.scroll_y = (bottom - self.size.height).min(top);
        }
        self.clamp_scroll();
    }

    fn handle_scroll(&mut self, ctx: &mut EventCtx<'_>, delta: &ScrollDelta) {
        let dy = match delta {
            ScrollDelta::LineDelta(_x, y) => -f64::from(*y) * settings::layout::SCROLL_LINE_PX,
            ScrollDelta::PixelDelta(pos) => -pos.y,
            ScrollDelta::PageDelta(_x, y) => -f64::from(*y) * self.size.height,
        };
        if dy.abs() < 0.001 {
            return;
        }
        let before = self.scroll_y;
        self.scroll_y += dy;
        self.clamp_scroll();
        if self.scroll_y != before {
            ctx.request_render();
            ctx.set_handled();
        }
    }

    fn emit_update(&self, ctx: &mut EventCtx<'_>, save_requested: bool) {
        ctx.submit_action::<EditorUpdate>(EditorUpdate {
            editor: self.editor.clone(),
            save_requested,
        });
    }

    /// Common tail of every handled key: refresh, keep the caret in view,
    /// report the change and repaint.
    fn after_change(&mut self, ctx: &mut EventCtx<'_>, text_changed: bool) {
        if text_changed {
            self.refresh();
            ctx.request_layout();
        }
        self.scroll_to_caret();
        self.emit_update(ctx, false);
        ctx.request_render();
        ctx.set_handled();
    }
}

impl Widget for SagEditorWidget {
    type Action = EditorUpdate;

    fn accepts_focus(&self) -> bool {
        true
    }

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, event: &Update) {
        if let Update::FocusChanged(focused) = event {
            self.editor.set_focused(*focused);
            if *focused {
                ctx.request_anim_frame();
            }
            ctx.request_render();
        }
    }

    fn on_anim_frame(
        &mut self,
        ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        interval: u64,
    ) {
        if !self.editor.is_focused() {
            return;
        }
        // Interval is in nanoseconds
        if self.editor.tick(interval as f64 * 1e-9) {
            ctx.request_render();
        }
        ctx.request_anim_frame();
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let max = bc.max();
        let width = if max.width.is_finite() { max.width } else { 800.0 };
        let height = if max.height.is_finite() {
            max.height
        } else {
            self.document_height()
        };
        self.size = Size::new(width, height);
        self.clamp_scroll();
        self.size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let size = ctx.size();
        fill_color(scene, &size.to_rect(), theme::editor::BACKGROUND);

        let visible = Rect::new(0.0, self.scroll_y, size.width, self.scroll_y + size.height);
        let base = Affine::translate((0.0, -self.scroll_y));
        let mut canvas = SceneCanvas::new(scene, &self.metrics, base, theme::editor::TEXT);
        self.editor
            .paint(&mut canvas, &self.metrics, visible, Self::text_origin());
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(_) => {
                ctx.request_focus();
            }
            PointerEvent::Scroll(PointerScrollEvent { delta, .. }) => {
                self.handle_scroll(ctx, delta);
            }
            _ => {}
        }
    }

    fn on_text_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &TextEvent,
    ) {
        use masonry::core::keyboard::KeyState;

        if let TextEvent::Keyboard(key_event) = event {
            if key_event.state != KeyState::Down {
                return;
            }
            let cmd = key_event.modifiers.meta() || key_event.modifiers.ctrl();

            if self.handle_shortcuts(ctx, &key_event.key, cmd) {
                return;
            }
            self.handle_text_input(ctx, &key_event.key, cmd);
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::MultilineTextInput
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_label(format!("Sagging text editor ({})", self.editor.style().label()));
        if self.editor.is_read_only() {
            node.set_read_only();
        }
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}

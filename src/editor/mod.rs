// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! The sagging editor surface.
//!
//! A [`SagEditor`] binds one [`CurveStyle`] to a text buffer, an offset
//! cache and a caret. Switching styles never mutates an editor in place:
//! [`SagEditor::switch_style`] consumes the old editor and builds a fresh
//! one carrying only the text and the weight.

mod paint;

pub use paint::paint_frame;

use std::time::Duration;

use kurbo::{Point, Rect};

use crate::canvas::Canvas;
use crate::config::SaggerConfig;
use crate::curve::{CurveStyle, LineGeometry};
use crate::layout::{
    self, Line, LineContext, LinePlan, OffsetArray, OffsetCache, RotationMode, compute_offsets,
};
use crate::metrics::FontMetrics;
use crate::settings;
use crate::text::{Caret, TextBuffer};

/// Settings that survive a style switch.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOptions {
    pub rotation: RotationMode,
    /// Lines recomputed by [`SagEditor::refresh_all`] before it yields
    pub eager_line_budget: usize,
    /// Space reserved below the deepest sag
    pub bottom_padding: f64,
    pub blink_interval: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            rotation: RotationMode::default(),
            eager_line_budget: settings::performance::EAGER_LINE_BUDGET,
            bottom_padding: settings::layout::BOTTOM_PADDING,
            blink_interval: Duration::from_millis(settings::caret::BLINK_MS),
        }
    }
}

impl From<&SaggerConfig> for EditorOptions {
    fn from(config: &SaggerConfig) -> Self {
        Self {
            rotation: config.rotation,
            eager_line_budget: config.eager_line_budget,
            bottom_padding: config.bottom_padding,
            blink_interval: config.blink_interval(),
        }
    }
}

/// Caret motions that do not edit text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaretMotion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug, Default)]
pub struct FramePlan {
    /// Visible lines, top to bottom
    pub lines: Vec<LinePlan>,
}

/// One editor instance bound to a single curve style.
#[derive(Clone, Debug)]
pub struct SagEditor {
    style: CurveStyle,
    weight: f64,
    buffer: TextBuffer,
    cache: OffsetCache,
    caret: Caret,
    focused: bool,
    read_only: bool,
    options: EditorOptions,
    /// Width of the widest line, measured on first use after a text change
    widest_line: Option<f64>,
}

/// Build an empty editor for `style`.
pub fn create_editor(style: CurveStyle, options: EditorOptions) -> SagEditor {
    SagEditor {
        style,
        weight: settings::weight::DEFAULT,
        buffer: TextBuffer::new(),
        cache: OffsetCache::new(),
        caret: Caret::new(options.blink_interval),
        focused: false,
        read_only: false,
        options,
        widest_line: None,
    }
}

impl SagEditor {
    /// Replace this editor with a new one for `style`.
    ///
    /// Only the text and the weight carry over; the caret returns to the
    /// start of the document and the new cache is empty.
    pub fn switch_style(self, style: CurveStyle) -> SagEditor {
        tracing::info!(
            "Switching curve style: {} -> {}",
            self.style.label(),
            style.label()
        );
        let text = self.buffer.text();
        let weight = self.weight;
        let mut next = create_editor(style, self.options);
        next.set_text(&text);
        next.set_weight(weight);
        next
    }

    pub fn style(&self) -> CurveStyle {
        self.style
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Set the sag weight, clamped to the supported range. Returns true if
    /// the weight changed.
    pub fn set_weight(&mut self, weight: f64) -> bool {
        let weight = settings::weight::sanitize(weight);
        if weight == self.weight {
            return false;
        }
        tracing::debug!("Weight {:.1} -> {:.1}", self.weight, weight);
        self.weight = weight;
        self.cache.invalidate_all();
        true
    }

    /// Move the weight by `steps` increments of [`settings::weight::STEP`].
    pub fn step_weight(&mut self, steps: i32) -> bool {
        self.set_weight(self.weight + f64::from(steps) * settings::weight::STEP)
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Replace the whole document. The caret moves to the start.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.text_changed();
    }

    pub fn lines(&self) -> Vec<Line> {
        self.buffer.lines()
    }

    pub fn line(&self, id: usize) -> Option<Line> {
        self.buffer.line(id)
    }

    pub fn caret_line_position(&self) -> (usize, usize) {
        self.buffer.caret_line_position()
    }

    pub fn cache(&self) -> &OffsetCache {
        &self.cache
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.caret.reset();
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn caret_visible(&self) -> bool {
        self.focused && self.caret.is_visible()
    }

    /// Advance the caret blink. Returns true when a repaint is needed.
    pub fn tick(&mut self, delta_secs: f64) -> bool {
        self.focused && self.caret.update(delta_secs)
    }

    // ===== Editing =====

    /// Every edit funnels through here.
    fn text_changed(&mut self) {
        self.cache.invalidate_all();
        self.widest_line = None;
        self.caret.reset();
    }

    fn edit(&mut self, apply: impl FnOnce(&mut TextBuffer) -> bool) -> bool {
        if self.read_only {
            return false;
        }
        let changed = apply(&mut self.buffer);
        if changed {
            self.text_changed();
        }
        changed
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        self.edit(|buffer| {
            buffer.insert(ch);
            true
        })
    }

    pub fn insert_str(&mut self, text: &str) -> bool {
        self.edit(|buffer| {
            buffer.insert_str(text);
            !text.is_empty()
        })
    }

    pub fn newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    pub fn backspace(&mut self) -> bool {
        self.edit(|buffer| buffer.delete().is_some())
    }

    pub fn delete_forward(&mut self) -> bool {
        self.edit(|buffer| buffer.delete_forward().is_some())
    }

    pub fn move_caret(&mut self, motion: CaretMotion) {
        match motion {
            CaretMotion::Left => self.buffer.move_caret_left(),
            CaretMotion::Right => self.buffer.move_caret_right(),
            CaretMotion::Up => self.buffer.move_caret_up(),
            CaretMotion::Down => self.buffer.move_caret_down(),
            CaretMotion::Home => self.buffer.move_caret_home(),
            CaretMotion::End => self.buffer.move_caret_end(),
        }
        self.caret.reset();
    }

    // ===== Offsets =====

    /// Offsets for `line`, recomputed if missing or stale.
    pub fn resolve_offsets(&mut self, line: &Line, metrics: &dyn FontMetrics) -> &OffsetArray {
        let (style, weight) = (self.style, self.weight);
        self.cache
            .resolve(line, weight, || compute_offsets(line, metrics, style, weight))
    }

    /// Recompute offsets for up to `eager_line_budget` lines. Lines past
    /// the budget are resolved lazily when painted. Returns the number of
    /// lines visited.
    pub fn refresh_all(&mut self, metrics: &dyn FontMetrics) -> usize {
        let count = self.buffer.line_count();
        let budget = self.options.eager_line_budget;
        if count > budget {
            tracing::debug!("Eager refresh limited to {budget} of {count} lines");
        }
        let mut visited = 0;
        for id in 0..count.min(budget) {
            if let Some(line) = self.buffer.line(id) {
                self.resolve_offsets(&line, metrics);
                visited += 1;
            }
        }
        visited
    }

    /// How far the glyphs of a line `line_width` wide can reach below its
    /// line box. Follows from the curve alone, never from cached offsets.
    fn overhang(&self, line_width: f64, line_height: f64) -> f64 {
        let geometry = LineGeometry::new(line_width, self.weight);
        if self.style == CurveStyle::Flat || !geometry.is_bendable() {
            return 0.0;
        }
        // Tilted glyphs and a caret past the last glyph dip below the
        // deepest offset
        2.0 * geometry.max_offset + line_height
    }

    /// Overhang of the widest line, which bounds every other line.
    fn reach(&mut self, metrics: &dyn FontMetrics) -> f64 {
        let widest = match self.widest_line {
            Some(width) => width,
            None => {
                let width = (0..self.buffer.line_count())
                    .filter_map(|id| self.buffer.line(id))
                    .map(|line| metrics.text_width(&line.chars))
                    .fold(0.0, f64::max);
                self.widest_line = Some(width);
                width
            }
        };
        self.overhang(widest, metrics.line_height())
    }

    /// Deepest observed sag plus the configured padding.
    pub fn required_bottom_margin(&self) -> f64 {
        self.cache.max_offset() + self.options.bottom_padding
    }

    /// Height of all line boxes, without the bottom margin.
    pub fn content_height(&self, metrics: &dyn FontMetrics) -> f64 {
        self.buffer.line_count() as f64 * metrics.line_height()
    }

    // ===== Frame =====

    /// Plan the lines intersecting `visible`, with line 0's box at `origin`.
    pub fn layout_frame(
        &mut self,
        metrics: &dyn FontMetrics,
        visible: Rect,
        origin: Point,
    ) -> FramePlan {
        let line_height = metrics.line_height();
        // Lines further up than this cannot hang into view
        let reach = self.reach(metrics);
        let first = ((visible.y0 - origin.y - line_height - reach) / line_height)
            .floor()
            .max(0.0) as usize;

        let (caret_line, caret_column) = self.buffer.caret_line_position();
        let caret_visible = self.caret_visible();
        let highlight_width = (visible.x1 - origin.x).max(0.0);
        let (style, weight, rotation) = (self.style, self.weight, self.options.rotation);

        let mut plans = Vec::new();
        for id in first..self.buffer.line_count() {
            let top = origin.y + id as f64 * line_height;
            if top > visible.y1 {
                break;
            }
            let Some(line) = self.buffer.line(id) else {
                break;
            };
            let overhang = self.overhang(metrics.text_width(&line.chars), line_height);
            if top + line_height + overhang < visible.y0 {
                continue;
            }

            let on_caret_line = line.id == caret_line;
            let cx = LineContext {
                origin: Point::new(origin.x, top),
                style,
                rotation,
                caret_column: (on_caret_line && caret_visible).then_some(caret_column),
                highlight_width: (on_caret_line && self.focused).then_some(highlight_width),
            };
            let offsets = self
                .cache
                .resolve(&line, weight, || compute_offsets(&line, metrics, style, weight));
            plans.push(layout::plan_line(&line, offsets, metrics, &cx));
        }

        FramePlan { lines: plans }
    }

    /// Render the lines intersecting `visible` onto `canvas`.
    pub fn paint(
        &mut self,
        canvas: &mut dyn Canvas,
        metrics: &dyn FontMetrics,
        visible: Rect,
        origin: Point,
    ) {
        let frame = self.layout_frame(metrics, visible, origin);
        paint_frame(canvas, &frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::RecordingCanvas;
    use crate::metrics::FixedMetrics;

    const EPSILON: f64 = 1e-9;

    fn metrics() -> FixedMetrics {
        FixedMetrics::new(10.0, 12.0, 16.0)
    }

    fn editor(style: CurveStyle, text: &str) -> SagEditor {
        let mut editor = create_editor(style, EditorOptions::default());
        editor.set_text(text);
        editor
    }

    fn everything() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 10_000.0)
    }

    #[test]
    fn test_new_editor_defaults() {
        let editor = create_editor(CurveStyle::HangingEnd, EditorOptions::default());
        assert_eq!(editor.style(), CurveStyle::HangingEnd);
        assert_eq!(editor.weight(), settings::weight::DEFAULT);
        assert_eq!(editor.text(), "");
        assert!(editor.cache().is_empty());
        assert!(!editor.is_focused());
    }

    #[test]
    fn test_switch_style_keeps_only_text_and_weight() {
        let mut editor = editor(CurveStyle::HangingEnd, "hello");
        editor.set_weight(1.5);
        editor.set_focused(true);
        editor.move_caret(CaretMotion::End);
        editor.refresh_all(&metrics());
        assert!(!editor.cache().is_empty());

        let switched = editor.switch_style(CurveStyle::DroopingCenter);
        assert_eq!(switched.style(), CurveStyle::DroopingCenter);
        assert_eq!(switched.text(), "hello");
        assert_eq!(switched.weight(), 1.5);
        assert!(switched.cache().is_empty());
        assert_eq!(switched.caret_line_position(), (0, 0));
        assert!(!switched.is_focused());
    }

    #[test]
    fn test_switch_style_recomputes_on_next_paint() {
        let m = metrics();
        let mut editor = editor(CurveStyle::HangingEnd, "hello");
        editor.set_weight(1.5);
        editor.refresh_all(&m);
        let hanging = editor.cache().get(0).cloned().unwrap();

        let mut switched = editor.switch_style(CurveStyle::DroopingCenter);
        let mut canvas = RecordingCanvas::default();
        switched.paint(&mut canvas, &m, everything(), Point::ZERO);
        let drooping = switched.cache().get(0).cloned().unwrap();

        assert_ne!(hanging, drooping);
        assert_eq!(drooping.offsets()[4], 0.0);
    }

    #[test]
    fn test_weight_is_clamped_and_invalidates() {
        let m = metrics();
        let mut editor = editor(CurveStyle::DroopingCenter, "abc");
        editor.refresh_all(&m);
        assert!(!editor.cache().is_empty());

        assert!(editor.set_weight(5.0));
        assert_eq!(editor.weight(), settings::weight::MAX);
        assert!(editor.cache().is_empty());

        editor.refresh_all(&m);
        assert!(!editor.set_weight(2.0));
        assert!(!editor.cache().is_empty());
    }

    #[test]
    fn test_step_weight_stays_in_bounds() {
        let mut editor = editor(CurveStyle::Flat, "");
        editor.set_weight(0.2);
        assert!(editor.step_weight(-1));
        assert_eq!(editor.weight(), 0.1);
        assert!(!editor.step_weight(-1));
        assert_eq!(editor.weight(), 0.1);
        editor.set_weight(1.9);
        assert!(editor.step_weight(1));
        assert_eq!(editor.weight(), 2.0);
        assert!(!editor.step_weight(1));
    }

    #[test]
    fn test_doubling_weight_doubles_max_offset() {
        let m = metrics();
        for style in [CurveStyle::HangingEnd, CurveStyle::DroopingCenter] {
            let mut editor = editor(style, "a reasonably long line of text");
            editor.set_weight(0.8);
            editor.refresh_all(&m);
            let light = editor.cache().max_offset();

            editor.set_weight(1.6);
            editor.refresh_all(&m);
            let heavy = editor.cache().max_offset();

            assert!(light > 0.0);
            assert!((heavy - 2.0 * light).abs() < EPSILON, "{style:?}");
        }
    }

    #[test]
    fn test_empty_line_adds_nothing_to_bottom_margin() {
        let m = metrics();
        for style in CurveStyle::ALL {
            let mut editor = editor(style, "");
            editor.set_weight(2.0);
            editor.refresh_all(&m);
            let offsets = editor.cache().get(0).unwrap();
            assert!(offsets.is_empty());
            assert_eq!(
                editor.required_bottom_margin(),
                settings::layout::BOTTOM_PADDING
            );
        }
    }

    #[test]
    fn test_bottom_margin_tracks_deepest_line() {
        let m = metrics();
        let mut editor = editor(CurveStyle::DroopingCenter, "short\na much longer line here\n");
        editor.refresh_all(&m);
        let deepest = editor
            .lines()
            .iter()
            .map(|line| editor.cache().get(line.id).unwrap().max_offset())
            .fold(0.0, f64::max);
        assert!(deepest > 0.0);
        assert_eq!(
            editor.required_bottom_margin(),
            deepest + settings::layout::BOTTOM_PADDING
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let m = metrics();
        let mut editor = editor(CurveStyle::HangingEnd, "same line");
        let line = editor.lines().remove(0);
        let first = editor.resolve_offsets(&line, &m).clone();
        let second = editor.resolve_offsets(&line, &m).clone();
        assert_eq!(first, second);
        assert_eq!(first, compute_offsets(&line, &m, CurveStyle::HangingEnd, 1.0));
        assert_eq!(editor.cache().stats().hits, 1);
    }

    #[test]
    fn test_edit_never_reuses_stale_offsets() {
        let m = metrics();
        let mut editor = editor(CurveStyle::HangingEnd, "abc");
        editor.refresh_all(&m);
        editor.move_caret(CaretMotion::End);
        assert!(editor.insert_char('d'));
        assert!(editor.cache().is_empty());

        let line = editor.lines().remove(0);
        assert_eq!(editor.resolve_offsets(&line, &m).len(), 4);
    }

    #[test]
    fn test_read_only_blocks_edits_but_not_motion() {
        let mut editor = editor(CurveStyle::Flat, "abc");
        editor.set_read_only(true);
        assert!(!editor.insert_char('x'));
        assert!(!editor.newline());
        editor.move_caret(CaretMotion::End);
        assert!(!editor.backspace());
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.caret_line_position(), (0, 3));
    }

    #[test]
    fn test_editing_operations() {
        let mut editor = editor(CurveStyle::Flat, "ab");
        editor.move_caret(CaretMotion::End);
        assert!(editor.newline());
        assert!(editor.insert_str("cd"));
        assert_eq!(editor.text(), "ab\ncd");
        assert_eq!(editor.caret_line_position(), (1, 2));

        assert!(editor.backspace());
        editor.move_caret(CaretMotion::Home);
        assert!(editor.delete_forward());
        assert_eq!(editor.text(), "ab\n");
        assert!(!editor.delete_forward());
    }

    #[test]
    fn test_eager_refresh_respects_budget() {
        let m = metrics();
        let options = EditorOptions {
            eager_line_budget: 2,
            ..EditorOptions::default()
        };
        let mut editor = create_editor(CurveStyle::HangingEnd, options);
        editor.set_text("one\ntwo\nthree\nfour");
        assert_eq!(editor.refresh_all(&m), 2);
        assert_eq!(editor.cache().len(), 2);

        // The render pass fills in the rest
        let mut canvas = RecordingCanvas::default();
        editor.paint(&mut canvas, &m, everything(), Point::ZERO);
        assert_eq!(editor.cache().len(), 4);
    }

    #[test]
    fn test_frame_skips_lines_outside_viewport() {
        let m = metrics();
        let text = (0..100).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut editor = editor(CurveStyle::Flat, &text);
        // Lines are 16px tall, so rows 10 through 20 reach into [170, 320]
        let frame = editor.layout_frame(&m, Rect::new(0.0, 170.0, 400.0, 320.0), Point::ZERO);
        let ids: Vec<usize> = frame.lines.iter().map(|plan| plan.line_id).collect();
        assert_eq!(ids.first(), Some(&10));
        assert_eq!(ids.last(), Some(&20));
        assert_eq!(editor.cache().len(), ids.len());
    }

    #[test]
    fn test_paint_draws_every_glyph_on_its_curve() {
        let m = metrics();
        let mut editor = editor(CurveStyle::HangingEnd, "ab\ncde");
        editor.set_weight(2.0);
        let mut canvas = RecordingCanvas::default();
        editor.paint(&mut canvas, &m, everything(), Point::ZERO);

        let glyphs: Vec<(char, kurbo::Affine)> = canvas.glyphs().collect();
        let chars: String = glyphs.iter().map(|(ch, _)| *ch).collect();
        assert_eq!(chars, "abcde");

        let offsets = editor.cache().get(1).unwrap().offsets().to_vec();
        let origin = glyphs[4].1 * Point::ZERO;
        assert!((origin.x - 25.0).abs() < EPSILON);
        assert!((origin.y - (16.0 + 12.0 + offsets[2])).abs() < EPSILON);

        // Unfocused: no caret, no highlight
        assert_eq!(canvas.rects().count(), 0);
        assert_eq!(canvas.paths(), 0);
    }

    #[test]
    fn test_caret_paints_only_when_focused_and_visible() {
        let m = metrics();
        let mut editor = editor(CurveStyle::DroopingCenter, "hello\nworld");
        editor.move_caret(CaretMotion::Down);
        editor.set_focused(true);

        let mut canvas = RecordingCanvas::default();
        editor.paint(&mut canvas, &m, everything(), Point::ZERO);
        assert_eq!(canvas.rects().count(), 1);
        assert_eq!(canvas.paths(), 1);

        // Blink to the hidden phase
        assert!(editor.tick(0.5));
        let mut canvas = RecordingCanvas::default();
        editor.paint(&mut canvas, &m, everything(), Point::ZERO);
        assert_eq!(canvas.rects().count(), 0);
        assert_eq!(canvas.paths(), 1);
    }

    #[test]
    fn test_caret_on_empty_line_is_flat_at_line_origin() {
        let m = metrics();
        let mut editor = editor(CurveStyle::HangingEnd, "abc\n");
        editor.move_caret(CaretMotion::Down);
        editor.set_focused(true);

        let frame = editor.layout_frame(&m, everything(), Point::new(8.0, 8.0));
        let caret = frame.lines[1].caret.as_ref().unwrap();
        assert_eq!(caret.transform.angle, 0.0);
        assert_eq!(caret.transform.x, 8.0 + 5.0);
        assert_eq!(caret.transform.y, 8.0 + 16.0 + 12.0);
        assert_eq!(caret.rect.width(), 10.0);
    }

    #[test]
    fn test_unfocused_editor_does_not_blink() {
        let mut editor = editor(CurveStyle::Flat, "x");
        assert!(!editor.tick(0.5));
        editor.set_focused(true);
        assert!(editor.tick(0.5));
    }

    #[test]
    fn test_options_from_config() {
        let config = SaggerConfig {
            bottom_padding: 32.0,
            eager_line_budget: 10,
            blink_interval_ms: 250,
            ..SaggerConfig::default()
        };
        let options = EditorOptions::from(&config);
        assert_eq!(options.bottom_padding, 32.0);
        assert_eq!(options.eager_line_budget, 10);
        assert_eq!(options.blink_interval, Duration::from_millis(250));
        assert_eq!(options.rotation, RotationMode::Analytic);

        let config = SaggerConfig {
            rotation: RotationMode::CentralDifference,
            ..SaggerConfig::default()
        };
        let editor = create_editor(CurveStyle::Flat, EditorOptions::from(&config));
        assert_eq!(editor.options().rotation, RotationMode::CentralDifference);
        let switched = editor.switch_style(CurveStyle::HangingEnd);
        assert_eq!(switched.options().rotation, RotationMode::CentralDifference);
    }

    #[test]
    fn test_central_difference_rotation_in_frame() {
        let m = metrics();
        let options = EditorOptions {
            rotation: RotationMode::CentralDifference,
            ..EditorOptions::default()
        };
        let mut editor = create_editor(CurveStyle::HangingEnd, options);
        editor.set_text("abcdef");
        editor.set_weight(2.0);

        let frame = editor.layout_frame(&m, everything(), Point::ZERO);
        let angles: Vec<f64> = frame.lines[0]
            .glyphs
            .iter()
            .map(|glyph| glyph.transform.angle)
            .collect();
        let offsets = editor.cache().get(0).unwrap().offsets().to_vec();
        let degrees = |rise: f64, run: f64| (rise / run).atan().to_degrees();

        // One-sided at the ends, centered inside; glyph centers are 10px apart
        assert!((angles[0] - degrees(offsets[1] - offsets[0], 10.0)).abs() < EPSILON);
        assert!((angles[2] - degrees(offsets[3] - offsets[1], 20.0)).abs() < EPSILON);
        assert!((angles[5] - degrees(offsets[5] - offsets[4], 10.0)).abs() < EPSILON);
        assert!(angles[5] > angles[0]);
    }

    #[test]
    fn test_visible_lines_do_not_depend_on_cache_state() {
        let m = metrics();
        let options = EditorOptions {
            eager_line_budget: 0,
            ..EditorOptions::default()
        };
        let mut cold = create_editor(CurveStyle::DroopingCenter, options);
        cold.set_text(&format!("{}\nshort\na\nb\nc\nd\ne\nf", "x".repeat(60)));
        cold.set_weight(2.0);
        assert_eq!(cold.refresh_all(&m), 0);

        let mut warm = cold.clone();
        for line in warm.lines() {
            warm.resolve_offsets(&line, &m);
        }

        // Line 0 sags hundreds of pixels, deep into the viewport below it
        let visible = Rect::new(0.0, 40.0, 800.0, 200.0);
        let ids = |frame: &FramePlan| frame.lines.iter().map(|plan| plan.line_id).collect::<Vec<_>>();
        let cold_frame = cold.layout_frame(&m, visible, Point::ZERO);
        let warm_frame = warm.layout_frame(&m, visible, Point::ZERO);

        assert_eq!(ids(&cold_frame), (0..8).collect::<Vec<_>>());
        assert_eq!(ids(&cold_frame), ids(&warm_frame));
        assert_eq!(cold_frame.lines[0].glyphs.len(), 60);
    }

    #[test]
    fn test_frame_builds_only_lines_near_viewport() {
        let m = metrics();
        let text = vec!["ab"; 100].join("\n");
        let mut editor = editor(CurveStyle::DroopingCenter, &text);
        // "ab" barely sags, so only line 9 of the lines above can reach y = 170
        let frame = editor.layout_frame(&m, Rect::new(0.0, 170.0, 400.0, 320.0), Point::ZERO);
        let ids: Vec<usize> = frame.lines.iter().map(|plan| plan.line_id).collect();
        assert_eq!(ids, (9..=20).collect::<Vec<_>>());
        assert_eq!(editor.cache().len(), 12);
    }

    #[test]
    fn test_widest_line_is_remeasured_after_edits() {
        let m = metrics();
        let mut editor = editor(CurveStyle::HangingEnd, "ab\ncd");
        editor.set_weight(2.0);
        let narrow = editor.reach(&m);
        editor.move_caret(CaretMotion::End);
        assert!(editor.insert_str(&"z".repeat(40)));
        assert!(editor.reach(&m) > narrow);
    }
}

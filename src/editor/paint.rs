// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint a planned frame onto a canvas

use super::FramePlan;
use crate::canvas::Canvas;
use crate::layout::LinePlan;
use crate::theme;

/// Paint `frame`: every highlight band first, then each line's glyphs and
/// caret.
///
/// Sagging glyphs hang into the line boxes below them, so no band may be
/// painted over another line's glyphs.
pub fn paint_frame(canvas: &mut dyn Canvas, frame: &FramePlan) {
    for band in frame.lines.iter().filter_map(|line| line.highlight.as_ref()) {
        canvas.fill_path(band, theme::editor::LINE_HIGHLIGHT);
    }
    for line in &frame.lines {
        paint_line(canvas, line);
    }
}

fn paint_line(canvas: &mut dyn Canvas, line: &LinePlan) {
    for glyph in &line.glyphs {
        canvas.draw_glyph(glyph.ch, glyph.advance, glyph.transform.affine());
    }

    if let Some(caret) = &line.caret {
        canvas.fill_rect(caret.rect, caret.transform.affine(), theme::editor::CARET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{PaintOp, RecordingCanvas};
    use crate::curve::CurveStyle;
    use crate::editor::{CaretMotion, EditorOptions, create_editor};
    use crate::metrics::FixedMetrics;
    use kurbo::{Point, Rect};

    #[test]
    fn test_paint_order_is_highlight_glyphs_caret() {
        let metrics = FixedMetrics::new(10.0, 12.0, 16.0);
        let mut editor = create_editor(CurveStyle::DroopingCenter, EditorOptions::default());
        editor.set_text("sag");
        editor.move_caret(CaretMotion::End);
        editor.set_focused(true);

        let frame = editor.layout_frame(
            &metrics,
            Rect::new(0.0, 0.0, 400.0, 400.0),
            Point::ZERO,
        );
        let mut canvas = RecordingCanvas::default();
        paint_frame(&mut canvas, &frame);

        assert_eq!(canvas.ops.len(), 5);
        assert!(matches!(
            canvas.ops[0],
            PaintOp::Path { color, .. } if color == theme::editor::LINE_HIGHLIGHT
        ));
        assert!(matches!(canvas.ops[1], PaintOp::Glyph { ch: 's', .. }));
        assert!(matches!(canvas.ops[3], PaintOp::Glyph { ch: 'g', .. }));
        assert!(matches!(
            canvas.ops[4],
            PaintOp::Rect { color, .. } if color == theme::editor::CARET
        ));
    }

    #[test]
    fn test_highlight_never_covers_glyphs_hanging_from_above() {
        let metrics = FixedMetrics::new(10.0, 12.0, 16.0);
        let mut editor = create_editor(CurveStyle::HangingEnd, EditorOptions::default());
        editor.set_text("a long line that sags into the next\nnext");
        editor.set_weight(2.0);
        editor.move_caret(CaretMotion::Down);
        editor.set_focused(true);

        let frame = editor.layout_frame(
            &metrics,
            Rect::new(0.0, 0.0, 800.0, 800.0),
            Point::ZERO,
        );
        assert!(frame.lines[1].highlight.is_some());

        let mut canvas = RecordingCanvas::default();
        paint_frame(&mut canvas, &frame);
        assert!(matches!(canvas.ops[0], PaintOp::Path { .. }));
        assert!(
            canvas.ops[1..]
                .iter()
                .all(|op| !matches!(op, PaintOp::Path { .. }))
        );
        assert_eq!(canvas.glyphs().count(), 39);
    }

    #[test]
    fn test_empty_frame_paints_nothing() {
        let mut canvas = RecordingCanvas::default();
        paint_frame(&mut canvas, &FramePlan::default());
        assert!(canvas.ops.is_empty());
    }
}

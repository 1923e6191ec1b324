// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Sagged line layout.
//!
//! Turns a line of text into per-glyph draw transforms:
//! - offsets come from the line's curve style (cached per line)
//! - x positions accumulate glyph advances left to right
//! - rotations follow the local slope of the curve
//!
//! Everything here is pure geometry; painting happens in `editor::paint`.

pub mod cache;
pub mod tangent;

pub use cache::{CacheStats, OffsetCache};
pub use tangent::RotationMode;

use kurbo::{Affine, BezPath, Point, Rect};

use crate::curve::{CurveStyle, LineGeometry};
use crate::metrics::FontMetrics;
use crate::settings;

/// One logical row of text, immutable for the duration of a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Stable identity: the line index within the document
    pub id: usize,
    pub chars: Vec<char>,
}

impl Line {
    pub fn new(id: usize, text: &str) -> Self {
        Self {
            id,
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Sag offsets for every character of a line.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetArray {
    offsets: Vec<f64>,
    line_width: f64,
    weight: f64,
}

impl OffsetArray {
    pub fn new(offsets: Vec<f64>, line_width: f64, weight: f64) -> Self {
        Self {
            offsets,
            line_width,
            weight,
        }
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Deepest offset in this line, zero for an empty line.
    pub fn max_offset(&self) -> f64 {
        self.offsets.iter().copied().fold(0.0, f64::max)
    }

    /// Cheap staleness check: same character count and same weight.
    pub fn is_valid_for(&self, line: &Line, weight: f64) -> bool {
        self.offsets.len() == line.len() && self.weight == weight
    }
}

/// Evaluate `style` over `line`.
pub fn compute_offsets(
    line: &Line,
    metrics: &dyn FontMetrics,
    style: CurveStyle,
    weight: f64,
) -> OffsetArray {
    let advances: Vec<f64> = line.chars.iter().map(|&ch| metrics.advance_width(ch)).collect();
    let line_width = metrics.text_width(&line.chars);
    let offsets = style.offsets(&advances, line_width, weight);
    OffsetArray::new(offsets, line_width, weight)
}

/// Horizontal placement of one glyph relative to the line start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub left: f64,
    pub advance: f64,
}

impl GlyphPlacement {
    pub fn center(&self) -> f64 {
        self.left + self.advance / 2.0
    }
}

/// Left edge and advance of every glyph of `chars`.
pub fn place_glyphs(chars: &[char], metrics: &dyn FontMetrics) -> Vec<GlyphPlacement> {
    let mut left = 0.0;
    chars
        .iter()
        .map(|&ch| {
            let advance = metrics.advance_width(ch);
            let placement = GlyphPlacement { ch, left, advance };
            left += advance;
            placement
        })
        .collect()
}

/// Where and how a glyph (or caret) is drawn. Recomputed every paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    /// Horizontal center of the glyph
    pub x: f64,
    /// Baseline plus sag offset
    pub y: f64,
    /// Clockwise rotation in degrees (y-down)
    pub angle: f64,
}

impl RenderTransform {
    /// Translate to `(x, y)` then rotate about that point.
    pub fn affine(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::rotate(self.angle.to_radians())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPlan {
    pub ch: char,
    pub advance: f64,
    pub transform: RenderTransform,
}

/// The caret bar, drawn in the local frame of `transform`.
#[derive(Clone, Debug, PartialEq)]
pub struct CaretPlan {
    pub column: usize,
    pub transform: RenderTransform,
    /// Bar rectangle centered horizontally on the transform origin
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinePlan {
    pub line_id: usize,
    /// Top-left of the line box
    pub origin: Point,
    pub baseline: f64,
    pub glyphs: Vec<GlyphPlan>,
    pub caret: Option<CaretPlan>,
    /// Curved band behind the caret line
    pub highlight: Option<BezPath>,
}

/// Per-line inputs for [`plan_line`] that do not come from the line itself.
#[derive(Clone, Copy, Debug)]
pub struct LineContext {
    pub origin: Point,
    pub style: CurveStyle,
    pub rotation: RotationMode,
    /// Caret column, when the caret is on this line and visible
    pub caret_column: Option<usize>,
    /// Minimum width of the highlight band, when the line is highlighted
    pub highlight_width: Option<f64>,
}

/// Compute every draw transform for one line.
pub fn plan_line(
    line: &Line,
    offsets: &OffsetArray,
    metrics: &dyn FontMetrics,
    cx: &LineContext,
) -> LinePlan {
    let baseline = cx.origin.y + metrics.ascent();
    let placements = place_glyphs(&line.chars, metrics);
    let centers: Vec<f64> = placements.iter().map(GlyphPlacement::center).collect();

    // Never trust an array built for another line: lay the glyphs flat
    let (values, angles) = if offsets.len() == placements.len() {
        let geometry = LineGeometry::new(offsets.line_width(), offsets.weight());
        let values = offsets.offsets();
        let angles = tangent::glyph_angles(cx.rotation, cx.style, &centers, values, &geometry);
        (values.to_vec(), angles)
    } else {
        let flat = vec![0.0; placements.len()];
        (flat.clone(), flat)
    };

    let glyphs: Vec<GlyphPlan> = placements
        .iter()
        .zip(values.iter().zip(&angles))
        .map(|(placement, (&offset, &angle))| GlyphPlan {
            ch: placement.ch,
            advance: placement.advance,
            transform: RenderTransform {
                x: cx.origin.x + placement.center(),
                y: baseline + offset,
                angle,
            },
        })
        .collect();

    let caret = cx
        .caret_column
        .map(|column| plan_caret(column, &glyphs, metrics, cx.origin, baseline));

    let highlight = cx
        .highlight_width
        .map(|width| highlight_band(&glyphs, metrics, cx.origin, baseline, width));

    LinePlan {
        line_id: line.id,
        origin: cx.origin,
        baseline,
        glyphs,
        caret,
        highlight,
    }
}

/// Place the caret as if it were a glyph at `column`.
///
/// Inside the line it borrows the transform and width of the glyph it sits
/// on. Past the end it extends the tangent of the last glyph by one space
/// width; on an empty line it sits flat at the line origin.
fn plan_caret(
    column: usize,
    glyphs: &[GlyphPlan],
    metrics: &dyn FontMetrics,
    origin: Point,
    baseline: f64,
) -> CaretPlan {
    let space = metrics.advance_width(' ');

    let (transform, width) = match (glyphs.get(column), glyphs.last()) {
        (Some(glyph), _) => (glyph.transform, glyph.advance),
        (None, Some(last)) => {
            let x = last.transform.x + last.advance / 2.0 + space / 2.0;
            let slope = last.transform.angle.to_radians().tan();
            let transform = RenderTransform {
                x,
                y: last.transform.y + slope * (x - last.transform.x),
                angle: last.transform.angle,
            };
            (transform, space)
        }
        (None, None) => {
            let transform = RenderTransform {
                x: origin.x + space / 2.0,
                y: baseline,
                angle: 0.0,
            };
            (transform, space)
        }
    };

    let top = settings::caret::BASELINE_GAP;
    let rect = Rect::new(
        -width / 2.0,
        top,
        width / 2.0,
        top + settings::caret::THICKNESS,
    );

    CaretPlan {
        column: column.min(glyphs.len()),
        transform,
        rect,
    }
}

/// A band one line box tall whose center line follows the sagged baseline.
fn highlight_band(
    glyphs: &[GlyphPlan],
    metrics: &dyn FontMetrics,
    origin: Point,
    baseline: f64,
    min_width: f64,
) -> BezPath {
    let ascent = metrics.ascent();
    let descent = metrics.descent();

    let mut spine: Vec<Point> = Vec::with_capacity(glyphs.len() + 3);
    let start_y = glyphs.first().map_or(baseline, |g| g.transform.y);
    spine.push(Point::new(origin.x, start_y));
    spine.extend(glyphs.iter().map(|g| g.transform.origin()));

    let end_y = glyphs.last().map_or(baseline, |g| g.transform.y);
    if let Some(last) = glyphs.last() {
        spine.push(Point::new(last.transform.x + last.advance / 2.0, end_y));
    }
    let text_right = spine.last().map_or(origin.x, |p| p.x);
    let right = text_right.max(origin.x + min_width);
    if right > text_right {
        spine.push(Point::new(right, end_y));
    }

    let mut band = BezPath::new();
    let mut top = spine.iter().map(|p| Point::new(p.x, p.y - ascent));
    if let Some(first) = top.next() {
        band.move_to(first);
        for p in top {
            band.line_to(p);
        }
    }
    for p in spine.iter().rev() {
        band.line_to(Point::new(p.x, p.y + descent));
    }
    band.close_path();
    band
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FixedMetrics;

    fn metrics() -> FixedMetrics {
        FixedMetrics::new(10.0, 12.0, 16.0)
    }

    fn context(style: CurveStyle) -> LineContext {
        LineContext {
            origin: Point::new(5.0, 100.0),
            style,
            rotation: RotationMode::Analytic,
            caret_column: None,
            highlight_width: None,
        }
    }

    #[test]
    fn test_compute_offsets_matches_line_length() {
        let line = Line::new(0, "hello world");
        let offsets = compute_offsets(&line, &metrics(), CurveStyle::DroopingCenter, 1.0);
        assert_eq!(offsets.len(), line.len());
        assert_eq!(offsets.line_width(), 110.0);
        assert!(offsets.is_valid_for(&line, 1.0));
        assert!(!offsets.is_valid_for(&line, 1.1));
    }

    #[test]
    fn test_compute_offsets_is_idempotent() {
        let line = Line::new(4, "idempotent");
        let a = compute_offsets(&line, &metrics(), CurveStyle::HangingEnd, 1.4);
        let b = compute_offsets(&line, &metrics(), CurveStyle::HangingEnd, 1.4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_line_offsets() {
        let line = Line::new(0, "");
        for style in CurveStyle::ALL {
            let offsets = compute_offsets(&line, &metrics(), style, 2.0);
            assert!(offsets.is_empty());
            assert_eq!(offsets.max_offset(), 0.0);
        }
    }

    #[test]
    fn test_place_glyphs_accumulates_advances() {
        let chars: Vec<char> = "abc".chars().collect();
        let placements = place_glyphs(&chars, &metrics());
        let lefts: Vec<f64> = placements.iter().map(|p| p.left).collect();
        assert_eq!(lefts, vec![0.0, 10.0, 20.0]);
        assert_eq!(placements[2].center(), 25.0);
    }

    #[test]
    fn test_plan_line_positions_glyphs_on_curve() {
        let line = Line::new(2, "abcde");
        let m = metrics();
        let offsets = compute_offsets(&line, &m, CurveStyle::HangingEnd, 2.0);
        let plan = plan_line(&line, &offsets, &m, &context(CurveStyle::HangingEnd));

        assert_eq!(plan.baseline, 112.0);
        assert_eq!(plan.glyphs.len(), 5);
        for (glyph, offset) in plan.glyphs.iter().zip(offsets.offsets()) {
            assert_eq!(glyph.transform.y, 112.0 + offset);
        }
        assert_eq!(plan.glyphs[0].transform.x, 10.0);
        assert_eq!(plan.glyphs[4].transform.x, 50.0);
        assert!(plan.glyphs[4].transform.angle > 0.0);
    }

    #[test]
    fn test_flat_line_is_unrotated() {
        let line = Line::new(0, "flat");
        let m = metrics();
        let offsets = compute_offsets(&line, &m, CurveStyle::Flat, 2.0);
        let plan = plan_line(&line, &offsets, &m, &context(CurveStyle::Flat));
        assert!(plan.glyphs.iter().all(|g| g.transform.angle == 0.0));
        assert!(plan.glyphs.iter().all(|g| g.transform.y == plan.baseline));
    }

    #[test]
    fn test_mismatched_offsets_are_never_read() {
        let line = Line::new(0, "abcd");
        let m = metrics();
        let stale = OffsetArray::new(vec![3.0, 4.0], 20.0, 1.0);
        for rotation in [RotationMode::Analytic, RotationMode::CentralDifference] {
            let cx = LineContext {
                rotation,
                ..context(CurveStyle::HangingEnd)
            };
            let plan = plan_line(&line, &stale, &m, &cx);
            assert_eq!(plan.glyphs.len(), 4);
            assert!(plan.glyphs.iter().all(|g| g.transform.y == plan.baseline));
            assert!(plan.glyphs.iter().all(|g| g.transform.angle == 0.0), "{rotation:?}");
        }
    }

    #[test]
    fn test_caret_on_glyph_borrows_its_transform() {
        let line = Line::new(0, "abcdef");
        let m = metrics();
        let offsets = compute_offsets(&line, &m, CurveStyle::DroopingCenter, 2.0);
        let mut cx = context(CurveStyle::DroopingCenter);
        cx.caret_column = Some(3);
        let plan = plan_line(&line, &offsets, &m, &cx);

        let caret = plan.caret.expect("caret planned");
        assert_eq!(caret.transform, plan.glyphs[3].transform);
        assert_eq!(caret.rect.width(), 10.0);
    }

    #[test]
    fn test_caret_past_end_extends_last_tangent() {
        let line = Line::new(0, "abc");
        let m = metrics();
        let offsets = compute_offsets(&line, &m, CurveStyle::Flat, 1.0);
        let mut cx = context(CurveStyle::Flat);
        cx.caret_column = Some(3);
        let plan = plan_line(&line, &offsets, &m, &cx);

        let caret = plan.caret.expect("caret planned");
        assert_eq!(caret.column, 3);
        assert_eq!(caret.transform.x, 5.0 + 35.0);
        assert_eq!(caret.transform.y, plan.baseline);
    }

    #[test]
    fn test_caret_on_empty_line_uses_space_width() {
        let line = Line::new(0, "");
        let m = metrics();
        let offsets = compute_offsets(&line, &m, CurveStyle::HangingEnd, 1.0);
        let mut cx = context(CurveStyle::HangingEnd);
        cx.caret_column = Some(0);
        let plan = plan_line(&line, &offsets, &m, &cx);

        assert!(plan.glyphs.is_empty());
        let caret = plan.caret.expect("caret planned");
        assert_eq!(caret.transform.x, 10.0);
        assert_eq!(caret.transform.angle, 0.0);
        assert_eq!(caret.rect.width(), 10.0);
    }

    #[test]
    fn test_highlight_band_spans_requested_width() {
        let line = Line::new(0, "ab");
        let m = metrics();
        let offsets = compute_offsets(&line, &m, CurveStyle::Flat, 1.0);
        let mut cx = context(CurveStyle::Flat);
        cx.highlight_width = Some(300.0);
        let plan = plan_line(&line, &offsets, &m, &cx);

        let band = plan.highlight.expect("highlight planned");
        let bounds = kurbo::Shape::bounding_box(&band);
        assert_eq!(bounds.x0, 5.0);
        assert_eq!(bounds.x1, 305.0);
        assert_eq!(bounds.y0, plan.baseline - 12.0);
        assert_eq!(bounds.y1, plan.baseline + 4.0);
    }

    #[test]
    fn test_render_transform_affine_maps_origin() {
        let transform = RenderTransform {
            x: 30.0,
            y: 40.0,
            angle: 90.0,
        };
        let mapped = transform.affine() * Point::new(1.0, 0.0);
        assert!((mapped.x - 30.0).abs() < 1e-9);
        assert!((mapped.y - 41.0).abs() < 1e-9);
    }
}

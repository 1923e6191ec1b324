// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Font metrics providers.
//!
//! The layout engine never touches fonts directly. It asks a
//! [`FontMetrics`] implementation for advances and vertical metrics:
//! [`FixedMetrics`] for headless use, [`ParleyMetrics`] when real glyphs
//! are shaped and drawn.

use std::cell::RefCell;
use std::collections::HashMap;

use masonry::core::{BrushIndex, StyleProperty};
use parley::{FontContext, FontFamily, FontStack, GenericFamily, Layout, LayoutContext};

/// Source of glyph advances and line metrics.
pub trait FontMetrics {
    /// Horizontal advance of a single character.
    fn advance_width(&self, ch: char) -> f64;

    /// Horizontal advance of a run of characters.
    fn text_width(&self, text: &[char]) -> f64 {
        text.iter().map(|&ch| self.advance_width(ch)).sum()
    }

    /// Distance from the top of the line box to the baseline.
    fn ascent(&self) -> f64;

    /// Height of one line box.
    fn line_height(&self) -> f64;

    /// Distance from the baseline to the bottom of the line box.
    fn descent(&self) -> f64 {
        self.line_height() - self.ascent()
    }
}

/// Monospace metrics with a fixed advance for every character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMetrics {
    pub advance: f64,
    pub ascent: f64,
    pub line_height: f64,
}

impl FixedMetrics {
    pub fn new(advance: f64, ascent: f64, line_height: f64) -> Self {
        Self {
            advance,
            ascent,
            line_height,
        }
    }

    /// Proportions of a typical monospace face at `font_size`.
    pub fn for_font_size(font_size: f64) -> Self {
        Self::new(font_size * 0.6, font_size * 0.8, font_size * 1.25)
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::for_font_size(crate::settings::layout::FONT_SIZE)
    }
}

impl FontMetrics for FixedMetrics {
    fn advance_width(&self, _ch: char) -> f64 {
        self.advance
    }

    fn ascent(&self) -> f64 {
        self.ascent
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }
}

/// Metrics measured from the system monospace face through Parley.
///
/// Single-character layouts are memoized: they provide the advance for
/// layout and are reused by the scene canvas to draw each glyph.
pub struct ParleyMetrics {
    font_size: f64,
    ascent: f64,
    line_height: f64,
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<BrushIndex>>,
    glyphs: RefCell<HashMap<char, GlyphLayout>>,
}

/// A shaped single-character layout and the values read from it.
#[derive(Clone)]
pub struct GlyphLayout {
    pub layout: Layout<BrushIndex>,
    /// Advance including trailing whitespace
    pub advance: f64,
    /// Baseline position from the top of the layout
    pub baseline: f64,
}

impl ParleyMetrics {
    pub fn new(font_size: f64) -> Self {
        let mut metrics = Self {
            font_size,
            ascent: font_size * 0.8,
            line_height: font_size * 1.25,
            font_cx: RefCell::new(FontContext::default()),
            layout_cx: RefCell::new(LayoutContext::new()),
            glyphs: RefCell::new(HashMap::new()),
        };

        let sample = metrics.shape("M");
        if let Some(line) = sample.lines().next() {
            let line_metrics = line.metrics();
            metrics.ascent = f64::from(line_metrics.baseline);
            metrics.line_height = f64::from(line_metrics.line_height);
        }
        tracing::debug!(
            "Measured monospace face at {}px: ascent={:.2}, line_height={:.2}",
            font_size,
            metrics.ascent,
            metrics.line_height
        );
        metrics
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    fn shape(&self, text: &str) -> Layout<BrushIndex> {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(self.font_size as f32));
        builder.push_default(StyleProperty::FontStack(FontStack::Single(
            FontFamily::Generic(GenericFamily::Monospace),
        )));
        builder.push_default(StyleProperty::Brush(BrushIndex(0)));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Run `f` with the shaped layout of `ch`, shaping it on first use.
    pub fn with_glyph<R>(&self, ch: char, f: impl FnOnce(&GlyphLayout) -> R) -> R {
        if let Some(glyph) = self.glyphs.borrow().get(&ch) {
            return f(glyph);
        }

        let mut buf = [0u8; 4];
        let layout = self.shape(ch.encode_utf8(&mut buf));
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(self.ascent);
        let glyph = GlyphLayout {
            advance: f64::from(layout.full_width()),
            baseline,
            layout,
        };
        let result = f(&glyph);
        self.glyphs.borrow_mut().insert(ch, glyph);
        result
    }
}

impl FontMetrics for ParleyMetrics {
    fn advance_width(&self, ch: char) -> f64 {
        self.with_glyph(ch, |glyph| glyph.advance)
    }

    fn ascent(&self) -> f64 {
        self.ascent
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }
}

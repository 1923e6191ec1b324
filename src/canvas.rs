// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing surface for the render pipeline.
//!
//! The pipeline only needs three primitives, so it talks to a [`Canvas`]
//! rather than to vello directly. [`SceneCanvas`] is the real backend.

use kurbo::{Affine, BezPath, Rect};
use masonry::core::render_text;
use masonry::vello::Scene;
use masonry::vello::peniko::{Brush, Color};

use crate::metrics::ParleyMetrics;

/// Paint target used by `SagEditor::paint`.
pub trait Canvas {
    /// Draw `ch` with its horizontal center and baseline at the origin of
    /// `transform`.
    fn draw_glyph(&mut self, ch: char, advance: f64, transform: Affine);

    /// Fill `rect`, given in the local frame of `transform`.
    fn fill_rect(&mut self, rect: Rect, transform: Affine, color: Color);

    /// Fill a path given in canvas coordinates.
    fn fill_path(&mut self, path: &BezPath, color: Color);
}

/// Canvas drawing into a vello scene, shaping glyphs with Parley.
pub struct SceneCanvas<'a> {
    scene: &'a mut Scene,
    metrics: &'a ParleyMetrics,
    /// Widget-space transform applied on top of every draw (scrolling)
    base: Affine,
    text_brushes: Vec<Brush>,
}

impl<'a> SceneCanvas<'a> {
    pub fn new(
        scene: &'a mut Scene,
        metrics: &'a ParleyMetrics,
        base: Affine,
        text_color: Color,
    ) -> Self {
        Self {
            scene,
            metrics,
            base,
            text_brushes: vec![Brush::Solid(text_color)],
        }
    }
}

impl Canvas for SceneCanvas<'_> {
    fn draw_glyph(&mut self, ch: char, advance: f64, transform: Affine) {
        if ch.is_whitespace() {
            return;
        }
        let scene = &mut *self.scene;
        let brushes = &self.text_brushes;
        let base = self.base;
        self.metrics.with_glyph(ch, |glyph| {
            // Layouts are positioned by their top-left corner
            let local = Affine::translate((-advance / 2.0, -glyph.baseline));
            render_text(scene, base * transform * local, &glyph.layout, brushes, false);
        });
    }

    fn fill_rect(&mut self, rect: Rect, transform: Affine, color: Color) {
        self.scene.fill(
            peniko::Fill::NonZero,
            self.base * transform,
            &Brush::Solid(color),
            None,
            &rect,
        );
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.scene.fill(
            peniko::Fill::NonZero,
            self.base,
            &Brush::Solid(color),
            None,
            path,
        );
    }
}

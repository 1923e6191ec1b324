// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Sag curves: how far each glyph of a line drops below the baseline.
//!
//! A curve style is a closed set of pure functions. The style is matched
//! once per line to pick the offset function, which is then applied to
//! every glyph of that line. All functions work in y-down screen space,
//! so a positive offset moves a glyph downwards.

use serde::{Deserialize, Serialize};

/// Divisor that turns a weight into a sag factor.
const SAG_DIVISOR: f64 = 300.0;

/// The shape of the sag applied to every line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    /// No sag at all
    #[default]
    Flat,
    /// Quadratic droop growing from the first glyph to the last
    HangingEnd,
    /// Parabola bottoming out at the line's horizontal center
    DroopingCenter,
}

/// Per-glyph input to an offset function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphSample {
    /// Character index within the line
    pub index: usize,
    /// Number of characters in the line
    pub count: usize,
    /// Sum of the advances of all preceding characters
    pub cum_width: f64,
    /// Advance of this character
    pub char_width: f64,
}

impl GlyphSample {
    /// Horizontal center of the glyph relative to the line start.
    pub fn center(&self) -> f64 {
        self.cum_width + self.char_width / 2.0
    }

    fn is_first(&self) -> bool {
        self.index == 0
    }

    fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }
}

/// Quantities shared by every glyph of one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineGeometry {
    /// Total advance of the line in pixels
    pub line_width: f64,
    /// Horizontal center of the line
    pub center: f64,
    /// `weight / 300`
    pub sag_factor: f64,
    /// Deepest offset the curve can reach: `sag_factor * center²`
    pub max_offset: f64,
}

impl LineGeometry {
    pub fn new(line_width: f64, weight: f64) -> Self {
        let center = line_width / 2.0;
        let sag_factor = weight / SAG_DIVISOR;
        Self {
            line_width,
            center,
            sag_factor,
            max_offset: sag_factor * center * center,
        }
    }

    /// Whether the line has any extent to bend. Every offset and slope is
    /// zero otherwise.
    pub fn is_bendable(&self) -> bool {
        self.line_width > 0.0
    }
}

/// Signature shared by the per-style offset functions.
pub type OffsetFn = fn(&GlyphSample, &LineGeometry) -> f64;

/// Flat: every glyph sits on the baseline.
pub fn flat_offset(_glyph: &GlyphSample, _line: &LineGeometry) -> f64 {
    0.0
}

/// Hanging end: the first glyph is pinned, the rest fall quadratically with
/// their distance from the line start.
pub fn hanging_end_offset(glyph: &GlyphSample, line: &LineGeometry) -> f64 {
    if glyph.is_first() || !line.is_bendable() {
        return 0.0;
    }
    let rel = glyph.center() / line.line_width;
    rel * rel * line.max_offset
}

/// Drooping center: both ends are pinned, the interior follows a downward
/// parabola peaking at the line center.
pub fn drooping_center_offset(glyph: &GlyphSample, line: &LineGeometry) -> f64 {
    if glyph.is_first() || glyph.is_last() || !line.is_bendable() {
        return 0.0;
    }
    let dx = glyph.center() - line.center;
    line.max_offset - line.sag_factor * dx * dx
}

impl CurveStyle {
    /// Every style, in selector order.
    pub const ALL: [CurveStyle; 3] = [
        CurveStyle::Flat,
        CurveStyle::HangingEnd,
        CurveStyle::DroopingCenter,
    ];

    /// Human-readable name used by the selector and status line.
    pub fn label(self) -> &'static str {
        match self {
            CurveStyle::Flat => "No Sag",
            CurveStyle::HangingEnd => "Hanging End",
            CurveStyle::DroopingCenter => "Drooping Center",
        }
    }

    /// The offset function for this style.
    pub fn offset_fn(self) -> OffsetFn {
        match self {
            CurveStyle::Flat => flat_offset,
            CurveStyle::HangingEnd => hanging_end_offset,
            CurveStyle::DroopingCenter => drooping_center_offset,
        }
    }

    /// Offsets for a line given the advance of each character.
    ///
    /// `line_width` is the measured width of the whole line as reported by
    /// the font metrics provider.
    pub fn offsets(self, advances: &[f64], line_width: f64, weight: f64) -> Vec<f64> {
        let geometry = LineGeometry::new(line_width, weight);
        let offset = self.offset_fn();
        let count = advances.len();

        let mut cum_width = 0.0;
        advances
            .iter()
            .enumerate()
            .map(|(index, &char_width)| {
                let sample = GlyphSample {
                    index,
                    count,
                    cum_width,
                    char_width,
                };
                cum_width += char_width;
                offset(&sample, &geometry)
            })
            .collect()
    }

    /// Closed-form slope (d offset / dx) of the curve at `x`, measured from
    /// the line start.
    ///
    /// This is the derivative of the unpinned curve; the pinned end glyphs
    /// inherit the slope of the curve they were lifted from.
    pub fn slope_at(self, x: f64, line: &LineGeometry) -> f64 {
        if !line.is_bendable() {
            return 0.0;
        }
        match self {
            CurveStyle::Flat => 0.0,
            CurveStyle::HangingEnd => {
                2.0 * x * line.max_offset / (line.line_width * line.line_width)
            }
            CurveStyle::DroopingCenter => -2.0 * line.sag_factor * (x - line.center),
        }
    }
}

impl std::fmt::Display for CurveStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

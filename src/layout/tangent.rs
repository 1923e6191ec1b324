// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Rotation estimation: how far each glyph tilts to follow its curve.

use serde::{Deserialize, Serialize};

use crate::curve::{CurveStyle, LineGeometry};

/// How glyph rotation is derived from a line's curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Closed-form derivative of the active curve style
    #[default]
    Analytic,
    /// Finite differences over the offset array
    CentralDifference,
}

/// Convert a slope (dy/dx) into a rotation in degrees.
pub fn slope_to_degrees(slope: f64) -> f64 {
    slope.atan().to_degrees()
}

/// Estimate per-glyph rotation from sampled offsets.
///
/// Interior glyphs use a central difference, the two ends a one-sided
/// difference. Lines with fewer than two glyphs, and any pair of samples
/// with coincident centers, yield a slope of zero.
pub fn estimate_angles(centers: &[f64], offsets: &[f64]) -> Vec<f64> {
    let count = centers.len().min(offsets.len());
    if count < 2 {
        return vec![0.0; count];
    }

    let slope = |lo: usize, hi: usize| {
        let run = centers[hi] - centers[lo];
        if run == 0.0 {
            0.0
        } else {
            (offsets[hi] - offsets[lo]) / run
        }
    };

    (0..count)
        .map(|i| {
            let s = if i == 0 {
                slope(0, 1)
            } else if i + 1 == count {
                slope(i - 1, i)
            } else {
                slope(i - 1, i + 1)
            };
            slope_to_degrees(s)
        })
        .collect()
}

/// Per-glyph rotation from the closed-form slope of `style`.
///
/// `centers` are measured from the line start.
pub fn analytic_angles(style: CurveStyle, centers: &[f64], line: &LineGeometry) -> Vec<f64> {
    centers
        .iter()
        .map(|&x| slope_to_degrees(style.slope_at(x, line)))
        .collect()
}

/// Rotation for every glyph of a line using the requested mode.
pub fn glyph_angles(
    mode: RotationMode,
    style: CurveStyle,
    centers: &[f64],
    offsets: &[f64],
    line: &LineGeometry,
) -> Vec<f64> {
    match mode {
        RotationMode::Analytic => analytic_angles(style, centers, line),
        RotationMode::CentralDifference => estimate_angles(centers, offsets),
    }
}

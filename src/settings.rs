// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, sizes) belongs in `theme.rs`. Values a
//! user may want to change at runtime live in `config.rs` and default to the
//! constants here.

// ============================================================================
// WEIGHT SETTINGS
// ============================================================================
/// Lightest weight the configuration surface accepts
const WEIGHT_MIN: f64 = 0.1;

/// Heaviest weight the configuration surface accepts
const WEIGHT_MAX: f64 = 2.0;

/// Weight granularity (slider/shortcut step)
const WEIGHT_STEP: f64 = 0.1;

/// Weight used when nothing else is configured
const WEIGHT_DEFAULT: f64 = 1.0;

// ============================================================================
// CARET SETTINGS
// ============================================================================
/// Caret blink half-period in milliseconds
const CARET_BLINK_MS: u64 = 500;

/// Thickness of the caret bar in pixels
const CARET_THICKNESS: f64 = 2.0;

/// Gap between the sagged baseline and the caret bar
const CARET_BASELINE_GAP: f64 = 1.0;

// ============================================================================
// LAYOUT SETTINGS
// ============================================================================
/// Default font size in pixels
const FONT_SIZE: f64 = 16.0;

/// Fixed padding added below the deepest sag
const BOTTOM_PADDING: f64 = 20.0;

/// Inset of the first glyph from the widget's left edge
const LEFT_INSET: f64 = 8.0;

/// Inset of the first line from the widget's top edge
const TOP_INSET: f64 = 8.0;

/// Pixels scrolled per wheel line
const SCROLL_LINE_PX: f64 = 48.0;

// ============================================================================
// PERFORMANCE SETTINGS
// ============================================================================
/// Lines recomputed eagerly after a change event.
///
/// Lines beyond the budget are left to the lazy fallback inside the render
/// pass, so a pathological document cannot stall the UI thread on a single
/// keystroke.
const EAGER_LINE_BUDGET: usize = 2000;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Weight bounds and stepping
pub mod weight {
    /// Lower bound (inclusive)
    pub const MIN: f64 = super::WEIGHT_MIN;

    /// Upper bound (inclusive)
    pub const MAX: f64 = super::WEIGHT_MAX;

    /// Step between selectable weights
    pub const STEP: f64 = super::WEIGHT_STEP;

    /// Default weight
    pub const DEFAULT: f64 = super::WEIGHT_DEFAULT;

    /// Clamp a weight into range and snap it to the nearest step.
    pub fn sanitize(weight: f64) -> f64 {
        if !weight.is_finite() {
            return DEFAULT;
        }
        let snapped = (weight / STEP).round() * STEP;
        // Snapping can leave a trailing epsilon (0.30000000000000004)
        let snapped = (snapped * 10.0).round() / 10.0;
        snapped.clamp(MIN, MAX)
    }
}

/// Caret appearance and blinking
pub mod caret {
    /// Blink half-period in milliseconds
    pub const BLINK_MS: u64 = super::CARET_BLINK_MS;

    /// Bar thickness in pixels
    pub const THICKNESS: f64 = super::CARET_THICKNESS;

    /// Gap between baseline and bar
    pub const BASELINE_GAP: f64 = super::CARET_BASELINE_GAP;
}

/// Editor layout
pub mod layout {
    /// Default font size in pixels
    pub const FONT_SIZE: f64 = super::FONT_SIZE;

    /// Padding added to the deepest sag for the bottom margin
    pub const BOTTOM_PADDING: f64 = super::BOTTOM_PADDING;

    /// Left inset of line origins
    pub const LEFT_INSET: f64 = super::LEFT_INSET;

    /// Top inset of the first line
    pub const TOP_INSET: f64 = super::TOP_INSET;

    /// Pixels per scroll-wheel line
    pub const SCROLL_LINE_PX: f64 = super::SCROLL_LINE_PX;
}

/// Performance optimization settings
pub mod performance {
    /// Lines recomputed eagerly per change event.
    pub const EAGER_LINE_BUDGET: usize = super::EAGER_LINE_BUDGET;
}

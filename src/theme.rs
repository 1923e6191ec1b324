// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use masonry::vello::peniko::Color;

// ============================================================================
// BASE COLORS -- dark to light gray ramp
// ============================================================================
const BASE_A: Color = Color::from_rgb8(0x10, 0x10, 0x10);
const BASE_B: Color = Color::from_rgb8(0x1c, 0x1c, 0x1c);
const BASE_C: Color = Color::from_rgb8(0x2c, 0x2c, 0x2c);
const BASE_E: Color = Color::from_rgb8(0x50, 0x50, 0x50);
const BASE_G: Color = Color::from_rgb8(0x70, 0x70, 0x70);
const BASE_H: Color = Color::from_rgb8(0x80, 0x80, 0x80);
const BASE_I: Color = Color::from_rgb8(0x90, 0x90, 0x90);
const BASE_J: Color = Color::from_rgb8(0xa0, 0xa0, 0xa0);
const BASE_N: Color = Color::from_rgb8(0xe0, 0xe0, 0xe0);

// ============================================================================
// EDITOR SURFACE
// ============================================================================
const EDITOR_BACKGROUND: Color = BASE_B;
const EDITOR_TEXT: Color = BASE_N;
const EDITOR_CARET: Color = Color::from_rgb8(0xff, 0xaa, 0x33);
// Translucent white over the background
const EDITOR_LINE_HIGHLIGHT: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0x12);

// ============================================================================
// UI TEXT AND PANELS
// ============================================================================
const PRIMARY_UI_TEXT: Color = BASE_I;
const SECONDARY_UI_TEXT: Color = BASE_G;
const PANEL_BACKGROUND: Color = BASE_C;

// ============================================================================
// TOOLBAR BUTTONS AND ICONS
// ============================================================================
const TOOLBAR_BUTTON_UNSELECTED: Color = BASE_E;
const TOOLBAR_BUTTON_HOVERED: Color = BASE_H;
const TOOLBAR_BUTTON_SELECTED: Color = BASE_J;
const TOOLBAR_BUTTON_OUTLINE: Color = BASE_A;

const TOOLBAR_ICON_UNSELECTED: Color = BASE_J;
const TOOLBAR_ICON_HOVERED: Color = BASE_A;
const TOOLBAR_ICON_SELECTED: Color = BASE_A;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Colors for the sagging text surface
pub mod editor {
    use super::Color;
    pub const BACKGROUND: Color = super::EDITOR_BACKGROUND;
    pub const TEXT: Color = super::EDITOR_TEXT;
    pub const CARET: Color = super::EDITOR_CARET;
    /// Band behind the line holding the caret
    pub const LINE_HIGHLIGHT: Color = super::EDITOR_LINE_HIGHLIGHT;
}

/// Colors for UI text
pub mod text {
    use super::Color;
    pub const PRIMARY: Color = super::PRIMARY_UI_TEXT;
    pub const SECONDARY: Color = super::SECONDARY_UI_TEXT;
}

/// Colors for UI panels
pub mod panel {
    use super::Color;
    pub const BACKGROUND: Color = super::PANEL_BACKGROUND;
}

/// Colors for the curve style toolbar
///
/// Each button has a background fill, an outline and an icon stroke, each
/// styled per state.
pub mod toolbar {
    use super::Color;

    pub const BUTTON_UNSELECTED: Color = super::TOOLBAR_BUTTON_UNSELECTED;
    pub const BUTTON_HOVERED: Color = super::TOOLBAR_BUTTON_HOVERED;
    pub const BUTTON_SELECTED: Color = super::TOOLBAR_BUTTON_SELECTED;

    pub const BUTTON_OUTLINE: Color = super::TOOLBAR_BUTTON_OUTLINE;

    pub const ICON_UNSELECTED: Color = super::TOOLBAR_ICON_UNSELECTED;
    pub const ICON_HOVERED: Color = super::TOOLBAR_ICON_HOVERED;
    pub const ICON_SELECTED: Color = super::TOOLBAR_ICON_SELECTED;
}

/// Sizes for UI chrome
pub mod size {
    /// Gap between adjacent UI panels/toolbars
    pub const UI_PANEL_GAP: f64 = 8.0;

    // ===== Toolbar dimensions =====
    /// Size of toolbar buttons (width and height)
    pub const TOOLBAR_ITEM_SIZE: f64 = 36.0;
    /// Space between toolbar buttons
    pub const TOOLBAR_ITEM_SPACING: f64 = 4.0;
    /// Padding around the entire toolbar
    pub const TOOLBAR_PADDING: f64 = 4.0;
    /// Padding inside buttons for icons
    pub const TOOLBAR_ICON_PADDING: f64 = 8.0;
    /// Rounded corner radius for toolbar buttons
    pub const TOOLBAR_BUTTON_RADIUS: f64 = 5.0;
    /// Border thickness for toolbar buttons
    pub const TOOLBAR_BORDER_WIDTH: f64 = 1.5;
    /// Stroke width of toolbar icons
    pub const TOOLBAR_ICON_STROKE: f64 = 2.0;
}

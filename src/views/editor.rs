// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor screen - toolbar row, sagging text surface and status line

use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, FlexExt, button, flex_col, flex_row, label, sized_box};

use crate::components::style_toolbar_view;
use crate::data::AppState;
use crate::theme;
use crate::widget::sag_editor_view;

/// Height reserved for the status line
const STATUS_HEIGHT: f64 = 24.0;

/// The whole window content: controls on top, editor filling the rest.
pub fn editor_screen(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let gap = theme::size::UI_PANEL_GAP;

    flex_col((
        control_row(state),
        sag_editor_view(
            state.editor.clone(),
            state.config.font_size,
            |state: &mut AppState, update| {
                state.apply_editor_update(update);
            },
        )
        .flex(1.0),
        status_line(state),
    ))
    .cross_axis_alignment(CrossAxisAlignment::Fill)
    .gap(gap.px())
    .padding(gap)
    .background_color(theme::panel::BACKGROUND)
}

/// Weight label with -/+ steppers, then the curve style selector
fn control_row(state: &AppState) -> impl WidgetView<AppState> + use<> {
    flex_row((
        sized_box(
            label(state.weight_label())
                .text_size(14.0)
                .color(theme::text::PRIMARY),
        )
        .width(96.px()),
        button(
            label("\u{2212}").text_size(14.0).color(theme::text::PRIMARY),
            |state: &mut AppState| {
                state.step_weight(-1);
            },
        ),
        button(
            label("+").text_size(14.0).color(theme::text::PRIMARY),
            |state: &mut AppState| {
                state.step_weight(1);
            },
        ),
        style_toolbar_view(state.editor.style(), |state: &mut AppState, style| {
            state.select_style(style);
        }),
    ))
    .gap(theme::size::UI_PANEL_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Center)
}

fn status_line(state: &AppState) -> impl WidgetView<AppState> + use<> {
    sized_box(
        label(state.status_text())
            .text_size(12.0)
            .color(theme::text::SECONDARY),
    )
    .expand_width()
    .height(STATUS_HEIGHT.px())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_screen_builds_for_default_state() {
        let mut state = AppState::default();
        let _screen = editor_screen(&mut state);
        let _controls = control_row(&state);
        let _status = status_line(&state);
    }
}

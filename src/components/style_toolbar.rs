// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Curve style toolbar widget - Flat / HangingEnd / DroopingCenter
//!
//! One button per style, each showing the shape its lines take. Clicking a
//! button asks the app to replace the editor with one for that style.

use crate::curve::CurveStyle;
use crate::theme;
use kurbo::{Affine, BezPath, Point, Rect, RoundedRect, Size, Stroke};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerButton,
    PointerButtonEvent, PointerEvent, PropertiesMut, PropertiesRef, RegisterCtx, TextEvent, Update,
    UpdateCtx, Widget,
};
use masonry::vello::Scene;
use masonry::vello::peniko::{Brush, Color};
use std::marker::PhantomData;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Samples per icon curve
const ICON_SEGMENTS: usize = 16;

/// Visual state of one toolbar button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ButtonState {
    hovered: bool,
    selected: bool,
}

impl ButtonState {
    fn new(hovered: bool, selected: bool) -> Self {
        Self { hovered, selected }
    }

    fn background(self) -> Color {
        if self.selected {
            theme::toolbar::BUTTON_SELECTED
        } else if self.hovered {
            theme::toolbar::BUTTON_HOVERED
        } else {
            theme::toolbar::BUTTON_UNSELECTED
        }
    }

    fn icon(self) -> Color {
        if self.selected {
            theme::toolbar::ICON_SELECTED
        } else if self.hovered {
            theme::toolbar::ICON_HOVERED
        } else {
            theme::toolbar::ICON_UNSELECTED
        }
    }
}

/// Rectangle of the button at `index`, in toolbar coordinates
fn button_rect(index: usize) -> Rect {
    let size = theme::size::TOOLBAR_ITEM_SIZE;
    let x = theme::size::TOOLBAR_PADDING
        + index as f64 * (size + theme::size::TOOLBAR_ITEM_SPACING);
    Rect::new(
        x,
        theme::size::TOOLBAR_PADDING,
        x + size,
        theme::size::TOOLBAR_PADDING + size,
    )
}

fn toolbar_size(count: usize) -> Size {
    let item = theme::size::TOOLBAR_ITEM_SIZE;
    let padding = theme::size::TOOLBAR_PADDING;
    let spacing = theme::size::TOOLBAR_ITEM_SPACING;
    let width = 2.0 * padding + count as f64 * item + count.saturating_sub(1) as f64 * spacing;
    Size::new(width, item + 2.0 * padding)
}

/// Curve style toolbar widget
pub struct StyleToolbarWidget {
    selected_style: CurveStyle,
    hover_style: Option<CurveStyle>,
}

impl StyleToolbarWidget {
    pub fn new(selected_style: CurveStyle) -> Self {
        Self {
            selected_style,
            hover_style: None,
        }
    }

    /// Find which style button contains `point`
    fn style_at_point(point: Point) -> Option<CurveStyle> {
        CurveStyle::ALL
            .iter()
            .enumerate()
            .find(|(i, _)| button_rect(*i).contains(point))
            .map(|(_, &style)| style)
    }

    fn paint_button(scene: &mut Scene, style: CurveStyle, rect: Rect, state: ButtonState) {
        let button = RoundedRect::from_rect(rect, theme::size::TOOLBAR_BUTTON_RADIUS);
        scene.fill(
            peniko::Fill::NonZero,
            Affine::IDENTITY,
            &Brush::Solid(state.background()),
            None,
            &button,
        );
        scene.stroke(
            &Stroke::new(theme::size::TOOLBAR_BORDER_WIDTH),
            Affine::IDENTITY,
            &Brush::Solid(theme::toolbar::BUTTON_OUTLINE),
            None,
            &button,
        );

        let icon_box = rect.inset(-theme::size::TOOLBAR_ICON_PADDING);
        let icon = Affine::translate((icon_box.x0, icon_box.y0))
            * Affine::scale_non_uniform(icon_box.width(), icon_box.height())
            * style_icon(style);
        scene.stroke(
            &Stroke::new(theme::size::TOOLBAR_ICON_STROKE),
            Affine::IDENTITY,
            &Brush::Solid(state.icon()),
            None,
            &icon,
        );
    }
}

/// Action sent when a curve style is selected
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StyleSelected(pub CurveStyle);

impl Widget for StyleToolbarWidget {
    type Action = StyleSelected;

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        bc.constrain(toolbar_size(CurveStyle::ALL.len()))
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let panel = RoundedRect::from_rect(
            Rect::from_origin_size(Point::ZERO, ctx.size()),
            theme::size::TOOLBAR_BUTTON_RADIUS + theme::size::TOOLBAR_PADDING,
        );
        scene.fill(
            peniko::Fill::NonZero,
            Affine::IDENTITY,
            &Brush::Solid(theme::panel::BACKGROUND),
            None,
            &panel,
        );

        for (i, &style) in CurveStyle::ALL.iter().enumerate() {
            let state = ButtonState::new(
                self.hover_style == Some(style),
                self.selected_style == style,
            );
            Self::paint_button(scene, style, button_rect(i), state);
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::Toolbar
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_label(format!("Curve style: {}", self.selected_style.label()));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Move(state) => {
                let local_pos = ctx.local_position(state.current.position);
                let new_hover = Self::style_at_point(local_pos);
                if new_hover != self.hover_style {
                    self.hover_style = new_hover;
                    ctx.request_render();
                }
            }
            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                state,
                ..
            }) => {
                let local_pos = ctx.local_position(state.position);
                if let Some(style) = Self::style_at_point(local_pos) {
                    tracing::debug!("Style toolbar: clicked {:?}", style);
                    self.selected_style = style;
                    ctx.request_render();
                    ctx.submit_action::<StyleSelected>(StyleSelected(style));
                }
            }
            PointerEvent::Leave(_) => {
                if self.hover_style.is_some() {
                    self.hover_style = None;
                    ctx.request_render();
                }
            }
            _ => {}
        }
    }

    fn on_text_event(
        &mut self,
        _ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &TextEvent,
    ) {
    }
}

// --- Icon Definitions ---

/// The style's curve traced through a unit square, y-down.
///
/// Sampled from the style's own offset function so the icons always match
/// what the editor draws.
fn style_icon(style: CurveStyle) -> BezPath {
    let advances = [1.0; ICON_SEGMENTS + 1];
    let offsets = style.offsets(&advances, advances.len() as f64, 1.0);
    let deepest = offsets.iter().copied().fold(0.0, f64::max);
    // Keep the line near the top and let it sag toward the bottom
    let scale = if deepest > 0.0 { 0.6 / deepest } else { 0.0 };

    let mut path = BezPath::new();
    for (i, offset) in offsets.iter().enumerate() {
        let point = Point::new(i as f64 / ICON_SEGMENTS as f64, 0.25 + offset * scale);
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path
}

// --- Xilem View Wrapper ---

/// Public API to create a curve style toolbar view
pub fn style_toolbar_view<State, Action>(
    selected_style: CurveStyle,
    callback: impl Fn(&mut State, CurveStyle) + Send + Sync + 'static,
) -> StyleToolbarView<State, Action>
where
    Action: 'static,
{
    StyleToolbarView {
        selected_style,
        callback: Box::new(callback),
        phantom: PhantomData,
    }
}

type StyleToolbarCallback<State> = Box<dyn Fn(&mut State, CurveStyle) + Send + Sync>;

/// The Xilem View for StyleToolbarWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct StyleToolbarView<State, Action = ()> {
    selected_style: CurveStyle,
    callback: StyleToolbarCallback<State>,
    phantom: PhantomData<fn() -> (State, Action)>,
}

impl<State, Action> ViewMarker for StyleToolbarView<State, Action> {}

impl<State: 'static, Action: 'static + Default> View<State, Action, ViewCtx>
    for StyleToolbarView<State, Action>
{
    type Element = Pod<StyleToolbarWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = StyleToolbarWidget::new(self.selected_style);
        let pod = ctx.create_pod(widget);
        ctx.record_action(pod.new_widget.id());
        (pod, ())
    }

    fn rebuild(
        &self,
        _prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        // Shortcuts can change the style without a click
        let mut widget = element.downcast::<StyleToolbarWidget>();
        if widget.widget.selected_style != self.selected_style {
            widget.widget.selected_style = self.selected_style;
            widget.ctx.request_render();
        }
    }

    fn teardown(
        &self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        _element: Mut<'_, Self::Element>,
    ) {
    }

    fn message(
        &self,
        _view_state: &mut Self::ViewState,
        message: &mut MessageContext,
        _element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<Action> {
        match message.take_message::<StyleSelected>() {
            Some(action) => {
                (self.callback)(app_state, action.0);
                MessageResult::Action(Action::default())
            }
            None => MessageResult::Stale,
        }
    }
}

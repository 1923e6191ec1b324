// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Xilem View wrapper for SagEditorWidget

use super::{EditorUpdate, SagEditorWidget};
use crate::editor::SagEditor;
use std::marker::PhantomData;
use std::sync::Arc;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Create an editor view with a callback for editor updates
///
/// The callback receives every [`EditorUpdate`] the widget emits; its
/// `save_requested` flag is set for Cmd+S.
pub fn sag_editor_view<State, F>(
    editor: Arc<SagEditor>,
    font_size: f64,
    on_update: F,
) -> SagEditorView<State, F>
where
    F: Fn(&mut State, EditorUpdate),
{
    SagEditorView {
        editor,
        font_size,
        on_update,
        phantom: PhantomData,
    }
}

/// The Xilem View for SagEditorWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct SagEditorView<State, F> {
    editor: Arc<SagEditor>,
    font_size: f64,
    on_update: F,
    phantom: PhantomData<fn() -> State>,
}

impl<State, F> ViewMarker for SagEditorView<State, F> {}

impl<State: 'static, F: Fn(&mut State, EditorUpdate) + 'static> View<State, (), ViewCtx>
    for SagEditorView<State, F>
{
    type Element = Pod<SagEditorWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = SagEditorWidget::new((*self.editor).clone(), self.font_size);
        let pod = ctx.create_pod(widget);
        ctx.record_action(pod.new_widget.id());
        (pod, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        // A new Arc means the app replaced the editor (toolbar, reload)
        if Arc::ptr_eq(&self.editor, &prev.editor) {
            return;
        }
        tracing::debug!(
            "[SagEditorView::rebuild] Editor changed: {} at weight {:.1}",
            self.editor.style().label(),
            self.editor.weight()
        );
        let mut widget = element.downcast::<SagEditorWidget>();
        widget.widget.replace_editor((*self.editor).clone());
        widget.ctx.request_layout();
        widget.ctx.request_render();
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
    ) -> MessageResult<()> {
        match message.take_message::<EditorUpdate>() {
            Some(update) => {
                (self.on_update)(app_state, *update);
                MessageResult::Action(())
            }
            None => MessageResult::Stale,
        }
    }
}

//! Stage view glue: owns the model, the host document, and every
//! engine piece, and turns raw browser events into engine calls.
//!
//! Event flow: `mouse_down`/`mouse_move`/`mouse_up` feed the drag
//! controller and the selection coordinator, `key_down` feeds the
//! keyboard map, and the host calls `animation_frame` once per painted
//! frame to run the pending drag frame, one sticky-builder step and
//! one scroll-animator step.

use crate::drag::{DragResizeController, GestureEnd, StageContext};
use crate::history::{HistoryContext, HistoryManager};
use crate::input::Modifiers;
use crate::keyboard::{self, StageAction};
use crate::notify::{RedrawFanout, RedrawView};
use crate::selection::SelectionCoordinator;
use crate::sticky::{ResizeDirection, apply_position};
use stage_host::{HostDocument, ScrollAnimator, scroll::DEFAULT_SCROLL_SPEED};
use stage_model::{ElementId, ElementStore, PageId, StageError};

const MAX_HISTORY: usize = 100;

pub struct StageView {
    store: ElementStore,
    doc: Box<dyn HostDocument>,
    controller: DragResizeController,
    coordinator: SelectionCoordinator,
    fanout: RedrawFanout,
    history: HistoryManager,
    animator: ScrollAnimator,
    pages: Vec<PageId>,
    current_page: Option<PageId>,
    mobile: bool,
    pending_token: Option<u64>,
}

impl StageView {
    pub fn new(store: ElementStore, doc: Box<dyn HostDocument>) -> Self {
        Self {
            store,
            doc,
            controller: DragResizeController::new(),
            coordinator: SelectionCoordinator::new(),
            fanout: RedrawFanout::new(),
            history: HistoryManager::new(MAX_HISTORY),
            animator: ScrollAnimator::new(),
            pages: Vec::new(),
            current_page: None,
            mobile: false,
            pending_token: None,
        }
    }

    fn ctx(&self) -> StageContext {
        StageContext {
            mobile: self.mobile,
            current_page: self.current_page,
        }
    }

    // ─── Document lifecycle ──────────────────────────────────────────────

    /// Replace the whole model, e.g. when a document is opened. The
    /// history is tied to the document, so it resets too.
    pub fn open_document(
        &mut self,
        store: ElementStore,
        pages: Vec<PageId>,
        current_page: Option<PageId>,
    ) {
        self.store = store;
        self.pages = pages;
        self.current_page = current_page;
        self.history.reset();
        self.notify();
    }

    pub fn set_current_page(&mut self, page: Option<PageId>) {
        self.current_page = page;
        self.notify();
    }

    pub fn set_mobile(&mut self, mobile: bool) {
        self.mobile = mobile;
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn document(&self) -> &dyn HostDocument {
        self.doc.as_ref()
    }

    pub fn add_stage_view(&mut self, view: Box<dyn RedrawView>) {
        self.fanout.add_stage_view(view);
    }

    pub fn add_pane(&mut self, view: Box<dyn RedrawView>) {
        self.fanout.add_pane(view);
    }

    // ─── Mouse ───────────────────────────────────────────────────────────

    /// Mouse-down over the stage. An unselected target is selected
    /// right away so a select-and-drag in one gesture works. The
    /// toggle anchor is only set for targets that were selected before
    /// this mouse-down; an element selected by the mouse-down itself
    /// must not be toggled back off by the click that follows.
    pub fn mouse_down(
        &mut self,
        target: Option<ElementId>,
        handle: Option<ResizeDirection>,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    ) {
        match target {
            Some(element) => {
                let redirected = SelectionCoordinator::redirect(&self.store, element);
                let already_selected = self.store.selection().contains(&redirected);
                self.coordinator
                    .set_anchor(if already_selected { target } else { None });
                if !already_selected {
                    let changed = if modifiers.shift {
                        self.coordinator.select_multiple(&mut self.store, element)
                    } else {
                        self.coordinator.select(&mut self.store, Some(element))
                    };
                    if changed {
                        self.notify();
                    }
                }
            }
            None => self.coordinator.set_anchor(None),
        }
        self.controller.mouse_down(
            &self.store,
            self.doc.as_ref(),
            self.ctx(),
            target,
            handle,
            x,
            y,
        );
    }

    /// Mouse-move in viewport coordinates. Work is deferred to the
    /// next `animation_frame`.
    pub fn mouse_move(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        let ctx = self.ctx();
        if let Some(token) = self.controller.mouse_move(
            &mut self.store,
            self.doc.as_mut(),
            &mut self.history,
            ctx,
            x,
            y,
            modifiers,
        ) {
            self.pending_token = Some(token);
        }
    }

    /// One painted frame: the latest pending drag/resize frame, then
    /// one scroll-animation step.
    pub fn animation_frame(&mut self) -> Result<(), StageError> {
        let ctx = self.ctx();
        if let Some(token) = self.pending_token.take() {
            let applied = self.controller.frame(
                token,
                &mut self.store,
                self.doc.as_mut(),
                ctx,
                &mut self.animator,
            )?;
            if applied {
                self.notify();
            }
        }
        self.animator.step(self.doc.as_mut());
        Ok(())
    }

    pub fn mouse_up(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Result<(), StageError> {
        let ctx = self.ctx();
        let end = self.controller.mouse_up(
            &mut self.store,
            self.doc.as_mut(),
            ctx,
            x,
            y,
            modifiers,
        )?;
        match end {
            GestureEnd::None => {}
            GestureEnd::Click { target, shift } => {
                let changed = match (target, shift) {
                    (Some(element), true) => {
                        self.coordinator.select_multiple(&mut self.store, element)
                    }
                    (target, false) => self.coordinator.select(&mut self.store, target),
                    (None, true) => false,
                };
                if changed {
                    self.notify();
                }
            }
            GestureEnd::Dropped { .. } | GestureEnd::Resized => {
                self.doc.resize_body();
                self.notify();
            }
        }
        Ok(())
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a stage key press. Returns the resolved action so the
    /// surrounding editor can react to the ones the stage cannot do
    /// itself (opening the element's editor).
    pub fn key_down(
        &mut self,
        key: &str,
        modifiers: Modifiers,
    ) -> Result<Option<StageAction>, StageError> {
        let positioned = keyboard::selection_is_positioned(&self.store, self.mobile);
        let Some(action) = keyboard::resolve(key, modifiers, positioned) else {
            return Ok(None);
        };
        match action {
            StageAction::Nudge { dx, dy } => {
                let selection = self.store.selection();
                self.checkpoint();
                apply_position(&mut self.store, &selection, dx, dy, self.mobile)?;
                self.doc.resize_body();
                self.notify();
            }
            StageAction::Reorder(direction) => {
                let selection = self.store.selection();
                self.checkpoint();
                let moved = self.store.move_elements(&selection, direction);
                if let Some(&first) = selection.first()
                    && !moved.is_empty()
                {
                    self.scroll_to_element(first);
                }
                self.notify();
            }
            StageAction::SelectNone => {
                if self.coordinator.select_none(&mut self.store) {
                    self.notify();
                }
            }
            StageAction::Edit => {}
        }
        Ok(Some(action))
    }

    // ─── Selection entry points (menu/toolbar collaborators) ────────────

    pub fn select(&mut self, element: Option<ElementId>) {
        if self.coordinator.select(&mut self.store, element) {
            self.notify();
        }
    }

    pub fn select_none(&mut self) {
        if self.coordinator.select_none(&mut self.store) {
            self.notify();
        }
    }

    pub fn move_selection(&mut self, direction: stage_model::MoveDirection) {
        let selection = self.store.selection();
        self.checkpoint();
        self.store.move_elements(&selection, direction);
        self.notify();
    }

    // ─── History ─────────────────────────────────────────────────────────

    fn current_context(&self) -> HistoryContext {
        HistoryContext {
            scroll: self.doc.scroll(),
            page: self.current_page,
        }
    }

    fn checkpoint(&mut self) {
        let context = self.current_context();
        self.history.checkpoint(&self.store, context);
    }

    pub fn undo(&mut self) -> bool {
        let context = self.current_context();
        match self.history.undo(&mut self.store, context) {
            Some(restored) => {
                self.restore_context(restored);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let context = self.current_context();
        match self.history.redo(&mut self.store, context) {
            Some(restored) => {
                self.restore_context(restored);
                true
            }
            None => false,
        }
    }

    fn restore_context(&mut self, context: HistoryContext) {
        self.doc.set_scroll_x(context.scroll.0);
        self.doc.set_scroll_y(context.scroll.1);
        self.current_page = context.page;
        self.notify();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Scroll ──────────────────────────────────────────────────────────

    /// Animate the stage so the element's top sits at the vertical
    /// center of the viewport. The root never scrolls anywhere.
    pub fn scroll_to_element(&mut self, element: ElementId) {
        if element == self.store.root() {
            return;
        }
        if let Some((_, top)) = self.doc.page_offset(element) {
            let (_, viewport_height) = self.doc.viewport_size();
            let centered = top - (viewport_height / 2.0).round();
            self.animator.scroll_to(centered, DEFAULT_SCROLL_SPEED);
        }
    }

    fn notify(&mut self) {
        let selection = self.store.selection();
        self.fanout
            .notify(&selection, &self.pages, self.current_page);
    }
}

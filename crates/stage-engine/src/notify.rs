//! Redraw fan-out to dependent views.
//!
//! Every selection or geometry-completing change is announced to two
//! groups of listeners: the in-stage selection visuals first, then the
//! external panes (page tool, property tool, text-format bar, context
//! menu, breadcrumbs). The order is fixed and the calls are
//! synchronous, so a pane querying bounding boxes sees final state.

use stage_model::{ElementId, PageId};

/// Contract every dependent view implements.
pub trait RedrawView {
    fn redraw(&mut self, selected: &[ElementId], pages: &[PageId], current_page: Option<PageId>);
}

#[derive(Default)]
pub struct RedrawFanout {
    stage_views: Vec<Box<dyn RedrawView>>,
    panes: Vec<Box<dyn RedrawView>>,
}

impl RedrawFanout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-stage view; these are always notified before the
    /// external panes.
    pub fn add_stage_view(&mut self, view: Box<dyn RedrawView>) {
        self.stage_views.push(view);
    }

    pub fn add_pane(&mut self, view: Box<dyn RedrawView>) {
        self.panes.push(view);
    }

    pub fn notify(
        &mut self,
        selected: &[ElementId],
        pages: &[PageId],
        current_page: Option<PageId>,
    ) {
        for view in self.stage_views.iter_mut().chain(self.panes.iter_mut()) {
            view.redraw(selected, pages, current_page);
        }
    }
}

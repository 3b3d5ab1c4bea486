//! The drag/resize state machine.
//!
//! One controller per stage. A mouse-down arms it; the gesture becomes
//! a drag or a resize once the cursor has travelled 5 px, otherwise
//! the mouse-up is a click and selection takes over. While a gesture
//! is live the controller is driven from the animation-frame callback:
//! `mouse_move` only records the cursor and schedules a frame token,
//! and `frame` does the work for the latest token only, so a burst of
//! mouse events costs one application per painted frame.

use crate::history::{HistoryContext, HistoryManager};
use crate::input::Modifiers;
use crate::sticky::{
    ResizeDirection, SnapResult, STUCK_CLASS, StickyLineBuilder, StickyLineRegistry, StickyPoint,
    apply_position, apply_resize, has_ancestor_in, snap_position, snap_size,
};
use log::warn;
use stage_host::{HostDocument, ScrollAnimator, bounding_box, find_drop_zone};
use stage_model::{ElementId, ElementStore, PageId, StageError, format_px};

/// Below this total cursor travel a gesture is still a pending click.
pub const CLICK_THRESHOLD: f64 = 5.0;
/// Marker class on elements being dragged.
pub const DRAGGING_CLASS: &str = "dragging";
/// Marker class on the container that would receive the drop.
pub const DROP_CANDIDATE_CLASS: &str = "drop-zone-candidate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Armed,
    Dragging,
    Resizing,
}

/// Editor-wide state the controller needs but does not own.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageContext {
    pub mobile: bool,
    pub current_page: Option<PageId>,
}

/// How a mouse-up resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    None,
    /// The cursor never left the click threshold; selection acts next.
    Click {
        target: Option<ElementId>,
        shift: bool,
    },
    /// A drag finished; the selection was reparented into `target`.
    Dropped { target: ElementId },
    Resized,
}

#[derive(Debug)]
pub struct DragResizeController {
    phase: GesturePhase,
    target: Option<ElementId>,
    direction: Option<ResizeDirection>,
    /// Cursor and scroll captured at mouse-down, in viewport
    /// coordinates; shift locks measure total travel against these.
    initial_pos: (f64, f64),
    initial_scroll: (f64, f64),
    /// height / width at mouse-down, for the diagonal shift-resize
    /// ratio lock. Zero disables the lock.
    initial_ratio: f64,
    /// Cursor and scroll of the previously applied frame; per-frame
    /// offsets are deltas against these.
    last_pos: (f64, f64),
    last_scroll: (f64, f64),
    cursor: (f64, f64),
    modifiers: Modifiers,
    followers: Vec<ElementId>,
    pending_frame: u64,
    registry: StickyLineRegistry,
    builder: Option<StickyLineBuilder>,
}

impl DragResizeController {
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            target: None,
            direction: None,
            initial_pos: (0.0, 0.0),
            initial_scroll: (0.0, 0.0),
            initial_ratio: 0.0,
            last_pos: (0.0, 0.0),
            last_scroll: (0.0, 0.0),
            cursor: (0.0, 0.0),
            modifiers: Modifiers::NONE,
            followers: Vec::new(),
            pending_frame: 0,
            registry: StickyLineRegistry::new(),
            builder: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn registry(&self) -> &StickyLineRegistry {
        &self.registry
    }

    /// Arm the controller. A resize handle biases the gesture toward
    /// resizing once the click threshold is crossed.
    pub fn mouse_down(
        &mut self,
        store: &ElementStore,
        doc: &dyn HostDocument,
        ctx: StageContext,
        target: Option<ElementId>,
        handle: Option<ResizeDirection>,
        x: f64,
        y: f64,
    ) {
        if self.phase != GesturePhase::Idle {
            return;
        }
        self.phase = GesturePhase::Armed;
        self.target = target;
        self.direction = handle;
        self.initial_pos = (x, y);
        self.cursor = (x, y);
        self.last_pos = (x, y);
        self.initial_scroll = doc.scroll();
        self.last_scroll = self.initial_scroll;

        let anchor = target.unwrap_or_else(|| store.selection()[0]);
        self.initial_ratio = match bounding_box(store, doc, anchor, ctx.mobile) {
            Ok(b) if b.width() > 0.0 => b.height() / b.width(),
            _ => 0.0,
        };
    }

    /// Record the cursor. Crossing the click threshold starts the
    /// gesture (undo checkpoint, reparent to root, sticky build).
    /// Returns the frame token to pass to [`frame`] when a gesture is
    /// live; stale tokens are dropped there.
    pub fn mouse_move(
        &mut self,
        store: &mut ElementStore,
        doc: &mut dyn HostDocument,
        history: &mut HistoryManager,
        ctx: StageContext,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    ) -> Option<u64> {
        self.cursor = (x, y);
        self.modifiers = modifiers;
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Armed => {
                let travel = (self.initial_pos.0 - x).abs() + (self.initial_pos.1 - y).abs();
                if travel < CLICK_THRESHOLD {
                    return None;
                }
                if let Err(e) = self.begin_gesture(store, doc, history, ctx) {
                    warn!("gesture aborted at start: {e}");
                    self.teardown(doc);
                    return None;
                }
                self.pending_frame += 1;
                Some(self.pending_frame)
            }
            GesturePhase::Dragging | GesturePhase::Resizing => {
                self.pending_frame += 1;
                Some(self.pending_frame)
            }
        }
    }

    fn begin_gesture(
        &mut self,
        store: &mut ElementStore,
        doc: &mut dyn HostDocument,
        history: &mut HistoryManager,
        ctx: StageContext,
    ) -> Result<(), StageError> {
        history.checkpoint(
            store,
            HistoryContext {
                scroll: doc.scroll(),
                page: ctx.current_page,
            },
        );
        self.followers = store.selection();

        if self.direction.is_some() {
            self.phase = GesturePhase::Resizing;
        } else {
            self.phase = GesturePhase::Dragging;
            // lift every dragged element to the root so it escapes its
            // container's overflow and stacking context, rewriting its
            // position in page coordinates so it stays put visually
            for &id in &self.followers.clone() {
                if id == store.root() || !store.get(id)?.draggable {
                    continue;
                }
                let Some((left, top)) = doc.page_offset(id) else {
                    warn!("no live layout for dragged element {id}");
                    continue;
                };
                store.set_style(id, "left", &format_px(left), ctx.mobile)?;
                store.set_style(id, "top", &format_px(top), ctx.mobile)?;
                store.reparent(id, store.root())?;
                doc.add_class(id, DRAGGING_CLASS);
            }
        }

        self.registry.clear();
        self.builder = Some(StickyLineBuilder::new(store, ctx.current_page));
        Ok(())
    }

    /// Apply the latest recorded cursor position. Only the newest
    /// token does any work; stale frames are silently dropped.
    /// Geometry failures abort the gesture in place.
    pub fn frame(
        &mut self,
        token: u64,
        store: &mut ElementStore,
        doc: &mut dyn HostDocument,
        ctx: StageContext,
        animator: &mut ScrollAnimator,
    ) -> Result<bool, StageError> {
        if token != self.pending_frame {
            return Ok(false);
        }
        if !matches!(self.phase, GesturePhase::Dragging | GesturePhase::Resizing) {
            return Ok(false);
        }

        if let Some(builder) = self.builder.as_mut() {
            builder.step(store, doc, ctx.mobile, &mut self.registry)?;
        }

        let (sx, sy) = doc.scroll();
        let (mut x, mut y) = self.cursor;

        // shift: lock drags to the dominant axis, measured as total
        // travel since mouse-down, and lock diagonal resizes to the
        // initial aspect ratio
        if self.modifiers.shift {
            match self.phase {
                GesturePhase::Dragging => {
                    let total_x = self.initial_pos.0 + self.initial_scroll.0 - (x + sx);
                    let total_y = self.initial_pos.1 + self.initial_scroll.1 - (y + sy);
                    if total_x.abs() < total_y.abs() {
                        x = self.initial_pos.0 + self.initial_scroll.0 - sx;
                    } else {
                        y = self.initial_pos.1 + self.initial_scroll.1 - sy;
                    }
                }
                GesturePhase::Resizing => {
                    if let Some(dir) = self.direction
                        && dir.is_diagonal()
                    {
                        let mut width = x - self.initial_pos.0;
                        if matches!(dir, ResizeDirection::NorthEast | ResizeDirection::SouthWest) {
                            width = -width;
                        }
                        y = self.initial_pos.1 + width * self.initial_ratio;
                    }
                }
                _ => {}
            }
        }

        let dx = x - self.last_pos.0 + (sx - self.last_scroll.0);
        let dy = y - self.last_pos.1 + (sy - self.last_scroll.1);

        clear_stuck_markup(doc);

        let anchor = self.followers.first().copied().unwrap_or(store.root());
        let anchor_box = match bounding_box(store, doc, anchor, ctx.mobile) {
            Ok(b) => b,
            Err(StageError::GeometryUnavailable(id)) => {
                warn!("gesture aborted, no geometry for {id}");
                self.teardown(doc);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let snapped = match self.phase {
            GesturePhase::Dragging => {
                // mark the container that would take the drop
                let zone = find_drop_zone(
                    store,
                    doc,
                    x + sx,
                    y + sy,
                    ctx.current_page,
                    &self.followers,
                    ctx.mobile,
                )?;
                doc.remove_class_everywhere(DROP_CANDIDATE_CLASS);
                doc.add_class(zone, DROP_CANDIDATE_CLASS);

                let snapped = snap_position(&self.registry, &anchor_box, dx, dy);
                apply_position(store, &self.followers, snapped.dx, snapped.dy, ctx.mobile)?;
                snapped
            }
            GesturePhase::Resizing => {
                let direction = self.direction.unwrap_or(ResizeDirection::SouthEast);
                let snapped = snap_size(&self.registry, &anchor_box, direction, dx, dy);
                apply_resize(
                    store,
                    doc,
                    &self.followers,
                    direction,
                    snapped.dx,
                    snapped.dy,
                    ctx.mobile,
                )?;
                snapped
            }
            _ => unreachable!(),
        };
        mark_stuck(doc, anchor, &snapped);

        self.last_pos = (x, y);
        self.last_scroll = (sx, sy);

        animator.auto_scroll(doc, self.cursor.0, self.cursor.1);
        doc.resize_body();
        Ok(true)
    }

    /// Resolve the gesture. A still-armed controller reports a click;
    /// a drag finds its drop zone and reparents the selection there.
    pub fn mouse_up(
        &mut self,
        store: &mut ElementStore,
        doc: &mut dyn HostDocument,
        ctx: StageContext,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    ) -> Result<GestureEnd, StageError> {
        match self.phase {
            GesturePhase::Idle => Ok(GestureEnd::None),
            GesturePhase::Armed => {
                self.phase = GesturePhase::Idle;
                Ok(GestureEnd::Click {
                    target: self.target,
                    shift: modifiers.shift,
                })
            }
            GesturePhase::Resizing => {
                self.teardown(doc);
                Ok(GestureEnd::Resized)
            }
            GesturePhase::Dragging => {
                doc.remove_class_everywhere(DROP_CANDIDATE_CLASS);
                let (sx, sy) = doc.scroll();
                let zone = find_drop_zone(
                    store,
                    doc,
                    x + sx,
                    y + sy,
                    ctx.current_page,
                    &self.followers,
                    ctx.mobile,
                )?;
                for &id in &self.followers.clone() {
                    if id == store.root()
                        || !store.get(id)?.draggable
                        || has_ancestor_in(store, id, &self.followers)
                    {
                        continue;
                    }
                    store.reparent(id, zone)?;
                }
                doc.remove_class_everywhere(DRAGGING_CLASS);
                self.teardown(doc);
                Ok(GestureEnd::Dropped { target: zone })
            }
        }
    }

    fn teardown(&mut self, doc: &mut dyn HostDocument) {
        if let Some(mut builder) = self.builder.take() {
            builder.cancel();
        }
        self.registry.clear();
        clear_stuck_markup(doc);
        self.phase = GesturePhase::Idle;
        self.target = None;
        self.direction = None;
        self.followers.clear();
    }
}

impl Default for DragResizeController {
    fn default() -> Self {
        Self::new()
    }
}

fn clear_stuck_markup(doc: &mut dyn HostDocument) {
    doc.remove_class_everywhere(STUCK_CLASS);
    for point in StickyPoint::ALL {
        doc.remove_class_everywhere(&format!("{STUCK_CLASS}-{}", point.edge_name()));
    }
}

fn mark_stuck(doc: &mut dyn HostDocument, anchor: ElementId, snapped: &SnapResult) {
    for &(owner, point) in &snapped.stuck {
        for id in [anchor, owner] {
            doc.add_class(id, STUCK_CLASS);
            doc.add_class(id, &format!("{STUCK_CLASS}-{}", point.edge_name()));
        }
    }
}

//! Interaction engine for the visual stage.
//!
//! Everything between raw pointer/keyboard events and the element
//! store lives here: the drag/resize state machine, snap-to-edge
//! sticky lines, click selection, keyboard nudging and reordering,
//! undo/redo snapshots, and the redraw fan-out to dependent views.
//! [`StageView`] wires the pieces together; hosts feed it events and
//! call [`StageView::animation_frame`] once per painted frame.

pub mod drag;
pub mod history;
pub mod input;
pub mod keyboard;
pub mod notify;
pub mod selection;
pub mod sticky;
pub mod view;

pub use drag::{DragResizeController, GestureEnd, GesturePhase, StageContext};
pub use history::{HistoryContext, HistoryManager};
pub use input::Modifiers;
pub use keyboard::StageAction;
pub use notify::{RedrawFanout, RedrawView};
pub use selection::SelectionCoordinator;
pub use sticky::{ResizeDirection, SnapResult, StickyLine, StickyLineRegistry, StickyPoint};
pub use view::StageView;

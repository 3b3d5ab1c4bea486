//! The live-document contract.

use stage_model::ElementId;

/// What the engine needs from the hosted page.
///
/// Positions and sizes are stage pixels. `page_offset` is the
/// element's cumulative offset from the document origin, independent
/// of the current scroll, so bounding boxes live in page coordinates.
/// Callers converting from viewport (mouse) coordinates add the scroll
/// offset themselves.
pub trait HostDocument {
    /// The element's rendered height. Stored heights are usually
    /// `min-height`, so content can make the live value larger.
    fn computed_height(&self, id: ElementId) -> Option<f64>;

    /// Cumulative (left, top) offset from the document origin.
    fn page_offset(&self, id: ElementId) -> Option<(f64, f64)>;

    /// Size of the visible stage viewport.
    fn viewport_size(&self) -> (f64, f64);

    /// Full size of the scrollable page content.
    fn content_size(&self) -> (f64, f64);

    fn scroll(&self) -> (f64, f64);

    /// Set one scroll axis. Implementations clamp to the scrollable
    /// range, so a caller can detect the edge by reading back.
    fn set_scroll_x(&mut self, x: f64);
    fn set_scroll_y(&mut self, y: f64);

    /// Visual marker classes (`dragging`, `stuck`, `stuck-left`, the
    /// drop-zone candidate marker). Purely cosmetic on the host side.
    fn add_class(&mut self, id: ElementId, class: &str);
    fn remove_class(&mut self, id: ElementId, class: &str);
    fn remove_class_everywhere(&mut self, class: &str);

    /// Computed z-index, `None` for `auto`.
    fn z_index(&self, id: ElementId) -> Option<i32>;

    /// Re-run the host's body auto-resize routine after geometry
    /// changes (the page grows with its absolutely positioned content).
    fn resize_body(&mut self);
}

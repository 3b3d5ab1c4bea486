//! Bounding-box resolution against the live document.
//!
//! The stored style box alone is not enough to place an element: the
//! vertical size is usually a `min-height` that content can outgrow,
//! and a dragged element is temporarily reparented so its `left`/`top`
//! styles are in the wrong coordinate frame. The box therefore mixes
//! stored style (width) with live layout (height, page offset).

use crate::document::HostDocument;
use log::error;
use stage_model::{BoundingBox, ElementId, ElementStore, StageError, parse_px};

/// Resolve an element's box in page coordinates.
///
/// Width comes from the merged style, height is the larger of the live
/// computed height and the stored `min-height` (or `height` for
/// elements flagged to use it), and the position is the live page
/// offset. An element with no style box at all was never initialized;
/// that aborts the calling gesture.
pub fn bounding_box(
    store: &ElementStore,
    doc: &dyn HostDocument,
    id: ElementId,
    mobile: bool,
) -> Result<BoundingBox, StageError> {
    let element = store.get(id)?;
    if element.style.is_empty() {
        error!("no style box for {id}, cannot resolve geometry");
        return Err(StageError::GeometryUnavailable(id));
    }
    let style = element.style.merged(mobile);

    let width = style.get("width").and_then(|v| parse_px(v)).unwrap_or(0.0);

    let height_key = if element.use_height_not_min_height {
        "height"
    } else {
        "min-height"
    };
    let stored_height = style.get(height_key).and_then(|v| parse_px(v)).unwrap_or(0.0);
    let live_height = doc.computed_height(id).unwrap_or(0.0);
    let height = live_height.max(stored_height);

    let Some((left, top)) = doc.page_offset(id) else {
        error!("no live layout for {id}, cannot resolve geometry");
        return Err(StageError::GeometryUnavailable(id));
    };

    Ok(BoundingBox::new(left, left + width, top, top + height))
}

//! Drop-zone search: point → deepest accepting container.
//!
//! Walks the element tree from the root, descending into the best
//! droppable child whose box contains the point. Among overlapping
//! siblings the one with the higher z-index wins; at equal z-index the
//! later sibling wins (`auto` counts as 0, so the comparison reduces
//! to paint order for unlayered content). Excluded elements and their
//! whole subtrees are skipped, which keeps a dragged element from
//! being dropped into itself.

use crate::document::HostDocument;
use crate::geometry::bounding_box;
use stage_model::{ElementId, ElementStore, PageId, StageError};

/// Find the container that should receive a drop at page coordinates
/// (x, y). Falls back to the root when no child qualifies, so there is
/// always a target.
pub fn find_drop_zone(
    store: &ElementStore,
    doc: &dyn HostDocument,
    x: f64,
    y: f64,
    current_page: Option<PageId>,
    exclude: &[ElementId],
    mobile: bool,
) -> Result<ElementId, StageError> {
    descend(store, doc, store.root(), x, y, current_page, exclude, mobile)
}

#[allow(clippy::too_many_arguments)]
fn descend(
    store: &ElementStore,
    doc: &dyn HostDocument,
    current: ElementId,
    x: f64,
    y: f64,
    current_page: Option<PageId>,
    exclude: &[ElementId],
    mobile: bool,
) -> Result<ElementId, StageError> {
    let mut best: Option<(ElementId, i32)> = None;
    for &child in store.children(current)? {
        if exclude.contains(&child) {
            continue;
        }
        let element = store.get(child)?;
        if !element.droppable {
            continue;
        }
        if let Some(page) = current_page
            && !store.is_visible_on(child, page)?
        {
            continue;
        }
        let Ok(b) = bounding_box(store, doc, child, mobile) else {
            // uninitialized children cannot receive drops
            continue;
        };
        if !b.contains(x, y) {
            continue;
        }
        let z = doc.z_index(child).unwrap_or(0);
        // >= : the later sibling wins a z-index tie
        if best.is_none_or(|(_, best_z)| z >= best_z) {
            best = Some((child, z));
        }
    }
    match best {
        Some((child, _)) => descend(store, doc, child, x, y, current_page, exclude, mobile),
        None => Ok(current),
    }
}

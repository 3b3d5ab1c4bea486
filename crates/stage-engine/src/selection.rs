//! Selection changes from classified clicks.
//!
//! The drag controller owns click-vs-drag disambiguation; this module
//! only runs once a gesture is a click. Section content is never
//! selected directly, clicks on it land on the owning section.

use stage_model::{ElementId, ElementStore};

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    /// Element under the just-completed mouse-down, used by
    /// shift-click to toggle rather than re-add.
    anchor: Option<ElementId>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_anchor(&mut self, element: Option<ElementId>) {
        self.anchor = element;
    }

    /// Section content redirects to its parent section.
    pub fn redirect(store: &ElementStore, element: ElementId) -> ElementId {
        match store.get(element) {
            Ok(el) if el.is_section_content() => store.parent(element).unwrap_or(element),
            _ => element,
        }
    }

    /// Replace the selection with exactly `element`, or the root when
    /// there is no eligible target. Returns whether anything changed.
    pub fn select(&mut self, store: &mut ElementStore, element: Option<ElementId>) -> bool {
        let target = element
            .map(|id| Self::redirect(store, id))
            .filter(|&id| store.contains(id))
            .unwrap_or(store.root());
        self.apply(store, vec![target])
    }

    /// Shift-click: add to the selection, or remove when the clicked
    /// element is the anchor of the mouse-down that just ended (toggle
    /// without a second click).
    pub fn select_multiple(&mut self, store: &mut ElementStore, element: ElementId) -> bool {
        let target = Self::redirect(store, element);
        if !store.contains(target) {
            return false;
        }
        let mut selection = store.selection();
        let anchored = self.anchor.map(|a| Self::redirect(store, a)) == Some(target);
        if selection.contains(&target) && anchored {
            return self.deselect(store, target);
        }
        if selection.contains(&target) {
            return false;
        }
        selection.push(target);
        self.apply(store, selection)
    }

    /// Remove from the selection; an emptied selection falls back to
    /// the root.
    pub fn deselect(&mut self, store: &mut ElementStore, element: ElementId) -> bool {
        let target = Self::redirect(store, element);
        let mut selection = store.selection();
        let before = selection.len();
        selection.retain(|&id| id != target);
        if selection.len() == before {
            return false;
        }
        self.apply(store, selection)
    }

    /// Escape: reset the selection to exactly the root.
    pub fn select_none(&mut self, store: &mut ElementStore) -> bool {
        self.apply(store, vec![store.root()])
    }

    fn apply(&mut self, store: &mut ElementStore, ids: Vec<ElementId>) -> bool {
        if store.selection() == ids {
            return false;
        }
        *store = store.select(&ids);
        true
    }
}

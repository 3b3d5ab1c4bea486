//! The element store: an arena of element records plus a derived
//! parent index.
//!
//! The tree is a single-root hierarchy. Each element owns an ordered
//! `children` list; the reverse child → parent lookup is maintained
//! alongside every structural mutation so ancestor walks stay O(depth).
//! Selection changes are pure (they return a new store), structural
//! and style changes mutate in place.

use crate::element::ElementState;
use crate::error::StageError;
use crate::id::{ElementId, PageId};
use crate::style::StyleMap;
use std::collections::HashMap;

/// Where to move elements within their parent's child list. `Up` is
/// one step toward the first sibling, `Down` one step toward the last.
/// `Top` moves to the end of the list, which is the front-most paint
/// position under default stacking; `Bottom` moves to index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementStore {
    root: ElementId,
    elements: HashMap<ElementId, ElementState>,
    parent_index: HashMap<ElementId, ElementId>,
}

impl ElementStore {
    /// Create a store holding only the given root element.
    pub fn new(root: ElementState) -> Self {
        let root_id = root.id;
        let mut elements = HashMap::new();
        elements.insert(root_id, root);
        Self {
            root: root_id,
            elements,
            parent_index: HashMap::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Result<&ElementState, StageError> {
        self.elements.get(&id).ok_or(StageError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: ElementId) -> Result<&mut ElementState, StageError> {
        self.elements.get_mut(&id).ok_or(StageError::NotFound(id))
    }

    /// The element's parent, `None` for the root.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent_index.get(&id).copied()
    }

    /// Direct children in paint order (last is front-most).
    pub fn children(&self, id: ElementId) -> Result<&[ElementId], StageError> {
        Ok(&self.get(id)?.children)
    }

    /// All descendants: the direct children first, then each child's
    /// descendants in turn.
    pub fn children_recursive(&self, id: ElementId) -> Result<Vec<ElementId>, StageError> {
        let direct = self.get(id)?.children.clone();
        let mut all = direct.clone();
        for child in direct {
            all.extend(self.children_recursive(child)?);
        }
        Ok(all)
    }

    /// The first ancestor restricted to specific pages, if any.
    pub fn find_first_paged_ancestor(&self, id: ElementId) -> Option<ElementId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if let Ok(el) = self.get(ancestor)
                && el.is_paged()
            {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// An element shows on a page only if it and every ancestor do.
    pub fn is_visible_on(&self, id: ElementId, page: PageId) -> Result<bool, StageError> {
        let mut current = Some(id);
        while let Some(el) = current {
            if !self.get(el)?.visible_on(page) {
                return Ok(false);
            }
            current = self.parent(el);
        }
        Ok(true)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// A copy of the store with exactly `ids` selected. Duplicate ids
    /// collapse, so re-selecting the current selection is a no-op copy.
    pub fn select(&self, ids: &[ElementId]) -> ElementStore {
        let mut next = self.clone();
        for el in next.elements.values_mut() {
            el.selected = false;
        }
        for &id in ids {
            if let Some(el) = next.elements.get_mut(&id) {
                el.selected = true;
            }
        }
        next
    }

    /// The selected ids in tree order. Never empty: an empty selection
    /// reads as the root, so callers always have a subject.
    pub fn selection(&self) -> Vec<ElementId> {
        let mut selected = Vec::new();
        self.collect_selected(self.root, &mut selected);
        if selected.is_empty() {
            selected.push(self.root);
        }
        selected
    }

    fn collect_selected(&self, id: ElementId, out: &mut Vec<ElementId>) {
        if let Some(el) = self.elements.get(&id) {
            if el.selected {
                out.push(id);
            }
            for &child in &el.children {
                self.collect_selected(child, out);
            }
        }
    }

    // ─── Paint order ─────────────────────────────────────────────────────

    /// Move each element one step or to an end within its parent's
    /// children. Positions are decided against the order before the
    /// call, so a batch moves as a block instead of leapfrogging
    /// itself. Elements already at the boundary, and the root, stay
    /// put. Returns the ids whose position actually changed.
    pub fn move_elements(&mut self, ids: &[ElementId], direction: MoveDirection) -> Vec<ElementId> {
        // boundary decisions come from the view before any mutation,
        // so a batch is processed against consistent indices
        let mut targets: Vec<(ElementId, ElementId, usize, usize)> = Vec::new();
        for &id in ids {
            if id == self.root {
                continue;
            }
            if let Some(parent) = self.parent(id)
                && let Some(el) = self.elements.get(&parent)
                && let Some(index) = el.children.iter().position(|&c| c == id)
            {
                targets.push((parent, id, index, el.children.len() - 1));
            }
        }

        // processing order keeps the relative order of elements that
        // land on the same end of the list
        match direction {
            MoveDirection::Up | MoveDirection::Top => {
                targets.sort_by(|a, b| a.2.cmp(&b.2));
            }
            MoveDirection::Down | MoveDirection::Bottom => {
                targets.sort_by(|a, b| b.2.cmp(&a.2));
            }
        }

        let mut moved = Vec::new();
        for (parent, id, pre_index, last) in targets {
            let at_boundary = match direction {
                MoveDirection::Up | MoveDirection::Bottom => pre_index == 0,
                MoveDirection::Down | MoveDirection::Top => pre_index == last,
            };
            if at_boundary {
                continue;
            }
            let Some(el) = self.elements.get_mut(&parent) else {
                continue;
            };
            let Some(index) = el.children.iter().position(|&c| c == id) else {
                continue;
            };
            match direction {
                MoveDirection::Up => {
                    // duplicate ids in a batch can land on the boundary
                    // between the decision and the apply
                    if index == 0 {
                        continue;
                    }
                    el.children.swap(index, index - 1);
                }
                MoveDirection::Down => {
                    if index + 1 == el.children.len() {
                        continue;
                    }
                    el.children.swap(index, index + 1);
                }
                MoveDirection::Top => {
                    el.children.remove(index);
                    el.children.push(id);
                }
                MoveDirection::Bottom => {
                    el.children.remove(index);
                    el.children.insert(0, id);
                }
            }
            moved.push(id);
        }
        moved
    }

    // ─── Structure ───────────────────────────────────────────────────────

    /// Add a new element as the last (front-most) child of `parent`.
    pub fn insert(&mut self, parent: ElementId, state: ElementState) -> Result<(), StageError> {
        let id = state.id;
        if self.elements.contains_key(&id) {
            return Err(StageError::InvariantViolation(format!(
                "element {id} already in store"
            )));
        }
        self.get(parent)?;
        self.elements.insert(id, state);
        if let Some(p) = self.elements.get_mut(&parent) {
            p.children.push(id);
        }
        self.parent_index.insert(id, parent);
        Ok(())
    }

    /// Remove an element and its whole subtree. The root cannot be
    /// removed.
    pub fn remove(&mut self, id: ElementId) -> Result<(), StageError> {
        if id == self.root {
            return Err(StageError::InvariantViolation(
                "cannot remove the root element".into(),
            ));
        }
        self.get(id)?;
        let subtree = self.children_recursive(id)?;
        if let Some(parent) = self.parent(id)
            && let Some(p) = self.elements.get_mut(&parent)
        {
            p.children.retain(|&c| c != id);
        }
        self.elements.remove(&id);
        self.parent_index.remove(&id);
        for descendant in subtree {
            self.elements.remove(&descendant);
            self.parent_index.remove(&descendant);
        }
        Ok(())
    }

    /// Detach an element from its parent and append it to `new_parent`,
    /// making it the front-most child there. Reparenting the root or
    /// into the element's own subtree is an invariant violation.
    pub fn reparent(&mut self, id: ElementId, new_parent: ElementId) -> Result<(), StageError> {
        if id == self.root {
            return Err(StageError::InvariantViolation(
                "cannot reparent the root element".into(),
            ));
        }
        self.get(new_parent)?;
        if new_parent == id || self.children_recursive(id)?.contains(&new_parent) {
            return Err(StageError::InvariantViolation(format!(
                "cannot reparent {id} into its own subtree"
            )));
        }
        if let Some(old_parent) = self.parent(id)
            && let Some(p) = self.elements.get_mut(&old_parent)
        {
            p.children.retain(|&c| c != id);
        }
        if let Some(p) = self.elements.get_mut(&new_parent) {
            p.children.push(id);
        }
        self.parent_index.insert(id, new_parent);
        Ok(())
    }

    // ─── Styles ──────────────────────────────────────────────────────────

    /// The effective style map for an element in the given mode.
    pub fn style(&self, id: ElementId, mobile: bool) -> Result<StyleMap, StageError> {
        Ok(self.get(id)?.style.merged(mobile))
    }

    /// Write one property into the desktop or mobile slot.
    pub fn set_style(
        &mut self,
        id: ElementId,
        key: &str,
        value: &str,
        mobile: bool,
    ) -> Result<(), StageError> {
        self.get_mut(id)?
            .style
            .slot_mut(mobile)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    /// Drop one property from the desktop or mobile slot.
    pub fn remove_style(
        &mut self,
        id: ElementId,
        key: &str,
        mobile: bool,
    ) -> Result<(), StageError> {
        self.get_mut(id)?.style.slot_mut(mobile).remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use pretty_assertions::assert_eq;

    fn fixture() -> (ElementStore, ElementId, ElementId, ElementId, ElementId) {
        let root = ElementId::intern("body");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let a = ElementId::intern("a");
        let b = ElementId::intern("b");
        let c = ElementId::intern("c");
        store
            .insert(root, ElementState::new(a, ElementKind::Container))
            .unwrap();
        store
            .insert(root, ElementState::new(b, ElementKind::Text))
            .unwrap();
        store
            .insert(a, ElementState::new(c, ElementKind::Image))
            .unwrap();
        (store, root, a, b, c)
    }

    #[test]
    fn parent_and_children() {
        let (store, root, a, b, c) = fixture();
        assert_eq!(store.parent(root), None);
        assert_eq!(store.parent(c), Some(a));
        assert_eq!(store.children(root).unwrap(), &[a, b]);
        assert_eq!(store.children_recursive(root).unwrap(), vec![a, b, c]);
    }

    #[test]
    fn select_is_pure_and_idempotent() {
        let (store, root, a, _b, c) = fixture();
        let selected = store.select(&[a, c, a]);
        // the original store is untouched
        assert_eq!(store.selection(), vec![root]);
        assert_eq!(selected.selection(), vec![a, c]);
        // re-selecting the same set changes nothing
        let again = selected.select(&[a, c]);
        assert_eq!(again, selected);
    }

    #[test]
    fn empty_selection_reads_as_root() {
        let (store, root, a, _b, _c) = fixture();
        let selected = store.select(&[a]);
        let cleared = selected.select(&[]);
        assert_eq!(cleared.selection(), vec![root]);
    }

    #[test]
    fn move_up_and_boundaries() {
        let (mut store, root, a, b, _c) = fixture();
        // a is already first: silent no-op
        assert_eq!(store.move_elements(&[a], MoveDirection::Up), vec![]);
        assert_eq!(store.children(root).unwrap(), &[a, b]);

        let moved = store.move_elements(&[b], MoveDirection::Up);
        assert_eq!(moved, vec![b]);
        assert_eq!(store.children(root).unwrap(), &[b, a]);

        // root never moves
        assert_eq!(store.move_elements(&[root], MoveDirection::Top), vec![]);
    }

    #[test]
    fn batched_move_keeps_relative_order() {
        let root = ElementId::intern("batch-root");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let ids: Vec<ElementId> = ["m1", "m2", "m3", "m4"]
            .iter()
            .map(|n| ElementId::intern(n))
            .collect();
        for &id in &ids {
            store
                .insert(root, ElementState::new(id, ElementKind::Text))
                .unwrap();
        }
        // the trailing pair moves up as a block
        store.move_elements(&[ids[2], ids[3]], MoveDirection::Up);
        assert_eq!(
            store.children(root).unwrap(),
            &[ids[0], ids[2], ids[3], ids[1]]
        );
        // a block sent to the top keeps its relative order
        store.move_elements(&[ids[0], ids[2]], MoveDirection::Top);
        assert_eq!(
            store.children(root).unwrap(),
            &[ids[3], ids[1], ids[0], ids[2]]
        );
    }

    #[test]
    fn top_and_bottom() {
        let (mut store, root, a, b, _c) = fixture();
        // b is already last (front-most): Top is a no-op
        assert_eq!(store.move_elements(&[b], MoveDirection::Top), vec![]);
        store.move_elements(&[a], MoveDirection::Top);
        assert_eq!(store.children(root).unwrap(), &[b, a]);
        store.move_elements(&[a], MoveDirection::Bottom);
        assert_eq!(store.children(root).unwrap(), &[a, b]);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let (mut store, root, a, _b, _c) = fixture();
        let err = store
            .insert(root, ElementState::new(a, ElementKind::Text))
            .unwrap_err();
        assert!(matches!(err, StageError::InvariantViolation(_)));
    }

    #[test]
    fn remove_cascades() {
        let (mut store, root, a, b, c) = fixture();
        store.remove(a).unwrap();
        assert!(!store.contains(a));
        assert!(!store.contains(c));
        assert_eq!(store.children(root).unwrap(), &[b]);
        assert_eq!(store.parent(c), None);
    }

    #[test]
    fn reparent_appends_at_front() {
        let (mut store, root, a, b, c) = fixture();
        store.reparent(c, root).unwrap();
        assert_eq!(store.children(root).unwrap(), &[a, b, c]);
        assert_eq!(store.parent(c), Some(root));
        assert!(store.children(a).unwrap().is_empty());

        // cycle is refused
        let err = store.reparent(root, a).unwrap_err();
        assert!(matches!(err, StageError::InvariantViolation(_)));
        let err = store.reparent(a, a).unwrap_err();
        assert!(matches!(err, StageError::InvariantViolation(_)));
    }

    #[test]
    fn page_visibility_walks_ancestors() {
        let (mut store, _root, a, _b, c) = fixture();
        let home = PageId::intern("vis-home");
        let about = PageId::intern("vis-about");
        store.get_mut(a).unwrap().page_names.push(home);

        assert!(store.is_visible_on(c, home).unwrap());
        // c itself is unrestricted but its parent is pinned to home
        assert!(!store.is_visible_on(c, about).unwrap());

        assert_eq!(store.find_first_paged_ancestor(c), Some(a));
        assert_eq!(store.find_first_paged_ancestor(a), None);
    }

    #[test]
    fn style_read_write() {
        let (mut store, _root, a, _b, _c) = fixture();
        store.set_style(a, "left", "10px", false).unwrap();
        store.set_style(a, "left", "0px", true).unwrap();
        assert_eq!(
            store.style(a, false).unwrap().get("left").map(String::as_str),
            Some("10px")
        );
        assert_eq!(
            store.style(a, true).unwrap().get("left").map(String::as_str),
            Some("0px")
        );
        store.remove_style(a, "left", true).unwrap();
        assert_eq!(
            store.style(a, true).unwrap().get("left").map(String::as_str),
            Some("10px")
        );
    }
}

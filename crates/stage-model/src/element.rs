//! Element records — one per editable node of the hosted document.
//!
//! The element's type is an explicit tagged variant, and its stage
//! affordances (draggable, resizable, droppable) are explicit fields
//! rather than being inferred from CSS class membership. Defaults
//! derive from the kind but the editor may override them per element.

use crate::id::{ElementId, PageId};
use crate::style::ElementStyle;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What kind of editable element this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Generic absolute-positioned container.
    Container,
    /// Full-width section of the page flow.
    Section,
    /// The centered content pseudo-child of a section. Never selected
    /// or deleted directly; operations redirect to the parent section.
    SectionContent,
    Image,
    Text,
    /// Raw HTML box.
    Html,
}

impl ElementKind {
    /// Whether elements of this kind accept dropped children by default.
    pub fn default_droppable(&self) -> bool {
        matches!(
            self,
            ElementKind::Container | ElementKind::Section | ElementKind::SectionContent
        )
    }

    /// Section content is moved through its section, never on its own.
    pub fn default_draggable(&self) -> bool {
        !matches!(self, ElementKind::SectionContent)
    }
}

/// One editable node: identity, tree position, selection and page
/// visibility state, stage affordances, and its style record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementState {
    pub id: ElementId,
    pub kind: ElementKind,

    /// Ordered child ids. The order is the DOM order, which is the
    /// paint order for children without an explicit z-index: last is
    /// front-most.
    pub children: Vec<ElementId>,

    pub selected: bool,

    /// Pages this element is visible on. Empty means all pages.
    pub page_names: SmallVec<[PageId; 2]>,

    /// Stage affordances. Defaults derive from `kind`; the editor can
    /// clear them to pin an element (the document's `prevent-*` markers).
    pub draggable: bool,
    pub resizable: bool,
    pub droppable: bool,

    /// Whether the stored vertical size lives in `height` rather than
    /// `min-height` (text boxes grow with content, images do not).
    pub use_height_not_min_height: bool,

    pub style: ElementStyle,
}

impl ElementState {
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            children: Vec::new(),
            selected: false,
            page_names: SmallVec::new(),
            draggable: kind.default_draggable(),
            resizable: true,
            droppable: kind.default_droppable(),
            use_height_not_min_height: matches!(kind, ElementKind::Image),
            style: ElementStyle::default(),
        }
    }

    pub fn is_section_content(&self) -> bool {
        self.kind == ElementKind::SectionContent
    }

    /// True if the element is restricted to some pages.
    pub fn is_paged(&self) -> bool {
        !self.page_names.is_empty()
    }

    /// Visible on the given page: either unrestricted or listing it.
    pub fn visible_on(&self, page: PageId) -> bool {
        self.page_names.is_empty() || self.page_names.contains(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_kind() {
        let container = ElementState::new(ElementId::intern("c"), ElementKind::Container);
        assert!(container.draggable);
        assert!(container.droppable);
        assert!(!container.use_height_not_min_height);

        let content = ElementState::new(ElementId::intern("sc"), ElementKind::SectionContent);
        assert!(!content.draggable);
        assert!(content.is_section_content());

        let image = ElementState::new(ElementId::intern("img"), ElementKind::Image);
        assert!(image.use_height_not_min_height);
        assert!(!image.droppable);
    }

    #[test]
    fn page_visibility() {
        let mut el = ElementState::new(ElementId::intern("el"), ElementKind::Text);
        let home = PageId::intern("home");
        let about = PageId::intern("about");

        // unrestricted: visible everywhere
        assert!(el.visible_on(home));

        el.page_names.push(home);
        assert!(el.visible_on(home));
        assert!(!el.visible_on(about));
    }

    #[test]
    fn serializes_as_json() {
        let el = ElementState::new(ElementId::intern("hero"), ElementKind::Section);
        let json = serde_json::to_string(&el).unwrap();
        let back: ElementState = serde_json::from_str(&json).unwrap();
        assert_eq!(el, back);
    }
}

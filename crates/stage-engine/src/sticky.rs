//! Sticky lines: edge-alignment guides and the snap math for drag and
//! resize.
//!
//! While a gesture is active the registry holds one line per edge of
//! every candidate element. Lines are discovered incrementally, one
//! edge per animation frame, so a large page never blocks the first
//! drag frames; the builder is an explicit resumable stepper that the
//! view drives from its frame callback and cancels on mouse-up.

use log::warn;
use std::collections::HashSet;
use stage_host::{HostDocument, bounding_box};
use stage_model::{BoundingBox, ElementId, ElementStore, PageId, StageError, format_px, parse_px};

/// Snap when an edge is strictly closer than this to a line.
pub const STICKY_DISTANCE: f64 = 5.0;
pub const MIN_WIDTH: f64 = 20.0;
pub const MIN_HEIGHT: f64 = 20.0;
/// Base marker class for snapped elements; an edge class
/// (`stuck-left`, ...) is added next to it.
pub const STUCK_CLASS: &str = "stuck";

// ─── Lines ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickyPoint {
    Left,
    Right,
    Top,
    Bottom,
}

impl StickyPoint {
    pub const ALL: [StickyPoint; 4] = [
        StickyPoint::Left,
        StickyPoint::Right,
        StickyPoint::Top,
        StickyPoint::Bottom,
    ];

    /// Vertical guides snap horizontal movement.
    pub fn vertical(self) -> bool {
        matches!(self, StickyPoint::Left | StickyPoint::Right)
    }

    pub fn edge_name(self) -> &'static str {
        match self {
            StickyPoint::Left => "left",
            StickyPoint::Right => "right",
            StickyPoint::Top => "top",
            StickyPoint::Bottom => "bottom",
        }
    }

    /// The matching coordinate of a bounding box.
    pub fn of(self, b: &BoundingBox) -> f64 {
        match self {
            StickyPoint::Left => b.left,
            StickyPoint::Right => b.right,
            StickyPoint::Top => b.top,
            StickyPoint::Bottom => b.bottom,
        }
    }
}

/// One alignment guide, owned by the element whose edge produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyLine {
    /// `<elementId>_<edge>`, unique within a drag session.
    pub id: String,
    pub vertical: bool,
    pub position: f64,
    pub sticky_point: StickyPoint,
    pub element: ElementId,
}

impl StickyLine {
    pub fn for_edge(element: ElementId, point: StickyPoint, b: &BoundingBox) -> Self {
        Self {
            id: format!("{element}_{}", point.edge_name()),
            vertical: point.vertical(),
            position: point.of(b),
            sticky_point: point,
            element,
        }
    }
}

/// Lines registered for the current drag session, in discovery order.
#[derive(Debug, Default)]
pub struct StickyLineRegistry {
    lines: Vec<StickyLine>,
    ids: HashSet<String>,
}

impl StickyLineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, line: StickyLine) -> Result<(), StageError> {
        if !self.ids.insert(line.id.clone()) {
            return Err(StageError::InvariantViolation(format!(
                "sticky line {} already registered",
                line.id
            )));
        }
        self.lines.push(line);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StickyLine> {
        self.lines.iter()
    }
}

// ─── Incremental build ───────────────────────────────────────────────────

/// Resumable discovery of sticky lines: one edge per step.
///
/// Candidates are fixed when the builder is created (gesture start):
/// draggable, unselected elements that are visible on the current page
/// or not page-restricted at all. The root is never a candidate.
#[derive(Debug)]
pub struct StickyLineBuilder {
    candidates: Vec<ElementId>,
    cursor: usize,
    current_box: Option<BoundingBox>,
    cancelled: bool,
}

impl StickyLineBuilder {
    pub fn new(store: &ElementStore, current_page: Option<PageId>) -> Self {
        let selected = store.selection();
        let candidates = store
            .children_recursive(store.root())
            .unwrap_or_default()
            .into_iter()
            .filter(|&id| {
                let Ok(el) = store.get(id) else {
                    return false;
                };
                if !el.draggable || el.selected || selected.contains(&id) {
                    return false;
                }
                match current_page {
                    Some(page) => store.is_visible_on(id, page).unwrap_or(false),
                    None => true,
                }
            })
            .collect();
        Self {
            candidates,
            cursor: 0,
            current_box: None,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_done(&self) -> bool {
        self.cancelled || self.cursor >= self.candidates.len() * StickyPoint::ALL.len()
    }

    /// Register one more edge. Returns whether work remains. Candidates
    /// whose geometry cannot be resolved are skipped whole.
    pub fn step(
        &mut self,
        store: &ElementStore,
        doc: &dyn HostDocument,
        mobile: bool,
        registry: &mut StickyLineRegistry,
    ) -> Result<bool, StageError> {
        let edges = StickyPoint::ALL.len();
        while !self.is_done() {
            let element = self.candidates[self.cursor / edges];
            let edge = StickyPoint::ALL[self.cursor % edges];

            if self.cursor % edges == 0 {
                match bounding_box(store, doc, element, mobile) {
                    Ok(b) => self.current_box = Some(b),
                    Err(StageError::GeometryUnavailable(_)) => {
                        warn!("skipping sticky candidate {element} with no geometry");
                        self.cursor += edges;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            if let Some(b) = self.current_box {
                registry.add(StickyLine::for_edge(element, edge, &b))?;
            }
            self.cursor += 1;
            break;
        }
        Ok(!self.is_done())
    }
}

// ─── Resize handles ──────────────────────────────────────────────────────

/// The eight resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeDirection {
    /// Handles with an east/west component; only these consider
    /// vertical (left/right) lines.
    pub fn horizontal(self) -> bool {
        !matches!(self, ResizeDirection::North | ResizeDirection::South)
    }

    /// Handles with a north/south component; only these consider
    /// horizontal (top/bottom) lines.
    pub fn vertical(self) -> bool {
        !matches!(self, ResizeDirection::East | ResizeDirection::West)
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            ResizeDirection::NorthEast
                | ResizeDirection::NorthWest
                | ResizeDirection::SouthEast
                | ResizeDirection::SouthWest
        )
    }

    /// Resizing from the left edge: a width clamp must move `left`.
    fn west_side(self) -> bool {
        matches!(
            self,
            ResizeDirection::West | ResizeDirection::SouthWest | ResizeDirection::NorthWest
        )
    }

    /// Resizing from the top edge: a height clamp must move `top`.
    fn north_side(self) -> bool {
        matches!(
            self,
            ResizeDirection::North | ResizeDirection::NorthEast | ResizeDirection::NorthWest
        )
    }

    /// Map a raw mouse offset to (position delta, size delta) per axis.
    /// Dragging a north or west handle moves the position with the
    /// mouse and grows the size by the opposite amount, so the far
    /// edge stays fixed.
    pub fn deltas(self, dx: f64, dy: f64) -> ((f64, f64), (f64, f64)) {
        match self {
            ResizeDirection::South => ((0.0, 0.0), (0.0, dy)),
            ResizeDirection::North => ((0.0, dy), (0.0, -dy)),
            ResizeDirection::West => ((dx, 0.0), (-dx, 0.0)),
            ResizeDirection::East => ((0.0, 0.0), (dx, 0.0)),
            ResizeDirection::SouthEast => ((0.0, 0.0), (dx, dy)),
            ResizeDirection::SouthWest => ((dx, 0.0), (-dx, dy)),
            ResizeDirection::NorthEast => ((0.0, dy), (dx, -dy)),
            ResizeDirection::NorthWest => ((dx, dy), (-dx, -dy)),
        }
    }
}

// ─── Snap math ───────────────────────────────────────────────────────────

/// The outcome of consulting the registry: the (possibly replaced)
/// offsets plus the edges that snapped, for visual marking.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub dx: f64,
    pub dy: f64,
    /// (owning element, edge) of each applied line.
    pub stuck: Vec<(ElementId, StickyPoint)>,
}

/// Snap a pure translation. The first matching line per axis replaces
/// that axis' raw offset with the exact delta to the line.
pub fn snap_position(
    registry: &StickyLineRegistry,
    anchor: &BoundingBox,
    dx: f64,
    dy: f64,
) -> SnapResult {
    snap(registry, anchor, dx, dy, None)
}

/// Snap a resize: same matching, but a line only applies when its edge
/// is compatible with the active handle.
pub fn snap_size(
    registry: &StickyLineRegistry,
    anchor: &BoundingBox,
    direction: ResizeDirection,
    dx: f64,
    dy: f64,
) -> SnapResult {
    snap(registry, anchor, dx, dy, Some(direction))
}

fn snap(
    registry: &StickyLineRegistry,
    anchor: &BoundingBox,
    mut dx: f64,
    mut dy: f64,
    direction: Option<ResizeDirection>,
) -> SnapResult {
    let mut stuck = Vec::new();
    let mut stuck_x = false;
    let mut stuck_y = false;
    for line in registry.iter() {
        if stuck_x && stuck_y {
            break;
        }
        if let Some(dir) = direction {
            let compatible = if line.sticky_point.vertical() {
                dir.horizontal()
            } else {
                dir.vertical()
            };
            if !compatible {
                continue;
            }
        }
        let delta = line.position - line.sticky_point.of(anchor);
        if delta.abs() >= STICKY_DISTANCE {
            continue;
        }
        if line.sticky_point.vertical() {
            if !stuck_x {
                dx = delta;
                stuck_x = true;
                stuck.push((line.element, line.sticky_point));
            }
        } else if !stuck_y {
            dy = delta;
            stuck_y = true;
            stuck.push((line.element, line.sticky_point));
        }
    }
    SnapResult { dx, dy, stuck }
}

// ─── Applying offsets ────────────────────────────────────────────────────

/// Translate every follower by (dx, dy), writing rounded `left`/`top`
/// back through the store. Followers whose parent is also in the list
/// are skipped so they are not moved twice, as is the root and
/// anything drag-prevented.
pub fn apply_position(
    store: &mut ElementStore,
    followers: &[ElementId],
    dx: f64,
    dy: f64,
    mobile: bool,
) -> Result<(), StageError> {
    for &id in followers {
        if id == store.root() || !store.get(id)?.draggable {
            continue;
        }
        if has_ancestor_in(store, id, followers) {
            continue;
        }
        let style = store.style(id, mobile)?;
        let left = style.get("left").and_then(|v| parse_px(v)).unwrap_or(0.0);
        let top = style.get("top").and_then(|v| parse_px(v)).unwrap_or(0.0);
        store.set_style(id, "left", &format_px(left + dx), mobile)?;
        store.set_style(id, "top", &format_px(top + dy), mobile)?;
    }
    Ok(())
}

/// Resize every follower through the given handle, writing rounded
/// position and size styles. Sizes clamp at 20×20; when the clamp
/// happens on a north/west handle the position compensates so the
/// opposite edge stays fixed. Section content still narrower than the
/// viewport minus a 100 px margin doubles its horizontal size delta,
/// because its layout centers it.
pub fn apply_resize(
    store: &mut ElementStore,
    doc: &dyn HostDocument,
    followers: &[ElementId],
    direction: ResizeDirection,
    dx: f64,
    dy: f64,
    mobile: bool,
) -> Result<(), StageError> {
    let (viewport_width, _) = doc.viewport_size();
    for &id in followers {
        let element = store.get(id)?;
        if id == store.root() || !element.resizable {
            continue;
        }
        let centered = element.is_section_content();
        let height_key = if element.use_height_not_min_height {
            "height"
        } else {
            "min-height"
        };

        let b = bounding_box(store, doc, id, mobile)?;
        let ((mut pos_dx, mut pos_dy), (mut size_dx, size_dy)) = direction.deltas(dx, dy);

        if centered && b.width() < viewport_width - 100.0 {
            size_dx *= 2.0;
        }

        let mut new_width = b.width() + size_dx;
        let mut new_height = b.height() + size_dy;
        if new_width < MIN_WIDTH {
            if direction.west_side() {
                pos_dx -= MIN_WIDTH - new_width;
            }
            new_width = MIN_WIDTH;
        }
        if new_height < MIN_HEIGHT {
            if direction.north_side() {
                pos_dy -= MIN_HEIGHT - new_height;
            }
            new_height = MIN_HEIGHT;
        }

        let style = store.style(id, mobile)?;
        let left = style.get("left").and_then(|v| parse_px(v)).unwrap_or(0.0);
        let top = style.get("top").and_then(|v| parse_px(v)).unwrap_or(0.0);

        store.set_style(id, "left", &format_px(left + pos_dx), mobile)?;
        store.set_style(id, "top", &format_px(top + pos_dy), mobile)?;
        store.set_style(id, "width", &format_px(new_width), mobile)?;
        store.set_style(id, height_key, &format_px(new_height), mobile)?;
    }
    Ok(())
}

pub(crate) fn has_ancestor_in(store: &ElementStore, id: ElementId, set: &[ElementId]) -> bool {
    let mut current = store.parent(id);
    while let Some(ancestor) = current {
        if set.contains(&ancestor) {
            return true;
        }
        current = store.parent(ancestor);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stage_host::FakeDocument;
    use stage_model::{ElementKind, ElementState};

    fn line_at(name: &str, point: StickyPoint, position: f64) -> StickyLine {
        StickyLine::for_edge(
            ElementId::intern(name),
            point,
            &match point {
                StickyPoint::Left => BoundingBox::new(position, position + 1.0, 0.0, 1.0),
                StickyPoint::Right => BoundingBox::new(position - 1.0, position, 0.0, 1.0),
                StickyPoint::Top => BoundingBox::new(0.0, 1.0, position, position + 1.0),
                StickyPoint::Bottom => BoundingBox::new(0.0, 1.0, position - 1.0, position),
            },
        )
    }

    #[test]
    fn duplicate_line_ids_are_an_invariant_violation() {
        let mut registry = StickyLineRegistry::new();
        registry
            .add(line_at("dup", StickyPoint::Left, 10.0))
            .unwrap();
        let err = registry
            .add(line_at("dup", StickyPoint::Left, 10.0))
            .unwrap_err();
        assert!(matches!(err, StageError::InvariantViolation(_)));
    }

    #[test]
    fn snap_replaces_the_raw_offset() {
        // anchor left edge at 100, line at 104, raw dx 3: applied dx is 4
        let mut registry = StickyLineRegistry::new();
        registry
            .add(line_at("snap-owner", StickyPoint::Left, 104.0))
            .unwrap();
        let anchor = BoundingBox::new(100.0, 200.0, 50.0, 150.0);

        let result = snap_position(&registry, &anchor, 3.0, 0.0);
        assert_eq!(result.dx, 4.0);
        assert_eq!(result.dy, 0.0);
        assert_eq!(
            result.stuck,
            vec![(ElementId::intern("snap-owner"), StickyPoint::Left)]
        );
    }

    #[test]
    fn snap_tolerance_is_strict() {
        let mut registry = StickyLineRegistry::new();
        registry
            .add(line_at("tol-owner", StickyPoint::Left, 105.0))
            .unwrap();
        let anchor = BoundingBox::new(100.0, 200.0, 50.0, 150.0);

        // |delta| is exactly 5: no snap
        let result = snap_position(&registry, &anchor, 3.0, 0.0);
        assert_eq!(result.dx, 3.0);
        assert!(result.stuck.is_empty());
    }

    #[test]
    fn first_line_per_axis_wins() {
        let mut registry = StickyLineRegistry::new();
        registry
            .add(line_at("axis-a", StickyPoint::Left, 102.0))
            .unwrap();
        registry
            .add(line_at("axis-b", StickyPoint::Left, 104.0))
            .unwrap();
        registry
            .add(line_at("axis-c", StickyPoint::Top, 53.0))
            .unwrap();
        let anchor = BoundingBox::new(100.0, 200.0, 50.0, 150.0);

        let result = snap_position(&registry, &anchor, 0.0, 0.0);
        assert_eq!((result.dx, result.dy), (2.0, 3.0));
        assert_eq!(result.stuck.len(), 2);
    }

    #[test]
    fn resize_snap_filters_incompatible_edges() {
        let mut registry = StickyLineRegistry::new();
        registry
            .add(line_at("dir-v", StickyPoint::Left, 102.0))
            .unwrap();
        registry
            .add(line_at("dir-h", StickyPoint::Top, 52.0))
            .unwrap();
        let anchor = BoundingBox::new(100.0, 200.0, 50.0, 150.0);

        // a pure south handle never snaps to vertical lines
        let result = snap_size(&registry, &anchor, ResizeDirection::South, 1.0, 1.0);
        assert_eq!((result.dx, result.dy), (1.0, 2.0));

        // a corner handle considers both
        let result = snap_size(&registry, &anchor, ResizeDirection::SouthWest, 1.0, 1.0);
        assert_eq!((result.dx, result.dy), (2.0, 2.0));
    }

    // ─── Direction math ──────────────────────────────────────────────────

    fn resize_fixture(width: f64, height: f64) -> (ElementStore, FakeDocument, ElementId) {
        let root = ElementId::intern("sticky-root");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let id = ElementId::intern("sticky-box");
        store
            .insert(root, ElementState::new(id, ElementKind::Container))
            .unwrap();
        store.set_style(id, "left", "300px", false).unwrap();
        store.set_style(id, "top", "200px", false).unwrap();
        store
            .set_style(id, "width", &format_px(width), false)
            .unwrap();
        store
            .set_style(id, "min-height", &format_px(height), false)
            .unwrap();
        let mut doc = FakeDocument::new((1200.0, 800.0), (1200.0, 800.0));
        doc.set_offset(id, 300.0, 200.0);
        (store, doc, id)
    }

    fn style_px(store: &ElementStore, id: ElementId, key: &str) -> f64 {
        parse_px(store.style(id, false).unwrap().get(key).unwrap()).unwrap()
    }

    #[test]
    fn nw_handle_moves_the_anchor_and_grows_the_box() {
        let (mut store, doc, id) = resize_fixture(40.0, 40.0);
        apply_resize(
            &mut store,
            &doc,
            &[id],
            ResizeDirection::NorthWest,
            -30.0,
            -10.0,
            false,
        )
        .unwrap();
        assert_eq!(style_px(&store, id, "width"), 70.0);
        assert_eq!(style_px(&store, id, "min-height"), 50.0);
        assert_eq!(style_px(&store, id, "left"), 270.0);
        assert_eq!(style_px(&store, id, "top"), 190.0);
    }

    #[test]
    fn south_handle_only_changes_height() {
        let (mut store, doc, id) = resize_fixture(100.0, 100.0);
        apply_resize(
            &mut store,
            &doc,
            &[id],
            ResizeDirection::South,
            25.0,
            30.0,
            false,
        )
        .unwrap();
        assert_eq!(style_px(&store, id, "width"), 100.0);
        assert_eq!(style_px(&store, id, "min-height"), 130.0);
        assert_eq!(style_px(&store, id, "left"), 300.0);
        assert_eq!(style_px(&store, id, "top"), 200.0);
    }

    #[test]
    fn min_size_clamps_and_compensates_the_leading_edge() {
        let (mut store, doc, id) = resize_fixture(40.0, 40.0);
        // shrinking 50px from the west: width clamps at 20 and left
        // moves by exactly the real shrink (20px)
        apply_resize(
            &mut store,
            &doc,
            &[id],
            ResizeDirection::West,
            50.0,
            0.0,
            false,
        )
        .unwrap();
        assert_eq!(style_px(&store, id, "width"), 20.0);
        assert_eq!(style_px(&store, id, "left"), 320.0);
    }

    #[test]
    fn min_size_clamp_without_leading_edge_keeps_position() {
        let (mut store, doc, id) = resize_fixture(40.0, 40.0);
        apply_resize(
            &mut store,
            &doc,
            &[id],
            ResizeDirection::SouthEast,
            -50.0,
            -50.0,
            false,
        )
        .unwrap();
        assert_eq!(style_px(&store, id, "width"), 20.0);
        assert_eq!(style_px(&store, id, "min-height"), 20.0);
        assert_eq!(style_px(&store, id, "left"), 300.0);
        assert_eq!(style_px(&store, id, "top"), 200.0);
    }

    #[test]
    fn narrow_section_content_doubles_horizontal_deltas() {
        let root = ElementId::intern("sc-root");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let section = ElementId::intern("sc-section");
        let content = ElementId::intern("sc-content");
        store
            .insert(root, ElementState::new(section, ElementKind::Section))
            .unwrap();
        store
            .insert(section, ElementState::new(content, ElementKind::SectionContent))
            .unwrap();
        store.set_style(content, "width", "400px", false).unwrap();
        store
            .set_style(content, "min-height", "100px", false)
            .unwrap();
        let mut doc = FakeDocument::new((1200.0, 800.0), (1200.0, 800.0));
        doc.set_offset(content, 400.0, 0.0);

        apply_resize(
            &mut store,
            &doc,
            &[content],
            ResizeDirection::East,
            10.0,
            0.0,
            false,
        )
        .unwrap();
        assert_eq!(style_px(&store, content, "width"), 420.0);
    }

    #[test]
    fn wide_section_content_is_not_doubled() {
        let root = ElementId::intern("scw-root");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let section = ElementId::intern("scw-section");
        let content = ElementId::intern("scw-content");
        store
            .insert(root, ElementState::new(section, ElementKind::Section))
            .unwrap();
        store
            .insert(section, ElementState::new(content, ElementKind::SectionContent))
            .unwrap();
        store.set_style(content, "width", "1150px", false).unwrap();
        store
            .set_style(content, "min-height", "100px", false)
            .unwrap();
        let mut doc = FakeDocument::new((1200.0, 800.0), (1200.0, 800.0));
        doc.set_offset(content, 25.0, 0.0);

        apply_resize(
            &mut store,
            &doc,
            &[content],
            ResizeDirection::East,
            10.0,
            0.0,
            false,
        )
        .unwrap();
        assert_eq!(style_px(&store, content, "width"), 1160.0);
    }

    // ─── Builder ─────────────────────────────────────────────────────────

    #[test]
    fn builder_registers_one_edge_per_step() {
        let root = ElementId::intern("build-root");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let a = ElementId::intern("build-a");
        store
            .insert(root, ElementState::new(a, ElementKind::Container))
            .unwrap();
        store.set_style(a, "width", "100px", false).unwrap();
        store.set_style(a, "min-height", "100px", false).unwrap();
        let mut doc = FakeDocument::new((800.0, 600.0), (800.0, 600.0));
        doc.set_offset(a, 10.0, 20.0);

        let mut builder = StickyLineBuilder::new(&store, None);
        let mut registry = StickyLineRegistry::new();
        assert!(builder.step(&store, &doc, false, &mut registry).unwrap());
        assert_eq!(registry.len(), 1);
        assert!(builder.step(&store, &doc, false, &mut registry).unwrap());
        assert!(builder.step(&store, &doc, false, &mut registry).unwrap());
        assert!(!builder.step(&store, &doc, false, &mut registry).unwrap());
        assert_eq!(registry.len(), 4);

        let ids: Vec<&str> = registry.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["build-a_left", "build-a_right", "build-a_top", "build-a_bottom"]
        );
    }

    #[test]
    fn builder_skips_selected_and_honors_cancel() {
        let root = ElementId::intern("bc-root");
        let mut store = ElementStore::new(ElementState::new(root, ElementKind::Container));
        let a = ElementId::intern("bc-a");
        let b = ElementId::intern("bc-b");
        for id in [a, b] {
            store
                .insert(root, ElementState::new(id, ElementKind::Container))
                .unwrap();
            store.set_style(id, "width", "50px", false).unwrap();
            store.set_style(id, "min-height", "50px", false).unwrap();
        }
        let mut doc = FakeDocument::new((800.0, 600.0), (800.0, 600.0));
        doc.set_offset(a, 0.0, 0.0);
        doc.set_offset(b, 100.0, 0.0);

        let selected = store.select(&[a]);
        let mut builder = StickyLineBuilder::new(&selected, None);
        let mut registry = StickyLineRegistry::new();
        assert!(builder.step(&selected, &doc, false, &mut registry).unwrap());
        builder.cancel();
        assert!(!builder.step(&selected, &doc, false, &mut registry).unwrap());
        // only b is a candidate, and only one of its edges landed
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().unwrap().element, b);
    }

}

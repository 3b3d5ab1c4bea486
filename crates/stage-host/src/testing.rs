//! An in-memory [`HostDocument`] for tests.

use crate::document::HostDocument;
use stage_model::ElementId;
use std::collections::{BTreeSet, HashMap};

/// A scriptable document: tests set offsets, heights and z-indices up
/// front and inspect classes, scroll and body resizes afterwards.
#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    pub viewport: (f64, f64),
    pub content: (f64, f64),
    scroll: (f64, f64),
    offsets: HashMap<ElementId, (f64, f64)>,
    heights: HashMap<ElementId, f64>,
    z_indices: HashMap<ElementId, i32>,
    classes: HashMap<ElementId, BTreeSet<String>>,
    pub body_resizes: u32,
}

impl FakeDocument {
    pub fn new(viewport: (f64, f64), content: (f64, f64)) -> Self {
        Self {
            viewport,
            content,
            ..Self::default()
        }
    }

    pub fn set_offset(&mut self, id: ElementId, left: f64, top: f64) {
        self.offsets.insert(id, (left, top));
    }

    pub fn set_computed_height(&mut self, id: ElementId, height: f64) {
        self.heights.insert(id, height);
    }

    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        self.z_indices.insert(id, z);
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes
            .get(&id)
            .is_some_and(|set| set.contains(class))
    }

    pub fn classes_of(&self, id: ElementId) -> Vec<String> {
        self.classes
            .get(&id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn clamp_axis(value: f64, content: f64, viewport: f64) -> f64 {
        value.clamp(0.0, (content - viewport).max(0.0))
    }
}

impl HostDocument for FakeDocument {
    fn computed_height(&self, id: ElementId) -> Option<f64> {
        self.heights.get(&id).copied()
    }

    fn page_offset(&self, id: ElementId) -> Option<(f64, f64)> {
        self.offsets.get(&id).copied()
    }

    fn viewport_size(&self) -> (f64, f64) {
        self.viewport
    }

    fn content_size(&self) -> (f64, f64) {
        self.content
    }

    fn scroll(&self) -> (f64, f64) {
        self.scroll
    }

    fn set_scroll_x(&mut self, x: f64) {
        self.scroll.0 = Self::clamp_axis(x, self.content.0, self.viewport.0);
    }

    fn set_scroll_y(&mut self, y: f64) {
        self.scroll.1 = Self::clamp_axis(y, self.content.1, self.viewport.1);
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        self.classes.entry(id).or_default().insert(class.to_owned());
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(set) = self.classes.get_mut(&id) {
            set.remove(class);
        }
    }

    fn remove_class_everywhere(&mut self, class: &str) {
        for set in self.classes.values_mut() {
            set.remove(class);
        }
    }

    fn z_index(&self, id: ElementId) -> Option<i32> {
        self.z_indices.get(&id).copied()
    }

    fn resize_body(&mut self) {
        self.body_resizes += 1;
    }
}

use serde::{Deserialize, Serialize};

/// An element's on-screen box in stage pixel coordinates.
///
/// Always derived, never stored: the style box gives `left`/`width`,
/// the live layout gives the page offset and the computed height
/// (stored heights are usually `min-height` and content can grow
/// past them).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.left < x && self.right > x && self.top < y && self.bottom > y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_dimensions() {
        let b = BoundingBox::new(100.0, 200.0, 50.0, 150.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 100.0);
    }

    #[test]
    fn contains_is_exclusive_at_edges() {
        let b = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        assert!(b.contains(5.0, 5.0));
        assert!(!b.contains(0.0, 5.0));
        assert!(!b.contains(10.0, 5.0));
        assert!(!b.contains(5.0, 10.0));
    }
}

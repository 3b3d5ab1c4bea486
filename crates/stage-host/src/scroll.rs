//! Scroll control: edge auto-scroll during drags and animated
//! scroll-to-target.
//!
//! The animator is a resumable stepper. Callers retarget it at any
//! time and drive it one animation frame at a time; it stops on its
//! own when the target is reached or the document refuses to scroll
//! further (clamped at an edge).

use crate::document::HostDocument;

/// Cursor distance from a stage edge that triggers auto-scroll.
pub const MARGIN_FOR_SCROLL: f64 = 20.0;
/// How far one auto-scroll trigger moves the target.
pub const SCROLL_STEPS_DRAG: f64 = 100.0;
/// Per-frame scroll speed while dragging.
pub const SCROLL_DRAG_SPEED: f64 = 10.0;
/// Per-frame scroll speed for programmatic scroll-to-element.
pub const DEFAULT_SCROLL_SPEED: f64 = 100.0;

/// Animated scroll toward per-axis targets.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    target_x: Option<f64>,
    target_y: Option<f64>,
    speed: f64,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.target_x.is_some() || self.target_y.is_some()
    }

    /// Retarget the vertical axis (scroll-to-element centering).
    pub fn scroll_to(&mut self, target_y: f64, speed: f64) {
        self.target_y = Some(target_y);
        self.speed = speed;
    }

    pub fn cancel(&mut self) {
        self.target_x = None;
        self.target_y = None;
    }

    /// Kick the animator when the cursor, in viewport coordinates, is
    /// within [`MARGIN_FOR_SCROLL`] of a stage edge: the target moves
    /// [`SCROLL_STEPS_DRAG`] px toward that edge, advanced at
    /// [`SCROLL_DRAG_SPEED`] px per frame.
    pub fn auto_scroll(&mut self, doc: &dyn HostDocument, x: f64, y: f64) {
        let (vw, vh) = doc.viewport_size();
        let (sx, sy) = doc.scroll();
        if x < MARGIN_FOR_SCROLL {
            self.target_x = Some(sx - SCROLL_STEPS_DRAG);
            self.speed = SCROLL_DRAG_SPEED;
        } else if x > vw - MARGIN_FOR_SCROLL {
            self.target_x = Some(sx + SCROLL_STEPS_DRAG);
            self.speed = SCROLL_DRAG_SPEED;
        }
        if y < MARGIN_FOR_SCROLL {
            self.target_y = Some(sy - SCROLL_STEPS_DRAG);
            self.speed = SCROLL_DRAG_SPEED;
        } else if y > vh - MARGIN_FOR_SCROLL {
            self.target_y = Some(sy + SCROLL_STEPS_DRAG);
            self.speed = SCROLL_DRAG_SPEED;
        }
    }

    /// Advance one frame. Returns whether more work remains.
    pub fn step(&mut self, doc: &mut dyn HostDocument) -> bool {
        if let Some(target) = self.target_x {
            let before = doc.scroll().0;
            doc.set_scroll_x(advance(before, target, self.speed));
            let after = doc.scroll().0;
            if after == target || after == before {
                self.target_x = None;
            }
        }
        if let Some(target) = self.target_y {
            let before = doc.scroll().1;
            doc.set_scroll_y(advance(before, target, self.speed));
            let after = doc.scroll().1;
            if after == target || after == before {
                self.target_y = None;
            }
        }
        self.is_active()
    }
}

fn advance(current: f64, target: f64, speed: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= speed {
        target
    } else {
        current + speed * delta.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;
    use pretty_assertions::assert_eq;

    #[test]
    fn steps_toward_the_target_and_stops() {
        let mut doc = FakeDocument::new((800.0, 600.0), (800.0, 2000.0));
        let mut anim = ScrollAnimator::new();
        anim.scroll_to(25.0, 10.0);

        assert!(anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 10.0);
        assert!(anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 20.0);
        // last step clamps to the target instead of overshooting
        assert!(!anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 25.0);
        assert!(!anim.is_active());
    }

    #[test]
    fn stops_when_the_document_hits_an_edge() {
        let mut doc = FakeDocument::new((800.0, 600.0), (800.0, 700.0));
        let mut anim = ScrollAnimator::new();
        anim.scroll_to(500.0, 50.0);

        assert!(anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 50.0);
        // clamped at 100: the next step makes no progress and cancels
        assert!(anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 100.0);
        assert!(!anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 100.0);
    }

    #[test]
    fn auto_scroll_triggers_near_edges_only() {
        let mut doc = FakeDocument::new((800.0, 600.0), (1600.0, 2000.0));
        doc.set_scroll_y(300.0);
        let mut anim = ScrollAnimator::new();

        anim.auto_scroll(&doc, 400.0, 300.0);
        assert!(!anim.is_active());

        // 10 px from the bottom edge: target 100 px further down
        anim.auto_scroll(&doc, 400.0, 590.0);
        assert!(anim.is_active());
        for _ in 0..9 {
            assert!(anim.step(&mut doc));
        }
        assert!(!anim.step(&mut doc));
        assert_eq!(doc.scroll().1, 400.0);
    }

    #[test]
    fn auto_scroll_moves_both_axes() {
        let mut doc = FakeDocument::new((800.0, 600.0), (1600.0, 2000.0));
        doc.set_scroll_x(200.0);
        doc.set_scroll_y(200.0);
        let mut anim = ScrollAnimator::new();

        // top-left corner: both axes scroll back
        anim.auto_scroll(&doc, 5.0, 5.0);
        while anim.step(&mut doc) {}
        assert_eq!(doc.scroll(), (100.0, 100.0));
    }
}

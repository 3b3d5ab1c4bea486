//! Seam between the stage engine and the live hosted document.
//!
//! The engine never touches a real DOM. Everything it needs from the
//! live page goes through the [`HostDocument`] trait: computed layout,
//! scroll, visual marker classes, z-index. On top of that seam this
//! crate resolves element bounding boxes, searches drop zones, and
//! animates scroll.

pub mod document;
pub mod dropzone;
pub mod geometry;
pub mod scroll;
pub mod testing;

pub use document::HostDocument;
pub use dropzone::find_drop_zone;
pub use geometry::bounding_box;
pub use scroll::ScrollAnimator;
pub use testing::FakeDocument;

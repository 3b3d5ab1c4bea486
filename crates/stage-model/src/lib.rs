pub mod element;
pub mod error;
pub mod geometry;
pub mod id;
pub mod store;
pub mod style;

pub use element::{ElementKind, ElementState};
pub use error::StageError;
pub use geometry::BoundingBox;
pub use id::{ElementId, PageId};
pub use store::{ElementStore, MoveDirection};
pub use style::{ElementStyle, StyleMap, format_px, parse_px};

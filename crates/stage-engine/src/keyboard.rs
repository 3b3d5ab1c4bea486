//! Keyboard mapping for the stage.
//!
//! Arrow keys either nudge the selection by pixels or reorder it in
//! the tree, depending on whether the selection is "positioned" by the
//! page flow (sections and section content, or mobile mode, where
//! pixel nudges are meaningless) or Alt is held.

use crate::input::Modifiers;
use stage_model::{ElementStore, MoveDirection};

/// What a stage key press asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageAction {
    /// Translate the selection by pixels.
    Nudge { dx: f64, dy: f64 },
    /// Reorder the selection among its siblings.
    Reorder(MoveDirection),
    /// Open the default editor for the selection.
    Edit,
    /// Reset the selection to the root.
    SelectNone,
}

const NUDGE: f64 = 10.0;
const NUDGE_FINE: f64 = 1.0;

/// Map a key to its stage action, `None` for keys the stage ignores.
pub fn resolve(key: &str, modifiers: Modifiers, positioned: bool) -> Option<StageAction> {
    match key {
        "Enter" => return Some(StageAction::Edit),
        "Escape" => return Some(StageAction::SelectNone),
        _ => {}
    }
    if positioned || modifiers.alt {
        return match key {
            "ArrowLeft" => Some(StageAction::Reorder(MoveDirection::Top)),
            "ArrowRight" => Some(StageAction::Reorder(MoveDirection::Bottom)),
            "ArrowUp" => Some(StageAction::Reorder(MoveDirection::Up)),
            "ArrowDown" => Some(StageAction::Reorder(MoveDirection::Down)),
            _ => None,
        };
    }
    let amount = if modifiers.shift { NUDGE_FINE } else { NUDGE };
    match key {
        "ArrowLeft" => Some(StageAction::Nudge { dx: -amount, dy: 0.0 }),
        "ArrowRight" => Some(StageAction::Nudge { dx: amount, dy: 0.0 }),
        "ArrowUp" => Some(StageAction::Nudge { dx: 0.0, dy: -amount }),
        "ArrowDown" => Some(StageAction::Nudge { dx: 0.0, dy: amount }),
        _ => None,
    }
}

/// A selection is positioned by the page flow when every selected
/// element is a section or section content.
pub fn selection_is_positioned(store: &ElementStore, mobile: bool) -> bool {
    if mobile {
        return true;
    }
    store.selection().iter().all(|&id| {
        store.get(id).is_ok_and(|el| {
            matches!(
                el.kind,
                stage_model::ElementKind::Section | stage_model::ElementKind::SectionContent
            )
        })
    })
}

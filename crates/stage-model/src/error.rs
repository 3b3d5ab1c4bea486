use crate::id::ElementId;
use thiserror::Error;

/// Error taxonomy shared by the whole stage engine.
///
/// `NotFound` and `InvariantViolation` are programming-invariant
/// violations: callers are expected to let them propagate so they
/// surface during development. `GeometryUnavailable` is a recoverable
/// per-gesture condition: the drag/resize controller swallows it,
/// logs, and turns the current gesture into a no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("element not found: {0}")]
    NotFound(ElementId),

    #[error("no style box for element {0}, it was never initialized")]
    GeometryUnavailable(ElementId),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

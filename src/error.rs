//! Error types for engine operations.
//!
//! This is a pure UI state machine, so there are no recoverable I/O
//! failures; the only error class is an operation addressed at an element
//! the diagram does not know about, or at the wrong element kind.
//! Invariant violations inside gesture handling never surface as errors:
//! they are logged and degrade to a no-op (see the input modules).

use crate::element::{ElementId, ElementKind};
use thiserror::Error;

/// Errors that can occur on the diagram's public mutation surface.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Operation addressed an element that is not part of the diagram
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// Operation requires a different element kind
    #[error("element {id:?} is a {actual:?}, expected {expected:?}")]
    WrongKind {
        id: ElementId,
        actual: ElementKind,
        expected: ElementKind,
    },
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

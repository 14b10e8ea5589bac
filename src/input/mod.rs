//! Pointer input handling for the diagram.
//!
//! Turns raw, ambiguous pointer-event streams into high-level diagram
//! operations: move, multi-select, click-to-select, click-to-deselect.
//!
//! ## Architecture
//!
//! Each event is resolved to a target element once, then offered to an
//! ordered list of processors; the first whose `can_process` accepts the
//! element handles it. Transient per-gesture state lives in one explicit
//! session struct owned by the dispatcher, so "session fully reset" is
//! verifiable in one place.
//!
//! ## Modules
//!
//! - `event` - pointer event wrapper and kinds
//! - `session` - per-gesture session state and the long-press timer
//! - `shape_move` - shared drag-translation primitive
//! - `canvas_select` - pan / rubber-band select / group move state machine
//! - `path` - select-on-release handling for edge-like elements
//! - `dispatcher` - processor trait and priority-ordered routing

pub mod canvas_select;
pub mod dispatcher;
pub mod event;
pub mod path;
pub mod session;
pub mod shape_move;

pub use canvas_select::{CanvasSelectProcessor, ShapeClickHook};
pub use dispatcher::{Dispatcher, EventProcessor};
pub use event::{EventKind, PointerEvent, PointerId};
pub use path::PathProcessor;
pub use session::{InteractionSession, LongPressTimer, SelectRect};
pub use shape_move::{DragState, shape_move, shape_move_end};

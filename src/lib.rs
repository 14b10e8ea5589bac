//! Wireboard - interaction engine for a pointer-driven diagram editor.
//!
//! Turns raw, ambiguous pointer-event streams into high-level diagram
//! operations: pan, long-press-activated rubber-band multi-select, batch
//! move of a selection set, click-to-select and -deselect, and
//! drag-from-palette shape creation. The engine is headless and
//! single-threaded; rendering, template catalogs and text layout are
//! reached through the narrow collaborator traits in [`presenter`].
//!
//! ## Layout
//!
//! - [`element`] / [`diagram`] - element state model and session object
//! - [`input`] - event dispatch, gesture disambiguation, move primitive
//! - [`palette`] - pointer-capture-emulating drag-to-create controller
//! - [`spatial`] - R-tree pointer target resolution
//! - [`presenter`] - rendering/text-layout collaborator contracts

pub mod constants;
pub mod diagram;
pub mod element;
pub mod error;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod perf;
pub mod presenter;
pub mod spatial;

pub use diagram::{Diagram, DiagramNotice, ShapeAddRequest};
pub use element::{
    Connector, ConnectorPatch, Element, ElementId, ElementKind, PropMap, StateFlag, StateSet,
    UpdatePatch,
};
pub use error::{EngineError, EngineResult};
pub use geometry::{Direction, Point, Rect};
pub use input::{Dispatcher, EventKind, EventProcessor, PointerEvent, PointerId};
pub use palette::{PaletteController, PaletteEvent, PaletteSurface, SurfaceNode};
pub use presenter::{NullPresenter, Presenter, TextParams};
pub use spatial::HitTester;

//! Palette drag controller - drag-from-palette-to-canvas shape creation.
//!
//! Two correctness problems live here. First, touch devices deliver no
//! reliable "pointer left the panel" signal, so the controller polls the
//! element under the pointer on every move and claims pointer capture the
//! moment the drag crosses the panel's outer boundary; captured moves
//! keep arriving even though the finger is outside the panel's bounds.
//! Second, commit vs. cancel: only a gesture that ends by genuinely
//! leaving the panel creates a shape; releasing inside the panel is a
//! cancelled gesture.

use crate::diagram::ShapeAddRequest;
use crate::geometry::Point;
use crate::input::event::PointerId;

/// Opaque identity of whatever sits under the pointer on the host
/// surface (a palette icon, the panel, the canvas, ...). Only compared
/// for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceNode(pub u64);

/// Host surface collaborator: hit testing over the page and the pointer
/// capture mechanism.
pub trait PaletteSurface {
    /// Topmost node under the point; a miss is a valid, harmless outcome.
    fn element_from_point(&self, point: Point) -> Option<SurfaceNode>;

    /// Claim exclusive routing for this pointer until release.
    fn set_pointer_capture(&mut self, pointer: PointerId);
}

/// Events the palette panel feeds the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    /// Press on a palette icon carrying a shape template key.
    PointerDown { template_key: String, point: Point },
    PointerMove { point: Point, pointer: PointerId },
    /// Genuine leave: the pointer crossed the panel's outer boundary.
    PointerLeave { point: Point },
    /// Release while still inside the panel.
    PointerUp,
}

/// Pointer-capture-emulating drag controller for the shape palette.
#[derive(Default)]
pub struct PaletteController {
    pressed_template_key: Option<String>,
    /// Node the gesture went down on (inside the panel).
    anchor_elem: Option<SurfaceNode>,
    /// Last node observed under the pointer.
    point_elem: Option<SurfaceNode>,
}

impl PaletteController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one panel event. Returns a shape-creation request when a
    /// captured drag commits, `None` otherwise.
    pub fn handle(
        &mut self,
        evt: &PaletteEvent,
        surface: &mut dyn PaletteSurface,
    ) -> Option<ShapeAddRequest> {
        match evt {
            PaletteEvent::PointerDown { template_key, point } => {
                self.pressed_template_key = Some(template_key.clone());
                let under = surface.element_from_point(*point);
                self.anchor_elem = under;
                self.point_elem = under;
                None
            }

            PaletteEvent::PointerMove { point, pointer } => {
                // Emulated leave detection for touch input
                let under = surface.element_from_point(*point);
                if under == self.point_elem {
                    return None;
                }
                if self.anchor_elem.is_some() && self.anchor_elem == self.point_elem {
                    // The pointer is crossing the panel boundary right
                    // now; keep the event stream routed to us
                    surface.set_pointer_capture(*pointer);
                    tracing::trace!(pointer = ?pointer, "palette claimed pointer capture");
                }
                self.point_elem = under;
                None
            }

            PaletteEvent::PointerLeave { point } => {
                let request = self
                    .pressed_template_key
                    .take()
                    .map(|key| ShapeAddRequest::with_default_title(key, *point));
                self.clean();
                request
            }

            PaletteEvent::PointerUp => {
                self.clean();
                None
            }
        }
    }

    /// True when no gesture state is held.
    pub fn is_idle(&self) -> bool {
        self.pressed_template_key.is_none()
            && self.anchor_elem.is_none()
            && self.point_elem.is_none()
    }

    fn clean(&mut self) {
        self.pressed_template_key = None;
        self.anchor_elem = None;
        self.point_elem = None;
    }
}

//! Engine-wide constants.
//!
//! Centralizes magic numbers and timing values to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Gesture Timing
// ============================================================================

/// Hold duration before a pointer-down on the canvas becomes a
/// rubber-band selection instead of a pan or drag.
pub const LONG_PRESS_MS: u64 = 500;

// ============================================================================
// Shape Defaults
// ============================================================================

/// Default title text for shapes created from text-bearing templates.
pub const DEFAULT_SHAPE_TITLE: &str = "Title";

/// Sub-element key that receives the default title text.
pub const TITLE_SUB_KEY: &str = "text";

/// Reserved attribute name routed through the text-layout collaborator
/// instead of being written as a raw attribute.
pub const TEXT_CONTENT_ATTR: &str = "textContent";

/// Default line height used when a presenter declares none.
pub const DEFAULT_LINE_HEIGHT: f32 = 24.0;

//! Semantic input events
//!
//! The input-device collaborator converts raw events into these actions:
//! positions arrive already in world coordinates, and modifier keys arrive
//! decoded (`snap` is off while the precision modifier is held, `alternate`
//! is the compass-pickup modifier).

use glam::Vec2;

/// A semantic input action consumed by the editor.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown { pos: Vec2 },
    /// Pointer moved; pans while pressed, otherwise tracks the cursor.
    PointerMove { pos: Vec2, snap: bool },
    /// Pointer released; a press-and-release without a qualifying move is
    /// a construction (or delete-mode) click.
    PointerUp {
        pos: Vec2,
        alternate: bool,
        snap: bool,
    },
    /// Pointer left the drawing surface.
    PointerLeave,
    /// Zoom by a wheel step.
    Wheel { delta_y: f32 },
    /// Cancel the pending construction and leave delete mode.
    Escape,
    /// Remove the most recently committed entry.
    Undo,
    /// Advance the stroke color cycle.
    NextColor,
    /// Toggle delete mode.
    ToggleDelete,
    /// Restore the default view transform.
    ResetView,
    /// Replace the whole scene from a raw JSON payload; malformed input
    /// is a hard error.
    ResetScene { circles: String },
}

//! Pending construction state
//!
//! Holds the clicks of an unfinished construction. The preview shape is
//! derived on demand from this state and never stored, so there is nothing
//! to keep in sync.

use glam::Vec2;

use zirkel_core::{Shape, geometry::distance};

/// An in-progress construction: a chosen center, an optional independent
/// radius-reference point, and the last cursor position.
///
/// With no radius reference, the radius is measured from the center to the
/// cursor. Picking a radius reference reproduces a physical compass:
/// the center stays put while the radius is measured between the reference
/// point and the cursor, wherever those marks are.
#[derive(Debug, Clone)]
pub struct Construction {
    center: Vec2,
    radius_ref: Option<Vec2>,
    cursor: Option<Vec2>,
}

impl Construction {
    /// Start a construction at the chosen center.
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius_ref: None,
            cursor: None,
        }
    }

    /// The fixed center of the construction.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Whether a radius reference has been picked.
    pub fn has_radius_reference(&self) -> bool {
        self.radius_ref.is_some()
    }

    /// Fix the radius-reference point. The cursor point is discarded so a
    /// stale radius is not shown until the pointer moves again.
    pub fn pick_radius_reference(&mut self, p: Vec2) {
        self.radius_ref = Some(p);
        self.cursor = None;
    }

    /// Track the (snapped) cursor.
    pub fn set_cursor(&mut self, p: Vec2) {
        self.cursor = Some(p);
    }

    /// The shape this construction would commit right now.
    ///
    /// Before the cursor has moved this is a bare point at the center;
    /// afterwards a circle whose radius is the distance from the radius
    /// reference (the center, unless picked) to the cursor. A zero radius
    /// collapses back to a point.
    pub fn preview(&self, color: &str) -> Shape {
        match self.cursor {
            Some(cursor) => {
                let radius_start = self.radius_ref.unwrap_or(self.center);
                Shape::from_parts(
                    self.center,
                    Some(distance(radius_start, cursor)),
                    Some(color.to_string()),
                )
            }
            None => Shape::point(self.center),
        }
    }
}

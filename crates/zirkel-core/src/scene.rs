//! Scene container and view transform
//!
//! The scene is an ordered collection of committed shapes; insertion order
//! is the only order, used both for undo and for tie-breaking in searches.
//! Committing a circle also records its intersection points with every
//! circle already present.

use glam::Vec2;
use tracing::debug;
use uuid::Uuid;

use crate::geometry::intersections_with_all;
use crate::shape::{SceneEntry, Shape};

/// Lower bound for the view scale.
pub const MIN_SCALE: f32 = 1.0;
/// Upper bound for the view scale.
pub const MAX_SCALE: f32 = 100_000.0;
/// Starting scale (screen pixels per world unit, device pixel ratio
/// applied upstream).
pub const DEFAULT_SCALE: f32 = 80.0;

/// World-to-screen mapping: a clamped scale plus a pan offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl ViewTransform {
    /// Create a transform at the given scale with no offset.
    pub fn new(scale: f32) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            offset: Vec2::ZERO,
        }
    }

    /// Current scale, always within `[MIN_SCALE, MAX_SCALE]`.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current pan offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Set the scale, clamping into the legal range.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Multiply the scale by a zoom factor, clamping the result.
    pub fn zoom(&mut self, factor: f32) {
        self.set_scale(self.scale * factor);
    }

    /// Translate the offset.
    pub fn move_offset(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Restore the given scale (clamped) and zero offset.
    pub fn reset(&mut self, scale: f32) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.offset = Vec2::ZERO;
    }
}

/// The ordered collection of committed shapes plus the view transform.
#[derive(Debug, Clone)]
pub struct Scene {
    entries: Vec<SceneEntry>,
    view: ViewTransform,
    default_scale: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl Scene {
    /// Create the built-in starting scene: a unit circle at the origin
    /// plus the origin point itself.
    pub fn new(default_scale: f32) -> Self {
        Self {
            entries: default_shapes().into_iter().map(SceneEntry::new).collect(),
            view: ViewTransform::new(default_scale),
            default_scale,
        }
    }

    /// Rebuild a scene from previously persisted parts.
    ///
    /// The stored scale is re-clamped; entry identities are freshly minted.
    pub fn from_parts(scale: f32, offset: Vec2, shapes: Vec<Shape>, default_scale: f32) -> Self {
        let mut view = ViewTransform::new(scale);
        view.move_offset(offset);
        Self {
            entries: shapes.into_iter().map(SceneEntry::new).collect(),
            view,
            default_scale,
        }
    }

    /// Committed entries in insertion order.
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    /// Current view transform.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Append a shape; a circle also appends its intersection points with
    /// the scene as it stood before this commit. Returns the id of the
    /// main entry.
    pub fn commit(&mut self, shape: Shape) -> Uuid {
        let intersections = intersections_with_all(&shape, &self.entries);

        let entry = SceneEntry::new(shape);
        let id = entry.id;
        debug!(
            "committed {} with {} intersection point(s)",
            if entry.shape.is_point() {
                "point"
            } else {
                "circle"
            },
            intersections.len()
        );

        self.entries.push(entry);
        self.entries
            .extend(intersections.into_iter().map(|p| SceneEntry::new(Shape::point(p))));
        id
    }

    /// Remove the entry with the given id. Returns false if absent.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        self.entries.remove(index);
        debug!("deleted entry {id}");
        true
    }

    /// Remove the most recently appended entry, if any.
    pub fn delete_last(&mut self) -> Option<SceneEntry> {
        self.entries.pop()
    }

    /// Replace the whole collection and reset the view transform.
    pub fn reset(&mut self, shapes: Vec<Shape>) {
        self.entries = shapes.into_iter().map(SceneEntry::new).collect();
        self.view.reset(self.default_scale);
    }

    /// Restore the default scale and offset.
    pub fn reset_view(&mut self) {
        self.view.reset(self.default_scale);
    }

    /// Set the view scale (clamped).
    pub fn set_scale(&mut self, scale: f32) {
        self.view.set_scale(scale);
    }

    /// Apply a zoom factor to the view scale (clamped).
    pub fn zoom(&mut self, factor: f32) {
        self.view.zoom(factor);
    }

    /// Translate the view offset.
    pub fn move_offset(&mut self, delta: Vec2) {
        self.view.move_offset(delta);
    }
}

/// The built-in default shapes: a unit circle at the origin and the origin
/// point.
pub fn default_shapes() -> Vec<Shape> {
    vec![
        Shape::circle(Vec2::ZERO, 1.0, None),
        Shape::point(Vec2::ZERO),
    ]
}

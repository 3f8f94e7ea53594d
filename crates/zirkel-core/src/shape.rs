//! Scene shapes
//!
//! A scene entry is either a bare point or a circle with a positive radius.
//! The distinction is carried by the type: constructing a circle with a
//! missing, non-finite, or non-positive radius yields a point instead, so
//! zero-radius circles cannot exist once a shape has been built.
//!
//! On the wire a shape is a compact JSON array `[x, y, radius?, color?]`;
//! the two-element form is a point, and a stored radius of zero reads back
//! as a point as well.

use std::fmt;

use glam::Vec2;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// A committed shape: a bare point or a circle.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A bare location on the plane.
    Point {
        /// Position in world coordinates.
        at: Vec2,
    },
    /// A circle with a strictly positive radius.
    Circle {
        /// Center in world coordinates.
        center: Vec2,
        /// Radius, always `> 0`.
        radius: f32,
        /// Optional display color.
        color: Option<String>,
    },
}

impl Shape {
    /// Build a shape from raw parts, normalizing degenerate radii.
    ///
    /// A radius that is absent, non-finite, or `<= 0` produces a `Point`;
    /// any color supplied alongside such a radius is dropped.
    pub fn from_parts(at: Vec2, radius: Option<f32>, color: Option<String>) -> Self {
        match radius {
            Some(r) if r.is_finite() && r > 0.0 => Shape::Circle {
                center: at,
                radius: r,
                color,
            },
            _ => Shape::Point { at },
        }
    }

    /// Create a bare point.
    pub fn point(at: Vec2) -> Self {
        Shape::Point { at }
    }

    /// Create a circle; falls back to a point for a degenerate radius.
    pub fn circle(center: Vec2, radius: f32, color: Option<String>) -> Self {
        Shape::from_parts(center, Some(radius), color)
    }

    /// Center of a circle, or the position of a point.
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Point { at } => *at,
            Shape::Circle { center, .. } => *center,
        }
    }

    /// Radius if this is a circle.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Shape::Point { .. } => None,
            Shape::Circle { radius, .. } => Some(*radius),
        }
    }

    /// Center and radius if this is a circle.
    pub fn circle_params(&self) -> Option<(Vec2, f32)> {
        match self {
            Shape::Point { .. } => None,
            Shape::Circle { center, radius, .. } => Some((*center, *radius)),
        }
    }

    /// Display color, if one was assigned.
    pub fn color(&self) -> Option<&str> {
        match self {
            Shape::Point { .. } => None,
            Shape::Circle { color, .. } => color.as_deref(),
        }
    }

    /// Check if this shape is a bare point.
    pub fn is_point(&self) -> bool {
        matches!(self, Shape::Point { .. })
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Shape::Point { at } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&at.x)?;
                seq.serialize_element(&at.y)?;
                seq.end()
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                let len = if color.is_some() { 4 } else { 3 };
                let mut seq = serializer.serialize_seq(Some(len))?;
                seq.serialize_element(&center.x)?;
                seq.serialize_element(&center.y)?;
                seq.serialize_element(radius)?;
                if let Some(color) = color {
                    seq.serialize_element(color)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ShapeVisitor;

        impl<'de> Visitor<'de> for ShapeVisitor {
            type Value = Shape;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array [x, y, radius?, color?]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Shape, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let x: f32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let y: f32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let radius: Option<f32> = seq.next_element()?;
                let color: Option<String> = if radius.is_some() {
                    seq.next_element()?
                } else {
                    None
                };

                Ok(Shape::from_parts(Vec2::new(x, y), radius, color))
            }
        }

        deserializer.deserialize_seq(ShapeVisitor)
    }
}

/// A shape committed to the scene, carrying a stable identity.
///
/// Ids are minted at insertion time and are not persisted; deletion and
/// undo address entries through them rather than by coordinate equality.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    /// Unique identifier.
    pub id: Uuid,
    /// The committed shape.
    pub shape: Shape,
}

impl SceneEntry {
    /// Wrap a shape with a fresh identity.
    pub fn new(shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_normalizes_degenerate_radii() {
        assert!(Shape::from_parts(Vec2::ZERO, None, None).is_point());
        assert!(Shape::from_parts(Vec2::ZERO, Some(0.0), None).is_point());
        assert!(Shape::from_parts(Vec2::ZERO, Some(-2.0), None).is_point());
        assert!(Shape::from_parts(Vec2::ZERO, Some(f32::NAN), None).is_point());
        assert!(!Shape::from_parts(Vec2::ZERO, Some(0.5), None).is_point());
    }

    #[test]
    fn test_zero_radius_drops_color() {
        let shape = Shape::from_parts(Vec2::ZERO, Some(0.0), Some("red".into()));
        assert!(shape.is_point());
        assert_eq!(shape.color(), None);
    }

    #[test]
    fn test_point_wire_format() {
        let shape = Shape::point(Vec2::new(1.5, -2.0));
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "[1.5,-2.0]");

        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_circle_wire_format() {
        let plain = Shape::circle(Vec2::new(0.5, 2.0), 3.0, None);
        assert_eq!(serde_json::to_string(&plain).unwrap(), "[0.5,2.0,3.0]");

        let colored = Shape::circle(Vec2::new(0.5, 2.0), 3.0, Some("#47f".into()));
        assert_eq!(
            serde_json::to_string(&colored).unwrap(),
            "[0.5,2.0,3.0,\"#47f\"]"
        );

        let back: Shape = serde_json::from_str("[0.5,2.0,3.0,\"#47f\"]").unwrap();
        assert_eq!(back, colored);
    }

    #[test]
    fn test_stored_zero_radius_reads_as_point() {
        let back: Shape = serde_json::from_str("[4.0,5.0,0.0,\"red\"]").unwrap();
        assert_eq!(back, Shape::point(Vec2::new(4.0, 5.0)));
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = SceneEntry::new(Shape::point(Vec2::ZERO));
        let b = SceneEntry::new(Shape::point(Vec2::ZERO));
        assert_ne!(a.id, b.id);
        assert_eq!(a.shape, b.shape);
    }
}

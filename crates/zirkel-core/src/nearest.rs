//! Nearest-feature queries
//!
//! Linear scans used for cursor snapping and delete-target selection. Both
//! queries prefer true points over circle boundaries, accept only candidates
//! strictly under the caller's threshold, and break exact ties in favor of
//! the earliest scene entry (a candidate replaces the current best only if
//! strictly closer).

use glam::Vec2;
use uuid::Uuid;

use crate::geometry::distance;
use crate::shape::SceneEntry;

/// Find the closest snappable position: a point if any lies under the
/// threshold, otherwise the closest point on a circle's boundary.
///
/// The circle match is a synthesized position, not the circle itself.
pub fn find_nearest_point(pos: Vec2, entries: &[SceneEntry], threshold: f32) -> Option<Vec2> {
    if let Some(entry) = nearest_point(pos, entries, threshold) {
        return Some(entry.shape.center());
    }
    nearest_on_circles(pos, entries, threshold).map(|(_, boundary)| boundary)
}

/// Find the closest scene entry for deletion: a point entry if any lies
/// under the threshold, otherwise the circle entry whose boundary is
/// closest.
pub fn find_nearest_entry(pos: Vec2, entries: &[SceneEntry], threshold: f32) -> Option<Uuid> {
    if let Some(entry) = nearest_point(pos, entries, threshold) {
        return Some(entry.id);
    }
    nearest_on_circles(pos, entries, threshold).map(|(entry, _)| entry.id)
}

fn nearest_point<'a>(
    pos: Vec2,
    entries: &'a [SceneEntry],
    threshold: f32,
) -> Option<&'a SceneEntry> {
    let mut min_dist = threshold;
    let mut closest = None;

    for entry in entries.iter().filter(|e| e.shape.is_point()) {
        let d = distance(entry.shape.center(), pos);
        if d < min_dist {
            min_dist = d;
            closest = Some(entry);
        }
    }

    closest
}

fn nearest_on_circles<'a>(
    pos: Vec2,
    entries: &'a [SceneEntry],
    threshold: f32,
) -> Option<(&'a SceneEntry, Vec2)> {
    let mut min_dist = threshold;
    let mut closest = None;

    for entry in entries {
        let Some((center, radius)) = entry.shape.circle_params() else {
            continue;
        };
        let Some(boundary) = point_on_circle(pos, center, radius) else {
            continue;
        };
        let d = distance(boundary, pos);
        if d < min_dist {
            min_dist = d;
            closest = Some((entry, boundary));
        }
    }

    closest
}

/// Project a position onto a circle's boundary along the ray from the
/// center. Undefined when the position coincides exactly with the center.
fn point_on_circle(pos: Vec2, center: Vec2, radius: f32) -> Option<Vec2> {
    if pos == center {
        return None;
    }

    let angle = (pos.y - center.y).atan2(pos.x - center.x);
    Some(Vec2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    ))
}

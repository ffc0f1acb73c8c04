use parry2d::bounding_volume::Aabb;
use parry2d::na::Point2;

use crate::core::math::Rect;

/// Convert a screen-space rectangle into a parry bounding box
fn to_aabb(rect: &Rect) -> Aabb {
    let min = rect.min();
    let max = rect.max();
    Aabb::new(Point2::new(min.x, min.y), Point2::new(max.x, max.y))
}

/// Axis-aligned overlap test. The shared area must be positive on both axes,
/// so rectangles that only touch along an edge or corner do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    to_aabb(a)
        .intersection(&to_aabb(b))
        .is_some_and(|shared| {
            let extents = shared.extents();
            extents.x > 0.0 && extents.y > 0.0
        })
}

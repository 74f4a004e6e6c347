//! Pure hit-testing helpers for boxes.

use crate::model::BoundingBox;

/// Distance in pixels from a box's second corner within which a press
/// resizes instead of moving.
pub const EDGE_THRESHOLD: f32 = 10.0;

/// Strict interior test against the box's stored corners. Boundary points are
/// outside, and a box whose second corner is above or left of its first
/// contains nothing.
pub fn is_point_in_box(x: f32, y: f32, b: &BoundingBox) -> bool {
    x > b.x0 && x < b.x1 && y > b.y0 && y < b.y1
}

/// True when either axis of the point is within [`EDGE_THRESHOLD`] of the
/// second corner.
pub fn is_near_edge(x: f32, y: f32, b: &BoundingBox) -> bool {
    let near_right = (x - b.x1).abs() < EDGE_THRESHOLD;
    let near_bottom = (y - b.y1).abs() < EDGE_THRESHOLD;
    near_right || near_bottom
}

pub fn translate(b: &mut BoundingBox, dx: f32, dy: f32) {
    b.x0 += dx;
    b.y0 += dy;
    b.x1 += dx;
    b.y1 += dy;
}

pub fn set_second_corner(b: &mut BoundingBox, x: f32, y: f32) {
    b.x1 = x;
    b.y1 = y;
}

/// Index of the first box in collection order containing the point.
pub fn hit_test(boxes: &[BoundingBox], x: f32, y: f32) -> Option<usize> {
    boxes.iter().position(|b| is_point_in_box(x, y, b))
}

//! Plane geometry for the sight ray
//!
//! Headings are in degrees, measured from +x toward +y. The canvas is y-down,
//! so a heading of -90° points up the screen.

use glam::Vec2;

/// Test whether segment `a1`-`a2` crosses segment `b1`-`b2`.
///
/// The particle passes its current motion step as `a` (position, then
/// previous position) and a mirror or wall as `b`.
///
/// Parallel segments only count when both numerators are exactly zero, i.e.
/// the segments are collinear. That is a coarse heuristic, kept as is.
/// Segments whose bounding boxes don't touch never intersect.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    if !boxes_touch(a1, a2, b1, b2) {
        return false;
    }

    let da = a2 - a1;
    let db = b2 - b1;
    let denominator = da.x * db.y - da.y * db.x;
    let numerator1 = (a1.y - b1.y) * db.x - (a1.x - b1.x) * db.y;
    let numerator2 = (a1.y - b1.y) * da.x - (a1.x - b1.x) * da.y;

    if denominator == 0.0 {
        return numerator1 == 0.0 && numerator2 == 0.0;
    }

    let r = numerator1 / denominator;
    let s = numerator2 / denominator;

    (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&s)
}

/// Axis-aligned bounding boxes of the two segments overlap (inclusive)
#[inline]
fn boxes_touch(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let (a_min, a_max) = (a1.min(a2), a1.max(a2));
    let (b_min, b_max) = (b1.min(b2), b1.max(b2));
    a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
}

/// Heading in degrees from `origin` toward `target`, in (-180, 180]
pub fn angle_between(origin: Vec2, target: Vec2) -> f32 {
    let dx = (target.x - origin.x) as f64;
    let dy = (target.y - origin.y) as f64;
    dy.atan2(dx).to_degrees() as f32
}

/// Unit step vector for a heading in degrees
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = (degrees as f64).to_radians();
    Vec2::new(radians.cos() as f32, radians.sin() as f32)
}

/// Heading after bouncing off a vertical mirror.
///
/// Not normalized: a -90° heading comes back as 270°.
#[inline]
pub fn reflect_heading(degrees: f32) -> f32 {
    180.0 - degrees
}

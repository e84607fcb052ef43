//! Overlap tests between centered shapes
//!
//! Every test is a pure predicate. Shapes that only touch along an edge do
//! not collide, so an entity clamped flush against an obstacle can still
//! slide along it.

use glam::Vec2;

use super::geometry::{Shape, ShapeKind};

/// Check whether two shapes overlap
///
/// Dispatches on the pair of shape kinds:
/// - circle/circle: center distance against the sum of radii
/// - square/square: axis-aligned overlap of the centered extents
/// - circle/square (either order): bounding-box approximation
pub fn collides(a: &Shape, b: &Shape) -> bool {
    match (a.kind, b.kind) {
        (ShapeKind::Circle, ShapeKind::Circle) => circle_circle(a, b),
        (ShapeKind::Square, ShapeKind::Square) => square_square(a, b),
        (ShapeKind::Circle, ShapeKind::Square) => circle_square(a, b),
        (ShapeKind::Square, ShapeKind::Circle) => circle_square(b, a),
    }
}

fn circle_circle(a: &Shape, b: &Shape) -> bool {
    let reach = a.radius() + b.radius();
    a.pos.distance_squared(b.pos) < reach * reach
}

fn square_square(a: &Shape, b: &Shape) -> bool {
    extents_overlap(a, b)
}

/// Approximation: the circle is treated as its bounding square, so corners of
/// the bounding box register as hits even though the circle does not reach
/// them.
fn circle_square(circle: &Shape, square: &Shape) -> bool {
    extents_overlap(circle, square)
}

#[inline]
fn extents_overlap(a: &Shape, b: &Shape) -> bool {
    let delta = (a.pos - b.pos).abs();
    let reach: Vec2 = a.size.half() + b.size.half();
    delta.x < reach.x && delta.y < reach.y
}

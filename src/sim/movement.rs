//! Per-tick displacement: intent, collision reaction, field bounds
//!
//! Nothing here mutates a position. Callers apply the returned displacement.

use glam::Vec2;

use super::collision::collides;
use super::geometry::Size;
use super::state::{Movable, Obstacle};

/// Compute the displacement `movable` actually makes this tick
///
/// The prospective shape (current position + intended move) is tested against
/// each obstacle in iteration order. Every overlap lets the entity react and
/// rewrite the move vector, so earlier obstacles see the original vector and
/// later ones see the rewritten one. The result is then clamped to the field.
pub fn calculate_move_vector<'a, M, I>(movable: &mut M, obstacles: I, field_size: Size) -> Vec2
where
    M: Movable,
    I: IntoIterator<Item = &'a Obstacle>,
{
    let mut move_vec = movable.intended_move();
    let start = movable.shape();
    let prospective = start.at(start.pos + move_vec);

    if movable.can_collide() {
        for obstacle in obstacles {
            if collides(&prospective, &obstacle.shape()) {
                move_vec = movable.react_on_collision(obstacle, move_vec);
            }
        }
    }

    clamp_to_field(move_vec, field_size, start.pos, start.size)
}

/// Clamp a displacement so the center stays within `[size/2, field - size/2]`
/// on each axis. A clamped axis lands exactly on the boundary.
pub fn clamp_to_field(move_vec: Vec2, field_size: Size, pos: Vec2, size: Size) -> Vec2 {
    let half = size.half();
    let lower = half;
    let upper = Vec2::new(field_size.width, field_size.height) - half;
    let target = pos + move_vec;

    let mut result = move_vec;
    if target.x > upper.x {
        result.x = upper.x - pos.x;
    }
    if target.x < lower.x {
        result.x = lower.x - pos.x;
    }
    if target.y > upper.y {
        result.y = upper.y - pos.y;
    }
    if target.y < lower.y {
        result.y = lower.y - pos.y;
    }
    result
}

/// Whether a centered shape sticks out of the field, even partially
pub fn is_out_of_field(pos: Vec2, size: Size, field_size: Size) -> bool {
    let half = size.half();
    pos.x > field_size.width - half.x
        || pos.x < half.x
        || pos.y > field_size.height - half.y
        || pos.y < half.y
}

//! Level layouts
//!
//! Level 0 is the hand-built test level. Any other level index seeds a
//! `Pcg32` so the same index always produces the same layout.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::collides;
use super::geometry::{Shape, ShapeKind, Size};
use super::state::{Movable, Obstacle, ObstacleKind, Player};
use super::vault::ObjectsVault;
use crate::consts::PLAYER_START_X;
use crate::tuning::Tuning;

/// Side of the square around the player spawn that generated levels keep clear
pub const SPAWN_CLEARANCE: f32 = 200.0;
/// Upper bound on obstacles in a generated level
pub const MAX_GENERATED_OBSTACLES: usize = 40;
const PLACEMENT_ATTEMPTS: u32 = 50;
/// Side range of generated obstacles
pub const MIN_OBSTACLE_SIDE: f32 = 30.0;
pub const MAX_OBSTACLE_SIDE: f32 = 90.0;

pub fn player_start(tuning: &Tuning) -> Vec2 {
    Vec2::new(PLAYER_START_X, tuning.field_height / 2.0)
}

/// The test level, in insertion order:
///
/// | # | kind            | center      | size    | hp | motion        |
/// |---|-----------------|-------------|---------|----|---------------|
/// | 1 | StaticSquare    | (600, 350)  | 100×100 | -  | stationary    |
/// | 2 | StaticCircle    | (300, 150)  | 80×80   | -  | stationary    |
/// | 3 | StaticCircle    | (300, 550)  | 80×80   | -  | stationary    |
/// | 4 | RemovableSquare | (900, 150)  | 60×60   | 3  | stationary    |
/// | 5 | RemovableSquare | (900, 550)  | 60×60   | 3  | stationary    |
/// | 6 | RemovableCircle | (1050, 350) | 50×50   | 2  | stationary    |
/// | 7 | RemovableCircle | (450, 350)  | 40×40   | 2  | patrol (0, 2) |
pub fn test_level_obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle::static_square(Vec2::new(600.0, 350.0), Size::square(100.0)),
        Obstacle::static_circle(Vec2::new(300.0, 150.0), Size::square(80.0)),
        Obstacle::static_circle(Vec2::new(300.0, 550.0), Size::square(80.0)),
        Obstacle::removable_square(Vec2::new(900.0, 150.0), Size::square(60.0), 3),
        Obstacle::removable_square(Vec2::new(900.0, 550.0), Size::square(60.0), 3),
        Obstacle::removable_circle(Vec2::new(1050.0, 350.0), Size::square(50.0), 2),
        Obstacle::removable_circle(Vec2::new(450.0, 350.0), Size::square(40.0), 2)
            .with_patrol(Vec2::new(0.0, 2.0)),
    ]
}

/// Build the vault for a level index, player included
pub fn generate_level(level: u32, tuning: &Tuning) -> ObjectsVault {
    let player = Player::new(player_start(tuning), tuning);
    if level == 0 {
        log::info!("Level 0: test layout");
        return ObjectsVault::with_obstacles(player, test_level_obstacles());
    }
    if let Err(reason) = tuning.validate() {
        log::warn!("Level {}: {}, leaving the field empty", level, reason);
        return ObjectsVault::new(player);
    }

    let mut rng = Pcg32::seed_from_u64(level as u64);
    let wanted = (4 + 2 * level as usize).min(MAX_GENERATED_OBSTACLES);
    let clearance = Shape::new(ShapeKind::Square, player.pos, Size::square(SPAWN_CLEARANCE));
    let mut placed: Vec<Obstacle> = Vec::with_capacity(wanted);

    for _ in 0..wanted {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = random_obstacle(&mut rng, tuning);
            let shape = candidate.shape();
            if collides(&shape, &clearance) || placed.iter().any(|o| collides(&shape, &o.shape())) {
                continue;
            }
            placed.push(candidate);
            break;
        }
    }

    log::info!(
        "Level {}: placed {}/{} obstacles ({} removable)",
        level,
        placed.len(),
        wanted,
        placed.iter().filter(|o| o.is_removable()).count()
    );
    ObjectsVault::with_obstacles(player, placed)
}

fn random_obstacle(rng: &mut Pcg32, tuning: &Tuning) -> Obstacle {
    let kind = match rng.random_range(0..4) {
        0 => ObstacleKind::StaticSquare,
        1 => ObstacleKind::StaticCircle,
        2 => ObstacleKind::RemovableSquare,
        _ => ObstacleKind::RemovableCircle,
    };
    let side: f32 = rng.random_range(MIN_OBSTACLE_SIDE..MAX_OBSTACLE_SIDE);
    let half = side / 2.0;
    let pos = Vec2::new(
        rng.random_range(half..tuning.field_width - half),
        rng.random_range(half..tuning.field_height - half),
    );
    let health = if kind.is_removable() { rng.random_range(1..=3) } else { 0 };
    let obstacle = Obstacle::new(kind, pos, Size::square(side), health);

    // Some removables wander along one axis
    if kind.is_removable() && rng.random_bool(0.25) {
        let speed: f32 = rng.random_range(1.0..3.0);
        let velocity = if rng.random_bool(0.5) {
            Vec2::new(speed, 0.0)
        } else {
            Vec2::new(0.0, speed)
        };
        return obstacle.with_patrol(velocity);
    }
    obstacle
}

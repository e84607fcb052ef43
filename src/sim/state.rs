//! Entity model: obstacles, the player and projectiles
//!
//! Every drawable thing on the field reports an [`EntityKind`]; collision and
//! rendering dispatch on it with exhaustive matches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::geometry::{Shape, ShapeKind, Size};
use crate::tuning::Tuning;

/// Closed set of entity kinds on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    StaticSquare,
    StaticCircle,
    RemovableSquare,
    RemovableCircle,
    Player,
    Projectile,
}

impl EntityKind {
    pub fn shape_kind(self) -> ShapeKind {
        match self {
            EntityKind::StaticSquare | EntityKind::RemovableSquare => ShapeKind::Square,
            EntityKind::StaticCircle
            | EntityKind::RemovableCircle
            | EntityKind::Player
            | EntityKind::Projectile => ShapeKind::Circle,
        }
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    StaticSquare,
    StaticCircle,
    RemovableSquare,
    RemovableCircle,
}

impl ObstacleKind {
    pub fn is_removable(self) -> bool {
        matches!(self, ObstacleKind::RemovableSquare | ObstacleKind::RemovableCircle)
    }

    pub fn entity_kind(self) -> EntityKind {
        match self {
            ObstacleKind::StaticSquare => EntityKind::StaticSquare,
            ObstacleKind::StaticCircle => EntityKind::StaticCircle,
            ObstacleKind::RemovableSquare => EntityKind::RemovableSquare,
            ObstacleKind::RemovableCircle => EntityKind::RemovableCircle,
        }
    }

    pub fn shape_kind(self) -> ShapeKind {
        self.entity_kind().shape_kind()
    }
}

/// Per-obstacle movement policy
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Stationary,
    /// Constant velocity per tick, reversed on contact with walls or obstacles
    Patrol { velocity: Vec2 },
}

/// Something that moves through [`super::movement::calculate_move_vector`]
pub trait Movable {
    fn shape(&self) -> Shape;

    /// Displacement the entity wants this tick, before collisions and bounds
    fn intended_move(&self) -> Vec2;

    /// Whether the prospective position is tested against obstacles
    fn can_collide(&self) -> bool {
        true
    }

    /// React to overlapping `obstacle` at the prospective position.
    /// Returns the (possibly modified) move vector.
    fn react_on_collision(&mut self, obstacle: &Obstacle, move_vec: Vec2) -> Vec2;
}

/// A static or removable obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Assigned by the vault on insertion
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Size,
    /// Only meaningful for removable kinds
    pub health_points: i32,
    #[serde(default)]
    pub motion: Motion,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, size: Size, health_points: i32) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            size,
            health_points,
            motion: Motion::Stationary,
        }
    }

    pub fn static_square(pos: Vec2, size: Size) -> Self {
        Self::new(ObstacleKind::StaticSquare, pos, size, 0)
    }

    pub fn static_circle(pos: Vec2, size: Size) -> Self {
        Self::new(ObstacleKind::StaticCircle, pos, size, 0)
    }

    pub fn removable_square(pos: Vec2, size: Size, health_points: i32) -> Self {
        Self::new(ObstacleKind::RemovableSquare, pos, size, health_points)
    }

    pub fn removable_circle(pos: Vec2, size: Size, health_points: i32) -> Self {
        Self::new(ObstacleKind::RemovableCircle, pos, size, health_points)
    }

    pub fn with_patrol(mut self, velocity: Vec2) -> Self {
        self.motion = Motion::Patrol { velocity };
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind.entity_kind()
    }

    pub fn is_removable(&self) -> bool {
        self.kind.is_removable()
    }

    /// Static obstacles are immortal
    pub fn is_dead(&self) -> bool {
        self.is_removable() && self.health_points <= 0
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self.motion, Motion::Stationary)
    }

    /// Register one projectile hit; no effect on static obstacles
    pub fn get_hit(&mut self) {
        if self.is_removable() {
            self.health_points -= 1;
        }
    }

    /// Reverse patrol velocity on the given axes
    pub fn bounce(&mut self, flip_x: bool, flip_y: bool) {
        if let Motion::Patrol { velocity } = &mut self.motion {
            if flip_x {
                velocity.x = -velocity.x;
            }
            if flip_y {
                velocity.y = -velocity.y;
            }
        }
    }
}

impl Movable for Obstacle {
    fn shape(&self) -> Shape {
        Shape::new(self.kind.shape_kind(), self.pos, self.size)
    }

    fn intended_move(&self) -> Vec2 {
        match self.motion {
            Motion::Stationary => Vec2::ZERO,
            Motion::Patrol { velocity } => velocity,
        }
    }

    fn react_on_collision(&mut self, _obstacle: &Obstacle, move_vec: Vec2) -> Vec2 {
        match self.motion {
            Motion::Stationary => move_vec,
            Motion::Patrol { .. } => {
                // One reversal per tick, however many obstacles are touched
                if move_vec != Vec2::ZERO {
                    self.bounce(true, true);
                }
                Vec2::ZERO
            }
        }
    }
}

/// Normalized per-tick intent, each axis normally in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlCommand {
    pub x: f32,
    pub y: f32,
}

impl ControlCommand {
    pub const NONE: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_idle(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Size,
    pub speed: f32,
    pub health_points: i32,
    /// Ticks left before the player can be hit again
    pub invulnerable_ticks: u32,
    pub invulnerability_duration: u32,
    pub is_dead: bool,
    /// Move intent for the current tick
    #[serde(skip)]
    pub command: ControlCommand,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Size::square(tuning.player_size),
            speed: tuning.player_speed,
            health_points: tuning.player_health,
            invulnerable_ticks: 0,
            invulnerability_duration: tuning.invulnerability_ticks,
            is_dead: false,
            command: ControlCommand::NONE,
        }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    pub fn is_can_be_hited(&self) -> bool {
        self.invulnerable_ticks == 0
    }

    /// Take one point of damage unless still invulnerable from the last hit
    pub fn get_hit(&mut self) {
        if !self.is_can_be_hited() || self.is_dead {
            return;
        }
        self.health_points -= 1;
        self.invulnerable_ticks = self.invulnerability_duration;
        log::debug!("Player hit, {} health left", self.health_points);
        if self.health_points <= 0 {
            self.is_dead = true;
        }
    }

    pub fn tick_invulnerability(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }
}

impl Movable for Player {
    fn shape(&self) -> Shape {
        Shape::new(ShapeKind::Circle, self.pos, self.size)
    }

    fn intended_move(&self) -> Vec2 {
        self.command.as_vec2() * self.speed
    }

    /// Touching a removable obstacle hurts. Any obstacle blocks the axes
    /// along which the move would newly overlap it; an already overlapping
    /// player is free to move out.
    fn react_on_collision(&mut self, obstacle: &Obstacle, move_vec: Vec2) -> Vec2 {
        if obstacle.is_removable() {
            self.get_hit();
        }

        let current = self.shape();
        let blocker = obstacle.shape();
        if collides(&current, &blocker) {
            return move_vec;
        }

        let mut result = move_vec;
        if move_vec.x != 0.0
            && collides(&current.at(self.pos + Vec2::new(move_vec.x, 0.0)), &blocker)
        {
            result.x = 0.0;
        }
        if move_vec.y != 0.0
            && collides(&current.at(self.pos + Vec2::new(0.0, move_vec.y)), &blocker)
        {
            result.y = 0.0;
        }
        // Diagonal corner contact: neither axis alone overlaps
        if result == move_vec && collides(&current.at(self.pos + result), &blocker) {
            result = Vec2::ZERO;
        }
        result
    }
}

/// A shot travelling in a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Size,
    /// Unit direction
    pub direction: Vec2,
    pub speed: f32,
}

impl Projectile {
    pub fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    pub fn shape(&self) -> Shape {
        Shape::new(ShapeKind::Circle, self.pos, self.size)
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    pub fn advance(&mut self) {
        self.pos += self.velocity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &Tuning::default())
    }

    #[test]
    fn test_removable_dies_at_zero_health() {
        let mut ob = Obstacle::removable_square(Vec2::ZERO, Size::square(20.0), 2);
        ob.get_hit();
        assert!(!ob.is_dead());
        assert_eq!(ob.health_points, 1);
        ob.get_hit();
        assert!(ob.is_dead());
    }

    #[test]
    fn test_static_obstacle_is_immortal() {
        let mut ob = Obstacle::static_circle(Vec2::ZERO, Size::square(20.0));
        for _ in 0..5 {
            ob.get_hit();
        }
        assert!(!ob.is_dead());
        assert_eq!(ob.health_points, 0);
    }

    #[test]
    fn test_entity_kind_shapes() {
        assert_eq!(EntityKind::StaticSquare.shape_kind(), ShapeKind::Square);
        assert_eq!(EntityKind::RemovableCircle.shape_kind(), ShapeKind::Circle);
        assert_eq!(ObstacleKind::RemovableSquare.entity_kind(), EntityKind::RemovableSquare);
    }

    #[test]
    fn test_player_invulnerability_window() {
        let mut player = player_at(100.0, 100.0);
        player.get_hit();
        assert_eq!(player.health_points, 2);
        assert!(!player.is_can_be_hited());

        // Further hits are ignored until the window runs out
        player.get_hit();
        assert_eq!(player.health_points, 2);

        for _ in 0..player.invulnerability_duration {
            player.tick_invulnerability();
        }
        assert!(player.is_can_be_hited());
        player.get_hit();
        assert_eq!(player.health_points, 1);
    }

    #[test]
    fn test_player_dies_when_health_runs_out() {
        let mut player = player_at(100.0, 100.0);
        player.health_points = 1;
        player.get_hit();
        assert!(player.is_dead);
    }

    #[test]
    fn test_player_blocked_on_colliding_axis_only() {
        let mut player = player_at(100.0, 100.0);
        // Wall directly to the right, flush with the player's edge
        let wall = Obstacle::static_square(Vec2::new(150.0, 100.0), Size::square(50.0));
        let result = player.react_on_collision(&wall, Vec2::new(5.0, 5.0));
        assert_eq!(result, Vec2::new(0.0, 5.0));
        assert_eq!(player.health_points, 3);
    }

    #[test]
    fn test_player_hurt_by_removable_contact() {
        let mut player = player_at(100.0, 100.0);
        let enemy = Obstacle::removable_circle(Vec2::new(150.0, 100.0), Size::square(50.0), 2);
        let result = player.react_on_collision(&enemy, Vec2::new(5.0, 0.0));
        assert_eq!(result, Vec2::ZERO);
        assert_eq!(player.health_points, 2);
    }

    #[test]
    fn test_patrol_obstacle_bounces() {
        let mut ob = Obstacle::removable_circle(Vec2::ZERO, Size::square(20.0), 1)
            .with_patrol(Vec2::new(2.0, -1.0));
        let other = Obstacle::static_square(Vec2::new(10.0, 0.0), Size::square(10.0));
        assert_eq!(ob.react_on_collision(&other, Vec2::new(2.0, -1.0)), Vec2::ZERO);
        assert_eq!(ob.intended_move(), Vec2::new(-2.0, 1.0));

        // A second contact in the same tick sees the stopped move
        assert_eq!(ob.react_on_collision(&other, Vec2::ZERO), Vec2::ZERO);
        assert_eq!(ob.intended_move(), Vec2::new(-2.0, 1.0));
    }
}

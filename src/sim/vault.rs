//! Container of the player and every obstacle on the field
//!
//! Obstacles iterate in insertion order. Collision resolution and projectile
//! hits both walk them in that order, which makes multi-contact ties
//! deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Size;
use super::level;
use super::movement::calculate_move_vector;
use super::state::{Motion, Obstacle, Player};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectsVault {
    pub player: Player,
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObjectsVault {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_obstacles(player: Player, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        let mut vault = Self::new(player);
        for obstacle in obstacles {
            vault.add_obstacle(obstacle);
        }
        vault
    }

    /// The fixed layout documented in [`level::test_level_obstacles`]
    pub fn generate_test_level(tuning: &Tuning) -> Self {
        level::generate_level(0, tuning)
    }

    /// Insert an obstacle, assigning it the next id
    pub fn add_obstacle(&mut self, mut obstacle: Obstacle) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        obstacle.id = id;
        self.obstacles.push(obstacle);
        id
    }

    pub fn all_obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn obstacle(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn removable_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.is_removable()).count()
    }

    /// Advance every obstacle with a movement policy, then purge the dead
    ///
    /// A mover is tested against every other obstacle, never itself. Patrol
    /// velocity flips on any axis that ends up pressed against the field edge.
    /// Returns how many obstacles were purged.
    pub fn execute_moving(&mut self, field_size: Size) -> usize {
        for i in 0..self.obstacles.len() {
            if !self.obstacles[i].is_moving() {
                continue;
            }
            let (before, rest) = self.obstacles.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                continue;
            };

            let mv = calculate_move_vector(current, before.iter().chain(after.iter()), field_size);
            current.pos += mv;

            if let Motion::Patrol { velocity } = current.motion {
                let half = current.size.half();
                let flip_x = (velocity.x < 0.0 && current.pos.x <= half.x)
                    || (velocity.x > 0.0 && current.pos.x >= field_size.width - half.x);
                let flip_y = (velocity.y < 0.0 && current.pos.y <= half.y)
                    || (velocity.y > 0.0 && current.pos.y >= field_size.height - half.y);
                current.bounce(flip_x, flip_y);
            }
        }

        self.purge_dead()
    }

    /// Move the player by its current command. The only place the player's
    /// position changes.
    pub fn move_player(&mut self, field_size: Size) -> Vec2 {
        self.player.tick_invulnerability();
        let mv = calculate_move_vector(&mut self.player, &self.obstacles, field_size);
        self.player.pos += mv;
        mv
    }

    /// Remove dead removable obstacles. Runs as its own pass after any
    /// iteration over the collection has finished.
    pub fn purge_dead(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| {
            if o.is_dead() {
                log::debug!("Obstacle {} ({:?}) destroyed", o.id, o.kind);
                false
            } else {
                true
            }
        });
        before - self.obstacles.len()
    }
}

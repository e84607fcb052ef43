//! Live shots: spawn, advance, hit resolution and pruning

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::geometry::Size;
use super::movement::is_out_of_field;
use super::state::{Movable, Player, Projectile};
use super::vault::ObjectsVault;
use crate::tuning::Tuning;

/// What one call to [`ProjectileList::execute_all_projectiles`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectileReport {
    pub hits: u32,
    pub left_field: u32,
    pub obstacles_destroyed: u32,
}

/// Live projectiles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileList {
    projectiles: Vec<Projectile>,
}

impl ProjectileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Spawn one projectile at the player's center heading along
    /// `(dir_x, dir_y)`. Zero intent spawns nothing. Returns whether a shot
    /// was fired.
    pub fn try_shoot(&mut self, dir_x: f32, dir_y: f32, player: &Player, tuning: &Tuning) -> bool {
        let direction = Vec2::new(dir_x, dir_y).normalize_or_zero();
        if direction == Vec2::ZERO {
            return false;
        }

        log::trace!("Shot from {:?} toward {:?}", player.pos, direction);
        self.projectiles.push(Projectile {
            pos: player.pos,
            size: Size::square(tuning.projectile_size),
            direction,
            speed: tuning.projectile_speed,
        });
        true
    }

    /// Advance every projectile one tick and resolve it
    ///
    /// A projectile that leaves the field is dropped. Otherwise the first
    /// removable obstacle it overlaps, in vault order, takes one hit and the
    /// projectile is spent. Static obstacles do not stop shots. Dead obstacles
    /// are purged once every projectile has been resolved.
    pub fn execute_all_projectiles(&mut self, field_size: Size, vault: &mut ObjectsVault) -> ProjectileReport {
        let mut report = ProjectileReport::default();

        self.projectiles.retain_mut(|projectile| {
            projectile.advance();

            if is_out_of_field(projectile.pos, projectile.size, field_size) {
                report.left_field += 1;
                return false;
            }

            let shape = projectile.shape();
            let target = vault
                .obstacles_mut()
                .iter_mut()
                .find(|o| o.is_removable() && !o.is_dead() && collides(&shape, &o.shape()));

            match target {
                Some(obstacle) => {
                    obstacle.get_hit();
                    report.hits += 1;
                    false
                }
                None => true,
            }
        });

        report.obstacles_destroyed = vault.purge_dead() as u32;
        report
    }
}

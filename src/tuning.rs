//! Gameplay balance values
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! partial JSON document only overrides what it names. A document whose
//! values the simulation cannot run with is replaced by the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Size;
use crate::sim::level::MAX_OBSTACLE_SIDE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub player_size: f32,
    /// Player displacement per tick at full input
    pub player_speed: f32,
    pub player_health: i32,
    pub invulnerability_ticks: u32,

    pub projectile_size: f32,
    /// Projectile displacement per tick
    pub projectile_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,
            invulnerability_ticks: INVULNERABILITY_TICKS,
            projectile_size: PROJECTILE_SIZE,
            projectile_speed: PROJECTILE_SPEED,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), &'static str> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.field_width) || !positive(self.field_height) {
            return Err("field size must be positive");
        }
        if !positive(self.player_size) || !positive(self.projectile_size) {
            return Err("entity sizes must be positive");
        }
        if self.field_width.min(self.field_height) <= MAX_OBSTACLE_SIDE.max(self.player_size) {
            return Err("field is too small for the player and obstacles");
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err("player speed must be finite and not negative");
        }
        if self.player_health < 1 {
            return Err("player health must be at least 1");
        }
        if !positive(self.projectile_speed) {
            return Err("projectile speed must be positive");
        }
        Ok(())
    }

    /// This tuning, or the defaults if it fails [`Tuning::validate`]
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(reason) => {
                log::warn!("Invalid tuning: {}, using defaults", reason);
                Self::default()
            }
        }
    }

    pub fn field_size(&self) -> Size {
        Size::new(self.field_width, self.field_height)
    }

    /// Upper bound on how many ticks a projectile can stay on the field
    pub fn max_projectile_lifetime(&self) -> u64 {
        let longest = self.field_width.hypot(self.field_height);
        (longest / self.projectile_speed).ceil() as u64 + 1
    }
}

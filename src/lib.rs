//! Another Round - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (field, movement, collisions, projectiles)
//! - `controller`: Key state to per-tick commands, plus a demo autopilot
//! - `tuning`: Data-driven game balance
//! - `settings`: Shell preferences for the headless runner

pub mod controller;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use controller::{Autopilot, Controller, Key};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal interval of the external tick timer
    pub const TICK_INTERVAL_MS: u64 = 10;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Displacement per tick at full input
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_HEALTH: i32 = 3;
    /// Ticks of hit immunity after taking damage (1 second at 10ms ticks)
    pub const INVULNERABILITY_TICKS: u32 = 100;
    /// Spawn column; the player starts vertically centered
    pub const PLAYER_START_X: f32 = 100.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
}

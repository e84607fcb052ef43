//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One synchronous step per external tick, no clocks or threads
//! - Seeded RNG only (level generation)
//! - Stable iteration order (vault insertion order, projectile spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod geometry;
pub mod level;
pub mod movement;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod vault;

pub use collision::collides;
pub use field::{Field, FieldStats, GameOutcome};
pub use geometry::{Shape, ShapeKind, Size};
pub use level::generate_level;
pub use movement::{calculate_move_vector, clamp_to_field, is_out_of_field};
pub use projectile::{ProjectileList, ProjectileReport};
pub use snapshot::{DrawItem, PlayerView, Snapshot};
pub use state::{ControlCommand, EntityKind, Motion, Movable, Obstacle, ObstacleKind, Player, Projectile};
pub use vault::ObjectsVault;

//! Read-only view of the field for a renderer
//!
//! Built once per frame by the shell. Serializable so a headless run can dump
//! the final state as JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Size;
use super::state::EntityKind;

/// One thing to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Size,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Size,
    pub health_points: i32,
    /// Renderers draw a hittable player differently from an invulnerable one
    pub is_can_be_hited: bool,
    pub is_dead: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub field_size: Size,
    pub player: PlayerView,
    /// Obstacles first (vault order), then projectiles (spawn order)
    pub items: Vec<DrawItem>,
}

impl Snapshot {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }
}

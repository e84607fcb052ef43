//! The simulation root and its per-tick orchestration

use serde::{Deserialize, Serialize};

use super::geometry::Size;
use super::level;
use super::projectile::ProjectileList;
use super::snapshot::{DrawItem, PlayerView, Snapshot};
use super::state::{ControlCommand, Player, Projectile};
use super::vault::ObjectsVault;
use crate::tuning::Tuning;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    PlayerDied,
}

/// Running totals for the lifetime of one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStats {
    pub ticks: u64,
    pub shots_fired: u64,
    pub hits: u64,
    pub obstacles_destroyed: u64,
}

/// One level's worth of simulation state: player, obstacles, projectiles
#[derive(Debug, Clone)]
pub struct Field {
    field_size: Size,
    tuning: Tuning,
    vault: ObjectsVault,
    projectiles: ProjectileList,
    stats: FieldStats,
    /// Set once the end-of-game outcome has been reported
    ended: bool,
}

impl Field {
    pub fn new(level: u32) -> Self {
        Self::with_tuning(level, Tuning::default())
    }

    pub fn with_tuning(level: u32, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let vault = level::generate_level(level, &tuning);
        Self::with_vault(vault, tuning)
    }

    /// Field around a prepared vault (custom layouts, tests)
    pub fn with_vault(vault: ObjectsVault, tuning: Tuning) -> Self {
        Self {
            field_size: tuning.field_size(),
            tuning,
            vault,
            projectiles: ProjectileList::new(),
            stats: FieldStats::default(),
            ended: false,
        }
    }

    pub fn field_size(&self) -> Size {
        self.field_size
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.vault.player
    }

    pub fn vault(&self) -> &ObjectsVault {
        &self.vault
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.projectiles.projectiles()
    }

    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    pub fn is_game_over(&self) -> bool {
        self.ended
    }

    /// Advance the simulation by one tick
    ///
    /// Phases run in a fixed order: projectiles, obstacle movement, shooting,
    /// player movement, death check. Returns `Some` exactly once, on the tick
    /// the player dies. Callers stop ticking after that; further calls are
    /// ignored and return `None`.
    pub fn game_tick(&mut self, move_command: ControlCommand, shoot_command: ControlCommand) -> Option<GameOutcome> {
        if self.ended {
            return None;
        }
        self.stats.ticks += 1;

        self.execute_all_projectiles();
        self.execute_vault_moving();
        self.try_shoot(shoot_command);
        self.move_player(move_command);

        if self.vault.player.is_dead {
            self.ended = true;
            log::info!(
                "Game over after {} ticks ({} obstacles destroyed)",
                self.stats.ticks,
                self.stats.obstacles_destroyed
            );
            return Some(GameOutcome::PlayerDied);
        }
        None
    }

    fn execute_all_projectiles(&mut self) {
        let report = self.projectiles.execute_all_projectiles(self.field_size, &mut self.vault);
        self.stats.hits += report.hits as u64;
        self.stats.obstacles_destroyed += report.obstacles_destroyed as u64;
    }

    fn execute_vault_moving(&mut self) {
        let purged = self.vault.execute_moving(self.field_size);
        self.stats.obstacles_destroyed += purged as u64;
    }

    fn try_shoot(&mut self, shoot_command: ControlCommand) {
        if self
            .projectiles
            .try_shoot(shoot_command.x, shoot_command.y, &self.vault.player, &self.tuning)
        {
            self.stats.shots_fired += 1;
        }
    }

    fn move_player(&mut self, move_command: ControlCommand) {
        self.vault.player.command = move_command;
        self.vault.move_player(self.field_size);
    }

    /// Everything a renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.vault.player;
        let obstacles = self.vault.all_obstacles().iter().map(|o| DrawItem {
            kind: o.kind(),
            pos: o.pos,
            size: o.size,
        });
        let shots = self.projectiles().iter().map(|p| DrawItem {
            kind: p.kind(),
            pos: p.pos,
            size: p.size,
        });

        Snapshot {
            tick: self.stats.ticks,
            field_size: self.field_size,
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                health_points: player.health_points,
                is_can_be_hited: player.is_can_be_hited(),
                is_dead: player.is_dead,
            },
            items: obstacles.chain(shots).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, Obstacle};
    use glam::Vec2;
    use proptest::prelude::*;

    fn field_with(player_pos: Vec2, obstacles: Vec<Obstacle>, tuning: Tuning) -> Field {
        let vault = ObjectsVault::with_obstacles(Player::new(player_pos, &tuning), obstacles);
        Field::with_vault(vault, tuning)
    }

    const UP: ControlCommand = ControlCommand::new(0.0, -1.0);
    const RIGHT: ControlCommand = ControlCommand::new(1.0, 0.0);
    const IDLE: ControlCommand = ControlCommand::NONE;

    #[test]
    fn test_new_field_defaults() {
        let field = Field::new(0);
        assert_eq!(field.field_size(), Size::new(1200.0, 700.0));
        assert_eq!(field.vault().all_obstacles().len(), 7);
        assert!(field.projectiles().is_empty());
        assert!(!field.is_game_over());
    }

    #[test]
    fn test_shot_destroys_removable_in_path() {
        let mut field = field_with(
            Vec2::new(100.0, 200.0),
            vec![Obstacle::removable_square(Vec2::new(100.0, 100.0), Size::square(20.0), 1)],
            Tuning::default(),
        );

        // Projectiles move before shots spawn within a tick, so a hit takes
        // the spawn tick plus the ticks needed to reach the target
        field.game_tick(IDLE, UP);
        assert_eq!(field.projectiles().len(), 1);
        assert_eq!(field.vault().all_obstacles().len(), 1);

        // 10px per tick from y=200: overlaps the target at y=110
        for _ in 0..8 {
            field.game_tick(IDLE, IDLE);
        }
        assert_eq!(field.projectiles().len(), 1);
        assert_eq!(field.vault().all_obstacles().len(), 1);

        field.game_tick(IDLE, IDLE);
        assert!(field.vault().all_obstacles().is_empty());
        assert!(field.projectiles().is_empty());
        assert_eq!(field.stats().obstacles_destroyed, 1);
        assert_eq!(field.stats().hits, 1);
    }

    #[test]
    fn test_player_clamped_at_right_edge() {
        let mut field = field_with(Vec2::new(1175.0, 350.0), Vec::new(), Tuning::default());
        for _ in 0..5 {
            field.game_tick(RIGHT, IDLE);
            assert_eq!(field.player().pos.x, 1175.0);
        }
    }

    #[test]
    fn test_no_shoot_intent_no_projectiles() {
        let mut field = Field::new(0);
        for _ in 0..50 {
            field.game_tick(RIGHT, IDLE);
            assert!(field.projectiles().is_empty());
        }
        assert_eq!(field.stats().shots_fired, 0);
    }

    #[test]
    fn test_lethal_contact_ends_game_once() {
        let tuning = Tuning {
            player_health: 1,
            ..Tuning::default()
        };
        let mut field = field_with(
            Vec2::new(100.0, 350.0),
            vec![Obstacle::removable_square(Vec2::new(150.0, 350.0), Size::square(50.0), 5)],
            tuning,
        );

        assert_eq!(field.game_tick(RIGHT, IDLE), Some(GameOutcome::PlayerDied));
        assert!(field.player().is_dead);
        assert!(field.is_game_over());

        // Caller contract: stop ticking. Extra calls stay quiet.
        let ticks = field.stats().ticks;
        assert_eq!(field.game_tick(RIGHT, IDLE), None);
        assert_eq!(field.stats().ticks, ticks);
    }

    #[test]
    fn test_contact_damage_respects_invulnerability() {
        let mut field = field_with(
            Vec2::new(100.0, 350.0),
            vec![Obstacle::removable_square(Vec2::new(150.0, 350.0), Size::square(50.0), 5)],
            Tuning::default(),
        );
        field.game_tick(RIGHT, IDLE);
        assert_eq!(field.player().health_points, 2);
        assert!(!field.player().is_can_be_hited());

        for _ in 0..10 {
            assert_eq!(field.game_tick(RIGHT, IDLE), None);
        }
        assert_eq!(field.player().health_points, 2);
    }

    #[test]
    fn test_static_contact_is_harmless() {
        let mut field = field_with(
            Vec2::new(100.0, 350.0),
            vec![Obstacle::static_square(Vec2::new(150.0, 350.0), Size::square(50.0))],
            Tuning::default(),
        );
        for _ in 0..20 {
            assert_eq!(field.game_tick(RIGHT, IDLE), None);
        }
        assert_eq!(field.player().health_points, 3);
        assert_eq!(field.player().pos, Vec2::new(100.0, 350.0));
    }

    #[test]
    fn test_health_decreases_one_per_hit() {
        let mut field = field_with(
            Vec2::new(100.0, 350.0),
            vec![Obstacle::removable_circle(Vec2::new(400.0, 350.0), Size::square(40.0), 3)],
            Tuning::default(),
        );
        let mut last = 3;
        let mut hits_seen = 0;
        for tick in 0..200 {
            let shoot = if tick % 40 == 0 { RIGHT } else { IDLE };
            field.game_tick(IDLE, shoot);
            let Some(target) = field.vault().obstacle(1) else {
                break;
            };
            assert!(target.health_points <= last);
            assert!(last - target.health_points <= 1);
            if target.health_points < last {
                hits_seen += 1;
            }
            last = target.health_points;
        }
        assert_eq!(field.stats().hits, 3);
        assert_eq!(hits_seen, 2);
        assert!(field.vault().obstacle(1).is_none());
    }

    #[test]
    fn test_snapshot_lists_everything() {
        let mut field = Field::new(0);
        field.game_tick(IDLE, RIGHT);
        let snapshot = field.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.count(EntityKind::Projectile), 1);
        assert_eq!(snapshot.count(EntityKind::StaticCircle), 2);
        assert_eq!(snapshot.count(EntityKind::RemovableSquare), 2);
        assert!(snapshot.player.is_can_be_hited);
        assert!(serde_json::to_string(&snapshot).is_ok());
    }

    fn command() -> impl Strategy<Value = ControlCommand> {
        (-1i8..=1, -1i8..=1).prop_map(|(x, y)| ControlCommand::new(x as f32, y as f32))
    }

    proptest! {
        #[test]
        fn prop_entities_stay_in_bounds(
            level in 0u32..4,
            inputs in prop::collection::vec((command(), command()), 1..200),
        ) {
            let mut field = Field::new(level);
            let bounds = field.field_size();
            for (mv, shoot) in inputs {
                if field.game_tick(mv, shoot).is_some() {
                    break;
                }
                let player = field.player();
                let half = player.size.half();
                prop_assert!(player.pos.x >= half.x && player.pos.x <= bounds.width - half.x);
                prop_assert!(player.pos.y >= half.y && player.pos.y <= bounds.height - half.y);
                for ob in field.vault().all_obstacles() {
                    let half = ob.size.half();
                    prop_assert!(ob.pos.x >= half.x && ob.pos.x <= bounds.width - half.x);
                    prop_assert!(ob.pos.y >= half.y && ob.pos.y <= bounds.height - half.y);
                    prop_assert!(!ob.is_dead());
                }
            }
        }
    }
}

//! Input mapping: raw key state to per-tick move/shoot commands
//!
//! WASD moves, the arrow keys shoot in their direction. Opposite keys held
//! together cancel out on that axis.

use std::collections::HashSet;

use crate::sim::{ControlCommand, Field, GameOutcome, Motion, Movable, Obstacle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
}

/// Tracks which keys are held down
#[derive(Debug, Clone, Default)]
pub struct Controller {
    pressed: HashSet<Key>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down (`pressed = true`) or key-up event
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut value = 0.0;
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        if self.is_pressed(positive) {
            value += 1.0;
        }
        value
    }

    /// Current `(move, shoot)` commands. Screen y grows downward.
    pub fn commands(&self) -> (ControlCommand, ControlCommand) {
        let movement = ControlCommand::new(self.axis(Key::A, Key::D), self.axis(Key::W, Key::S));
        let shoot = ControlCommand::new(
            self.axis(Key::Left, Key::Right),
            self.axis(Key::Up, Key::Down),
        );
        (movement, shoot)
    }

    /// Run one field tick with the current key state
    pub fn execute(&self, field: &mut Field) -> Option<GameOutcome> {
        let (movement, shoot) = self.commands();
        field.game_tick(movement, shoot)
    }
}

/// Demo player for headless runs
///
/// Lines up vertically with the nearest removable obstacle and fires
/// horizontally at it every `fire_interval` ticks, by pressing keys on a
/// [`Controller`] like a person would.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub fire_interval: u32,
    ticks: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_interval: 15,
            ticks: 0,
        }
    }
}

impl Autopilot {
    pub fn new(fire_interval: u32) -> Self {
        Self {
            fire_interval: fire_interval.max(1),
            ticks: 0,
        }
    }

    /// Update the controller's keys for the coming tick
    pub fn press_keys(&mut self, controller: &mut Controller, field: &Field) {
        controller.release_all();
        self.ticks += 1;

        let player = field.player();
        let Some(target) = field
            .vault()
            .all_obstacles()
            .iter()
            .filter(|o| o.is_removable())
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .partial_cmp(&b.pos.distance_squared(player.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        else {
            return;
        };

        // Aim where the target will be when the shot arrives
        let travel_ticks = (target.pos.x - player.pos.x).abs() / field.tuning().projectile_speed;
        let aim_y = predict_y(target, travel_ticks, field.field_size().height);

        let dy = aim_y - player.pos.y;
        if dy.abs() > player.speed {
            controller.handle_key(if dy < 0.0 { Key::W } else { Key::S }, true);
        }

        let aligned = dy.abs() < target.shape().size.height / 2.0;
        if aligned && self.ticks % self.fire_interval as u64 == 0 {
            let key = if target.pos.x < player.pos.x { Key::Left } else { Key::Right };
            controller.handle_key(key, true);
        }
    }
}

/// Vertical position of `target` after `ticks`, folding patrol motion back
/// into the field the way wall bounces do
fn predict_y(target: &Obstacle, ticks: f32, field_height: f32) -> f32 {
    let Motion::Patrol { velocity } = target.motion else {
        return target.pos.y;
    };
    let lo = target.size.height / 2.0;
    let span = field_height - target.size.height;
    if span <= 0.0 {
        return lo;
    }
    let mut offset = (target.pos.y + velocity.y * ticks - lo).rem_euclid(2.0 * span);
    if offset > span {
        offset = 2.0 * span - offset;
    }
    lo + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Size;
    use glam::Vec2;

    #[test]
    fn test_no_keys_no_commands() {
        let (movement, shoot) = Controller::new().commands();
        assert!(movement.is_idle());
        assert!(shoot.is_idle());
    }

    #[test]
    fn test_wasd_moves_and_arrows_shoot() {
        let mut controller = Controller::new();
        controller.handle_key(Key::D, true);
        controller.handle_key(Key::W, true);
        controller.handle_key(Key::Down, true);
        let (movement, shoot) = controller.commands();
        assert_eq!(movement, ControlCommand::new(1.0, -1.0));
        assert_eq!(shoot, ControlCommand::new(0.0, 1.0));
    }

    #[test]
    fn test_opposite_keys_cancel_and_release() {
        let mut controller = Controller::new();
        controller.handle_key(Key::A, true);
        controller.handle_key(Key::D, true);
        assert!(controller.commands().0.is_idle());

        controller.handle_key(Key::D, false);
        assert_eq!(controller.commands().0, ControlCommand::new(-1.0, 0.0));
    }

    #[test]
    fn test_execute_ticks_field() {
        let mut field = Field::new(0);
        let mut controller = Controller::new();
        controller.handle_key(Key::S, true);
        controller.handle_key(Key::Right, true);
        assert_eq!(controller.execute(&mut field), None);
        assert_eq!(field.player().pos.y, 355.0);
        assert_eq!(field.projectiles().len(), 1);
    }

    #[test]
    fn test_predict_y_folds_at_walls() {
        let ob = Obstacle::removable_circle(Vec2::new(450.0, 650.0), Size::square(40.0), 1)
            .with_patrol(Vec2::new(0.0, 2.0));
        // 20 ticks: 40px down would pass the lower bound (680) by 10
        assert_eq!(predict_y(&ob, 20.0, 700.0), 670.0);
        let still = Obstacle::static_square(Vec2::new(10.0, 30.0), Size::square(20.0));
        assert_eq!(predict_y(&still, 50.0, 700.0), 30.0);
    }

    #[test]
    fn test_autopilot_clears_test_level() {
        let mut field = Field::new(0);
        let mut controller = Controller::new();
        let mut autopilot = Autopilot::default();
        for _ in 0..20_000 {
            if field.vault().removable_count() == 0 {
                break;
            }
            autopilot.press_keys(&mut controller, &field);
            assert_eq!(controller.execute(&mut field), None);
        }
        assert_eq!(field.vault().removable_count(), 0);
        assert_eq!(field.stats().obstacles_destroyed, 4);
    }
}

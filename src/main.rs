//! Another Round headless runner
//!
//! Drives the simulation on a fixed tick the way a windowed shell would:
//! keys → controller → `Field::game_tick`, until the game ends.
//!
//! Usage: `another-round [LEVEL] [MAX_TICKS] [--settings PATH] [--realtime] [--dump]`

use std::path::PathBuf;
use std::time::Duration;

use another_round::sim::{Field, GameOutcome};
use another_round::{Autopilot, Controller, Settings};

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    level: Option<u32>,
    max_ticks: Option<u64>,
    realtime: bool,
    dump: bool,
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Args {
    let mut args = Args::default();
    let mut positional = 0;
    let mut iter = argv.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = iter.next().map(PathBuf::from);
                if args.settings.is_none() {
                    log::warn!("--settings needs a path, using default settings");
                }
            }
            "--realtime" => args.realtime = true,
            "--dump" => args.dump = true,
            other => {
                match positional {
                    0 => args.level = other.parse().ok(),
                    1 => args.max_ticks = other.parse().ok(),
                    _ => {}
                }
                if positional < 2 && !other.chars().all(|c| c.is_ascii_digit()) {
                    log::warn!("Ignoring non-numeric argument {:?}", other);
                }
                positional += 1;
            }
        }
    }
    args
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunEnd {
    Outcome(GameOutcome),
    Cleared,
    OutOfTicks,
}

/// Game instance holding the field and its input source
struct Game {
    settings: Settings,
    field: Field,
    controller: Controller,
    autopilot: Option<Autopilot>,
}

impl Game {
    fn new(settings: Settings) -> Self {
        let field = Field::with_tuning(settings.level, settings.tuning.clone());
        let autopilot = settings.autopilot.then(|| Autopilot::new(settings.fire_interval));
        Self {
            settings,
            field,
            controller: Controller::new(),
            autopilot,
        }
    }

    fn run(&mut self) -> RunEnd {
        let interval = Duration::from_millis(self.settings.tick_interval_ms);

        for _ in 0..self.settings.max_ticks {
            if self.field.vault().removable_count() == 0 {
                return RunEnd::Cleared;
            }
            if let Some(autopilot) = self.autopilot.as_mut() {
                autopilot.press_keys(&mut self.controller, &self.field);
            }
            if let Some(outcome) = self.controller.execute(&mut self.field) {
                return RunEnd::Outcome(outcome);
            }
            if self.settings.realtime {
                std::thread::sleep(interval);
            }
        }
        RunEnd::OutOfTicks
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1));
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(max_ticks) = args.max_ticks {
        settings.max_ticks = max_ticks;
    }
    settings.realtime |= args.realtime;

    log::info!(
        "Another Round starting: level {}, up to {} ticks, autopilot {}",
        settings.level,
        settings.max_ticks,
        settings.autopilot
    );

    let mut game = Game::new(settings);
    let end = game.run();
    let stats = game.field.stats();

    match end {
        RunEnd::Outcome(GameOutcome::PlayerDied) => log::info!("Player died"),
        RunEnd::Cleared => log::info!("Level cleared"),
        RunEnd::OutOfTicks => log::info!("Tick limit reached"),
    }
    log::info!(
        "{} ticks, {} shots, {} hits, {} obstacles destroyed",
        stats.ticks,
        stats.shots_fired,
        stats.hits,
        stats.obstacles_destroyed
    );

    if args.dump {
        match serde_json::to_string_pretty(&game.field.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize snapshot: {}", e),
        }
    }
}

//! Simulation controller
//!
//! Owns the one live `RunState`, starts and restarts runs, feeds intents to
//! the turn engine, and raises the short-lived damage/heal flashes a
//! frontend shows after a turn.

use std::time::Instant;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::gameloop::{Intent, RunState, TurnOutcome, step};
use crate::rng::GameRng;

/// Net change in player hp over one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HpSignal {
    #[default]
    None,
    Damaged,
    Healed,
}

impl HpSignal {
    /// Classify a before/after hp pair. Only the net delta counts.
    pub const fn from_delta(before: i32, after: i32) -> Self {
        if after < before {
            HpSignal::Damaged
        } else if after > before {
            HpSignal::Healed
        } else {
            HpSignal::None
        }
    }
}

/// A raised signal and when it was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpFlash {
    pub signal: HpSignal,
    pub raised_at: Instant,
}

/// Drives a sequence of runs
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    /// Draws the seed of each new run
    seeder: GameRng,
    state: RunState,
    flash: Option<HpFlash>,
}

impl Simulation {
    /// Controller whose runs are seeded from entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seeder(config, GameRng::from_entropy())
    }

    /// Controller whose runs are reproducible from `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_seeder(config, GameRng::new(seed))
    }

    fn with_seeder(config: GameConfig, seeder: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = RunState::not_started(&config, GameRng::new(seeder.seed()));
        Ok(Self {
            config,
            seeder,
            state,
            flash: None,
        })
    }

    /// Controller resuming a prepared state, e.g. a hand-built level
    pub fn with_state(config: GameConfig, state: RunState) -> Result<Self, ConfigError> {
        config.validate()?;
        let seeder = GameRng::new(state.rng.seed());
        Ok(Self {
            config,
            seeder,
            state,
            flash: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Begin a new run at level 1 with default stats
    pub fn start(&mut self) {
        let rng = GameRng::new(self.seeder.next_seed());
        self.state = RunState::new_run(&self.config, rng);
        self.flash = None;
    }

    /// Throw away the current run, whatever its status, and start over
    pub fn restart(&mut self) {
        log::info!(
            "restarting run ({} on level {}, {} points)",
            self.state.status,
            self.state.level,
            self.state.score
        );
        self.start();
    }

    /// Play one intent. Ignored unless a run is in progress.
    pub fn submit_intent(&mut self, intent: Intent) -> TurnOutcome {
        self.submit_intent_at(intent, Instant::now())
    }

    /// `submit_intent` with an explicit clock for the hp flash
    pub fn submit_intent_at(&mut self, intent: Intent, now: Instant) -> TurnOutcome {
        if !self.state.is_active() {
            return TurnOutcome::Ignored;
        }

        let before = self.state.player.stats.hp;
        let outcome = step(&mut self.state, intent, &self.config);
        let signal = HpSignal::from_delta(before, self.state.player.stats.hp);
        if signal != HpSignal::None {
            self.flash = Some(HpFlash {
                signal,
                raised_at: now,
            });
        }

        outcome
    }

    /// Read-only view of the live run
    pub fn current_state(&self) -> &RunState {
        &self.state
    }

    /// The most recent flash, raised or not
    pub fn last_flash(&self) -> Option<HpFlash> {
        self.flash
    }

    /// Signal to show right now
    pub fn hp_signal(&self) -> HpSignal {
        self.hp_signal_at(Instant::now())
    }

    /// Signal to show at `now`: the latest one, while inside the flash window
    pub fn hp_signal_at(&self, now: Instant) -> HpSignal {
        match self.flash {
            Some(flash) if now.saturating_duration_since(flash.raised_at) < self.config.flash_window() => {
                flash.signal
            }
            _ => HpSignal::None,
        }
    }

    pub fn is_damaged(&self) -> bool {
        self.hp_signal() == HpSignal::Damaged
    }

    pub fn is_healed(&self) -> bool {
        self.hp_signal() == HpSignal::Healed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::combat::Stats;
    use crate::dungeon::{Direction, Dungeon, Position};
    use crate::gameloop::RunStatus;
    use crate::monster::{Enemy, EnemyId};
    use crate::object::{Item, ItemId, ItemKind};

    fn arena() -> RunState {
        let dungeon = Dungeon::from_rows(&["#######", "#<....#", "#....>#", "#######"]).unwrap();
        RunState::from_dungeon(dungeon, &GameConfig::default(), GameRng::new(5))
    }

    fn rat_at(x: i32, y: i32) -> Enemy {
        Enemy {
            id: EnemyId(0),
            tier: 0,
            level: 1,
            name: "Rat".to_string(),
            glyph: 'r',
            pos: Position::new(x, y),
            stats: Stats::new(10, 2, 0),
        }
    }

    #[test]
    fn test_not_started_until_start() {
        let mut sim = Simulation::with_seed(GameConfig::default(), 1).unwrap();
        assert_eq!(sim.current_state().status, RunStatus::NotStarted);
        assert_eq!(sim.submit_intent(Intent::Wait), TurnOutcome::Ignored);

        sim.start();
        let state = sim.current_state();
        assert_eq!(state.status, RunStatus::InProgress);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.stats, Stats::new(100, 5, 0));
        assert_eq!(state.player.pos, state.dungeon.start);
        assert_eq!(state.last_message(), Some("You enter level 1."));
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let mut a = Simulation::with_seed(GameConfig::default(), 9).unwrap();
        let mut b = Simulation::with_seed(GameConfig::default(), 9).unwrap();
        a.start();
        b.start();
        assert_eq!(a.current_state(), b.current_state());
        for dir in [Direction::East, Direction::South, Direction::West, Direction::North] {
            a.submit_intent(Intent::Move(dir));
            b.submit_intent(Intent::Move(dir));
        }
        assert_eq!(a.current_state(), b.current_state());
    }

    #[test]
    fn test_restart_discards_run() {
        let mut sim = Simulation::with_state(GameConfig::default(), arena()).unwrap();
        let mut state = arena();
        state.player.stats.hp = 0;
        state.status = RunStatus::Lost;
        state.score = 450;
        sim = Simulation { state, ..sim };
        assert_eq!(sim.submit_intent(Intent::Wait), TurnOutcome::Ignored);

        sim.restart();
        let state = sim.current_state();
        assert_eq!(state.status, RunStatus::InProgress);
        assert_eq!(state.score, 0);
        assert_eq!(state.turn, 0);
        assert_eq!(state.player.stats.hp, 100);
        assert_eq!(sim.last_flash(), None);
    }

    #[test]
    fn test_damage_flash_window() {
        let mut state = arena();
        state.enemies.push(rat_at(2, 1));
        let mut sim = Simulation::with_state(GameConfig::default(), state).unwrap();

        let t0 = Instant::now();
        sim.submit_intent_at(Intent::Wait, t0);
        assert!(sim.is_damaged());
        assert!(!sim.is_healed());
        assert_eq!(sim.hp_signal_at(t0), HpSignal::Damaged);
        assert_eq!(sim.hp_signal_at(t0 + Duration::from_millis(299)), HpSignal::Damaged);
        assert_eq!(sim.hp_signal_at(t0 + Duration::from_millis(300)), HpSignal::None);
    }

    #[test]
    fn test_heal_flash() {
        let mut state = arena();
        state.player.stats.hp = 40;
        state.items.push(Item {
            id: ItemId(0),
            pos: Position::new(2, 1),
            kind: ItemKind::Heal,
            magnitude: 25,
            name: "Health Potion".to_string(),
            glyph: '$',
        });
        let mut sim = Simulation::with_state(GameConfig::default(), state).unwrap();
        let t0 = Instant::now();
        sim.submit_intent_at(Intent::Move(Direction::East), t0);
        assert_eq!(sim.current_state().player.stats.hp, 65);
        assert!(sim.is_healed());
        assert!(!sim.is_damaged());
        assert_eq!(sim.hp_signal_at(t0), HpSignal::Healed);
    }

    #[test]
    fn test_net_delta_decides_signal() {
        // Heal 25 and take 2 in the same turn: net heal
        let mut state = arena();
        state.player.stats.hp = 40;
        state.items.push(Item {
            id: ItemId(0),
            pos: Position::new(2, 1),
            kind: ItemKind::Heal,
            magnitude: 25,
            name: "Health Potion".to_string(),
            glyph: '$',
        });
        state.enemies.push(rat_at(3, 1));
        let mut sim = Simulation::with_state(GameConfig::default(), state).unwrap();
        let t0 = Instant::now();
        sim.submit_intent_at(Intent::Move(Direction::East), t0);
        assert_eq!(sim.current_state().player.stats.hp, 63);
        assert_eq!(sim.hp_signal_at(t0), HpSignal::Healed);
    }

    #[test]
    fn test_no_delta_no_signal() {
        let mut sim = Simulation::with_state(GameConfig::default(), arena()).unwrap();
        let t0 = Instant::now();
        sim.submit_intent_at(Intent::Move(Direction::East), t0);
        assert_eq!(sim.last_flash(), None);
        assert!(!sim.is_damaged() && !sim.is_healed());
        assert_eq!(sim.hp_signal_at(t0), HpSignal::None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let narrow = GameConfig {
            width: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            Simulation::with_seed(narrow, 1),
            Err(ConfigError::MapTooSmall { width: 2, .. })
        ));

        let overfull = GameConfig {
            floor_fill: 0.95,
            ..GameConfig::default()
        };
        assert!(matches!(
            Simulation::with_seed(overfull.clone(), 1),
            Err(ConfigError::UnreachableFill { .. })
        ));
        assert!(matches!(
            Simulation::with_state(overfull, arena()),
            Err(ConfigError::UnreachableFill { .. })
        ));
        assert!(Simulation::new(GameConfig::default()).is_ok());
    }

    #[test]
    fn test_signal_from_delta() {
        assert_eq!(HpSignal::from_delta(10, 8), HpSignal::Damaged);
        assert_eq!(HpSignal::from_delta(8, 10), HpSignal::Healed);
        assert_eq!(HpSignal::from_delta(8, 8), HpSignal::None);
    }
}

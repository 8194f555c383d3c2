//! Turn engine
//!
//! One player intent becomes one full turn: the player's move, attack or
//! pickup, a possible level change, then every enemy acts once. All state
//! changes go through `step`.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::combat::{HitResult, enemy_damage, player_damage, strike};
use crate::config::GameConfig;
use crate::dungeon::{Direction, Dungeon, Position, Tile, generate_dungeon};
use crate::monster::{AiAction, Enemy, decide, spawn_enemies};
use crate::object::{Item, ItemKind, spawn_items};
use crate::player::Player;
use crate::rng::GameRng;

/// Lifecycle of a run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RunStatus {
    #[default]
    NotStarted,
    InProgress,
    Lost,
    Won,
}

/// A player's request for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Step (or attack) one cell
    Move(Direction),
    /// Let the enemies act
    Wait,
}

impl Intent {
    /// Movement intent from a unit vector; None for anything else
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match Direction::from_delta(dx, dy) {
            Some(dir) => Some(Intent::Move(dir)),
            None => None,
        }
    }
}

/// What a call to `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The run is not in progress; nothing happened
    Ignored,
    /// Walked into a wall or off the map; no time passed
    Blocked,
    /// A normal turn, enemies included
    Acted,
    /// Took the exit down to this level
    Descended(u32),
    /// Took the final exit
    Won,
    /// The player died during the enemy phase
    Died,
}

impl TurnOutcome {
    /// True when the turn counter advanced
    pub const fn consumed_turn(self) -> bool {
        !matches!(self, TurnOutcome::Ignored | TurnOutcome::Blocked)
    }
}

/// Everything about one run. The RNG lives here so a state plus an intent
/// determines the next state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub level: u32,
    pub score: u64,
    pub turn: u64,
    pub dungeon: Dungeon,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    /// Newest message first
    pub log: Vec<String>,
    pub status: RunStatus,
    pub rng: GameRng,
}

impl RunState {
    /// Placeholder shown before the first `start`
    pub fn not_started(config: &GameConfig, rng: GameRng) -> Self {
        Self {
            level: 1,
            score: 0,
            turn: 0,
            dungeon: Dungeon::blank(config.width, config.height),
            player: Player::new(config, Position::default()),
            enemies: Vec::new(),
            items: Vec::new(),
            log: vec![welcome_message(config)],
            status: RunStatus::NotStarted,
            rng,
        }
    }

    /// A fresh run on a newly generated level 1
    pub fn new_run(config: &GameConfig, mut rng: GameRng) -> Self {
        let dungeon = generate_dungeon(1, config, &mut rng);
        let enemies = spawn_enemies(1, &dungeon.enemy_spawns, config, &mut rng);
        let items = spawn_items(1, &dungeon.item_spawns, config, &mut rng);
        log::info!(
            "new run (seed {}): {} enemies, {} items",
            rng.seed(),
            enemies.len(),
            items.len()
        );

        let mut state = Self::from_dungeon(dungeon, config, rng);
        state.enemies = enemies;
        state.items = items;
        state
    }

    /// A level-1 run on a prepared map, with no enemies or items
    pub fn from_dungeon(dungeon: Dungeon, config: &GameConfig, rng: GameRng) -> Self {
        let player = Player::new(config, dungeon.start);
        Self {
            level: 1,
            score: 0,
            turn: 0,
            dungeon,
            player,
            enemies: Vec::new(),
            items: Vec::new(),
            log: vec![enter_message(1), welcome_message(config)],
            status: RunStatus::InProgress,
            rng,
        }
    }

    /// True while turns can be processed
    pub fn is_active(&self) -> bool {
        self.status == RunStatus::InProgress
    }

    /// Index of the enemy standing on `pos`
    pub fn enemy_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|e| e.pos == pos)
    }

    /// Index of the item lying on `pos`
    pub fn item_at(&self, pos: Position) -> Option<usize> {
        self.items.iter().position(|i| i.pos == pos)
    }

    /// Newest message, if any
    pub fn last_message(&self) -> Option<&str> {
        self.log.first().map(String::as_str)
    }

    /// Add one message on top of the log
    pub fn message(&mut self, msg: impl Into<String>, config: &GameConfig) {
        self.log.insert(0, msg.into());
        self.trim_log(config);
    }

    /// Add a block of messages on top of the log; the block keeps its order
    /// (its first line ends up newest).
    pub fn messages(&mut self, lines: Vec<String>, config: &GameConfig) {
        if lines.is_empty() {
            return;
        }
        self.log.splice(0..0, lines);
        self.trim_log(config);
    }

    fn trim_log(&mut self, config: &GameConfig) {
        if config.message_history > 0 {
            self.log.truncate(config.message_history);
        }
    }

    /// ASCII map with items, enemies and the player drawn over the tiles
    pub fn render_ascii(&self) -> String {
        let overlay: Vec<(Position, char)> = self
            .items
            .iter()
            .map(|i| (i.pos, i.glyph))
            .chain(self.enemies.iter().map(|e| (e.pos, e.glyph)))
            .chain(std::iter::once((self.player.pos, self.player.glyph)))
            .collect();
        self.dungeon.render_with(&overlay)
    }
}

fn welcome_message(config: &GameConfig) -> String {
    format!(
        "Welcome to the dungeon. Descend to level {} to win.",
        config.max_levels
    )
}

fn enter_message(level: u32) -> String {
    format!("You enter level {level}.")
}

/// Pure form of `step`: returns the next state, leaving `state` untouched
pub fn apply_player_intent(state: &RunState, intent: Intent, config: &GameConfig) -> RunState {
    let mut next = state.clone();
    step(&mut next, intent, config);
    next
}

/// Resolve one player intent in place.
///
/// Does nothing unless the run is in progress. Bumping into a wall or the
/// map edge costs no time and skips the enemy phase.
pub fn step(state: &mut RunState, intent: Intent, config: &GameConfig) -> TurnOutcome {
    if !state.is_active() {
        return TurnOutcome::Ignored;
    }

    let outcome = match intent {
        Intent::Wait => enemy_phase(state, config),
        Intent::Move(dir) => player_move(state, dir, config),
    };

    if outcome.consumed_turn() {
        state.turn += 1;
    }
    outcome
}

fn player_move(state: &mut RunState, dir: Direction, config: &GameConfig) -> TurnOutcome {
    let target = state.player.pos.step(dir);
    let tile = match state.dungeon.tile(target) {
        None | Some(Tile::Wall) => return TurnOutcome::Blocked,
        Some(tile) => tile,
    };

    if let Some(idx) = state.enemy_at(target) {
        melee(state, idx, config);
        return enemy_phase(state, config);
    }

    if tile == Tile::Exit {
        return take_exit(state, config);
    }

    if let Some(idx) = state.item_at(target) {
        let item = state.items.remove(idx);
        state.player.apply_item(&item);
        state.message(pickup_message(&item), config);
        log::debug!("picked up {} ({:+})", item.name, item.magnitude);
    }

    state.player.pos = target;
    enemy_phase(state, config)
}

/// Player attacks the enemy at `idx`; the player does not move
fn melee(state: &mut RunState, idx: usize, config: &GameConfig) {
    let damage = player_damage(state.player.stats.attack);
    let enemy = &mut state.enemies[idx];
    let name = enemy.name.clone();

    let msg = match strike(&mut enemy.stats, damage) {
        HitResult::Wounded { damage, .. } => {
            format!("You hit the {name} for {damage} damage.")
        }
        HitResult::Killed { damage } => {
            state.enemies.remove(idx);
            state.score += config.kill_bonus;
            log::debug!("killed {name} on level {}", state.level);
            format!(
                "You hit the {name} for {damage} damage. The {name} dies! (+{} pts)",
                config.kill_bonus
            )
        }
    };
    state.message(msg, config);
}

fn pickup_message(item: &Item) -> String {
    let effect = match item.kind {
        ItemKind::Heal => format!("You recover {} HP.", item.magnitude),
        ItemKind::AttackBoost => format!("Attack increased by {}.", item.magnitude),
        ItemKind::DefenseBoost => format!("Defense increased by {}.", item.magnitude),
    };
    format!("You open the chest... {}! {effect}", item.name)
}

/// Stepping onto the exit: win on the last level, otherwise build the next
/// one. Either way the enemies do not act this turn.
fn take_exit(state: &mut RunState, config: &GameConfig) -> TurnOutcome {
    if state.level >= config.max_levels {
        state.score += config.level_bonus * u64::from(state.level);
        state.status = RunStatus::Won;
        state.message("Congratulations! You have conquered the dungeon!", config);
        log::info!("run won with {} points after {} turns", state.score, state.turn + 1);
        return TurnOutcome::Won;
    }

    let next_level = state.level + 1;
    let dungeon = generate_dungeon(next_level, config, &mut state.rng);
    state.enemies = spawn_enemies(next_level, &dungeon.enemy_spawns, config, &mut state.rng);
    state.items = spawn_items(next_level, &dungeon.item_spawns, config, &mut state.rng);
    state.player.pos = dungeon.start;
    state.dungeon = dungeon;
    state.level = next_level;
    state.score += config.level_bonus;
    state.message(
        format!(
            "You descend to level {next_level}. (+{} pts)",
            config.level_bonus
        ),
        config,
    );
    log::info!(
        "descended to level {next_level}: {} enemies, {} items",
        state.enemies.len(),
        state.items.len()
    );

    TurnOutcome::Descended(next_level)
}

/// Every enemy acts once, in list order.
///
/// An enemy may not end on the player's cell, on a cell an earlier enemy
/// ended on this phase, or on the cell of an enemy that has yet to act.
///
/// The last rule is stricter than a claimed-cells-only pass: an enemy queued
/// behind another in a corridor holds even if the one ahead is about to step
/// away. In exchange two enemies can never share a cell.
fn enemy_phase(state: &mut RunState, config: &GameConfig) -> TurnOutcome {
    let player_pos = state.player.pos;

    let mut claimed: HashSet<Position> = HashSet::with_capacity(state.enemies.len() + 1);
    claimed.insert(player_pos);

    let mut pending: HashMap<Position, u32> = HashMap::with_capacity(state.enemies.len());
    for enemy in &state.enemies {
        *pending.entry(enemy.pos).or_insert(0) += 1;
    }

    let mut lines = Vec::new();
    for idx in 0..state.enemies.len() {
        let here = state.enemies[idx].pos;
        if let Some(count) = pending.get_mut(&here) {
            *count -= 1;
            if *count == 0 {
                pending.remove(&here);
            }
        }

        let action = decide(
            &state.enemies[idx],
            player_pos,
            &state.dungeon,
            config.aggro_range,
            |p| claimed.contains(&p) || pending.contains_key(&p),
        );

        match action {
            AiAction::AttackPlayer => {
                let enemy = &state.enemies[idx];
                let damage = enemy_damage(enemy.stats.attack, state.player.stats.defense);
                state.player.stats.take_damage(damage);
                lines.push(format!("The {} hits you for {damage} damage!", enemy.name));
            }
            AiAction::Moved(next) => state.enemies[idx].pos = next,
            AiAction::Held => {}
        }

        claimed.insert(state.enemies[idx].pos);
    }

    state.messages(lines, config);

    if state.player.is_dead() {
        state.player.stats.hp = 0;
        state.status = RunStatus::Lost;
        state.message("You have died!", config);
        log::info!(
            "run lost on level {} with {} points after {} turns",
            state.level,
            state.score,
            state.turn + 1
        );
        return TurnOutcome::Died;
    }

    TurnOutcome::Acted
}

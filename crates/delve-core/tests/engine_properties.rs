use delve_core::dungeon::{Direction, Dungeon, Position, Tile};
use delve_core::{GameConfig, GameRng, Intent, RunStatus, Simulation, generate_dungeon};
use hashbrown::HashSet;
use proptest::prelude::*;

fn reachable(d: &Dungeon) -> HashSet<Position> {
    let mut seen = HashSet::new();
    let mut stack = vec![d.start];
    while let Some(p) = stack.pop() {
        if !d.is_walkable(p) || !seen.insert(p) {
            continue;
        }
        stack.extend(Direction::ALL.into_iter().map(|dir| p.step(dir)));
    }
    seen
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Wait),
        Just(Intent::Move(Direction::North)),
        Just(Intent::Move(Direction::South)),
        Just(Intent::Move(Direction::East)),
        Just(Intent::Move(Direction::West)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_levels_are_well_formed(seed in any::<u64>(), level in 1_u32..=10) {
        let config = GameConfig::default();
        let mut rng = GameRng::new(seed);
        let d = generate_dungeon(level, &config, &mut rng);

        prop_assert_eq!(d.width, 25);
        prop_assert_eq!(d.height, 20);
        prop_assert_eq!(d.open_cells(), config.floor_target());

        for y in 0..d.height as i32 {
            for x in 0..d.width as i32 {
                let p = Position::new(x, y);
                let border = x == 0 || y == 0 || x == d.width as i32 - 1 || y == d.height as i32 - 1;
                if border {
                    prop_assert_eq!(d.tile(p), Some(Tile::Wall));
                }
                if d.tile(p) == Some(Tile::Exit) {
                    prop_assert_eq!(p, d.exit);
                }
            }
        }

        prop_assert_ne!(d.start, d.exit);
        prop_assert_eq!(d.tile(d.start), Some(Tile::Floor));
        prop_assert_eq!(d.tile(d.exit), Some(Tile::Exit));

        let open = reachable(&d);
        prop_assert_eq!(open.len(), d.open_cells());

        let mut seen = HashSet::new();
        for &p in d.enemy_spawns.iter().chain(&d.item_spawns) {
            prop_assert!(seen.insert(p), "spawn {p} used twice");
            prop_assert_eq!(d.tile(p), Some(Tile::Floor));
            prop_assert!(p != d.start && p != d.exit);
        }
        prop_assert!(d.enemy_spawns.len() <= config.enemy_count(level));
        prop_assert!(d.item_spawns.len() <= 4);
    }

    #[test]
    fn waiting_never_moves_or_scores(seed in any::<u64>(), turns in 1_usize..40) {
        let mut sim = Simulation::with_seed(GameConfig::default(), seed).unwrap();
        sim.start();
        let pos = sim.current_state().player.pos;

        for _ in 0..turns {
            sim.submit_intent(Intent::Wait);
            let state = sim.current_state();
            prop_assert_eq!(state.player.pos, pos);
            prop_assert_eq!(state.score, 0);
            prop_assert_eq!(state.level, 1);
        }
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        intents in proptest::collection::vec(intent_strategy(), 1..200),
    ) {
        let config = GameConfig::default();
        let mut sim = Simulation::with_seed(config.clone(), seed).unwrap();
        sim.start();

        for intent in intents {
            let before = sim.current_state().clone();
            sim.submit_intent(intent);
            let state = sim.current_state();

            prop_assert!(state.level >= before.level);
            prop_assert!(state.level <= config.max_levels);
            prop_assert!(state.score >= before.score);
            prop_assert_eq!(state.score % 50, 0);
            prop_assert!(state.player.stats.hp >= 0);
            prop_assert!(state.player.stats.hp <= state.player.stats.max_hp);
            prop_assert!(state.dungeon.is_walkable(state.player.pos));
            prop_assert!(state.log.len() <= config.message_history);

            let mut cells = HashSet::new();
            for enemy in &state.enemies {
                prop_assert!(enemy.pos != state.player.pos);
                prop_assert!(state.dungeon.is_walkable(enemy.pos));
                prop_assert!(cells.insert(enemy.pos), "two enemies on {}", enemy.pos);
            }

            if before.status != RunStatus::InProgress {
                prop_assert_eq!(state, &before);
            }
        }
    }
}

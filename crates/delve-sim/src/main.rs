//! Headless runner for the Delve dungeon crawler
//!
//! Plays seeded runs with a scripted bot and reports how each one ended.

mod bot;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use delve_core::{GameConfig, RunState, RunStatus, Simulation, TurnOutcome};

#[derive(Debug, Parser)]
#[command(name = "delve-sim")]
#[command(version)]
#[command(about = "Play Delve runs with a scripted bot", long_about = None)]
struct Args {
    /// Seed for the first run; later runs derive their seeds from it
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of runs to play
    #[arg(short, long, default_value = "1")]
    runs: u32,

    /// Turn limit per run
    #[arg(short, long, default_value = "5000")]
    max_turns: u64,

    /// JSON config file overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print the final map of every run
    #[arg(long)]
    show_map: bool,
}

/// How one run ended
#[derive(Debug, Serialize)]
struct RunReport {
    run: u32,
    seed: u64,
    status: RunStatus,
    level: u32,
    score: u64,
    turns: u64,
    hp: i32,
    kills: u32,
    last_message: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    runs: Vec<RunReport>,
    wins: u32,
    losses: u32,
    unfinished: u32,
    best_score: u64,
    mean_score: f64,
}

impl Summary {
    fn record(&mut self, report: RunReport) {
        match report.status {
            RunStatus::Won => self.wins += 1,
            RunStatus::Lost => self.losses += 1,
            RunStatus::NotStarted | RunStatus::InProgress => self.unfinished += 1,
        }
        self.best_score = self.best_score.max(report.score);
        self.runs.push(report);
        self.mean_score =
            self.runs.iter().map(|r| r.score as f64).sum::<f64>() / self.runs.len() as f64;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut sim = match args.seed {
        Some(seed) => Simulation::with_seed(config, seed)?,
        None => Simulation::new(config)?,
    };

    let mut summary = Summary::default();
    for run in 0..args.runs {
        if run == 0 {
            sim.start();
        } else {
            sim.restart();
        }

        let report = play(&mut sim, run, args.max_turns);
        log::info!(
            "run {} ended {} on level {} with {} points",
            run,
            report.status,
            report.level,
            report.score
        );
        if args.show_map && !args.json {
            println!("{}", sim.current_state().render_ascii());
        }
        summary.record(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// Drive one run until it ends or hits the turn limit
fn play(sim: &mut Simulation, run: u32, max_turns: u64) -> RunReport {
    let seed = sim.current_state().rng.seed();
    let mut kills = 0;

    while sim.current_state().is_active() && sim.current_state().turn < max_turns {
        let state = sim.current_state();
        let intent = bot::choose_intent(state);
        let enemies_before = state.enemies.len();
        let level_before = state.level;

        let outcome = sim.submit_intent(intent);
        log::trace!("turn {}: {:?} -> {:?}", sim.current_state().turn, intent, outcome);

        let state = sim.current_state();
        if state.level == level_before && state.enemies.len() < enemies_before {
            kills += 1;
        }
        if outcome == TurnOutcome::Ignored {
            break;
        }
    }

    report(run, seed, kills, sim.current_state())
}

fn report(run: u32, seed: u64, kills: u32, state: &RunState) -> RunReport {
    RunReport {
        run,
        seed,
        status: state.status,
        level: state.level,
        score: state.score,
        turns: state.turn,
        hp: state.player.stats.hp,
        kills,
        last_message: state.last_message().map(str::to_string),
    }
}

fn print_summary(summary: &Summary) {
    for r in &summary.runs {
        println!(
            "Run {:3} (seed {:20}): {:10} level {:2}, {:5} pts, {:5} turns, {:3} kills",
            r.run,
            r.seed,
            r.status.to_string(),
            r.level,
            r.score,
            r.turns,
            r.kills
        );
    }

    let n = summary.runs.len().max(1) as f64;
    println!("\n=== Summary ===");
    println!("Runs: {}", summary.runs.len());
    println!(
        "Wins: {} ({:.1}%)",
        summary.wins,
        summary.wins as f64 / n * 100.0
    );
    println!(
        "Deaths: {} ({:.1}%)",
        summary.losses,
        summary.losses as f64 / n * 100.0
    );
    println!("Unfinished: {}", summary.unfinished);
    println!("Best score: {}", summary.best_score);
    println!("Mean score: {:.1}", summary.mean_score);
}

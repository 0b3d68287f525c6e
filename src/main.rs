//! Headless autopilot runner.
//!
//! Plays a session with the built-in autopilot and prints a summary, as a
//! quick way to exercise the engine and compare weight sets.
//!
//! ```text
//! auto-tetris [--seed N] [--pieces N] [--level N] [--json]
//! ```

use anyhow::{bail, Context, Result};
use serde::Serialize;

use auto_tetris::core::GameSnapshot;
use auto_tetris::types::{GameAction, AUTOPILOT_STEP_MS};
use auto_tetris::{Autopilot, GameConfig, GameState};

#[derive(Debug)]
struct Options {
    seed: u32,
    pieces: u32,
    start_level: u32,
    json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 200,
            start_level: 1,
            json: false,
        }
    }
}

fn parse_args() -> Result<Options> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                opts.seed = value.parse().context("--seed must be an integer")?;
            }
            "--pieces" => {
                let value = args.next().context("--pieces needs a value")?;
                opts.pieces = value.parse().context("--pieces must be an integer")?;
            }
            "--level" => {
                let value = args.next().context("--level needs a value")?;
                opts.start_level = value.parse().context("--level must be an integer")?;
            }
            "--json" => opts.json = true,
            "--help" | "-h" => {
                println!("usage: auto-tetris [--seed N] [--pieces N] [--level N] [--json]");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(opts)
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u32,
    pieces_placed: u32,
    simulated_ms: u64,
    game_over: bool,
    final_state: GameSnapshot,
}

fn run(opts: &Options) -> Result<Report> {
    let config = GameConfig::default()
        .with_seed(opts.seed)
        .with_start_level(opts.start_level);
    let mut state = GameState::new(config)?;
    let mut pilot = Autopilot::new();

    let mut placed = 0u32;
    let mut simulated_ms = 0u64;

    while placed < opts.pieces && !state.game_over() {
        // The driver cadence: one command per step, gravity in between.
        let Some(action) = pilot.next_action(&state) else {
            break;
        };
        let drop = action == GameAction::HardDrop;
        state.apply_action(action);
        if drop {
            placed += 1;
        }
        // Gravity runs between plans; mid-plan the piece is still where
        // the search left it, so the queued commands stay valid.
        if pilot.pending() == 0 {
            state.tick(AUTOPILOT_STEP_MS);
        }
        simulated_ms += u64::from(AUTOPILOT_STEP_MS);
    }

    Ok(Report {
        seed: opts.seed,
        pieces_placed: placed,
        simulated_ms,
        game_over: state.game_over(),
        final_state: GameSnapshot::capture(&state),
    })
}

fn main() -> Result<()> {
    let opts = parse_args()?;
    let report = run(&opts)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let score = &report.final_state.score;
    println!("seed {}, {} pieces placed", report.seed, report.pieces_placed);
    println!(
        "score {}  level {}  lines {}",
        score.score, score.level, score.lines
    );
    println!(
        "clears: 1x{} 2x{} 3x{} 4x{}",
        score.clear_counts[1], score.clear_counts[2], score.clear_counts[3], score.clear_counts[4]
    );
    if report.game_over {
        println!("topped out after {} pieces", report.pieces_placed);
    }
    Ok(())
}

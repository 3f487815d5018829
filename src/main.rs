//! Goblin CLI - play and simulate whack-a-goblin.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use goblin_game::GameConfig;
use goblin_game::simulate::SimulationConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Whack-a-Goblin - a terminal reflex game
#[derive(Parser, Debug)]
#[command(name = "goblin-game")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Score file (JSON key-value store)
    #[arg(
        long,
        global = true,
        env = "GOBLIN_STORE",
        default_value = "goblin-score.json"
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Board side length (default: 4, i.e. 16 cells)
        #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u16).range(1..=10))]
        size: u16,

        /// Milliseconds between goblin moves (default: 1000)
        #[arg(short, long, default_value = "1000", value_parser = clap::value_parser!(u64).range(50..))]
        interval: u64,

        /// Misses that end a game (default: 5)
        #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
        max_misses: u32,

        /// Random seed (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Log file (the terminal is taken by the game)
        #[arg(long, default_value = "goblin-game.log")]
        log_file: PathBuf,
    },

    /// Run many headless games with a scripted player and aggregate statistics
    Simulate {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Board side length (default: 4)
        #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u16).range(1..=64))]
        size: u16,

        /// Misses that end a game (default: 5)
        #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
        max_misses: u32,

        /// Probability of hitting the goblin before each move (0.0-1.0)
        #[arg(long, default_value = "0.5", value_parser = cli::parse_probability)]
        hit_rate: f64,

        /// Probability of clicking an empty cell before each move (0.0-1.0)
        #[arg(long, default_value = "0.05", value_parser = cli::parse_probability)]
        stray_rate: f64,

        /// Moves after which a game is stopped (default: 10000)
        #[arg(long, default_value = "10000")]
        max_ticks: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Show the saved score
    Score {
        /// Set the saved score back to zero
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_file = match &args.command {
        Commands::Play { log_file, .. } => Some(log_file.clone()),
        Commands::Simulate { .. } | Commands::Score { .. } => None,
    };
    if let Err(e) = cli::init_tracing(log_file.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Play {
            size,
            interval,
            max_misses,
            seed,
            log_file: _,
        } => {
            let config = GameConfig {
                board_side: size,
                move_interval: Duration::from_millis(interval),
                max_misses,
                seed,
                ..GameConfig::default()
            };
            cli::play::execute(config, args.store)
        }

        Commands::Simulate {
            games,
            seed,
            threads,
            size,
            max_misses,
            hit_rate,
            stray_rate,
            max_ticks,
            format,
            progress,
        } => {
            let config = SimulationConfig {
                game: GameConfig {
                    board_side: size,
                    max_misses,
                    ..GameConfig::default()
                },
                hit_rate,
                stray_rate,
                max_ticks,
            };
            cli::simulate::execute(config, games, seed, threads, format, progress)
        }

        Commands::Score { reset } => cli::score::execute(&args.store, reset),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

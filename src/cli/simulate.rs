//! Simulate command implementation.

use super::output::{
    JsonSimulationResult, SimulationStats, format_simulation_csv, format_simulation_text,
};
use super::{CliError, SimulateFormat};
use goblin_game::game::entropy_seed;
use goblin_game::simulate::{SimulationConfig, run_session};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use tracing::warn;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the output cannot be produced.
#[allow(clippy::needless_pass_by_value, clippy::cast_precision_loss)]
pub(crate) fn execute(
    config: SimulationConfig,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(entropy_seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own stats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SimulationStats::new, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);
            match run_session(game_seed, &config) {
                Ok(result) => local_stats.add_result(&result),
                Err(e) => warn!(seed = game_seed, error = %e, "session failed"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(SimulationStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SimulateFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} games/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        SimulateFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSimulationResult::from_stats(&stats))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        SimulateFormat::Csv => {
            print!("{}", format_simulation_csv(&stats));
        }
    }

    Ok(())
}

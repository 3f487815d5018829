//! Output formatting utilities for CLI.

// Averages convert counts to f64
#![allow(clippy::cast_precision_loss)]

use goblin_game::simulate::SessionResult;
use serde::Serialize;
use std::fmt::Write;

/// Aggregated statistics for a batch of simulated sessions.
#[derive(Debug, Default)]
pub(super) struct SimulationStats {
    /// Total sessions played.
    pub(super) games_played: u64,
    /// Sessions ended by the miss limit.
    pub(super) games_ended: u64,
    /// Total ticks across all sessions.
    total_ticks: u64,
    /// Tick sum of squares for std dev calculation.
    tick_sq_sum: f64,
    /// Total goblins hit.
    total_hits: u64,
    /// Total misses.
    total_misses: u64,
    /// Total empty-cell clicks.
    total_strays: u64,
    /// Session with the most hits.
    best: Option<SessionResult>,
}

impl SimulationStats {
    /// Create empty stats.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Add a session result to the stats.
    pub(super) fn add_result(&mut self, result: &SessionResult) {
        self.games_played += 1;
        if result.ended {
            self.games_ended += 1;
        }
        self.total_ticks += u64::from(result.ticks);
        self.tick_sq_sum += f64::from(result.ticks) * f64::from(result.ticks);
        self.total_hits += u64::from(result.hits);
        self.total_misses += u64::from(result.misses);
        self.total_strays += u64::from(result.stray_clicks);

        if self.best.is_none_or(|best| result.hits > best.hits) {
            self.best = Some(*result);
        }
    }

    /// Merge stats gathered on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.games_ended += other.games_ended;
        self.total_ticks += other.total_ticks;
        self.tick_sq_sum += other.tick_sq_sum;
        self.total_hits += other.total_hits;
        self.total_misses += other.total_misses;
        self.total_strays += other.total_strays;

        if let Some(theirs) = other.best
            && self.best.is_none_or(|ours| theirs.hits > ours.hits)
        {
            self.best = Some(theirs);
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Average session length in ticks.
    pub(super) fn avg_ticks(&self) -> f64 {
        self.per_game(self.total_ticks)
    }

    /// Session length standard deviation.
    pub(super) fn ticks_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let mean = self.avg_ticks();
        let variance = self.tick_sq_sum / self.games_played as f64 - mean * mean;
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Average goblins hit per session.
    pub(super) fn avg_hits(&self) -> f64 {
        self.per_game(self.total_hits)
    }

    /// Average misses per session.
    pub(super) fn avg_misses(&self) -> f64 {
        self.per_game(self.total_misses)
    }

    /// Average empty-cell clicks per session.
    pub(super) fn avg_strays(&self) -> f64 {
        self.per_game(self.total_strays)
    }

    /// Share of all clicks that hit the goblin (0.0-1.0).
    pub(super) fn accuracy(&self) -> f64 {
        let clicks = self.total_hits + self.total_strays;
        if clicks == 0 {
            return 0.0;
        }
        self.total_hits as f64 / clicks as f64
    }
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// Total sessions played.
    games_played: u64,
    /// Sessions ended by the miss limit.
    games_ended: u64,
    /// Average session length in ticks.
    avg_ticks: f64,
    /// Session length standard deviation.
    ticks_std_dev: f64,
    /// Average hits per session.
    avg_hits: f64,
    /// Average misses per session.
    avg_misses: f64,
    /// Click accuracy (0.0-1.0).
    accuracy: f64,
    /// Best session, if any were played.
    best: Option<JsonSession>,
}

/// JSON-serializable session.
#[derive(Debug, Serialize)]
pub(super) struct JsonSession {
    /// Session seed.
    seed: u64,
    /// Ticks survived.
    ticks: u32,
    /// Goblins hit.
    hits: u32,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &SimulationStats) -> Self {
        Self {
            games_played: stats.games_played,
            games_ended: stats.games_ended,
            avg_ticks: stats.avg_ticks(),
            ticks_std_dev: stats.ticks_std_dev(),
            avg_hits: stats.avg_hits(),
            avg_misses: stats.avg_misses(),
            accuracy: stats.accuracy(),
            best: stats.best.map(|b| JsonSession {
                seed: b.seed,
                ticks: b.ticks,
                hits: b.hits,
            }),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(stats: &SimulationStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Simulation Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    let _ = writeln!(
        output,
        "  Ended by misses: {} ({:.1}%)",
        stats.games_ended,
        stats.per_game(stats.games_ended) * 100.0
    );
    let _ = writeln!(
        output,
        "  Session length:  {:.1} ticks (+/- {:.1})",
        stats.avg_ticks(),
        stats.ticks_std_dev()
    );
    let _ = writeln!(output, "  Hits:            {:.2} per game", stats.avg_hits());
    let _ = writeln!(output, "  Misses:          {:.2} per game", stats.avg_misses());
    let _ = writeln!(output, "  Stray clicks:    {:.2} per game", stats.avg_strays());
    let _ = writeln!(output, "  Accuracy:        {:.1}%", stats.accuracy() * 100.0);

    if let Some(best) = stats.best {
        let _ = writeln!(
            output,
            "\nBest game: {} hits over {} ticks (seed {})",
            best.hits, best.ticks, best.seed
        );
    }

    output
}

/// Format simulation stats as CSV.
pub(super) fn format_simulation_csv(stats: &SimulationStats) -> String {
    let mut output = String::new();

    output.push_str("games,ended,avg_ticks,ticks_std_dev,avg_hits,avg_misses,accuracy\n");
    let _ = writeln!(
        output,
        "{},{},{:.2},{:.2},{:.2},{:.2},{:.4}",
        stats.games_played,
        stats.games_ended,
        stats.avg_ticks(),
        stats.ticks_std_dev(),
        stats.avg_hits(),
        stats.avg_misses(),
        stats.accuracy()
    );

    output
}

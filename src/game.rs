//! Game layer.
//!
//! - Board geometry, target placement and relocation
//! - Session state machine (placing, running, ended)
//! - Score keeping and persistence
//! - Composition root that restarts sessions on game over

mod board;
mod config;
mod phase;
mod rng;
mod score;
mod session;
mod timer;

pub use board::{BoardManager, Scoreboard};
pub use config::{DEFAULT_BOARD_SIDE, DEFAULT_MAX_MISSES, DEFAULT_MOVE_INTERVAL, GameConfig};
pub use phase::{
    Effect, Phase, Running, on_drawn, on_empty_click, on_target_click, on_tick, on_timer_started,
};
pub use rng::{Rng, entropy_seed};
pub use score::{SCORE_KEY, ScoreDisplay, ScoreManager};
pub use session::{Alert, AlertLog, GoblinGame};
pub use timer::{Clock, Interval, ManualClock, SystemClock};

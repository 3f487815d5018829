//! Session configuration.

use crate::page::DEFAULT_BOARD_SELECTOR;
use std::time::Duration;

/// Default board side length (4×4 = 16 cells).
pub const DEFAULT_BOARD_SIDE: u16 = 4;

/// Default time between target relocations.
pub const DEFAULT_MOVE_INTERVAL: Duration = Duration::from_millis(1000);

/// Default number of misses that ends a session.
pub const DEFAULT_MAX_MISSES: u32 = 5;

/// Parameters for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_side: u16,
    /// Selector of the mount point the board is drawn into.
    pub board_selector: String,
    /// Time between target relocations.
    pub move_interval: Duration,
    /// Misses that end the session.
    pub max_misses: u32,
    /// Seed for target placement (default: time-based).
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_side: DEFAULT_BOARD_SIDE,
            board_selector: DEFAULT_BOARD_SELECTOR.to_string(),
            move_interval: DEFAULT_MOVE_INTERVAL,
            max_misses: DEFAULT_MAX_MISSES,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Number of cells on the board.
    #[must_use]
    pub fn board_size(&self) -> usize {
        usize::from(self.board_side).pow(2)
    }
}

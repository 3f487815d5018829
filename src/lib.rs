// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Goblin: a whack-a-goblin reflex game.
//!
//! A goblin hops between the cells of a square board on a fixed cadence.
//! Clicking it scores a point; letting it move unclicked, or clicking an
//! empty cell, counts a miss. Five misses end the session and a new one
//! starts with the persisted score carried over.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Front end (TUI / simulation)      │
//! ├─────────────────────────────────────┤
//! │   GoblinGame (composition root)     │
//! ├──────────────────┬──────────────────┤
//! │   BoardManager   │   ScoreManager   │
//! ├──────────────────┼──────────────────┤
//! │   Page model     │   Key-value store│
//! └──────────────────┴──────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod page;
pub mod simulate;
pub mod store;

pub use error::{BoardError, StoreError};

// Re-export key game types at crate root for convenience
pub use game::{
    Alert, BoardManager, Effect, GameConfig, GoblinGame, Phase, ScoreManager, Scoreboard,
};
pub use page::{BoardEvent, Container, Element, Page};
pub use store::{FileStore, KeyValueStore, MemoryStore};

//! Headless sessions played by a scripted player.
//!
//! Each simulated tick the player gets one chance to hit the goblin and one
//! chance to click a random empty cell, then the relocation timer fires.
//! Sessions are independent, so batches run in parallel with rayon.

use crate::error::BoardError;
use crate::game::{BoardManager, Effect, GameConfig, Rng, ScoreManager};
use crate::page::{Element, Page};
use crate::store::MemoryStore;

/// Scripted player behaviour and session limits.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Board and miss-limit settings.
    pub game: GameConfig,
    /// Probability of hitting the goblin before each tick.
    pub hit_rate: f64,
    /// Probability of clicking an empty cell before each tick.
    pub stray_rate: f64,
    /// Ticks after which an unfinished session is stopped.
    pub max_ticks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            hit_rate: 0.5,
            stray_rate: 0.05,
            max_ticks: 10_000,
        }
    }
}

/// Outcome of one simulated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    /// Seed the session was played with.
    pub seed: u64,
    /// Relocation ticks fired.
    pub ticks: u32,
    /// Goblins hit.
    pub hits: u32,
    /// Misses at the end.
    pub misses: u32,
    /// Empty cells clicked.
    pub stray_clicks: u32,
    /// Whether the miss limit ended the session (as opposed to `max_ticks`).
    pub ended: bool,
}

/// Play one session to completion.
///
/// # Errors
///
/// Returns an error if the board cannot be drawn.
pub fn run_session(seed: u64, config: &SimulationConfig) -> Result<SessionResult, BoardError> {
    let game = &config.game;
    let page = Page::standard().with_mount(game.board_selector.clone());
    let mut board = BoardManager::with_rng(game, page.query(&game.board_selector), Rng::new(seed));
    let mut scores = ScoreManager::new(MemoryStore::new());
    let mut player = Rng::new(seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15);

    board.draw_board()?;
    board.init_events();

    let mut result = SessionResult {
        seed,
        ticks: 0,
        hits: 0,
        misses: 0,
        stray_clicks: 0,
        ended: false,
    };

    while result.ticks < config.max_ticks && !board.is_game_over() {
        if player.chance(config.hit_rate)
            && let Some(position) = board.current_position()
            && board.click(Element::Target(position), &mut scores) == Effect::Hit
        {
            result.hits += 1;
        }

        if player.chance(config.stray_rate)
            && let Some(element) = random_empty_cell(&board, &mut player)
        {
            board.click(element, &mut scores);
            result.stray_clicks += 1;
        }

        if board.is_game_over() {
            break;
        }
        board.tick();
        result.ticks += 1;
    }

    result.misses = board.miss_count();
    result.ended = board.is_game_over();
    Ok(result)
}

fn random_empty_cell(board: &BoardManager, rng: &mut Rng) -> Option<Element> {
    let size = board.board_size();
    if size < 2 && board.current_position().is_some() {
        return None;
    }
    loop {
        let element = board.element_at(rng.below(size));
        if matches!(element, Element::Cell(_)) {
            return Some(element);
        }
    }
}

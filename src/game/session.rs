//! Composition root for one player's sequence of sessions.

use crate::error::BoardError;
use crate::game::{
    BoardManager, Clock, Effect, GameConfig, Phase, Rng, ScoreManager, SystemClock,
};
use crate::page::{BoardEvent, Element, Page};
use crate::store::KeyValueStore;
use tracing::{debug, info};

/// Sink for messages the player must acknowledge.
pub trait Alert {
    /// Show `message` and return once the player has acknowledged it.
    fn alert(&mut self, message: &str);
}

/// Alert sink that only records messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertLog {
    messages: Vec<String>,
}

impl AlertLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Alert for AlertLog {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Wires the board to the score, starts sessions and restarts them when
/// they end.
#[derive(Debug)]
pub struct GoblinGame<S, C = SystemClock> {
    config: GameConfig,
    page: Page,
    board: BoardManager,
    scores: ScoreManager<S>,
    clock: C,
    seeds: Rng,
    sessions: u32,
    subscribed: bool,
}

impl<S: KeyValueStore> GoblinGame<S> {
    /// Create a game on the wall clock.
    #[must_use]
    pub fn new(config: GameConfig, page: Page, store: S) -> Self {
        Self::with_clock(config, page, store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> GoblinGame<S, C> {
    /// Create a game driven by `clock`.
    #[must_use]
    pub fn with_clock(config: GameConfig, page: Page, store: S, clock: C) -> Self {
        let mut seeds = config.seed.map_or_else(Rng::from_entropy, Rng::new);
        let board = build_board(&config, &page, &mut seeds);
        Self {
            config,
            page,
            board,
            scores: ScoreManager::new(store),
            clock,
            seeds,
            sessions: 0,
            subscribed: false,
        }
    }

    /// Draw the board, start relocation, accept clicks, show the score and
    /// listen for the end of the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be drawn.
    pub fn init(&mut self) -> Result<(), BoardError> {
        if self.board.phase() != Phase::Placing {
            debug!(session = self.sessions, "session already started");
            return Ok(());
        }
        self.board.draw_board()?;
        self.board
            .moving_person_through_the_cells(self.config.move_interval, self.clock.now());
        self.board.init_events();
        self.scores
            .create_score_display(&self.page, &self.config.board_selector);
        self.subscribed = self.page.contains(&self.config.board_selector);
        self.sessions += 1;

        info!(
            session = self.sessions,
            score = self.scores.score(),
            "session started"
        );
        Ok(())
    }

    /// Fire due relocation ticks.
    ///
    /// If the session ends, `alert` is told and a new session is started
    /// before returning. Returns the final miss count in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if the restarted board cannot be drawn.
    pub fn advance(&mut self, alert: &mut impl Alert) -> Result<Option<u32>, BoardError> {
        self.board.advance(self.clock.now());
        self.dispatch_signals(alert)
    }

    /// Forward a click to the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the restarted board cannot be drawn.
    pub fn click(
        &mut self,
        element: Element,
        alert: &mut impl Alert,
    ) -> Result<Effect, BoardError> {
        let effect = self.board.click(element, &mut self.scores);
        self.dispatch_signals(alert)?;
        Ok(effect)
    }

    /// Throw away the board and start a new session. The persisted score
    /// carries over.
    ///
    /// # Errors
    ///
    /// Returns an error if the new board cannot be drawn.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        self.board = build_board(&self.config, &self.page, &mut self.seeds);
        self.scores.reload();
        self.subscribed = false;
        self.init()
    }

    /// Current board.
    #[must_use]
    pub const fn board(&self) -> &BoardManager {
        &self.board
    }

    /// Score manager.
    #[must_use]
    pub const fn scores(&self) -> &ScoreManager<S> {
        &self.scores
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Sessions started so far, including the current one.
    #[must_use]
    pub const fn sessions_started(&self) -> u32 {
        self.sessions
    }

    fn dispatch_signals(&mut self, alert: &mut impl Alert) -> Result<Option<u32>, BoardError> {
        let events = self.board.take_events();
        if !self.subscribed {
            return Ok(None);
        }

        let mut ended = None;
        for event in events {
            match event {
                BoardEvent::GameOver { missed } => {
                    self.game_over_result(missed, alert)?;
                    ended = Some(missed);
                }
            }
        }
        Ok(ended)
    }

    fn game_over_result(&mut self, missed: u32, alert: &mut impl Alert) -> Result<(), BoardError> {
        info!(missed, score = self.scores.score(), "session over");
        alert.alert(&format!("Game over! You missed {missed} goblins."));
        self.restart()
    }
}

fn build_board(config: &GameConfig, page: &Page, seeds: &mut Rng) -> BoardManager {
    let container = page.query(&config.board_selector);
    BoardManager::with_rng(config, container, Rng::new(seeds.next_u64()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ManualClock, SCORE_KEY};
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn game(store: MemoryStore) -> (GoblinGame<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let game = GoblinGame::with_clock(config, Page::standard(), store, clock.clone());
        (game, clock)
    }

    #[test]
    fn test_init_sequence() {
        let (mut game, _) = game(MemoryStore::new());
        game.init().unwrap();

        let container = game.board().container().unwrap();
        assert_eq!(container.cell_count(), 16);
        assert_eq!(container.target_count(), 1);
        assert!(game.board().is_timer_active());
        assert_eq!(game.scores().display().unwrap().text(), "Score: 0");
        assert_eq!(game.sessions_started(), 1);
    }

    #[test]
    fn test_second_init_is_noop() {
        let (mut game, clock) = game(MemoryStore::new());
        game.init().unwrap();
        let position = game.board().current_position();

        clock.advance(Duration::from_millis(500));
        game.init().unwrap();

        assert_eq!(game.sessions_started(), 1);
        assert_eq!(game.board().container().unwrap().cell_count(), 16);
        assert_eq!(game.board().current_position(), position);

        // The timer still runs from the first init
        clock.advance(Duration::from_millis(500));
        game.advance(&mut AlertLog::new()).unwrap();
        assert_eq!(game.board().miss_count(), 1);
    }

    #[test]
    fn test_init_without_container_fails() {
        let clock = ManualClock::new();
        let mut game = GoblinGame::with_clock(
            GameConfig::default(),
            Page::new(),
            MemoryStore::new(),
            clock,
        );
        assert!(matches!(
            game.init(),
            Err(BoardError::ContainerNotFound { .. })
        ));
    }

    #[test]
    fn test_hit_through_game_updates_display() {
        let (mut game, _) = game(MemoryStore::new());
        game.init().unwrap();
        let mut alerts = AlertLog::new();

        let position = game.board().current_position().unwrap();
        let element = game.board().element_at(position);
        assert_eq!(game.click(element, &mut alerts).unwrap(), Effect::Hit);

        assert_eq!(game.scores().score(), 1);
        assert_eq!(game.scores().display().unwrap().text(), "Score: 1");
    }

    #[test]
    fn test_game_over_alerts_and_restarts() {
        let (mut game, clock) = game(MemoryStore::new().with_entry(SCORE_KEY, "4"));
        game.init().unwrap();
        let mut alerts = AlertLog::new();

        for _ in 0..4 {
            clock.advance(Duration::from_secs(1));
            assert_eq!(game.advance(&mut alerts).unwrap(), None);
        }
        clock.advance(Duration::from_secs(1));
        assert_eq!(game.advance(&mut alerts).unwrap(), Some(5));

        assert_eq!(alerts.messages(), ["Game over! You missed 5 goblins."]);
        assert_eq!(game.sessions_started(), 2);

        // Fresh board, persisted score kept
        assert_eq!(game.board().miss_count(), 0);
        assert!(game.board().is_timer_active());
        assert_eq!(game.board().container().unwrap().cell_count(), 16);
        assert_eq!(game.scores().score(), 4);
        assert_eq!(game.scores().display().unwrap().text(), "Score: 4");
    }

    #[test]
    fn test_restarted_timer_counts_from_restart() {
        let (mut game, clock) = game(MemoryStore::new());
        game.init().unwrap();
        let mut alerts = AlertLog::new();

        for _ in 0..4 {
            clock.advance(Duration::from_secs(1));
            game.advance(&mut alerts).unwrap();
        }
        clock.advance(Duration::from_secs(1));
        assert_eq!(game.advance(&mut alerts).unwrap(), Some(5));

        // The new session's first tick is a full period away
        clock.advance(Duration::from_millis(999));
        game.advance(&mut alerts).unwrap();
        assert_eq!(game.board().miss_count(), 0);
        clock.advance(Duration::from_millis(1));
        game.advance(&mut alerts).unwrap();
        assert_eq!(game.board().miss_count(), 1);
    }
}

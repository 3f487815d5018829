//! Score manager: holds the score, persists it, renders the readout.

use crate::game::Scoreboard;
use crate::page::Page;
use crate::store::KeyValueStore;
use tracing::warn;

/// Key the score is persisted under.
pub const SCORE_KEY: &str = "goblinGameScore";

/// Rendered score readout placed after the board container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay {
    anchor: String,
    text: String,
}

impl ScoreDisplay {
    /// Selector of the container this display follows.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Current readout text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Owns the player's score and its persistence.
#[derive(Debug)]
pub struct ScoreManager<S> {
    score: u32,
    store: S,
    display: Option<ScoreDisplay>,
}

impl<S: KeyValueStore> ScoreManager<S> {
    /// Create a manager, restoring a previously persisted score if one exists.
    #[must_use]
    pub fn new(store: S) -> Self {
        let mut manager = Self {
            score: 0,
            store,
            display: None,
        };
        manager.score = manager.load_score();
        manager
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Set the score, persist it and refresh the display.
    pub fn set_score(&mut self, value: u32) {
        self.score = value;
        self.save_score();
        self.update_score_display();
    }

    /// Set the score back to zero.
    pub fn reset(&mut self) {
        self.set_score(0);
    }

    /// Drop in-memory state and re-read the persisted score, as a fresh
    /// session would.
    pub fn reload(&mut self) {
        self.display = None;
        self.score = self.load_score();
    }

    /// Create the score readout after the board container.
    ///
    /// Does nothing if `board_selector` is not mounted on `page`.
    pub fn create_score_display(&mut self, page: &Page, board_selector: &str) {
        if !page.contains(board_selector) {
            return;
        }
        self.display = Some(ScoreDisplay {
            anchor: board_selector.to_string(),
            text: String::new(),
        });
        self.update_score_display();
    }

    /// The readout, once created.
    #[must_use]
    pub const fn display(&self) -> Option<&ScoreDisplay> {
        self.display.as_ref()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn save_score(&mut self) {
        if let Err(e) = self.store.set(SCORE_KEY, &self.score.to_string()) {
            warn!(error = %e, "unable to save score");
        }
    }

    fn load_score(&self) -> u32 {
        match self.store.get(SCORE_KEY) {
            Ok(Some(raw)) => parse_score(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "ignoring unparsable saved score");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "unable to load score");
                0
            }
        }
    }

    fn update_score_display(&mut self) {
        if let Some(display) = self.display.as_mut() {
            display.text = format!("Score: {}", self.score);
        }
    }
}

impl<S: KeyValueStore> Scoreboard for ScoreManager<S> {
    fn score(&self) -> u32 {
        self.score
    }

    fn set_score(&mut self, value: u32) {
        ScoreManager::set_score(self, value);
    }
}

/// Parse a persisted score. Only plain non-negative integers are accepted.
fn parse_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

//! Board manager: geometry, target placement, relocation and hit/miss
//! bookkeeping.

use crate::error::BoardError;
use crate::game::phase::{self, Effect, Phase};
use crate::game::{GameConfig, Interval, Rng};
use crate::page::{BoardEvent, Container, Element};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Receiver of score changes made by the board.
pub trait Scoreboard {
    /// Current score.
    fn score(&self) -> u32;

    /// Replace the score.
    fn set_score(&mut self, value: u32);
}

/// Owns the board container, the target position and the session phase.
#[derive(Debug, Clone)]
pub struct BoardManager {
    side: u16,
    selector: String,
    container: Option<Container>,
    current_position: Option<usize>,
    phase: Phase,
    max_misses: u32,
    rng: Rng,
    listening: bool,
}

impl BoardManager {
    /// Create a board manager for `container`, seeded from `config.seed`.
    ///
    /// `container` is the result of resolving `config.board_selector`;
    /// `None` makes [`BoardManager::draw_board`] fail.
    #[must_use]
    pub fn new(config: &GameConfig, container: Option<Container>) -> Self {
        let rng = config.seed.map_or_else(Rng::from_entropy, Rng::new);
        Self::with_rng(config, container, rng)
    }

    /// Create a board manager with an explicit random source.
    #[must_use]
    pub fn with_rng(config: &GameConfig, container: Option<Container>, rng: Rng) -> Self {
        Self {
            side: config.board_side,
            selector: config.board_selector.clone(),
            container,
            current_position: None,
            phase: Phase::Placing,
            max_misses: config.max_misses.max(1),
            rng,
            listening: false,
        }
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn board_size(&self) -> usize {
        usize::from(self.side).pow(2)
    }

    /// Side length of the board.
    #[must_use]
    pub const fn side(&self) -> u16 {
        self.side
    }

    /// Current session phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Misses recorded so far.
    #[must_use]
    pub const fn miss_count(&self) -> u32 {
        self.phase.miss_count()
    }

    /// Misses that end the session.
    #[must_use]
    pub const fn max_misses(&self) -> u32 {
        self.max_misses
    }

    /// Whether the session has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.phase.is_ended()
    }

    /// Whether the relocation timer is running.
    #[must_use]
    pub const fn is_timer_active(&self) -> bool {
        self.phase.timer_active()
    }

    /// Cell currently holding the target.
    #[must_use]
    pub const fn current_position(&self) -> Option<usize> {
        self.current_position
    }

    /// The board container, if one was resolved.
    #[must_use]
    pub const fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    /// Classify the element at a cell index.
    #[must_use]
    pub fn element_at(&self, index: usize) -> Element {
        self.container
            .as_ref()
            .map_or(Element::Outside, |c| c.element_at(index))
    }

    /// Drain signals dispatched on the container.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        self.container
            .as_mut()
            .map(Container::take_events)
            .unwrap_or_default()
    }

    /// Fill the container with cells and place the target at a random cell.
    ///
    /// Cells already in the container are discarded first. Drawing an
    /// already drawn board does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ContainerNotFound`] if no container was resolved
    /// and [`BoardError::InvalidBoardSize`] for a zero side length.
    pub fn draw_board(&mut self) -> Result<(), BoardError> {
        if self.container.is_none() {
            return Err(BoardError::ContainerNotFound {
                selector: self.selector.clone(),
            });
        }
        if self.side == 0 {
            return Err(BoardError::InvalidBoardSize(self.side));
        }
        if self.phase != Phase::Placing {
            debug!("board already drawn");
            return Ok(());
        }

        let board_size = self.board_size();
        if let Some(container) = self.container.as_mut() {
            if container.cell_count() > 0 {
                debug!(stale = container.cell_count(), "clearing pre-filled container");
                container.clear_cells();
            }
            for _ in 0..board_size {
                container.append_cell();
            }
        }

        let start = self.random_position();
        self.add_person_to_cell(start);
        self.phase = phase::on_drawn(self.phase);

        info!(cells = board_size, start, "board drawn");
        Ok(())
    }

    /// Start relocating the target every `interval`, counting from `now`.
    ///
    /// Returns `false` without touching the running timer if one is already
    /// active, or if the board has not been drawn.
    pub fn moving_person_through_the_cells(&mut self, interval: Duration, now: Instant) -> bool {
        match phase::on_timer_started(self.phase, Interval::start(interval, now)) {
            Some(next) => {
                self.phase = next;
                debug!(?interval, "relocation timer started");
                true
            }
            None => false,
        }
    }

    /// Fire the tick due at `now`, if any. Returns the number fired (0 or 1).
    ///
    /// Periods missed during a stall are dropped, not replayed.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while let Some(timer) = self.phase.timer_mut() {
            if !timer.poll(now) {
                break;
            }
            fired += 1;
            self.tick();
        }
        fired
    }

    /// Fire one relocation tick.
    pub fn tick(&mut self) -> Effect {
        let (next, effect) = phase::on_tick(self.phase, self.max_misses);
        self.phase = next;
        self.apply(effect);
        effect
    }

    /// Start accepting clicks. Returns `false` if already listening.
    pub fn init_events(&mut self) -> bool {
        !std::mem::replace(&mut self.listening, true)
    }

    /// Handle a click on `element`.
    ///
    /// A click on the target scores a point through `scores`; a click on an
    /// empty cell counts a miss. Clicks before [`BoardManager::init_events`]
    /// or after the session ended are ignored.
    pub fn click(&mut self, element: Element, scores: &mut impl Scoreboard) -> Effect {
        if !self.listening {
            return Effect::Nothing;
        }

        let (next, effect) = match element {
            Element::Target(index) => {
                if !self.phase_accepts_input() || !self.remove_person_from_cell(index) {
                    return Effect::Nothing;
                }
                phase::on_target_click(self.phase)
            }
            // Only a cell the container still reports as empty is a miss
            Element::Cell(index) => {
                if self.element_at(index) != Element::Cell(index) {
                    return Effect::Nothing;
                }
                phase::on_empty_click(self.phase, self.max_misses)
            }
            Element::Outside => return Effect::Nothing,
        };

        self.phase = next;
        if effect == Effect::Hit {
            let score = scores.score();
            if score == u32::MAX {
                warn!(score, "score saturated, hit not counted");
            }
            scores.set_score(score.saturating_add(1));
            self.current_position = None;
            debug!(score = scores.score(), "goblin hit");
        }
        self.apply(effect);
        effect
    }

    const fn phase_accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Relocate => self.relocate(),
            Effect::Missed => debug!(missed = self.miss_count(), "empty cell clicked"),
            Effect::GameOver { missed } => {
                info!(missed, "game over");
                if let Some(container) = self.container.as_mut() {
                    container.dispatch(BoardEvent::GameOver { missed });
                }
            }
            Effect::Hit | Effect::Nothing => {}
        }
    }

    fn relocate(&mut self) {
        if let Some(position) = self.current_position.take() {
            self.remove_person_from_cell(position);
        }
        let next = self.random_position();
        self.add_person_to_cell(next);
        debug!(position = next, missed = self.miss_count(), "goblin moved");
    }

    fn random_position(&mut self) -> usize {
        self.rng.below(self.board_size())
    }

    fn add_person_to_cell(&mut self, position: usize) {
        let placed = self
            .container
            .as_mut()
            .is_some_and(|c| c.place_target(position));
        if placed {
            self.current_position = Some(position);
        } else {
            warn!(position, "cell not found, target not placed");
        }
    }

    fn remove_person_from_cell(&mut self, position: usize) -> bool {
        self.container
            .as_mut()
            .is_some_and(|c| c.remove_target(position))
    }
}

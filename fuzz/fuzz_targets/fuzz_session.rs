#![no_main]

use arbitrary::Arbitrary;
use goblin_game::{BoardManager, Effect, Element, GameConfig, MemoryStore, Page, ScoreManager};
use libfuzzer_sys::fuzz_target;

/// One input to a running board.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Input {
    Tick,
    HitTarget,
    Click(u16),
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Board side (capped to keep boards small).
    side: u8,
    /// Miss limit (capped).
    max_misses: u8,
    /// Placement seed.
    seed: u64,
    /// Ticks and clicks in arrival order.
    inputs: Vec<Input>,
}

fuzz_target!(|input: SessionInput| {
    let side = u16::from(input.side % 16) + 1;
    let config = GameConfig {
        board_side: side,
        max_misses: u32::from(input.max_misses % 20) + 1,
        seed: Some(input.seed),
        ..GameConfig::default()
    };

    let mut board = BoardManager::new(&config, Page::standard().query(".board"));
    if board.draw_board().is_err() {
        return;
    }
    board.init_events();
    let mut scores = ScoreManager::new(MemoryStore::new());

    let mut last_misses = 0;
    let mut game_overs = 0;
    for step in input.inputs {
        let effect = match step {
            Input::Tick => board.tick(),
            Input::HitTarget => {
                let element = board
                    .current_position()
                    .map_or(Element::Outside, |p| board.element_at(p));
                board.click(element, &mut scores)
            }
            Input::Click(i) => {
                let element = board.element_at(usize::from(i));
                board.click(element, &mut scores)
            }
        };

        // Invariants
        assert!(board.miss_count() >= last_misses, "misses decreased");
        last_misses = board.miss_count();
        assert!(board.container().is_some_and(|c| c.target_count() <= 1));
        if matches!(effect, Effect::GameOver { .. }) {
            game_overs += 1;
        }
        assert!(game_overs <= 1, "game ended twice");
        assert_eq!(board.is_game_over(), last_misses >= board.max_misses());
    }
});

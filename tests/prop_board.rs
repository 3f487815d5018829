//! Property-based tests for board mechanics.
//!
//! Run with: cargo test --release prop_board

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use goblin_game::game::{SCORE_KEY, ScoreManager};
use goblin_game::{BoardManager, Element, GameConfig, KeyValueStore, MemoryStore, Page, Phase};

/// One input to a running board.
#[derive(Debug, Clone, Copy)]
enum Input {
    Tick,
    HitTarget,
    ClickCell(usize),
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        3 => Just(Input::Tick),
        2 => Just(Input::HitTarget),
        1 => (0usize..100).prop_map(Input::ClickCell),
    ]
}

fn drawn_board(side: u16, seed: u64) -> BoardManager {
    let config = GameConfig {
        board_side: side,
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut board = BoardManager::new(&config, Page::standard().query(".board"));
    board.draw_board().unwrap();
    board.init_events();
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Drawing creates side² cells with exactly one target.
    #[test]
    fn prop_draw_creates_square_board(side in 1u16..=24, seed in any::<u64>()) {
        let board = drawn_board(side, seed);
        let container = board.container().unwrap();

        prop_assert_eq!(container.cell_count(), usize::from(side) * usize::from(side));
        prop_assert_eq!(container.target_count(), 1);
        prop_assert_eq!(container.target_position(), board.current_position());
    }

    /// Misses never decrease and the game ends exactly once, at the limit.
    #[test]
    fn prop_misses_monotonic_single_game_over(
        side in 1u16..=6,
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..200)
    ) {
        let mut board = drawn_board(side, seed);
        let mut scores = ScoreManager::new(MemoryStore::new());
        let mut last_misses = 0;
        let mut game_overs = 0;

        for input in inputs {
            let was_ended = board.is_game_over();
            let effect = match input {
                Input::Tick => board.tick(),
                Input::HitTarget => {
                    let element = board
                        .current_position()
                        .map_or(Element::Outside, |p| board.element_at(p));
                    board.click(element, &mut scores)
                }
                Input::ClickCell(i) => {
                    let element = board.element_at(i % board.board_size());
                    board.click(element, &mut scores)
                }
            };

            let misses = board.miss_count();
            prop_assert!(misses >= last_misses);
            prop_assert!(misses <= board.max_misses());
            last_misses = misses;

            if let goblin_game::Effect::GameOver { missed } = effect {
                prop_assert!(!was_ended);
                prop_assert_eq!(missed, board.max_misses());
                game_overs += 1;
            }
            prop_assert_eq!(board.is_game_over(), misses >= board.max_misses());
            prop_assert!(board.container().unwrap().target_count() <= 1);
        }

        prop_assert!(game_overs <= 1);
        prop_assert_eq!(board.take_events().len(), game_overs);
    }

    /// A target click adds exactly one point; an empty-cell click adds a miss only.
    #[test]
    fn prop_click_accounting(side in 2u16..=8, seed in any::<u64>(), start in 0u32..1000) {
        let mut board = drawn_board(side, seed);
        let store = MemoryStore::new().with_entry(SCORE_KEY, start.to_string());
        let mut scores = ScoreManager::new(store);
        prop_assert_eq!(scores.score(), start);

        let target = board.current_position().unwrap();
        let empty = (0..board.board_size()).find(|&i| i != target).unwrap();

        board.click(board.element_at(empty), &mut scores);
        prop_assert_eq!(scores.score(), start);
        prop_assert_eq!(board.miss_count(), 1);

        board.click(board.element_at(target), &mut scores);
        prop_assert_eq!(scores.score(), start + 1);
        prop_assert_eq!(board.miss_count(), 1);
        prop_assert_eq!(board.container().unwrap().target_count(), 0);
        prop_assert!(matches!(board.phase(), Phase::Running(_)));
    }

    /// Any saved score comes back from a fresh manager.
    #[test]
    fn prop_score_roundtrip(value in any::<u32>()) {
        let mut scores = ScoreManager::new(MemoryStore::new());
        scores.set_score(value);

        let store = scores.into_store();
        prop_assert_eq!(store.get(SCORE_KEY).unwrap(), Some(value.to_string()));
        prop_assert_eq!(ScoreManager::new(store).score(), value);
    }
}

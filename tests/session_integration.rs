//! Multi-session integration tests.
//!
//! These drive a full game through the public API: clock, board, score
//! persistence on disk, game-over alert and restart.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use goblin_game::game::{AlertLog, ManualClock, SCORE_KEY};
use goblin_game::{
    Effect, Element, FileStore, GameConfig, GoblinGame, KeyValueStore, MemoryStore, Page,
    ScoreManager,
};

fn config(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

fn hit_target<S: KeyValueStore>(game: &mut GoblinGame<S, ManualClock>, alerts: &mut AlertLog) {
    let position = game.board().current_position().unwrap();
    let element = game.board().element_at(position);
    assert_eq!(game.click(element, alerts).unwrap(), Effect::Hit);
}

#[test]
fn test_score_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.json");
    let clock = ManualClock::new();
    let mut game = GoblinGame::with_clock(
        config(1),
        Page::standard(),
        FileStore::new(&path),
        clock.clone(),
    );
    game.init().unwrap();
    let mut alerts = AlertLog::new();

    // Three hits, each followed by a move
    for _ in 0..3 {
        hit_target(&mut game, &mut alerts);
        clock.advance(Duration::from_secs(1));
        game.advance(&mut alerts).unwrap();
    }
    assert_eq!(game.scores().score(), 3);
    assert_eq!(game.board().miss_count(), 0);

    // Idle until the game ends
    for _ in 0..4 {
        clock.advance(Duration::from_secs(1));
        assert_eq!(game.advance(&mut alerts).unwrap(), None);
    }
    clock.advance(Duration::from_secs(1));
    assert_eq!(game.advance(&mut alerts).unwrap(), Some(5));
    assert_eq!(alerts.messages().len(), 1);
    assert_eq!(game.sessions_started(), 2);
    assert_eq!(game.scores().score(), 3);

    // A separate process sees the same score
    let reopened = ScoreManager::new(FileStore::new(&path));
    assert_eq!(reopened.score(), 3);
}

#[test]
fn test_persisted_seven_is_restored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.json");
    FileStore::new(&path).set(SCORE_KEY, "7").unwrap();

    let mut game = GoblinGame::with_clock(
        config(2),
        Page::standard(),
        FileStore::new(&path),
        ManualClock::new(),
    );
    game.init().unwrap();
    assert_eq!(game.scores().score(), 7);
    assert_eq!(game.scores().display().unwrap().text(), "Score: 7");
}

#[test]
fn test_corrupt_persisted_score_reads_zero() {
    let store = MemoryStore::new().with_entry(SCORE_KEY, "abc");
    let game = GoblinGame::with_clock(config(3), Page::standard(), store, ManualClock::new());
    assert_eq!(game.scores().score(), 0);
}

#[test]
fn test_empty_cell_clicks_end_game_between_ticks() {
    let clock = ManualClock::new();
    let mut game = GoblinGame::with_clock(config(4), Page::standard(), MemoryStore::new(), clock);
    game.init().unwrap();
    let mut alerts = AlertLog::new();

    let mut outcomes = Vec::new();
    for _ in 0..5 {
        let target = game.board().current_position();
        let empty = (0..game.board().board_size())
            .find(|&i| Some(i) != target)
            .unwrap();
        outcomes.push(game.click(game.board().element_at(empty), &mut alerts).unwrap());
    }

    assert_eq!(outcomes[..4], [Effect::Missed; 4]);
    assert_eq!(outcomes[4], Effect::GameOver { missed: 5 });
    assert_eq!(alerts.messages(), ["Game over! You missed 5 goblins."]);
    assert_eq!(game.board().miss_count(), 0);
    assert_eq!(game.scores().score(), 0);
}

#[test]
fn test_outside_clicks_change_nothing() {
    let mut game = GoblinGame::with_clock(
        config(5),
        Page::standard(),
        MemoryStore::new(),
        ManualClock::new(),
    );
    game.init().unwrap();
    let mut alerts = AlertLog::new();

    assert_eq!(game.click(Element::Outside, &mut alerts).unwrap(), Effect::Nothing);
    assert_eq!(game.board().miss_count(), 0);
    assert_eq!(game.scores().score(), 0);
}

#[test]
fn test_custom_selector_and_size() {
    let config = GameConfig {
        board_side: 6,
        board_selector: "#arena".to_string(),
        ..config(6)
    };
    let page = Page::new().with_mount("#arena");
    let mut game = GoblinGame::with_clock(config, page, MemoryStore::new(), ManualClock::new());
    game.init().unwrap();

    let container = game.board().container().unwrap();
    assert_eq!(container.selector(), "#arena");
    assert_eq!(container.cell_count(), 36);
    assert_eq!(container.target_count(), 1);
}

#[test]
fn test_many_sessions_no_panic() {
    let clock = ManualClock::new();
    let mut game =
        GoblinGame::with_clock(config(7), Page::standard(), MemoryStore::new(), clock.clone());
    game.init().unwrap();
    let mut alerts = AlertLog::new();

    for step in 0..500u32 {
        if step % 3 == 0 {
            hit_target(&mut game, &mut alerts);
        }
        clock.advance(Duration::from_millis(700));
        game.advance(&mut alerts).unwrap();
        assert!(game.board().container().unwrap().target_count() <= 1);
    }

    assert!(game.sessions_started() > 1);
    assert_eq!(alerts.messages().len(), game.sessions_started() as usize - 1);
}

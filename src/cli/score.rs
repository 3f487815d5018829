//! Score command implementation.

use super::CliError;
use goblin_game::{FileStore, ScoreManager};
use std::path::Path;

/// Execute the score command.
///
/// # Errors
///
/// Returns an error if a requested reset could not be persisted.
pub(crate) fn execute(store: &Path, reset: bool) -> Result<(), CliError> {
    let mut scores = ScoreManager::new(FileStore::new(store));

    if reset {
        scores.reset();
        // The manager swallows write failures, so confirm from disk
        if ScoreManager::new(FileStore::new(store)).score() != 0 {
            return Err(CliError::new(format!(
                "Failed to reset score in {}",
                store.display()
            )));
        }
        println!("Score reset ({})", store.display());
    }

    println!("Score: {}", scores.score());
    Ok(())
}

//! Shared helpers for integration tests.

use foreman_core::{params::CreateJob, Board, JsonStore};
use tempfile::TempDir;

/// A board backed by a document inside a temporary directory. The
/// directory guard must stay alive for as long as the board is used.
pub fn test_board() -> (Board, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let store = JsonStore::new(dir.path().join("board.json"));
    let board = Board::open(store).expect("open board");
    (board, dir)
}

/// Reopen a board over the same document, simulating a fresh run.
pub fn reopen(dir: &TempDir) -> Board {
    let store = JsonStore::new(dir.path().join("board.json"));
    Board::open(store).expect("reopen board")
}

/// Minimal valid creation parameters.
pub fn job_params(name: &str, address: &str) -> CreateJob {
    CreateJob {
        name: name.to_string(),
        address: address.to_string(),
        ..CreateJob::default()
    }
}

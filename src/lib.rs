// Library exports for the 2048 engine
// The harness binary, the replay tool and the integration tests all build on these

pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod replay;
pub mod rules;
pub mod search;
pub mod spawner;
pub mod types;

pub use engine::{apply_move, apply_player_move, MoveOutcome};
pub use error::GameError;
pub use game::Game;
pub use rules::{is_game_over, is_game_won};
pub use search::{best_auto_move, Searcher};
pub use spawner::{new_game, spawn_tile};
pub use types::{Board, Direction, GameStatus};

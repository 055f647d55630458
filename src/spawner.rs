// Tile spawner: drops a new 2 or 4 into a random empty cell
//
// All randomness in the crate flows through the RNG handed to these
// functions, so a seeded `StdRng` makes whole games reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Board;

/// Standard chance of spawning a 4 instead of a 2
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Number of tiles on a freshly started board
pub const INITIAL_TILES: usize = 2;

/// Creates the deterministic RNG used for a given game seed
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Places one tile using the standard 90% / 10% split
///
/// A full board is returned unchanged.
pub fn spawn_tile<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    spawn_tile_with(board, rng, DEFAULT_FOUR_PROBABILITY)
}

/// Places one tile: uniform over empty cells, 4 with `four_probability`, else 2
pub fn spawn_tile_with<R: Rng + ?Sized>(board: &Board, rng: &mut R, four_probability: f64) -> Board {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return *board;
    }

    let coord = empty[rng.random_range(0..empty.len())];
    let value = if rng.random_bool(four_probability.clamp(0.0, 1.0)) {
        4
    } else {
        2
    };
    board.with_tile(coord, value)
}

/// Empty grid plus the two opening tiles
pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Board {
    new_game_with(rng, DEFAULT_FOUR_PROBABILITY, INITIAL_TILES)
}

pub fn new_game_with<R: Rng + ?Sized>(rng: &mut R, four_probability: f64, tiles: usize) -> Board {
    (0..tiles).fold(Board::EMPTY, |board, _| {
        spawn_tile_with(&board, rng, four_probability)
    })
}

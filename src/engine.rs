// Move engine: slides and merges tiles for one swipe
//
// Left is the canonical move. The other three are derived from it:
//   Right = reverse rows, Left, reverse rows
//   Up    = transpose, Left, transpose
//   Down  = transpose, Right, transpose

use crate::types::{Board, Direction, Line, BOARD_SIZE};

/// Result of applying one swipe to a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the swipe (equal to the input when `moved` is false)
    pub board: Board,
    /// True iff at least one tile changed position or value
    pub moved: bool,
    /// Sum of the tiles produced by merges during this swipe
    pub merged_value: u64,
}

/// Compacts and merges one line toward index 0
///
/// Merging is a single left-to-right pass: a tile produced by a merge is
/// never merged again in the same swipe, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`.
///
/// # Returns
/// * `(Line, u64)` - the new line and the sum of merged tiles
pub fn merge_line(line: Line) -> (Line, u64) {
    let mut compact = [0u32; BOARD_SIZE];
    let mut len = 0;
    for &tile in line.iter().filter(|&&v| v != 0) {
        compact[len] = tile;
        len += 1;
    }

    let mut out = [0u32; BOARD_SIZE];
    let mut merged_value = 0u64;
    let mut write = 0;
    let mut i = 0;
    while i < len {
        if i + 1 < len && compact[i] == compact[i + 1] {
            let merged = compact[i] * 2;
            out[write] = merged;
            merged_value += u64::from(merged);
            i += 2;
        } else {
            out[write] = compact[i];
            i += 1;
        }
        write += 1;
    }

    (out, merged_value)
}

fn shift_left(board: &Board) -> MoveOutcome {
    let mut next = Board::EMPTY;
    let mut moved = false;
    let mut merged_value = 0;

    for (row, line) in board.cells.iter().enumerate() {
        let (new_line, merged) = merge_line(*line);
        if new_line != *line {
            moved = true;
        }
        merged_value += merged;
        next.cells[row] = new_line;
    }

    MoveOutcome {
        board: next,
        moved,
        merged_value,
    }
}

fn map_board(outcome: MoveOutcome, f: impl Fn(&Board) -> Board) -> MoveOutcome {
    MoveOutcome {
        board: f(&outcome.board),
        ..outcome
    }
}

/// Applies a swipe, returning a fresh board plus the moved flag
///
/// The input board is never modified, which lets the search explore many
/// hypothetical swipes from the same position.
pub fn apply_move(board: &Board, direction: Direction) -> MoveOutcome {
    let outcome = match direction {
        Direction::Left => shift_left(board),
        Direction::Right => map_board(shift_left(&board.reverse_rows()), Board::reverse_rows),
        Direction::Up => map_board(shift_left(&board.transpose()), Board::transpose),
        Direction::Down => map_board(
            shift_left(&board.transpose().reverse_rows()),
            |b| b.reverse_rows().transpose(),
        ),
    };

    if outcome.moved {
        outcome
    } else {
        MoveOutcome {
            board: *board,
            moved: false,
            merged_value: 0,
        }
    }
}

/// Convenience wrapper returning `(board, moved)`
pub fn apply_player_move(board: &Board, direction: Direction) -> (Board, bool) {
    let outcome = apply_move(board, direction);
    (outcome.board, outcome.moved)
}

/// Directions that would change the board
pub fn legal_moves(board: &Board) -> Vec<Direction> {
    Direction::all()
        .iter()
        .copied()
        .filter(|&dir| apply_move(board, dir).moved)
        .collect()
}

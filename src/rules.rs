// Terminal-state detection

use crate::types::{Board, GameStatus, BOARD_SIZE};

/// Tile value that counts as a win
pub const WIN_TILE: u32 = 2048;

/// True iff the board is full and no two neighbours are equal
///
/// This grid scan is the reference rule. It agrees with "no direction moves
/// the board", which `engine::legal_moves` can confirm.
pub fn is_game_over(board: &Board) -> bool {
    let cells = &board.cells;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let value = cells[row][col];
            if value == 0 {
                return false;
            }
            if row + 1 < BOARD_SIZE && value == cells[row + 1][col] {
                return false;
            }
            if col + 1 < BOARD_SIZE && value == cells[row][col + 1] {
                return false;
            }
        }
    }
    true
}

/// True iff some cell holds exactly 2048
pub fn is_game_won(board: &Board) -> bool {
    board
        .cells
        .iter()
        .flat_map(|line| line.iter())
        .any(|&v| v == WIN_TILE)
}

/// Game-over takes precedence over a win
pub fn status(board: &Board) -> GameStatus {
    if is_game_over(board) {
        GameStatus::Over
    } else if is_game_won(board) {
        GameStatus::Won
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::legal_moves;

    fn stuck() -> Board {
        Board {
            cells: [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
        }
    }

    #[test]
    fn test_checkerboard_is_game_over() {
        assert!(is_game_over(&stuck()));
        assert!(legal_moves(&stuck()).is_empty());
    }

    #[test]
    fn test_one_empty_cell_is_not_over() {
        let mut board = stuck();
        board.cells[2][1] = 0;
        assert!(!is_game_over(&board));
        assert!(!legal_moves(&board).is_empty());
    }

    #[test]
    fn test_full_board_with_vertical_pair_is_not_over() {
        let mut board = stuck();
        board.cells[3][3] = 4;
        assert!(!is_game_over(&board));
    }

    #[test]
    fn test_empty_board_is_not_over() {
        assert!(!is_game_over(&Board::EMPTY));
    }

    #[test]
    fn test_win_requires_exact_2048() {
        let mut board = Board::EMPTY;
        board.cells[1][2] = 2048;
        assert!(is_game_won(&board));

        let mut bigger = Board::EMPTY;
        bigger.cells[0][0] = 4096;
        assert!(!is_game_won(&bigger));
    }

    #[test]
    fn test_status_prefers_over() {
        let mut board = stuck();
        board.cells[0][0] = 2048;
        assert_eq!(status(&board), GameStatus::Over);
        board.cells[1][1] = 0;
        assert_eq!(status(&board), GameStatus::Won);
        assert_eq!(status(&Board::EMPTY), GameStatus::InProgress);
    }
}

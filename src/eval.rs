// Leaf evaluation for the autoplay search

use crate::types::Board;

/// log2 of the highest tile, 0.0 for an empty board
///
/// Deliberately crude: only the biggest tile matters. No empty-cell,
/// monotonicity or merge-potential terms.
pub fn evaluate(board: &Board) -> f64 {
    let max_tile = board.max_tile();
    if max_tile == 0 {
        0.0
    } else {
        f64::from(max_tile).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(evaluate(&Board::EMPTY), 0.0);
    }

    #[test]
    fn test_score_is_log2_of_max_tile() {
        let board = Board {
            cells: [[2, 4, 0, 0], [0, 256, 0, 0], [0; 4], [8, 0, 0, 0]],
        };
        assert_eq!(evaluate(&board), 8.0);

        let single = Board {
            cells: [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
        };
        assert_eq!(evaluate(&single), 1.0);
    }
}

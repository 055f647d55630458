// Core game types: the 4x4 tile grid and the four swipe directions

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// Side length of the square grid
pub const BOARD_SIZE: usize = 4;

/// A single row (or column, after transposition) of tiles
pub type Line = [u32; BOARD_SIZE];

/// Largest tile a 4x4 game can build; two of them still merge within `u32`
pub const MAX_TILE: u32 = 1 << 17;

/// 4x4 grid of tile values, row 0 at the top
///
/// 0 marks an empty cell; every other value is a power of two between 2
/// and [`MAX_TILE`]. Boards are plain values: engine operations return new
/// boards and never mutate the one they were given. On the wire a board is
/// a bare 4x4 array, checked through [`Board::from_rows`] when read back.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "[Line; BOARD_SIZE]", into = "[Line; BOARD_SIZE]")]
pub struct Board {
    pub cells: [Line; BOARD_SIZE],
}

/// Grid position of a cell
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Board {
    /// A board with every cell empty
    pub const EMPTY: Board = Board {
        cells: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Builds a board from rows, rejecting values that are not a tile
    ///
    /// # Returns
    /// * `Err(GameError::InvalidTile)` naming the first offending cell
    pub fn from_rows(rows: [Line; BOARD_SIZE]) -> Result<Self, GameError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(GameError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Board { cells: rows })
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> u32 {
        self.cells[coord.row][coord.col]
    }

    /// Returns a copy with one cell replaced
    #[inline]
    pub fn with_tile(mut self, coord: Coord, value: u32) -> Self {
        self.cells[coord.row][coord.col] = value;
        self
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.cells[row][col] == 0 {
                    out.push(Coord { row, col });
                }
            }
        }
        out
    }

    pub fn count_empty(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|line| line.iter())
            .filter(|&&v| v == 0)
            .count()
    }

    /// Highest tile on the board, 0 when empty
    pub fn max_tile(&self) -> u32 {
        self.cells
            .iter()
            .flat_map(|line| line.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells
            .iter()
            .flat_map(|line| line.iter())
            .map(|&v| u64::from(v))
            .sum()
    }

    /// Swaps rows and columns
    pub fn transpose(&self) -> Self {
        let mut out = Board::EMPTY;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                out.cells[col][row] = self.cells[row][col];
            }
        }
        out
    }

    /// Mirrors every row left-to-right
    pub fn reverse_rows(&self) -> Self {
        let mut out = *self;
        for line in out.cells.iter_mut() {
            line.reverse();
        }
        out
    }
}

/// True for 0 (empty) and powers of two from 2 up to [`MAX_TILE`]
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

impl TryFrom<[Line; BOARD_SIZE]> for Board {
    type Error = GameError;

    fn try_from(rows: [Line; BOARD_SIZE]) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for [Line; BOARD_SIZE] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl fmt::Display for Board {
    /// Grid of integers, one row per line, columns right-aligned
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            let row: Vec<String> = line.iter().map(|v| format!("{:>5}", v)).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// The four swipe directions
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in the order the search tries them
    pub fn all() -> [Direction; 4] {
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
    }

    /// Lowercase name used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(GameError::InvalidInput(s.to_string())),
        }
    }
}

/// Outcome of the game from the board alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Over,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Over => "over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_non_power_of_two() {
        let err = Board::from_rows([[2, 0, 0, 0], [0, 3, 0, 0], [0; 4], [0; 4]]).unwrap_err();
        match err {
            GameError::InvalidTile { row, col, value } => {
                assert_eq!((row, col, value), (1, 1, 3));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
        assert!(Board::from_rows([[2, 4, 8, 2048], [0; 4], [0; 4], [0; 4]]).is_ok());
    }

    #[test]
    fn test_tile_ceiling() {
        assert!(is_valid_tile(MAX_TILE));
        assert!(!is_valid_tile(MAX_TILE * 2));
        assert!(!is_valid_tile(1 << 31));
        assert!(Board::from_rows([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let board = Board {
            cells: [[2, 4, 8, 16], [32, 64, 128, 256], [0, 2, 0, 4], [8, 0, 0, 2]],
        };
        assert_eq!(board.transpose().transpose(), board);
        assert_eq!(board.transpose().cells[0], [2, 32, 0, 8]);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board {
            cells: [[2, 0, 2, 2], [2, 2, 2, 2], [2, 2, 2, 2], [0, 2, 2, 2]],
        };
        assert_eq!(
            board.empty_cells(),
            vec![Coord { row: 0, col: 1 }, Coord { row: 3, col: 0 }]
        );
        assert_eq!(board.count_empty(), 2);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("R".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!(" Up ".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("d".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_board_serializes_as_nested_array() {
        let board = Board {
            cells: [[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]],
        };
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_deserialize_rejects_invalid_tiles() {
        assert!(serde_json::from_str::<Board>("[[3,3,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
        assert!(serde_json::from_str::<Board>(
            "[[2147483648,2147483648,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]"
        )
        .is_err());
    }
}

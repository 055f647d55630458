// Debug logging module for per-turn game state logging
//
// Each applied move is appended to a JSONL file. The replay tool reads the
// same format back to re-run the autoplayer on recorded positions.

use log::error;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::types::{Board, Direction};

/// A single line of the debug log
///
/// `board` is the position the move was chosen from, before the swipe.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogEntry {
    pub turn: u32,
    pub chosen_move: String,
    pub board: Board,
    #[serde(default)]
    pub score: u64,
    pub timestamp: String,
}

/// Append-only JSONL writer; a disabled logger ignores every call
pub struct DebugLogger {
    file: Option<File>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger { file: Some(file) }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Appends one move; write failures are logged and otherwise ignored
    pub fn log_move(&mut self, turn: u32, board: Board, chosen_move: Direction, score: u64) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = LogEntry {
            turn,
            chosen_move: chosen_move.as_str().to_string(),
            board,
            score,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line) {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let mut logger = DebugLogger::disabled();
        assert!(!logger.is_enabled());
        logger.log_move(0, Board::EMPTY, Direction::Left, 0);
    }

    #[test]
    fn test_logged_lines_parse_back() {
        let path = std::env::temp_dir().join(format!("auto2048_debug_{}.jsonl", std::process::id()));
        let path_str = path.to_str().expect("temp path is utf-8");

        let board = Board {
            cells: [[2, 2, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]],
        };
        {
            let mut logger = DebugLogger::new(true, path_str);
            assert!(logger.is_enabled());
            logger.log_move(0, board, Direction::Left, 0);
            logger.log_move(1, board, Direction::Down, 4);
        }

        let contents = fs::read_to_string(&path).expect("log file exists");
        let entries: Vec<LogEntry> = contents
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid JSON line"))
            .collect();
        fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].chosen_move, "left");
        assert_eq!(entries[1].turn, 1);
        assert_eq!(entries[1].score, 4);
        assert_eq!(entries[1].board, board);
    }
}

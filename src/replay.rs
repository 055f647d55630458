// Replay module for re-running the autoplayer on logged positions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the search on each logged board
// 3. Compare logged vs recomputed moves
// 4. Generate summary reports

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::debug_logger::LogEntry;
use crate::error::GameError;
use crate::search::Searcher;
use crate::types::{Board, Direction};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub original_move: Direction,
    /// `None` if the logged board turned out to be stuck
    pub replayed_move: Option<Direction>,
    pub matches: bool,
    pub replayed_score: f64,
    pub search_depth: u8,
    pub nodes: u64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

fn move_name(dir: Option<Direction>) -> &'static str {
    dir.map_or("none", |d| d.as_str())
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, GameError> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| GameError::Log(format!("Failed to open log file: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|e| GameError::Log(format!("Failed to read line {}: {}", line_num + 1, e)))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                GameError::Log(format!("Failed to parse JSON on line {}: {}", line_num + 1, e))
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Runs the configured search on one board
    pub fn replay_turn(&self, board: &Board) -> (Option<Direction>, f64, u8, u64, u128) {
        let mut searcher = Searcher::from_config(&self.config.search);
        let result = searcher.search_root(board);
        (
            result.best_move,
            result.score,
            result.depth,
            result.stats.nodes,
            result.stats.elapsed_ms,
        )
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, GameError> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move: Direction = entry.chosen_move.parse()?;
        let (replayed_move, replayed_score, search_depth, nodes, computation_time) =
            self.replay_turn(&entry.board);

        let matches = replayed_move == Some(original_move);

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches,
            replayed_score,
            search_depth,
            nodes,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (score: {:.2}, depth: {}, nodes: {}, time: {}ms)",
                    entry.turn,
                    original_move.as_str(),
                    replayed_score,
                    search_depth,
                    nodes,
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (score: {:.2}, depth: {}, time: {}ms)",
                    entry.turn,
                    original_move.as_str(),
                    move_name(replayed_move),
                    replayed_score,
                    search_depth,
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, GameError> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| GameError::Log(format!("Turn {} not found in log file", turn_num)))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;

            println!("Search Depth:               {}", self.config.search.depth);
            println!("Average Nodes:              {:.1}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (score: {:.2}, depth: {}, time: {}ms)",
                    result.turn,
                    result.original_move.as_str(),
                    move_name(result.replayed_move),
                    result.replayed_score,
                    result.search_depth,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were logged
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), GameError> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| GameError::Log(format!("Turn {} not found in log", turn)))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(GameError::Log(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                )));
            }
        }

        Ok(())
    }
}

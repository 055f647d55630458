//! Alpha-beta search over the swipe/spawn game tree
//!
//! Autoplay is modelled as a two-player game:
//!
//! - the **player** ply maximizes over the four swipe directions, skipping
//!   swipes that leave the board unchanged
//! - the **spawn** ply minimizes over every empty cell × {2, 4}
//!
//! Spawns are treated as a worst-case adversary rather than weighted by
//! their 90% / 10% odds. Leaves are scored with [`evaluate`].
//!
//! Recursion depth is bounded by the `u8` depth budget. An optional node
//! budget turns every node past the limit into a leaf, which caps the cost
//! of deep searches on open boards (4 directions × up to 30 placements per
//! round) without introducing any nondeterminism.
//!
//! # Example
//!
//! ```
//! use auto_2048::search::Searcher;
//! use auto_2048::types::{Board, Direction};
//!
//! let board = Board { cells: [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]] };
//! let mut searcher = Searcher::new(3);
//! let result = searcher.search_root(&board);
//! assert!(result.best_move.is_some());
//! assert_ne!(result.best_move, Some(Direction::Up));
//! ```

use log::debug;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::engine::apply_move;
use crate::eval::evaluate;
use crate::rules::is_game_over;
use crate::types::{Board, Direction};

/// Tile values the spawn ply may place, in the order they are tried
const SPAWN_VALUES: [u32; 2] = [2, 4];

/// Counters from the most recent root search
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes entered, root children included
    pub nodes: u64,
    /// Alpha-beta cutoffs taken
    pub cutoffs: u64,
    /// True if the node budget turned interior nodes into leaves
    pub budget_exhausted: bool,
    /// Wall-clock time of the root search
    pub elapsed_ms: u128,
}

/// Best root move plus its backed-up score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// `None` when no swipe changes the board
    pub best_move: Option<Direction>,
    /// Score of `best_move`, or the static evaluation when there is none
    pub score: f64,
    pub depth: u8,
    pub stats: SearchStats,
}

/// Depth-limited alpha-beta searcher
///
/// Holds only configuration and per-search counters; boards are passed in by
/// reference and copied before any hypothetical move is applied.
#[derive(Debug, Clone)]
pub struct Searcher {
    depth: u8,
    node_budget: Option<u64>,
    stats: SearchStats,
}

impl Searcher {
    /// Creates a searcher with no node budget
    pub fn new(depth: u8) -> Self {
        Searcher {
            depth,
            node_budget: None,
            stats: SearchStats::default(),
        }
    }

    /// Creates a searcher from the `[search]` config table
    pub fn from_config(config: &SearchConfig) -> Self {
        Searcher::new(config.depth).with_node_budget(config.node_budget)
    }

    /// Limits the number of nodes per root search; 0 means unlimited
    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = if budget == 0 { None } else { Some(budget) };
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    /// Statistics collected by the last call to [`Self::search_root`]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Best swipe for the player, or `None` when the board is stuck
    pub fn best_move(&mut self, board: &Board) -> Option<Direction> {
        self.search_root(board).best_move
    }

    /// Root of the search
    ///
    /// Each productive swipe is scored by the spawn ply one level down. The
    /// first strictly higher score wins, so ties keep the earlier direction
    /// in `Direction::all()` order.
    pub fn search_root(&mut self, board: &Board) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        let depth = self.depth.max(1);

        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;

        for &dir in Direction::all().iter() {
            let outcome = apply_move(board, dir);
            if !outcome.moved {
                continue;
            }
            let score = self.search(
                &outcome.board,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
            );
            debug!("root {}: score {:.3}", dir.as_str(), score);
            if score > best_score {
                best_score = score;
                best_move = Some(dir);
            }
        }

        if best_move.is_none() {
            best_score = evaluate(board);
        }

        self.stats.elapsed_ms = start.elapsed().as_millis();
        debug!(
            "search depth {}: best {:?} score {:.3} nodes {} cutoffs {}{}",
            depth,
            best_move.map(|d| d.as_str()),
            best_score,
            self.stats.nodes,
            self.stats.cutoffs,
            if self.stats.budget_exhausted {
                " (node budget exhausted)"
            } else {
                ""
            }
        );

        SearchResult {
            best_move,
            score: best_score,
            depth,
            stats: self.stats,
        }
    }

    /// Alpha-beta value of `board` with `depth` plies remaining
    ///
    /// `maximizing` selects the player ply; otherwise the spawn ply.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.stats.nodes += 1;

        if depth == 0 || is_game_over(board) {
            return evaluate(board);
        }

        if let Some(budget) = self.node_budget {
            if self.stats.nodes > budget {
                self.stats.budget_exhausted = true;
                return evaluate(board);
            }
        }

        if maximizing {
            let mut value = f64::NEG_INFINITY;
            let mut any_moved = false;

            for &dir in Direction::all().iter() {
                let outcome = apply_move(board, dir);
                if !outcome.moved {
                    continue;
                }
                any_moved = true;
                value = value.max(self.search(&outcome.board, depth - 1, alpha, beta, false));
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }

            if any_moved {
                value
            } else {
                evaluate(board)
            }
        } else {
            let empty = board.empty_cells();
            if empty.is_empty() {
                return evaluate(board);
            }

            let mut value = f64::INFINITY;
            'cells: for &coord in &empty {
                for &tile in SPAWN_VALUES.iter() {
                    let child = board.with_tile(coord, tile);
                    value = value.min(self.search(&child, depth - 1, alpha, beta, true));
                    beta = beta.min(value);
                    if beta <= alpha {
                        self.stats.cutoffs += 1;
                        break 'cells;
                    }
                }
            }
            value
        }
    }
}

/// Best swipe at `depth` with no node budget
pub fn best_auto_move(board: &Board, depth: u8) -> Option<Direction> {
    Searcher::new(depth).best_move(board)
}

/// Stand-alone alpha-beta value of a position
pub fn search(board: &Board, depth: u8, alpha: f64, beta: f64, maximizing: bool) -> f64 {
    Searcher::new(depth).search(board, depth, alpha, beta, maximizing)
}

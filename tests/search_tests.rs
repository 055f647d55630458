//! Autoplay search behaviour through the public API

use auto_2048::engine::{apply_move, legal_moves};
use auto_2048::eval::evaluate;
use auto_2048::rules::is_game_over;
use auto_2048::search::{best_auto_move, search, Searcher};
use auto_2048::spawner::{new_game, seeded_rng, spawn_tile};
use auto_2048::types::{Board, Direction};

/// Plain minimax over the same plies, with no window and no cutoffs
fn minimax(board: &Board, depth: u8, maximizing: bool) -> f64 {
    if depth == 0 || is_game_over(board) {
        return evaluate(board);
    }
    if maximizing {
        let children: Vec<Board> = legal_moves(board)
            .into_iter()
            .map(|dir| apply_move(board, dir).board)
            .collect();
        if children.is_empty() {
            return evaluate(board);
        }
        children
            .iter()
            .map(|child| minimax(child, depth - 1, false))
            .fold(f64::NEG_INFINITY, f64::max)
    } else {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return evaluate(board);
        }
        let mut value = f64::INFINITY;
        for coord in empty {
            for &tile in [2u32, 4].iter() {
                value = value.min(minimax(&board.with_tile(coord, tile), depth - 1, true));
            }
        }
        value
    }
}

/// Root choice under plain minimax: first strictly higher score wins
fn minimax_root(board: &Board, depth: u8) -> (Option<Direction>, f64) {
    let mut best = (None, f64::NEG_INFINITY);
    for &dir in Direction::all().iter() {
        let outcome = apply_move(board, dir);
        if !outcome.moved {
            continue;
        }
        let score = minimax(&outcome.board, depth - 1, false);
        if score > best.1 {
            best = (Some(dir), score);
        }
    }
    if best.0.is_none() {
        best.1 = evaluate(board);
    }
    best
}

/// Positions reached by cycling productive moves from seeded starts
fn played_positions() -> Vec<Board> {
    let mut boards = Vec::new();
    for seed in 0..6u64 {
        let mut rng = seeded_rng(seed);
        let mut board = new_game(&mut rng);
        for step in 0..40usize {
            if step % 8 == 0 {
                boards.push(board);
            }
            let moves = legal_moves(&board);
            if moves.is_empty() {
                break;
            }
            let dir = moves[step % moves.len()];
            board = spawn_tile(&apply_move(&board, dir).board, &mut rng);
        }
    }
    boards
}

#[test]
fn test_best_auto_move_never_returns_unproductive_direction() {
    for seed in 0..10u64 {
        let mut rng = seeded_rng(seed);
        let mut board = new_game(&mut rng);
        for _ in 0..25 {
            let dir = match best_auto_move(&board, 2) {
                Some(dir) => dir,
                None => {
                    assert!(legal_moves(&board).is_empty());
                    break;
                }
            };
            let outcome = apply_move(&board, dir);
            assert!(outcome.moved, "search picked a no-op {:?} on\n{}", dir, board);
            board = spawn_tile(&outcome.board, &mut rng);
        }
    }
}

#[test]
fn test_only_productive_direction_is_chosen() {
    // Left, Up and Down leave this board unchanged
    let board = Board {
        cells: [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]],
    };
    assert_eq!(legal_moves(&board), vec![Direction::Right, Direction::Down]);
    let best = best_auto_move(&board, 3).expect("a move exists");
    assert!(best == Direction::Right || best == Direction::Down);
}

#[test]
fn test_empty_board_has_no_move() {
    assert_eq!(best_auto_move(&Board::EMPTY, 3), None);
    assert_eq!(search(&Board::EMPTY, 3, f64::NEG_INFINITY, f64::INFINITY, true), 0.0);
}

#[test]
fn test_full_board_spawn_ply_falls_back_to_evaluation() {
    let full = Board {
        cells: [[2, 2, 4, 8], [16, 32, 64, 128], [2, 4, 8, 16], [32, 64, 128, 256]],
    };
    assert_eq!(search(&full, 2, f64::NEG_INFINITY, f64::INFINITY, false), 8.0);
}

#[test]
fn test_same_board_same_answer_across_searchers() {
    let mut rng = seeded_rng(2024);
    let mut board = new_game(&mut rng);
    for _ in 0..8 {
        let dir = legal_moves(&board)[0];
        board = spawn_tile(&apply_move(&board, dir).board, &mut rng);
    }

    let mut a = Searcher::new(3);
    let mut b = Searcher::new(3);
    let ra = a.search_root(&board);
    let rb = b.search_root(&board);
    assert_eq!(ra.best_move, rb.best_move);
    assert_eq!(ra.score, rb.score);
    assert_eq!(a.last_stats().nodes, b.last_stats().nodes);
}

#[test]
fn test_deeper_search_visits_more_nodes() {
    let board = Board {
        cells: [[2, 0, 0, 2], [0, 4, 0, 0], [0, 0, 0, 0], [8, 0, 0, 0]],
    };
    let shallow = Searcher::new(1).search_root(&board).stats.nodes;
    let deep = Searcher::new(3).search_root(&board).stats.nodes;
    assert!(deep > shallow);
}

#[test]
fn test_pruned_search_matches_plain_minimax() {
    let boards = played_positions();
    assert!(boards.len() >= 20);

    for board in boards {
        let mut searcher = Searcher::new(3);
        let result = searcher.search_root(&board);
        let (expected_move, expected_score) = minimax_root(&board, 3);

        assert_eq!(result.best_move, expected_move, "move differs on\n{}", board);
        assert_eq!(result.score, expected_score, "score differs on\n{}", board);
        assert_eq!(
            search(&board, 3, f64::NEG_INFINITY, f64::INFINITY, true),
            minimax(&board, 3, true),
            "value differs on\n{}",
            board
        );
    }
}

#[test]
fn test_pruning_skips_nodes_without_changing_the_answer() {
    let board = Board {
        cells: [[2, 0, 0, 2], [0, 4, 0, 0], [0, 0, 0, 0], [8, 0, 0, 0]],
    };
    let mut searcher = Searcher::new(3);
    let result = searcher.search_root(&board);
    assert!(searcher.last_stats().cutoffs > 0);
    assert_eq!((result.best_move, result.score), minimax_root(&board, 3));
}

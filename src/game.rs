// Game loop: owns the authoritative board and drives one turn at a time
//
// A turn is: pick a direction (player input or autoplay search), swipe,
// spawn a tile if the swipe changed anything, then report the new status.
// Presentation stays outside the crate behind the Renderer / InputSource
// traits; plain-text implementations of both are provided for terminals
// and tests.

use log::{error, info, warn};
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine::apply_move;
use crate::error::GameError;
use crate::rules::{is_game_over, is_game_won, status};
use crate::search::Searcher;
use crate::spawner::{new_game_with, seeded_rng, spawn_tile_with};
use crate::types::{Board, Direction, GameStatus};

/// Display sink for the current position
pub trait Renderer {
    fn render(&mut self, board: &Board, status: GameStatus, score: u64);
}

/// Source of player commands, one token per call; `None` ends the session
pub trait InputSource {
    fn next_input(&mut self) -> Option<String>;
}

/// Writes the board as a grid of integers followed by status and score
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, board: &Board, status: GameStatus, score: u64) -> io::Result<()> {
        write!(self.out, "{}", board)?;
        writeln!(self.out, "status: {}", status.as_str())?;
        writeln!(self.out, "score: {}", score)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, board: &Board, status: GameStatus, score: u64) {
        if let Err(e) = self.write_frame(board, status, score) {
            error!("Failed to render board: {}", e);
        }
    }
}

/// Whitespace-separated tokens read lazily from a line reader
pub struct LineInput<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        LineInput {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_input(&mut self) -> Option<String> {
        while self.pending.is_empty() {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    return None;
                }
            }
        }
        self.pending.pop_front()
    }
}

/// What happened during one turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnReport {
    pub direction: Direction,
    /// False when the swipe left the board unchanged (no tile was spawned)
    pub moved: bool,
    pub merged_value: u64,
    pub board: Board,
    pub status: GameStatus,
}

/// Commands understood by [`Game::run_interactive`] besides directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Autoplay,
    NewGame,
    Quit,
}

fn parse_command(token: &str) -> Result<Command, GameError> {
    match token.trim().to_lowercase().as_str() {
        "s" | "auto" => Ok(Command::Autoplay),
        "n" | "new" => Ok(Command::NewGame),
        "q" | "quit" => Ok(Command::Quit),
        _ => token.parse().map(Command::Move),
    }
}

/// One game session
pub struct Game {
    board: Board,
    rng: StdRng,
    score: u64,
    turn: u32,
    config: Config,
    searcher: Searcher,
    logger: DebugLogger,
}

impl Game {
    /// Starts a game whose spawns are fully determined by `seed`
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = seeded_rng(seed);
        let board = new_game_with(&mut rng, config.spawn.four_probability, config.spawn.initial_tiles);
        Self::assemble(config, board, rng)
    }

    /// Resumes from an existing position
    pub fn from_board(config: Config, board: Board, seed: u64) -> Self {
        Self::assemble(config, board, seeded_rng(seed))
    }

    fn assemble(config: Config, board: Board, rng: StdRng) -> Self {
        let searcher = Searcher::from_config(&config.search);
        Game {
            board,
            rng,
            score: 0,
            turn: 0,
            config,
            searcher,
            logger: DebugLogger::disabled(),
        }
    }

    /// Attaches a JSONL move logger
    pub fn with_logger(mut self, logger: DebugLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Clears the board and spawns the opening tiles; the RNG carries on
    pub fn new_game(&mut self) {
        self.board = new_game_with(
            &mut self.rng,
            self.config.spawn.four_probability,
            self.config.spawn.initial_tiles,
        );
        self.score = 0;
        self.turn = 0;
        info!("New game");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        status(&self.board)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn searcher_mut(&mut self) -> &mut Searcher {
        &mut self.searcher
    }

    /// Swipes the board; spawns and scores only if the swipe changed it
    pub fn apply_player_move(&mut self, direction: Direction) -> TurnReport {
        let before = self.board;
        let outcome = apply_move(&before, direction);

        if outcome.moved {
            self.logger.log_move(self.turn, before, direction, self.score);
            self.board = spawn_tile_with(&outcome.board, &mut self.rng, self.config.spawn.four_probability);
            self.score += outcome.merged_value;
            self.turn += 1;
            info!(
                "Turn {}: {} (+{}, score {})",
                self.turn,
                direction.as_str(),
                outcome.merged_value,
                self.score
            );
        }

        TurnReport {
            direction,
            moved: outcome.moved,
            merged_value: outcome.merged_value,
            board: self.board,
            status: self.status(),
        }
    }

    /// Parses and applies a direction token
    ///
    /// # Returns
    /// * `Err(GameError::InvalidInput)` - board untouched, nothing spawned
    pub fn apply_token(&mut self, token: &str) -> Result<TurnReport, GameError> {
        let direction: Direction = token.parse()?;
        Ok(self.apply_player_move(direction))
    }

    /// Whether autoplay should keep going from the current position
    pub fn autoplay_active(&self) -> bool {
        !is_game_over(&self.board) && !(self.config.autoplay.stop_on_win && is_game_won(&self.board))
    }

    /// One autoplay turn: search, swipe, spawn
    ///
    /// Returns `None` when the game has ended or the search finds no move.
    pub fn autoplay_step(&mut self) -> Option<TurnReport> {
        if !self.autoplay_active() {
            return None;
        }

        let result = self.searcher.search_root(&self.board);
        let direction = result.best_move?;
        info!(
            "Autoplay chose {} (score: {:.2}, depth: {}, nodes: {}, time: {}ms)",
            direction.as_str(),
            result.score,
            result.depth,
            result.stats.nodes,
            result.stats.elapsed_ms
        );
        Some(self.apply_player_move(direction))
    }

    /// Plays up to `max_turns` autoplay turns, rendering after each
    ///
    /// # Returns
    /// * Number of turns played
    pub fn run_autoplay(&mut self, renderer: &mut dyn Renderer, max_turns: usize) -> usize {
        let delay = Duration::from_millis(self.config.autoplay.turn_delay_ms);
        let mut played = 0;

        while played < max_turns {
            if self.autoplay_step().is_none() {
                break;
            }
            played += 1;
            renderer.render(&self.board, self.status(), self.score);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        info!("Autoplay stopped after {} turn(s): {}", played, self.status().as_str());
        played
    }

    /// Reads commands until input runs out or `quit`
    ///
    /// Directions are applied as player moves, `n`/`new` restarts. Invalid
    /// tokens are logged and skipped.
    ///
    /// `s`/`auto` is a one-way handoff: input is read synchronously, so
    /// nothing can interrupt the autoplayer once it starts. It plays until
    /// the game is over (or won, with `stop_on_win`), pausing
    /// `autoplay.turn_delay_ms` between turns, then reading resumes with
    /// the next token.
    ///
    /// # Returns
    /// * Number of turns that changed the board
    pub fn run_interactive(&mut self, input: &mut dyn InputSource, renderer: &mut dyn Renderer) -> usize {
        renderer.render(&self.board, self.status(), self.score);
        let mut played = 0;

        while let Some(token) = input.next_input() {
            match parse_command(&token) {
                Ok(Command::Move(direction)) => {
                    if self.apply_player_move(direction).moved {
                        played += 1;
                        renderer.render(&self.board, self.status(), self.score);
                    }
                }
                Ok(Command::Autoplay) => {
                    played += self.run_autoplay(renderer, usize::MAX);
                }
                Ok(Command::NewGame) => {
                    self.new_game();
                    renderer.render(&self.board, self.status(), self.score);
                }
                Ok(Command::Quit) => break,
                Err(e) => warn!("{}", e),
            }
        }

        played
    }
}

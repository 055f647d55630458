// Terminal harness for the 2048 engine
//
// Usage:
//   auto-2048 [--seed N] [--depth D] [--moves l,r,u,d] [--auto N] [--interactive]
//
// Plays scripted moves and/or autoplay turns from a seeded start and prints
// the final board as a grid of integers followed by status and score.

use clap::Parser;
use log::info;
use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use auto_2048::config::Config;
use auto_2048::debug_logger::DebugLogger;
use auto_2048::game::{Game, LineInput, Renderer, TextRenderer};
use auto_2048::types::{Board, GameStatus};

#[derive(Parser, Debug)]
#[command(name = "auto-2048", version, about = "2048 with an alpha-beta autoplayer")]
struct Cli {
    /// Seed for tile spawns; the same seed replays the same game
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Search depth (overrides the config file)
    #[arg(long)]
    depth: Option<u8>,
    /// Node budget per decision, 0 = unlimited (overrides the config file)
    #[arg(long)]
    node_budget: Option<u64>,
    /// Scripted moves, comma-separated (left,right,up,down or l,r,u,d)
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,
    /// Play up to N autoplay turns after the scripted moves
    #[arg(long, value_name = "N")]
    auto: Option<usize>,
    /// Read commands from stdin instead (directions, s = autoplay, n = new, q = quit)
    #[arg(long)]
    interactive: bool,
    /// Delay between autoplay turns in milliseconds (overrides the config file)
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Print the board after every autoplay turn, not just at the end
    #[arg(long)]
    steps: bool,
    /// Print the move the autoplayer would pick on the final board
    #[arg(long)]
    hint: bool,
    /// Path to the config file
    #[arg(long, default_value = "Game.toml")]
    config: PathBuf,
    /// Write every applied move to this JSONL file
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Swallows intermediate frames when only the final board is wanted
struct FinalOnly;

impl Renderer for FinalOnly {
    fn render(&mut self, _board: &Board, _status: GameStatus, _score: u64) {}
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::from_file(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", cli.config.display(), e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(budget) = cli.node_budget {
        config.search.node_budget = budget;
    }
    if let Some(delay) = cli.delay_ms {
        config.autoplay.turn_delay_ms = delay;
    }

    let logger = match &cli.log {
        Some(path) => match path.to_str() {
            Some(p) => DebugLogger::new(true, p),
            None => {
                eprintln!("Error: log path '{}' is not valid UTF-8", path.display());
                process::exit(1);
            }
        },
        None => DebugLogger::new(config.debug.enabled, &config.debug.log_file_path),
    };

    let depth = config.search.depth;
    info!("Starting game (seed: {}, depth: {})", cli.seed, depth);
    let mut game = Game::new(config, cli.seed).with_logger(logger);
    let mut out = TextRenderer::new(io::stdout());

    if cli.interactive {
        let stdin = io::stdin();
        let mut input = LineInput::new(stdin.lock());
        game.run_interactive(&mut input, &mut out);
    } else {
        for token in &cli.moves {
            if let Err(e) = game.apply_token(token) {
                eprintln!("Error: {}", e);
            }
        }

        if let Some(turns) = cli.auto {
            if cli.steps {
                game.run_autoplay(&mut out, turns);
            } else {
                game.run_autoplay(&mut FinalOnly, turns);
            }
        }

        out.render(game.board(), game.status(), game.score());
    }

    if cli.hint {
        let board = *game.board();
        match game.searcher_mut().best_move(&board) {
            Some(dir) => println!("best: {}", dir.as_str()),
            None => println!("best: none"),
        }
    }
}

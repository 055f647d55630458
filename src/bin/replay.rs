// Standalone replay tool for re-running the autoplayer over debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate <T:M,...>   Check the logged moves against expectations
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Game.toml (default: Game.toml)

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process;

use auto_2048::config::Config;
use auto_2048::replay::ReplayEngine;
use auto_2048::types::Direction;

#[derive(Parser, Debug)]
#[command(
    name = "replay",
    version,
    about = "2048 Replay Tool: re-runs the autoplayer on logged positions",
    group(ArgGroup::new("mode").required(true).args(["all", "turns", "validate"]))
)]
struct Cli {
    /// JSONL log written by `auto-2048 --log`
    log_file: PathBuf,
    /// Replay all turns in the log
    #[arg(long)]
    all: bool,
    /// Replay specific turns (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "T1,T2,...")]
    turns: Vec<u32>,
    /// Validate logged moves (format: turn:move,... with '|' between alternatives)
    #[arg(long, value_name = "T:M,...")]
    validate: Option<String>,
    /// Show detailed output for each turn
    #[arg(long)]
    verbose: bool,
    /// Override the search depth from the config
    #[arg(long)]
    depth: Option<u8>,
    /// Path to Game.toml
    #[arg(long, default_value = "Game.toml")]
    config: PathBuf,
}

fn parse_expected_moves(s: &str) -> Result<Vec<(u32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'turn:move'", pair));
            }

            let turn = parts[0]
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", parts[0], e))?;

            // Support multiple acceptable moves separated by '|'
            let moves: Result<Vec<Direction>, String> = parts[1]
                .split('|')
                .map(|m| m.parse::<Direction>().map_err(|e| e.to_string()))
                .collect();

            Ok((turn, moves?))
        })
        .collect()
}

fn main() {
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

    println!("Loaded configuration from: {}", cli.config.display());
    println!("Replay log file: {}", cli.log_file.display());
    println!();

    let engine = ReplayEngine::new(config, cli.verbose);

    let entries = match engine.load_log_file(&cli.log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    if let Some(validate_arg) = &cli.validate {
        let expected_moves = match parse_expected_moves(validate_arg) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error parsing expected moves: {}", e);
                process::exit(1);
            }
        };

        println!("Validating {} expected move(s)...\n", expected_moves.len());
        match engine.validate_expected_moves(&entries, &expected_moves) {
            Ok(()) => println!("✓ All expected moves validated successfully!"),
            Err(e) => {
                eprintln!("✗ Validation failed: {}", e);
                process::exit(1);
            }
        }
    } else if !cli.turns.is_empty() {
        println!("Replaying {} specific turn(s)...\n", cli.turns.len());
        match engine.replay_turns(&entries, &cli.turns) {
            Ok(results) => engine.print_report(&results),
            Err(e) => {
                eprintln!("Error during replay: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Replaying all {} turns...\n", entries.len());
        let results = engine.replay_all(&entries);
        engine.print_report(&results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expected_moves() {
        let parsed = parse_expected_moves("0:left,3:up|down").unwrap();
        assert_eq!(parsed[0], (0, vec![Direction::Left]));
        assert_eq!(parsed[1], (3, vec![Direction::Up, Direction::Down]));
        assert!(parse_expected_moves("5").is_err());
        assert!(parse_expected_moves("x:left").is_err());
        assert!(parse_expected_moves("1:north").is_err());
    }
}

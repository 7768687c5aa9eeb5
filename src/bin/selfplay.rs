//! Self-play game generation CLI.
//!
//! Plays Pobo games via self-play and writes the game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --max-plies N   Plies before a game is drawn (default: 200)
//!   --random P      Probability of a random move per ply (default: 0.05)
//!   --weights FILE  JSON weight table (default: built-in weights)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::{info, Level};

use pobo::eval::Weights;
use pobo::logging::init_logging;
use pobo::selfplay::{self, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_arg(&args, i, "--games");
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = parse_arg(&args, i, "--max-plies");
            }
            "--random" => {
                i += 1;
                config.random_move_rate = parse_arg(&args, i, "--random");
            }
            "--weights" => {
                i += 1;
                let path: String = parse_arg(&args, i, "--weights");
                config.weights = Weights::from_json_file(&path).unwrap_or_else(|e| fail(e));
            }
            "--threads" => {
                i += 1;
                config.threads = parse_arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_arg(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;
    init_logging(if quiet { Level::WARN } else { Level::INFO });

    info!(
        "Self-play: {} games, max {} plies, random rate {:.2}, {} threads",
        config.num_games, config.max_plies, config.random_move_rate, config.threads
    );

    let start = Instant::now();
    let games = selfplay::run_self_play(&config).unwrap_or_else(|e| fail(e));
    let elapsed = start.elapsed();

    info!(
        "Completed {} games in {:.1}s ({:.1} games/hour)",
        games.len(),
        elapsed.as_secs_f64(),
        games.len() as f64 / elapsed.as_secs_f64() * 3600.0
    );
    selfplay::print_summary(&games);

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        fail(e);
    }
    if let Some(path) = output_path {
        info!("Wrote {} games to {}", games.len(), path);
    }
}

fn parse_arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|a| a.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("error: {e}");
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-plies N    Plies before a game is drawn (default: 200)");
    eprintln!("  --random P       Probability of a random move per ply (default: 0.05)");
    eprintln!("  --weights FILE   JSON weight table (default: built-in weights)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}

//! Pobo engine binary.
//!
//! Reads protocol commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`.

use std::io::{self, BufRead};

use tracing::{error, Level};

use pobo::engine::Engine;
use pobo::logging::init_logging;
use pobo::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop until `quit` or end of input.
fn main() {
    init_logging(Level::WARN);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("failed to read stdin: {e}");
                break;
            }
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Pobo => {
                engine.handle_pobo(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(name, value) {
                    error!("{e}");
                }
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Position { notation } => {
                if let Err(e) = engine.set_position(&notation) {
                    error!("{e}");
                }
            }
            Command::Go(params) => {
                engine.handle_go(params, &mut out);
            }
            Command::Eval => {
                engine.handle_eval(&mut out);
            }
            Command::Simulate { action } => {
                if let Err(e) = engine.handle_simulate(action, &mut out) {
                    error!("{e}");
                }
            }
            Command::Quit => {
                break;
            }
        }
    }
}

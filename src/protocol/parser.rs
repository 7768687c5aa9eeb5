//! Protocol command parser.
//!
//! Parses incoming text commands into structured `Command` variants that the
//! engine main loop can dispatch on.

use tracing::warn;

use super::notation::parse_action;
use crate::board::Action;

/// Search parameters passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Report this many best candidates before the final choice.
    pub multipv: Option<usize>,
    /// Actions the search must not return.
    pub exclude: Vec<Action>,
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; engine replies with its id, options, and `pobook`.
    Pobo,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to the opening position.
    NewGame,

    /// Set the position from its notation.
    Position { notation: String },

    /// Search the current position.
    Go(GoParams),

    /// Score the current position for the player to move.
    Eval,

    /// Play an action on the current position and make the result current.
    Simulate { action: Action },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, _) = tokens.split_first()?;

    match head {
        "pobo" => Some(Command::Pobo),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "eval" => Some(Command::Eval),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "go" => parse_go(&tokens),
        "simulate" => parse_simulate(&tokens),

        other => {
            warn!("unknown command: {other}");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `position <notation>` or `position startpos`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        Some(&notation) => Some(Command::Position {
            notation: notation.to_string(),
        }),
        None => {
            warn!("malformed position: expected 'position <notation>'");
            None
        }
    }
}

/// Parses `go [multipv <k>] [exclude <action>...]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;
    let mut excluding = false;

    while i < tokens.len() {
        match tokens[i] {
            "multipv" => {
                excluding = false;
                i += 1;
                match tokens.get(i).map(|t| t.parse::<usize>()) {
                    Some(Ok(k)) if k > 0 => params.multipv = Some(k),
                    _ => warn!("invalid multipv value"),
                }
            }
            "exclude" => excluding = true,
            token if excluding => match parse_action(token) {
                Ok(action) => params.exclude.push(action),
                Err(e) => warn!("{e}"),
            },
            other => warn!("unknown go parameter: '{other}'"),
        }
        i += 1;
    }

    Some(Command::Go(params))
}

/// Parses `simulate <action>`.
fn parse_simulate(tokens: &[&str]) -> Option<Command> {
    let Some(token) = tokens.get(1) else {
        warn!("malformed simulate: expected 'simulate <action>'");
        return None;
    };
    match parse_action(token) {
        Ok(action) => Some(Command::Simulate { action }),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

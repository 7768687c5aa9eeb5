//! Engine state management.
//!
//! Holds the current position, engine options, the weight table, and the
//! search thread pool, and answers the protocol commands that need them.

use std::collections::HashMap;
use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;

use crate::board::{Action, GameState};
use crate::eval::{breakdown, Weights, WeightsError};
use crate::movegen::{is_legal, ExclusionList};
use crate::protocol::notation::{
    encode_position, format_action, format_cell, parse_position, NotationError,
};
use crate::protocol::parser::GoParams;
use crate::resolve::play_turn;
use crate::search::{best_action, evaluate, preselect};

/// Errors reported back to the protocol loop.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to parse position: {0}")]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Weights(#[from] WeightsError),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },

    #[error("cannot build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("illegal action {0} in the current position")]
    IllegalAction(Action),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: GameState,
    pub options: HashMap<String, String>,
    weights: Weights,
    threads: Option<ThreadPool>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine at the opening position with default weights.
    pub fn new() -> Self {
        Engine {
            position: GameState::initial(),
            options: HashMap::new(),
            weights: Weights::default(),
            threads: None,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Resets the position for a new game. Options are kept.
    pub fn new_game(&mut self) {
        self.position = GameState::initial();
    }

    /// Sets the current position from its notation, or `startpos`.
    pub fn set_position(&mut self, notation: &str) -> Result<(), EngineError> {
        self.position = if notation == "startpos" {
            GameState::initial()
        } else {
            parse_position(notation)?
        };
        Ok(())
    }

    /// Sets an engine option and applies it immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), EngineError> {
        let value = value.unwrap_or_default();
        let invalid = || EngineError::InvalidOptionValue {
            name: name.clone(),
            value: value.clone(),
        };
        match name.as_str() {
            "Seed" => {
                let seed: u64 = value.parse().map_err(|_| invalid())?;
                self.rng = if seed != 0 {
                    SmallRng::seed_from_u64(seed)
                } else {
                    SmallRng::from_entropy()
                };
            }
            "Threads" => {
                let n: usize = value.parse().map_err(|_| invalid())?;
                self.threads = if n == 0 {
                    None
                } else {
                    Some(ThreadPoolBuilder::new().num_threads(n).build()?)
                };
            }
            "Weights" => {
                let base = if value.is_empty() {
                    Weights::default()
                } else {
                    Weights::from_json_file(&value)?
                };
                // Keep a Normalize option set earlier.
                self.weights = base.with_normalization(self.weights.normalize)?;
            }
            "Normalize" => {
                let limit: f64 = value.parse().map_err(|_| invalid())?;
                let limit = (limit != 0.0).then_some(limit);
                self.weights = self.weights.with_normalization(limit)?;
            }
            _ => return Err(EngineError::UnknownOption(name)),
        }
        info!(option = %name, %value, "option set");
        self.options.insert(name, value);
        Ok(())
    }

    /// Handles the protocol handshake: writes id, options, and `pobook`.
    pub fn handle_pobo<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name pobo {}", env!("CARGO_PKG_VERSION")).unwrap();
        writeln!(out, "id author pobo").unwrap();
        writeln!(out, "option name Seed type spin default 0 min 0").unwrap();
        writeln!(out, "option name Threads type spin default 0 min 0 max 256").unwrap();
        writeln!(out, "option name Weights type string default <empty>").unwrap();
        writeln!(out, "option name Normalize type spin default 0 min 0").unwrap();
        writeln!(out, "pobook").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `go` command: optional multi-candidate report, then the
    /// chosen action, or `none` when nothing is legal.
    pub fn handle_go<W: Write>(&mut self, params: GoParams, out: &mut W) {
        let state = self.position;
        let exclusions: ExclusionList = params.exclude.into_iter().collect();
        let weights = &self.weights;
        let rng = &mut self.rng;

        let mut run = || {
            let top = params
                .multipv
                .map(|k| preselect(&state, weights, &exclusions, k, &mut *rng));
            let result = best_action(&state, weights, &exclusions, &mut *rng);
            (top, result)
        };
        let (top, result) = match &self.threads {
            Some(pool) => pool.install(run),
            None => run(),
        };

        for (i, (action, score)) in top.unwrap_or_default().iter().enumerate() {
            writeln!(out, "info multipv {} action {} score {:.2}", i + 1, action, score).unwrap();
        }
        writeln!(
            out,
            "info candidates {} time {} score {:.2}{}",
            result.info.candidates,
            result.info.elapsed_ms,
            result.score,
            if result.winning { " winning" } else { "" }
        )
        .unwrap();
        writeln!(out, "bestmove {}", format_action(result.action)).unwrap();
        out.flush().unwrap();
    }

    /// Handles the `eval` command: the score of the current position for the
    /// player to move, with its two components.
    pub fn handle_eval<W: Write>(&self, out: &mut W) {
        let state = &self.position;
        let parts = breakdown(&state.board, &state.pools, state.turn, &self.weights);
        writeln!(
            out,
            "info alignment {:.2} positional {:.2}",
            parts.alignment, parts.positional
        )
        .unwrap();
        writeln!(out, "score {:.2}", evaluate(state, &self.weights)).unwrap();
        out.flush().unwrap();
    }

    /// Handles the `simulate` command: plays `action` as a game turn on the
    /// current position, makes the result current, and prints it. Illegal
    /// actions leave the position untouched and print nothing.
    pub fn handle_simulate<W: Write>(
        &mut self,
        action: Action,
        out: &mut W,
    ) -> Result<(), EngineError> {
        if !is_legal(&self.position, action, &ExclusionList::new()) {
            return Err(EngineError::IllegalAction(action));
        }
        let outcome = play_turn(&mut self.position, action, &self.weights.groups, &mut self.rng);
        writeln!(
            out,
            "info moved {} ejected {}",
            outcome.pushes.moved, outcome.pushes.ejected
        )
        .unwrap();
        if let Some(group) = outcome.promoted {
            let cells: Vec<String> = group.cells().iter().map(|&c| format_cell(c)).collect();
            writeln!(out, "info promoted {}", cells.join(" ")).unwrap();
        }
        if let Some(winner) = outcome.winner {
            writeln!(out, "info winner {}", winner.notation_char()).unwrap();
        }
        writeln!(out, "position {}", encode_position(&self.position)).unwrap();
        out.flush().unwrap();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Piece, Player, Rank};
    use crate::protocol::notation::INITIAL_POSITION;

    fn output_of(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut output = Vec::new();
        f(&mut output);
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn new_engine_starts_at_opening() {
        let engine = Engine::new();
        assert_eq!(engine.position, GameState::initial());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn new_game_resets_position() {
        let mut engine = Engine::new();
        engine.set_position("6/6/2a3/6/6/6;1111111;11111111;b").unwrap();
        engine.new_game();
        assert_eq!(engine.position, GameState::initial());
    }

    #[test]
    fn set_position_invalid_notation() {
        let mut engine = Engine::new();
        let result = engine.set_position("garbage");
        assert!(matches!(result, Err(EngineError::Notation(_))));
        assert_eq!(engine.position, GameState::initial());
    }

    #[test]
    fn set_option_validates() {
        let mut engine = Engine::new();
        engine.set_option("Seed".to_string(), Some("8".to_string())).unwrap();
        assert_eq!(engine.options.get("Seed"), Some(&"8".to_string()));
        assert!(matches!(
            engine.set_option("Seed".to_string(), Some("x".to_string())),
            Err(EngineError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            engine.set_option("Depth".to_string(), Some("3".to_string())),
            Err(EngineError::UnknownOption(_))
        ));
        assert!(matches!(
            engine.set_option("Weights".to_string(), Some("/nonexistent/w.json".to_string())),
            Err(EngineError::Weights(WeightsError::Io { .. }))
        ));
    }

    #[test]
    fn normalize_option_applies() {
        let mut engine = Engine::new();
        engine.set_option("Normalize".to_string(), Some("1000".to_string())).unwrap();
        assert_eq!(engine.weights().normalize, Some(1000.0));
        engine.set_option("Normalize".to_string(), Some("0".to_string())).unwrap();
        assert_eq!(engine.weights().normalize, None);
    }

    #[test]
    fn handle_go_outputs_bestmove() {
        let mut engine = Engine::new();
        engine.set_option("Seed".to_string(), Some("1".to_string())).unwrap();
        let out = output_of(|o| engine.handle_go(GoParams::default(), o));
        let line = out.lines().find(|l| l.starts_with("bestmove ")).unwrap();
        let action = crate::protocol::parse_action(line.strip_prefix("bestmove ").unwrap()).unwrap();
        assert!(action.at.is_central());
        assert!(out.contains("info candidates 36"));
    }

    #[test]
    fn handle_go_multipv() {
        let mut engine = Engine::new();
        engine.set_option("Threads".to_string(), Some("2".to_string())).unwrap();
        let params = GoParams {
            multipv: Some(3),
            exclude: vec![Action::new(Rank::Minor, 2, 2)],
        };
        let out = output_of(|o| engine.handle_go(params, o));
        let multipv: Vec<&str> = out.lines().filter(|l| l.starts_with("info multipv")).collect();
        assert_eq!(multipv.len(), 3);
        assert!(!out.contains("action 1c4"));
        assert!(out.contains("info candidates 35"));
    }

    #[test]
    fn handle_go_without_moves_prints_none() {
        let mut engine = Engine::new();
        engine.set_position("6/6/6/6/6/6;-;11111111;a").unwrap();
        let out = output_of(|o| engine.handle_go(GoParams::default(), o));
        assert!(out.contains("bestmove none"));
    }

    #[test]
    fn handle_eval_reports_score() {
        let mut engine = Engine::new();
        engine.set_position("6/6/2a3/6/6/6;1111111;11111111;a").unwrap();
        let out = output_of(|o| engine.handle_eval(o));
        assert!(out.contains("info alignment 0.00 positional 4.00"));
        assert!(out.contains("score 4.00"));
    }

    #[test]
    fn handle_simulate_advances_game() {
        let mut engine = Engine::new();
        let out = output_of(|o| {
            engine
                .handle_simulate(Action::new(Rank::Minor, 2, 2), o)
                .unwrap()
        });
        assert!(out.contains("position 6/6/2a3/6/6/6;1111111;11111111;b"));
        assert_eq!(engine.position.board.get(Coord::new(2, 2)), Some(Piece::minor(Player::A)));
        assert_eq!(engine.position.turn, Player::B);
    }

    #[test]
    fn handle_simulate_rejects_illegal_actions() {
        let mut engine = Engine::new();
        let mut out = Vec::new();

        // No major in reserve at the start.
        let result = engine.handle_simulate(Action::new(Rank::Major, 2, 2), &mut out);
        assert!(matches!(result, Err(EngineError::IllegalAction(_))));

        engine.set_position("6/6/2b3/6/6/6;11111111;1111111;a").unwrap();
        let result = engine.handle_simulate(Action::new(Rank::Minor, 2, 2), &mut out);
        assert!(matches!(result, Err(EngineError::IllegalAction(_))));

        assert!(out.is_empty());
        assert_eq!(engine.position.board.get(Coord::new(2, 2)), Some(Piece::minor(Player::B)));
        assert_eq!(engine.position.material(Player::A), 8);
        assert_eq!(engine.position.turn, Player::A);
    }

    #[test]
    fn overfull_position_is_rejected() {
        let mut engine = Engine::new();
        let result = engine.set_position("1a4/6/6/6/6/6;11111111;11111111;b");
        assert!(matches!(
            result,
            Err(EngineError::Notation(NotationError::TooManyPieces { .. }))
        ));
        assert_eq!(engine.position, GameState::initial());
    }

    #[test]
    fn handle_pobo_outputs_handshake() {
        let engine = Engine::new();
        let out = output_of(|o| engine.handle_pobo(o));
        assert!(out.starts_with("id name pobo"));
        assert!(out.contains("option name Threads"));
        assert!(out.trim_end().ends_with("pobook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let out = output_of(|o| engine.handle_isready(o));
        assert_eq!(out.trim(), "readyok");
    }

    #[test]
    fn startpos_alias() {
        let mut engine = Engine::new();
        engine.set_position(INITIAL_POSITION).unwrap();
        engine.set_position("startpos").unwrap();
        assert_eq!(engine.position, GameState::initial());
    }
}

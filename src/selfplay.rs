//! Self-play game generation.
//!
//! Plays complete games with the engine on both sides, recording every ply,
//! and writes the records as JSONL for later analysis or weight tuning.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{GameState, Player};
use crate::eval::Weights;
use crate::movegen::{random_action, ExclusionList};
use crate::protocol::notation::encode_position;
use crate::resolve::{play_turn, Group};
use crate::search::best_action;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Plies after which an undecided game is scored as a draw.
    pub max_plies: usize,
    /// Probability of playing a random legal action instead of the searched one.
    pub random_move_rate: f64,
    /// Weight table used by both sides.
    pub weights: Weights,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            seed: 0,
            threads: 4,
            max_plies: 200,
            random_move_rate: 0.05,
            weights: Weights::default(),
            quiet: false,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Victory,
    /// The player to move had nothing to place.
    NoMoves,
    PlyLimit,
}

/// One recorded ply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    /// Position before the action, in position notation.
    pub position: String,
    /// The action played, in action notation.
    pub action: String,
    /// Search score of the action; absent for random actions.
    pub score: Option<f64>,
    pub promoted: Option<Group>,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub plies: Vec<PlyRecord>,
    pub winner: Option<Player>,
    pub termination: Termination,
    pub final_position: String,
}

/// Plays one game from the opening position.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut impl Rng) -> GameRecord {
    let mut state = GameState::initial();
    let mut plies = Vec::new();
    let exclusions = ExclusionList::new();
    let mut winner = None;
    let mut termination = Termination::PlyLimit;

    while plies.len() < config.max_plies {
        let position = encode_position(&state);
        let explore =
            config.random_move_rate > 0.0 && rng.gen_bool(config.random_move_rate.min(1.0));
        let (action, score) = if explore {
            (random_action(&state, &exclusions, rng), None)
        } else {
            let result = best_action(&state, &config.weights, &exclusions, rng);
            (result.action, Some(result.score))
        };
        let Some(action) = action else {
            termination = Termination::NoMoves;
            break;
        };

        let outcome = play_turn(&mut state, action, &config.weights.groups, rng);
        plies.push(PlyRecord {
            position,
            action: action.to_string(),
            score: score.filter(|s| s.is_finite()),
            promoted: outcome.promoted,
        });
        if outcome.winner.is_some() {
            winner = outcome.winner;
            termination = Termination::Victory;
            break;
        }
    }

    debug!(game_id, plies = plies.len(), ?winner, ?termination, "game finished");
    GameRecord {
        game_id,
        plies,
        winner,
        termination,
        final_position: encode_position(&state),
    }
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs self-play generation and returns the records in game order.
///
/// Each game gets its own RNG derived from `config.seed`, so a non-zero seed
/// reproduces the same games whatever the thread count.
pub fn run_self_play(
    config: &SelfPlayConfig,
) -> Result<Vec<GameRecord>, rayon::ThreadPoolBuildError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let completed = AtomicUsize::new(0);

    let games = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| {
                let mut rng = game_rng(config.seed, i);
                let game_start = Instant::now();
                let game = play_game(config, i, &mut rng);
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    info!(
                        "Game {}/{}: {} after {} plies ({:.1}s)",
                        n,
                        config.num_games,
                        outcome_label(&game),
                        game.plies.len(),
                        game_start.elapsed().as_secs_f64(),
                    );
                }
                game
            })
            .collect()
    });
    Ok(games)
}

fn outcome_label(game: &GameRecord) -> String {
    match game.winner {
        Some(w) => format!("{} wins", w.notation_char()),
        None => "draw".to_string(),
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs aggregate statistics over a batch of games.
pub fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        return;
    }
    let wins = |p: Player| games.iter().filter(|g| g.winner == Some(p)).count();
    let stalled = games
        .iter()
        .filter(|g| g.termination == Termination::NoMoves)
        .count();
    let total_plies: usize = games.iter().map(|g| g.plies.len()).sum();
    info!(
        "Summary: A {} / B {} / draws {} ({} stalled), avg length {:.1} plies",
        wins(Player::A),
        wins(Player::B),
        games.len() - wins(Player::A) - wins(Player::B),
        stalled,
        total_plies as f64 / games.len() as f64,
    );
}

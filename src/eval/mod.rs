//! Position evaluation.
//!
//! Scores a board from the mover's perspective by sweeping runs along the four
//! scan directions and adding positional differentials. Also ranks promotion
//! groups. All constants come from an injected `Weights` table.

pub mod groups;
pub mod heuristic;
pub mod lines;
pub mod weights;

pub use groups::score_group;
pub use heuristic::{breakdown, score, ScoreBreakdown};
pub use lines::AlignmentType;
pub use weights::{Weights, WeightsError};

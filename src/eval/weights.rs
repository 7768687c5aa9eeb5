//! Evaluation weights.
//!
//! The scan-and-aggregate algorithm in `heuristic` and the group ranking in
//! `groups` are fixed; every constant they combine lives here so that an
//! embedding application can load its own tuning from JSON. `Weights::default`
//! is one hand-tuned set that plays reasonably, not a reference.
//!
//! Every `Sided` weight is split by whose piece starts the pattern. The two
//! halves are deliberately not mirror images: the defaults punish an
//! opponent's threat harder than they reward the mover's equal threat.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading a weights file.
#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("cannot read weights file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed weights JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("normalization limit must be positive and finite, got {0}")]
    InvalidNormalization(f64),

    #[error("weight {name} must be finite, got {value}")]
    NonFiniteWeight { name: &'static str, value: f64 },
}

/// A weight that depends on whether the pattern belongs to the mover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sided {
    pub mover: f64,
    pub opponent: f64,
}

impl Sided {
    pub const fn new(mover: f64, opponent: f64) -> Self {
        Sided { mover, opponent }
    }

    #[inline]
    pub fn pick(self, is_mover: bool) -> f64 {
        if is_mover {
            self.mover
        } else {
            self.opponent
        }
    }
}

/// Weights for one kind of two-run (majors, minors, or mixed ranks).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoRunWeights {
    /// Run squeezed into one of the four corner diagonals.
    pub corner: Sided,
    /// Both extension cells are off-board or opposing.
    pub blocked: Sided,
    /// Run that can still grow.
    pub open: Sided,
    /// Replaces `open` when the run's owner holds a major in reserve.
    pub open_with_reserve: Sided,
    /// Replaces the mover's `open` value when the run lies fully on the border.
    pub mover_open_on_border: f64,
    /// Only apply `mover_open_on_border` while the opponent holds a reserve major.
    pub border_needs_opponent_reserve: bool,
}

/// Weights for alignments found by the directional scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentWeights {
    pub three_major: Sided,
    pub three_minor: Sided,
    /// Multiplied by the number of minors in a mixed-rank three-run.
    pub three_mixed_per_minor: Sided,
    pub two_major: TwoRunWeights,
    pub two_minor: TwoRunWeights,
    pub two_mixed: TwoRunWeights,
}

impl Default for AlignmentWeights {
    fn default() -> Self {
        AlignmentWeights {
            three_major: Sided::new(1000.0, -1000.0),
            three_minor: Sided::new(40.0, -44.0),
            three_mixed_per_minor: Sided::new(10.0, -11.0),
            two_major: TwoRunWeights {
                corner: Sided::new(-5.0, 10.0),
                blocked: Sided::new(-5.0, 10.0),
                open: Sided::new(20.0, -40.0),
                open_with_reserve: Sided::new(60.0, -300.0),
                mover_open_on_border: 0.0,
                border_needs_opponent_reserve: true,
            },
            two_minor: TwoRunWeights {
                corner: Sided::new(-1.0, 5.0),
                blocked: Sided::new(-1.0, 0.0),
                open: Sided::new(20.0, -22.0),
                open_with_reserve: Sided::new(20.0, -22.0),
                mover_open_on_border: 0.0,
                border_needs_opponent_reserve: false,
            },
            two_mixed: TwoRunWeights {
                corner: Sided::new(-1.0, 5.0),
                blocked: Sided::new(-1.0, 0.0),
                open: Sided::new(10.0, -11.0),
                open_with_reserve: Sided::new(10.0, -11.0),
                mover_open_on_border: 0.0,
                border_needs_opponent_reserve: false,
            },
        }
    }
}

/// Weights for the mover-minus-opponent material and placement counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionalWeights {
    /// Majors on the board plus majors in reserve.
    pub major_total: f64,
    pub major: f64,
    pub major_central: f64,
    pub major_border: f64,
    pub minor: f64,
    pub minor_central: f64,
    pub minor_border: f64,
}

impl Default for PositionalWeights {
    fn default() -> Self {
        PositionalWeights {
            major_total: 20.0,
            major: 9.0,
            major_central: 3.0,
            major_border: -3.0,
            minor: 3.0,
            minor_central: 1.0,
            minor_border: -1.0,
        }
    }
}

/// Weights used to rank simultaneously eligible promotion groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupWeights {
    pub singleton_base: f64,
    pub singleton_border: f64,
    pub singleton_central: f64,
    /// Applied when the piece touches another piece of its owner.
    pub singleton_next_to_friend: f64,
    /// Applied when the piece currently stops an opposing two-run.
    pub singleton_blocking: f64,
    pub triple_per_minor: f64,
    pub triple_full_border: f64,
    pub triple_partial_border: f64,
}

impl Default for GroupWeights {
    fn default() -> Self {
        GroupWeights {
            singleton_base: 5.0,
            singleton_border: 2.0,
            singleton_central: -2.0,
            singleton_next_to_friend: -3.0,
            singleton_blocking: -10.0,
            triple_per_minor: 1.0,
            triple_full_border: 10.0,
            triple_partial_border: 1.0,
        }
    }
}

/// The complete weight table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub alignment: AlignmentWeights,
    pub positional: PositionalWeights,
    pub groups: GroupWeights,
    /// When set, scores are clamped to `±limit` and divided by `limit`.
    pub normalize: Option<f64>,
}

impl Weights {
    /// Parses a weights table from JSON. Missing sections keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, WeightsError> {
        let weights: Weights = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Reads and parses a weights file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WeightsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WeightsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Weights::from_json_str(&json)
    }

    /// Serializes the table as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, WeightsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns a copy with normalization set to `limit`.
    pub fn with_normalization(mut self, limit: Option<f64>) -> Result<Self, WeightsError> {
        self.normalize = limit;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), WeightsError> {
        if let Some(limit) = self.normalize {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(WeightsError::InvalidNormalization(limit));
            }
        }
        match self.named_values().into_iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(WeightsError::NonFiniteWeight { name, value }),
            None => Ok(()),
        }
    }

    fn named_values(&self) -> Vec<(&'static str, f64)> {
        let a = &self.alignment;
        let p = &self.positional;
        let g = &self.groups;
        let mut values = Vec::with_capacity(64);
        let sided = |values: &mut Vec<(&'static str, f64)>, name: &'static str, s: Sided| {
            values.push((name, s.mover));
            values.push((name, s.opponent));
        };
        sided(&mut values, "alignment.three_major", a.three_major);
        sided(&mut values, "alignment.three_minor", a.three_minor);
        sided(&mut values, "alignment.three_mixed_per_minor", a.three_mixed_per_minor);
        for (name, t) in [
            ("alignment.two_major", &a.two_major),
            ("alignment.two_minor", &a.two_minor),
            ("alignment.two_mixed", &a.two_mixed),
        ] {
            for s in [t.corner, t.blocked, t.open, t.open_with_reserve] {
                sided(&mut values, name, s);
            }
            values.push((name, t.mover_open_on_border));
        }
        values.extend([
            ("positional.major_total", p.major_total),
            ("positional.major", p.major),
            ("positional.major_central", p.major_central),
            ("positional.major_border", p.major_border),
            ("positional.minor", p.minor),
            ("positional.minor_central", p.minor_central),
            ("positional.minor_border", p.minor_border),
            ("groups.singleton_base", g.singleton_base),
            ("groups.singleton_border", g.singleton_border),
            ("groups.singleton_central", g.singleton_central),
            ("groups.singleton_next_to_friend", g.singleton_next_to_friend),
            ("groups.singleton_blocking", g.singleton_blocking),
            ("groups.triple_per_minor", g.triple_per_minor),
            ("groups.triple_full_border", g.triple_full_border),
            ("groups.triple_partial_border", g.triple_partial_border),
        ]);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let w = Weights::from_json_str("{}").unwrap();
        assert_eq!(w, Weights::default());
    }

    #[test]
    fn partial_json_overrides_one_section() {
        let w = Weights::from_json_str(r#"{"positional": {"major_total": 50.0}}"#).unwrap();
        assert_eq!(w.positional.major_total, 50.0);
        assert_eq!(w.positional.minor, PositionalWeights::default().minor);
        assert_eq!(w.alignment, AlignmentWeights::default());
    }

    #[test]
    fn json_roundtrip() {
        let w = Weights::default().with_normalization(Some(1500.0)).unwrap();
        let json = w.to_json().unwrap();
        assert_eq!(Weights::from_json_str(&json).unwrap(), w);
    }

    #[test]
    fn rejects_bad_normalization() {
        let err = Weights::from_json_str(r#"{"normalize": -3.0}"#).unwrap_err();
        assert!(matches!(err, WeightsError::InvalidNormalization(v) if v == -3.0));
    }

    #[test]
    fn rejects_non_finite_weights() {
        let mut w = Weights::default();
        w.positional.major = f64::NAN;
        assert!(matches!(
            w.with_normalization(None),
            Err(WeightsError::NonFiniteWeight { name: "positional.major", .. })
        ));

        let mut w = Weights::default();
        w.alignment.two_minor.blocked.opponent = f64::INFINITY;
        assert!(matches!(
            w.with_normalization(None),
            Err(WeightsError::NonFiniteWeight { name: "alignment.two_minor", .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Weights::from_json_str("{not json"),
            Err(WeightsError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Weights::from_json_file("/nonexistent/pobo-weights.json").unwrap_err();
        assert!(matches!(err, WeightsError::Io { .. }));
    }

    #[test]
    fn opponent_threats_weigh_more() {
        let a = AlignmentWeights::default();
        assert!(a.three_minor.opponent.abs() > a.three_minor.mover);
        assert!(a.two_major.open_with_reserve.opponent.abs() > a.two_major.open_with_reserve.mover);
    }
}

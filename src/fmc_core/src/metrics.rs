use std::{fmt, str::FromStr};

use cube_sim::{Algorithm, Twist};
use serde::{Deserialize, Serialize};

use crate::{
    InvariantViolation, Result,
    moves::{is_half_turn, is_slice_pair, same_axis},
};

/// A move counting convention.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Half turn metric, every twist counts once.
    #[default]
    Htm,
    /// Quarter turn metric, half turns count twice.
    Qtm,
    /// Slice turn metric, a slice pair counts once.
    Stm,
    /// Axial turn metric, adjacent same-axis twists count once.
    Atm,
}

impl Metric {
    pub const ALL: [Self; 4] = [Metric::Htm, Metric::Qtm, Metric::Stm, Metric::Atm];
}

impl FromStr for Metric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "htm" => Ok(Metric::Htm),
            "qtm" => Ok(Metric::Qtm),
            "stm" => Ok(Metric::Stm),
            "atm" => Ok(Metric::Atm),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Htm => "HTM",
            Metric::Qtm => "QTM",
            Metric::Stm => "STM",
            Metric::Atm => "ATM",
        })
    }
}

/// Counts pairs found by a left to right scan that consumes both twists of
/// every pair it finds. This is not the best possible grouping.
fn scan_pairs(twists: &[Twist], is_pair: fn(Twist, Twist) -> bool) -> usize {
    let mut pairs = 0;
    let mut i = 0;

    while i + 1 < twists.len() {
        if is_pair(twists[i], twists[i + 1]) {
            pairs += 1;
            i += 2;
        } else {
            i += 1;
        }
    }

    pairs
}

/// Length of one twist stream. Streams never contain rotations.
#[must_use]
pub fn length(twists: &[Twist], metric: Metric) -> usize {
    let htm = twists.len();

    match metric {
        Metric::Htm => htm,
        Metric::Qtm => htm + twists.iter().filter(|&&twist| is_half_turn(twist)).count(),
        Metric::Stm => htm - scan_pairs(twists, is_slice_pair),
        Metric::Atm => htm - scan_pairs(twists, same_axis),
    }
}

/// Length of both streams of an algorithm. Pairs never span the two streams.
#[must_use]
pub fn algorithm_length(algorithm: &Algorithm, metric: Metric) -> usize {
    length(algorithm.twists(), metric) + length(algorithm.inverse_twists(), metric)
}

/// Lengths of an algorithm in every metric.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Lengths {
    pub htm: usize,
    pub qtm: usize,
    pub stm: usize,
    pub atm: usize,
}

impl Lengths {
    #[must_use]
    pub fn get(&self, metric: Metric) -> usize {
        match metric {
            Metric::Htm => self.htm,
            Metric::Qtm => self.qtm,
            Metric::Stm => self.stm,
            Metric::Atm => self.atm,
        }
    }
}

/// Lengths in every metric, checked against each other.
///
/// # Errors
///
/// If `QTM >= HTM >= STM` or `ATM <= HTM` does not hold.
pub fn lengths(algorithm: &Algorithm) -> Result<Lengths> {
    let lengths = Lengths {
        htm: algorithm_length(algorithm, Metric::Htm),
        qtm: algorithm_length(algorithm, Metric::Qtm),
        stm: algorithm_length(algorithm, Metric::Stm),
        atm: algorithm_length(algorithm, Metric::Atm),
    };

    if lengths.qtm < lengths.htm || lengths.htm < lengths.stm || lengths.atm > lengths.htm {
        return Err(InvariantViolation::MetricBounds {
            htm: lengths.htm,
            qtm: lengths.qtm,
            stm: lengths.stm,
            atm: lengths.atm,
        }
        .into());
    }

    Ok(lengths)
}

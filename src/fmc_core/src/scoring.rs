//! Results of regular competitions, where every attempt is a complete
//! solution of its scramble.

use cube_sim::Cube;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    accounting::MoveCount,
    config::{EngineConfig, NissPolicy},
    notation,
};

/// Number of moves of a final solution, or DNF.
///
/// The solution must return every piece home. Whole cube rotations are
/// ignored, so a solution may finish in any orientation.
///
/// # Errors
///
/// If the scramble or the solution is not valid notation.
pub fn final_moves(scramble: &str, solution: &str, config: &EngineConfig) -> Result<MoveCount> {
    if config.niss == NissPolicy::Forbid && (solution.contains("NISS") || solution.contains('(')) {
        debug!("{solution:?} uses inverse notation");
        return Ok(MoveCount::DNF);
    }

    let mut scramble = notation::parse(scramble)?;
    let mut solution = notation::parse(solution)?;
    scramble.clear_placements();
    solution.clear_placements();

    let mut cube = Cube::from(&scramble);
    cube.twist(&solution);

    if cube.corner_cycles() > 0
        || cube.edge_cycles() > 0
        || cube.center_cycles() > 0
        || cube.has_parity()
    {
        debug!("{solution} does not solve {scramble}");
        return Ok(MoveCount::DNF);
    }

    let moves = solution.twists().len() + solution.inverse_twists().len();
    if moves > config.max_moves {
        debug!("{solution} is longer than {} moves", config.max_moves);
        return Ok(MoveCount::DNF);
    }

    Ok(MoveCount::from_moves(moves))
}

/// [`final_moves`], with invalid notation counted as DNF.
#[must_use]
pub fn final_moves_or_dnf(scramble: &str, solution: &str, config: &EngineConfig) -> MoveCount {
    final_moves(scramble, solution, config).unwrap_or_else(|err| {
        warn!("Scoring {solution:?} as DNF: {err}");
        MoveCount::DNF
    })
}

/// The best result, DNS if there are none.
#[must_use]
pub fn best(results: &[MoveCount]) -> MoveCount {
    results.iter().copied().min().unwrap_or(MoveCount::DNS)
}

/// The mean to the hundredth, rounded half up. DNF if any attempt is not a
/// result.
#[must_use]
pub fn mean(results: &[MoveCount]) -> MoveCount {
    if results.is_empty() || !results.iter().all(|result| result.is_result()) {
        return MoveCount::DNF;
    }

    let len = results.len() as i64;
    let total = results.iter().copied().sum::<MoveCount>().hundredths();

    MoveCount::from_hundredths((total + len / 2) / len)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionFormat {
    /// Mean of three.
    #[default]
    Mo3,
    /// Best of one.
    Bo1,
    /// Best of two.
    Bo2,
}

impl CompetitionFormat {
    #[must_use]
    pub const fn attempts(self) -> usize {
        match self {
            CompetitionFormat::Mo3 => 3,
            CompetitionFormat::Bo1 => 1,
            CompetitionFormat::Bo2 => 2,
        }
    }

    /// The value competitors are ranked by. Missing attempts count as DNS.
    #[must_use]
    pub fn ranking(self, results: &[MoveCount]) -> MoveCount {
        let mut results = results.to_vec();
        results.resize(self.attempts(), MoveCount::DNS);
        results.truncate(self.attempts());

        match self {
            CompetitionFormat::Mo3 => mean(&results),
            CompetitionFormat::Bo1 | CompetitionFormat::Bo2 => best(&results),
        }
    }
}

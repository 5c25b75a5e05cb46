//! Move counts of chained contributions after cancellation.
//!
//! All counts are fixed point hundredths of a move so that stored results,
//! means and the DNF/DNS sentinels compare exactly.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
};

use cube_sim::{Algorithm, Mark};
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{Error, InvariantViolation, Result, moves, notation};

/// A number of moves times 100.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoveCount(i64);

impl MoveCount {
    pub const ZERO: MoveCount = MoveCount(0);
    pub const DNF: MoveCount = MoveCount(99_999_998);
    pub const DNS: MoveCount = MoveCount(99_999_999);

    #[must_use]
    pub const fn from_moves(moves: usize) -> MoveCount {
        MoveCount(moves as i64 * 100)
    }

    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> MoveCount {
        MoveCount(hundredths)
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Whether this is a real result rather than DNF or DNS.
    #[must_use]
    pub const fn is_result(self) -> bool {
        self.0 != Self::DNF.0 && self.0 != Self::DNS.0
    }
}

impl Add for MoveCount {
    type Output = MoveCount;

    fn add(self, rhs: Self) -> Self::Output {
        MoveCount(self.0 + rhs.0)
    }
}

impl Sub for MoveCount {
    type Output = MoveCount;

    fn sub(self, rhs: Self) -> Self::Output {
        MoveCount(self.0 - rhs.0)
    }
}

impl Sum for MoveCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MoveCount::ZERO, Add::add)
    }
}

impl fmt::Display for MoveCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == MoveCount::DNF {
            return f.write_str("DNF");
        }
        if *self == MoveCount::DNS {
            return f.write_str("DNS");
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = self.0.unsigned_abs() / 100;
        let fraction = self.0.unsigned_abs() % 100;

        match (fraction, fraction % 10) {
            (0, _) => write!(f, "{sign}{whole}"),
            (_, 0) => write!(f, "{sign}{whole}.{}", fraction / 10),
            _ => write!(f, "{sign}{whole}.{fraction:02}"),
        }
    }
}

/// The three figures reported for every contribution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Accounting {
    /// Length of the contribution as written.
    pub moves: MoveCount,
    /// Length of the whole skeleton from the root after cancellation.
    pub cumulative_moves: MoveCount,
    /// How many moves cancellation removed.
    pub cancel_moves: MoveCount,
}

impl Accounting {
    /// # Errors
    ///
    /// If `cancel_moves` would be negative.
    pub fn new(moves: MoveCount, parent: MoveCount, cumulative_moves: MoveCount) -> Result<Self> {
        let cancel_moves = moves + parent - cumulative_moves;

        if cancel_moves < MoveCount::ZERO {
            return Err(InvariantViolation::NegativeCancel {
                cancel: cancel_moves,
            }
            .into());
        }

        Ok(Accounting {
            moves,
            cumulative_moves,
            cancel_moves,
        })
    }
}

/// An insertion of `insertion` before move `insert_place` of `skeleton`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInsertion {
    pub skeleton: String,
    pub insert_place: usize,
    pub insertion: String,
}

/// What a competitor hands in to extend a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SolutionForm {
    /// Free text appended to the parent skeleton.
    Regular { solution: String },
    /// Insertions into the parent skeleton. Only the last insertion's
    /// skeleton is used, since each one already contains the ones before it.
    Insertions {
        insertions: Vec<ChainInsertion>,
        #[serde(default)]
        inverse: bool,
    },
}

/// A contribution accounted against its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub accounting: Accounting,
    /// The new skeleton from the root, cancelled.
    pub skeleton: Algorithm,
    /// The contribution by itself, normalized and cancelled.
    pub solution: Algorithm,
}

/// Length of a move sequence.
///
/// # Errors
///
/// If the text is not valid notation.
pub fn count_moves(text: &str) -> Result<MoveCount> {
    Ok(MoveCount::from_moves(notation::parse(text)?.len()))
}

/// Parses and fully cancels a sequence.
///
/// # Errors
///
/// If the text is not valid notation.
pub fn cancelled(text: &str) -> Result<Algorithm> {
    let mut algorithm = notation::parse(text)?;
    algorithm.cancel_moves();
    Ok(algorithm)
}

/// The skeleton of an insertion with the insertion written in.
///
/// # Errors
///
/// If the insert place is past the end of the skeleton or the result is not
/// valid notation.
pub fn next_skeleton(insertion: &ChainInsertion, cancel: bool) -> Result<String> {
    let twists = insertion.skeleton.split(' ').collect_vec();
    let place = insertion.insert_place;

    if place > twists.len() {
        return Err(Error::InsertPlaceOutOfRange {
            place,
            len: twists.len(),
        });
    }

    let text = format!(
        "{} {} {}",
        twists[..place].join(" "),
        insertion.insertion,
        twists[place..].join(" ")
    );

    let mut algorithm = notation::parse(&text)?;
    if cancel {
        algorithm.cancel_moves();
    }

    Ok(algorithm.to_string())
}

/// Accounts a contribution against the flattened skeleton of its parent.
///
/// # Errors
///
/// If any text is invalid notation, an insert place is out of range, or
/// cancellation removed a negative number of moves.
pub fn account(parent_skeleton: &str, form: &SolutionForm) -> Result<Contribution> {
    let parent = cancelled(parent_skeleton)?;
    let parent_moves = MoveCount::from_moves(parent.len());

    let contribution = match form {
        SolutionForm::Regular { solution } => {
            notation::reject_mixed_niss(solution)?;

            let moves = count_moves(solution)?;
            let skeleton = cancelled(&notation::join_skeleton([parent_skeleton, solution]))?;
            let cumulative = MoveCount::from_moves(skeleton.len());

            let mut solution = notation::parse(solution)?;
            solution.normalize();
            solution.cancel_moves();

            Contribution {
                accounting: Accounting::new(moves, parent_moves, cumulative)?,
                skeleton,
                solution,
            }
        }
        SolutionForm::Insertions { insertions, inverse } => {
            let moves = insertions
                .iter()
                .map(|insertion| count_moves(&insertion.insertion))
                .sum::<Result<MoveCount>>()?;

            let mut skeleton = match insertions.last() {
                Some(last) => notation::parse(&next_skeleton(last, true)?)?,
                None => parent.clone(),
            };
            if *inverse {
                skeleton = skeleton.inverse();
            }
            skeleton.normalize();
            skeleton.cancel_moves();

            let cumulative = MoveCount::from_moves(skeleton.len());

            Contribution {
                accounting: Accounting::new(moves, parent_moves, cumulative)?,
                solution: skeleton.clone(),
                skeleton,
            }
        }
    };

    debug!("Accounted {form:?} as {:?}", contribution.accounting);

    Ok(contribution)
}

/// Cancellation marks for a sequence, split by stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamMarks {
    pub normal: Vec<Mark>,
    pub inverse: Vec<Mark>,
}

/// Marks every twist of `groups`, written one after another, by what
/// cancellation does to it.
///
/// # Errors
///
/// If the joined text is not valid notation.
pub fn calc_marks<S: AsRef<str>>(groups: &[Vec<S>]) -> Result<StreamMarks> {
    let text = groups
        .iter()
        .flat_map(|group| group.iter().map(AsRef::as_ref))
        .join(" ");

    let mut algorithm = notation::parse(&text)?;
    let normal_len = algorithm.twists().len();

    let mut marks = algorithm.cancel_moves();
    let inverse = marks.split_off(normal_len);

    trace!("Marks for {text:?}: {marks:?} ({inverse:?})");

    Ok(StreamMarks {
        normal: marks,
        inverse,
    })
}

/// A written token with the mark of the twists it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedToken {
    pub token: String,
    pub mark: Mark,
}

/// Attaches marks to the tokens they came from.
///
/// Rotations take no mark. A token that produces several twists, such as a
/// slice move or moves written without spaces, takes all of their marks and
/// shows the strongest. Tokens inside parentheses or after
/// `NISS` take their marks from the inverse stream.
#[must_use]
pub fn apply_marks<S: AsRef<str>>(groups: &[Vec<S>], marks: &StreamMarks) -> Vec<Vec<MarkedToken>> {
    let mut cursors = [0, 0];
    let mut inverse = false;

    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|token| {
                    let token = token.as_ref();
                    let mut mark = Mark::None;

                    if token == "NISS" {
                        inverse = !inverse;
                    } else {
                        let core = token.trim_start_matches('(');
                        if core.len() != token.len() {
                            inverse = true;
                        }
                        let closes = core.ends_with(')');
                        let core = core.trim_end_matches(')');

                        if !core.is_empty() && !moves::is_rotation(core) {
                            let stream = usize::from(inverse);
                            let stream_marks = if inverse { &marks.inverse } else { &marks.normal };
                            for _ in 0..twist_count(core) {
                                let next = stream_marks.get(cursors[stream]).copied().unwrap_or_default();
                                mark = strongest(mark, next);
                                cursors[stream] += 1;
                            }
                        }

                        if closes {
                            inverse = false;
                        }
                    }

                    MarkedToken {
                        token: token.to_owned(),
                        mark,
                    }
                })
                .collect()
        })
        .collect()
}

/// Twists written by one token. Slices write two, and moves run together
/// without spaces, such as `RUR'`, write one each.
fn twist_count(token: &str) -> usize {
    Algorithm::parse(token).map_or(0, |algorithm| algorithm.twists().len())
}

fn strongest(a: Mark, b: Mark) -> Mark {
    match (a, b) {
        (Mark::None, other) | (other, Mark::None) => other,
        (Mark::Cancelled, Mark::Cancelled) => Mark::Cancelled,
        _ => Mark::Merged,
    }
}

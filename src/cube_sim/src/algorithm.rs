use std::{fmt, str::FromStr};

use itertools::Itertools;
use log::trace;
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use thiserror::Error;

use crate::{
    placement::{Placement, Rotation},
    twist::{Axis, Face, Twist},
};

#[derive(Parser)]
#[grammar = "notation.pest"]
pub struct NotationParser;

#[derive(Error, Debug)]
pub enum NotationError {
    #[error("Could not parse the move sequence:\n{0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("`NISS` and parenthesised inverse sections cannot be mixed in one sequence")]
    MixedInverseNotation,
}

/// What happened to a twist during cancellation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    None,
    Merged,
    Cancelled,
}

/// A parsed move sequence.
///
/// Rotations, wide moves and slices are resolved while parsing: every twist
/// is stored on the absolute face it turns and the accumulated rotation is
/// kept as a single trailing placement. The inverse stream holds the moves
/// written in NISS-inverse context together with its own placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Algorithm {
    twists: Vec<Twist>,
    inverse_twists: Vec<Twist>,
    placement: Placement,
    inverse_placement: Placement,
}

#[derive(Default)]
struct Stream {
    twists: Vec<Twist>,
    placement: Placement,
}

impl Stream {
    fn turn(&mut self, face: Face, power: u8) {
        if let Some(twist) = Twist::new(self.placement.face_at(face), power % 4) {
            self.twists.push(twist);
        }
    }

    fn rotate(&mut self, rotation: Rotation, power: u8) {
        self.placement = self.placement.rotated(rotation, power);
    }

    fn read_token(&mut self, pair: Pair<'_, Rule>) {
        let mut inner = pair.into_inner();
        let Some(base) = inner.next() else {
            unreachable!("the grammar requires a move before the amount")
        };

        let power = inner.next().map_or(1, |amount| match amount.as_str() {
            "2" | "2'" => 2,
            "'" | "3" => 3,
            _ => 1,
        });
        let inverse = negate(power);

        let letter = base.as_str();
        match base.as_rule() {
            Rule::face => self.turn(face_from_letter(letter), power),
            Rule::rotation => {
                let rotation = match letter {
                    "x" => Rotation::X,
                    "y" => Rotation::Y,
                    _ => Rotation::Z,
                };
                self.rotate(rotation, power);
            }
            Rule::slice => match letter {
                "M" => {
                    self.turn(Face::R, power);
                    self.turn(Face::L, inverse);
                    self.rotate(Rotation::X, inverse);
                }
                "E" => {
                    self.turn(Face::U, power);
                    self.turn(Face::D, inverse);
                    self.rotate(Rotation::Y, inverse);
                }
                _ => {
                    self.turn(Face::F, inverse);
                    self.turn(Face::B, power);
                    self.rotate(Rotation::Z, power);
                }
            },
            Rule::wide => {
                // A wide turn is the opposite face plus a rotation about the axis
                let face = face_from_letter(letter);
                let rotation = match face.axis() {
                    Axis::Ud => Rotation::Y,
                    Axis::Rl => Rotation::X,
                    Axis::Fb => Rotation::Z,
                };
                let rotation_power = if face as u8 & 1 == 0 { power } else { inverse };

                self.turn(face.opposite(), power);
                self.rotate(rotation, rotation_power);
            }
            rule => unreachable!("unexpected rule {rule:?} in a move token"),
        }
    }
}

const fn negate(power: u8) -> u8 {
    (4 - power % 4) % 4
}

fn face_from_letter(letter: &str) -> Face {
    match letter.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('U') => Face::U,
        Some('D') => Face::D,
        Some('R') => Face::R,
        Some('L') => Face::L,
        Some('F') => Face::F,
        Some('B') => Face::B,
        _ => unreachable!("the grammar only produces face letters, got {letter:?}"),
    }
}

/// Merges same-face twists that are adjacent, or separated only by a twist on
/// the opposite face, then puts every opposite-face pair in face order.
fn cancel_stream(twists: &mut Vec<Twist>) -> Vec<Mark> {
    let mut marks = vec![Mark::None; twists.len()];
    let mut stack: Vec<(Twist, Vec<usize>)> = Vec::with_capacity(twists.len());

    for (i, &twist) in twists.iter().enumerate() {
        let target = match stack.as_slice() {
            [.., top] if top.0.face() == twist.face() => Some(stack.len() - 1),
            [.., second, top]
                if top.0.axis() == twist.axis() && second.0.face() == twist.face() =>
            {
                Some(stack.len() - 2)
            }
            _ => None,
        };

        let Some(target) = target else {
            stack.push((twist, vec![i]));
            continue;
        };

        let entry = &mut stack[target];
        entry.1.push(i);

        match Twist::new(entry.0.face(), (entry.0.power() + twist.power()) % 4) {
            Some(merged) => {
                entry.0 = merged;
                for &j in &entry.1 {
                    marks[j] = Mark::Merged;
                }
            }
            None => {
                for &j in &entry.1 {
                    marks[j] = Mark::Cancelled;
                }
                stack.remove(target);
            }
        }
    }

    *twists = stack.into_iter().map(|(twist, _)| twist).collect();
    normalize_stream(twists);

    marks
}

fn normalize_stream(twists: &mut [Twist]) {
    for i in 1..twists.len() {
        if twists[i - 1].axis() == twists[i].axis() && twists[i - 1].face() > twists[i].face() {
            twists.swap(i - 1, i);
        }
    }
}

impl Algorithm {
    /// Parses free-form move notation.
    ///
    /// Moves may be separated by whitespace or written back to back. `NISS`
    /// toggles between the normal and the inverse stream and a parenthesised
    /// section is always read into the inverse stream.
    ///
    /// # Errors
    ///
    /// If the text contains anything other than moves, `NISS` and balanced
    /// parentheses.
    pub fn parse(text: &str) -> Result<Algorithm, NotationError> {
        let mut pairs = NotationParser::parse(Rule::algorithm, text).map_err(Box::new)?;
        let Some(algorithm) = pairs.next() else {
            return Ok(Algorithm::default());
        };

        let mut streams = [Stream::default(), Stream::default()];
        let mut current = 0;

        for pair in algorithm.into_inner() {
            match pair.as_rule() {
                Rule::niss => current ^= 1,
                Rule::inverse_section => {
                    for token in pair.into_inner() {
                        streams[1].read_token(token);
                    }
                    current = 0;
                }
                Rule::token => streams[current].read_token(pair),
                _ => {}
            }
        }

        let [normal, inverse] = streams;
        let algorithm = Algorithm {
            twists: normal.twists,
            inverse_twists: inverse.twists,
            placement: normal.placement,
            inverse_placement: inverse.placement,
        };

        trace!("Parsed {text:?} as {algorithm}");

        Ok(algorithm)
    }

    #[must_use]
    pub fn from_twists(twists: Vec<Twist>) -> Algorithm {
        Algorithm {
            twists,
            ..Algorithm::default()
        }
    }

    #[must_use]
    pub fn twists(&self) -> &[Twist] {
        &self.twists
    }

    #[must_use]
    pub fn inverse_twists(&self) -> &[Twist] {
        &self.inverse_twists
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn inverse_placement(&self) -> Placement {
        self.inverse_placement
    }

    /// Number of twists in both streams. Rotations are never counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.twists.len() + self.inverse_twists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the trailing rotations of both streams.
    pub fn clear_placements(&mut self) {
        self.placement = Placement::IDENTITY;
        self.inverse_placement = Placement::IDENTITY;
    }

    /// Puts every commuting opposite-face pair in face order.
    pub fn normalize(&mut self) {
        normalize_stream(&mut self.twists);
        normalize_stream(&mut self.inverse_twists);
    }

    /// Cancels both streams in place.
    ///
    /// Returns one mark per original twist, the normal stream first and the
    /// inverse stream after it.
    pub fn cancel_moves(&mut self) -> Vec<Mark> {
        let before = self.len();

        let mut marks = cancel_stream(&mut self.twists);
        marks.extend(cancel_stream(&mut self.inverse_twists));

        trace!("Cancelled {before} twists down to {}", self.len());

        marks
    }

    /// The sequence that undoes this one, as a single normal stream.
    ///
    /// For a stream without rotations this is the reversed sequence with
    /// every quarter turn flipped.
    #[must_use]
    pub fn inverse(&self) -> Algorithm {
        let placement = self.inverse_placement.then(self.placement.inverse());

        let twists = self
            .inverse_twists
            .iter()
            .copied()
            .chain(self.twists.iter().rev().map(|twist| {
                let twist = twist.inverse();
                twist.on_face(placement.face_at(twist.face()))
            }))
            .collect();

        Algorithm {
            twists,
            inverse_twists: Vec::new(),
            placement,
            inverse_placement: Placement::IDENTITY,
        }
    }
}

impl FromStr for Algorithm {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::parse(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn stream(twists: &[Twist], placement: Placement) -> String {
            twists
                .iter()
                .map(ToString::to_string)
                .chain((placement != Placement::IDENTITY).then(|| placement.name().to_owned()))
                .join(" ")
        }

        let normal = stream(&self.twists, self.placement);
        let inverse = stream(&self.inverse_twists, self.inverse_placement);

        match (normal.is_empty(), inverse.is_empty()) {
            (_, true) => f.write_str(&normal),
            (true, false) => write!(f, "({inverse})"),
            (false, false) => write!(f, "{normal} ({inverse})"),
        }
    }
}

//! The hand-off rule for chained submissions that stop at EO, DR or HTR.
//!
//! The next competitor can always turn the final move of a stream the other
//! way or merge it with what follows, so a stream may only end on a clockwise
//! quarter turn. A half turn that commutes with the final move is equally
//! free to move past the boundary.

use cube_sim::{Algorithm, Twist};
use log::debug;

use crate::{
    Error, Result,
    moves::{is_clockwise, is_half_turn, same_axis},
    phase::Phase,
};

fn ends_with_free_half_turn(stream: &[Twist]) -> bool {
    match stream {
        [.., penultimate, last] => {
            same_axis(*penultimate, *last) && (is_half_turn(*penultimate) || is_half_turn(*last))
        }
        _ => false,
    }
}

/// Whether a contribution's two streams end in a way the next competitor
/// cannot improve on for free.
#[must_use]
pub fn is_legal_boundary(twists: &[Twist], inverse_twists: &[Twist]) -> bool {
    let last = twists.last().copied();
    let last_inverse = inverse_twists.last().copied();

    if last.is_some_and(|twist| !is_clockwise(twist)) {
        return false;
    }

    if last_inverse.is_some_and(|twist| !is_clockwise(twist)) {
        return false;
    }

    if let (Some(last), Some(last_inverse)) = (last, last_inverse) {
        if !same_axis(last, last_inverse) {
            return false;
        }
    }

    !ends_with_free_half_turn(twists) && !ends_with_free_half_turn(inverse_twists)
}

/// Checks the boundary rule for a contribution that claims to end in `phase`.
///
/// # Errors
///
/// If `phase` is not one of the phases a chain hands off at.
pub fn check_boundary(phase: Phase, algorithm: &Algorithm) -> Result<bool> {
    if !matches!(phase, Phase::Eo | Phase::Dr | Phase::Htr) {
        return Err(Error::UnsupportedChainState(phase));
    }

    let legal = is_legal_boundary(algorithm.twists(), algorithm.inverse_twists());
    debug!("Boundary of {algorithm} at {phase} is legal: {legal}");

    Ok(legal)
}

//! Predicates over single encoded twists and over raw move tokens.
//!
//! A twist is `face << 2 | power`, so everything here is plain integer
//! arithmetic on [`Twist::raw`].

use cube_sim::Twist;

use crate::{Result, notation};

/// `R + L'`, `U + D'` and `F' + B` style pairs, one sum per axis. Any
/// same-axis pair with one of these sums turns the middle slice.
pub const SLICE_SUMS: [u8; 3] = [8, 24, 40];

#[must_use]
pub fn is_clockwise(twist: Twist) -> bool {
    twist.raw() % 4 == 1
}

#[must_use]
pub fn is_half_turn(twist: Twist) -> bool {
    twist.raw() % 4 == 2
}

/// Whether two twists are on the same axis, which is exactly when they
/// commute and may be swapped.
#[must_use]
pub fn same_axis(a: Twist, b: Twist) -> bool {
    a.raw() >> 3 == b.raw() >> 3
}

#[must_use]
pub fn is_slice_pair(a: Twist, b: Twist) -> bool {
    same_axis(a, b) && SLICE_SUMS.contains(&(a.raw() + b.raw()))
}

/// Whether a written token reorients the whole cube instead of turning a
/// layer.
#[must_use]
pub fn is_rotation(token: &str) -> bool {
    token.starts_with(['x', 'y', 'z'])
}

#[must_use]
pub fn is_same_face(a: &str, b: &str) -> bool {
    match (a.chars().next(), b.chars().next()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether two written tokens turn layers of the same axis.
///
/// # Errors
///
/// If either token is not valid notation.
pub fn is_swappable_tokens(a: &str, b: &str) -> Result<bool> {
    if a.is_empty() || b.is_empty() {
        return Ok(false);
    }

    let algorithm = notation::parse(&format!("{a} {b}"))?;

    Ok(match algorithm.twists() {
        [a, b, ..] => same_axis(*a, *b),
        _ => false,
    })
}

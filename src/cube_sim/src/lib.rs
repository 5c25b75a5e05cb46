#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]

//! A facelet level 3x3x3 simulator: move notation, cancellation, whole cube
//! placements and the reduction predicates used to grade partial solves.

pub mod algorithm;
pub mod cube;
pub mod facelets;
pub mod placement;
pub mod twist;

pub use algorithm::{Algorithm, Mark, NotationError};
pub use cube::{Cube, PieceCycle};
pub use placement::{Placement, Rotation};
pub use twist::{Axis, Face, Twist};

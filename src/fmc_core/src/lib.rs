#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

//! Move accounting and phase classification for chained fewest-moves
//! submissions.
//!
//! Free-form notation is normalised into twist streams, streams are counted
//! after cancellation against the skeleton they extend, and the resulting
//! cube is classified into a competition phase (EO, DR, HTR, skeleton, ...).

pub mod accounting;
pub mod chain;
pub mod config;
pub mod dr;
mod error;
pub mod legality;
pub mod metrics;
pub mod moves;
pub mod notation;
pub mod phase;
pub mod scoring;

pub use accounting::{Accounting, ChainInsertion, MoveCount, SolutionForm};
pub use error::{Error, InvariantViolation, Result};
pub use metrics::Metric;
pub use phase::Phase;

use std::{fmt, str::FromStr};

use cube_sim::{Cube, PieceCycle};
use itertools::Itertools;
use log::debug;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// How far a chain has got. Stored as its discriminant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Phase {
    Finished = 0,
    Scrambled = 1,
    Eo = 2,
    Dr = 3,
    Htr = 4,
    Skeleton = 5,
    Insertions = 6,
}

impl Phase {
    pub const ALL: [Self; 7] = [
        Phase::Finished,
        Phase::Scrambled,
        Phase::Eo,
        Phase::Dr,
        Phase::Htr,
        Phase::Skeleton,
        Phase::Insertions,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::Finished => "FINISHED",
            Phase::Scrambled => "SCRAMBLED",
            Phase::Eo => "EO",
            Phase::Dr => "DR",
            Phase::Htr => "HTR",
            Phase::Skeleton => "SKELETON",
            Phase::Insertions => "INSERTIONS",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.label().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Everything the phase decision looks at, read from the best placement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PhaseSignals {
    pub solved: bool,
    pub htr: bool,
    pub dr: bool,
    pub eo: bool,
    pub corner_cycles: usize,
    pub edge_cycles: usize,
}

/// A skeleton has at most this many corner and edge cycles left.
pub const SKELETON_CYCLES: usize = 3;

impl PhaseSignals {
    #[must_use]
    pub fn of(cube: &Cube) -> PhaseSignals {
        let best = cube.best_placement();

        PhaseSignals {
            solved: best.is_solved(),
            htr: best.is_half_turn_reduction_solved(),
            dr: !best.domino_reduction_status().is_empty(),
            eo: !best.edge_orientation_status().is_empty(),
            corner_cycles: best.corner_cycles(),
            edge_cycles: best.edge_cycles(),
        }
    }

    #[must_use]
    pub fn phase(self) -> Phase {
        if self.solved {
            return Phase::Finished;
        }

        if self.corner_cycles + self.edge_cycles <= SKELETON_CYCLES {
            return Phase::Skeleton;
        }

        if self.htr {
            Phase::Htr
        } else if self.dr {
            Phase::Dr
        } else if self.eo {
            Phase::Eo
        } else {
            Phase::Scrambled
        }
    }
}

#[must_use]
pub fn classify(cube: &Cube) -> Phase {
    let signals = PhaseSignals::of(cube);
    let phase = signals.phase();

    debug!("Classified {signals:?} as {phase}");

    phase
}

fn corner_label(cycle: &PieceCycle) -> String {
    let twist = match cycle.orientation {
        1 => "+",
        2 => "-",
        _ => "",
    };

    format!("{}C{twist}", cycle.length)
}

fn edge_label(cycle: &PieceCycle) -> String {
    let flip = if cycle.orientation == 0 { "" } else { "'" };

    format!("{}E{flip}", cycle.length)
}

/// Cycles left on the best placement, as in `3C2E2E'`.
///
/// Corner cycles come first with `+` or `-` for a net twist, then edge cycles
/// with `'` for a net flip, then the number of moved centers as `4X`.
#[must_use]
pub fn cycle_detail(cube: &Cube) -> String {
    let best = cube.best_placement();
    let moved_centers = best.moved_centers();

    best.corner_status()
        .iter()
        .map(corner_label)
        .chain(best.edge_status().iter().map(edge_label))
        .chain((moved_centers > 0).then(|| format!("{moved_centers}X")))
        .join("")
}

/// The status shown next to a phase: the oriented axes for EO, the reduced
/// axes for DR, and the remaining cycles for a skeleton.
#[must_use]
pub fn status(cube: &Cube, phase: Phase) -> String {
    match phase {
        Phase::Eo => cube.edge_orientation_status().iter().join(","),
        Phase::Dr => cube.domino_reduction_status().iter().join(","),
        Phase::Skeleton => format!("L{}", cycle_detail(cube)),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use cube_sim::Algorithm;

    use super::*;

    fn phase_of(text: &str) -> Phase {
        classify(&Cube::from(&Algorithm::parse(text).unwrap()))
    }

    #[test_log::test]
    fn decision_order() {
        let signals = PhaseSignals {
            solved: false,
            htr: true,
            dr: true,
            eo: true,
            corner_cycles: 3,
            edge_cycles: 3,
        };

        assert_eq!(signals.phase(), Phase::Htr);
        assert_eq!(PhaseSignals { htr: false, ..signals }.phase(), Phase::Dr);
        assert_eq!(
            PhaseSignals {
                htr: false,
                dr: false,
                ..signals
            }
            .phase(),
            Phase::Eo
        );
        assert_eq!(
            PhaseSignals {
                htr: false,
                dr: false,
                eo: false,
                ..signals
            }
            .phase(),
            Phase::Scrambled
        );
    }

    #[test_log::test]
    fn skeleton_override() {
        let near = PhaseSignals {
            htr: true,
            dr: true,
            eo: true,
            corner_cycles: 2,
            edge_cycles: 1,
            ..PhaseSignals::default()
        };
        assert_eq!(near.phase(), Phase::Skeleton);

        let solved = PhaseSignals {
            solved: true,
            ..PhaseSignals::default()
        };
        assert_eq!(solved.phase(), Phase::Finished);
    }

    #[test_log::test]
    fn classification() {
        assert_eq!(phase_of(""), Phase::Finished);
        assert_eq!(phase_of("x"), Phase::Finished);
        assert_eq!(phase_of("R U R' U'"), Phase::Eo);
        assert_eq!(phase_of("U R2 F2 U"), Phase::Dr);
        assert_eq!(phase_of("U R2 U B2 U2 F2 D"), Phase::Dr);
        assert_eq!(phase_of("R2 U2 F2"), Phase::Htr);
        assert_eq!(phase_of("R2 U2 F2 L2 D2 B2 R2"), Phase::Htr);
        assert_eq!(phase_of("R U R' D R U' R' D'"), Phase::Skeleton);
        assert_eq!(phase_of("R"), Phase::Skeleton);
        assert_eq!(phase_of("M"), Phase::Skeleton);
        assert_eq!(phase_of("U R2 U R2 U"), Phase::Skeleton);
        assert_eq!(phase_of("R U F"), Phase::Scrambled);
    }

    #[test_log::test]
    fn statuses() {
        let cube = |text: &str| Cube::from(&Algorithm::parse(text).unwrap());

        assert_eq!(status(&cube("R"), Phase::Eo), "UD,FB");
        assert_eq!(status(&cube("R"), Phase::Dr), "RL");
        assert_eq!(status(&cube("R U R' D R U' R' D'"), Phase::Skeleton), "L3C");
        assert_eq!(status(&cube("U R2 U R2 U"), Phase::Skeleton), "L6C3E2E");
        assert_eq!(status(&cube("M"), Phase::Skeleton), "L4E4X");
        assert_eq!(status(&cube("R U R' U'"), Phase::Skeleton), "L2C+2C-3E");
        assert_eq!(status(&cube("R"), Phase::Htr), "");
    }

    #[test]
    fn phase_labels() {
        for phase in Phase::ALL {
            assert_eq!(phase.to_string().parse::<Phase>(), Ok(phase));
        }
        assert_eq!("dr".parse::<Phase>(), Ok(Phase::Dr));
    }
}

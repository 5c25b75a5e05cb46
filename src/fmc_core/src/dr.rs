//! Subtypes of domino reduction, read from the facelet projection of a cube.
//!
//! A DR is described by how many corners and edges are off the axis that an
//! HTR would also need, and by the fewest quarter turns of the DR axis, with
//! any half turns in between, that reach a half turn state.

use cube_sim::{
    Axis, Cube,
    facelets::{CORNER_FACELETS, facelet_face},
};
use itertools::Itertools;
use log::trace;

/// For each axis, the facelet of every corner (in `CORNER_FACELETS` order)
/// that lies on one of that axis's two faces.
const CORNER_AXIS_FACELETS: [[usize; 8]; 3] = [
    [8, 6, 0, 2, 29, 27, 33, 35],
    [9, 38, 36, 11, 15, 44, 42, 17],
    [20, 18, 47, 45, 26, 24, 53, 51],
];

/// One facelet of each edge in the layer that a DR on the axis leaves free.
const NON_DR_EDGE_FACELETS: [[usize; 4]; 3] = [
    [10, 37, 16, 43],
    [23, 48, 21, 50],
    [7, 1, 28, 34],
];

/// Corners sharing a label lie on one edge line. One row per direction of
/// the line, in `Axis` order.
const CORNER_LINES: [[u8; 8]; 3] = [
    [0, 1, 2, 3, 0, 1, 2, 3],
    [0, 0, 1, 1, 2, 2, 3, 3],
    [0, 1, 1, 0, 2, 3, 3, 2],
];

/// Quarter turns the corners need when four are bad, by normal state,
/// inverse state and corner parity.
const QUARTER_TURNS: [[[u8; 2]; 2]; 2] = [[[2, 1], [4, 3]], [[4, 3], [2, 5]]];

/// How four bad corners are arranged: 1 when they split into two parallel
/// edge lines, otherwise 2. `normal` looks at the positions of the bad
/// corners and `inverse` at the home positions of the pieces in them. Zero
/// when there are not exactly four bad corners.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CornerState {
    pub normal: u8,
    pub inverse: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrDescription {
    /// Off-axis edges, counted twice.
    pub edges: usize,
    pub corners: usize,
    pub quarter_turns: u8,
    pub eo: bool,
    pub eo_status: Vec<Axis>,
    pub dr: bool,
    pub dr_status: Vec<Axis>,
    pub htr: bool,
    pub solved: bool,
    pub fake_htr: bool,
    pub parity: bool,
    pub corner_state: CornerState,
}

const fn check_axis(axis: Axis) -> Axis {
    Axis::ALL[(axis as usize + 1) % 3]
}

fn on_axis(letter: u8, axis: Axis) -> bool {
    axis.faces()
        .iter()
        .any(|face| face.letter() == char::from(letter))
}

/// Home position of the corner piece at `corner`, read from its stickers.
fn home_corner(facelets: &[u8], corner: usize) -> Option<usize> {
    let stickers = CORNER_FACELETS[corner].map(|i| char::from(facelets[i as usize]));

    CORNER_FACELETS.iter().position(|home| {
        home.iter()
            .all(|&i| stickers.contains(&facelet_face(i).letter()))
    })
}

fn arrangement(corners: &[usize]) -> u8 {
    let paired = CORNER_LINES.iter().any(|lines| {
        let counts = corners.iter().map(|&corner| lines[corner]).counts();
        counts.len() == 2 && counts.values().all(|&count| count == 2)
    });

    if paired { 1 } else { 2 }
}

#[must_use]
pub fn describe(cube: &Cube) -> DrDescription {
    let eo_status = cube.edge_orientation_status();
    let dr_status = cube.domino_reduction_status();

    let mut description = DrDescription {
        eo: !eo_status.is_empty(),
        dr: !dr_status.is_empty(),
        htr: cube.is_half_turn_reduction_solved(),
        solved: cube.best_placement().is_solved(),
        eo_status,
        dr_status,
        ..DrDescription::default()
    };

    if !description.dr && !description.eo {
        return description;
    }

    description.parity = cube.has_parity();

    let Some(&axis) = description.dr_status.first() else {
        return description;
    };

    let facelets = cube.to_facelet_string().into_bytes();
    let check = check_axis(axis);
    let check_facelets = &CORNER_AXIS_FACELETS[check as usize];

    let bad_corners = (0..8)
        .filter(|&corner| !on_axis(facelets[check_facelets[corner]], check))
        .collect_vec();

    description.corners = bad_corners.len();
    description.edges = 2 * NON_DR_EDGE_FACELETS[axis as usize]
        .iter()
        .filter(|&&facelet| !on_axis(facelets[facelet], check))
        .count();

    let corner_turns = match bad_corners.len() {
        0 | 8 if description.parity => 3,
        2 | 6 if !description.parity => 4,
        4 => {
            let homes = bad_corners
                .iter()
                .filter_map(|&corner| home_corner(&facelets, corner))
                .collect_vec();

            let state = CornerState {
                normal: arrangement(&bad_corners),
                inverse: arrangement(&homes),
            };
            description.corner_state = state;

            QUARTER_TURNS[usize::from(state.normal - 1)][usize::from(state.inverse - 1)]
                [usize::from(description.parity)]
        }
        // The stickers alone do not tell a fake HTR from a real one, or three
        // quarter turns from five, so these look at the whole corner permutation
        _ => {
            let Some(turns) = cube.corner_quarter_turns(axis) else {
                return description;
            };
            description.fake_htr = matches!(bad_corners.len(), 0 | 8) && turns == 4;
            turns
        }
    };

    // When the corners need at most one quarter turn the edges decide. None
    // are needed with no bad edges and solved corners, one quarter turn fixes
    // exactly four bad edges, and anything else costs two more.
    description.quarter_turns = match (corner_turns, description.edges) {
        (0, 0) | (1, 4) => corner_turns,
        (0 | 1, _) => corner_turns + 2,
        _ => corner_turns,
    };

    trace!("Described DR on {axis}: {description:?}");

    description
}

#[cfg(test)]
mod tests {
    use cube_sim::Algorithm;

    use super::*;
    use crate::phase::{Phase, classify};

    /// Moves that keep a DR on UD.
    const DR_MOVES: [&str; 10] = ["U", "U'", "D", "D'", "U2", "D2", "R2", "L2", "F2", "B2"];

    fn cube(text: &str) -> Cube {
        Cube::from(&Algorithm::parse(text).unwrap())
    }

    fn summary(text: &str) -> (usize, usize, bool, u8) {
        let description = describe(&cube(text));
        (
            description.corners,
            description.edges,
            description.parity,
            description.quarter_turns,
        )
    }

    fn corner_state(text: &str) -> (u8, u8) {
        let state = describe(&cube(text)).corner_state;
        (state.normal, state.inverse)
    }

    #[test_log::test]
    fn outside_reduction() {
        let scrambled = describe(&cube("R U F"));
        assert_eq!(scrambled, DrDescription::default());

        let eo = describe(&cube("R U R' U'"));
        assert!(eo.eo);
        assert_eq!(eo.eo_status, [Axis::Fb]);
        assert!(!eo.dr);
        assert!(!eo.parity);
        assert_eq!(eo.quarter_turns, 0);
    }

    #[test_log::test]
    fn solved_and_half_turn_states() {
        let solved = describe(&cube(""));
        assert!(solved.solved);
        assert!(solved.htr);
        assert_eq!(solved.dr_status, Axis::ALL);
        assert_eq!(solved.eo_status, Axis::ALL);

        let htr = describe(&cube("R2 U2 F2"));
        assert!(htr.htr);
        assert_eq!((htr.corners, htr.edges, htr.quarter_turns), (0, 0, 0));
    }

    #[test_log::test]
    fn single_quarter_turn() {
        assert_eq!(summary("U"), (4, 4, true, 1));
        assert_eq!(corner_state("U"), (1, 1));

        for (text, axis) in [("R", Axis::Rl), ("F", Axis::Fb)] {
            let description = describe(&cube(text));
            assert_eq!(description.dr_status, [axis]);
            assert_eq!(description.quarter_turns, 1, "{text}");
            assert_eq!(description.corner_state, CornerState { normal: 1, inverse: 1 });
        }
    }

    #[test_log::test]
    fn two_quarter_turns() {
        for text in [
            "U R2 U",
            "U F2 U'",
            "R2 U R2 U",
            "U2 D B2 U",
            "D F2 U2 R2 D",
            "U D",
            "D2 U D B2",
            "U R2 L2 D",
            "F R2 F",
        ] {
            let description = describe(&cube(text));
            assert!(!description.htr, "{text}");
            assert!(!description.parity, "{text}");
            assert_eq!(description.quarter_turns, 2, "{text}");
        }

        assert_eq!(summary("U D"), (8, 8, false, 2));
        assert_eq!(summary("U R2 L2 D"), (0, 4, false, 2));
        assert_eq!(corner_state("U R2 U"), (2, 2));
        assert_eq!(corner_state("D F2 U2 R2 D"), (1, 1));
    }

    #[test_log::test]
    fn no_bad_corners() {
        assert_eq!(summary("D' L2 D2 B2 U2 D L2 U2 F2 U2 D'"), (0, 6, true, 3));

        for text in ["U B2 D' L2 U2 B2 U' F2 D'", "U' B2 U R2 D2 F2 U R2 D' B2"] {
            let fake = describe(&cube(text));
            assert!(fake.fake_htr, "{text}");
            assert!(!fake.htr, "{text}");
            assert_eq!((fake.corners, fake.edges, fake.quarter_turns), (0, 4, 4));
        }

        assert!(!describe(&cube("U R2 L2 D")).fake_htr);

        let both_slices = describe(&cube("U D"));
        assert_eq!(both_slices.dr_status, [Axis::Ud]);
        assert_eq!(both_slices.eo_status, [Axis::Rl, Axis::Fb]);
        assert!(!both_slices.fake_htr);
    }

    #[test_log::test]
    fn two_or_six_bad_corners() {
        assert_eq!(summary("U R2 U R2 U"), (2, 2, true, 3));
        assert_eq!(summary("L2 U' R2 U B2 U"), (2, 4, true, 3));
        assert_eq!(summary("U F2 D R2 D"), (2, 2, true, 3));
        assert_eq!(summary("U F2 D' L2 B2 D' L2 U F2 U' D2 F2"), (2, 2, true, 5));
        assert_eq!(summary("D' L2 U B2 U' B2 D"), (2, 2, false, 4));

        assert_eq!(summary("D R2 D B2 U' B2 D'"), (6, 6, false, 4));
        assert_eq!(summary("U R2 U L2 U"), (6, 4, true, 3));
        assert_eq!(summary("U' F2 D U2 D2 B2 D' F2 D R2 D"), (6, 4, true, 5));
    }

    #[test_log::test]
    fn four_bad_corners() {
        let check = |text: &str, state: (u8, u8), expected: (usize, usize, bool, u8)| {
            assert_eq!(corner_state(text), state, "{text}");
            assert_eq!(summary(text), expected, "{text}");
        };

        check("U L2 D' F2 D2 R2 D R2 U'", (1, 2), (4, 2, false, 4));
        check("U R2 D L2 D2 B2 U F2 U2 F2 L2 D'", (2, 1), (4, 4, false, 4));
        check("U R2 U F2 D2 L2 D", (1, 2), (4, 4, true, 3));
        check("U F2 U2 R2 D F2 U", (2, 1), (4, 4, true, 3));
        check("D F2 D F2 D D R2 U", (1, 2), (4, 6, true, 3));
        check("F2 U R2 U B2 U' R2 F2 D' L2 U", (2, 2), (4, 6, true, 5));

        // The corners are one quarter turn away but the edges are not
        check("D B2 D F2 B2 U", (1, 1), (4, 6, true, 3));
    }

    #[test_log::test]
    fn never_more_than_the_quarter_turns_used() {
        let sequences = (1..=3).flat_map(|length| {
            std::iter::repeat_n(DR_MOVES, length).multi_cartesian_product()
        });

        for moves in sequences {
            let text = moves.join(" ");
            let used = moves.iter().filter(|turn| !turn.contains('2')).count();
            let description = describe(&cube(&text));

            assert!(description.dr, "{text}");
            assert!(usize::from(description.quarter_turns) <= used, "{text}");
            assert_eq!(description.quarter_turns % 2 == 1, description.parity, "{text}");
            assert_eq!(description.quarter_turns == 0, description.htr, "{text}");
        }
    }

    #[test_log::test]
    fn agrees_with_phase() {
        for text in ["U R2 L2 D", "L2 U' R2 U B2 U", "D R2 D B2 U' B2 D'", "U R2 U2"] {
            let cube = cube(text);
            assert!(describe(&cube).dr);
            assert_eq!(classify(&cube), Phase::Dr);
        }
    }
}

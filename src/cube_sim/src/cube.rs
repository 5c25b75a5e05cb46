use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::LazyLock,
};

use log::debug;

use crate::{
    algorithm::Algorithm,
    facelets::{
        self, CENTER_LOOKUP, CENTERS, CORNER_FACELETS, CORNER_LOOKUP, EDGE_FACELETS, EDGE_LOOKUP,
        FACE_TURNS, Facelets, IDENTITY, facelet_face,
    },
    placement::Placement,
    twist::{Axis, Face, Twist},
};

/// A cycle of pieces, or a single piece twisted or flipped in place.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PieceCycle {
    pub length: usize,
    /// Net twist of a corner cycle (0, 1 or 2) or net flip of an edge cycle
    /// (0 or 1).
    pub orientation: u8,
}

/// The state of a 3x3x3 as a map from facelet positions to stickers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    facelets: Facelets,
}

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

/// Slice edges of each axis, indexing `EDGE_FACELETS`.
const SLICE_EDGES: [[usize; 4]; 3] = [[8, 9, 10, 11], [1, 3, 5, 7], [0, 2, 4, 6]];

/// Corner permutations reachable with half turns only.
static HALF_TURN_CORNERS: LazyLock<HashSet<[u8; 8]>> = LazyLock::new(|| {
    let half_turns = Face::ALL.map(|face| facelets::power(&FACE_TURNS[face as usize], 2));

    let mut seen = HashSet::from([corners(&IDENTITY).0]);
    let mut frontier = vec![IDENTITY];

    while !frontier.is_empty() {
        let mut next = Vec::new();

        for state in &frontier {
            for turn in &half_turns {
                let candidate = facelets::apply(state, turn);
                if seen.insert(corners(&candidate).0) {
                    next.push(candidate);
                }
            }
        }

        frontier = next;
    }

    debug!("Found {} half turn corner permutations", seen.len());

    seen
});

/// Canonical member of the class of corner permutations that differ only by
/// relabelling pieces with a half turn permutation. Members of one class need
/// the same quarter turns to reach the half turn group.
fn half_turn_class(permutation: &[u8; 8]) -> [u8; 8] {
    HALF_TURN_CORNERS
        .iter()
        .map(|relabel| permutation.map(|piece| relabel[piece as usize]))
        .min()
        .unwrap_or(*permutation)
}

/// For each axis, the fewest quarter turns of that axis, with free half turns
/// in between, that take each corner class into the half turn group.
static CORNER_QUARTER_TURNS: LazyLock<[HashMap<[u8; 8], u8>; 3]> = LazyLock::new(|| {
    Axis::ALL.map(|axis| {
        let half_turns = Face::ALL.map(|face| facelets::power(&FACE_TURNS[face as usize], 2));
        let quarter_turns = axis
            .faces()
            .into_iter()
            .flat_map(|face| [1, 3].map(|power| facelets::power(&FACE_TURNS[face as usize], power)))
            .collect::<Vec<_>>();

        let mut distances = HashMap::from([(half_turn_class(&corners(&IDENTITY).0), 0)]);
        let mut queue = VecDeque::from([IDENTITY]);

        while let Some(state) = queue.pop_front() {
            let distance = distances[&half_turn_class(&corners(&state).0)];

            for (turns, cost) in [(&half_turns[..], 0), (&quarter_turns[..], 1)] {
                for turn in turns {
                    let next = facelets::apply(&state, turn);
                    let class = half_turn_class(&corners(&next).0);

                    if distances
                        .get(&class)
                        .is_some_and(|&known| known <= distance + cost)
                    {
                        continue;
                    }

                    distances.insert(class, distance + cost);
                    if cost == 0 {
                        queue.push_front(next);
                    } else {
                        queue.push_back(next);
                    }
                }
            }
        }

        debug!("Found {} corner classes for {axis}", distances.len());

        distances
    })
});

/// Corner permutation and orientation, indexed by position.
fn corners(state: &Facelets) -> ([u8; 8], [u8; 8]) {
    let mut permutation = [0; 8];
    let mut orientation = [0; 8];

    for (i, facelets) in CORNER_FACELETS.iter().enumerate() {
        let (piece, k) = CORNER_LOOKUP[state[facelets[0] as usize] as usize];
        permutation[i] = piece;
        orientation[i] = (3 - k) % 3;
    }

    (permutation, orientation)
}

/// Edge permutation and orientation, indexed by position.
fn edges(state: &Facelets) -> ([u8; 12], [u8; 12]) {
    let mut permutation = [0; 12];
    let mut orientation = [0; 12];

    for (i, facelets) in EDGE_FACELETS.iter().enumerate() {
        let (piece, k) = EDGE_LOOKUP[state[facelets[0] as usize] as usize];
        permutation[i] = piece;
        orientation[i] = k;
    }

    (permutation, orientation)
}

fn centers(state: &Facelets) -> [u8; 6] {
    CENTERS.map(|center| CENTER_LOOKUP[state[center as usize] as usize])
}

fn cycles_of(permutation: &[u8]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; permutation.len()];
    let mut cycles = Vec::new();

    for start in 0..permutation.len() {
        if seen[start] {
            continue;
        }

        let mut cycle = Vec::new();
        let mut i = start;
        while !seen[i] {
            seen[i] = true;
            cycle.push(i);
            i = permutation[i] as usize;
        }

        cycles.push(cycle);
    }

    cycles
}

fn is_odd(permutation: &[u8]) -> bool {
    cycles_of(permutation)
        .iter()
        .map(|cycle| cycle.len() - 1)
        .sum::<usize>()
        % 2
        == 1
}

fn piece_status(permutation: &[u8], orientation: &[u8], modulus: u8) -> Vec<PieceCycle> {
    let mut status = cycles_of(permutation)
        .into_iter()
        .map(|cycle| PieceCycle {
            length: cycle.len(),
            orientation: cycle.iter().map(|&i| orientation[i]).sum::<u8>() % modulus,
        })
        .filter(|cycle| cycle.length > 1 || cycle.orientation != 0)
        .collect::<Vec<_>>();

    status.sort_by(|a, b| b.length.cmp(&a.length));

    status
}

/// Estimated number of three-cycles needed to solve one kind of piece.
fn piece_cycles(permutation: &[u8], orientation: &[u8], modulus: u8) -> usize {
    let mut total = 0;
    let mut twisted_cycles = 0;
    let mut in_place = [0_usize; 3];

    for cycle in piece_status(permutation, orientation, modulus) {
        if cycle.length == 1 {
            in_place[cycle.orientation as usize] += 1;
        } else {
            total += cycle.length / 2;
            if cycle.orientation != 0 {
                twisted_cycles += 1;
            }
        }
    }

    // An odd permutation always has an even cycle, so this cannot underflow
    if is_odd(permutation) {
        total -= 1;
    }

    total += twisted_cycles;

    if modulus == 3 {
        let (a, b) = (in_place[1], in_place[2]);
        total += 2 * a.min(b) + 2 * a.abs_diff(b).div_ceil(3);
    } else {
        total += 2 * in_place[1].div_ceil(2);
    }

    total
}

fn edge_oriented(state: &Facelets, axis: Axis) -> bool {
    let primary = if axis == Axis::Ud { Axis::Fb } else { Axis::Ud };

    let reference = |pair: [u8; 2]| {
        let on = |i: usize, axis: Axis| facelet_face(pair[i]).axis() == axis;

        if on(0, primary) {
            0
        } else if on(1, primary) {
            1
        } else if on(0, axis) {
            0
        } else {
            1
        }
    };

    EDGE_FACELETS.iter().all(|&position| {
        let stickers = position.map(|i| state[i as usize]);
        state[position[reference(position)] as usize] == stickers[reference(stickers)]
    })
}

fn domino_reduced(state: &Facelets, axis: Axis) -> bool {
    let sticker_on = |i: u8, axis: Axis| {
        facelet_face(i).axis() != axis || facelet_face(state[i as usize]).axis() == axis
    };

    let other = Axis::ALL[(axis as usize + 1) % 3];

    CORNER_FACELETS.iter().flatten().all(|&i| sticker_on(i, axis))
        && EDGE_FACELETS.iter().flatten().all(|&i| sticker_on(i, axis))
        && SLICE_EDGES[axis as usize]
            .iter()
            .flat_map(|&edge| EDGE_FACELETS[edge])
            .all(|i| sticker_on(i, other))
}

fn half_turn_reduced(state: &Facelets) -> bool {
    let on_own_axis = |&i: &u8| facelet_face(state[i as usize]).axis() == facelet_face(i).axis();

    CORNER_FACELETS.iter().flatten().all(on_own_axis)
        && EDGE_FACELETS.iter().flatten().all(on_own_axis)
        && HALF_TURN_CORNERS.contains(&corners(state).0)
}

impl Cube {
    #[must_use]
    pub fn solved() -> Cube {
        Cube {
            facelets: IDENTITY,
        }
    }

    /// Applies an algorithm: the normal stream, its placement, and then the
    /// inverse of the inverse stream.
    pub fn twist(&mut self, algorithm: &Algorithm) {
        for &twist in algorithm.twists() {
            self.apply_twist(twist);
        }

        self.rotate(algorithm.placement());
        self.rotate(algorithm.inverse_placement().inverse());

        for &twist in algorithm.inverse_twists().iter().rev() {
            self.apply_twist(twist.inverse());
        }
    }

    pub fn apply_twist(&mut self, twist: Twist) {
        let table = &FACE_TURNS[twist.face() as usize];
        for _ in 0..twist.power() {
            self.facelets = facelets::apply(&self.facelets, table);
        }
    }

    pub fn rotate(&mut self, placement: Placement) {
        self.facelets = facelets::apply(&self.facelets, placement.facelets());
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.facelets == IDENTITY
    }

    /// The whole-cube rotation of this state that leaves the fewest cycles,
    /// counting corners, edges and centers. Ties go to the earliest placement.
    #[must_use]
    pub fn best_placement(&self) -> Cube {
        Placement::all()
            .map(|placement| {
                let mut cube = self.clone();
                cube.rotate(placement);
                cube
            })
            .min_by_key(|cube| cube.corner_cycles() + cube.edge_cycles() + cube.center_cycles())
            .unwrap_or_else(|| self.clone())
    }

    /// This state turned so that every center is at home. Orientation
    /// predicates and the facelet projection are read from this view.
    fn centered(&self) -> Facelets {
        Placement::all()
            .map(|placement| facelets::apply(&self.facelets, placement.facelets()))
            .find(|state| CENTERS.iter().all(|&c| state[c as usize] == c))
            .unwrap_or(self.facelets)
    }

    #[must_use]
    pub fn corner_cycles(&self) -> usize {
        let (permutation, orientation) = corners(&self.facelets);
        piece_cycles(&permutation, &orientation, 3)
    }

    #[must_use]
    pub fn edge_cycles(&self) -> usize {
        let (permutation, orientation) = edges(&self.facelets);
        piece_cycles(&permutation, &orientation, 2)
    }

    #[must_use]
    pub fn center_cycles(&self) -> usize {
        cycles_of(&centers(&self.facelets))
            .iter()
            .map(|cycle| cycle.len() / 2)
            .sum()
    }

    /// Corner cycles, longest first.
    #[must_use]
    pub fn corner_status(&self) -> Vec<PieceCycle> {
        let (permutation, orientation) = corners(&self.facelets);
        piece_status(&permutation, &orientation, 3)
    }

    /// Edge cycles, longest first.
    #[must_use]
    pub fn edge_status(&self) -> Vec<PieceCycle> {
        let (permutation, orientation) = edges(&self.facelets);
        piece_status(&permutation, &orientation, 2)
    }

    /// Number of centers away from home.
    #[must_use]
    pub fn moved_centers(&self) -> usize {
        centers(&self.facelets)
            .iter()
            .enumerate()
            .filter(|&(i, &c)| i != c as usize)
            .count()
    }

    /// Whether the corner permutation is odd.
    #[must_use]
    pub fn has_parity(&self) -> bool {
        is_odd(&corners(&self.facelets).0)
    }

    /// Axes along which every edge is oriented.
    #[must_use]
    pub fn edge_orientation_status(&self) -> Vec<Axis> {
        let state = self.centered();
        Axis::ALL
            .into_iter()
            .filter(|&axis| edge_oriented(&state, axis))
            .collect()
    }

    /// Axes along which the cube is in domino reduction: the two faces of the
    /// axis only show their own colours and the slice edges sit in the slice.
    #[must_use]
    pub fn domino_reduction_status(&self) -> Vec<Axis> {
        let state = self.centered();
        Axis::ALL
            .into_iter()
            .filter(|&axis| domino_reduced(&state, axis))
            .collect()
    }

    #[must_use]
    pub fn is_half_turn_reduction_solved(&self) -> bool {
        half_turn_reduced(&self.centered())
    }

    /// Fewest quarter turns of `axis` needed to bring the corners into the
    /// half turn group, allowing any half turns in between. Edges are not
    /// considered. `None` unless the corners are in domino reduction on
    /// `axis`.
    #[must_use]
    pub fn corner_quarter_turns(&self, axis: Axis) -> Option<u8> {
        let state = self.centered();

        let reduced = CORNER_FACELETS
            .iter()
            .flatten()
            .filter(|&&i| facelet_face(i).axis() == axis)
            .all(|&i| facelet_face(state[i as usize]).axis() == axis);
        if !reduced {
            return None;
        }

        CORNER_QUARTER_TURNS[axis as usize]
            .get(&half_turn_class(&corners(&state).0))
            .copied()
    }

    /// 54 face letters in facelet order, read with every center at home.
    #[must_use]
    pub fn to_facelet_string(&self) -> String {
        self.centered()
            .iter()
            .map(|&sticker| facelet_face(sticker).letter())
            .collect()
    }
}

impl From<&Algorithm> for Cube {
    fn from(algorithm: &Algorithm) -> Self {
        let mut cube = Cube::solved();
        cube.twist(algorithm);
        cube
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(text: &str) -> Cube {
        Cube::from(&Algorithm::parse(text).unwrap())
    }

    #[test_log::test]
    fn half_turn_group_size() {
        assert_eq!(HALF_TURN_CORNERS.len(), 96);
    }

    #[test_log::test]
    fn corner_quarter_turn_classes() {
        for axis in Axis::ALL {
            let distances = &CORNER_QUARTER_TURNS[axis as usize];
            assert_eq!(distances.len(), 420);
            assert_eq!(distances.values().max(), Some(&5));
            assert_eq!(distances.values().filter(|&&turns| turns == 1).count(), 12);
        }
    }

    #[test_log::test]
    fn corner_quarter_turns() {
        assert_eq!(cube("").corner_quarter_turns(Axis::Ud), Some(0));
        assert_eq!(cube("R2 U2 F2").corner_quarter_turns(Axis::Ud), Some(0));
        assert_eq!(cube("U").corner_quarter_turns(Axis::Ud), Some(1));
        assert_eq!(cube("U R2 U").corner_quarter_turns(Axis::Ud), Some(2));
        assert_eq!(cube("R").corner_quarter_turns(Axis::Rl), Some(1));
        assert_eq!(cube("R").corner_quarter_turns(Axis::Ud), None);
        assert_eq!(cube("U R2 L2 D").corner_quarter_turns(Axis::Ud), Some(0));
    }

    #[test_log::test]
    fn algorithm_then_inverse_is_solved() {
        for text in ["R U2 F' D L2 B", "x M2 u' S", "R U (F D2 x)", "NISS R y U NISS F"] {
            let algorithm = Algorithm::parse(text).unwrap();
            let mut cube = Cube::from(&algorithm);
            cube.twist(&algorithm.inverse());
            assert!(cube.is_solved(), "{text}");
        }
    }

    #[test_log::test]
    fn niss_inverse_applies_in_reverse() {
        assert_eq!(cube("(R U)"), cube("U' R'"));
        assert_eq!(cube("R NISS U"), cube("R U'"));
    }

    #[test_log::test]
    fn slices_and_wide_moves_match_face_turns() {
        assert_eq!(cube("M"), cube("R L' x'"));
        assert_eq!(cube("r"), cube("L x"));
        assert_eq!(cube("Rw2"), cube("r2"));
        assert_eq!(cube("E S"), cube("U D' y' F' B z"));
    }

    #[test_log::test]
    fn best_placement_undoes_rotations() {
        assert!(cube("x y2").best_placement().is_solved());
        assert!(!cube("x y2").is_solved());
    }

    #[test_log::test]
    fn cycle_counts() {
        let check = |text: &str, expected: (usize, usize, usize, bool)| {
            let best = cube(text).best_placement();
            assert_eq!(
                (
                    best.corner_cycles(),
                    best.edge_cycles(),
                    best.center_cycles(),
                    best.has_parity()
                ),
                expected,
                "{text}"
            );
        };

        check("R U R' D R U' R' D'", (1, 0, 0, false));
        check("R", (1, 1, 0, true));
        check("M", (0, 1, 2, false));
        check("U R2 U R2 U", (2, 1, 0, true));
        check("R U R' U'", (4, 1, 0, false));
        check("R U F", (2, 6, 0, true));
        check("L' U2 L U L' U L R U2 R' U' R U' R'", (2, 0, 0, false));
    }

    #[test_log::test]
    fn cycle_status() {
        let best = cube("R U R' U'").best_placement();
        assert_eq!(
            best.corner_status(),
            [
                PieceCycle {
                    length: 2,
                    orientation: 1
                },
                PieceCycle {
                    length: 2,
                    orientation: 2
                }
            ]
        );
        assert_eq!(
            best.edge_status(),
            [PieceCycle {
                length: 3,
                orientation: 0
            }]
        );

        let best = cube("M").best_placement();
        assert_eq!(best.moved_centers(), 4);
    }

    #[test_log::test]
    fn orientation_predicates() {
        assert_eq!(cube("R").edge_orientation_status(), [Axis::Ud, Axis::Fb]);
        assert_eq!(cube("R").domino_reduction_status(), [Axis::Rl]);
        assert_eq!(cube("U").domino_reduction_status(), [Axis::Ud]);
        assert_eq!(cube("R U R' U'").edge_orientation_status(), [Axis::Fb]);
        assert!(cube("R U F").edge_orientation_status().is_empty());
        assert!(cube("R2 U2").is_half_turn_reduction_solved());
        assert!(!cube("U R2 U").is_half_turn_reduction_solved());
    }

    #[test_log::test]
    fn facelet_string_ignores_rotation() {
        let solved = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert_eq!(Cube::solved().to_facelet_string(), solved);
        assert_eq!(cube("y z'").to_facelet_string(), solved);
        assert_ne!(cube("U").to_facelet_string(), solved);
    }
}

//! Facelet level model of the 3x3x3.
//!
//! Positions are numbered face by face in the order U R F D L B, nine per
//! face, row-major as seen when looking straight at that face. A state maps
//! every position to the sticker currently sitting there; sticker `s` carries
//! the colour of face `s / 9` in the same order.
//!
//! A move table `m` is applied to a state `s` as `s'[i] = s[m[i]]`, so
//! applying `a` and then `b` is the table `i -> a[b[i]]`.

use crate::twist::Face;

pub(crate) type Facelets = [u8; 54];

pub(crate) const IDENTITY: Facelets = {
    let mut out = [0; 54];

    let mut i = 0;
    while i < out.len() {
        out[i] = i as u8;
        i += 1;
    }

    out
};

/// Faces in facelet numbering order.
pub const FACELET_FACES: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

/// Center facelets in facelet numbering order.
pub const CENTERS: [u8; 6] = [4, 13, 22, 31, 40, 49];

/// URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB. The first facelet of each corner is
/// on the U or D face.
pub const CORNER_FACELETS: [[u8; 3]; 8] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

/// UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR.
pub const EDGE_FACELETS: [[u8; 2]; 12] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

/// The face a position lies on, which is also the colour of a sticker id.
#[must_use]
pub const fn facelet_face(index: u8) -> Face {
    FACELET_FACES[(index / 9) as usize]
}

pub(crate) const fn center_of(face: Face) -> u8 {
    match face {
        Face::U => CENTERS[0],
        Face::R => CENTERS[1],
        Face::F => CENTERS[2],
        Face::D => CENTERS[3],
        Face::L => CENTERS[4],
        Face::B => CENTERS[5],
    }
}

const UNUSED: (u8, u8) = (u8::MAX, u8::MAX);

/// `(corner, index within corner)` for every corner sticker.
pub(crate) const CORNER_LOOKUP: [(u8, u8); 54] = {
    let mut out = [UNUSED; 54];

    let mut piece = 0;
    while piece < CORNER_FACELETS.len() {
        let mut k = 0;
        while k < 3 {
            out[CORNER_FACELETS[piece][k] as usize] = (piece as u8, k as u8);
            k += 1;
        }
        piece += 1;
    }

    out
};

/// `(edge, index within edge)` for every edge sticker.
pub(crate) const EDGE_LOOKUP: [(u8, u8); 54] = {
    let mut out = [UNUSED; 54];

    let mut piece = 0;
    while piece < EDGE_FACELETS.len() {
        let mut k = 0;
        while k < 2 {
            out[EDGE_FACELETS[piece][k] as usize] = (piece as u8, k as u8);
            k += 1;
        }
        piece += 1;
    }

    out
};

pub(crate) const CENTER_LOOKUP: [u8; 54] = {
    let mut out = [u8::MAX; 54];

    let mut i = 0;
    while i < CENTERS.len() {
        out[CENTERS[i] as usize] = i as u8;
        i += 1;
    }

    out
};

/// Face turns in twist order, `U D R L F B`.
pub(crate) const FACE_TURNS: [Facelets; 6] = [
    [
        6, 3, 0, 7, 4, 1, 8, 5, 2,
        45, 46, 47, 12, 13, 14, 15, 16, 17,
        9, 10, 11, 21, 22, 23, 24, 25, 26,
        27, 28, 29, 30, 31, 32, 33, 34, 35,
        18, 19, 20, 39, 40, 41, 42, 43, 44,
        36, 37, 38, 48, 49, 50, 51, 52, 53,
    ],
    [
        0, 1, 2, 3, 4, 5, 6, 7, 8,
        9, 10, 11, 12, 13, 14, 24, 25, 26,
        18, 19, 20, 21, 22, 23, 42, 43, 44,
        33, 30, 27, 34, 31, 28, 35, 32, 29,
        36, 37, 38, 39, 40, 41, 51, 52, 53,
        45, 46, 47, 48, 49, 50, 15, 16, 17,
    ],
    [
        0, 1, 20, 3, 4, 23, 6, 7, 26,
        15, 12, 9, 16, 13, 10, 17, 14, 11,
        18, 19, 29, 21, 22, 32, 24, 25, 35,
        27, 28, 51, 30, 31, 48, 33, 34, 45,
        36, 37, 38, 39, 40, 41, 42, 43, 44,
        8, 46, 47, 5, 49, 50, 2, 52, 53,
    ],
    [
        53, 1, 2, 50, 4, 5, 47, 7, 8,
        9, 10, 11, 12, 13, 14, 15, 16, 17,
        0, 19, 20, 3, 22, 23, 6, 25, 26,
        18, 28, 29, 21, 31, 32, 24, 34, 35,
        42, 39, 36, 43, 40, 37, 44, 41, 38,
        45, 46, 33, 48, 49, 30, 51, 52, 27,
    ],
    [
        0, 1, 2, 3, 4, 5, 44, 41, 38,
        6, 10, 11, 7, 13, 14, 8, 16, 17,
        24, 21, 18, 25, 22, 19, 26, 23, 20,
        15, 12, 9, 30, 31, 32, 33, 34, 35,
        36, 37, 27, 39, 40, 28, 42, 43, 29,
        45, 46, 47, 48, 49, 50, 51, 52, 53,
    ],
    [
        11, 14, 17, 3, 4, 5, 6, 7, 8,
        9, 10, 35, 12, 13, 34, 15, 16, 33,
        18, 19, 20, 21, 22, 23, 24, 25, 26,
        27, 28, 29, 30, 31, 32, 36, 39, 42,
        2, 37, 38, 1, 40, 41, 0, 43, 44,
        51, 48, 45, 52, 49, 46, 53, 50, 47,
    ],
];

/// Whole cube rotations `x`, `y` and `z`.
pub(crate) const ROTATIONS: [Facelets; 3] = [
    [
        18, 19, 20, 21, 22, 23, 24, 25, 26,
        15, 12, 9, 16, 13, 10, 17, 14, 11,
        27, 28, 29, 30, 31, 32, 33, 34, 35,
        53, 52, 51, 50, 49, 48, 47, 46, 45,
        38, 41, 44, 37, 40, 43, 36, 39, 42,
        8, 7, 6, 5, 4, 3, 2, 1, 0,
    ],
    [
        6, 3, 0, 7, 4, 1, 8, 5, 2,
        45, 46, 47, 48, 49, 50, 51, 52, 53,
        9, 10, 11, 12, 13, 14, 15, 16, 17,
        29, 32, 35, 28, 31, 34, 27, 30, 33,
        18, 19, 20, 21, 22, 23, 24, 25, 26,
        36, 37, 38, 39, 40, 41, 42, 43, 44,
    ],
    [
        42, 39, 36, 43, 40, 37, 44, 41, 38,
        6, 3, 0, 7, 4, 1, 8, 5, 2,
        24, 21, 18, 25, 22, 19, 26, 23, 20,
        15, 12, 9, 16, 13, 10, 17, 14, 11,
        33, 30, 27, 34, 31, 28, 35, 32, 29,
        47, 50, 53, 46, 49, 52, 45, 48, 51,
    ],
];

pub(crate) fn apply(state: &Facelets, table: &Facelets) -> Facelets {
    std::array::from_fn(|i| state[table[i] as usize])
}

pub(crate) fn power(table: &Facelets, times: u8) -> Facelets {
    let mut out = IDENTITY;
    for _ in 0..times {
        out = apply(&out, table);
    }
    out
}

pub(crate) fn invert(table: &Facelets) -> Facelets {
    let mut out = IDENTITY;
    for (i, &v) in table.iter().enumerate() {
        out[v as usize] = i as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_permutations() {
        for table in FACE_TURNS.iter().chain(ROTATIONS.iter()) {
            assert_eq!(apply(&invert(table), table), IDENTITY);
            assert_eq!(power(table, 4), IDENTITY);
        }
    }

    #[test]
    fn face_turns_keep_their_center() {
        for face in Face::ALL {
            let center = center_of(face);
            assert_eq!(FACE_TURNS[face as usize][center as usize], center);
        }
    }

    #[test]
    fn lookups_cover_every_piece() {
        let corners = CORNER_LOOKUP.iter().filter(|v| v.0 != u8::MAX).count();
        let edges = EDGE_LOOKUP.iter().filter(|v| v.0 != u8::MAX).count();
        let centers = CENTER_LOOKUP.iter().filter(|&&v| v != u8::MAX).count();

        assert_eq!(corners + edges + centers, 54);
    }
}

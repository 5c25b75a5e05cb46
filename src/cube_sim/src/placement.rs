use std::{fmt, sync::LazyLock};

use itertools::Itertools;

use crate::{
    facelets::{self, Facelets, IDENTITY, ROTATIONS},
    twist::Face,
};

/// A whole cube rotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rotation {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Rotation {
    pub const ALL: [Self; 3] = [Rotation::X, Rotation::Y, Rotation::Z];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Rotation::X => 'x',
            Rotation::Y => 'y',
            Rotation::Z => 'z',
        }
    }
}

/// One of the 24 orientations of the whole cube.
///
/// Placements are numbered in breadth-first order from the identity using the
/// generators `x x' x2 y y' y2 z z' z2`, and each carries the shortest name
/// that search found for it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Placement(u8);

struct PlacementTable {
    facelets: Vec<Facelets>,
    names: Vec<String>,
    products: Vec<[u8; 24]>,
    inverses: Vec<u8>,
    rotations: [[u8; 4]; 3],
}

const GENERATORS: [(Rotation, u8); 9] = [
    (Rotation::X, 1),
    (Rotation::X, 3),
    (Rotation::X, 2),
    (Rotation::Y, 1),
    (Rotation::Y, 3),
    (Rotation::Y, 2),
    (Rotation::Z, 1),
    (Rotation::Z, 3),
    (Rotation::Z, 2),
];

static TABLE: LazyLock<PlacementTable> = LazyLock::new(PlacementTable::generate);

fn rotation_name(rotation: Rotation, power: u8) -> String {
    let suffix = match power {
        2 => "2",
        3 => "'",
        _ => "",
    };

    format!("{}{suffix}", rotation.letter())
}

impl PlacementTable {
    fn generate() -> Self {
        let mut facelets = vec![IDENTITY];
        let mut names = vec![String::new()];
        let mut frontier = vec![0];

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for &i in &frontier {
                for (rotation, power) in GENERATORS {
                    let table = facelets::power(&ROTATIONS[rotation as usize], power);
                    let candidate = facelets::apply(&facelets[i], &table);

                    if facelets.contains(&candidate) {
                        continue;
                    }

                    let name = [names[i].as_str(), rotation_name(rotation, power).as_str()]
                        .into_iter()
                        .filter(|v| !v.is_empty())
                        .join(" ");

                    facelets.push(candidate);
                    names.push(name);
                    next.push(facelets.len() - 1);
                }
            }

            frontier = next;
        }

        assert_eq!(facelets.len(), 24, "the cube has 24 orientations");

        let position = |table: &Facelets| {
            facelets
                .iter()
                .position(|v| v == table)
                .expect("placements are closed under composition") as u8
        };

        let products = facelets
            .iter()
            .map(|a| std::array::from_fn(|j| position(&facelets::apply(a, &facelets[j]))))
            .collect();
        let inverses = facelets
            .iter()
            .map(|a| position(&facelets::invert(a)))
            .collect();
        let rotations = Rotation::ALL.map(|rotation| {
            std::array::from_fn(|power| {
                position(&facelets::power(&ROTATIONS[rotation as usize], power as u8))
            })
        });

        PlacementTable {
            facelets,
            names,
            products,
            inverses,
            rotations,
        }
    }
}

impl Placement {
    pub const IDENTITY: Placement = Placement(0);

    pub fn all() -> impl Iterator<Item = Placement> {
        (0..24).map(Placement)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        let table: &'static PlacementTable = &TABLE;
        &table.names[self.index()]
    }

    /// This placement followed by `other`.
    #[must_use]
    pub fn then(self, other: Placement) -> Placement {
        Placement(TABLE.products[self.index()][other.index()])
    }

    #[must_use]
    pub fn inverse(self) -> Placement {
        Placement(TABLE.inverses[self.index()])
    }

    /// This placement followed by `rotation` applied `power` times.
    #[must_use]
    pub fn rotated(self, rotation: Rotation, power: u8) -> Placement {
        self.then(Placement(TABLE.rotations[rotation as usize][(power % 4) as usize]))
    }

    /// The absolute face that a turn of `face` acts on once the cube has been
    /// reoriented by this placement.
    #[must_use]
    pub fn face_at(self, face: Face) -> Face {
        facelets::facelet_face(self.facelets()[facelets::center_of(face) as usize])
    }

    pub(crate) fn facelets(self) -> &'static Facelets {
        let table: &'static PlacementTable = &TABLE;
        &table.facelets[self.index()]
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

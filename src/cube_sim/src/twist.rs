use std::{fmt, str::FromStr};

/// One of the six outer layers of the cube.
///
/// The discriminants are part of the twist encoding, so opposite faces are
/// always `2k` and `2k + 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U = 0,
    D = 1,
    R = 2,
    L = 3,
    F = 4,
    B = 5,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, R, L, F, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn axis(self) -> Axis {
        Axis::ALL[self as usize >> 1]
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[self as usize ^ 1]
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::R => 'R',
            Face::L => 'L',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Face::U),
            "D" => Ok(Face::D),
            "R" => Ok(Face::R),
            "L" => Ok(Face::L),
            "F" => Ok(Face::F),
            "B" => Ok(Face::B),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A pair of opposite faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    Ud = 0,
    Rl = 1,
    Fb = 2,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::Ud, Axis::Rl, Axis::Fb];

    #[must_use]
    pub const fn faces(self) -> [Face; 2] {
        match self {
            Axis::Ud => [Face::U, Face::D],
            Axis::Rl => [Face::R, Face::L],
            Axis::Fb => [Face::F, Face::B],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Axis::Ud => "UD",
            Axis::Rl => "RL",
            Axis::Fb => "FB",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single outer-layer turn, encoded as `face << 2 | power`.
///
/// `power` is 1 for a clockwise quarter turn, 2 for a half turn and 3 for a
/// counter-clockwise quarter turn. Because opposite faces differ only in bit 2,
/// `raw >> 3` identifies the axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Twist(u8);

impl Twist {
    /// Returns `None` when `power` is not in `1..=3`.
    #[must_use]
    pub const fn new(face: Face, power: u8) -> Option<Self> {
        if power == 0 || power > 3 {
            return None;
        }

        Some(Twist((face as u8) << 2 | power))
    }

    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if raw >> 2 >= 6 || raw & 3 == 0 {
            return None;
        }

        Some(Twist(raw))
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn face(self) -> Face {
        Face::ALL[(self.0 >> 2) as usize]
    }

    #[must_use]
    pub const fn power(self) -> u8 {
        self.0 & 3
    }

    #[must_use]
    pub const fn axis(self) -> Axis {
        self.face().axis()
    }

    /// The same face turned the other way. Half turns are their own inverse.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Twist(self.0 & !3 | (4 - (self.0 & 3)))
    }

    /// The same turn amount on a different face.
    #[must_use]
    pub const fn on_face(self, face: Face) -> Self {
        Twist((face as u8) << 2 | self.power())
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.power() {
            2 => "2",
            3 => "'",
            _ => "",
        };

        write!(f, "{}{suffix}", self.face())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding() {
        let r = Twist::new(Face::R, 1).unwrap();
        assert_eq!(r.raw(), 9);
        assert_eq!(r.axis(), Axis::Rl);
        assert_eq!(r.inverse().to_string(), "R'");
        assert_eq!(Twist::new(Face::B, 2).unwrap().inverse().to_string(), "B2");
        assert_eq!(Twist::from_raw(24), None);
        assert_eq!(Twist::from_raw(8), None);
        assert_eq!(Twist::new(Face::L, 0), None);

        for face in Face::ALL {
            assert_eq!(face.axis(), face.opposite().axis());
            assert_eq!(face.to_string().parse::<Face>(), Ok(face));
        }
    }
}

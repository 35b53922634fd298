//! Cubie-level representation of the 3x3x3 cube: which physical piece sits
//! in each position and how it is rotated there.

pub mod facelet;
pub mod moves;

use crate::error::{InvalidCubeState, TryFromIntToEnumError};

/// The eight corner positions, named by the faces they touch.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

impl Corner {
    /// All corners in index order.
    pub const ARRAY: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];
}

impl TryFrom<u8> for Corner {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Corner::ARRAY
            .get(n as usize)
            .copied()
            .ok_or(TryFromIntToEnumError::OutOfBounds)
    }
}

/// The twelve edge positions. The last four (FR, FL, BL, BR) form the
/// middle layer between U and D, the "slice" of the slice coordinate.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

impl Edge {
    /// All edges in index order.
    pub const ARRAY: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];

    /// Whether this edge belongs in the middle layer.
    pub fn is_slice(self) -> bool {
        self as u8 >= 8
    }
}

impl TryFrom<u8> for Edge {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Edge::ARRAY
            .get(n as usize)
            .copied()
            .ok_or(TryFromIntToEnumError::OutOfBounds)
    }
}

/// Cubie-level cube state: four parallel arrays recording which piece sits
/// at each position and its rotation there. Corner orientations are 0..3,
/// edge orientations 0..2.
///
/// A move replaces the whole state (see [`CubieCube::make_move`]), so a
/// half-applied move is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubieCube {
    /// Which corner sits at each corner position.
    pub cp: [Corner; 8],
    /// How each corner is twisted in its position.
    pub co: [u8; 8],
    /// Which edge sits at each edge position.
    pub ep: [Edge; 12],
    /// Whether each edge is flipped in its position.
    pub eo: [u8; 12],
}

impl CubieCube {
    /// The solved cube stored as a const.
    pub const SOLVED: CubieCube = CubieCube {
        cp: Corner::ARRAY,
        co: [0; 8],
        ep: Edge::ARRAY,
        eo: [0; 12],
    };

    /// Right-multiply by `other` in the cube group. If `self` describes a
    /// scramble and `other` a move delta, the product is the scramble with
    /// that move applied.
    pub fn multiply(&self, other: &CubieCube) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..8 {
            result.cp[i] = self.cp[other.cp[i] as usize];
            result.co[i] = (self.co[other.cp[i] as usize] + other.co[i]) % 3;
        }

        for i in 0..12 {
            result.ep[i] = self.ep[other.ep[i] as usize];
            result.eo[i] = (self.eo[other.ep[i] as usize] + other.eo[i]) % 2;
        }

        result
    }

    /// Get the inverse in the cube group.
    pub fn inverse(&self) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..8 {
            result.cp[self.cp[i] as usize] = Corner::ARRAY[i];
            result.co[self.cp[i] as usize] = (3 - self.co[i]) % 3;
        }

        for i in 0..12 {
            result.ep[self.ep[i] as usize] = Edge::ARRAY[i];
            result.eo[self.ep[i] as usize] = self.eo[i];
        }

        result
    }

    /// Every piece home and unrotated.
    pub fn is_solved(&self) -> bool {
        *self == CubieCube::SOLVED
    }

    /// Parity of the corner permutation: 0 even, 1 odd.
    pub fn corner_parity(&self) -> u8 {
        let mut inversions = 0u32;
        for i in 0..8 {
            for j in i + 1..8 {
                if self.cp[i] > self.cp[j] {
                    inversions += 1;
                }
            }
        }
        (inversions % 2) as u8
    }

    /// Parity of the edge permutation: 0 even, 1 odd.
    pub fn edge_parity(&self) -> u8 {
        let mut inversions = 0u32;
        for i in 0..12 {
            for j in i + 1..12 {
                if self.ep[i] > self.ep[j] {
                    inversions += 1;
                }
            }
        }
        (inversions % 2) as u8
    }

    /// Check the cube law: corner orientations sum to 0 mod 3, edge
    /// orientations to 0 mod 2, and corner permutation parity equals edge
    /// permutation parity. States violating any of these are well-formed but
    /// unreachable by face turns, and are rejected before a search would
    /// grind to exhaustion on them.
    pub fn verify(&self) -> Result<(), InvalidCubeState> {
        let twist = self.co.iter().sum::<u8>() % 3;
        if twist != 0 {
            return Err(InvalidCubeState::Twisted(twist));
        }
        if self.eo.iter().sum::<u8>() % 2 != 0 {
            return Err(InvalidCubeState::Flipped);
        }
        if self.corner_parity() != self.edge_parity() {
            return Err(InvalidCubeState::Parity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::moves::{Face, Move, MoveSequence};
    use crate::mv;

    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn solved_verifies() {
        assert!(CubieCube::SOLVED.is_solved());
        assert_eq!(CubieCube::SOLVED.verify(), Ok(()));
    }

    #[test]
    fn verify_rejects_unreachable() {
        let mut twisted = CubieCube::SOLVED;
        twisted.co[0] = 1;
        assert_eq!(twisted.verify(), Err(InvalidCubeState::Twisted(1)));
        twisted.co[1] = 2;
        assert_eq!(twisted.verify(), Ok(()));

        let mut flipped = CubieCube::SOLVED;
        flipped.eo[3] = 1;
        assert_eq!(flipped.verify(), Err(InvalidCubeState::Flipped));
        flipped.eo[7] = 1;
        assert_eq!(flipped.verify(), Ok(()));

        let mut swapped = CubieCube::SOLVED;
        swapped.ep[0] = Edge::UF;
        swapped.ep[1] = Edge::UR;
        assert_eq!(swapped.verify(), Err(InvalidCubeState::Parity));
        swapped.cp[0] = Corner::UFL;
        swapped.cp[1] = Corner::URF;
        assert_eq!(swapped.verify(), Ok(()));
    }

    #[test]
    fn enum_conversions() {
        for i in 0..8u8 {
            assert_eq!(Corner::try_from(i).unwrap() as u8, i);
        }
        for i in 0..12u8 {
            assert_eq!(Edge::try_from(i).unwrap() as u8, i);
        }
        assert!(Corner::try_from(8).is_err());
        assert!(Edge::try_from(12).is_err());
    }

    proptest! {
        #[test]
        fn inverse_multiplies_to_identity(mvs in vec(any::<Move>(), 0..20).prop_map(MoveSequence)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            assert_eq!(cube.multiply(&cube.inverse()), CubieCube::SOLVED);
            assert_eq!(cube.inverse().multiply(&cube), CubieCube::SOLVED);
        }

        #[test]
        fn reachable_states_verify(mvs in vec(any::<Move>(), 0..20).prop_map(MoveSequence)) {
            assert_eq!(CubieCube::SOLVED.make_moves(&mvs).verify(), Ok(()));
        }

        #[test]
        fn multiply_matches_move_application(mvs in vec(any::<Move>(), 0..20).prop_map(MoveSequence)) {
            // Folding the deltas into one product and applying it in a single
            // multiplication must agree with applying the moves one by one.
            let product = mvs.0.iter().fold(CubieCube::SOLVED, |acc, &m| {
                acc.multiply(&CubieCube::SOLVED.make_move(m))
            });
            assert_eq!(CubieCube::SOLVED.make_moves(&mvs), product);
        }
    }

    #[test]
    fn parity_of_quarter_turn() {
        let turned = CubieCube::SOLVED.make_move(mv!(U, 1));
        assert_eq!(turned.corner_parity(), 1);
        assert_eq!(turned.edge_parity(), 1);
        let half = turned.make_move(Move { face: Face::U, turns: 1 });
        assert_eq!(half.corner_parity(), 0);
        assert_eq!(half.edge_parity(), 0);
    }
}

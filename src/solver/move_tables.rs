//! Move tables for each coordinate space: the coordinate that results from
//! applying a move, precomputed so the search never touches cubie arrays.

use crate::coord::SetCoordinate;
use crate::cube::moves::Move;
use crate::cube::CubieCube;

use std::marker::PhantomData;

/// A move table, storing for every coordinate value and every move in its
/// move list the coordinate that results from applying the move.
///
/// Generating one is a `COUNT * moves` one-time cost; afterwards the table
/// is read-only. Phase-1 spaces are built over all 18 moves, phase-2 spaces
/// over the restricted 10-move subset, the only moves ever applied to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTable<C> {
    moves: &'static [Move],
    table: Box<[u32]>,
    _coordinate: PhantomData<C>,
}

impl<C: SetCoordinate> MoveTable<C> {
    /// Generate the table over the given move list: unrank every coordinate
    /// value into a representative cube, apply each move at cubie level and
    /// re-rank the result.
    pub fn generate(moves: &'static [Move]) -> Self {
        let mut table = vec![0u32; C::COUNT * moves.len()].into_boxed_slice();

        for n in 0..C::COUNT {
            let mut cube = CubieCube::SOLVED;
            C::from_index(n).set_on(&mut cube);
            for (i, &mv) in moves.iter().enumerate() {
                table[n * moves.len() + i] = C::from_cube(&cube.make_move(mv)).index() as u32;
            }
        }

        Self {
            moves,
            table,
            _coordinate: PhantomData,
        }
    }

    /// The coordinate resulting from the move at `move_index` in this
    /// table's move list.
    pub fn apply(&self, coord: C, move_index: usize) -> C {
        C::from_index(self.table[coord.index() * self.moves.len() + move_index] as usize)
    }

    /// The move list this table was built over.
    pub fn moves(&self) -> &'static [Move] {
        self.moves
    }

    /// The raw transition entries, row-major, for the on-disk cache.
    pub(crate) fn raw(&self) -> &[u32] {
        &self.table
    }

    /// Rebuild a table from cached raw entries. Returns `None` when the
    /// payload does not have the expected dimensions or contains an
    /// out-of-range coordinate.
    pub(crate) fn from_raw(moves: &'static [Move], table: Box<[u32]>) -> Option<Self> {
        if table.len() != C::COUNT * moves.len() {
            return None;
        }
        if table.iter().any(|&c| c as usize >= C::COUNT) {
            return None;
        }
        Some(Self {
            moves,
            table,
            _coordinate: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use crate::cube::moves::{MoveSequence, ALL_MOVES, PHASE2_MOVES};
    use crate::solver::coords::{CornerPerm, EdgePerm, Flip, Parity, Slice, Twist};

    use proptest::collection::vec;
    use proptest::prelude::*;

    /* We check that the following diagram commutes
     *
     *   CubieCube --make_move--> CubieCube
     *      |                        |
     *  from_cube                from_cube
     *      |                        |
     *      v                        v
     *    Coord ------apply------> Coord
     *
     * Move application through the table must agree with coordinate
     * extraction after cubie-level application.
     */
    fn diagram_commutes<C: SetCoordinate + std::fmt::Debug>(
        table: &MoveTable<C>,
        start: &CubieCube,
        move_indices: &[usize],
    ) {
        let mut cube = start.clone();
        let mut coord = C::from_cube(&cube);
        for &i in move_indices {
            cube = cube.make_move(table.moves()[i]);
            coord = table.apply(coord, i);
            assert_eq!(coord, C::from_cube(&cube));
        }
    }

    #[test]
    fn phase1_tables_commute() {
        let twist = MoveTable::<Twist>::generate(&ALL_MOVES);
        let flip = MoveTable::<Flip>::generate(&ALL_MOVES);
        let slice = MoveTable::<Slice>::generate(&ALL_MOVES);
        proptest!(|(mvs in vec(0..18usize, 0..30))| {
            diagram_commutes(&twist, &CubieCube::SOLVED, &mvs);
            diagram_commutes(&flip, &CubieCube::SOLVED, &mvs);
            diagram_commutes(&slice, &CubieCube::SOLVED, &mvs);
        });
    }

    #[test]
    fn phase2_tables_commute() {
        let parity = MoveTable::<Parity>::generate(&PHASE2_MOVES);
        let corner = MoveTable::<CornerPerm>::generate(&PHASE2_MOVES);
        let edge = MoveTable::<EdgePerm>::generate(&PHASE2_MOVES);
        proptest!(|(mvs in vec(0..10usize, 0..30))| {
            diagram_commutes(&parity, &CubieCube::SOLVED, &mvs);
            diagram_commutes(&corner, &CubieCube::SOLVED, &mvs);
            diagram_commutes(&edge, &CubieCube::SOLVED, &mvs);
        });
    }

    #[test]
    fn raw_round_trip() {
        let table = MoveTable::<Parity>::generate(&PHASE2_MOVES);
        let raw: Box<[u32]> = table.raw().into();
        assert_eq!(MoveTable::from_raw(&PHASE2_MOVES, raw), Some(table));
        assert_eq!(
            MoveTable::<Parity>::from_raw(&PHASE2_MOVES, vec![0u32; 3].into_boxed_slice()),
            None
        );
    }

    proptest! {
        #[test]
        fn phase2_moves_preserve_domino(mvs in vec(0..10usize, 0..30)) {
            let seq = MoveSequence(mvs.into_iter().map(|i| PHASE2_MOVES[i]).collect());
            let cube = CubieCube::SOLVED.make_moves(&seq);
            assert!(crate::cube::moves::is_domino_edges(&cube.ep));
            assert_eq!(Twist::from_cube(&cube).0, 0);
            assert_eq!(Flip::from_cube(&cube).0, 0);
            assert_eq!(Slice::from_cube(&cube).0, 0);
        }
    }
}

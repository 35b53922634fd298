//! We give a general description of a coordinate, which is a bounded integer
//! projection of the cube state used to index move and pruning tables.

use crate::cube::CubieCube;

/// A coordinate, encoding one projection of a [`CubieCube`] as an integer in
/// `0..Self::COUNT`. Value 0 always corresponds to the solved state.
pub trait Coordinate: Copy + Eq {
    /// The number of possible coordinate values.
    const COUNT: usize;

    /// Obtain the coordinate that corresponds to the given cube.
    fn from_cube(cube: &CubieCube) -> Self;

    /// A representation of this coordinate as a usize, for use in table lookups.
    fn index(self) -> usize;

    /// Convert the representation of a coordinate to the coordinate itself.
    fn from_index(n: usize) -> Self;

    /// Determine whether this coordinate is at its solved value.
    fn is_solved(self) -> bool {
        self.index() == 0
    }
}

/// Gives the ability to set a coordinate onto a cube, producing a
/// representative state that [`Coordinate::from_cube`] maps back to the same
/// value. Only needed while tables are being built.
pub trait SetCoordinate: Coordinate {
    /// Modify `cube` so that its coordinate equals `self`. The other
    /// coordinate families are left in a consistent but otherwise arbitrary
    /// state, which is enough to compute this coordinate's move transitions.
    fn set_on(self, cube: &mut CubieCube);
}

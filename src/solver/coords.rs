//! The six coordinates of the two-phase decomposition.
//!
//! Phase 1 works on twist, flip and slice; phase 2 on parity, corner
//! permutation and edge permutation. Each is an integer in a bounded range
//! with 0 at the solved state, recomputed from a [`CubieCube`] on demand.

use crate::coord::{Coordinate, SetCoordinate};
use crate::cube::{Corner, CubieCube, Edge};
use crate::mv;

/// Corner orientation coordinate: the base-3 digits of the first seven
/// corners, most significant first. The eighth orientation is implied by
/// the cube law.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Twist(pub u16);

/// Edge orientation coordinate: the base-2 digits of the first eleven
/// edges, most significant first.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Flip(pub u16);

/// Which four edge slots hold the middle-layer edges, ranked in the
/// combinatorial number system. 0 means all four sit in the middle layer.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Slice(pub u16);

/// Corner permutation parity: 0 even, 1 odd.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Parity(pub u8);

/// Factorial-number-system rank of the corner permutation.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CornerPerm(pub u16);

/// Phase-2 edge permutation: the rank of the eight U/D edges times 24 plus
/// the rank of the four middle-layer edges. Inside the phase-2 subgroup the
/// two groups never mix, so coordinate 0 means every edge is home; reaching
/// it together with [`CornerPerm`] 0 is full restoration.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct EdgePerm(pub u32);

impl Coordinate for Twist {
    const COUNT: usize = 2187;

    fn from_cube(cube: &CubieCube) -> Self {
        Twist(orientation_rank::<3>(&cube.co[..7]))
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(n: usize) -> Self {
        Twist(n as u16)
    }
}

impl SetCoordinate for Twist {
    fn set_on(self, cube: &mut CubieCube) {
        let mut n = self.0;
        let mut sum = 0;
        for i in (0..7).rev() {
            cube.co[i] = (n % 3) as u8;
            sum += cube.co[i];
            n /= 3;
        }
        cube.co[7] = (3 - sum % 3) % 3;
    }
}

impl Coordinate for Flip {
    const COUNT: usize = 2048;

    fn from_cube(cube: &CubieCube) -> Self {
        Flip(orientation_rank::<2>(&cube.eo[..11]))
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(n: usize) -> Self {
        Flip(n as u16)
    }
}

impl SetCoordinate for Flip {
    fn set_on(self, cube: &mut CubieCube) {
        let mut n = self.0;
        let mut sum = 0;
        for i in (0..11).rev() {
            cube.eo[i] = (n % 2) as u8;
            sum += cube.eo[i];
            n /= 2;
        }
        cube.eo[11] = sum % 2;
    }
}

impl Coordinate for Slice {
    const COUNT: usize = 495;

    fn from_cube(cube: &CubieCube) -> Self {
        // Combinadic over the occupied slots, read so that the home slots
        // 8..12 rank 0.
        let mut rank = 0;
        let mut found = 0;
        for slot in (0..12).rev() {
            if cube.ep[slot].is_slice() {
                found += 1;
                rank += binomial(11 - slot, found);
            }
        }
        Slice(rank as u16)
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(n: usize) -> Self {
        Slice(n as u16)
    }
}

impl SetCoordinate for Slice {
    fn set_on(self, cube: &mut CubieCube) {
        let mut n = self.0 as usize;
        let mut occupied = [false; 12];
        for k in (1..=4).rev() {
            // Greedy combinadic decoding: the largest m with C(m, k) <= n.
            let mut m = 11;
            while binomial(m, k) > n {
                m -= 1;
            }
            occupied[11 - m] = true;
            n -= binomial(m, k);
        }

        let mut next_slice = 8u8;
        let mut next_other = 0u8;
        for slot in 0..12 {
            if occupied[slot] {
                cube.ep[slot] = Edge::ARRAY[next_slice as usize];
                next_slice += 1;
            } else {
                cube.ep[slot] = Edge::ARRAY[next_other as usize];
                next_other += 1;
            }
        }
    }
}

impl Coordinate for Parity {
    const COUNT: usize = 2;

    fn from_cube(cube: &CubieCube) -> Self {
        Parity(cube.corner_parity())
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(n: usize) -> Self {
        Parity(n as u8)
    }
}

impl SetCoordinate for Parity {
    fn set_on(self, cube: &mut CubieCube) {
        *cube = CubieCube::SOLVED;
        if self.0 == 1 {
            *cube = cube.make_move(mv!(U, 1));
        }
    }
}

impl Coordinate for CornerPerm {
    const COUNT: usize = 40320;

    fn from_cube(cube: &CubieCube) -> Self {
        let cp: [u8; 8] = cube.cp.map(|c| c as u8);
        CornerPerm(permutation_rank(&cp) as u16)
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(n: usize) -> Self {
        CornerPerm(n as u16)
    }
}

impl SetCoordinate for CornerPerm {
    fn set_on(self, cube: &mut CubieCube) {
        let perm = permutation_unrank::<8>(self.0 as u32);
        for i in 0..8 {
            cube.cp[i] = Corner::ARRAY[perm[i] as usize];
        }
    }
}

impl Coordinate for EdgePerm {
    const COUNT: usize = 967_680;

    fn from_cube(cube: &CubieCube) -> Self {
        // Both ranks compare values only relatively, so this is total; it is
        // meaningful for states inside the phase-2 subgroup, the only place
        // it is used.
        let ud: [u8; 8] = std::array::from_fn(|i| cube.ep[i] as u8);
        let mid: [u8; 4] = std::array::from_fn(|i| cube.ep[8 + i] as u8);
        EdgePerm(permutation_rank(&ud) * 24 + permutation_rank(&mid))
    }

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(n: usize) -> Self {
        EdgePerm(n as u32)
    }
}

impl SetCoordinate for EdgePerm {
    fn set_on(self, cube: &mut CubieCube) {
        let ud = permutation_unrank::<8>(self.0 / 24);
        let mid = permutation_unrank::<4>(self.0 % 24);
        for i in 0..8 {
            cube.ep[i] = Edge::ARRAY[ud[i] as usize];
        }
        for i in 0..4 {
            cube.ep[8 + i] = Edge::ARRAY[8 + mid[i] as usize];
        }
    }
}

/// Mixed-radix digit fold over all but the last orientation entry.
fn orientation_rank<const STATES: u16>(orientations: &[u8]) -> u16 {
    orientations
        .iter()
        .fold(0, |acc, &o| acc * STATES + o as u16)
}

/// Factorial-number-system rank: digit i counts earlier entries greater
/// than entry i, so the identity ranks 0.
fn permutation_rank<const N: usize>(arr: &[u8; N]) -> u32 {
    (1..N).rev().fold(0, |acc, i| {
        acc * (i as u32 + 1) + arr[..i].iter().filter(|&&x| x > arr[i]).count() as u32
    })
}

/// Inverse of [`permutation_rank`], producing a permutation of `0..N`.
fn permutation_unrank<const N: usize>(mut n: u32) -> [u8; N] {
    let mut digits = [0u32; N];
    for i in 1..N {
        digits[i] = n % (i as u32 + 1);
        n /= i as u32 + 1;
    }

    let mut pool: Vec<u8> = (0..N as u8).collect();
    let mut out = [0u8; N];
    for i in (0..N).rev() {
        out[i] = pool.remove(i - digits[i] as usize);
    }
    out
}

pub(crate) fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

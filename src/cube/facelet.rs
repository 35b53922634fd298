//! Conversion between 54-character facelet strings and [`CubieCube`].
//!
//! The string lists faces in the order U, R, F, D, L, B, each face read
//! row by row from its top-left sticker. The letter found at each face's
//! center defines that face's identity, so the fixed centers double as the
//! color key for the rest of the string.

use super::moves::Face;
use super::{Corner, CubieCube, Edge};
use crate::error::InvalidCubeState;

/// Facelet index of each face's center sticker, in [`Face`] order.
const CENTERS: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// The facelet positions of each corner slot, clockwise around the corner
/// starting from the U or D sticker.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF
    [6, 18, 38],  // UFL
    [0, 36, 47],  // ULB
    [2, 45, 11],  // UBR
    [29, 26, 15], // DFR
    [27, 44, 24], // DLF
    [33, 53, 42], // DBL
    [35, 17, 51], // DRB
];

/// The facelet positions of each edge slot, U/D (or F/B for slice edges)
/// sticker first.
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [1, 46],  // UB
    [32, 16], // DR
    [28, 25], // DF
    [30, 43], // DL
    [34, 52], // DB
    [23, 12], // FR
    [21, 41], // FL
    [39, 50], // BL
    [48, 14], // BR
];

/// The colors of each corner cubie's stickers, in the same clockwise order
/// as [`CORNER_FACELETS`].
const CORNER_COLORS: [[Face; 3]; 8] = [
    [Face::U, Face::R, Face::F], // URF
    [Face::U, Face::F, Face::L], // UFL
    [Face::U, Face::L, Face::B], // ULB
    [Face::U, Face::B, Face::R], // UBR
    [Face::D, Face::F, Face::R], // DFR
    [Face::D, Face::L, Face::F], // DLF
    [Face::D, Face::B, Face::L], // DBL
    [Face::D, Face::R, Face::B], // DRB
];

/// The colors of each edge cubie's stickers.
const EDGE_COLORS: [[Face; 2]; 12] = [
    [Face::U, Face::R], // UR
    [Face::U, Face::F], // UF
    [Face::U, Face::L], // UL
    [Face::U, Face::B], // UB
    [Face::D, Face::R], // DR
    [Face::D, Face::F], // DF
    [Face::D, Face::L], // DL
    [Face::D, Face::B], // DB
    [Face::F, Face::R], // FR
    [Face::F, Face::L], // FL
    [Face::B, Face::L], // BL
    [Face::B, Face::R], // BR
];

fn face_of(centers: &[char; 6], letter: char) -> Option<Face> {
    centers.iter().position(|&c| c == letter).map(|i| Face::ARRAY[i])
}

impl CubieCube {
    /// Parse a facelet string into a cubie-level cube.
    ///
    /// Validation happens in stages, each with its own
    /// [`InvalidCubeState`] variant: the length must be exactly 54; the six
    /// centers must be distinct; every character must be a center letter
    /// occurring exactly nine times; each corner and edge slot's stickers
    /// must match one cubie's colors under cyclic rotation (the rotation
    /// offset becomes the recorded orientation), with no cubie matched
    /// twice; and finally the assembled cube must satisfy the cube law
    /// (see [`CubieCube::verify`]). Nothing is ever silently corrected.
    pub fn from_facelets(s: &str) -> Result<CubieCube, InvalidCubeState> {
        let facelets: Vec<char> = s.chars().collect();
        if facelets.len() != 54 {
            return Err(InvalidCubeState::Length(facelets.len()));
        }

        let mut centers = [' '; 6];
        for (i, &idx) in CENTERS.iter().enumerate() {
            centers[i] = facelets[idx];
        }
        for i in 0..6 {
            if centers[i + 1..].contains(&centers[i]) {
                return Err(InvalidCubeState::Centers);
            }
        }

        let mut colors = [Face::U; 54];
        let mut counts = [0usize; 6];
        for (index, &letter) in facelets.iter().enumerate() {
            match face_of(&centers, letter) {
                Some(face) => {
                    colors[index] = face;
                    counts[face as usize] += 1;
                }
                None => return Err(InvalidCubeState::Letter { index, letter }),
            }
        }
        for face in Face::ARRAY {
            if counts[face as usize] != 9 {
                return Err(InvalidCubeState::LetterCount {
                    letter: centers[face as usize],
                    count: counts[face as usize],
                });
            }
        }

        let mut cube = CubieCube::SOLVED;

        let mut corner_seen = [false; 8];
        'corner: for slot in 0..8 {
            let got = [
                colors[CORNER_FACELETS[slot][0]],
                colors[CORNER_FACELETS[slot][1]],
                colors[CORNER_FACELETS[slot][2]],
            ];
            for (cubie, target) in CORNER_COLORS.iter().enumerate() {
                for orientation in 0..3 {
                    if (0..3).all(|k| got[(k + orientation) % 3] == target[k]) {
                        if corner_seen[cubie] {
                            return Err(InvalidCubeState::DuplicateCorner);
                        }
                        corner_seen[cubie] = true;
                        cube.cp[slot] = Corner::ARRAY[cubie];
                        cube.co[slot] = orientation as u8;
                        continue 'corner;
                    }
                }
            }
            return Err(InvalidCubeState::CornerColors(slot));
        }

        let mut edge_seen = [false; 12];
        'edge: for slot in 0..12 {
            let got = [
                colors[EDGE_FACELETS[slot][0]],
                colors[EDGE_FACELETS[slot][1]],
            ];
            for (cubie, target) in EDGE_COLORS.iter().enumerate() {
                for orientation in 0..2 {
                    if (0..2).all(|k| got[(k + orientation) % 2] == target[k]) {
                        if edge_seen[cubie] {
                            return Err(InvalidCubeState::DuplicateEdge);
                        }
                        edge_seen[cubie] = true;
                        cube.ep[slot] = Edge::ARRAY[cubie];
                        cube.eo[slot] = orientation as u8;
                        continue 'edge;
                    }
                }
            }
            return Err(InvalidCubeState::EdgeColors(slot));
        }

        cube.verify()?;
        Ok(cube)
    }

    /// Render the cube as a facelet string. The exact inverse of
    /// [`CubieCube::from_facelets`]; total for any well-formed cube.
    pub fn to_facelets(&self) -> String {
        let mut facelets = ['\0'; 54];

        for (i, &center) in CENTERS.iter().enumerate() {
            facelets[center] = Face::ARRAY[i].letter();
        }

        for slot in 0..8 {
            let orientation = self.co[slot] as usize;
            let colors = CORNER_COLORS[self.cp[slot] as usize];
            for k in 0..3 {
                facelets[CORNER_FACELETS[slot][(k + orientation) % 3]] = colors[k].letter();
            }
        }

        for slot in 0..12 {
            let orientation = self.eo[slot] as usize;
            let colors = EDGE_COLORS[self.ep[slot] as usize];
            for k in 0..2 {
                facelets[EDGE_FACELETS[slot][(k + orientation) % 2]] = colors[k].letter();
            }
        }

        facelets.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::moves::{Move, MoveSequence};

    use proptest::collection::vec;
    use proptest::prelude::*;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn solved_round_trip() {
        assert_eq!(CubieCube::from_facelets(SOLVED), Ok(CubieCube::SOLVED));
        assert_eq!(CubieCube::SOLVED.to_facelets(), SOLVED);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(
            CubieCube::from_facelets("UUU"),
            Err(InvalidCubeState::Length(3))
        );
        let mut short = SOLVED.to_owned();
        short.pop();
        assert_eq!(
            CubieCube::from_facelets(&short),
            Err(InvalidCubeState::Length(53))
        );

        let mut stray: Vec<char> = SOLVED.chars().collect();
        stray[0] = 'X';
        let stray: String = stray.iter().collect();
        assert_eq!(
            CubieCube::from_facelets(&stray),
            Err(InvalidCubeState::Letter { index: 0, letter: 'X' })
        );

        // Swapping one U sticker for an R breaks both counts.
        let mut unbalanced: Vec<char> = SOLVED.chars().collect();
        unbalanced[0] = 'R';
        let unbalanced: String = unbalanced.iter().collect();
        assert_eq!(
            CubieCube::from_facelets(&unbalanced),
            Err(InvalidCubeState::LetterCount { letter: 'U', count: 8 })
        );

        // Two identical centers.
        let mut centers: Vec<char> = SOLVED.chars().collect();
        centers[4] = 'R';
        let centers: String = centers.iter().collect();
        assert_eq!(
            CubieCube::from_facelets(&centers),
            Err(InvalidCubeState::Centers)
        );
    }

    #[test]
    fn rejects_unreachable_states() {
        // Rotate the stickers of the URF corner in place: still nine of each
        // letter, but the cube law catches the lone twist.
        let mut twisted: Vec<char> = SOLVED.chars().collect();
        let [a, b, c] = [8, 9, 20];
        twisted.swap(a, b);
        twisted.swap(b, c);
        let twisted: String = twisted.iter().collect();
        assert_eq!(
            CubieCube::from_facelets(&twisted),
            Err(InvalidCubeState::Twisted(2))
        );

        // Flip the UR edge in place.
        let mut flipped: Vec<char> = SOLVED.chars().collect();
        flipped.swap(5, 10);
        let flipped: String = flipped.iter().collect();
        assert_eq!(
            CubieCube::from_facelets(&flipped),
            Err(InvalidCubeState::Flipped)
        );

        // Swap the UR and UL edges: a lone transposition.
        let swapped = {
            let mut f: Vec<char> = SOLVED.chars().collect();
            f.swap(5, 3);
            f.swap(10, 37);
            f.iter().collect::<String>()
        };
        assert_eq!(
            CubieCube::from_facelets(&swapped),
            Err(InvalidCubeState::Parity)
        );
    }

    #[test]
    fn relabeled_centers_still_parse() {
        // The centers define the color key, so a consistently relabeled
        // string is the same cube.
        let relabeled: String = SOLVED
            .chars()
            .map(|c| match c {
                'U' => 'W',
                'R' => 'O',
                'F' => 'G',
                'D' => 'Y',
                'L' => 'P',
                _ => 'N',
            })
            .collect();
        assert_eq!(CubieCube::from_facelets(&relabeled), Ok(CubieCube::SOLVED));
    }

    proptest! {
        #[test]
        fn facelet_round_trip(mvs in vec(any::<Move>(), 0..30).prop_map(MoveSequence)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let reparsed = CubieCube::from_facelets(&cube.to_facelets()).unwrap();
            assert_eq!(reparsed, cube);
        }
    }
}

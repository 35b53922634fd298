//! This module defines general error types used throughout the crate.

use std::time::Duration;
use thiserror::Error;

/// Error type for converting integers to (C like) enums using TryFrom
#[derive(Debug, Error)]
pub enum TryFromIntToEnumError {
    /// attempted to convert integer into enum value, but integer was out of bounds
    #[error("attempted to convert integer into enum value, but integer was out of bounds")]
    OutOfBounds,
}

/// Reasons a facelet string fails to describe a reachable cube state.
///
/// Reported before any search starts and never silently corrected.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvalidCubeState {
    /// The string is not exactly 54 characters long.
    #[error("facelet string must be 54 characters, got {0}")]
    Length(usize),
    /// The six center facelets do not carry six distinct letters.
    #[error("center facelets must be six distinct letters")]
    Centers,
    /// A character is not one of the six center letters.
    #[error("facelet {index} holds {letter:?}, which is not a center letter")]
    Letter {
        /// Index of the offending facelet.
        index: usize,
        /// The character found there.
        letter: char,
    },
    /// A letter does not occur exactly nine times.
    #[error("letter {letter:?} occurs {count} times, expected 9")]
    LetterCount {
        /// The letter with the wrong count.
        letter: char,
        /// How often it occurred.
        count: usize,
    },
    /// The stickers at a corner slot match no corner cubie in any rotation.
    #[error("the stickers at corner slot {0} match no corner cubie")]
    CornerColors(usize),
    /// The stickers at an edge slot match no edge cubie in either flip.
    #[error("the stickers at edge slot {0} match no edge cubie")]
    EdgeColors(usize),
    /// The same corner cubie was found in two slots.
    #[error("a corner cubie appears in more than one slot")]
    DuplicateCorner,
    /// The same edge cubie was found in two slots.
    #[error("an edge cubie appears in more than one slot")]
    DuplicateEdge,
    /// Corner orientations do not sum to a multiple of three.
    #[error("corner orientations sum to {0} mod 3, a corner is twisted")]
    Twisted(u8),
    /// Edge orientations do not sum to a multiple of two.
    #[error("edge orientations sum to an odd number, an edge is flipped")]
    Flipped,
    /// Corner and edge permutation parity disagree.
    #[error("corner and edge permutation parity disagree, two pieces are swapped")]
    Parity,
}

/// Failures reported by a solve call.
///
/// `InvalidCubeState` means the input was rejected before any search ran;
/// the other two mean the search itself gave up, so callers can tell bad
/// input apart from limits that are too tight.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The facelet string does not describe a reachable cube.
    #[error("invalid cube state: {0}")]
    InvalidCubeState(#[from] InvalidCubeState),
    /// A phase found no path to its goal within the configured depth.
    #[error("phase {phase} found no solution within depth {max_depth}")]
    SolverExhausted {
        /// Which phase gave up (1 or 2).
        phase: u8,
        /// The depth bound that was exhausted.
        max_depth: u8,
    },
    /// The wall-clock budget ran out mid-search.
    #[error("solve exceeded the configured timeout of {0:?}")]
    SolverTimeout(Duration),
}

/// Error when parsing a move or move sequence from cube notation.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unrecognized move {0:?}")]
pub struct ParseMoveError(pub String);

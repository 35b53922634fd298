//! A solver for the 3x3x3 Rubik's cube implementing Kociemba's two phase
//! algorithm: the cube is first reduced into the subgroup generated by
//! {U, D, L2, R2, F2, B2} and then solved within it, each phase running an
//! IDA* search over precomputed move and pruning tables.
//!
//! The entry point is [`solver::Solver`]: build one (table construction is a
//! one-time cost), then call [`solver::Solver::solve`] with a 54-character
//! facelet string from any number of threads.

#![deny(missing_docs)]

pub mod coord;
pub mod cube;
pub mod error;
pub mod solver;

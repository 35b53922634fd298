//! The two-phase search engine.
//!
//! Phase 1 reduces the cube into the subgroup generated by
//! {U, D, L2, R2, F2, B2} (twist, flip and slice all zero); phase 2 solves
//! the remainder inside that subgroup using only its legal moves. Both
//! phases are iterative-deepening depth-first searches guided by the
//! pruning tables, with a shared wall-clock deadline polled at every node.

pub mod cache;
pub mod coords;
pub mod move_tables;
pub mod prune;

use crate::coord::Coordinate;
use crate::cube::moves::{is_domino_edges, Move, MoveSequence, ALL_MOVES, PHASE2_MOVES};
use crate::cube::CubieCube;
use crate::error::SolveError;

use self::coords::{CornerPerm, EdgePerm, Flip, Parity, Slice, Twist};
use self::move_tables::MoveTable;
use self::prune::PruningTable;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

/// Search limits for a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum phase-1 search depth. Any reachable cube can be reduced
    /// within the default of 21.
    pub max_phase1_depth: u8,
    /// Maximum phase-2 search depth. Any reduced cube can be finished
    /// within the default of 18.
    pub max_phase2_depth: u8,
    /// Wall-clock budget for a single solve call.
    pub timeout: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_phase1_depth: 21,
            max_phase2_depth: 18,
            timeout: Duration::from_secs(5),
        }
    }
}

/// The immutable bundle of move and pruning tables both phases search over.
///
/// Built once before any solve; afterwards it is only ever read, so a single
/// bundle can back any number of concurrent solves. Tests can also build one
/// and hand it to [`Solver::with_tables`].
pub struct Tables {
    twist_move: MoveTable<Twist>,
    flip_move: MoveTable<Flip>,
    slice_move: MoveTable<Slice>,
    parity_move: MoveTable<Parity>,
    corner_perm_move: MoveTable<CornerPerm>,
    edge_perm_move: MoveTable<EdgePerm>,
    twist_prune: PruningTable,
    flip_prune: PruningTable,
    slice_prune: PruningTable,
    parity_prune: PruningTable,
    corner_perm_prune: PruningTable,
    edge_perm_prune: PruningTable,
}

impl Tables {
    /// Build every table from scratch.
    pub fn build() -> Tables {
        Self::build_inner(None)
    }

    /// Build the tables, loading the edge-permutation move table from the
    /// platform cache directory when a valid copy exists and writing one
    /// back otherwise. That table dominates construction cost; the rest are
    /// always rebuilt.
    pub fn build_with_cache() -> Tables {
        Self::build_inner(cache::default_cache_path().as_deref())
    }

    fn build_inner(cache_path: Option<&Path>) -> Tables {
        let start = Instant::now();

        let twist_move = MoveTable::<Twist>::generate(&ALL_MOVES);
        let flip_move = MoveTable::<Flip>::generate(&ALL_MOVES);
        let slice_move = MoveTable::<Slice>::generate(&ALL_MOVES);
        let parity_move = MoveTable::<Parity>::generate(&PHASE2_MOVES);
        let corner_perm_move = MoveTable::<CornerPerm>::generate(&PHASE2_MOVES);

        let cached = cache_path.and_then(|path| cache::load::<EdgePerm>(path, &PHASE2_MOVES));
        let edge_perm_move = match cached {
            Some(table) => table,
            None => {
                let table = MoveTable::<EdgePerm>::generate(&PHASE2_MOVES);
                if let Some(path) = cache_path {
                    if let Err(err) = cache::store(path, &table) {
                        warn!("failed to cache move table at {}: {err}", path.display());
                    }
                }
                table
            }
        };
        debug!("move tables ready after {:?}", start.elapsed());

        let twist_prune = PruningTable::generate(&twist_move);
        let flip_prune = PruningTable::generate(&flip_move);
        let slice_prune = PruningTable::generate(&slice_move);
        let parity_prune = PruningTable::generate(&parity_move);
        let corner_perm_prune = PruningTable::generate(&corner_perm_move);
        let edge_perm_prune = PruningTable::generate(&edge_perm_move);

        info!("built move and pruning tables in {:?}", start.elapsed());

        Tables {
            twist_move,
            flip_move,
            slice_move,
            parity_move,
            corner_perm_move,
            edge_perm_move,
            twist_prune,
            flip_prune,
            slice_prune,
            parity_prune,
            corner_perm_prune,
            edge_perm_prune,
        }
    }
}

/// A cube solver using Kociemba's two phase algorithm.
pub struct Solver {
    tables: Arc<Tables>,
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver with default limits, building all tables.
    pub fn new() -> Solver {
        Self::with_config(SolverConfig::default())
    }

    /// Create a solver with the given limits, building all tables.
    pub fn with_config(config: SolverConfig) -> Solver {
        Solver {
            tables: Arc::new(Tables::build()),
            config,
        }
    }

    /// Create a solver around an already-built table bundle. Bundles are
    /// immutable, so one can back any number of solvers.
    pub fn with_tables(tables: Arc<Tables>, config: SolverConfig) -> Solver {
        Solver { tables, config }
    }

    /// Obtain a solving sequence for the cube described by a 54-character
    /// facelet string, in standard notation via the sequence's `Display`.
    ///
    /// The input is validated up front (including the cube-law check for
    /// physically unreachable states); the returned sequence is the
    /// concatenated, cancelled output of both phases, typically 18 to 22
    /// moves. A solved input yields an empty sequence. Fails with
    /// [`SolveError::SolverExhausted`] if a phase cannot reach its goal
    /// within its depth bound and [`SolveError::SolverTimeout`] once the
    /// wall-clock budget runs out; no partial solutions are ever returned.
    pub fn solve(&self, facelets: &str) -> Result<MoveSequence, SolveError> {
        let cube = CubieCube::from_facelets(facelets)?;
        let deadline = Instant::now() + self.config.timeout;

        let phase1 = self.solve_phase1(&cube, deadline)?;
        let reduced = cube.make_moves(&phase1);
        debug_assert!(is_domino_edges(&reduced.ep));
        let phase2 = self.solve_phase2(&reduced, deadline)?;

        let mut combined = phase1.0;
        combined.extend(phase2.0);
        let solution = MoveSequence(combined).cancel();

        debug_assert!(cube.make_moves(&solution).is_solved());
        debug!("solved in {} moves: {solution}", solution.len());
        Ok(solution)
    }

    fn solve_phase1(
        &self,
        cube: &CubieCube,
        deadline: Instant,
    ) -> Result<MoveSequence, SolveError> {
        let twist = Twist::from_cube(cube);
        let flip = Flip::from_cube(cube);
        let slice = Slice::from_cube(cube);

        let max_depth = self.config.max_phase1_depth;
        let mut path = Vec::with_capacity(max_depth as usize);
        for depth in 0..=max_depth {
            if self.search_phase1(twist, flip, slice, depth, &mut path, deadline)? {
                debug!("phase 1 found {} moves", path.len());
                return Ok(MoveSequence(path));
            }
        }
        Err(SolveError::SolverExhausted {
            phase: 1,
            max_depth,
        })
    }

    /// Bounded depth-first search for phase 1. On success the path holds
    /// the solving moves; on failure it is left as it was found.
    fn search_phase1(
        &self,
        twist: Twist,
        flip: Flip,
        slice: Slice,
        depth: u8,
        path: &mut Vec<Move>,
        deadline: Instant,
    ) -> Result<bool, SolveError> {
        if Instant::now() >= deadline {
            return Err(SolveError::SolverTimeout(self.config.timeout));
        }
        if depth == 0 {
            return Ok(twist.is_solved() && flip.is_solved() && slice.is_solved());
        }

        let tables = &self.tables;
        let bound = tables
            .twist_prune
            .distance(twist.index())
            .max(tables.flip_prune.distance(flip.index()))
            .max(tables.slice_prune.distance(slice.index()));
        if bound > depth {
            return Ok(false);
        }

        for (i, &mv) in ALL_MOVES.iter().enumerate() {
            // Two turns of one face collapse into one; skipping them here
            // removes the bulk of the redundant branches.
            if path.last().is_some_and(|last| last.face == mv.face) {
                continue;
            }

            path.push(mv);
            let found = self.search_phase1(
                tables.twist_move.apply(twist, i),
                tables.flip_move.apply(flip, i),
                tables.slice_move.apply(slice, i),
                depth - 1,
                path,
                deadline,
            )?;
            if found {
                return Ok(true);
            }
            path.pop();
        }

        Ok(false)
    }

    fn solve_phase2(
        &self,
        cube: &CubieCube,
        deadline: Instant,
    ) -> Result<MoveSequence, SolveError> {
        let parity = Parity::from_cube(cube);
        let corner = CornerPerm::from_cube(cube);
        let edge = EdgePerm::from_cube(cube);

        let max_depth = self.config.max_phase2_depth;
        let mut path = Vec::with_capacity(max_depth as usize);
        for depth in 0..=max_depth {
            if self.search_phase2(parity, corner, edge, depth, &mut path, deadline)? {
                debug!("phase 2 found {} moves", path.len());
                return Ok(MoveSequence(path));
            }
        }
        Err(SolveError::SolverExhausted {
            phase: 2,
            max_depth,
        })
    }

    fn search_phase2(
        &self,
        parity: Parity,
        corner: CornerPerm,
        edge: EdgePerm,
        depth: u8,
        path: &mut Vec<Move>,
        deadline: Instant,
    ) -> Result<bool, SolveError> {
        if Instant::now() >= deadline {
            return Err(SolveError::SolverTimeout(self.config.timeout));
        }
        if depth == 0 {
            return Ok(parity.is_solved() && corner.is_solved() && edge.is_solved());
        }

        let tables = &self.tables;
        let bound = tables
            .parity_prune
            .distance(parity.index())
            .max(tables.corner_perm_prune.distance(corner.index()))
            .max(tables.edge_perm_prune.distance(edge.index()));
        if bound > depth {
            return Ok(false);
        }

        for (i, &mv) in PHASE2_MOVES.iter().enumerate() {
            if path.last().is_some_and(|last| last.face == mv.face) {
                continue;
            }

            path.push(mv);
            let found = self.search_phase2(
                tables.parity_move.apply(parity, i),
                tables.corner_perm_move.apply(corner, i),
                tables.edge_perm_move.apply(edge, i),
                depth - 1,
                path,
                deadline,
            )?;
            if found {
                return Ok(true);
            }
            path.pop();
        }

        Ok(false)
    }
}

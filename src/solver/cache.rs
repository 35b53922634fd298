//! On-disk cache for precomputed move tables.
//!
//! Only the edge-permutation table is worth persisting; the others rebuild
//! in a blink. The format is a private implementation detail: a magic tag,
//! a format version, the table dimensions, then the raw transition entries
//! little-endian. Anything that fails to parse is treated as a miss and
//! rebuilt, never an error.

use crate::coord::SetCoordinate;
use crate::cube::moves::Move;
use crate::solver::move_tables::MoveTable;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};

const MAGIC: &[u8; 8] = b"twophase";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 8 + 4 + 4 + 8;

/// Default location of the table cache for this platform, if the user cache
/// directory can be resolved.
pub fn default_cache_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "twophase").map(|dirs| dirs.cache_dir().join("edge-perm-moves.bin"))
}

pub(crate) fn store<C: SetCoordinate>(path: &Path, table: &MoveTable<C>) -> io::Result<()> {
    let raw = table.raw();
    let mut bytes = Vec::with_capacity(HEADER_LEN + raw.len() * 4);
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(table.moves().len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(C::COUNT as u64).to_le_bytes());
    for &entry in raw {
        bytes.extend_from_slice(&entry.to_le_bytes());
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, bytes)?;
    info!("cached move table at {}", path.display());
    Ok(())
}

pub(crate) fn load<C: SetCoordinate>(path: &Path, moves: &'static [Move]) -> Option<MoveTable<C>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!("table cache miss at {}: {err}", path.display());
            return None;
        }
    };
    if bytes.len() < HEADER_LEN || &bytes[..8] != MAGIC {
        return None;
    }
    let version = u32::from_le_bytes(bytes[8..12].try_into().ok()?);
    let move_count = u32::from_le_bytes(bytes[12..16].try_into().ok()?) as usize;
    let coord_count = u64::from_le_bytes(bytes[16..24].try_into().ok()?) as usize;
    if version != VERSION || move_count != moves.len() || coord_count != C::COUNT {
        return None;
    }

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != C::COUNT * moves.len() * 4 {
        return None;
    }
    let table: Box<[u32]> = payload
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    let table = MoveTable::from_raw(moves, table)?;
    info!("loaded cached move table from {}", path.display());
    Some(table)
}

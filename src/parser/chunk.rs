//! Parser for overmap save chunks (`o.<x>.<y>` files).
//!
//! A chunk file is a version line followed by a JSON object spread over the
//! rest of the file. Only the `layers` member is read:
//!
//! ```text
//! # version 26
//! {"layers":[[["field",32400]],[["forest",100],["field",32300]], …], …}
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::{CHUNK_VERSION_MARKER, Chunk, ChunkDims, Layer};

const CHUNK_PREFIX: &str = "o.";

#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    layers: Vec<Layer>,
}

/// `(x, y)` of a file named `o.<x>.<y>`, `None` for any other name.
fn coordinates_from_name(name: &str) -> Option<(i32, i32)> {
    let rest = name.strip_prefix(CHUNK_PREFIX)?;
    let (x, y) = rest.split_once('.')?;
    Some((canonical_int(x)?, canonical_int(y)?))
}

/// Only the form the game writes: no `+`, no leading zeros, no `-0`.
fn canonical_int(s: &str) -> Option<i32> {
    let n: i32 = s.parse().ok()?;
    (n.to_string() == s).then_some(n)
}

/// Chunk coordinates encoded in `path`'s file name.
pub fn chunk_coordinates(path: &Path) -> Result<(i32, i32)> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(coordinates_from_name)
        .ok_or_else(|| Error::MalformedChunkName {
            path: path.to_path_buf(),
        })
}

/// All chunk files below `save_dir`, sorted by path.
pub fn chunk_files(save_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(save_dir) {
        let entry = entry.map_err(|source| Error::Walk {
            root: save_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_chunk = entry
            .file_name()
            .to_str()
            .and_then(coordinates_from_name)
            .is_some();
        if is_chunk {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one chunk's text. `path` labels errors only.
pub fn parse_chunk(text: &str, x: i32, y: i32, dims: ChunkDims, path: &Path) -> Result<Chunk> {
    // `\n` only: a marker line ending in `\r` is a different version string
    let mut lines = text.split('\n');
    let version = lines.next().unwrap_or_default();
    if version != CHUNK_VERSION_MARKER {
        return Err(Error::UnsupportedVersion {
            path: path.to_path_buf(),
            found: version.to_string(),
        });
    }

    let body: String = lines.collect();
    let payload: ChunkPayload = serde_json::from_str(&body).map_err(|e| Error::json(path, e))?;

    if payload.layers.len() > dims.layers {
        return Err(Error::LayerCount {
            path: path.to_path_buf(),
            found: payload.layers.len(),
            max: dims.layers,
        });
    }

    let expected = dims.cells_per_layer() as u64;
    for (layer, runs) in payload.layers.iter().enumerate() {
        let found: u64 = runs.iter().map(|r| r.count as u64).sum();
        if found != expected {
            return Err(Error::LayerLength {
                path: path.to_path_buf(),
                layer,
                found,
                expected,
            });
        }
    }

    Ok(Chunk {
        x,
        y,
        layers: payload.layers,
    })
}

pub fn load_chunk(path: &Path, dims: ChunkDims) -> Result<Chunk> {
    let (x, y) = chunk_coordinates(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let chunk = parse_chunk(&text, x, y, dims, path)?;
    debug!("loaded chunk ({}, {}) from {}", x, y, path.display());
    Ok(chunk)
}

/// Every chunk saved under `save_dir`.
pub fn load_save(save_dir: &Path, dims: ChunkDims) -> Result<Vec<Chunk>> {
    let chunks = chunk_files(save_dir)?
        .iter()
        .map(|path| load_chunk(path, dims))
        .collect::<Result<Vec<_>>>()?;

    info!("loaded {} chunks from {}", chunks.len(), save_dir.display());
    Ok(chunks)
}

//! World grid assembler.
//!
//! Lays every loaded chunk into the bounding rectangle of all chunk
//! coordinates, expands the run-length layers into cells and fills whatever
//! the save never visited. Unknown terrain is drawn as a placeholder and
//! reported, never fatal: saves may reference terrain from mods that are no
//! longer loaded.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use super::grid::{ChunkBuffer, ChunkRect, WorldGrid};
use super::palette;
use super::resolve::TerrainTable;
use super::tables::UNKNOWN_GLYPH;
use crate::model::{Cell, Chunk, ChunkDims};

/// Palette entry used for cells nobody has explored.
const UNEXPLORED_COLOR: &str = "default";

/// Data gaps found while assembling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Unknown terrain id → number of runs that used it.
    pub missing_terrain: BTreeMap<String, usize>,
    /// Chunks inside the rectangle with no save data.
    pub unexplored_chunks: Vec<(i32, i32)>,
}

impl AssemblyReport {
    /// One-line description for the end-of-run log.
    pub fn summary(&self) -> String {
        let runs: usize = self.missing_terrain.values().sum();
        format!(
            "{} unknown terrain ids in {} runs, {} unexplored chunks",
            self.missing_terrain.len(),
            runs,
            self.unexplored_chunks.len()
        )
    }
}

pub fn placeholder_cell() -> Cell {
    let (fg, bg) = palette::NEUTRAL;
    Cell {
        symbol: UNKNOWN_GLYPH,
        fg,
        bg,
    }
}

pub fn unexplored_cell(table: &TerrainTable) -> Cell {
    let (fg, bg) = table.color(UNEXPLORED_COLOR);
    Cell {
        symbol: ' ',
        fg,
        bg,
    }
}

fn terrain_cell(table: &TerrainTable, id: &str) -> Cell {
    if !table.exists(id) {
        return placeholder_cell();
    }
    let (fg, bg) = table.color(id);
    Cell {
        symbol: table.symbol(id),
        fg,
        bg,
    }
}

/// Tally every terrain id that `table` cannot resolve.
pub fn missing_terrain(chunks: &[Chunk], table: &TerrainTable) -> BTreeMap<String, usize> {
    let mut missing = BTreeMap::new();
    for run in chunks.iter().flat_map(|c| &c.layers).flatten() {
        if !table.exists(&run.terrain_id) {
            *missing.entry(run.terrain_id.clone()).or_insert(0) += 1;
        }
    }
    missing
}

pub fn assemble(
    chunks: &[Chunk],
    table: &TerrainTable,
    dims: ChunkDims,
) -> (WorldGrid, AssemblyReport) {
    // 1. ── Unknown terrain ────────────────────────────────────────────
    let missing = missing_terrain(chunks, table);

    // 2. ── Bounds ─────────────────────────────────────────────────────
    let rect = ChunkRect::bounding(chunks.iter().map(|c| (c.x, c.y)));
    debug!(
        "chunk rectangle {}x{} from ({}, {})",
        rect.width, rect.height, rect.x_min, rect.y_min
    );

    // 3. ── Lay out loaded chunks ──────────────────────────────────────
    // Every cell starts unexplored; runs only overwrite what a chunk covers.
    let unexplored = unexplored_cell(table);
    let mut buffer = ChunkBuffer::new(rect.chunk_count(), dims, unexplored);
    let mut unvisited: BTreeSet<usize> = (0..rect.chunk_count()).collect();

    for chunk in chunks {
        let index = rect.index(chunk.x, chunk.y);
        unvisited.remove(&index);
        debug!("processing chunk ({}, {}) as {}", chunk.x, chunk.y, index);

        for (layer, runs) in chunk.layers.iter().enumerate().take(dims.layers) {
            let cells = buffer.layer_mut(index, layer);
            let mut pos = 0usize;
            for run in runs {
                let cell = terrain_cell(table, &run.terrain_id);
                let end = (pos + run.count as usize).min(cells.len());
                cells[pos..end].fill(cell);
                pos = end;
            }
        }
    }

    // 4. ── Report gaps ────────────────────────────────────────────────
    for (id, count) in &missing {
        warn!("missing terrain: {} x {}", id, count);
    }
    let unexplored_chunks: Vec<(i32, i32)> = unvisited.iter().map(|&i| rect.coords(i)).collect();
    if !unexplored_chunks.is_empty() {
        info!("{} chunks left unexplored", unexplored_chunks.len());
    }

    // 5. ── Re-index into layer / row / col ────────────────────────────
    let grid = WorldGrid::from_buffer(&buffer, &rect);
    info!(
        "assembled {} layers of {}x{} cells",
        grid.layer_count(),
        grid.width(),
        grid.height()
    );

    (
        grid,
        AssemblyReport {
            missing_terrain: missing,
            unexplored_chunks,
        },
    )
}

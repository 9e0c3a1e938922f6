//! Dump grid layers as plain text, one character per cell.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::processor::{GridLayer, WorldGrid};

pub fn layer_file_name(layer: usize) -> String {
    format!("o_{layer}")
}

pub fn render_layer(layer: &GridLayer) -> String {
    let mut out = String::new();
    for row in layer.rows() {
        out.extend(row.iter().map(|c| c.symbol));
        out.push('\n');
    }
    out
}

/// Write `layers` (every layer when empty) of `grid` into `out_dir`.
///
/// Returns the files written. Layer indices past the grid are skipped.
pub fn emit(grid: &WorldGrid, out_dir: &Path, layers: &[usize]) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let selected: Vec<usize> = if layers.is_empty() {
        (0..grid.layer_count()).collect()
    } else {
        layers.to_vec()
    };

    let mut written = Vec::with_capacity(selected.len());
    for index in selected {
        let Some(layer) = grid.layer(index) else {
            continue;
        };
        let path = out_dir.join(layer_file_name(index));
        fs::write(&path, render_layer(layer))?;
        written.push(path);
    }

    info!("wrote {} layer files to {}", written.len(), out_dir.display());
    Ok(written)
}

//! Cell storage for the assembled world.
//!
//! Assembly writes into a [`ChunkBuffer`]: one flat vector where each chunk
//! owns a contiguous `layers × rows × cols` block. Once every chunk is in, the
//! buffer is transposed into a [`WorldGrid`], which is addressed by global
//! `(layer, row, col)` and is what renderers get to see.

use crate::model::{Cell, ChunkDims};

/// Bounding rectangle of chunk coordinates, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRect {
    pub x_min: i32,
    pub y_min: i32,
    /// Width in chunks.
    pub width: usize,
    /// Height in chunks.
    pub height: usize,
}

impl ChunkRect {
    /// Smallest rectangle holding every coordinate; `(0, 0)` alone when there
    /// are none.
    pub fn bounding(coords: impl IntoIterator<Item = (i32, i32)>) -> Self {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for (x, y) in coords {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }

        let (x_min, x_max, y_min, y_max) = bounds.unwrap_or((0, 0, 0, 0));
        Self {
            x_min,
            y_min,
            width: (x_max - x_min) as usize + 1,
            height: (y_max - y_min) as usize + 1,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.width * self.height
    }

    /// Linear chunk index of `(x, y)`, row-major.
    pub fn index(&self, x: i32, y: i32) -> usize {
        let dx = (x - self.x_min) as usize;
        let dy = (y - self.y_min) as usize;
        dx + self.width * dy
    }

    /// Chunk coordinates of a linear index.
    pub fn coords(&self, index: usize) -> (i32, i32) {
        let dx = (index % self.width) as i32;
        let dy = (index / self.width) as i32;
        (self.x_min + dx, self.y_min + dy)
    }
}

/// Per-chunk cell blocks laid end to end.
#[derive(Debug, Clone)]
pub struct ChunkBuffer {
    dims: ChunkDims,
    chunk_count: usize,
    cells: Vec<Cell>,
}

impl ChunkBuffer {
    pub fn new(chunk_count: usize, dims: ChunkDims, fill: Cell) -> Self {
        Self {
            dims,
            chunk_count,
            cells: vec![fill; chunk_count * dims.cells_per_chunk()],
        }
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Flat position of one cell. All buffer addressing goes through here.
    pub fn offset(&self, chunk: usize, layer: usize, row: usize, col: usize) -> usize {
        debug_assert!(chunk < self.chunk_count);
        debug_assert!(layer < self.dims.layers);
        debug_assert!(row < self.dims.rows && col < self.dims.cols);
        chunk * self.dims.cells_per_chunk()
            + layer * self.dims.cells_per_layer()
            + row * self.dims.cols
            + col
    }

    /// All cells of one chunk layer, row-major.
    pub fn layer_mut(&mut self, chunk: usize, layer: usize) -> &mut [Cell] {
        let start = self.offset(chunk, layer, 0, 0);
        &mut self.cells[start..start + self.dims.cells_per_layer()]
    }

    pub fn get(&self, chunk: usize, layer: usize, row: usize, col: usize) -> Cell {
        self.cells[self.offset(chunk, layer, row, col)]
    }

    fn row(&self, chunk: usize, layer: usize, row: usize) -> &[Cell] {
        let start = self.offset(chunk, layer, row, 0);
        &self.cells[start..start + self.dims.cols]
    }
}

/// One z-level of the world, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayer {
    width: usize,
    cells: Vec<Cell>,
}

impl GridLayer {
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let start = row.checked_mul(self.width)?;
        let end = start.checked_add(self.width)?;
        self.cells.get(start..end)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }
}

/// The assembled world: every layer spans the whole chunk rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGrid {
    layers: Vec<GridLayer>,
    /// Width in cells.
    width: usize,
    /// Height in cells.
    height: usize,
}

impl WorldGrid {
    /// Re-index `buffer` from chunk-major blocks to global rows and columns.
    pub fn from_buffer(buffer: &ChunkBuffer, rect: &ChunkRect) -> Self {
        let dims = buffer.dims();
        let width = rect.width * dims.cols;
        let height = rect.height * dims.rows;

        let mut layers = Vec::with_capacity(dims.layers);
        for layer in 0..dims.layers {
            let mut cells = Vec::with_capacity(width * height);
            for cy in 0..rect.height {
                for r in 0..dims.rows {
                    for cx in 0..rect.width {
                        let chunk = cx + cy * rect.width;
                        cells.extend_from_slice(buffer.row(chunk, layer, r));
                    }
                }
            }
            layers.push(GridLayer { width, cells });
        }

        Self {
            layers,
            width,
            height,
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layer(&self, layer: usize) -> Option<&GridLayer> {
        self.layers.get(layer)
    }

    pub fn layers(&self) -> &[GridLayer] {
        &self.layers
    }

    pub fn cell(&self, layer: usize, row: usize, col: usize) -> Option<&Cell> {
        if col >= self.width {
            return None;
        }
        self.layer(layer)?.row(row)?.get(col)
    }
}

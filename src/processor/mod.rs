//! The functional core: template resolution and world assembly.
pub mod assemble;
pub mod grid;
pub mod palette;
pub mod resolve;
pub mod store;
pub mod tables;

pub use assemble::{AssemblyReport, assemble};
pub use grid::{ChunkRect, GridLayer, WorldGrid};
pub use resolve::{TerrainTable, resolve};
pub use store::TemplateStore;
pub use tables::GlyphTables;

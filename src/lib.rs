pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

pub use error::{Error, Result};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::model::ChunkDims;
use crate::processor::GlyphTables;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let dims = ChunkDims::OVERMAP;

    // 1. ── Templates ──────────────────────────────────────────────────
    let store = parser::load_templates(&args.json_root, &args.tag)
        .with_context(|| format!("Loading templates from {}", args.json_root.display()))?;
    let tables = GlyphTables::standard();
    let terrain = processor::resolve(&store, &tables).with_context(|| "Resolving templates")?;

    // 2. ── Save ───────────────────────────────────────────────────────
    let chunks = parser::load_save(&args.save, dims)
        .with_context(|| format!("Loading save {}", args.save.display()))?;

    // 3. ── Assemble ───────────────────────────────────────────────────
    let (grid, report) = processor::assemble(&chunks, &terrain, dims);
    info!("{} chunks assembled: {}", chunks.len(), report.summary());

    // 4. ── Write outputs ──────────────────────────────────────────────
    let written = writer::text::emit(&grid, &args.output, &args.layers)
        .with_context(|| format!("Writing layers to {}", args.output.display()))?;
    info!("wrote {} layer files to {}", written.len(), args.output.display());

    Ok(())
}

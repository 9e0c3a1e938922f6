//! Everything that turns files on disk into in-memory records.
pub mod chunk;
pub mod declarations;

pub use chunk::{chunk_coordinates, chunk_files, load_chunk, load_save, parse_chunk};
pub use declarations::{load_records, load_templates, source_files};

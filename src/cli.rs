use clap::Parser;
use std::path::PathBuf;

use crate::model::OVERMAP_TERRAIN_TAG;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root of the game's JSON data
    pub json_root: PathBuf,
    /// Save directory holding `o.<x>.<y>` chunk files
    pub save: PathBuf,
    /// Output directory
    pub output: PathBuf,
    /// Only write this layer (repeatable); all layers by default
    #[arg(long = "layer")]
    pub layers: Vec<usize>,
    /// Declaration type to load templates from
    #[arg(long, default_value = OVERMAP_TERRAIN_TAG)]
    pub tag: String,
}

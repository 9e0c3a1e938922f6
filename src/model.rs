// numeric constants that describe the overmap / chunk grid
pub const OVERMAP_LAYERS: usize = 21;
pub const OVERMAP_ROWS: usize = 180;
pub const OVERMAP_COLS: usize = 180;

/// Declaration `type` tag of the records we care about.
pub const OVERMAP_TERRAIN_TAG: &str = "overmap_terrain";

/// First line of every save chunk this crate can read.
pub const CHUNK_VERSION_MARKER: &str = "# version 26";

use serde::{Deserialize, Serialize};

/// Shape of one save chunk: `layers` stacked grids of `rows × cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDims {
    pub layers: usize,
    pub rows: usize,
    pub cols: usize,
}

impl ChunkDims {
    /// 21 z-levels of 180×180 overmap tiles.
    pub const OVERMAP: ChunkDims = ChunkDims {
        layers: OVERMAP_LAYERS,
        rows: OVERMAP_ROWS,
        cols: OVERMAP_COLS,
    };

    pub const fn cells_per_layer(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn cells_per_chunk(&self) -> usize {
        self.layers * self.cells_per_layer()
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        ChunkDims::OVERMAP
    }
}

// ─────────────────────────────────────────────────────
// Terrain declarations
// ─────────────────────────────────────────────────────

/// One `overmap_terrain` record exactly as declared.
///
/// Every field is optional: a record may leave anything unset and pick it up
/// from the template it copies from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawTemplate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_name: Option<String>,
    #[serde(default, rename = "copy-from")]
    pub copy_from: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sym: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub see_cost: Option<i32>,
    #[serde(default)]
    pub extras: Option<String>,
    #[serde(default)]
    pub mondensity: Option<i32>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    #[serde(default)]
    pub spawns: Option<Spawns>,
    #[serde(default)]
    pub mapgen: Option<Vec<MapGen>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Spawns {
    pub group: String,
    #[serde(default)]
    pub population: Vec<i32>,
    #[serde(default)]
    pub chance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MapGen {
    pub method: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawTemplate {
    /// Key the store files this record under.
    pub fn key(&self) -> Option<&str> {
        self.abstract_name.as_deref().or(self.id.as_deref())
    }

    pub fn is_abstract(&self) -> bool {
        self.abstract_name.is_some()
    }

    /// Override every field `child` sets; fields it leaves unset keep
    /// whatever `self` (the ancestor side of the chain) already holds.
    /// Lists are replaced, never concatenated.
    pub fn overlay(&mut self, child: &RawTemplate) {
        fn set<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if src.is_some() {
                dst.clone_from(src);
            }
        }

        set(&mut self.id, &child.id);
        set(&mut self.abstract_name, &child.abstract_name);
        set(&mut self.copy_from, &child.copy_from);
        set(&mut self.kind, &child.kind);
        set(&mut self.name, &child.name);
        set(&mut self.sym, &child.sym);
        set(&mut self.color, &child.color);
        set(&mut self.see_cost, &child.see_cost);
        set(&mut self.extras, &child.extras);
        set(&mut self.mondensity, &child.mondensity);
        set(&mut self.flags, &child.flags);
        set(&mut self.spawns, &child.spawns);
        set(&mut self.mapgen, &child.mapgen);
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags
            .as_ref()
            .is_some_and(|flags| flags.iter().any(|f| f == flag))
    }
}

/// A concrete terrain after its copy-from chain has been flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTemplate {
    pub id: String,
    pub sym: u32,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub see_cost: Option<i32>,
    pub extras: Option<String>,
    pub mondensity: Option<i32>,
    pub flags: Vec<String>,
    pub spawns: Option<Spawns>,
    pub mapgen: Vec<MapGen>,
}

impl ResolvedTemplate {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Copy of this template under a new id and glyph.
    pub fn variant(&self, suffix: &str, sym: u32) -> ResolvedTemplate {
        ResolvedTemplate {
            id: format!("{}{}", self.id, suffix),
            sym,
            ..self.clone()
        }
    }
}

// ─────────────────────────────────────────────────────
// Save chunks
// ─────────────────────────────────────────────────────

/// `count` consecutive cells of one terrain, stored as `[id, count]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, u32)")]
pub struct TerrainRun {
    pub terrain_id: String,
    pub count: u32,
}

impl From<(String, u32)> for TerrainRun {
    fn from((terrain_id, count): (String, u32)) -> Self {
        Self { terrain_id, count }
    }
}

impl TerrainRun {
    pub fn new(terrain_id: impl Into<String>, count: u32) -> Self {
        Self {
            terrain_id: terrain_id.into(),
            count,
        }
    }
}

pub type Layer = Vec<TerrainRun>;

/// One saved overmap region at chunk coordinates `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub x: i32,
    pub y: i32,
    pub layers: Vec<Layer>,
}

// ─────────────────────────────────────────────────────
// Render output
// ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

//! Fixed glyph data: which character each symbol code draws, how glyphs
//! rotate, and which glyph each linear-terrain junction uses.
//!
//! Built once with [`GlyphTables::standard`] and handed around by reference.

use std::collections::HashMap;

// line-drawing glyph codes (curses ACS range)
pub const LINE_XOXO: u32 = 4194424; // │
pub const LINE_OXOX: u32 = 4194417; // ─
pub const LINE_XXOO: u32 = 4194413; // └
pub const LINE_OXXO: u32 = 4194412; // ┌
pub const LINE_OOXX: u32 = 4194411; // ┐
pub const LINE_XOOX: u32 = 4194410; // ┘
pub const LINE_XXXO: u32 = 4194420; // ├
pub const LINE_XXOX: u32 = 4194422; // ┴
pub const LINE_XOXX: u32 = 4194421; // ┤
pub const LINE_OXXX: u32 = 4194423; // ┬
pub const LINE_XXXX: u32 = 4194414; // ┼

/// Suffixes of the four rotated variants; index == facing.
pub const FACING_SUFFIXES: [&str; 4] = ["_north", "_east", "_south", "_west"];

/// The 16 connection shapes of linear terrain (roads, rivers, subways)
/// and the glyph each one draws with.
pub const LINEAR_SUFFIXES: [(&str, u32); 16] = [
    ("_isolated", 0),
    ("_end_south", LINE_XOXO),
    ("_end_west", LINE_OXOX),
    ("_ne", LINE_XXOO),
    ("_end_north", LINE_XOXO),
    ("_ns", LINE_XOXO),
    ("_es", LINE_OXXO),
    ("_nes", LINE_XXXO),
    ("_end_east", LINE_OXOX),
    ("_wn", LINE_XOOX),
    ("_ew", LINE_OXOX),
    ("_new", LINE_XXOX),
    ("_sw", LINE_OOXX),
    ("_nsw", LINE_XOXX),
    ("_esw", LINE_OXXX),
    ("_nesw", LINE_XXXX),
];

pub const UNKNOWN_GLYPH: char = '?';

#[derive(Debug, Clone)]
pub struct GlyphTables {
    symbols: HashMap<u32, char>,
    rotations: Vec<[u32; 4]>,
}

impl GlyphTables {
    pub fn standard() -> Self {
        let mut symbols: HashMap<u32, char> = (0u8..128).map(|c| (c as u32, c as char)).collect();
        symbols.extend([
            (LINE_XOXO, '\u{2502}'),
            (LINE_OXOX, '\u{2500}'),
            (LINE_XXOO, '\u{2514}'),
            (LINE_OXXO, '\u{250c}'),
            (LINE_OOXX, '\u{2510}'),
            (LINE_XOOX, '\u{2518}'),
            (LINE_XXXO, '\u{251c}'),
            (LINE_XXOX, '\u{2534}'),
            (LINE_XOXX, '\u{2524}'),
            (LINE_OXXX, '\u{252c}'),
            (LINE_XXXX, '\u{253c}'),
        ]);

        let rotations = vec![
            // < ^ > v
            [60, 94, 62, 118],
            [LINE_XOOX, LINE_XXOO, LINE_OXXO, LINE_OOXX],
            [LINE_OXOX, LINE_XOXO, LINE_OXOX, LINE_XOXO],
            [LINE_XXXO, LINE_OXXX, LINE_XOXX, LINE_XXOX],
        ];

        Self { symbols, rotations }
    }

    /// Character for a glyph code, if it is a known one.
    pub fn symbol(&self, code: u32) -> Option<char> {
        self.symbols.get(&code).copied()
    }

    /// Glyph of `base` turned to `facing` (0 = north … 3 = west).
    ///
    /// The first rotation group containing `base` decides; a glyph that is in
    /// no group does not rotate.
    pub fn rotate(&self, base: u32, facing: usize) -> u32 {
        for group in &self.rotations {
            if let Some(index) = group.iter().position(|&g| g == base) {
                return group[(facing + index) % 4];
            }
        }
        base
    }
}

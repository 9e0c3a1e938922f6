use std::fs;
use std::path::Path;

use overmap_grid::Error;
use overmap_grid::model::{Chunk, ChunkDims, RawTemplate, TerrainRun};
use overmap_grid::parser::{chunk_files, load_save};
use overmap_grid::processor::assemble::{placeholder_cell, unexplored_cell};
use overmap_grid::processor::{GlyphTables, TemplateStore, TerrainTable, assemble, resolve};
use overmap_grid::writer::text;

const SMALL: ChunkDims = ChunkDims {
    layers: 3,
    rows: 4,
    cols: 5,
};

fn terrain_table() -> TerrainTable {
    let mut store = TemplateStore::new();
    for (id, sym, color) in [
        ("field", 46u32, "brown"),
        ("forest", 70, "green"),
        ("lake", 126, "blue"),
        ("default", 32, "dark_gray"),
    ] {
        store
            .put(RawTemplate {
                id: Some(id.into()),
                sym: Some(sym),
                color: Some(color.into()),
                flags: Some(vec!["NO_ROTATE".into()]),
                ..Default::default()
            })
            .unwrap();
    }
    // one glyph per small code so every cell of a test chunk is distinguishable
    for code in 33u32..127 {
        store
            .put(RawTemplate {
                id: Some(format!("t{code}")),
                sym: Some(code),
                flags: Some(vec!["NO_ROTATE".into()]),
                ..Default::default()
            })
            .unwrap();
    }
    resolve(&store, &GlyphTables::standard()).unwrap()
}

fn uniform_chunk(x: i32, y: i32, id: &str, dims: ChunkDims) -> Chunk {
    Chunk {
        x,
        y,
        layers: vec![vec![TerrainRun::new(id, dims.cells_per_layer() as u32)]; dims.layers],
    }
}

#[test]
fn single_full_chunk_fills_its_layer() {
    let dims = ChunkDims::OVERMAP;
    let table = terrain_table();
    let chunk = Chunk {
        x: 0,
        y: 0,
        layers: vec![vec![TerrainRun::new("forest", dims.cells_per_layer() as u32)]],
    };

    let (grid, report) = assemble(&[chunk], &table, dims);

    assert_eq!(grid.layer_count(), 21);
    assert_eq!((grid.width(), grid.height()), (180, 180));
    assert!(report.missing_terrain.is_empty());

    let layer = grid.layer(0).unwrap();
    assert!(layer.rows().flatten().all(|c| c.symbol == 'F'));
    assert_eq!(layer.rows().flatten().count(), 180 * 180);
}

#[test]
fn no_chunks_yields_one_unexplored_chunk() {
    let table = terrain_table();
    let (grid, report) = assemble(&[], &table, SMALL);

    assert_eq!((grid.width(), grid.height()), (5, 4));
    assert_eq!(grid.layer_count(), 3);
    assert_eq!(report.unexplored_chunks, vec![(0, 0)]);

    let blank = unexplored_cell(&table);
    assert_eq!(blank.symbol, ' ');
    assert_eq!(blank.fg, table.color("default").0);
    for layer in grid.layers() {
        assert!(layer.rows().flatten().all(|c| *c == blank));
    }
}

#[test]
fn missing_terrain_is_tallied_once_per_id() {
    let table = terrain_table();
    let per_layer = SMALL.cells_per_layer() as u32;
    let chunk = Chunk {
        x: 0,
        y: 0,
        layers: vec![
            vec![TerrainRun::new("mi-go_camp", 3), TerrainRun::new("field", per_layer - 3)],
            vec![TerrainRun::new("mi-go_camp", per_layer)],
            vec![TerrainRun::new("old_bridge", per_layer)],
        ],
    };

    let (grid, report) = assemble(&[chunk], &table, SMALL);

    let ids: Vec<&str> = report.missing_terrain.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["mi-go_camp", "old_bridge"]);
    assert_eq!(report.missing_terrain["mi-go_camp"], 2);

    assert_eq!(grid.cell(0, 0, 2), Some(&placeholder_cell()));
    assert_eq!(grid.cell(0, 0, 3).unwrap().symbol, '.');
    assert!(grid.layer(2).unwrap().rows().flatten().all(|c| c.symbol == '?'));
}

#[test]
fn unvisited_chunks_are_default_filled() {
    let table = terrain_table();
    let chunks = [
        uniform_chunk(0, 0, "forest", SMALL),
        uniform_chunk(2, 2, "lake", SMALL),
    ];

    let (grid, report) = assemble(&chunks, &table, SMALL);
    assert_eq!((grid.width(), grid.height()), (3 * 5, 3 * 4));

    let mut expected = vec![(1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2)];
    expected.sort_by_key(|&(x, y)| (y, x));
    assert_eq!(report.unexplored_chunks, expected);

    let blank = unexplored_cell(&table);
    for cy in 0..3usize {
        for cx in 0..3usize {
            let want = match (cx, cy) {
                (0, 0) => 'F',
                (2, 2) => '~',
                _ => blank.symbol,
            };
            for l in 0..SMALL.layers {
                for r in 0..SMALL.rows {
                    for k in 0..SMALL.cols {
                        let cell = grid.cell(l, cy * SMALL.rows + r, cx * SMALL.cols + k).unwrap();
                        assert_eq!(cell.symbol, want, "chunk ({cx},{cy}) layer {l} r{r} k{k}");
                        if want == blank.symbol {
                            assert_eq!(*cell, blank);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn transposition_is_exact() {
    let table = terrain_table();
    let per_layer = SMALL.cells_per_layer();
    let code = |cx: i32, cy: i32, l: usize, pos: usize| -> u32 {
        33 + (cx * 7 + cy * 13 + l as i32 * 5 + pos as i32).rem_euclid(94) as u32
    };

    // every cell a run of one, so each position carries its own glyph
    let mut chunks = Vec::new();
    for cy in -1..=1 {
        for cx in -2..=0 {
            let layers = (0..SMALL.layers)
                .map(|l| {
                    (0..per_layer)
                        .map(|pos| TerrainRun::new(format!("t{}", code(cx, cy, l, pos)), 1))
                        .collect::<Vec<_>>()
                })
                .collect();
            chunks.push(Chunk { x: cx, y: cy, layers });
        }
    }

    let (grid, report) = assemble(&chunks, &table, SMALL);
    assert!(report.missing_terrain.is_empty());
    assert!(report.unexplored_chunks.is_empty());

    for chunk in &chunks {
        let ox = (chunk.x + 2) as usize;
        let oy = (chunk.y + 1) as usize;
        for l in 0..SMALL.layers {
            for r in 0..SMALL.rows {
                for k in 0..SMALL.cols {
                    let pos = r * SMALL.cols + k;
                    let want = char::from_u32(code(chunk.x, chunk.y, l, pos)).unwrap();
                    let got = grid
                        .cell(l, oy * SMALL.rows + r, ox * SMALL.cols + k)
                        .unwrap()
                        .symbol;
                    assert_eq!(got, want, "chunk ({}, {}) l{l} r{r} k{k}", chunk.x, chunk.y);
                }
            }
        }
    }
}

fn write_chunk(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn save_directory_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dims = ChunkDims {
        layers: 2,
        rows: 2,
        cols: 2,
    };
    write_chunk(
        dir.path(),
        "o.0.0",
        "# version 26\n{\"layers\":[[[\"field\",3],[\"forest\",1]],\n[[\"lake\",4]]]}\n",
    );
    write_chunk(
        dir.path(),
        "o.-1.0",
        "# version 26\n{\"layers\":[[[\"forest\",4]],[[\"forest\",4]]]}\n",
    );
    write_chunk(dir.path(), "master.gsav", "not a chunk");
    write_chunk(dir.path(), "o.1.2.map", "not a chunk either");

    let files = chunk_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let chunks = load_save(dir.path(), dims).unwrap();
    let table = terrain_table();
    let (grid, _) = assemble(&chunks, &table, dims);

    let layer0 = text::render_layer(grid.layer(0).unwrap());
    assert_eq!(layer0, "FF..\nFF.F\n");

    let out = dir.path().join("out");
    let written = text::emit(&grid, &out, &[1, 7]).unwrap();
    assert_eq!(written, vec![out.join("o_1")]);
    assert_eq!(fs::read_to_string(out.join("o_1")).unwrap(), "FF~~\nFF~~\n");
}

#[test]
fn unsupported_version_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    write_chunk(dir.path(), "o.0.0", "# version 27\n{\"layers\":[]}");

    let err = load_save(dir.path(), SMALL).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion { .. }), "got {err}");
    assert!(err.to_string().contains("o.0.0"), "got {err}");
}

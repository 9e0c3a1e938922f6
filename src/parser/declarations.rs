//! Source loader: finds declaration files and pulls one record type out of
//! them.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::RawTemplate;
use crate::processor::store::TemplateStore;

/// Every `.json` file below `root`, in load order.
///
/// Shallow files load before deep ones so that base game data is seen before
/// anything nested under it; files at the same depth load alphabetically.
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| Error::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == "json") {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| load_order(a, b));
    debug!("found {} declaration files under {}", files.len(), root.display());
    Ok(files)
}

fn load_order(a: &Path, b: &Path) -> Ordering {
    let depth_a = a.components().count();
    let depth_b = b.components().count();
    // whole-path string order, so `mod-extra/` sorts before `mod/`
    depth_a
        .cmp(&depth_b)
        .then_with(|| a.as_os_str().cmp(b.as_os_str()))
}

/// Decode every record of type `tag` out of one file's text.
///
/// `path` is only used to label errors.
pub fn load_records(json: &str, tag: &str, path: &Path) -> Result<Vec<RawTemplate>> {
    // Most files hold other kinds of data; don't bother parsing those.
    if !json.contains(tag) {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(json).map_err(|e| Error::json(path, e))?;
    let records = root.as_array().ok_or_else(|| Error::NotAnArray {
        path: path.to_path_buf(),
    })?;

    let mut out = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let kind = record.get("type").and_then(|t| t.as_str());
        if kind != Some(tag) {
            continue;
        }

        let raw: RawTemplate =
            serde_json::from_value(record.clone()).map_err(|e| Error::json(path, e))?;
        if raw.key().is_none() {
            return Err(Error::MissingIdentity {
                record: format!("{}: record {}", path.display(), index),
            });
        }
        out.push(raw);
    }

    Ok(out)
}

/// Load every `tag` record under `root` into a fresh store, honouring load
/// order for duplicate keys.
pub fn load_templates(root: &Path, tag: &str) -> Result<TemplateStore> {
    let mut store = TemplateStore::new();

    for file in source_files(root)? {
        let json = std::fs::read_to_string(&file).map_err(|e| Error::io(&file, e))?;
        let records = load_records(&json, tag, &file)?;
        if records.is_empty() {
            continue;
        }

        debug!("{}: {} `{}` records", file.display(), records.len(), tag);
        for record in records {
            store.put(record)?;
        }
    }

    info!("loaded {} `{}` templates from {}", store.len(), tag, root.display());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &str = "overmap_terrain";

    #[test]
    fn test_load_order_depth_then_lexical() {
        let mut files = vec![
            PathBuf::from("data/json/z/deep.json"),
            PathBuf::from("data/json/b.json"),
            PathBuf::from("data/json/a/x.json"),
            PathBuf::from("data/json/a.json"),
        ];
        files.sort_by(|a, b| load_order(a, b));

        assert_eq!(
            files,
            vec![
                PathBuf::from("data/json/a.json"),
                PathBuf::from("data/json/b.json"),
                PathBuf::from("data/json/a/x.json"),
                PathBuf::from("data/json/z/deep.json"),
            ]
        );
    }

    #[test]
    fn test_load_order_compares_whole_path_text() {
        let mut files = vec![
            PathBuf::from("json/mod/x.json"),
            PathBuf::from("json/mod-extra/x.json"),
            PathBuf::from("json/mod.d/x.json"),
        ];
        files.sort_by(|a, b| load_order(a, b));

        assert_eq!(
            files,
            vec![
                PathBuf::from("json/mod-extra/x.json"),
                PathBuf::from("json/mod.d/x.json"),
                PathBuf::from("json/mod/x.json"),
            ]
        );
    }

    #[test]
    fn test_load_records_filters_by_type() {
        let json = r#"[
            { "type": "overmap_terrain", "id": "field", "sym": 46 },
            { "type": "item", "id": "rock" },
            { "id": "untyped" },
            { "type": "overmap_terrain", "abstract": "generic_city", "color": "red" }
        ]"#;

        let records = load_records(json, TAG, Path::new("t.json")).expect("records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("field"));
        assert_eq!(records[0].sym, Some(46));
        assert_eq!(records[1].abstract_name.as_deref(), Some("generic_city"));
        assert_eq!(records[1].color.as_deref(), Some("red"));
    }

    #[test]
    fn test_load_records_skips_files_without_tag() {
        // not even valid JSON, but it never gets parsed
        let records = load_records("{ nope", TAG, Path::new("t.json")).expect("skipped");
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_records_malformed_json_is_fatal() {
        let json = r#"[ { "type": "overmap_terrain", "id": "x", } ]"#;
        let err = load_records(json, TAG, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, Error::Json { .. }), "got {err}");
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_records_missing_identity_is_fatal() {
        let json = r#"[ { "type": "overmap_terrain", "sym": 35 } ]"#;
        let err = load_records(json, TAG, Path::new("anon.json")).unwrap_err();
        assert!(matches!(err, Error::MissingIdentity { .. }), "got {err}");
        assert!(err.to_string().contains("anon.json: record 0"), "got {err}");
    }

    #[test]
    fn test_load_records_object_top_level_is_fatal() {
        let json = r#"{ "type": "overmap_terrain", "id": "x" }"#;
        let err = load_records(json, TAG, Path::new("obj.json")).unwrap_err();
        assert!(matches!(err, Error::NotAnArray { .. }), "got {err}");
    }
}

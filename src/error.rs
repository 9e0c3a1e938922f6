//! Fatal errors raised while loading declarations or save chunks.
//!
//! Anything in here aborts the whole run. Data gaps that the pipeline can
//! paper over (unknown terrain, unexplored chunks) are *not* errors; they
//! end up in `processor::assemble::AssemblyReport` instead.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walking {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: top level is not an array of records")]
    NotAnArray { path: PathBuf },

    /// `record` names where the record came from: `<file>: record <n>` when
    /// loaded from disk, otherwise its display name.
    #[error("{record} has neither `id` nor `abstract`")]
    MissingIdentity { record: String },

    #[error("template `{template}` copies from unknown template `{missing}`")]
    UnresolvedCopyFrom { template: String, missing: String },

    #[error("template `{template}` has a copy-from cycle: {}", .chain.join(" -> "))]
    CopyFromCycle { template: String, chain: Vec<String> },

    #[error("template `{template}` is missing required field `{field}`")]
    MissingField {
        template: String,
        field: &'static str,
    },

    #[error("{path}: not a chunk file name, expected `o.<x>.<y>`")]
    MalformedChunkName { path: PathBuf },

    #[error("{path}: unsupported version `{found}`")]
    UnsupportedVersion { path: PathBuf, found: String },

    #[error("{path}: {found} layers, at most {max} allowed")]
    LayerCount {
        path: PathBuf,
        found: usize,
        max: usize,
    },

    #[error("{path}: layer {layer} covers {found} cells instead of {expected}")]
    LayerLength {
        path: PathBuf,
        layer: usize,
        found: u64,
        expected: u64,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

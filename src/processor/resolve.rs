//! Template resolution: flatten copy-from chains and expand every concrete
//! terrain into its rotated or linear variants.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info};

use super::palette;
use super::store::TemplateStore;
use super::tables::{FACING_SUFFIXES, GlyphTables, LINEAR_SUFFIXES, UNKNOWN_GLYPH};
use crate::error::{Error, Result};
use crate::model::{RawTemplate, ResolvedTemplate, Rgb};

pub const FLAG_NO_ROTATE: &str = "NO_ROTATE";
pub const FLAG_LINEAR: &str = "LINEAR";

/// Every renderable terrain id and what it looks like.
#[derive(Debug, Clone)]
pub struct TerrainTable {
    templates: IndexMap<String, ResolvedTemplate>,
    tables: GlyphTables,
}

impl TerrainTable {
    pub fn exists(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedTemplate> {
        self.templates.get(id)
    }

    /// Character `id` draws with, `'?'` if either the id or its glyph code is
    /// unknown.
    pub fn symbol(&self, id: &str) -> char {
        self.templates
            .get(id)
            .and_then(|t| self.tables.symbol(t.sym))
            .unwrap_or(UNKNOWN_GLYPH)
    }

    /// Foreground/background pair for `id`; neutral when unknown or
    /// uncoloured.
    pub fn color(&self, id: &str) -> (Rgb, Rgb) {
        match self.templates.get(id).and_then(|t| t.color.as_deref()) {
            Some(name) => palette::resolve(name),
            None => palette::NEUTRAL,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

/// Resolve every template in `store`.
///
/// Any broken chain or incomplete concrete template fails the whole pass.
pub fn resolve(store: &TemplateStore, tables: &GlyphTables) -> Result<TerrainTable> {
    let mut templates = IndexMap::new();
    let mut variants = Vec::new();

    for (key, raw) in store.iter() {
        let merged = merge_chain(store, key, raw)?;
        if raw.is_abstract() {
            continue;
        }

        let base = finalize(merged)?;
        variants.extend(expand(&base, tables));
        templates.insert(base.id.clone(), base);
    }

    // Declared templates always win over a generated variant with the same id.
    let mut shadowed = 0usize;
    for variant in variants {
        match templates.entry(variant.id.clone()) {
            Entry::Occupied(_) => shadowed += 1,
            Entry::Vacant(slot) => {
                slot.insert(variant);
            }
        }
    }
    if shadowed > 0 {
        debug!("{} generated variants shadowed by declared templates", shadowed);
    }

    info!(
        "resolved {} templates into {} terrain ids",
        store.len(),
        templates.len()
    );

    Ok(TerrainTable {
        templates,
        tables: tables.clone(),
    })
}

/// Flatten `raw`'s copy-from chain, root first, `raw` last.
fn merge_chain(store: &TemplateStore, key: &str, raw: &RawTemplate) -> Result<RawTemplate> {
    let mut chain = vec![raw];
    let mut seen = HashSet::from([key.to_string()]);
    let mut names = vec![key.to_string()];

    let mut current = raw;
    while let Some(parent_key) = current.copy_from.as_deref() {
        names.push(parent_key.to_string());
        if !seen.insert(parent_key.to_string()) {
            return Err(Error::CopyFromCycle {
                template: key.to_string(),
                chain: names,
            });
        }

        current = store.get(parent_key).ok_or_else(|| Error::UnresolvedCopyFrom {
            template: key.to_string(),
            missing: parent_key.to_string(),
        })?;
        chain.push(current);
    }

    let mut records = chain.into_iter().rev();
    let mut merged = records.next().cloned().unwrap_or_default();
    for child in records {
        merged.overlay(child);
    }
    Ok(merged)
}

fn finalize(merged: RawTemplate) -> Result<ResolvedTemplate> {
    let id = merged.id.ok_or_else(|| Error::MissingField {
        template: merged.name.clone().unwrap_or_default(),
        field: "id",
    })?;
    let sym = merged.sym.ok_or_else(|| Error::MissingField {
        template: id.clone(),
        field: "sym",
    })?;

    Ok(ResolvedTemplate {
        id,
        sym,
        kind: merged.kind,
        name: merged.name,
        color: merged.color,
        see_cost: merged.see_cost,
        extras: merged.extras,
        mondensity: merged.mondensity,
        flags: merged.flags.unwrap_or_default(),
        spawns: merged.spawns,
        mapgen: merged.mapgen.unwrap_or_default(),
    })
}

/// Suffixed copies of `base`; the base itself is not included.
fn expand(base: &ResolvedTemplate, tables: &GlyphTables) -> Vec<ResolvedTemplate> {
    if base.has_flag(FLAG_NO_ROTATE) {
        return Vec::new();
    }

    if base.has_flag(FLAG_LINEAR) {
        return LINEAR_SUFFIXES
            .iter()
            .map(|&(suffix, sym)| base.variant(suffix, sym))
            .collect();
    }

    FACING_SUFFIXES
        .iter()
        .enumerate()
        .map(|(facing, suffix)| base.variant(suffix, tables.rotate(base.sym, facing)))
        .collect()
}

//! Raw templates keyed by id or abstract name, before any resolution.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::RawTemplate;

#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: IndexMap<String, RawTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `record` under its abstract name, or its id if it has none.
    ///
    /// A later record with the same key replaces the earlier one but keeps
    /// the earlier one's position; mods override base data this way.
    pub fn put(&mut self, record: RawTemplate) -> Result<()> {
        let key = match record.key() {
            Some(key) => key.to_string(),
            None => {
                return Err(Error::MissingIdentity {
                    record: format!("template (name: {:?})", record.name),
                });
            }
        };

        if self.templates.insert(key.clone(), record).is_some() {
            debug!("template `{}` overridden by a later declaration", key);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&RawTemplate> {
        self.templates.get(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// `(key, record)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawTemplate)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }
}

//! Flattened, de-duplicated view of a catalog.

use crate::model::{Catalog, CatalogEntry};
use crate::normalize::normalize;
use log::debug;
use std::collections::HashMap;

/// Ordered candidate list built once per catalog load.
///
/// Entries keep first-seen order across the whole traversal, and
/// `group_order` equals the entry's position. Rebuild on change; the index
/// is never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    entries: Vec<CatalogEntry>,
    normalized: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl CatalogIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = Self::default();
        let mut skipped = 0usize;

        for (section, group, row) in catalog.rows() {
            let key = normalize(&row.name);
            if index.by_name.contains_key(&key) {
                skipped += 1;
                continue;
            }

            let order = index.entries.len();
            index.by_name.insert(key.clone(), order);
            index.normalized.push(key);
            index.entries.push(CatalogEntry {
                name: row.name.clone(),
                group_order: order,
                section: section.title.clone(),
                group: group.title.clone(),
            });
        }

        debug!(
            "CatalogIndex: {} entries, {} duplicate names skipped",
            index.entries.len(),
            skipped
        );
        index
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by normalized name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name.get(&normalize(name)).map(|&i| &self.entries[i])
    }

    /// Display position for an arbitrary service name: its exact entry if
    /// there is one, otherwise the first entry whose normalized name contains
    /// or is contained by it. Names that normalize to nothing have no
    /// position.
    pub fn catalog_order(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }
        if let Some(&i) = self.by_name.get(&key) {
            return Some(self.entries[i].group_order);
        }

        self.normalized
            .iter()
            .position(|candidate| {
                !candidate.is_empty()
                    && (candidate.contains(key.as_str()) || key.contains(candidate.as_str()))
            })
            .map(|i| self.entries[i].group_order)
    }
}

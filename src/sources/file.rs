use crate::error::{CatalogError, Result};
use crate::model::Catalog;
use crate::sources::{CatalogSource, parse_json, parse_toml};
use log::info;
use std::fs;
use std::path::PathBuf;

/// A catalog on disk; `.json` files are read as JSON, anything else as TOML.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl CatalogSource for FileSource {
    fn load(&self) -> Result<Catalog> {
        let content = fs::read_to_string(&self.path).map_err(|e| CatalogError::io(&self.path, e))?;
        let catalog = if self.is_json() {
            parse_json(&content)?
        } else {
            parse_toml(&content)?
        };
        info!("FileSource: loaded {} rows from {:?}", catalog.row_count(), self.path);
        Ok(catalog)
    }
}

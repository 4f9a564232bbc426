use crate::error::{CatalogError, Result};
use crate::model::Catalog;

pub trait CatalogSource {
    fn load(&self) -> Result<Catalog>;
}

pub mod bundled;
pub mod file;

pub use bundled::BundledSource;
pub use file::FileSource;

pub fn parse_toml(content: &str) -> Result<Catalog> {
    let catalog: Catalog = toml::from_str(content)?;
    ensure_not_empty(catalog)
}

pub fn parse_json(content: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(content)?;
    ensure_not_empty(catalog)
}

fn ensure_not_empty(catalog: Catalog) -> Result<Catalog> {
    if catalog.row_count() == 0 {
        return Err(CatalogError::EmptyCatalog);
    }
    Ok(catalog)
}

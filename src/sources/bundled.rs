use crate::error::Result;
use crate::model::Catalog;
use crate::sources::{CatalogSource, parse_toml};
use log::debug;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.toml");

/// The spa's own price list, compiled into the binary.
pub struct BundledSource;

impl CatalogSource for BundledSource {
    fn load(&self) -> Result<Catalog> {
        let catalog = parse_toml(BUNDLED_CATALOG)?;
        debug!("BundledSource: {} rows", catalog.row_count());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = BundledSource.load().unwrap();
        assert_eq!(catalog.sections.first().map(|s| s.title.as_str()), Some("Body Massage"));
        assert_eq!(catalog.sections.len(), 9);
        assert!(catalog.row_count() > 100);
    }
}

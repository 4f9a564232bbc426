use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A service catalog: sections hold groups, groups hold rows.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default)]
    pub sections: Vec<CatalogSection>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSection {
    pub title: String,
    #[serde(default)]
    pub groups: Vec<CatalogGroup>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogGroup {
    pub title: String,
    /// Display headers, e.g. `["Service", "M", "NM"]`.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<CatalogRow>,
}

/// One bookable item. Only `name` takes part in matching; everything else is
/// a display column keyed by header.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    pub name: String,
    #[serde(flatten)]
    pub columns: BTreeMap<String, String>,
}

impl CatalogRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: BTreeMap::new(),
        }
    }

    pub fn with_column(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(key.into(), value.into());
        self
    }

    pub fn column(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.column("Description")
    }
}

impl Catalog {
    /// Every row in traversal order: section-major, then group, then row.
    pub fn rows(&self) -> impl Iterator<Item = (&CatalogSection, &CatalogGroup, &CatalogRow)> {
        self.sections.iter().flat_map(|section| {
            section
                .groups
                .iter()
                .flat_map(move |group| group.rows.iter().map(move |row| (section, group, row)))
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }
}

/// A de-duplicated catalog item with its first-seen position.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub group_order: usize,
    pub section: String,
    pub group: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, group_order: usize) -> Self {
        Self {
            name: name.into(),
            group_order,
            section: String::new(),
            group: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_section_then_group_then_row_major() {
        let catalog = Catalog {
            sections: vec![
                CatalogSection {
                    title: "A".into(),
                    groups: vec![
                        CatalogGroup {
                            title: "A1".into(),
                            columns: vec![],
                            rows: vec![CatalogRow::new("one"), CatalogRow::new("two")],
                        },
                        CatalogGroup {
                            title: "A2".into(),
                            columns: vec![],
                            rows: vec![CatalogRow::new("three")],
                        },
                    ],
                },
                CatalogSection {
                    title: "B".into(),
                    groups: vec![CatalogGroup {
                        title: "B1".into(),
                        columns: vec![],
                        rows: vec![CatalogRow::new("four")],
                    }],
                },
            ],
        };

        let seen: Vec<(&str, &str, &str)> = catalog
            .rows()
            .map(|(s, g, r)| (s.title.as_str(), g.title.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("A", "A1", "one"),
                ("A", "A1", "two"),
                ("A", "A2", "three"),
                ("B", "B1", "four"),
            ]
        );
        assert_eq!(catalog.row_count(), 4);
    }

    #[test]
    fn row_columns_flatten_from_toml() {
        let row: CatalogRow =
            toml::from_str(r#"name = "Hot Stone"
M = "PHP 350"
NM = "PHP 400""#)
                .unwrap();
        assert_eq!(row.name, "Hot Stone");
        assert_eq!(row.column("M"), Some("PHP 350"));
        assert_eq!(row.column("NM"), Some("PHP 400"));
        assert_eq!(row.description(), None);
    }
}

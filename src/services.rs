//! Bookable service records derived from the catalog.
//!
//! The booking backend keeps one `Service` per catalog name with a price and
//! a duration. Catalog rows only carry display strings ("PHP 1,500",
//! "Sauna (20 mins)"), so both are inferred here.

use crate::model::{Catalog, CatalogGroup, CatalogRow};
use log::{debug, info};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.(\d{1,2}))?").expect("valid price pattern"));

const DEFAULT_SECTION: &str = "Services";
const DEFAULT_GROUP: &str = "General";

/// Price in centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(pub u64);

impl Price {
    pub fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// First number in `value`, thousands separators ignored.
pub fn parse_price(value: &str) -> Option<Price> {
    let cleaned = value.replace(',', "");
    let caps = PRICE_PATTERN.captures(&cleaned)?;
    let whole: u64 = caps.get(1)?.as_str().parse().ok()?;
    let cents = match caps.get(2).map(|m| m.as_str()) {
        Some(frac) if frac.len() == 1 => frac.parse::<u64>().ok()? * 10,
        Some(frac) => frac.parse::<u64>().ok()?,
        None => 0,
    };
    whole.checked_mul(100)?.checked_add(cents).map(Price)
}

/// Session length in minutes, from the group title or the service name.
pub fn infer_duration(group_title: &str, service_name: &str) -> u32 {
    let group = group_title.to_lowercase();
    let name = service_name.to_lowercase();
    if group.contains("30 minute") || name.contains("30 minutes") {
        return 30;
    }
    if name.contains("20 min") {
        return 20;
    }
    60
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: String,
    pub section: String,
    pub group: String,
    pub duration_minutes: u32,
    pub price: Price,
}

impl ServiceRecord {
    pub fn description(&self) -> String {
        format!("{} / {}", self.section, self.group)
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSync {
    pub records: Vec<ServiceRecord>,
    pub parsed_rows: usize,
    pub duplicates_skipped: usize,
}

fn row_price(group: &CatalogGroup, row: &CatalogRow) -> Price {
    // declared columns first, in header order
    let declared = group.columns.iter().filter_map(|c| row.column(c));
    let remaining = row
        .columns
        .iter()
        .filter(|(key, _)| key.as_str() != "Description" && !group.columns.contains(key))
        .map(|(_, value)| value.as_str());

    declared
        .chain(remaining)
        .find_map(parse_price)
        .unwrap_or_default()
}

/// One record per distinct service name, in catalog order. Names are
/// compared verbatim here, unlike the matcher's normalized comparison.
pub fn service_records(catalog: &Catalog) -> ServiceSync {
    let mut sync = ServiceSync::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for (section, group, row) in catalog.rows() {
        sync.parsed_rows += 1;
        let name = row.name.trim();
        if !seen.insert(name) {
            debug!("service_records: duplicate '{}' in {}", name, group.title);
            sync.duplicates_skipped += 1;
            continue;
        }

        let section_title = non_empty_or(&section.title, DEFAULT_SECTION);
        let group_title = non_empty_or(&group.title, DEFAULT_GROUP);

        sync.records.push(ServiceRecord {
            name: name.to_string(),
            section: section_title.to_string(),
            group: group_title.to_string(),
            duration_minutes: infer_duration(&group.title, name),
            price: row_price(group, row),
        });
    }

    info!(
        "service_records: parsed={}, unique={}, duplicates={}",
        sync.parsed_rows,
        sync.records.len(),
        sync.duplicates_skipped
    );
    sync
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

//! Booking-form service preselection.
//!
//! The booking page can be opened with `?service=<name>` from the catalog
//! page. The bookable list comes from the backend, not from the catalog, so
//! the request is matched against that list while the catalog only decides
//! display order.

use crate::index::CatalogIndex;
use crate::matcher::{Candidate, MatchResult, ServiceMatcher};
use log::info;
use serde::{Deserialize, Serialize};

/// A service as served by the bookings API.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BookableService {
    pub id: u64,
    pub name: String,
    pub duration_minutes: u32,
    pub price: String,
}

impl Candidate for BookableService {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefillOutcome {
    /// Services not loaded yet; try again after `set_services`.
    Pending,
    /// Already applied once for this page load.
    AlreadyApplied,
    NoRequest,
    Selected { id: u64, name: String },
    NotFound { requested: String },
}

/// Indices of `services` sorted by catalog position; unknown names last,
/// ties by case-insensitive name.
pub fn catalog_ordering(services: &[BookableService], index: &CatalogIndex) -> Vec<usize> {
    let mut keyed: Vec<(usize, usize)> = services
        .iter()
        .enumerate()
        .map(|(i, s)| (i, index.catalog_order(&s.name).unwrap_or(usize::MAX)))
        .collect();

    keyed.sort_by(|&(a, a_order), &(b, b_order)| {
        a_order
            .cmp(&b_order)
            .then_with(|| {
                services[a]
                    .name
                    .to_lowercase()
                    .cmp(&services[b].name.to_lowercase())
            })
            .then_with(|| services[a].name.cmp(&services[b].name))
    });
    keyed.into_iter().map(|(i, _)| i).collect()
}

pub fn resolve_requested_service<'a>(
    requested: &str,
    services: &'a [BookableService],
    matcher: &ServiceMatcher,
) -> MatchResult<&'a BookableService> {
    matcher.match_query(requested, services)
}

pub struct BookingPrefill {
    index: CatalogIndex,
    matcher: ServiceMatcher,
    services: Vec<BookableService>,
    ordered_indices: Vec<usize>,
    selected_id: Option<u64>,
    applied: bool,
}

impl BookingPrefill {
    pub fn new(index: CatalogIndex, matcher: ServiceMatcher) -> Self {
        Self {
            index,
            matcher,
            services: Vec::new(),
            ordered_indices: Vec::new(),
            selected_id: None,
            applied: false,
        }
    }

    /// Replaces the bookable list. A selection that no longer exists is
    /// cleared.
    pub fn set_services(&mut self, services: Vec<BookableService>) {
        self.services = services;
        self.ordered_indices = catalog_ordering(&self.services, &self.index);

        if let Some(id) = self.selected_id {
            if !self.services.iter().any(|s| s.id == id) {
                self.selected_id = None;
            }
        }
    }

    /// Services in display order.
    pub fn services(&self) -> impl Iterator<Item = &BookableService> {
        self.ordered_indices.iter().map(|&i| &self.services[i])
    }

    /// Applies a `?service=` request at most once per page load.
    pub fn apply_request(&mut self, requested: Option<&str>) -> PrefillOutcome {
        if self.applied {
            return PrefillOutcome::AlreadyApplied;
        }
        if self.services.is_empty() {
            return PrefillOutcome::Pending;
        }
        self.applied = true;

        // a blank `?service=` is the same as none
        let Some(requested) = requested.filter(|r| !r.trim().is_empty()) else {
            return PrefillOutcome::NoRequest;
        };

        match resolve_requested_service(requested, &self.services, &self.matcher) {
            MatchResult::Matched(service) => {
                info!("BookingPrefill: '{}' preselected as '{}'", requested, service.name);
                self.selected_id = Some(service.id);
                PrefillOutcome::Selected {
                    id: service.id,
                    name: service.name.clone(),
                }
            }
            MatchResult::NoMatch => {
                info!("BookingPrefill: '{}' is not bookable", requested);
                PrefillOutcome::NotFound {
                    requested: requested.to_string(),
                }
            }
        }
    }

    pub fn select(&mut self, id: u64) -> bool {
        if self.services.iter().any(|s| s.id == id) {
            self.selected_id = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&BookableService> {
        self.selected_id
            .and_then(|id| self.services.iter().find(|s| s.id == id))
    }
}

//! Service catalog lookup for the spa booking site.
//!
//! Maps free-text service requests (typically a `?service=` query parameter)
//! onto a static, hierarchical service catalog or onto the backend's list of
//! bookable services.

pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod prefill;
pub mod services;
pub mod sources;
pub mod suggest;

pub use error::{CatalogError, Result};
pub use index::CatalogIndex;
pub use matcher::{Candidate, Match, MatchResult, MatchTier, ServiceMatcher, match_query};
pub use model::{Catalog, CatalogEntry, CatalogGroup, CatalogRow, CatalogSection};
pub use normalize::{normalize, tokenize};

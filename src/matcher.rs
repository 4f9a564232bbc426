use crate::model::CatalogEntry;
use crate::normalize::{normalize, tokenize};
use log::debug;
use std::collections::HashSet;

/// Token-overlap scores below this never produce a match.
pub const DEFAULT_MIN_OVERLAP_SCORE: f64 = 0.5;

/// Anything the matcher can pick: it only ever reads the name.
pub trait Candidate {
    fn name(&self) -> &str;
}

impl Candidate for CatalogEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Candidate for String {
    fn name(&self) -> &str {
        self
    }
}

impl Candidate for &str {
    fn name(&self) -> &str {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<T> {
    Matched(T),
    NoMatch,
}

impl<T> MatchResult<T> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn matched(self) -> Option<T> {
        match self {
            MatchResult::Matched(t) => Some(t),
            MatchResult::NoMatch => None,
        }
    }
}

impl<T> From<Option<T>> for MatchResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(t) => MatchResult::Matched(t),
            None => MatchResult::NoMatch,
        }
    }
}

/// Which fallback tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchTier {
    Exact,
    Substring,
    TokenOverlap { score: f64 },
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Substring => write!(f, "substring"),
            MatchTier::TokenOverlap { score } => write!(f, "token overlap {:.3}", score),
        }
    }
}

/// A committed match with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a, T> {
    pub candidate: &'a T,
    /// Index into the candidate slice.
    pub position: usize,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceMatcher {
    min_overlap_score: f64,
}

impl Default for ServiceMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMatcher {
    pub fn new() -> Self {
        Self {
            min_overlap_score: DEFAULT_MIN_OVERLAP_SCORE,
        }
    }

    /// `score` is clamped into `(0, 1]`; a zero threshold would let any
    /// first candidate win with no shared tokens.
    pub fn with_min_overlap_score(score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(f64::EPSILON, 1.0)
        } else {
            DEFAULT_MIN_OVERLAP_SCORE
        };
        Self {
            min_overlap_score: score,
        }
    }

    pub fn min_overlap_score(&self) -> f64 {
        self.min_overlap_score
    }

    /// Picks at most one candidate for `query`: exact normalized name, then
    /// substring containment either way, then best token overlap. Ties go to
    /// the earliest candidate.
    pub fn find<'a, T: Candidate>(&self, query: &str, candidates: &'a [T]) -> Option<Match<'a, T>> {
        let q = normalize(query);
        if q.is_empty() {
            debug!("ServiceMatcher: empty query '{}'", query);
            return None;
        }

        let names: Vec<String> = candidates.iter().map(|c| normalize(c.name())).collect();

        if let Some(position) = names.iter().position(|name| *name == q) {
            return Some(self.hit(candidates, position, MatchTier::Exact, &q));
        }

        // Empty names would be "contained" in every query.
        if let Some(position) = names.iter().position(|name| {
            !name.is_empty() && (name.contains(q.as_str()) || q.contains(name.as_str()))
        }) {
            return Some(self.hit(candidates, position, MatchTier::Substring, &q));
        }

        let query_tokens = tokenize(query);
        let query_set: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();

        let mut best: Option<(usize, f64)> = None;
        for (position, candidate) in candidates.iter().enumerate() {
            let candidate_tokens = tokenize(candidate.name());
            let candidate_set: HashSet<&str> = candidate_tokens.iter().map(String::as_str).collect();
            let overlap = query_set.intersection(&candidate_set).count();
            let denominator = query_tokens.len().max(candidate_tokens.len()).max(1);
            let score = overlap as f64 / denominator as f64;

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((position, score));
            }
        }

        match best {
            Some((position, score)) if score >= self.min_overlap_score => Some(self.hit(
                candidates,
                position,
                MatchTier::TokenOverlap { score },
                &q,
            )),
            Some((position, score)) => {
                debug!(
                    "ServiceMatcher: no match for '{}' (best '{}' scored {:.3})",
                    q,
                    candidates[position].name(),
                    score
                );
                None
            }
            None => None,
        }
    }

    pub fn match_query<'a, T: Candidate>(&self, query: &str, candidates: &'a [T]) -> MatchResult<&'a T> {
        self.find(query, candidates).map(|m| m.candidate).into()
    }

    fn hit<'a, T: Candidate>(&self, candidates: &'a [T], position: usize, tier: MatchTier, q: &str) -> Match<'a, T> {
        let candidate = &candidates[position];
        debug!("ServiceMatcher: '{}' -> '{}' ({})", q, candidate.name(), tier);
        Match {
            candidate,
            position,
            tier,
        }
    }
}

/// Matches with the default threshold.
pub fn match_query<'a, T: Candidate>(query: &str, candidates: &'a [T]) -> MatchResult<&'a T> {
    ServiceMatcher::new().match_query(query, candidates)
}

use crate::matcher::Candidate;
use crate::normalize::normalize;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

/// "Did you mean" ranking for queries the matcher could not place.
pub struct Suggester {
    matcher: Matcher,
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new()
    }
}

impl Suggester {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Candidates whose names fuzzily contain the query, best first. Equal
    /// scores keep candidate order.
    pub fn suggest<'a, T: Candidate>(&mut self, query: &str, candidates: &'a [T], limit: usize) -> Vec<(&'a T, u32)> {
        let needle = normalize(query);
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let pattern = Pattern::parse(&needle, CaseMatching::Smart, Normalization::Smart);
        let mut buf = Vec::new();

        let mut scored: Vec<(&T, u32)> = candidates
            .iter()
            .filter_map(|candidate| {
                let haystack = Utf32Str::new(candidate.name(), &mut buf);
                pattern
                    .score(haystack, &mut self.matcher)
                    .map(|score| (candidate, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);
        scored
    }
}

pub fn suggest<'a, T: Candidate>(query: &str, candidates: &'a [T], limit: usize) -> Vec<&'a T> {
    Suggester::new()
        .suggest(query, candidates, limit)
        .into_iter()
        .map(|(candidate, _)| candidate)
        .collect()
}

//! Fuzzy scoring of a typed query against candidate text
//!
//! Four strategies are tried and the best score wins:
//! - exact case-insensitive equality (100)
//! - candidate starts with the query (90 - 99.9)
//! - query appears elsewhere in the candidate (80 - 89.9)
//! - query is a prefix of the candidate's word initials (75 - 79.9)
//!
//! Within a strategy, the score grows with how much of the candidate the
//! query covers, so the more completely typed label ranks first.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;

pub const EXACT_SCORE: f64 = 100.0;
const PREFIX_BASE: f64 = 90.0;
const SUBSTRING_BASE: f64 = 80.0;
const INITIALS_BASE: f64 = 75.0;

/// How a query matched its candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    Initials,
    Substring,
    Prefix,
    Exact,
}

/// A scored item from a filter pass
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub item: T,
    pub score: f64,
    pub kind: MatchKind,
}

/// Stateless scorer. Identical inputs always produce identical scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Best strategy and its score, or None when nothing matches
    pub fn best_match(&self, query: &str, candidate: &str) -> Option<(MatchKind, f64)> {
        let query = query.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        if query.is_empty() || candidate.is_empty() {
            return None;
        }

        let q_len = query.chars().count() as f64;
        let c_len = candidate.chars().count() as f64;

        if query == candidate {
            return Some((MatchKind::Exact, EXACT_SCORE));
        }
        if candidate.starts_with(&query) {
            return Some((MatchKind::Prefix, PREFIX_BASE + 9.9 * (q_len / c_len)));
        }
        if candidate.contains(&query) {
            return Some((MatchKind::Substring, SUBSTRING_BASE + 9.9 * (q_len / c_len)));
        }

        let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
        let initials: String = candidate
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect();
        if !compact.is_empty() && initials.starts_with(&compact) {
            let ratio = compact.chars().count() as f64 / initials.chars().count() as f64;
            return Some((MatchKind::Initials, INITIALS_BASE + 4.9 * ratio));
        }

        None
    }

    /// Score in [0, 100]; 0 when nothing matches
    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        self.best_match(query, candidate)
            .map(|(_, score)| score)
            .unwrap_or(0.0)
    }

    /// Whether the candidate is accepted at the given threshold
    pub fn matches(&self, query: &str, candidate: &str, threshold: f64) -> bool {
        self.best_match(query, candidate)
            .is_some_and(|(_, score)| score >= threshold)
    }

    /// Keep the items whose key clears the threshold, best first.
    /// Equal scores are ordered by lowercase key, then by input order.
    pub fn filter<'a, T, I, K>(&self, query: &str, items: I, key: K, threshold: f64) -> Vec<Scored<&'a T>>
    where
        I: IntoIterator<Item = &'a T>,
        K: Fn(&T) -> &str,
        T: 'a,
    {
        let mut scored: Vec<Scored<&'a T>> = items
            .into_iter()
            .filter_map(|item| {
                let (kind, score) = self.best_match(query, key(item))?;
                (score >= threshold).then_some(Scored { item, score, kind })
            })
            .collect();

        scored.sort_by_cached_key(|s| (Reverse(OrderedFloat(s.score)), key(s.item).to_lowercase()));
        scored
    }
}

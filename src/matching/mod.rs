//! Fuzzy matching of typed text against entity labels, verbs and parameter values

pub mod fuzzy;

pub use fuzzy::{FuzzyMatcher, MatchKind, Scored, EXACT_SCORE};

use crate::catalog::Entity;

/// Filter entities by label, best first, then apply the collapse rule:
/// when the single top result is an exact label match, everything else is
/// dropped and the query counts as disambiguated.
pub fn filter_entities<'a, I>(
    matcher: &FuzzyMatcher,
    query: &str,
    entities: I,
    threshold: f64,
) -> Vec<Scored<&'a Entity>>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut result = matcher.filter(query, entities, |e: &Entity| e.label.as_str(), threshold);

    // Stable re-sort so equal labels fall back to id order
    result.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.item.label.to_lowercase().cmp(&b.item.label.to_lowercase()))
            .then_with(|| a.item.id.cmp(&b.item.id))
    });

    let single_exact = match result.as_slice() {
        [first, rest @ ..] => {
            first.kind == MatchKind::Exact && rest.first().map_or(true, |s| s.kind != MatchKind::Exact)
        }
        [] => false,
    };
    if single_exact {
        result.truncate(1);
    }
    result
}

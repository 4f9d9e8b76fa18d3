//! Query segmentation - where does the entity label end and the verb begin?
//!
//! The input has no delimiter: "living room lamp dim 40" could in principle
//! be a device called "living room lamp dim" given the parameter "40". The
//! segmenter tries the query with zero, one and two trailing words removed
//! and trusts a *unique* device match on a shorter label over an empty or
//! ambiguous match on the longer one, since people type name, then verb,
//! then an optional parameter.
//!
//! Only one trailing parameter token is ever extracted.

use crate::catalog::{Catalog, Entity};
use crate::command::registry::CommandRegistry;
use crate::core::config::ResolverConfig;
use crate::matching::{filter_entities, FuzzyMatcher};
use serde::{Deserialize, Serialize};

/// Which decision rule produced a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRule {
    /// Last word is the verb
    TrailingVerb,
    /// Second-to-last word is the verb, last word the parameter
    TrailingVerbAndParam,
    /// Whole query is (part of) an entity label
    Unsegmented,
}

/// A query split into entity label, verb token and parameter token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub verb: Option<String>,
    pub param: Option<String>,
    pub rule: SegmentRule,
}

impl Segment {
    pub fn unsegmented(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verb: None,
            param: None,
            rule: SegmentRule::Unsegmented,
        }
    }

    pub fn verb_token(&self) -> &str {
        self.verb.as_deref().unwrap_or("")
    }

    pub fn params(&self) -> Vec<String> {
        self.param.iter().cloned().collect()
    }
}

/// Splits queries against the actionable devices of one catalog snapshot
pub struct QuerySegmenter<'a> {
    devices: Vec<&'a Entity>,
    registry: &'a CommandRegistry,
    matcher: FuzzyMatcher,
    threshold: f64,
}

impl<'a> QuerySegmenter<'a> {
    pub fn new(catalog: &'a Catalog, registry: &'a CommandRegistry, config: &ResolverConfig) -> Self {
        Self {
            devices: catalog
                .devices()
                .iter()
                .filter(|d| registry.is_actionable(d))
                .collect(),
            registry,
            matcher: FuzzyMatcher::new(),
            threshold: config.coarse_threshold,
        }
    }

    /// Devices the segmenter considers: those some command can target
    pub fn devices(&self) -> &[&'a Entity] {
        &self.devices
    }

    fn starts_verb(&self, entity: &Entity, word: &str) -> bool {
        let word = word.to_lowercase();
        self.registry
            .eligible_for(entity)
            .any(|spec| spec.verb.starts_with(&word))
    }

    fn unique_match(&self, label: &str) -> Vec<&'a Entity> {
        filter_entities(&self.matcher, label, self.devices.iter().copied(), self.threshold)
            .into_iter()
            .map(|s| s.item)
            .collect()
    }

    pub fn segment(&self, query: &str) -> Segment {
        let words: Vec<&str> = query.split_whitespace().collect();
        let n = words.len();
        if n == 0 {
            return Segment::unsegmented("");
        }

        let full_label = words.join(" ");
        let minus_one_label = words[..n - 1].join(" ");
        let minus_two_label = words[..n.saturating_sub(2)].join(" ");

        let full = self.unique_match(&full_label);
        let minus_one = self.unique_match(&minus_one_label);
        let minus_two = self.unique_match(&minus_two_label);

        // When the full query and the shorter one pin the same device, the
        // last word may still be part of its label; it only reads as a verb
        // if it could start one.
        let (pinned, segment) = if minus_one.len() == 1
            && (full.is_empty()
                || (full.len() == 1
                    && full[0].id == minus_one[0].id
                    && self.starts_verb(minus_one[0], words[n - 1])))
        {
            let segment = Segment {
                label: minus_one_label,
                verb: Some(words[n - 1].to_string()),
                param: None,
                rule: SegmentRule::TrailingVerb,
            };
            (minus_one[0], segment)
        } else if minus_two.len() == 1 && full.is_empty() && minus_one.is_empty() {
            let segment = Segment {
                label: minus_two_label,
                verb: Some(words[n - 2].to_string()),
                param: Some(words[n - 1].to_string()),
                rule: SegmentRule::TrailingVerbAndParam,
            };
            (minus_two[0], segment)
        } else {
            tracing::debug!(query = %full_label, full = full.len(), "query not segmented");
            return Segment::unsegmented(full_label);
        };

        let segment = refine_with_label(&words, pinned, segment);
        tracing::debug!(
            label = %segment.label,
            verb = ?segment.verb,
            param = ?segment.param,
            rule = ?segment.rule,
            "segmented query"
        );
        segment
    }
}

/// When the query begins with the pinned device's complete label, the words
/// after that label are the verb and parameter. Nothing after it means the
/// label itself was just typed in full.
fn refine_with_label(words: &[&str], entity: &Entity, segment: Segment) -> Segment {
    let label_words: Vec<&str> = entity.label.split_whitespace().collect();
    let k = label_words.len();
    let starts_with_label = k > 0
        && words.len() >= k
        && words
            .iter()
            .zip(&label_words)
            .all(|(typed, label)| typed.to_lowercase() == label.to_lowercase());
    if !starts_with_label {
        return segment;
    }

    let label = words[..k].join(" ");
    match &words[k..] {
        [] => Segment::unsegmented(label),
        [verb] => Segment {
            label,
            verb: Some(verb.to_string()),
            param: None,
            rule: SegmentRule::TrailingVerb,
        },
        [verb, param] => Segment {
            label,
            verb: Some(verb.to_string()),
            param: Some(param.to_string()),
            rule: SegmentRule::TrailingVerbAndParam,
        },
        _ => segment,
    }
}

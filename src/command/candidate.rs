//! Resolution output: scored candidates and executable intents

use crate::command::segmenter::Segment;
use crate::core::types::{EntityId, ResolutionState};
use serde::{Deserialize, Serialize};

/// Implicit command every scene supports
pub const SCENE_VERB: &str = "run";

/// One interpretation of the current query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Pinned entity; never more than one
    pub entity: Option<EntityId>,
    pub verb: Option<String>,
    pub params: Vec<String>,
    pub display_label: String,
    /// False when a required parameter is missing or fails validation
    pub is_valid: bool,
    pub score: f64,
    /// Verbs the entity accepts; filled while the entity is still ambiguous
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eligible_verbs: Vec<String>,
}

impl Candidate {
    pub fn entity_only(entity: EntityId, label: &str, score: f64) -> Self {
        Self {
            entity: Some(entity),
            verb: None,
            params: Vec::new(),
            display_label: label.to_string(),
            is_valid: false,
            score,
            eligible_verbs: Vec::new(),
        }
    }

    pub fn with_verb(entity: EntityId, label: &str, verb: &str, params: Vec<String>, score: f64) -> Self {
        let mut display_label = format!("{} {}", label, verb);
        for param in &params {
            display_label.push(' ');
            display_label.push_str(param);
        }
        Self {
            entity: Some(entity),
            verb: Some(verb.to_string()),
            params,
            display_label,
            is_valid: true,
            score,
            eligible_verbs: Vec::new(),
        }
    }

    pub fn valid(mut self, is_valid: bool) -> Self {
        self.is_valid = is_valid;
        self
    }

    pub fn first_param(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// Entity + verb + valid parameters, ready for the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIntent {
    pub entity: EntityId,
    pub verb: String,
    pub params: Vec<String>,
}

impl ResolvedIntent {
    /// Only valid candidates with both an entity and a verb qualify
    pub fn try_from_candidate(candidate: &Candidate) -> Option<Self> {
        if !candidate.is_valid {
            return None;
        }
        Some(Self {
            entity: candidate.entity.clone()?,
            verb: candidate.verb.clone()?,
            params: candidate.params.clone(),
        })
    }
}

/// Everything one resolution call produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub state: ResolutionState,
    pub candidates: Vec<Candidate>,
    /// How the query was split into label, verb and parameter
    pub segment: Segment,
    /// Device whose live status the host should show, when enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_entity: Option<EntityId>,
}

impl Resolution {
    /// The executable intent once the query is fully resolved. A resolved
    /// parameter may still list longer completions after the typed one.
    pub fn intent(&self) -> Option<ResolvedIntent> {
        match (self.state, self.candidates.as_slice()) {
            (ResolutionState::Resolved, [first, ..]) => ResolvedIntent::try_from_candidate(first),
            _ => None,
        }
    }

    /// Entities referenced by the candidates, in first-seen order
    pub fn entities(&self) -> Vec<&EntityId> {
        let mut seen: Vec<&EntityId> = Vec::new();
        for id in self.candidates.iter().filter_map(|c| c.entity.as_ref()) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
